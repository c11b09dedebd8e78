pub mod error;
pub mod finder;
pub mod settings;

pub use error::{ChefAnalyzeError, Result};
pub use finder::{
    find_chef_workstation_config_file, find_config_file, find_config_file_from,
    DEFAULT_CHEF_DIRECTORY, DEFAULT_CHEF_WORKSTATION_DIRECTORY, DEFAULT_FILE_NAME,
};
pub use settings::WorkstationConfig;
