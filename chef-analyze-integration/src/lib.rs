//! Helpers for driving a compiled `chef-analyze` binary from tests.

pub mod driver;
pub mod process;

pub use driver::{chef_analyze, resolve_binary, resolve_binary_for, ChefAnalyze, BINARY_ENV_VAR};
pub use process::{Invocation, ProcessConfig, LAUNCH_FAILURE_EXIT_CODE};
