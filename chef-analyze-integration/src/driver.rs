use crate::process::{run, Invocation, ProcessConfig};
use std::ffi::OsStr;
use std::path::{Path, PathBuf};

/// Environment variable naming an explicit `chef-analyze` binary.
pub const BINARY_ENV_VAR: &str = "CHEF_ANALYZE_BIN";
pub const DEFAULT_BINARY_NAME: &str = "chef-analyze";

/// Pick the binary to drive: the override if non-empty, then
/// `chef-analyze_<os>_<arch>`, then the bare default name.
pub fn resolve_binary_for(override_bin: Option<&str>, os: &str, arch: &str) -> String {
    if let Some(bin) = override_bin.filter(|bin| !bin.is_empty()) {
        return bin.to_string();
    }

    if !os.is_empty() && !arch.is_empty() {
        return format!("{}_{}_{}", DEFAULT_BINARY_NAME, os, arch);
    }

    DEFAULT_BINARY_NAME.to_string()
}

/// [`resolve_binary_for`] against the process environment and the
/// target this crate was compiled for.
pub fn resolve_binary() -> String {
    let override_bin = std::env::var(BINARY_ENV_VAR).ok();
    resolve_binary_for(
        override_bin.as_deref(),
        std::env::consts::OS,
        std::env::consts::ARCH,
    )
}

/// Runs a real `chef-analyze` command for integration tests.
///
/// ```no_run
/// use chef_analyze_integration::ChefAnalyze;
///
/// let invocation = ChefAnalyze::new().run(["--help"]);
/// assert!(invocation.stdout.contains("Usage"));
/// assert!(invocation.stderr.is_empty());
/// assert_eq!(invocation.exit_code, 0);
/// ```
#[derive(Debug, Clone, Default)]
pub struct ChefAnalyze {
    binary: Option<PathBuf>,
    config: ProcessConfig,
}

impl ChefAnalyze {
    pub fn new() -> Self {
        Self::default()
    }

    /// Skip resolution and run this binary.
    pub fn with_binary<P: AsRef<Path>>(mut self, binary: P) -> Self {
        self.binary = Some(binary.as_ref().to_path_buf());
        self
    }

    pub fn with_env<K: Into<String>, V: Into<String>>(mut self, key: K, value: V) -> Self {
        self.config.env.push((key.into(), value.into()));
        self
    }

    /// Drop `key` from the environment the child inherits.
    pub fn without_env<K: Into<String>>(mut self, key: K) -> Self {
        self.config.env_remove.push(key.into());
        self
    }

    pub fn with_work_dir<P: AsRef<Path>>(mut self, dir: P) -> Self {
        self.config.working_directory = Some(dir.as_ref().to_path_buf());
        self
    }

    pub fn binary(&self) -> PathBuf {
        self.binary
            .clone()
            .unwrap_or_else(|| PathBuf::from(resolve_binary()))
    }

    pub fn run<I, S>(&self, args: I) -> Invocation
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        run(self.binary(), args, &self.config)
    }
}

/// Run the resolved `chef-analyze` binary with `args` and the inherited
/// environment.
pub fn chef_analyze<I, S>(args: I) -> Invocation
where
    I: IntoIterator<Item = S>,
    S: AsRef<OsStr>,
{
    ChefAnalyze::new().run(args)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::process::LAUNCH_FAILURE_EXIT_CODE;

    #[test]
    fn test_override_wins() {
        assert_eq!(
            resolve_binary_for(Some("/opt/bin/chef-analyze"), "linux", "x86_64"),
            "/opt/bin/chef-analyze"
        );
    }

    #[test]
    fn test_empty_override_is_ignored() {
        assert_eq!(
            resolve_binary_for(Some(""), "linux", "x86_64"),
            "chef-analyze_linux_x86_64"
        );
    }

    #[test]
    fn test_platform_name() {
        assert_eq!(
            resolve_binary_for(None, "macos", "aarch64"),
            "chef-analyze_macos_aarch64"
        );
    }

    #[test]
    fn test_bare_name_without_platform() {
        assert_eq!(resolve_binary_for(None, "", "x86_64"), DEFAULT_BINARY_NAME);
        assert_eq!(resolve_binary_for(None, "linux", ""), DEFAULT_BINARY_NAME);
    }

    #[test]
    fn test_explicit_binary_skips_resolution() {
        let driver = ChefAnalyze::new().with_binary("/tmp/custom");

        assert_eq!(driver.binary(), PathBuf::from("/tmp/custom"));
    }

    // The only test in this crate that touches CHEF_ANALYZE_BIN.
    #[test]
    fn test_env_override_to_missing_binary() {
        std::env::set_var(BINARY_ENV_VAR, "/nonexistent/chef-analyze");

        let invocation = chef_analyze(["help"]);

        std::env::remove_var(BINARY_ENV_VAR);
        assert_eq!(invocation.exit_code, LAUNCH_FAILURE_EXIT_CODE);
        assert!(!invocation.stderr.is_empty());
    }

    #[cfg(unix)]
    #[test]
    fn test_builder_passes_env_and_dir() {
        let dir = tempfile::TempDir::new().unwrap();

        let invocation = ChefAnalyze::new()
            .with_binary("sh")
            .with_env("CHEF_ANALYZE_TEST_VALUE", "from-builder")
            .with_work_dir(dir.path())
            .run(["-c", "printf \"$CHEF_ANALYZE_TEST_VALUE\"; pwd >&2; exit 3"]);

        assert_eq!(invocation.exit_code, 3);
        assert_eq!(invocation.stdout, "from-builder");
        let reported = PathBuf::from(invocation.stderr.trim());
        assert_eq!(
            reported.canonicalize().unwrap(),
            dir.path().canonicalize().unwrap()
        );
    }
}
