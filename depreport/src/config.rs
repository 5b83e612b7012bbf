use std::time::Duration;

use crate::exec::DEFAULT_COMMAND_TIMEOUT;

/// Action inputs, built once at startup and passed down explicitly.
#[derive(Debug, Clone)]
pub struct Config {
    pub comment_on_pr: bool,
    pub elide_attribution: bool,
    pub fail_on_outdated: bool,
    pub fail_on_vulnerability: bool,
    /// Run depcheck for unused and missing dependencies.
    pub check_unused: bool,
    /// Truncate advisory and outdated tables; 0 keeps every row.
    pub max_rows: usize,
    pub npm: String,
    pub npx: String,
    pub command_timeout: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            comment_on_pr: false,
            elide_attribution: false,
            fail_on_outdated: false,
            fail_on_vulnerability: false,
            check_unused: true,
            max_rows: 0,
            npm: "npm".to_string(),
            npx: "npx".to_string(),
            command_timeout: DEFAULT_COMMAND_TIMEOUT,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_only_reports() {
        let config = Config::default();
        assert!(!config.comment_on_pr);
        assert!(!config.fail_on_outdated);
        assert!(!config.fail_on_vulnerability);
        assert!(!config.elide_attribution);
    }

    #[test]
    fn default_runs_depcheck() {
        assert!(Config::default().check_unused);
    }

    #[test]
    fn default_tools_come_from_path() {
        let config = Config::default();
        assert_eq!(config.npm, "npm");
        assert_eq!(config.npx, "npx");
        assert_eq!(config.max_rows, 0);
    }
}
