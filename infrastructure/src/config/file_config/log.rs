//! Logging configuration from TOML (`[log]` section)

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Raw logging configuration from TOML
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileLogConfig {
    /// Write diagnostics to this file instead of stderr
    pub file: Option<PathBuf>,
    /// Filter directive used when neither `-v` nor `RUST_LOG` is given
    pub level: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_deserialize() {
        let toml_str = r#"
[log]
file = "build.log"
level = "debug"
"#;
        let config: super::super::FileConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.log.file, Some(PathBuf::from("build.log")));
        assert_eq!(config.log.level.as_deref(), Some("debug"));
    }
}
