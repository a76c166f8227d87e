//! Tools configuration from TOML (`[tools]` section)
//!
//! Controls how tool names are resolved against the host and which tools
//! are registered on the top-level runner.
//!
//! Example configuration:
//!
//! ```toml
//! [tools]
//! search_paths = ["/opt/jdk/bin"]
//! uses = ["javac", "jar", "jlink"]
//!
//! [tools.aliases]
//! cc = "clang"    # `cc` runs clang but is still called `cc`
//! ```

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;

/// Raw tools configuration from TOML
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileToolsConfig {
    /// Directories searched for executables before `PATH`
    pub search_paths: Vec<PathBuf>,
    /// Tool names registered on the top-level runner
    pub uses: Vec<String>,
    /// Tool name -> executable name
    pub aliases: BTreeMap<String, String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tools_deserialize() {
        let toml_str = r#"
[tools]
search_paths = ["/opt/jdk/bin", "tools/bin"]
uses = ["javac", "jar"]

[tools.aliases]
cc = "clang"
"#;
        let config: super::super::FileConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(
            config.tools.search_paths,
            vec![PathBuf::from("/opt/jdk/bin"), PathBuf::from("tools/bin")]
        );
        assert_eq!(config.tools.uses, vec!["javac", "jar"]);
        assert_eq!(config.tools.aliases["cc"], "clang");
    }
}
