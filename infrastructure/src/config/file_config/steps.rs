//! Step configuration from TOML (`[steps.<name>]` sections)
//!
//! A step is a composite tool declared in configuration: it registers the
//! tools named in `uses` on its own runner and runs `commands` in order.
//!
//! ```toml
//! [vars]
//! modules = "org.example,org.example.app"
//!
//! [steps.compile-classes]
//! description = "Compile all modules"
//! uses = ["javac"]
//! commands = ["""
//!     javac
//!       --module {modules}
//!       --module-source-path .
//!       -d out/classes
//! """]
//! ```

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Raw step configuration from TOML
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileStepConfig {
    /// Shown by `--list`
    pub description: Option<String>,
    /// Tools (or other steps) registered on the step's runner
    pub uses: Vec<String>,
    /// Command texts, run in order
    pub commands: Vec<String>,
}

/// Replace every `{name}` placeholder whose name is a known variable
///
/// Unknown placeholders are left untouched; [`placeholders`] finds them
/// for validation. Values are inserted as-is and never scanned again.
pub fn substitute(text: &str, vars: &BTreeMap<String, String>) -> String {
    let mut result = String::with_capacity(text.len());
    let mut rest = text;
    while let Some(open) = rest.find('{') {
        let after = &rest[open + 1..];
        match after.find('}') {
            Some(close) if is_placeholder_name(&after[..close]) => {
                result.push_str(&rest[..open]);
                match vars.get(&after[..close]) {
                    Some(value) => result.push_str(value),
                    None => result.push_str(&rest[open..open + close + 2]),
                }
                rest = &after[close + 1..];
            }
            _ => {
                result.push_str(&rest[..=open]);
                rest = after;
            }
        }
    }
    result.push_str(rest);
    result
}

/// Names of all `{name}` placeholders in `text`, in order of appearance
pub fn placeholders(text: &str) -> Vec<&str> {
    let mut found = Vec::new();
    let mut rest = text;
    while let Some(open) = rest.find('{') {
        let after = &rest[open + 1..];
        match after.find('}') {
            Some(close) if is_placeholder_name(&after[..close]) => {
                found.push(&after[..close]);
                rest = &after[close + 1..];
            }
            _ => rest = after,
        }
    }
    found
}

fn is_placeholder_name(name: &str) -> bool {
    !name.is_empty()
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.'))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vars(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_steps_deserialize() {
        let toml_str = r#"
[steps.compile]
description = "Compile and package"
uses = ["compile-classes", "compile-modules"]
commands = ["compile-classes", "compile-modules"]

[steps.compile-classes]
uses = ["javac"]
commands = ["javac -d out/classes"]
"#;
        let config: super::super::FileConfig = toml::from_str(toml_str).unwrap();
        let compile = &config.steps["compile"];
        assert_eq!(compile.description.as_deref(), Some("Compile and package"));
        assert_eq!(compile.uses, vec!["compile-classes", "compile-modules"]);
        assert!(config.steps["compile-classes"].description.is_none());
    }

    #[test]
    fn test_substitute_known_vars() {
        let text = "jar --file out/modules/{module}.jar -C out/classes/{module} .";
        let result = substitute(text, &vars(&[("module", "org.example")]));
        assert_eq!(
            result,
            "jar --file out/modules/org.example.jar -C out/classes/org.example ."
        );
    }

    #[test]
    fn test_substitute_leaves_unknown_placeholders() {
        let result = substitute("echo {known} {unknown}", &vars(&[("known", "x")]));
        assert_eq!(result, "echo x {unknown}");
    }

    #[test]
    fn test_substitute_does_not_expand_values() {
        let vars = vars(&[("a", "{b}"), ("b", "B"), ("c", "{a}")]);
        assert_eq!(substitute("{a} {b} {c}", &vars), "{b} B {a}");
    }

    #[test]
    fn test_substitute_keeps_stray_braces() {
        let vars = vars(&[("out", "target")]);
        assert_eq!(
            substitute("sh -c { {out}/run } {} {", &vars),
            "sh -c { target/run } {} {"
        );
    }

    #[test]
    fn test_placeholders() {
        assert_eq!(
            placeholders("jlink --output out/{image} --launcher {a}={b} { not one }"),
            vec!["image", "a", "b"]
        );
        assert!(placeholders("no braces {} here {").is_empty());
    }
}
