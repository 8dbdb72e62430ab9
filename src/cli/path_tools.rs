// cli/path_tools.rs — `satchel path match/suggest`: quick checks for the
// pattern syntax and the fuzzy-suggestion behavior.

use anyhow::Result;
use serde_json::Value;

use crate::path_access::{Container, PathPattern};

/// `satchel path match <pattern> <path>` — exit 0 on match, 1 otherwise.
pub fn cmd_match(pattern: &str, path: &str) -> Result<()> {
    let compiled = PathPattern::compile(pattern)?;
    match compiled.captures(path) {
        Some(bound) => {
            println!("✓ `{path}` matches `{pattern}`");
            if !bound.is_empty() {
                println!("  captures: {}", bound.join(", "));
            }
            Ok(())
        }
        None => {
            println!("✗ `{path}` does not match `{pattern}`");
            std::process::exit(1);
        }
    }
}

/// `satchel path suggest <path> <pattern>…` — nearest stored pattern.
pub fn cmd_suggest(path: &str, patterns: &[String]) -> Result<()> {
    let mut container = Container::new();
    for pattern in patterns {
        container.set(pattern, Value::Null)?;
    }
    match container.closest(path) {
        Some((suggestion, distance)) => {
            println!("Did you mean `{suggestion}`? (distance {distance})");
            Ok(())
        }
        None => {
            println!("No pattern close to `{path}`.");
            std::process::exit(1);
        }
    }
}
