// cli/cache.rs — `satchel cache get/set/del/list` against the file backend.

use anyhow::{Context as _, Result};
use chrono::Duration;
use serde_json::Value;

use crate::cache::{Cache, CacheBackend, FileBackend};
use crate::config::ToolkitConfig;
use crate::table::Table;
use crate::text::truncate_chars;

fn open(config: &ToolkitConfig, namespace: Option<&str>) -> Cache {
    let backend = FileBackend::new(config.cache.dir.join("cache.json"));
    let mut cache = Cache::new(Box::new(backend));
    if let Some(ns) = namespace {
        cache = cache.with_namespace(ns);
    }
    if config.cache.default_ttl_secs > 0 {
        cache = cache.with_default_ttl(Duration::seconds(config.cache.default_ttl_secs as i64));
    }
    cache
}

pub fn cmd_get(config: &ToolkitConfig, namespace: Option<&str>, key: &str) -> Result<()> {
    let mut cache = open(config, namespace);
    match cache.get(key) {
        Some(value) => {
            println!("{}", serde_json::to_string_pretty(&value)?);
            Ok(())
        }
        None => {
            println!("No entry for key: {key}");
            std::process::exit(1);
        }
    }
}

pub fn cmd_set(
    config: &ToolkitConfig,
    namespace: Option<&str>,
    key: &str,
    value: &str,
    ttl_secs: Option<u64>,
) -> Result<()> {
    let mut cache = open(config, namespace);
    // JSON when it parses, raw string otherwise, so `satchel cache set k 42`
    // stores a number but `set k hello` stores a string.
    let value: Value = serde_json::from_str(value).unwrap_or_else(|_| Value::String(value.to_string()));
    match ttl_secs {
        Some(secs) => cache.set_with_ttl(key, value, Duration::seconds(secs as i64)),
        None => cache.set(key, value),
    }
    cache.flush().context("failed to persist cache")?;
    println!("✓ Stored: {key}");
    Ok(())
}

pub fn cmd_del(config: &ToolkitConfig, namespace: Option<&str>, key: &str) -> Result<()> {
    let mut cache = open(config, namespace);
    if cache.delete(key) {
        cache.flush().context("failed to persist cache")?;
        println!("✓ Removed: {key}");
    } else {
        println!("No entry for key: {key}");
    }
    Ok(())
}

pub fn cmd_list(config: &ToolkitConfig, namespace: Option<&str>) -> Result<()> {
    let mut cache = open(config, namespace);
    let keys = cache.keys();
    if keys.is_empty() {
        println!("Cache is empty.");
        return Ok(());
    }
    let mut table = Table::new(["Key", "Value"]).style(config.table.render_style());
    if config.table.max_col_width > 0 {
        table = table.max_col_width(config.table.max_col_width);
    }
    for key in &keys {
        let preview = match cache.get(key) {
            Some(v) => truncate_chars(&v.to_string(), 60),
            None => continue, // expired between keys() and get()
        };
        table.add_row([key.as_str(), preview.as_str()]);
    }
    print!("{}", table.render());
    println!("\n{} entries", table.len());
    Ok(())
}

pub fn cmd_stats(config: &ToolkitConfig) -> Result<()> {
    let mut backend = FileBackend::new(config.cache.dir.join("cache.json"));
    println!("Path:        {}", backend.path().display());
    println!("Entries:     {}", backend.len());
    println!("Fingerprint: {}", backend.fingerprint()?);
    Ok(())
}
