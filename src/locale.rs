// locale.rs — translation catalogs with a fallback chain.
//
// Catalogs are TOML files named `<locale>.toml` in one directory. Nested
// tables flatten to dotted keys, so `[errors] not_found = "…"` becomes
// `errors.not_found`. Lookup falls back: exact locale → bare language
// (`pt-BR` → `pt`) → the default locale → the key itself.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum LocaleError {
    #[error("failed to read locale dir {path}: {source}")]
    ReadDir { path: String, source: std::io::Error },
    #[error("failed to read {path}: {source}")]
    ReadFile { path: String, source: std::io::Error },
    #[error("invalid TOML in {path}: {source}")]
    Parse { path: String, source: toml::de::Error },
}

/// Normalize a locale identifier: lowercase language, uppercase region,
/// `-` separator. `"PT_br"` → `"pt-BR"`.
pub fn normalize(locale: &str) -> String {
    let mut parts = locale.splitn(2, ['-', '_']);
    let lang = parts.next().unwrap_or("").to_ascii_lowercase();
    match parts.next() {
        Some(region) if !region.is_empty() => {
            format!("{lang}-{}", region.to_ascii_uppercase())
        }
        _ => lang,
    }
}

/// Bare language part of a normalized locale: `"pt-BR"` → `"pt"`.
fn language(locale: &str) -> &str {
    locale.split('-').next().unwrap_or(locale)
}

#[derive(Debug, Default)]
pub struct Translator {
    /// normalized locale → flattened key → message
    catalogs: HashMap<String, HashMap<String, String>>,
    default_locale: String,
}

impl Translator {
    pub fn new(default_locale: &str) -> Self {
        Self {
            catalogs: HashMap::new(),
            default_locale: normalize(default_locale),
        }
    }

    /// Load every `*.toml` file in `dir` as a catalog named after its stem.
    /// Non-TOML files are skipped; a malformed catalog is an error.
    pub fn load_dir(&mut self, dir: &Path) -> Result<(), LocaleError> {
        let entries = fs::read_dir(dir).map_err(|source| LocaleError::ReadDir {
            path: dir.display().to_string(),
            source,
        })?;
        for entry in entries.flatten() {
            let path = entry.path();
            if path.extension().and_then(|e| e.to_str()) != Some("toml") {
                continue;
            }
            let Some(stem) = path.file_stem().and_then(|s| s.to_str()) else {
                continue;
            };
            let locale = normalize(stem);
            let raw = fs::read_to_string(&path).map_err(|source| LocaleError::ReadFile {
                path: path.display().to_string(),
                source,
            })?;
            let table: toml::Table = raw.parse().map_err(|source| LocaleError::Parse {
                path: path.display().to_string(),
                source,
            })?;
            let mut messages = HashMap::new();
            flatten(&table, "", &mut messages);
            debug!(locale = %locale, keys = messages.len(), "loaded catalog");
            self.catalogs.entry(locale).or_default().extend(messages);
        }
        Ok(())
    }

    /// Register one message directly. Mostly for tests and defaults.
    pub fn insert(&mut self, locale: &str, key: &str, message: &str) {
        self.catalogs
            .entry(normalize(locale))
            .or_default()
            .insert(key.to_string(), message.to_string());
    }

    pub fn locales(&self) -> Vec<&str> {
        let mut v: Vec<&str> = self.catalogs.keys().map(String::as_str).collect();
        v.sort_unstable();
        v
    }

    /// Translate `key` for `locale`, walking the fallback chain. A key with
    /// no message anywhere comes back verbatim so the UI still renders.
    pub fn translate<'a>(&'a self, locale: &str, key: &'a str) -> &'a str {
        let locale = normalize(locale);
        let chain = [
            locale.clone(),
            language(&locale).to_string(),
            self.default_locale.clone(),
            language(&self.default_locale).to_string(),
        ];
        for candidate in &chain {
            if let Some(msg) = self.catalogs.get(candidate).and_then(|c| c.get(key)) {
                return msg;
            }
        }
        debug!(locale = %locale, key, "no translation, returning key");
        key
    }

    /// `translate` plus `{name}` placeholder substitution. Placeholders
    /// without a matching parameter stay in place.
    pub fn format(&self, locale: &str, key: &str, params: &HashMap<&str, String>) -> String {
        interpolate(self.translate(locale, key), params)
    }
}

fn flatten(table: &toml::Table, prefix: &str, out: &mut HashMap<String, String>) {
    for (k, v) in table {
        let key = if prefix.is_empty() {
            k.clone()
        } else {
            format!("{prefix}.{k}")
        };
        match v {
            toml::Value::Table(nested) => flatten(nested, &key, out),
            toml::Value::String(s) => {
                out.insert(key, s.clone());
            }
            other => {
                out.insert(key, other.to_string());
            }
        }
    }
}

/// Replace `{name}` with `params["name"]`. `{{` and `}}` escape literal
/// braces.
pub fn interpolate(template: &str, params: &HashMap<&str, String>) -> String {
    let mut out = String::with_capacity(template.len());
    let mut chars = template.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '{' if chars.peek() == Some(&'{') => {
                chars.next();
                out.push('{');
            }
            '}' if chars.peek() == Some(&'}') => {
                chars.next();
                out.push('}');
            }
            '{' => {
                let mut name = String::new();
                let mut closed = false;
                for n in chars.by_ref() {
                    if n == '}' {
                        closed = true;
                        break;
                    }
                    name.push(n);
                }
                match params.get(name.as_str()) {
                    Some(value) if closed => out.push_str(value),
                    _ => {
                        // Unknown placeholder (or unterminated brace): keep it.
                        out.push('{');
                        out.push_str(&name);
                        if closed {
                            out.push('}');
                        }
                    }
                }
            }
            _ => out.push(c),
        }
    }
    out
}

// ─── Tests ────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn params(pairs: &[(&'static str, &str)]) -> HashMap<&'static str, String> {
        pairs.iter().map(|(k, v)| (*k, v.to_string())).collect()
    }

    #[test]
    fn normalize_variants() {
        assert_eq!(normalize("PT_br"), "pt-BR");
        assert_eq!(normalize("en"), "en");
        assert_eq!(normalize("EN-us"), "en-US");
        assert_eq!(normalize("de_DE"), "de-DE");
    }

    #[test]
    fn fallback_chain() {
        let mut t = Translator::new("en");
        t.insert("en", "greeting", "hello");
        t.insert("pt", "greeting", "olá");
        t.insert("pt-BR", "farewell", "tchau");

        // Exact region hit.
        assert_eq!(t.translate("pt-BR", "farewell"), "tchau");
        // Region missing the key falls back to the bare language.
        assert_eq!(t.translate("pt-BR", "greeting"), "olá");
        // Unknown language falls back to the default locale.
        assert_eq!(t.translate("fr", "greeting"), "hello");
        // Nothing anywhere: the key itself.
        assert_eq!(t.translate("fr", "missing.key"), "missing.key");
    }

    #[test]
    fn load_dir_flattens_nested_tables() {
        let dir = tempdir().unwrap();
        std::fs::write(
            dir.path().join("en.toml"),
            "greeting = \"hello\"\n[errors]\nnot_found = \"missing: {what}\"\n",
        )
        .unwrap();
        std::fs::write(dir.path().join("notes.txt"), "ignored").unwrap();

        let mut t = Translator::new("en");
        t.load_dir(dir.path()).unwrap();
        assert_eq!(t.translate("en", "greeting"), "hello");
        assert_eq!(t.translate("en", "errors.not_found"), "missing: {what}");
        assert_eq!(t.locales(), vec!["en"]);
    }

    #[test]
    fn load_dir_normalizes_file_names() {
        let dir = tempdir().unwrap();
        std::fs::write(dir.path().join("PT_br.toml"), "hi = \"oi\"\n").unwrap();
        let mut t = Translator::new("en");
        t.load_dir(dir.path()).unwrap();
        assert_eq!(t.translate("pt-br", "hi"), "oi");
    }

    #[test]
    fn malformed_catalog_is_error() {
        let dir = tempdir().unwrap();
        std::fs::write(dir.path().join("en.toml"), "not valid toml [").unwrap();
        let mut t = Translator::new("en");
        assert!(matches!(t.load_dir(dir.path()), Err(LocaleError::Parse { .. })));
    }

    #[test]
    fn format_substitutes_params() {
        let mut t = Translator::new("en");
        t.insert("en", "welcome", "Hello {name}, you have {count} messages");
        let out = t.format("en", "welcome", &params(&[("name", "Ada"), ("count", "3")]));
        assert_eq!(out, "Hello Ada, you have 3 messages");
    }

    #[test]
    fn unknown_placeholders_stay() {
        let p = params(&[("a", "x")]);
        assert_eq!(interpolate("{a} {b}", &p), "x {b}");
        assert_eq!(interpolate("{{literal}} {a}", &p), "{literal} x");
        assert_eq!(interpolate("dangling {a", &p), "dangling {a");
    }
}
