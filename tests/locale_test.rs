//! Integration tests for locale catalogs loaded from disk.
//!
//! Tests cover:
//! 1. Directory loading, nested-key flattening, locale name normalization
//! 2. Region → language → default fallback across real catalog files
//! 3. Parameter interpolation end to end

use std::collections::HashMap;

use tempfile::tempdir;

use satchel::locale::Translator;

fn write_catalogs(dir: &std::path::Path) {
    std::fs::write(
        dir.join("en.toml"),
        concat!(
            "greeting = \"hello\"\n",
            "[cart]\n",
            "summary = \"{count} items for {total}\"\n",
        ),
    )
    .unwrap();
    std::fs::write(dir.join("pt.toml"), "greeting = \"olá\"\n").unwrap();
    std::fs::write(dir.join("pt_BR.toml"), "[cart]\nsummary = \"{count} itens: {total}\"\n").unwrap();
}

#[test]
fn loads_flattens_and_normalizes() {
    let dir = tempdir().unwrap();
    write_catalogs(dir.path());

    let mut t = Translator::new("en");
    t.load_dir(dir.path()).unwrap();

    assert_eq!(t.locales(), vec!["en", "pt", "pt-BR"]);
    assert_eq!(t.translate("en", "cart.summary"), "{count} items for {total}");
}

#[test]
fn fallback_walks_region_language_default() {
    let dir = tempdir().unwrap();
    write_catalogs(dir.path());

    let mut t = Translator::new("en");
    t.load_dir(dir.path()).unwrap();

    // Region catalog has cart.summary but not greeting.
    assert_eq!(t.translate("pt-BR", "cart.summary"), "{count} itens: {total}");
    assert_eq!(t.translate("pt-BR", "greeting"), "olá");
    // Unknown locale ends at the default catalog.
    assert_eq!(t.translate("ja", "greeting"), "hello");
    // Unknown key everywhere comes back verbatim.
    assert_eq!(t.translate("ja", "no.such.key"), "no.such.key");
}

#[test]
fn format_interpolates_params() {
    let dir = tempdir().unwrap();
    write_catalogs(dir.path());

    let mut t = Translator::new("en");
    t.load_dir(dir.path()).unwrap();

    let mut params: HashMap<&str, String> = HashMap::new();
    params.insert("count", "3".to_string());
    params.insert("total", "$12.50".to_string());
    assert_eq!(t.format("pt-br", "cart.summary", &params), "3 itens: $12.50");
    assert_eq!(t.format("en", "cart.summary", &params), "3 items for $12.50");
}
