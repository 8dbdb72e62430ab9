// cli/locale_show.rs — `satchel locale show/list`.

use std::collections::HashMap;

use anyhow::{Context as _, Result};

use crate::config::ToolkitConfig;
use crate::locale::Translator;

fn load(config: &ToolkitConfig) -> Result<Translator> {
    let mut translator = Translator::new(&config.locale.default);
    translator
        .load_dir(&config.locale.dir)
        .with_context(|| format!("failed to load locales from {}", config.locale.dir.display()))?;
    Ok(translator)
}

/// `satchel locale show <key> [--locale xx] [--param name=value]…`
pub fn cmd_show(
    config: &ToolkitConfig,
    key: &str,
    locale: Option<&str>,
    params: &[String],
) -> Result<()> {
    let translator = load(config)?;
    let locale = locale.unwrap_or(&config.locale.default);

    let mut map: HashMap<&str, String> = HashMap::new();
    for pair in params {
        let (name, value) = pair
            .split_once('=')
            .with_context(|| format!("parameter `{pair}` is not name=value"))?;
        map.insert(name, value.to_string());
    }
    println!("{}", translator.format(locale, key, &map));
    Ok(())
}

/// `satchel locale list` — loaded locales.
pub fn cmd_list(config: &ToolkitConfig) -> Result<()> {
    let translator = load(config)?;
    let locales = translator.locales();
    if locales.is_empty() {
        println!("No catalogs in {}", config.locale.dir.display());
        return Ok(());
    }
    for locale in locales {
        println!("{locale}");
    }
    Ok(())
}
