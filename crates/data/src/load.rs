use crate::locale::{LocaleBundle, Locales, DEFAULT_LOCALE, SUPPORTED_LOCALES};
use anyhow::{bail, Context};
use serde::de::DeserializeOwned;
use std::fs;
use std::path::Path;

const LOCALES_DIR: &str = "locales";
const BUILTIN_EN_US: &str = include_str!("../../../assets/locales/en_US.json");
const BUILTIN_ES_ES: &str = include_str!("../../../assets/locales/es_ES.json");

pub fn normalize_locale(locale: Option<&str>) -> String {
    let raw = locale.unwrap_or(DEFAULT_LOCALE).trim();
    if raw.is_empty() {
        return DEFAULT_LOCALE.to_string();
    }
    let lowered = raw.replace('-', "_").to_ascii_lowercase();
    let language = lowered.split('_').next().unwrap_or_default();
    match language {
        "en" => "en_US".to_string(),
        "es" => "es_ES".to_string(),
        _ => raw.replace('-', "_"),
    }
}

pub fn is_supported_locale(locale: &str) -> bool {
    SUPPORTED_LOCALES.contains(&locale)
}

/// Bundle compiled into the binary for a supported locale.
pub fn builtin_bundle(locale: &str) -> anyhow::Result<LocaleBundle> {
    let raw = match normalize_locale(Some(locale)).as_str() {
        "en_US" => BUILTIN_EN_US,
        "es_ES" => BUILTIN_ES_ES,
        other => bail!("no built-in bundle for locale {other}"),
    };
    serde_json::from_str(raw).with_context(|| format!("parse built-in bundle {locale}"))
}

/// Reads `<assets>/locales/<locale>.json`.
pub fn load_locale_bundle(assets_dir: &Path, locale: &str) -> anyhow::Result<LocaleBundle> {
    let locale = normalize_locale(Some(locale));
    load_json(assets_dir.join(LOCALES_DIR).join(format!("{locale}.json")))
}

/// Resolves the bundles for `locale`.
///
/// Files under `assets_dir` win over the built-in bundles; a missing file
/// falls back to the built-in copy, an unreadable one is an error. Unknown
/// locales resolve to English.
pub fn load_locales(assets_dir: Option<&Path>, locale: Option<&str>) -> anyhow::Result<Locales> {
    let mut code = normalize_locale(locale);
    if !is_supported_locale(&code) {
        code = DEFAULT_LOCALE.to_string();
    }
    let fallback = resolve_bundle(assets_dir, DEFAULT_LOCALE)?;
    let active = if code == DEFAULT_LOCALE {
        fallback.clone()
    } else {
        resolve_bundle(assets_dir, &code)?
    };
    Ok(Locales::new(code, active, fallback))
}

fn resolve_bundle(assets_dir: Option<&Path>, locale: &str) -> anyhow::Result<LocaleBundle> {
    if let Some(dir) = assets_dir {
        let path = dir.join(LOCALES_DIR).join(format!("{locale}.json"));
        if path.exists() {
            return load_json(path);
        }
    }
    builtin_bundle(locale)
}

fn load_json<T: DeserializeOwned>(path: impl AsRef<Path>) -> anyhow::Result<T> {
    let path = path.as_ref();
    let raw = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    let value = serde_json::from_str(&raw).with_context(|| format!("parse {}", path.display()))?;
    Ok(value)
}
