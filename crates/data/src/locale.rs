use carioca_core::{RoundDefinition, ScanErrorKind};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub const DEFAULT_LOCALE: &str = "en_US";
pub const SUPPORTED_LOCALES: [&str; 2] = ["en_US", "es_ES"];

/// One language's strings, keyed by stable message keys.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LocaleBundle {
    entries: BTreeMap<String, String>,
}

impl LocaleBundle {
    pub fn from_entries(entries: BTreeMap<String, String>) -> Self {
        Self { entries }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> + '_ {
        self.entries.keys().map(String::as_str)
    }
}

/// Active bundle plus the English bundle used for missing keys.
#[derive(Debug, Clone)]
pub struct Locales {
    code: String,
    active: LocaleBundle,
    fallback: LocaleBundle,
}

impl Locales {
    pub fn new(code: impl Into<String>, active: LocaleBundle, fallback: LocaleBundle) -> Self {
        Self {
            code: code.into(),
            active,
            fallback,
        }
    }

    pub fn code(&self) -> &str {
        &self.code
    }

    /// Looks `key` up in the active bundle, then English, then returns the
    /// key itself. `{name}` placeholders are replaced from `vars`.
    pub fn translate(&self, key: &str, vars: &[(&str, &str)]) -> String {
        let template = self
            .active
            .get(key)
            .or_else(|| self.fallback.get(key))
            .unwrap_or(key);
        interpolate(template, vars)
    }

    pub fn text(&self, key: &str) -> String {
        self.translate(key, &[])
    }

    pub fn round_name(&self, round: &RoundDefinition) -> String {
        self.text(&round.name_key())
    }

    pub fn round_description(&self, round: &RoundDefinition) -> String {
        self.text(&round.description_key())
    }

    pub fn scan_error(&self, kind: ScanErrorKind) -> String {
        self.text(&kind.message_key())
    }
}

fn interpolate(template: &str, vars: &[(&str, &str)]) -> String {
    let mut out = template.to_string();
    for (name, value) in vars {
        out = out.replace(&format!("{{{name}}}"), value);
    }
    out
}
