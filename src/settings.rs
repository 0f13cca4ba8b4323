use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::sync::{PoisonError, RwLock};

use crate::block::{block, Block};
use crate::errors::Result;

/// Punctuation used when rendering class names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Namespace prepended to every generated block class.
    pub ns: Cow<'static, str>,
    /// Between a block and its elements.
    pub el: Cow<'static, str>,
    /// Between a name and a modifier key.
    #[serde(rename = "mod")]
    pub modifier: Cow<'static, str>,
    /// Between a modifier key and its value.
    #[serde(rename = "modValue")]
    pub mod_value: Cow<'static, str>,
}

impl Settings {
    pub const DEFAULT: Settings = Settings {
        ns: Cow::Borrowed(""),
        el: Cow::Borrowed("__"),
        modifier: Cow::Borrowed("_"),
        mod_value: Cow::Borrowed("_"),
    };

    /// Snapshot of the process-wide settings.
    pub fn current() -> Settings {
        GLOBAL
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Shallow merge: every field present in `options` overwrites ours.
    pub fn merge(&mut self, options: Setup) {
        if let Some(ns) = options.ns {
            self.ns = Cow::Owned(ns);
        }
        if let Some(el) = options.el {
            self.el = Cow::Owned(el);
        }
        if let Some(modifier) = options.modifier {
            self.modifier = Cow::Owned(modifier);
        }
        if let Some(mod_value) = options.mod_value {
            self.mod_value = Cow::Owned(mod_value);
        }
    }

    pub fn with(mut self, options: Setup) -> Self {
        self.merge(options);
        self
    }
}

impl Default for Settings {
    fn default() -> Self {
        Settings::DEFAULT
    }
}

static GLOBAL: RwLock<Settings> = RwLock::new(Settings::DEFAULT);

/// A partial set of settings; `None` fields leave the current value alone.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Setup {
    pub ns: Option<String>,
    pub el: Option<String>,
    #[serde(rename = "mod")]
    pub modifier: Option<String>,
    #[serde(rename = "modValue")]
    pub mod_value: Option<String>,
}

impl Setup {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn ns(mut self, ns: impl Into<String>) -> Self {
        self.ns = Some(ns.into());
        self
    }

    pub fn el(mut self, el: impl Into<String>) -> Self {
        self.el = Some(el.into());
        self
    }

    pub fn modifier(mut self, modifier: impl Into<String>) -> Self {
        self.modifier = Some(modifier.into());
        self
    }

    pub fn mod_value(mut self, mod_value: impl Into<String>) -> Self {
        self.mod_value = Some(mod_value.into());
        self
    }
}

/// Merge `options` into the process-wide settings.
///
/// Every later render reads the merged values, including renders of blocks built
/// before this call. Returns the `block` entry point so calls can be chained:
/// `setup(Setup::new().ns("app-"))("menu")`.
pub fn setup(options: Setup) -> fn(&str) -> Block {
    let mut global = GLOBAL.write().unwrap_or_else(PoisonError::into_inner);
    global.merge(options);
    tracing::debug!(settings = ?*global, "settings updated");
    block
}

/// Restore the process-wide defaults.
pub fn reset() {
    *GLOBAL.write().unwrap_or_else(PoisonError::into_inner) = Settings::DEFAULT;
    tracing::debug!("settings reset to defaults");
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn merge_overwrites_only_given_fields() {
        let s = Settings::default().with(Setup::new().ns("app-").mod_value("--"));
        assert_eq!(s.ns, "app-");
        assert_eq!(s.el, "__");
        assert_eq!(s.modifier, "_");
        assert_eq!(s.mod_value, "--");
    }

    #[test]
    fn merge_accepts_empty_strings() {
        let s = Settings::default().with(Setup::new().el(""));
        assert_eq!(s.el, "");
    }

    #[test]
    fn setup_parses_js_style_keys() {
        let opts = Setup::from_json(r#"{"mod": "--", "modValue": "-", "extra": 1}"#).unwrap();
        assert_eq!(opts, Setup::new().modifier("--").mod_value("-"));
    }

    #[test]
    fn setup_rejects_malformed_json() {
        assert!(Setup::from_json("{ns:").is_err());
    }

    #[test]
    fn settings_deserialize_fills_defaults() {
        let s: Settings = serde_json::from_str(r#"{"ns": "x-"}"#).unwrap();
        assert_eq!(s, Settings::default().with(Setup::new().ns("x-")));
    }

    #[test]
    fn settings_serialize_with_js_style_keys() {
        let json = serde_json::to_string(&Settings::default().with(Setup::new().modifier("--")))
            .unwrap();
        assert_eq!(json, r#"{"ns":"","el":"__","mod":"--","modValue":"_"}"#);
    }
}
