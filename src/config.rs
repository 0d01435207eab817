//! Parsed configuration store
//!
//! A [`Config`] holds the two things a parse produces: `key = value`
//! settings and bare-word options. It is built once by the parser and read
//! afterwards. Lookups return a [`Setting`] that carries the value together
//! with a found flag, so a missing key only becomes an error when a typed
//! conversion is requested.
//!
//! `Config` has no interior synchronization. Sharing `&Config` between
//! threads is fine; mutation through [`Config::settings_mut`] or
//! [`Config::options_mut`] needs exclusive access like any other value.

use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet};
use std::convert::Infallible;
use std::str::FromStr;

use serde::Serialize;

use crate::error::{ConfError, Result};
use crate::parser;
use crate::setting::Setting;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Config {
    /// `key = value` lines; the last occurrence of a key wins
    settings: HashMap<String, String>,
    /// Bare-word lines, presence only
    options: HashSet<String>,
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    /// Looks up `key`, failing with [`ConfError::NotFound`] when absent.
    pub fn find(&self, key: &str) -> Result<Setting> {
        self.settings
            .get(key)
            .map(|value| Setting::new(key, value.as_str()))
            .ok_or_else(|| ConfError::NotFound {
                key: key.to_string(),
            })
    }

    /// Looks up `key`. The returned setting is marked not found when the
    /// key is absent; converting it then fails with `NotFound`.
    pub fn get(&self, key: &str) -> Setting {
        self.find(key).unwrap_or_else(|_| Setting::missing(key))
    }

    /// Looks up `key`, substituting `default` as a found value when absent.
    pub fn get_default(&self, key: &str, default: &str) -> Setting {
        self.find(key).unwrap_or_else(|_| Setting::new(key, default))
    }

    pub fn has_setting(&self, key: &str) -> bool {
        self.settings.contains_key(key)
    }

    pub fn has_option(&self, option: &str) -> bool {
        self.options.contains(option)
    }

    pub fn settings(&self) -> &HashMap<String, String> {
        &self.settings
    }

    pub fn options(&self) -> &HashSet<String> {
        &self.options
    }

    pub fn settings_mut(&mut self) -> &mut HashMap<String, String> {
        &mut self.settings
    }

    pub fn options_mut(&mut self) -> &mut HashSet<String> {
        &mut self.options
    }

    pub fn is_empty(&self) -> bool {
        self.settings.is_empty() && self.options.is_empty()
    }

    /// Key-ordered snapshot for stable output.
    pub fn sorted(&self) -> SortedView<'_> {
        SortedView {
            settings: self
                .settings
                .iter()
                .map(|(k, v)| (k.as_str(), v.as_str()))
                .collect(),
            options: self.options.iter().map(String::as_str).collect(),
        }
    }

    /// Stores a setting, returning the value it replaced.
    pub(crate) fn insert_setting(&mut self, key: &str, value: &str) -> Option<String> {
        self.settings.insert(key.to_string(), value.to_string())
    }

    pub(crate) fn insert_option(&mut self, option: &str) {
        self.options.insert(option.to_string());
    }
}

/// Borrowed view of a [`Config`] with settings and options in sorted order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SortedView<'a> {
    pub settings: BTreeMap<&'a str, &'a str>,
    pub options: BTreeSet<&'a str>,
}

impl FromStr for Config {
    type Err = Infallible;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Ok(parser::parse_str(s))
    }
}
