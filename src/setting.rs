//! Typed access to a single looked-up value
//!
//! A [`Setting`] is what a lookup on [`Config`](crate::Config) hands back:
//! the raw string plus whether the key was present at all. Every conversion
//! checks presence first, so an absent key always surfaces as
//! [`ConfError::NotFound`] and never as a zero or empty value.

use std::collections::HashMap;
use std::str::FromStr;

use once_cell::sync::Lazy;

use crate::error::{ConfError, ListError, Result};

/// Separator used by the `*_slice` conversions.
pub const LIST_SEPARATOR: &str = ",";

static BOOL_LITERALS: Lazy<HashMap<&'static str, bool>> = Lazy::new(|| {
    HashMap::from([
        ("true", true),
        ("yes", true),
        ("on", true),
        ("1", true),
        ("false", false),
        ("no", false),
        ("off", false),
        ("0", false),
    ])
});

/// Result of looking up one key.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Setting {
    /// Requested key, kept for diagnostics
    pub key: Option<String>,
    /// Raw value; empty when the key was not found
    pub value: String,
    pub found: bool,
}

impl Setting {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: Some(key.into()),
            value: value.into(),
            found: true,
        }
    }

    pub fn missing(key: impl Into<String>) -> Self {
        Self {
            key: Some(key.into()),
            value: String::new(),
            found: false,
        }
    }

    fn element(value: &str) -> Self {
        Self {
            key: None,
            value: value.to_string(),
            found: true,
        }
    }

    pub fn is_found(&self) -> bool {
        self.found
    }

    fn require_found(&self) -> Result<&str> {
        if self.found {
            Ok(&self.value)
        } else {
            Err(ConfError::not_found(self.key.as_deref()))
        }
    }

    /// Base-10 signed integer.
    pub fn int(&self) -> Result<i64> {
        let value = self.require_found()?;
        i64::from_str(value).map_err(|e| ConfError::conversion(value, "int", e))
    }

    pub fn float64(&self) -> Result<f64> {
        let value = self.require_found()?;
        f64::from_str(value).map_err(|e| ConfError::conversion(value, "float", e))
    }

    pub fn as_str(&self) -> Result<&str> {
        self.require_found()
    }

    pub fn string(&self) -> Result<String> {
        self.as_str().map(str::to_string)
    }

    /// Interprets the value as a boolean.
    ///
    /// `true`, `yes`, `on` and `1` are true; `false`, `no`, `off` and `0`
    /// are false. Matching ignores case but not surrounding whitespace.
    pub fn bool(&self) -> Result<bool> {
        let value = self.require_found()?;
        parse_bool(value)
    }

    /// Splits the value on `sep` into found settings with trimmed values.
    ///
    /// A value without `sep` yields one element. A setting that was not
    /// found yields an empty vector.
    pub fn split(&self, sep: &str) -> Vec<Setting> {
        if !self.found {
            return Vec::new();
        }
        self.value
            .split(sep)
            .map(|token| Setting::element(token.trim_matches(' ')))
            .collect()
    }

    pub fn int_slice(&self) -> std::result::Result<Vec<i64>, ListError<i64>> {
        self.convert_list(Setting::int)
    }

    pub fn float64_slice(&self) -> std::result::Result<Vec<f64>, ListError<f64>> {
        self.convert_list(Setting::float64)
    }

    pub fn bool_slice(&self) -> std::result::Result<Vec<bool>, ListError<bool>> {
        self.convert_list(Setting::bool)
    }

    pub fn string_slice(&self) -> std::result::Result<Vec<String>, ListError<String>> {
        self.convert_list(Setting::string)
    }

    // Converts every element, keeps the successes and reports the first
    // failure along with how many elements failed.
    fn convert_list<T>(
        &self,
        convert: impl Fn(&Setting) -> Result<T>,
    ) -> std::result::Result<Vec<T>, ListError<T>> {
        if !self.found {
            return Err(ListError::not_found(self.key.as_deref()));
        }

        let mut values = Vec::new();
        let mut failed = 0;
        let mut first_error = None;

        for element in self.split(LIST_SEPARATOR) {
            match convert(&element) {
                Ok(v) => values.push(v),
                Err(e) => {
                    failed += 1;
                    if first_error.is_none() {
                        first_error = Some(e);
                    }
                }
            }
        }

        match first_error {
            None => Ok(values),
            Some(source) => Err(ListError::new(values, failed, source)),
        }
    }
}

fn parse_bool(value: &str) -> Result<bool> {
    BOOL_LITERALS
        .get(value.to_lowercase().as_str())
        .copied()
        .ok_or_else(|| ConfError::BoolParse {
            value: value.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn found(value: &str) -> Setting {
        Setting::new("key", value)
    }

    #[test]
    fn test_int_parses_signed_decimal() {
        assert_eq!(found("10000").int().unwrap(), 10000);
        assert_eq!(found("-42").int().unwrap(), -42);
    }

    #[test]
    fn test_int_rejects_non_integers() {
        for bad in ["", "1.5", "12a", "ten"] {
            let err = found(bad).int().unwrap_err();
            assert!(
                matches!(err, ConfError::Conversion { target: "int", .. }),
                "{bad:?} should not convert"
            );
        }
    }

    #[test]
    fn test_float64() {
        assert_eq!(found("13.42").float64().unwrap(), 13.42);
        assert_eq!(found("6").float64().unwrap(), 6.0);
        assert!(matches!(
            found("hello").float64(),
            Err(ConfError::Conversion { target: "float", .. })
        ));
    }

    #[test]
    fn test_empty_setting_is_not_a_float() {
        let err = Setting::default().float64().unwrap_err();
        assert!(err.is_not_found());

        let err = found("").float64().unwrap_err();
        assert!(matches!(err, ConfError::Conversion { .. }));
    }

    #[test]
    fn test_bool_vocabulary() {
        for t in ["1", "true", "TRUE", "yes", "Yes", "on", "ON"] {
            assert!(found(t).bool().unwrap(), "{t} should be true");
        }
        for f in ["0", "false", "FALSE", "no", "off", "Off"] {
            assert!(!found(f).bool().unwrap(), "{f} should be false");
        }
    }

    #[test]
    fn test_bool_rejects_unknown_literals() {
        for bad in ["maybe", "", " true", "2", "y"] {
            assert!(matches!(
                found(bad).bool(),
                Err(ConfError::BoolParse { .. })
            ));
        }
    }

    #[test]
    fn test_missing_setting_fails_every_conversion() {
        let s = Setting::missing("nonexistent");
        assert!(!s.is_found());
        assert!(s.int().unwrap_err().is_not_found());
        assert!(s.float64().unwrap_err().is_not_found());
        assert!(s.bool().unwrap_err().is_not_found());
        assert!(s.string().unwrap_err().is_not_found());
        assert!(s.split(",").is_empty());

        let err = s.int_slice().unwrap_err();
        assert!(err.partial().is_empty());
        assert!(err.source.is_not_found());
        assert!(s.string_slice().unwrap_err().source.is_not_found());
    }

    #[test]
    fn test_not_found_error_names_key() {
        let err = Setting::missing("port").int().unwrap_err();
        assert_eq!(err.to_string(), "Key not found: port");
    }

    #[test]
    fn test_split_trims_spaces() {
        let parts = found("10.0.0.1, 10.0.0.2 ,10.0.0.3").split(",");
        let values: Vec<_> = parts.iter().map(|s| s.value.as_str()).collect();
        assert_eq!(values, ["10.0.0.1", "10.0.0.2", "10.0.0.3"]);
        assert!(parts.iter().all(Setting::is_found));
    }

    #[test]
    fn test_split_custom_separator() {
        let parts = found("a:b:c").split(":");
        assert_eq!(parts.len(), 3);
        assert_eq!(parts[1].value, "b");
    }

    #[test]
    fn test_single_value_is_one_element_list() {
        assert_eq!(found("vim").string_slice().unwrap(), vec!["vim"]);
        assert_eq!(found("7").int_slice().unwrap(), vec![7]);
    }

    #[test]
    fn test_string_slice() {
        assert_eq!(
            found("abc, def, ghi").string_slice().unwrap(),
            vec!["abc", "def", "ghi"]
        );
    }

    #[test]
    fn test_float_slice() {
        assert_eq!(
            found("0.5,2.37,6").float64_slice().unwrap(),
            vec![0.5, 2.37, 6.0]
        );
    }

    #[test]
    fn test_float_slice_keeps_partial_result() {
        let err = found("0.5, hello, 0.9").float64_slice().unwrap_err();
        assert_eq!(err.failed, 1);
        assert_eq!(err.partial(), &[0.5, 0.9]);
        assert!(matches!(err.source, ConfError::Conversion { .. }));
    }

    #[test]
    fn test_int_slice_counts_all_failures() {
        let err = found("1, x, 3, y").int_slice().unwrap_err();
        assert_eq!(err.failed, 2);
        assert_eq!(err.into_partial(), vec![1, 3]);
    }

    #[test]
    fn test_list_error_reports_first_failure_as_source() {
        use std::error::Error;

        let err = found("1, x").int_slice().unwrap_err();
        let message = err.to_string();
        assert!(message.starts_with("List conversion failed (1 bad element(s))"));
        assert!(message.contains("\"x\""));

        let source = err.source().unwrap().downcast_ref::<ConfError>().unwrap();
        assert!(matches!(source, ConfError::Conversion { target: "int", .. }));
    }

    #[test]
    fn test_bool_slice() {
        assert_eq!(
            found("yes, off, 1").bool_slice().unwrap(),
            vec![true, false, true]
        );
        let err = found("yes, perhaps").bool_slice().unwrap_err();
        assert_eq!(err.partial(), &[true]);
        assert!(matches!(err.source, ConfError::BoolParse { .. }));
    }
}
