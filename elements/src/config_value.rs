//! Typed configuration values consumed by element synthesizers.
//!
//! Stands in for the outer simulator's lattice-parser output: a flat,
//! per-element map of named values the parser is assumed to have already
//! type-checked against the element kind's schema. Mirrors the original's
//! `Config::get<T>`/`tryGet<T>` pair: `get_*` is fatal on a missing or
//! mistyped key, `try_get_*` reports absence without erroring.

use std::collections::HashMap;

use crate::error::ConfigError;

/// One configuration value. Lattice lengths are always floats in meters;
/// conversion to millimeters happens at the call site, not here.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigValue {
    Float(f64),
    String(String),
    FloatVec(Vec<f64>),
}

/// The configuration record for a single element, read-only after construction.
#[derive(Debug, Clone, Default)]
pub struct ElementConfig {
    name: String,
    values: HashMap<String, ConfigValue>,
}

impl ElementConfig {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            values: HashMap::new(),
        }
    }

    pub fn with(mut self, key: impl Into<String>, value: ConfigValue) -> Self {
        self.values.insert(key.into(), value);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set(&mut self, key: impl Into<String>, value: ConfigValue) {
        self.values.insert(key.into(), value);
    }

    fn missing(&self, key: &str) -> ConfigError {
        ConfigError::MissingKey {
            element: self.name.clone().into(),
            key: key.into(),
        }
    }

    fn wrong_type(&self, key: &str, expected: &'static str) -> ConfigError {
        ConfigError::WrongType {
            element: self.name.clone().into(),
            key: key.into(),
            expected,
        }
    }

    pub fn get_f64(&self, key: &str) -> Result<f64, ConfigError> {
        match self.values.get(key) {
            Some(ConfigValue::Float(v)) => Ok(*v),
            Some(_) => Err(self.wrong_type(key, "float")),
            None => Err(self.missing(key)),
        }
    }

    pub fn try_get_f64(&self, key: &str) -> Result<Option<f64>, ConfigError> {
        match self.values.get(key) {
            Some(ConfigValue::Float(v)) => Ok(Some(*v)),
            Some(_) => Err(self.wrong_type(key, "float")),
            None => Ok(None),
        }
    }

    pub fn get_f64_or(&self, key: &str, default: f64) -> Result<f64, ConfigError> {
        Ok(self.try_get_f64(key)?.unwrap_or(default))
    }

    pub fn get_string(&self, key: &str) -> Result<&str, ConfigError> {
        match self.values.get(key) {
            Some(ConfigValue::String(v)) => Ok(v.as_str()),
            Some(_) => Err(self.wrong_type(key, "string")),
            None => Err(self.missing(key)),
        }
    }

    pub fn try_get_string(&self, key: &str) -> Result<Option<&str>, ConfigError> {
        match self.values.get(key) {
            Some(ConfigValue::String(v)) => Ok(Some(v.as_str())),
            Some(_) => Err(self.wrong_type(key, "string")),
            None => Ok(None),
        }
    }

    pub fn get_vec_f64(&self, key: &str) -> Result<&[f64], ConfigError> {
        match self.values.get(key) {
            Some(ConfigValue::FloatVec(v)) => Ok(v.as_slice()),
            Some(_) => Err(self.wrong_type(key, "float vector")),
            None => Err(self.missing(key)),
        }
    }

    pub fn try_get_vec_f64(&self, key: &str) -> Result<Option<&[f64]>, ConfigError> {
        match self.values.get(key) {
            Some(ConfigValue::FloatVec(v)) => Ok(Some(v.as_slice())),
            Some(_) => Err(self.wrong_type(key, "float vector")),
            None => Ok(None),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn missing_key_errors() {
        let cfg = ElementConfig::new("d1");
        assert!(matches!(cfg.get_f64("L"), Err(ConfigError::MissingKey { .. })));
    }

    #[test]
    fn wrong_type_errors() {
        let cfg = ElementConfig::new("d1").with("L", ConfigValue::String("oops".into()));
        assert!(matches!(cfg.get_f64("L"), Err(ConfigError::WrongType { .. })));
    }

    #[test]
    fn optional_lookup_falls_back_to_default() {
        let cfg = ElementConfig::new("q1");
        assert_eq!(cfg.get_f64_or("K", 0.0).unwrap(), 0.0);
    }
}
