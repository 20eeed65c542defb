//! In-memory rule configuration.
//!
//! Configuration loading from files is the caller's concern; this module
//! only defines the value store handed to `Rule::from_config` and the
//! serde-backed loader rules use to materialize their typed config.

use std::collections::BTreeMap;

use serde::Serialize;
use serde::de::DeserializeOwned;

/// Raw per-rule settings: TOML values keyed by option name.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RuleSettings {
    pub values: toml::map::Map<String, toml::Value>,
}

/// Global configuration: per-rule settings keyed by rule name.
#[derive(Debug, Clone, Default)]
pub struct Config {
    pub rules: BTreeMap<String, RuleSettings>,
}

impl Config {
    /// Parse a TOML document whose top-level tables are rule sections:
    ///
    /// ```toml
    /// [heading-numbering]
    /// max-heading-level = 4
    /// ```
    pub fn from_toml_str(input: &str) -> Result<Self, toml::de::Error> {
        let value: toml::Value = toml::from_str(input)?;
        let mut rules = BTreeMap::new();
        if let toml::Value::Table(sections) = value {
            for (name, section) in sections {
                if let toml::Value::Table(values) = section {
                    rules.insert(name, RuleSettings { values });
                }
            }
        }
        Ok(Self { rules })
    }

    /// Parse a markdownlint-style JSON document with the same rule-section
    /// shape as the TOML form.
    pub fn from_json_str(input: &str) -> Result<Self, serde_json::Error> {
        let value: serde_json::Value = serde_json::from_str(input)?;
        let mut rules = BTreeMap::new();
        if let serde_json::Value::Object(sections) = value {
            for (name, section) in sections {
                if let serde_json::Value::Object(values) = section {
                    let mut table = toml::map::Map::new();
                    for (key, value) in values {
                        if let Some(converted) = json_to_toml(value) {
                            table.insert(key, converted);
                        }
                    }
                    rules.insert(name, RuleSettings { values: table });
                }
            }
        }
        Ok(Self { rules })
    }

    /// Insert a single option value for a rule, mainly for tests.
    pub fn set(&mut self, rule: &str, key: &str, value: toml::Value) {
        self.rules
            .entry(rule.to_string())
            .or_default()
            .values
            .insert(key.to_string(), value);
    }
}

/// Trait for typed rule configurations.
pub trait RuleConfig: Serialize + DeserializeOwned + Default + Clone {
    /// The rule name, e.g. "heading-numbering".
    const RULE_NAME: &'static str;
}

fn json_to_toml(value: serde_json::Value) -> Option<toml::Value> {
    match value {
        serde_json::Value::Null => None,
        serde_json::Value::Bool(b) => Some(toml::Value::Boolean(b)),
        serde_json::Value::Number(n) => n
            .as_i64()
            .map(toml::Value::Integer)
            .or_else(|| n.as_f64().map(toml::Value::Float)),
        serde_json::Value::String(s) => Some(toml::Value::String(s)),
        serde_json::Value::Array(items) => Some(toml::Value::Array(
            items.into_iter().filter_map(json_to_toml).collect(),
        )),
        serde_json::Value::Object(map) => {
            let mut table = toml::map::Map::new();
            for (key, value) in map {
                if let Some(converted) = json_to_toml(value) {
                    table.insert(key, converted);
                }
            }
            Some(toml::Value::Table(table))
        }
    }
}

/// Load a rule's typed configuration from the global config.
///
/// Malformed sections fall back to defaults; one lint rule with a broken
/// config must not take down the rest of the pass.
pub fn load_rule_config<T: RuleConfig>(config: &Config) -> T {
    config
        .rules
        .get(T::RULE_NAME)
        .and_then(|settings| {
            let table = toml::Value::Table(settings.values.clone());
            match table.try_into::<T>() {
                Ok(parsed) => Some(parsed),
                Err(e) => {
                    log::warn!("invalid configuration for rule {}: {e}; using defaults", T::RULE_NAME);
                    None
                }
            }
        })
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
    struct FakeConfig {
        #[serde(default)]
        maximum: usize,
    }

    impl RuleConfig for FakeConfig {
        const RULE_NAME: &'static str = "fake-rule";
    }

    #[test]
    fn test_load_rule_config_present() {
        let config = Config::from_toml_str("[fake-rule]\nmaximum = 7\n").unwrap();
        let parsed: FakeConfig = load_rule_config(&config);
        assert_eq!(parsed.maximum, 7);
    }

    #[test]
    fn test_from_json_str_matches_toml_form() {
        let from_json =
            Config::from_json_str(r#"{"fake-rule": {"maximum": 7, "names": ["a", "b"]}}"#).unwrap();
        let from_toml =
            Config::from_toml_str("[fake-rule]\nmaximum = 7\nnames = [\"a\", \"b\"]\n").unwrap();
        assert_eq!(from_json.rules["fake-rule"], from_toml.rules["fake-rule"]);
    }

    #[test]
    fn test_load_rule_config_missing_section_uses_default() {
        let parsed: FakeConfig = load_rule_config(&Config::default());
        assert_eq!(parsed, FakeConfig::default());
    }

    #[test]
    fn test_load_rule_config_malformed_falls_back() {
        let config = Config::from_toml_str("[fake-rule]\nmaximum = \"not a number\"\n").unwrap();
        let parsed: FakeConfig = load_rule_config(&config);
        assert_eq!(parsed, FakeConfig::default());
    }
}
