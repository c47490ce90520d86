// Named spring configurations shared by the page animations.
// Injected at startup; JSON overrides merge over the built-in table.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::MotionError;
use crate::spring::SpringConfig;

/// Mapping from animation name to spring constants. Names are upper-case.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SpringPresets {
    configs: BTreeMap<String, SpringConfig>,
}

impl SpringPresets {
    pub fn empty() -> Self {
        SpringPresets {
            configs: BTreeMap::new(),
        }
    }

    /// Parse a `{ "NAME": { stiffness, damping, mass } }` table.
    pub fn from_json(json: &str) -> Result<Self, MotionError> {
        let raw: SpringPresets = serde_json::from_str(json)?;
        let mut presets = SpringPresets::empty();
        presets.merge(raw)?;
        Ok(presets)
    }

    pub fn get(&self, name: &str) -> Result<SpringConfig, MotionError> {
        self.configs
            .get(&name.to_ascii_uppercase())
            .copied()
            .ok_or_else(|| MotionError::UnknownPreset(name.to_string()))
    }

    pub fn insert(&mut self, name: &str, config: SpringConfig) -> Result<(), MotionError> {
        if let Err(err) = config.validate() {
            warn!(preset = name, %err, "rejected spring preset");
            return Err(err);
        }
        self.configs.insert(name.to_ascii_uppercase(), config);
        Ok(())
    }

    /// Apply every entry of `overrides`; stops at the first invalid one.
    pub fn merge(&mut self, overrides: SpringPresets) -> Result<(), MotionError> {
        for (name, config) in overrides.configs {
            debug!(preset = %name, ?config, "spring preset override");
            self.insert(&name, config)?;
        }
        Ok(())
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.configs.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.configs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.configs.is_empty()
    }
}

impl Default for SpringPresets {
    fn default() -> Self {
        let configs = [
            ("FAQ", SpringConfig::new(28.0, 22.0, 1.0)),
            ("SERVICES", SpringConfig::new(20.0, 25.0, 1.1)),
            ("SERVICES_LAYOUT", SpringConfig::new(90.0, 22.0, 0.8)),
            ("LOCATION", SpringConfig::new(65.0, 28.0, 0.9)),
            ("REVIEWS_GRID", SpringConfig::new(90.0, 32.0, 0.9)),
            ("REVIEWS_CARD", SpringConfig::new(90.0, 32.0, 0.9)),
            ("TIPS", SpringConfig::new(42.0, 20.0, 0.9)),
            ("FOOTER", SpringConfig::new(80.0, 25.0, 0.8)),
        ]
        .into_iter()
        .map(|(name, config)| (name.to_string(), config))
        .collect();

        SpringPresets { configs }
    }
}

/// A spring named by preset or given inline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SpringSpec {
    Preset(String),
    Config(SpringConfig),
}

impl SpringSpec {
    pub fn resolve(&self, presets: &SpringPresets) -> Result<SpringConfig, MotionError> {
        match self {
            SpringSpec::Preset(name) => presets.get(name),
            SpringSpec::Config(config) => {
                config.validate()?;
                Ok(*config)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_cover_site_animations() {
        let presets = SpringPresets::default();
        assert_eq!(presets.len(), 8);
        assert_eq!(presets.get("FAQ").unwrap(), SpringConfig::new(28.0, 22.0, 1.0));
        assert_eq!(presets.get("footer").unwrap(), SpringConfig::new(80.0, 25.0, 0.8));
        for name in presets.names() {
            assert!(presets.get(name).unwrap().validate().is_ok());
        }
    }

    #[test]
    fn unknown_preset_errors() {
        let presets = SpringPresets::default();
        assert!(matches!(
            presets.get("HERO"),
            Err(MotionError::UnknownPreset(name)) if name == "HERO"
        ));
    }

    #[test]
    fn merge_overrides_and_extends() {
        let mut presets = SpringPresets::default();
        let overrides = SpringPresets::from_json(
            r#"{"faq":{"stiffness":50,"damping":20,"mass":1},"HERO":{"stiffness":100,"damping":30,"mass":1}}"#,
        )
        .unwrap();
        presets.merge(overrides).unwrap();

        assert_eq!(presets.get("FAQ").unwrap().stiffness, 50.0);
        assert_eq!(presets.get("HERO").unwrap().damping, 30.0);
        assert_eq!(presets.len(), 9);
    }

    #[test]
    fn invalid_override_rejected() {
        let result =
            SpringPresets::from_json(r#"{"BROKEN":{"stiffness":10,"damping":10,"mass":0}}"#);
        assert!(matches!(result, Err(MotionError::InvalidConfig(_))));
    }

    #[test]
    fn spec_resolves_by_name_or_inline() {
        let presets = SpringPresets::default();

        let by_name: SpringSpec = serde_json::from_str(r#""LOCATION""#).unwrap();
        assert_eq!(
            by_name.resolve(&presets).unwrap(),
            SpringConfig::new(65.0, 28.0, 0.9)
        );

        let inline: SpringSpec =
            serde_json::from_str(r#"{"stiffness":12,"damping":3,"mass":2}"#).unwrap();
        assert_eq!(
            inline.resolve(&presets).unwrap(),
            SpringConfig::new(12.0, 3.0, 2.0)
        );

        let bad = SpringSpec::Config(SpringConfig::new(1.0, 1.0, -1.0));
        assert!(bad.resolve(&presets).is_err());
    }
}
