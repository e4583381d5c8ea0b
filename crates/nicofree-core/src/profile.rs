//! User profile: name, nicotine category and daily target.
//!
//! Supplied by onboarding and read-only to the rest of the core. Serialized
//! to/from TOML at `~/.config/nicofree/profile.toml`. Every field has a
//! serde default so an older or hand-edited file still loads.

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, ValidationError};
use crate::storage::data_dir;

/// Closed set of tracked nicotine categories.
///
/// A closed enum instead of free-form strings: the label table below is
/// exhaustive, so an unknown category cannot silently fall through to a
/// generic branch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NicotineType {
    #[default]
    Cigarettes,
    Vaping,
    Pouches,
    Gum,
    Other,
}

impl NicotineType {
    /// Display label, e.g. for "free from Cigarettes".
    pub fn label(&self) -> &'static str {
        match self {
            NicotineType::Cigarettes => "Cigarettes",
            NicotineType::Vaping => "Vaping",
            NicotineType::Pouches => "Snus/Pouches",
            NicotineType::Gum => "Nicotine Gum",
            NicotineType::Other => "Nicotine Products",
        }
    }

    /// Unit noun for the daily usage message.
    pub fn usage_noun(&self) -> &'static str {
        match self {
            NicotineType::Cigarettes => "cigarettes",
            NicotineType::Vaping => "vaping sessions",
            NicotineType::Pouches => "pouches",
            NicotineType::Gum => "pieces",
            NicotineType::Other => "uses",
        }
    }
}

impl fmt::Display for NicotineType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for NicotineType {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "cigarettes" => Ok(NicotineType::Cigarettes),
            "vaping" => Ok(NicotineType::Vaping),
            "pouches" | "snus" => Ok(NicotineType::Pouches),
            "gum" => Ok(NicotineType::Gum),
            "other" => Ok(NicotineType::Other),
            _ => Err(ValidationError::InvalidValue {
                field: "nicotine_type".into(),
                message: format!(
                    "'{s}' is not one of: cigarettes, vaping, pouches, gum, other"
                ),
            }),
        }
    }
}

fn default_user_name() -> String {
    "User".to_string()
}

/// Onboarding-supplied user profile.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserProfile {
    #[serde(default = "default_user_name")]
    pub user_name: String,
    #[serde(default)]
    pub nicotine_type: NicotineType,
    /// Previous daily consumption to stay under. 0 means no target
    /// configured, which disables over-target checks entirely.
    #[serde(default)]
    pub daily_target: u32,
}

impl Default for UserProfile {
    fn default() -> Self {
        Self {
            user_name: default_user_name(),
            nicotine_type: NicotineType::default(),
            daily_target: 0,
        }
    }
}

impl UserProfile {
    fn path() -> std::io::Result<PathBuf> {
        Ok(data_dir()?.join("profile.toml"))
    }

    /// Load from disk. A missing file yields the default profile.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be parsed, or if the
    /// data directory cannot be resolved.
    pub fn load() -> Result<Self, ConfigError> {
        let path = Self::path().map_err(|e| ConfigError::LoadFailed {
            path: PathBuf::from("profile.toml"),
            message: e.to_string(),
        })?;
        match std::fs::read_to_string(&path) {
            Ok(content) => toml::from_str(&content).map_err(|e| ConfigError::LoadFailed {
                path,
                message: e.to_string(),
            }),
            Err(_) => Ok(Self::default()),
        }
    }

    /// Persist to disk.
    ///
    /// # Errors
    ///
    /// Returns an error if the profile cannot be serialized or written.
    pub fn save(&self) -> Result<(), ConfigError> {
        let path = Self::path().map_err(|e| ConfigError::SaveFailed {
            path: PathBuf::from("profile.toml"),
            message: e.to_string(),
        })?;
        let content = toml::to_string_pretty(self).map_err(|e| ConfigError::SaveFailed {
            path: path.clone(),
            message: e.to_string(),
        })?;
        std::fs::write(&path, content).map_err(|e| ConfigError::SaveFailed {
            path,
            message: e.to_string(),
        })
    }

    /// Load from disk, returning the default profile on any error.
    pub fn load_or_default() -> Self {
        Self::load().unwrap_or_default()
    }

    /// Onboarding-level validation: the name must be non-empty.
    ///
    /// A zero daily target is valid and means "no target configured".
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.user_name.trim().is_empty() {
            return Err(ValidationError::InvalidValue {
                field: "user_name".into(),
                message: "name must not be empty".into(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn profile_toml_roundtrip() {
        let profile = UserProfile {
            user_name: "Alice".into(),
            nicotine_type: NicotineType::Vaping,
            daily_target: 12,
        };
        let toml_str = toml::to_string_pretty(&profile).unwrap();
        let parsed: UserProfile = toml::from_str(&toml_str).unwrap();
        assert_eq!(parsed.user_name, "Alice");
        assert_eq!(parsed.nicotine_type, NicotineType::Vaping);
        assert_eq!(parsed.daily_target, 12);
    }

    #[test]
    fn missing_fields_fall_back_to_defaults() {
        let parsed: UserProfile = toml::from_str("").unwrap();
        assert_eq!(parsed.user_name, "User");
        assert_eq!(parsed.nicotine_type, NicotineType::Cigarettes);
        assert_eq!(parsed.daily_target, 0);
    }

    #[test]
    fn nicotine_type_parses_case_insensitively() {
        assert_eq!(
            "Cigarettes".parse::<NicotineType>().unwrap(),
            NicotineType::Cigarettes
        );
        assert_eq!("snus".parse::<NicotineType>().unwrap(), NicotineType::Pouches);
        assert!("pipe".parse::<NicotineType>().is_err());
    }

    #[test]
    fn usage_nouns_cover_all_categories() {
        assert_eq!(NicotineType::Cigarettes.usage_noun(), "cigarettes");
        assert_eq!(NicotineType::Vaping.usage_noun(), "vaping sessions");
        assert_eq!(NicotineType::Pouches.usage_noun(), "pouches");
        assert_eq!(NicotineType::Gum.usage_noun(), "pieces");
        assert_eq!(NicotineType::Other.usage_noun(), "uses");
    }

    #[test]
    fn validate_rejects_blank_name() {
        let profile = UserProfile {
            user_name: "   ".into(),
            ..UserProfile::default()
        };
        assert!(profile.validate().is_err());
        assert!(UserProfile::default().validate().is_ok());
    }
}
