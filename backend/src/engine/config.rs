//! Ledger configuration
//!
//! Describes the starting roster and how new ids are drawn. Loaded from JSON
//! by UI layers; every field has a default so `{}` is a valid config.

use crate::error::{LedgerError, LedgerResult};
use crate::ids::{IdGenerator, PersonId, SeededIdGenerator, SequentialIdGenerator, UuidIdGenerator};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Avatar service the add-person form is prefilled with
pub const DEFAULT_AVATAR: &str = "https://i.pravatar.cc/48";

/// Complete ledger configuration
///
/// # Example
///
/// ```rust
/// use split_ledger_core::engine::{IdGeneratorConfig, LedgerConfig};
///
/// let config = LedgerConfig::from_json_str(
///     r#"{ "id_generator": { "kind": "seeded", "seed": 7 } }"#,
/// ).unwrap();
///
/// assert!(config.initial_people.is_empty());
/// assert_eq!(config.id_generator, IdGeneratorConfig::Seeded { seed: 7 });
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LedgerConfig {
    /// People present when the ledger starts, in display order
    pub initial_people: Vec<PersonSeed>,

    /// Source of ids for people added during the session
    pub id_generator: IdGeneratorConfig,

    /// Value the add-person form's avatar field starts with
    pub default_avatar: String,

    /// Store avatars as `"{avatar}?u={id}"` so each person gets a distinct image
    pub tag_avatar_with_id: bool,
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            initial_people: Vec::new(),
            id_generator: IdGeneratorConfig::default(),
            default_avatar: DEFAULT_AVATAR.to_string(),
            tag_avatar_with_id: false,
        }
    }
}

/// One person of the starting roster
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonSeed {
    pub id: PersonId,
    pub name: String,
    pub avatar_ref: String,
    #[serde(default)]
    pub balance: i64,
}

/// Id generator selection
///
/// Determines which [`IdGenerator`] the engine is built with.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum IdGeneratorConfig {
    /// Random v4 UUIDs
    #[default]
    Uuid,

    /// Deterministic six-digit ids from a seed
    Seeded { seed: u64 },

    /// `"{prefix}00000001"`, `"{prefix}00000002"`, ...
    Sequential { prefix: String },
}

impl IdGeneratorConfig {
    pub fn build(&self) -> Box<dyn IdGenerator> {
        match self {
            IdGeneratorConfig::Uuid => Box::new(UuidIdGenerator),
            IdGeneratorConfig::Seeded { seed } => Box::new(SeededIdGenerator::new(*seed)),
            IdGeneratorConfig::Sequential { prefix } => {
                Box::new(SequentialIdGenerator::new(prefix.clone()))
            }
        }
    }
}

impl LedgerConfig {
    /// The three friends the app has always started with
    pub fn demo() -> Self {
        let seed = |id: &str, name: &str, balance: i64| PersonSeed {
            id: PersonId::from(id),
            name: name.to_string(),
            avatar_ref: format!("{}?u={}", DEFAULT_AVATAR, id),
            balance,
        };

        Self {
            initial_people: vec![
                seed("118836", "Clark", -7),
                seed("933372", "Sarah", 20),
                seed("499476", "Anthony", 0),
            ],
            ..Self::default()
        }
    }

    /// Parse a JSON config document
    pub fn from_json_str(json: &str) -> LedgerResult<Self> {
        serde_json::from_str(json)
            .map_err(|e| LedgerError::Serialization(format!("Config parsing failed: {}", e)))
    }

    /// Validate configuration
    pub fn validate(&self) -> LedgerResult<()> {
        let mut ids = HashSet::new();
        for person in &self.initial_people {
            if person.name.trim().is_empty() {
                return Err(LedgerError::InvalidConfig(format!(
                    "Person {} has an empty name",
                    person.id
                )));
            }

            if person.avatar_ref.trim().is_empty() {
                return Err(LedgerError::InvalidConfig(format!(
                    "Person {} has an empty avatar",
                    person.id
                )));
            }

            if !ids.insert(&person.id) {
                return Err(LedgerError::InvalidConfig(format!(
                    "Duplicate person id: {}",
                    person.id
                )));
            }
        }

        if let IdGeneratorConfig::Sequential { prefix } = &self.id_generator {
            if prefix.is_empty() {
                return Err(LedgerError::InvalidConfig(
                    "Sequential id prefix must not be empty".to_string(),
                ));
            }
        }

        Ok(())
    }
}
