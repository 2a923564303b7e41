//! Configuration Tests
//!
//! Loading, validation and id generator selection.

use split_ledger_core::engine::{IdGeneratorConfig, LedgerConfig, LedgerEngine, DEFAULT_AVATAR};
use split_ledger_core::{LedgerError, PersonId};

#[test]
fn test_empty_json_uses_defaults() {
    let config = LedgerConfig::from_json_str("{}").unwrap();

    assert_eq!(config, LedgerConfig::default());
    assert_eq!(config.default_avatar, DEFAULT_AVATAR);
    assert_eq!(config.id_generator, IdGeneratorConfig::Uuid);
    assert!(!config.tag_avatar_with_id);
}

#[test]
fn test_full_json_config() {
    let json = r#"{
        "initial_people": [
            { "id": "118836", "name": "Clark", "avatar_ref": "img/clark", "balance": -7 },
            { "id": "933372", "name": "Sarah", "avatar_ref": "img/sarah" }
        ],
        "id_generator": { "kind": "sequential", "prefix": "friend_" },
        "tag_avatar_with_id": true
    }"#;

    let config = LedgerConfig::from_json_str(json).unwrap();
    let mut engine = LedgerEngine::new(config).unwrap();

    assert_eq!(engine.roster().len(), 2);
    assert_eq!(engine.person(&PersonId::from("933372")).map(|p| p.balance()), Some(0));

    let dana = engine.add_person("Dana", "img/dana").unwrap();
    assert_eq!(dana.id().as_str(), "friend_00000001");
    assert_eq!(dana.avatar_ref(), "img/dana?u=friend_00000001");
}

#[test]
fn test_malformed_json_is_serialization_error() {
    let err = LedgerConfig::from_json_str("{ not json").unwrap_err();
    assert!(matches!(err, LedgerError::Serialization(_)));
}

#[test]
fn test_engine_rejects_invalid_config() {
    let mut config = LedgerConfig::demo();
    config.initial_people[2].name = "   ".to_string();

    let err = LedgerEngine::new(config).unwrap_err();

    assert!(matches!(err, LedgerError::InvalidConfig(_)));
}

#[test]
fn test_seeded_generator_is_deterministic() {
    let config = LedgerConfig {
        id_generator: IdGeneratorConfig::Seeded { seed: 12345 },
        ..LedgerConfig::demo()
    };

    let mut first = LedgerEngine::new(config.clone()).unwrap();
    let mut second = LedgerEngine::new(config).unwrap();

    for name in ["Dana", "Eli", "Fay"] {
        let a = first.add_person(name, "img").unwrap();
        let b = second.add_person(name, "img").unwrap();
        assert_eq!(a.id(), b.id());
        assert_eq!(a.id().as_str().len(), 6);
    }
}

#[test]
fn test_seeded_ids_avoid_seed_roster() {
    let config = LedgerConfig {
        id_generator: IdGeneratorConfig::Seeded { seed: 1 },
        ..LedgerConfig::demo()
    };
    let mut engine = LedgerEngine::new(config).unwrap();

    for i in 0..50 {
        let person = engine.add_person(&format!("P{}", i), "img").unwrap();
        assert!(!["118836", "933372", "499476"].contains(&person.id().as_str()));
    }
    assert_eq!(engine.roster().len(), 53);
}
