//! Property-based tests for config validation.

use super::schema::{Config, Engine, ProcessEntry};
use super::validator::{ConfigValidator, FieldErrorCode};
use crate::error::Error;
use indexmap::IndexMap;
use proptest::prelude::*;
use serde_json::json;

fn entry_strategy() -> impl Strategy<Value = ProcessEntry> {
    (
        any::<u16>(),
        any::<u16>(),
        "[a-z]{1,12}",
        1u16..=65535,
        prop::option::of(any::<bool>()),
    )
        .prop_map(|(server_port, client_port, host, db_port, show_logs)| ProcessEntry {
            engine: Engine::MongoDb,
            server_port,
            client_port,
            database_url: format!("mongodb://{host}:{db_port}/videre"),
            show_logs,
        })
}

fn config_strategy() -> impl Strategy<Value = Config> {
    prop::collection::vec(("[a-z][a-z0-9-]{0,15}", entry_strategy()), 1..6).prop_map(|pairs| {
        let processes: IndexMap<String, ProcessEntry> = pairs.into_iter().collect();
        Config { processes }
    })
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 512,
        .. ProptestConfig::default()
    })]

    // Any well-formed config validates to exactly what was written.
    #[test]
    fn valid_config_round_trips(config in config_strategy()) {
        let raw = serde_json::to_value(&config).unwrap();
        let validated = ConfigValidator::validate(&raw).unwrap();
        prop_assert_eq!(&validated, &config);
        prop_assert_eq!(serde_json::to_value(&validated).unwrap(), raw);
    }

    // A bad database URL is always reported against that process's field.
    #[test]
    fn invalid_url_reports_field_path(
        config in config_strategy(),
        bad in "[a-z ]{0,10}",
    ) {
        let id = config.processes.keys().next().unwrap().clone();
        let mut raw = serde_json::to_value(&config).unwrap();
        raw["processes"][&id]["databaseUrl"] = json!(bad);

        match ConfigValidator::validate(&raw) {
            Err(Error::SchemaValidation(err)) => {
                let first = err.first().unwrap();
                prop_assert_eq!(&first.path, &format!("processes.{id}.databaseUrl"));
                prop_assert_eq!(first.code, FieldErrorCode::InvalidString);
            }
            other => prop_assert!(false, "expected schema error, got {:?}", other),
        }
    }

    // Ports outside the u16 range never validate.
    #[test]
    fn out_of_range_port_rejected(port in 65536u64..10_000_000) {
        let raw = json!({
            "processes": {
                "local": {
                    "engine": "mongodb",
                    "serverPort": port,
                    "clientPort": 5173,
                    "databaseUrl": "mongodb://localhost:27017/db"
                }
            }
        });
        prop_assert!(ConfigValidator::validate(&raw).is_err());
    }
}
