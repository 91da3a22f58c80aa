//! Structured logging of composed errors.
//!
//! Fields exist for the log, not for the message: this module turns each
//! leaf of an error into a log event (or a serializable record) carrying its
//! merged fields.

use serde::Serialize;
use serde_json::Value;
use tracing::{debug, error, info, instrument, trace, warn, Level};

use crate::config::ReportSettings;
use crate::domain::{Error, Fields};

/// One leaf of an error, ready for a JSON log line.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LeafRecord {
    pub message: String,
    pub fields: Fields,
}

/// Fields as a JSON object.
pub fn fields_json(fields: &Fields) -> Value {
    Value::Object(fields.clone().into_iter().collect())
}

/// One record per leaf of `err`, in construction order.
pub fn records(err: &Error) -> Vec<LeafRecord> {
    err.flatten()
        .into_iter()
        .map(|leaf| {
            let (error, fields) = leaf.into_parts();
            LeafRecord {
                message: error.to_string(),
                fields,
            }
        })
        .collect()
}

/// Logs `err` as `tracing` events and returns how many were emitted.
#[instrument(level = "trace", skip(err))]
pub fn emit(err: &Error, settings: &ReportSettings) -> usize {
    let leaves = err.flatten();
    let limit = if settings.per_leaf { leaves.len() } else { 1 };

    let mut emitted = 0;
    for leaf in leaves.iter().take(limit) {
        let fields = fields_json(leaf.fields());
        match settings.level {
            Level::ERROR => error!(fields = %fields, "{}", leaf),
            Level::WARN => warn!(fields = %fields, "{}", leaf),
            Level::INFO => info!(fields = %fields, "{}", leaf),
            Level::DEBUG => debug!(fields = %fields, "{}", leaf),
            _ => trace!(fields = %fields, "{}", leaf),
        }
        emitted += 1;
    }
    emitted
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::util::testing;
    use crate::join;
    use serde_json::json;

    fn sample() -> Error {
        join([
            Some(Error::new("a").with_field("k", 1)),
            Some(Error::new("b").wrap("p").with_field("user", "alice")),
        ])
        .expect("two errors")
    }

    #[test]
    fn given_aggregate_when_collecting_records_then_one_per_leaf() {
        let records = records(&sample());
        assert_eq!(
            records,
            vec![
                LeafRecord {
                    message: "a".into(),
                    fields: fields! { "k" => 1 },
                },
                LeafRecord {
                    message: "p: b".into(),
                    fields: fields! { "user" => "alice" },
                },
            ]
        );
    }

    #[test]
    fn given_record_when_serialized_then_is_flat_json() {
        let value = serde_json::to_value(&records(&sample())[1]).unwrap();
        assert_eq!(value, json!({ "message": "p: b", "fields": { "user": "alice" } }));
    }

    #[test]
    fn given_per_leaf_settings_when_emitting_then_logs_every_leaf() {
        testing::init_test_setup();
        let settings = ReportSettings::default();
        assert_eq!(emit(&sample(), &settings), 2);
    }

    #[test]
    fn given_first_leaf_only_when_emitting_then_logs_once() {
        testing::init_test_setup();
        let settings = ReportSettings {
            level: Level::DEBUG,
            per_leaf: false,
        };
        assert_eq!(emit(&sample(), &settings), 1);
    }
}
