#![deny(missing_docs)]
#![doc = "Experiment runner, output record schemas and the append-only CSV sink."]

pub mod meta;
pub mod records;
pub mod runner;
pub mod sink;

pub use meta::{stable_hash_string, to_canonical_json_bytes, RunMeta};
pub use records::{format_confidence, timestamp_now, RecordSchema, NA};
pub use runner::{
    run_analogy, run_prev_next, run_rule_check, AnalogyRunOptions, PrevNextRunOptions,
    RuleCheckRunOptions, RunReport,
};
pub use sink::CsvSink;
