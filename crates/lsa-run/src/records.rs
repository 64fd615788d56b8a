//! Output record schemas, one row per provider call.

use chrono::Utc;

use lsa_items::{AnalogyItem, PrevNextItem};

/// Sentinel written when a backend exposes no confidence signal.
pub const NA: &str = "NA";

/// The tabular schemas a run can emit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordSchema {
    /// Analogy rows from chat-style backends.
    AnalogyChat,
    /// Analogy rows from the logprob-capable completion backend.
    AnalogyLogprob,
    /// Prev/next-letter rows.
    PrevNext,
    /// Rule-check rows.
    RuleCheck,
    /// Parallel prompt log rows.
    PromptLog,
}

impl RecordSchema {
    /// Column names in output order.
    pub fn headers(&self) -> &'static [&'static str] {
        match self {
            RecordSchema::AnalogyChat => &[
                "model",
                "rowid",
                "timestamp",
                "testletid",
                "itemid",
                "alphabet",
                "A",
                "B",
                "C",
                "D",
                "template_nr",
                "item_prompt",
                "response",
                "prompt",
            ],
            RecordSchema::AnalogyLogprob => &[
                "rowid",
                "timestamp",
                "testletid",
                "itemid",
                "alphabet",
                "A",
                "B",
                "C",
                "D",
                "template_nr",
                "response",
                "logprob",
                "finish_reason",
            ],
            RecordSchema::PrevNext => &[
                "model",
                "rowid",
                "timestamp",
                "itemid",
                "prev_next",
                "prev_next_dist",
                "alphabet",
                "stimulus",
                "solution",
                "response",
                "template_nr",
            ],
            RecordSchema::RuleCheck => &[
                "model",
                "rowid",
                "timestamp",
                "variationid",
                "shift_dist",
                "alphabet",
                "A",
                "B",
                "C",
                "D",
                "item_prompt",
                "response",
            ],
            RecordSchema::PromptLog => &[
                "model",
                "rowid",
                "timestamp",
                "itemid",
                "prompt",
                "response",
                "template_nr",
            ],
        }
    }
}

/// Compact timestamp written into records and output file names.
pub fn timestamp_now() -> String {
    Utc::now().format("%Y%m%d%H%M%S").to_string()
}

/// Renders an optional confidence value, `NA` when unavailable.
pub fn format_confidence(confidence: Option<f64>) -> String {
    match confidence {
        Some(value) => value.to_string(),
        None => NA.to_string(),
    }
}

/// One analogy row for chat-style backends.
#[allow(clippy::too_many_arguments)]
pub fn analogy_chat_record(
    model: &str,
    rowid: usize,
    timestamp: &str,
    item: &AnalogyItem,
    template_nr: u32,
    item_prompt: &str,
    response: &str,
    prompt: &str,
) -> Vec<String> {
    vec![
        model.to_string(),
        rowid.to_string(),
        timestamp.to_string(),
        item.testlet_id.to_string(),
        item.item_id.to_string(),
        item.alphabet.to_string(),
        item.a.clone(),
        item.b.clone(),
        item.c.clone(),
        item.d.clone(),
        template_nr.to_string(),
        item_prompt.to_string(),
        response.to_string(),
        prompt.to_string(),
    ]
}

/// One analogy row for the logprob-capable backend.
pub fn analogy_logprob_record(
    rowid: usize,
    timestamp: &str,
    item: &AnalogyItem,
    template_nr: u32,
    response: &str,
    confidence: Option<f64>,
    finish_reason: &str,
) -> Vec<String> {
    vec![
        rowid.to_string(),
        timestamp.to_string(),
        item.testlet_id.to_string(),
        item.item_id.to_string(),
        item.alphabet.to_string(),
        item.a.clone(),
        item.b.clone(),
        item.c.clone(),
        item.d.clone(),
        template_nr.to_string(),
        response.to_string(),
        format_confidence(confidence),
        finish_reason.to_string(),
    ]
}

/// One prev/next-letter row.
pub fn prev_next_record(
    model: &str,
    rowid: usize,
    timestamp: &str,
    item: &PrevNextItem,
    response: &str,
    template_nr: u32,
) -> Vec<String> {
    vec![
        model.to_string(),
        rowid.to_string(),
        timestamp.to_string(),
        item.item_id.to_string(),
        item.prev_next.to_string(),
        item.prev_next_dist.to_string(),
        item.alphabet.to_string(),
        item.stimulus.clone(),
        item.solution.clone(),
        response.to_string(),
        template_nr.to_string(),
    ]
}

/// One rule-check row.
pub fn rule_check_record(
    model: &str,
    rowid: usize,
    timestamp: &str,
    item: &AnalogyItem,
    item_prompt: &str,
    response: &str,
) -> Vec<String> {
    vec![
        model.to_string(),
        rowid.to_string(),
        timestamp.to_string(),
        item.variation_id.map(|v| v.to_string()).unwrap_or_default(),
        item.shift_dist.map(|d| d.to_string()).unwrap_or_default(),
        item.alphabet.to_string(),
        item.a.clone(),
        item.b.clone(),
        item.c.clone(),
        item.d.clone(),
        item_prompt.to_string(),
        response.to_string(),
    ]
}

/// One prompt-log row.
pub fn prompt_log_record(
    model: &str,
    rowid: usize,
    timestamp: &str,
    item_id: u32,
    prompt: &str,
    response: &str,
    template_nr: u32,
) -> Vec<String> {
    vec![
        model.to_string(),
        rowid.to_string(),
        timestamp.to_string(),
        item_id.to_string(),
        prompt.to_string(),
        response.to_string(),
        template_nr.to_string(),
    ]
}
