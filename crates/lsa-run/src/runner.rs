//! The experiment state machine: templates × models × items, strictly
//! sequential.

use std::path::Path;

use lsa_core::{AlphabetSet, ErrorInfo, LsaError};
use lsa_items::{AnalogyItem, PrevNextItem};
use lsa_prompt::{
    compose, render_alphabet_reminder, render_instruction, render_prev_next_instruction,
    render_prev_next_item, render_task_instruction, starts_block, PrevNextVariant, Template,
};
use lsa_provider::{Provider, SamplingConfig};

use crate::records::{
    analogy_chat_record, analogy_logprob_record, prev_next_record, prompt_log_record,
    rule_check_record, timestamp_now, RecordSchema,
};
use crate::sink::CsvSink;

/// Configuration for an analogy collection run.
#[derive(Debug, Clone, PartialEq)]
pub struct AnalogyRunOptions {
    /// Templates to iterate, outermost loop.
    pub templates: Vec<Template>,
    /// Models to query per template.
    pub models: Vec<String>,
    /// Whether each item's prompt+response is folded into the next prompt.
    pub carry_exchange: bool,
    /// First item row to process (0-based); earlier rows are skipped.
    pub start_row: usize,
}

/// Configuration for a prev/next-letter collection run.
#[derive(Debug, Clone, PartialEq)]
pub struct PrevNextRunOptions {
    /// Question phrasing variant.
    pub variant: PrevNextVariant,
    /// Models to query.
    pub models: Vec<String>,
    /// First item row to process (0-based).
    pub start_row: usize,
}

/// Configuration for a rule-check collection run.
#[derive(Debug, Clone, PartialEq)]
pub struct RuleCheckRunOptions {
    /// Item presentation template.
    pub template: Template,
    /// Models to query.
    pub models: Vec<String>,
    /// First item row to process (0-based).
    pub start_row: usize,
}

/// Summary returned when a run completes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunReport {
    /// Data rows written to the results sink.
    pub rows_written: usize,
}

fn ensure_models(models: &[String]) -> Result<(), LsaError> {
    if models.is_empty() {
        return Err(LsaError::Run(ErrorInfo::new(
            "run.no-models",
            "run configuration names no models",
        )));
    }
    Ok(())
}

/// Attaches the failing row and model to a provider error so the caller can
/// resume from the reported row.
fn call_context(err: LsaError, rowid: usize, model: &str) -> LsaError {
    match err {
        LsaError::Provider(info) => LsaError::Provider(
            info.with_context("rowid", rowid.to_string())
                .with_context("model", model.to_string())
                .with_hint(format!("restart with start_row {rowid}")),
        ),
        other => other,
    }
}

/// Runs the analogy task over `items`, writing one record per call.
///
/// Item ordering is the input sequence's row order; conversational state is
/// reset at the start of each model×template pass. The output schema follows
/// the backend: chat-style backends record the full prompt, the logprob
/// backend records confidence and finish reason instead.
pub fn run_analogy(
    items: &[AnalogyItem],
    provider: &dyn Provider,
    opts: &AnalogyRunOptions,
    out_path: &Path,
    log_path: Option<&Path>,
) -> Result<RunReport, LsaError> {
    ensure_models(&opts.models)?;
    if opts.templates.is_empty() {
        return Err(LsaError::Run(ErrorInfo::new(
            "run.no-templates",
            "run configuration names no templates",
        )));
    }
    if opts.carry_exchange && opts.start_row > 0 {
        // The exchange text of the skipped rows cannot be reconstructed, so
        // a resumed carry-over run would diverge from a from-scratch run.
        return Err(LsaError::Run(
            ErrorInfo::new(
                "run.resume-carry-over",
                "cannot resume a run with exchange carry-over enabled",
            )
            .with_context("start_row", opts.start_row.to_string())
            .with_hint("re-run from row 0 or disable carry-over"),
        ));
    }

    let display = AlphabetSet::display_standard();
    let logprobs = provider.exposes_logprobs();
    let sampling = if logprobs {
        SamplingConfig::completion()
    } else {
        SamplingConfig::chat()
    };
    let schema = if logprobs {
        RecordSchema::AnalogyLogprob
    } else {
        RecordSchema::AnalogyChat
    };
    let mut sink = CsvSink::create(out_path, schema.headers())?;
    let mut log = match log_path {
        Some(path) => Some(CsvSink::create(path, RecordSchema::PromptLog.headers())?),
        None => None,
    };

    for template in &opts.templates {
        for model in &opts.models {
            let mut previous_exchange = String::new();
            for (rowid, item) in items.iter().enumerate() {
                if rowid < opts.start_row {
                    continue;
                }
                let alphabet = display.get(item.alphabet);
                let instruction = if starts_block(item.item_id) {
                    render_instruction(*template, alphabet)
                } else {
                    render_alphabet_reminder(alphabet)
                };
                let item_prompt = template.item_prompt(&item.a, &item.b, &item.c);
                let prompt = compose(&previous_exchange, &instruction, &item_prompt);

                let completion = provider
                    .complete(&prompt, model, &sampling)
                    .map_err(|err| call_context(err, rowid, model))?;

                let timestamp = timestamp_now();
                let record = if logprobs {
                    analogy_logprob_record(
                        rowid,
                        &timestamp,
                        item,
                        template.nr(),
                        &completion.text,
                        completion.confidence,
                        &completion.finish_reason,
                    )
                } else {
                    analogy_chat_record(
                        model,
                        rowid,
                        &timestamp,
                        item,
                        template.nr(),
                        &item_prompt,
                        &completion.text,
                        &prompt,
                    )
                };
                sink.append(&record)?;
                if let Some(log) = log.as_mut() {
                    log.append(&prompt_log_record(
                        model,
                        rowid,
                        &timestamp,
                        item.item_id,
                        &prompt,
                        &completion.text,
                        template.nr(),
                    ))?;
                }

                if opts.carry_exchange {
                    previous_exchange = format!("{prompt} {}\n", completion.text);
                }
            }
        }
    }

    Ok(RunReport {
        rows_written: sink.rows_written(),
    })
}

/// Runs the prev/next-letter task over `items`.
///
/// Every prompt is self-contained (alphabet instruction plus question);
/// there is no conversational state.
pub fn run_prev_next(
    items: &[PrevNextItem],
    provider: &dyn Provider,
    opts: &PrevNextRunOptions,
    out_path: &Path,
    log_path: Option<&Path>,
) -> Result<RunReport, LsaError> {
    ensure_models(&opts.models)?;

    let display = AlphabetSet::display_standard();
    let sampling = SamplingConfig::chat();
    let mut sink = CsvSink::create(out_path, RecordSchema::PrevNext.headers())?;
    let mut log = match log_path {
        Some(path) => Some(CsvSink::create(path, RecordSchema::PromptLog.headers())?),
        None => None,
    };

    for model in &opts.models {
        for (rowid, item) in items.iter().enumerate() {
            if rowid < opts.start_row {
                continue;
            }
            let alphabet = display.get(item.alphabet);
            let question = render_prev_next_item(
                item.prev_next,
                item.prev_next_dist,
                &item.stimulus,
                opts.variant,
            )?;
            let prompt = format!("{}{question}", render_prev_next_instruction(alphabet));

            let completion = provider
                .complete(&prompt, model, &sampling)
                .map_err(|err| call_context(err, rowid, model))?;

            let timestamp = timestamp_now();
            sink.append(&prev_next_record(
                model,
                rowid,
                &timestamp,
                item,
                &completion.text,
                opts.variant.nr(),
            ))?;
            if let Some(log) = log.as_mut() {
                log.append(&prompt_log_record(
                    model,
                    rowid,
                    &timestamp,
                    item.item_id,
                    &prompt,
                    &completion.text,
                    opts.variant.nr(),
                ))?;
            }
        }
    }

    Ok(RunReport {
        rows_written: sink.rows_written(),
    })
}

/// Runs the rule-check task over variation `items`.
///
/// Prompts carry the task instruction (no worked example) and are
/// self-contained; there is no conversational state.
pub fn run_rule_check(
    items: &[AnalogyItem],
    provider: &dyn Provider,
    opts: &RuleCheckRunOptions,
    out_path: &Path,
) -> Result<RunReport, LsaError> {
    ensure_models(&opts.models)?;

    let display = AlphabetSet::display_rulecheck();
    let sampling = SamplingConfig::chat();
    let mut sink = CsvSink::create(out_path, RecordSchema::RuleCheck.headers())?;

    for model in &opts.models {
        for (rowid, item) in items.iter().enumerate() {
            if rowid < opts.start_row {
                continue;
            }
            let alphabet = display.get(item.alphabet);
            let instruction = render_task_instruction(alphabet);
            let item_prompt = opts.template.item_prompt(&item.a, &item.b, &item.c);
            let prompt = compose("", &instruction, &item_prompt);

            let completion = provider
                .complete(&prompt, model, &sampling)
                .map_err(|err| call_context(err, rowid, model))?;

            sink.append(&rule_check_record(
                model,
                rowid,
                &timestamp_now(),
                item,
                &item_prompt,
                &completion.text,
            ))?;
        }
    }

    Ok(RunReport {
        rows_written: sink.rows_written(),
    })
}
