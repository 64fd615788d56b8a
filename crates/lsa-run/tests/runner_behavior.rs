use std::cell::RefCell;
use std::path::Path;

use lsa_core::{AlphabetName, ErrorInfo, LsaError};
use lsa_items::{AnalogyItem, Direction, PrevNextItem};
use lsa_prompt::{PrevNextVariant, Template};
use lsa_provider::{Completion, Provider, SamplingConfig};
use lsa_run::{
    run_analogy, run_prev_next, run_rule_check, AnalogyRunOptions, PrevNextRunOptions,
    RuleCheckRunOptions,
};
use tempfile::tempdir;

/// Scripted provider: records every prompt, answers deterministically, and
/// can be told to fail at a given call index.
struct MockProvider {
    prompts: RefCell<Vec<String>>,
    logprobs: bool,
    fail_at: Option<usize>,
}

impl MockProvider {
    fn new() -> Self {
        Self {
            prompts: RefCell::new(Vec::new()),
            logprobs: false,
            fail_at: None,
        }
    }

    fn with_logprobs() -> Self {
        Self {
            logprobs: true,
            ..Self::new()
        }
    }

    fn failing_at(call: usize) -> Self {
        Self {
            fail_at: Some(call),
            ..Self::new()
        }
    }
}

impl Provider for MockProvider {
    fn complete(
        &self,
        prompt: &str,
        _model: &str,
        _sampling: &SamplingConfig,
    ) -> Result<Completion, LsaError> {
        let mut prompts = self.prompts.borrow_mut();
        let call = prompts.len();
        if self.fail_at == Some(call) {
            return Err(LsaError::Provider(ErrorInfo::new(
                "provider.request-failed",
                "scripted failure",
            )));
        }
        prompts.push(prompt.to_string());
        Ok(Completion {
            text: format!("answer{call}"),
            finish_reason: "stop".to_string(),
            confidence: self.logprobs.then_some(-0.5),
        })
    }

    fn exposes_logprobs(&self) -> bool {
        self.logprobs
    }
}

fn item(item_id: u32, a: &str, b: &str, c: &str, d: &str) -> AnalogyItem {
    AnalogyItem {
        testlet_id: 7,
        item_id,
        alphabet: AlphabetName::Latin,
        a: a.to_string(),
        b: b.to_string(),
        c: c.to_string(),
        d: d.to_string(),
        rule_ab: None,
        shift_dist: None,
        variation_id: None,
    }
}

fn items() -> Vec<AnalogyItem> {
    vec![
        item(101, "a", "b", "j", "k"),
        item(102, "c", "d", "g", "h"),
        item(111, "d", "e", "h", "i"),
    ]
}

fn read_rows(path: &Path) -> (Vec<String>, Vec<Vec<String>>) {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_path(path)
        .unwrap();
    let headers: Vec<String> = reader.headers().unwrap().iter().map(String::from).collect();
    let rows = reader
        .records()
        .map(|record| record.unwrap().iter().map(String::from).collect())
        .collect();
    (headers, rows)
}

fn analogy_opts() -> AnalogyRunOptions {
    AnalogyRunOptions {
        templates: vec![Template::Ratio],
        models: vec!["model-a".to_string()],
        carry_exchange: false,
        start_row: 0,
    }
}

#[test]
fn chat_schema_has_the_documented_columns() {
    let dir = tempdir().unwrap();
    let out = dir.path().join("results.csv");
    let provider = MockProvider::new();

    let report = run_analogy(&items(), &provider, &analogy_opts(), &out, None).unwrap();
    assert_eq!(report.rows_written, 3);

    let (headers, rows) = read_rows(&out);
    assert_eq!(
        headers,
        vec![
            "model", "rowid", "timestamp", "testletid", "itemid", "alphabet", "A", "B", "C", "D",
            "template_nr", "item_prompt", "response", "prompt",
        ]
    );
    assert_eq!(rows.len(), 3);
    assert_eq!(rows[0][0], "model-a");
    assert_eq!(rows[0][1], "0");
    assert_eq!(rows[0][3], "7");
    assert_eq!(rows[0][4], "101");
    assert_eq!(rows[0][10], "2");
    assert_eq!(rows[0][11], "a is to b, as j is to");
    assert_eq!(rows[0][12], "answer0");
    assert_eq!(rows[2][1], "2");
}

#[test]
fn logprob_schema_is_selected_by_the_backend() {
    let dir = tempdir().unwrap();
    let out = dir.path().join("results.csv");
    let provider = MockProvider::with_logprobs();

    run_analogy(&items(), &provider, &analogy_opts(), &out, None).unwrap();

    let (headers, rows) = read_rows(&out);
    assert_eq!(
        headers,
        vec![
            "rowid", "timestamp", "testletid", "itemid", "alphabet", "A", "B", "C", "D",
            "template_nr", "response", "logprob", "finish_reason",
        ]
    );
    assert_eq!(rows[0][11], "-0.5");
    assert_eq!(rows[0][12], "stop");
}

#[test]
fn block_start_gets_the_worked_example_and_continuations_the_reminder() {
    let dir = tempdir().unwrap();
    let out = dir.path().join("results.csv");
    let provider = MockProvider::new();

    run_analogy(&items(), &provider, &analogy_opts(), &out, None).unwrap();

    let prompts = provider.prompts.borrow();
    assert!(prompts[0].contains(Template::Ratio.example()));
    assert!(!prompts[1].contains(Template::Ratio.example()));
    assert!(prompts[1].contains("The letter or symbol list is"));
    // 111 starts the next block, so the worked example returns.
    assert!(prompts[2].contains(Template::Ratio.example()));
}

#[test]
fn carry_over_accumulates_prior_exchanges() {
    let dir = tempdir().unwrap();
    let out = dir.path().join("results.csv");
    let provider = MockProvider::new();
    let opts = AnalogyRunOptions {
        carry_exchange: true,
        ..analogy_opts()
    };

    run_analogy(&items(), &provider, &opts, &out, None).unwrap();

    let prompts = provider.prompts.borrow();
    assert!(prompts[1].starts_with(&format!("{} answer0\n", prompts[0])));
    assert!(prompts[2].starts_with(&format!("{} answer1\n", prompts[1])));
}

#[test]
fn without_carry_over_prompts_stay_independent() {
    let dir = tempdir().unwrap();
    let out = dir.path().join("results.csv");
    let provider = MockProvider::new();

    run_analogy(&items(), &provider, &analogy_opts(), &out, None).unwrap();

    let prompts = provider.prompts.borrow();
    assert!(!prompts[1].contains("answer0"));
    assert!(!prompts[2].contains("answer1"));
}

#[test]
fn start_row_skips_earlier_rows_but_keeps_rowids() {
    let dir = tempdir().unwrap();
    let out = dir.path().join("results.csv");
    let provider = MockProvider::new();
    let opts = AnalogyRunOptions {
        start_row: 2,
        ..analogy_opts()
    };

    let report = run_analogy(&items(), &provider, &opts, &out, None).unwrap();
    assert_eq!(report.rows_written, 1);

    let (_, rows) = read_rows(&out);
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0][1], "2");
    assert_eq!(rows[0][4], "111");
}

#[test]
fn resuming_with_carry_over_is_rejected() {
    let dir = tempdir().unwrap();
    let out = dir.path().join("results.csv");
    let provider = MockProvider::new();
    let opts = AnalogyRunOptions {
        carry_exchange: true,
        start_row: 5,
        ..analogy_opts()
    };

    let err = run_analogy(&items(), &provider, &opts, &out, None).unwrap_err();
    assert_eq!(err.info().code, "run.resume-carry-over");
}

#[test]
fn provider_failure_names_the_row_and_leaves_no_partial_rows() {
    let dir = tempdir().unwrap();
    let out = dir.path().join("results.csv");
    let provider = MockProvider::failing_at(2);

    let err = run_analogy(&items(), &provider, &analogy_opts(), &out, None).unwrap_err();
    assert_eq!(err.info().code, "provider.request-failed");
    assert_eq!(err.info().context.get("rowid").map(String::as_str), Some("2"));

    let (_, rows) = read_rows(&out);
    assert_eq!(rows.len(), 2);
}

#[test]
fn empty_model_list_is_a_configuration_error() {
    let dir = tempdir().unwrap();
    let out = dir.path().join("results.csv");
    let provider = MockProvider::new();
    let opts = AnalogyRunOptions {
        models: Vec::new(),
        ..analogy_opts()
    };

    let err = run_analogy(&items(), &provider, &opts, &out, None).unwrap_err();
    assert_eq!(err.info().code, "run.no-models");
}

#[test]
fn prompt_log_mirrors_results_row_for_row() {
    let dir = tempdir().unwrap();
    let out = dir.path().join("results.csv");
    let log = dir.path().join("log.csv");
    let provider = MockProvider::new();

    run_analogy(&items(), &provider, &analogy_opts(), &out, Some(&log)).unwrap();

    let (headers, rows) = read_rows(&log);
    assert_eq!(
        headers,
        vec!["model", "rowid", "timestamp", "itemid", "prompt", "response", "template_nr"]
    );
    assert_eq!(rows.len(), 3);
    assert_eq!(rows[0][3], "101");
    assert_eq!(rows[1][5], "answer1");
    let prompts = provider.prompts.borrow();
    assert_eq!(rows[2][4], prompts[2]);
}

#[test]
fn prev_next_runner_writes_the_prev_next_schema() {
    let dir = tempdir().unwrap();
    let out = dir.path().join("results.csv");
    let provider = MockProvider::new();
    let items = vec![
        PrevNextItem {
            item_id: 1,
            prev_next: Direction::Next,
            prev_next_dist: 1,
            alphabet: AlphabetName::Latin,
            stimulus: "c".to_string(),
            solution: "d".to_string(),
        },
        PrevNextItem {
            item_id: 2,
            prev_next: Direction::Prev,
            prev_next_dist: 2,
            alphabet: AlphabetName::Greek,
            stimulus: "gamma".to_string(),
            solution: "alpha".to_string(),
        },
    ];
    let opts = PrevNextRunOptions {
        variant: PrevNextVariant::Bare,
        models: vec!["model-a".to_string()],
        start_row: 0,
    };

    let report = run_prev_next(&items, &provider, &opts, &out, None).unwrap();
    assert_eq!(report.rows_written, 2);

    let (headers, rows) = read_rows(&out);
    assert_eq!(
        headers,
        vec![
            "model", "rowid", "timestamp", "itemid", "prev_next", "prev_next_dist", "alphabet",
            "stimulus", "solution", "response", "template_nr",
        ]
    );
    assert_eq!(rows[0][4], "next");
    assert_eq!(rows[1][4], "prev");
    assert_eq!(rows[1][8], "alpha");

    let prompts = provider.prompts.borrow();
    assert!(prompts[0].starts_with("Here is an ordered list of letters or symbols"));
    assert!(prompts[0].contains("one after c"));
    assert!(prompts[1].contains("two before gamma"));
}

#[test]
fn rule_check_runner_writes_the_rule_check_schema() {
    let dir = tempdir().unwrap();
    let out = dir.path().join("results.csv");
    let provider = MockProvider::new();
    let mut rule_items = vec![item(201, "a b c", "b c d", "j k l", "k l m")];
    rule_items[0].variation_id = Some(3);
    rule_items[0].shift_dist = Some(-2);
    let opts = RuleCheckRunOptions {
        template: Template::Sentence,
        models: vec!["model-a".to_string()],
        start_row: 0,
    };

    let report = run_rule_check(&rule_items, &provider, &opts, &out).unwrap();
    assert_eq!(report.rows_written, 1);

    let (headers, rows) = read_rows(&out);
    assert_eq!(
        headers,
        vec![
            "model", "rowid", "timestamp", "variationid", "shift_dist", "alphabet", "A", "B", "C",
            "D", "item_prompt", "response",
        ]
    );
    assert_eq!(rows[0][3], "3");
    assert_eq!(rows[0][4], "-2");
    assert_eq!(rows[0][10], "If a b c changes to b c d, what does j k l change to ?");

    let prompts = provider.prompts.borrow();
    assert!(prompts[0].starts_with("We are going to solve puzzles"));
    assert!(!prompts[0].contains("For example"));
}
