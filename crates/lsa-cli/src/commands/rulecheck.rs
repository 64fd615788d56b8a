use std::error::Error;
use std::fs;
use std::path::PathBuf;

use clap::Args;

use lsa_items::read_analogy_items;
use lsa_prompt::{Template, SYSTEM_PROMPT_LETTERSTRING};
use lsa_run::{run_rule_check, timestamp_now, RuleCheckRunOptions, RunMeta};

use super::providers::{resolve_models, ProviderGroup};

#[derive(Args, Debug)]
pub struct RulecheckArgs {
    /// Rule-check variation CSV.
    #[arg(long)]
    pub items: PathBuf,
    /// Which template to use (1-5).
    #[arg(long, default_value_t = 1)]
    pub template: u32,
    /// Provider group to target.
    #[arg(long, value_enum)]
    pub providers: ProviderGroup,
    /// Models to query instead of the group default (repeatable).
    #[arg(long = "model")]
    pub models: Vec<String>,
    /// Output directory for results.
    #[arg(long)]
    pub out: PathBuf,
    /// Item row to start with when resuming after a timeout (0-based).
    #[arg(long, default_value_t = 0)]
    pub start_row: usize,
}

pub fn run(args: &RulecheckArgs) -> Result<(), Box<dyn Error>> {
    fs::create_dir_all(&args.out)?;
    let items = read_analogy_items(&args.items)?;
    let template = Template::from_nr(args.template)?;
    let models = resolve_models(args.providers, &args.models);
    let provider = args.providers.build(SYSTEM_PROMPT_LETTERSTRING)?;

    let stamp = timestamp_now();
    let stem = format!("results_rulecheck_{}_{}", args.providers.label(), stamp);
    let out_path = args.out.join(format!("{stem}.csv"));

    let opts = RuleCheckRunOptions {
        template,
        models: models.clone(),
        start_row: args.start_row,
    };
    let report = run_rule_check(&items, provider.as_ref(), &opts, &out_path)?;

    let meta = RunMeta::build(
        stamp,
        args.items.display().to_string(),
        args.providers.label(),
        models,
        vec![args.template],
        false,
        args.start_row,
    )?;
    meta.write(&args.out.join(format!("{stem}.meta.json")))?;

    println!(
        "collected {} rows to {}",
        report.rows_written,
        out_path.display()
    );
    Ok(())
}
