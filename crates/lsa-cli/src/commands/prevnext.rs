use std::error::Error;
use std::fs;
use std::path::PathBuf;

use clap::Args;

use lsa_items::read_prev_next_items;
use lsa_prompt::{PrevNextVariant, SYSTEM_PROMPT_PUZZLES};
use lsa_run::{run_prev_next, timestamp_now, PrevNextRunOptions, RunMeta};

use super::providers::{resolve_models, ProviderGroup};

#[derive(Args, Debug)]
pub struct PrevnextArgs {
    /// Prev/next item CSV.
    #[arg(long)]
    pub items: PathBuf,
    /// Which question phrasing to use (0 or 1).
    #[arg(long, default_value_t = 0)]
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
    /// Also write a parallel prompt log.
    #[arg(long)]
    pub log: bool,
}

pub fn run(args: &PrevnextArgs) -> Result<(), Box<dyn Error>> {
    fs::create_dir_all(&args.out)?;
    let items = read_prev_next_items(&args.items)?;
    let variant = PrevNextVariant::from_nr(args.template)?;
    let models = resolve_models(args.providers, &args.models);
    let provider = args.providers.build(SYSTEM_PROMPT_PUZZLES)?;

    let stamp = timestamp_now();
    let stem = format!(
        "results_template{}_{}_{}",
        args.template,
        args.providers.label(),
        stamp
    );
    let out_path = args.out.join(format!("{stem}.csv"));
    let log_path = args.log.then(|| args.out.join(format!("log_{stem}.csv")));

    let opts = PrevNextRunOptions {
        variant,
        models: models.clone(),
        start_row: args.start_row,
    };
    let report = run_prev_next(&items, provider.as_ref(), &opts, &out_path, log_path.as_deref())?;

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
