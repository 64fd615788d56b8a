use std::error::Error;
use std::fs;
use std::path::PathBuf;

use clap::Args;

use lsa_items::read_analogy_items;
use lsa_prompt::{Template, SYSTEM_PROMPT_LETTERSTRING};
use lsa_run::{run_analogy, timestamp_now, AnalogyRunOptions, RunMeta};

use super::providers::{resolve_models, ProviderGroup};

#[derive(Args, Debug)]
pub struct CollectArgs {
    /// Item CSV to drive through the providers (a testlet or base item file).
    #[arg(long)]
    pub items: PathBuf,
    /// Testlet nr used in the output file name.
    #[arg(long, default_value_t = 0)]
    pub testlet_nr: u32,
    /// Which template to use (1-5).
    #[arg(long, default_value_t = 5)]
    pub template: u32,
    /// Include each previous exchange in the next prompt.
    #[arg(long)]
    pub prev_exchange: bool,
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

pub fn run(args: &CollectArgs) -> Result<(), Box<dyn Error>> {
    fs::create_dir_all(&args.out)?;
    let items = read_analogy_items(&args.items)?;
    let template = Template::from_nr(args.template)?;
    let models = resolve_models(args.providers, &args.models);
    let provider = args.providers.build(SYSTEM_PROMPT_LETTERSTRING)?;

    let stamp = timestamp_now();
    let prev_flag = u8::from(args.prev_exchange);
    let stem = format!(
        "results_testlet{}_template{}_prevexchange{}_{}_{}",
        args.testlet_nr,
        args.template,
        prev_flag,
        args.providers.label(),
        stamp
    );
    let out_path = args.out.join(format!("{stem}.csv"));
    let log_path = args.log.then(|| args.out.join(format!("log_{stem}.csv")));

    let opts = AnalogyRunOptions {
        templates: vec![template],
        models: models.clone(),
        carry_exchange: args.prev_exchange,
        start_row: args.start_row,
    };
    let report = run_analogy(&items, provider.as_ref(), &opts, &out_path, log_path.as_deref())?;

    let meta = RunMeta::build(
        stamp,
        args.items.display().to_string(),
        args.providers.label(),
        models,
        vec![args.template],
        args.prev_exchange,
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
