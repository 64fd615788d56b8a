use std::error::Error;
use std::path::PathBuf;

use clap::Args;

use lsa_items::{centered_shifts, generate_rulecheck_variations, read_analogy_items, write_rulecheck_items};

#[derive(Args, Debug)]
pub struct RulecheckVariationsArgs {
    /// Base rule-check item CSV (`itemid,alphabet,A,B,C,D,rule_AB`).
    #[arg(long = "in")]
    pub input: PathBuf,
    /// Output CSV for the concatenated variations.
    #[arg(long)]
    pub out: PathBuf,
    /// Number of shifted variations (odd; 5 gives shifts -2..=+2).
    #[arg(long, default_value_t = 5)]
    pub count: usize,
}

pub fn run(args: &RulecheckVariationsArgs) -> Result<(), Box<dyn Error>> {
    let base = read_analogy_items(&args.input)?;
    let shifts = centered_shifts(args.count)?;
    let variations = generate_rulecheck_variations(&base, &shifts)?;

    let rows: Vec<_> = variations
        .iter()
        .flat_map(|variation| variation.items.iter().cloned())
        .collect();
    write_rulecheck_items(&args.out, &rows)?;
    println!(
        "wrote {} rule-check rows ({} variations) to {}",
        rows.len(),
        variations.len(),
        args.out.display()
    );
    Ok(())
}
