use std::error::Error;
use std::fs;
use std::path::PathBuf;

use clap::Args;

use lsa_items::{
    centered_shifts, generate_letterstring_variations, read_analogy_items,
    write_letterstring_items,
};

#[derive(Args, Debug)]
pub struct VariationsArgs {
    /// Base item CSV (`testletid,itemid,alphabet,A,B,C,D`).
    #[arg(long = "in")]
    pub input: PathBuf,
    /// Output directory for the variation pools.
    #[arg(long)]
    pub out: PathBuf,
    /// Number of shifted variations (odd; 5 gives shifts -2..=+2).
    #[arg(long, default_value_t = 5)]
    pub count: usize,
}

pub fn run(args: &VariationsArgs) -> Result<(), Box<dyn Error>> {
    fs::create_dir_all(&args.out)?;
    let base = read_analogy_items(&args.input)?;
    let shifts = centered_shifts(args.count)?;
    let variations = generate_letterstring_variations(&base, &shifts)?;

    // Pool 0 is the unshifted base set, the one administered to people.
    write_letterstring_items(&args.out.join("letterstring_testlet0.csv"), &base)?;
    for variation in &variations {
        let path = args
            .out
            .join(format!("letterstring_testlet{}.csv", variation.variation_id));
        write_letterstring_items(&path, &variation.items)?;
    }
    println!(
        "wrote {} variation pools ({} items each) to {}",
        variations.len() + 1,
        base.len(),
        args.out.display()
    );
    Ok(())
}
