use std::error::Error;
use std::fs;
use std::path::PathBuf;

use clap::Args;

use lsa_items::{build_testlet, read_analogy_items, write_letterstring_items, TestletLayout};

#[derive(Args, Debug)]
pub struct TestletsArgs {
    /// Directory holding the variation pools
    /// (`letterstring_testlet0.csv` .. `letterstring_testlet{pools-1}.csv`).
    #[arg(long)]
    pub pools: PathBuf,
    /// Number of variation pools to draw from.
    #[arg(long, default_value_t = 6)]
    pub num_pools: usize,
    /// First testlet id to assemble.
    #[arg(long, default_value_t = 6)]
    pub from: u32,
    /// Last testlet id to assemble (inclusive).
    #[arg(long, default_value_t = 54)]
    pub to: u32,
    /// Items per alphabet block.
    #[arg(long, default_value_t = 5)]
    pub items_per_alphabet: usize,
    /// Output directory for the assembled testlets.
    #[arg(long)]
    pub out: PathBuf,
}

pub fn run(args: &TestletsArgs) -> Result<(), Box<dyn Error>> {
    fs::create_dir_all(&args.out)?;

    let mut pools = Vec::with_capacity(args.num_pools);
    for idx in 0..args.num_pools {
        let path = args.pools.join(format!("letterstring_testlet{idx}.csv"));
        pools.push(read_analogy_items(&path)?);
    }

    let layout = TestletLayout {
        items_per_alphabet: args.items_per_alphabet,
        ..TestletLayout::default()
    };
    for testlet_id in args.from..=args.to {
        let testlet = build_testlet(testlet_id, &pools, &layout)?;
        let path = args.out.join(format!("letterstring_testlet{testlet_id}.csv"));
        write_letterstring_items(&path, &testlet)?;
        println!("testlet{testlet_id} done");
    }
    Ok(())
}
