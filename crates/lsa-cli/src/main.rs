use std::error::Error;

use clap::{Parser, Subcommand};

use commands::{collect, prevnext, rulecheck, rulecheck_variations, testlets, variations};

mod commands;

#[derive(Parser, Debug)]
#[command(name = "lsa", about = "Letter-string analogy item generation and LLM data collection")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Generate the shifted letter-string variation pools from base items.
    Variations(variations::VariationsArgs),
    /// Generate the rule-check item variation file from base items.
    RulecheckVariations(rulecheck_variations::RulecheckVariationsArgs),
    /// Assemble reproducible testlets from the variation pools.
    Testlets(testlets::TestletsArgs),
    /// Collect letter-string analogy completions from a provider group.
    Collect(collect::CollectArgs),
    /// Collect prev/next-letter completions from a provider group.
    Prevnext(prevnext::PrevnextArgs),
    /// Collect rule-check completions from a provider group.
    Rulecheck(rulecheck::RulecheckArgs),
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();
    match cli.command {
        Command::Variations(args) => variations::run(&args),
        Command::RulecheckVariations(args) => rulecheck_variations::run(&args),
        Command::Testlets(args) => testlets::run(&args),
        Command::Collect(args) => collect::run(&args),
        Command::Prevnext(args) => prevnext::run(&args),
        Command::Rulecheck(args) => rulecheck::run(&args),
    }
}
