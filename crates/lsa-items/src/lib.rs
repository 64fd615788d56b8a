#![deny(missing_docs)]
#![doc = "Item variation generation and deterministic testlet assembly."]

pub mod io;
pub mod item;
pub mod testlet;
pub mod variation;

pub use io::{
    read_analogy_items, read_prev_next_items, write_letterstring_items, write_rulecheck_items,
};
pub use item::{AnalogyItem, Direction, PrevNextItem, EXAMPLE_ITEM_IDS};
pub use testlet::{build_testlet, TestletLayout};
pub use variation::{
    centered_shifts, generate_letterstring_variations, generate_rulecheck_variations, shift_item,
    ItemVariation,
};
