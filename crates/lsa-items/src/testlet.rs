//! Deterministic testlet assembly from pre-generated variant pools.

use rand::Rng;

use lsa_core::{AlphabetName, ErrorInfo, LsaError, RngHandle};

use crate::item::AnalogyItem;

/// Shape of an assembled testlet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TestletLayout {
    /// Items drawn per alphabet block.
    pub items_per_alphabet: usize,
    /// Alphabet blocks in administration order.
    pub alphabets: Vec<AlphabetName>,
}

impl Default for TestletLayout {
    fn default() -> Self {
        Self {
            items_per_alphabet: 5,
            alphabets: AlphabetName::ORDERED.to_vec(),
        }
    }
}

/// Builds one testlet from the variant pools.
///
/// The generator is seeded with `testlet_id`, so the same id produces a
/// bit-identical testlet on every platform. One variation index is drawn
/// uniformly per item position and reused across all alphabets, which keeps
/// item position k parallel between alphabets (same base item, same shift).
/// Output order: the two example items from the first pool, then one block
/// per alphabet in layout order. Every emitted row's testlet id is
/// overwritten with `testlet_id`.
pub fn build_testlet(
    testlet_id: u32,
    pools: &[Vec<AnalogyItem>],
    layout: &TestletLayout,
) -> Result<Vec<AnalogyItem>, LsaError> {
    if pools.is_empty() {
        return Err(LsaError::Items(ErrorInfo::new(
            "items.empty-pools",
            "testlet assembly requires at least one variant pool",
        )));
    }

    let mut rng = RngHandle::from_seed(u64::from(testlet_id));
    let draws: Vec<usize> = (0..layout.items_per_alphabet)
        .map(|_| rng.gen_range(0..pools.len()))
        .collect();

    let mut testlet = Vec::new();
    for example in example_items(&pools[0])? {
        let mut row = example.clone();
        row.testlet_id = testlet_id;
        testlet.push(row);
    }

    for &alphabet in &layout.alphabets {
        for (position, &variation) in draws.iter().enumerate() {
            let mut row = pool_item(&pools[variation], alphabet, position)?.clone();
            row.testlet_id = testlet_id;
            testlet.push(row);
        }
    }

    Ok(testlet)
}

/// The two worked examples at the head of the first pool.
fn example_items(pool: &[AnalogyItem]) -> Result<[&AnalogyItem; 2], LsaError> {
    let mut examples = pool.iter().filter(|item| item.is_example());
    match (examples.next(), examples.next()) {
        (Some(first), Some(second)) => Ok([first, second]),
        _ => Err(LsaError::Items(ErrorInfo::new(
            "items.missing-examples",
            "first variant pool must contain the two example items",
        ))),
    }
}

/// The `position`-th non-example item of `alphabet` within a pool.
fn pool_item(
    pool: &[AnalogyItem],
    alphabet: AlphabetName,
    position: usize,
) -> Result<&AnalogyItem, LsaError> {
    pool.iter()
        .filter(|item| !item.is_example() && item.alphabet == alphabet)
        .nth(position)
        .ok_or_else(|| {
            LsaError::Items(
                ErrorInfo::new("items.missing-pool-item", "variant pool is missing an item")
                    .with_context("alphabet", alphabet.to_string())
                    .with_context("position", position.to_string()),
            )
        })
}
