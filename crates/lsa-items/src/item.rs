//! Item types mirroring the tabular item-file schemas.

use serde::{Deserialize, Serialize};

use lsa_core::AlphabetName;

/// Item ids reserved for the two worked examples at the head of a testlet.
/// Example items are exempt from shifting and copied verbatim into every
/// variation.
pub const EXAMPLE_ITEM_IDS: [u32; 2] = [101, 102];

/// One letter-string analogy item.
///
/// The four symbol slots may each hold several space-delimited symbols. The
/// `d` slot is the expected completion and is never sent to a provider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalogyItem {
    /// Testlet (or variation) the item belongs to.
    #[serde(rename = "testletid", default)]
    pub testlet_id: u32,
    /// Item id; `id % 10 == 1` marks the first item of an instructional block.
    #[serde(rename = "itemid")]
    pub item_id: u32,
    /// Alphabet every symbol in the four slots must belong to.
    pub alphabet: AlphabetName,
    /// Left-hand source term.
    #[serde(rename = "A")]
    pub a: String,
    /// Left-hand target term.
    #[serde(rename = "B")]
    pub b: String,
    /// Right-hand source term.
    #[serde(rename = "C")]
    pub c: String,
    /// Gold completion.
    #[serde(rename = "D")]
    pub d: String,
    /// Rule label for rule-check items (e.g. `successor`).
    #[serde(rename = "rule_AB", default)]
    pub rule_ab: Option<String>,
    /// Shift distance this row was generated with.
    #[serde(rename = "shift_dist", default)]
    pub shift_dist: Option<i64>,
    /// Variation id for rule-check pools.
    #[serde(rename = "variationid", default)]
    pub variation_id: Option<u32>,
}

impl AnalogyItem {
    /// Whether this row is one of the reserved worked examples.
    pub fn is_example(&self) -> bool {
        EXAMPLE_ITEM_IDS.contains(&self.item_id)
    }

    /// Whether this item starts a new instructional block (`id % 10 == 1`).
    pub fn starts_block(&self) -> bool {
        self.item_id % 10 == 1
    }
}

/// Direction of a prev/next-letter probe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// Asks for the symbol some places before the stimulus.
    Prev,
    /// Asks for the symbol some places after the stimulus.
    Next,
}

impl std::fmt::Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Direction::Prev => write!(f, "prev"),
            Direction::Next => write!(f, "next"),
        }
    }
}

/// One prev/next-letter item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PrevNextItem {
    /// Item id.
    #[serde(rename = "itemid")]
    pub item_id: u32,
    /// Probe direction.
    pub prev_next: Direction,
    /// Distance in alphabet positions.
    pub prev_next_dist: u32,
    /// Alphabet the stimulus is drawn from.
    pub alphabet: AlphabetName,
    /// The probed symbol.
    pub stimulus: String,
    /// Gold answer, echoed into output records only.
    pub solution: String,
}
