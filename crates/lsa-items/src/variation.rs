//! Cyclic-shift item variation generation.

use lsa_core::{Alphabet, AlphabetSet, ErrorInfo, LsaError};

use crate::item::AnalogyItem;

/// One generated variation: every base item shifted by `shift_dist`.
#[derive(Debug, Clone, PartialEq)]
pub struct ItemVariation {
    /// 1-based variation id (doubles as the testlet id for the seed pools).
    pub variation_id: u32,
    /// Shift distance applied to every non-exempt item.
    pub shift_dist: i64,
    /// The shifted items, in base order.
    pub items: Vec<AnalogyItem>,
}

/// Shifts every symbol of a single field (space-delimited) through the
/// item's alphabet and rejoins with single spaces.
fn shift_field(field: &str, alphabet: &Alphabet, distance: i64) -> Result<String, LsaError> {
    let mut shifted = Vec::new();
    for symbol in field.split_whitespace() {
        shifted.push(alphabet.shifted(symbol, distance)?);
    }
    Ok(shifted.join(" "))
}

/// Applies one integer shift distance to every symbol of an item.
///
/// All four slots are shifted through the item's declared alphabet. A symbol
/// outside that alphabet aborts the row with the unknown-symbol error; a
/// wrong symbol is never emitted silently. `shift_item(i, 0)` reproduces the
/// item exactly.
pub fn shift_item(
    item: &AnalogyItem,
    distance: i64,
    alphabets: &AlphabetSet,
) -> Result<AnalogyItem, LsaError> {
    let alphabet = alphabets.get(item.alphabet);
    let mut shifted = item.clone();
    shifted.a = shift_field(&item.a, alphabet, distance).map_err(|err| item_context(err, item))?;
    shifted.b = shift_field(&item.b, alphabet, distance).map_err(|err| item_context(err, item))?;
    shifted.c = shift_field(&item.c, alphabet, distance).map_err(|err| item_context(err, item))?;
    shifted.d = shift_field(&item.d, alphabet, distance).map_err(|err| item_context(err, item))?;
    Ok(shifted)
}

fn item_context(err: LsaError, item: &AnalogyItem) -> LsaError {
    match err {
        LsaError::Alphabet(info) => {
            LsaError::Alphabet(info.with_context("itemid", item.item_id.to_string()))
        }
        other => other,
    }
}

/// The symmetric shift ladder for `count` variations: `-2..=+2` for five.
///
/// `count` must be odd so the ladder is centered on the unshifted base.
pub fn centered_shifts(count: usize) -> Result<Vec<i64>, LsaError> {
    if count == 0 || count % 2 == 0 {
        return Err(LsaError::Items(
            ErrorInfo::new("items.even-ladder", "variation count must be odd")
                .with_context("count", count.to_string())
                .with_hint("an odd count centers the ladder on shift 0"),
        ));
    }
    let half = (count / 2) as i64;
    Ok((-half..=half).collect())
}

/// Generates the letter-string variation ladder.
///
/// Variation ids run `1..=shifts.len()`; each variation's rows carry that id
/// in `testletid` so the pools double as the first seed testlets. Example
/// items (ids 101/102) are exempt from shifting and copied verbatim into
/// every variation.
pub fn generate_letterstring_variations(
    base: &[AnalogyItem],
    shifts: &[i64],
) -> Result<Vec<ItemVariation>, LsaError> {
    let alphabets = AlphabetSet::items_letterstring();
    let mut variations = Vec::with_capacity(shifts.len());
    for (idx, &distance) in shifts.iter().enumerate() {
        let variation_id = idx as u32 + 1;
        let mut items = Vec::with_capacity(base.len());
        for item in base {
            let mut row = if item.is_example() {
                item.clone()
            } else {
                shift_item(item, distance, &alphabets)?
            };
            row.testlet_id = variation_id;
            items.push(row);
        }
        variations.push(ItemVariation {
            variation_id,
            shift_dist: distance,
            items,
        });
    }
    Ok(variations)
}

/// Generates the rule-check variation ladder.
///
/// The rule-check set has no example items, so every row is shifted; each
/// row is stamped with its `variationid` and `shift_dist`.
pub fn generate_rulecheck_variations(
    base: &[AnalogyItem],
    shifts: &[i64],
) -> Result<Vec<ItemVariation>, LsaError> {
    let alphabets = AlphabetSet::items_rulecheck();
    let mut variations = Vec::with_capacity(shifts.len());
    for (idx, &distance) in shifts.iter().enumerate() {
        let variation_id = idx as u32 + 1;
        let mut items = Vec::with_capacity(base.len());
        for item in base {
            let mut row = shift_item(item, distance, &alphabets)?;
            row.variation_id = Some(variation_id);
            row.shift_dist = Some(distance);
            items.push(row);
        }
        variations.push(ItemVariation {
            variation_id,
            shift_dist: distance,
            items,
        });
    }
    Ok(variations)
}
