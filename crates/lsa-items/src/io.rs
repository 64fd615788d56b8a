//! CSV reading and writing for item files.

use std::path::Path;

use csv::{ReaderBuilder, WriterBuilder};

use lsa_core::{ErrorInfo, LsaError};

use crate::item::{AnalogyItem, PrevNextItem};

fn read_error(code: &str, path: &Path, err: impl ToString) -> LsaError {
    LsaError::Items(
        ErrorInfo::new(code, "failed to read item file")
            .with_context("path", path.display().to_string())
            .with_hint(err.to_string()),
    )
}

fn write_error(code: &str, path: &Path, err: impl ToString) -> LsaError {
    LsaError::Items(
        ErrorInfo::new(code, "failed to write item file")
            .with_context("path", path.display().to_string())
            .with_hint(err.to_string()),
    )
}

/// Reads analogy items from a CSV file, one row per item.
pub fn read_analogy_items(path: &Path) -> Result<Vec<AnalogyItem>, LsaError> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .from_path(path)
        .map_err(|err| read_error("items.open", path, err))?;
    let mut items = Vec::new();
    for (idx, row) in reader.deserialize::<AnalogyItem>().enumerate() {
        let item = row.map_err(|err| parse_error(path, idx, err))?;
        items.push(item);
    }
    Ok(items)
}

/// Reads prev/next-letter items from a CSV file.
pub fn read_prev_next_items(path: &Path) -> Result<Vec<PrevNextItem>, LsaError> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .from_path(path)
        .map_err(|err| read_error("items.open", path, err))?;
    let mut items = Vec::new();
    for (idx, row) in reader.deserialize::<PrevNextItem>().enumerate() {
        let item = row.map_err(|err| parse_error(path, idx, err))?;
        items.push(item);
    }
    Ok(items)
}

fn parse_error(path: &Path, row: usize, err: impl ToString) -> LsaError {
    LsaError::Items(
        ErrorInfo::new("items.parse", "malformed item row")
            .with_context("path", path.display().to_string())
            .with_context("row", row.to_string())
            .with_hint(err.to_string()),
    )
}

/// Writes letter-string items with the testlet schema
/// (`testletid,itemid,alphabet,A,B,C,D`).
pub fn write_letterstring_items(path: &Path, items: &[AnalogyItem]) -> Result<(), LsaError> {
    let mut writer = WriterBuilder::new()
        .from_path(path)
        .map_err(|err| write_error("items.create", path, err))?;
    writer
        .write_record(["testletid", "itemid", "alphabet", "A", "B", "C", "D"])
        .map_err(|err| write_error("items.write-header", path, err))?;
    for item in items {
        writer
            .write_record([
                item.testlet_id.to_string(),
                item.item_id.to_string(),
                item.alphabet.to_string(),
                item.a.clone(),
                item.b.clone(),
                item.c.clone(),
                item.d.clone(),
            ])
            .map_err(|err| write_error("items.write-row", path, err))?;
    }
    writer
        .flush()
        .map_err(|err| write_error("items.flush", path, err))?;
    Ok(())
}

/// Writes rule-check variation rows with the rule-check schema
/// (`itemid,alphabet,A,B,C,D,rule_AB,shift_dist,variationid`).
pub fn write_rulecheck_items(path: &Path, items: &[AnalogyItem]) -> Result<(), LsaError> {
    let mut writer = WriterBuilder::new()
        .from_path(path)
        .map_err(|err| write_error("items.create", path, err))?;
    writer
        .write_record([
            "itemid",
            "alphabet",
            "A",
            "B",
            "C",
            "D",
            "rule_AB",
            "shift_dist",
            "variationid",
        ])
        .map_err(|err| write_error("items.write-header", path, err))?;
    for item in items {
        writer
            .write_record([
                item.item_id.to_string(),
                item.alphabet.to_string(),
                item.a.clone(),
                item.b.clone(),
                item.c.clone(),
                item.d.clone(),
                item.rule_ab.clone().unwrap_or_default(),
                item.shift_dist.map(|d| d.to_string()).unwrap_or_default(),
                item.variation_id.map(|v| v.to_string()).unwrap_or_default(),
            ])
            .map_err(|err| write_error("items.write-row", path, err))?;
    }
    writer
        .flush()
        .map_err(|err| write_error("items.flush", path, err))?;
    Ok(())
}
