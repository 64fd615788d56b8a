//! Run manifest: configuration provenance persisted next to each results
//! file.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use lsa_core::{ErrorInfo, LsaError};

/// Configuration snapshot identifying a run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunMeta {
    /// Stable hash of the remaining fields.
    pub id: String,
    /// Compact creation timestamp.
    pub created_at: String,
    /// Path of the item file driven through the providers.
    pub items_path: String,
    /// Provider group label (`gpt`, `together`, `anthropic`, `completions`).
    pub provider_group: String,
    /// Models queried, in order.
    pub models: Vec<String>,
    /// Template number(s) used.
    pub template_nrs: Vec<u32>,
    /// Whether prior exchanges were folded into later prompts.
    pub carry_exchange: bool,
    /// First row processed (resumption offset).
    pub start_row: usize,
}

impl RunMeta {
    /// Builds a manifest, deriving the id from the configuration fields.
    #[allow(clippy::too_many_arguments)]
    pub fn build(
        created_at: impl Into<String>,
        items_path: impl Into<String>,
        provider_group: impl Into<String>,
        models: Vec<String>,
        template_nrs: Vec<u32>,
        carry_exchange: bool,
        start_row: usize,
    ) -> Result<Self, LsaError> {
        let mut meta = Self {
            id: String::new(),
            created_at: created_at.into(),
            items_path: items_path.into(),
            provider_group: provider_group.into(),
            models,
            template_nrs,
            carry_exchange,
            start_row,
        };
        meta.id = stable_hash_string(&(
            &meta.items_path,
            &meta.provider_group,
            &meta.models,
            &meta.template_nrs,
            meta.carry_exchange,
            meta.start_row,
        ))?;
        Ok(meta)
    }

    /// Writes the manifest as JSON.
    pub fn write(&self, path: &Path) -> Result<(), LsaError> {
        let bytes = to_canonical_json_bytes(self)?;
        fs::write(path, bytes).map_err(|err| {
            LsaError::Run(
                ErrorInfo::new("run.meta-write", "failed to write run manifest")
                    .with_context("path", path.display().to_string())
                    .with_hint(err.to_string()),
            )
        })
    }
}

/// Serializes a value to canonical JSON bytes (object keys sorted).
pub fn to_canonical_json_bytes<T: serde::Serialize>(value: &T) -> Result<Vec<u8>, LsaError> {
    let tree = serde_json::to_value(value)
        .map_err(|err| LsaError::Serde(ErrorInfo::new("serde.json-encode", err.to_string())))?;
    serde_json::to_vec(&tree)
        .map_err(|err| LsaError::Serde(ErrorInfo::new("serde.json-encode", err.to_string())))
}

/// Computes a stable hexadecimal hash for the provided serializable payload.
pub fn stable_hash_string<T: serde::Serialize>(value: &T) -> Result<String, LsaError> {
    let bytes = to_canonical_json_bytes(value)?;
    let digest = Sha256::digest(bytes);
    Ok(format!("{:x}", digest))
}
