//! Content digest of a trace.
use crate::TraceError;
use abacus_core::Step;

/// `blake3:<hex>` over the canonical JSON encoding of `steps`.
///
/// Generation is deterministic, so equal requests yield equal digests.
pub fn trace_digest(steps: &[Step]) -> Result<String, TraceError> {
    let bytes = serde_json::to_vec(steps)?;
    Ok(format!("blake3:{}", blake3::hash(&bytes)))
}
