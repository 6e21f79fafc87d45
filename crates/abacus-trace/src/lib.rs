//! Abacus Trace: consumer-side tools for step traces
//!
//! Everything here reads a finished trace and never changes it:
//! serialization for transport, a content digest for caching and
//! export, verification of the arithmetic a trace claims, and summaries
//! and frame names for renderers.
//!
//! # Example
//!
//! ```
//! use abacus_core::generate_steps;
//! use abacus_trace::{trace_digest, verify};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let seq = generate_steps("100-1", 10)?;
//! let report = verify(seq.steps())?;
//! assert!(report.ok);
//! assert!(trace_digest(seq.steps())?.starts_with("blake3:"));
//! # Ok(())
//! # }
//! ```

pub mod digest;
pub mod serializer;
pub mod summary;
pub mod verify;

pub use digest::trace_digest;
pub use serializer::{from_json, serialize_trace, to_json, to_json_pretty};
pub use summary::{frame_label, summarize, TraceSummary};
pub use verify::{verify, Verification};

use abacus_core::ArithError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TraceError {
    #[error("TRACE/empty trace")]
    Empty,
    #[error("TRACE/first step is not a setup step")]
    MissingSetup,
    #[error("TRACE/last step is not a finish step")]
    MissingFinish,
    #[error("SERIALIZE/{0}")]
    Serialize(#[from] serde_json::Error),
    #[error(transparent)]
    Arith(#[from] ArithError),
}
