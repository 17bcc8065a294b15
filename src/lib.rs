//! Recovery Flux - Deterministic sleep recovery scoring engine
//!
//! Recovery Flux estimates a Cognitive Recovery Index (CRI) and a Muscular
//! Recovery Index (MRI) from weekly-averaged sleep and environment metrics
//! through a deterministic pipeline: normalization → weighted geometric mean
//! → modifier chain → soft cap against the device sleep score → tiers and
//! progression.
//!
//! ## Modules
//!
//! - **Engine**: `normalizer`, `combiner`, `modifiers`, `soft_cap`,
//!   `classifier`, `progression`, orchestrated by `pipeline`
//! - **Surfaces**: `adapter` (flat JSON records), `encoder` (reports),
//!   `config` (TOML defaults), `ffi` (C ABI)

pub mod adapter;
pub mod classifier;
pub mod combiner;
pub mod config;
pub mod encoder;
pub mod error;
pub mod modifiers;
pub mod normalizer;
pub mod pipeline;
pub mod progression;
pub mod soft_cap;
pub mod suggestions;
pub mod types;
pub mod validation;

// FFI bindings for C interop (always available for cdylib/staticlib builds)
pub mod ffi;

pub use adapter::{InputRecord, RecordAdapter};
pub use config::EngineConfig;
pub use error::ComputeError;
pub use pipeline::{recovery_from_json, RecoveryEngine, RecoveryProcessor};
pub use types::{
    Continuity, EnvironmentMetrics, Level, RecoveryInput, RecoveryReport, RecoveryScores,
    SleepMetrics, Tier,
};

/// Library version embedded in all reports
pub const FLUX_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Producer name for reports
pub const PRODUCER_NAME: &str = "recovery-flux";
