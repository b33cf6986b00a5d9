//! Shared constants for the design engine.

/// Engine version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Sampler names accepted by the generator, in dispatch order.
pub const SAMPLER_NAMES: [&str; 3] = ["lhs", "mc", "uni"];

/// Default sampler when neither config nor caller picks one.
pub const DEFAULT_SAMPLER: &str = "lhs";

/// Default samples per sampled factor for `lhs` and `mc`.
pub const DEFAULT_N_SAMPLES_PER_FACTOR: usize = 10;

/// Default random seed.
pub const DEFAULT_RANDOM_SEED: u64 = 1234;

/// Default PERT shape parameter (weight given to the mode).
pub const DEFAULT_PERT_GAMMA: f64 = 4.0;

// ---- Storage ----

/// Default number of pooled read connections.
pub const DEFAULT_READ_POOL_SIZE: usize = 4;

/// Upper bound on pooled read connections.
pub const MAX_READ_POOL_SIZE: usize = 8;

/// Default SQLite busy timeout in milliseconds.
pub const DEFAULT_BUSY_TIMEOUT_MS: u64 = 5000;
