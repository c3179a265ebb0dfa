//! Types library for the tokenized vault
//!
//! Shared identifiers and integer arithmetic used by the vault contract
//! layer. Everything here is deterministic: amounts are 256-bit unsigned
//! integers and every rounding decision is explicit.
//!
//! # Version
//! v1.0.0 - Frozen
//!
//! # Modules
//! - `ids`: Identifiers (VaultId, PauseKey, Address)
//! - `numeric`: 256-bit amounts and directional mul/div
//! - `errors`: Error taxonomy

// Public modules
pub mod ids;
pub mod numeric;
pub mod errors;

// Library version constant
pub const LIB_VERSION: &str = "1.0.0";

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::ids::*;
    pub use crate::numeric::*;
    pub use crate::errors::*;
}
