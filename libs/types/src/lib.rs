//! Types library for the portfolio exchange ledger
//!
//! Core type definitions shared by the ledger contract and its collaborators.
//!
//! # Version
//! v1.0.0
//!
//! # Modules
//! - `ids`: Account identifiers
//! - `numeric`: Integer amounts, the fixed exchange rate, unit conversion
//! - `errors`: Numeric error taxonomy

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
