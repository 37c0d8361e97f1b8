//! Risk methodology reference data.

pub mod catalogue;
pub mod types;

pub use catalogue::MethodologyCatalogue;
pub use types::*;
