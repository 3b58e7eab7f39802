//! Wire DTOs for the two backend contracts.
//!
//! Field names are bit-exact with the backend JSON (camelCase). Conversions
//! into domain types live next to each DTO.

pub mod error_body;
pub mod ranking;
pub mod top_pick;

pub use error_body::ErrorBody;
