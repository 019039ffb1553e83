//! Data Transfer Objects for REST request/response serialization.
//!
//! Amounts are ALGO as JSON numbers; rounds are integers.

pub mod common_dto;
pub mod tracker_dto;

pub use common_dto::*;
pub use tracker_dto::*;
