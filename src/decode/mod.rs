//! Response decoding module
//!
//! # Overview
//!
//! Decoding happens in two steps: [`RawPayload`] splits the JSON body into
//! its `data`, `meta`, `includes` and `errors` sections, then
//! [`EntityMapper`] turns the `data` section into typed entities.

mod mapper;
mod types;

pub use mapper::{map_records, EntityMapper};
pub use types::RawPayload;
