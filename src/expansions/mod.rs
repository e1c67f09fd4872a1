//! Expansion resolution module
//!
//! # Overview
//!
//! Responses side-load the full objects that primary records only reference
//! by id, under `includes`. This module indexes those objects into one table
//! per category so references (author id, media keys, poll ids, place id,
//! referenced tweet ids) can be resolved. Unresolvable references are `None`,
//! never an error.

mod resolver;
mod types;

pub use resolver::{Expanded, Expansions, Table};
pub use types::{Category, EntityKey, KeyPolicy};
