//! Edges of the crate: reading the landing URL and rendering page state.

pub mod query;
pub mod render;
