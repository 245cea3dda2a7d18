//! Adapters for the [`crate::domain::ports::Navigator`] port.

pub mod navigators;
