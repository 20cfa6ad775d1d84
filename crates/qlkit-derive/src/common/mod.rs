//! Helpers shared by the `FromRow` and `Record` derives.

pub mod attrs;
pub mod syn_types;
