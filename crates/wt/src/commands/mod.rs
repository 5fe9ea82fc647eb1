//! CLI command implementations.

pub(crate) mod lower;

pub(crate) use lower::LowerArgs;
