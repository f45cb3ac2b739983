//! Shared helpers.

pub(crate) mod path;
