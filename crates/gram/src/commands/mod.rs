//! CLI command implementations.

pub(crate) mod build;
pub(crate) mod tag;

pub(crate) use build::BuildArgs;
pub(crate) use tag::TagArgs;
