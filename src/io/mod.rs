//! Artifact file I/O.

pub mod artifacts;
