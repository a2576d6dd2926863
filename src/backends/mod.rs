//! Backends module - Command implementations that read and write documents
//!
//! - decorate: one element tree from a file or stdin
//! - batch: a directory of element trees

pub mod batch;
pub mod decorate;
