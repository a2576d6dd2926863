//! Core module - Contains the fundamental data structures and utilities
//!
//! This module provides:
//! - Element tree model (Node, Element)
//! - HTML escaping, text extraction and serialization
//! - Rendering functions for different output formats
//! - Path normalization utilities

pub mod html;
pub mod paths;
pub mod render;
pub mod tree;
