//! Core module - Contains the fundamental data structures and utilities
//!
//! This module provides:
//! - The report tree arena and unified result model
//! - Tolerant floating-point comparison
//! - Rendering functions for different output formats
//! - Safe report reading
//! - Common utilities

pub mod fcmp;
pub mod file_reader;
pub mod model;
pub mod render;
pub mod util;
