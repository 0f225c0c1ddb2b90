//! Foundation module - Core utilities and types
//!
//! - Math types and operations
//! - Frame timing
//! - Logging setup

pub mod logging;
pub mod math;
pub mod time;
