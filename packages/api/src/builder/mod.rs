//! Fluent chain builder

pub mod core;

pub use core::*;
