//! # tutorlog-core
//!
//! Core types, traits, and abstractions for the tutorlog application.
//!
//! This crate provides the foundational data structures and trait definitions
//! that the persistence and web crates depend on.

pub mod defaults;
pub mod error;
pub mod models;
pub mod traits;
pub mod uuid_utils;

// Re-export commonly used types at crate root
pub use defaults::DEFAULT_LANGUAGE;
pub use error::{Error, Result};
pub use models::*;
pub use traits::*;
pub use uuid_utils::new_v7;
