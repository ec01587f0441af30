//! Centralized default constants for tutorlog.
//!
//! **This module is the single source of truth** for shared default values.
//! All crates should reference these constants instead of defining their own
//! magic strings.

/// Language assigned to a learner when the form field is absent or blank.
pub const DEFAULT_LANGUAGE: &str = "English";

/// Default HTTP bind host.
pub const DEFAULT_HOST: &str = "0.0.0.0";

/// Default HTTP port.
pub const DEFAULT_PORT: u16 = 3000;

/// Default database connection URL when DATABASE_URL is not set.
pub const DEFAULT_DATABASE_URL: &str = "postgres://localhost/tutorlog";
