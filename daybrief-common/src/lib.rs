//! Common types shared across the daybrief workspace.
//!
//! This crate defines the shared error type and the observability helpers
//! used by the binary and the integration tests. It is intentionally
//! lightweight so that every crate can depend on it without introducing
//! heavy transitive costs.
//!
//! - [`DaybriefError`] and [`Result`]: shared error handling
//! - [`observability`]: centralised tracing/logging initialisation

pub mod observability;

/// Error types used across the daybrief system.
#[derive(thiserror::Error, Debug)]
pub enum DaybriefError {
    /// The browser session could not be established or was lost. This is the
    /// one hard failure in the capture path; per-source extraction problems
    /// degrade to placeholder text instead.
    #[error("Browser session error: {0}")]
    Session(#[from] anyhow::Error),

    /// Configuration was incomplete or invalid.
    #[error("Configuration error: {0}")]
    Config(String),
}

/// Convenient alias for results that use [`DaybriefError`].
pub type Result<T> = std::result::Result<T, DaybriefError>;
