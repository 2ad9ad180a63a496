//! Utility modules.

/// Log sanitization utilities to prevent sensitive data exposure.
pub mod log_sanitizer;

/// Serde helpers for loosely-typed provider payloads.
pub mod serde_helpers;
