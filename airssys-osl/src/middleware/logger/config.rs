//! Configuration types for logger middleware.
//!
//! This module defines configuration structures and enums for customizing
//! logger behavior, formats, and performance characteristics.

// Layer 1: Standard library imports
// (imports will be added in Phase 2)

// Layer 2: Third-party crate imports
// (imports will be added in Phase 2)

// Layer 3: Internal module imports
// (imports will be added in Phase 2)

/// Configuration for logger middleware behavior.
///
/// Implementation will be added in Phase 2.
#[derive(Debug)]
pub struct LoggerConfig {
    // TODO: Implement in Phase 2
}

/// Log level enumeration for filtering log entries.
///
/// Implementation will be added in Phase 2.
#[derive(Debug)]
pub enum LogLevel {
    // TODO: Implement in Phase 2
}

/// Output format options for log entries.
///
/// Implementation will be added in Phase 2.
#[derive(Debug)]
pub enum LogFormat {
    // TODO: Implement in Phase 2
}