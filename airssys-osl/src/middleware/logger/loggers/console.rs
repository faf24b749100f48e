//! Console-based activity logger implementation.
//!
//! This module provides a logger that outputs activity logs to the console
//! with optional pretty-printing for development and debugging.

// Layer 1: Standard library imports
// (imports will be added in Phase 4)

// Layer 2: Third-party crate imports
// (imports will be added in Phase 4)

// Layer 3: Internal module imports
// (imports will be added in Phase 4)

/// Console activity logger with optional pretty printing.
///
/// Outputs activity logs directly to stdout/stderr with configurable
/// formatting for development and debugging scenarios.
///
/// Implementation will be added in Phase 4.
#[derive(Debug, Default)]
pub struct ConsoleActivityLogger {
    // TODO: Implement in Phase 4
}