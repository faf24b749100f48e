//! File-based activity logger implementation.
//!
//! This module provides a logger that outputs activity logs to files
//! with async I/O and optional log rotation capabilities.

// Layer 1: Standard library imports
// (imports will be added in Phase 4)

// Layer 2: Third-party crate imports
// (imports will be added in Phase 4)

// Layer 3: Internal module imports
// (imports will be added in Phase 4)

/// File-based activity logger with async I/O.
///
/// Outputs activity logs to specified files with buffering and optional
/// rotation for production logging scenarios.
///
/// Implementation will be added in Phase 4.
#[derive(Debug)]
pub struct FileActivityLogger {
    // TODO: Implement in Phase 4
}