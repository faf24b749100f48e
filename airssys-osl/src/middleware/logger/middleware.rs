//! Generic logger middleware implementation.
//!
//! This module contains the core LoggerMiddleware implementation that
//! integrates with the middleware pipeline to provide activity logging.

// Layer 1: Standard library imports
// (imports will be added in Phase 3)

// Layer 2: Third-party crate imports
// (imports will be added in Phase 3)

// Layer 3: Internal module imports
// (imports will be added in Phase 3)

/// Generic logger middleware for activity logging and audit trails.
///
/// This middleware logs operation execution before and after processing,
/// providing comprehensive audit trails for security and debugging.
///
/// Implementation will be added in Phase 3.
pub struct LoggerMiddleware<L> {
    // TODO: Implement in Phase 3
    _marker: std::marker::PhantomData<L>,
}