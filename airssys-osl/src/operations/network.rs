//! Network operation types.
//!
//! This module provides concrete implementations of network operations that
//! implement the `Operation` trait. These types are used by the framework's
//! network builder API.

// Module structure placeholder - implementations will be added in Phase 4

/// Placeholder for NetworkConnectOperation - will be implemented in Phase 4
#[derive(Debug, Clone)]
pub struct NetworkConnectOperation;

/// Placeholder for NetworkListenOperation - will be implemented in Phase 4
#[derive(Debug, Clone)]
pub struct NetworkListenOperation;

/// Placeholder for NetworkSocketOperation - will be implemented in Phase 4
#[derive(Debug, Clone)]
pub struct NetworkSocketOperation;
