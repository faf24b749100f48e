//! Process operation types.
//!
//! This module provides concrete implementations of process management operations
//! that implement the `Operation` trait. These types are used by the framework's
//! process builder API.

// Module structure placeholder - implementations will be added in Phase 3

/// Placeholder for ProcessSpawnOperation - will be implemented in Phase 3
#[derive(Debug, Clone)]
pub struct ProcessSpawnOperation;

/// Placeholder for ProcessKillOperation - will be implemented in Phase 3
#[derive(Debug, Clone)]
pub struct ProcessKillOperation;

/// Placeholder for ProcessSignalOperation - will be implemented in Phase 3
#[derive(Debug, Clone)]
pub struct ProcessSignalOperation;
