//! Filesystem operation types.
//!
//! This module provides concrete implementations of filesystem operations that
//! implement the `Operation` trait. These types are used by the framework's
//! filesystem builder API.

// Module structure placeholder - implementations will be added in Phase 2

/// Placeholder for FileReadOperation - will be implemented in Phase 2
#[derive(Debug, Clone)]
pub struct FileReadOperation;

/// Placeholder for FileWriteOperation - will be implemented in Phase 2
#[derive(Debug, Clone)]
pub struct FileWriteOperation;

/// Placeholder for DirectoryCreateOperation - will be implemented in Phase 2
#[derive(Debug, Clone)]
pub struct DirectoryCreateOperation;

/// Placeholder for DirectoryListOperation - will be implemented in Phase 2
#[derive(Debug, Clone)]
pub struct DirectoryListOperation;

/// Placeholder for FileDeleteOperation - will be implemented in Phase 2
#[derive(Debug, Clone)]
pub struct FileDeleteOperation;

