//! Executor registry for dynamic operation dispatch.
//!
//! This module provides the executor registry that manages mappings between
//! operation types and their corresponding executors, enabling dynamic dispatch
//! for framework operation execution.
//!
//! # Phase 1 Note
//!
//! This is a foundational implementation. Full executor management with `dyn Operation`
//! support will be completed in Phase 2-3 after resolving object-safety challenges.

use std::fmt::Debug;

use crate::core::{
    operation::OperationType,
    result::OSResult,
};

/// Registry for managing executor instances and operation type mappings.
///
/// `ExecutorRegistry` maintains the mapping between operation types and their
/// executors, providing type-safe executor lookup and validation.
///
/// # Phase 1 Implementation
///
/// Phase 1 provides the foundational structure. Full `dyn Operation` support
/// requires making the Operation trait object-safe, which will be addressed
/// in Phase 2 after removing the `Clone` constraint or using a wrapper type.
#[derive(Debug, Default)]
pub(crate) struct ExecutorRegistry {
    /// Placeholder for executor count (Phase 1)
    _executor_count: usize,
}

impl ExecutorRegistry {
    /// Create a new executor registry.
    ///
    /// # Phase 1 Note
    ///
    /// Creates an empty registry. Full executor management will be implemented
    /// in Phase 2-3 after resolving Operation trait object-safety.
    ///
    /// # Returns
    ///
    /// Returns a configured `ExecutorRegistry`.
    pub fn new() -> OSResult<Self> {
        Ok(Self {
            _executor_count: 0,
        })
    }

    /// Check if an executor is registered for the given operation type.
    ///
    /// # Phase 1 Note
    ///
    /// Always returns false in Phase 1. Will be implemented in Phase 2-3.
    #[allow(dead_code)] // Phase 1: Will be used in Phase 2-3
    pub fn has_executor(&self, _operation_type: &OperationType) -> bool {
        false
    }

    /// Get the number of registered executors.
    ///
    /// # Phase 1 Note
    ///
    /// Returns 0 in Phase 1. Will be implemented in Phase 2-3.
    #[allow(dead_code)] // Phase 1: Will be used in Phase 2-3
    pub fn executor_count(&self) -> usize {
        0
    }

    /// Get all registered operation types.
    ///
    /// # Phase 1 Note
    ///
    /// Returns empty vector in Phase 1. Will be implemented in Phase 2-3.
    #[allow(dead_code)] // Phase 1: Will be used in Phase 2-3
    pub fn registered_types(&self) -> Vec<OperationType> {
        vec![]
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used)] // Allow in tests for clarity

    use super::*;

    #[test]
    fn test_registry_creation() {
        let result = ExecutorRegistry::new();
        assert!(result.is_ok());
        
        let registry = result.expect("Registry creation should succeed");
        assert_eq!(registry.executor_count(), 0);
    }

    #[test]
    fn test_has_executor_returns_false() {
        let registry = ExecutorRegistry::new().expect("Registry creation should succeed");
        assert!(!registry.has_executor(&OperationType::Filesystem));
        assert!(!registry.has_executor(&OperationType::Process));
    }

    #[test]
    fn test_registered_types_empty() {
        let registry = ExecutorRegistry::new().expect("Registry creation should succeed");
        let types = registry.registered_types();
        assert_eq!(types.len(), 0);
    }
}
