//! Middleware extension trait for executor composition.
//!
//! This module provides the [`ExecutorExt`] trait which enables ergonomic
//! middleware composition using the extension method pattern.
//!
//! The extension trait allows any executor to be wrapped with middleware using
//! the `.with_middleware()` method, creating a composable pipeline of middleware
//! that can be chained together.
//!
//! See [`ExecutorExt`] trait documentation for usage details.

// Layer 1: Standard library imports
use std::sync::Arc;

// Layer 2: Third-party imports
use async_trait::async_trait;

// Layer 3: Internal module imports
use crate::core::context::ExecutionContext;
use crate::core::executor::{ExecutionResult, OSExecutor};
use crate::core::middleware::Middleware;
use crate::core::operation::{Operation, OperationType};
use crate::core::result::OSResult;

/// Middleware-wrapped executor that applies middleware to operation execution.
///
/// This struct wraps an executor and a middleware, creating a new executor
/// that applies the middleware's hooks during operation execution.
///
/// # Type Parameters
///
/// - `E`: The inner executor type
/// - `M`: The middleware type
/// - `O`: The operation type
#[derive(Debug)]
pub struct MiddlewareExecutor<E, M, O>
where
    E: OSExecutor<O>,
    M: Middleware<O>,
    O: Operation,
{
    executor: E,
    middleware: Arc<M>,
    _phantom: std::marker::PhantomData<O>,
}

impl<E, M, O> MiddlewareExecutor<E, M, O>
where
    E: OSExecutor<O>,
    M: Middleware<O>,
    O: Operation,
{
    /// Creates a new middleware-wrapped executor.
    ///
    /// # Arguments
    ///
    /// * `executor` - The inner executor to wrap
    /// * `middleware` - The middleware to apply
    pub fn new(executor: E, middleware: M) -> Self {
        Self {
            executor,
            middleware: Arc::new(middleware),
            _phantom: std::marker::PhantomData,
        }
    }
}

#[async_trait]
impl<E, M, O> OSExecutor<O> for MiddlewareExecutor<E, M, O>
where
    E: OSExecutor<O> + Send + Sync + std::fmt::Debug,
    M: Middleware<O> + Send + Sync + std::fmt::Debug,
    O: Operation + Send + Sync + std::fmt::Debug,
{
    fn name(&self) -> &str {
        self.executor.name()
    }

    fn supported_operation_types(&self) -> Vec<OperationType> {
        self.executor.supported_operation_types()
    }

    async fn execute(&self, operation: O, context: &ExecutionContext) -> OSResult<ExecutionResult> {
        // Check if middleware can process this operation
        if !self.middleware.can_process(&operation, context).await {
            // Middleware doesn't apply, execute directly
            return self.executor.execute(operation, context).await;
        }

        // Apply before_execution hook - it consumes and may transform the operation
        let operation = match self.middleware.before_execution(operation, context).await {
            Ok(Some(op)) => op, // Continue with possibly modified operation
            Ok(None) => {
                // Middleware handled it, return early with empty result
                return Ok(ExecutionResult::success(Vec::new()));
            }
            Err(e) => {
                // Convert MiddlewareError to OSError
                use crate::core::result::OSError;
                return Err(OSError::execution_failed(format!(
                    "Middleware error in before_execution: {e:?}"
                )));
            }
        };

        // Execute the operation
        let result = self.executor.execute(operation, context).await;

        // Apply after_execution hook
        match self.middleware.after_execution(context, &result).await {
            Ok(()) => {} // Continue
            Err(e) => {
                // Log middleware error but don't fail the operation
                eprintln!("Middleware error in after_execution: {e:?}");
            }
        }

        // Handle errors if execution failed
        if let Err(ref error) = result {
            let error_action = self.middleware.handle_error(error.clone(), context).await;
            match error_action {
                crate::core::middleware::ErrorAction::Stop => {
                    // Stop processing, return the error
                    return result;
                }
                crate::core::middleware::ErrorAction::Continue => {
                    // Continue with the error
                    return result;
                }
                _ => {
                    // For other actions, just continue with the error
                    return result;
                }
            }
        }

        result
    }

    async fn validate_operation(&self, operation: &O, context: &ExecutionContext) -> OSResult<()> {
        self.executor.validate_operation(operation, context).await
    }
}

/// Extension trait for adding middleware to executors.
///
/// This trait provides the [`with_middleware`](ExecutorExt::with_middleware) method
/// which enables ergonomic middleware composition on any executor.
///
/// # Automatic Implementation
///
/// This trait is automatically implemented for all sized types, making it available
/// on all executors without requiring explicit implementation.
pub trait ExecutorExt: Sized {
    /// Wraps this executor with the given middleware.
    ///
    /// This method creates a new [`MiddlewareExecutor`] that applies the middleware's
    /// hooks during operation execution.
    ///
    /// # Type Parameters
    ///
    /// - `M`: The middleware type
    /// - `O`: The operation type
    ///
    /// # Arguments
    ///
    /// * `middleware` - The middleware to apply to this executor
    ///
    /// # Returns
    ///
    /// A new executor that wraps this executor with the given middleware
    fn with_middleware<M, O>(self, middleware: M) -> MiddlewareExecutor<Self, M, O>
    where
        Self: OSExecutor<O>,
        M: Middleware<O>,
        O: Operation,
    {
        MiddlewareExecutor::new(self, middleware)
    }
}

// Blanket implementation for all sized types
impl<E> ExecutorExt for E where E: Sized {}
