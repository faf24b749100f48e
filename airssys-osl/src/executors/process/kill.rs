//! ProcessKillOperation executor implementation.

use async_trait::async_trait;
use chrono::Utc;

use super::ProcessExecutor;
use crate::core::context::ExecutionContext;
use crate::core::executor::{ExecutionResult, OSExecutor};
use crate::core::operation::OperationType;
use crate::core::result::{OSError, OSResult};
use crate::operations::ProcessKillOperation;

#[async_trait]
impl OSExecutor<ProcessKillOperation> for ProcessExecutor {
    fn name(&self) -> &str {
        &self.name
    }

    fn supported_operation_types(&self) -> Vec<OperationType> {
        vec![OperationType::Process]
    }

    async fn execute(
        &self,
        operation: ProcessKillOperation,
        context: &ExecutionContext,
    ) -> OSResult<ExecutionResult> {
        let started_at = Utc::now();

        // Kill the process using platform-specific method
        #[cfg(unix)]
        {
            use nix::sys::signal::{kill, Signal};
            use nix::unistd::Pid;

            let pid = Pid::from_raw(operation.pid as i32);
            kill(pid, Signal::SIGKILL).map_err(|e| {
                OSError::process_error(format!("kill {}", operation.pid), e.to_string())
            })?;
        }

        #[cfg(windows)]
        {
            // Windows implementation using taskkill
            let output = tokio::process::Command::new("taskkill")
                .args(["/F", "/PID", &operation.pid.to_string()])
                .output()
                .await
                .map_err(|e| {
                    OSError::process_error(format!("kill {}", operation.pid), e.to_string())
                })?;

            if !output.status.success() {
                let stderr = String::from_utf8_lossy(&output.stderr);
                return Err(OSError::process_error(
                    format!("kill {}", operation.pid),
                    stderr.to_string(),
                ));
            }
        }

        let completed_at = Utc::now();

        // Create result
        let result = ExecutionResult::success_with_timing(Vec::new(), started_at, completed_at)
            .with_metadata("pid".to_string(), operation.pid.to_string())
            .with_metadata("signal".to_string(), "SIGKILL".to_string())
            .with_metadata("executor".to_string(), self.name.clone())
            .with_metadata("user".to_string(), context.principal().to_string());

        Ok(result)
    }

    async fn validate_operation(
        &self,
        operation: &ProcessKillOperation,
        _context: &ExecutionContext,
    ) -> OSResult<()> {
        // Validate PID is not 0
        if operation.pid == 0 {
            return Err(OSError::execution_failed("Cannot kill process with PID 0"));
        }

        // Validate PID is not 1 (init) on Unix
        #[cfg(unix)]
        if operation.pid == 1 {
            return Err(OSError::execution_failed("Cannot kill init process (PID 1)"));
        }

        Ok(())
    }
}
