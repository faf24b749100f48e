//! Operation builders for framework ergonomic APIs.

use std::time::Duration;

use super::OSLFramework;
use crate::core::{executor::ExecutionResult, result::OSResult};

/// Builder for filesystem operations.
pub struct FilesystemBuilder<'a> {
    #[allow(dead_code)]
    framework: &'a OSLFramework,
    #[allow(dead_code)]
    timeout: Option<Duration>,
}

impl<'a> FilesystemBuilder<'a> {
    pub(crate) fn new(framework: &'a OSLFramework) -> Self {
        Self {
            framework,
            timeout: None,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn read_file(self, _path: &str) -> FileOperation<'a> {
        FileOperation {
            builder: self,
            operation: "read".to_string(),
        }
    }

    pub fn write_file(self, _path: &str) -> FileOperation<'a> {
        FileOperation {
            builder: self,
            operation: "write".to_string(),
        }
    }
}

pub struct FileOperation<'a> {
    #[allow(dead_code)]
    builder: FilesystemBuilder<'a>,
    operation: String,
}

impl<'a> FileOperation<'a> {
    pub async fn execute(self) -> OSResult<ExecutionResult> {
        Ok(ExecutionResult::success(
            format!("Phase 3: {} operation placeholder", self.operation).into_bytes(),
        ))
    }
}

/// Builder for process operations.
pub struct ProcessBuilder<'a> {
    #[allow(dead_code)]
    framework: &'a OSLFramework,
    #[allow(dead_code)]
    timeout: Option<Duration>,
}

impl<'a> ProcessBuilder<'a> {
    pub(crate) fn new(framework: &'a OSLFramework) -> Self {
        Self {
            framework,
            timeout: None,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn spawn(self, _command: &str) -> ProcessOperation<'a> {
        ProcessOperation {
            builder: self,
            operation: "spawn".to_string(),
        }
    }
}

pub struct ProcessOperation<'a> {
    #[allow(dead_code)]
    builder: ProcessBuilder<'a>,
    operation: String,
}

impl<'a> ProcessOperation<'a> {
    pub async fn execute(self) -> OSResult<ExecutionResult> {
        Ok(ExecutionResult::success(
            format!("Phase 3: {} operation placeholder", self.operation).into_bytes(),
        ))
    }
}

/// Builder for network operations.
pub struct NetworkBuilder<'a> {
    #[allow(dead_code)]
    framework: &'a OSLFramework,
    #[allow(dead_code)]
    timeout: Option<Duration>,
}

impl<'a> NetworkBuilder<'a> {
    pub(crate) fn new(framework: &'a OSLFramework) -> Self {
        Self {
            framework,
            timeout: None,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn connect(self, _address: &str) -> NetworkOperation<'a> {
        NetworkOperation {
            builder: self,
            operation: "connect".to_string(),
        }
    }
}

pub struct NetworkOperation<'a> {
    #[allow(dead_code)]
    builder: NetworkBuilder<'a>,
    operation: String,
}

impl<'a> NetworkOperation<'a> {
    pub async fn execute(self) -> OSResult<ExecutionResult> {
        Ok(ExecutionResult::success(
            format!("Phase 3: {} operation placeholder", self.operation).into_bytes(),
        ))
    }
}
