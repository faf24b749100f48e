//! Network listen operation.

// Layer 1: Standard library imports
use std::fmt;

// Layer 2: Third-party crate imports
use chrono::{DateTime, Utc};
use uuid::Uuid;

// Layer 3: Internal module imports
use crate::core::operation::{Operation, OperationType, Permission};

/// Operation to listen on a network address.
///
/// Requires NetworkSocket permission, which is an elevated privilege. This operation
/// supports creating a TCP listener on a specified address with configurable backlog.
///
/// # Security
///
/// **This operation always requires elevated privileges** as it involves binding
/// to network ports. The framework's security middleware will validate permissions
/// before execution.
///
/// # Examples
///
/// ```rust
/// use airssys_osl::operations::NetworkListenOperation;
///
/// // Basic TCP listener
/// let op = NetworkListenOperation::new("0.0.0.0:8080");
///
/// // Listener with custom backlog
/// let op = NetworkListenOperation::new("127.0.0.1:3000")
///     .with_backlog(128);
///
/// // Unix domain socket listener
/// let op = NetworkListenOperation::new("unix-socket")
///     .with_socket_path("/tmp/my.sock")
///     .with_backlog(64);
/// ```
#[derive(Debug, Clone)]
pub struct NetworkListenOperation {
    /// Address to listen on (e.g., "0.0.0.0:8080" or "127.0.0.1:3000")
    /// For Unix domain sockets, this can be empty or descriptive
    pub address: String,

    /// Socket file path for Unix domain sockets (e.g., "/tmp/my.sock")
    /// When set, this operation will create a Unix domain socket at this path
    pub socket_path: Option<String>,

    /// Connection backlog size (None = use system default)
    pub backlog: Option<i32>,

    /// When this operation was created
    pub created_at: DateTime<Utc>,

    /// Optional operation ID for tracking
    pub operation_id: Option<String>,
}

impl NetworkListenOperation {
    /// Create a new network listen operation.
    ///
    /// # Arguments
    ///
    /// * `address` - Network address to listen on (host:port format)
    ///
    /// # Examples
    ///
    /// ```rust
    /// use airssys_osl::operations::NetworkListenOperation;
    ///
    /// let op = NetworkListenOperation::new("0.0.0.0:8080");
    /// assert_eq!(op.address, "0.0.0.0:8080");
    /// assert!(op.backlog.is_none());
    /// ```
    pub fn new(address: impl Into<String>) -> Self {
        Self {
            address: address.into(),
            socket_path: None,
            backlog: None,
            created_at: Utc::now(),
            operation_id: None,
        }
    }

    /// Set the socket file path for Unix domain sockets.
    ///
    /// When set, this operation will create a Unix domain socket at the specified
    /// path instead of a TCP listener. This requires both NetworkSocket and
    /// FilesystemWrite permissions.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use airssys_osl::operations::NetworkListenOperation;
    ///
    /// let op = NetworkListenOperation::new("unix-socket")
    ///     .with_socket_path("/tmp/my.sock");
    /// assert_eq!(op.socket_path, Some("/tmp/my.sock".to_string()));
    /// ```
    pub fn with_socket_path(mut self, path: impl Into<String>) -> Self {
        self.socket_path = Some(path.into());
        self
    }

    /// Set the connection backlog size.
    ///
    /// The backlog defines the maximum number of pending connections
    /// that can be queued.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use airssys_osl::operations::NetworkListenOperation;
    ///
    /// let op = NetworkListenOperation::new("0.0.0.0:8080")
    ///     .with_backlog(128);
    /// assert_eq!(op.backlog, Some(128));
    /// ```
    pub fn with_backlog(mut self, backlog: i32) -> Self {
        self.backlog = Some(backlog);
        self
    }

    /// Set a unique operation ID for tracking.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use airssys_osl::operations::NetworkListenOperation;
    ///
    /// let op = NetworkListenOperation::new("0.0.0.0:8080")
    ///     .with_operation_id("listen-123");
    /// assert_eq!(op.operation_id, Some("listen-123".to_string()));
    /// ```
    pub fn with_operation_id(mut self, id: impl Into<String>) -> Self {
        self.operation_id = Some(id.into());
        self
    }
}

impl Operation for NetworkListenOperation {
    fn operation_type(&self) -> OperationType {
        OperationType::Network
    }

    fn required_permissions(&self) -> Vec<Permission> {
        let mut perms = vec![Permission::NetworkSocket];

        // Unix domain sockets need filesystem write permission for the socket file
        if let Some(path) = &self.socket_path {
            perms.push(Permission::FilesystemWrite(path.clone()));
        }

        perms
    }

    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    fn operation_id(&self) -> String {
        self.operation_id
            .clone()
            .unwrap_or_else(|| Uuid::new_v4().to_string())
    }

    fn requires_elevated_privileges(&self) -> bool {
        true // Network operations are privileged
    }
}

impl fmt::Display for NetworkListenOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (&self.socket_path, self.backlog) {
            (Some(path), Some(backlog)) => {
                write!(f, "NetworkListen(socket_path={path}, backlog={backlog})")
            }
            (Some(path), None) => {
                write!(f, "NetworkListen(socket_path={path})")
            }
            (None, Some(backlog)) => {
                write!(
                    f,
                    "NetworkListen(address={}, backlog={backlog})",
                    self.address
                )
            }
            (None, None) => {
                write!(f, "NetworkListen(address={})", self.address)
            }
        }
    }
}
