//! Domain error taxonomy and the Rust-level error type that carries it.

use std::fmt;

/// Wire-level error taxonomy (spec §7). Round-tripped as an `i32` in `ERROR`
/// frames, so the discriminants are part of the protocol and must not move.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[repr(i32)]
pub enum ErrorCode {
    Success = 0,
    InvalidArgument = -2,
    NotFound = -3,
    AccessDenied = -4,
    IoError = -5,
    NetworkFailure = -6,
    Timeout = -7,
    ProtocolError = -8,
    InternalError = -9,
    FileNotFound = -10,
    Unknown = -1,
}

impl ErrorCode {
    /// Decodes a wire `i32`, mapping anything unrecognized to `Unknown`.
    pub fn from_i32(value: i32) -> Self {
        match value {
            0 => ErrorCode::Success,
            -2 => ErrorCode::InvalidArgument,
            -3 => ErrorCode::NotFound,
            -4 => ErrorCode::AccessDenied,
            -5 => ErrorCode::IoError,
            -6 => ErrorCode::NetworkFailure,
            -7 => ErrorCode::Timeout,
            -8 => ErrorCode::ProtocolError,
            -9 => ErrorCode::InternalError,
            -10 => ErrorCode::FileNotFound,
            _ => ErrorCode::Unknown,
        }
    }

    pub fn as_i32(self) -> i32 {
        self as i32
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// Rust-level error used throughout the crate. Every fallible path maps to
/// an [`ErrorCode`] for transmission on the wire via [`DfsError::code`].
#[derive(Debug)]
pub enum DfsError {
    InvalidArgument(String),
    NotFound(String),
    /// A namespace-level miss distinct from directory `NotFound` (spec §7):
    /// a path nobody has ever registered or created, as opposed to a
    /// directory-tree traversal failure.
    FileNotFound(String),
    Io(std::io::Error),
    Network(String),
    Protocol(String),
    Internal(String),
    /// An `ERROR` frame received from a peer. Carries the wire code verbatim
    /// so the client can return it to its caller unchanged (spec §7).
    Remote(ErrorCode),
}

impl DfsError {
    pub fn code(&self) -> ErrorCode {
        match self {
            DfsError::InvalidArgument(_) => ErrorCode::InvalidArgument,
            DfsError::NotFound(_) => ErrorCode::NotFound,
            DfsError::FileNotFound(_) => ErrorCode::FileNotFound,
            DfsError::Io(_) => ErrorCode::IoError,
            DfsError::Network(_) => ErrorCode::NetworkFailure,
            DfsError::Protocol(_) => ErrorCode::ProtocolError,
            DfsError::Internal(_) => ErrorCode::InternalError,
            DfsError::Remote(code) => *code,
        }
    }
}

impl fmt::Display for DfsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DfsError::InvalidArgument(msg) => write!(f, "invalid argument: {msg}"),
            DfsError::NotFound(msg) => write!(f, "not found: {msg}"),
            DfsError::FileNotFound(msg) => write!(f, "file not found: {msg}"),
            DfsError::Io(err) => write!(f, "io error: {err}"),
            DfsError::Network(msg) => write!(f, "network failure: {msg}"),
            DfsError::Protocol(msg) => write!(f, "protocol error: {msg}"),
            DfsError::Internal(msg) => write!(f, "internal error: {msg}"),
            DfsError::Remote(code) => write!(f, "remote error: {code}"),
        }
    }
}

impl std::error::Error for DfsError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            DfsError::Io(err) => Some(err),
            _ => None,
        }
    }
}

impl From<std::io::Error> for DfsError {
    fn from(err: std::io::Error) -> Self {
        use std::io::ErrorKind;
        match err.kind() {
            ErrorKind::NotFound => DfsError::NotFound(err.to_string()),
            ErrorKind::UnexpectedEof | ErrorKind::ConnectionReset | ErrorKind::BrokenPipe => {
                DfsError::Network(err.to_string())
            }
            _ => DfsError::Io(err),
        }
    }
}

pub type Result<T> = std::result::Result<T, DfsError>;
