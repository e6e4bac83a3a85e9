use std::fmt;
use std::time::Duration;
use thiserror::Error;

/// Exit codes for the server binary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ExitCode {
    /// Server ran and shut down cleanly on EOF
    Success = 0,
    /// `PYXIS_API_KEY` is not set
    MissingCredential = 1,
    /// Invalid command-line arguments (clap parsing errors)
    InvalidArguments = 2,
    /// Application error (config file, I/O on the protocol channel, etc.)
    ApplicationError = 3,
}

impl ExitCode {
    /// Convert to i32 for use with std::process::exit
    pub fn as_i32(self) -> i32 {
        self as i32
    }
}

impl fmt::Display for ExitCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExitCode::Success => write!(f, "Success (0)"),
            ExitCode::MissingCredential => write!(f, "Missing Credential (1)"),
            ExitCode::InvalidArguments => write!(f, "Invalid Arguments (2)"),
            ExitCode::ApplicationError => write!(f, "Application Error (3)"),
        }
    }
}

/// Whole seconds keep one decimal ("30.0"), fractions print as-is ("0.25")
fn seconds(timeout: &Duration) -> String {
    let secs = timeout.as_secs_f64();
    if secs.fract() == 0.0 {
        format!("{:.1}", secs)
    } else {
        secs.to_string()
    }
}

/// Transport-level failure to reach the catalog service.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ConnectionFailure {
    #[error("Request to {url} timed out after {}s", seconds(.timeout))]
    TimedOut { url: String, timeout: Duration },

    #[error("Failed to connect to {url}")]
    Unreachable { url: String },
}

impl ConnectionFailure {
    pub fn url(&self) -> &str {
        match self {
            ConnectionFailure::TimedOut { url, .. } | ConnectionFailure::Unreachable { url } => url,
        }
    }
}

/// Errors raised while talking to the Pyxis catalog.
///
/// The set is closed: callers match on the variant to tell a bad credential
/// from an unreachable host from a rejected request from a malformed payload.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum PyxisError {
    /// Missing credential, or the service answered 401
    #[error("{message}")]
    Auth { message: String },

    #[error(transparent)]
    Connection(#[from] ConnectionFailure),

    /// Any other non-2xx status, or a success body that is not JSON
    #[error("{message}")]
    Api {
        status: Option<u16>,
        message: String,
    },

    /// The payload is JSON but does not fit the entity schema
    #[error("Invalid {entity} data: {details}")]
    Validation {
        entity: &'static str,
        details: String,
    },
}

impl PyxisError {
    pub fn auth(message: impl Into<String>) -> Self {
        PyxisError::Auth {
            message: message.into(),
        }
    }

    pub fn api(status: Option<u16>, message: impl Into<String>) -> Self {
        PyxisError::Api {
            status,
            message: message.into(),
        }
    }

    pub fn validation(entity: &'static str, details: impl fmt::Display) -> Self {
        PyxisError::Validation {
            entity,
            details: details.to_string(),
        }
    }

    /// HTTP status attached to the error, if the service answered at all
    pub fn status(&self) -> Option<u16> {
        match self {
            PyxisError::Api { status, .. } => *status,
            _ => None,
        }
    }
}
