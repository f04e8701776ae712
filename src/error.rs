//! Error types shared by the request client, the function table and config loading.

use std::path::PathBuf;

use thiserror::Error;

/// Failure of a single backend call.
///
/// Every operation of the request client resolves to `Result<T, ApiError>`;
/// callers never have to look for an `error` field in a successful body.
#[derive(Debug, Clone, PartialEq, Error)]
#[non_exhaustive]
pub enum ApiError {
    /// The backend answered with an `{error: "..."}` body.
    #[error("{message}")]
    Rejected {
        /// HTTP status, `None` when the error rode on a 2xx response.
        status: Option<u16>,
        message: String,
    },

    /// Non-success status without a readable JSON error body.
    #[error("server error (status {status}); check the backend logs for details")]
    Status { status: u16 },

    /// The request never produced a response.
    #[error("network error: {0}")]
    Transport(String),

    /// A success response whose body did not have the expected shape.
    #[error("unexpected response: {0}")]
    Decode(String),

    /// A file selected for upload could not be read.
    #[error("could not read {}: {message}", .path.display())]
    Io { path: PathBuf, message: String },
}

impl ApiError {
    /// Text shown in the notice window.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Rejected { message, .. } => message.clone(),
            Self::Status { status } => {
                format!("The server returned an invalid response (status {status}).")
            }
            Self::Transport(_) => {
                "Could not reach the backend. Check that it is running and the URL is correct."
                    .to_string()
            }
            other => other.to_string(),
        }
    }

    /// HTTP status carried by the error, if any.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Rejected { status, .. } => *status,
            Self::Status { status } => Some(*status),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        Self::Transport(err.to_string())
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        Self::Decode(err.to_string())
    }
}

pub type ApiResult<T> = std::result::Result<T, ApiError>;

/// A fit function that cannot be saved. Messages name the offending function.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Function name \"{function}\" must start with a letter or underscore and contain only letters, digits and underscores.")]
    InvalidName { function: String },

    #[error("The equation of function \"{function}\" must not be empty.")]
    EmptyEquation { function: String },

    #[error("Parameter \"{parameter}\" of function \"{function}\" is malformed; use name=value.")]
    MalformedParameter { function: String, parameter: String },

    #[error("Parameter name \"{parameter}\" of function \"{function}\" is not a valid identifier.")]
    InvalidParameterName { function: String, parameter: String },

    #[error("The value of parameter \"{parameter}\" of function \"{function}\" must be a number.")]
    NonNumericValue { function: String, parameter: String },
}

/// Problems locating `feature.csv` / `target.csv` in a chosen folder.
#[derive(Debug, Error)]
pub enum AssetError {
    #[error("Feature.csv and Target.csv were not found in {}", .0.display())]
    MissingFiles(PathBuf),

    #[error("could not list {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not read config {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },
}

/// Failures while starting the application.
#[derive(Debug, Error)]
pub enum RunError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("could not create the backend client: {0}")]
    Backend(#[from] ApiError),

    #[error("window error: {0}")]
    Window(#[from] eframe::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejected_error_shows_backend_message() {
        let err = ApiError::Rejected {
            status: Some(400),
            message: "Asset folder not uploaded yet.".to_string(),
        };
        assert_eq!(err.user_message(), "Asset folder not uploaded yet.");
        assert_eq!(err.status(), Some(400));
    }

    #[test]
    fn status_error_mentions_code() {
        let err = ApiError::Status { status: 502 };
        assert!(err.user_message().contains("502"));
        assert!(err.to_string().contains("502"));
    }

    #[test]
    fn validation_messages_name_the_function() {
        let err = ValidationError::NonNumericValue {
            function: "Linear".into(),
            parameter: "m".into(),
        };
        let msg = err.to_string();
        assert!(msg.contains("Linear"));
        assert!(msg.contains("\"m\""));
    }
}
