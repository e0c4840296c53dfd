use thiserror::Error;

/// Failure of one boundary call. `label` names the operation (e.g. "toggle watch").
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{label}: unauthorized (sign in again)")]
    Unauthorized { label: String },

    #[error("{label}: forbidden (only the repository owner or an admin may do this)")]
    Forbidden { label: String },

    #[error("{label}: not found")]
    NotFound { label: String },

    #[error("{label}: server returned {status}")]
    Status { label: String, status: u16 },

    #[error("{label}: {source}")]
    Transport {
        label: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("{label}: malformed response: {message}")]
    Decode { label: String, message: String },
}

impl ApiError {
    pub fn status(label: &str, status: u16) -> Self {
        match status {
            401 => ApiError::Unauthorized {
                label: label.to_string(),
            },
            403 => ApiError::Forbidden {
                label: label.to_string(),
            },
            404 => ApiError::NotFound {
                label: label.to_string(),
            },
            _ => ApiError::Status {
                label: label.to_string(),
                status,
            },
        }
    }

    pub fn label(&self) -> &str {
        match self {
            ApiError::Unauthorized { label }
            | ApiError::Forbidden { label }
            | ApiError::NotFound { label }
            | ApiError::Status { label, .. }
            | ApiError::Transport { label, .. }
            | ApiError::Decode { label, .. } => label,
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        matches!(self, ApiError::Unauthorized { .. })
    }
}
