//! Error types for task service calls.

/// Errors returned by [`TaskClient`](crate::TaskClient).
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The request could not be sent or the response not read.
    #[error("task service request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The service answered with a non-success status.
    #[error("task service returned {status}{}", format_body(body))]
    UnexpectedStatus {
        /// HTTP status code.
        status: u16,
        /// Response body, possibly empty.
        body: String,
    },

    /// The response body was not the expected JSON.
    #[error("could not decode task service response: {0}")]
    Decode(#[from] serde_json::Error),
}

fn format_body(body: &str) -> String {
    let body = body.trim();
    if body.is_empty() {
        String::new()
    } else {
        format!(": {body}")
    }
}

/// A specialized Result type for task service calls.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unexpected_status_includes_body() {
        let err = Error::UnexpectedStatus {
            status: 404,
            body: "task not found\n".to_string(),
        };
        assert_eq!(err.to_string(), "task service returned 404: task not found");
    }

    #[test]
    fn unexpected_status_without_body() {
        let err = Error::UnexpectedStatus {
            status: 500,
            body: String::new(),
        };
        assert_eq!(err.to_string(), "task service returned 500");
    }

    #[test]
    fn decode_error_display() {
        let source = serde_json::from_str::<u8>("nope").unwrap_err();
        let err = Error::from(source);
        assert!(err.to_string().starts_with("could not decode task service response"));
    }
}
