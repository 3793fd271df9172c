/// Why a fetch produced no snapshot.
///
/// All three variants are recovered the same way: the next scheduled cycle
/// tries again.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum FetchError {
    /// The server answered with a non-success status. `message` carries the
    /// proxy's explanation when its error body could be read.
    #[error(
        "HTTP error! status: {status}{}",
        .message.as_deref().map(|m| format!(" ({m})")).unwrap_or_default()
    )]
    Http { status: u16, message: Option<String> },

    /// Network unreachable, DNS failure, timeout, connection reset.
    #[error("transport error: {0}")]
    Transport(String),

    /// The body was not valid JSON or did not match the snapshot schema.
    #[error("malformed response body: {0}")]
    Decode(String),
}

impl FetchError {
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Http { status, .. } => Some(*status),
            Self::Transport(_) | Self::Decode(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_http_display_contains_status() {
        let bare = FetchError::Http {
            status: 503,
            message: None,
        };
        assert_eq!(bare.to_string(), "HTTP error! status: 503");
        assert_eq!(bare.status(), Some(503));

        let explained = FetchError::Http {
            status: 500,
            message: Some("upstream timed out".to_owned()),
        };
        assert_eq!(
            explained.to_string(),
            "HTTP error! status: 500 (upstream timed out)"
        );
    }

    #[test]
    fn test_non_http_have_no_status() {
        assert_eq!(FetchError::Transport("refused".into()).status(), None);
        assert_eq!(FetchError::Decode("eof".into()).status(), None);
    }
}
