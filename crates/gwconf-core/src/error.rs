// ── Core error types ──
//
// `StoreError` is what a remote store hands back. `CoreError` is what
// editors, views and the orchestrator surface to consumers. Neither is
// ever fatal to a session: editors keep the message inline and the
// caller decides whether to resubmit.

use thiserror::Error;

use crate::editor::Section;

/// Failure reported by a gateway or enodeb store.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// The store answered and rejected the request.
    ///
    /// `response_message` is the structured `message` field of the
    /// response body, when the store provided one.
    #[error("Request failed with status {status}")]
    Rejected {
        status: u16,
        response_message: Option<String>,
    },

    /// The store could not be reached or did not answer.
    #[error("{0}")]
    Unavailable(String),
}

impl StoreError {
    /// Message shown to the user: the structured response message when
    /// present, the generic error text otherwise.
    pub fn user_message(&self) -> String {
        match self {
            Self::Rejected {
                response_message: Some(message),
                ..
            } => message.clone(),
            other => other.to_string(),
        }
    }

    pub fn rejected(status: u16, message: impl Into<String>) -> Self {
        Self::Rejected {
            status,
            response_message: Some(message.into()),
        }
    }
}

/// Unified error type for the core crate.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    // ── Validation (detected before any remote call) ─────────────────
    #[error("Gateway {id} already exists")]
    GatewayExists { id: String },

    #[error("Invalid value for {field}: {reason}")]
    ValidationFailed { field: String, reason: String },

    // ── Lookup ───────────────────────────────────────────────────────
    #[error("Gateway not found: {id}")]
    GatewayNotFound { id: String },

    // ── Session ──────────────────────────────────────────────────────
    #[error("Edit session is closed")]
    SessionClosed,

    #[error("Section {section} is not available in this session")]
    SectionLocked { section: Section },

    // ── Remote ───────────────────────────────────────────────────────
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl CoreError {
    /// Text for the inline error region of an editor.
    pub fn inline_message(&self) -> String {
        match self {
            Self::Store(err) => err.user_message(),
            other => other.to_string(),
        }
    }

    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::GatewayExists { .. } | Self::ValidationFailed { .. }
        )
    }

    pub(crate) fn validation(field: &str, reason: impl Into<String>) -> Self {
        Self::ValidationFailed {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn structured_message_wins_over_generic_text() {
        let err = StoreError::rejected(400, "ip_block is not a valid CIDR");
        assert_eq!(err.user_message(), "ip_block is not a valid CIDR");
    }

    #[test]
    fn falls_back_to_generic_text() {
        let err = StoreError::Rejected {
            status: 500,
            response_message: None,
        };
        assert_eq!(err.user_message(), "Request failed with status 500");

        let err = StoreError::Unavailable("connection refused".into());
        assert_eq!(err.user_message(), "connection refused");
    }

    #[test]
    fn inline_message_unwraps_store_errors() {
        let err = CoreError::from(StoreError::rejected(409, "tier missing"));
        assert_eq!(err.inline_message(), "tier missing");
        assert!(!err.is_validation());

        let err = CoreError::GatewayExists { id: "gw1".into() };
        assert_eq!(err.inline_message(), "Gateway gw1 already exists");
        assert!(err.is_validation());
    }
}
