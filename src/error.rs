use std::fmt;

use anyhow::Error;
use serde::Serialize;
use serde_json::{json, Value};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExtractErrorKind {
    /// Non-success HTTP status from the design API.
    Network,
    PageNotFound,
    /// Page-content response without a `nodes` collection.
    MalformedDocument,
    NoReadySections,
    /// A cached artifact on disk could not be parsed. Recovered by refetching.
    CacheParse,
}

#[derive(Debug, Clone)]
pub struct ExtractError {
    pub code: &'static str,
    pub kind: ExtractErrorKind,
    pub message: String,
    pub details: Option<Value>,
}

impl ExtractError {
    fn new(code: &'static str, kind: ExtractErrorKind, message: impl Into<String>) -> Self {
        Self {
            code,
            kind,
            message: message.into(),
            details: None,
        }
    }

    pub fn network(endpoint: &str, status: u16, reason: &str) -> Self {
        Self::new(
            "E_NETWORK",
            ExtractErrorKind::Network,
            format!("{endpoint} returned {status} {reason}"),
        )
        .with_details(json!({ "status": status, "reason": reason }))
    }

    pub fn page_not_found(page: &str) -> Self {
        Self::new(
            "E_PAGE_NOT_FOUND",
            ExtractErrorKind::PageNotFound,
            format!("page '{page}' was not found in the document"),
        )
        .with_details(json!({ "page": page }))
    }

    pub fn malformed_document(reason: impl Into<String>) -> Self {
        Self::new(
            "E_MALFORMED_DOCUMENT",
            ExtractErrorKind::MalformedDocument,
            reason,
        )
    }

    pub fn no_ready_sections(page: &str) -> Self {
        Self::new(
            "E_NO_READY_SECTIONS",
            ExtractErrorKind::NoReadySections,
            format!("page '{page}' has no sections marked \"Ready for dev\""),
        )
        .with_details(json!({ "page": page }))
    }

    pub fn cache_parse(path: &str, reason: impl fmt::Display) -> Self {
        Self::new(
            "E_CACHE_PARSE",
            ExtractErrorKind::CacheParse,
            format!("cached artifact {path} could not be parsed: {reason}"),
        )
        .with_details(json!({ "path": path }))
    }

    pub fn with_details(mut self, details: Value) -> Self {
        self.details = Some(details);
        self
    }

    pub fn envelope(&self) -> ErrorEnvelope {
        ErrorEnvelope {
            ok: false,
            error: ErrorEnvelopeBody {
                code: self.code.to_owned(),
                message: self.message.clone(),
                details: self.details.clone(),
            },
        }
    }
}

impl fmt::Display for ExtractError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code, self.message)
    }
}

impl std::error::Error for ExtractError {}

#[derive(Debug, Clone, Serialize)]
pub struct ErrorEnvelope {
    pub ok: bool,
    pub error: ErrorEnvelopeBody,
}

#[derive(Debug, Clone, Serialize)]
pub struct ErrorEnvelopeBody {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Value>,
}

pub fn find_extract_error(error: &Error) -> Option<&ExtractError> {
    error
        .chain()
        .find_map(|cause| cause.downcast_ref::<ExtractError>())
}

/// Envelope for any failure; errors outside the taxonomy get `E_INTERNAL`.
pub fn envelope_for(error: &Error) -> ErrorEnvelope {
    match find_extract_error(error) {
        Some(extract) => extract.envelope(),
        None => ErrorEnvelope {
            ok: false,
            error: ErrorEnvelopeBody {
                code: "E_INTERNAL".to_owned(),
                message: format!("{error:#}"),
                details: None,
            },
        },
    }
}
