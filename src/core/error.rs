//! Typed error handling for the dealership core
//!
//! Every lifecycle and CRUD operation returns [`DealershipResult`], so callers
//! can react to a specific failure instead of inspecting a generic
//! `anyhow::Error`.
//!
//! # Error Categories
//!
//! - [`DealershipError::NotFound`]: get-or-fail on a missing id
//! - [`DealershipError::InvalidState`]: a lifecycle guard rejected the call
//! - [`DealershipError::InvalidArgument`]: malformed input
//! - [`DealershipError::Dependency`]: the persistence collaborator failed
//! - [`DealershipError::Config`]: configuration could not be loaded
//!
//! # Example
//!
//! ```rust,ignore
//! match manager.reserve(id, request).await {
//!     Ok(vehicle) => println!("Reserved {}", vehicle.id),
//!     Err(DealershipError::InvalidState { message }) => println!("{message}"),
//!     Err(e) => eprintln!("Other error: {}", e),
//! }
//! ```

use crate::core::Entity;
use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use thiserror::Error;
use uuid::Uuid;

/// Message used when Reserve hits a vehicle that is not Available
pub const NOT_AVAILABLE: &str = "vehicle not available for reservation";

/// Message used when CancelReservation or TransformToOrder hits a vehicle that is not Reserved
pub const NOT_RESERVED: &str = "vehicle not reserved";

/// The main error type for the dealership core
#[derive(Debug, Error)]
pub enum DealershipError {
    /// Entity was not found
    #[error("{entity_type} with id '{id}' not found")]
    NotFound { entity_type: String, id: Uuid },

    /// A lifecycle guard failed
    #[error("{message}")]
    InvalidState { message: String },

    /// Input was malformed
    #[error("Invalid argument: {message}")]
    InvalidArgument {
        message: String,
        fields: Vec<FieldError>,
    },

    /// The persistence or directory collaborator failed
    #[error("Dependency failure: {0}")]
    Dependency(#[source] anyhow::Error),

    /// Configuration could not be loaded or is inconsistent
    #[error("Configuration error: {0}")]
    Config(String),
}

/// A single invalid field in an input payload
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

/// Result alias used throughout the crate
pub type DealershipResult<T> = Result<T, DealershipError>;

/// Error response structure for HTTP responses
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error code for programmatic handling
    pub code: String,
    /// Human-readable error message
    pub message: String,
    /// Optional additional details
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl DealershipError {
    pub fn not_found<T: Entity>(id: Uuid) -> Self {
        DealershipError::NotFound {
            entity_type: T::resource_name_singular().to_string(),
            id,
        }
    }

    pub fn invalid_state(message: impl Into<String>) -> Self {
        DealershipError::InvalidState {
            message: message.into(),
        }
    }

    pub fn invalid_argument(message: impl Into<String>) -> Self {
        DealershipError::InvalidArgument {
            message: message.into(),
            fields: Vec::new(),
        }
    }

    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            DealershipError::NotFound { .. } => StatusCode::NOT_FOUND,
            DealershipError::InvalidState { .. } => StatusCode::CONFLICT,
            DealershipError::InvalidArgument { .. } => StatusCode::BAD_REQUEST,
            DealershipError::Dependency(_) => StatusCode::BAD_GATEWAY,
            DealershipError::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the error code for this error
    pub fn error_code(&self) -> &'static str {
        match self {
            DealershipError::NotFound { .. } => "NOT_FOUND",
            DealershipError::InvalidState { .. } => "INVALID_STATE",
            DealershipError::InvalidArgument { .. } => "INVALID_ARGUMENT",
            DealershipError::Dependency(_) => "DEPENDENCY_ERROR",
            DealershipError::Config(_) => "CONFIG_ERROR",
        }
    }

    /// Convert to an error response
    pub fn to_response(&self) -> ErrorResponse {
        ErrorResponse {
            code: self.error_code().to_string(),
            message: self.to_string(),
            details: self.details(),
        }
    }

    fn details(&self) -> Option<serde_json::Value> {
        match self {
            DealershipError::NotFound { entity_type, id } => Some(serde_json::json!({
                "entity_type": entity_type,
                "id": id.to_string()
            })),
            DealershipError::InvalidArgument { fields, .. } if !fields.is_empty() => {
                Some(serde_json::json!({ "fields": fields }))
            }
            _ => None,
        }
    }
}

impl IntoResponse for DealershipError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = Json(self.to_response());
        (status, body).into_response()
    }
}

impl From<validator::ValidationErrors> for DealershipError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let mut fields = Vec::new();
        collect_field_errors(&errors, "", &mut fields);
        fields.sort_by(|a, b| a.field.cmp(&b.field));

        let names: Vec<&str> = fields.iter().map(|f| f.field.as_str()).collect();
        DealershipError::InvalidArgument {
            message: format!("missing or invalid fields: {}", names.join(", ")),
            fields,
        }
    }
}

/// Flatten nested validation errors into dotted field paths
fn collect_field_errors(
    errors: &validator::ValidationErrors,
    prefix: &str,
    out: &mut Vec<FieldError>,
) {
    use validator::ValidationErrorsKind;

    for (field, kind) in errors.errors() {
        let path = if prefix.is_empty() {
            field.to_string()
        } else {
            format!("{prefix}.{field}")
        };
        match kind {
            ValidationErrorsKind::Field(errs) => {
                out.extend(errs.iter().map(|e| FieldError {
                    field: path.clone(),
                    message: e
                        .message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| e.code.to_string()),
                }));
            }
            ValidationErrorsKind::Struct(nested) => collect_field_errors(nested, &path, out),
            ValidationErrorsKind::List(items) => {
                for (index, nested) in items {
                    collect_field_errors(nested, &format!("{path}[{index}]"), out);
                }
            }
        }
    }
}

impl From<serde_yaml::Error> for DealershipError {
    fn from(err: serde_yaml::Error) -> Self {
        DealershipError::Config(err.to_string())
    }
}

impl From<std::io::Error> for DealershipError {
    fn from(err: std::io::Error) -> Self {
        DealershipError::Config(err.to_string())
    }
}
