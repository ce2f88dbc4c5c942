use axum::{
	http::StatusCode,
	response::{IntoResponse, Response},
	Json,
};
use thiserror::Error;

use crate::adapters::repositories::StoreError;
use crate::domain::message::schemas::{ErrorResponse, StatusResponse};

pub(crate) const MESSAGE_SAVED: &str = "Message saved successfully!";
pub(crate) const SAVE_FAILED: &str = "Failed to save message.";
pub(crate) const FETCH_FAILED: &str = "Failed to fetch messages.";

impl StatusResponse {
	pub fn saved() -> Self {
		Self {
			status: MESSAGE_SAVED.to_string(),
		}
	}
}

/// Errors surfaced to callers. The message is what the client sees; store
/// causes stay in the logs.
#[derive(Debug, Error)]
pub enum ServiceError {
	#[error("{0}")]
	InvalidRequest(&'static str),
	#[error("{message}")]
	StorageError {
		message: &'static str,
		#[source]
		source: StoreError,
	},
}

impl ServiceError {
	pub fn status_code(&self) -> StatusCode {
		match self {
			ServiceError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
			ServiceError::StorageError { .. } => StatusCode::INTERNAL_SERVER_ERROR,
		}
	}
}

impl IntoResponse for ServiceError {
	fn into_response(self) -> Response {
		let body = ErrorResponse { error: self.to_string() };
		(self.status_code(), Json(body)).into_response()
	}
}
