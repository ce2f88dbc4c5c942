use axum::{
	extract::{
		rejection::{JsonRejection, QueryRejection},
		Query, State,
	},
	Json,
};

use crate::{
	domain::message::{
		schemas::{MessageQuery, QueryResponse, StatusResponse, SubmitMessage},
		MISSING_MESSAGE_FIELDS,
	},
	services::{
		handlers::{MessageHandler, UNREADABLE_QUERY},
		response::ServiceError,
	},
};

pub async fn post_message(
	State(handler): State<MessageHandler>,
	payload: Result<Json<SubmitMessage>, JsonRejection>,
) -> Result<Json<StatusResponse>, ServiceError> {
	// an unreadable body is treated like one with no fields
	let Json(cmd) = payload.map_err(|rejection| {
		tracing::debug!("Rejected message body: {}", rejection);
		ServiceError::InvalidRequest(MISSING_MESSAGE_FIELDS)
	})?;

	handler.submit(cmd).await?;
	Ok(Json(StatusResponse::saved()))
}

pub async fn get_messages(
	State(handler): State<MessageHandler>,
	query: Result<Query<MessageQuery>, QueryRejection>,
) -> Result<Json<QueryResponse>, ServiceError> {
	let Query(query) = query.map_err(|rejection| {
		tracing::debug!("Rejected message query: {}", rejection);
		ServiceError::InvalidRequest(UNREADABLE_QUERY)
	})?;

	Ok(Json(handler.query(query).await?))
}
