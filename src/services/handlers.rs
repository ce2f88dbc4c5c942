use std::sync::Arc;

use crate::{
	adapters::repositories::MessageStore,
	domain::message::{
		schemas::{MessageQuery, QueryResponse, SubmitMessage, ThemeMode},
		Entry,
	},
};

use super::response::{ServiceError, FETCH_FAILED, SAVE_FAILED};

pub(crate) const MISSING_COUPLE_ID: &str = "coupleId is required as query parameter.";
pub(crate) const UNREADABLE_QUERY: &str = "coupleId and theme must each be given at most once.";

/// Guestbook operations over an injected store. Holds no request state, so a
/// clone can be handed to every request.
#[derive(Clone)]
pub struct MessageHandler {
	store: Arc<dyn MessageStore>,
}

impl MessageHandler {
	pub fn new(store: Arc<dyn MessageStore>) -> Self {
		Self { store }
	}

	/// Validates and stores one entry. Nothing is written when validation fails.
	pub async fn submit(
		&self,
		cmd: SubmitMessage,
	) -> Result<(), ServiceError> {
		let entry = Entry::try_from(cmd)?;

		self.store.insert(&entry).await.map_err(|err| {
			tracing::error!("Failed to save message for couple {}: {:?}", entry.couple_id, err);
			ServiceError::StorageError {
				message: SAVE_FAILED,
				source: err,
			}
		})?;

		tracing::info!(couple_id = %entry.couple_id, attendance = %entry.attendance, "Message saved");
		Ok(())
	}

	/// Fetches every entry of a couple, newest first, and shapes it for the
	/// requested theme.
	pub async fn query(
		&self,
		query: MessageQuery,
	) -> Result<QueryResponse, ServiceError> {
		let couple_id = query
			.couple_id
			.filter(|id| !id.is_empty())
			.ok_or(ServiceError::InvalidRequest(MISSING_COUPLE_ID))?;
		let mode = ThemeMode::from_theme(query.theme.as_deref());

		let entries = self.store.find_by_couple(&couple_id).await.map_err(|err| {
			tracing::error!("Failed to fetch messages for couple {}: {:?}", couple_id, err);
			ServiceError::StorageError {
				message: FETCH_FAILED,
				source: err,
			}
		})?;

		tracing::debug!(couple_id = %couple_id, ?mode, count = entries.len(), "Messages fetched");
		Ok(QueryResponse::shape(mode, entries))
	}
}
