use std::sync::Arc;

use crate::{
	adapters::repositories::{PgMessageStore, StoreError},
	config::Config,
	database::connection_pool,
	services::handlers::MessageHandler,
};

pub struct Bootstrap;
impl Bootstrap {
	/// Connects to PostgreSQL, applies pending migrations and hands the store
	/// to a fresh handler.
	pub async fn message_handler(config: &Config) -> Result<MessageHandler, StoreError> {
		let store = PgMessageStore::new(connection_pool(config).await?);
		store.migrate().await?;
		tracing::info!("Database connected and migrated");

		Ok(MessageHandler::new(Arc::new(store)))
	}
}
