use sqlx::postgres::{PgPool, PgPoolOptions};

use crate::{adapters::repositories::StoreError, config::Config};

pub async fn connection_pool(config: &Config) -> Result<PgPool, StoreError> {
	let pool = PgPoolOptions::new()
		.max_connections(config.database_max_connections)
		.connect(&config.database_url)
		.await
		.map_err(|err| {
			tracing::error!("Database connection error: {:?}", err);
			StoreError::Database(err)
		})?;
	Ok(pool)
}
