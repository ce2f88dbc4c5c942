use async_trait::async_trait;
use sqlx::PgPool;

use super::{MessageStore, StoreError};
use crate::domain::message::Entry;

/// PostgreSQL-backed store. The `id` column is assigned by the database and
/// only breaks ties between equal timestamps.
#[derive(Clone)]
pub struct PgMessageStore {
	pool: PgPool,
}

impl PgMessageStore {
	pub fn new(pool: PgPool) -> Self {
		Self { pool }
	}

	pub async fn migrate(&self) -> Result<(), StoreError> {
		sqlx::migrate!("./migrations").run(&self.pool).await?;
		Ok(())
	}
}

#[async_trait]
impl MessageStore for PgMessageStore {
	async fn insert(
		&self,
		entry: &Entry,
	) -> Result<(), StoreError> {
		sqlx::query(
			r#"
			INSERT INTO messages (couple_id, name, message, attendance, created_at)
			VALUES ($1, $2, $3, $4, $5)
			"#,
		)
		.bind(&entry.couple_id)
		.bind(&entry.name)
		.bind(&entry.message)
		.bind(&entry.attendance)
		.bind(entry.created_at)
		.execute(&self.pool)
		.await?;
		Ok(())
	}

	async fn find_by_couple(
		&self,
		couple_id: &str,
	) -> Result<Vec<Entry>, StoreError> {
		let entries = sqlx::query_as::<_, Entry>(
			r#"
			SELECT couple_id, name, message, attendance, created_at
			FROM messages
			WHERE couple_id = $1
			ORDER BY created_at DESC, id DESC
			"#,
		)
		.bind(couple_id)
		.fetch_all(&self.pool)
		.await?;
		Ok(entries)
	}
}
