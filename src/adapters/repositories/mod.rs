pub mod memory_repository;
pub mod postgres_repository;

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::message::Entry;

pub use self::memory_repository::InMemoryMessageStore;
pub use self::postgres_repository::PgMessageStore;

#[derive(Debug, Error)]
pub enum StoreError {
	#[error("database error: {0}")]
	Database(#[from] sqlx::Error),
	#[error("migration error: {0}")]
	Migration(#[from] sqlx::migrate::MigrateError),
	#[error("store unavailable: {0}")]
	Unavailable(String),
}

/// Persistence for guestbook entries.
///
/// Entries are only ever appended and read back per couple; there is no
/// update or delete.
#[async_trait]
pub trait MessageStore: Send + Sync {
	async fn insert(
		&self,
		entry: &Entry,
	) -> Result<(), StoreError>;

	/// Every entry of `couple_id`, newest `created_at` first. Equal timestamps
	/// come back in reverse insertion order.
	async fn find_by_couple(
		&self,
		couple_id: &str,
	) -> Result<Vec<Entry>, StoreError>;
}
