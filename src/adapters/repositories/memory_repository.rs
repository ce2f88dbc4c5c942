use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::{MessageStore, StoreError};
use crate::domain::message::Entry;

/// In-memory store for tests. Counts calls and can be told to fail.
#[derive(Default)]
pub struct InMemoryMessageStore {
	// insertion order is the tie-break
	entries: RwLock<Vec<Entry>>,
	insert_calls: AtomicUsize,
	find_calls: AtomicUsize,
	fail_on_insert: AtomicBool,
	fail_on_find: AtomicBool,
}

impl InMemoryMessageStore {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn set_fail_on_insert(
		&self,
		fail: bool,
	) {
		self.fail_on_insert.store(fail, Ordering::SeqCst);
	}

	pub fn set_fail_on_find(
		&self,
		fail: bool,
	) {
		self.fail_on_find.store(fail, Ordering::SeqCst);
	}

	pub fn insert_calls(&self) -> usize {
		self.insert_calls.load(Ordering::SeqCst)
	}

	pub fn find_calls(&self) -> usize {
		self.find_calls.load(Ordering::SeqCst)
	}

	#[cfg(test)]
	pub(crate) async fn len(&self) -> usize {
		self.entries.read().await.len()
	}
}

#[async_trait]
impl MessageStore for InMemoryMessageStore {
	async fn insert(
		&self,
		entry: &Entry,
	) -> Result<(), StoreError> {
		self.insert_calls.fetch_add(1, Ordering::SeqCst);
		if self.fail_on_insert.load(Ordering::SeqCst) {
			return Err(StoreError::Unavailable("insert disabled".into()));
		}
		self.entries.write().await.push(entry.clone());
		Ok(())
	}

	async fn find_by_couple(
		&self,
		couple_id: &str,
	) -> Result<Vec<Entry>, StoreError> {
		self.find_calls.fetch_add(1, Ordering::SeqCst);
		if self.fail_on_find.load(Ordering::SeqCst) {
			return Err(StoreError::Unavailable("find disabled".into()));
		}
		let mut found: Vec<Entry> = self
			.entries
			.read()
			.await
			.iter()
			.rev()
			.filter(|entry| entry.couple_id == couple_id)
			.cloned()
			.collect();
		// stable sort keeps the reversed insertion order among equal timestamps
		found.sort_by(|a, b| b.created_at.cmp(&a.created_at));
		Ok(found)
	}
}
