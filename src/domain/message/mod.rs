pub mod schemas;

use chrono::{DateTime, SubsecRound, Utc};

use self::schemas::SubmitMessage;
use crate::services::response::ServiceError;

pub(crate) const MISSING_MESSAGE_FIELDS: &str = "coupleId, name, and message are required.";

/// One guestbook submission, scoped to a couple.
#[derive(Clone, PartialEq, Eq, Debug, sqlx::FromRow)]
pub struct Entry {
	pub couple_id: String,
	pub name: String,
	pub message: String,
	pub attendance: String,
	pub created_at: DateTime<Utc>,
}

impl Entry {
	/// Stamps `created_at` with the current time, truncated to milliseconds so
	/// it survives a round trip through the store unchanged.
	pub fn new(
		couple_id: String,
		name: String,
		message: String,
		attendance: String,
	) -> Self {
		Self {
			couple_id,
			name,
			message,
			attendance,
			created_at: Utc::now().trunc_subsecs(3),
		}
	}
}

impl TryFrom<SubmitMessage> for Entry {
	type Error = ServiceError;
	fn try_from(value: SubmitMessage) -> Result<Self, Self::Error> {
		let SubmitMessage {
			name,
			message,
			couple_id,
			attendance,
		} = value;

		match (non_empty(couple_id), non_empty(name), non_empty(message)) {
			(Some(couple_id), Some(name), Some(message)) => Ok(Entry::new(couple_id, name, message, attendance.unwrap_or_default())),
			_ => Err(ServiceError::InvalidRequest(MISSING_MESSAGE_FIELDS)),
		}
	}
}

fn non_empty(value: Option<String>) -> Option<String> {
	value.filter(|v| !v.is_empty())
}

/// Attendance categories that are tallied. Any other stored value, including
/// the empty string, belongs to no category.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash)]
pub enum Attendance {
	Hadir,
	TidakHadir,
	Insyaallah,
	Ragu,
}

impl Attendance {
	pub const ALL: [Attendance; 4] = [Self::Hadir, Self::TidakHadir, Self::Insyaallah, Self::Ragu];

	pub fn label(&self) -> &'static str {
		match self {
			Self::Hadir => "Hadir",
			Self::TidakHadir => "Tidak Hadir",
			Self::Insyaallah => "Insyaallah",
			Self::Ragu => "Ragu",
		}
	}

	/// Case-sensitive exact match.
	pub fn from_label(label: &str) -> Option<Self> {
		Self::ALL.into_iter().find(|attendance| attendance.label() == label)
	}
}
