use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::{Attendance, Entry};

/// Themes whose guestbook page shows attendance tallies.
const SUMMARY_THEMES: [&str; 2] = ["2", "3"];

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SubmitMessage {
	#[serde(deserialize_with = "scalar_as_string")]
	pub name: Option<String>,
	#[serde(deserialize_with = "scalar_as_string")]
	pub message: Option<String>,
	#[serde(deserialize_with = "scalar_as_string")]
	pub couple_id: Option<String>,
	#[serde(deserialize_with = "scalar_as_string")]
	pub attendance: Option<String>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum Scalar {
	String(String),
	Bool(bool),
	Int(i64),
	UInt(u64),
	Float(f64),
}

/// Accepts any JSON scalar and stores its text form. `null`, `false` and zero
/// are falsy and read as absent.
fn scalar_as_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
	D: Deserializer<'de>,
{
	Ok(match Option::<Scalar>::deserialize(deserializer)? {
		None | Some(Scalar::Bool(false)) | Some(Scalar::Int(0)) | Some(Scalar::UInt(0)) => None,
		Some(Scalar::Float(value)) if value == 0.0 => None,
		Some(Scalar::String(value)) => Some(value),
		Some(Scalar::Bool(true)) => Some("true".to_string()),
		Some(Scalar::Int(value)) => Some(value.to_string()),
		Some(Scalar::UInt(value)) => Some(value.to_string()),
		Some(Scalar::Float(value)) => Some(value.to_string()),
	})
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct MessageQuery {
	pub couple_id: Option<String>,
	pub theme: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ThemeMode {
	#[default]
	MessageList,
	AttendanceSummary,
}

impl ThemeMode {
	pub fn from_theme(theme: Option<&str>) -> Self {
		match theme {
			Some(theme) if SUMMARY_THEMES.contains(&theme) => Self::AttendanceSummary,
			_ => Self::MessageList,
		}
	}
}

/// An entry as shown to guests; the couple id never leaves the service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageView {
	pub name: String,
	pub message: String,
	pub attendance: String,
	#[serde(serialize_with = "millis_timestamp")]
	pub created_at: DateTime<Utc>,
}

/// Always renders the milliseconds, e.g. `2024-06-01T10:00:00.000Z`.
fn millis_timestamp<S>(
	value: &DateTime<Utc>,
	serializer: S,
) -> Result<S::Ok, S::Error>
where
	S: Serializer,
{
	serializer.serialize_str(&value.to_rfc3339_opts(SecondsFormat::Millis, true))
}

impl From<Entry> for MessageView {
	fn from(value: Entry) -> Self {
		Self {
			name: value.name,
			message: value.message,
			attendance: value.attendance,
			created_at: value.created_at,
		}
	}
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AttendanceSummary {
	pub hadir: u64,
	pub tidak_hadir: u64,
	pub insyaallah: u64,
	pub ragu: u64,
	pub messages: Vec<MessageView>,
}

impl AttendanceSummary {
	pub fn from_entries(entries: Vec<Entry>) -> Self {
		let mut summary = Self {
			messages: Vec::with_capacity(entries.len()),
			..Default::default()
		};
		for entry in entries {
			match Attendance::from_label(&entry.attendance) {
				Some(Attendance::Hadir) => summary.hadir += 1,
				Some(Attendance::TidakHadir) => summary.tidak_hadir += 1,
				Some(Attendance::Insyaallah) => summary.insyaallah += 1,
				Some(Attendance::Ragu) => summary.ragu += 1,
				None => {}
			}
			summary.messages.push(entry.into());
		}
		summary
	}
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum QueryResponse {
	Messages(Vec<MessageView>),
	Summary(AttendanceSummary),
}

impl QueryResponse {
	pub fn shape(
		mode: ThemeMode,
		entries: Vec<Entry>,
	) -> Self {
		match mode {
			ThemeMode::MessageList => Self::Messages(entries.into_iter().map(MessageView::from).collect()),
			ThemeMode::AttendanceSummary => Self::Summary(AttendanceSummary::from_entries(entries)),
		}
	}

	#[cfg(test)]
	pub(crate) fn messages(&self) -> &[MessageView] {
		match self {
			Self::Messages(messages) => messages,
			Self::Summary(summary) => &summary.messages,
		}
	}
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusResponse {
	pub status: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
	pub error: String,
}
