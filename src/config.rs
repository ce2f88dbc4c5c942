use thiserror::Error;

const DEFAULT_PORT: &str = "5000";
const DEFAULT_MAX_CONNECTIONS: u32 = 30;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
	#[error("{0} must be set")]
	MissingVar(&'static str),
	#[error("{name} has an invalid value: {value}")]
	InvalidValue { name: &'static str, value: String },
}

#[derive(Debug, Clone)]
pub struct Config {
	/// Fallback filter when RUST_LOG is not set
	pub log_level: String,

	/// Address the server is listening to
	pub server_ip_port: String,
	pub database_url: String,
	pub database_max_connections: u32,

	/// `None` allows any origin
	pub allow_origins: Option<Vec<String>>,
}

impl Config {
	pub fn new() -> Result<Config, ConfigError> {
		dotenv::dotenv().ok();
		Self::from_lookup(|key| std::env::var(key).ok())
	}

	pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Config, ConfigError> {
		let database_url = lookup("DATABASE_URL")
			.filter(|url| !url.is_empty())
			.ok_or(ConfigError::MissingVar("DATABASE_URL"))?;
		let log_level = lookup("LOG_LEVEL").unwrap_or("info".to_string());

		let port = lookup("PORT").unwrap_or(DEFAULT_PORT.into());
		if port.parse::<u16>().is_err() {
			return Err(ConfigError::InvalidValue { name: "PORT", value: port });
		}
		let server_ip_port = lookup("SERVER_IP_PORT").unwrap_or(format!("0.0.0.0:{port}"));

		let database_max_connections = match lookup("DATABASE_MAX_CONNECTIONS") {
			None => DEFAULT_MAX_CONNECTIONS,
			Some(value) => value.parse().map_err(|_| ConfigError::InvalidValue {
				name: "DATABASE_MAX_CONNECTIONS",
				value,
			})?,
		};

		let allow_origins = lookup("ALLOW_ORIGINS")
			.map(|origins| {
				origins
					.split(',')
					.map(str::trim)
					.filter(|origin| !origin.is_empty())
					.map(String::from)
					.collect::<Vec<_>>()
			})
			.filter(|origins| !origins.is_empty());

		Ok(Config {
			log_level,
			server_ip_port,
			database_url,
			database_max_connections,
			allow_origins,
		})
	}
}
