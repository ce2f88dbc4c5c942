use std::{net::SocketAddr, str::FromStr};

use anyhow::Context;
use guestbook::{
	bootstrap::Bootstrap,
	config::Config,
	routes::{cors_layer, create_routes},
};
use tower_http::trace::TraceLayer;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
	let config = Config::new()?;

	// ! Tracing
	tracing_subscriber::registry()
		.with(tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
			// axum logs rejections from built-in extractors with the `axum::rejection`
			// target, at `TRACE` level
			format!("{},tower_http=debug,axum::rejection=trace", config.log_level).into()
		}))
		.with(tracing_subscriber::fmt::layer())
		.init();

	// ! Connection
	tracing::info!("Connections are being pooled...");
	let handler = Bootstrap::message_handler(&config).await.context("failed to set up the message store")?;

	let app = create_routes(handler)
		.layer(cors_layer(&config))
		.layer(TraceLayer::new_for_http());

	let addr = SocketAddr::from_str(&config.server_ip_port).with_context(|| format!("invalid listen address {}", config.server_ip_port))?;
	tracing::info!("Server running on {}", addr);
	axum::Server::bind(&addr)
		.serve(app.into_make_service())
		.with_graceful_shutdown(shutdown_signal())
		.await?;

	Ok(())
}

async fn shutdown_signal() {
	if let Err(err) = tokio::signal::ctrl_c().await {
		tracing::error!("Failed to listen for shutdown signal: {:?}", err);
		std::future::pending::<()>().await;
	}
	tracing::info!("Shutting down");
}
