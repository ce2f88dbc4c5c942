mod messages;

use axum::{
	body::Body,
	http::{header, HeaderValue, Method},
	routing::get,
	Router,
};
use tower_http::cors::{AllowOrigin, CorsLayer};

use crate::{config::Config, services::handlers::MessageHandler};

use self::messages::{get_messages, post_message};

pub fn create_routes(handler: MessageHandler) -> Router<(), Body> {
	Router::new()
		.route("/messages", get(get_messages).post(post_message))
		.with_state(handler)
}

/// Any origin unless `ALLOW_ORIGINS` narrows it down.
pub fn cors_layer(config: &Config) -> CorsLayer {
	let Some(origins) = &config.allow_origins else {
		return CorsLayer::permissive();
	};

	let origins: Vec<HeaderValue> = origins
		.iter()
		.filter_map(|origin| match origin.parse::<HeaderValue>() {
			Ok(value) => Some(value),
			Err(_) => {
				tracing::warn!("Ignoring invalid origin in ALLOW_ORIGINS: {}", origin);
				None
			}
		})
		.collect();

	CorsLayer::new()
		.allow_origin(AllowOrigin::list(origins))
		.allow_methods([Method::GET, Method::POST])
		.allow_headers([header::CONTENT_TYPE])
}

#[cfg(test)]
mod test {
	use std::sync::Arc;

	use axum::{
		body::Body,
		http::{header, Request, StatusCode},
		Router,
	};
	use serde_json::{json, Value};
	use tower::ServiceExt;

	use super::create_routes;
	use crate::{adapters::repositories::InMemoryMessageStore, services::handlers::MessageHandler};

	fn app() -> (Arc<InMemoryMessageStore>, Router) {
		let store = Arc::new(InMemoryMessageStore::new());
		(store.clone(), create_routes(MessageHandler::new(store)))
	}

	async fn send(
		app: &Router,
		request: Request<Body>,
	) -> (StatusCode, Value) {
		let response = app.clone().oneshot(request).await.unwrap();
		let status = response.status();
		let bytes = hyper::body::to_bytes(response.into_body()).await.unwrap();
		(status, serde_json::from_slice(&bytes).unwrap())
	}

	fn post_json(body: Value) -> Request<Body> {
		Request::builder()
			.method("POST")
			.uri("/messages")
			.header(header::CONTENT_TYPE, "application/json")
			.body(Body::from(body.to_string()))
			.unwrap()
	}

	fn get(uri: &str) -> Request<Body> {
		Request::builder().uri(uri).body(Body::empty()).unwrap()
	}

	#[tokio::test]
	async fn test_post_then_get() {
		let (_store, app) = app();

		let (status, body) = send(
			&app,
			post_json(json!({ "name": "Migo", "message": "Selamat!", "coupleId": "andi-rina", "attendance": "Hadir" })),
		)
		.await;
		assert_eq!(status, StatusCode::OK);
		assert_eq!(body, json!({ "status": "Message saved successfully!" }));

		let (status, body) = send(&app, get("/messages?coupleId=andi-rina")).await;
		assert_eq!(status, StatusCode::OK);
		let messages = body.as_array().expect("bare array");
		assert_eq!(messages.len(), 1);
		assert_eq!(messages[0]["name"], "Migo");
		assert_eq!(messages[0]["message"], "Selamat!");
		assert_eq!(messages[0]["attendance"], "Hadir");
		assert!(messages[0]["createdAt"].is_string());
		assert!(messages[0].get("coupleId").is_none());
		assert_eq!(messages[0].as_object().unwrap().len(), 4);
	}

	#[tokio::test]
	async fn test_summary_theme() {
		let (_store, app) = app();
		for (i, attendance) in ["Hadir", "Hadir", "Tidak Hadir", "Ragu", "", ""].into_iter().enumerate() {
			let (status, _) = send(
				&app,
				post_json(json!({ "name": format!("guest {i}"), "message": "hi", "coupleId": "c", "attendance": attendance })),
			)
			.await;
			assert_eq!(status, StatusCode::OK);
		}

		let (status, body) = send(&app, get("/messages?coupleId=c&theme=2")).await;
		assert_eq!(status, StatusCode::OK);
		assert_eq!(body["hadir"], 2);
		assert_eq!(body["tidakHadir"], 1);
		assert_eq!(body["insyaallah"], 0);
		assert_eq!(body["ragu"], 1);
		assert_eq!(body["messages"].as_array().unwrap().len(), 6);

		let (_, list) = send(&app, get("/messages?coupleId=c&theme=1")).await;
		assert_eq!(list, body["messages"]);
	}

	#[tokio::test]
	async fn test_missing_fields_are_bad_requests() {
		let (store, app) = app();
		let expected = json!({ "error": "coupleId, name, and message are required." });

		let (status, body) = send(&app, post_json(json!({ "name": "Migo", "message": "hi" }))).await;
		assert_eq!((status, body), (StatusCode::BAD_REQUEST, expected.clone()));

		let (status, body) = send(&app, post_json(json!({ "name": "", "message": "hi", "coupleId": "c" }))).await;
		assert_eq!((status, body), (StatusCode::BAD_REQUEST, expected.clone()));

		let malformed = Request::builder()
			.method("POST")
			.uri("/messages")
			.header(header::CONTENT_TYPE, "application/json")
			.body(Body::from("{not json"))
			.unwrap();
		let (status, body) = send(&app, malformed).await;
		assert_eq!((status, body), (StatusCode::BAD_REQUEST, expected));

		assert_eq!(store.insert_calls(), 0);

		let (status, body) = send(&app, get("/messages?theme=2")).await;
		assert_eq!(status, StatusCode::BAD_REQUEST);
		assert_eq!(body, json!({ "error": "coupleId is required as query parameter." }));
		assert_eq!(store.find_calls(), 0);
	}

	#[tokio::test]
	async fn test_numeric_fields_are_stored_as_text() {
		let (_store, app) = app();

		let (status, body) = send(&app, post_json(json!({ "name": "n", "message": "m", "coupleId": 123, "attendance": "Ragu" }))).await;
		assert_eq!(status, StatusCode::OK);
		assert_eq!(body, json!({ "status": "Message saved successfully!" }));

		let (status, body) = send(&app, get("/messages?coupleId=123&theme=3")).await;
		assert_eq!(status, StatusCode::OK);
		assert_eq!(body["ragu"], 1);
		assert_eq!(body["messages"][0]["name"], "n");
		assert_eq!(body["messages"][0]["message"], "m");

		let (status, body) = send(&app, post_json(json!({ "name": false, "message": "m", "coupleId": 0 }))).await;
		assert_eq!(status, StatusCode::BAD_REQUEST);
		assert_eq!(body, json!({ "error": "coupleId, name, and message are required." }));
	}

	#[tokio::test]
	async fn test_repeated_couple_id_is_not_reported_as_missing() {
		let (store, app) = app();

		let (status, body) = send(&app, get("/messages?coupleId=a&coupleId=b")).await;
		assert_eq!(status, StatusCode::BAD_REQUEST);
		assert_eq!(body, json!({ "error": "coupleId and theme must each be given at most once." }));
		assert_eq!(store.find_calls(), 0);
	}

	#[tokio::test]
	async fn test_created_at_always_has_milliseconds() {
		let (_store, app) = app();
		send(&app, post_json(json!({ "name": "n", "message": "m", "coupleId": "c" }))).await;

		let (_, body) = send(&app, get("/messages?coupleId=c")).await;
		let created_at = body[0]["createdAt"].as_str().unwrap();
		assert_eq!(created_at.len(), "2024-06-01T10:00:00.000Z".len());
		assert!(created_at.ends_with('Z'));
	}

	#[tokio::test]
	async fn test_store_failures_are_internal_errors() {
		let (store, app) = app();
		store.set_fail_on_insert(true);
		store.set_fail_on_find(true);

		let (status, body) = send(&app, post_json(json!({ "name": "Migo", "message": "hi", "coupleId": "c" }))).await;
		assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
		assert_eq!(body, json!({ "error": "Failed to save message." }));

		let (status, body) = send(&app, get("/messages?coupleId=c")).await;
		assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
		assert_eq!(body, json!({ "error": "Failed to fetch messages." }));
	}
}
