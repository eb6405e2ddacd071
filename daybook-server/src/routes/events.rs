//! Event CRUD endpoints

use axum::{
    Json, Router,
    extract::{
        Path, State,
        rejection::{JsonRejection, PathRejection},
    },
    http::StatusCode,
    routing::get,
};
use daybook_core::{Event, EventPatch, InsertEvent, ValidationError};
use serde_json::Value;

use crate::routes::AppError;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/events", get(list_events).post(create_event))
        .route("/api/events/month/{year}/{month}", get(list_events_by_month))
        .route("/api/events/date/{date}", get(list_events_by_date))
        .route(
            "/api/events/{id}",
            get(get_event).put(update_event).delete(delete_event),
        )
}

/// Storage returns events in no particular order; responses are sorted by
/// date, then start time (untimed first), then creation time.
pub(crate) fn sorted(mut events: Vec<Event>) -> Vec<Event> {
    events.sort_by(|a, b| {
        (&a.date, &a.start_time, a.created_at).cmp(&(&b.date, &b.start_time, b.created_at))
    });
    events
}

/// Reject a month outside 1-12 rather than silently returning nothing.
pub(crate) fn check_month(month: u32) -> Result<(), AppError> {
    if (1..=12).contains(&month) {
        Ok(())
    } else {
        Err(ValidationError::single("month", "must be between 1 and 12").into())
    }
}

/// GET /api/events - List all events
async fn list_events(State(state): State<AppState>) -> Json<Vec<Event>> {
    Json(sorted(state.storage().get_all_events()))
}

/// GET /api/events/month/:year/:month - Events in one month
async fn list_events_by_month(
    State(state): State<AppState>,
    path: Result<Path<(i32, u32)>, PathRejection>,
) -> Result<Json<Vec<Event>>, AppError> {
    let Path((year, month)) = path?;
    check_month(month)?;

    Ok(Json(sorted(state.storage().get_events_by_month(year, month))))
}

/// GET /api/events/date/:date - Events on one exact date
async fn list_events_by_date(
    State(state): State<AppState>,
    Path(date): Path<String>,
) -> Json<Vec<Event>> {
    Json(sorted(state.storage().get_events_by_date(&date)))
}

/// GET /api/events/:id - A single event
async fn get_event(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Event>, AppError> {
    state
        .storage()
        .get_event(&id)
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("Event {}", id)))
}

/// POST /api/events - Create a new event
async fn create_event(
    State(state): State<AppState>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<(StatusCode, Json<Event>), AppError> {
    let Json(body) = body?;
    let insert = InsertEvent::from_json(&body)?;

    let event = state.storage().create_event(insert);
    tracing::info!(event_id = %event.id, date = %event.date, "Event created");

    Ok((StatusCode::CREATED, Json(event)))
}

/// PUT /api/events/:id - Partially update an event
async fn update_event(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<Json<Event>, AppError> {
    let Json(body) = body?;
    let patch = EventPatch::from_json(&body)?;

    let event = state
        .storage()
        .update_event(&id, patch)
        .ok_or_else(|| AppError::NotFound(format!("Event {}", id)))?;
    tracing::info!(event_id = %event.id, "Event updated");

    Ok(Json(event))
}

/// DELETE /api/events/:id - Delete an event
async fn delete_event(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<bool>, AppError> {
    if !state.storage().delete_event(&id) {
        return Err(AppError::NotFound(format!("Event {}", id)));
    }
    tracing::info!(event_id = %id, "Event deleted");

    Ok(Json(true))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::routes::testing::{send, test_app};
    use daybook_core::Storage;
    use serde_json::json;

    #[tokio::test]
    async fn test_create_applies_defaults() {
        let (app, storage) = test_app();

        let (status, body) = send(
            &app,
            "POST",
            "/api/events",
            Some(json!({
                "title": "Standup",
                "date": "2024-06-01",
                "startTime": "09:00",
                "endTime": "09:15"
            })),
        )
        .await;

        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["color"], "#3B82F6");
        assert!(body["description"].is_null());
        assert!(!body["id"].as_str().unwrap().is_empty());
        assert!(body["createdAt"].is_string());
        assert_eq!(storage.event_count(), 1);
    }

    #[tokio::test]
    async fn test_create_invalid_returns_field_errors() {
        let (app, storage) = test_app();

        let (status, body) = send(
            &app,
            "POST",
            "/api/events",
            Some(json!({"title": "", "date": "tomorrow"})),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Validation failed");
        let paths: Vec<&str> = body["fields"]
            .as_array()
            .unwrap()
            .iter()
            .map(|f| f["path"].as_str().unwrap())
            .collect();
        assert_eq!(paths, vec!["title", "date"]);
        assert_eq!(storage.event_count(), 0);
    }

    #[tokio::test]
    async fn test_create_malformed_json() {
        let (app, _) = test_app();

        let request = axum::http::Request::builder()
            .method("POST")
            .uri("/api/events")
            .header("content-type", "application/json")
            .body(axum::body::Body::from("{not json"))
            .unwrap();
        let response = tower::ServiceExt::oneshot(app, request).await.unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_get_update_delete_roundtrip() {
        let (app, storage) = test_app();
        let created = storage.create_event(InsertEvent {
            description: Some("Daily".to_string()),
            ..InsertEvent::new("Standup", "2024-06-01")
        });
        let uri = format!("/api/events/{}", created.id);

        let (status, body) = send(&app, "GET", &uri, None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["title"], "Standup");

        let (status, body) = send(&app, "PUT", &uri, Some(json!({"title": "X"}))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["title"], "X");
        assert_eq!(body["description"], "Daily");
        assert_eq!(body["id"], created.id.as_str());

        let (status, body) = send(&app, "PUT", &uri, Some(json!({"description": null}))).await;
        assert_eq!(status, StatusCode::OK);
        assert!(body["description"].is_null());

        let (status, body) = send(&app, "DELETE", &uri, None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!(true));

        let (status, _) = send(&app, "DELETE", &uri, None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (status, _) = send(&app, "GET", &uri, None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_update_unknown_id_is_not_found() {
        let (app, storage) = test_app();
        storage.create_event(InsertEvent::new("Standup", "2024-06-01"));

        let (status, body) = send(
            &app,
            "PUT",
            "/api/events/nonexistent-id",
            Some(json!({"title": "X"})),
        )
        .await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], "Event nonexistent-id not found");
        assert_eq!(storage.event_count(), 1);
    }

    #[tokio::test]
    async fn test_update_validates_before_lookup() {
        let (app, _) = test_app();

        let (status, body) = send(
            &app,
            "PUT",
            "/api/events/nonexistent-id",
            Some(json!({"id": "other"})),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["fields"][0]["path"], "id");
    }

    #[tokio::test]
    async fn test_list_by_month() {
        let (app, storage) = test_app();
        for date in ["2024-03-31", "2024-04-01", "2024-03-01", "2023-03-15"] {
            storage.create_event(InsertEvent::new(date, date));
        }

        let (status, body) = send(&app, "GET", "/api/events/month/2024/3", None).await;
        assert_eq!(status, StatusCode::OK);
        let dates: Vec<&str> = body
            .as_array()
            .unwrap()
            .iter()
            .map(|e| e["date"].as_str().unwrap())
            .collect();
        assert_eq!(dates, vec!["2024-03-01", "2024-03-31"]);

        let (status, body) = send(&app, "GET", "/api/events/month/2025/1", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!([]));
    }

    #[tokio::test]
    async fn test_list_by_month_rejects_bad_params() {
        let (app, _) = test_app();

        let (status, body) = send(&app, "GET", "/api/events/month/2024/13", None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["fields"][0]["path"], "month");

        let (status, _) = send(&app, "GET", "/api/events/month/2024/march", None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_list_by_date_and_all() {
        let (app, storage) = test_app();
        storage.create_event(InsertEvent {
            start_time: Some("14:00".to_string()),
            ..InsertEvent::new("Later", "2024-03-15")
        });
        storage.create_event(InsertEvent {
            start_time: Some("09:00".to_string()),
            ..InsertEvent::new("Earlier", "2024-03-15")
        });
        storage.create_event(InsertEvent::new("Other day", "2024-03-14"));

        let (_, body) = send(&app, "GET", "/api/events/date/2024-03-15", None).await;
        let titles: Vec<&str> = body
            .as_array()
            .unwrap()
            .iter()
            .map(|e| e["title"].as_str().unwrap())
            .collect();
        assert_eq!(titles, vec!["Earlier", "Later"]);

        let (_, body) = send(&app, "GET", "/api/events/date/2024-03-16", None).await;
        assert_eq!(body, json!([]));

        let (_, body) = send(&app, "GET", "/api/events", None).await;
        assert_eq!(body.as_array().unwrap().len(), 3);
        assert_eq!(body[0]["title"], "Other day");
    }
}
