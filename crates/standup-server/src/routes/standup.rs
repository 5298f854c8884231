use axum::extract::rejection::JsonRejection;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use standup_core::types::{SubmissionInput, SubmissionResult};

use crate::error::AppError;
use crate::state::AppState;

/// POST /api/standup — validate a stand-up and relay it to chat and sheet.
///
/// `200` when at least one sink accepted it, `500` with both errors when
/// neither did, `400` for a missing `yesterday`/`today` or an unreadable body.
pub async fn submit(
    State(app): State<AppState>,
    payload: Result<Json<SubmissionInput>, JsonRejection>,
) -> Result<Response, AppError> {
    let Json(input) =
        payload.map_err(|e| AppError::bad_request(format!("Invalid request body: {}", e.body_text())))?;

    let result = app.service.submit(input).await?;
    Ok(submission_response(result))
}

fn submission_response(result: SubmissionResult) -> Response {
    let message = result.overall.message();

    if !result.overall.is_delivered() {
        let body = serde_json::json!({
            "message": message,
            "errors": {
                "chat": result.chat.error_detail,
                "sheet": result.log.error_detail,
            },
        });
        return (StatusCode::INTERNAL_SERVER_ERROR, Json(body)).into_response();
    }

    let body = serde_json::json!({
        "message": message,
        "chat": result.chat,
        "sheet": result.log,
    });
    (StatusCode::OK, Json(body)).into_response()
}

#[derive(serde::Deserialize)]
pub struct LastEntryQuery {
    #[serde(default)]
    pub email: Option<String>,
}

/// GET /api/standup?email= — most recent logged entry for pre-filling the form.
pub async fn last_entry(
    State(app): State<AppState>,
    Query(query): Query<LastEntryQuery>,
) -> Result<Json<serde_json::Value>, AppError> {
    let email = query.email.unwrap_or_default();
    let entry = app.service.last_entry(&email).await?;

    let body = match entry {
        Some(data) => serde_json::json!({
            "message": "Last entry retrieved",
            "data": data,
        }),
        None => serde_json::json!({
            "message": "No previous entries found",
            "data": null,
        }),
    };
    Ok(Json(body))
}

#[cfg(test)]
mod tests {
    use super::*;
    use standup_core::config::Config;
    use standup_core::types::SinkOutcome;

    #[test]
    fn partial_result_is_200_with_both_slots() {
        let result =
            SubmissionResult::from_outcomes(SinkOutcome::ok(), SinkOutcome::failed("sheet down"));
        let response = submission_response(result);
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[test]
    fn full_failure_is_500() {
        let result =
            SubmissionResult::from_outcomes(SinkOutcome::failed("a"), SinkOutcome::failed("b"));
        assert_eq!(
            submission_response(result).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[tokio::test]
    async fn last_entry_without_email_is_error() {
        let app = AppState::new(Config::default()).unwrap();
        let result = last_entry(State(app), Query(LastEntryQuery { email: None })).await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn last_entry_without_sheet_is_empty() {
        let app = AppState::new(Config::default()).unwrap();
        let Json(body) = last_entry(
            State(app),
            Query(LastEntryQuery {
                email: Some("ada@x.com".into()),
            }),
        )
        .await
        .unwrap();
        assert_eq!(body["message"], "No previous entries found");
        assert!(body["data"].is_null());
    }
}
