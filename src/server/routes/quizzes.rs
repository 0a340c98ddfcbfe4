use axum::{extract::State, routing::post, Json, Router};
use rand::Rng;
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;

use crate::db::queries::questions;
use crate::db::Question;
use crate::server::app::AppState;
use crate::server::deserializers::deserialize_loose_id;
use crate::server::error::{ApiError, ApiResponse};
use crate::telemetry::QUIZ_CNTR;

/// Sentinel category label meaning "draw from all questions".
const ALL_CATEGORIES: &str = "click";

#[derive(Deserialize)]
struct QuizBody {
    previous_questions: Option<Vec<i64>>,
    quiz_category: Option<QuizCategory>,
}

#[derive(Deserialize)]
struct QuizCategory {
    #[serde(rename = "type")]
    kind: Option<String>,
    #[serde(default, deserialize_with = "deserialize_loose_id")]
    id: Option<String>,
}

#[derive(Serialize)]
struct QuizResponse {
    success: bool,
    question: Question,
}

async fn play_quiz(
    State(pool): State<SqlitePool>,
    body: Option<Json<QuizBody>>,
) -> ApiResponse<QuizResponse> {
    let body = body.map(|Json(body)| body).ok_or(ApiError::BadRequest)?;
    let previous = body.previous_questions.ok_or(ApiError::BadRequest)?;
    let category = body.quiz_category.ok_or(ApiError::BadRequest)?;
    let kind = category.kind.ok_or(ApiError::BadRequest)?;

    let selection = if kind == ALL_CATEGORIES {
        questions::get_all_questions(&pool).await
    } else {
        let id = category.id.ok_or(ApiError::BadRequest)?;
        questions::get_questions_for_category(&pool, &id).await
    }
    .map_err(|_| ApiError::BadRequest)?;

    // questions already served in this game are out of the draw
    let mut candidates: Vec<Question> = selection
        .into_iter()
        .filter(|q| !previous.contains(&q.id))
        .collect();
    if candidates.is_empty() {
        return Err(ApiError::BadRequest);
    }

    let pick = rand::thread_rng().gen_range(0..candidates.len());
    let question = candidates.swap_remove(pick);
    QUIZ_CNTR
        .with_label_values(&[question.category.as_str()])
        .inc();

    Ok(Json(QuizResponse {
        success: true,
        question,
    }))
}

pub fn quiz_router(state: AppState) -> Router {
    Router::new()
        .route("/quizzes", post(play_quiz))
        .with_state(state)
}
