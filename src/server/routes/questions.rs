use std::collections::BTreeMap;

use axum::{
    extract::{Path, Query, State},
    routing::{delete, get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_aux::field_attributes::deserialize_option_number_from_string;
use sqlx::SqlitePool;

use crate::db::queries::{categories, questions};
use crate::db::Question;
use crate::server::app::AppState;
use crate::server::deserializers::deserialize_loose_id;
use crate::server::error::{ApiError, ApiResponse};
use crate::server::pagination::paginate;

use super::PageQuery;

/// Every field is optional at the parsing stage; whatever is missing is
/// bound as NULL and left to the insert to reject.
#[derive(Deserialize, Default)]
struct NewQuestion {
    question: Option<String>,
    answer: Option<String>,
    #[serde(default, deserialize_with = "deserialize_option_number_from_string")]
    difficulty: Option<i64>,
    #[serde(default, deserialize_with = "deserialize_loose_id")]
    category: Option<String>,
}

#[derive(Deserialize)]
struct SearchBody {
    #[serde(rename = "searchTerm")]
    search_term: Option<String>,
}

#[derive(Serialize)]
struct QuestionsPageResponse {
    success: bool,
    questions: Vec<Question>,
    total_questions: usize,
    categories: BTreeMap<i64, String>,
}

#[derive(Serialize)]
struct QuestionDeletedResponse {
    success: bool,
    deleted: i64,
    questions: Vec<Question>,
    total_questions: usize,
}

#[derive(Serialize)]
struct QuestionCreatedResponse {
    success: bool,
    created: i64,
    question_created: Option<String>,
    questions: Vec<Question>,
    total_questions: usize,
}

#[derive(Serialize)]
struct SearchResponse {
    success: bool,
    questions: Vec<Question>,
    // counts the returned page, not the full match set
    total_questions: usize,
}

// unlike the other handlers, every failure here surfaces as not-found
async fn get_questions(
    State(pool): State<SqlitePool>,
    Query(params): Query<PageQuery>,
) -> ApiResponse<QuestionsPageResponse> {
    let selection = questions::get_all_questions(&pool)
        .await
        .map_err(|_| ApiError::NotFound)?;
    let categories = categories::get_all_categories(&pool)
        .await
        .map_err(|_| ApiError::NotFound)?;

    let current = paginate(params.page(), &selection).to_vec();
    if current.is_empty() {
        return Err(ApiError::NotFound);
    }

    Ok(Json(QuestionsPageResponse {
        success: true,
        total_questions: selection.len(),
        questions: current,
        categories: categories.into_iter().map(|c| (c.id, c.kind)).collect(),
    }))
}

// a missing id is a not-found internally, but this handler reports every
// failure as unprocessable
async fn delete_question(
    State(pool): State<SqlitePool>,
    Path(question_id): Path<i64>,
    Query(params): Query<PageQuery>,
) -> ApiResponse<QuestionDeletedResponse> {
    questions::get_question_by_id(&pool, question_id)
        .await
        .map_err(|_| ApiError::Unprocessable)?
        .ok_or(ApiError::Unprocessable)?;

    questions::delete_question(&pool, question_id)
        .await
        .map_err(|e| {
            tracing::error!("Deleting question {question_id} failed: {e}");
            ApiError::Unprocessable
        })?;

    let remaining = questions::get_all_questions(&pool)
        .await
        .map_err(|_| ApiError::Unprocessable)?;
    let current = paginate(params.page(), &remaining).to_vec();

    Ok(Json(QuestionDeletedResponse {
        success: true,
        deleted: question_id,
        questions: current,
        total_questions: remaining.len(),
    }))
}

async fn create_question(
    State(pool): State<SqlitePool>,
    Query(params): Query<PageQuery>,
    body: Option<Json<NewQuestion>>,
) -> ApiResponse<QuestionCreatedResponse> {
    let new_question = body.map(|Json(body)| body).unwrap_or_default();

    let id = questions::create_question(
        &pool,
        new_question.question.as_deref(),
        new_question.answer.as_deref(),
        new_question.category.as_deref(),
        new_question.difficulty,
    )
    .await
    .map_err(|e| {
        tracing::warn!("Question insert rejected: {e}");
        ApiError::Unprocessable
    })?;

    let selection = questions::get_all_questions(&pool)
        .await
        .map_err(|_| ApiError::Unprocessable)?;
    let current = paginate(params.page(), &selection).to_vec();

    Ok(Json(QuestionCreatedResponse {
        success: true,
        created: id,
        question_created: new_question.question,
        questions: current,
        total_questions: selection.len(),
    }))
}

// every failure surfaces as not-found here as well, an empty match set
// included
async fn search_questions(
    State(pool): State<SqlitePool>,
    Query(params): Query<PageQuery>,
    body: Option<Json<SearchBody>>,
) -> ApiResponse<SearchResponse> {
    let term = body
        .and_then(|Json(body)| body.search_term)
        .ok_or(ApiError::NotFound)?;
    if term == " " {
        return Err(ApiError::NotFound);
    }

    let selection = questions::search_questions(&pool, &term)
        .await
        .map_err(|_| ApiError::NotFound)?;
    if selection.is_empty() {
        return Err(ApiError::NotFound);
    }

    let current = paginate(params.page(), &selection).to_vec();
    Ok(Json(SearchResponse {
        success: true,
        total_questions: current.len(),
        questions: current,
    }))
}

pub fn questions_router(state: AppState) -> Router {
    Router::new()
        .route("/questions", get(get_questions).post(create_question))
        .route("/questions/search", post(search_questions))
        .route("/questions/{id}", delete(delete_question))
        .with_state(state)
}
