use std::collections::BTreeMap;

use axum::{
    extract::{Path, Query, State},
    routing::get,
    Json, Router,
};
use serde::Serialize;
use sqlx::SqlitePool;

use crate::db::queries::{categories, questions};
use crate::db::Question;
use crate::server::app::AppState;
use crate::server::error::{ApiError, ApiResponse};
use crate::server::pagination::paginate;

use super::PageQuery;

#[derive(Serialize)]
struct CategoriesResponse {
    success: bool,
    // the capitalized keys are part of the published response shape
    #[serde(rename = "Categories")]
    categories: BTreeMap<i64, String>,
    #[serde(rename = "total_Categories")]
    total_categories: usize,
}

#[derive(Serialize)]
struct CategoryQuestionsResponse {
    #[serde(rename = "Success")]
    success: bool,
    questions: Vec<Question>,
    // counts the returned page, not the full match set
    total_questions: usize,
    current_category: String,
    current_category_id: i64,
}

async fn get_categories(State(pool): State<SqlitePool>) -> ApiResponse<CategoriesResponse> {
    let categories = categories::get_all_categories(&pool).await.map_err(|e| {
        tracing::error!("Listing categories failed: {e}");
        ApiError::Unprocessable
    })?;
    if categories.is_empty() {
        return Err(ApiError::NotFound);
    }

    let total_categories = categories.len();
    let categories = categories.into_iter().map(|c| (c.id, c.kind)).collect();
    Ok(Json(CategoriesResponse {
        success: true,
        categories,
        total_categories,
    }))
}

// an unknown id is an "Invalid category id" bad-request internally, but the
// handler reports every failure as unprocessable, so that is all callers see
async fn get_questions_for_category(
    State(pool): State<SqlitePool>,
    Path(category_id): Path<i64>,
    Query(params): Query<PageQuery>,
) -> ApiResponse<CategoryQuestionsResponse> {
    let category = categories::get_category(&pool, category_id)
        .await
        .map_err(|_| ApiError::Unprocessable)?
        .ok_or(ApiError::Unprocessable)?;

    let selection = questions::get_questions_for_category(&pool, &category.id.to_string())
        .await
        .map_err(|_| ApiError::Unprocessable)?;
    let current = paginate(params.page(), &selection).to_vec();

    Ok(Json(CategoryQuestionsResponse {
        success: true,
        total_questions: current.len(),
        questions: current,
        current_category: category.kind,
        current_category_id: category.id,
    }))
}

pub fn category_router(state: AppState) -> Router {
    Router::new()
        .route("/categories", get(get_categories))
        .route(
            "/categories/{id}/questions",
            get(get_questions_for_category),
        )
        .with_state(state)
}
