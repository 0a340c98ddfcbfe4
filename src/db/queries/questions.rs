use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;

/// Serializing a `Question` yields the wire projection used by every
/// endpoint: `{id, question, answer, category, difficulty}`.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Question {
    pub id: i64,
    pub question: String,
    pub answer: String,
    pub category: String,
    pub difficulty: i64,
}

pub async fn get_all_questions(pool: &SqlitePool) -> sqlx::Result<Vec<Question>> {
    sqlx::query_as::<_, Question>(
        r#"
        SELECT * FROM questions ORDER BY id
        "#,
    )
    .fetch_all(pool)
    .await
}

pub async fn get_question_by_id(pool: &SqlitePool, id: i64) -> sqlx::Result<Option<Question>> {
    sqlx::query_as::<_, Question>(
        r#"
        SELECT * FROM questions WHERE questions.id = ?1
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await
}

pub async fn get_questions_for_category(
    pool: &SqlitePool,
    category: &str,
) -> sqlx::Result<Vec<Question>> {
    sqlx::query_as::<_, Question>(
        r#"
        SELECT * FROM questions WHERE questions.category = ?1 ORDER BY id
        "#,
    )
    .bind(category)
    .fetch_all(pool)
    .await
}

// LIKE is case-insensitive for ASCII in sqlite, which covers the
// case-insensitive substring contract
pub async fn search_questions(pool: &SqlitePool, term: &str) -> sqlx::Result<Vec<Question>> {
    sqlx::query_as::<_, Question>(
        r#"
        SELECT * FROM questions WHERE questions.question LIKE '%' || ?1 || '%' ORDER BY id
        "#,
    )
    .bind(term)
    .fetch_all(pool)
    .await
}

/// Inserts a new question. Absent fields are bound as NULL and rejected by
/// the NOT NULL constraints, which is what turns a contentless payload into
/// an insertion error for the caller.
pub async fn create_question(
    pool: &SqlitePool,
    question: Option<&str>,
    answer: Option<&str>,
    category: Option<&str>,
    difficulty: Option<i64>,
) -> anyhow::Result<i64> {
    let mut conn = pool.acquire().await?;

    let id = sqlx::query(
        r#"
INSERT INTO questions (question, answer, category, difficulty) VALUES (?1, ?2, ?3, ?4)
        "#,
    )
    .bind(question)
    .bind(answer)
    .bind(category)
    .bind(difficulty)
    .execute(&mut *conn)
    .await?
    .last_insert_rowid();

    Ok(id)
}

pub async fn delete_question(pool: &SqlitePool, id: i64) -> anyhow::Result<()> {
    let mut conn = pool.acquire().await?;

    sqlx::query(
        r#"
        DELETE FROM questions WHERE questions.id = ?1
        "#,
    )
    .bind(id)
    .execute(&mut *conn)
    .await?;
    Ok(())
}
