mod categories;
mod questions;
mod quizzes;

pub use categories::category_router;
pub use questions::questions_router;
pub use quizzes::quiz_router;

use serde::Deserialize;

/// The 1-based `?page=N` query parameter, defaulting to the first page.
#[derive(Deserialize)]
pub(crate) struct PageQuery {
    page: Option<u32>,
}

impl PageQuery {
    pub(crate) fn page(&self) -> u32 {
        self.page.unwrap_or(1)
    }
}
