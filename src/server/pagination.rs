pub const QUESTIONS_PER_PAGE: usize = 10;

/// Fixed-size window over an ordered list, selected by a 1-based page
/// number. Out-of-range pages (page 0 included) come back empty; callers
/// treat an empty page as a not-found condition.
pub fn paginate<T>(page: u32, items: &[T]) -> &[T] {
    let start = match page.checked_sub(1) {
        Some(p) => p as usize * QUESTIONS_PER_PAGE,
        None => return &[],
    };
    if start >= items.len() {
        return &[];
    }
    let end = (start + QUESTIONS_PER_PAGE).min(items.len());
    &items[start..end]
}
