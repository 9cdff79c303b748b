//! Recipe rating aggregates, recomputed client-side after a review is posted.

#[cfg(test)]
#[path = "rating_test.rs"]
mod rating_test;

use schema::{RecipeDraft, Review};

/// Rounded mean of the non-null star ratings (`None` when no review has
/// stars) and the number of reviews.
#[must_use]
pub fn rating_summary(reviews: &[Review]) -> (Option<i32>, i32) {
    let stars = reviews.iter().filter_map(|r| r.review_stars).collect::<Vec<_>>();
    let count = i32::try_from(reviews.len()).unwrap_or(i32::MAX);
    if stars.is_empty() {
        return (None, count);
    }
    let total = stars.iter().map(|s| i64::from(*s)).sum::<i64>();
    let len = i64::try_from(stars.len()).unwrap_or(i64::MAX);
    // Round half up.
    let mean = (2 * total + len).div_euclid(2 * len);
    (Some(i32::try_from(mean).unwrap_or(i32::MAX)), count)
}

/// Recipe update carrying only the recomputed aggregates.
#[must_use]
pub fn rating_update(reviews: &[Review]) -> RecipeDraft {
    let (average_rating, num_reviews) = rating_summary(reviews);
    RecipeDraft { average_rating, num_reviews: Some(num_reviews), ..RecipeDraft::default() }
}

/// Five-slot star string for display, e.g. `★★★☆☆`.
#[must_use]
pub fn star_string(stars: Option<i32>) -> String {
    let filled = usize::try_from(stars.unwrap_or(0).clamp(0, 5)).unwrap_or(0);
    format!("{}{}", "★".repeat(filled), "☆".repeat(5 - filled))
}
