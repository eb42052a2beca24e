// src/application/review_stats.rs
use crate::domain::Review;
use serde::Serialize;
use std::collections::HashMap;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReviewStats {
    pub total: usize,
    pub average_rating: f64,
    pub top_cuisine: Option<String>,
}

impl ReviewStats {
    pub fn compute(reviews: &[Review]) -> Self {
        Self {
            total: reviews.len(),
            average_rating: average_rating(reviews),
            top_cuisine: top_cuisine(reviews),
        }
    }
}

/// Mean rating rounded to one decimal; 0.0 for an empty list.
pub fn average_rating(reviews: &[Review]) -> f64 {
    if reviews.is_empty() {
        return 0.0;
    }
    let sum: u32 = reviews.iter().map(|r| u32::from(r.rating.value())).sum();
    let mean = f64::from(sum) / reviews.len() as f64;
    (mean * 10.0).round() / 10.0
}

/// Most frequent cuisine; on a tie the one seen first wins.
pub fn top_cuisine(reviews: &[Review]) -> Option<String> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    let mut first_seen: Vec<&str> = Vec::new();
    for review in reviews {
        let count = counts.entry(review.cuisine.as_str()).or_insert(0);
        if *count == 0 {
            first_seen.push(review.cuisine.as_str());
        }
        *count += 1;
    }

    let mut best: Option<(&str, usize)> = None;
    for cuisine in first_seen {
        let count = counts[cuisine];
        if best.map_or(true, |(_, top)| count > top) {
            best = Some((cuisine, count));
        }
    }
    best.map(|(cuisine, _)| cuisine.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::util::testing::review;

    fn with_ratings(ratings: &[u8]) -> Vec<Review> {
        ratings
            .iter()
            .map(|&r| review("R", "D", "Thai", r, "2026-01-01T00:00:00Z"))
            .collect()
    }

    #[test]
    fn given_sample_ratings_when_averaging_then_returns_one_decimal_mean() {
        assert_eq!(average_rating(&with_ratings(&[5, 4, 4, 5, 3])), 4.2);
    }

    #[test]
    fn given_repeating_decimal_when_averaging_then_rounds() {
        assert_eq!(average_rating(&with_ratings(&[5, 4, 4])), 4.3);
        assert_eq!(average_rating(&with_ratings(&[1, 2])), 1.5);
    }

    #[test]
    fn given_no_reviews_when_computing_stats_then_uses_empty_values() {
        let stats = ReviewStats::compute(&[]);

        assert_eq!(stats.total, 0);
        assert_eq!(stats.average_rating, 0.0);
        assert_eq!(stats.top_cuisine, None);
    }

    #[test]
    fn given_tied_cuisines_when_picking_top_then_first_seen_wins() {
        let reviews = vec![
            review("A", "A", "Mexican", 5, "2026-01-01T00:00:00Z"),
            review("B", "B", "BBQ", 4, "2026-01-01T00:00:00Z"),
            review("C", "C", "BBQ", 4, "2026-01-01T00:00:00Z"),
            review("D", "D", "Mexican", 3, "2026-01-01T00:00:00Z"),
        ];

        assert_eq!(top_cuisine(&reviews).as_deref(), Some("Mexican"));
    }

    #[test]
    fn given_clear_majority_when_picking_top_then_returns_most_frequent() {
        let reviews = vec![
            review("A", "A", "Mexican", 5, "2026-01-01T00:00:00Z"),
            review("B", "B", "BBQ", 4, "2026-01-01T00:00:00Z"),
            review("C", "C", "BBQ", 4, "2026-01-01T00:00:00Z"),
        ];

        let stats = ReviewStats::compute(&reviews);

        assert_eq!(stats.total, 3);
        assert_eq!(stats.top_cuisine.as_deref(), Some("BBQ"));
    }
}
