// src/application/review_query.rs
use crate::constants::ALL_CUISINES;
use crate::domain::Review;
use crate::util::text::normalize;
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SortMode {
    #[default]
    RatingDesc,
    RatingAsc,
    Newest,
    Oldest,
}

impl fmt::Display for SortMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::RatingDesc => "rating-desc",
            Self::RatingAsc => "rating-asc",
            Self::Newest => "newest",
            Self::Oldest => "oldest",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum CuisineFilter {
    #[default]
    All,
    Only(String),
}

impl CuisineFilter {
    pub fn matches(&self, cuisine: &str) -> bool {
        match self {
            Self::All => true,
            Self::Only(selected) => normalize(cuisine) == normalize(selected),
        }
    }

    /// Value of the `<select>` option this filter corresponds to.
    pub fn as_value(&self) -> &str {
        match self {
            Self::All => ALL_CUISINES,
            Self::Only(selected) => selected,
        }
    }
}

impl FromStr for CuisineFilter {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() || trimmed == ALL_CUISINES {
            Ok(Self::All)
        } else {
            Ok(Self::Only(trimmed.to_string()))
        }
    }
}

/// What the user currently asks the listing for.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReviewQuery {
    pub search_term: String,
    pub cuisine: CuisineFilter,
    pub sort_by: SortMode,
}

impl ReviewQuery {
    pub fn matches(&self, review: &Review) -> bool {
        if !self.cuisine.matches(&review.cuisine) {
            return false;
        }
        let term = normalize(&self.search_term);
        term.is_empty() || normalize(&review.search_text()).contains(&term)
    }
}

/// Filter and order `reviews` for display. The input slice is left untouched;
/// records that compare equal keep their relative order.
pub fn filter_reviews<'a>(reviews: &'a [Review], query: &ReviewQuery) -> Vec<&'a Review> {
    let mut filtered: Vec<&Review> = reviews.iter().filter(|r| query.matches(r)).collect();

    // slice::sort_by is stable
    match query.sort_by {
        SortMode::RatingDesc => filtered.sort_by(|a, b| b.rating.cmp(&a.rating)),
        SortMode::RatingAsc => filtered.sort_by(|a, b| a.rating.cmp(&b.rating)),
        SortMode::Newest => filtered.sort_by(|a, b| b.created_at.cmp(&a.created_at)),
        SortMode::Oldest => filtered.sort_by(|a, b| a.created_at.cmp(&b.created_at)),
    }
    filtered
}

/// Distinct non-empty cuisines, ordered case-insensitively.
pub fn cuisine_options(reviews: &[Review]) -> Vec<String> {
    let mut cuisines: Vec<String> = Vec::new();
    for review in reviews {
        if !review.cuisine.is_empty() && !cuisines.contains(&review.cuisine) {
            cuisines.push(review.cuisine.clone());
        }
    }
    cuisines.sort_by(|a, b| {
        a.to_lowercase()
            .cmp(&b.to_lowercase())
            .then_with(|| a.cmp(b))
    });
    cuisines
}
