// src/application/review_store.rs
use crate::application::review_form::ReviewForm;
use crate::application::review_query::{cuisine_options, filter_reviews, ReviewQuery};
use crate::application::review_stats::ReviewStats;
use crate::domain::{DomainError, Rating, Review};
use chrono::{DateTime, Utc};
use tracing::{debug, info};
use uuid::Uuid;

pub trait ReviewRepository {
    /// Load the persisted list. Implementations fall back to
    /// [`default_reviews`] instead of failing.
    fn load_reviews(&mut self) -> Vec<Review>;

    /// Persist the full list snapshot.
    fn save_reviews(&mut self, reviews: &[Review]) -> Result<(), DomainError>;
}

/// The in-memory board: all records plus the current listing query.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BoardState {
    pub reviews: Vec<Review>,
    pub query: ReviewQuery,
}

impl BoardState {
    pub fn visible_reviews(&self) -> Vec<&Review> {
        filter_reviews(&self.reviews, &self.query)
    }

    pub fn stats(&self) -> ReviewStats {
        ReviewStats::compute(&self.reviews)
    }

    pub fn cuisine_options(&self) -> Vec<String> {
        cuisine_options(&self.reviews)
    }
}

pub struct ReviewStore<R: ReviewRepository> {
    repository: R,
    state: BoardState,
}

impl<R: ReviewRepository> ReviewStore<R> {
    pub fn open(mut repository: R) -> Self {
        let reviews = repository.load_reviews();
        debug!(count = reviews.len(), "Loaded reviews");
        Self {
            repository,
            state: BoardState {
                reviews,
                query: ReviewQuery::default(),
            },
        }
    }

    pub fn state(&self) -> &BoardState {
        &self.state
    }

    pub fn set_query(&mut self, query: ReviewQuery) {
        self.state.query = query;
    }

    /// Validate and prepend a new review, then persist the whole list.
    ///
    /// An invalid form is dropped without an error; `Ok(None)` is returned and
    /// nothing is written.
    pub fn submit(&mut self, form: ReviewForm) -> Result<Option<&Review>, DomainError> {
        self.submit_at(form, Utc::now())
    }

    pub fn submit_at(
        &mut self,
        form: ReviewForm,
        now: DateTime<Utc>,
    ) -> Result<Option<&Review>, DomainError> {
        let Some(review) = form.into_review(now) else {
            debug!("Ignoring incomplete review submission");
            return Ok(None);
        };

        let mut next = Vec::with_capacity(self.state.reviews.len() + 1);
        next.push(review);
        next.extend(self.state.reviews.iter().cloned());
        self.repository.save_reviews(&next)?;
        self.state.reviews = next;

        let added = &self.state.reviews[0];
        info!(id = %added.id, restaurant = %added.restaurant, "Added review");
        Ok(Some(added))
    }

    pub fn into_state(self) -> BoardState {
        self.state
    }
}

#[allow(clippy::too_many_arguments)]
fn seed(
    reviewer: &str,
    restaurant: &str,
    dish: &str,
    cuisine: &str,
    neighborhood: &str,
    rating: u8,
    comment: &str,
    created_at: &str,
) -> Option<Review> {
    Some(Review {
        id: Uuid::new_v4(),
        reviewer: reviewer.to_string(),
        restaurant: restaurant.to_string(),
        dish: dish.to_string(),
        cuisine: cuisine.to_string(),
        neighborhood: neighborhood.to_string(),
        rating: Rating::new(rating).ok()?,
        comment: comment.to_string(),
        created_at: DateTime::parse_from_rfc3339(created_at)
            .ok()?
            .with_timezone(&Utc),
    })
}

/// Bundled dataset shown when nothing usable is stored.
pub fn default_reviews() -> Vec<Review> {
    [
        seed(
            "Aisha",
            "Luna Pasta Lab",
            "Truffle Tagliatelle",
            "Italian",
            "SoMa",
            5,
            "Silky pasta with deep truffle aroma. Rich but balanced and worth every bite.",
            "2026-01-14T18:15:00.000Z",
        ),
        seed(
            "Marcus",
            "Crimson Grill",
            "Smoked Brisket Plate",
            "BBQ",
            "Mission",
            4,
            "Tender brisket and a peppery bark. Cornbread was excellent too.",
            "2026-02-01T13:05:00.000Z",
        ),
        seed(
            "Jenna",
            "Sakura Corner",
            "Spicy Salmon Roll",
            "Japanese",
            "Richmond",
            4,
            "Fresh fish and great texture. Spicy mayo has a nice kick without overpowering.",
            "2026-01-28T20:40:00.000Z",
        ),
        seed(
            "Noah",
            "Taco Orbit",
            "Al Pastor Tacos",
            "Mexican",
            "Downtown",
            5,
            "Perfect char and pineapple sweetness. Probably my favorite taco spot right now.",
            "2026-02-04T12:18:00.000Z",
        ),
        seed(
            "Leila",
            "Garden Bowl",
            "Falafel Mezze",
            "Middle Eastern",
            "Sunset",
            3,
            "Great hummus, but falafel could be crispier. Friendly service though.",
            "2026-01-30T19:10:00.000Z",
        ),
    ]
    .into_iter()
    .flatten()
    .collect()
}
