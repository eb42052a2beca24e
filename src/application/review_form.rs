// src/application/review_form.rs
use crate::constants::ANONYMOUS_REVIEWER;
use crate::domain::{Rating, Review};
use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Raw field values as submitted, before trimming or validation.
#[derive(Debug, Clone, Default)]
pub struct ReviewForm {
    pub reviewer: Option<String>,
    pub restaurant: Option<String>,
    pub dish: Option<String>,
    pub cuisine: Option<String>,
    pub neighborhood: Option<String>,
    pub rating: Option<String>,
    pub comment: Option<String>,
}

fn field(value: &Option<String>) -> String {
    value.as_deref().map(str::trim).unwrap_or_default().to_string()
}

/// A truthy rating: numeric, non-zero and whole within 1..=5.
fn parse_rating(value: &Option<String>) -> Option<Rating> {
    let number: f64 = value.as_deref()?.trim().parse().ok()?;
    if number == 0.0 || number.fract() != 0.0 || !(1.0..=5.0).contains(&number) {
        return None;
    }
    Rating::new(number as u8).ok()
}

impl ReviewForm {
    /// Build the record this form describes, or `None` when a required field
    /// is blank or the rating is not usable.
    pub fn into_review(self, created_at: DateTime<Utc>) -> Option<Review> {
        let reviewer = match field(&self.reviewer) {
            name if name.is_empty() => ANONYMOUS_REVIEWER.to_string(),
            name => name,
        };
        let restaurant = field(&self.restaurant);
        let dish = field(&self.dish);
        let cuisine = field(&self.cuisine);
        let neighborhood = field(&self.neighborhood);
        let comment = field(&self.comment);
        let rating = parse_rating(&self.rating)?;

        if [&restaurant, &dish, &cuisine, &neighborhood, &comment]
            .iter()
            .any(|v| v.is_empty())
        {
            return None;
        }

        Some(Review {
            id: Uuid::new_v4(),
            reviewer,
            restaurant,
            dish,
            cuisine,
            neighborhood,
            rating,
            comment,
            created_at,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::util::testing::complete_form;
    use rstest::rstest;

    #[test]
    fn given_complete_form_when_converting_then_trims_fields() {
        let mut form = complete_form();
        form.restaurant = Some("  Taco Orbit ".to_string());

        let review = form.into_review(Utc::now()).expect("form is valid");

        assert_eq!(review.restaurant, "Taco Orbit");
        assert_eq!(review.rating.value(), 4);
    }

    #[rstest]
    #[case(None)]
    #[case(Some(""))]
    #[case(Some("   "))]
    fn given_blank_reviewer_when_converting_then_defaults_to_anonymous(#[case] reviewer: Option<&str>) {
        let mut form = complete_form();
        form.reviewer = reviewer.map(str::to_string);

        let review = form.into_review(Utc::now()).expect("form is valid");

        assert_eq!(review.reviewer, ANONYMOUS_REVIEWER);
    }

    #[test]
    fn given_missing_dish_when_converting_then_rejects() {
        let mut form = complete_form();
        form.dish = None;

        assert!(form.into_review(Utc::now()).is_none());
    }

    #[test]
    fn given_whitespace_comment_when_converting_then_rejects() {
        let mut form = complete_form();
        form.comment = Some("  \n ".to_string());

        assert!(form.into_review(Utc::now()).is_none());
    }

    #[rstest]
    #[case(None)]
    #[case(Some("0"))]
    #[case(Some("abc"))]
    #[case(Some("6"))]
    #[case(Some("3.5"))]
    #[case(Some("-2"))]
    fn given_unusable_rating_when_converting_then_rejects(#[case] rating: Option<&str>) {
        let mut form = complete_form();
        form.rating = rating.map(str::to_string);

        assert!(form.into_review(Utc::now()).is_none());
    }
}
