// src/util/testing.rs

use anyhow::{bail, Result};
use chrono::{DateTime, Utc};
use image::DynamicImage;
use std::cell::{Cell, RefCell};
use std::path::{Path, PathBuf};
use std::rc::Rc;
use tracing::{debug, info};
use tracing_subscriber::{
    filter::filter_fn,
    fmt::{self, format::FmtSpan},
    prelude::*,
    EnvFilter,
};
use uuid::Uuid;

use crate::application::image_pipeline::{ImageCodec, Variant};
use crate::application::review_store::ReviewRepository;
use crate::application::ReviewForm;
use crate::domain::{Dish, DishImage, DomainError, Rating, Review};

/// Review with the fields tests care about; the rest are filler.
///
/// # Panics
/// On an out-of-range rating or a malformed timestamp.
pub fn review(restaurant: &str, dish: &str, cuisine: &str, rating: u8, created_at: &str) -> Review {
    Review {
        id: Uuid::new_v4(),
        reviewer: "Tester".to_string(),
        restaurant: restaurant.to_string(),
        dish: dish.to_string(),
        cuisine: cuisine.to_string(),
        neighborhood: "Nowhere".to_string(),
        rating: Rating::new(rating).expect("test rating in range"),
        comment: "Tasty.".to_string(),
        created_at: DateTime::parse_from_rfc3339(created_at)
            .expect("test timestamp is RFC 3339")
            .with_timezone(&Utc),
    }
}

/// A form that passes validation.
pub fn complete_form() -> ReviewForm {
    ReviewForm {
        reviewer: Some("Sam".to_string()),
        restaurant: Some("Pho Real".to_string()),
        dish: Some("Brisket Pho".to_string()),
        cuisine: Some("Vietnamese".to_string()),
        neighborhood: Some("Tenderloin".to_string()),
        rating: Some("4".to_string()),
        comment: Some("Deep broth, generous herbs.".to_string()),
    }
}

/// Dish with a 1x1 PNG image and no restaurants.
pub fn dish(name: &str) -> Dish {
    const PIXEL_PNG: &str = "iVBORw0KGgoAAAANSUhEUgAAAAEAAAABCAYAAAAfFcSJAAAADUlEQVR42mNkYPhfDwAChwGA60e6kgAAAABJRU5ErkJggg==";
    Dish {
        name: name.to_string(),
        description: format!("{name} description"),
        rating: 4.5,
        image: DishImage::decode(PIXEL_PNG).expect("test image is valid base64"),
        restaurants: vec![],
    }
}

/// Shared mock repository for testing use cases that depend on ReviewRepository
///
/// Every successful save is recorded; grab [`MockReviewRepository::saved_handle`]
/// before moving the mock into a store to inspect them afterwards.
///
/// # Examples
///
/// ```
/// use biteboard::util::testing::MockReviewRepository;
///
/// let mock = MockReviewRepository::builder()
///     .with_save_failure()
///     .build();
/// let saved = mock.saved_handle();
/// assert!(saved.borrow().is_empty());
/// ```
pub struct MockReviewRepository {
    reviews: Vec<Review>,
    saved: Rc<RefCell<Vec<Vec<Review>>>>,
    fail_save: bool,
}

impl MockReviewRepository {
    pub fn builder() -> MockReviewRepositoryBuilder {
        MockReviewRepositoryBuilder::new()
    }

    pub fn saved_handle(&self) -> Rc<RefCell<Vec<Vec<Review>>>> {
        Rc::clone(&self.saved)
    }
}

impl ReviewRepository for MockReviewRepository {
    fn load_reviews(&mut self) -> Vec<Review> {
        self.reviews.clone()
    }

    fn save_reviews(&mut self, reviews: &[Review]) -> Result<(), DomainError> {
        if self.fail_save {
            return Err(DomainError::Storage("disk full".to_string()));
        }
        self.saved.borrow_mut().push(reviews.to_vec());
        Ok(())
    }
}

/// Builder for MockReviewRepository
pub struct MockReviewRepositoryBuilder {
    reviews: Vec<Review>,
    fail_save: bool,
}

impl MockReviewRepositoryBuilder {
    pub fn new() -> Self {
        Self {
            reviews: vec![],
            fail_save: false,
        }
    }

    /// Reviews returned by load_reviews
    pub fn with_reviews(mut self, reviews: Vec<Review>) -> Self {
        self.reviews = reviews;
        self
    }

    /// Make every save_reviews call fail with a storage error
    pub fn with_save_failure(mut self) -> Self {
        self.fail_save = true;
        self
    }

    pub fn build(self) -> MockReviewRepository {
        MockReviewRepository {
            reviews: self.reviews,
            saved: Rc::new(RefCell::new(Vec::new())),
            fail_save: self.fail_save,
        }
    }
}

impl Default for MockReviewRepositoryBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Image codec that records calls and writes marker files instead of WebP.
#[derive(Default)]
pub struct RecordingCodec {
    decodes: Cell<usize>,
    writes: RefCell<Vec<(PathBuf, Variant)>>,
    placeholders: RefCell<Vec<String>>,
    failing_on: Option<String>,
}

impl RecordingCodec {
    /// Fail decoding any source whose file name equals `file_name`.
    pub fn failing_on(mut self, file_name: &str) -> Self {
        self.failing_on = Some(file_name.to_string());
        self
    }

    pub fn decodes(&self) -> usize {
        self.decodes.get()
    }

    pub fn writes(&self) -> Vec<(PathBuf, Variant)> {
        self.writes.borrow().clone()
    }

    pub fn placeholders(&self) -> Vec<String> {
        self.placeholders.borrow().clone()
    }
}

impl ImageCodec for RecordingCodec {
    fn decode(&self, source: &Path) -> Result<DynamicImage> {
        if let Some(failing) = &self.failing_on {
            if source.file_name().is_some_and(|name| name == failing.as_str()) {
                bail!("corrupt image {}", source.display());
            }
        }
        self.decodes.set(self.decodes.get() + 1);
        Ok(DynamicImage::new_rgba8(2, 2))
    }

    fn placeholder(&self, label: &str, width: u32, height: u32) -> Result<DynamicImage> {
        self.placeholders.borrow_mut().push(label.to_string());
        Ok(DynamicImage::new_rgba8(width, height))
    }

    fn write_webp(&self, _image: &DynamicImage, target: &Path, variant: Variant) -> Result<()> {
        std::fs::write(target, b"webp")?;
        self.writes.borrow_mut().push((target.to_path_buf(), variant));
        Ok(())
    }
}

pub fn init_test_setup() -> Result<()> {
    // Set up logging first
    setup_test_logging();

    info!("Test Setup complete");
    Ok(())
}

fn setup_test_logging() {
    debug!("INIT: Attempting logger init from testing.rs");

    // Create a filter for noisy modules
    let noisy_modules = ["fontdb", "usvg", "resvg"];
    let module_filter = filter_fn(move |metadata| {
        !noisy_modules
            .iter()
            .any(|name| metadata.target().starts_with(name))
    });

    // Set up the subscriber with environment filter
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"));

    // Build and set the subscriber
    let subscriber = tracing_subscriber::registry().with(
        fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(true)
            .with_thread_names(false)
            .with_span_events(FmtSpan::CLOSE)
            .with_filter(module_filter)
            .with_filter(env_filter),
    );

    // Only set if we haven't already set a global subscriber
    if tracing::dispatcher::has_been_set() {
        debug!("Tracing subscriber already set");
    } else {
        subscriber.try_init().unwrap_or_else(|e| {
            eprintln!("Error: Failed to set up logging: {}", e);
        });
    }
}
