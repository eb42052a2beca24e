// src/application/mod.rs
pub mod dish_catalog;
pub mod image_pipeline;
pub mod review_form;
pub mod review_query;
pub mod review_stats;
pub mod review_store;

pub use dish_catalog::{DishCatalog, DishListing, DishSource};
pub use image_pipeline::{ImageCodec, ImagePipeline, ImagePipelineConfig, PipelineReport, Variant};
pub use review_form::ReviewForm;
pub use review_query::{filter_reviews, CuisineFilter, ReviewQuery, SortMode};
pub use review_stats::ReviewStats;
pub use review_store::{BoardState, ReviewRepository, ReviewStore};
