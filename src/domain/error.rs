// src/domain/error.rs
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Invalid rating: {0}")]
    InvalidRating(String),
    #[error("Invalid location '{0}': expected \"lat,lon\"")]
    InvalidLocation(String),
    #[error("Invalid content document: {0}")]
    InvalidContent(String),
    #[error("Storage error: {0}")]
    Storage(String),
    #[error("Dish data error: {0}")]
    DishData(String),
    #[error("Image error: {0}")]
    Image(String),
}
