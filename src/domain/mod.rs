// src/domain/mod.rs
pub mod content;
pub mod dish;
pub mod error;
pub mod review;

pub use content::{DishDocument, DishFrontMatter, GeoPoint};
pub use dish::{Dish, DishImage, RestaurantLocation};
pub use error::DomainError;
pub use review::{Rating, Review};
