// src/infrastructure/dish_loader.rs
use crate::application::dish_catalog::DishSource;
use crate::domain::{Dish, DomainError};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::{debug, instrument};

/// The static dish document is either a bare list or `{ "dishes": [...] }`.
#[derive(Deserialize)]
#[serde(untagged)]
enum CatalogDocument {
    List(Vec<Dish>),
    Wrapped { dishes: Vec<Dish> },
}

#[derive(Debug, Clone)]
pub struct JsonDishSource {
    path: PathBuf,
}

impl JsonDishSource {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }
}

impl DishSource for JsonDishSource {
    #[instrument(level = "debug", skip(self), fields(path = %self.path.display()))]
    fn load_dishes(&mut self) -> Result<Vec<Dish>, DomainError> {
        let content = std::fs::read_to_string(&self.path).map_err(|e| {
            DomainError::DishData(format!("Failed to read {}: {e}", self.path.display()))
        })?;
        let document: CatalogDocument = serde_json::from_str(&content).map_err(|e| {
            DomainError::DishData(format!("Failed to parse {}: {e}", self.path.display()))
        })?;
        let dishes = match document {
            CatalogDocument::List(dishes) | CatalogDocument::Wrapped { dishes } => dishes,
        };
        debug!(count = dishes.len(), "Loaded dishes");
        Ok(dishes)
    }
}
