// src/application/dish_catalog.rs
use crate::domain::{Dish, DomainError};
use tracing::warn;

pub trait DishSource {
    fn load_dishes(&mut self) -> Result<Vec<Dish>, DomainError>;
}

/// What the dish page shows: the catalog, or the "unable to load" state.
#[derive(Debug, Clone, PartialEq)]
pub enum DishListing {
    Loaded(Vec<Dish>),
    Unavailable,
}

pub struct DishCatalog<S: DishSource> {
    source: S,
}

impl<S: DishSource> DishCatalog<S> {
    pub fn new(source: S) -> Self {
        Self { source }
    }

    /// Load once. Failures are logged and turned into [`DishListing::Unavailable`].
    pub fn load(&mut self) -> DishListing {
        match self.source.load_dishes() {
            Ok(dishes) => DishListing::Loaded(dishes),
            Err(e) => {
                warn!(error = %e, "Unable to load dish catalog");
                DishListing::Unavailable
            }
        }
    }
}
