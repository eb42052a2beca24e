// src/infrastructure/mod.rs
pub mod config;
pub mod content_loader;
pub mod dish_loader;
pub mod image_codec;
pub mod renderer;
pub mod storage;

pub use config::Config;
pub use dish_loader::JsonDishSource;
pub use image_codec::WebpCodec;
pub use renderer::PageRenderer;
pub use storage::{FileKeyValueStore, KeyValueStore, LocalStorageRepository, MemoryKeyValueStore};
