// src/ports/mod.rs
pub mod dish_html;
pub mod html;

pub use dish_html::DishPresenter;
pub use html::HtmlPresenter;
