// src/ports/dish_html.rs
use crate::application::DishListing;
use crate::constants::DISHES_UNAVAILABLE_MESSAGE;
use crate::domain::{Dish, RestaurantLocation};
use html_escape::{encode_double_quoted_attribute, encode_text};

#[derive(Debug, Default)]
pub struct DishPresenter;

impl DishPresenter {
    pub fn new() -> Self {
        Self
    }

    fn render_location(&self, location: &RestaurantLocation) -> String {
        format!(
            r#"<li class="restaurant">
            <strong>{name}</strong>
            <span class="address">{address}</span>
            <iframe class="map" src="{src}" title="Map of {title}" loading="lazy" referrerpolicy="no-referrer-when-downgrade"></iframe>
        </li>"#,
            name = encode_text(&location.name),
            address = encode_text(&location.address),
            src = encode_double_quoted_attribute(&location.embed_url()),
            title = encode_double_quoted_attribute(&location.name),
        )
    }

    pub fn render_dish(&self, dish: &Dish) -> String {
        let locations = dish
            .restaurants
            .iter()
            .map(|l| self.render_location(l))
            .collect::<Vec<_>>()
            .join("\n");

        format!(
            r#"<article class="dish-card card">
    <img src="{src}" alt="{alt}">
    <h2>{name}</h2>
    <span class="rating-badge">⭐ {rating:.1}</span>
    <p class="description">{description}</p>
    <ul class="restaurants">
        {locations}
    </ul>
</article>"#,
            src = dish.image.data_uri(),
            alt = encode_double_quoted_attribute(&dish.name),
            name = encode_text(&dish.name),
            rating = dish.rating,
            description = encode_text(&dish.description),
        )
    }

    /// The listing body: dish cards, or the static notice when loading failed.
    pub fn render_listing(&self, listing: &DishListing) -> String {
        match listing {
            DishListing::Loaded(dishes) => dishes
                .iter()
                .map(|d| self.render_dish(d))
                .collect::<Vec<_>>()
                .join("\n"),
            DishListing::Unavailable => {
                format!(r#"<p class="error-state card">{DISHES_UNAVAILABLE_MESSAGE}</p>"#)
            }
        }
    }

    pub fn render(&self, listing: &DishListing) -> String {
        format!(
            r#"<!DOCTYPE html>
<html>
<head>
    <meta charset="UTF-8">
    <title>BiteBoard dishes</title>
    <style>
        body {{
            font-family: -apple-system, BlinkMacSystemFont, "Segoe UI", Roboto, sans-serif;
            max-width: 900px;
            margin: 2rem auto;
            padding: 0 1rem;
            background-color: #f5f5f5;
        }}
        .card {{
            background: white;
            border-radius: 8px;
            padding: 1.5rem;
            margin-bottom: 1.5rem;
            box-shadow: 0 2px 4px rgba(0,0,0,0.1);
        }}
        .dish-card img {{
            width: 100%;
            border-radius: 6px;
        }}
        .map {{
            width: 100%;
            height: 220px;
            border: 0;
        }}
    </style>
</head>
<body>
    <h1>Dishes</h1>
    <section id="dish-list">
{listing}
    </section>
</body>
</html>"#,
            listing = self.render_listing(listing),
        )
    }
}
