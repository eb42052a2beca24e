// src/ports/html.rs
use crate::application::review_query::SortMode;
use crate::application::review_stats::ReviewStats;
use crate::application::BoardState;
use crate::constants::{ALL_CUISINES, EMPTY_STATE_MESSAGE, NO_TOP_CUISINE};
use crate::domain::Review;
use crate::util::text::{format_date, normalize, results_summary};
use clap::ValueEnum;
use html_escape::{encode_double_quoted_attribute, encode_text};
use tracing::instrument;

/// Markup cloned for every review card. Slots are filled with escaped text.
const REVIEW_CARD_TEMPLATE: &str = r#"<article class="review-card card">
    <header>
        <h3 class="restaurant">{restaurant}</h3>
        <span class="rating-badge">{rating}</span>
    </header>
    <p class="dish">{dish}</p>
    <p class="meta">{meta}</p>
    <p class="comment">{comment}</p>
    <p class="author">{author}</p>
</article>"#;

const STYLE: &str = r#"
        body {
            font-family: -apple-system, BlinkMacSystemFont, "Segoe UI", Roboto, sans-serif;
            line-height: 1.6;
            max-width: 1100px;
            margin: 2rem auto;
            padding: 0 1rem;
            background-color: #f5f5f5;
        }
        .card {
            background: white;
            border-radius: 8px;
            padding: 1.5rem;
            box-shadow: 0 2px 4px rgba(0,0,0,0.1);
        }
        #hero-stats {
            display: flex;
            gap: 1rem;
        }
        .hero-stat strong {
            display: block;
            font-size: 1.5em;
        }
        .controls {
            display: flex;
            gap: 1rem;
            margin: 1.5rem 0;
        }
        #review-grid {
            display: grid;
            grid-template-columns: repeat(auto-fill, minmax(280px, 1fr));
            gap: 1rem;
        }
        .rating-badge {
            background: #fff4d6;
            padding: 2px 8px;
            border-radius: 4px;
        }
        .meta, .author {
            color: #666;
            font-size: 0.9em;
        }
        .empty-state {
            grid-column: 1 / -1;
            text-align: center;
        }
"#;

#[derive(Debug, Default)]
pub struct HtmlPresenter;

impl HtmlPresenter {
    pub fn new() -> Self {
        Self
    }

    pub fn render_card(&self, review: &Review) -> String {
        let meta = format!(
            "{} • {} • {}",
            review.cuisine,
            review.neighborhood,
            format_date(&review.created_at)
        );
        fill_template(
            REVIEW_CARD_TEMPLATE,
            &[
                ("restaurant", encode_text(&review.restaurant).into_owned()),
                ("rating", format!("⭐ {}/5", review.rating)),
                ("dish", encode_text(&review.dish).into_owned()),
                ("meta", encode_text(&meta).into_owned()),
                ("comment", encode_text(&review.comment).into_owned()),
                (
                    "author",
                    encode_text(&format!("Reviewed by {}", review.reviewer)).into_owned(),
                ),
            ],
        )
    }

    /// Cards for the visible reviews, or the empty-state notice.
    pub fn render_review_grid(&self, visible: &[&Review]) -> String {
        if visible.is_empty() {
            return format!(r#"<p class="empty-state card">{EMPTY_STATE_MESSAGE}</p>"#);
        }
        visible
            .iter()
            .map(|review| self.render_card(review))
            .collect::<Vec<_>>()
            .join("\n")
    }

    pub fn render_hero_stats(&self, stats: &ReviewStats) -> String {
        let top = stats.top_cuisine.as_deref().unwrap_or(NO_TOP_CUISINE);
        [
            ("Total reviews", stats.total.to_string()),
            ("Average rating", format!("⭐ {:.1}", stats.average_rating)),
            ("Top cuisine", top.to_string()),
        ]
        .iter()
        .map(|(label, value)| {
            format!(
                r#"<article class="hero-stat"><strong>{}</strong><span>{label}</span></article>"#,
                encode_text(value)
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
    }

    pub fn render_cuisine_options(&self, cuisines: &[String], selected: &str) -> String {
        let selected = normalize(selected);
        let mut options = vec![option(ALL_CUISINES, "All cuisines", selected == ALL_CUISINES)];
        options.extend(
            cuisines
                .iter()
                .map(|c| option(c, c, normalize(c) == selected)),
        );
        options.join("\n")
    }

    pub fn render_sort_options(&self, selected: SortMode) -> String {
        SortMode::value_variants()
            .iter()
            .map(|mode| {
                let label = match mode {
                    SortMode::RatingDesc => "Highest rated",
                    SortMode::RatingAsc => "Lowest rated",
                    SortMode::Newest => "Newest",
                    SortMode::Oldest => "Oldest",
                };
                option(&mode.to_string(), label, *mode == selected)
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[instrument(level = "debug", skip_all, fields(reviews = state.reviews.len()))]
    pub fn render(&self, state: &BoardState) -> String {
        let visible = state.visible_reviews();

        format!(
            r#"<!DOCTYPE html>
<html>
<head>
    <meta charset="UTF-8">
    <title>BiteBoard reviews</title>
    <style>{style}</style>
</head>
<body>
    <section class="hero">
        <h1>BiteBoard</h1>
        <div id="hero-stats">
{hero_stats}
        </div>
    </section>
    <section class="controls">
        <input id="search" type="search" value="{search}" placeholder="Search restaurants, dishes, neighborhoods">
        <select id="cuisine-filter">
{cuisines}
        </select>
        <select id="sort">
{sorts}
        </select>
    </section>
    <p id="results-summary">{summary}</p>
    <section id="review-grid">
{grid}
    </section>
</body>
</html>"#,
            style = STYLE,
            hero_stats = self.render_hero_stats(&state.stats()),
            search = encode_double_quoted_attribute(&state.query.search_term),
            cuisines = self.render_cuisine_options(
                &state.cuisine_options(),
                state.query.cuisine.as_value()
            ),
            sorts = self.render_sort_options(state.query.sort_by),
            summary = results_summary(visible.len()),
            grid = self.render_review_grid(&visible),
        )
    }
}

/// Replace each `{slot}` in one pass, so slot values are never rescanned.
fn fill_template(template: &str, slots: &[(&str, String)]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;
    while let Some(start) = rest.find('{') {
        out.push_str(&rest[..start]);
        let after = &rest[start + 1..];
        let filled = after.find('}').and_then(|end| {
            let name = &after[..end];
            slots
                .iter()
                .find(|(slot, _)| *slot == name)
                .map(|(_, value)| (value, end))
        });
        match filled {
            Some((value, end)) => {
                out.push_str(value);
                rest = &after[end + 1..];
            }
            None => {
                out.push('{');
                rest = after;
            }
        }
    }
    out.push_str(rest);
    out
}

fn option(value: &str, label: &str, selected: bool) -> String {
    format!(
        r#"<option value="{}"{}>{}</option>"#,
        encode_double_quoted_attribute(value),
        if selected { " selected" } else { "" },
        encode_text(label)
    )
}
