// src/lib.rs
pub mod application;
pub mod cli;
pub mod constants;
pub mod domain;
pub mod infrastructure;
pub mod ports;
pub mod util;

use crate::application::{
    CuisineFilter, DishCatalog, ImagePipeline, ReviewForm, ReviewQuery, ReviewStore,
};
use crate::cli::args::{Args, Command, QueryArgs};
use crate::infrastructure::content_loader::load_documents;
use crate::infrastructure::{
    Config, FileKeyValueStore, JsonDishSource, LocalStorageRepository, PageRenderer, WebpCodec,
};
use crate::ports::{DishPresenter, HtmlPresenter};
use crate::util::text::results_summary;
use anyhow::{bail, Context, Result};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

type FileReviewStore = ReviewStore<LocalStorageRepository<FileKeyValueStore>>;

pub fn run(args: Args) -> Result<()> {
    debug!(?args, "Starting biteboard with arguments");

    let mut config = Config::discover(args.config.as_deref())?;
    if let Some(path) = args.storage {
        debug!(?path, "Using provided storage path");
        config.storage.path = path;
    }

    match args.command {
        Command::List { query, json } => list_reviews(&config, query, json),
        Command::Stats { json } => show_stats(&config, json),
        Command::Add {
            restaurant,
            dish,
            cuisine,
            neighborhood,
            rating,
            comment,
            reviewer,
        } => add_review(
            &config,
            ReviewForm {
                reviewer,
                restaurant,
                dish,
                cuisine,
                neighborhood,
                rating,
                comment,
            },
        ),
        Command::Render {
            query,
            output,
            open,
        } => render_reviews(&config, query, output, open),
        Command::Dishes { data, output, open } => {
            let data = data.unwrap_or_else(|| config.dishes.data.clone());
            render_dishes(&data, output, open)
        }
        Command::Images { force } => process_images(&config, force),
        Command::Validate { dir } => {
            let dir = dir.unwrap_or_else(|| config.images.content_dir.clone());
            validate_content(&dir)
        }
    }
}

/// Open the review board backed by the configured storage file.
pub fn open_store(config: &Config) -> FileReviewStore {
    debug!(path = ?config.storage.path, key = %config.storage.key, "Opening review storage");
    let store = FileKeyValueStore::new(&config.storage.path);
    ReviewStore::open(LocalStorageRepository::new(store, config.storage.key.clone()))
}

impl From<QueryArgs> for ReviewQuery {
    fn from(args: QueryArgs) -> Self {
        let cuisine = match args.cuisine.parse::<CuisineFilter>() {
            Ok(filter) => filter,
            Err(never) => match never {},
        };
        Self {
            search_term: args.search,
            cuisine,
            sort_by: args.sort,
        }
    }
}

fn list_reviews(config: &Config, query: QueryArgs, json: bool) -> Result<()> {
    let mut store = open_store(config);
    store.set_query(query.into());
    let visible = store.state().visible_reviews();

    if json {
        let output =
            serde_json::to_string_pretty(&visible).context("Failed to serialize reviews")?;
        println!("{output}");
        return Ok(());
    }

    println!("{}", results_summary(visible.len()));
    for review in visible {
        println!(
            "{}\t{}/5\t{} - {} ({}, {})",
            review.id,
            review.rating,
            review.restaurant,
            review.dish,
            review.cuisine,
            review.neighborhood
        );
    }
    Ok(())
}

fn show_stats(config: &Config, json: bool) -> Result<()> {
    let stats = open_store(config).state().stats();

    if json {
        let output = serde_json::to_string_pretty(&stats).context("Failed to serialize stats")?;
        println!("{output}");
        return Ok(());
    }

    println!("Total reviews: {}", stats.total);
    println!("Average rating: {:.1}", stats.average_rating);
    println!(
        "Top cuisine: {}",
        stats
            .top_cuisine
            .as_deref()
            .unwrap_or(constants::NO_TOP_CUISINE)
    );
    Ok(())
}

fn add_review(config: &Config, form: ReviewForm) -> Result<()> {
    let mut store = open_store(config);
    match store.submit(form).context("Failed to save review")? {
        Some(review) => println!("{}", review.id),
        None => debug!("Submission incomplete, nothing saved"),
    }
    Ok(())
}

fn render_reviews(
    config: &Config,
    query: QueryArgs,
    output: Option<PathBuf>,
    open: bool,
) -> Result<()> {
    let mut store = open_store(config);
    store.set_query(query.into());

    let html = HtmlPresenter::new().render(store.state());
    publish_page(&html, "reviews.html", output, open)
}

fn render_dishes(data: &Path, output: Option<PathBuf>, open: bool) -> Result<()> {
    info!(?data, "Loading dishes");
    let listing = DishCatalog::new(JsonDishSource::new(data)).load();

    let html = DishPresenter::new().render(&listing);
    publish_page(&html, "dishes.html", output, open)
}

fn publish_page(html: &str, file_name: &str, output: Option<PathBuf>, open: bool) -> Result<()> {
    let mut renderer = PageRenderer::new();
    let path = match output {
        Some(path) => renderer.write_to(path, html)?,
        None => renderer.create_temp_file(file_name, html)?,
    };
    println!("{}", path.display());

    if open {
        renderer.open_in_browser(&path)?;
    }
    Ok(())
}

fn process_images(config: &Config, force: bool) -> Result<()> {
    let pipeline =
        ImagePipeline::new(WebpCodec::new(), config.images.pipeline_config()).force(force);
    let report = pipeline.run()?;
    debug!(?report, "Image pipeline finished");
    Ok(())
}

fn validate_content(dir: &Path) -> Result<()> {
    let outcomes = load_documents(dir)?;
    let mut failures = 0;
    for (path, outcome) in &outcomes {
        match outcome {
            Ok(document) => {
                debug!(?path, name = %document.front_matter.name, "Valid content document");
            }
            Err(e) => {
                failures += 1;
                warn!(?path, error = %e, "Invalid content document");
                eprintln!("{}: {e}", path.display());
            }
        }
    }

    info!(checked = outcomes.len(), failures, "Validated content");
    if failures > 0 {
        bail!("{failures} of {} content document(s) invalid", outcomes.len());
    }
    Ok(())
}

#[cfg(test)]
/// must be public to be used from integration tests
mod tests {
    use super::*;
    use crate::application::SortMode;
    use crate::util::testing;

    #[ctor::ctor]
    fn init() {
        testing::init_test_setup().expect("Failed to initialize test setup");
    }

    #[test]
    fn given_all_cuisine_argument_when_converting_then_query_has_no_filter() {
        let args = QueryArgs {
            search: "taco".to_string(),
            cuisine: "all".to_string(),
            sort: SortMode::Newest,
        };

        let query = ReviewQuery::from(args);

        assert_eq!(query.cuisine, CuisineFilter::All);
        assert_eq!(query.search_term, "taco");
        assert_eq!(query.sort_by, SortMode::Newest);
    }

    #[test]
    fn given_named_cuisine_when_converting_then_query_filters_on_it() {
        let args = QueryArgs {
            cuisine: "Thai".to_string(),
            ..QueryArgs::default()
        };

        let query = ReviewQuery::from(args);

        assert_eq!(query.cuisine, CuisineFilter::Only("Thai".to_string()));
    }

    #[test]
    fn given_empty_content_dir_when_validating_then_succeeds() {
        let temp_dir = tempfile::TempDir::new().unwrap();

        assert!(validate_content(temp_dir.path()).is_ok());
    }

    #[test]
    fn given_invalid_document_when_validating_then_fails() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        std::fs::write(temp_dir.path().join("bad.md"), "---\nname: X\n---\n").unwrap();

        assert!(validate_content(temp_dir.path()).is_err());
    }
}
