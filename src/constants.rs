// src/constants.rs
//
// Application-wide constants. Image sizes and qualities are the defaults for
// `[images]` in the config file.

/// Local storage key holding the JSON-serialized review list.
/// The `-v1` suffix versions the stored record shape.
pub const STORAGE_KEY: &str = "biteboard-reviews-v1";

/// Config file looked up in the working directory when `--config` is absent.
pub const DEFAULT_CONFIG_FILE: &str = "biteboard.toml";

/// Reviewer name used when the form leaves it blank.
pub const ANONYMOUS_REVIEWER: &str = "Anonymous";

/// Selector value meaning "no cuisine filter".
pub const ALL_CUISINES: &str = "all";

/// Shown in the hero stats when there is no review to pick a cuisine from.
pub const NO_TOP_CUISINE: &str = "-";

pub const EMPTY_STATE_MESSAGE: &str =
    "No matching reviews yet. Try changing filters or add your own review.";

pub const DISHES_UNAVAILABLE_MESSAGE: &str = "Unable to load dishes right now.";

pub const MAP_EMBED_BASE_URL: &str = "https://www.google.com/maps";

pub const LARGE_WIDTH: u32 = 1200;
pub const SMALL_WIDTH: u32 = 400;
pub const LARGE_QUALITY: f32 = 75.0;
pub const SMALL_QUALITY: f32 = 65.0;

/// Placeholder canvas and encoding settings.
///
/// Used in: `application/image_pipeline.rs`, `infrastructure/image_codec.rs`
pub const PLACEHOLDER_WIDTH: u32 = 1200;
pub const PLACEHOLDER_HEIGHT: u32 = 800;
pub const PLACEHOLDER_LARGE_QUALITY: f32 = 80.0;
pub const PLACEHOLDER_SMALL_QUALITY: f32 = 70.0;
pub const PLACEHOLDER_BACKGROUND: &str = "#0f172a";
pub const PLACEHOLDER_FOREGROUND: &str = "#e5e7eb";
pub const PLACEHOLDER_FONT_SIZE: u32 = 72;

/// Suffix appended to the file stem of the low-resolution variant.
pub const SMALL_SUFFIX: &str = "-small";

/// Delay in milliseconds after handing the HTML file to the browser.
///
/// The page lives in a temp dir owned by the renderer and is removed when the
/// process exits, so the browser must have read it by then.
///
/// Used in: `infrastructure/renderer.rs`
pub const BROWSER_LAUNCH_DELAY_MS: u64 = 500;
