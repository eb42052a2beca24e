// src/domain/content.rs
//
// Dish content documents: markdown with a YAML front matter block.
use crate::domain::DomainError;
use chrono::{DateTime, NaiveDate, Utc};
use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

lazy_static! {
    static ref FRONT_MATTER_REGEX: Regex = Regex::new(r"(?s)^---\s*\n(.*?)\n---[ \t]*(?:\r?\n|$)")
        .expect("Failed to compile front matter regex");

    static ref LOCATION_REGEX: Regex = Regex::new(r"^-?\d+(\.\d+)?,-?\d+(\.\d+)?$")
        .expect("Failed to compile location regex");
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GeoPoint {
    pub lat: f64,
    pub lon: f64,
}

impl FromStr for GeoPoint {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if !LOCATION_REGEX.is_match(s) {
            return Err(DomainError::InvalidLocation(s.to_string()));
        }
        let (lat, lon) = s
            .split_once(',')
            .ok_or_else(|| DomainError::InvalidLocation(s.to_string()))?;
        let parse = |v: &str| {
            v.parse::<f64>()
                .map_err(|_| DomainError::InvalidLocation(s.to_string()))
        };
        Ok(Self {
            lat: parse(lat)?,
            lon: parse(lon)?,
        })
    }
}

impl fmt::Display for GeoPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.lat, self.lon)
    }
}

/// Front matter exactly as written in the document.
#[derive(Debug, Deserialize)]
struct RawFrontMatter {
    name: String,
    restaurant: String,
    rating: f64,
    date: String,
    #[serde(default)]
    tags: Vec<String>,
    image: String,
    locations: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DishFrontMatter {
    pub name: String,
    pub restaurant: String,
    pub rating: f64,
    pub date: DateTime<Utc>,
    pub tags: Vec<String>,
    pub image: String,
    pub locations: Vec<GeoPoint>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DishDocument {
    pub front_matter: DishFrontMatter,
    pub body: String,
}

impl DishDocument {
    pub fn parse(source: &str) -> Result<Self, DomainError> {
        let caps = FRONT_MATTER_REGEX
            .captures(source)
            .ok_or_else(|| DomainError::InvalidContent("missing front matter".to_string()))?;
        let (Some(yaml), Some(whole)) = (caps.get(1), caps.get(0)) else {
            return Err(DomainError::InvalidContent("missing front matter".to_string()));
        };

        let raw: RawFrontMatter = serde_yaml::from_str(yaml.as_str())
            .map_err(|e| DomainError::InvalidContent(e.to_string()))?;

        Ok(Self {
            front_matter: raw.validate()?,
            body: source[whole.end()..].to_string(),
        })
    }
}

impl RawFrontMatter {
    fn validate(self) -> Result<DishFrontMatter, DomainError> {
        if !(0.0..=5.0).contains(&self.rating) {
            return Err(DomainError::InvalidRating(format!(
                "{} is outside 0..=5",
                self.rating
            )));
        }
        let locations = self
            .locations
            .iter()
            .map(|l| l.parse::<GeoPoint>())
            .collect::<Result<Vec<_>, _>>()?;

        Ok(DishFrontMatter {
            name: self.name,
            restaurant: self.restaurant,
            rating: self.rating,
            date: coerce_date(&self.date)?,
            tags: self.tags,
            image: self.image,
            locations,
        })
    }
}

/// Accepts a full RFC 3339 timestamp or a bare `YYYY-MM-DD` date (midnight UTC).
fn coerce_date(value: &str) -> Result<DateTime<Utc>, DomainError> {
    let value = value.trim();
    if let Ok(ts) = DateTime::parse_from_rfc3339(value) {
        return Ok(ts.with_timezone(&Utc));
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|dt| dt.and_utc())
        .ok_or_else(|| DomainError::InvalidContent(format!("invalid date '{value}'")))
}
