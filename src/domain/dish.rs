// src/domain/dish.rs
use crate::constants::MAP_EMBED_BASE_URL;
use crate::domain::DomainError;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use serde::{Deserialize, Serialize};
use url::Url;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Dish {
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub rating: f64,
    pub image: DishImage,
    #[serde(default)]
    pub restaurants: Vec<RestaurantLocation>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RestaurantLocation {
    pub name: String,
    pub address: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub map_url: Option<String>,
}

impl RestaurantLocation {
    /// URL for the embedded map frame. Falls back to an address query when
    /// the record carries no explicit map URL.
    pub fn embed_url(&self) -> String {
        match self.map_url.as_deref().map(str::trim) {
            Some(url) if !url.is_empty() => url.to_string(),
            _ => Url::parse_with_params(
                MAP_EMBED_BASE_URL,
                &[("q", self.address.as_str()), ("output", "embed")],
            )
            .map(String::from)
            .unwrap_or_default(),
        }
    }
}

/// Image bytes decoded from the base64 payload of the dish document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct DishImage {
    bytes: Vec<u8>,
    mime_type: String,
}

impl DishImage {
    pub fn from_bytes(bytes: Vec<u8>) -> Self {
        let mime_type = infer::get(&bytes)
            .map(|kind| kind.mime_type().to_string())
            .unwrap_or_else(|| "application/octet-stream".to_string());
        Self { bytes, mime_type }
    }

    /// Decode a base64 payload, with or without a `data:` URI prefix.
    pub fn decode(encoded: &str) -> Result<Self, DomainError> {
        let payload = match encoded.split_once(";base64,") {
            Some((prefix, data)) if prefix.starts_with("data:") => data,
            _ => encoded,
        };
        let bytes = STANDARD
            .decode(payload.trim())
            .map_err(|e| DomainError::DishData(format!("image is not valid base64: {e}")))?;
        Ok(Self::from_bytes(bytes))
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn mime_type(&self) -> &str {
        &self.mime_type
    }

    pub fn data_uri(&self) -> String {
        format!("data:{};base64,{}", self.mime_type, STANDARD.encode(&self.bytes))
    }
}

impl TryFrom<String> for DishImage {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::decode(&value)
    }
}

impl From<DishImage> for String {
    fn from(image: DishImage) -> Self {
        STANDARD.encode(image.bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PNG_MAGIC: [u8; 8] = [0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];

    #[test]
    fn given_base64_png_when_decoding_then_sniffs_mime_type() {
        let encoded = STANDARD.encode(PNG_MAGIC);

        let image = DishImage::decode(&encoded).unwrap();

        assert_eq!(image.bytes(), &PNG_MAGIC);
        assert_eq!(image.mime_type(), "image/png");
        assert!(image.data_uri().starts_with("data:image/png;base64,"));
    }

    #[test]
    fn given_data_uri_when_decoding_then_strips_prefix() {
        let encoded = format!("data:image/png;base64,{}", STANDARD.encode(PNG_MAGIC));

        let image = DishImage::decode(&encoded).unwrap();

        assert_eq!(image.bytes(), &PNG_MAGIC);
    }

    #[test]
    fn given_garbage_when_decoding_then_returns_dish_data_error() {
        assert!(matches!(
            DishImage::decode("not base64 !!"),
            Err(DomainError::DishData(_))
        ));
    }

    #[test]
    fn given_explicit_map_url_when_embedding_then_uses_it() {
        let location = RestaurantLocation {
            name: "Taco Orbit".to_string(),
            address: "1 Market St".to_string(),
            map_url: Some("https://maps.example/embed?id=1".to_string()),
        };

        assert_eq!(location.embed_url(), "https://maps.example/embed?id=1");
    }

    #[test]
    fn given_missing_map_url_when_embedding_then_queries_address() {
        let location = RestaurantLocation {
            name: "Taco Orbit".to_string(),
            address: "1 Market St, San Francisco".to_string(),
            map_url: None,
        };

        let url = location.embed_url();

        assert!(url.starts_with(MAP_EMBED_BASE_URL));
        assert!(url.contains("q=1+Market+St%2C+San+Francisco"));
        assert!(url.ends_with("output=embed"));
    }
}
