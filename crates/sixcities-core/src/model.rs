use serde::{Deserialize, Serialize};

use crate::types::{Amenity, City, HomeType};

/// Hand-authored seed used to parameterize offer generation.
///
/// `images` and `amenities` stay optional here so that a template missing
/// them still loads and can be rejected by the generator with a precise error.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TemplateItem {
    pub title: String,
    pub description: String,
    pub city: City,
    pub preview_image: String,
    #[serde(default)]
    pub images: Option<Vec<String>>,
    #[serde(default)]
    pub amenities: Option<Vec<String>>,
    #[serde(rename = "type")]
    pub home_type: HomeType,
    pub rooms: u32,
    pub guests: u32,
    pub price: u32,
    #[serde(default)]
    pub is_premium: Option<bool>,
}

/// Canonical rental offer record, built by the generator or the validator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RentalOffer {
    pub title: String,
    pub description: String,
    /// ISO-8601 timestamp; kept as text so imported values pass through untouched.
    pub publication_date: String,
    pub city: City,
    pub preview_image: String,
    pub images: Vec<String>,
    pub is_premium: bool,
    pub is_favorite: bool,
    pub rating: f64,
    #[serde(rename = "type")]
    pub home_type: HomeType,
    pub rooms: u32,
    pub guests: u32,
    pub price: u32,
    pub amenities: Vec<Amenity>,
    pub author: String,
    pub comments_count: u32,
    pub latitude: f64,
    pub longitude: f64,
}

/// Round `value` half away from zero to `decimals` fractional digits.
pub fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10_f64.powi(decimals);
    (value * factor).round() / factor
}
