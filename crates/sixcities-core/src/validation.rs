use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::columns::{
    AMENITIES, AMENITY_SEPARATOR, AUTHOR, CITY, DESCRIPTION, GUESTS, IMAGE_COUNT, IMAGE_SEPARATOR,
    IMAGES, IS_FAVORITE, IS_PREMIUM, LATITUDE, LONGITUDE, PREVIEW_IMAGE, PRICE, PUBLICATION_DATE,
    RATING, ROOMS, TITLE, TYPE,
};
use crate::model::{RentalOffer, round_to};
use crate::row::RawRow;
use crate::types::{Amenity, City, HomeType};

const TITLE_LENGTH: (usize, usize) = (10, 100);
const DESCRIPTION_LENGTH: (usize, usize) = (20, 1024);
const RATING_RANGE: (f64, f64) = (1.0, 5.0);
const ROOMS_RANGE: (u32, u32) = (1, 8);
const GUESTS_RANGE: (u32, u32) = (1, 10);
const PRICE_RANGE: (u32, u32) = (100, 100_000);
const TRUTHY: [&str; 4] = ["true", "1", "yes", "y"];

/// Field-level validation problem.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationIssue {
    pub field: String,
    pub message: String,
}

impl ValidationIssue {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

/// Outcome of validating one row.
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationResult {
    Valid(RentalOffer),
    /// Always non-empty, in field order.
    Invalid(Vec<ValidationIssue>),
}

impl ValidationResult {
    pub fn is_valid(&self) -> bool {
        matches!(self, ValidationResult::Valid(_))
    }

    pub fn offer(&self) -> Option<&RentalOffer> {
        match self {
            ValidationResult::Valid(offer) => Some(offer),
            ValidationResult::Invalid(_) => None,
        }
    }

    pub fn issues(&self) -> &[ValidationIssue] {
        match self {
            ValidationResult::Valid(_) => &[],
            ValidationResult::Invalid(issues) => issues,
        }
    }
}

/// Validate and coerce a raw row into a rental offer.
///
/// Every field rule runs regardless of earlier failures, so the returned
/// issue list covers the whole row. Unknown amenity tokens are dropped and
/// boolean flags never fail.
pub fn validate_row(row: &RawRow) -> ValidationResult {
    let mut issues = Vec::new();

    let title = bounded_text(row, TITLE, TITLE_LENGTH, &mut issues);
    let description = bounded_text(row, DESCRIPTION, DESCRIPTION_LENGTH, &mut issues);
    let publication_date = required(row, PUBLICATION_DATE, &mut issues);
    let city = city(row, &mut issues);
    let images = images(row, &mut issues);
    let preview_image = required(row, PREVIEW_IMAGE, &mut issues);
    let is_premium = flag(row, IS_PREMIUM);
    let is_favorite = flag(row, IS_FAVORITE);
    let rating = rating(row, &mut issues);
    let home_type = home_type(row, &mut issues);
    let rooms = bounded_int(row, ROOMS, ROOMS_RANGE, &mut issues);
    let guests = bounded_int(row, GUESTS, GUESTS_RANGE, &mut issues);
    let price = bounded_int(row, PRICE, PRICE_RANGE, &mut issues);
    let amenities = amenities(row);
    let author = required(row, AUTHOR, &mut issues);
    let latitude = number(row, LATITUDE, &mut issues);
    let longitude = number(row, LONGITUDE, &mut issues);

    let (
        Some(title),
        Some(description),
        Some(publication_date),
        Some(city),
        Some(images),
        Some(preview_image),
        Some(rating),
        Some(home_type),
        Some(rooms),
        Some(guests),
        Some(price),
        Some(author),
        Some(latitude),
        Some(longitude),
    ) = (
        title,
        description,
        publication_date,
        city,
        images,
        preview_image,
        rating,
        home_type,
        rooms,
        guests,
        price,
        author,
        latitude,
        longitude,
    )
    else {
        debug_assert!(!issues.is_empty());
        return ValidationResult::Invalid(issues);
    };

    if !issues.is_empty() {
        return ValidationResult::Invalid(issues);
    }

    ValidationResult::Valid(RentalOffer {
        title,
        description,
        publication_date,
        city,
        preview_image,
        images,
        is_premium,
        is_favorite,
        rating: round_to(rating, 1),
        home_type,
        rooms,
        guests,
        price,
        amenities,
        author,
        comments_count: 0,
        latitude,
        longitude,
    })
}

/// Non-blank cell value; whitespace-only counts as missing.
fn present<'a>(row: &'a RawRow, field: &str) -> Option<&'a str> {
    row.get(field).filter(|value| !value.trim().is_empty())
}

fn required(row: &RawRow, field: &str, issues: &mut Vec<ValidationIssue>) -> Option<String> {
    match present(row, field) {
        Some(value) => Some(value.to_string()),
        None => {
            issues.push(ValidationIssue::new(field, format!("{field} is required")));
            None
        }
    }
}

fn bounded_text(
    row: &RawRow,
    field: &str,
    (min, max): (usize, usize),
    issues: &mut Vec<ValidationIssue>,
) -> Option<String> {
    let value = required(row, field, issues)?;
    let length = value.chars().count();
    if length < min || length > max {
        issues.push(ValidationIssue::new(
            field,
            format!("{field} length must be between {min} and {max} characters, got {length}"),
        ));
        return None;
    }
    Some(value)
}

fn city(row: &RawRow, issues: &mut Vec<ValidationIssue>) -> Option<City> {
    let value = required(row, CITY, issues)?;
    match City::from_str(value.trim()) {
        Ok(city) => Some(city),
        Err(_) => {
            let allowed = City::ALL.map(City::as_str).join(", ");
            issues.push(ValidationIssue::new(
                CITY,
                format!("city must be one of {allowed}, got '{value}'"),
            ));
            None
        }
    }
}

fn images(row: &RawRow, issues: &mut Vec<ValidationIssue>) -> Option<Vec<String>> {
    let value = required(row, IMAGES, issues)?;
    let images: Vec<String> = value
        .split(IMAGE_SEPARATOR)
        .map(|image| image.trim().to_string())
        .collect();
    let non_empty = images.iter().filter(|image| !image.is_empty()).count();
    if images.len() != IMAGE_COUNT || non_empty != IMAGE_COUNT {
        issues.push(ValidationIssue::new(
            IMAGES,
            format!(
                "images must contain exactly {IMAGE_COUNT} non-empty URLs separated by '{IMAGE_SEPARATOR}', got {non_empty}"
            ),
        ));
        return None;
    }
    Some(images)
}

fn flag(row: &RawRow, field: &str) -> bool {
    row.get(field)
        .map(|value| {
            let value = value.trim();
            TRUTHY.iter().any(|token| value.eq_ignore_ascii_case(token))
        })
        .unwrap_or(false)
}

fn number(row: &RawRow, field: &str, issues: &mut Vec<ValidationIssue>) -> Option<f64> {
    let parsed = row
        .get(field)
        .and_then(|value| value.trim().parse::<f64>().ok())
        .filter(|value| value.is_finite());
    if parsed.is_none() {
        issues.push(ValidationIssue::new(field, format!("{field} must be a number")));
    }
    parsed
}

fn rating(row: &RawRow, issues: &mut Vec<ValidationIssue>) -> Option<f64> {
    let value = number(row, RATING, issues)?;
    let (min, max) = RATING_RANGE;
    if !(min..=max).contains(&value) {
        issues.push(ValidationIssue::new(
            RATING,
            format!("rating must be between {min} and {max}, got {value}"),
        ));
        return None;
    }
    Some(value)
}

fn home_type(row: &RawRow, issues: &mut Vec<ValidationIssue>) -> Option<HomeType> {
    let value = row.get(TYPE).unwrap_or_default().trim();
    match HomeType::from_str(value) {
        Ok(home_type) => Some(home_type),
        Err(_) => {
            let allowed = HomeType::ALL.map(HomeType::as_str).join(", ");
            issues.push(ValidationIssue::new(
                TYPE,
                format!("type must be one of {allowed}, got '{value}'"),
            ));
            None
        }
    }
}

fn bounded_int(
    row: &RawRow,
    field: &str,
    (min, max): (u32, u32),
    issues: &mut Vec<ValidationIssue>,
) -> Option<u32> {
    let Some(value) = row
        .get(field)
        .and_then(|value| value.trim().parse::<i64>().ok())
    else {
        issues.push(ValidationIssue::new(field, format!("{field} must be an integer")));
        return None;
    };

    if value < i64::from(min) || value > i64::from(max) {
        issues.push(ValidationIssue::new(
            field,
            format!("{field} must be between {min} and {max}, got {value}"),
        ));
        return None;
    }
    u32::try_from(value).ok()
}

fn amenities(row: &RawRow) -> Vec<Amenity> {
    row.get(AMENITIES)
        .unwrap_or_default()
        .split(|c: char| AMENITY_SEPARATOR.contains(c) || IMAGE_SEPARATOR.contains(c))
        .filter_map(|token| Amenity::from_str(token.trim()).ok())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_pairs() -> Vec<(&'static str, String)> {
        vec![
            (TITLE, "Cozy small flat".to_string()),
            (DESCRIPTION, "Bright flat close to the old town".to_string()),
            (PUBLICATION_DATE, "2026-03-01T10:00:00.000Z".to_string()),
            (CITY, "Paris".to_string()),
            (PREVIEW_IMAGE, "https://example.com/preview.jpg".to_string()),
            (
                IMAGES,
                (1..=6)
                    .map(|idx| format!("https://example.com/{idx}.jpg"))
                    .collect::<Vec<_>>()
                    .join("|"),
            ),
            (IS_PREMIUM, "false".to_string()),
            (IS_FAVORITE, "true".to_string()),
            (RATING, "4.26".to_string()),
            (TYPE, "apartment".to_string()),
            (ROOMS, "2".to_string()),
            (GUESTS, "4".to_string()),
            (PRICE, "1500".to_string()),
            (AMENITIES, "Breakfast;Washer".to_string()),
            (AUTHOR, "https://example.com/users/7".to_string()),
            (LATITUDE, "48.85661".to_string()),
            (LONGITUDE, "2.351499".to_string()),
        ]
    }

    fn row_with(overrides: &[(&str, &str)]) -> RawRow {
        RawRow::from_pairs(valid_pairs().into_iter().map(|(key, value)| {
            let value = overrides
                .iter()
                .find(|(name, _)| *name == key)
                .map(|(_, value)| value.to_string())
                .unwrap_or(value);
            (key, value)
        }))
    }

    fn issue_fields(result: &ValidationResult) -> Vec<&str> {
        result.issues().iter().map(|issue| issue.field.as_str()).collect()
    }

    #[test]
    fn valid_row_builds_offer() {
        let result = validate_row(&row_with(&[]));
        let offer = result.offer().expect("row should validate");
        assert_eq!(offer.rating, 4.3);
        assert_eq!(offer.comments_count, 0);
        assert_eq!(offer.amenities, vec![Amenity::Breakfast, Amenity::Washer]);
        assert!(offer.is_favorite);
        assert!(!offer.is_premium);
    }

    #[test]
    fn absent_flag_columns_default_to_false() {
        let row = RawRow::from_pairs(
            valid_pairs()
                .into_iter()
                .filter(|(key, _)| *key != IS_PREMIUM && *key != IS_FAVORITE),
        );
        assert_eq!(row.get(IS_PREMIUM), None);

        let result = validate_row(&row);
        assert!(result.is_valid());
        let offer = result.offer().expect("row should validate");
        assert!(!offer.is_premium);
        assert!(!offer.is_favorite);
    }

    #[test]
    fn short_title_reports_length() {
        let result = validate_row(&row_with(&[(TITLE, "Cozy flat")]));
        let issues = result.issues();
        assert_eq!(issues.len(), 1);
        assert!(issues[0].message.contains("title length"));
    }

    #[test]
    fn whitespace_counts_as_missing() {
        let result = validate_row(&row_with(&[(AUTHOR, "   ")]));
        assert_eq!(issue_fields(&result), vec![AUTHOR]);
    }

    #[test]
    fn integer_rules_reject_fractions_and_bounds() {
        let result = validate_row(&row_with(&[(ROOMS, "2.5"), (GUESTS, "11"), (PRICE, "99")]));
        assert_eq!(issue_fields(&result), vec![ROOMS, GUESTS, PRICE]);
        assert!(result.issues()[0].message.contains("integer"));
    }

    #[test]
    fn non_finite_numbers_are_rejected() {
        let result = validate_row(&row_with(&[(LATITUDE, "NaN"), (LONGITUDE, "inf")]));
        assert_eq!(issue_fields(&result), vec![LATITUDE, LONGITUDE]);
    }

    #[test]
    fn images_need_six_non_empty_entries() {
        let result = validate_row(&row_with(&[(IMAGES, "a|b|c|d|e|")]));
        assert_eq!(issue_fields(&result), vec![IMAGES]);
        let result = validate_row(&row_with(&[(IMAGES, "a|b|c|d|e|f|g")]));
        assert_eq!(issue_fields(&result), vec![IMAGES]);
    }

    #[test]
    fn rating_bounds_are_inclusive() {
        assert!(validate_row(&row_with(&[(RATING, "1")])).is_valid());
        assert!(validate_row(&row_with(&[(RATING, "5")])).is_valid());
        let result = validate_row(&row_with(&[(RATING, "5.01")]));
        assert_eq!(issue_fields(&result), vec![RATING]);
    }

    #[test]
    fn amenities_accept_both_separators_and_drop_unknown() {
        let result = validate_row(&row_with(&[(AMENITIES, " Towels | Sauna;Fridge ;")]));
        let offer = result.offer().expect("row should validate");
        assert_eq!(offer.amenities, vec![Amenity::Towels, Amenity::Fridge]);
    }
}
