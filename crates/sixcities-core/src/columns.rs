//! Fixed TSV column layout shared by the encoder, the parser and the validator.

pub const TITLE: &str = "title";
pub const DESCRIPTION: &str = "description";
pub const PUBLICATION_DATE: &str = "publicationDate";
pub const CITY: &str = "city";
pub const PREVIEW_IMAGE: &str = "previewImage";
pub const IMAGES: &str = "images";
pub const IS_PREMIUM: &str = "isPremium";
pub const IS_FAVORITE: &str = "isFavorite";
pub const RATING: &str = "rating";
pub const TYPE: &str = "type";
pub const ROOMS: &str = "rooms";
pub const GUESTS: &str = "guests";
pub const PRICE: &str = "price";
pub const AMENITIES: &str = "amenities";
pub const AUTHOR: &str = "author";
pub const LATITUDE: &str = "latitude";
pub const LONGITUDE: &str = "longitude";

/// Header order of every TSV file produced or consumed by the pipeline.
pub const TSV_COLUMNS: [&str; 17] = [
    TITLE,
    DESCRIPTION,
    PUBLICATION_DATE,
    CITY,
    PREVIEW_IMAGE,
    IMAGES,
    IS_PREMIUM,
    IS_FAVORITE,
    RATING,
    TYPE,
    ROOMS,
    GUESTS,
    PRICE,
    AMENITIES,
    AUTHOR,
    LATITUDE,
    LONGITUDE,
];

/// Joins image URLs inside the `images` cell.
pub const IMAGE_SEPARATOR: &str = "|";
/// Joins amenity names inside the `amenities` cell.
pub const AMENITY_SEPARATOR: &str = ";";
/// Number of images an imported offer must carry.
pub const IMAGE_COUNT: usize = 6;
