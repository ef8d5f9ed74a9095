use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::Error;

/// Geographic point in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

/// One of the six cities an offer can be published in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum City {
    Paris,
    Cologne,
    Brussels,
    Amsterdam,
    Hamburg,
    Dusseldorf,
}

impl City {
    pub const ALL: [City; 6] = [
        City::Paris,
        City::Cologne,
        City::Brussels,
        City::Amsterdam,
        City::Hamburg,
        City::Dusseldorf,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Paris => "Paris",
            Self::Cologne => "Cologne",
            Self::Brussels => "Brussels",
            Self::Amsterdam => "Amsterdam",
            Self::Hamburg => "Hamburg",
            Self::Dusseldorf => "Dusseldorf",
        }
    }

    /// Base coordinate used to place generated offers.
    pub fn coordinates(self) -> Coordinates {
        let (latitude, longitude) = match self {
            Self::Paris => (48.85661, 2.351499),
            Self::Cologne => (50.938361, 6.959974),
            Self::Brussels => (50.846557, 4.351697),
            Self::Amsterdam => (52.370216, 4.895168),
            Self::Hamburg => (53.550341, 10.000654),
            Self::Dusseldorf => (51.225402, 6.776314),
        };
        Coordinates {
            latitude,
            longitude,
        }
    }
}

impl fmt::Display for City {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for City {
    type Err = Error;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        City::ALL
            .into_iter()
            .find(|city| city.as_str() == value)
            .ok_or_else(|| Error::UnknownVariant {
                kind: "city",
                value: value.to_string(),
            })
    }
}

/// Kind of housing being offered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HomeType {
    Apartment,
    House,
    Room,
    Hotel,
}

impl HomeType {
    pub const ALL: [HomeType; 4] = [
        HomeType::Apartment,
        HomeType::House,
        HomeType::Room,
        HomeType::Hotel,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Apartment => "apartment",
            Self::House => "house",
            Self::Room => "room",
            Self::Hotel => "hotel",
        }
    }
}

impl fmt::Display for HomeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for HomeType {
    type Err = Error;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        HomeType::ALL
            .into_iter()
            .find(|home_type| home_type.as_str() == value)
            .ok_or_else(|| Error::UnknownVariant {
                kind: "home type",
                value: value.to_string(),
            })
    }
}

/// Amenity available at an offer. The display name doubles as the TSV token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Amenity {
    Breakfast,
    #[serde(rename = "Air conditioning")]
    AirConditioning,
    #[serde(rename = "Laptop friendly workspace")]
    LaptopFriendlyWorkspace,
    #[serde(rename = "Baby seat")]
    BabySeat,
    Washer,
    Towels,
    Fridge,
}

impl Amenity {
    pub const ALL: [Amenity; 7] = [
        Amenity::Breakfast,
        Amenity::AirConditioning,
        Amenity::LaptopFriendlyWorkspace,
        Amenity::BabySeat,
        Amenity::Washer,
        Amenity::Towels,
        Amenity::Fridge,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Breakfast => "Breakfast",
            Self::AirConditioning => "Air conditioning",
            Self::LaptopFriendlyWorkspace => "Laptop friendly workspace",
            Self::BabySeat => "Baby seat",
            Self::Washer => "Washer",
            Self::Towels => "Towels",
            Self::Fridge => "Fridge",
        }
    }
}

impl fmt::Display for Amenity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Amenity {
    type Err = Error;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Amenity::ALL
            .into_iter()
            .find(|amenity| amenity.as_str() == value)
            .ok_or_else(|| Error::UnknownVariant {
                kind: "amenity",
                value: value.to_string(),
            })
    }
}
