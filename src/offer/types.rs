use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Separator for list-valued and coordinate fields inside one TSV column.
pub const LIST_SEPARATOR: char = ';';

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HousingType {
    Apartment,
    House,
    Room,
    Hotel,
}

impl HousingType {
    pub const ALL: [HousingType; 4] = [
        HousingType::Apartment,
        HousingType::House,
        HousingType::Room,
        HousingType::Hotel,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            HousingType::Apartment => "apartment",
            HousingType::House => "house",
            HousingType::Room => "room",
            HousingType::Hotel => "hotel",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserType {
    Regular,
    Pro,
}

impl UserType {
    pub const ALL: [UserType; 2] = [UserType::Regular, UserType::Pro];

    pub fn as_str(&self) -> &'static str {
        match self {
            UserType::Regular => "regular",
            UserType::Pro => "pro",
        }
    }
}

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

    pub fn as_str(&self) -> &'static str {
        match self {
            Amenity::Breakfast => "Breakfast",
            Amenity::AirConditioning => "Air conditioning",
            Amenity::LaptopFriendlyWorkspace => "Laptop friendly workspace",
            Amenity::BabySeat => "Baby seat",
            Amenity::Washer => "Washer",
            Amenity::Towels => "Towels",
            Amenity::Fridge => "Fridge",
        }
    }
}

macro_rules! str_enum {
    ($($ty:ident),+ $(,)?) => {
        $(
            impl fmt::Display for $ty {
                fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                    f.write_str(self.as_str())
                }
            }

            impl FromStr for $ty {
                type Err = String;

                fn from_str(s: &str) -> Result<Self, Self::Err> {
                    $ty::ALL
                        .iter()
                        .copied()
                        .find(|v| v.as_str().eq_ignore_ascii_case(s))
                        .ok_or_else(|| {
                            format!("expected one of: {}", $ty::ALL.map(|v| v.as_str()).join(", "))
                        })
                }
            }
        )+
    };
}

str_enum!(HousingType, UserType, Amenity);

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinates {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }
}

impl fmt::Display for Coordinates {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}{}", self.latitude, LIST_SEPARATOR, self.longitude)
    }
}

impl FromStr for Coordinates {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (lat, lon) = s
            .split_once(LIST_SEPARATOR)
            .ok_or_else(|| "expected 'latitude;longitude'".to_string())?;
        let latitude: f64 = lat.trim().parse().map_err(|e| format!("latitude: {e}"))?;
        let longitude: f64 = lon.trim().parse().map_err(|e| format!("longitude: {e}"))?;
        if !(-90.0..=90.0).contains(&latitude) {
            return Err(format!("latitude {latitude} out of range"));
        }
        if !(-180.0..=180.0).contains(&longitude) {
            return Err(format!("longitude {longitude} out of range"));
        }
        Ok(Self {
            latitude,
            longitude,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct City {
    pub name: String,
    pub location: Coordinates,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub name: String,
    pub email: String,
    pub user_type: UserType,
    pub avatar_path: String,
}
