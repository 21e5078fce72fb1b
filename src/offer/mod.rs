//! Offer records as they appear in mock-data TSV files.
//!
//! One offer per line, eighteen tab-separated columns in this order:
//!
//! | # | column | example |
//! |---|---|---|
//! | 1 | title | `Cozy loft` |
//! | 2 | description | `Close to the river` |
//! | 3 | post date (RFC 3339) | `2024-03-01T10:00:00.000Z` |
//! | 4 | city name | `Amsterdam` |
//! | 5 | city location | `52.370216;4.895168` |
//! | 6 | preview image | `preview.jpg` |
//! | 7 | images, `;`-joined | `a.jpg;b.jpg` |
//! | 8 | premium flag | `true` |
//! | 9 | housing type | `apartment` |
//! | 10 | rooms | `2` |
//! | 11 | guests | `4` |
//! | 12 | price | `1200` |
//! | 13 | amenities, `;`-joined | `Breakfast;Washer` |
//! | 14 | author name | `Ann` |
//! | 15 | author email | `ann@example.com` |
//! | 16 | author type | `pro` |
//! | 17 | avatar path | `ann.png` |
//! | 18 | offer location | `52.36;4.89` |

mod types;

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use types::{Amenity, City, Coordinates, HousingType, LIST_SEPARATOR, User, UserType};

/// Column separator of a TSV record.
pub const FIELD_SEPARATOR: char = '\t';

/// Number of columns in an offer record.
pub const FIELD_COUNT: usize = 18;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OfferParseError {
    #[error("expected {expected} tab-separated fields, found {found}")]
    FieldCount { expected: usize, found: usize },
    #[error("invalid {field} '{value}': {reason}")]
    InvalidField {
        field: &'static str,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Offer {
    pub title: String,
    pub description: String,
    pub post_date: DateTime<Utc>,
    pub city: City,
    pub preview_image: String,
    pub images: Vec<String>,
    pub is_premium: bool,
    pub housing_type: HousingType,
    pub rooms: u32,
    pub guests: u32,
    pub price: u32,
    pub amenities: Vec<Amenity>,
    pub author: User,
    pub location: Coordinates,
}

impl Offer {
    /// Parse one TSV record. A trailing `\n` or `\r\n` is ignored.
    pub fn from_tsv(line: &str) -> Result<Self, OfferParseError> {
        let line = line.trim_end_matches(['\n', '\r']);
        let fields: [&str; FIELD_COUNT] = line
            .split(FIELD_SEPARATOR)
            .collect::<Vec<_>>()
            .try_into()
            .map_err(|fields: Vec<&str>| OfferParseError::FieldCount {
                expected: FIELD_COUNT,
                found: fields.len(),
            })?;

        let [
            title,
            description,
            post_date,
            city_name,
            city_location,
            preview_image,
            images,
            is_premium,
            housing_type,
            rooms,
            guests,
            price,
            amenities,
            author_name,
            author_email,
            author_type,
            avatar_path,
            location,
        ] = fields;

        Ok(Offer {
            title: required("title", title)?,
            description: required("description", description)?,
            post_date: DateTime::parse_from_rfc3339(post_date)
                .map(|d| d.with_timezone(&Utc))
                .map_err(|e| invalid("post date", post_date, e))?,
            city: City {
                name: required("city", city_name)?,
                location: parse("city location", city_location)?,
            },
            preview_image: required("preview image", preview_image)?,
            images: split_list(images).map(str::to_string).collect(),
            is_premium: parse("premium flag", is_premium)?,
            housing_type: parse("housing type", housing_type)?,
            rooms: parse("rooms", rooms)?,
            guests: parse("guests", guests)?,
            price: parse("price", price)?,
            amenities: split_list(amenities)
                .map(|a| parse("amenity", a))
                .collect::<Result<_, _>>()?,
            author: User {
                name: required("author name", author_name)?,
                email: required("author email", author_email)?,
                user_type: parse("author type", author_type)?,
                avatar_path: avatar_path.to_string(),
            },
            location: parse("location", location)?,
        })
    }

    /// Format the offer as one TSV record, without the trailing newline.
    pub fn to_tsv(&self) -> String {
        let separator = LIST_SEPARATOR.to_string();
        let amenities: Vec<&str> = self.amenities.iter().map(Amenity::as_str).collect();

        [
            self.title.clone(),
            self.description.clone(),
            self.post_date.to_rfc3339_opts(SecondsFormat::Millis, true),
            self.city.name.clone(),
            self.city.location.to_string(),
            self.preview_image.clone(),
            self.images.join(&separator),
            self.is_premium.to_string(),
            self.housing_type.to_string(),
            self.rooms.to_string(),
            self.guests.to_string(),
            self.price.to_string(),
            amenities.join(&separator),
            self.author.name.clone(),
            self.author.email.clone(),
            self.author.user_type.to_string(),
            self.author.avatar_path.clone(),
            self.location.to_string(),
        ]
        .join(&FIELD_SEPARATOR.to_string())
    }
}

fn invalid(field: &'static str, value: &str, reason: impl ToString) -> OfferParseError {
    OfferParseError::InvalidField {
        field,
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

fn required(field: &'static str, value: &str) -> Result<String, OfferParseError> {
    if value.trim().is_empty() {
        return Err(invalid(field, value, "must not be empty"));
    }
    Ok(value.to_string())
}

fn parse<T>(field: &'static str, value: &str) -> Result<T, OfferParseError>
where
    T: std::str::FromStr,
    T::Err: ToString,
{
    value.trim().parse().map_err(|e| invalid(field, value, e))
}

fn split_list(value: &str) -> impl Iterator<Item = &str> {
    value
        .split(LIST_SEPARATOR)
        .map(str::trim)
        .filter(|s| !s.is_empty())
}
