//! Tests for the offer TSV layout.

use chrono::{TimeZone, Utc};

use crate::offer::{
    Amenity, Coordinates, FIELD_COUNT, HousingType, Offer, OfferParseError, UserType,
};
use crate::tests::offer_line;

fn with_field(index: usize, value: &str) -> String {
    let line = offer_line("Cozy loft");
    let mut fields: Vec<&str> = line.split('\t').collect();
    fields[index] = value;
    fields.join("\t")
}

#[test]
fn parses_well_formed_record() {
    let offer = Offer::from_tsv(&format!("{}\n", offer_line("Cozy loft"))).unwrap();

    assert_eq!(offer.title, "Cozy loft");
    assert_eq!(
        offer.post_date,
        Utc.with_ymd_and_hms(2024, 3, 1, 10, 0, 0).unwrap()
    );
    assert_eq!(offer.city.name, "Amsterdam");
    assert_eq!(offer.city.location, Coordinates::new(52.370216, 4.895168));
    assert_eq!(offer.images, vec!["room-1.jpg", "room-2.jpg"]);
    assert!(offer.is_premium);
    assert_eq!(offer.housing_type, HousingType::Apartment);
    assert_eq!((offer.rooms, offer.guests, offer.price), (2, 4, 1200));
    assert_eq!(offer.amenities, vec![Amenity::Breakfast, Amenity::Washer]);
    assert_eq!(offer.author.email, "ann@example.com");
    assert_eq!(offer.author.user_type, UserType::Pro);
    assert_eq!(offer.location, Coordinates::new(52.3676, 4.9041));
}

#[test]
fn accepts_crlf_terminated_record() {
    let offer = Offer::from_tsv(&format!("{}\r\n", offer_line("Windows"))).unwrap();
    assert_eq!(offer.title, "Windows");
    assert_eq!(offer.location, Coordinates::new(52.3676, 4.9041));
}

#[test]
fn formats_back_to_the_same_record() {
    let line = offer_line("Cozy loft");
    let offer = Offer::from_tsv(&line).unwrap();

    assert_eq!(offer.to_tsv(), line);
}

#[test]
fn rejects_wrong_field_count() {
    let err = Offer::from_tsv("only\tthree\tfields\n").unwrap_err();
    assert_eq!(
        err,
        OfferParseError::FieldCount {
            expected: FIELD_COUNT,
            found: 3
        }
    );

    let too_many = format!("{}\textra", offer_line("x"));
    assert!(matches!(
        Offer::from_tsv(&too_many),
        Err(OfferParseError::FieldCount { found: 19, .. })
    ));
}

#[test]
fn rejects_unknown_housing_type() {
    let err = Offer::from_tsv(&with_field(8, "castle")).unwrap_err();

    match err {
        OfferParseError::InvalidField { field, value, .. } => {
            assert_eq!(field, "housing type");
            assert_eq!(value, "castle");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn rejects_out_of_range_coordinates() {
    let err = Offer::from_tsv(&with_field(17, "91.0;10.0")).unwrap_err();
    assert!(err.to_string().contains("latitude 91 out of range"), "{err}");

    let err = Offer::from_tsv(&with_field(4, "52.37")).unwrap_err();
    assert!(matches!(
        err,
        OfferParseError::InvalidField {
            field: "city location",
            ..
        }
    ));
}

#[test]
fn rejects_bad_date_and_numbers() {
    assert!(matches!(
        Offer::from_tsv(&with_field(2, "yesterday")),
        Err(OfferParseError::InvalidField {
            field: "post date",
            ..
        })
    ));
    assert!(matches!(
        Offer::from_tsv(&with_field(11, "-5")),
        Err(OfferParseError::InvalidField { field: "price", .. })
    ));
    assert!(matches!(
        Offer::from_tsv(&with_field(7, "yes")),
        Err(OfferParseError::InvalidField {
            field: "premium flag",
            ..
        })
    ));
}

#[test]
fn rejects_empty_required_text() {
    assert!(matches!(
        Offer::from_tsv(&with_field(0, " ")),
        Err(OfferParseError::InvalidField { field: "title", .. })
    ));
}

#[test]
fn empty_lists_parse_as_empty() {
    let offer = Offer::from_tsv(&with_field(12, "")).unwrap();
    assert!(offer.amenities.is_empty());

    let offer = Offer::from_tsv(&with_field(6, "")).unwrap();
    assert!(offer.images.is_empty());
}

#[test]
fn enum_values_parse_case_insensitively() {
    assert_eq!("HOUSE".parse::<HousingType>(), Ok(HousingType::House));
    assert_eq!("air conditioning".parse::<Amenity>(), Ok(Amenity::AirConditioning));
    assert_eq!(UserType::Regular.to_string(), "regular");

    let err = "vip".parse::<UserType>().unwrap_err();
    assert_eq!(err, "expected one of: regular, pro");
}

#[cfg(feature = "json")]
#[test]
fn offer_serializes_with_camel_case_keys() {
    let offer = Offer::from_tsv(&offer_line("Cozy loft")).unwrap();
    let value = serde_json::to_value(&offer).unwrap();

    assert_eq!(value["postDate"], "2024-03-01T10:00:00Z");
    assert_eq!(value["housingType"], "apartment");
    assert_eq!(value["author"]["userType"], "pro");
    assert_eq!(value["amenities"][0], "Breakfast");
}
