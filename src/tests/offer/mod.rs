//! Offer model tests.

mod parse_tests;
