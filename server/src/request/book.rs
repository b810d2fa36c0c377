use std::fmt::Display;
use std::str::FromStr;

use application::transfer::CreateBookDto;
use kernel::interface::validation::{Validate, Violation};
use kernel::prelude::entity::Book;
use serde::{Deserialize, Deserializer};

use crate::controller::{Intake, TryIntake};

// Form inputs post numbers as strings, so numeric fields accept both.
// A blank input reads as zero and is left to validation.
#[derive(Deserialize)]
#[serde(untagged)]
enum Lenient<T> {
    Exact(T),
    Text(String),
}

fn lenient<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + FromStr + Default,
    T::Err: Display,
{
    match Lenient::<T>::deserialize(deserializer)? {
        Lenient::Exact(value) => Ok(value),
        Lenient::Text(text) if text.trim().is_empty() => Ok(T::default()),
        Lenient::Text(text) => text.trim().parse().map_err(serde::de::Error::custom),
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddBookRequest {
    title: String,
    #[serde(deserialize_with = "lenient")]
    number_in_stock: i32,
    #[serde(deserialize_with = "lenient")]
    price: f64,
    #[serde(default)]
    in_color: bool,
}

#[derive(Debug, Deserialize)]
pub struct PriceFilterRequest {
    price: f64,
}

#[derive(Debug, Deserialize)]
pub struct OrderBooksRequest {
    #[serde(default)]
    direction: String,
    #[serde(default)]
    column: String,
}

pub struct BookTransformer;

/// Checks the attribute rules before a book reaches the service.
impl TryIntake<Option<AddBookRequest>> for BookTransformer {
    type To = Option<CreateBookDto>;
    type Error = Vec<Violation>;
    fn emit(&self, input: Option<AddBookRequest>) -> Result<Self::To, Self::Error> {
        let Some(input) = input else {
            return Ok(None);
        };
        let dto = CreateBookDto {
            title: input.title,
            number_in_stock: input.number_in_stock,
            price: input.price,
            in_color: input.in_color,
        };
        let violations = Book::from(dto.clone()).validate();
        if violations.is_empty() {
            Ok(Some(dto))
        } else {
            Err(violations)
        }
    }
}

impl Intake<PriceFilterRequest> for BookTransformer {
    type To = f64;
    fn emit(&self, input: PriceFilterRequest) -> Self::To {
        input.price
    }
}

impl Intake<OrderBooksRequest> for BookTransformer {
    type To = (String, String);
    fn emit(&self, input: OrderBooksRequest) -> Self::To {
        (input.direction, input.column)
    }
}

#[cfg(test)]
mod test {
    use super::{AddBookRequest, BookTransformer};
    use crate::controller::TryIntake;

    fn request(json: &str) -> Option<AddBookRequest> {
        serde_json::from_str(json).expect("valid json")
    }

    #[test]
    fn accepts_numbers_sent_as_text() {
        let dto = BookTransformer
            .emit(request(
                r#"{"title":"The Hobbit","numberInStock":"1","price":"25.5","inColor":true}"#,
            ))
            .expect("valid book")
            .expect("book present");
        assert_eq!(dto.number_in_stock, 1);
        assert_eq!(dto.price, 25.5);
        assert!(dto.in_color);
    }

    #[test]
    fn blank_numbers_fail_validation() {
        let violations = BookTransformer
            .emit(request(
                r#"{"title":"The Hobbit","numberInStock":"","price":" ","inColor":false}"#,
            ))
            .expect_err("stock of zero");
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].field(), &"numberInStock");
    }

    #[test]
    fn null_body_passes_through() {
        assert_eq!(BookTransformer.emit(request("null")), Ok(None));
    }

    #[test]
    fn invalid_attributes_are_reported() {
        let violations = BookTransformer
            .emit(request(r#"{"title":"ab","numberInStock":9,"price":-1}"#))
            .expect_err("invalid book");
        let fields = violations.iter().map(|v| *v.field()).collect::<Vec<_>>();
        assert_eq!(fields, vec!["title", "numberInStock", "price"]);
    }
}
