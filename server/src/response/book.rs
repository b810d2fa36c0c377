use application::transfer::BookDto;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use crate::controller::Exhaust;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookResponse {
    id: Option<i64>,
    title: String,
    number_in_stock: i32,
    price: f64,
    in_color: bool,
    price_in_dollar: f64,
}

impl From<BookDto> for BookResponse {
    fn from(value: BookDto) -> Self {
        Self {
            id: value.id,
            title: value.title,
            number_in_stock: value.number_in_stock,
            price: value.price,
            in_color: value.in_color,
            price_in_dollar: value.price_in_dollar,
        }
    }
}

impl IntoResponse for BookResponse {
    fn into_response(self) -> Response {
        (axum::http::StatusCode::OK, Json(self)).into_response()
    }
}

pub struct BookPresenter;

impl Exhaust<BookDto> for BookPresenter {
    type To = BookResponse;
    fn emit(&self, input: BookDto) -> Self::To {
        BookResponse::from(input)
    }
}

impl Exhaust<Option<BookDto>> for BookPresenter {
    type To = Json<Option<BookResponse>>;
    fn emit(&self, input: Option<BookDto>) -> Self::To {
        Json(input.map(BookResponse::from))
    }
}

impl Exhaust<Vec<BookDto>> for BookPresenter {
    type To = Json<Vec<BookResponse>>;
    fn emit(&self, input: Vec<BookDto>) -> Self::To {
        let result = input
            .into_iter()
            .map(BookResponse::from)
            .collect::<Vec<_>>();

        Json::from(result)
    }
}

impl Exhaust<f64> for BookPresenter {
    type To = Json<f64>;
    fn emit(&self, input: f64) -> Self::To {
        Json(input)
    }
}
