use kernel::prelude::entity::{
    Book, BookInColor, BookPrice, BookStock, BookTitle, DestructBook,
};

#[derive(Debug, Clone, PartialEq)]
pub struct BookDto {
    pub id: Option<i64>,
    pub title: String,
    pub number_in_stock: i32,
    pub price: f64,
    pub in_color: bool,
    pub price_in_dollar: f64,
}

impl From<Book> for BookDto {
    fn from(value: Book) -> Self {
        let price_in_dollar = value.price_in_dollar();
        let DestructBook {
            id,
            title,
            number_in_stock,
            price,
            in_color,
        } = value.into_destruct();
        Self {
            id: id.map(|id| *id.as_ref()),
            title: title.as_ref().to_owned(),
            number_in_stock: *number_in_stock.as_ref(),
            price: *price.as_ref(),
            in_color: *in_color.as_ref(),
            price_in_dollar,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CreateBookDto {
    pub title: String,
    pub number_in_stock: i32,
    pub price: f64,
    pub in_color: bool,
}

impl From<CreateBookDto> for Book {
    fn from(value: CreateBookDto) -> Self {
        Book::new(
            BookTitle::new(value.title),
            BookStock::new(value.number_in_stock),
            BookPrice::new(value.price),
            BookInColor::new(value.in_color),
        )
    }
}
