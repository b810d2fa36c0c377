mod id;
mod in_color;
mod price;
mod sort;
mod stock;
mod title;

pub use self::{id::*, in_color::*, price::*, sort::*, stock::*, title::*};
use destructure::{Destructure, Mutation};
use std::fmt::{Display, Formatter};
use vodca::References;

/// A book in the inventory.
///
/// Construction never checks the attributes: a `Book` may hold an invalid
/// title, stock or price until it is explicitly validated.
#[derive(Debug, Clone, PartialEq, References, Destructure, Mutation)]
pub struct Book {
    id: Option<BookId>,
    title: BookTitle,
    number_in_stock: BookStock,
    price: BookPrice,
    in_color: BookInColor,
}

impl Book {
    pub fn new(
        title: BookTitle,
        number_in_stock: BookStock,
        price: BookPrice,
        in_color: BookInColor,
    ) -> Self {
        Self {
            id: None,
            title,
            number_in_stock,
            price,
            in_color,
        }
    }

    pub fn uncolored(title: BookTitle, number_in_stock: BookStock, price: BookPrice) -> Self {
        Self::new(title, number_in_stock, price, BookInColor::default())
    }

    pub fn price_in_dollar(&self) -> f64 {
        self.price.in_dollar()
    }

    /// Stock value of this book, `price * number_in_stock`.
    pub fn value(&self) -> f64 {
        self.price.as_ref() * f64::from(*self.number_in_stock.as_ref())
    }
}

impl Display for Book {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let color = if *self.in_color.as_ref() {
            "in"
        } else {
            "not in"
        };
        write!(
            f,
            "{} costs €{:?}. There are {} items present. The book is {} color.",
            self.title.as_ref(),
            self.price.as_ref(),
            self.number_in_stock.as_ref(),
            color
        )
    }
}
