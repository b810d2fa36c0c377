use vodca::References;

use crate::entity::{Book, BookStock};

const TITLE_MIN_LENGTH: usize = 3;

const TITLE_REQUIRED: &str = "Title is required";
const TITLE_TOO_SHORT: &str = "Title must have at least 3 chars";
const STOCK_OUT_OF_RANGE: &str = "Number in stock must be between 1 and 5";
// Zero is accepted even though the message reads "positive".
const PRICE_NEGATIVE: &str = "Price must be positive";

#[derive(Debug, Clone, PartialEq)]
pub enum InvalidValue {
    Text(String),
    Integer(i32),
    Decimal(f64),
}

/// A single failed rule: the offending attribute, why it failed and the value it held.
#[derive(Debug, Clone, PartialEq, References)]
pub struct Violation {
    field: &'static str,
    message: &'static str,
    invalid_value: InvalidValue,
}

impl Violation {
    pub fn new(field: &'static str, message: &'static str, invalid_value: InvalidValue) -> Self {
        Self {
            field,
            message,
            invalid_value,
        }
    }
}

pub trait Validate {
    /// Returns every violated rule, empty when valid.
    fn validate(&self) -> Vec<Violation>;
}

/// Whether `title` is long enough once surrounding whitespace is removed.
pub fn has_min_title_length(title: &str) -> bool {
    title.trim().chars().count() >= TITLE_MIN_LENGTH
}

impl Validate for Book {
    fn validate(&self) -> Vec<Violation> {
        let mut violations = Vec::new();

        let title: &String = self.title().as_ref();
        if title.trim().is_empty() {
            violations.push(Violation::new(
                "title",
                TITLE_REQUIRED,
                InvalidValue::Text(title.clone()),
            ));
        } else if !has_min_title_length(title) {
            violations.push(Violation::new(
                "title",
                TITLE_TOO_SHORT,
                InvalidValue::Text(title.clone()),
            ));
        }

        let stock = *self.number_in_stock().as_ref();
        if !(BookStock::MIN..=BookStock::MAX).contains(&stock) {
            violations.push(Violation::new(
                "numberInStock",
                STOCK_OUT_OF_RANGE,
                InvalidValue::Integer(stock),
            ));
        }

        let price = *self.price().as_ref();
        if !(price >= 0.0) {
            violations.push(Violation::new(
                "price",
                PRICE_NEGATIVE,
                InvalidValue::Decimal(price),
            ));
        }

        violations
    }
}

#[cfg(test)]
mod test {
    use super::{InvalidValue, Validate};
    use crate::entity::{Book, BookInColor, BookPrice, BookStock, BookTitle};

    fn book(title: &str, stock: i32, price: f64) -> Book {
        Book::uncolored(
            BookTitle::new(title),
            BookStock::new(stock),
            BookPrice::new(price),
        )
    }

    #[test]
    fn valid_book_has_no_violations() {
        for (title, stock, price) in [("The Hobbit", 1, 25.5), ("Emma", 5, 0.0), ("abc", 3, 1e6)] {
            assert!(book(title, stock, price).validate().is_empty());
        }
        let colored = Book::new(
            BookTitle::new("The Hobbit"),
            BookStock::new(1),
            BookPrice::new(25.5),
            BookInColor::new(true),
        );
        assert!(colored.validate().is_empty());
    }

    #[test]
    fn blank_title_is_required() {
        let violations = book("   ", 1, 25.5).validate();
        assert_eq!(violations.len(), 1);
        let violation = &violations[0];
        assert_eq!(violation.field(), &"title");
        assert_eq!(violation.message(), &"Title is required");
        assert_eq!(violation.invalid_value(), &InvalidValue::Text("   ".to_string()));
    }

    #[test]
    fn short_title_fires_only_length_rule() {
        let violations = book("a", 1, 25.5).validate();
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].field(), &"title");
        assert_eq!(violations[0].message(), &"Title must have at least 3 chars");
        assert_eq!(violations[0].invalid_value(), &InvalidValue::Text("a".to_string()));
    }

    #[test]
    fn title_length_counts_trimmed_chars() {
        assert_eq!(book(" ab ", 1, 25.5).validate().len(), 1);
        assert!(book(" abc ", 1, 25.5).validate().is_empty());
    }

    #[test]
    fn stock_out_of_range() {
        for stock in [0, 10] {
            let violations = book("The Hobbit", stock, 25.5).validate();
            assert_eq!(violations.len(), 1);
            assert_eq!(violations[0].field(), &"numberInStock");
            assert_eq!(
                violations[0].message(),
                &"Number in stock must be between 1 and 5"
            );
            assert_eq!(violations[0].invalid_value(), &InvalidValue::Integer(stock));
        }
    }

    #[test]
    fn negative_price() {
        let violations = book("The Hobbit", 1, -10.0).validate();
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].field(), &"price");
        assert_eq!(violations[0].message(), &"Price must be positive");
        assert_eq!(violations[0].invalid_value(), &InvalidValue::Decimal(-10.0));
    }

    #[test]
    fn rules_fire_independently() {
        let violations = book("", 0, -1.0).validate();
        let fields = violations.iter().map(|v| *v.field()).collect::<Vec<_>>();
        assert_eq!(fields, vec!["title", "numberInStock", "price"]);
    }
}
