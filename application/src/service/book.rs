use error_stack::Report;

use kernel::interface::database::{DatabaseConnection, DependOnDatabaseConnection, Transaction};
use kernel::interface::query::{BookQuery, DependOnBookQuery};
use kernel::interface::update::{BookModifier, DependOnBookModifier};
use kernel::interface::validation::has_min_title_length;
use kernel::prelude::entity::{
    Book, BookId, BookInColor, BookPrice, BookSort, BookSortColumn, BookTitle, SortDirection,
};

use crate::error::{ConvertError, ServiceError};
use crate::transfer::{BookDto, CreateBookDto};

const TITLE_FILTER_TOO_SHORT: &str = "Title must have at least 3 chars";
const NULL_BOOK: &str = "Can not add null book";
const TITLE_NOT_UNIQUE: &str = "Title must be unique";
const NEGATIVE_PRICE_FILTER: &str = "Price must be a non-negative number";
const TITLE_NOT_FOUND: &str = "Book with given title does not exist";
const INVALID_COLUMN: &str = "Invalid column order";

fn rejected(field: &str, message: impl Into<String>) -> Report<ServiceError> {
    let error = ServiceError::new(field, message);
    tracing::debug!(field = error.field(), message = error.message(), "rule violated");
    Report::new(error)
}

#[async_trait::async_trait]
pub trait GetBookService: 'static + Sync + Send + DependOnBookQuery {
    /// Every stored book, in storage order.
    async fn get_all_books(&self) -> error_stack::Result<Vec<BookDto>, ServiceError> {
        let mut connection = self.database_connection().transact().await.convert_error()?;
        let books = self
            .book_query()
            .find_all(&mut connection, None)
            .await
            .convert_error()?;
        Ok(books.into_iter().map(BookDto::from).collect())
    }

    async fn get_book_with_title(
        &self,
        title: &str,
    ) -> error_stack::Result<Option<BookDto>, ServiceError> {
        if !has_min_title_length(title) {
            return Err(rejected("title-filter", TITLE_FILTER_TOO_SHORT));
        }
        let mut connection = self.database_connection().transact().await.convert_error()?;
        let book = self
            .book_query()
            .find_by_title(&mut connection, &BookTitle::new(title))
            .await
            .convert_error()?;
        Ok(book.map(BookDto::from))
    }

    async fn get_book_with_id(&self, id: i64) -> error_stack::Result<Option<BookDto>, ServiceError> {
        let mut connection = self.database_connection().transact().await.convert_error()?;
        let book = self
            .book_query()
            .find_by_id(&mut connection, &BookId::new(id))
            .await
            .convert_error()?;
        Ok(book.map(BookDto::from))
    }

    /// Books priced strictly above `price`; zero therefore matches every priced book.
    async fn get_books_with_price_more_than(
        &self,
        price: f64,
    ) -> error_stack::Result<Vec<BookDto>, ServiceError> {
        if !(price >= 0.0) {
            return Err(rejected("price-filter", NEGATIVE_PRICE_FILTER));
        }
        let mut connection = self.database_connection().transact().await.convert_error()?;
        let books = self
            .book_query()
            .find_by_price_greater_than(&mut connection, &BookPrice::new(price))
            .await
            .convert_error()?;
        Ok(books.into_iter().map(BookDto::from).collect())
    }

    async fn get_books_in_color(&self) -> error_stack::Result<Vec<BookDto>, ServiceError> {
        let mut connection = self.database_connection().transact().await.convert_error()?;
        let books = self
            .book_query()
            .find_by_in_color(&mut connection, &BookInColor::new(true))
            .await
            .convert_error()?;
        Ok(books.into_iter().map(BookDto::from).collect())
    }

    /// Sorts by `column` (`title` or `price`). Only `asc` sorts ascending;
    /// any other direction, typos included, sorts descending.
    async fn order_books(
        &self,
        direction: &str,
        column: &str,
    ) -> error_stack::Result<Vec<BookDto>, ServiceError> {
        let column =
            BookSortColumn::parse(column).ok_or_else(|| rejected("column", INVALID_COLUMN))?;
        let sort = BookSort::new(SortDirection::resolve(direction), column);
        let mut connection = self.database_connection().transact().await.convert_error()?;
        let books = self
            .book_query()
            .find_all(&mut connection, Some(&sort))
            .await
            .convert_error()?;
        Ok(books.into_iter().map(BookDto::from).collect())
    }
}

impl<T> GetBookService for T where T: DependOnBookQuery {}

#[async_trait::async_trait]
pub trait ValuateBookService: 'static + Sync + Send + DependOnBookQuery {
    /// Sum of `price * number_in_stock` over the whole collection.
    async fn get_total_value_of_collection(&self) -> error_stack::Result<f64, ServiceError> {
        let mut connection = self.database_connection().transact().await.convert_error()?;
        let books = self
            .book_query()
            .find_all(&mut connection, None)
            .await
            .convert_error()?;
        Ok(books.iter().map(Book::value).fold(0.0, |total, value| total + value))
    }

    /// Ties keep the first book in storage order.
    async fn get_most_expensive_book(&self) -> error_stack::Result<Option<BookDto>, ServiceError> {
        let mut connection = self.database_connection().transact().await.convert_error()?;
        let books = self
            .book_query()
            .find_all(&mut connection, None)
            .await
            .convert_error()?;
        let most_expensive = books
            .into_iter()
            .reduce(|best, book| if book.price() > best.price() { book } else { best });
        Ok(most_expensive.map(BookDto::from))
    }
}

impl<T> ValuateBookService for T where T: DependOnBookQuery {}

#[async_trait::async_trait]
pub trait AddBookService:
    'static + Sync + Send + DependOnBookQuery + DependOnBookModifier
{
    /// Attribute validity is not checked here, only title uniqueness.
    // The lookup and the insert are not atomic; concurrent adds of one title can both pass.
    async fn add_book(
        &self,
        book: Option<CreateBookDto>,
    ) -> error_stack::Result<BookDto, ServiceError> {
        let Some(dto) = book else {
            return Err(rejected("book", NULL_BOOK));
        };
        let book = Book::from(dto);

        let mut connection = self.database_connection().transact().await.convert_error()?;
        let existing = self
            .book_query()
            .find_by_title(&mut connection, book.title())
            .await
            .convert_error()?;
        if existing.is_some() {
            connection.roll_back().await.convert_error()?;
            return Err(rejected("title", TITLE_NOT_UNIQUE));
        }

        let saved = self
            .book_modifier()
            .save(&mut connection, &book)
            .await
            .convert_error()?;
        connection.commit().await.convert_error()?;
        tracing::info!(id = ?saved.id(), "book added");
        Ok(BookDto::from(saved))
    }
}

impl<T> AddBookService for T where T: DependOnBookQuery + DependOnBookModifier {}

#[async_trait::async_trait]
pub trait RemoveBookService:
    'static + Sync + Send + DependOnBookQuery + DependOnBookModifier
{
    async fn remove_book_with_title(
        &self,
        title: &str,
    ) -> error_stack::Result<BookDto, ServiceError> {
        let mut connection = self.database_connection().transact().await.convert_error()?;
        let found = self
            .book_query()
            .find_by_title(&mut connection, &BookTitle::new(title))
            .await
            .convert_error()?;
        let Some(book) = found else {
            connection.roll_back().await.convert_error()?;
            return Err(rejected("title", TITLE_NOT_FOUND));
        };

        self.book_modifier()
            .delete(&mut connection, &book)
            .await
            .convert_error()?;
        connection.commit().await.convert_error()?;
        tracing::info!(id = ?book.id(), "book removed");
        Ok(BookDto::from(book))
    }

    async fn remove_book_with_id(&self, id: i64) -> error_stack::Result<BookDto, ServiceError> {
        let mut connection = self.database_connection().transact().await.convert_error()?;
        let found = self
            .book_query()
            .find_by_id(&mut connection, &BookId::new(id))
            .await
            .convert_error()?;
        let Some(book) = found else {
            connection.roll_back().await.convert_error()?;
            return Err(rejected(
                "id",
                format!("Book with id {id} does not exist."),
            ));
        };

        self.book_modifier()
            .delete(&mut connection, &book)
            .await
            .convert_error()?;
        connection.commit().await.convert_error()?;
        tracing::info!(id, "book removed");
        Ok(BookDto::from(book))
    }
}

impl<T> RemoveBookService for T where T: DependOnBookQuery + DependOnBookModifier {}
