use sqlx::PgConnection;

use kernel::interface::query::{BookQuery, DependOnBookQuery};
use kernel::interface::update::{BookModifier, DependOnBookModifier};
use kernel::prelude::entity::{
    Book, BookId, BookInColor, BookPrice, BookSort, BookSortColumn, BookStock, BookTitle,
    SortDirection,
};
use kernel::KernelError;

use crate::database::postgres::{PostgresDatabase, PostgresTransaction};
use crate::error::ConvertError;

pub struct PostgresBookRepository;

#[async_trait::async_trait]
impl BookQuery for PostgresBookRepository {
    type Transaction = PostgresTransaction;

    async fn find_by_id(
        &self,
        con: &mut PostgresTransaction,
        id: &BookId,
    ) -> error_stack::Result<Option<Book>, KernelError> {
        PgBookInternal::find_by_id(con, id).await.convert_error()
    }

    async fn find_by_title(
        &self,
        con: &mut PostgresTransaction,
        title: &BookTitle,
    ) -> error_stack::Result<Option<Book>, KernelError> {
        PgBookInternal::find_by_title(con, title)
            .await
            .convert_error()
    }

    async fn find_all(
        &self,
        con: &mut PostgresTransaction,
        sort: Option<&BookSort>,
    ) -> error_stack::Result<Vec<Book>, KernelError> {
        PgBookInternal::find_all(con, sort).await.convert_error()
    }

    async fn find_by_price_greater_than(
        &self,
        con: &mut PostgresTransaction,
        price: &BookPrice,
    ) -> error_stack::Result<Vec<Book>, KernelError> {
        PgBookInternal::find_by_price_greater_than(con, price)
            .await
            .convert_error()
    }

    async fn find_by_in_color(
        &self,
        con: &mut PostgresTransaction,
        in_color: &BookInColor,
    ) -> error_stack::Result<Vec<Book>, KernelError> {
        PgBookInternal::find_by_in_color(con, in_color)
            .await
            .convert_error()
    }
}

#[async_trait::async_trait]
impl BookModifier for PostgresBookRepository {
    type Transaction = PostgresTransaction;

    async fn save(
        &self,
        con: &mut PostgresTransaction,
        book: &Book,
    ) -> error_stack::Result<Book, KernelError> {
        match book.id() {
            Some(_) => PgBookInternal::update(con, book).await.convert_error(),
            None => PgBookInternal::insert(con, book).await.convert_error(),
        }
    }

    async fn delete(
        &self,
        con: &mut PostgresTransaction,
        book: &Book,
    ) -> error_stack::Result<(), KernelError> {
        PgBookInternal::delete(con, book).await.convert_error()
    }
}

impl DependOnBookQuery for PostgresDatabase {
    type BookQuery = PostgresBookRepository;
    fn book_query(&self) -> &Self::BookQuery {
        &PostgresBookRepository
    }
}

impl DependOnBookModifier for PostgresDatabase {
    type BookModifier = PostgresBookRepository;
    fn book_modifier(&self) -> &Self::BookModifier {
        &PostgresBookRepository
    }
}

#[derive(sqlx::FromRow)]
struct BookRow {
    id: i64,
    title: String,
    number_in_stock: i32,
    price: f64,
    in_color: bool,
}

impl From<BookRow> for Book {
    fn from(value: BookRow) -> Self {
        let id = BookId::new(value.id);
        Book::new(
            BookTitle::new(value.title),
            BookStock::new(value.number_in_stock),
            BookPrice::new(value.price),
            BookInColor::new(value.in_color),
        )
        .reconstruct(|book| book.id = Some(id))
    }
}

fn order_clause(sort: Option<&BookSort>) -> String {
    match sort {
        None => String::from("ORDER BY id"),
        Some(sort) => {
            let column = match sort.column() {
                BookSortColumn::Title => "title",
                BookSortColumn::Price => "price",
            };
            let direction = match sort.direction() {
                SortDirection::Ascending => "ASC",
                SortDirection::Descending => "DESC",
            };
            format!("ORDER BY {column} {direction}, id")
        }
    }
}

pub(in crate::database) struct PgBookInternal;

impl PgBookInternal {
    async fn find_by_id(con: &mut PgConnection, id: &BookId) -> Result<Option<Book>, sqlx::Error> {
        let row = sqlx::query_as::<_, BookRow>(
            // language=postgresql
            r#"
            SELECT id, title, number_in_stock, price, in_color
            FROM books
            WHERE id = $1
            "#,
        )
        .bind(id.as_ref())
        .fetch_optional(con)
        .await?;
        Ok(row.map(Book::from))
    }

    async fn find_by_title(
        con: &mut PgConnection,
        title: &BookTitle,
    ) -> Result<Option<Book>, sqlx::Error> {
        let row = sqlx::query_as::<_, BookRow>(
            // language=postgresql
            r#"
            SELECT id, title, number_in_stock, price, in_color
            FROM books
            WHERE title = $1
            ORDER BY id
            LIMIT 1
            "#,
        )
        .bind(title.as_ref())
        .fetch_optional(con)
        .await?;
        Ok(row.map(Book::from))
    }

    #[tracing::instrument(skip(con))]
    async fn find_all(
        con: &mut PgConnection,
        sort: Option<&BookSort>,
    ) -> Result<Vec<Book>, sqlx::Error> {
        let query = format!(
            "SELECT id, title, number_in_stock, price, in_color FROM books {}",
            order_clause(sort)
        );
        let rows = sqlx::query_as::<_, BookRow>(&query).fetch_all(con).await?;
        Ok(rows.into_iter().map(Book::from).collect())
    }

    async fn find_by_price_greater_than(
        con: &mut PgConnection,
        price: &BookPrice,
    ) -> Result<Vec<Book>, sqlx::Error> {
        let rows = sqlx::query_as::<_, BookRow>(
            // language=postgresql
            r#"
            SELECT id, title, number_in_stock, price, in_color
            FROM books
            WHERE price > $1
            ORDER BY id
            "#,
        )
        .bind(price.as_ref())
        .fetch_all(con)
        .await?;
        Ok(rows.into_iter().map(Book::from).collect())
    }

    async fn find_by_in_color(
        con: &mut PgConnection,
        in_color: &BookInColor,
    ) -> Result<Vec<Book>, sqlx::Error> {
        let rows = sqlx::query_as::<_, BookRow>(
            // language=postgresql
            r#"
            SELECT id, title, number_in_stock, price, in_color
            FROM books
            WHERE in_color = $1
            ORDER BY id
            "#,
        )
        .bind(in_color.as_ref())
        .fetch_all(con)
        .await?;
        Ok(rows.into_iter().map(Book::from).collect())
    }

    async fn insert(con: &mut PgConnection, book: &Book) -> Result<Book, sqlx::Error> {
        let row = sqlx::query_as::<_, BookRow>(
            // language=postgresql
            r#"
            INSERT INTO books (title, number_in_stock, price, in_color)
            VALUES ($1, $2, $3, $4)
            RETURNING id, title, number_in_stock, price, in_color
            "#,
        )
        .bind(book.title().as_ref())
        .bind(book.number_in_stock().as_ref())
        .bind(book.price().as_ref())
        .bind(book.in_color().as_ref())
        .fetch_one(con)
        .await?;
        tracing::debug!(id = row.id, "inserted book");
        Ok(Book::from(row))
    }

    async fn update(con: &mut PgConnection, book: &Book) -> Result<Book, sqlx::Error> {
        let row = sqlx::query_as::<_, BookRow>(
            // language=postgresql
            r#"
            UPDATE books
            SET title = $2, number_in_stock = $3, price = $4, in_color = $5
            WHERE id = $1
            RETURNING id, title, number_in_stock, price, in_color
            "#,
        )
        .bind(book.id().map(|id| *id.as_ref()))
        .bind(book.title().as_ref())
        .bind(book.number_in_stock().as_ref())
        .bind(book.price().as_ref())
        .bind(book.in_color().as_ref())
        .fetch_one(con)
        .await?;
        Ok(Book::from(row))
    }

    async fn delete(con: &mut PgConnection, book: &Book) -> Result<(), sqlx::Error> {
        // language=postgresql
        sqlx::query(
            r#"
            DELETE FROM books
            WHERE id = $1
            "#,
        )
        .bind(book.id().map(|id| *id.as_ref()))
        .execute(con)
        .await?;
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use kernel::interface::database::{DatabaseConnection, Transaction};
    use kernel::interface::query::BookQuery;
    use kernel::interface::update::BookModifier;
    use kernel::prelude::entity::{
        Book, BookInColor, BookPrice, BookSort, BookSortColumn, BookStock, BookTitle,
        SortDirection,
    };
    use kernel::KernelError;

    use crate::database::postgres::book::PostgresBookRepository;
    use crate::database::postgres::PostgresDatabase;

    #[test_with::env(POSTGRES_TEST)]
    #[tokio::test]
    async fn test() -> error_stack::Result<(), KernelError> {
        let db = PostgresDatabase::new().await?;
        let mut con = db.transact().await?;
        let title = format!("test-{}", rand::random::<u32>());

        let book = Book::new(
            BookTitle::new(title.clone()),
            BookStock::new(2),
            BookPrice::new(12.5),
            BookInColor::new(true),
        );
        let saved = PostgresBookRepository.save(&mut con, &book).await?;
        assert!(saved.id().is_some());

        let id = saved.id().expect("saved book has an id");
        let found = PostgresBookRepository.find_by_id(&mut con, &id).await?;
        assert_eq!(found, Some(saved.clone()));

        let found = PostgresBookRepository
            .find_by_title(&mut con, &BookTitle::new(title))
            .await?;
        assert_eq!(found, Some(saved.clone()));

        let pricey = PostgresBookRepository
            .find_by_price_greater_than(&mut con, &BookPrice::new(12.0))
            .await?;
        assert!(pricey.contains(&saved));

        let colored = PostgresBookRepository
            .find_by_in_color(&mut con, &BookInColor::new(true))
            .await?;
        assert!(colored.contains(&saved));

        let sort = BookSort::new(SortDirection::Descending, BookSortColumn::Price);
        let sorted = PostgresBookRepository.find_all(&mut con, Some(&sort)).await?;
        assert!(sorted
            .windows(2)
            .all(|pair| pair[0].price().as_ref() >= pair[1].price().as_ref()));

        PostgresBookRepository.delete(&mut con, &saved).await?;
        let found = PostgresBookRepository.find_by_id(&mut con, &id).await?;
        assert!(found.is_none());

        con.roll_back().await?;
        Ok(())
    }
}
