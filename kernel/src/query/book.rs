use crate::database::{DatabaseConnection, DependOnDatabaseConnection, Transaction};
use crate::entity::{Book, BookId, BookInColor, BookPrice, BookSort, BookTitle};
use crate::KernelError;

/// Read side of the book store.
#[async_trait::async_trait]
pub trait BookQuery: 'static + Sync + Send {
    type Transaction: Transaction;
    async fn find_by_id(
        &self,
        con: &mut Self::Transaction,
        id: &BookId,
    ) -> error_stack::Result<Option<Book>, KernelError>;
    async fn find_by_title(
        &self,
        con: &mut Self::Transaction,
        title: &BookTitle,
    ) -> error_stack::Result<Option<Book>, KernelError>;
    /// Without a sort, books come back in storage order.
    async fn find_all(
        &self,
        con: &mut Self::Transaction,
        sort: Option<&BookSort>,
    ) -> error_stack::Result<Vec<Book>, KernelError>;
    async fn find_by_price_greater_than(
        &self,
        con: &mut Self::Transaction,
        price: &BookPrice,
    ) -> error_stack::Result<Vec<Book>, KernelError>;
    async fn find_by_in_color(
        &self,
        con: &mut Self::Transaction,
        in_color: &BookInColor,
    ) -> error_stack::Result<Vec<Book>, KernelError>;
}

pub trait DependOnBookQuery: 'static + Sync + Send + DependOnDatabaseConnection {
    type BookQuery: BookQuery<
        Transaction = <Self::DatabaseConnection as DatabaseConnection>::Transaction,
    >;
    fn book_query(&self) -> &Self::BookQuery;
}
