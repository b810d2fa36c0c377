use std::cmp::Ordering;
use std::sync::Arc;

use tokio::sync::{OwnedRwLockWriteGuard, RwLock};

use kernel::interface::database::{DatabaseConnection, Transaction};
use kernel::interface::query::{BookQuery, DependOnBookQuery};
use kernel::interface::update::{BookModifier, DependOnBookModifier};
use kernel::prelude::entity::{
    Book, BookId, BookInColor, BookPrice, BookSort, BookSortColumn, BookTitle, SortDirection,
};
use kernel::KernelError;

#[derive(Debug, Clone, Default)]
struct Store {
    last_id: i64,
    books: Vec<Book>,
}

impl Store {
    fn insert(&mut self, book: &Book) -> Book {
        match book.id() {
            Some(id) => {
                let stored = book.clone();
                match self.books.iter_mut().find(|b| b.id() == &Some(*id)) {
                    Some(existing) => *existing = stored.clone(),
                    None => {
                        self.last_id = self.last_id.max(*id.as_ref());
                        self.books.push(stored.clone());
                    }
                }
                stored
            }
            None => {
                self.last_id += 1;
                let id = BookId::new(self.last_id);
                let stored = book.clone().reconstruct(|b| b.id = Some(id));
                self.books.push(stored.clone());
                stored
            }
        }
    }
}

/// Book store kept in process memory.
///
/// A transaction holds the store's write lock until it is committed, rolled
/// back or dropped, so transactions run one at a time. Changes are made on a
/// copy and only published by `commit`.
#[derive(Debug, Clone, Default)]
pub struct MemoryDatabase {
    store: Arc<RwLock<Store>>,
}

impl MemoryDatabase {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds the store in the given order, assigning ids from 1.
    pub fn with_books(books: impl IntoIterator<Item = Book>) -> Self {
        let mut store = Store::default();
        for book in books {
            store.insert(&book);
        }
        Self {
            store: Arc::new(RwLock::new(store)),
        }
    }
}

#[async_trait::async_trait]
impl DatabaseConnection for MemoryDatabase {
    type Transaction = MemoryTransaction;
    async fn transact(&self) -> error_stack::Result<Self::Transaction, KernelError> {
        let guard = Arc::clone(&self.store).write_owned().await;
        let working = Store::clone(&guard);
        Ok(MemoryTransaction { guard, working })
    }
}

pub struct MemoryTransaction {
    guard: OwnedRwLockWriteGuard<Store>,
    working: Store,
}

#[async_trait::async_trait]
impl Transaction for MemoryTransaction {
    async fn commit(self) -> error_stack::Result<(), KernelError> {
        let MemoryTransaction { mut guard, working } = self;
        *guard = working;
        Ok(())
    }

    async fn roll_back(self) -> error_stack::Result<(), KernelError> {
        Ok(())
    }
}

pub struct MemoryBookRepository;

#[async_trait::async_trait]
impl BookQuery for MemoryBookRepository {
    type Transaction = MemoryTransaction;

    async fn find_by_id(
        &self,
        con: &mut MemoryTransaction,
        id: &BookId,
    ) -> error_stack::Result<Option<Book>, KernelError> {
        let found = con
            .working
            .books
            .iter()
            .find(|book| book.id() == &Some(*id))
            .cloned();
        Ok(found)
    }

    async fn find_by_title(
        &self,
        con: &mut MemoryTransaction,
        title: &BookTitle,
    ) -> error_stack::Result<Option<Book>, KernelError> {
        let found = con
            .working
            .books
            .iter()
            .find(|book| book.title() == title)
            .cloned();
        Ok(found)
    }

    async fn find_all(
        &self,
        con: &mut MemoryTransaction,
        sort: Option<&BookSort>,
    ) -> error_stack::Result<Vec<Book>, KernelError> {
        let mut books = con.working.books.clone();
        if let Some(sort) = sort {
            tracing::debug!(column = sort.column().name(), direction = ?sort.direction(), "sorting books");
            books.sort_by(|a, b| {
                let ordering = compare(sort.column(), a, b);
                match sort.direction() {
                    SortDirection::Ascending => ordering,
                    SortDirection::Descending => ordering.reverse(),
                }
            });
        }
        Ok(books)
    }

    async fn find_by_price_greater_than(
        &self,
        con: &mut MemoryTransaction,
        price: &BookPrice,
    ) -> error_stack::Result<Vec<Book>, KernelError> {
        let books = con
            .working
            .books
            .iter()
            .filter(|book| book.price() > price)
            .cloned()
            .collect();
        Ok(books)
    }

    async fn find_by_in_color(
        &self,
        con: &mut MemoryTransaction,
        in_color: &BookInColor,
    ) -> error_stack::Result<Vec<Book>, KernelError> {
        let books = con
            .working
            .books
            .iter()
            .filter(|book| book.in_color() == in_color)
            .cloned()
            .collect();
        Ok(books)
    }
}

fn compare(column: &BookSortColumn, a: &Book, b: &Book) -> Ordering {
    match column {
        BookSortColumn::Title => a.title().as_ref().cmp(b.title().as_ref()),
        BookSortColumn::Price => a.price().as_ref().total_cmp(b.price().as_ref()),
    }
}

#[async_trait::async_trait]
impl BookModifier for MemoryBookRepository {
    type Transaction = MemoryTransaction;

    async fn save(
        &self,
        con: &mut MemoryTransaction,
        book: &Book,
    ) -> error_stack::Result<Book, KernelError> {
        let stored = con.working.insert(book);
        tracing::debug!(id = ?stored.id(), title = %stored.title().as_ref(), "saved book");
        Ok(stored)
    }

    async fn delete(
        &self,
        con: &mut MemoryTransaction,
        book: &Book,
    ) -> error_stack::Result<(), KernelError> {
        con.working
            .books
            .retain(|stored| stored.id() != book.id() || stored.title() != book.title());
        Ok(())
    }
}

impl DependOnBookQuery for MemoryDatabase {
    type BookQuery = MemoryBookRepository;
    fn book_query(&self) -> &Self::BookQuery {
        &MemoryBookRepository
    }
}

impl DependOnBookModifier for MemoryDatabase {
    type BookModifier = MemoryBookRepository;
    fn book_modifier(&self) -> &Self::BookModifier {
        &MemoryBookRepository
    }
}
