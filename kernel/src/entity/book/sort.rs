use crate::entity::SortDirection;
use vodca::References;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BookSortColumn {
    Title,
    Price,
}

impl BookSortColumn {
    /// Column names are matched exactly; there is no fallback column.
    pub fn parse(column: &str) -> Option<Self> {
        match column {
            "title" => Some(Self::Title),
            "price" => Some(Self::Price),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Title => "title",
            Self::Price => "price",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, References)]
pub struct BookSort {
    direction: SortDirection,
    column: BookSortColumn,
}

impl BookSort {
    pub fn new(direction: SortDirection, column: BookSortColumn) -> Self {
        Self { direction, column }
    }
}

#[cfg(test)]
mod test {
    use super::BookSortColumn;

    #[test]
    fn known_columns() {
        assert_eq!(BookSortColumn::parse("title"), Some(BookSortColumn::Title));
        assert_eq!(BookSortColumn::parse("price"), Some(BookSortColumn::Price));
        assert_eq!(BookSortColumn::parse("Title"), None);
        assert_eq!(BookSortColumn::parse("unknown"), None);
    }
}
