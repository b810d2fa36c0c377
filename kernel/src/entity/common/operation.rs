const ASCENDING: &str = "asc";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SortDirection {
    Ascending,
    Descending,
}

impl SortDirection {
    /// Only `asc` (in any ASCII case) resolves to ascending order.
    /// Every other value, unknown ones included, falls back to descending.
    pub fn resolve(direction: impl AsRef<str>) -> Self {
        if direction.as_ref().eq_ignore_ascii_case(ASCENDING) {
            Self::Ascending
        } else {
            Self::Descending
        }
    }
}

#[cfg(test)]
mod test {
    use super::SortDirection;

    #[test]
    fn asc_resolves_ascending() {
        assert_eq!(SortDirection::resolve("asc"), SortDirection::Ascending);
        assert_eq!(SortDirection::resolve("ASC"), SortDirection::Ascending);
    }

    #[test]
    fn everything_else_falls_back_to_descending() {
        for direction in ["desc", "unknown", "", "ascending", " asc"] {
            assert_eq!(SortDirection::resolve(direction), SortDirection::Descending);
        }
    }
}
