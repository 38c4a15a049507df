use std::collections::BTreeMap;
use std::fmt;

use rand::Rng;

use crate::shuffle::fisher_yates;

/// Stable per-row identity, assigned from the data-row index at load time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct BookId(pub usize);

impl fmt::Display for BookId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookRecord {
    pub id: BookId,
    pub title: Option<String>,
    pub author: Option<String>,
    pub status: Option<String>,
    pub proposer: Option<String>,
    /// Columns that are not recognized, keyed by header name.
    pub extra: BTreeMap<String, String>,
}

impl BookRecord {
    pub fn new(id: BookId) -> Self {
        Self {
            id,
            title: None,
            author: None,
            status: None,
            proposer: None,
            extra: BTreeMap::new(),
        }
    }

    pub fn title_or_blank(&self) -> &str {
        self.title.as_deref().unwrap_or("")
    }

    pub fn author_or_blank(&self) -> &str {
        self.author.as_deref().unwrap_or("")
    }

    pub fn proposer_or_blank(&self) -> &str {
        self.proposer.as_deref().unwrap_or("")
    }

    pub fn has_status(&self, term: &str) -> bool {
        self.status.as_deref() == Some(term)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BookCollection {
    books: Vec<BookRecord>,
}

impl BookCollection {
    pub fn new(books: Vec<BookRecord>) -> Self {
        Self { books }
    }

    pub fn len(&self) -> usize {
        self.books.len()
    }

    pub fn is_empty(&self) -> bool {
        self.books.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, BookRecord> {
        self.books.iter()
    }

    pub fn get(&self, index: usize) -> Option<&BookRecord> {
        self.books.get(index)
    }

    pub fn find(&self, id: BookId) -> Option<&BookRecord> {
        self.books.iter().find(|book| book.id == id)
    }

    pub fn ids(&self) -> Vec<BookId> {
        self.books.iter().map(|book| book.id).collect()
    }

    /// Records whose status equals `term` exactly, in their original order.
    /// `None` (the "all" choice) returns the collection unchanged.
    pub fn filter_by_status(&self, term: Option<&str>) -> Self {
        match term {
            None => self.clone(),
            Some(term) => Self {
                books: self
                    .books
                    .iter()
                    .filter(|book| book.has_status(term))
                    .cloned()
                    .collect(),
            },
        }
    }

    /// A new collection without the record `id`; order of the rest is kept.
    pub fn without(&self, id: BookId) -> Self {
        Self {
            books: self
                .books
                .iter()
                .filter(|book| book.id != id)
                .cloned()
                .collect(),
        }
    }

    pub fn shuffled<R: Rng + ?Sized>(&self, rng: &mut R) -> Self {
        let mut books = self.books.clone();
        fisher_yates(&mut books, rng);
        Self { books }
    }

    /// Distinct non-empty statuses in order of first appearance.
    pub fn statuses(&self) -> Vec<String> {
        let mut statuses = Vec::<String>::new();
        for status in self.books.iter().filter_map(|book| book.status.as_deref()) {
            if status.is_empty() || statuses.iter().any(|known| known == status) {
                continue;
            }
            statuses.push(status.to_string());
        }
        statuses
    }
}

impl<'a> IntoIterator for &'a BookCollection {
    type Item = &'a BookRecord;
    type IntoIter = std::slice::Iter<'a, BookRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.books.iter()
    }
}

impl FromIterator<BookRecord> for BookCollection {
    fn from_iter<T: IntoIterator<Item = BookRecord>>(iter: T) -> Self {
        Self {
            books: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::{BookCollection, BookId, BookRecord};
    use crate::test_support::book;

    fn sample() -> BookCollection {
        BookCollection::new(vec![
            book(0, "Dune", "Leído"),
            book(1, "Emma", "Pendiente"),
            book(2, "Ubik", "Leído"),
            book(3, "Solaris", ""),
            book(4, "Kindred", "Pendiente"),
        ])
    }

    #[test]
    fn statuses_keep_first_appearance_order_and_skip_empty() {
        assert_eq!(sample().statuses(), vec!["Leído", "Pendiente"]);
    }

    #[test]
    fn statuses_skip_records_without_status() {
        let mut untitled = BookRecord::new(BookId(9));
        untitled.title = Some("Untitled".to_string());
        let books = BookCollection::new(vec![untitled, book(1, "Emma", "Leído")]);
        assert_eq!(books.statuses(), vec!["Leído"]);
    }

    #[test]
    fn filter_by_status_keeps_matching_records_in_order() {
        let filtered = sample().filter_by_status(Some("Leído"));
        assert_eq!(filtered.ids(), vec![BookId(0), BookId(2)]);
    }

    #[test]
    fn filter_by_status_is_exact_match() {
        assert!(sample().filter_by_status(Some("leído")).is_empty());
        assert!(sample().filter_by_status(Some("Leído ")).is_empty());
    }

    #[test]
    fn filter_without_term_returns_everything() {
        assert_eq!(sample().filter_by_status(None), sample());
    }

    #[test]
    fn without_removes_only_the_given_record() {
        let books = sample().without(BookId(2));
        assert_eq!(books.ids(), vec![BookId(0), BookId(1), BookId(3), BookId(4)]);
    }

    #[test]
    fn without_unknown_id_is_a_no_op() {
        assert_eq!(sample().without(BookId(42)), sample());
    }

    proptest! {
        #[test]
        fn without_preserves_relative_order(len in 1usize..40, pick in 0usize..40) {
            let books: BookCollection = (0..len)
                .map(|index| book(index, &format!("b{index}"), "x"))
                .collect();
            let removed = BookId(pick % len);
            let remaining = books.without(removed);

            prop_assert_eq!(remaining.len(), len - 1);
            let expected: Vec<BookId> = books.ids().into_iter().filter(|id| *id != removed).collect();
            prop_assert_eq!(remaining.ids(), expected);
        }

        #[test]
        fn filter_yields_exactly_the_matching_subsequence(
            statuses in proptest::collection::vec(0u8..3, 0..30)
        ) {
            let names = ["Leído", "Pendiente", ""];
            let books: BookCollection = statuses
                .iter()
                .enumerate()
                .map(|(index, status)| book(index, &format!("b{index}"), names[*status as usize]))
                .collect();

            let filtered = books.filter_by_status(Some("Leído"));
            let expected: Vec<BookId> = statuses
                .iter()
                .enumerate()
                .filter(|(_, status)| **status == 0)
                .map(|(index, _)| BookId(index))
                .collect();
            prop_assert_eq!(filtered.ids(), expected);
        }
    }
}
