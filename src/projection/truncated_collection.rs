use std::num::NonZeroUsize;

use serde::{Serialize, Serializer, ser::SerializeSeq};

/// At most `page_size` leading elements of a source sequence, plus whether the
/// source had more.
///
/// Construction pulls at most `page_size + 1` elements from the source: the
/// extra one is only a lookahead and is dropped. Infinite sources are fine.
///
/// The page is buffered, so the collection can be iterated any number of
/// times even when the source was one-shot. The source itself is never
/// restarted.
#[derive(Debug, Clone, PartialEq)]
pub struct TruncatedCollection<T> {
    items: Vec<T>,
    page_size: NonZeroUsize,
    truncated: bool,
}

impl<T> TruncatedCollection<T> {
    pub fn new<I>(source: I, page_size: NonZeroUsize) -> Self
    where
        I: IntoIterator<Item = T>,
    {
        let limit = page_size.get();
        let mut iter = source.into_iter();
        let items: Vec<T> = iter.by_ref().take(limit).collect();
        let truncated = items.len() == limit && iter.next().is_some();
        Self { items, page_size, truncated }
    }

    pub fn page_size(&self) -> usize {
        self.page_size.get()
    }

    pub fn is_truncated(&self) -> bool {
        self.truncated
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn as_slice(&self) -> &[T] {
        &self.items
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }

    pub fn map<U>(self, f: impl FnMut(T) -> U) -> TruncatedCollection<U> {
        TruncatedCollection {
            items: self.items.into_iter().map(f).collect(),
            page_size: self.page_size,
            truncated: self.truncated,
        }
    }

    /// Like [`Self::map`], stopping at the first error.
    pub fn try_map<U, E>(self, f: impl FnMut(T) -> Result<U, E>) -> Result<TruncatedCollection<U>, E> {
        Ok(TruncatedCollection {
            items: self.items.into_iter().map(f).collect::<Result<Vec<U>, E>>()?,
            page_size: self.page_size,
            truncated: self.truncated,
        })
    }
}

impl<T> IntoIterator for TruncatedCollection<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

impl<'a, T> IntoIterator for &'a TruncatedCollection<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

impl<T: Serialize> Serialize for TruncatedCollection<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut seq = serializer.serialize_seq(Some(self.items.len()))?;
        for item in &self.items {
            seq.serialize_element(item)?;
        }
        seq.end()
    }
}
