use std::ops::{Deref, DerefMut};

use crate::media::Media;
use crate::traits::media::HasMedia;

/// A list whose [`media`](MediaContainer::media) combines the media of its
/// members.
#[derive(Debug, Clone, PartialEq)]
pub struct MediaContainer<T> {
    items: Vec<T>,
}

impl<T> MediaContainer<T> {
    pub fn new() -> Self {
        Self { items: Vec::new() }
    }

    pub fn into_inner(self) -> Vec<T> {
        self.items
    }
}

impl<T: HasMedia> MediaContainer<T> {
    /// Left-to-right merge of every member's media, recomputed on each call.
    pub fn media(&self) -> Media {
        self.items
            .iter()
            .fold(Media::new(), |media, item| media + item.media())
    }
}

impl<T> Default for MediaContainer<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Deref for MediaContainer<T> {
    type Target = Vec<T>;

    fn deref(&self) -> &Vec<T> {
        &self.items
    }
}

impl<T> DerefMut for MediaContainer<T> {
    fn deref_mut(&mut self) -> &mut Vec<T> {
        &mut self.items
    }
}

impl<T> From<Vec<T>> for MediaContainer<T> {
    fn from(items: Vec<T>) -> Self {
        Self { items }
    }
}

impl<T> FromIterator<T> for MediaContainer<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self {
            items: iter.into_iter().collect(),
        }
    }
}

impl<T> Extend<T> for MediaContainer<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        self.items.extend(iter);
    }
}

impl<T> IntoIterator for MediaContainer<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

impl<'a, T> IntoIterator for &'a MediaContainer<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}
