//! Ordered name -> value storage for keyframe entities.
//!
//! Positions are stable: entries are only ever appended, and keyframe
//! interpolation pairs entries by index rather than by name.

use std::slice;

#[derive(Clone, Debug, PartialEq)]
pub struct Registry<T> {
    names: Vec<String>,
    values: Vec<T>,
}

impl<T> Registry<T> {
    pub fn new() -> Self {
        Self {
            names: Vec::new(),
            values: Vec::new(),
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn push<S: Into<String>>(&mut self, name: S, value: T) {
        self.names.push(name.into());
        self.values.push(value);
    }

    pub fn position(&self, name: &str) -> Option<usize> {
        self.names.iter().position(|n| n == name)
    }

    pub fn get(&self, name: &str) -> Option<&T> {
        self.position(name).map(|i| &self.values[i])
    }

    /// Returns the entry called `name`, appending `default()` first if there is none.
    pub fn get_or_insert_with<F: FnOnce() -> T>(&mut self, name: &str, default: F) -> &mut T {
        let index = match self.position(name) {
            Some(index) => index,
            None => {
                self.push(name, default());
                self.values.len() - 1
            }
        };

        &mut self.values[index]
    }

    #[inline]
    pub fn names(&self) -> &[String] {
        &self.names
    }

    #[inline]
    pub fn values(&self) -> &[T] {
        &self.values
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &T)> {
        self.names.iter().map(String::as_str).zip(self.values.iter())
    }
}

impl<T> Default for Registry<T> {
    fn default() -> Self {
        Registry::new()
    }
}

impl<'a, T> IntoIterator for &'a Registry<T> {
    type Item = &'a T;
    type IntoIter = slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.values.iter()
    }
}
