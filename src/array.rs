//! Ordered arrays of functions, as produced by the `+` and `*` operators.

use std::ops::{Add, Index};

use crate::error::{Error, Result};
use crate::function::Function;

/// An ordered sequence of functions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FunctionArray<F> {
    items: Vec<F>,
}

impl<F> FunctionArray<F> {
    pub fn new(items: Vec<F>) -> Self {
        Self { items }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, F> {
        self.items.iter()
    }

    pub fn as_slice(&self) -> &[F] {
        &self.items
    }

    pub fn into_vec(self) -> Vec<F> {
        self.items
    }

    /// Concatenates two arrays, `self` first.
    pub fn concat(mut self, other: FunctionArray<F>) -> Self {
        self.items.extend(other.items);
        self
    }

    pub fn push(&mut self, f: F) {
        self.items.push(f);
    }

    /// Prepends `f`.
    pub fn prepend(mut self, f: F) -> Self {
        self.items.insert(0, f);
        self
    }
}

impl<F: Clone> FunctionArray<F> {
    /// Array of `n` copies of `f`.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidArgument`] if `n` is negative.
    pub fn repeat(f: &F, n: i64) -> Result<Self> {
        let n = usize::try_from(n).map_err(|_| {
            Error::InvalidArgument(format!("expected non-negative multiplier, got {}", n))
        })?;
        Ok(Self { items: vec![f.clone(); n] })
    }
}

impl<F> Default for FunctionArray<F> {
    fn default() -> Self {
        Self { items: Vec::new() }
    }
}

impl<F> From<Vec<F>> for FunctionArray<F> {
    fn from(items: Vec<F>) -> Self {
        Self { items }
    }
}

impl<F> FromIterator<F> for FunctionArray<F> {
    fn from_iter<I: IntoIterator<Item = F>>(iter: I) -> Self {
        Self {
            items: iter.into_iter().collect(),
        }
    }
}

impl<F> IntoIterator for FunctionArray<F> {
    type Item = F;
    type IntoIter = std::vec::IntoIter<F>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

impl<'a, F> IntoIterator for &'a FunctionArray<F> {
    type Item = &'a F;
    type IntoIter = std::slice::Iter<'a, F>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

impl<F> Index<usize> for FunctionArray<F> {
    type Output = F;

    fn index(&self, index: usize) -> &Self::Output {
        &self.items[index]
    }
}

/// Appends a function to the array.
impl<F: Function> Add<F> for FunctionArray<F> {
    type Output = FunctionArray<F>;

    fn add(mut self, rhs: F) -> Self::Output {
        self.items.push(rhs);
        self
    }
}

impl<F> Add for FunctionArray<F> {
    type Output = FunctionArray<F>;

    fn add(self, rhs: Self) -> Self::Output {
        self.concat(rhs)
    }
}
