use std::iter::FromIterator;
use std::mem::ManuallyDrop;
use std::ops::{Deref, DerefMut};
use std::ptr;

use crate::drop;
use crate::value::Value;

/// A `Vec<Value>` with a non-recursive drop impl, so a tree built entirely
/// through the mutation API (no parser recursion limit to bound its depth)
/// can still be torn down without overflowing the stack.
#[derive(Debug, Default)]
pub struct Array {
    inner: Vec<Value>,
}

impl Drop for Array {
    fn drop(&mut self) {
        self.inner.drain(..).for_each(drop::safely);
    }
}

/// Takes the inner `Vec` without running `Array`'s `Drop`.
pub(crate) fn take(array: Array) -> Vec<Value> {
    let array = ManuallyDrop::new(array);
    unsafe { ptr::read(&array.inner) }
}

impl Array {
    pub fn new() -> Self {
        Array { inner: Vec::new() }
    }

    pub fn with_capacity(cap: usize) -> Self {
        Array {
            inner: Vec::with_capacity(cap),
        }
    }

    pub fn at(&self, index: usize) -> Option<&Value> {
        self.inner.get(index)
    }

    pub fn at_mut(&mut self, index: usize) -> Option<&mut Value> {
        self.inner.get_mut(index)
    }

    pub fn push(&mut self, item: Value) {
        self.inner.push(item);
    }

    pub fn insert(&mut self, index: usize, item: Value) {
        if index >= self.inner.len() {
            self.inner.push(item);
        } else {
            self.inner.insert(index, item);
        }
    }

    pub fn detach(&mut self, index: usize) -> Option<Value> {
        if index < self.inner.len() {
            Some(self.inner.remove(index))
        } else {
            None
        }
    }

    pub fn delete(&mut self, index: usize) {
        self.detach(index);
    }

    pub fn replace(&mut self, index: usize, item: Value) -> Option<Value> {
        if index < self.inner.len() {
            Some(std::mem::replace(&mut self.inner[index], item))
        } else {
            None
        }
    }

    /// Clones `item` and appends the clone, leaving the original untouched.
    pub fn append_reference(&mut self, item: &Value) {
        self.inner.push(item.clone());
    }
}

impl Clone for Array {
    fn clone(&self) -> Self {
        Array {
            inner: self.inner.clone(),
        }
    }
}

impl Deref for Array {
    type Target = [Value];

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

impl DerefMut for Array {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.inner
    }
}

impl PartialEq for Array {
    fn eq(&self, other: &Self) -> bool {
        self.inner == other.inner
    }
}

impl IntoIterator for Array {
    type Item = Value;
    type IntoIter = <Vec<Value> as IntoIterator>::IntoIter;

    fn into_iter(self) -> Self::IntoIter {
        take(self).into_iter()
    }
}

impl<'a> IntoIterator for &'a Array {
    type Item = &'a Value;
    type IntoIter = <&'a [Value] as IntoIterator>::IntoIter;

    fn into_iter(self) -> Self::IntoIter {
        self.inner.iter()
    }
}

impl<'a> IntoIterator for &'a mut Array {
    type Item = &'a mut Value;
    type IntoIter = <&'a mut [Value] as IntoIterator>::IntoIter;

    fn into_iter(self) -> Self::IntoIter {
        self.inner.iter_mut()
    }
}

impl FromIterator<Value> for Array {
    fn from_iter<I>(iter: I) -> Self
    where
        I: IntoIterator<Item = Value>,
    {
        Array {
            inner: Vec::from_iter(iter),
        }
    }
}
