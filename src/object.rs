use std::iter::FromIterator;
use std::mem::ManuallyDrop;
use std::ops::{Deref, DerefMut};
use std::ptr;

use crate::drop;
use crate::value::Value;

/// An ordered `Vec<(String, Value)>` with a non-recursive drop impl.
///
/// Unlike a sorted map, insertion order is preserved and duplicate keys are
/// allowed — lookup returns the first case-insensitive match, matching the
/// behavior this type is grown from. A `BTreeMap` would silently collapse
/// duplicate keys and reorder entries, which this design explicitly rejects.
#[derive(Debug, Default)]
pub struct Object {
    inner: Vec<(String, Value)>,
}

impl Drop for Object {
    fn drop(&mut self) {
        self.inner
            .drain(..)
            .for_each(|(_, value)| drop::safely(value));
    }
}

/// Takes the inner `Vec` without running `Object`'s `Drop`.
pub(crate) fn take(object: Object) -> Vec<(String, Value)> {
    let object = ManuallyDrop::new(object);
    unsafe { ptr::read(&object.inner) }
}

fn key_eq(a: &str, b: &str) -> bool {
    a.eq_ignore_ascii_case(b)
}

impl Object {
    pub fn new() -> Self {
        Object { inner: Vec::new() }
    }

    fn position(&self, key: &str) -> Option<usize> {
        self.inner.iter().position(|(k, _)| key_eq(k, key))
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.position(key).map(|i| &self.inner[i].1)
    }

    pub fn get_mut(&mut self, key: &str) -> Option<&mut Value> {
        match self.position(key) {
            Some(i) => Some(&mut self.inner[i].1),
            None => None,
        }
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.position(key).is_some()
    }

    /// Appends a new entry without checking for an existing key.
    pub fn add(&mut self, key: impl Into<String>, item: Value) {
        self.inner.push((key.into(), item));
    }

    pub fn add_null(&mut self, key: impl Into<String>) {
        self.add(key, Value::null());
    }

    pub fn add_bool(&mut self, key: impl Into<String>, b: bool) {
        self.add(key, Value::bool(b));
    }

    pub fn add_number(&mut self, key: impl Into<String>, n: f64) {
        self.add(key, Value::number(n));
    }

    pub fn add_string(&mut self, key: impl Into<String>, s: impl Into<String>) {
        self.add(key, Value::string(s));
    }

    pub fn detach(&mut self, key: &str) -> Option<Value> {
        self.position(key).map(|i| self.inner.remove(i).1)
    }

    pub fn delete(&mut self, key: &str) {
        self.detach(key);
    }

    pub fn replace(&mut self, key: &str, item: Value) -> Option<Value> {
        match self.position(key) {
            Some(i) => Some(std::mem::replace(&mut self.inner[i].1, item)),
            None => None,
        }
    }
}

impl Clone for Object {
    fn clone(&self) -> Self {
        Object {
            inner: self.inner.clone(),
        }
    }
}

impl Deref for Object {
    type Target = [(String, Value)];

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

impl DerefMut for Object {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.inner
    }
}

impl PartialEq for Object {
    fn eq(&self, other: &Self) -> bool {
        self.inner == other.inner
    }
}

impl IntoIterator for Object {
    type Item = (String, Value);
    type IntoIter = <Vec<(String, Value)> as IntoIterator>::IntoIter;

    fn into_iter(self) -> Self::IntoIter {
        take(self).into_iter()
    }
}

impl<'a> IntoIterator for &'a Object {
    type Item = &'a (String, Value);
    type IntoIter = <&'a [(String, Value)] as IntoIterator>::IntoIter;

    fn into_iter(self) -> Self::IntoIter {
        self.inner.iter()
    }
}

impl<'a> IntoIterator for &'a mut Object {
    type Item = &'a mut (String, Value);
    type IntoIter = <&'a mut [(String, Value)] as IntoIterator>::IntoIter;

    fn into_iter(self) -> Self::IntoIter {
        self.inner.iter_mut()
    }
}

impl FromIterator<(String, Value)> for Object {
    fn from_iter<I>(iter: I) -> Self
    where
        I: IntoIterator<Item = (String, Value)>,
    {
        Object {
            inner: Vec::from_iter(iter),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_is_case_insensitive_and_first_match() {
        let mut o = Object::new();
        o.add("Name", Value::string("a"));
        o.add("name", Value::string("b"));
        assert_eq!(o.get("NAME").unwrap().as_str(), Some("a"));
        assert_eq!(o.len(), 2);
    }

    #[test]
    fn replace_and_detach() {
        let mut o = Object::new();
        o.add_number("x", 1.0);
        let old = o.replace("x", Value::number(2.0)).unwrap();
        assert_eq!(old.as_f64(), Some(1.0));
        assert_eq!(o.get("x").unwrap().as_f64(), Some(2.0));

        let detached = o.detach("x").unwrap();
        assert_eq!(detached.as_f64(), Some(2.0));
        assert!(o.get("x").is_none());
    }

    #[test]
    fn missing_key_operations_are_noop() {
        let mut o = Object::new();
        assert!(o.detach("missing").is_none());
        assert!(o.replace("missing", Value::null()).is_none());
    }
}
