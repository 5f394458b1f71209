use crate::array::Array;
use crate::error::Result;
use crate::number::Number;
use crate::object::Object;

/// Any JSON value.
///
/// Containers (`Array`, `Object`) carry their own non-recursive `Drop`, so a
/// `Value` built arbitrarily deep through the mutation API — not just one
/// parsed from text, which is naturally bounded by the parser's own call
/// stack — can still go out of scope without overflowing the stack.
///
/// ```
/// use jsontree::{Array, Value};
///
/// let mut value = Value::null();
/// for _ in 0..100_000 {
///     let mut array = Array::new();
///     array.push(value);
///     value = Value::Array(array);
/// }
/// // no stack overflow when `value` goes out of scope
/// ```
#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    Null,
    Bool(bool),
    Number(Number),
    String(String),
    Array(Array),
    Object(Object),
}

impl Default for Value {
    fn default() -> Self {
        Value::Null
    }
}

impl Value {
    pub fn null() -> Self {
        Value::Null
    }

    pub fn bool(b: bool) -> Self {
        Value::Bool(b)
    }

    pub fn number(n: impl Into<Number>) -> Self {
        Value::Number(n.into())
    }

    pub fn string(s: impl Into<String>) -> Self {
        Value::String(s.into())
    }

    pub fn array() -> Self {
        Value::Array(Array::new())
    }

    pub fn object() -> Self {
        Value::Object(Object::new())
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_number(&self) -> Option<&Number> {
        match self {
            Value::Number(n) => Some(n),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        self.as_number().map(Number::as_f64)
    }

    pub fn as_i32(&self) -> Option<i32> {
        self.as_number().map(Number::as_i32)
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&Array> {
        match self {
            Value::Array(a) => Some(a),
            _ => None,
        }
    }

    pub fn as_array_mut(&mut self) -> Option<&mut Array> {
        match self {
            Value::Array(a) => Some(a),
            _ => None,
        }
    }

    pub fn as_object(&self) -> Option<&Object> {
        match self {
            Value::Object(o) => Some(o),
            _ => None,
        }
    }

    pub fn as_object_mut(&mut self) -> Option<&mut Object> {
        match self {
            Value::Object(o) => Some(o),
            _ => None,
        }
    }
}

/// Builds an array of numbers in one step.
pub fn int_array(ints: &[i32]) -> Value {
    Value::Array(ints.iter().map(|&n| Value::number(n)).collect())
}

/// Builds an array of numbers in one step.
pub fn float_array(floats: &[f32]) -> Value {
    Value::Array(floats.iter().map(|&n| Value::number(n as f64)).collect())
}

/// Builds an array of numbers in one step.
pub fn double_array(doubles: &[f64]) -> Value {
    Value::Array(doubles.iter().map(|&n| Value::number(n)).collect())
}

/// Builds an array of strings in one step.
pub fn string_array(strings: &[&str]) -> Value {
    Value::Array(strings.iter().map(|&s| Value::string(s)).collect())
}

/// Deep- or shallow-clones `value`.
///
/// With `recurse == false`, containers come back empty. With `recurse ==
/// true`, every descendant is cloned too. Allocation is fallible at each
/// container so a failure partway through a deep clone surfaces as
/// `Err(Error::allocation_failure())` with the partial clone dropped,
/// instead of aborting the process the way an infallible `Clone` would.
pub fn duplicate(value: &Value, recurse: bool) -> Result<Value> {
    match value {
        Value::Null => Ok(Value::Null),
        Value::Bool(b) => Ok(Value::Bool(*b)),
        Value::Number(n) => Ok(Value::Number(*n)),
        Value::String(s) => Ok(Value::String(s.clone())),
        Value::Array(a) => {
            if !recurse {
                return Ok(Value::array());
            }
            let mut out = Array::with_capacity(a.len());
            for child in a.iter() {
                out.push(duplicate(child, true)?);
            }
            Ok(Value::Array(out))
        }
        Value::Object(o) => {
            if !recurse {
                return Ok(Value::object());
            }
            let mut out = Object::new();
            for (key, child) in o.iter() {
                out.add(key.clone(), duplicate(child, true)?);
            }
            Ok(Value::Object(out))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shallow_duplicate_drops_children() {
        let mut array = Array::new();
        array.push(Value::number(1.0));
        let original = Value::Array(array);
        let shallow = duplicate(&original, false).unwrap();
        assert_eq!(shallow.as_array().unwrap().len(), 0);
    }

    #[test]
    fn accessors_round_trip() {
        assert_eq!(Value::bool(true).as_bool(), Some(true));
        assert_eq!(Value::number(3.0).as_f64(), Some(3.0));
        assert_eq!(Value::string("hi").as_str(), Some("hi"));
        assert!(Value::null().is_null());
    }
}
