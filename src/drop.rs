use crate::array;
use crate::object;
use crate::value::Value;

/// Drops `value` without recursing.
///
/// `Array` and `Object` route through here instead of relying on the
/// compiler-generated recursive drop glue, so a container built arbitrarily
/// deep through the mutation API still tears down with a flat work list
/// instead of a call stack.
pub(crate) fn safely(value: Value) {
    let mut stack = vec![value];
    while let Some(value) = stack.pop() {
        match value {
            Value::Array(a) => stack.extend(array::take(a)),
            Value::Object(o) => stack.extend(object::take(o).into_iter().map(|(_, v)| v)),
            _ => {}
        }
    }
}
