//! A self-contained JSON value tree: parse bytes into a [`Value`], mutate it
//! programmatically, and serialize it back out compact or pretty-printed.
//!
//! ```
//! let value = jsontree::parse(br#"{"a":[1,2,3]}"#).unwrap();
//! assert_eq!(value.as_object().unwrap().get("a").unwrap().as_array().unwrap().len(), 3);
//! assert_eq!(jsontree::to_string(&value, false), r#"{"a":[1,2,3]}"#);
//! ```

mod array;
mod buffer;
mod drop;
mod error;
mod lex;
mod minify;
mod number;
mod object;
mod parser;
mod ser;
mod value;

pub use array::Array;
pub use buffer::Buffer;
pub use error::{Error, Result};
pub use minify::minify_in_place;
pub use number::Number;
pub use object::Object;
pub use parser::{last_error_position, parse, parse_with_options};
pub use ser::{to_string, to_string_buffered};
pub use value::{double_array, duplicate, float_array, int_array, string_array, Value};
