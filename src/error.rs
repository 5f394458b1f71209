use std::fmt::{self, Debug, Display};

#[cfg(feature = "ufmt1")]
#[macro_use]
macro_rules! err {
    // IMPORTANT use `tt` fragments instead of `expr` fragments (i.e. `$($exprs:expr),*`)
    ($($tt:tt)*) => {{
        let mut s = String::new();
        ufmt::uwrite!(&mut s, $($tt)*).unwrap();
        s
    }}
}

#[cfg(not(feature = "ufmt1"))]
#[macro_use]
macro_rules! err {
    ($($tt:tt)*) => {{
        format!($($tt)*)
    }}
}

///////////////////////////////////////////////////////////////////////////////

pub type Result<T> = std::result::Result<T, Error>;

///////////////////////////////////////////////////////////////////////////////

/// Error produced while parsing, serializing or mutating a value tree.
///
/// Kept as a message plus an optional byte offset rather than a deep enum:
/// every error here is either shown to a caller once or matched on through
/// [`Error::position`] / [`Error::is_allocation_failure`], so a richer
/// representation would just be converted back into a string downstream.
pub struct Error {
    msg: String,
    position: Option<usize>,
    allocation_failure: bool,
}

impl Error {
    /// A syntax error at a specific byte offset into the original input.
    pub(crate) fn syntax(msg: &str, position: usize) -> Self {
        Error {
            msg: err!("{} at byte {}", msg, position),
            position: Some(position),
            allocation_failure: false,
        }
    }

    /// A fallible allocation (`try_reserve`) failed.
    pub fn allocation_failure() -> Self {
        Error {
            msg: "allocation failure".to_string(),
            position: None,
            allocation_failure: true,
        }
    }

    /// Generic error not tied to a byte offset.
    pub fn generic(msg: String) -> Self {
        Error {
            msg,
            position: None,
            allocation_failure: false,
        }
    }

    /// Byte offset of a syntax error, if this error came from the parser.
    pub fn position(&self) -> Option<usize> {
        self.position
    }

    /// Whether this error came from a failed `try_reserve`.
    pub fn is_allocation_failure(&self) -> bool {
        self.allocation_failure
    }
}

impl Debug for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(&self.msg)
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(&self.msg)
    }
}

impl std::error::Error for Error {}
