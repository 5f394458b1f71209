/// A JSON number: a double-precision magnitude plus a cached integer
/// approximation.
///
/// The integer is the double truncated toward zero and clamped to the
/// platform's 32-bit integer range; it exists for callers that only ever
/// deal in whole numbers, matching the original design this type is grown
/// from. The serializer always decides its output form from the double, not
/// from this cache.
#[derive(Clone, Copy, Debug)]
pub struct Number {
    double: f64,
    int: i32,
}

impl Number {
    pub fn new(double: f64) -> Self {
        let int = if double.is_finite() { double as i32 } else { 0 };
        Number { double, int }
    }

    pub fn as_f64(&self) -> f64 {
        self.double
    }

    pub fn as_i32(&self) -> i32 {
        self.int
    }
}

impl PartialEq for Number {
    fn eq(&self, other: &Self) -> bool {
        self.double == other.double
    }
}

impl From<f64> for Number {
    fn from(double: f64) -> Self {
        Number::new(double)
    }
}

impl From<i32> for Number {
    fn from(int: i32) -> Self {
        Number {
            double: int as f64,
            int,
        }
    }
}

impl From<u32> for Number {
    fn from(int: u32) -> Self {
        Number::new(int as f64)
    }
}
