//! # Presence markers
//!
//! Both graph encodings are built from "boolean-like" values: a dense matrix
//! of `0`/`1` or `false`/`true` flags, or a labeled mapping whose inner values
//! are markers. [`Presence`] decides which of those values count as an edge.
//!
//! ## Implementations
//!
//! - `bool`: the value itself.
//! - Integer and float primitives: anything other than zero.
//! - `()`: always present, so a `HashMap<L, HashMap<L, ()>>` reads as a set.
//! - `Option<T>`: present iff `Some` and the inner value is present.
//! - `serde_json::Value` (feature `serde`): the usual truthiness, so `false`,
//!   `null`, `0`, `""`, `[]` and `{}` are absent.

use duplicate::duplicate;

pub trait Presence {
    fn is_present(&self) -> bool;
}

impl Presence for bool {
    fn is_present(&self) -> bool {
        *self
    }
}

impl Presence for () {
    fn is_present(&self) -> bool {
        true
    }
}

impl<T: Presence> Presence for Option<T> {
    fn is_present(&self) -> bool {
        self.as_ref().is_some_and(Presence::is_present)
    }
}

impl<T: Presence + ?Sized> Presence for &T {
    fn is_present(&self) -> bool {
        (**self).is_present()
    }
}

duplicate! {
    [types zero;
        [f32] [0.0];
        [f64] [0.0];
        [i8] [0];
        [i16] [0];
        [i32] [0];
        [i64] [0];
        [i128] [0];
        [isize] [0];
        [u8] [0];
        [u16] [0];
        [u32] [0];
        [u64] [0];
        [u128] [0];
        [usize] [0];
        ]

    impl Presence for types {
        fn is_present(&self) -> bool {
            *self != zero
        }
    }
}

#[cfg(feature = "serde")]
impl Presence for serde_json::Value {
    fn is_present(&self) -> bool {
        use serde_json::Value;
        match self {
            Value::Null => false,
            Value::Bool(b) => *b,
            Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
            Value::String(s) => !s.is_empty(),
            Value::Array(a) => !a.is_empty(),
            Value::Object(o) => !o.is_empty(),
        }
    }
}
