//! A compact 6-byte ("48-bit") floating point format.
//!
//! [`Real48`] packs a sign bit, an 8-bit exponent biased by 129 and a
//! 39-bit fraction into six bytes. The crate provides the bit-layout
//! codec between that format and the native IEEE-754 types: encoding
//! from `f64`/`f32` (fallible, since the format has no NaN, no infinity
//! and a narrower exponent range), exact decoding back to `f64`, and
//! arithmetic/comparison operators built by promoting to `f64`,
//! computing there and re-encoding the result.
//!
//! ```
//! use std::convert::TryFrom;
//! use real48::{Class, Real48};
//!
//! let x = Real48::try_from(1.5)?;
//! assert_eq!(f64::from(x), 1.5);
//! assert_eq!(x.classify(), Class::Normal);
//!
//! let y = (x * x)?;
//! assert_eq!(f64::from(y), 2.25);
//!
//! // 1e100's exponent does not fit in eight biased bits.
//! assert!(Real48::try_from(1e100).is_err());
//! # Ok::<(), real48::OverflowError>(())
//! ```

mod binary64;
mod real48;

pub use crate::real48::{Class, OverflowError, Real48};
