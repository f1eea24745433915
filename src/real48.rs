use crate::binary64::{self, Binary64};
use core::cmp::Ordering;
use core::convert::TryFrom;
use core::fmt;
use core::num::FpCategory;
use core::ops::{Add, Div, Mul, Neg, Sub};
use num_traits::{FromPrimitive, ToPrimitive};
use thiserror::Error;

const FRACTION_BITS: u32 = 39;
const FRACTION_MASK: u64 = (1 << FRACTION_BITS) - 1;
const EXPONENT_SHIFT: u32 = FRACTION_BITS;
const EXPONENT_MASK: u64 = 0xFF;
const SIGN_SHIFT: u32 = 47;

/// Bias of the stored 8-bit exponent.
const EXPONENT_BIAS: i32 = 129;

/// How far a binary64 fraction is shifted down to fit in 39 bits.
const FRACTION_SHIFT: u32 = binary64::FRACTION_BITS - FRACTION_BITS;

/// A value can not be represented in the requested format.
///
/// This is the only error the codec produces. The variants record which
/// conversion rejected the value; all of them mean "out of range for the
/// target format" one way or another.
#[derive(Clone, Copy, Debug, PartialEq, Error)]
pub enum OverflowError {
    /// The input was NaN or an infinity, neither of which has a Real48
    /// encoding.
    #[error("{0} is either NaN or infinite")]
    NotFinite(f64),
    /// The input's exponent falls outside the 8-bit biased range.
    #[error("{0} can not be represented in Real48")]
    Unrepresentable(f64),
    /// The decoded value falls outside f32's finite normal range.
    #[error("{0} can not be converted to float")]
    Narrow(f64),
}

/// The two classes a Real48 value can belong to. There are no NaNs,
/// infinities or subnormals in the format.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Class {
    Zero,
    Normal,
}

/// A 6-byte floating point number.
///
/// The 48 bits hold a 39-bit fraction in bits 0-38, an 8-bit exponent
/// (bias 129) in bits 39-46 and a sign in bit 47. An exponent field of 0
/// is the unique zero value; every other exponent denotes a normal number
/// with an implicit leading one. Stored least significant byte first.
///
/// Construction from a native float is fallible, since the format can
/// hold neither non-finite values nor magnitudes outside roughly
/// [2⁻¹²⁸, 2¹²⁷). Conversion back to `f64` always succeeds and is exact:
/// a successful encode followed by a decode loses nothing beyond the
/// initial truncation of the fraction to 39 bits.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Real48([u8; 6]);

impl Real48 {
    /// The zero value; all fields 0.
    pub const ZERO: Real48 = Real48::from_fields(0, 0, 0);
    /// Smallest positive normal value, 2⁻¹²⁸.
    pub const MIN_POSITIVE: Real48 = Real48::from_fields(0, 1, 0);
    /// Largest representable value, (2 − 2⁻³⁹) × 2¹²⁶.
    pub const MAX: Real48 = Real48::from_fields(0, 255, FRACTION_MASK);
    /// Smallest relative increment above 1, 2⁻³⁹.
    pub const EPSILON: Real48 = Real48::from_fields(0, 90, 0);

    const fn from_fields(sign: u8, exponent: u8, fraction: u64) -> Real48 {
        let bits = ((sign as u64 & 1) << SIGN_SHIFT)
            | ((exponent as u64) << EXPONENT_SHIFT)
            | (fraction & FRACTION_MASK);

        Real48([
            bits as u8,
            (bits >> 8) as u8,
            (bits >> 16) as u8,
            (bits >> 24) as u8,
            (bits >> 32) as u8,
            (bits >> 40) as u8,
        ])
    }

    fn bits(&self) -> u64 {
        (self.0[0] as u64)
            | (self.0[1] as u64) << 8
            | (self.0[2] as u64) << 16
            | (self.0[3] as u64) << 24
            | (self.0[4] as u64) << 32
            | (self.0[5] as u64) << 40
    }

    fn sign_field(&self) -> u8 {
        (self.bits() >> SIGN_SHIFT) as u8
    }

    fn exponent_field(&self) -> u8 {
        ((self.bits() >> EXPONENT_SHIFT) & EXPONENT_MASK) as u8
    }

    fn fraction_field(&self) -> u64 {
        self.bits() & FRACTION_MASK
    }

    /// The raw wire layout, least significant byte first.
    pub fn to_le_bytes(self) -> [u8; 6] {
        self.0
    }

    /// `Class::Zero` when the exponent field is 0, `Class::Normal`
    /// otherwise.
    pub fn classify(&self) -> Class {
        if self.exponent_field() == 0 {
            Class::Zero
        } else {
            Class::Normal
        }
    }

    /// In-place addition; on overflow `self` is left untouched.
    pub fn add_assign(&mut self, rhs: Real48) -> Result<(), OverflowError> {
        *self = (*self + rhs)?;
        Ok(())
    }

    /// In-place subtraction; on overflow `self` is left untouched.
    pub fn sub_assign(&mut self, rhs: Real48) -> Result<(), OverflowError> {
        *self = (*self - rhs)?;
        Ok(())
    }

    /// In-place multiplication; on overflow `self` is left untouched.
    pub fn mul_assign(&mut self, rhs: Real48) -> Result<(), OverflowError> {
        *self = (*self * rhs)?;
        Ok(())
    }

    /// In-place division; on overflow `self` is left untouched.
    pub fn div_assign(&mut self, rhs: Real48) -> Result<(), OverflowError> {
        *self = (*self / rhs)?;
        Ok(())
    }
}

impl TryFrom<f64> for Real48 {
    type Error = OverflowError;

    fn try_from(number: f64) -> Result<Real48, OverflowError> {
        match number.classify() {
            FpCategory::Infinite | FpCategory::Nan => Err(OverflowError::NotFinite(number)),
            // Negative zero loses its sign here, and subnormal magnitudes
            // collapse to zero rather than to the nearest representable
            // value.
            FpCategory::Zero | FpCategory::Subnormal => Ok(Real48::ZERO),
            FpCategory::Normal => {
                let b64 = Binary64::unpack(number);
                let exponent = b64.exponent as i32 - binary64::EXPONENT_BIAS + EXPONENT_BIAS;

                // Exponent field 0 is reserved for zero, so the smallest
                // normal the format accepts is 2^-128.
                if exponent < 1 || exponent > 255 {
                    return Err(OverflowError::Unrepresentable(number));
                }

                let fraction = b64.fraction >> FRACTION_SHIFT;

                Ok(Real48::from_fields(b64.sign, exponent as u8, fraction))
            }
        }
    }
}

impl TryFrom<f32> for Real48 {
    type Error = OverflowError;

    fn try_from(number: f32) -> Result<Real48, OverflowError> {
        Real48::try_from(f64::from(number))
    }
}

impl From<Real48> for f64 {
    fn from(number: Real48) -> f64 {
        let exponent = number.exponent_field();

        if exponent == 0 {
            return 0.0;
        }

        Binary64 {
            sign: number.sign_field(),
            exponent: (exponent as i32 - EXPONENT_BIAS + binary64::EXPONENT_BIAS) as u16,
            fraction: number.fraction_field() << FRACTION_SHIFT,
        }
        .pack()
    }
}

impl TryFrom<Real48> for f32 {
    type Error = OverflowError;

    fn try_from(number: Real48) -> Result<f32, OverflowError> {
        let d = f64::from(number);

        // Note that this rejects zero as well: its magnitude sits below
        // f32's normal range just like any other underflowing value.
        if d.abs() > f64::from(f32::MAX) || d.abs() < f64::from(f32::MIN_POSITIVE) {
            return Err(OverflowError::Narrow(d));
        }

        Ok(d as f32)
    }
}

impl Add for Real48 {
    type Output = Result<Real48, OverflowError>;

    fn add(self, rhs: Real48) -> Self::Output {
        Real48::try_from(f64::from(self) + f64::from(rhs))
    }
}

impl Sub for Real48 {
    type Output = Result<Real48, OverflowError>;

    fn sub(self, rhs: Real48) -> Self::Output {
        Real48::try_from(f64::from(self) - f64::from(rhs))
    }
}

impl Mul for Real48 {
    type Output = Result<Real48, OverflowError>;

    fn mul(self, rhs: Real48) -> Self::Output {
        Real48::try_from(f64::from(self) * f64::from(rhs))
    }
}

impl Div for Real48 {
    type Output = Result<Real48, OverflowError>;

    fn div(self, rhs: Real48) -> Self::Output {
        Real48::try_from(f64::from(self) / f64::from(rhs))
    }
}

impl Neg for Real48 {
    type Output = Result<Real48, OverflowError>;

    fn neg(self) -> Self::Output {
        Real48::ZERO - self
    }
}

impl PartialOrd for Real48 {
    fn partial_cmp(&self, other: &Real48) -> Option<Ordering> {
        // Always Some: no bit pattern decodes to NaN.
        f64::from(*self).partial_cmp(&f64::from(*other))
    }
}

impl fmt::Display for Real48 {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        fmt::Display::fmt(&f64::from(*self), f)
    }
}

impl ToPrimitive for Real48 {
    fn to_i64(&self) -> Option<i64> {
        f64::from(*self).to_i64()
    }

    fn to_u64(&self) -> Option<u64> {
        f64::from(*self).to_u64()
    }

    fn to_f32(&self) -> Option<f32> {
        f32::try_from(*self).ok()
    }

    fn to_f64(&self) -> Option<f64> {
        Some(f64::from(*self))
    }
}

impl FromPrimitive for Real48 {
    fn from_i64(n: i64) -> Option<Real48> {
        Real48::from_f64(n as f64)
    }

    fn from_u64(n: u64) -> Option<Real48> {
        Real48::from_f64(n as f64)
    }

    fn from_f32(n: f32) -> Option<Real48> {
        Real48::from_f64(f64::from(n))
    }

    fn from_f64(n: f64) -> Option<Real48> {
        Real48::try_from(n).ok()
    }
}
