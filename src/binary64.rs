//! Field-level access to the IEEE-754 binary64 (64-bit float) layout.

#[cfg(test)]
use quickcheck::quickcheck;

pub(crate) const FRACTION_BITS: u32 = 52;
pub(crate) const EXPONENT_BITS: u32 = 11;
pub(crate) const EXPONENT_BIAS: i32 = 1023;

pub(crate) const FRACTION_MASK: u64 = (1 << FRACTION_BITS) - 1;
pub(crate) const EXPONENT_MASK: u64 = (1 << EXPONENT_BITS) - 1;

/// The three fields of a 64-bit float, pulled apart. `exponent` is the
/// biased (stored) exponent, `fraction` the 52 bits below the implicit
/// leading one.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct Binary64 {
    pub sign: u8,
    pub exponent: u16,
    pub fraction: u64,
}

impl Binary64 {
    pub fn unpack(x: f64) -> Binary64 {
        let bits = x.to_bits();

        Binary64 {
            sign: (bits >> (FRACTION_BITS + EXPONENT_BITS)) as u8,
            exponent: ((bits >> FRACTION_BITS) & EXPONENT_MASK) as u16,
            fraction: bits & FRACTION_MASK,
        }
    }

    pub fn pack(&self) -> f64 {
        let bits = ((self.sign as u64 & 1) << (FRACTION_BITS + EXPONENT_BITS))
            | ((self.exponent as u64 & EXPONENT_MASK) << FRACTION_BITS)
            | (self.fraction & FRACTION_MASK);

        f64::from_bits(bits)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_fields() {
        let one = Binary64::unpack(1.0);
        assert_eq!(one.sign, 0);
        assert_eq!(one.exponent, 1023);
        assert_eq!(one.fraction, 0);

        let minus_1_5 = Binary64::unpack(-1.5);
        assert_eq!(minus_1_5.sign, 1);
        assert_eq!(minus_1_5.exponent, 1023);
        assert_eq!(minus_1_5.fraction, 1 << (FRACTION_BITS - 1));
    }

    quickcheck! {
        fn pack_unpack_roundtrips(bits: u64) -> bool {
            let x = f64::from_bits(bits);
            Binary64::unpack(x).pack().to_bits() == bits
        }
    }
}
