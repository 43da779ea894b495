use num_bigint::BigUint;
use num_traits::Zero;

use crate::error::{LfsrError, Result};

/// Structural properties of a feedback polynomial: the register width and the
/// polynomial's digits, most significant first.
///
/// `digits` holds the polynomial zero-padded to at least `field_order` digits.
/// It is never truncated, so a Fibonacci polynomial that is an exact power of
/// two carries one digit more than the register has stages.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Taps {
    field_order: usize,
    digits: Vec<u8>,
}

impl Taps {
    /// Field order `ceil(log2(polynomial))`.
    pub fn fibonacci(polynomial: &BigUint) -> Result<Self> {
        let bits = polynomial.bits() as usize;
        // log2 is exact for powers of two, so the ceiling drops a bit
        let field_order = if polynomial.count_ones() == 1 {
            bits - 1
        } else {
            bits
        };
        Self::with_order(polynomial, field_order)
    }

    /// Field order equal to the bit length of `polynomial`.
    pub fn galois(polynomial: &BigUint) -> Result<Self> {
        Self::with_order(polynomial, polynomial.bits() as usize)
    }

    fn with_order(polynomial: &BigUint, field_order: usize) -> Result<Self> {
        if field_order == 0 {
            return Err(LfsrError::InvalidPolynomial {
                polynomial: polynomial.clone(),
            });
        }
        let width = field_order.max(polynomial.bits() as usize);
        Ok(Self {
            field_order,
            digits: to_bits(polynomial, width),
        })
    }

    pub fn field_order(&self) -> usize {
        self.field_order
    }

    pub fn digits(&self) -> &[u8] {
        &self.digits
    }

    /// Whether stage `i` participates in feedback.
    pub fn tap(&self, i: usize) -> bool {
        i < self.field_order && self.digits[i] == 1
    }

    /// One flag per stage, stage 0 first.
    pub fn iter(&self) -> impl Iterator<Item = bool> + '_ {
        self.digits[..self.field_order].iter().map(|d| *d == 1)
    }
}

/// `width` bits of `value`, most significant first. Bits above `width` are dropped.
pub fn to_bits(value: &BigUint, width: usize) -> Vec<u8> {
    (0..width)
        .map(|i| value.bit((width - 1 - i) as u64) as u8)
        .collect()
}

pub fn from_bits(bits: &[u8]) -> BigUint {
    bits.iter()
        .fold(BigUint::zero(), |acc, bit| (acc << 1u32) + u32::from(*bit & 1))
}

pub fn read_binary_string(s: &str) -> Result<Vec<u8>> {
    s.chars()
        .map(|c| {
            c.to_digit(2)
                .map(|d| d as u8)
                .ok_or(LfsrError::InvalidDigit(c))
        })
        .collect()
}

pub fn to_binary_string(bits: &[u8]) -> String {
    bits.iter()
        .map(|bit| if *bit == 1 { '1' } else { '0' })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fibonacci_field_order() {
        let taps = Taps::fibonacci(&BigUint::from(0b1011u32)).unwrap();
        assert_eq!(taps.field_order(), 4);
        assert_eq!(taps.digits(), &[1, 0, 1, 1]);
        assert_eq!(taps.iter().collect::<Vec<_>>(), vec![true, false, true, true]);
    }

    #[test]
    fn test_fibonacci_power_of_two() {
        let taps = Taps::fibonacci(&BigUint::from(0b1000u32)).unwrap();
        assert_eq!(taps.field_order(), 3);
        assert_eq!(taps.digits(), &[1, 0, 0, 0]);
        assert!(taps.tap(0));
        assert!(!taps.tap(3));
        assert_eq!(taps.iter().count(), 3);

        let taps = Taps::fibonacci(&BigUint::from(2u32)).unwrap();
        assert_eq!(taps.field_order(), 1);
    }

    #[test]
    fn test_fibonacci_rejects_small_polynomials() {
        for polynomial in [0u32, 1] {
            assert_eq!(
                Taps::fibonacci(&BigUint::from(polynomial)),
                Err(LfsrError::InvalidPolynomial {
                    polynomial: BigUint::from(polynomial)
                })
            );
        }
    }

    #[test]
    fn test_galois_field_order() {
        let taps = Taps::galois(&BigUint::from(0b10011u32)).unwrap();
        assert_eq!(taps.field_order(), 5);
        assert_eq!(taps.digits(), &[1, 0, 0, 1, 1]);

        // powers of two keep their full bit length
        assert_eq!(Taps::galois(&BigUint::from(0b1000u32)).unwrap().field_order(), 4);
        assert_eq!(Taps::galois(&BigUint::from(1u32)).unwrap().field_order(), 1);
    }

    #[test]
    fn test_galois_rejects_zero() {
        assert!(matches!(
            Taps::galois(&BigUint::zero()),
            Err(LfsrError::InvalidPolynomial { .. })
        ));
    }

    #[test]
    fn test_wide_polynomial() {
        let polynomial = (BigUint::from(1u32) << 130u32) + 3u32;
        let taps = Taps::galois(&polynomial).unwrap();
        assert_eq!(taps.field_order(), 131);
        assert!(taps.tap(0));
        assert!(taps.tap(129));
        assert!(taps.tap(130));
        assert!(!taps.tap(64));
    }

    #[test]
    fn test_bits_conversion() {
        let value = BigUint::from(0b0110u32);
        assert_eq!(to_bits(&value, 4), vec![0, 1, 1, 0]);
        assert_eq!(to_bits(&value, 6), vec![0, 0, 0, 1, 1, 0]);
        assert_eq!(from_bits(&[0, 0, 1, 1, 0]), value);
        assert_eq!(from_bits(&[]), BigUint::zero());
    }

    #[test]
    fn test_read_binary_string() {
        let digits = read_binary_string("10011").unwrap();
        assert_eq!(digits, vec![1, 0, 0, 1, 1]);
        assert_eq!(from_bits(&digits), BigUint::from(0b10011u32));
        assert!(read_binary_string("").unwrap().is_empty());
        assert_eq!(read_binary_string("1021"), Err(LfsrError::InvalidDigit('2')));
    }

    #[test]
    fn test_to_binary_string() {
        let taps = Taps::fibonacci(&BigUint::from(0b1000u32)).unwrap();
        assert_eq!(to_binary_string(taps.digits()), "1000");
        let state = to_bits(&BigUint::from(0b0011u32), taps.field_order());
        assert_eq!(to_binary_string(&state), "011");
    }
}
