use num_bigint::BigUint;

use crate::error::Result;
use crate::register::{Feedback, Register};
use crate::taps::Taps;

/// Internal feedback: stage 0 is shifted out to the last stage and XORed into
/// every tapped stage on the way.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Galois;

pub type GaloisRegister = Register<Galois>;

impl Feedback for Galois {
    const NAME: &'static str = "galois";

    fn derive(polynomial: &BigUint) -> Result<Taps> {
        Taps::galois(polynomial)
    }

    fn step(taps: &Taps, state: &mut [u8]) {
        let Some(&msb) = state.first() else {
            return;
        };
        state.rotate_left(1);
        // tap 0 is the feedback path itself and never XORs into a stage
        for (stage, tap) in state.iter_mut().zip(taps.iter().skip(1)) {
            if tap {
                *stage ^= msb;
            }
        }
    }

    fn algebraic(taps: &Taps) -> String {
        let order = taps.field_order();
        let digits = taps.digits();
        let mut terms = Vec::new();
        for (i, digit) in digits.iter().enumerate().take(order - 1) {
            if *digit == 1 {
                terms.push(format!("x ^ {}", order - i));
            }
        }
        if digits[order - 1] == 1 {
            terms.push("x".to_string());
        }
        terms.push("1".to_string());
        terms.join(" + ")
    }
}
