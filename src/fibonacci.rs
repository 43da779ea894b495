use num_bigint::BigUint;

use crate::error::Result;
use crate::register::{Feedback, Register};
use crate::taps::Taps;

/// External feedback: the tapped stages are XORed together and the result is
/// shifted in as the last stage.
///
/// ```text
///      +-------+   +-------+     +-------+
///  +---| s[0]  |<--| s[1]  |<-...| s[n-1]|<--+
///  |   +-------+ | +-------+     +-------+   |
///  |             |                           |
///  +-----------> XOR over tapped stages -----+
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Fibonacci;

pub type FibonacciRegister = Register<Fibonacci>;

impl Feedback for Fibonacci {
    const NAME: &'static str = "fibonacci";

    fn derive(polynomial: &BigUint) -> Result<Taps> {
        Taps::fibonacci(polynomial)
    }

    fn step(taps: &Taps, state: &mut [u8]) {
        let feedback = state
            .iter()
            .zip(taps.iter())
            .filter(|(_, tap)| *tap)
            .fold(0u8, |acc, (bit, _)| acc ^ bit);
        state.rotate_left(1);
        if let Some(last) = state.last_mut() {
            *last = feedback;
        }
    }

    fn algebraic(taps: &Taps) -> String {
        let order = taps.field_order();
        let digits = taps.digits();
        let mut terms = Vec::new();
        for (i, digit) in digits.iter().enumerate().take(order.saturating_sub(2)) {
            if *digit == 1 {
                terms.push(format!("x ^ {}", order - i - 1));
            }
        }
        if order >= 2 && digits[order - 2] == 1 {
            terms.push("x".to_string());
        }
        if digits[order - 1] == 1 {
            terms.push("1".to_string());
        }
        terms.join(" + ")
    }
}
