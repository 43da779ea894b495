//! Linear feedback shift registers in the Fibonacci (external XOR) and Galois
//! (internal XOR) topologies.
//!
//! A register is built from a polynomial, read most significant bit first as
//! stage 0, and an initial state of `field_order` bits:
//!
//! ```
//! use lfsr::FibonacciRegister;
//! use num_bigint::BigUint;
//!
//! let mut register = FibonacciRegister::new(0b1011u32, 0b0001u32)?;
//! assert_eq!(register.algebraic(), "x ^ 3 + x + 1");
//! assert_eq!(register.next(), BigUint::from(0b0011u32));
//! # Ok::<(), lfsr::LfsrError>(())
//! ```

pub mod error;
pub mod fibonacci;
pub mod galois;
pub mod register;
pub mod table;
pub mod taps;

pub use error::{LfsrError, Result};
pub use fibonacci::{Fibonacci, FibonacciRegister};
pub use galois::{Galois, GaloisRegister};
pub use register::{Feedback, Register};
pub use table::{StateRecord, StateTable};
pub use taps::{from_bits, read_binary_string, to_binary_string, to_bits, Taps};
