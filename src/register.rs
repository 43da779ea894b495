use std::fmt;
use std::marker::PhantomData;

use num_bigint::{BigUint, RandBigInt};
use num_traits::{One, ToPrimitive, Zero};
use rand::Rng;
use tracing::{debug, trace, warn};

use crate::error::{LfsrError, Result};
use crate::table::{StateRecord, StateTable};
use crate::taps::{from_bits, to_binary_string, to_bits, Taps};

/// Field orders above this make `state_table` slow enough to be worth a warning.
const LARGE_TABLE_ORDER: usize = 24;

/// A feedback topology: how a polynomial becomes taps, how one step moves the
/// register, and how the polynomial is written down.
pub trait Feedback: Clone + fmt::Debug + PartialEq + Eq {
    const NAME: &'static str;

    fn derive(polynomial: &BigUint) -> Result<Taps>;

    /// Advances `state` (stage 0 first, `taps.field_order()` long) by one step.
    fn step(taps: &Taps, state: &mut [u8]);

    fn algebraic(taps: &Taps) -> String;
}

/// A shift register driven by the feedback model `F`.
///
/// The polynomial's structure is derived once at construction. `reset` and
/// `load` only touch the state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Register<F> {
    polynomial: BigUint,
    taps: Taps,
    state: Vec<u8>,
    init: Vec<u8>,
    model: PhantomData<F>,
}

impl<F: Feedback> Register<F> {
    /// Builds a register, rejecting states wider than the derived field order.
    pub fn new(polynomial: impl Into<BigUint>, state: impl Into<BigUint>) -> Result<Self> {
        let polynomial = polynomial.into();
        let taps = F::derive(&polynomial)?;
        let state = checked_bits(&state.into(), taps.field_order())?;
        debug!(
            model = F::NAME,
            polynomial = %polynomial,
            field_order = taps.field_order(),
            "built register"
        );
        Ok(Self {
            polynomial,
            taps,
            init: state.clone(),
            state,
            model: PhantomData,
        })
    }

    /// Concatenates `registers` into one register, first register most
    /// significant. Each input is reset before its polynomial and state are
    /// taken, each zero-padded to its own field order.
    pub fn from_registers(registers: &mut [Self]) -> Result<Self> {
        if registers.is_empty() {
            return Err(LfsrError::EmptyComposition);
        }
        let mut polynomial = Vec::new();
        let mut state = Vec::new();
        for register in registers.iter_mut() {
            register.reset();
            polynomial.extend_from_slice(register.taps.digits());
            state.extend_from_slice(&register.state);
        }
        let composite = Self::new(from_bits(&polynomial), from_bits(&state))?;
        debug!(
            model = F::NAME,
            parts = registers.len(),
            field_order = composite.field_order(),
            "composed register"
        );
        Ok(composite)
    }

    pub fn polynomial(&self) -> &BigUint {
        &self.polynomial
    }

    pub fn field_order(&self) -> usize {
        self.taps.field_order()
    }

    pub fn taps(&self) -> &Taps {
        &self.taps
    }

    pub fn state(&self) -> BigUint {
        from_bits(&self.state)
    }

    /// The current state as `field_order` binary digits.
    pub fn state_bits(&self) -> String {
        to_binary_string(&self.state)
    }

    pub fn initial_state(&self) -> BigUint {
        from_bits(&self.init)
    }

    fn round(&mut self) {
        F::step(&self.taps, &mut self.state);
    }

    pub fn next(&mut self) -> BigUint {
        self.round();
        self.state()
    }

    /// Steps the register `rounds` times, one step at a time.
    pub fn cycle(&mut self, rounds: u64) -> BigUint {
        for _ in 0..rounds {
            self.round();
        }
        self.state()
    }

    /// Steps the register `2^field_order` times, whatever the polynomial's
    /// actual period.
    pub fn full_cycle(&mut self) -> BigUint {
        let rounds = BigUint::one() << self.field_order();
        if let Some(rounds) = rounds.to_u64() {
            return self.cycle(rounds);
        }
        let mut remaining = rounds;
        while !remaining.is_zero() {
            self.round();
            remaining -= 1u32;
        }
        self.state()
    }

    pub fn reset(&mut self) {
        self.state.clone_from(&self.init);
    }

    /// Replaces both the current and the initial state. The register is left
    /// untouched if `state` does not fit.
    pub fn load(&mut self, state: impl Into<BigUint>) -> Result<()> {
        let state = checked_bits(&state.into(), self.field_order())?;
        debug!(model = F::NAME, state = %to_binary_string(&state), "loaded state");
        self.init = state.clone();
        self.state = state;
        Ok(())
    }

    /// Loads a uniformly random non-zero state and returns it. The zero state
    /// is a fixed point of every model.
    pub fn randomize<R: Rng + ?Sized>(&mut self, rng: &mut R) -> BigUint {
        let upper = BigUint::one() << self.field_order();
        let state = rng.gen_biguint_range(&BigUint::one(), &upper);
        self.init = to_bits(&state, self.field_order());
        self.state = self.init.clone();
        state
    }

    /// Lists `2^field_order` consecutive states starting from the current one,
    /// then resets the register to its initial state.
    ///
    /// Cost grows as `2^field_order`; beyond roughly 24 bits this is
    /// impractical.
    pub fn state_table(&mut self) -> Result<StateTable> {
        let field_order = self.field_order();
        let rows = u32::try_from(field_order)
            .ok()
            .and_then(|order| 1usize.checked_shl(order))
            .ok_or(LfsrError::TableTooLarge { field_order })?;
        if field_order > LARGE_TABLE_ORDER {
            warn!(field_order, rows, "enumerating a large state table");
        }
        let mut records = Vec::with_capacity(rows.min(1 << 16));
        for cycle in 0..rows as u64 {
            let record = StateRecord::new(cycle, &self.state);
            trace!(cycle, state = %record.bits, "state");
            records.push(record);
            self.round();
        }
        self.reset();
        Ok(StateTable::new(records))
    }

    pub fn algebraic(&self) -> String {
        F::algebraic(&self.taps)
    }
}

impl<F: Feedback> fmt::Display for Register<F> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} [{}]", self.algebraic(), self.state_bits())
    }
}

fn checked_bits(state: &BigUint, field_order: usize) -> Result<Vec<u8>> {
    if state.bits() > field_order as u64 {
        return Err(LfsrError::StateOutOfRange {
            state: state.clone(),
            field_order,
        });
    }
    Ok(to_bits(state, field_order))
}
