use std::fmt;

use num_bigint::BigUint;

use crate::taps::{from_bits, to_binary_string};

/// One row of a state table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StateRecord {
    pub cycle: u64,
    pub state: BigUint,
    /// The state as `field_order` binary digits.
    pub bits: String,
}

impl StateRecord {
    pub(crate) fn new(cycle: u64, bits: &[u8]) -> Self {
        Self {
            cycle,
            state: from_bits(bits),
            bits: to_binary_string(bits),
        }
    }
}

/// Consecutive register states, as produced by `Register::state_table`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StateTable {
    records: Vec<StateRecord>,
}

impl StateTable {
    pub(crate) fn new(records: Vec<StateRecord>) -> Self {
        Self { records }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn records(&self) -> &[StateRecord] {
        &self.records
    }

    pub fn iter(&self) -> std::slice::Iter<'_, StateRecord> {
        self.records.iter()
    }
}

impl IntoIterator for StateTable {
    type Item = StateRecord;
    type IntoIter = std::vec::IntoIter<StateRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.into_iter()
    }
}

impl<'a> IntoIterator for &'a StateTable {
    type Item = &'a StateRecord;
    type IntoIter = std::slice::Iter<'a, StateRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

impl fmt::Display for StateTable {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let states = self
            .records
            .iter()
            .map(|record| record.state.to_string())
            .collect::<Vec<_>>();
        let cycle_width = self
            .records
            .last()
            .map_or(0, |record| record.cycle.to_string().len())
            .max("Cycle".len());
        let state_width = states
            .iter()
            .map(String::len)
            .max()
            .unwrap_or(0)
            .max("State".len());

        writeln!(
            f,
            "{:>cycle_width$} | {:>state_width$} | Register State",
            "Cycle", "State"
        )?;
        for (record, state) in self.records.iter().zip(&states) {
            writeln!(
                f,
                "{:>cycle_width$} | {:>state_width$} | {}",
                record.cycle, state, record.bits
            )?;
        }
        Ok(())
    }
}
