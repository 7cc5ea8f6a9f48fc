//! Bidirectional mapping between comparison units and a dense integer alphabet
//!
//! Lines are interned through a shared table so that both sides of one
//! comparison agree on their symbols. Characters need no table: their
//! Unicode scalar value already is a stable symbol.

use std::collections::HashMap;
use std::hash::Hash;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{DiffError, Result};

/// Integer identifier of one comparison unit
pub type Symbol = u32;

/// Both sides of a comparison encoded against one shared table
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Encoding<U> {
    /// Symbols of the old sequence
    pub old: Vec<Symbol>,

    /// Symbols of the new sequence
    pub new: Vec<Symbol>,

    /// Decoding table shared by both sequences
    pub table: DecodingTable<U>,
}

/// Maps symbols back to the units they were assigned to
///
/// Symbols are assigned densely from zero in first-seen order, so the
/// table is a plain vector indexed by symbol.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DecodingTable<U> {
    units: Vec<U>,
}

impl<U> DecodingTable<U> {
    /// Get the unit behind a symbol
    pub fn get(&self, symbol: Symbol) -> Option<&U> {
        self.units.get(symbol as usize)
    }

    /// Number of distinct units in the table
    pub fn len(&self) -> usize {
        self.units.len()
    }

    /// Check if no unit was encoded
    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }

    /// Decode a run of symbols back into units
    pub fn decode(&self, symbols: &[Symbol]) -> Result<Vec<&U>> {
        symbols
            .iter()
            .map(|&symbol| self.get(symbol).ok_or(DiffError::UnknownSymbol(symbol)))
            .collect()
    }
}

impl<U: AsRef<str>> DecodingTable<U> {
    /// Decode a run of line symbols and join the lines with `\n`
    pub fn join_lines(&self, symbols: &[Symbol]) -> Result<String> {
        let lines = self.decode(symbols)?;
        let mut joined = String::new();
        for (i, line) in lines.iter().enumerate() {
            if i > 0 {
                joined.push('\n');
            }
            joined.push_str(line.as_ref());
        }
        Ok(joined)
    }
}

/// Encode two unit sequences against one shared table
///
/// Symbols are handed out in insertion order over `old` followed by `new`.
/// Callers should only rely on symbol equality, never on the values.
pub fn encode<U>(old: &[U], new: &[U]) -> Result<Encoding<U>>
where
    U: Eq + Hash + Clone,
{
    encode_bounded(old, new, Symbol::MAX as usize)
}

/// Same as [`encode`] but with an explicit cap on distinct units
pub(crate) fn encode_bounded<U>(old: &[U], new: &[U], limit: usize) -> Result<Encoding<U>>
where
    U: Eq + Hash + Clone,
{
    let mut interner = Interner::new(limit, old.len());
    let old = interner.intern_all(old)?;
    let new = interner.intern_all(new)?;

    log::trace!(
        "encoded {} + {} units into {} symbols",
        old.len(),
        new.len(),
        interner.units.len()
    );

    Ok(Encoding {
        old,
        new,
        table: DecodingTable {
            units: interner.units,
        },
    })
}

struct Interner<U> {
    symbols: HashMap<U, Symbol>,
    units: Vec<U>,
    limit: usize,
}

impl<U: Eq + Hash + Clone> Interner<U> {
    fn new(limit: usize, capacity: usize) -> Self {
        Self {
            symbols: HashMap::with_capacity(capacity),
            units: Vec::with_capacity(capacity),
            limit,
        }
    }

    fn intern_all(&mut self, units: &[U]) -> Result<Vec<Symbol>> {
        units.iter().map(|unit| self.intern(unit)).collect()
    }

    fn intern(&mut self, unit: &U) -> Result<Symbol> {
        if let Some(&symbol) = self.symbols.get(unit) {
            return Ok(symbol);
        }

        let next = self.units.len();
        if next >= self.limit {
            return Err(DiffError::EncodingOverflow { limit: self.limit });
        }
        let symbol =
            Symbol::try_from(next).map_err(|_| DiffError::EncodingOverflow { limit: self.limit })?;

        self.symbols.insert(unit.clone(), symbol);
        self.units.push(unit.clone());
        Ok(symbol)
    }
}

/// Encode a string as one symbol per `char`
pub fn encode_chars(text: &str) -> Vec<Symbol> {
    text.chars().map(Symbol::from).collect()
}

/// Decode symbols produced by [`encode_chars`]
pub fn decode_chars(symbols: &[Symbol]) -> Result<String> {
    symbols
        .iter()
        .map(|&symbol| char::from_u32(symbol).ok_or(DiffError::UnknownSymbol(symbol)))
        .collect()
}
