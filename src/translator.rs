//! This module selects the compiler for a table's tape model and assembles the translated
//! table: the normalized source transitions followed by the generated gadgets.

use crate::accommodate;
use crate::encoder::encode;
use crate::fold;
use crate::normalizer::{normalize, Alphabet};
use crate::parser::parse;
use crate::types::{StateId, TapeError, TapeModel, TransitionTable};
use serde::Serialize;
use std::collections::BTreeSet;
use tracing::info;

/// The outcome of translating a transition table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Translation {
    /// The model the input was written for.
    pub source: TapeModel,
    /// The states of the source machine after renumbering.
    pub states: BTreeSet<StateId>,
    /// The alphabet of the normalized source transitions.
    pub alphabet: Alphabet,
    /// Number of source transitions at the head of `table`.
    pub original: usize,
    /// Number of generated transitions following them.
    pub generated: usize,
    /// The translated table, tagged with the opposite model.
    pub table: TransitionTable,
}

impl Translation {
    pub fn target(&self) -> TapeModel {
        self.table.model
    }
}

/// Translates `table` into the opposite tape model.
///
/// | input          | compiler                 | output         |
/// |----------------|--------------------------|----------------|
/// | one-way (`;S`) | [`accommodate::compile`] | two-way (`;I`) |
/// | two-way (`;I`) | [`fold::compile`]        | one-way (`;S`) |
///
/// Translation cannot fail. An unrecognized tag is rejected earlier, when the tag line is
/// parsed into a [`TapeModel`].
pub fn translate(table: &TransitionTable) -> Translation {
    let normalized = normalize(&table.transitions);
    let alphabet = normalized.alphabet;

    let gadgets = match table.model {
        TapeModel::OneWay => accommodate::compile(&normalized.states),
        TapeModel::TwoWay => fold::compile(&normalized.states, &alphabet),
    };

    let original = normalized.transitions.len();
    let generated = gadgets.len();

    let mut transitions = normalized.transitions;
    transitions.extend(gadgets);

    let target = table.model.opposite();
    info!(
        source = %table.model,
        target = %target,
        original,
        generated,
        "translated transition table"
    );

    Translation {
        source: table.model,
        states: normalized.states,
        alphabet,
        original,
        generated,
        table: TransitionTable::new(target, transitions),
    }
}

/// Parses a description, translates it and encodes the result.
pub fn translate_str(input: &str) -> Result<String, TapeError> {
    let table = parse(input)?;
    Ok(encode(&translate(&table).table))
}
