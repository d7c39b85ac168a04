//! This crate translates Turing machine transition tables between two tape conventions:
//! a tape infinite in both directions and a tape infinite to the right only.
//! It includes modules for parsing descriptions, renumbering states, compiling the gadget
//! transitions each direction needs, and writing the translated table back out.

pub mod accommodate;
pub mod encoder;
pub mod fold;
pub mod loader;
pub mod normalizer;
pub mod parser;
pub mod translator;
pub mod types;

/// Re-exports the `Rule` enum from the parser module, used by the `pest` grammar.
pub use crate::parser::Rule;
/// Re-exports the encoding function from the encoder module.
pub use encoder::encode;
/// Re-exports the `TableLoader` struct from the loader module.
pub use loader::TableLoader;
/// Re-exports the normalization entry point and its result types.
pub use normalizer::{normalize, Alphabet, Normalized};
/// Re-exports the `parse` function from the parser module.
pub use parser::parse;
/// Re-exports the translation driver.
pub use translator::{translate, translate_str, Translation};
/// Re-exports the data model from the types module.
pub use types::{
    Direction, Gadget, Numeral, State, StateId, Symbol, TapeError, TapeModel, Transition,
    TransitionTable,
};
