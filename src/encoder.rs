//! This module serializes transition tables back into the line-oriented description format.

use crate::types::TransitionTable;
use std::fmt::Write;

/// Encodes a table as its model tag followed by one line per transition.
///
/// Every line, the last one included, ends with a newline. Fields are separated by a single
/// space in the order `state read write direction next_state`.
pub fn encode(table: &TransitionTable) -> String {
    let mut output = String::new();
    // Writing into a `String` cannot fail.
    let _ = writeln!(output, "{}", table.model);
    for transition in &table.transitions {
        let _ = writeln!(output, "{transition}");
    }
    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse;
    use crate::types::{Direction, Gadget, State, StateId, TapeModel, Transition};

    #[test]
    fn test_encode_empty_table() {
        let table = TransitionTable::new(TapeModel::OneWay, Vec::new());
        assert_eq!(encode(&table), ";S\n");
    }

    #[test]
    fn test_encode_transitions() {
        let table = TransitionTable::new(
            TapeModel::TwoWay,
            vec![
                Transition::new(State::numbered(1), "a", "_", Direction::Left, State::named("q")),
                Transition::new(
                    Gadget::Back(StateId::numbered(1)),
                    "a",
                    "#",
                    Direction::Right,
                    Gadget::Shift(StateId::numbered(1), "a".into()),
                ),
            ],
        );

        assert_eq!(
            encode(&table),
            ";I\n1 a _ l q\nBACK_1 a # r SHIFT_1%a\n"
        );
    }

    #[test]
    fn test_encode_normalizes_spacing() {
        let table = parse(";S\n; comment\n  0\ta  b r   halt  \n").unwrap();
        assert_eq!(encode(&table), ";S\n0 a b r halt\n");
    }
}
