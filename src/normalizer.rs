//! State renumbering and discovery of the state set and alphabet of a transition table.
//!
//! Translated machines reserve `0` as their entry state. Every numbered state of the source
//! machine is shifted up by one so that its initial state `0` becomes `1`, the state the
//! entry gadgets hand control to. Named states are assumed to be disambiguated already and
//! pass through unchanged.

use crate::types::{State, StateId, Symbol, Transition, ALPHABET_SEED};
use serde::Serialize;
use std::collections::BTreeSet;
use tracing::debug;

/// The set of symbols a table reads or writes, always including [`ALPHABET_SEED`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Alphabet(BTreeSet<Symbol>);

impl Alphabet {
    /// An alphabet holding only the seed symbol.
    pub fn seeded() -> Self {
        Self(BTreeSet::from([Symbol::from(ALPHABET_SEED)]))
    }

    /// Collects every read and write symbol of `transitions`.
    pub fn of(transitions: &[Transition]) -> Self {
        let mut alphabet = Self::seeded();
        for transition in transitions {
            alphabet.insert(transition.read.clone());
            alphabet.insert(transition.write.clone());
        }
        alphabet
    }

    pub fn insert(&mut self, symbol: Symbol) {
        self.0.insert(symbol);
    }

    pub fn contains(&self, symbol: &Symbol) -> bool {
        self.0.contains(symbol)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Symbol> {
        self.0.iter()
    }
}

impl<'a> IntoIterator for &'a Alphabet {
    type Item = &'a Symbol;
    type IntoIter = std::collections::btree_set::Iter<'a, Symbol>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl FromIterator<Symbol> for Alphabet {
    /// Builds an alphabet from exactly the given symbols, without the seed.
    fn from_iter<I: IntoIterator<Item = Symbol>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// A renumbered transition list with its state set and alphabet.
#[derive(Debug, Clone, PartialEq)]
pub struct Normalized {
    pub transitions: Vec<Transition>,
    pub states: BTreeSet<StateId>,
    pub alphabet: Alphabet,
}

/// Renumbers the states of `transitions` and discovers its states and alphabet.
///
/// Transition order is preserved. Only source-machine states are renumbered; entry,
/// boundary and gadget states are copied as they are and are not part of the state set.
pub fn normalize(transitions: &[Transition]) -> Normalized {
    let mut states = BTreeSet::new();
    let mut alphabet = Alphabet::seeded();

    let transitions = transitions
        .iter()
        .map(|transition| {
            let state = shift(&transition.state);
            let next_state = shift(&transition.next_state);

            states.extend(state.original().cloned());
            states.extend(next_state.original().cloned());
            alphabet.insert(transition.read.clone());
            alphabet.insert(transition.write.clone());

            Transition {
                state,
                read: transition.read.clone(),
                write: transition.write.clone(),
                direction: transition.direction,
                next_state,
            }
        })
        .collect::<Vec<_>>();

    debug!(
        states = states.len(),
        symbols = alphabet.len(),
        transitions = transitions.len(),
        "normalized transition table"
    );

    Normalized {
        transitions,
        states,
        alphabet,
    }
}

/// Shifts a numbered state up by one. Everything else is returned unchanged.
fn shift(state: &State) -> State {
    match state {
        State::Original(StateId::Numbered(n)) => State::Original(StateId::Numbered(n.successor())),
        other => other.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse;
    use crate::types::Direction;

    fn transitions(input: &str) -> Vec<Transition> {
        parse(input).unwrap().transitions
    }

    #[test]
    fn test_named_states_are_unchanged() {
        let input = transitions(";I\nstart a b r loop\nloop b b l halt");

        let normalized = normalize(&input);
        assert_eq!(normalized.transitions, input);
        assert_eq!(
            normalized.states,
            BTreeSet::from([
                StateId::Named("halt".into()),
                StateId::Named("loop".into()),
                StateId::Named("start".into()),
            ])
        );
    }

    #[test]
    fn test_numbered_states_are_shifted() {
        let input = transitions(";I\n0 a b r 1\n1 b a l 0\n9 _ _ r 10\nq 1 1 r 0");

        let normalized = normalize(&input);
        let rendered: Vec<String> = normalized
            .transitions
            .iter()
            .map(|t| t.to_string())
            .collect();

        assert_eq!(
            rendered,
            vec!["1 a b r 2", "2 b a l 1", "10 _ _ r 11", "q 1 1 r 1"]
        );
        assert!(!normalized.states.contains(&StateId::numbered(0)));
        assert_eq!(normalized.states.len(), 5);
    }

    #[test]
    fn test_numbered_states_beyond_u64_are_shifted() {
        let input = transitions(
            ";S\n99999999999999999999 a b r 18446744073709551615\n18446744073709551614 b a l 0",
        );

        let normalized = normalize(&input);
        let rendered: Vec<String> = normalized
            .transitions
            .iter()
            .map(|t| t.to_string())
            .collect();

        assert_eq!(
            rendered,
            vec![
                "100000000000000000000 a b r 18446744073709551616",
                "18446744073709551615 b a l 1",
            ]
        );
        assert!(normalized
            .states
            .iter()
            .all(|s| matches!(s, StateId::Numbered(_))));
    }

    #[test]
    fn test_renumbering_twice_keeps_shifting() {
        let once = normalize(&transitions(";I\n18446744073709551614 a a r 18446744073709551614"));
        let twice = normalize(&once.transitions);

        assert_eq!(
            twice.transitions[0].to_string(),
            "18446744073709551616 a a r 18446744073709551616"
        );
    }

    #[test]
    fn test_symbols_are_never_renumbered() {
        let normalized = normalize(&transitions(";S\n0 0 1 r 0"));
        assert_eq!(normalized.transitions[0].read, Symbol::from("0"));
        assert_eq!(normalized.transitions[0].write, Symbol::from("1"));
    }

    #[test]
    fn test_alphabet_is_seeded() {
        let normalized = normalize(&[]);
        assert_eq!(normalized.alphabet, Alphabet::seeded());
        assert!(normalized.alphabet.contains(&Symbol::from(ALPHABET_SEED)));
        assert!(normalized.states.is_empty());
        assert!(normalized.transitions.is_empty());
    }

    #[test]
    fn test_alphabet_matches_symbols_in_any_order() {
        let mut input = transitions(";I\n0 a b r 1\n1 _ c l 0\n1 M a r 1");

        let forward = normalize(&input).alphabet;
        input.reverse();
        let backward = normalize(&input).alphabet;

        assert_eq!(forward, backward);
        let expected: Alphabet = ["M", "_", "a", "b", "c"].into_iter().map(Symbol::from).collect();
        assert_eq!(forward, expected);
        assert_eq!(Alphabet::of(&normalize(&input).transitions), expected);
    }

    #[test]
    fn test_gadget_states_pass_through() {
        let input = vec![Transition::new(
            State::Entry,
            "*",
            "*",
            Direction::Left,
            State::Boundary,
        )];

        let normalized = normalize(&input);
        assert_eq!(normalized.transitions, input);
        assert!(normalized.states.is_empty());
    }
}
