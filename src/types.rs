//! This module defines the core data structures used throughout the translator, including
//! symbols, state labels, transitions, transition tables, tape models and error types.

use serde::{Deserialize, Serialize, Serializer};
use std::cmp::Ordering;
use std::collections::BTreeSet;
use std::fmt;
use std::path::Path;
use std::str::FromStr;
use thiserror::Error;

use crate::Rule;

/// The blank symbol.
pub const BLANK: &str = "_";
/// Marks the fold boundary of a one-way tape emulating a two-way tape.
pub const BOUNDARY: &str = "%";
/// Placeholder written into a cell whose content is being shifted.
pub const ERASURE: &str = "#";
/// Remembers the head position while the tape is being rearranged.
pub const CURSOR: &str = "|";
/// Literal wildcard token. Machine readers treat it as "any symbol".
pub const WILDCARD: &str = "*";
/// Member of every alphabet by convention of the description format,
/// whether or not a transition mentions it.
pub const ALPHABET_SEED: &str = "M";

/// Tag line of a one-way (Sipser) tape description.
pub const ONE_WAY_TAG: &str = ";S";
/// Tag line of a two-way infinite tape description.
pub const TWO_WAY_TAG: &str = ";I";

/// A single tape symbol. Symbols are whole tokens, not characters.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Symbol(String);

impl Symbol {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn blank() -> Self {
        Self::new(BLANK)
    }

    pub fn boundary() -> Self {
        Self::new(BOUNDARY)
    }

    pub fn erasure() -> Self {
        Self::new(ERASURE)
    }

    pub fn cursor() -> Self {
        Self::new(CURSOR)
    }

    pub fn wildcard() -> Self {
        Self::new(WILDCARD)
    }
}

impl From<&str> for Symbol {
    fn from(token: &str) -> Self {
        Self::new(token)
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Represents the possible directions a Turing Machine head can move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    /// Move the head one position to the left.
    Left,
    /// Move the head one position to the right.
    Right,
}

impl Direction {
    /// The textual form used in descriptions, `l` or `r`.
    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Left => "l",
            Direction::Right => "r",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A non-negative decimal number of any length, kept as its digits.
///
/// Leading zeros are dropped, so `007` and `7` are the same number. Ordering is numeric.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Numeral(String);

impl Numeral {
    /// Returns `None` unless `digits` is a non-empty run of ASCII digits.
    pub fn parse(digits: &str) -> Option<Self> {
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }

        let trimmed = digits.trim_start_matches('0');
        Some(Self(if trimmed.is_empty() { "0" } else { trimmed }.to_string()))
    }

    /// The number one greater, incremented in decimal with carry.
    pub fn successor(&self) -> Self {
        let mut digits = self.0.clone().into_bytes();

        for digit in digits.iter_mut().rev() {
            if *digit == b'9' {
                *digit = b'0';
            } else {
                *digit += 1;
                return Self(String::from_utf8_lossy(&digits).into_owned());
            }
        }

        digits.insert(0, b'1');
        Self(String::from_utf8_lossy(&digits).into_owned())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<u64> for Numeral {
    fn from(n: u64) -> Self {
        Self(n.to_string())
    }
}

impl Ord for Numeral {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0
            .len()
            .cmp(&other.0.len())
            .then_with(|| self.0.cmp(&other.0))
    }
}

impl PartialOrd for Numeral {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for Numeral {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A state of the source machine.
///
/// Labels made only of decimal digits are numbered states and take part in renumbering.
/// Any other label is carried through untouched.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum StateId {
    Numbered(Numeral),
    Named(String),
}

impl StateId {
    /// Classifies a raw state field.
    pub fn parse(label: &str) -> Self {
        match Numeral::parse(label) {
            Some(n) => StateId::Numbered(n),
            None => StateId::Named(label.to_string()),
        }
    }

    pub fn numbered(n: u64) -> Self {
        StateId::Numbered(Numeral::from(n))
    }
}

impl fmt::Display for StateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StateId::Numbered(n) => write!(f, "{n}"),
            StateId::Named(name) => f.write_str(name),
        }
    }
}

impl Serialize for StateId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Auxiliary states synthesized by the fold compiler.
///
/// Each variant carries the state or symbols it is specialized for, so two gadget
/// states are equal only when they play the same role for the same parameters.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Gadget {
    /// Walks right over the tape looking for the cursor.
    Left(StateId),
    /// Plants the cursor one cell further right.
    Mark(StateId),
    /// Walks back left, picking up cells to shift.
    Back(StateId),
    /// Carries one symbol a cell to the right.
    Shift(StateId, Symbol),
    /// Clears the erasure run and re-establishes the boundary.
    Right(StateId),
    /// Re-homes the head after a completed shift.
    End(StateId),
    /// Skips to the end of the input during initialization.
    Init(Symbol),
    /// Places the cursor after the input.
    Finish(Symbol),
    /// Walks back towards the boundary, specialized by the first input symbol.
    BoundaryBySymbol(Symbol),
    /// Carries the second symbol while specialized by the first.
    ShiftByPair(Symbol, Symbol),
    /// Writes the first input symbol back next to the boundary.
    Restore(Symbol),
}

impl fmt::Display for Gadget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Gadget::Left(s) => write!(f, "LEFT_{s}"),
            Gadget::Mark(s) => write!(f, "MARK_{s}"),
            Gadget::Back(s) => write!(f, "BACK_{s}"),
            Gadget::Shift(s, a) => write!(f, "SHIFT_{s}%{a}"),
            Gadget::Right(s) => write!(f, "RIGHT_{s}"),
            Gadget::End(s) => write!(f, "END_{s}"),
            Gadget::Init(a) => write!(f, "INIT_{a}"),
            Gadget::Finish(a) => write!(f, "FINISH_{a}"),
            Gadget::BoundaryBySymbol(a) => write!(f, "%{a}"),
            Gadget::ShiftByPair(a, b) => write!(f, "SHIFT_{a}${b}"),
            Gadget::Restore(a) => write!(f, "RESTORE_{a}"),
        }
    }
}

/// Any state that can appear in a transition table.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum State {
    /// Reserved entry state `0` of a translated machine.
    Entry,
    /// A state of the source machine.
    Original(StateId),
    /// The fold origin `%` established when running a one-way table on a two-way tape.
    Boundary,
    /// A state synthesized by the fold compiler.
    Gadget(Gadget),
}

impl State {
    /// Reserved exit state `1`: the renumbered initial state of the source machine.
    pub fn exit() -> Self {
        State::numbered(1)
    }

    pub fn numbered(n: u64) -> Self {
        State::Original(StateId::numbered(n))
    }

    pub fn named(label: impl Into<String>) -> Self {
        State::Original(StateId::Named(label.into()))
    }

    /// Returns the source-machine state, if this is one.
    pub fn original(&self) -> Option<&StateId> {
        match self {
            State::Original(id) => Some(id),
            _ => None,
        }
    }

    pub fn is_gadget(&self) -> bool {
        matches!(self, State::Gadget(_))
    }
}

impl From<StateId> for State {
    fn from(id: StateId) -> Self {
        State::Original(id)
    }
}

impl From<Gadget> for State {
    fn from(gadget: Gadget) -> Self {
        State::Gadget(gadget)
    }
}

impl fmt::Display for State {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            State::Entry => f.write_str("0"),
            State::Original(id) => write!(f, "{id}"),
            State::Boundary => f.write_str(BOUNDARY),
            State::Gadget(gadget) => write!(f, "{gadget}"),
        }
    }
}

impl Serialize for State {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// A single transition rule.
///
/// When in `state` reading `read`, write `write`, move one cell in `direction`
/// and continue in `next_state`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Transition {
    pub state: State,
    pub read: Symbol,
    pub write: Symbol,
    pub direction: Direction,
    pub next_state: State,
}

impl Transition {
    pub fn new(
        state: impl Into<State>,
        read: impl Into<Symbol>,
        write: impl Into<Symbol>,
        direction: Direction,
        next_state: impl Into<State>,
    ) -> Self {
        Self {
            state: state.into(),
            read: read.into(),
            write: write.into(),
            direction,
            next_state: next_state.into(),
        }
    }
}

impl fmt::Display for Transition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} {} {}",
            self.state, self.read, self.write, self.direction, self.next_state
        )
    }
}

/// The tape convention a transition table is written for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TapeModel {
    /// Tape infinite to the right only (Sipser model), tagged `;S`.
    OneWay,
    /// Tape infinite in both directions, tagged `;I`.
    TwoWay,
}

impl TapeModel {
    pub fn tag(&self) -> &'static str {
        match self {
            TapeModel::OneWay => ONE_WAY_TAG,
            TapeModel::TwoWay => TWO_WAY_TAG,
        }
    }

    /// The model a table is translated into.
    pub fn opposite(&self) -> Self {
        match self {
            TapeModel::OneWay => TapeModel::TwoWay,
            TapeModel::TwoWay => TapeModel::OneWay,
        }
    }
}

impl FromStr for TapeModel {
    type Err = TapeError;

    fn from_str(tag: &str) -> Result<Self, Self::Err> {
        match tag {
            ONE_WAY_TAG => Ok(TapeModel::OneWay),
            TWO_WAY_TAG => Ok(TapeModel::TwoWay),
            other => Err(TapeError::InvalidModel(other.to_string())),
        }
    }
}

impl fmt::Display for TapeModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// A transition table together with the tape model it targets.
///
/// Order of transitions is kept for output fidelity only.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TransitionTable {
    pub model: TapeModel,
    pub transitions: Vec<Transition>,
}

impl TransitionTable {
    pub fn new(model: TapeModel, transitions: Vec<Transition>) -> Self {
        Self { model, transitions }
    }

    /// Every state appearing as a current or next state.
    pub fn states(&self) -> BTreeSet<State> {
        self.transitions
            .iter()
            .flat_map(|t| [t.state.clone(), t.next_state.clone()])
            .collect()
    }
}

/// Represents the errors that can occur while reading or translating a description.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TapeError {
    /// The tag line is neither `;S` nor `;I`.
    #[error("Invalid model: {0:?}")]
    InvalidModel(String),
    /// A transition line does not consist of five fields with a valid direction.
    #[error("Malformed transition on line {line}: {reason}")]
    MalformedTransitionLine { line: usize, reason: String },
    /// The description could not be parsed at all.
    #[error("Description parsing error: {0}")]
    ParseError(#[from] Box<pest::error::Error<Rule>>),
    /// Indicates an error related to reading or writing description files.
    #[error("File error: {0}")]
    FileError(String),
    /// An error raised while processing the named file.
    #[error("{path}: {source}")]
    InFile {
        path: String,
        source: Box<TapeError>,
    },
}

impl TapeError {
    /// Attaches the file the error came from.
    pub fn in_file(self, path: &Path) -> Self {
        TapeError::InFile {
            path: path.display().to_string(),
            source: Box::new(self),
        }
    }

    /// The underlying error, without any file context.
    pub fn root(&self) -> &TapeError {
        match self {
            TapeError::InFile { source, .. } => source.root(),
            other => other,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_direction_serialization() {
        let left_json = serde_json::to_string(&Direction::Left).unwrap();
        let right_json = serde_json::to_string(&Direction::Right).unwrap();

        assert_eq!(left_json, "\"Left\"");
        assert_eq!(right_json, "\"Right\"");

        let left: Direction = serde_json::from_str(&left_json).unwrap();
        assert_eq!(left, Direction::Left);
    }

    #[test]
    fn test_state_id_parse() {
        assert_eq!(StateId::parse("0"), StateId::numbered(0));
        assert_eq!(StateId::parse("007"), StateId::numbered(7));
        assert_eq!(StateId::parse("000"), StateId::numbered(0));
        assert_eq!(StateId::parse("q1"), StateId::Named("q1".into()));
        assert_eq!(StateId::parse("-3"), StateId::Named("-3".into()));
        assert_eq!(StateId::parse("+3"), StateId::Named("+3".into()));
        assert_eq!(StateId::parse(""), StateId::Named(String::new()));
        assert_eq!(
            StateId::parse("18446744073709551615"),
            StateId::numbered(u64::MAX)
        );
        assert_eq!(
            StateId::parse("123456789012345678901234").to_string(),
            "123456789012345678901234"
        );
    }

    #[test]
    fn test_numeral_successor_carries() {
        let next = |digits: &str| Numeral::parse(digits).unwrap().successor().to_string();

        assert_eq!(next("0"), "1");
        assert_eq!(next("41"), "42");
        assert_eq!(next("199"), "200");
        assert_eq!(next("999"), "1000");
        assert_eq!(next("18446744073709551615"), "18446744073709551616");
        assert_eq!(next("99999999999999999999"), "100000000000000000000");
    }

    #[test]
    fn test_numeral_orders_numerically() {
        let parse = |digits: &str| Numeral::parse(digits).unwrap();

        assert!(parse("9") < parse("10"));
        assert!(parse("010") < parse("11"));
        assert!(parse("18446744073709551616") > parse("18446744073709551615"));
        assert_eq!(parse("0007"), parse("7"));
    }

    #[test]
    fn test_gadget_labels() {
        let s = StateId::numbered(3);
        let a = Symbol::from("a");
        let b = Symbol::from("b");

        assert_eq!(State::from(Gadget::Left(s.clone())).to_string(), "LEFT_3");
        assert_eq!(Gadget::Shift(s.clone(), a.clone()).to_string(), "SHIFT_3%a");
        assert_eq!(Gadget::End(s).to_string(), "END_3");
        assert_eq!(Gadget::BoundaryBySymbol(a.clone()).to_string(), "%a");
        assert_eq!(Gadget::ShiftByPair(a.clone(), b).to_string(), "SHIFT_a$b");
        assert_eq!(Gadget::Restore(a).to_string(), "RESTORE_a");
        assert_eq!(State::Entry.to_string(), "0");
        assert_eq!(State::exit().to_string(), "1");
        assert_eq!(State::Boundary.to_string(), "%");
    }

    #[test]
    fn test_end_gadgets_do_not_collide_with_restore() {
        // A state labelled `1` and a symbol `1` used to share the label `END_1`.
        let per_state = Gadget::End(StateId::numbered(1)).to_string();
        let per_symbol = Gadget::Restore(Symbol::from("1")).to_string();
        assert_ne!(per_state, per_symbol);
    }

    #[test]
    fn test_transition_display() {
        let transition = Transition::new(
            State::numbered(1),
            "a",
            "b",
            Direction::Right,
            Gadget::Left(StateId::numbered(1)),
        );
        assert_eq!(transition.to_string(), "1 a b r LEFT_1");
    }

    #[test]
    fn test_state_serializes_as_label() {
        let json = serde_json::to_string(&State::from(Gadget::Mark(StateId::numbered(2)))).unwrap();
        assert_eq!(json, "\"MARK_2\"");
    }

    #[test]
    fn test_tape_model_tags() {
        assert_eq!(";S".parse::<TapeModel>(), Ok(TapeModel::OneWay));
        assert_eq!(";I".parse::<TapeModel>(), Ok(TapeModel::TwoWay));
        assert_eq!(TapeModel::OneWay.opposite(), TapeModel::TwoWay);
        assert_eq!(TapeModel::TwoWay.tag(), ";I");
    }

    #[test]
    fn test_error_display() {
        let error = ";X".parse::<TapeModel>().unwrap_err();
        assert_eq!(error, TapeError::InvalidModel(";X".to_string()));
        assert!(error.to_string().contains("Invalid model"));

        let error = TapeError::MalformedTransitionLine {
            line: 4,
            reason: "expected 5 fields, found 3".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Malformed transition on line 4: expected 5 fields, found 3"
        );
    }

    #[test]
    fn test_error_in_file() {
        let error = TapeError::InvalidModel(";Z".to_string()).in_file(Path::new("runs/a.in"));

        assert_eq!(error.to_string(), "runs/a.in: Invalid model: \";Z\"");
        assert_eq!(error.root(), &TapeError::InvalidModel(";Z".to_string()));
    }
}
