//! This module provides the parser for Turing machine descriptions, utilizing the `pest` crate.
//! It defines the grammar of the line format and turns its parse tree into a `TransitionTable`.

use crate::types::{Direction, StateId, Symbol, TapeError, TapeModel, Transition, TransitionTable};
use pest::{iterators::Pair, Parser as PestParser};
use pest_derive::Parser as PestParser;

/// Number of fields in a transition line.
const FIELD_COUNT: usize = 5;

/// Derives a `PestParser` for the description grammar defined in `grammar.pest`.
#[derive(PestParser)]
#[grammar = "grammar.pest"]
pub struct DescriptionParser;

/// Parses a description into a `TransitionTable`.
///
/// The first line must be a model tag (`;S` or `;I`). Comment lines and blank lines are
/// skipped. Every other line must hold exactly five fields:
/// `state read write direction next_state`, with `direction` one of `l` or `r`.
///
/// State labels are classified but not renumbered; see [`crate::normalizer`].
///
/// # Returns
///
/// * `Ok(TransitionTable)` if the description is well-formed.
/// * `Err(TapeError::InvalidModel)` if the tag line is not recognized.
/// * `Err(TapeError::MalformedTransitionLine)` if a transition line is malformed.
pub fn parse(input: &str) -> Result<TransitionTable, TapeError> {
    let root = DescriptionParser::parse(Rule::description, input)
        .map_err(|e| TapeError::ParseError(e.into()))?
        .next()
        .ok_or_else(|| TapeError::InvalidModel(String::new()))?;

    let mut pairs = root.into_inner();

    let model = match pairs.next() {
        Some(header) if header.as_rule() == Rule::header => {
            header.as_str().trim().parse::<TapeModel>()?
        }
        _ => return Err(TapeError::InvalidModel(String::new())),
    };

    let transitions = pairs
        .filter(|p| p.as_rule() == Rule::transition)
        .map(parse_transition)
        .collect::<Result<Vec<_>, _>>()?;

    Ok(TransitionTable::new(model, transitions))
}

/// Parses one transition line from a `Pair<Rule::transition>`.
fn parse_transition(pair: Pair<Rule>) -> Result<Transition, TapeError> {
    let (line, _) = pair.line_col();
    let fields: Vec<&str> = pair.into_inner().map(|p| p.as_str()).collect();

    let [state, read, write, direction, next_state] = fields[..] else {
        return Err(malformed(
            line,
            format!("expected {FIELD_COUNT} fields, found {}", fields.len()),
        ));
    };

    Ok(Transition::new(
        StateId::parse(state),
        Symbol::from(read),
        Symbol::from(write),
        parse_direction(direction, line)?,
        StateId::parse(next_state),
    ))
}

/// Parses the direction field: `l` for left and `r` for right.
fn parse_direction(field: &str, line: usize) -> Result<Direction, TapeError> {
    match field {
        "l" => Ok(Direction::Left),
        "r" => Ok(Direction::Right),
        other => Err(malformed(line, format!("unsupported direction: {other}"))),
    }
}

fn malformed(line: usize, reason: String) -> TapeError {
    TapeError::MalformedTransitionLine { line, reason }
}
