//! JSON documents for persisted expressions and automata.
//!
//! Two document shapes, both validated once at this boundary:
//!
//! ```text
//! {"symbol": "a"}
//! {"operator": "sequence", "operands": [ ... , ... ]}
//! {"states": [...], "alphabet": [...], "transitions": [{"from", "to",
//!  "symbol"}], "initial_state": ..., "accepting_states": [...]}
//! ```
//!
//! The empty string marks an epsilon transition on the wire; it is never a
//! member of the alphabet.

use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::ast::Regex;
use crate::automaton::Automaton;
use crate::error::{InvalidExpression, MalformedAutomaton, Result};

const EPSILON_MARKER: &str = "";

#[derive(Debug, Serialize, Deserialize)]
struct RegexDoc {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    symbol: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    operator: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    operands: Option<Vec<RegexDoc>>,
}

#[derive(Debug, Serialize, Deserialize)]
struct TransitionDoc {
    from: String,
    to: String,
    symbol: String,
}

#[derive(Debug, Serialize, Deserialize)]
struct AutomatonDoc {
    states: Vec<String>,
    alphabet: Vec<String>,
    transitions: Vec<TransitionDoc>,
    initial_state: String,
    accepting_states: Vec<String>,
}

fn regex_from_doc(doc: &RegexDoc) -> std::result::Result<Regex, InvalidExpression> {
    match (&doc.symbol, &doc.operator) {
        (Some(_), Some(_)) => Err(InvalidExpression::AmbiguousNode),
        (Some(symbol), None) => {
            let mut chars = symbol.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) => Ok(Regex::Symbol(c)),
                _ => Err(InvalidExpression::BadSymbol(symbol.clone())),
            }
        }
        (None, Some(operator)) => {
            let operands = doc.operands.as_deref().unwrap_or(&[]);
            let arity = |expected: usize| -> std::result::Result<(), InvalidExpression> {
                if operands.len() == expected {
                    Ok(())
                } else {
                    Err(InvalidExpression::WrongArity {
                        operator: operator.clone(),
                        expected,
                        got: operands.len(),
                    })
                }
            };
            match operator.as_str() {
                "sequence" => {
                    arity(2)?;
                    Ok(Regex::sequence(
                        regex_from_doc(&operands[0])?,
                        regex_from_doc(&operands[1])?,
                    ))
                }
                "alternation" => {
                    arity(2)?;
                    Ok(Regex::alternation(
                        regex_from_doc(&operands[0])?,
                        regex_from_doc(&operands[1])?,
                    ))
                }
                "kleene-star" => {
                    arity(1)?;
                    Ok(Regex::star(regex_from_doc(&operands[0])?))
                }
                _ => Err(InvalidExpression::UnknownOperator(operator.clone())),
            }
        }
        (None, None) => Err(InvalidExpression::EmptyNode),
    }
}

fn regex_to_doc(regex: &Regex) -> RegexDoc {
    let (symbol, operator, operands) = match regex {
        Regex::Symbol(c) => (Some(c.to_string()), None, None),
        Regex::Sequence(l, r) => (
            None,
            Some("sequence".to_string()),
            Some(vec![regex_to_doc(l), regex_to_doc(r)]),
        ),
        Regex::Alternation(l, r) => (
            None,
            Some("alternation".to_string()),
            Some(vec![regex_to_doc(l), regex_to_doc(r)]),
        ),
        Regex::KleeneStar(inner) => (
            None,
            Some("kleene-star".to_string()),
            Some(vec![regex_to_doc(inner)]),
        ),
    };
    RegexDoc {
        symbol,
        operator,
        operands,
    }
}

fn automaton_from_doc(doc: AutomatonDoc) -> std::result::Result<Automaton, MalformedAutomaton> {
    let mut alphabet = Vec::with_capacity(doc.alphabet.len());
    for entry in doc.alphabet {
        if entry == EPSILON_MARKER {
            return Err(MalformedAutomaton::EpsilonInAlphabet);
        }
        alphabet.push(single_char(&entry)?);
    }

    let mut transitions = Vec::with_capacity(doc.transitions.len());
    for t in doc.transitions {
        let label = if t.symbol == EPSILON_MARKER {
            None
        } else {
            Some(single_char(&t.symbol)?)
        };
        transitions.push((t.from, t.to, label));
    }

    Automaton::new(
        doc.states,
        alphabet,
        transitions,
        &doc.initial_state,
        doc.accepting_states,
    )
}

fn single_char(symbol: &str) -> std::result::Result<char, MalformedAutomaton> {
    let mut chars = symbol.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Ok(c),
        _ => Err(MalformedAutomaton::BadSymbol(symbol.to_string())),
    }
}

fn automaton_to_doc(automaton: &Automaton) -> AutomatonDoc {
    AutomatonDoc {
        states: automaton
            .state_ids()
            .map(|id| automaton.name(id).to_string())
            .collect(),
        alphabet: automaton.alphabet().map(|c| c.to_string()).collect(),
        transitions: automaton
            .transitions()
            .iter()
            .map(|t| TransitionDoc {
                from: automaton.name(t.from).to_string(),
                to: automaton.name(t.to).to_string(),
                symbol: match t.label {
                    Some(c) => c.to_string(),
                    None => EPSILON_MARKER.to_string(),
                },
            })
            .collect(),
        initial_state: automaton.name(automaton.initial_state()).to_string(),
        accepting_states: automaton
            .accepting_states()
            .iter()
            .map(|&id| automaton.name(id).to_string())
            .collect(),
    }
}

pub fn read_regex<R: Read>(reader: R) -> Result<Regex> {
    let doc: RegexDoc = serde_json::from_reader(reader)?;
    Ok(regex_from_doc(&doc)?)
}

pub fn write_regex<W: Write>(writer: W, regex: &Regex) -> Result<()> {
    serde_json::to_writer_pretty(writer, &regex_to_doc(regex))?;
    Ok(())
}

pub fn read_automaton<R: Read>(reader: R) -> Result<Automaton> {
    let doc: AutomatonDoc = serde_json::from_reader(reader)?;
    Ok(automaton_from_doc(doc)?)
}

pub fn write_automaton<W: Write>(writer: W, automaton: &Automaton) -> Result<()> {
    serde_json::to_writer_pretty(writer, &automaton_to_doc(automaton))?;
    Ok(())
}

pub fn read_regex_from_path(path: &Path) -> Result<Regex> {
    read_regex(BufReader::new(File::open(path)?))
}

pub fn read_automaton_from_path(path: &Path) -> Result<Automaton> {
    read_automaton(BufReader::new(File::open(path)?))
}

pub fn write_automaton_to_path(path: &Path, automaton: &Automaton) -> Result<()> {
    write_automaton(BufWriter::new(File::create(path)?), automaton)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::Regex;
    use crate::error::Error;

    #[test]
    fn reads_the_symbol_shape() {
        let regex = read_regex(r#"{"symbol": "a"}"#.as_bytes()).unwrap();
        assert_eq!(regex, Regex::symbol('a'));
    }

    #[test]
    fn reads_nested_operators() {
        let doc = r#"{
            "operator": "kleene-star",
            "operands": [{
                "operator": "alternation",
                "operands": [{"symbol": "a"}, {"symbol": "b"}]
            }]
        }"#;
        let regex = read_regex(doc.as_bytes()).unwrap();
        assert_eq!(
            regex,
            Regex::star(Regex::alternation(Regex::symbol('a'), Regex::symbol('b')))
        );
    }

    #[test]
    fn rejects_unknown_operator() {
        let doc = r#"{"operator": "plus", "operands": [{"symbol": "a"}]}"#;
        match read_regex(doc.as_bytes()) {
            Err(Error::Expression(InvalidExpression::UnknownOperator(op))) => {
                assert_eq!(op, "plus")
            }
            other => panic!("expected UnknownOperator, got {:?}", other),
        }
    }

    #[test]
    fn rejects_wrong_arity() {
        let doc = r#"{"operator": "sequence", "operands": [{"symbol": "a"}]}"#;
        match read_regex(doc.as_bytes()) {
            Err(Error::Expression(InvalidExpression::WrongArity { expected, got, .. })) => {
                assert_eq!((expected, got), (2, 1));
            }
            other => panic!("expected WrongArity, got {:?}", other),
        }
    }

    #[test]
    fn rejects_node_with_no_payload() {
        match read_regex("{}".as_bytes()) {
            Err(Error::Expression(InvalidExpression::EmptyNode)) => {}
            other => panic!("expected EmptyNode, got {:?}", other),
        }
    }

    #[test]
    fn regex_round_trips() {
        let regex = Regex::sequence(
            Regex::star(Regex::symbol('a')),
            Regex::alternation(Regex::symbol('b'), Regex::symbol('c')),
        );
        let mut buffer = Vec::new();
        write_regex(&mut buffer, &regex).unwrap();
        assert_eq!(read_regex(buffer.as_slice()).unwrap(), regex);
    }

    fn nfa_doc() -> &'static str {
        r#"{
            "states": ["q0", "q1", "q2"],
            "alphabet": ["a"],
            "transitions": [
                {"from": "q0", "to": "q1", "symbol": "a"},
                {"from": "q1", "to": "q2", "symbol": ""}
            ],
            "initial_state": "q0",
            "accepting_states": ["q2"]
        }"#
    }

    #[test]
    fn reads_automaton_with_epsilon_marker() {
        let automaton = read_automaton(nfa_doc().as_bytes()).unwrap();
        assert_eq!(automaton.state_count(), 3);
        let q1 = automaton.state_id("q1").unwrap();
        let q2 = automaton.state_id("q2").unwrap();
        assert_eq!(automaton.transitions_from(q1, None), &[q2]);
        assert!(automaton.recognize("a").is_accepted());
    }

    #[test]
    fn epsilon_marker_may_not_join_the_alphabet() {
        let doc = r#"{
            "states": ["q0"],
            "alphabet": ["a", ""],
            "transitions": [],
            "initial_state": "q0",
            "accepting_states": []
        }"#;
        match read_automaton(doc.as_bytes()) {
            Err(Error::Malformed(MalformedAutomaton::EpsilonInAlphabet)) => {}
            other => panic!("expected EpsilonInAlphabet, got {:?}", other),
        }
    }

    #[test]
    fn multi_character_symbols_are_malformed() {
        let doc = r#"{
            "states": ["q0"],
            "alphabet": ["ab"],
            "transitions": [],
            "initial_state": "q0",
            "accepting_states": []
        }"#;
        match read_automaton(doc.as_bytes()) {
            Err(Error::Malformed(MalformedAutomaton::BadSymbol(s))) => assert_eq!(s, "ab"),
            other => panic!("expected BadSymbol, got {:?}", other),
        }
    }

    #[test]
    fn unknown_initial_is_malformed() {
        let doc = r#"{
            "states": ["q0"],
            "alphabet": [],
            "transitions": [],
            "initial_state": "qX",
            "accepting_states": []
        }"#;
        match read_automaton(doc.as_bytes()) {
            Err(Error::Malformed(MalformedAutomaton::UnknownInitial(name))) => {
                assert_eq!(name, "qX")
            }
            other => panic!("expected UnknownInitial, got {:?}", other),
        }
    }

    #[test]
    fn automaton_round_trips() {
        let automaton = read_automaton(nfa_doc().as_bytes()).unwrap();
        let mut buffer = Vec::new();
        write_automaton(&mut buffer, &automaton).unwrap();
        let again = read_automaton(buffer.as_slice()).unwrap();
        assert_eq!(again.state_count(), automaton.state_count());
        assert_eq!(again.transitions(), automaton.transitions());
        assert_eq!(again.accepting_states(), automaton.accepting_states());
    }
}
