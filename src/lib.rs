//! Finite automata built from regular expressions.
//!
//! The pipeline: a [`Regex`] tree compiles into an NFA ([`compile()`]), the
//! NFA determinizes into a [`Dfa`] ([`determinize()`]), and either automaton
//! runs against a word ([`Dfa::recognize`], [`Automaton::recognize`]).
//! [`wire`] reads and writes the JSON documents automata and expressions
//! travel in, and [`dot()`] renders a finished automaton for Graphviz.

pub mod ast;
pub mod automaton;
pub mod closure;
pub mod compile;
pub mod determinize;
pub mod dot;
pub mod error;
mod parse;
#[cfg(test)]
mod qc;
pub mod recognize;
pub mod stateid;
pub mod wire;

pub use ast::Regex;
pub use automaton::{Automaton, Dfa, Transition};
pub use closure::epsilon_closure;
pub use compile::compile;
pub use determinize::{determinize, determinize_over};
pub use dot::dot;
pub use error::{Error, InvalidExpression, MalformedAutomaton, Result};
pub use recognize::{Run, Verdict};
pub use stateid::StateId;
