pub type Result<T> = std::result::Result<T, Error>;

/// An error from building or loading automata and expressions.
///
/// Recognition outcomes are not errors: a word that is not part of an
/// automaton's language is an expected result and is reported through
/// [`crate::recognize::Run`], never through this type.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A structural invariant of an automaton does not hold.
    #[error(transparent)]
    Malformed(#[from] MalformedAutomaton),
    /// A regular-expression document has an unrecognized shape.
    #[error(transparent)]
    Expression(#[from] InvalidExpression),
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

/// Structural invariant violation, detected once when an automaton is
/// constructed or loaded. Algorithms downstream assume validated input.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum MalformedAutomaton {
    #[error("duplicate state {0:?}")]
    DuplicateState(String),
    #[error("initial state {0:?} is not in the state set")]
    UnknownInitial(String),
    #[error("accepting state {0:?} is not in the state set")]
    UnknownAccepting(String),
    #[error("transition endpoint {0:?} is not in the state set")]
    UnknownEndpoint(String),
    #[error("transition symbol {0:?} is not in the alphabet")]
    SymbolOutsideAlphabet(char),
    #[error("the epsilon marker cannot be a member of the alphabet")]
    EpsilonInAlphabet,
    #[error("symbol {0:?} is not a single character")]
    BadSymbol(String),
    #[error("state {0:?} carries an epsilon transition, which a dfa cannot")]
    EpsilonInDfa(String),
    #[error("state {0:?} has more than one transition on {1:?}")]
    Nondeterministic(String, char),
}

/// A regular-expression node that does not fit the operator set.
#[derive(Debug, thiserror::Error)]
pub enum InvalidExpression {
    #[error("node has neither a symbol nor an operator")]
    EmptyNode,
    #[error("node carries both a symbol and an operator")]
    AmbiguousNode,
    #[error("unknown operator {0:?}")]
    UnknownOperator(String),
    #[error("operator {operator:?} takes {expected} operand(s), got {got}")]
    WrongArity {
        operator: String,
        expected: usize,
        got: usize,
    },
    #[error("symbol {0:?} is not a single character")]
    BadSymbol(String),
    #[error("unsupported pattern construct: {0}")]
    Unsupported(&'static str),
    #[error(transparent)]
    Parse(#[from] regex_syntax::Error),
}
