//! Textual front end: parse a pattern with `regex-syntax` and map its HIR
//! onto the core operator set. Anything the core cannot express is rejected
//! up front with a named error rather than half-supported.

use regex_syntax::hir::{Hir, HirKind, Literal, RepetitionKind};
use regex_syntax::Parser;

use crate::ast::Regex;
use crate::error::InvalidExpression;

impl Regex {
    /// Parse a textual pattern into symbols, sequences, alternations and
    /// Kleene stars. `+` desugars to `x · x*`; anchors, classes, word
    /// boundaries, `?` and bounded repetitions are not expressible here and
    /// fail with [`InvalidExpression::Unsupported`].
    pub fn parse(pattern: &str) -> Result<Regex, InvalidExpression> {
        let hir = Parser::new().parse(pattern)?;
        from_hir(&hir)
    }
}

fn from_hir(hir: &Hir) -> Result<Regex, InvalidExpression> {
    match hir.kind() {
        HirKind::Empty => Err(InvalidExpression::Unsupported("empty pattern")),
        HirKind::Literal(Literal::Unicode(c)) => Ok(Regex::Symbol(*c)),
        HirKind::Literal(Literal::Byte(_)) => {
            Err(InvalidExpression::Unsupported("raw byte literal"))
        }
        HirKind::Class(_) => Err(InvalidExpression::Unsupported("character class")),
        HirKind::Anchor(_) => Err(InvalidExpression::Unsupported("anchor")),
        HirKind::WordBoundary(_) => Err(InvalidExpression::Unsupported("word boundary")),
        HirKind::Repetition(rep) => match &rep.kind {
            RepetitionKind::ZeroOrMore => Ok(Regex::star(from_hir(&rep.hir)?)),
            RepetitionKind::OneOrMore => {
                let inner = from_hir(&rep.hir)?;
                Ok(Regex::sequence(inner.clone(), Regex::star(inner)))
            }
            RepetitionKind::ZeroOrOne => {
                Err(InvalidExpression::Unsupported("zero-or-one repetition"))
            }
            RepetitionKind::Range(_) => {
                Err(InvalidExpression::Unsupported("bounded repetition"))
            }
        },
        HirKind::Group(group) => from_hir(&group.hir),
        HirKind::Concat(parts) => fold(parts, Regex::sequence),
        HirKind::Alternation(parts) => fold(parts, Regex::alternation),
    }
}

fn fold(parts: &[Hir], join: fn(Regex, Regex) -> Regex) -> Result<Regex, InvalidExpression> {
    let mut parts = parts.iter().map(from_hir);
    let first = match parts.next() {
        Some(part) => part?,
        None => return Err(InvalidExpression::Unsupported("empty pattern")),
    };
    parts.try_fold(first, |acc, part| part.map(|p| join(acc, p)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_symbol() {
        assert_eq!(Regex::parse("a").unwrap(), Regex::symbol('a'));
    }

    #[test]
    fn concatenation_folds_left() {
        assert_eq!(
            Regex::parse("abc").unwrap(),
            Regex::sequence(
                Regex::sequence(Regex::symbol('a'), Regex::symbol('b')),
                Regex::symbol('c')
            )
        );
    }

    #[test]
    fn alternation_and_grouping() {
        assert_eq!(
            Regex::parse("a(b|c)").unwrap(),
            Regex::sequence(
                Regex::symbol('a'),
                Regex::alternation(Regex::symbol('b'), Regex::symbol('c'))
            )
        );
    }

    #[test]
    fn star_and_plus() {
        assert_eq!(
            Regex::parse("a*").unwrap(),
            Regex::star(Regex::symbol('a'))
        );
        assert_eq!(
            Regex::parse("a+").unwrap(),
            Regex::sequence(Regex::symbol('a'), Regex::star(Regex::symbol('a')))
        );
    }

    #[test]
    fn unsupported_constructs_are_named() {
        for pattern in &["^a", "a$", "a?", "a{2,3}", "[ab]", r"\ba", ""] {
            match Regex::parse(pattern) {
                Err(InvalidExpression::Unsupported(_)) => {}
                other => panic!("{:?} should be unsupported, got {:?}", pattern, other),
            }
        }
    }

    #[test]
    fn parse_errors_pass_through() {
        match Regex::parse("a(") {
            Err(InvalidExpression::Parse(_)) => {}
            other => panic!("expected a parse error, got {:?}", other),
        }
    }

    #[test]
    fn parsed_pattern_compiles_and_runs() {
        let nfa = crate::compile::compile(&Regex::parse("a(b|c)*").unwrap());
        assert!(nfa.recognize("a").is_accepted());
        assert!(nfa.recognize("abcb").is_accepted());
        assert!(!nfa.recognize("ba").is_accepted());
    }
}
