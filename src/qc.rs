//! Random test-case generation for the property tests.

use std::collections::HashSet;

use quickcheck::{Arbitrary, Gen};

use crate::ast::Regex;

// Small alphabet so random words collide with the language often enough to
// make the equivalence properties interesting.
const ALPHABET: [char; 3] = ['a', 'b', 'c'];
const DEPTH: usize = 4;
const MAX_WORD_LEN: usize = 8;

fn gen_regex(g: &mut Gen, depth: usize, stars: bool) -> Regex {
    if depth == 0 {
        return Regex::Symbol(*g.choose(&ALPHABET).unwrap());
    }
    let choices: &[u8] = if stars { &[0, 1, 2, 3] } else { &[0, 1, 2] };
    match g.choose(choices).unwrap() {
        0 => Regex::Symbol(*g.choose(&ALPHABET).unwrap()),
        1 => Regex::sequence(
            gen_regex(g, depth - 1, stars),
            gen_regex(g, depth - 1, stars),
        ),
        2 => Regex::alternation(
            gen_regex(g, depth - 1, stars),
            gen_regex(g, depth - 1, stars),
        ),
        _ => Regex::star(gen_regex(g, depth - 1, stars)),
    }
}

/// The exact language of a star-free expression.
fn language(regex: &Regex) -> HashSet<String> {
    match regex {
        Regex::Symbol(c) => {
            let mut set = HashSet::new();
            set.insert(c.to_string());
            set
        }
        Regex::Sequence(l, r) => {
            let left = language(l);
            let right = language(r);
            let mut set = HashSet::with_capacity(left.len() * right.len());
            for a in &left {
                for b in &right {
                    set.insert(format!("{}{}", a, b));
                }
            }
            set
        }
        Regex::Alternation(l, r) => {
            let mut set = language(l);
            set.extend(language(r));
            set
        }
        Regex::KleeneStar(_) => unreachable!("star-free generator produced a star"),
    }
}

/// A star-free expression together with its exact (finite) language.
#[derive(Debug, Clone)]
pub(crate) struct RegexCase {
    pub regex: Regex,
    pub matches: HashSet<String>,
}

impl Arbitrary for RegexCase {
    fn arbitrary(g: &mut Gen) -> Self {
        let depth = DEPTH.min(g.size());
        let regex = gen_regex(g, depth, false);
        let matches = language(&regex);
        Self { regex, matches }
    }
}

/// Any expression over the core operators, stars included.
#[derive(Debug, Clone)]
pub(crate) struct AnyRegex(pub Regex);

impl Arbitrary for AnyRegex {
    fn arbitrary(g: &mut Gen) -> Self {
        let depth = DEPTH.min(g.size());
        Self(gen_regex(g, depth, true))
    }
}

/// A random word over the generator alphabet.
#[derive(Debug, Clone)]
pub(crate) struct Word(pub String);

impl Arbitrary for Word {
    fn arbitrary(g: &mut Gen) -> Self {
        let len = usize::arbitrary(g) % (MAX_WORD_LEN + 1);
        let word = (0..len).map(|_| *g.choose(&ALPHABET).unwrap()).collect();
        Self(word)
    }
}
