use crate::range::CharSet;
use crate::token::{Body, ClassMember, Token};
use crate::tokenizer;
use crate::{Error, Visitor, MAX_REPEAT};

use arbitrary::Unstructured;
use std::{fmt, str::FromStr};

/// A compiled pattern that produces random matching strings from
/// [`Unstructured`](https://docs.rs/arbitrary/latest/arbitrary/struct.Unstructured.html).
///
/// # Implementation
/// ## Construction
/// `Pattern` is constructed using `from_str` of a restricted regular
/// expression:
/// - A scanner converts the source into a token tree (in tokenizer.rs),
///   validating `{m,n}` bounds along the way.
/// - Every group receives a stable id in scan order. Capture slots are
///   resolved against those ids per generation, so the tree itself is never
///   written to after construction and one `Pattern` can serve any number of
///   concurrent `generate` calls.
///
/// ## Generation
/// `Unstructured` drives every random choice while walking the tree:
/// alternation branches, class members, and repetition counts. Leaf
/// characters and structural events are pushed into a [`Visitor`].
#[derive(Debug)]
pub struct Pattern {
    root: Token,

    // cap for repetitions with no upper bound, see `compile`
    max_repeat: u32,
}

enum Frame<'p> {
    Emit(&'p Token),
    Close(usize),
}

impl Pattern {
    /// Compiles `source` with an explicit cap on unbounded repetition.
    ///
    /// `max_repeat` bounds `+`, `*`, and `{m,}`: a repetition with no upper
    /// bound draws its count from `min..=max(min, max_repeat)`. `from_str`
    /// compiles with [`MAX_REPEAT`].
    pub fn compile(source: &str, max_repeat: u32) -> Result<Self, Error> {
        let root = tokenizer::tokenize(source)?;
        Ok(Self { root, max_repeat })
    }

    /// Returns a resulting `Visitor` after one random walk of the pattern.
    ///
    /// The visitor decides the output shape: `String` for the generated
    /// text, [`Captures`](crate::Captures) for the capture list, `u64` for a
    /// choice-path id, or a tuple for several of these from the same walk:
    ///
    /// ```
    /// use regen_lib::{Captures, Pattern};
    /// use arbitrary::Unstructured;
    ///
    /// let pattern: Pattern = "(1[0-2]|0[1-9]):[0-5][0-9]".parse().unwrap();
    /// let mut u = Unstructured::new(b"some entropy bytes, e.g. from a fuzzer");
    /// let (time, captures): (String, Captures) = pattern.generate(&mut u).unwrap();
    /// assert_eq!(captures.len(), 1);
    /// assert!(time.starts_with(captures.get(0).unwrap()));
    /// ```
    pub fn generate<V: Visitor>(&self, u: &mut Unstructured<'_>) -> arbitrary::Result<V> {
        let mut visitor = V::new();
        let mut to_write = vec![Frame::Emit(&self.root)];

        while let Some(frame) = to_write.pop() {
            let token = match frame {
                Frame::Close(id) => {
                    visitor.visit_group_end(id);
                    continue;
                }
                Frame::Emit(token) => token,
            };
            match token {
                Token::Root(body) => Self::push_branch(body, &mut to_write, u, &mut visitor)?,
                Token::Group { id, body } => {
                    visitor.visit_group(*id);
                    to_write.push(Frame::Close(*id));
                    Self::push_branch(body, &mut to_write, u, &mut visitor)?;
                }
                Token::Set { members, negated } => {
                    let set = expand_class(members, *negated);
                    // an empty expansion generates nothing
                    if !set.is_empty() {
                        let n = u.choose_index(set.len() as usize)?;
                        if let Some(c) = set.index(n as u64).and_then(char::from_u32) {
                            visitor.visit_char(c);
                        }
                    }
                }
                Token::Repetition { min, max, inner } => {
                    let cap = max.unwrap_or_else(|| (*min).max(self.max_repeat));
                    let reps = u.int_in_range(*min..=cap)?;
                    visitor.visit_repetition(reps as usize);
                    for _ in 0..reps {
                        to_write.push(Frame::Emit(inner.as_ref()));
                    }
                }
                Token::Char(c) => visitor.visit_char(*c),
            }
        }
        Ok(visitor)
    }

    fn push_branch<'p, V: Visitor>(
        body: &'p Body,
        to_write: &mut Vec<Frame<'p>>,
        u: &mut Unstructured<'_>,
        visitor: &mut V,
    ) -> arbitrary::Result<()> {
        let seq = match body {
            Body::Children(seq) => seq,
            Body::Options(options) => {
                let index = u.choose_index(options.len())?;
                visitor.visit_or(index);
                &options[index]
            }
        };
        // reverse so the stack pops siblings in order
        to_write.extend(seq.iter().rev().map(Frame::Emit));
        Ok(())
    }

    /// Returns the number of distinct strings this pattern can generate, or
    /// `None` if the result exceeds `u64::MAX`.
    ///
    /// # Usage
    /// Provides a rough number of equivalence classes of the pattern, which
    /// is useful for estimating coverage as a consumer discovers more classes
    /// over time. `pattern.how_many()` is the number of unique values
    /// possible from `pattern.generate::<u64>(u)`, barring hash collisions.
    ///
    /// # Limitations
    /// 1. Unbounded repetition is counted against the repeat cap, matching
    /// what `generate` can actually produce.
    ///
    /// 2. The result is not aware of duplicate outputs, e.g. `a|a` counts as
    /// 2 even though every output is "a".
    pub fn how_many(&self) -> Option<u64> {
        self.how_many_token(&self.root)
    }

    fn how_many_token(&self, token: &Token) -> Option<u64> {
        match token {
            Token::Root(body) | Token::Group { body, .. } => self.how_many_body(body),
            Token::Char(_) => Some(1),
            Token::Set { members, negated } => {
                // an empty class still produces one output, the empty string
                Some(expand_class(members, *negated).len().max(1))
            }
            Token::Repetition { min, max, inner } => {
                let cap = max.unwrap_or_else(|| (*min).max(self.max_repeat));
                let child = self.how_many_token(inner)?;
                if child == 1 {
                    // e.g. min,max = 1,3
                    // "a", "aa", "aaa" -- 3 options
                    return Some(u64::from(cap - min) + 1);
                }
                let mut res = Some(0u64);
                for reps in *min..=cap {
                    let (sub, overflow) = child.overflowing_pow(reps);
                    res = add(res, (!overflow).then_some(sub));
                    if res.is_none() {
                        break;
                    }
                }
                res
            }
        }
    }

    fn how_many_body(&self, body: &Body) -> Option<u64> {
        match body {
            Body::Children(seq) => seq
                .iter()
                .fold(Some(1), |acc, token| mul(acc, self.how_many_token(token))),
            Body::Options(options) => options.iter().fold(Some(0), |acc, seq| {
                let branch = seq
                    .iter()
                    .fold(Some(1), |acc, token| mul(acc, self.how_many_token(token)));
                add(acc, branch)
            }),
        }
    }
}

fn add(x: Option<u64>, y: Option<u64>) -> Option<u64> {
    x?.checked_add(y?)
}

fn mul(x: Option<u64>, y: Option<u64>) -> Option<u64> {
    x?.checked_mul(y?)
}

/// Expands class members into the concrete set of generable codes: the union
/// of the members, bounded against the printable range.
fn expand_class(members: &[ClassMember], negated: bool) -> CharSet {
    let mut union = CharSet::new();
    for member in members {
        match *member {
            ClassMember::Char(c) => union.add(c as u32, c as u32),
            ClassMember::Range(from, to) => union.add(from as u32, to as u32),
        }
    }
    let mut set = CharSet::printable();
    if negated {
        set.subtract(&union);
    } else {
        set.intersect(&union);
    }
    set
}

impl FromStr for Pattern {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::compile(s, MAX_REPEAT)
    }
}

/// Pretty prints the parsed tree.
///
/// It's helpful to check if the scanned tree matches what is expected from
/// the un-parsed pattern.
impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
        write!(f, "{}", self.root)
    }
}
