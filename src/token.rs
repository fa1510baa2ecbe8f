//! Token tree for a parsed pattern.

use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Token {
    Root(Body),
    Group { id: usize, body: Body },
    Set { members: Vec<ClassMember>, negated: bool },
    Repetition { min: u32, max: Option<u32>, inner: Box<Token> },
    Char(char),
}

/// Sibling tokens of a `Root` or `Group`: either one plain sequence or, once
/// the scanner has seen a `|`, a list of alternation branches.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Body {
    Children(Vec<Token>),
    Options(Vec<Vec<Token>>),
}

/// An atom inside a character class.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) enum ClassMember {
    Char(char),
    Range(char, char),
}

/// Pretty prints the parsed tree.
///
/// It's helpful to check if the scanned tree matches what is expected from
/// the un-parsed pattern (the printed form is more verbose and the quantifier
/// nesting is clearer).
impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
        match self {
            Self::Root(body) => write!(f, "{}", body)?,
            Self::Group { id, body } => write!(f, "group#{}({})", id, body)?,
            Self::Set { members, negated } => {
                write!(f, "[")?;
                if *negated {
                    write!(f, "^")?;
                }
                for member in members {
                    match member {
                        ClassMember::Char(c) => write!(f, "{}", c.escape_debug())?,
                        ClassMember::Range(from, to) => {
                            write!(f, "{}-{}", from.escape_debug(), to.escape_debug())?
                        }
                    }
                }
                write!(f, "]")?;
            }
            Self::Repetition { min, max, inner } => match max {
                Some(max) => write!(f, "repeat({}, {}, {})", inner, min, max)?,
                None => write!(f, "repeat({}, {}, inf)", inner, min)?,
            },
            Self::Char(c) => write!(f, "{:?}", c)?,
        }
        Ok(())
    }
}

fn fmt_seq(name: &str, seq: &[Token], f: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
    write!(
        f,
        "{}({})",
        name,
        seq.iter()
            .map(|t| t.to_string())
            .collect::<Vec<String>>()
            .join(", ")
    )
}

impl fmt::Display for Body {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
        match self {
            Self::Children(seq) => fmt_seq("concat", seq, f),
            Self::Options(options) => {
                let branches = options
                    .iter()
                    .map(|seq| {
                        seq.iter()
                            .map(|t| t.to_string())
                            .collect::<Vec<String>>()
                            .join(", ")
                    })
                    .map(|inner| format!("concat({})", inner))
                    .collect::<Vec<String>>()
                    .join(", ");
                write!(f, "or({})", branches)
            }
        }
    }
}
