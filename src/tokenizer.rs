//! Left-to-right scanner that turns a pattern source into a token tree.

use crate::error::{Error, ErrorRepr};
use crate::shorthand::Shorthand;
use crate::token::{Body, ClassMember, Token};

/// Scans `source` and returns the root of the token tree.
pub(crate) fn tokenize(source: &str) -> Result<Token, Error> {
    let mut scanner = Scanner {
        chars: source.chars().collect(),
        pos: 0,
        groups: 0,
    };
    let body = scanner.body()?;
    if scanner.pos < scanner.chars.len() {
        // `body` only stops early on a `)` it cannot match
        return Err(Error(ErrorRepr::UnmatchedParen(scanner.pos + 1)));
    }
    Ok(Token::Root(body))
}

struct Scanner {
    chars: Vec<char>,
    pos: usize,
    /// Stable group ids, assigned in scan order.
    groups: usize,
}

impl Scanner {
    fn peek(&self) -> Option<char> {
        self.chars.get(self.pos).copied()
    }

    /// Scans sibling tokens until a `)` or the end of input; the closing `)`
    /// is left for the caller to match.
    fn body(&mut self) -> Result<Body, Error> {
        let mut options: Vec<Vec<Token>> = Vec::new();
        let mut branch: Vec<Token> = Vec::new();

        while let Some(c) = self.peek() {
            match c {
                ')' => break,

                '|' => {
                    self.pos += 1;
                    options.push(std::mem::take(&mut branch));
                }

                '(' => {
                    self.pos += 1;
                    let id = self.groups;
                    self.groups += 1;
                    let body = self.body()?;
                    if self.peek() != Some(')') {
                        return Err(Error(ErrorRepr::UnterminatedGroup));
                    }
                    self.pos += 1;
                    branch.push(Token::Group { id, body });
                }

                '[' => {
                    self.pos += 1;
                    let negated = if self.peek() == Some('^') {
                        self.pos += 1;
                        true
                    } else {
                        false
                    };
                    let members = self.class()?;
                    branch.push(Token::Set { members, negated });
                }

                // any character except newline
                '.' => {
                    self.pos += 1;
                    branch.push(Token::Set {
                        members: vec![ClassMember::Char('\n')],
                        negated: true,
                    });
                }

                '?' | '+' | '*' => {
                    let column = self.pos + 1;
                    self.pos += 1;
                    let (min, max) = match c {
                        '?' => (0, Some(1)),
                        '+' => (1, None),
                        _ => (0, None),
                    };
                    Self::wrap_last(&mut branch, min, max, column)?;
                }

                // `{m}`, `{m,}`, `{m,n}`, or a literal `{`
                '{' => {
                    let column = self.pos + 1;
                    match self.quantifier_range() {
                        Some((min, max)) => {
                            if let Some(max) = max {
                                if max < min {
                                    return Err(Error(ErrorRepr::RepetitionOrder(
                                        column, min, max,
                                    )));
                                }
                            }
                            Self::wrap_last(&mut branch, min, max, column)?;
                        }
                        None => {
                            self.pos += 1;
                            branch.push(Token::Char('{'));
                        }
                    }
                }

                '\\' => {
                    self.pos += 1;
                    match self.peek() {
                        Some(escaped) => {
                            self.pos += 1;
                            match Shorthand::from_escape(escaped) {
                                Some(shorthand) => branch.push(shorthand.into_set()),
                                None => branch.push(Token::Char(escaped)),
                            }
                        }
                        None => branch.push(Token::Char('\\')),
                    }
                }

                _ => {
                    self.pos += 1;
                    branch.push(Token::Char(c));
                }
            }
        }

        if options.is_empty() {
            Ok(Body::Children(branch))
        } else {
            options.push(branch);
            Ok(Body::Options(options))
        }
    }

    /// A quantifier applies to the single immediately-preceding element, so
    /// repeated quantifiers (`a?+`) simply re-wrap the previous wrapper.
    fn wrap_last(
        branch: &mut Vec<Token>,
        min: u32,
        max: Option<u32>,
        column: usize,
    ) -> Result<(), Error> {
        let inner = match branch.pop() {
            Some(token) => token,
            None => return Err(Error(ErrorRepr::NothingToRepeat(column))),
        };
        branch.push(Token::Repetition {
            min,
            max,
            inner: Box::new(inner),
        });
        Ok(())
    }

    /// Tries to read `{m}`, `{m,}`, or `{m,n}` with the position on the `{`.
    /// Advances past the closing `}` on success; leaves the position
    /// untouched otherwise so the `{` falls back to a literal.
    fn quantifier_range(&mut self) -> Option<(u32, Option<u32>)> {
        let mut i = self.pos + 1;
        let min = self.digits(&mut i)?;
        match self.chars.get(i).copied() {
            Some('}') => {
                self.pos = i + 1;
                Some((min, Some(min)))
            }
            Some(',') => {
                i += 1;
                let max = match self.chars.get(i).copied() {
                    Some('}') => None,
                    _ => Some(self.digits(&mut i)?),
                };
                if self.chars.get(i).copied() == Some('}') {
                    self.pos = i + 1;
                    Some((min, max))
                } else {
                    None
                }
            }
            _ => None,
        }
    }

    /// Reads a run of ASCII digits at `*i`, advancing it. `None` when the run
    /// is empty or the value overflows `u32`.
    fn digits(&self, i: &mut usize) -> Option<u32> {
        let start = *i;
        while matches!(self.chars.get(*i), Some(c) if c.is_ascii_digit()) {
            *i += 1;
        }
        if *i == start {
            return None;
        }
        self.chars[start..*i].iter().collect::<String>().parse().ok()
    }

    /// Scans a class body with the position just past `[` (and any leading
    /// `^`), consuming through the closing `]`.
    fn class(&mut self) -> Result<Vec<ClassMember>, Error> {
        let mut members = Vec::new();
        loop {
            let c = match self.peek() {
                Some(c) => c,
                None => return Err(Error(ErrorRepr::UnterminatedClass)),
            };
            match c {
                ']' => {
                    self.pos += 1;
                    return Ok(members);
                }
                '\\' => {
                    self.pos += 1;
                    let escaped = match self.peek() {
                        Some(escaped) => escaped,
                        None => return Err(Error(ErrorRepr::UnterminatedClass)),
                    };
                    self.pos += 1;
                    match Shorthand::from_escape(escaped) {
                        Some(shorthand) => members.extend(shorthand.members()),
                        None => self.class_atom(escaped, &mut members)?,
                    }
                }
                _ => {
                    self.pos += 1;
                    self.class_atom(c, &mut members)?;
                }
            }
        }
    }

    /// `from` has been consumed; decides between a lone character and an
    /// `X-Y` range. A `-` that would close on `]` stays literal, so `[a-f-]`
    /// keeps its trailing dash.
    fn class_atom(&mut self, from: char, members: &mut Vec<ClassMember>) -> Result<(), Error> {
        if self.peek() != Some('-') {
            members.push(ClassMember::Char(from));
            return Ok(());
        }
        match self.chars.get(self.pos + 1).copied() {
            None | Some(']') => members.push(ClassMember::Char(from)),
            Some('\\') => match self.chars.get(self.pos + 2).copied() {
                Some(to) => {
                    self.pos += 3;
                    members.push(ClassMember::Range(from, to));
                }
                None => return Err(Error(ErrorRepr::UnterminatedClass)),
            },
            Some(to) => {
                self.pos += 2;
                members.push(ClassMember::Range(from, to));
            }
        }
        Ok(())
    }
}
