use crate::token::{ClassMember, Token};

/// Shorthand class escapes and the ASCII character sets they stand for.
///
/// Negated shorthands are pre-resolved against the printable range
/// `32..=126`, so class expansion only ever sees plain members.
#[derive(Debug, Clone, Copy, PartialEq, Eq, enum_iterator::Sequence)]
pub(crate) enum Shorthand {
    Digit,
    Word,
    Space,
    NotDigit,
    NotWord,
    NotSpace,
}

impl Shorthand {
    /// The shorthand named by the character following a `\`, if any.
    pub(crate) fn from_escape(c: char) -> Option<Self> {
        match c {
            'd' => Some(Self::Digit),
            'w' => Some(Self::Word),
            's' => Some(Self::Space),
            'D' => Some(Self::NotDigit),
            'W' => Some(Self::NotWord),
            'S' => Some(Self::NotSpace),
            _ => None,
        }
    }

    pub(crate) const fn escape(&self) -> char {
        match self {
            Self::Digit => 'd',
            Self::Word => 'w',
            Self::Space => 's',
            Self::NotDigit => 'D',
            Self::NotWord => 'W',
            Self::NotSpace => 'S',
        }
    }

    /// Class members covered by this shorthand.
    pub(crate) fn members(&self) -> Vec<ClassMember> {
        let ranges: &[(char, char)] = match self {
            Self::Digit => &[('0', '9')],
            Self::Word => &[('0', '9'), ('A', 'Z'), ('_', '_'), ('a', 'z')],
            Self::Space => &[('\t', '\r'), (' ', ' ')],
            Self::NotDigit => &[(' ', '/'), (':', '~')],
            Self::NotWord => &[(' ', '/'), (':', '@'), ('[', '^'), ('`', '`'), ('{', '~')],
            Self::NotSpace => &[('!', '~')],
        };
        ranges
            .iter()
            .map(|&(from, to)| {
                if from == to {
                    ClassMember::Char(from)
                } else {
                    ClassMember::Range(from, to)
                }
            })
            .collect()
    }

    /// The set a bare `\d`-style escape stands for outside a class.
    pub(crate) fn into_set(self) -> Token {
        Token::Set {
            members: self.members(),
            negated: false,
        }
    }

    pub(crate) fn all() -> impl Iterator<Item = Self> {
        enum_iterator::all::<Self>()
    }
}
