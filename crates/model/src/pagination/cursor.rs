use crate::pagination::token::Token;
use serde::{Deserialize, Serialize};

/// Represents the incoming pagination cursor.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Default)]
pub enum Cursor {
    /// First page; no boundary.
    #[default]
    None,

    /// Resume with the rows that follow the encoded boundary row.
    After(Token),

    /// Resume with the rows that precede the encoded boundary row.
    Before(Token),
}

impl Cursor {
    /// Builds a cursor from the two-field form used on the wire.
    ///
    /// When both tokens are present `after` wins and `before` is ignored.
    pub fn from_pair(after: Option<Token>, before: Option<Token>) -> Self {
        match (after, before) {
            (Some(after), _) => Cursor::After(after),
            (None, Some(before)) => Cursor::Before(before),
            (None, None) => Cursor::None,
        }
    }

    pub fn token(&self) -> Option<&Token> {
        match self {
            Cursor::After(token) | Cursor::Before(token) => Some(token),
            Cursor::None => None,
        }
    }

    pub fn is_after(&self) -> bool {
        matches!(self, Cursor::After(_))
    }

    pub fn is_before(&self) -> bool {
        matches!(self, Cursor::Before(_))
    }

    pub fn is_none(&self) -> bool {
        matches!(self, Cursor::None)
    }
}

#[cfg(test)]
mod tests {
    use super::Cursor;
    use crate::pagination::token::Token;

    #[test]
    fn test_after_takes_precedence() {
        let cursor = Cursor::from_pair(Some(Token::from("a")), Some(Token::from("b")));
        assert_eq!(cursor, Cursor::After(Token::from("a")));
        assert!(cursor.is_after());
        assert!(!cursor.is_before());
    }

    #[test]
    fn test_before_only() {
        let cursor = Cursor::from_pair(None, Some(Token::from("b")));
        assert_eq!(cursor.token(), Some(&Token::from("b")));
        assert!(cursor.is_before());
    }

    #[test]
    fn test_no_tokens() {
        let cursor = Cursor::from_pair(None, None);
        assert!(cursor.is_none());
        assert_eq!(cursor.token(), None);
    }
}
