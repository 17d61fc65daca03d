//! Token model shared by the lexer and the parser.

use std::fmt;

use winnow::stream::Location;

use crate::span::Span;

/// Token types of the DOT language
#[derive(Debug, Clone, PartialEq)]
pub enum Token<'src> {
    // Keywords (case-insensitive)
    Strict,
    Graph,
    Digraph,

    // Words
    /// `[A-Za-z_][A-Za-z0-9_]*`, non-ASCII letters allowed.
    Identifier(&'src str),
    /// `-?(.[0-9]+ | [0-9]+(.[0-9]*)?)`
    Numeral(&'src str),
    /// Double-quoted text with `\"` and line continuations resolved.
    QuotedText(String),
    /// A word that is neither an identifier nor a numeral, such as `2test`
    /// or `#ff0000`. Valid as an attribute key or value only.
    BareWord(&'src str),

    // Operators
    DirectedEdge,   // ->
    UndirectedEdge, // --
    Equals,         // =

    // Punctuation
    LeftBrace,    // {
    RightBrace,   // }
    LeftBracket,  // [
    RightBracket, // ]
    Semicolon,    // ;
    Comma,        // ,
}

impl<'src> Token<'src> {
    /// The text of a token that satisfies the ID grammar.
    pub fn id_text(&self) -> Option<&str> {
        match self {
            Token::Identifier(text) | Token::Numeral(text) => Some(*text),
            Token::QuotedText(text) => Some(text.as_str()),
            _ => None,
        }
    }

    /// The text of a token usable as an attribute key or value.
    ///
    /// Attribute positions additionally accept bare words.
    pub fn attribute_text(&self) -> Option<&str> {
        match self {
            Token::BareWord(text) => Some(*text),
            _ => self.id_text(),
        }
    }

    pub fn is_edge_operator(&self) -> bool {
        matches!(self, Token::DirectedEdge | Token::UndirectedEdge)
    }
}

/// A token with position information for winnow integration
#[derive(Debug, Clone, PartialEq)]
pub struct PositionedToken<'src> {
    pub token: Token<'src>,
    pub span: Span,
}

impl<'src> PositionedToken<'src> {
    pub fn new(token: Token<'src>, span: Span) -> Self {
        Self { token, span }
    }
}

impl<'src> std::ops::Deref for PositionedToken<'src> {
    type Target = Token<'src>;

    fn deref(&self) -> &Self::Target {
        &self.token
    }
}

impl fmt::Display for PositionedToken<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.token, f)
    }
}

impl Location for PositionedToken<'_> {
    fn previous_token_end(&self) -> usize {
        self.span.start()
    }

    fn current_token_start(&self) -> usize {
        self.span.start()
    }
}

impl fmt::Display for Token<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Strict => write!(f, "strict"),
            Token::Graph => write!(f, "graph"),
            Token::Digraph => write!(f, "digraph"),

            Token::Identifier(text) | Token::Numeral(text) | Token::BareWord(text) => {
                write!(f, "{text}")
            }
            Token::QuotedText(text) => write!(f, "\"{}\"", text.replace('"', "\\\"")),

            Token::DirectedEdge => write!(f, "->"),
            Token::UndirectedEdge => write!(f, "--"),
            Token::Equals => write!(f, "="),

            Token::LeftBrace => write!(f, "{{"),
            Token::RightBrace => write!(f, "}}"),
            Token::LeftBracket => write!(f, "["),
            Token::RightBracket => write!(f, "]"),
            Token::Semicolon => write!(f, ";"),
            Token::Comma => write!(f, ","),
        }
    }
}
