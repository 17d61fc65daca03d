//! Lexical analyzer for DOT source text.
//!
//! The lexer converts source text into [`PositionedToken`]s. Whitespace,
//! comments and a leading byte-order mark are skipped and never reach the
//! parser. Lexing is fail-fast: [`Lexer`] yields tokens until the first
//! error and then stops, and [`tokenize`] collects that valid prefix together
//! with the error so the parser can decide whether the error matters.

use log::{debug, trace};
use winnow::{
    Parser as _,
    combinator::{alt, cut_err, opt, preceded, repeat, terminated},
    error::{AddContext, ContextError, ErrMode, ModalResult},
    stream::{LocatingSlice, Location, Stream},
    token::{literal, take_until, take_while},
};

use crate::{
    error::{Diagnostic, ErrorCode},
    span::Span,
    tokens::{PositionedToken, Token},
};

const BYTE_ORDER_MARK: char = '\u{FEFF}';

/// Diagnostic details for lexer errors.
///
/// Attached to winnow errors via `.context()`; the reported span runs from
/// `start` to the end of the input since every such error is an unterminated
/// construct.
#[derive(Debug, Clone, PartialEq, Eq)]
struct LexerDiagnostic {
    code: ErrorCode,
    message: &'static str,
    help: Option<&'static str>,
    start: usize,
}

type Input<'a> = LocatingSlice<&'a str>;
type IResult<'a, O> = ModalResult<O, ContextError<LexerDiagnostic>>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
enum QuoteState {
    #[default]
    Text,
    /// The previous character was an unconsumed backslash.
    Escape,
    /// A backslash followed by a carriage return.
    EscapeReturn,
}

/// Decoder for the body of a quoted text.
#[derive(Debug, Default)]
struct QuotedTextDecoder {
    state: QuoteState,
    value: String,
}

impl QuotedTextDecoder {
    /// Feed one character. Returns `true` once the closing quote is consumed.
    fn push(&mut self, c: char) -> bool {
        match (self.state, c) {
            (QuoteState::Text, '"') => return true,
            (QuoteState::Text, '\\') => self.state = QuoteState::Escape,
            (QuoteState::Text, c) => self.value.push(c),
            (QuoteState::Escape, '"') => {
                self.value.push('"');
                self.state = QuoteState::Text;
            }
            // Line continuation
            (QuoteState::Escape, '\n') | (QuoteState::EscapeReturn, '\n') => {
                self.state = QuoteState::Text;
            }
            (QuoteState::Escape, '\r') => self.state = QuoteState::EscapeReturn,
            (QuoteState::Escape, c) => {
                self.value.push('\\');
                self.value.push(c);
                self.state = QuoteState::Text;
            }
            (QuoteState::EscapeReturn, c) => {
                self.value.push_str("\\\r");
                self.state = QuoteState::Text;
                return self.push(c);
            }
        }
        false
    }

    fn finish(self) -> String {
        self.value
    }
}

/// Decode the body of a quoted text, starting just after its opening quote.
///
/// `\"` decodes to `"`, a backslash before a line break (`\n` or `\r\n`) is
/// dropped together with the line break, and every other backslash is kept
/// as written.
///
/// Returns the decoded text and the number of bytes consumed including the
/// closing quote, or `None` when the input ends before the closing quote.
///
/// ```
/// # use dotgraph_parser::scan_quoted;
/// assert_eq!(scan_quoted(r#"say \"hi\"" tail"#), Some(("say \"hi\"".to_string(), 11)));
/// assert_eq!(scan_quoted(r#"a\lb" "#), Some((r"a\lb".to_string(), 5)));
/// assert_eq!(scan_quoted("open"), None);
/// ```
pub fn scan_quoted(body: &str) -> Option<(String, usize)> {
    let mut decoder = QuotedTextDecoder::default();
    for (offset, c) in body.char_indices() {
        if decoder.push(c) {
            return Some((decoder.finish(), offset + c.len_utf8()));
        }
    }
    None
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || matches!(c, '_' | '.' | '#' | '%' | '+' | ':' | '@' | '!')
}

fn is_identifier(word: &str) -> bool {
    let mut chars = word.chars();
    chars
        .next()
        .is_some_and(|c| c.is_alphabetic() || c == '_')
        && chars.all(|c| c.is_alphanumeric() || c == '_')
}

fn is_numeral(word: &str) -> bool {
    let unsigned = word.strip_prefix('-').unwrap_or(word);
    let (integral, fraction) = match unsigned.split_once('.') {
        Some((integral, fraction)) => (integral, Some(fraction)),
        None => (unsigned, None),
    };
    let all_digits = |s: &str| s.chars().all(|c| c.is_ascii_digit());

    match fraction {
        None => !integral.is_empty() && all_digits(integral),
        Some(fraction) if integral.is_empty() => !fraction.is_empty() && all_digits(fraction),
        Some(fraction) => all_digits(integral) && all_digits(fraction),
    }
}

/// Classify a maximal run of word characters.
fn classify_word(word: &str) -> Token<'_> {
    if word.eq_ignore_ascii_case("strict") {
        Token::Strict
    } else if word.eq_ignore_ascii_case("graph") {
        Token::Graph
    } else if word.eq_ignore_ascii_case("digraph") {
        Token::Digraph
    } else if is_identifier(word) {
        Token::Identifier(word)
    } else if is_numeral(word) {
        Token::Numeral(word)
    } else {
        Token::BareWord(word)
    }
}

/// Parse whitespace, including a byte-order mark
fn whitespace<'a>(input: &mut Input<'a>) -> IResult<'a, ()> {
    take_while(1.., |c: char| c.is_whitespace() || c == BYTE_ORDER_MARK)
        .void()
        .parse_next(input)
}

/// Parse line comment starting with '//'
fn line_comment<'a>(input: &mut Input<'a>) -> IResult<'a, ()> {
    preceded("//", take_while(0.., |c: char| c != '\n'))
        .void()
        .parse_next(input)
}

/// Parse block comment delimited by '/*' and '*/'
fn block_comment<'a>(input: &mut Input<'a>) -> IResult<'a, ()> {
    let start = input.current_token_start();

    preceded(
        "/*",
        cut_err(terminated(take_until(0.., "*/"), "*/")).context(LexerDiagnostic {
            code: ErrorCode::E003,
            message: "unterminated block comment",
            help: Some("close the comment with `*/`"),
            start,
        }),
    )
    .void()
    .parse_next(input)
}

/// Skip any mix of whitespace and comments
fn trivia<'a>(input: &mut Input<'a>) -> IResult<'a, ()> {
    repeat(0.., alt((whitespace, line_comment, block_comment))).parse_next(input)
}

fn quote<'a>(input: &mut Input<'a>) -> IResult<'a, char> {
    '"'.parse_next(input)
}

/// Parse a double-quoted text
fn quoted_text<'a>(input: &mut Input<'a>) -> IResult<'a, Token<'a>> {
    let start = input.current_token_start();

    quote.parse_next(input)?;

    let mut decoder = QuotedTextDecoder::default();
    while let Some(c) = input.next_token() {
        if decoder.push(c) {
            return Ok(Token::QuotedText(decoder.finish()));
        }
    }

    Err(ErrMode::Cut(ContextError::new().add_context(
        input,
        &input.checkpoint(),
        LexerDiagnostic {
            code: ErrorCode::E001,
            message: "unterminated quoted text",
            help: Some("add closing `\"`"),
            start,
        },
    )))
}

/// Parse edge operators
fn edge_operator<'a>(input: &mut Input<'a>) -> IResult<'a, Token<'a>> {
    alt((
        literal("->").value(Token::DirectedEdge),
        literal("--").value(Token::UndirectedEdge),
    ))
    .parse_next(input)
}

/// Parse single character tokens
fn punctuation<'a>(input: &mut Input<'a>) -> IResult<'a, Token<'a>> {
    alt((
        '='.value(Token::Equals),
        '{'.value(Token::LeftBrace),
        '}'.value(Token::RightBrace),
        '['.value(Token::LeftBracket),
        ']'.value(Token::RightBracket),
        ';'.value(Token::Semicolon),
        ','.value(Token::Comma),
    ))
    .parse_next(input)
}

/// Parse a word: keyword, identifier, numeral or bare word
fn word<'a>(input: &mut Input<'a>) -> IResult<'a, Token<'a>> {
    (opt('-'), take_while(1.., is_word_char))
        .take()
        .map(classify_word)
        .parse_next(input)
}

/// Parse a single token with position tracking
fn positioned_token<'a>(input: &mut Input<'a>) -> IResult<'a, PositionedToken<'a>> {
    let start_pos = input.current_token_start();

    let token = alt((
        quoted_text,   // Must come before any single char
        edge_operator, // Must come before a leading '-' of a word
        punctuation,
        word,
    ))
    .parse_next(input)?;

    let end_pos = input.current_token_start();
    Ok(PositionedToken::new(token, Span::new(start_pos..end_pos)))
}

/// Convert a winnow error into a diagnostic.
///
/// `token_start` is the offset where the failing token began; it locates
/// unexpected characters when no [`LexerDiagnostic`] context is attached.
fn convert_err_mode(
    err: ErrMode<ContextError<LexerDiagnostic>>,
    token_start: usize,
    source: &str,
) -> Diagnostic {
    let context_error = match err {
        ErrMode::Backtrack(ctx) | ErrMode::Cut(ctx) => ctx,
        ErrMode::Incomplete(_) => ContextError::new(),
    };

    if let Some(LexerDiagnostic {
        code,
        message,
        help,
        start,
    }) = context_error.context().next()
    {
        let span = Span::new(*start..source.len());
        let mut diag = Diagnostic::error(*code, *message).with_label(span, code.description());
        if let Some(h) = help {
            diag = diag.with_help(*h);
        }
        return diag;
    }

    let unexpected = source.get(token_start..).and_then(|rest| rest.chars().next());
    let Some(c) = unexpected else {
        return Diagnostic::error(ErrorCode::E002, "unexpected end of input")
            .with_label(Span::new(token_start..token_start), ErrorCode::E002.description());
    };

    let diag = Diagnostic::error(ErrorCode::E002, format!("unexpected character `{c}`"))
        .with_label(
            Span::new(token_start..token_start + c.len_utf8()),
            ErrorCode::E002.description(),
        );
    if c == '-' {
        diag.with_help("edges are written `->` or `--`")
    } else {
        diag
    }
}

/// Iterator over the tokens of a DOT source text.
///
/// Yields `Ok` tokens in source order, at most one `Err`, and then `None`.
/// The end of the iterator is the end of input.
#[derive(Debug)]
pub struct Lexer<'src> {
    source: &'src str,
    input: Input<'src>,
    finished: bool,
}

impl<'src> Lexer<'src> {
    pub fn new(source: &'src str) -> Self {
        Self {
            source,
            input: LocatingSlice::new(source),
            finished: false,
        }
    }

    fn fail(
        &mut self,
        err: ErrMode<ContextError<LexerDiagnostic>>,
        token_start: usize,
    ) -> Diagnostic {
        self.finished = true;
        convert_err_mode(err, token_start, self.source)
    }
}

impl<'src> Iterator for Lexer<'src> {
    type Item = Result<PositionedToken<'src>, Diagnostic>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }

        let trivia_start = self.input.current_token_start();
        if let Err(err) = trivia.parse_next(&mut self.input) {
            return Some(Err(self.fail(err, trivia_start)));
        }

        if self.input.is_empty() {
            self.finished = true;
            return None;
        }

        let token_start = self.input.current_token_start();
        match positioned_token.parse_next(&mut self.input) {
            Ok(token) => {
                trace!(token:?; "Lexed token");
                Some(Ok(token))
            }
            Err(err) => Some(Err(self.fail(err, token_start))),
        }
    }
}

/// The output of [`tokenize`]: the longest valid token prefix and the
/// lexical error that ended it, if any.
#[derive(Debug, Clone)]
pub struct Tokenized<'src> {
    pub tokens: Vec<PositionedToken<'src>>,
    pub error: Option<Diagnostic>,
}

/// Tokenize a DOT source text.
///
/// Lexing stops at the first error. The tokens before it are still returned
/// because an error located after the closing `}` of the graph body does not
/// invalidate the document.
pub fn tokenize(source: &str) -> Tokenized<'_> {
    let mut tokens = Vec::new();
    let mut error = None;

    for item in Lexer::new(source) {
        match item {
            Ok(token) => tokens.push(token),
            Err(diagnostic) => {
                error = Some(diagnostic);
                break;
            }
        }
    }

    debug!(tokens = tokens.len(), failed = error.is_some(); "Tokenized DOT source");
    Tokenized { tokens, error }
}
