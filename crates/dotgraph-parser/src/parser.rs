//! Parser for DOT tokens.
//!
//! This module transforms the token stream from the [`lexer`](super::lexer)
//! into a [`Document`]. Validation here is purely syntactic; whether the
//! document fits a particular graph is decided by the consumer.
//!
//! Every failure is committed (`ErrMode::Cut`) and carries the contexts
//! [`convert_error`] needs to build a [`Diagnostic`]: the error code, where
//! the failing construct starts and which token it failed on.

use log::{debug, trace, warn};
use winnow::{
    Parser as _,
    combinator::{opt, repeat},
    error::{ContextError, ErrMode},
    stream::{Stream, TokenSlice},
    token::any,
};

use crate::{
    error::{Diagnostic, ErrorCode},
    parser_types::{
        Attributes, Document, EdgeChain, EdgeLink, EdgeOp, Header, Statement, VertexStatement,
    },
    span::{Span, Spanned},
    tokens::{PositionedToken, Token},
};

/// Context type for parser errors
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Context {
    /// Description of the token that was expected
    Label(&'static str),
    /// Error code to report
    Code(ErrorCode),
    /// Remaining token count (`eof_offset()`) where the failing construct starts
    StartOffset(usize),
    /// Remaining token count (`eof_offset()`) at the offending token
    At(usize),
    /// Message overriding the default message of the error code
    Message(String),
}

type Input<'src> = TokenSlice<'src, PositionedToken<'src>>;
type IResult<O> = std::result::Result<O, ErrMode<ContextError<Context>>>;

/// Create a committed error for `code`.
///
/// `start_offset` and `at` are `eof_offset()` values: the start of the
/// failing construct and the offending token.
fn failure(code: ErrorCode, start_offset: usize, at: usize) -> ErrMode<ContextError<Context>> {
    let mut e = ContextError::new();
    e.push(Context::Code(code));
    e.push(Context::StartOffset(start_offset));
    e.push(Context::At(at));
    ErrMode::Cut(e)
}

/// Create a committed error for an ID that does not satisfy the ID grammar.
fn malformed_id(
    code: ErrorCode,
    start_offset: usize,
    at: usize,
    message: String,
) -> ErrMode<ContextError<Context>> {
    failure(code, start_offset, at).map(|mut e| {
        e.push(Context::Message(message));
        e
    })
}

/// Look at the next token without consuming it
fn peek_token<'src>(input: &Input<'src>) -> Option<&'src PositionedToken<'src>> {
    input.clone().next_token()
}

fn next_is(input: &Input<'_>, predicate: impl FnOnce(&Token<'_>) -> bool) -> bool {
    peek_token(input).is_some_and(|token| predicate(&token.token))
}

// ============================================================================
// Single token parsers
// ============================================================================

fn strict_keyword<'src>(input: &mut Input<'src>) -> IResult<()> {
    any.verify(|token: &PositionedToken<'_>| matches!(token.token, Token::Strict))
        .void()
        .context(Context::Label("`strict`"))
        .parse_next(input)
}

/// Parse `graph` or `digraph`, returning whether the graph is directed
fn graph_kind<'src>(input: &mut Input<'src>) -> IResult<bool> {
    any.verify_map(|token: &PositionedToken<'_>| match token.token {
        Token::Graph => Some(false),
        Token::Digraph => Some(true),
        _ => None,
    })
    .context(Context::Label("`graph` or `digraph`"))
    .parse_next(input)
}

fn left_brace<'src>(input: &mut Input<'src>) -> IResult<Span> {
    any.verify_map(|token: &PositionedToken<'_>| {
        matches!(token.token, Token::LeftBrace).then_some(token.span)
    })
    .context(Context::Label("`{`"))
    .parse_next(input)
}

fn left_bracket<'src>(input: &mut Input<'src>) -> IResult<Span> {
    any.verify_map(|token: &PositionedToken<'_>| {
        matches!(token.token, Token::LeftBracket).then_some(token.span)
    })
    .context(Context::Label("`[`"))
    .parse_next(input)
}

fn equals<'src>(input: &mut Input<'src>) -> IResult<()> {
    any.verify(|token: &PositionedToken<'_>| matches!(token.token, Token::Equals))
        .void()
        .context(Context::Label("`=`"))
        .parse_next(input)
}

fn semicolon<'src>(input: &mut Input<'src>) -> IResult<()> {
    any.verify(|token: &PositionedToken<'_>| matches!(token.token, Token::Semicolon))
        .void()
        .context(Context::Label("`;`"))
        .parse_next(input)
}

/// Parse zero or more statement separators
fn separators<'src>(input: &mut Input<'src>) -> IResult<()> {
    repeat(0.., semicolon).parse_next(input)
}

fn edge_operator<'src>(input: &mut Input<'src>) -> IResult<Spanned<EdgeOp>> {
    any.verify_map(|token: &PositionedToken<'_>| match token.token {
        Token::DirectedEdge => Some(Spanned::new(EdgeOp::Directed, token.span)),
        Token::UndirectedEdge => Some(Spanned::new(EdgeOp::Undirected, token.span)),
        _ => None,
    })
    .context(Context::Label("`->` or `--`"))
    .parse_next(input)
}

/// Parse an ID: identifier, numeral or quoted text
fn id<'src>(input: &mut Input<'src>) -> IResult<Spanned<String>> {
    any.verify_map(|token: &PositionedToken<'_>| {
        token
            .id_text()
            .map(|text| Spanned::new(text.to_string(), token.span))
    })
    .context(Context::Label("ID"))
    .parse_next(input)
}

/// Parse an attribute key or value: an ID or a bare word
fn attribute_text<'src>(input: &mut Input<'src>) -> IResult<Spanned<String>> {
    any.verify_map(|token: &PositionedToken<'_>| {
        token
            .attribute_text()
            .map(|text| Spanned::new(text.to_string(), token.span))
    })
    .context(Context::Label("attribute value"))
    .parse_next(input)
}

/// Parse the ID of a vertex in statement position.
///
/// A bare word fails with [`ErrorCode::E202`] naming the raw text; any other
/// non-ID token is an invalid statement.
fn vertex_id<'src>(input: &mut Input<'src>, start_offset: usize) -> IResult<Spanned<String>> {
    let at = input.eof_offset();
    if let Some(PositionedToken {
        token: Token::BareWord(raw),
        ..
    }) = peek_token(input)
    {
        return Err(malformed_id(
            ErrorCode::E202,
            start_offset,
            at,
            format!("ID is not formatted correctly: '{raw}'"),
        ));
    }
    id.parse_next(input)
        .map_err(|_| failure(ErrorCode::E200, start_offset, at))
}

// ============================================================================
// Header
// ============================================================================

/// Parse the optional graph ID of the header
fn header_id<'src>(
    input: &mut Input<'src>,
    start_offset: usize,
) -> IResult<Option<Spanned<String>>> {
    let at = input.eof_offset();
    let run = touching_words(input);
    let malformed = match run.as_slice() {
        [] => false,
        [single] => matches!(single.token, Token::BareWord(_)),
        _ => true,
    };
    if malformed {
        let raw: String = run.iter().map(ToString::to_string).collect();
        return Err(malformed_id(
            ErrorCode::E101,
            start_offset,
            at,
            format!("ID in the graph is not formatted correctly: '{raw}'"),
        ));
    }
    opt(id).parse_next(input)
}

/// Leading word tokens with no gap between them, e.g. `my` `-graph` for `my-graph`
fn touching_words<'src>(input: &Input<'src>) -> Vec<&'src PositionedToken<'src>> {
    let mut lookahead = input.clone();
    let mut run: Vec<&'src PositionedToken<'src>> = Vec::new();
    while let Some(token) = lookahead.next_token() {
        let touches = run
            .last()
            .is_none_or(|last| last.span.end() == token.span.start());
        if !touches || token.attribute_text().is_none() {
            break;
        }
        run.push(token);
    }
    run
}

/// Parse `[strict] (graph | digraph) [ID] {`
fn header<'src>(input: &mut Input<'src>) -> IResult<Header> {
    let start = input.eof_offset();

    let strict = opt(strict_keyword).parse_next(input)?.is_some();

    let at = input.eof_offset();
    let directed = graph_kind
        .parse_next(input)
        .map_err(|_| failure(ErrorCode::E100, start, at))?;

    let id = header_id(input, start)?;

    let at = input.eof_offset();
    left_brace
        .parse_next(input)
        .map_err(|_| failure(ErrorCode::E100, start, at))?;

    let header = Header {
        strict,
        directed,
        id,
    };
    debug!(header:?; "Parsed header");
    Ok(header)
}

// ============================================================================
// Statements
// ============================================================================

/// Parse `[ attr_list ]`.
///
/// Pairs are `key = value`, separated by `,`, `;` or nothing. A key without a
/// value is tolerated only between explicit boundaries, e.g. `[a, b]`.
fn attribute_list<'src>(input: &mut Input<'src>) -> IResult<Spanned<Attributes>> {
    let start = input.eof_offset();
    let open = left_bracket.parse_next(input)?;

    let mut attributes = Attributes::new();
    let mut after_boundary = true;

    loop {
        let at = input.eof_offset();
        let Some(token) = input.next_token() else {
            return Err(failure(ErrorCode::E300, start, at));
        };

        match token.token {
            Token::RightBracket => return Ok(Spanned::new(attributes, open.union(token.span))),
            Token::Comma | Token::Semicolon => {
                after_boundary = true;
                continue;
            }
            _ => {}
        }

        let Some(key) = token.attribute_text() else {
            return Err(failure(ErrorCode::E300, start, at));
        };

        if opt(equals).parse_next(input)?.is_some() {
            let value_at = input.eof_offset();
            let value = attribute_text
                .parse_next(input)
                .map_err(|_| failure(ErrorCode::E300, start, value_at))?;
            attributes.insert(key.to_string(), value.into_inner());
        } else if after_boundary
            && next_is(input, |next| {
                matches!(next, Token::RightBracket | Token::Comma | Token::Semicolon)
            })
        {
            warn!(key, span:? = token.span; "Ignoring attribute without a value");
        } else {
            return Err(failure(ErrorCode::E300, start, at));
        }

        after_boundary = false;
    }
}

/// Parse the remainder of an edge chain after its head
fn edge_chain<'src>(
    input: &mut Input<'src>,
    start_offset: usize,
    head: Spanned<String>,
) -> IResult<Spanned<Statement>> {
    let mut span = head.span();
    let mut links = Vec::new();

    while let Some(operator) = opt(edge_operator).parse_next(input)? {
        let target = vertex_id(input, start_offset)?;
        span = span.union(target.span());
        links.push(EdgeLink { operator, target });
    }

    let attributes = if next_is(input, |next| matches!(next, Token::LeftBracket)) {
        let attributes = attribute_list.parse_next(input)?;
        span = span.union(attributes.span());
        attributes.into_inner()
    } else {
        Attributes::new()
    };

    let chain = EdgeChain {
        head,
        links,
        attributes,
    };
    Ok(Spanned::new(Statement::EdgeChain(chain), span))
}

/// Parse what follows the leading ID of a statement
fn statement_tail<'src>(
    input: &mut Input<'src>,
    start_offset: usize,
    id: Spanned<String>,
) -> IResult<Spanned<Statement>> {
    match peek_token(input).map(|token| &token.token) {
        Some(Token::Equals) => {
            equals.parse_next(input)?;
            let at = input.eof_offset();
            let value = attribute_text
                .parse_next(input)
                .map_err(|_| failure(ErrorCode::E200, start_offset, at))?;

            let span = id.span().union(value.span());
            let mut attributes = Attributes::new();
            attributes.insert(id.into_inner(), value.into_inner());
            Ok(Spanned::new(Statement::GraphAttributes(attributes), span))
        }
        Some(token) if token.is_edge_operator() => edge_chain(input, start_offset, id),
        Some(Token::LeftBracket) => {
            let attributes = attribute_list.parse_next(input)?;
            let span = id.span().union(attributes.span());
            let vertex = VertexStatement {
                id,
                attributes: attributes.into_inner(),
            };
            Ok(Spanned::new(Statement::Vertex(vertex), span))
        }
        _ => {
            let span = id.span();
            let vertex = VertexStatement {
                id,
                attributes: Attributes::new(),
            };
            Ok(Spanned::new(Statement::Vertex(vertex), span))
        }
    }
}

/// Parse a single statement of the graph body
fn statement<'src>(input: &mut Input<'src>) -> IResult<Spanned<Statement>> {
    let start = input.eof_offset();

    match peek_token(input) {
        Some(token) if matches!(token.token, Token::Graph) => {
            input.next_token();
            let at = input.eof_offset();
            if !next_is(input, |next| matches!(next, Token::LeftBracket)) {
                return Err(failure(ErrorCode::E200, start, at));
            }
            let attributes = attribute_list.parse_next(input)?;
            let span = token.span.union(attributes.span());
            Ok(Spanned::new(
                Statement::GraphAttributes(attributes.into_inner()),
                span,
            ))
        }
        _ => {
            let id = vertex_id(input, start)?;
            statement_tail(input, start, id)
        }
    }
}

/// Parse statements up to and including the closing `}`
fn body<'src>(input: &mut Input<'src>) -> IResult<Vec<Spanned<Statement>>> {
    let start = input.eof_offset();
    let mut statements = Vec::new();

    loop {
        separators.parse_next(input)?;

        let at = input.eof_offset();
        match peek_token(input) {
            None => return Err(failure(ErrorCode::E201, start, at)),
            Some(token) if matches!(token.token, Token::RightBrace) => {
                input.next_token();
                return Ok(statements);
            }
            Some(_) => {
                let statement = statement.parse_next(input)?;
                trace!(statement:?; "Parsed statement");
                statements.push(statement);
            }
        }
    }
}

fn document<'src>(input: &mut Input<'src>) -> IResult<Document> {
    let (header, statements) = (header, body).parse_next(input)?;
    Ok(Document { header, statements })
}

// ============================================================================
// Error conversion
// ============================================================================

/// Convert a parser error into a diagnostic.
///
/// Returns the diagnostic and whether it points at the end of input.
fn convert_error(
    error: ErrMode<ContextError<Context>>,
    tokens: &[PositionedToken<'_>],
    current_remaining: usize,
) -> (Diagnostic, bool) {
    let context_error = match error {
        ErrMode::Backtrack(e) | ErrMode::Cut(e) => e,
        ErrMode::Incomplete(_) => {
            let mut e = ContextError::new();
            e.push(Context::Code(ErrorCode::E201));
            e
        }
    };

    let mut code = None;
    let mut start_offset = None;
    let mut at = None;
    let mut message = None;
    let mut expected = None;
    for ctx in context_error.context() {
        match ctx {
            Context::Code(c) => code = code.or(Some(*c)),
            Context::StartOffset(offset) => start_offset = start_offset.or(Some(*offset)),
            Context::At(offset) => at = at.or(Some(*offset)),
            Context::Message(m) => message = message.or(Some(m.clone())),
            Context::Label(label) => expected = expected.or(Some(*label)),
        }
    }

    let total = tokens.len();
    let at_index = total.saturating_sub(at.unwrap_or(current_remaining));
    let start_index = total.saturating_sub(start_offset.unwrap_or(total));
    let offending = tokens.get(at_index);
    let at_eof = offending.is_none();

    let end_of_input = tokens
        .last()
        .map(|token| Span::new(token.span.end()..token.span.end()))
        .unwrap_or_default();
    let offending_span = offending.map_or(end_of_input, |token| token.span);
    let construct_span = tokens
        .get(start_index)
        .map_or(offending_span, |token| token.span.union(offending_span));

    let mut code = code.unwrap_or(ErrorCode::E200);
    if code == ErrorCode::E200 && at_eof {
        code = ErrorCode::E201;
    }

    let diagnostic = match code {
        ErrorCode::E100 => Diagnostic::error(code, "Invalid Header")
            .with_label(construct_span, code.description())
            .with_help("a document starts with `[strict] (graph | digraph) [ID] {`"),
        ErrorCode::E101 | ErrorCode::E202 => Diagnostic::error(
            code,
            message.unwrap_or_else(|| code.description().to_string()),
        )
        .with_label(offending_span, code.description())
        .with_help("an ID is an identifier, a numeral or quoted text"),
        ErrorCode::E201 => Diagnostic::error(code, "unexpected end of input, expected `}`")
            .with_label(offending_span, code.description())
            .with_help("close the graph body with `}`"),
        ErrorCode::E300 => {
            let diagnostic = Diagnostic::error(code, "Invalid attributes")
                .with_label(construct_span, code.description())
                .with_help("write attributes as `key = value` pairs separated by `,` or `;`");
            match tokens.get(start_index) {
                Some(open) if start_index < at_index => {
                    diagnostic.with_secondary_label(open.span, "attribute list starts here")
                }
                _ => diagnostic,
            }
        }
        _ => {
            let message = match (offending, expected) {
                (Some(token), _) => {
                    format!("invalid statement: unexpected token `{}`", token.token)
                }
                (None, Some(expected)) => format!("unexpected end of input, expected {expected}"),
                (None, None) => "unexpected end of input".to_string(),
            };
            Diagnostic::error(code, message)
                .with_label(offending_span, code.description())
                .with_help("a statement is a vertex, an edge chain or `key = value`")
        }
    };

    (diagnostic, at_eof)
}

/// Build a document from tokens.
///
/// `lexical_error` is the error that ended tokenization, if any. It is
/// reported when parsing runs out of tokens before the closing `}`, and
/// ignored when the document is complete without the tokens after it.
pub(crate) fn build_document<'src>(
    tokens: &'src [PositionedToken<'src>],
    lexical_error: Option<Diagnostic>,
) -> Result<Document, Diagnostic> {
    let mut token_slice = TokenSlice::new(tokens);

    match document.parse_next(&mut token_slice) {
        Ok(document) => {
            let trailing = token_slice.eof_offset();
            if trailing > 0 {
                warn!(tokens = trailing; "Ignoring content after the closing brace");
            }
            if let Some(error) = lexical_error {
                debug!(error:% = error; "Ignoring lexical error after the closing brace");
            }
            Ok(document)
        }
        Err(e) => {
            let current_remaining = token_slice.eof_offset();
            let (diagnostic, at_eof) = convert_error(e, tokens, current_remaining);
            match lexical_error {
                Some(error) if at_eof => Err(error),
                _ => Err(diagnostic),
            }
        }
    }
}
