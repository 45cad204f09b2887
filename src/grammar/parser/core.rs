use std::iter::Peekable;

use logos::Logos;

use crate::{
    ast::Expr,
    error::ParseError,
    grammar::{
        lexer::{LexerExtras, Token},
        parser::binary::parse_logical_or,
    },
};

pub type ParseResult<T> = Result<T, ParseError>;

/// Parses a full expression from source text.
///
/// This is the entry point the sheet layer calls for every statement and
/// raw input value. It tokenizes the text, discards line breaks (a
/// statement may span several lines), parses one expression, and rejects
/// trailing tokens.
///
/// # Parameters
/// - `source`: Raw text of a single expression.
///
/// # Returns
/// The parsed expression node.
///
/// # Errors
/// Returns a `ParseError` if the text contains unrecognized characters,
/// fails to parse as an expression, or has tokens left over after the
/// expression ends.
///
/// # Example
/// ```
/// use reckon::grammar::parser::core::parse;
///
/// assert!(parse("a + b * 2").is_ok());
/// assert!(parse("a +").is_err());
/// assert!(parse("1 2").is_err());
/// ```
pub fn parse(source: &str) -> ParseResult<Expr> {
    let mut tokens = Vec::new();
    let mut lexer = Token::lexer_with_extras(source, LexerExtras { line: 1 });

    while let Some(token) = lexer.next() {
        match token {
            Ok(Token::NewLine) => {},
            Ok(tok) => tokens.push((tok, lexer.extras.line)),
            Err(()) => {
                let slice = lexer.slice();
                return Err(ParseError::UnexpectedToken { token: slice.to_string(),
                                                         line:  lexer.extras.line, });
            },
        }
    }

    let mut iter = tokens.iter().peekable();
    let expr = parse_expression(&mut iter)?;

    if let Some((tok, line)) = iter.peek() {
        return Err(ParseError::UnexpectedTrailingTokens { token: format!("{tok:?}"),
                                                          line:  *line, });
    }

    Ok(expr)
}

/// Parses a full expression from a token stream.
///
/// It begins at the lowest-precedence level, logical OR, and recursively
/// descends through the precedence hierarchy.
///
/// Grammar: `expression := logical_or`
pub fn parse_expression<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    parse_logical_or(tokens)
}
