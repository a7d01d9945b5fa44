use regex::Regex;
use std::fmt;

#[derive(Debug, Eq, PartialEq)]
pub enum Token<'a> {
    OpenRoundBracket,
    CloseRoundBracket,
    StringLiteral(&'a str),
    PlainChars(&'a str),
}

#[derive(Debug, PartialEq)]
pub enum TokenizerError {
    UnbalancedString,
    NoCapture(String),
}

impl fmt::Display for TokenizerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenizerError::UnbalancedString => write!(f, "unbalanced string literal"),
            TokenizerError::NoCapture(rest) => {
                write!(f, "token regex did not capture a token from {:?}", rest)
            }
        }
    }
}

/// Returns `None` for chunks that carry no token: comments and empty matches.
fn create_token(captured: &str) -> Result<Option<Token>, TokenizerError> {
    let bytes = captured.as_bytes();
    match bytes.first() {
        None => Ok(None),
        Some(b'(') => Ok(Some(Token::OpenRoundBracket)),
        Some(b')') => Ok(Some(Token::CloseRoundBracket)),
        Some(b'"') => tokenize_string_literal(captured).map(Some),
        Some(b';') => Ok(None),
        Some(_) => Ok(Some(Token::PlainChars(captured))),
    }
}

fn tokenize_string_literal(captured: &str) -> Result<Token, TokenizerError> {
    let bytes = captured.as_bytes();
    if bytes.len() == 1 || bytes[bytes.len() - 1] != b'"' {
        return Err(TokenizerError::UnbalancedString);
    }

    let trailing_backslashes = bytes
        .iter()
        .rev()
        .skip(1)
        .take_while(|&&byte| byte == b'\\')
        .count();
    if trailing_backslashes % 2 == 1 {
        return Err(TokenizerError::UnbalancedString);
    }

    // Both quotes are ASCII, so slicing them off stays on char boundaries.
    Ok(Token::StringLiteral(&captured[1..captured.len() - 1]))
}

pub fn tokenize(input: &str) -> Result<Vec<Token>, TokenizerError> {
    lazy_static! {
        static ref TOKEN_RE: Regex = Regex::new(
            r#"(?x)                          # ignore whitespace in this pattern & allow comments
                [\s,]*                       # whitespace or commas, ignored
                (                            # token capture group
                    [()]                     # round brackets
                    |"(?:                    # string literal. its contents, not captured, include:
                        \\.                  #    escapes
                        |[^\\"]              #    anything which isn't a backslash or a quote
                      )*
                      "?                     #    possibly missing a closing quote
                    |;.*                     # comments
                    |[^\s(),;"]*             # zero or more plain characters
                )
                [\s,]*                       # whitespace or commas, ignored
            "#
        )
        .expect("token regex is valid");
    }
    let mut input = input;
    let mut tokens = Vec::new();
    while !input.is_empty() {
        let caps = TOKEN_RE
            .captures(input)
            .ok_or_else(|| TokenizerError::NoCapture(String::from(input)))?;
        let (whole, token) = match (caps.get(0), caps.get(1)) {
            (Some(whole), Some(token)) => (whole, token),
            _ => return Err(TokenizerError::NoCapture(String::from(input))),
        };
        if whole.end() == 0 {
            return Err(TokenizerError::NoCapture(String::from(input)));
        }
        if let Some(token) = create_token(token.as_str())? {
            tokens.push(token);
        }
        input = &input[whole.end()..];
    }
    Ok(tokens)
}
