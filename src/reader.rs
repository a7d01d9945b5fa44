use crate::strings;
use crate::tokens::{tokenize, Token, TokenizerError};
use crate::types::{Int, Value};
use std::fmt;
use std::iter::Peekable;
use std::slice;

type Reader<'a> = Peekable<slice::Iter<'a, Token<'a>>>;

pub type Result<T = Value> = std::result::Result<T, Error>;

#[derive(Debug, PartialEq)]
pub enum Error {
    UnexpectedEof,
    Tokenizer(TokenizerError),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::UnexpectedEof => write!(f, "unexpected EOF"),
            Error::Tokenizer(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for Error {}

impl From<TokenizerError> for Error {
    fn from(e: TokenizerError) -> Self {
        match e {
            // The input stopped before the closing quote turned up.
            TokenizerError::UnbalancedString => Error::UnexpectedEof,
            other => Error::Tokenizer(other),
        }
    }
}

/// Reads the first complete form in `input`. Anything after it is ignored.
pub fn read_str(input: &str) -> Result {
    let tokens = tokenize(input)?;
    let mut reader = tokens.iter().peekable();
    read_form(&mut reader)
}

fn read_form(reader: &mut Reader) -> Result {
    match reader.next() {
        Some(Token::OpenRoundBracket) => read_list(reader),
        // Outside a list a closing bracket is just another atom.
        Some(Token::CloseRoundBracket) => Ok(Value::new_symbol(")")),
        Some(Token::StringLiteral(payload)) => Ok(Value::String(strings::build_string(payload))),
        Some(Token::PlainChars(chars)) => Ok(read_atom(chars)),
        None => Err(Error::UnexpectedEof),
    }
}

fn read_list(reader: &mut Reader) -> Result {
    let mut elements = Vec::new();
    loop {
        match reader.peek() {
            Some(Token::CloseRoundBracket) => {
                reader.next();
                break;
            }
            Some(_) => elements.push(read_form(reader)?),
            None => return Err(Error::UnexpectedEof),
        }
    }
    Ok(Value::wrap_list(elements))
}

fn read_atom(chars: &str) -> Value {
    match chars {
        "nil" => Value::Nil,
        "true" => Value::Bool(true),
        "false" => Value::Bool(false),
        _ => match chars.parse::<Int>() {
            Ok(n) => Value::Integer(n),
            Err(_) => Value::new_symbol(chars),
        },
    }
}
