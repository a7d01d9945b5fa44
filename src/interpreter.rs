//! The three entry points a host shell needs: read a line, evaluate it in a
//! long-lived environment, print the result.

use crate::environment::Environment;
use crate::{evaluator, printer, reader, Value};
use std::fmt;
use std::rc::Rc;

pub type Result<T = Value> = std::result::Result<T, Error>;

#[derive(Debug)]
pub enum Error {
    Read(reader::Error),
    Eval(evaluator::Error),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Read(e) => write!(f, "{}", e),
            Error::Eval(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Read(e) => Some(e),
            Error::Eval(e) => Some(e),
        }
    }
}

#[allow(non_snake_case)]
pub fn READ(line: &str) -> Result {
    reader::read_str(line).map_err(Error::Read)
}

#[allow(non_snake_case)]
pub fn EVAL(ast: &Value, env: &Rc<Environment>) -> Result {
    evaluator::eval(ast, env).map_err(Error::Eval)
}

#[allow(non_snake_case)]
pub fn PRINT(obj: &Value) -> String {
    printer::pr_str(obj)
}

pub fn rep(line: &str, env: &Rc<Environment>) -> Result<String> {
    let ast = READ(line)?;
    let result = EVAL(&ast, env)?;
    Ok(PRINT(&result))
}
