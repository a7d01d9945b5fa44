extern crate derive_more;
use crate::environment::Environment;
use crate::evaluator;
use derive_more::Deref;

use std::fmt;
use std::fmt::Formatter;
use std::ops::{RangeFrom, RangeInclusive};
use std::rc::Rc;

#[derive(Deref, Debug)]
pub struct List(pub Vec<Value>);

pub type Int = i64;

#[derive(Deref, Debug, PartialEq, Eq, Hash, Clone)]
pub struct Symbol(pub String);

impl AsRef<str> for Symbol {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Symbol {
    fn from(name: &str) -> Self {
        Symbol(name.into())
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone)]
pub enum Arity {
    Between(RangeInclusive<usize>),
    AtLeast(RangeFrom<usize>),
}

#[derive(Debug)]
pub struct BadArgCount {
    name: &'static str,
    expected: Arity,
    got: usize,
}

impl fmt::Display for BadArgCount {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "When evaluating {} expected {} arguments, but received {} arguments",
            self.name, self.expected, self.got
        )
    }
}

impl Arity {
    pub(crate) const fn exactly(n: usize) -> Self {
        Self::Between(n..=n)
    }

    pub(crate) const fn at_least(n: usize) -> Self {
        Self::AtLeast(n..)
    }

    pub(crate) fn contains(&self, n: usize) -> bool {
        match self {
            Self::Between(range) => range.contains(&n),
            Self::AtLeast(range) => range.contains(&n),
        }
    }

    pub(crate) fn validate_for(&self, n: usize, name: &'static str) -> Result<(), BadArgCount> {
        match self.contains(n) {
            true => Ok(()),
            false => Err(BadArgCount {
                name,
                expected: self.clone(),
                got: n,
            }),
        }
    }
}

impl fmt::Display for Arity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Arity::Between(r) => {
                if r.start() == r.end() {
                    write!(f, "exactly {}", r.start())
                } else {
                    write!(f, "from {} to {}", r.start(), r.end())
                }
            }
            Arity::AtLeast(r) => write!(f, "at least {}", r.start),
        }
    }
}

pub struct PrimitiveFn {
    pub name: &'static str,
    pub arity: Arity,
    pub fn_ptr: fn(&[Value]) -> evaluator::Result,
}

impl fmt::Debug for PrimitiveFn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "primitive function #<{}>", self.name)
    }
}

/// A user function built by `fn*`. The parameter form is kept as read and
/// only checked when the closure is applied.
pub struct Closure {
    pub parameters: Value,
    pub body: Value,
    pub parent: Rc<Environment>,
}

impl fmt::Debug for Closure {
    // Not derived: the parent may well hold this closure.
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Closure{{parameters: {:?}, body: {:?}}}",
            self.parameters, self.body
        )
    }
}

#[derive(Debug, Clone)]
pub enum Function {
    Primitive(&'static PrimitiveFn),
    Closure(Rc<Closure>),
}

#[derive(Debug, Clone)]
pub enum Value {
    Nil,
    Integer(Int),
    Bool(bool),
    String(String),
    Symbol(Symbol),
    List(Rc<List>),
    Function(Function),
}

pub(crate) fn truthy(obj: &Value) -> bool {
    use Value::*;
    match obj {
        Integer(_) | String(_) | Symbol(_) | List(_) | Function(_) => true,
        Bool(t) => *t,
        Nil => false,
    }
}

/// Language-level `=`. Functions and `nil` never compare equal, not even to
/// themselves.
pub(crate) fn structurally_equal(x: &Value, y: &Value) -> bool {
    use Value::*;
    match (x, y) {
        (Integer(a), Integer(b)) => a == b,
        (Bool(a), Bool(b)) => a == b,
        (String(a), String(b)) => a == b,
        (Symbol(a), Symbol(b)) => a == b,
        (List(a), List(b)) => {
            a.len() == b.len() && a.iter().zip(b.iter()).all(|(x, y)| structurally_equal(x, y))
        }
        (Function(_), _) | (Nil, _) => false,
        (Integer(_), _) | (Bool(_), _) | (String(_), _) | (Symbol(_), _) | (List(_), _) => false,
    }
}

#[derive(Debug)]
pub enum TypeMismatch {
    NotAnInt(String),
}

impl fmt::Display for TypeMismatch {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            TypeMismatch::NotAnInt(printed) => write!(f, "{} is not an int", printed),
        }
    }
}

impl Value {
    pub(crate) fn as_int(&self) -> Result<Int, TypeMismatch> {
        match self {
            Value::Integer(x) => Ok(*x),
            _ => Err(TypeMismatch::NotAnInt(self.to_string())),
        }
    }

    pub(crate) fn as_list(&self) -> Option<&List> {
        match self {
            Value::List(x) => Some(x),
            _ => None,
        }
    }

    pub(crate) fn as_symbol(&self) -> Option<&Symbol> {
        match self {
            Value::Symbol(s) => Some(s),
            _ => None,
        }
    }

    pub fn is_list(&self) -> bool {
        matches!(self, Value::List(_))
    }

    pub fn is_nil(&self) -> bool {
        matches!(self, Value::Nil)
    }
}

impl Value {
    pub fn new_list() -> Self {
        Self::List(Rc::new(List(Vec::new())))
    }
    pub fn wrap_list(elements: Vec<Value>) -> Self {
        Self::List(Rc::new(List(elements)))
    }
    pub fn new_symbol(name: &str) -> Self {
        Self::Symbol(Symbol(name.into()))
    }
}
