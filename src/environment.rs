use crate::core;
use crate::types::{Function, Symbol, Value};
use itertools::Itertools;
use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

#[derive(Debug)]
pub enum Error {
    NotFound(Symbol),
    ArityMismatch { binds: usize, exprs: usize },
    BindingTypeError,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::NotFound(s) => write!(f, "'{}' not found", s),
            Error::ArityMismatch { binds, exprs } => write!(
                f,
                "expected {} arguments, but received {} arguments",
                binds, exprs
            ),
            Error::BindingTypeError => {
                write!(f, "bindings must be a list of symbols bound to a list")
            }
        }
    }
}

impl std::error::Error for Error {}

/// One lexical scope. Definitions land in the innermost scope; lookups walk
/// outward through `outer`.
pub struct Environment {
    outer: Option<Rc<Environment>>,
    data: RefCell<HashMap<Symbol, Value>>,
}

impl Environment {
    pub fn new(outer: Option<&Rc<Environment>>) -> Rc<Environment> {
        Rc::new(Self {
            outer: outer.cloned(),
            data: RefCell::new(HashMap::new()),
        })
    }

    pub fn spawn_from(outer: &Rc<Environment>) -> Rc<Environment> {
        Self::new(Some(outer))
    }

    /// Creates a child of `outer` binding each symbol in `binds` to the value
    /// at the same position in `exprs`.
    pub fn with_bindings(
        outer: Option<&Rc<Environment>>,
        binds: &Value,
        exprs: &Value,
    ) -> Result<Rc<Environment>, Error> {
        let (binds, exprs) = match (binds.as_list(), exprs.as_list()) {
            (Some(binds), Some(exprs)) => (binds, exprs),
            _ => return Err(Error::BindingTypeError),
        };
        let symbols: Vec<&Symbol> = binds
            .iter()
            .map(|obj| obj.as_symbol().ok_or(Error::BindingTypeError))
            .collect::<Result<_, _>>()?;
        if symbols.len() != exprs.len() {
            return Err(Error::ArityMismatch {
                binds: symbols.len(),
                exprs: exprs.len(),
            });
        }
        let env = Self::new(outer);
        for (key, value) in symbols.into_iter().zip(exprs.iter()) {
            env.set(key.clone(), value.clone());
        }
        Ok(env)
    }

    /// The root scope, holding every primitive function.
    pub fn root() -> Rc<Environment> {
        let env = Self::new(None);
        for (&name, &func) in core::CORE.iter() {
            env.set(name, Value::Function(Function::Primitive(func)));
        }
        env
    }

    pub fn set<T>(&self, key: T, value: Value) -> Option<Value>
    where
        T: Into<Symbol>,
    {
        self.data.borrow_mut().insert(key.into(), value)
    }

    pub fn get(&self, key: &Symbol) -> Result<Value, Error> {
        if let Some(value) = self.data.borrow().get(key) {
            return Ok(value.clone());
        }
        match &self.outer {
            Some(outer) => outer.get(key),
            None => Err(Error::NotFound(key.clone())),
        }
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{{{}}}{}",
            self.data.borrow().keys().map(Symbol::as_ref).sorted().join(" "),
            if self.outer.is_some() { " -> outer" } else { "" }
        )
    }
}
