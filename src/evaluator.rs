use crate::environment::{self, Environment};
use crate::special_forms;
use crate::types::{self, Closure, Function, PrimitiveFn, Symbol, TypeMismatch, Value};

use itertools::Itertools;
use std::fmt;
use std::rc::Rc;

pub type Result<T = Value> = std::result::Result<T, Error>;

#[derive(Debug)]
pub enum Error {
    SymbolNotFound(Symbol),
    BadArgCount(types::BadArgCount),
    ExpectedSymbol(&'static str),
    ExpectedBindingList,
    OddBindingCount,
    NotAFunction(String),
    Binding(environment::Error),
    TypeMismatch(TypeMismatch),
    DivisionByZero,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::SymbolNotFound(s) => write!(f, "'{}' not found", s),
            Error::BadArgCount(e) => write!(f, "{}", e),
            Error::ExpectedSymbol(form) => write!(f, "{}: expected a symbol", form),
            Error::ExpectedBindingList => write!(f, "let*: expected a list of bindings"),
            Error::OddBindingCount => write!(f, "let*: incomplete bindings list"),
            Error::NotAFunction(head) => write!(f, "{} is not a function", head),
            Error::Binding(e) => write!(f, "{}", e),
            Error::TypeMismatch(e) => write!(f, "{}", e),
            Error::DivisionByZero => write!(f, "cannot divide by zero!"),
        }
    }
}

impl std::error::Error for Error {}

impl From<TypeMismatch> for Error {
    fn from(t: TypeMismatch) -> Self {
        Self::TypeMismatch(t)
    }
}

impl From<types::BadArgCount> for Error {
    fn from(e: types::BadArgCount) -> Self {
        Self::BadArgCount(e)
    }
}

impl From<environment::Error> for Error {
    fn from(e: environment::Error) -> Self {
        match e {
            environment::Error::NotFound(s) => Self::SymbolNotFound(s),
            other => Self::Binding(other),
        }
    }
}

pub fn eval(ast: &Value, env: &Rc<Environment>) -> Result {
    match ast {
        Value::List(argv) => match argv.split_first() {
            None => Ok(ast.clone()),
            Some((head, operands)) => {
                log::trace!("apply {}", ast);
                if let Value::Symbol(name) = head {
                    match name.as_str() {
                        "def!" => {
                            let result = special_forms::apply_def(operands, env);
                            if let Ok(value) = &result {
                                log::debug!("define {} as {}", operands[0], value);
                            }
                            return result;
                        }
                        "let*" => return special_forms::apply_let(operands, env),
                        "do" => return special_forms::apply_do(operands, env),
                        "if" => return special_forms::apply_if(operands, env),
                        "fn*" => return special_forms::apply_fn(operands, env),
                        // Any other initial symbol is a function call, handled below.
                        _ => (),
                    };
                };
                let callable = eval(head, env)?;
                let args = evaluate_sequence_elementwise(operands, env)?;
                apply(&callable, &args)
            }
        },
        _ => evaluate_atom(ast, env),
    }
}

pub(crate) fn evaluate_atom(ast: &Value, env: &Rc<Environment>) -> Result {
    log::trace!("evaluate_atom {}", ast);
    match ast {
        Value::Symbol(s) => env.get(s).map_err(Error::from),
        _ => Ok(ast.clone()),
    }
}

pub fn evaluate_sequence_elementwise(seq: &[Value], env: &Rc<Environment>) -> Result<Vec<Value>> {
    seq.iter().map(|obj| eval(obj, env)).collect()
}

/// Calls `callable` with already evaluated `args`.
pub fn apply(callable: &Value, args: &[Value]) -> Result {
    match callable {
        Value::Function(Function::Primitive(f)) => call_primitive(f, args),
        Value::Function(Function::Closure(f)) => call_closure(f, args),
        other => Err(Error::NotAFunction(other.to_string())),
    }
}

pub(crate) fn pretty_print_args(args: &[Value]) -> String {
    match args.len() {
        0 => "no args".into(),
        1 => args[0].to_string(),
        _ => format!("\n\t{}", args.iter().join("\n\t")),
    }
}

pub fn call_primitive(func: &PrimitiveFn, args: &[Value]) -> Result {
    func.arity.validate_for(args.len(), func.name)?;
    log::trace!("Call {} with {}", func.name, pretty_print_args(args));
    let result = (func.fn_ptr)(args);
    match &result {
        Ok(val) => log::trace!("Call to {} resulted in {}", func.name, val),
        Err(e) => log::trace!("Call to {} failed: {}", func.name, e),
    }
    result
}

fn call_closure(func: &Closure, args: &[Value]) -> Result {
    log::trace!("Call closure {:?} with {}", func, pretty_print_args(args));
    let env = Environment::with_bindings(
        Some(&func.parent),
        &func.parameters,
        &Value::wrap_list(args.to_vec()),
    )?;
    log::trace!("closure scope {}", env);
    eval(&func.body, &env)
}
