use crate::environment::Environment;
use crate::evaluator::{eval, Error, Result};
use crate::types::{truthy, Arity, Closure, Function, Value};
use itertools::Itertools;
use std::rc::Rc;

/// `(def! name expr)`: binds in the current scope and returns the value.
pub fn apply_def(args: &[Value], env: &Rc<Environment>) -> Result {
    Arity::at_least(2).validate_for(args.len(), "def!")?;
    let key = args[0].as_symbol().ok_or(Error::ExpectedSymbol("def!"))?;
    let value = eval(&args[1], env)?;
    env.set(key.clone(), value.clone());
    Ok(value)
}

pub fn apply_let(args: &[Value], env: &Rc<Environment>) -> Result {
    Arity::at_least(2).validate_for(args.len(), "let*")?;
    let (bindings, body) = (&args[0], &args[1]);
    let bindings = bindings.as_list().ok_or(Error::ExpectedBindingList)?;
    if bindings.len() % 2 != 0 {
        return Err(Error::OddBindingCount);
    }
    let child = make_let_environment(bindings, env)?;
    eval(body, &child)
}

fn make_let_environment(bindings: &[Value], parent: &Rc<Environment>) -> Result<Rc<Environment>> {
    let child = Environment::with_bindings(Some(parent), &Value::new_list(), &Value::new_list())?;

    for (key, value) in bindings.iter().tuples::<(_, _)>() {
        let key = key.as_symbol().ok_or(Error::ExpectedSymbol("let*"))?;
        // Evaluate in the child so that later bindings can refer to earlier ones.
        let value = eval(value, &child)?;
        child.set(key.clone(), value);
    }
    log::trace!("let* scope {}", child);
    Ok(child)
}

pub fn apply_do(args: &[Value], env: &Rc<Environment>) -> Result {
    let mut last = Value::Nil;
    for obj in args {
        last = eval(obj, env)?;
    }
    Ok(last)
}

pub fn apply_if(args: &[Value], env: &Rc<Environment>) -> Result {
    Arity::Between(2..=3).validate_for(args.len(), "if")?;
    let condition = eval(&args[0], env)?;
    if truthy(&condition) {
        eval(&args[1], env)
    } else if let Some(otherwise) = args.get(2) {
        eval(otherwise, env)
    } else {
        Ok(Value::Nil)
    }
}

/// `(fn* (params...) body)`. Parameters are checked when the closure is called.
pub fn apply_fn(args: &[Value], env: &Rc<Environment>) -> Result {
    Arity::at_least(2).validate_for(args.len(), "fn*")?;
    let closure = Closure {
        parameters: args[0].clone(),
        body: args[1].clone(),
        parent: env.clone(),
    };
    Ok(Value::Function(Function::Closure(Rc::new(closure))))
}
