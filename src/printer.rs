use crate::types::Value;
use itertools::Itertools;
use std::fmt;

pub fn pr_str(object: &Value) -> String {
    match object {
        Value::List(elements) => format!("({})", elements.iter().map(pr_str).join(" ")),
        Value::Integer(value) => value.to_string(),
        Value::Bool(value) => value.to_string(),
        Value::Symbol(name) => name.0.clone(),
        Value::String(text) => text.clone(),
        Value::Function(_) => String::from("#<function>"),
        Value::Nil => String::from("nil"),
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", pr_str(self))
    }
}
