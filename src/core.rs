use crate::types::{structurally_equal, Arity, Int, PrimitiveFn, Value};
use crate::{evaluator, printer};
use std::collections::HashMap;

fn grab_two_ints(args: &[Value], name: &'static str) -> evaluator::Result<(Int, Int)> {
    Arity::exactly(2).validate_for(args.len(), name)?;
    Ok((args[0].as_int()?, args[1].as_int()?))
}

const SUM: PrimitiveFn = PrimitiveFn {
    name: "+",
    fn_ptr: sum_,
    arity: Arity::exactly(2),
};

fn sum_(args: &[Value]) -> evaluator::Result {
    let (x, y) = grab_two_ints(args, "+")?;
    Ok(Value::Integer(x.wrapping_add(y)))
}

const SUB: PrimitiveFn = PrimitiveFn {
    name: "-",
    fn_ptr: sub_,
    arity: Arity::exactly(2),
};

fn sub_(args: &[Value]) -> evaluator::Result {
    let (x, y) = grab_two_ints(args, "-")?;
    Ok(Value::Integer(x.wrapping_sub(y)))
}

const MUL: PrimitiveFn = PrimitiveFn {
    name: "*",
    fn_ptr: mul_,
    arity: Arity::exactly(2),
};

fn mul_(args: &[Value]) -> evaluator::Result {
    let (x, y) = grab_two_ints(args, "*")?;
    Ok(Value::Integer(x.wrapping_mul(y)))
}

const DIV: PrimitiveFn = PrimitiveFn {
    name: "/",
    fn_ptr: div_,
    arity: Arity::exactly(2),
};

fn div_(args: &[Value]) -> evaluator::Result {
    match grab_two_ints(args, "/")? {
        (_, 0) => Err(evaluator::Error::DivisionByZero),
        (x, y) => Ok(Value::Integer(x.wrapping_div(y))),
    }
}

fn comparison_(
    args: &[Value],
    name: &'static str,
    comp: fn(&Int, &Int) -> bool,
) -> evaluator::Result {
    let (x, y) = grab_two_ints(args, name)?;
    Ok(Value::Bool(comp(&x, &y)))
}

macro_rules! comparison_primitive {
    ($SYMBOL:tt, $NAME:ident) => {
        paste::item! {
            const $NAME: PrimitiveFn = PrimitiveFn {
                name: stringify!($SYMBOL),
                fn_ptr: |args: &[Value]| {
                    comparison_(args, stringify!($SYMBOL), Int:: [<$NAME:lower>])
                },
                arity: Arity::exactly(2),
            };
        }
    };
}

comparison_primitive!(<, LT);
comparison_primitive!(<=, LE);
comparison_primitive!(>, GT);
comparison_primitive!(>=, GE);

const EQUAL: PrimitiveFn = PrimitiveFn {
    name: "=",
    fn_ptr: equal_,
    arity: Arity::exactly(2),
};

fn equal_(args: &[Value]) -> evaluator::Result {
    Ok(Value::Bool(structurally_equal(&args[0], &args[1])))
}

const LIST: PrimitiveFn = PrimitiveFn {
    name: "list",
    fn_ptr: list_,
    arity: Arity::at_least(0),
};

fn list_(args: &[Value]) -> evaluator::Result {
    Ok(Value::wrap_list(args.to_vec()))
}

const LIST_TEST: PrimitiveFn = PrimitiveFn {
    name: "list?",
    fn_ptr: list_test_,
    arity: Arity::exactly(1),
};

fn list_test_(args: &[Value]) -> evaluator::Result {
    Ok(Value::Bool(args[0].is_list()))
}

const EMPTY_TEST: PrimitiveFn = PrimitiveFn {
    name: "empty?",
    fn_ptr: empty_test_,
    arity: Arity::exactly(1),
};

fn empty_test_(args: &[Value]) -> evaluator::Result {
    let empty = args[0].as_list().map_or(false, |list| list.is_empty());
    Ok(Value::Bool(empty))
}

const COUNT: PrimitiveFn = PrimitiveFn {
    name: "count",
    fn_ptr: count_,
    arity: Arity::exactly(1),
};

fn count_(args: &[Value]) -> evaluator::Result {
    let count = args[0].as_list().map_or(0, |list| list.len());
    Ok(Value::Integer(count as Int))
}

fn print_first(args: &[Value], wrap: fn(String) -> Value) -> evaluator::Result {
    Ok(args
        .first()
        .map_or(Value::Nil, |arg| wrap(printer::pr_str(arg))))
}

const PR_STR: PrimitiveFn = PrimitiveFn {
    name: "pr-str",
    fn_ptr: |args| print_first(args, Value::String),
    arity: Arity::at_least(0),
};

// Printing itself is left to whoever displays the result.
const PRN: PrimitiveFn = PrimitiveFn {
    name: "prn",
    fn_ptr: |args| print_first(args, |text| Value::new_symbol(&text)),
    arity: Arity::at_least(0),
};

type Namespace = HashMap<&'static str, &'static PrimitiveFn>;
lazy_static! {
    pub static ref CORE: Namespace = {
        static TABLE: [PrimitiveFn; 15] = [
            // Arithmetic
            SUM,
            SUB,
            MUL,
            DIV,
            // Comparisons
            LT,
            LE,
            GT,
            GE,
            // Working with lists
            LIST,
            LIST_TEST,
            EMPTY_TEST,
            COUNT,
            // Equality
            EQUAL,
            // Printing
            PR_STR,
            PRN,
        ];
        TABLE.iter().map(|func| (func.name, func)).collect()
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::environment::Environment;
    use crate::evaluator::{eval, Error};
    use crate::printer::pr_str;
    use crate::reader::read_str;
    use pretty_assertions::assert_eq;

    fn call(name: &str, args: &[Value]) -> evaluator::Result {
        evaluator::call_primitive(CORE[name], args)
    }

    fn run(input: &str) -> evaluator::Result {
        eval(&read_str(input).unwrap(), &Environment::root())
    }

    fn run_str(input: &str) -> String {
        pr_str(&run(input).unwrap())
    }

    #[test]
    fn table_has_every_primitive() {
        let mut names: Vec<_> = CORE.keys().copied().collect();
        names.sort();
        assert_eq!(
            names,
            vec![
                "*", "+", "-", "/", "<", "<=", "=", ">", ">=", "count", "empty?", "list",
                "list?", "pr-str", "prn"
            ]
        );
    }

    #[test]
    fn arithmetic() {
        for &(a, b) in &[(3, 4), (-5, 2), (0, 9), (100, -7)] {
            let args = [Value::Integer(a), Value::Integer(b)];
            assert!(matches!(call("+", &args), Ok(Value::Integer(n)) if n == a + b));
            assert!(matches!(call("-", &args), Ok(Value::Integer(n)) if n == a - b));
            assert!(matches!(call("*", &args), Ok(Value::Integer(n)) if n == a * b));
            assert!(matches!(call("/", &args), Ok(Value::Integer(n)) if n == a / b));
        }
    }

    #[test]
    fn division_truncates_toward_zero() {
        assert_eq!(run_str("(/ -7 2)"), "-3");
        assert_eq!(run_str("(/ 7 -2)"), "-3");
    }

    #[test]
    fn division_by_zero_fails() {
        assert!(matches!(run("(/ 5 0)"), Err(Error::DivisionByZero)));
    }

    #[test]
    fn arithmetic_wraps_on_overflow() {
        let args = [Value::Integer(Int::MIN), Value::Integer(-1)];
        assert!(matches!(call("/", &args), Ok(Value::Integer(n)) if n == Int::MIN));
        let args = [Value::Integer(Int::MAX), Value::Integer(1)];
        assert!(matches!(call("+", &args), Ok(Value::Integer(n)) if n == Int::MIN));
    }

    #[test]
    fn arithmetic_needs_two_ints() {
        assert!(matches!(run("(+ 1 2 3)"), Err(Error::BadArgCount(_))));
        assert!(matches!(run("(- 1)"), Err(Error::BadArgCount(_))));
        match run("(* 2 (list 1 2))") {
            Err(Error::TypeMismatch(e)) => assert_eq!(e.to_string(), "(1 2) is not an int"),
            other => panic!("expected a type mismatch, got {:?}", other),
        }
        match run("(< true 1)") {
            Err(Error::TypeMismatch(e)) => assert_eq!(e.to_string(), "true is not an int"),
            other => panic!("expected a type mismatch, got {:?}", other),
        }
    }

    #[test]
    fn comparisons() {
        assert_eq!(run_str("(< 1 2)"), "true");
        assert_eq!(run_str("(< 2 2)"), "false");
        assert_eq!(run_str("(<= 2 2)"), "true");
        assert_eq!(run_str("(> 3 2)"), "true");
        assert_eq!(run_str("(> 2 3)"), "false");
        assert_eq!(run_str("(>= 2 3)"), "false");
        assert_eq!(run_str("(>= 3 3)"), "true");
    }

    #[test]
    fn structural_equality() {
        assert_eq!(run_str("(= (list 1 2) (list 1 2))"), "true");
        assert_eq!(run_str("(= (list 1 2) (list 1 3))"), "false");
        assert_eq!(run_str("(= () ())"), "true");
        assert_eq!(run_str("(= 1 1)"), "true");
        assert_eq!(run_str("(= true true)"), "true");
        assert_eq!(run_str(r#"(= "a" "a")"#), "true");
        assert_eq!(run_str("(= 1 (list 1))"), "false");
        assert_eq!(run_str("(= nil nil)"), "false");
        assert_eq!(run_str("(= + +)"), "false");
        assert_eq!(run_str("(= (fn* (a) a) (fn* (a) a))"), "false");
    }

    #[test]
    fn list_predicates() {
        assert_eq!(run_str("(list)"), "()");
        assert_eq!(run_str("(list? (list 1))"), "true");
        assert_eq!(run_str("(list? ())"), "true");
        assert_eq!(run_str("(list? 1)"), "false");
        assert_eq!(run_str("(empty? ())"), "true");
        assert_eq!(run_str("(empty? (list 1))"), "false");
        assert_eq!(run_str("(empty? nil)"), "false");
        assert_eq!(run_str("(count (list 1 2 3))"), "3");
        assert_eq!(run_str("(count ())"), "0");
        assert_eq!(run_str("(count 7)"), "0");
        assert!(matches!(run("(count)"), Err(Error::BadArgCount(_))));
    }

    #[test]
    fn printing_primitives_return_text() {
        match run("(pr-str (list 1 (list 2)))") {
            Ok(Value::String(s)) => assert_eq!(s, "(1 (2))"),
            other => panic!("expected a string, got {:?}", other),
        }
        match run("(prn (list 1 nil))") {
            Ok(Value::Symbol(s)) => assert_eq!(s.as_ref(), "(1 nil)"),
            other => panic!("expected a symbol, got {:?}", other),
        }
        assert!(matches!(run("(prn)"), Ok(Value::Nil)));
        assert_eq!(run_str("(pr-str 1 2)"), "1");
    }
}
