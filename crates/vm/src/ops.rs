//! Operator semantics over runtime values.
//!
//! Numeric operators promote `Int op Int` to an `Int` result and any pairing
//! with a `Float` to a `Float` result. Integer arithmetic wraps on overflow.

use microvm_common::{List, Value};

use crate::error::ErrorKind;

/// Operands after numeric promotion.
enum Numbers {
    Ints(i64, i64),
    Floats(f64, f64),
}

fn promote(lhs: &Value, rhs: &Value) -> Option<Numbers> {
    match (lhs, rhs) {
        (Value::Int(a), Value::Int(b)) => Some(Numbers::Ints(*a, *b)),
        (Value::Int(a), Value::Float(b)) => Some(Numbers::Floats(*a as f64, *b)),
        (Value::Float(a), Value::Int(b)) => Some(Numbers::Floats(*a, *b as f64)),
        (Value::Float(a), Value::Float(b)) => Some(Numbers::Floats(*a, *b)),
        _ => None,
    }
}

fn type_error(operation: &'static str, lhs: &Value, rhs: &Value) -> ErrorKind {
    ErrorKind::TypeError {
        operation,
        lhs: lhs.type_tag(),
        rhs: rhs.type_tag(),
    }
}

fn arithmetic(
    operation: &'static str,
    lhs: &Value,
    rhs: &Value,
    int_op: fn(i64, i64) -> i64,
    float_op: fn(f64, f64) -> f64,
) -> Result<Value, ErrorKind> {
    match promote(lhs, rhs) {
        Some(Numbers::Ints(a, b)) => Ok(Value::Int(int_op(a, b))),
        Some(Numbers::Floats(a, b)) => Ok(Value::Float(float_op(a, b))),
        None => Err(type_error(operation, lhs, rhs)),
    }
}

/// `lhs + rhs`, or concatenation when both are strings.
pub fn add(lhs: &Value, rhs: &Value) -> Result<Value, ErrorKind> {
    if let (Value::Str(a), Value::Str(b)) = (lhs, rhs) {
        return Ok(Value::Str(format!("{a}{b}")));
    }
    arithmetic("+", lhs, rhs, i64::wrapping_add, |a, b| a + b)
}

pub fn sub(lhs: &Value, rhs: &Value) -> Result<Value, ErrorKind> {
    arithmetic("-", lhs, rhs, i64::wrapping_sub, |a, b| a - b)
}

pub fn mul(lhs: &Value, rhs: &Value) -> Result<Value, ErrorKind> {
    arithmetic("*", lhs, rhs, i64::wrapping_mul, |a, b| a * b)
}

/// Quotient truncated toward zero. Always an `Int`, even for float operands.
pub fn div(lhs: &Value, rhs: &Value) -> Result<Value, ErrorKind> {
    match promote(lhs, rhs) {
        Some(Numbers::Ints(_, 0)) => Err(ErrorKind::DivisionByZero),
        Some(Numbers::Ints(a, b)) => Ok(Value::Int(a.wrapping_div(b))),
        Some(Numbers::Floats(_, b)) if b == 0.0 => Err(ErrorKind::DivisionByZero),
        Some(Numbers::Floats(a, b)) => Ok(Value::Int((a / b).trunc() as i64)),
        None => Err(type_error("/", lhs, rhs)),
    }
}

/// Remainder with the sign of the dividend. Both operands must be `Int`.
pub fn modulo(lhs: &Value, rhs: &Value) -> Result<Value, ErrorKind> {
    match (lhs, rhs) {
        (Value::Int(_), Value::Int(0)) => Err(ErrorKind::ModuloByZero),
        (Value::Int(a), Value::Int(b)) => Ok(Value::Int(a.wrapping_rem(*b))),
        _ => Err(type_error("%", lhs, rhs)),
    }
}

/// Truthiness conjunction. Both operands are already evaluated.
pub fn logical_and(lhs: &Value, rhs: &Value) -> Value {
    Value::Bool(lhs.is_truthy() && rhs.is_truthy())
}

/// Truthiness disjunction. Both operands are already evaluated.
pub fn logical_or(lhs: &Value, rhs: &Value) -> Value {
    Value::Bool(lhs.is_truthy() || rhs.is_truthy())
}

/// The six COMPARE_OP operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompareOp {
    Lt,
    Le,
    Eq,
    Ne,
    Gt,
    Ge,
}

impl CompareOp {
    pub fn parse(symbol: &str) -> Option<CompareOp> {
        match symbol.trim() {
            "<" => Some(CompareOp::Lt),
            "<=" => Some(CompareOp::Le),
            "==" => Some(CompareOp::Eq),
            "!=" => Some(CompareOp::Ne),
            ">" => Some(CompareOp::Gt),
            ">=" => Some(CompareOp::Ge),
            _ => None,
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            CompareOp::Lt => "<",
            CompareOp::Le => "<=",
            CompareOp::Eq => "==",
            CompareOp::Ne => "!=",
            CompareOp::Gt => ">",
            CompareOp::Ge => ">=",
        }
    }

    fn apply<T: PartialOrd>(&self, a: T, b: T) -> bool {
        match self {
            CompareOp::Lt => a < b,
            CompareOp::Le => a <= b,
            CompareOp::Eq => a == b,
            CompareOp::Ne => a != b,
            CompareOp::Gt => a > b,
            CompareOp::Ge => a >= b,
        }
    }
}

/// Numeric comparison after promotion; strings support only `==` and `!=`.
pub fn compare(lhs: &Value, rhs: &Value, op: CompareOp) -> Result<bool, ErrorKind> {
    match promote(lhs, rhs) {
        Some(Numbers::Ints(a, b)) => return Ok(op.apply(a, b)),
        Some(Numbers::Floats(a, b)) => return Ok(op.apply(a, b)),
        None => {}
    }
    match (lhs, rhs, op) {
        (Value::Str(a), Value::Str(b), CompareOp::Eq) => Ok(a == b),
        (Value::Str(a), Value::Str(b), CompareOp::Ne) => Ok(a != b),
        _ => Err(type_error(op.symbol(), lhs, rhs)),
    }
}

fn list_slot(container: &Value, index: &Value) -> Result<(List, usize), ErrorKind> {
    let (Value::List(list), Value::Int(i)) = (container, index) else {
        return Err(type_error("subscript", container, index));
    };
    let len = list.len();
    match usize::try_from(*i) {
        Ok(idx) if idx < len => Ok((list.clone(), idx)),
        _ => Err(ErrorKind::IndexOutOfRange { index: *i, len }),
    }
}

/// `container[index]`.
pub fn get_subscript(container: &Value, index: &Value) -> Result<Value, ErrorKind> {
    let (list, idx) = list_slot(container, index)?;
    list.get(idx).ok_or(ErrorKind::IndexOutOfRange {
        index: idx as i64,
        len: list.len(),
    })
}

/// `container[index] = value`, mutating the shared list in place.
pub fn set_subscript(container: &Value, index: &Value, value: Value) -> Result<(), ErrorKind> {
    let (list, idx) = list_slot(container, index)?;
    if list.set(idx, value) {
        Ok(())
    } else {
        Err(ErrorKind::IndexOutOfRange {
            index: idx as i64,
            len: list.len(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use microvm_common::TypeTag;

    fn s(text: &str) -> Value {
        Value::from(text)
    }

    #[test]
    fn add_promotion() {
        assert_eq!(add(&Value::Int(2), &Value::Int(3)), Ok(Value::Int(5)));
        assert_eq!(add(&Value::Int(2), &Value::Float(3.0)), Ok(Value::Float(5.0)));
        assert_eq!(add(&Value::Float(0.5), &Value::Int(1)), Ok(Value::Float(1.5)));
    }

    #[test]
    fn add_strings_concatenates() {
        assert_eq!(add(&s("a"), &s("b")), Ok(s("ab")));
        assert_eq!(add(&s(""), &s("")), Ok(s("")));
    }

    #[test]
    fn add_mixed_is_type_error() {
        assert_eq!(
            add(&Value::Int(2), &s("b")),
            Err(ErrorKind::TypeError {
                operation: "+",
                lhs: TypeTag::Int,
                rhs: TypeTag::Str
            })
        );
        assert!(add(&Value::Bool(true), &Value::Int(1)).is_err());
        assert!(add(&Value::Char('a'), &s("b")).is_err());
    }

    #[test]
    fn sub_and_mul() {
        assert_eq!(sub(&Value::Int(2), &Value::Int(5)), Ok(Value::Int(-3)));
        assert_eq!(mul(&Value::Int(4), &Value::Float(0.5)), Ok(Value::Float(2.0)));
        assert!(sub(&s("a"), &s("b")).is_err());
        assert!(mul(&s("a"), &Value::Int(3)).is_err());
    }

    #[test]
    fn integer_overflow_wraps() {
        assert_eq!(
            add(&Value::Int(i64::MAX), &Value::Int(1)),
            Ok(Value::Int(i64::MIN))
        );
    }

    #[test]
    fn div_truncates() {
        assert_eq!(div(&Value::Int(7), &Value::Int(2)), Ok(Value::Int(3)));
        assert_eq!(div(&Value::Int(-7), &Value::Int(2)), Ok(Value::Int(-3)));
        assert_eq!(div(&Value::Float(7.5), &Value::Int(2)), Ok(Value::Int(3)));
        assert_eq!(div(&Value::Int(1), &Value::Float(0.4)), Ok(Value::Int(2)));
    }

    #[test]
    fn div_by_zero() {
        assert_eq!(
            div(&Value::Int(1), &Value::Int(0)),
            Err(ErrorKind::DivisionByZero)
        );
        assert_eq!(
            div(&Value::Int(1), &Value::Float(0.0)),
            Err(ErrorKind::DivisionByZero)
        );
        assert_eq!(
            div(&Value::Float(1.0), &Value::Float(-0.0)),
            Err(ErrorKind::DivisionByZero)
        );
    }

    #[test]
    fn modulo_ints_only() {
        assert_eq!(modulo(&Value::Int(7), &Value::Int(3)), Ok(Value::Int(1)));
        assert_eq!(modulo(&Value::Int(-7), &Value::Int(3)), Ok(Value::Int(-1)));
        assert_eq!(
            modulo(&Value::Int(7), &Value::Int(0)),
            Err(ErrorKind::ModuloByZero)
        );
        assert!(matches!(
            modulo(&Value::Float(7.0), &Value::Int(3)),
            Err(ErrorKind::TypeError { operation: "%", .. })
        ));
    }

    #[test]
    fn logical_ops_yield_bools() {
        assert_eq!(logical_and(&Value::Int(1), &s("x")), Value::Bool(true));
        assert_eq!(logical_and(&Value::Int(1), &s("")), Value::Bool(false));
        assert_eq!(
            logical_or(&Value::list(vec![]), &Value::Float(0.0)),
            Value::Bool(false)
        );
        assert_eq!(logical_or(&Value::Int(0), &Value::Char('a')), Value::Bool(true));
    }

    #[test]
    fn compare_numbers() {
        let lt = CompareOp::parse("<").unwrap();
        assert_eq!(compare(&Value::Int(1), &Value::Int(2), lt), Ok(true));
        assert_eq!(compare(&Value::Float(2.5), &Value::Int(2), lt), Ok(false));
        assert_eq!(
            compare(&Value::Int(2), &Value::Float(2.0), CompareOp::Eq),
            Ok(true)
        );
        assert_eq!(
            compare(&Value::Int(3), &Value::Int(3), CompareOp::Ge),
            Ok(true)
        );
    }

    #[test]
    fn compare_strings_equality_only() {
        assert_eq!(compare(&s("a"), &s("a"), CompareOp::Eq), Ok(true));
        assert_eq!(compare(&s("a"), &s("b"), CompareOp::Ne), Ok(true));
        assert_eq!(
            compare(&s("a"), &s("b"), CompareOp::Lt),
            Err(ErrorKind::TypeError {
                operation: "<",
                lhs: TypeTag::Str,
                rhs: TypeTag::Str
            })
        );
    }

    #[test]
    fn compare_other_kinds_fails() {
        assert!(compare(&Value::Bool(true), &Value::Bool(true), CompareOp::Eq).is_err());
        assert!(compare(&Value::Int(1), &s("1"), CompareOp::Ne).is_err());
        assert!(compare(&Value::Char('a'), &Value::Char('a'), CompareOp::Eq).is_err());
    }

    #[test]
    fn compare_op_symbols_roundtrip() {
        for symbol in ["<", "<=", "==", "!=", ">", ">="] {
            assert_eq!(CompareOp::parse(symbol).unwrap().symbol(), symbol);
        }
        assert_eq!(CompareOp::parse("=<"), None);
        assert_eq!(CompareOp::parse("is"), None);
    }

    #[test]
    fn subscript_get_and_set() {
        let list = Value::list(vec![Value::Int(10), Value::Int(20)]);
        assert_eq!(get_subscript(&list, &Value::Int(1)), Ok(Value::Int(20)));
        set_subscript(&list, &Value::Int(0), s("x")).unwrap();
        assert_eq!(get_subscript(&list, &Value::Int(0)), Ok(s("x")));
    }

    #[test]
    fn subscript_errors() {
        let list = Value::list(vec![Value::Int(10)]);
        assert_eq!(
            get_subscript(&list, &Value::Int(1)),
            Err(ErrorKind::IndexOutOfRange { index: 1, len: 1 })
        );
        assert_eq!(
            set_subscript(&list, &Value::Int(-1), Value::Int(0)),
            Err(ErrorKind::IndexOutOfRange { index: -1, len: 1 })
        );
        assert!(matches!(
            get_subscript(&list, &Value::Float(0.0)),
            Err(ErrorKind::TypeError { .. })
        ));
        assert!(matches!(
            get_subscript(&s("abc"), &Value::Int(0)),
            Err(ErrorKind::TypeError { .. })
        ));
    }
}
