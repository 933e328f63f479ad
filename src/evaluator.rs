//! Recursive tree-walking evaluator (spec.md §4.3).
//!
//! Evaluation is eager, left-to-right, and short-circuits on the first
//! `Value::Error` it produces — the sole error-propagation mechanism (no
//! exceptions), grounded in the teacher's `Evaluator::evaluate` /
//! `LoxFunction::call` short-circuit-and-unwrap pattern, generalized from
//! Lox's statement-oriented model to MIL's expression-oriented one.

use std::rc::Rc;

use crate::ast::{Block, Expression, Program, Statement};
use crate::environment::Environment;
use crate::object::{Function, Value};

/// Evaluate a parsed program under `env` (spec.md §1:
/// `eval(Program, Environment) -> Value or Error`).
pub fn eval_program(program: &Program, env: &Environment) -> Value {
    let mut result = Value::Null;
    for stmt in &program.statements {
        result = eval_statement(stmt, env);
        match result {
            Value::ReturnValue(value) => return *value,
            Value::Error(_) => return result,
            _ => {}
        }
    }
    result
}

/// Evaluate a block, but *without* unwrapping `ReturnValue` — it must keep
/// propagating through enclosing blocks until it reaches the program
/// boundary or a call site (spec.md §4.3).
fn eval_block(block: &Block, env: &Environment) -> Value {
    let mut result = Value::Null;
    for stmt in &block.statements {
        result = eval_statement(stmt, env);
        if matches!(result, Value::ReturnValue(_) | Value::Error(_)) {
            return result;
        }
    }
    result
}

fn eval_statement(stmt: &Statement, env: &Environment) -> Value {
    match stmt {
        Statement::Expression { value } => eval_expression(value, env),
        Statement::Let { name, value } => {
            let evaluated = eval_expression(value, env);
            if evaluated.is_error() {
                return evaluated;
            }
            env.set(name.name.clone(), evaluated);
            Value::Null
        }
        Statement::Return { value } => {
            let evaluated = eval_expression(value, env);
            if evaluated.is_error() {
                return evaluated;
            }
            Value::ReturnValue(Box::new(evaluated))
        }
    }
}

fn eval_expression(expr: &Expression, env: &Environment) -> Value {
    match expr {
        Expression::IntegerLiteral(value) => Value::Integer(*value),
        Expression::BooleanLiteral(value) => Value::Boolean(*value),
        Expression::Identifier(ident) => match env.get(&ident.name) {
            Some(value) => value,
            None => error(format!("identifier not found: {}", ident.name)),
        },
        Expression::Prefix { operator, right } => {
            let right = eval_expression(right, env);
            if right.is_error() {
                return right;
            }
            eval_prefix_expression(operator, right)
        }
        Expression::Infix {
            left,
            operator,
            right,
        } => {
            let left = eval_expression(left, env);
            if left.is_error() {
                return left;
            }
            let right = eval_expression(right, env);
            if right.is_error() {
                return right;
            }
            eval_infix_expression(operator, left, right)
        }
        Expression::If {
            condition,
            consequence,
            alternative,
        } => eval_if_expression(condition, consequence, alternative.as_ref(), env),
        Expression::FunctionLiteral { parameters, body } => Value::Function(Rc::new(Function {
            parameters: parameters.clone(),
            body: body.clone(),
            env: env.clone(),
        })),
        Expression::Call {
            function,
            arguments,
        } => eval_call_expression(function, arguments, env),
    }
}

fn eval_prefix_expression(operator: &str, right: Value) -> Value {
    match operator {
        "!" => Value::Boolean(!right.is_truthy()),
        "-" => match right {
            Value::Integer(value) => Value::Integer(-value),
            other => error(format!("unknown operator: -{}", other.kind())),
        },
        other => {
            log::trace!("unhandled prefix operator {:?}", other);
            error(format!("unknown operator: {}{}", other, right.kind()))
        }
    }
}

fn eval_infix_expression(operator: &str, left: Value, right: Value) -> Value {
    match (&left, &right) {
        (Value::Integer(l), Value::Integer(r)) => eval_integer_infix(operator, *l, *r),
        (Value::Boolean(l), Value::Boolean(r)) if operator == "==" || operator == "!=" => {
            eval_bool_infix(operator, *l, *r)
        }
        _ if left.kind() != right.kind() => error(format!(
            "type mismatch: {} {} {}",
            left.kind(),
            operator,
            right.kind()
        )),
        _ => error(format!(
            "unknown operator: {} {} {}",
            left.kind(),
            operator,
            right.kind()
        )),
    }
}

fn eval_integer_infix(operator: &str, left: i64, right: i64) -> Value {
    match operator {
        "+" => Value::Integer(left.wrapping_add(right)),
        "-" => Value::Integer(left.wrapping_sub(right)),
        "*" => Value::Integer(left.wrapping_mul(right)),
        "/" => {
            if right == 0 {
                error("Division by zero".to_string())
            } else {
                Value::Integer(left / right)
            }
        }
        "<" => Value::Boolean(left < right),
        ">" => Value::Boolean(left > right),
        "==" => Value::Boolean(left == right),
        "!=" => Value::Boolean(left != right),
        other => error(format!("Unknown operator : {}", other)),
    }
}

fn eval_bool_infix(operator: &str, left: bool, right: bool) -> Value {
    match operator {
        "==" => Value::Boolean(left == right),
        "!=" => Value::Boolean(left != right),
        other => error(format!("unknown operator: BOOLEAN {} BOOLEAN", other)),
    }
}

fn eval_if_expression(
    condition: &Expression,
    consequence: &Block,
    alternative: Option<&Block>,
    env: &Environment,
) -> Value {
    let condition = eval_expression(condition, env);
    if condition.is_error() {
        return condition;
    }
    if condition.is_truthy() {
        eval_block(consequence, env)
    } else if let Some(alternative) = alternative {
        eval_block(alternative, env)
    } else {
        Value::Null
    }
}

fn eval_call_expression(function: &Expression, arguments: &[Expression], env: &Environment) -> Value {
    let function = eval_expression(function, env);
    if function.is_error() {
        return function;
    }

    let mut args = Vec::with_capacity(arguments.len());
    for arg in arguments {
        let evaluated = eval_expression(arg, env);
        if evaluated.is_error() {
            return evaluated;
        }
        args.push(evaluated);
    }

    apply_function(function, args)
}

fn apply_function(function: Value, args: Vec<Value>) -> Value {
    let function = match function {
        Value::Function(function) => function,
        other => return error(format!("not a function: {}", other.kind())),
    };

    let call_env = Environment::enclosed(&function.env);
    for (param, arg) in function.parameters.iter().zip(args.into_iter()) {
        call_env.set(param.name.clone(), arg);
    }

    let result = eval_block(&function.body, &call_env);
    match result {
        Value::ReturnValue(value) => *value,
        other => other,
    }
}

fn error(message: String) -> Value {
    log::trace!("runtime error: {}", message);
    Value::Error(message)
}
