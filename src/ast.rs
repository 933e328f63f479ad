//! AST node definitions and canonical pretty-printing (spec.md §3.2, §6.2).
//!
//! The source language's nodes are reimagined as closed Rust enums rather
//! than the teacher's virtual-inheritance-plus-downcast hierarchy, per the
//! REDESIGN FLAGS in spec.md §9. Each node exclusively owns its children;
//! there is no sharing and no possibility of a cycle.

use std::fmt;

/// The root node: an ordered sequence of statements.
#[derive(Debug, Clone, PartialEq)]
pub struct Program {
    pub statements: Vec<Statement>,
}

impl fmt::Display for Program {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for stmt in &self.statements {
            write!(f, "{}", stmt)?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Identifier {
    pub name: String,
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Block {
    pub statements: Vec<Statement>,
}

impl fmt::Display for Block {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for stmt in &self.statements {
            write!(f, "{}", stmt)?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    Let {
        name: Identifier,
        value: Expression,
    },
    Return {
        value: Expression,
    },
    Expression {
        value: Expression,
    },
}

impl fmt::Display for Statement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Statement::Let { name, value } => write!(f, "let {} = {};", name, value),
            Statement::Return { value } => write!(f, "return {};", value),
            Statement::Expression { value } => write!(f, "{}", value),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Expression {
    Identifier(Identifier),
    IntegerLiteral(i64),
    BooleanLiteral(bool),
    Prefix {
        operator: String,
        right: Box<Expression>,
    },
    Infix {
        left: Box<Expression>,
        operator: String,
        right: Box<Expression>,
    },
    If {
        condition: Box<Expression>,
        consequence: Block,
        alternative: Option<Block>,
    },
    FunctionLiteral {
        parameters: Vec<Identifier>,
        body: Block,
    },
    Call {
        function: Box<Expression>,
        arguments: Vec<Expression>,
    },
}

impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expression::Identifier(ident) => write!(f, "{}", ident),
            Expression::IntegerLiteral(value) => write!(f, "{}", value),
            Expression::BooleanLiteral(value) => write!(f, "{}", value),
            Expression::Prefix { operator, right } => write!(f, "({}{})", operator, right),
            Expression::Infix {
                left,
                operator,
                right,
            } => write!(f, "({} {} {})", left, operator, right),
            Expression::If {
                condition,
                consequence,
                alternative,
            } => {
                write!(f, "if {} {}", condition, consequence)?;
                if let Some(alt) = alternative {
                    write!(f, " else {}", alt)?;
                }
                Ok(())
            }
            Expression::FunctionLiteral { parameters, body } => {
                let params = parameters
                    .iter()
                    .map(|p| p.name.clone())
                    .collect::<Vec<_>>()
                    .join(",");
                write!(f, "fn({}){}", params, body)
            }
            Expression::Call {
                function,
                arguments,
            } => {
                let args = arguments
                    .iter()
                    .map(|a| a.to_string())
                    .collect::<Vec<_>>()
                    .join(", ");
                write!(f, "{}({})", function, args)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn let_statement_prints_canonically() {
        let stmt = Statement::Let {
            name: Identifier {
                name: "myVar".to_string(),
            },
            value: Expression::Identifier(Identifier {
                name: "anotherVar".to_string(),
            }),
        };
        assert_eq!(stmt.to_string(), "let myVar = anotherVar;");
    }

    #[test]
    fn infix_and_prefix_nest_with_parens() {
        let expr = Expression::Infix {
            left: Box::new(Expression::Prefix {
                operator: "-".to_string(),
                right: Box::new(Expression::IntegerLiteral(5)),
            }),
            operator: "*".to_string(),
            right: Box::new(Expression::Identifier(Identifier {
                name: "b".to_string(),
            })),
        };
        assert_eq!(expr.to_string(), "((-5) * b)");
    }

    #[test]
    fn call_expression_joins_args_with_comma_space() {
        let expr = Expression::Call {
            function: Box::new(Expression::Identifier(Identifier {
                name: "add".to_string(),
            })),
            arguments: vec![Expression::IntegerLiteral(1), Expression::IntegerLiteral(2)],
        };
        assert_eq!(expr.to_string(), "add(1, 2)");
    }
}
