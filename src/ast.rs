//! Abstract syntax tree node shapes.
//!
//! The parser builds these from a token stream and the evaluator walks them.
//! A node owns its children outright, so every tree is a strict tree.
//!
//! The `Display` implementation renders a parenthesized prefix form, for debugging:
//! `prepare x as 1 + 2` prints as `(var x (+ 1 2))`.

use std::fmt;

use crate::lexer::TokenKind;

/// A literal value, as written in the source.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Number(f64),
    String(String),
    Boolean(bool),
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Number(n) => write!(f, "{n}"),
            Value::String(s) => write!(f, "{s:?}"),
            Value::Boolean(b) => write!(f, "{b}"),
        }
    }
}

/// The property side of a `Get`: either a plain name (`a.b`) or a computed
/// expression (`a[i]`).
#[derive(Debug, Clone, PartialEq)]
pub enum Property {
    Name(String),
    Expr(Box<Node>),
}

impl Property {
    /// Whether the property is computed rather than named.
    pub fn is_expr(&self) -> bool {
        matches!(self, Property::Expr(_))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Literal(Value),
    /// `prepare name as value`
    Var {
        name: String,
        value: Box<Node>,
    },
    Binary {
        left: Box<Node>,
        op: TokenKind,
        right: Box<Node>,
    },
    Array(Vec<Node>),
    /// `sketch name needs [params] { body }`
    Func {
        name: String,
        params: Vec<String>,
        body: Vec<Node>,
    },
    /// `finished value`
    Return(Box<Node>),
    /// `if`/`elif`/`else`. An `elif` chain nests as a single conditional in `otherwise`.
    Conditional {
        condition: Box<Node>,
        body: Vec<Node>,
        otherwise: Option<Vec<Node>>,
    },
    Set {
        caller: Box<Node>,
        property: String,
        value: Box<Node>,
    },
    /// `loop id through (start, end) { body }`
    For {
        id: String,
        range: (Box<Node>, Box<Node>),
        body: Vec<Node>,
    },
    While {
        condition: Box<Node>,
        body: Vec<Node>,
    },
    /// `brush name has { members }`
    Struct {
        name: String,
        members: Vec<String>,
    },
    /// `prep name(member: value, ...)`
    Instance {
        name: String,
        members: Vec<(String, Node)>,
    },
    Call {
        caller: Box<Node>,
        args: Vec<Node>,
    },
    Get {
        caller: Box<Node>,
        property: Property,
    },
    Unary {
        op: TokenKind,
        apply: Box<Node>,
    },
}

impl Node {
    pub fn kind_name(&self) -> &'static str {
        match self {
            Node::Literal(_) => "Literal",
            Node::Var { .. } => "Var",
            Node::Binary { .. } => "Binary",
            Node::Array(_) => "Array",
            Node::Func { .. } => "Func",
            Node::Return(_) => "Return",
            Node::Conditional { .. } => "Conditional",
            Node::Set { .. } => "Set",
            Node::For { .. } => "For",
            Node::While { .. } => "While",
            Node::Struct { .. } => "Struct",
            Node::Instance { .. } => "Instance",
            Node::Call { .. } => "Call",
            Node::Get { .. } => "Get",
            Node::Unary { .. } => "Unary",
        }
    }

    /// Direct children, in source order.
    pub fn children(&self) -> Vec<&Node> {
        match self {
            Node::Literal(_) | Node::Struct { .. } => Vec::new(),
            Node::Var { value, .. } | Node::Return(value) => vec![value.as_ref()],
            Node::Binary { left, right, .. } => vec![left.as_ref(), right.as_ref()],
            Node::Array(elements) => elements.iter().collect(),
            Node::Func { body, .. } => body.iter().collect(),
            Node::Conditional {
                condition,
                body,
                otherwise,
            } => std::iter::once(condition.as_ref())
                .chain(body)
                .chain(otherwise.iter().flatten())
                .collect(),
            Node::Set { caller, value, .. } => vec![caller.as_ref(), value.as_ref()],
            Node::For { range, body, .. } => [range.0.as_ref(), range.1.as_ref()]
                .into_iter()
                .chain(body)
                .collect(),
            Node::While { condition, body } => std::iter::once(condition.as_ref())
                .chain(body)
                .collect(),
            Node::Instance { members, .. } => members.iter().map(|(_, v)| v).collect(),
            Node::Call { caller, args } => std::iter::once(caller.as_ref()).chain(args).collect(),
            Node::Get { caller, property } => match property {
                Property::Name(_) => vec![caller.as_ref()],
                Property::Expr(expr) => vec![caller.as_ref(), expr.as_ref()],
            },
            Node::Unary { apply, .. } => vec![apply.as_ref()],
        }
    }
}

/// Space-separated rendering of a node list.
struct Seq<'a>(&'a [Node]);

impl fmt::Display for Seq<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, node) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{node}")?;
        }
        Ok(())
    }
}

fn op_str(op: TokenKind) -> &'static str {
    match op {
        TokenKind::Or => "||",
        TokenKind::Not => "!",
        TokenKind::And => "&&",
        TokenKind::Equiv => "==",
        TokenKind::NotEquiv => "!=",
        TokenKind::Gt => ">",
        TokenKind::Gte => ">=",
        TokenKind::Lt => "<",
        TokenKind::Lte => "<=",
        TokenKind::Plus => "+",
        TokenKind::Minus => "-",
        TokenKind::Asterisk => "*",
        TokenKind::Slash => "/",
        other => other.name(),
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Node::Literal(value) => write!(f, "{value}"),
            Node::Var { name, value } => write!(f, "(var {name} {value})"),
            Node::Binary { left, op, right } => {
                write!(f, "({} {left} {right})", op_str(*op))
            }
            Node::Array(elements) => write!(f, "[{}]", Seq(elements)),
            Node::Func { name, params, body } => {
                write!(f, "(func {name} ({}) ({}))", params.join(" "), Seq(body))
            }
            Node::Return(value) => write!(f, "(return {value})"),
            Node::Conditional {
                condition,
                body,
                otherwise,
            } => {
                write!(f, "(if {condition} ({})", Seq(body))?;
                if let Some(otherwise) = otherwise {
                    write!(f, " ({})", Seq(otherwise))?;
                }
                f.write_str(")")
            }
            Node::Set {
                caller,
                property,
                value,
            } => write!(f, "(set {caller}.{property} {value})"),
            Node::For { id, range, body } => write!(
                f,
                "(for {id} ({} {}) ({}))",
                range.0,
                range.1,
                Seq(body)
            ),
            Node::While { condition, body } => {
                write!(f, "(while {condition} ({}))", Seq(body))
            }
            Node::Struct { name, members } => {
                write!(f, "(struct {name} ({}))", members.join(" "))
            }
            Node::Instance { name, members } => {
                write!(f, "(new {name}")?;
                for (member, value) in members {
                    write!(f, " ({member} {value})")?;
                }
                f.write_str(")")
            }
            Node::Call { caller, args } => {
                write!(f, "(call {caller}")?;
                for arg in args {
                    write!(f, " {arg}")?;
                }
                f.write_str(")")
            }
            Node::Get { caller, property } => match property {
                Property::Name(name) => write!(f, "{caller}.{name}"),
                Property::Expr(expr) => write!(f, "{caller}[{expr}]"),
            },
            Node::Unary { op, apply } => write!(f, "({} {apply})", op_str(*op)),
        }
    }
}
