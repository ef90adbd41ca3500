// ============================================================
// GOTO Expressions and Types
// ============================================================
//
// Only the shapes the loop transformations need to look at are
// modelled structurally. Anything else from the front end can be
// carried through as an opaque `Expr::Other`.
//
// ============================================================

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GotoType {
    Bool,
    Signed { width: u32 },
    Unsigned { width: u32 },
    Float { width: u32 },
    Pointer(Box<GotoType>),
    Array { element: Box<GotoType>, size: u64 },

    /// Struct, union or typedef name resolved by the front end
    Named(String),
    Empty,
}

impl fmt::Display for GotoType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GotoType::Bool => write!(f, "bool"),
            GotoType::Signed { width } => write!(f, "signedbv_{width}"),
            GotoType::Unsigned { width } => write!(f, "unsignedbv_{width}"),
            GotoType::Float { width } => write!(f, "floatbv_{width}"),
            GotoType::Pointer(inner) => write!(f, "{inner}*"),
            GotoType::Array { element, size } => write!(f, "{element}[{size}]"),
            GotoType::Named(name) => write!(f, "{name}"),
            GotoType::Empty => write!(f, "empty"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Symbol {
    pub identifier: String,
    pub ty: GotoType,
}

impl Symbol {
    pub fn new(identifier: impl Into<String>, ty: GotoType) -> Self {
        Symbol {
            identifier: identifier.into(),
            ty,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
    Mod,
    Eq,
    Ne,
    Lt,
    Le,
    Gt,
    Ge,
    And,
    Or,
}

impl BinaryOp {
    /// Comparisons and logical connectives, everything whose result is a `Bool`.
    pub fn is_boolean(self) -> bool {
        matches!(
            self,
            BinaryOp::Eq
                | BinaryOp::Ne
                | BinaryOp::Lt
                | BinaryOp::Le
                | BinaryOp::Gt
                | BinaryOp::Ge
                | BinaryOp::And
                | BinaryOp::Or
        )
    }

    fn symbol(self) -> &'static str {
        match self {
            BinaryOp::Add => "+",
            BinaryOp::Sub => "-",
            BinaryOp::Mul => "*",
            BinaryOp::Div => "/",
            BinaryOp::Mod => "%",
            BinaryOp::Eq => "==",
            BinaryOp::Ne => "!=",
            BinaryOp::Lt => "<",
            BinaryOp::Le => "<=",
            BinaryOp::Gt => ">",
            BinaryOp::Ge => ">=",
            BinaryOp::And => "&&",
            BinaryOp::Or => "||",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Expr {
    Nil,
    Bool(bool),
    Int { value: i64, ty: GotoType },
    Symbol(Symbol),
    Not(Box<Expr>),
    Binary {
        op: BinaryOp,
        lhs: Box<Expr>,
        rhs: Box<Expr>,
    },

    /// An unconstrained value of the given type
    Nondet(GotoType),

    /// Front end expression the transformations never look inside
    Other { text: String, ty: GotoType },
}

impl Expr {
    pub fn true_expr() -> Expr {
        Expr::Bool(true)
    }

    pub fn symbol(identifier: impl Into<String>, ty: GotoType) -> Expr {
        Expr::Symbol(Symbol::new(identifier, ty))
    }

    pub fn int(value: i64, ty: GotoType) -> Expr {
        Expr::Int { value, ty }
    }

    pub fn binary(op: BinaryOp, lhs: Expr, rhs: Expr) -> Expr {
        Expr::Binary {
            op,
            lhs: Box::new(lhs),
            rhs: Box::new(rhs),
        }
    }

    /// Wraps in a negation without simplifying.
    pub fn not(operand: Expr) -> Expr {
        Expr::Not(Box::new(operand))
    }

    pub fn is_true(&self) -> bool {
        matches!(self, Expr::Bool(true))
    }

    pub fn is_nil(&self) -> bool {
        matches!(self, Expr::Nil)
    }

    pub fn is_not(&self) -> bool {
        matches!(self, Expr::Not(_))
    }

    pub fn ty(&self) -> GotoType {
        match self {
            Expr::Nil => GotoType::Empty,
            Expr::Bool(_) | Expr::Not(_) => GotoType::Bool,
            Expr::Int { ty, .. } | Expr::Nondet(ty) | Expr::Other { ty, .. } => ty.clone(),
            Expr::Symbol(symbol) => symbol.ty.clone(),
            Expr::Binary { op, lhs, .. } => {
                if op.is_boolean() {
                    GotoType::Bool
                } else {
                    lhs.ty()
                }
            }
        }
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expr::Nil => write!(f, "nil"),
            Expr::Bool(value) => write!(f, "{}", if *value { "TRUE" } else { "FALSE" }),
            Expr::Int { value, .. } => write!(f, "{value}"),
            Expr::Symbol(symbol) => write!(f, "{}", symbol.identifier),
            Expr::Not(operand) => write!(f, "!({operand})"),
            Expr::Binary { op, lhs, rhs } => write!(f, "{lhs} {} {rhs}", op.symbol()),
            Expr::Nondet(ty) => write!(f, "nondet_{ty}()"),
            Expr::Other { text, .. } => write!(f, "{text}"),
        }
    }
}

// ============================================================
// Collaborators
// ============================================================

/// Builds the boolean expressions the transformations synthesize.
pub trait ExpressionBuilder: Sync {
    fn negate(&self, expr: &Expr) -> Expr;
    fn true_expr(&self) -> Expr;
}

/// Negation that folds `!!x` into `x` and flips boolean literals.
#[derive(Debug, Default, Clone, Copy)]
pub struct SimplifyingExprBuilder;

impl ExpressionBuilder for SimplifyingExprBuilder {
    fn negate(&self, expr: &Expr) -> Expr {
        match expr {
            Expr::Not(operand) => (**operand).clone(),
            Expr::Bool(value) => Expr::Bool(!value),
            other => Expr::not(other.clone()),
        }
    }

    fn true_expr(&self) -> Expr {
        Expr::true_expr()
    }
}

/// Produces an unconstrained value of a type.
pub trait NondetSource: Sync {
    fn nondet_value(&self, ty: &GotoType) -> Expr;
}

/// Side-effect style nondet values, left for the symbolic executor to introduce fresh symbols.
#[derive(Debug, Default, Clone, Copy)]
pub struct SideEffectNondet;

impl NondetSource for SideEffectNondet {
    fn nondet_value(&self, ty: &GotoType) -> Expr {
        Expr::Nondet(ty.clone())
    }
}
