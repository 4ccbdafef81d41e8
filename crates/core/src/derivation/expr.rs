use rust_decimal::Decimal;

use crate::derivation::variables::VarId;

/// Arithmetic operators available to formula slots.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinOp {
    Add,
    Sub,
    Mul,
    /// Division yields 0 whenever the denominator is zero.
    Div,
}

/// Comparison operators for conditions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CmpOp {
    Lt,
    Le,
    Gt,
    Ge,
    Eq,
}

/// A boolean condition over already-evaluated slots.
#[derive(Debug, Clone)]
pub enum Cond {
    /// Numeric comparison of two expressions.
    Cmp(CmpOp, Expr, Expr),
    /// True when the referenced label slot equals the given text.
    LabelIs(VarId, &'static str),
}

/// Formula expression over earlier catalogue slots.
///
/// References are by `VarId` only; the catalogue validator guarantees every
/// referenced slot is declared earlier, so a single in-order pass evaluates
/// everything.
#[derive(Debug, Clone)]
pub enum Expr {
    Var(VarId),
    Number(Decimal),
    Text(&'static str),
    Bin(BinOp, Box<Expr>, Box<Expr>),
    Abs(Box<Expr>),
    If(Box<Cond>, Box<Expr>, Box<Expr>),
}

impl Expr {
    pub fn var(id: VarId) -> Expr {
        Expr::Var(id)
    }

    pub fn num(value: Decimal) -> Expr {
        Expr::Number(value)
    }

    pub fn add(lhs: Expr, rhs: Expr) -> Expr {
        Expr::Bin(BinOp::Add, Box::new(lhs), Box::new(rhs))
    }

    pub fn sub(lhs: Expr, rhs: Expr) -> Expr {
        Expr::Bin(BinOp::Sub, Box::new(lhs), Box::new(rhs))
    }

    pub fn mul(lhs: Expr, rhs: Expr) -> Expr {
        Expr::Bin(BinOp::Mul, Box::new(lhs), Box::new(rhs))
    }

    pub fn div(lhs: Expr, rhs: Expr) -> Expr {
        Expr::Bin(BinOp::Div, Box::new(lhs), Box::new(rhs))
    }

    pub fn abs(inner: Expr) -> Expr {
        Expr::Abs(Box::new(inner))
    }

    pub fn if_(cond: Cond, then: Expr, otherwise: Expr) -> Expr {
        Expr::If(Box::new(cond), Box::new(then), Box::new(otherwise))
    }

    /// Collects every slot this expression references.
    pub fn refs(&self, out: &mut Vec<VarId>) {
        match self {
            Expr::Var(id) => out.push(*id),
            Expr::Number(_) | Expr::Text(_) => {}
            Expr::Bin(_, lhs, rhs) => {
                lhs.refs(out);
                rhs.refs(out);
            }
            Expr::Abs(inner) => inner.refs(out),
            Expr::If(cond, then, otherwise) => {
                cond.refs(out);
                then.refs(out);
                otherwise.refs(out);
            }
        }
    }
}

impl Cond {
    pub fn refs(&self, out: &mut Vec<VarId>) {
        match self {
            Cond::Cmp(_, lhs, rhs) => {
                lhs.refs(out);
                rhs.refs(out);
            }
            Cond::LabelIs(id, _) => out.push(*id),
        }
    }
}
