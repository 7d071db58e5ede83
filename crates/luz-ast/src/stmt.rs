//! Statement AST nodes.

use crate::expr::Expr;

/// The root node: an ordered list of top-level statements.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Program {
    pub statements: Vec<Stmt>,
}

/// A statement in the AST.
#[derive(Debug, Clone, PartialEq)]
pub enum Stmt {
    /// `name = value` (compound assignment desugars into this)
    Assign {
        name: String,
        value: Expr,
    },
    /// `obj[index] = value`
    IndexAssign {
        object: String,
        index: Expr,
        value: Expr,
    },
    /// `fn name(params) -> ret { body }`
    FnDecl {
        name: String,
        params: Vec<Param>,
        return_type: Option<String>,
        body: Vec<Stmt>,
    },
    /// `if cond { body } else { else_body }`. An `else if` chain is a
    /// nested `If` as the single statement of `else_body`.
    If {
        cond: Expr,
        body: Vec<Stmt>,
        else_body: Vec<Stmt>,
    },
    /// `while cond { body }`
    While {
        cond: Expr,
        body: Vec<Stmt>,
    },
    /// `for var in collection { body }`
    For {
        var: String,
        collection: Expr,
        body: Vec<Stmt>,
    },
    /// `match scrutinee { cases }`
    Match {
        scrutinee: Expr,
        cases: Vec<MatchCase>,
    },
    /// `return [value]`
    Return(Option<Expr>),
    Continue,
    Break,
    /// `import "path.lz"` — removed by the import resolver
    Import {
        path: String,
    },
    /// `bash { ... }` — emitted verbatim
    RawBash {
        content: String,
    },
    /// An expression at statement position. Calls lower to commands;
    /// anything else is a lowering error.
    Expr(Expr),
}

/// A function parameter: `name: type [= default]`.
#[derive(Debug, Clone, PartialEq)]
pub struct Param {
    pub name: String,
    pub ty: String,
    pub default: Option<Expr>,
}

/// One arm of a `match`. `pattern` is `None` for the `_` wildcard.
#[derive(Debug, Clone, PartialEq)]
pub struct MatchCase {
    pub pattern: Option<Expr>,
    pub body: Vec<Stmt>,
}
