use std::fmt;

use text_size::TextRange;

use crate::Ranged;

/// The root of a parsed script.
#[derive(Clone, Debug, PartialEq)]
pub struct Script {
    pub range: TextRange,
    pub body: Vec<Stmt>,
}

/// See also [Statements](https://tc39.es/ecma262/#sec-ecmascript-language-statements-and-declarations)
#[derive(Clone, Debug, PartialEq, is_macro::Is)]
pub enum Stmt {
    #[is(name = "expr_stmt")]
    Expr(StmtExpr),
    #[is(name = "var_stmt")]
    Var(StmtVar),
    #[is(name = "function_def_stmt")]
    FunctionDef(StmtFunctionDef),
    #[is(name = "if_stmt")]
    If(StmtIf),
    #[is(name = "while_stmt")]
    While(StmtWhile),
    #[is(name = "do_while_stmt")]
    DoWhile(StmtDoWhile),
    #[is(name = "for_stmt")]
    For(StmtFor),
    #[is(name = "for_in_stmt")]
    ForIn(StmtForIn),
    #[is(name = "for_of_stmt")]
    ForOf(StmtForOf),
    #[is(name = "break_stmt")]
    Break(StmtBreak),
    #[is(name = "continue_stmt")]
    Continue(StmtContinue),
    #[is(name = "return_stmt")]
    Return(StmtReturn),
    #[is(name = "throw_stmt")]
    Throw(StmtThrow),
    #[is(name = "try_stmt")]
    Try(StmtTry),
    #[is(name = "switch_stmt")]
    Switch(StmtSwitch),
    #[is(name = "block_stmt")]
    Block(StmtBlock),
    #[is(name = "labeled_stmt")]
    Labeled(StmtLabeled),
    #[is(name = "empty_stmt")]
    Empty(StmtEmpty),
    #[is(name = "debugger_stmt")]
    Debugger(StmtDebugger),
    #[is(name = "with_stmt")]
    With(StmtWith),
}

impl Stmt {
    /// The keyword (or short description) naming this kind of statement.
    pub const fn kind_name(&self) -> &'static str {
        match self {
            Stmt::Expr(_) => "expression",
            Stmt::Var(StmtVar { kind, .. }) => kind.as_str(),
            Stmt::FunctionDef(_) => "function",
            Stmt::If(_) => "if",
            Stmt::While(_) => "while",
            Stmt::DoWhile(_) => "do-while",
            Stmt::For(_) => "for",
            Stmt::ForIn(_) => "for-in",
            Stmt::ForOf(_) => "for-of",
            Stmt::Break(_) => "break",
            Stmt::Continue(_) => "continue",
            Stmt::Return(_) => "return",
            Stmt::Throw(_) => "throw",
            Stmt::Try(_) => "try",
            Stmt::Switch(_) => "switch",
            Stmt::Block(_) => "block",
            Stmt::Labeled(_) => "labeled",
            Stmt::Empty(_) => "empty",
            Stmt::Debugger(_) => "debugger",
            Stmt::With(_) => "with",
        }
    }
}

/// An expression evaluated for its side effects: `foo();`
#[derive(Clone, Debug, PartialEq)]
pub struct StmtExpr {
    pub range: TextRange,
    pub value: Box<Expr>,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum VarKind {
    Var,
    Let,
    Const,
}

impl VarKind {
    pub const fn as_str(self) -> &'static str {
        match self {
            VarKind::Var => "var",
            VarKind::Let => "let",
            VarKind::Const => "const",
        }
    }
}

impl fmt::Display for VarKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// `var a = 1, b;`
#[derive(Clone, Debug, PartialEq)]
pub struct StmtVar {
    pub range: TextRange,
    pub kind: VarKind,
    pub declarations: Vec<VarDeclarator>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct VarDeclarator {
    pub range: TextRange,
    pub name: Identifier,
    pub init: Option<Box<Expr>>,
}

/// `function name(a, b) { ... }`
#[derive(Clone, Debug, PartialEq)]
pub struct StmtFunctionDef {
    pub range: TextRange,
    pub name: Identifier,
    pub parameters: Vec<Identifier>,
    pub body: Vec<Stmt>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct StmtIf {
    pub range: TextRange,
    pub test: Box<Expr>,
    pub body: Box<Stmt>,
    pub orelse: Option<Box<Stmt>>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct StmtWhile {
    pub range: TextRange,
    pub test: Box<Expr>,
    pub body: Box<Stmt>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct StmtDoWhile {
    pub range: TextRange,
    pub body: Box<Stmt>,
    pub test: Box<Expr>,
}

/// `for (init; test; update) body`
///
/// `init` is either a [`Stmt::Var`] or a [`Stmt::Expr`].
#[derive(Clone, Debug, PartialEq)]
pub struct StmtFor {
    pub range: TextRange,
    pub init: Option<Box<Stmt>>,
    pub test: Option<Box<Expr>>,
    pub update: Option<Box<Expr>>,
    pub body: Box<Stmt>,
}

/// `for (left in right) body`
///
/// `left` is either a [`Stmt::Var`] or a [`Stmt::Expr`].
#[derive(Clone, Debug, PartialEq)]
pub struct StmtForIn {
    pub range: TextRange,
    pub left: Box<Stmt>,
    pub right: Box<Expr>,
    pub body: Box<Stmt>,
}

/// `for (left of right) body`
#[derive(Clone, Debug, PartialEq)]
pub struct StmtForOf {
    pub range: TextRange,
    pub left: Box<Stmt>,
    pub right: Box<Expr>,
    pub body: Box<Stmt>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct StmtBreak {
    pub range: TextRange,
    pub label: Option<Identifier>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct StmtContinue {
    pub range: TextRange,
    pub label: Option<Identifier>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct StmtReturn {
    pub range: TextRange,
    pub value: Option<Box<Expr>>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct StmtThrow {
    pub range: TextRange,
    pub value: Box<Expr>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct StmtTry {
    pub range: TextRange,
    pub body: StmtBlock,
    pub handler: Option<CatchClause>,
    pub finalizer: Option<StmtBlock>,
}

/// `catch (param) { ... }`; the parameter is optional since ES2019.
#[derive(Clone, Debug, PartialEq)]
pub struct CatchClause {
    pub range: TextRange,
    pub param: Option<Box<Expr>>,
    pub body: StmtBlock,
}

#[derive(Clone, Debug, PartialEq)]
pub struct StmtSwitch {
    pub range: TextRange,
    pub discriminant: Box<Expr>,
    pub cases: Vec<SwitchCase>,
}

/// A `case test:` clause, or `default:` when `test` is `None`.
#[derive(Clone, Debug, PartialEq)]
pub struct SwitchCase {
    pub range: TextRange,
    pub test: Option<Box<Expr>>,
    pub consequent: Vec<Stmt>,
}

impl SwitchCase {
    pub const fn is_default(&self) -> bool {
        self.test.is_none()
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct StmtBlock {
    pub range: TextRange,
    pub body: Vec<Stmt>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct StmtLabeled {
    pub range: TextRange,
    pub label: Identifier,
    pub body: Box<Stmt>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct StmtEmpty {
    pub range: TextRange,
}

#[derive(Clone, Debug, PartialEq)]
pub struct StmtDebugger {
    pub range: TextRange,
}

#[derive(Clone, Debug, PartialEq)]
pub struct StmtWith {
    pub range: TextRange,
    pub object: Box<Expr>,
    pub body: Box<Stmt>,
}

/// See also [Expressions](https://tc39.es/ecma262/#sec-ecmascript-language-expressions)
#[derive(Clone, Debug, PartialEq, is_macro::Is)]
pub enum Expr {
    #[is(name = "name_expr")]
    Name(ExprName),
    #[is(name = "number_literal_expr")]
    NumberLiteral(ExprNumberLiteral),
    #[is(name = "string_literal_expr")]
    StringLiteral(ExprStringLiteral),
    #[is(name = "boolean_literal_expr")]
    BooleanLiteral(ExprBooleanLiteral),
    #[is(name = "null_literal_expr")]
    NullLiteral(ExprNullLiteral),
    #[is(name = "array_expr")]
    Array(ExprArray),
    #[is(name = "call_expr")]
    Call(ExprCall),
    #[is(name = "new_expr")]
    New(ExprNew),
    #[is(name = "member_expr")]
    Member(ExprMember),
    #[is(name = "subscript_expr")]
    Subscript(ExprSubscript),
    #[is(name = "unary_expr")]
    Unary(ExprUnary),
    #[is(name = "update_expr")]
    Update(ExprUpdate),
    #[is(name = "binary_expr")]
    Binary(ExprBinary),
    #[is(name = "assign_expr")]
    Assign(ExprAssign),
    #[is(name = "conditional_expr")]
    Conditional(ExprConditional),
    #[is(name = "sequence_expr")]
    Sequence(ExprSequence),
    #[is(name = "function_expr")]
    Function(ExprFunction),
}

#[derive(Clone, Debug, PartialEq)]
pub struct ExprName {
    pub range: TextRange,
    pub id: String,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ExprNumberLiteral {
    pub range: TextRange,
    pub value: f64,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ExprStringLiteral {
    pub range: TextRange,
    pub value: String,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ExprBooleanLiteral {
    pub range: TextRange,
    pub value: bool,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ExprNullLiteral {
    pub range: TextRange,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ExprArray {
    pub range: TextRange,
    pub elts: Vec<Expr>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ExprCall {
    pub range: TextRange,
    pub func: Box<Expr>,
    pub arguments: Vec<Expr>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ExprNew {
    pub range: TextRange,
    pub func: Box<Expr>,
    pub arguments: Vec<Expr>,
}

/// `object.property`
#[derive(Clone, Debug, PartialEq)]
pub struct ExprMember {
    pub range: TextRange,
    pub object: Box<Expr>,
    pub property: Identifier,
}

/// `value[index]`
#[derive(Clone, Debug, PartialEq)]
pub struct ExprSubscript {
    pub range: TextRange,
    pub value: Box<Expr>,
    pub index: Box<Expr>,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum UnaryOp {
    Not,
    BitNot,
    Plus,
    Minus,
    Typeof,
    Void,
    Delete,
}

impl UnaryOp {
    pub const fn as_str(self) -> &'static str {
        match self {
            UnaryOp::Not => "!",
            UnaryOp::BitNot => "~",
            UnaryOp::Plus => "+",
            UnaryOp::Minus => "-",
            UnaryOp::Typeof => "typeof",
            UnaryOp::Void => "void",
            UnaryOp::Delete => "delete",
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct ExprUnary {
    pub range: TextRange,
    pub op: UnaryOp,
    pub operand: Box<Expr>,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum UpdateOp {
    Increment,
    Decrement,
}

/// `++i`, `i--`
#[derive(Clone, Debug, PartialEq)]
pub struct ExprUpdate {
    pub range: TextRange,
    pub op: UpdateOp,
    pub prefix: bool,
    pub target: Box<Expr>,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
    Mod,
    Exp,
    LShift,
    RShift,
    URShift,
    BitOr,
    BitXor,
    BitAnd,
    Eq,
    NotEq,
    StrictEq,
    StrictNotEq,
    Lt,
    LtE,
    Gt,
    GtE,
    In,
    Instanceof,
    And,
    Or,
    NullishCoalescing,
}

impl BinaryOp {
    pub const fn as_str(self) -> &'static str {
        match self {
            BinaryOp::Add => "+",
            BinaryOp::Sub => "-",
            BinaryOp::Mul => "*",
            BinaryOp::Div => "/",
            BinaryOp::Mod => "%",
            BinaryOp::Exp => "**",
            BinaryOp::LShift => "<<",
            BinaryOp::RShift => ">>",
            BinaryOp::URShift => ">>>",
            BinaryOp::BitOr => "|",
            BinaryOp::BitXor => "^",
            BinaryOp::BitAnd => "&",
            BinaryOp::Eq => "==",
            BinaryOp::NotEq => "!=",
            BinaryOp::StrictEq => "===",
            BinaryOp::StrictNotEq => "!==",
            BinaryOp::Lt => "<",
            BinaryOp::LtE => "<=",
            BinaryOp::Gt => ">",
            BinaryOp::GtE => ">=",
            BinaryOp::In => "in",
            BinaryOp::Instanceof => "instanceof",
            BinaryOp::And => "&&",
            BinaryOp::Or => "||",
            BinaryOp::NullishCoalescing => "??",
        }
    }

    /// Returns `true` for the short-circuiting operators `&&`, `||` and `??`.
    pub const fn is_logical(self) -> bool {
        matches!(
            self,
            BinaryOp::And | BinaryOp::Or | BinaryOp::NullishCoalescing
        )
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct ExprBinary {
    pub range: TextRange,
    pub left: Box<Expr>,
    pub op: BinaryOp,
    pub right: Box<Expr>,
}

/// `target = value`, or a compound assignment when `op` is set (`target += value`).
#[derive(Clone, Debug, PartialEq)]
pub struct ExprAssign {
    pub range: TextRange,
    pub target: Box<Expr>,
    pub op: Option<BinaryOp>,
    pub value: Box<Expr>,
}

/// `test ? body : orelse`
#[derive(Clone, Debug, PartialEq)]
pub struct ExprConditional {
    pub range: TextRange,
    pub test: Box<Expr>,
    pub body: Box<Expr>,
    pub orelse: Box<Expr>,
}

/// `a, b, c`
#[derive(Clone, Debug, PartialEq)]
pub struct ExprSequence {
    pub range: TextRange,
    pub elts: Vec<Expr>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ExprFunction {
    pub range: TextRange,
    pub name: Option<Identifier>,
    pub parameters: Vec<Identifier>,
    pub body: Vec<Stmt>,
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Identifier {
    pub range: TextRange,
    pub id: String,
}

impl Identifier {
    pub fn new(id: impl Into<String>, range: TextRange) -> Self {
        Self {
            range,
            id: id.into(),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.id
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.id)
    }
}

macro_rules! impl_ranged {
    ($($node:ty),* $(,)?) => {
        $(
            impl Ranged for $node {
                fn range(&self) -> TextRange {
                    self.range
                }
            }
        )*
    };
}

impl_ranged!(
    Script,
    StmtExpr,
    StmtVar,
    VarDeclarator,
    StmtFunctionDef,
    StmtIf,
    StmtWhile,
    StmtDoWhile,
    StmtFor,
    StmtForIn,
    StmtForOf,
    StmtBreak,
    StmtContinue,
    StmtReturn,
    StmtThrow,
    StmtTry,
    CatchClause,
    StmtSwitch,
    SwitchCase,
    StmtBlock,
    StmtLabeled,
    StmtEmpty,
    StmtDebugger,
    StmtWith,
    ExprName,
    ExprNumberLiteral,
    ExprStringLiteral,
    ExprBooleanLiteral,
    ExprNullLiteral,
    ExprArray,
    ExprCall,
    ExprNew,
    ExprMember,
    ExprSubscript,
    ExprUnary,
    ExprUpdate,
    ExprBinary,
    ExprAssign,
    ExprConditional,
    ExprSequence,
    ExprFunction,
    Identifier,
);

macro_rules! impl_enum {
    ($enum:ident { $($variant:ident($node:ty)),* $(,)? }) => {
        impl Ranged for $enum {
            fn range(&self) -> TextRange {
                match self {
                    $($enum::$variant(node) => node.range,)*
                }
            }
        }

        $(
            impl From<$node> for $enum {
                fn from(node: $node) -> Self {
                    $enum::$variant(node)
                }
            }
        )*
    };
}

impl_enum!(Stmt {
    Expr(StmtExpr),
    Var(StmtVar),
    FunctionDef(StmtFunctionDef),
    If(StmtIf),
    While(StmtWhile),
    DoWhile(StmtDoWhile),
    For(StmtFor),
    ForIn(StmtForIn),
    ForOf(StmtForOf),
    Break(StmtBreak),
    Continue(StmtContinue),
    Return(StmtReturn),
    Throw(StmtThrow),
    Try(StmtTry),
    Switch(StmtSwitch),
    Block(StmtBlock),
    Labeled(StmtLabeled),
    Empty(StmtEmpty),
    Debugger(StmtDebugger),
    With(StmtWith),
});

impl_enum!(Expr {
    Name(ExprName),
    NumberLiteral(ExprNumberLiteral),
    StringLiteral(ExprStringLiteral),
    BooleanLiteral(ExprBooleanLiteral),
    NullLiteral(ExprNullLiteral),
    Array(ExprArray),
    Call(ExprCall),
    New(ExprNew),
    Member(ExprMember),
    Subscript(ExprSubscript),
    Unary(ExprUnary),
    Update(ExprUpdate),
    Binary(ExprBinary),
    Assign(ExprAssign),
    Conditional(ExprConditional),
    Sequence(ExprSequence),
    Function(ExprFunction),
});
