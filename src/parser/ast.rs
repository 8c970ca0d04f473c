// AST (Abstract Syntax Tree) definitions for the front end

use std::fmt;

/// Source location information for error reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SourceLocation {
    pub line: usize,
    pub column: usize,
}

impl SourceLocation {
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

impl fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// Binary operators
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinOp {
    // Arithmetic
    Add,
    Sub,
    Mul,
    Div,
    // Comparison
    Eq,
    Ne,
    Lt,
    Le,
    Gt,
    Ge,
}

impl BinOp {
    pub fn symbol(&self) -> &'static str {
        match self {
            BinOp::Add => "+",
            BinOp::Sub => "-",
            BinOp::Mul => "*",
            BinOp::Div => "/",
            BinOp::Eq => "==",
            BinOp::Ne => "!=",
            BinOp::Lt => "<",
            BinOp::Le => "<=",
            BinOp::Gt => ">",
            BinOp::Ge => ">=",
        }
    }
}

/// Prefix unary operators
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnOp {
    Neg, // -x
    Not, // !x
}

impl UnOp {
    pub fn symbol(&self) -> &'static str {
        match self {
            UnOp::Neg => "-",
            UnOp::Not => "!",
        }
    }
}

/// Postfix operators
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PostfixOp {
    Inc, // x++
    Dec, // x--
}

impl PostfixOp {
    pub fn symbol(&self) -> &'static str {
        match self {
            PostfixOp::Inc => "++",
            PostfixOp::Dec => "--",
        }
    }
}

/// Method parameter
#[derive(Debug, Clone, PartialEq)]
pub struct Param {
    pub name: String,
    pub param_type: String,
}

/// AST nodes representing declarations, statements and expressions
#[derive(Debug, Clone, PartialEq)]
pub enum AstNode {
    // Declarations
    VariableDeclaration {
        var_type: String,
        name: String,
        init: Option<Box<AstNode>>,
        location: SourceLocation,
    },
    /// `return_type` is `None` for constructors
    MethodDeclaration {
        return_type: Option<String>,
        name: String,
        params: Vec<Param>,
        body: Vec<AstNode>,
        location: SourceLocation,
    },
    ClassDeclaration {
        name: String,
        fields: Vec<AstNode>,
        methods: Vec<AstNode>,
        location: SourceLocation,
    },

    // Statements
    BlockStatement {
        statements: Vec<AstNode>,
        location: SourceLocation,
    },
    IfStatement {
        condition: Box<AstNode>,
        then_branch: Vec<AstNode>,
        else_branch: Option<Vec<AstNode>>,
        location: SourceLocation,
    },
    WhileStatement {
        condition: Box<AstNode>,
        body: Vec<AstNode>,
        location: SourceLocation,
    },
    ForStatement {
        init: Option<Box<AstNode>>,
        condition: Option<Box<AstNode>>,
        update: Option<Box<AstNode>>,
        body: Vec<AstNode>,
        location: SourceLocation,
    },
    ReturnStatement {
        value: Option<Box<AstNode>>,
        location: SourceLocation,
    },
    BreakStatement {
        location: SourceLocation,
    },
    ContinueStatement {
        location: SourceLocation,
    },

    // Expressions
    Assignment {
        target: Box<AstNode>,
        value: Box<AstNode>,
        location: SourceLocation,
    },
    BinaryExpression {
        op: BinOp,
        left: Box<AstNode>,
        right: Box<AstNode>,
        location: SourceLocation,
    },
    UnaryExpression {
        op: UnOp,
        operand: Box<AstNode>,
        location: SourceLocation,
    },
    PostfixExpression {
        op: PostfixOp,
        operand: Box<AstNode>,
        location: SourceLocation,
    },
    FunctionCall {
        callee: Box<AstNode>,
        args: Vec<AstNode>,
        location: SourceLocation,
    },
    FieldAccess {
        object: Box<AstNode>,
        field: String,
        location: SourceLocation,
    },
    VariableReference(String, SourceLocation),
    NumberLiteral(String, SourceLocation),
    StringLiteral(String, SourceLocation),
}

impl AstNode {
    /// Get the source location of this node
    pub fn location(&self) -> &SourceLocation {
        match self {
            AstNode::VariableDeclaration { location, .. } => location,
            AstNode::MethodDeclaration { location, .. } => location,
            AstNode::ClassDeclaration { location, .. } => location,
            AstNode::BlockStatement { location, .. } => location,
            AstNode::IfStatement { location, .. } => location,
            AstNode::WhileStatement { location, .. } => location,
            AstNode::ForStatement { location, .. } => location,
            AstNode::ReturnStatement { location, .. } => location,
            AstNode::BreakStatement { location } => location,
            AstNode::ContinueStatement { location } => location,
            AstNode::Assignment { location, .. } => location,
            AstNode::BinaryExpression { location, .. } => location,
            AstNode::UnaryExpression { location, .. } => location,
            AstNode::PostfixExpression { location, .. } => location,
            AstNode::FunctionCall { location, .. } => location,
            AstNode::FieldAccess { location, .. } => location,
            AstNode::VariableReference(_, loc) => loc,
            AstNode::NumberLiteral(_, loc) => loc,
            AstNode::StringLiteral(_, loc) => loc,
        }
    }

    /// Statements owned by a block, or an empty slice for any other node
    pub fn statements(&self) -> &[AstNode] {
        match self {
            AstNode::BlockStatement { statements, .. } => statements,
            _ => &[],
        }
    }
}

/// Compact source-like rendering, used in diagnostics and tests.
///
/// Binary expressions are always parenthesized so the tree shape is visible.
impl fmt::Display for AstNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AstNode::VariableReference(name, _) => write!(f, "{name}"),
            AstNode::NumberLiteral(text, _) => write!(f, "{text}"),
            AstNode::StringLiteral(text, _) => write!(f, "\"{text}\""),
            AstNode::BinaryExpression {
                op, left, right, ..
            } => write!(f, "({left} {} {right})", op.symbol()),
            AstNode::UnaryExpression { op, operand, .. } => {
                write!(f, "{}{operand}", op.symbol())
            }
            AstNode::PostfixExpression { op, operand, .. } => {
                write!(f, "{operand}{}", op.symbol())
            }
            AstNode::FieldAccess { object, field, .. } => write!(f, "{object}.{field}"),
            AstNode::FunctionCall { callee, args, .. } => {
                write!(f, "{callee}(")?;
                for (i, arg) in args.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{arg}")?;
                }
                write!(f, ")")
            }
            AstNode::Assignment { target, value, .. } => write!(f, "{target} = {value}"),
            AstNode::VariableDeclaration {
                var_type,
                name,
                init,
                ..
            } => match init {
                Some(init) => write!(f, "{var_type} {name} = {init};"),
                None => write!(f, "{var_type} {name};"),
            },
            AstNode::MethodDeclaration { name, .. } => write!(f, "method {name}"),
            AstNode::ClassDeclaration { name, .. } => write!(f, "class {name}"),
            AstNode::BlockStatement { statements, .. } => {
                write!(f, "{{ {} statements }}", statements.len())
            }
            AstNode::IfStatement { condition, .. } => write!(f, "if ({condition})"),
            AstNode::WhileStatement { condition, .. } => write!(f, "while ({condition})"),
            AstNode::ForStatement { .. } => write!(f, "for"),
            AstNode::ReturnStatement { value, .. } => match value {
                Some(value) => write!(f, "return {value};"),
                None => write!(f, "return;"),
            },
            AstNode::BreakStatement { .. } => write!(f, "break;"),
            AstNode::ContinueStatement { .. } => write!(f, "continue;"),
        }
    }
}
