use crate::Constant;
use crate::Expr;
use crate::KeywordArg;

/// A Python class definition.
#[derive(Clone, Debug, PartialEq)]
pub struct ClassDef {
    pub name: String,
    pub bases: Vec<Expr>,
    /// Class-level keywords, e.g. `class Foo(Base, metaclass=...)`.
    pub keywords: Vec<KeywordArg>,
    pub decorators: Vec<Expr>,
    pub body: Vec<Stmt>,
}
impl ClassDef {
    pub fn new(name: impl Into<String>, bases: Vec<Expr>, body: Vec<Stmt>) -> Self {
        Self {
            name: name.into(),
            bases,
            keywords: vec![],
            decorators: vec![],
            body: if body.is_empty() {
                vec![Stmt::Pass]
            } else {
                body
            },
        }
    }
}

/// A function parameter.
#[derive(Clone, Debug, PartialEq)]
pub struct Parameter {
    pub name: String,
    pub annotation: Option<Expr>,
    pub default: Option<Expr>,
}

/// A Python function definition.
#[derive(Clone, Debug, PartialEq)]
pub struct FunctionDef {
    pub name: String,
    pub params: Vec<Parameter>,
    pub returns: Option<Expr>,
    pub decorators: Vec<Expr>,
    pub body: Vec<Stmt>,
    pub is_async: bool,
}

/// A top-level or class-body Python statement.
#[derive(Clone, Debug, PartialEq)]
pub enum Stmt {
    ClassDef(ClassDef),
    FunctionDef(FunctionDef),
    /// `target: annotation = value`
    AnnAssign {
        target: String,
        annotation: Expr,
        value: Option<Expr>,
    },
    /// `target = value` (single-target form; the generator never emits
    /// multi-target assignments).
    Assign { target: String, value: Expr },
    /// A bare expression statement: docstrings and `X.model_rebuild()`
    /// calls.
    Expr(Expr),
    /// `import a.b`
    Import { module: String },
    /// `from module import name, ...`
    ImportFrom { module: String, names: Vec<String> },
    Pass,
}

impl Stmt {
    /// A docstring statement.
    pub fn docstring(text: impl Into<String>) -> Self {
        Self::Expr(Expr::Constant(Constant::Str(text.into())))
    }

    /// The name under which this statement is tracked in a symbol table:
    /// class and function names, and assignment target names. Statements
    /// without a name (docstrings, imports, `pass`) are not symbols.
    pub fn symbol_name(&self) -> Option<&str> {
        match self {
            Self::ClassDef(class_def) => Some(&class_def.name),
            Self::FunctionDef(function_def) => Some(&function_def.name),
            Self::AnnAssign { target, .. } => Some(target),
            Self::Assign { target, .. } => Some(target),
            Self::Expr(_) | Self::Import { .. } | Self::ImportFrom { .. } | Self::Pass => None,
        }
    }
}
