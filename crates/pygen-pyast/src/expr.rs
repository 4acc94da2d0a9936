/// A Python constant literal.
#[derive(Clone, Debug, PartialEq)]
pub enum Constant {
    Str(String),
    Int(i64),
    Float(f64),
    Bool(bool),
    None,
    Ellipsis,
}

/// A keyword argument in a call expression, e.g. `alias="__typename"`.
#[derive(Clone, Debug, PartialEq)]
pub struct KeywordArg {
    pub arg: String,
    pub value: Expr,
}
impl KeywordArg {
    pub fn new(arg: impl Into<String>, value: Expr) -> Self {
        Self {
            arg: arg.into(),
            value,
        }
    }
}

/// A Python expression.
///
/// String [`Constant`]s double as deferred class references when they appear
/// in annotation position: `friends: Optional["PersonFragment"]` is a
/// forward reference that a later `model_rebuild()` pass resolves.
#[derive(Clone, Debug, PartialEq)]
pub enum Expr {
    /// A bare identifier, e.g. `AnimalBase`.
    Name(String),
    Constant(Constant),
    /// `value.attr`
    Attribute { value: Box<Expr>, attr: String },
    /// `value[slice]`, e.g. `Optional[str]`.
    Subscript { value: Box<Expr>, slice: Box<Expr> },
    /// `(a, b, c)` — the slice form used by `Union[A, B, C]`.
    Tuple(Vec<Expr>),
    /// `func(arg, kw=value)`
    Call {
        func: Box<Expr>,
        args: Vec<Expr>,
        keywords: Vec<KeywordArg>,
    },
}

impl Expr {
    pub fn name(name: impl Into<String>) -> Self {
        Self::Name(name.into())
    }

    pub fn string(value: impl Into<String>) -> Self {
        Self::Constant(Constant::Str(value.into()))
    }

    pub fn attribute(value: Expr, attr: impl Into<String>) -> Self {
        Self::Attribute {
            value: Box::new(value),
            attr: attr.into(),
        }
    }

    pub fn subscript(value: Expr, slice: Expr) -> Self {
        Self::Subscript {
            value: Box::new(value),
            slice: Box::new(slice),
        }
    }

    pub fn call(func: Expr, args: Vec<Expr>, keywords: Vec<KeywordArg>) -> Self {
        Self::Call {
            func: Box::new(func),
            args,
            keywords,
        }
    }

    /// `Optional[inner]`
    pub fn optional(inner: Expr) -> Self {
        Self::subscript(Self::name("Optional"), inner)
    }

    /// `List[inner]`
    pub fn list_of(inner: Expr) -> Self {
        Self::subscript(Self::name("List"), inner)
    }

    /// `Tuple[inner, ...]` — the frozen-list rendition.
    pub fn tuple_of(inner: Expr) -> Self {
        Self::subscript(
            Self::name("Tuple"),
            Self::Tuple(vec![inner, Self::Constant(Constant::Ellipsis)]),
        )
    }

    /// `Union[a, b, ...]`, collapsing a single member to itself.
    pub fn union(mut members: Vec<Expr>) -> Self {
        if members.len() == 1 {
            return members.remove(0);
        }
        Self::subscript(Self::name("Union"), Self::Tuple(members))
    }

    /// `Literal["value"]`
    pub fn literal_str(value: impl Into<String>) -> Self {
        Self::subscript(Self::name("Literal"), Self::string(value))
    }

    /// The identifier this expression names, if it is a plain [`Expr::Name`].
    pub fn as_name(&self) -> Option<&str> {
        match self {
            Self::Name(name) => Some(name),
            _ => None,
        }
    }
}
