use crate::ast;

/// A field or variable type with GraphQL's non-null wrapper folded into
/// per-level `nullable` flags. `[String!]` becomes
/// `List { inner: Named { "String", nullable: false }, nullable: true }`.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum TypeAnnotation {
    Named {
        name: String,
        nullable: bool,
    },
    List {
        inner: Box<TypeAnnotation>,
        nullable: bool,
    },
}

impl TypeAnnotation {
    pub fn from_ast_type(ast_type: &ast::schema::Type) -> TypeAnnotation {
        Self::from_ast_type_impl(ast_type, /* nullable = */ true)
    }

    fn from_ast_type_impl(ast_type: &ast::schema::Type, nullable: bool) -> TypeAnnotation {
        use graphql_parser::schema::Type;
        match ast_type {
            Type::NamedType(name) => TypeAnnotation::Named {
                name: name.to_string(),
                nullable,
            },
            Type::ListType(inner) => TypeAnnotation::List {
                inner: Box::new(Self::from_ast_type_impl(inner, true)),
                nullable,
            },
            Type::NonNullType(inner) => Self::from_ast_type_impl(inner, false),
        }
    }

    pub fn nullable(&self) -> bool {
        match self {
            TypeAnnotation::Named { nullable, .. } => *nullable,
            TypeAnnotation::List { nullable, .. } => *nullable,
        }
    }

    /// The named type at the bottom of any list nesting.
    pub fn innermost_name(&self) -> &str {
        match self {
            TypeAnnotation::Named { name, .. } => name,
            TypeAnnotation::List { inner, .. } => inner.innermost_name(),
        }
    }
}
