//! Per-run bookkeeping for generated class names, fragment metadata,
//! imports, and forward references.
//!
//! A [`ClassRegistry`] is created for each generation run and threaded
//! through the per-category compilers. Registration is one-shot per
//! category and type name, so a class can never be emitted twice; lookups
//! after the owning phase ran either resolve or fail loudly.

use std::collections::BTreeSet;

use indexmap::IndexMap;
use indexmap::IndexSet;
use pygen_pyast::Expr;
use pygen_pyast::Stmt;
use pygen_pyast::import_statements;
use thiserror::Error;

use crate::config::GeneratorConfig;
use crate::keywords::escape_python_keyword;
use crate::stylers::Styler;

/// Default scalar-to-Python mappings, overridable per config.
const SCALAR_DEFAULTS: &[(&str, &str)] = &[
    ("Boolean", "bool"),
    ("DateTime", "datetime.datetime"),
    ("Float", "float"),
    ("GenericScalar", "typing.Dict"),
    ("ID", "str"),
    ("Int", "int"),
    ("String", "str"),
];

#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("A {category} class for `{name}` was already generated.")]
    AlreadyRegistered {
        category: &'static str,
        name: String,
    },

    #[error(
        "No enum class was generated for `{name}`. \
         Is the referenced enum missing from the documents' reachable types?"
    )]
    NoEnumFound { name: String },

    #[error("No input class was generated for `{name}`.")]
    NoInputTypeFound { name: String },

    #[error("No scalar mapping is defined for `{name}`. Add one to `scalar_definitions`.")]
    NoScalarFound { name: String },
}

type Result<T> = std::result::Result<T, RegistryError>;

pub struct ClassRegistry {
    stylers: Vec<Box<dyn Styler>>,
    scalar_overrides: IndexMap<String, String>,

    enum_class_map: IndexMap<String, String>,
    input_class_map: IndexMap<String, String>,
    fragment_class_map: IndexMap<String, String>,
    query_class_map: IndexMap<String, String>,
    mutation_class_map: IndexMap<String, String>,
    subscription_class_map: IndexMap<String, String>,
    /// Selection class names, claimed as their classes are emitted.
    object_class_names: IndexSet<String>,

    /// Fragment name to canonical document text, spreads already inlined.
    fragment_documents: IndexMap<String, String>,
    /// Fragment name to the schema type it conditions on.
    fragment_types: IndexMap<String, String>,
    /// Interface fragment name to (implementing object type -> class name).
    interface_implementations: IndexMap<String, IndexMap<String, String>>,
    /// Union fragment name to (member object type -> class name).
    union_members: IndexMap<String, IndexMap<String, String>>,

    imports: BTreeSet<String>,
    forward_references: BTreeSet<String>,
}

impl ClassRegistry {
    pub fn new(config: &GeneratorConfig) -> ClassRegistry {
        ClassRegistry {
            stylers: config.stylers.iter().map(|kind| kind.build()).collect(),
            scalar_overrides: config.scalar_definitions.clone(),
            enum_class_map: IndexMap::new(),
            input_class_map: IndexMap::new(),
            fragment_class_map: IndexMap::new(),
            query_class_map: IndexMap::new(),
            mutation_class_map: IndexMap::new(),
            subscription_class_map: IndexMap::new(),
            object_class_names: IndexSet::new(),
            fragment_documents: IndexMap::new(),
            fragment_types: IndexMap::new(),
            interface_implementations: IndexMap::new(),
            union_members: IndexMap::new(),
            imports: BTreeSet::new(),
            forward_references: BTreeSet::new(),
        }
    }

    //
    // Styled names
    //

    pub fn style_enum_name(&self, name: &str) -> String {
        self.stylers
            .iter()
            .fold(name.to_string(), |name, styler| styler.style_enum_name(name))
    }

    pub fn style_input_name(&self, name: &str) -> String {
        self.stylers
            .iter()
            .fold(name.to_string(), |name, styler| styler.style_input_name(name))
    }

    pub fn style_object_name(&self, name: &str) -> String {
        self.stylers
            .iter()
            .fold(name.to_string(), |name, styler| styler.style_object_name(name))
    }

    pub fn style_fragment_name(&self, name: &str) -> String {
        self.stylers.iter().fold(name.to_string(), |name, styler| {
            styler.style_fragment_name(name)
        })
    }

    pub fn style_query_name(&self, name: &str) -> String {
        self.stylers
            .iter()
            .fold(name.to_string(), |name, styler| styler.style_query_name(name))
    }

    pub fn style_mutation_name(&self, name: &str) -> String {
        self.stylers.iter().fold(name.to_string(), |name, styler| {
            styler.style_mutation_name(name)
        })
    }

    pub fn style_subscription_name(&self, name: &str) -> String {
        self.stylers.iter().fold(name.to_string(), |name, styler| {
            styler.style_subscription_name(name)
        })
    }

    /// Attribute name for a selected field, styled and keyword-escaped.
    pub fn generate_node_name(&self, name: &str) -> String {
        let styled = self
            .stylers
            .iter()
            .fold(name.to_string(), |name, styler| styler.style_node_name(name));
        escape_python_keyword(styled)
    }

    /// Attribute name for an operation variable, styled and
    /// keyword-escaped.
    pub fn generate_parameter_name(&self, name: &str) -> String {
        let styled = self.stylers.iter().fold(name.to_string(), |name, styler| {
            styler.style_parameter_name(name)
        });
        escape_python_keyword(styled)
    }

    //
    // Enums
    //

    /// Claim the class name for an enum type. One-shot per type name.
    pub fn generate_enum(&mut self, type_name: &str) -> Result<String> {
        let class_name = self.style_enum_name(type_name);
        if self.enum_class_map.contains_key(type_name) {
            return Err(RegistryError::AlreadyRegistered {
                category: "enum",
                name: type_name.to_string(),
            });
        }
        self.enum_class_map
            .insert(type_name.to_string(), class_name.clone());
        Ok(class_name)
    }

    /// Annotation expression for a registered enum. Enums are generated
    /// before anything that references them, so a miss is an error.
    pub fn reference_enum(&mut self, type_name: &str) -> Result<Expr> {
        match self.enum_class_map.get(type_name) {
            Some(class_name) => Ok(Expr::name(class_name)),
            None => Err(RegistryError::NoEnumFound {
                name: type_name.to_string(),
            }),
        }
    }

    //
    // Input objects
    //

    pub fn generate_input(&mut self, type_name: &str) -> Result<String> {
        let class_name = self.style_input_name(type_name);
        if self.input_class_map.contains_key(type_name) {
            return Err(RegistryError::AlreadyRegistered {
                category: "input",
                name: type_name.to_string(),
            });
        }
        self.input_class_map
            .insert(type_name.to_string(), class_name.clone());
        Ok(class_name)
    }

    /// Annotation expression for an input class. With `allow_forward`,
    /// an unregistered input resolves to a string annotation plus a
    /// `model_rebuild()` entry, which lets inputs reference each other.
    pub fn reference_input(&mut self, type_name: &str, allow_forward: bool) -> Result<Expr> {
        if let Some(class_name) = self.input_class_map.get(type_name) {
            return Ok(Expr::name(class_name));
        }
        if allow_forward {
            let class_name = self.style_input_name(type_name);
            self.forward_references.insert(class_name.clone());
            return Ok(Expr::string(&class_name));
        }
        Err(RegistryError::NoInputTypeFound {
            name: type_name.to_string(),
        })
    }

    //
    // Scalars
    //

    /// Annotation expression for a scalar. Dotted mappings register an
    /// import and resolve to the final path segment.
    pub fn reference_scalar(&mut self, type_name: &str) -> Result<Expr> {
        let python_path = self
            .scalar_overrides
            .get(type_name)
            .map(String::as_str)
            .or_else(|| {
                SCALAR_DEFAULTS
                    .iter()
                    .find(|(name, _)| *name == type_name)
                    .map(|(_, path)| *path)
            })
            .ok_or_else(|| RegistryError::NoScalarFound {
                name: type_name.to_string(),
            })?;

        match python_path.rsplit_once('.') {
            Some((_, leaf)) => {
                let leaf = leaf.to_string();
                self.register_import(python_path.to_string());
                Ok(Expr::name(&leaf))
            }
            None => Ok(Expr::name(python_path)),
        }
    }

    //
    // Fragments
    //

    /// Claim the class name for a fragment. One-shot per fragment name.
    pub fn generate_fragment(&mut self, fragment_name: &str) -> Result<String> {
        let class_name = self.style_fragment_name(fragment_name);
        if self.fragment_class_map.contains_key(fragment_name) {
            return Err(RegistryError::AlreadyRegistered {
                category: "fragment",
                name: fragment_name.to_string(),
            });
        }
        self.fragment_class_map
            .insert(fragment_name.to_string(), class_name.clone());
        Ok(class_name)
    }

    pub fn fragment_class(&self, fragment_name: &str) -> Option<&str> {
        self.fragment_class_map.get(fragment_name).map(String::as_str)
    }

    pub fn register_fragment_document(&mut self, fragment_name: String, document: String) {
        self.fragment_documents.insert(fragment_name, document);
    }

    pub fn fragment_document(&self, fragment_name: &str) -> Option<&str> {
        self.fragment_documents
            .get(fragment_name)
            .map(String::as_str)
    }

    pub fn register_fragment_type(&mut self, fragment_name: String, type_condition: String) {
        self.fragment_types.insert(fragment_name, type_condition);
    }

    pub fn fragment_type(&self, fragment_name: &str) -> Option<&str> {
        self.fragment_types.get(fragment_name).map(String::as_str)
    }

    /// Record the concrete class generated for one implementation of an
    /// interface fragment.
    pub fn register_interface_implementation(
        &mut self,
        fragment_name: &str,
        object_type: String,
        class_name: String,
    ) {
        self.interface_implementations
            .entry(fragment_name.to_string())
            .or_default()
            .insert(object_type, class_name);
    }

    /// Implementation map for an interface fragment, keyed by object type
    /// name.
    pub fn interface_implementations(
        &self,
        fragment_name: &str,
    ) -> Option<&IndexMap<String, String>> {
        self.interface_implementations.get(fragment_name)
    }

    /// Record the concrete class generated for one member of a union
    /// fragment.
    pub fn register_union_member(
        &mut self,
        fragment_name: &str,
        object_type: String,
        class_name: String,
    ) {
        self.union_members
            .entry(fragment_name.to_string())
            .or_default()
            .insert(object_type, class_name);
    }

    pub fn union_members(&self, fragment_name: &str) -> Option<&IndexMap<String, String>> {
        self.union_members.get(fragment_name)
    }

    //
    // Operations and selection classes
    //

    /// Claim the class name for a query operation. One-shot per name.
    pub fn generate_query(&mut self, operation_name: &str) -> Result<String> {
        let class_name = self.style_query_name(operation_name);
        if self.query_class_map.contains_key(operation_name) {
            return Err(RegistryError::AlreadyRegistered {
                category: "query",
                name: operation_name.to_string(),
            });
        }
        self.query_class_map
            .insert(operation_name.to_string(), class_name.clone());
        Ok(class_name)
    }

    /// Claim the class name for a mutation operation. One-shot per name.
    pub fn generate_mutation(&mut self, operation_name: &str) -> Result<String> {
        let class_name = self.style_mutation_name(operation_name);
        if self.mutation_class_map.contains_key(operation_name) {
            return Err(RegistryError::AlreadyRegistered {
                category: "mutation",
                name: operation_name.to_string(),
            });
        }
        self.mutation_class_map
            .insert(operation_name.to_string(), class_name.clone());
        Ok(class_name)
    }

    /// Claim the class name for a subscription operation. One-shot per
    /// name.
    pub fn generate_subscription(&mut self, operation_name: &str) -> Result<String> {
        let class_name = self.style_subscription_name(operation_name);
        if self.subscription_class_map.contains_key(operation_name) {
            return Err(RegistryError::AlreadyRegistered {
                category: "subscription",
                name: operation_name.to_string(),
            });
        }
        self.subscription_class_map
            .insert(operation_name.to_string(), class_name.clone());
        Ok(class_name)
    }

    /// Claim a selection class name before its class is emitted. One-shot
    /// per name, so two classes can never shadow each other in the
    /// generated module.
    pub fn generate_object(&mut self, class_name: &str) -> Result<()> {
        if !self.object_class_names.insert(class_name.to_string()) {
            return Err(RegistryError::AlreadyRegistered {
                category: "object",
                name: class_name.to_string(),
            });
        }
        Ok(())
    }

    //
    // Imports, bases, forward references
    //

    pub fn register_import(&mut self, path: impl Into<String>) {
        self.imports.insert(path.into());
    }

    /// Expression for a configured base class. Dotted paths register an
    /// import and resolve to the final segment.
    pub fn reference_base(&mut self, path: &str) -> Expr {
        match path.rsplit_once('.') {
            Some((_, leaf)) => {
                let leaf = leaf.to_string();
                self.register_import(path.to_string());
                Expr::name(&leaf)
            }
            None => Expr::name(path),
        }
    }

    /// All registered imports as sorted, grouped statements.
    pub fn import_statements(&self) -> Vec<Stmt> {
        import_statements(self.imports.iter().map(String::as_str))
    }

    /// `model_rebuild()` calls for every class referenced through a
    /// string annotation, sorted by class name.
    pub fn forward_ref_statements(&self) -> Vec<Stmt> {
        self.forward_references
            .iter()
            .map(|class_name| {
                Stmt::Expr(Expr::call(
                    Expr::attribute(Expr::name(class_name), "model_rebuild"),
                    vec![],
                    vec![],
                ))
            })
            .collect()
    }
}
