use indexmap::IndexMap;
use serde::Deserialize;
use serde::Serialize;

use crate::stylers::StylerKind;

/// Configuration for a generation run.
///
/// Every field has a sensible default so a minimal config file only needs
/// to point at the schema and documents it wants compiled.
#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(default)]
pub struct GeneratorConfig {
    /// Value written into each operation's `Meta.domain` attribute.
    pub domain: Option<String>,

    /// Base classes for generated selection (object) classes.
    pub object_bases: Vec<String>,

    /// Base classes for interface mother classes. Falls back to
    /// `object_bases` when unset.
    pub interface_bases: Option<Vec<String>>,

    /// Base classes for generated input object classes.
    pub input_bases: Vec<String>,

    /// Base classes for generated fragment classes.
    pub fragment_bases: Vec<String>,

    /// Base classes for generated operation classes.
    pub operation_bases: Vec<String>,

    /// Custom scalar mappings, e.g. `Datetime -> datetime.datetime`.
    /// Dotted values cause the owning module to be imported.
    pub scalar_definitions: IndexMap<String, String>,

    /// Extra base classes keyed by schema type name, appended after the
    /// category bases.
    pub additional_bases: IndexMap<String, Vec<String>>,

    /// Immutability settings for generated classes.
    pub freeze: FreezeConfig,

    /// Expand every interface selection into per-implementation classes
    /// even when the selection carries no inline fragments.
    pub always_resolve_interfaces: bool,

    /// Emit a `...Catch` class for interface fragments that pins
    /// `typename` to the interface name and catches unknown members.
    pub create_catchall: bool,

    /// Emit string annotations plus a `model_rebuild()` post-pass instead
    /// of relying on definition order alone.
    pub allow_forward_references: bool,

    /// Skip generating enums that no document references.
    pub skip_unreferenced: bool,

    /// Skip schema types whose names start with `_` or `__`.
    pub skip_underscore: bool,

    /// Naming conventions applied, in order, to generated identifiers.
    pub stylers: Vec<StylerKind>,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        GeneratorConfig {
            domain: None,
            object_bases: vec!["pydantic.BaseModel".to_string()],
            interface_bases: None,
            input_bases: vec!["pydantic.BaseModel".to_string()],
            fragment_bases: vec!["pydantic.BaseModel".to_string()],
            operation_bases: vec!["pydantic.BaseModel".to_string()],
            scalar_definitions: IndexMap::new(),
            additional_bases: IndexMap::new(),
            freeze: FreezeConfig::default(),
            always_resolve_interfaces: true,
            create_catchall: true,
            allow_forward_references: true,
            skip_unreferenced: true,
            skip_underscore: true,
            stylers: vec![StylerKind::Capitalizer, StylerKind::SnakeCase],
        }
    }
}

impl GeneratorConfig {
    pub fn interface_bases(&self) -> &[String] {
        self.interface_bases.as_deref().unwrap_or(&self.object_bases)
    }

    /// Extra bases configured for the given schema type, if any.
    pub fn additional_bases_for(&self, type_name: &str) -> &[String] {
        self.additional_bases
            .get(type_name)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }
}

/// Which generated classes get `model_config = ConfigDict(frozen=True)`.
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct FreezeConfig {
    pub enabled: bool,

    /// Class categories to freeze when enabled.
    pub kinds: Vec<GraphQLKind>,

    /// Only freeze classes generated for these type names. Empty means all.
    pub include: Vec<String>,

    /// Never freeze classes generated for these type names.
    pub exclude: Vec<String>,

    /// Rewrite `List[...]` annotations to `Tuple[..., ...]` on frozen
    /// classes so instances stay hashable.
    pub convert_list_to_tuple: bool,
}

impl FreezeConfig {
    /// Whether the class generated for `type_name` in `kind` should be
    /// frozen.
    pub fn applies_to(&self, kind: GraphQLKind, type_name: &str) -> bool {
        if !self.enabled || !self.kinds.contains(&kind) {
            return false;
        }
        if self.exclude.iter().any(|name| name == type_name) {
            return false;
        }
        self.include.is_empty() || self.include.iter().any(|name| name == type_name)
    }
}

/// Categories of generated classes, used to scope freeze settings.
#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum GraphQLKind {
    Enum,
    Fragment,
    Input,
    Object,
    Operation,
}

#[cfg(test)]
mod tests {
    use super::GeneratorConfig;
    use super::GraphQLKind;

    #[test]
    fn defaults_parse_from_an_empty_document() {
        let config: GeneratorConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config.object_bases, vec!["pydantic.BaseModel"]);
        assert!(config.always_resolve_interfaces);
        assert!(config.create_catchall);
        assert!(!config.freeze.enabled);
    }

    #[test]
    fn freeze_include_and_exclude_scope_by_type_name() {
        let config: GeneratorConfig = serde_json::from_str(
            r#"{
                "freeze": {
                    "enabled": true,
                    "kinds": ["input"],
                    "exclude": ["SearchFilter"]
                }
            }"#,
        )
        .unwrap();
        assert!(config.freeze.applies_to(GraphQLKind::Input, "CreateUserInput"));
        assert!(!config.freeze.applies_to(GraphQLKind::Input, "SearchFilter"));
        assert!(!config.freeze.applies_to(GraphQLKind::Object, "CreateUserInput"));
    }
}
