//! Naming conventions applied to generated identifiers.
//!
//! Stylers are chained: each one receives the output of the previous, so a
//! config can e.g. capitalize class names and then append a suffix.

mod appender;
mod capitalizer;
mod snake_case;

use serde::Deserialize;
use serde::Serialize;

pub use appender::Appender;
pub use capitalizer::Capitalizer;
pub use snake_case::SnakeCase;

/// A naming convention. Every hook defaults to the identity so a styler
/// only overrides the names it cares about.
pub trait Styler {
    fn style_enum_name(&self, name: String) -> String {
        name
    }

    fn style_input_name(&self, name: String) -> String {
        name
    }

    fn style_object_name(&self, name: String) -> String {
        name
    }

    fn style_fragment_name(&self, name: String) -> String {
        name
    }

    fn style_query_name(&self, name: String) -> String {
        name
    }

    fn style_mutation_name(&self, name: String) -> String {
        name
    }

    fn style_subscription_name(&self, name: String) -> String {
        name
    }

    /// Attribute name for a selected field.
    fn style_node_name(&self, name: String) -> String {
        name
    }

    /// Attribute name for an operation variable.
    fn style_parameter_name(&self, name: String) -> String {
        name
    }
}

/// Serializable styler selection, as it appears in config files.
#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum StylerKind {
    Capitalizer,
    SnakeCase,
    Appender(Appender),
}

impl StylerKind {
    pub fn build(&self) -> Box<dyn Styler> {
        match self {
            StylerKind::Capitalizer => Box::new(Capitalizer),
            StylerKind::SnakeCase => Box::new(SnakeCase),
            StylerKind::Appender(appender) => Box::new(appender.clone()),
        }
    }
}
