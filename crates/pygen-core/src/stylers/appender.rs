use serde::Deserialize;
use serde::Serialize;

use super::Styler;

/// Appends a configurable suffix per class category, e.g. turning
/// operation `GetUser` into class `GetUserQuery`.
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct Appender {
    pub append_enum: Option<String>,
    pub append_input: Option<String>,
    pub append_fragment: Option<String>,
    pub append_query: Option<String>,
    pub append_mutation: Option<String>,
    pub append_subscription: Option<String>,
}

fn append(name: String, suffix: &Option<String>) -> String {
    match suffix {
        Some(suffix) => format!("{name}{suffix}"),
        None => name,
    }
}

impl Styler for Appender {
    fn style_enum_name(&self, name: String) -> String {
        append(name, &self.append_enum)
    }

    fn style_input_name(&self, name: String) -> String {
        append(name, &self.append_input)
    }

    fn style_fragment_name(&self, name: String) -> String {
        append(name, &self.append_fragment)
    }

    fn style_query_name(&self, name: String) -> String {
        append(name, &self.append_query)
    }

    fn style_mutation_name(&self, name: String) -> String {
        append(name, &self.append_mutation)
    }

    fn style_subscription_name(&self, name: String) -> String {
        append(name, &self.append_subscription)
    }
}
