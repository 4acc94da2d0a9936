use super::Styler;

/// Uppercases the first character of class-like names, leaving the rest of
/// the identifier untouched.
pub struct Capitalizer;

fn capitalize(name: String) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => name,
    }
}

impl Styler for Capitalizer {
    fn style_enum_name(&self, name: String) -> String {
        capitalize(name)
    }

    fn style_input_name(&self, name: String) -> String {
        capitalize(name)
    }

    fn style_object_name(&self, name: String) -> String {
        capitalize(name)
    }

    fn style_fragment_name(&self, name: String) -> String {
        capitalize(name)
    }

    fn style_query_name(&self, name: String) -> String {
        capitalize(name)
    }

    fn style_mutation_name(&self, name: String) -> String {
        capitalize(name)
    }

    fn style_subscription_name(&self, name: String) -> String {
        capitalize(name)
    }
}
