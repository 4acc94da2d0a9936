use convert_case::Case;
use convert_case::Casing;

use super::Styler;

/// Converts attribute names (selected fields, operation variables) to
/// `snake_case`. Class names are left untouched.
pub struct SnakeCase;

impl Styler for SnakeCase {
    fn style_node_name(&self, name: String) -> String {
        name.to_case(Case::Snake)
    }

    fn style_parameter_name(&self, name: String) -> String {
        name.to_case(Case::Snake)
    }
}
