//! Helpers shared by the document index and schema generation

use std::collections::HashMap;
use std::fmt;

use tracing::warn;

use crate::types::{ModelField, OutputFieldType, SchemaArgInputType};

/// Index `items` by the name `key` returns, mapping each name to its position.
///
/// The first item with a given name wins; later duplicates are skipped.
pub fn index_by<T>(collection: &str, items: &[T], key: impl Fn(&T) -> &str) -> HashMap<String, usize> {
    let mut index = HashMap::with_capacity(items.len());
    for (position, item) in items.iter().enumerate() {
        let name = key(item);
        if index.contains_key(name) {
            warn!(collection, duplicate = name, "duplicate name in metadata document, keeping first");
            continue;
        }
        index.insert(name.to_string(), position);
    }
    index
}

/// How a field is declared on the generated API type
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldConfig {
    pub type_name: String,
    pub list: bool,
    pub nullable: bool,
}

impl FieldConfig {
    pub fn new(type_name: impl Into<String>, is_list: bool, is_required: bool) -> Self {
        Self {
            type_name: type_name.into(),
            list: is_list,
            nullable: !is_required,
        }
    }
}

impl From<&ModelField> for FieldConfig {
    fn from(field: &ModelField) -> Self {
        Self::new(&field.type_name, field.is_list, field.is_required)
    }
}

impl From<&SchemaArgInputType> for FieldConfig {
    fn from(input_type: &SchemaArgInputType) -> Self {
        Self::new(&input_type.type_name, input_type.is_list, input_type.is_required)
    }
}

impl From<&OutputFieldType> for FieldConfig {
    fn from(output_type: &OutputFieldType) -> Self {
        Self::new(&output_type.type_name, output_type.is_list, output_type.is_required)
    }
}

/// SDL-style rendering, e.g. `[Post!]` or `String!`
impl fmt::Display for FieldConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let bang = if self.nullable { "" } else { "!" };
        if self.list {
            write!(f, "[{}!]{}", self.type_name, bang)
        } else {
            write!(f, "{}{}", self.type_name, bang)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_index_by_keeps_first_duplicate() {
        let names = vec!["User", "Post", "User"];
        let index = index_by("models", &names, |n| *n);
        assert_eq!(index.len(), 2);
        assert_eq!(index["User"], 0);
        assert_eq!(index["Post"], 1);
    }

    #[test]
    fn test_field_config_rendering() {
        assert_eq!(FieldConfig::new("String", false, true).to_string(), "String!");
        assert_eq!(FieldConfig::new("Post", true, false).to_string(), "[Post!]");
        assert!(FieldConfig::new("Int", false, false).nullable);
    }
}
