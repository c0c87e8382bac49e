//! Normalized metadata document
//!
//! The shape every consumer works with after [`crate::transform`]:
//! - model fields pointing at other models have kind [`ModelFieldKind::Relation`]
//! - every type reference is a plain name
//! - every argument has exactly one input type
//! - input types carry their globally computed inputs, and those fields are
//!   no longer listed as user-facing fields

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::computed::ComputedInputs;

/// Keys a struct does not interpret, kept verbatim
pub type Extra = Map<String, Value>;

/// Kind of a type variant in the operation schema
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TypeKind {
    Scalar,
    Object,
    Enum,
}

/// Kind of a model field after normalization
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ModelFieldKind {
    Scalar,
    Relation,
    Enum,
    Unsupported,
}

#[derive(Debug, Clone, Serialize)]
pub struct Document {
    pub datamodel: Datamodel,
    pub schema: Schema,
    pub mappings: Vec<Mapping>,
}

// =============================================================================
// Datamodel
// =============================================================================

#[derive(Debug, Clone, Serialize)]
pub struct Datamodel {
    pub enums: Vec<DatamodelEnum>,
    pub models: Vec<Model>,
}

#[derive(Debug, Clone, Serialize)]
pub struct Model {
    pub name: String,
    pub fields: Vec<ModelField>,
    #[serde(flatten)]
    pub extra: Extra,
}

impl Model {
    pub fn field(&self, name: &str) -> Option<&ModelField> {
        self.fields.iter().find(|f| f.name == name)
    }
}

/// Model field; everything but `kind` is kept as the generator wrote it

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ModelField {
    pub name: String,
    pub kind: ModelFieldKind,
    /// Scalar, enum or related model name
    #[serde(rename = "type")]
    pub type_name: String,
    pub is_list: bool,
    pub is_required: bool,
    #[serde(flatten)]
    pub extra: Extra,
}

impl ModelField {
    /// Name of the relation a relation field belongs to
    pub fn relation_name(&self) -> Option<&str> {
        self.extra.get("relationName").and_then(Value::as_str)
    }
}

/// Enum declared in the datamodel; passed through unchanged
///
/// Generators emit values either as plain strings or as objects with a
/// `name` (plus `dbName` and friends), so values are kept as written.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatamodelEnum {
    pub name: String,
    pub values: Vec<Value>,
    #[serde(flatten)]
    pub extra: Extra,
}

impl DatamodelEnum {
    /// Value names, whichever form each value was written in
    pub fn value_names(&self) -> impl Iterator<Item = &str> {
        self.values.iter().filter_map(|value| match value {
            Value::String(name) => Some(name.as_str()),
            Value::Object(fields) => fields.get("name").and_then(Value::as_str),
            _ => None,
        })
    }
}

// =============================================================================
// Operation schema
// =============================================================================

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Schema {
    pub enums: Vec<SchemaEnum>,
    pub input_types: Vec<InputType>,
    pub output_types: Vec<OutputType>,
    /// `rootQueryType`, `rootMutationType` and anything else, kept verbatim
    #[serde(flatten)]
    pub extra: Extra,
}

impl Schema {
    pub fn root_query_type(&self) -> Option<&str> {
        self.extra.get("rootQueryType").and_then(Value::as_str)
    }

    pub fn root_mutation_type(&self) -> Option<&str> {
        self.extra.get("rootMutationType").and_then(Value::as_str)
    }
}

/// Enum declared in the operation schema; passed through unchanged
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SchemaEnum {
    pub name: String,
    pub values: Vec<String>,
    #[serde(flatten)]
    pub extra: Extra,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InputType {
    pub name: String,
    pub fields: Vec<SchemaArg>,
    /// Globally computed inputs that apply to this type's own fields
    pub computed_inputs: ComputedInputs,
    #[serde(flatten)]
    pub extra: Extra,
}

impl InputType {
    pub fn field(&self, name: &str) -> Option<&SchemaArg> {
        self.fields.iter().find(|f| f.name == name)
    }
}

/// An argument or input field, reduced to a single input type
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SchemaArg {
    pub name: String,
    pub input_type: SchemaArgInputType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_relation_filter: Option<bool>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SchemaArgInputType {
    #[serde(rename = "type")]
    pub type_name: String,
    pub kind: TypeKind,
    pub is_required: bool,
    pub is_list: bool,
    #[serde(flatten)]
    pub extra: Extra,
}

#[derive(Debug, Clone, Serialize)]
pub struct OutputType {
    pub name: String,
    pub fields: Vec<OutputField>,
    #[serde(flatten)]
    pub extra: Extra,
}

impl OutputType {
    pub fn field(&self, name: &str) -> Option<&OutputField> {
        self.fields.iter().find(|f| f.name == name)
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OutputField {
    pub name: String,
    pub args: Vec<SchemaArg>,
    pub output_type: OutputFieldType,
    #[serde(flatten)]
    pub extra: Extra,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OutputFieldType {
    #[serde(rename = "type")]
    pub type_name: String,
    pub kind: TypeKind,
    pub is_required: bool,
    pub is_list: bool,
    #[serde(flatten)]
    pub extra: Extra,
}

// =============================================================================
// Mappings
// =============================================================================

/// Keys of a mapping entry that name the model rather than an operation
const MAPPING_NAME_KEYS: &[&str] = &["plural"];

/// Operation name to resolver name for one model, e.g. `findOne -> findOneUser`
///
/// Besides operations an entry carries naming keys such as `plural`; all keys
/// are kept verbatim in `entries`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Mapping {
    pub model: String,
    #[serde(flatten)]
    pub entries: Map<String, Value>,
}

impl Mapping {
    /// Resolver name for an operation, if the model exposes it
    pub fn resolver(&self, operation: &str) -> Option<&str> {
        if MAPPING_NAME_KEYS.contains(&operation) {
            return None;
        }
        self.entries.get(operation).and_then(Value::as_str)
    }

    /// Exposed operations and their resolvers, in document order
    pub fn operations(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .filter(|(key, _)| !MAPPING_NAME_KEYS.contains(&key.as_str()))
            .filter_map(|(operation, resolver)| Some((operation.as_str(), resolver.as_str()?)))
    }

    /// Plural name of the model, when the generator provides one
    pub fn plural(&self) -> Option<&str> {
        self.entries.get("plural").and_then(Value::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_mapping_resolver_lookup() {
        let mapping: Mapping = serde_json::from_value(json!({
            "model": "User",
            "findOne": "findOneUser",
            "aggregate": null,
        }))
        .unwrap();
        assert_eq!(mapping.resolver("findOne"), Some("findOneUser"));
        assert_eq!(mapping.resolver("aggregate"), None);
        assert_eq!(mapping.resolver("upsert"), None);
    }

    #[test]
    fn test_plural_is_not_an_operation() {
        let mapping: Mapping = serde_json::from_value(json!({
            "model": "User",
            "plural": "users",
            "findOne": "findOneUser",
            "delete": null,
            "create": "createOneUser",
        }))
        .unwrap();
        assert_eq!(mapping.resolver("plural"), None);
        assert_eq!(mapping.plural(), Some("users"));
        assert_eq!(
            mapping.operations().collect::<Vec<_>>(),
            vec![("findOne", "findOneUser"), ("create", "createOneUser")]
        );
        assert_eq!(serde_json::to_value(&mapping).unwrap()["plural"], json!("users"));
    }

    #[test]
    fn test_enum_value_names_accept_both_forms() {
        let datamodel_enum: DatamodelEnum = serde_json::from_value(json!({
            "name": "Role",
            "values": ["ADMIN", { "name": "USER", "dbName": null }],
        }))
        .unwrap();
        assert_eq!(datamodel_enum.value_names().collect::<Vec<_>>(), vec!["ADMIN", "USER"]);
    }

    #[test]
    fn test_relation_kind_serializes_lowercase() {
        assert_eq!(
            serde_json::to_value(ModelFieldKind::Relation).unwrap(),
            json!("relation")
        );
    }
}
