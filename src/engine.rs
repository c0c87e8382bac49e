//! Computed Inputs Engine
//!
//! Injects computed values into the `data` argument of a mutation at request
//! time. Three sources contribute, from weakest to strongest:
//!
//! 1. globally computed inputs attached to each input type by the transform,
//!    applied at every nesting level of the submitted data
//! 2. values submitted by the caller (and their nested computed results)
//! 3. locally computed inputs declared on the resolver, applied to the
//!    top-level `data` only
//!
//! Every call works on its own freshly built value; nothing is cached.

use serde_json::{Map, Value};
use tracing::trace;

use crate::computed::{ComputedInputs, MutationResolverParams};
use crate::document::DmmfDocument;
use crate::error::{DmmfError, Result};
use crate::types::{InputType, TypeKind};

/// Arguments of [`add_computed_inputs`]
#[derive(Debug, Clone, Copy)]
pub struct AddComputedInputsParams<'a> {
    /// Input type of the mutation's `data` argument
    pub input_type: &'a InputType,
    pub params: &'a MutationResolverParams,
    pub document: &'a DmmfDocument,
    /// Resolver-level computed inputs
    pub locally_computed_inputs: &'a ComputedInputs,
}

/// Return the submitted `args` with computed values merged into `args.data`
pub fn add_computed_inputs(request: AddComputedInputsParams<'_>) -> Result<Value> {
    let AddComputedInputsParams {
        input_type,
        params,
        document,
        locally_computed_inputs,
    } = request;

    let Value::Object(args) = &params.args else {
        return Err(DmmfError::InvalidArgs(format!(
            "expected an object of arguments, got {}",
            json_kind(&params.args)
        )));
    };

    let empty = Value::Object(Map::new());
    let data = args.get("data").unwrap_or(&empty);
    check_top_level_data(data)?;

    let globally_computed = add_globally_computed_inputs(input_type, params, document, data)?;
    let locally_computed = locally_computed_inputs.evaluate(params);
    let data = merge_over(globally_computed, &locally_computed);

    let mut augmented = args.clone();
    augmented.insert("data".to_string(), data);
    Ok(Value::Object(augmented))
}

/// Recursively inject the type-level computed inputs of `input_type` into `data`.
///
/// Sequences are augmented element by element. In objects, submitted fields
/// take precedence over computed ones and fields of object kind recurse into
/// their own input type. Nested `null` and scalars are returned as-is.
pub fn add_globally_computed_inputs(
    input_type: &InputType,
    params: &MutationResolverParams,
    document: &DmmfDocument,
    data: &Value,
) -> Result<Value> {
    match data {
        Value::Array(items) => items
            .iter()
            .map(|item| add_globally_computed_inputs(input_type, params, document, item))
            .collect::<Result<Vec<_>>>()
            .map(Value::Array),
        Value::Object(submitted) => {
            trace!(input_type = %input_type.name, fields = submitted.len(), "adding computed inputs");
            let mut computed = input_type.computed_inputs.evaluate(params);

            for (field_name, value) in submitted {
                let field = input_type
                    .field(field_name)
                    .ok_or_else(|| DmmfError::UnknownField {
                        input_type: input_type.name.clone(),
                        field: field_name.clone(),
                    })?;

                let value = if field.input_type.kind == TypeKind::Object {
                    let nested_type = document.input_type(&field.input_type.type_name)?;
                    add_globally_computed_inputs(nested_type, params, document, value)?
                } else {
                    value.clone()
                };
                computed.insert(field_name.clone(), value);
            }

            Ok(Value::Object(computed))
        }
        other => Ok(other.clone()),
    }
}

/// Top-level `data` is an object or a sequence of objects; anything else
/// would leave no place for the computed values to go
fn check_top_level_data(data: &Value) -> Result<()> {
    let invalid = |value: &Value| {
        DmmfError::InvalidArgs(format!(
            "expected `data` to be an object or a list of objects, got {}",
            json_kind(value)
        ))
    };
    match data {
        Value::Object(_) => Ok(()),
        Value::Array(items) => match items.iter().find(|item| !item.is_object()) {
            Some(item) => Err(invalid(item)),
            None => Ok(()),
        },
        other => Err(invalid(other)),
    }
}

/// Merge `overrides` into every object of `data`, overrides winning
fn merge_over(data: Value, overrides: &Map<String, Value>) -> Value {
    match data {
        Value::Object(mut fields) => {
            for (key, value) in overrides {
                fields.insert(key.clone(), value.clone());
            }
            Value::Object(fields)
        }
        Value::Array(items) => Value::Array(
            items
                .into_iter()
                .map(|item| merge_over(item, overrides))
                .collect(),
        ),
        other => other,
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_merge_over_prefers_overrides() {
        let overrides: Map<String, Value> = json!({ "browser": "Safari" })
            .as_object()
            .unwrap()
            .clone();
        let merged = merge_over(json!({ "browser": "Chrome", "name": "Alice" }), &overrides);
        assert_eq!(merged, json!({ "browser": "Safari", "name": "Alice" }));
    }

    #[test]
    fn test_merge_over_applies_to_each_element() {
        let overrides: Map<String, Value> = json!({ "tenant": "acme" }).as_object().unwrap().clone();
        let merged = merge_over(json!([{ "name": "a" }, { "name": "b" }, null]), &overrides);
        assert_eq!(
            merged,
            json!([{ "name": "a", "tenant": "acme" }, { "name": "b", "tenant": "acme" }, null])
        );
    }

    #[test]
    fn test_top_level_data_must_hold_objects() {
        assert!(check_top_level_data(&json!({})).is_ok());
        assert!(check_top_level_data(&json!([{ "name": "a" }])).is_ok());
        assert!(matches!(check_top_level_data(&Value::Null), Err(DmmfError::InvalidArgs(_))));
        assert!(matches!(check_top_level_data(&json!(5)), Err(DmmfError::InvalidArgs(_))));
        assert!(matches!(
            check_top_level_data(&json!([{ "name": "a" }, "b"])),
            Err(DmmfError::InvalidArgs(_))
        ));
    }

    #[test]
    fn test_submitted_value_beats_type_level_seed() {
        let input_type = InputType {
            name: "UserCreateInput".to_string(),
            fields: vec![crate::types::SchemaArg {
                name: "browser".to_string(),
                input_type: crate::types::SchemaArgInputType {
                    type_name: "String".to_string(),
                    kind: TypeKind::Scalar,
                    is_required: true,
                    is_list: false,
                    extra: Map::new(),
                },
                is_relation_filter: None,
            }],
            computed_inputs: ComputedInputs::new().with("browser", |_| json!("Chrome")),
            extra: Map::new(),
        };
        let document = DmmfDocument::new(crate::types::Document {
            datamodel: crate::types::Datamodel {
                enums: Vec::new(),
                models: Vec::new(),
            },
            schema: crate::types::Schema {
                enums: Vec::new(),
                input_types: vec![input_type.clone()],
                output_types: Vec::new(),
                extra: Map::new(),
            },
            mappings: Vec::new(),
        });
        let params = MutationResolverParams::default();

        let augmented =
            add_globally_computed_inputs(&input_type, &params, &document, &json!({ "browser": "Lynx" }))
                .unwrap();

        assert_eq!(augmented, json!({ "browser": "Lynx" }));
    }

    #[test]
    fn test_json_kind_names() {
        assert_eq!(json_kind(&json!([1])), "an array");
        assert_eq!(json_kind(&Value::Null), "null");
    }
}
