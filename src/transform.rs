//! Structural Transform
//!
//! Converts a [`RawDocument`] into the normalized [`Document`]. The pass is
//! pure: the raw document is only read, and the result depends on nothing
//! but the document and the options.

use tracing::debug;

use crate::computed::ComputedInputs;
use crate::raw::{
    InputVariants, RawDatamodel, RawDocument, RawFieldKind, RawInputType, RawInputVariant,
    RawModel, RawOutputField, RawOutputType, RawSchema, RawSchemaArg, TypeRef,
};
use crate::types::{
    Datamodel, Document, InputType, Model, ModelField, ModelFieldKind, OutputField,
    OutputFieldType, OutputType, Schema, SchemaArg, SchemaArgInputType, TypeKind,
};

/// Options for [`transform`]
#[derive(Debug, Clone, Default)]
pub struct TransformOptions {
    /// Computed inputs applied to every input type declaring a field of the same name
    pub globally_computed_inputs: ComputedInputs,
}

impl TransformOptions {
    pub fn with_globally_computed_inputs(inputs: ComputedInputs) -> Self {
        Self {
            globally_computed_inputs: inputs,
        }
    }
}

/// Normalize a raw metadata document
pub fn transform(document: &RawDocument, options: &TransformOptions) -> Document {
    let normalized = Document {
        datamodel: transform_datamodel(&document.datamodel),
        schema: transform_schema(&document.schema, options),
        mappings: document.mappings.clone(),
    };
    debug!(
        models = normalized.datamodel.models.len(),
        input_types = normalized.schema.input_types.len(),
        output_types = normalized.schema.output_types.len(),
        computed_inputs = options.globally_computed_inputs.len(),
        "transformed metadata document"
    );
    normalized
}

fn transform_datamodel(datamodel: &RawDatamodel) -> Datamodel {
    Datamodel {
        enums: datamodel.enums.clone(),
        models: datamodel.models.iter().map(transform_model).collect(),
    }
}

fn transform_model(model: &RawModel) -> Model {
    Model {
        name: model.name.clone(),
        fields: model
            .fields
            .iter()
            .map(|field| ModelField {
                name: field.name.clone(),
                kind: model_field_kind(field.kind),
                type_name: field.type_name.clone(),
                is_list: field.is_list,
                is_required: field.is_required,
                extra: field.extra.clone(),
            })
            .collect(),
        extra: model.extra.clone(),
    }
}

/// `object` becomes `relation`; every other kind is kept
pub fn model_field_kind(kind: RawFieldKind) -> ModelFieldKind {
    match kind {
        RawFieldKind::Object => ModelFieldKind::Relation,
        RawFieldKind::Scalar => ModelFieldKind::Scalar,
        RawFieldKind::Enum => ModelFieldKind::Enum,
        RawFieldKind::Unsupported => ModelFieldKind::Unsupported,
    }
}

fn transform_schema(schema: &RawSchema, options: &TransformOptions) -> Schema {
    Schema {
        enums: schema.enums.clone(),
        input_types: schema
            .input_types
            .iter()
            .map(|input_type| transform_input_type(input_type, &options.globally_computed_inputs))
            .collect(),
        output_types: schema.output_types.iter().map(transform_output_type).collect(),
        extra: schema.extra.clone(),
    }
}

fn transform_output_type(output_type: &RawOutputType) -> OutputType {
    OutputType {
        name: output_type.name.clone(),
        fields: output_type.fields.iter().map(transform_output_field).collect(),
        extra: output_type.extra.clone(),
    }
}

fn transform_output_field(field: &RawOutputField) -> OutputField {
    OutputField {
        name: field.name.clone(),
        args: field.args.iter().map(transform_arg).collect(),
        output_type: OutputFieldType {
            type_name: return_type_name(&field.output_type.type_ref).to_string(),
            kind: field.output_type.kind,
            is_required: field.output_type.is_required,
            is_list: field.output_type.is_list,
            extra: field.output_type.extra.clone(),
        },
        extra: field.extra.clone(),
    }
}

/// Plain name of a type reference, whether given by name or as a descriptor
pub fn return_type_name(type_ref: &TypeRef) -> &str {
    type_ref.name()
}

/// Pick the single input type an argument is published with.
///
/// Arguments can't be union-typed in the target API, so one candidate is
/// chosen: the first enum, else the first object, else the first candidate.
pub fn choose_input_variant(variants: &InputVariants) -> &RawInputVariant {
    let candidates = variants.as_slice();
    candidates
        .iter()
        .find(|v| v.kind == TypeKind::Enum)
        .or_else(|| candidates.iter().find(|v| v.kind == TypeKind::Object))
        .unwrap_or_else(|| variants.first())
}

/// Reduce an argument to its chosen input type
pub fn transform_arg(arg: &RawSchemaArg) -> SchemaArg {
    let chosen = choose_input_variant(&arg.input_type);
    SchemaArg {
        name: arg.name.clone(),
        input_type: SchemaArgInputType {
            type_name: return_type_name(&chosen.type_ref).to_string(),
            kind: chosen.kind,
            is_required: chosen.is_required,
            is_list: chosen.is_list,
            extra: chosen.extra.clone(),
        },
        // meaningless once the candidates are collapsed
        is_relation_filter: None,
    }
}

/// Attach applicable global computed inputs and hide their fields.
///
/// Resolver-level computed inputs are not handled here; they are evaluated
/// per call by [`crate::engine::add_computed_inputs`].
pub fn transform_input_type(
    input_type: &RawInputType,
    globally_computed_inputs: &ComputedInputs,
) -> InputType {
    let computed_inputs = globally_computed_inputs
        .restrict_to(|name| input_type.fields.iter().any(|field| field.name == name));

    InputType {
        name: input_type.name.clone(),
        fields: input_type
            .fields
            .iter()
            .filter(|field| !globally_computed_inputs.contains(&field.name))
            .map(transform_arg)
            .collect(),
        computed_inputs,
        extra: input_type.extra.clone(),
    }
}
