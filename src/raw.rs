//! Raw metadata document
//!
//! Deserialization model of the document produced by the data-access client
//! generator. Arguments may offer several candidate input types and type
//! references may be nested descriptor objects; both are resolved by
//! [`crate::transform`].

use serde::{Deserialize, Deserializer, Serialize};

use crate::types::{DatamodelEnum, Extra, Mapping, SchemaEnum, TypeKind};

#[derive(Debug, Clone, Deserialize)]
pub struct RawDocument {
    pub datamodel: RawDatamodel,
    pub schema: RawSchema,
    #[serde(default)]
    pub mappings: Vec<Mapping>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawDatamodel {
    #[serde(default)]
    pub enums: Vec<DatamodelEnum>,
    pub models: Vec<RawModel>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawModel {
    pub name: String,
    pub fields: Vec<RawModelField>,
    #[serde(flatten)]
    pub extra: Extra,
}

/// Field kind as emitted by the generator; `object` marks a relation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum RawFieldKind {
    Scalar,
    Object,
    Enum,
    Unsupported,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawModelField {
    pub name: String,
    pub kind: RawFieldKind,
    #[serde(rename = "type")]
    pub type_name: String,
    #[serde(default)]
    pub is_list: bool,
    #[serde(default)]
    pub is_required: bool,
    #[serde(flatten)]
    pub extra: Extra,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawSchema {
    #[serde(default)]
    pub enums: Vec<SchemaEnum>,
    #[serde(default)]
    pub input_types: Vec<RawInputType>,
    #[serde(default)]
    pub output_types: Vec<RawOutputType>,
    #[serde(flatten)]
    pub extra: Extra,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawInputType {
    pub name: String,
    pub fields: Vec<RawSchemaArg>,
    #[serde(flatten)]
    pub extra: Extra,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawSchemaArg {
    pub name: String,
    pub input_type: InputVariants,
    #[serde(default)]
    pub is_relation_filter: Option<bool>,
}

/// One candidate input type of an argument
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawInputVariant {
    #[serde(rename = "type")]
    pub type_ref: TypeRef,
    pub kind: TypeKind,
    #[serde(default)]
    pub is_required: bool,
    #[serde(default)]
    pub is_list: bool,
    #[serde(flatten)]
    pub extra: Extra,
}

/// Ordered, non-empty list of candidate input types
///
/// Accepts either a JSON array or a single variant object.
#[derive(Debug, Clone)]
pub struct InputVariants(Vec<RawInputVariant>);

impl InputVariants {
    /// `None` when `variants` is empty
    pub fn new(variants: Vec<RawInputVariant>) -> Option<Self> {
        if variants.is_empty() {
            None
        } else {
            Some(Self(variants))
        }
    }

    pub fn as_slice(&self) -> &[RawInputVariant] {
        &self.0
    }

    pub fn first(&self) -> &RawInputVariant {
        &self.0[0]
    }
}

impl<'de> Deserialize<'de> for InputVariants {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum OneOrMany {
            Many(Vec<RawInputVariant>),
            One(RawInputVariant),
        }

        let variants = match OneOrMany::deserialize(deserializer)? {
            OneOrMany::Many(variants) => variants,
            OneOrMany::One(variant) => vec![variant],
        };
        InputVariants::new(variants)
            .ok_or_else(|| serde::de::Error::custom("argument declares no input type"))
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawOutputType {
    pub name: String,
    pub fields: Vec<RawOutputField>,
    #[serde(flatten)]
    pub extra: Extra,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawOutputField {
    pub name: String,
    #[serde(default)]
    pub args: Vec<RawSchemaArg>,
    pub output_type: RawOutputFieldType,
    #[serde(flatten)]
    pub extra: Extra,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawOutputFieldType {
    #[serde(rename = "type")]
    pub type_ref: TypeRef,
    pub kind: TypeKind,
    #[serde(default)]
    pub is_required: bool,
    #[serde(default)]
    pub is_list: bool,
    #[serde(flatten)]
    pub extra: Extra,
}

/// Reference to a type, either by name or as an embedded descriptor
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum TypeRef {
    Name(String),
    Descriptor(TypeDescriptor),
}

/// Embedded type descriptor; only its name is meaningful here
#[derive(Debug, Clone, Deserialize)]
pub struct TypeDescriptor {
    pub name: String,
    #[serde(flatten)]
    pub rest: Extra,
}

impl TypeRef {
    pub fn name(&self) -> &str {
        match self {
            TypeRef::Name(name) => name,
            TypeRef::Descriptor(descriptor) => &descriptor.name,
        }
    }
}
