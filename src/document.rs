//! Document Index
//!
//! Name-keyed lookups over a normalized [`Document`]. The index is built once
//! per schema build and is read-only afterwards, so it can be shared across
//! concurrent request handlers without locking.
//!
//! Schema generation needs one piece of mutable bookkeeping: which types it
//! actually emitted. That happens through a [`DocumentBuilder`], which is
//! consumed by [`DocumentBuilder::finish`] before the document is served.

use std::collections::{BTreeSet, HashMap};

use tracing::debug;

use crate::checksum::Checksum;
use crate::error::{DmmfError, LookupKind, Result};
use crate::types::{DatamodelEnum, Document, InputType, Mapping, Model, OutputType, SchemaEnum};
use crate::utils::index_by;

/// Indexed, immutable view of a normalized metadata document
#[derive(Debug, Clone)]
pub struct DmmfDocument {
    document: Document,
    models: HashMap<String, usize>,
    datamodel_enums: HashMap<String, usize>,
    schema_enums: HashMap<String, usize>,
    input_types: HashMap<String, usize>,
    output_types: HashMap<String, usize>,
    mappings: HashMap<String, usize>,
    source_checksum: Option<Checksum>,
    emitted: BTreeSet<String>,
}

impl DmmfDocument {
    /// Index a normalized document
    pub fn new(document: Document) -> Self {
        let models = index_by("models", &document.datamodel.models, |m| m.name.as_str());
        let datamodel_enums = index_by("datamodel enums", &document.datamodel.enums, |e| e.name.as_str());
        let schema_enums = index_by("schema enums", &document.schema.enums, |e| e.name.as_str());
        let input_types = index_by("input types", &document.schema.input_types, |t| t.name.as_str());
        let output_types = index_by("output types", &document.schema.output_types, |t| t.name.as_str());
        let mappings = index_by("mappings", &document.mappings, |m| m.model.as_str());

        debug!(
            models = models.len(),
            enums = schema_enums.len() + datamodel_enums.len(),
            input_types = input_types.len(),
            output_types = output_types.len(),
            "indexed metadata document"
        );

        Self {
            document,
            models,
            datamodel_enums,
            schema_enums,
            input_types,
            output_types,
            mappings,
            source_checksum: None,
            emitted: BTreeSet::new(),
        }
    }

    /// Index a document and remember the checksum of the text it came from
    pub fn with_checksum(document: Document, checksum: Checksum) -> Self {
        let mut index = Self::new(document);
        index.source_checksum = Some(checksum);
        index
    }

    /// Start the build phase, during which emitted types are recorded
    pub fn builder(document: Document) -> DocumentBuilder {
        DocumentBuilder::new(Self::new(document))
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn source_checksum(&self) -> Option<&Checksum> {
        self.source_checksum.as_ref()
    }

    // --- Lookups ---

    pub fn model(&self, name: &str) -> Result<&Model> {
        lookup(&self.models, &self.document.datamodel.models, LookupKind::Model, name)
    }

    /// Enum of the operation schema, the set arguments are generated from
    pub fn enum_type(&self, name: &str) -> Result<&SchemaEnum> {
        lookup(&self.schema_enums, &self.document.schema.enums, LookupKind::Enum, name)
    }

    pub fn datamodel_enum(&self, name: &str) -> Result<&DatamodelEnum> {
        lookup(&self.datamodel_enums, &self.document.datamodel.enums, LookupKind::Enum, name)
    }

    pub fn input_type(&self, name: &str) -> Result<&InputType> {
        lookup(&self.input_types, &self.document.schema.input_types, LookupKind::InputType, name)
    }

    pub fn output_type(&self, name: &str) -> Result<&OutputType> {
        lookup(&self.output_types, &self.document.schema.output_types, LookupKind::OutputType, name)
    }

    /// Operation to resolver mapping of a model
    pub fn mapping(&self, model_name: &str) -> Result<&Mapping> {
        lookup(&self.mappings, &self.document.mappings, LookupKind::Mapping, model_name)
    }

    pub fn has_model(&self, name: &str) -> bool {
        self.models.contains_key(name)
    }

    pub fn has_enum(&self, name: &str) -> bool {
        self.schema_enums.contains_key(name) || self.datamodel_enums.contains_key(name)
    }

    pub fn has_input_type(&self, name: &str) -> bool {
        self.input_types.contains_key(name)
    }

    pub fn has_output_type(&self, name: &str) -> bool {
        self.output_types.contains_key(name)
    }

    // --- Collections ---

    pub fn models(&self) -> impl Iterator<Item = &Model> {
        self.document.datamodel.models.iter()
    }

    pub fn input_types(&self) -> impl Iterator<Item = &InputType> {
        self.document.schema.input_types.iter()
    }

    pub fn output_types(&self) -> impl Iterator<Item = &OutputType> {
        self.document.schema.output_types.iter()
    }

    pub fn mappings(&self) -> impl Iterator<Item = &Mapping> {
        self.document.mappings.iter()
    }

    // --- Emission results (recorded by the builder) ---

    /// Types recorded as emitted during the build, sorted
    pub fn emitted_types(&self) -> impl Iterator<Item = &str> {
        self.emitted.iter().map(String::as_str)
    }

    pub fn is_emitted(&self, name: &str) -> bool {
        self.emitted.contains(name)
    }

    /// Models that were never emitted as API types, in datamodel order
    pub fn missing_types(&self) -> Vec<&str> {
        self.models()
            .map(|m| m.name.as_str())
            .filter(|name| !self.emitted.contains(*name))
            .collect()
    }
}

fn lookup<'a, T>(
    index: &HashMap<String, usize>,
    items: &'a [T],
    kind: LookupKind,
    name: &str,
) -> Result<&'a T> {
    index
        .get(name)
        .and_then(|&position| items.get(position))
        .ok_or_else(|| DmmfError::not_found(kind, name))
}

/// Build-phase wrapper around a [`DmmfDocument`] that records emitted types
#[derive(Debug)]
pub struct DocumentBuilder {
    index: DmmfDocument,
    emitted: BTreeSet<String>,
}

impl DocumentBuilder {
    pub fn new(index: DmmfDocument) -> Self {
        let emitted = index.emitted.clone();
        Self { index, emitted }
    }

    /// Read access to the index while building
    pub fn index(&self) -> &DmmfDocument {
        &self.index
    }

    /// Record that a type was emitted; returns false if it already was
    pub fn record_emitted(&mut self, name: impl Into<String>) -> bool {
        self.emitted.insert(name.into())
    }

    pub fn is_emitted(&self, name: &str) -> bool {
        self.emitted.contains(name)
    }

    /// End the build phase, freezing the emitted set into the index
    pub fn finish(self) -> DmmfDocument {
        let mut index = self.index;
        debug!(emitted = self.emitted.len(), "finished schema build bookkeeping");
        index.emitted = self.emitted;
        index
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Datamodel, Schema};
    use serde_json::Map;

    fn document_with_models(names: &[&str]) -> Document {
        Document {
            datamodel: Datamodel {
                enums: Vec::new(),
                models: names
                    .iter()
                    .map(|name| Model {
                        name: name.to_string(),
                        fields: Vec::new(),
                        extra: Map::new(),
                    })
                    .collect(),
            },
            schema: Schema {
                enums: Vec::new(),
                input_types: Vec::new(),
                output_types: Vec::new(),
                extra: Map::new(),
            },
            mappings: Vec::new(),
        }
    }

    #[test]
    fn test_model_lookup() {
        let index = DmmfDocument::new(document_with_models(&["User", "Post"]));
        assert_eq!(index.model("Post").unwrap().name, "Post");
        assert!(index.has_model("User"));
    }

    #[test]
    fn test_missing_name_is_lookup_fault() {
        let index = DmmfDocument::new(document_with_models(&["User"]));
        match index.input_type("UserCreateInput") {
            Err(DmmfError::NotFound { kind, name }) => {
                assert_eq!(kind, LookupKind::InputType);
                assert_eq!(name, "UserCreateInput");
            }
            other => panic!("Expected NotFound, got {:?}", other),
        }
    }

    #[test]
    fn test_builder_records_emitted_types() {
        let mut builder = DmmfDocument::builder(document_with_models(&["User", "Post"]));
        assert!(builder.record_emitted("Post"));
        assert!(!builder.record_emitted("Post"));
        assert!(builder.index().has_model("User"));

        let index = builder.finish();
        assert!(index.is_emitted("Post"));
        assert_eq!(index.missing_types(), vec!["User"]);
        assert_eq!(index.emitted_types().collect::<Vec<_>>(), vec!["Post"]);
    }

    #[test]
    fn test_index_is_shareable_across_threads() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<DmmfDocument>();
    }
}
