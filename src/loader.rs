//! Metadata Loading
//!
//! Obtains the raw metadata document for a generated data-access client and
//! runs it through the transform and index. Any failure here is a load fault
//! and fatal to the schema build.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::info;

use crate::checksum::Checksum;
use crate::document::DmmfDocument;
use crate::error::{DmmfError, Result};
use crate::raw::RawDocument;
use crate::transform::{transform, TransformOptions};

/// File a client package ships its metadata document in, unless configured
pub const DEFAULT_DMMF_FILE: &str = "dmmf.json";

/// A parsed raw document together with the checksum of its source text
#[derive(Debug, Clone)]
pub struct LoadedDmmf {
    pub document: RawDocument,
    pub checksum: Checksum,
}

impl LoadedDmmf {
    /// Parse document text; `reference` names the source in errors
    pub fn from_json(reference: &str, content: &str) -> Result<Self> {
        let document = serde_json::from_str(content).map_err(|e| DmmfError::Load {
            reference: reference.to_string(),
            reason: format!("malformed metadata document: {}", e),
        })?;
        Ok(Self {
            document,
            checksum: Checksum::from_content(content),
        })
    }
}

/// Produces the raw metadata document for a client package reference
pub trait DmmfLoader {
    fn load(&self, reference: &str) -> Result<LoadedDmmf>;
}

impl<F> DmmfLoader for F
where
    F: Fn(&str) -> Result<LoadedDmmf>,
{
    fn load(&self, reference: &str) -> Result<LoadedDmmf> {
        self(reference)
    }
}

/// Reads the metadata document from a generated client package directory
#[derive(Debug, Clone)]
pub struct ClientPackageLoader {
    dmmf_file: String,
}

impl Default for ClientPackageLoader {
    fn default() -> Self {
        Self::new(DEFAULT_DMMF_FILE)
    }
}

impl ClientPackageLoader {
    pub fn new(dmmf_file: impl Into<String>) -> Self {
        Self {
            dmmf_file: dmmf_file.into(),
        }
    }

    /// Path of the metadata document inside a client package
    pub fn document_path(&self, client_package: &Path) -> PathBuf {
        client_package.join(&self.dmmf_file)
    }
}

impl DmmfLoader for ClientPackageLoader {
    fn load(&self, reference: &str) -> Result<LoadedDmmf> {
        let path = self.document_path(Path::new(reference));
        let content = fs::read_to_string(&path).map_err(|e| DmmfError::Load {
            reference: reference.to_string(),
            reason: format!("cannot read {}: {}", path.display(), e),
        })?;
        LoadedDmmf::from_json(reference, &content)
    }
}

/// Load, transform and index the metadata document of a client package
pub fn get_transformed_dmmf(
    loader: &impl DmmfLoader,
    reference: &str,
    options: &TransformOptions,
) -> Result<DmmfDocument> {
    let loaded = loader.load(reference)?;
    info!(
        reference,
        checksum = loaded.checksum.short(),
        models = loaded.document.datamodel.models.len(),
        "loaded metadata document"
    );
    let document = transform(&loaded.document, options);
    Ok(DmmfDocument::with_checksum(document, loaded.checksum))
}

#[cfg(test)]
mod tests {
    use super::*;

    const MINIMAL: &str = r#"{
        "datamodel": { "enums": [], "models": [] },
        "schema": { "enums": [], "inputTypes": [], "outputTypes": [] },
        "mappings": []
    }"#;

    #[test]
    fn test_client_package_loader_reads_document() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join(DEFAULT_DMMF_FILE), MINIMAL).unwrap();

        let loader = ClientPackageLoader::default();
        let index = get_transformed_dmmf(
            &loader,
            dir.path().to_str().unwrap(),
            &TransformOptions::default(),
        )
        .unwrap();

        assert_eq!(index.models().count(), 0);
        assert_eq!(index.source_checksum(), Some(&Checksum::from_content(MINIMAL)));
    }

    #[test]
    fn test_missing_package_is_load_fault() {
        let dir = tempfile::tempdir().unwrap();
        let loader = ClientPackageLoader::new("missing.json");
        let err = loader.load(dir.path().to_str().unwrap()).unwrap_err();
        assert!(matches!(err, DmmfError::Load { .. }));
    }

    #[test]
    fn test_malformed_root_is_load_fault() {
        let err = LoadedDmmf::from_json("inline", r#"{ "datamodel": [] }"#).unwrap_err();
        assert!(matches!(err, DmmfError::Load { .. }));
    }

    #[test]
    fn test_closure_loader() {
        let loader = |reference: &str| LoadedDmmf::from_json(reference, MINIMAL);
        let loaded = loader.load("memory").unwrap();
        assert!(loaded.document.schema.input_types.is_empty());
    }
}
