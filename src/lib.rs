//! Data-model metadata documents
//!
//! Loads the metadata document a data-access client generator emits (models,
//! fields, enums and the generated CRUD operation schema), normalizes it, and
//! indexes it for API schema generation. At request time the computed-inputs
//! engine fills in mutation arguments derived from the request.
//!
//! ## Features
//!
//! - **Normalization**: relation fields are marked `relation`, type references
//!   become plain names, union-typed arguments collapse to one input type
//! - **Indexing**: name lookups over models, enums, input and output types
//! - **Computed Inputs**: global (per input type) and resolver-level values
//!   injected into nested mutation data
//!
//! ## Architecture
//!
//! ```text
//! client package ──► loader ──► RawDocument
//!                                  │ transform (+ global computed inputs)
//!                                  ▼
//!                              Document ──► DmmfDocument (index)
//!                                                 │
//!             mutation request ──► engine ◄───────┘
//! ```

pub mod checksum;
pub mod computed;
pub mod config;
pub mod document;
pub mod engine;
pub mod error;
pub mod loader;
pub mod raw;
pub mod transform;
pub mod types;
pub mod utils;

pub use checksum::Checksum;
pub use computed::{ComputedInputFn, ComputedInputs, MutationResolverParams};
pub use config::DmmfConfig;
pub use document::{DmmfDocument, DocumentBuilder};
pub use engine::{add_computed_inputs, add_globally_computed_inputs, AddComputedInputsParams};
pub use error::{DmmfError, LookupKind, Result};
pub use loader::{get_transformed_dmmf, ClientPackageLoader, DmmfLoader, LoadedDmmf};
pub use raw::RawDocument;
pub use transform::{transform, TransformOptions};
pub use types::Document;
