//! Computed inputs
//!
//! A computed input is an argument the data-access layer needs but the API
//! never exposes: its value is derived from the request (root value,
//! submitted arguments and context) each time a mutation resolves.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use serde::{Serialize, Serializer};
use serde_json::{Map, Value};

/// The resolved request a computed input is evaluated against
#[derive(Debug, Clone, Default)]
pub struct MutationResolverParams {
    /// Parent value handed to the resolver
    pub root: Value,
    /// Submitted arguments; mutations carry their payload under `data`
    pub args: Value,
    /// Caller-supplied request context, never inspected by this crate
    pub ctx: Value,
}

impl MutationResolverParams {
    pub fn new(root: Value, args: Value, ctx: Value) -> Self {
        Self { root, args, ctx }
    }
}

/// Function producing the value of one computed input
pub type ComputedInputFn = Arc<dyn Fn(&MutationResolverParams) -> Value + Send + Sync>;

/// Field name to value-producing function
#[derive(Clone, Default)]
pub struct ComputedInputs {
    inputs: BTreeMap<String, ComputedInputFn>,
}

impl ComputedInputs {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert
    pub fn with<F>(mut self, name: impl Into<String>, compute: F) -> Self
    where
        F: Fn(&MutationResolverParams) -> Value + Send + Sync + 'static,
    {
        self.insert(name, compute);
        self
    }

    pub fn insert<F>(&mut self, name: impl Into<String>, compute: F)
    where
        F: Fn(&MutationResolverParams) -> Value + Send + Sync + 'static,
    {
        self.inputs.insert(name.into(), Arc::new(compute));
    }

    pub fn contains(&self, name: &str) -> bool {
        self.inputs.contains_key(name)
    }

    /// Names of all computed inputs, sorted
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.inputs.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.inputs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inputs.is_empty()
    }

    /// Keep only the inputs whose name satisfies `keep`
    pub fn restrict_to(&self, mut keep: impl FnMut(&str) -> bool) -> Self {
        let inputs = self
            .inputs
            .iter()
            .filter(|(name, _)| keep(name))
            .map(|(name, compute)| (name.clone(), Arc::clone(compute)))
            .collect();
        Self { inputs }
    }

    /// Evaluate every computed input against `params`
    pub fn evaluate(&self, params: &MutationResolverParams) -> Map<String, Value> {
        self.inputs
            .iter()
            .map(|(name, compute)| (name.clone(), compute(params)))
            .collect()
    }
}

impl fmt::Debug for ComputedInputs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.names()).finish()
    }
}

/// Functions can't be serialized; the normalized document records names only
impl Serialize for ComputedInputs {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.names())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn browser_inputs() -> ComputedInputs {
        ComputedInputs::new()
            .with("browser", |params| params.ctx["browser"].clone())
            .with("tenant", |_| json!("acme"))
    }

    #[test]
    fn test_evaluate_reads_context() {
        let params = MutationResolverParams::new(
            Value::Null,
            json!({}),
            json!({ "browser": "Firefox" }),
        );
        let values = browser_inputs().evaluate(&params);
        assert_eq!(values["browser"], json!("Firefox"));
        assert_eq!(values["tenant"], json!("acme"));
    }

    #[test]
    fn test_restrict_to_subset() {
        let inputs = browser_inputs().restrict_to(|name| name == "tenant");
        assert_eq!(inputs.names().collect::<Vec<_>>(), vec!["tenant"]);
        assert!(!inputs.contains("browser"));
    }

    #[test]
    fn test_serializes_as_names() {
        let json = serde_json::to_value(browser_inputs()).unwrap();
        assert_eq!(json, json!(["browser", "tenant"]));
    }
}
