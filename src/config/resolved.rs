//! Resolved model: validated resource definitions indexed for runtime lookup.

use crate::config::{validate, ResourceDef};
use crate::error::ConfigError;
use std::collections::HashMap;

#[derive(Clone, Debug)]
pub struct ResolvedModel {
    resources: Vec<&'static ResourceDef>,
    by_name: HashMap<&'static str, &'static ResourceDef>,
}

impl ResolvedModel {
    pub fn resources(&self) -> &[&'static ResourceDef] {
        &self.resources
    }

    pub fn resource(&self, name: &str) -> Option<&'static ResourceDef> {
        self.by_name.get(name).copied()
    }
}

/// Validate definitions and build the model.
pub fn resolve(resources: Vec<&'static ResourceDef>) -> Result<ResolvedModel, ConfigError> {
    validate(&resources)?;
    let by_name = resources.iter().map(|r| (r.name, *r)).collect();
    Ok(ResolvedModel { resources, by_name })
}
