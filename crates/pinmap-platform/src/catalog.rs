//! Resource catalog keyed by (name, index).

use std::collections::BTreeMap;

use crate::error::{PlatformError, Result};
use crate::resource::Resource;

/// Registry of logical resources. Populated once during platform
/// construction, read-only afterwards; iteration is in key order.
#[derive(Debug, Clone, Default)]
pub struct ResourceCatalog {
    resources: BTreeMap<(String, u32), Resource>,
}

impl ResourceCatalog {
    pub fn new() -> Self {
        ResourceCatalog::default()
    }

    pub fn register(&mut self, resource: Resource) -> Result<()> {
        let key = (resource.name.clone(), resource.index);
        if self.resources.contains_key(&key) {
            return Err(PlatformError::DuplicateResource {
                name: key.0,
                index: key.1,
            });
        }
        self.resources.insert(key, resource);
        Ok(())
    }

    pub fn register_all(&mut self, resources: impl IntoIterator<Item = Resource>) -> Result<()> {
        for resource in resources {
            self.register(resource)?;
        }
        Ok(())
    }

    pub fn lookup(&self, name: &str, index: u32) -> Result<&Resource> {
        self.resources
            .get(&(name.to_string(), index))
            .ok_or_else(|| PlatformError::ResourceNotFound {
                name: name.to_string(),
                index,
            })
    }

    pub fn iter(&self) -> impl Iterator<Item = &Resource> {
        self.resources.values()
    }

    pub fn len(&self) -> usize {
        self.resources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.resources.is_empty()
    }
}
