// ==========================================
// Abrazaderas - in-memory catalog
// ==========================================
// CatalogGateway backed by a map; used by the command line driver and tests.
// ==========================================

use crate::catalog::gateway::{CatalogGateway, ClampSpecRecord, ImportedClamp, UpsertOutcome};
use crate::domain::clamp::ClampSpec;
use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, MutexGuard};

#[derive(Debug, Default, Clone)]
pub struct MemoryCatalog {
    products: Arc<Mutex<BTreeMap<String, ImportedClamp>>>,
}

impl MemoryCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> anyhow::Result<MutexGuard<'_, BTreeMap<String, ImportedClamp>>> {
        self.products
            .lock()
            .map_err(|e| anyhow::anyhow!("catalog lock poisoned: {}", e))
    }

    /// Insert or replace a product as-is (manual edits, fixtures).
    pub fn insert(&self, clamp: ImportedClamp) -> anyhow::Result<()> {
        self.lock()?.insert(clamp.sku.clone(), clamp);
        Ok(())
    }

    pub fn get(&self, sku: &str) -> anyhow::Result<Option<ImportedClamp>> {
        Ok(self.lock()?.get(sku).cloned())
    }

    pub fn len(&self) -> usize {
        self.lock().map(|p| p.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn contains_sku(&self, sku: &str) -> bool {
        self.lock().map(|p| p.contains_key(sku)).unwrap_or(false)
    }
}

#[async_trait]
impl CatalogGateway for MemoryCatalog {
    async fn product_exists(&self, sku: &str) -> anyhow::Result<bool> {
        Ok(self.lock()?.contains_key(sku))
    }

    async fn find_by_specs(&self, spec: &ClampSpec) -> anyhow::Result<Option<String>> {
        Ok(self
            .lock()?
            .values()
            .find(|p| p.specs.matches(spec))
            .map(|p| p.sku.clone()))
    }

    async fn upsert_imported_clamp(&self, clamp: ImportedClamp) -> anyhow::Result<UpsertOutcome> {
        let mut products = self.lock()?;
        match products.get_mut(&clamp.sku) {
            Some(existing) => {
                let keep_specs = existing.specs.manual_override;
                let specs: ClampSpecRecord = if keep_specs {
                    existing.specs.clone()
                } else {
                    clamp.specs
                };
                *existing = ImportedClamp { specs, ..clamp };
                Ok(UpsertOutcome {
                    created: false,
                    specs_replaced: !keep_specs,
                })
            }
            None => {
                products.insert(clamp.sku.clone(), clamp);
                Ok(UpsertOutcome {
                    created: true,
                    specs_replaced: true,
                })
            }
        }
    }
}
