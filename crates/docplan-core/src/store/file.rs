//! File-backed property bag store
//!
//! The file holds a JSON object mapping property names to string values,
//! mirroring a document's custom properties. The plan lives under one key as
//! a JSON-encoded string; other keys are preserved untouched.

use super::PlanStore;
use crate::error::StoreError;
use async_trait::async_trait;
use docplan_outline::PlanSnapshot;
use serde_json::{Map, Value};
use std::path::{Path, PathBuf};

/// Property bag persisted in a JSON file
#[derive(Debug, Clone)]
pub struct FilePlanStore {
    path: PathBuf,
    key: String,
}

impl FilePlanStore {
    /// Store the plan under `key` in the bag at `path`
    #[must_use]
    pub fn new(path: impl Into<PathBuf>, key: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            key: key.into(),
        }
    }

    /// Path of the property bag
    #[inline]
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn read_bag(&self) -> Result<Map<String, Value>, StoreError> {
        let bytes = match tokio::fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Map::new()),
            Err(e) => return Err(e.into()),
        };
        match serde_json::from_slice::<Value>(&bytes)? {
            Value::Object(bag) => Ok(bag),
            _ => Err(StoreError::Parse(format!(
                "{} is not a property bag",
                self.path.display()
            ))),
        }
    }

    /// Current bag, or an empty one when the file is not a JSON object
    async fn read_bag_or_replace(&self) -> Result<Map<String, Value>, StoreError> {
        match self.read_bag().await {
            Err(StoreError::Parse(reason)) => {
                tracing::warn!(path = %self.path.display(), %reason, "replacing malformed property bag");
                Ok(Map::new())
            }
            other => other,
        }
    }

    async fn write_bag(&self, bag: Map<String, Value>) -> Result<(), StoreError> {
        let json = serde_json::to_vec_pretty(&Value::Object(bag))
            .map_err(|e| StoreError::Persistence(e.to_string()))?;

        let tmp = self.path.with_extension("tmp");
        tokio::fs::write(&tmp, json).await?;
        tokio::fs::rename(&tmp, &self.path).await?;
        Ok(())
    }
}

#[async_trait]
impl PlanStore for FilePlanStore {
    async fn load(&self) -> Result<Option<PlanSnapshot>, StoreError> {
        let bag = self.read_bag().await?;
        match bag.get(&self.key) {
            None => Ok(None),
            Some(Value::String(json)) => Ok(Some(PlanSnapshot::from_json(json)?)),
            Some(_) => Err(StoreError::Parse(format!("property {} is not a string", self.key))),
        }
    }

    async fn save(&self, snapshot: &PlanSnapshot) -> Result<(), StoreError> {
        let json = snapshot.to_json()?;
        let mut bag = self.read_bag_or_replace().await?;
        bag.insert(self.key.clone(), Value::String(json));
        self.write_bag(bag).await?;
        tracing::debug!(path = %self.path.display(), key = %self.key, "plan saved");
        Ok(())
    }

    async fn clear(&self) -> Result<(), StoreError> {
        let (mut bag, malformed) = match self.read_bag().await {
            Ok(bag) => (bag, false),
            Err(StoreError::Parse(reason)) => {
                tracing::warn!(path = %self.path.display(), %reason, "replacing malformed property bag");
                (Map::new(), true)
            }
            Err(e) => return Err(e),
        };
        if bag.remove(&self.key).is_some() || malformed {
            self.write_bag(bag).await?;
        }
        Ok(())
    }
}
