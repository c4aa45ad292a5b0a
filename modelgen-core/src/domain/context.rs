// modelgen-core/src/domain/context.rs

use serde::Serialize;
use serde_yaml::{Mapping, Value};

use crate::domain::model::{Catalog, DomainModel, EntityDefinition, StorageConfig};

/// Schema used when neither the entity nor `metadata.default_schema` sets one.
pub const DEFAULT_SCHEMA: &str = "main";

/// Per-entity view handed to the template engine. Lives for one render only.
#[derive(Debug, Clone, Serialize)]
pub struct RenderContext<'a> {
    pub entity: &'a str,
    pub table: String,
    pub schema: String,
    pub attributes: &'a Mapping,
    pub indexes: &'a [Value],
    pub storage: &'a StorageConfig,
    pub types: &'a Catalog,
    pub enums: &'a Catalog,
}

pub struct ContextBuilder<'a> {
    model: &'a DomainModel,
    fallback_schema: &'a str,
}

impl<'a> ContextBuilder<'a> {
    pub fn new(model: &'a DomainModel) -> Self {
        Self {
            model,
            fallback_schema: DEFAULT_SCHEMA,
        }
    }

    pub fn with_fallback_schema(mut self, fallback_schema: &'a str) -> Self {
        self.fallback_schema = fallback_schema;
        self
    }

    pub fn build(&self, name: &'a str, entity: &'a EntityDefinition) -> RenderContext<'a> {
        // Cascade : storage.table > lower(name)
        let table = entity
            .storage
            .table_name()
            .unwrap_or_else(|| name.to_lowercase());

        // Cascade : storage.schema > metadata.default_schema > fallback
        let schema = entity
            .storage
            .schema_name()
            .or_else(|| self.model.metadata.default_schema().map(str::to_string))
            .unwrap_or_else(|| self.fallback_schema.to_string());

        RenderContext {
            entity: name,
            table,
            schema,
            attributes: &entity.attributes,
            indexes: &entity.indexes,
            storage: &entity.storage,
            types: &self.model.types,
            enums: &self.model.enums,
        }
    }

    /// One context per entity, in entity-name order.
    pub fn build_all(&self) -> Vec<RenderContext<'a>> {
        self.model
            .entities
            .iter()
            .map(|(name, entity)| self.build(name, entity))
            .collect()
    }
}
