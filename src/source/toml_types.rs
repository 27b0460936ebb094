//! Serde types for TOML schema sources.

use crate::config::GeneratorConfig;
use serde::{Deserialize, Serialize};

/// Root of a schema file
#[derive(Debug, Clone, PartialEq, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct SchemaFile {
    pub generator: Option<GeneratorConfig>,
    #[serde(rename = "entity", default)]
    pub entities: Vec<EntityConfig>,
}

/// One `[[entity]]` table
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct EntityConfig {
    pub name: String,
    #[serde(default)]
    pub fields: Vec<FieldConfig>,
    #[serde(default)]
    pub methods: Vec<MethodConfig>,
}

/// Field entry; `type` is parsed later into a `FieldType`
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct FieldConfig {
    pub name: String,
    pub r#type: String,
}

/// Hand-written method entry; a missing `returns` means `void`
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct MethodConfig {
    pub name: String,
    #[serde(default)]
    pub returns: Option<String>,
    #[serde(default)]
    pub parameters: Vec<FieldConfig>,
}

impl SchemaFile {
    /// Generator settings of the file, or the defaults when it has no
    /// `[generator]` table.
    pub fn generator_config(&self) -> GeneratorConfig {
        self.generator.clone().unwrap_or_default()
    }
}
