//! TOML schema parser
//!
//! Reads `[[entity]]` tables and turns them into a [`SchemaSet`]. Parsing the
//! file and building the schema model are separate steps, so a caller can
//! inspect or edit the [`SchemaFile`] in between.

use crate::config::GeneratorConfig;
use crate::error::{SchemaError, SourceError, WcGenResult};
use crate::schema::{EntitySchema, FieldType, MethodSignature, SchemaSet};
use crate::source::toml_types::{EntityConfig, MethodConfig, SchemaFile};
use log::debug;
use std::fs;
use std::path::Path;

/// Parse a schema from a TOML string
pub fn parse_schema_from_str(content: &str) -> Result<SchemaFile, SourceError> {
    let file: SchemaFile = toml::from_str(content)?;
    debug!("parsed schema source with {} entities", file.entities.len());

    Ok(file)
}

/// Parse a schema from a TOML file
pub fn parse_schema_file<P: AsRef<Path>>(path: P) -> Result<SchemaFile, SourceError> {
    let path = path.as_ref();
    let content = fs::read_to_string(path).map_err(|source| SourceError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    debug!("read schema file '{}'", path.display());
    parse_schema_from_str(&content)
}

/// Read a schema file and build its schema set and generator settings.
///
/// The set is only checked for well-formed names and types here; references
/// are resolved per entity at emission time.
pub fn load<P: AsRef<Path>>(path: P) -> WcGenResult<(SchemaSet, GeneratorConfig)> {
    let file = parse_schema_file(path)?;
    let config = file.generator_config();
    let schemas = file.into_schema_set()?;

    Ok((schemas, config))
}

impl EntityConfig {
    /// Build the entity, parsing every field and method type string.
    pub fn to_entity_schema(&self) -> Result<EntitySchema, SchemaError> {
        let fields = self
            .fields
            .iter()
            .map(|field| {
                self.parse_type(&field.r#type, &field.name)
                    .map(|ty| (field.name.as_str(), ty))
            })
            .collect::<Result<Vec<_>, SchemaError>>()?;

        let methods = self
            .methods
            .iter()
            .map(|method| self.to_method_signature(method))
            .collect::<Result<Vec<_>, SchemaError>>()?;

        EntitySchema::define(self.name.as_str(), fields)?.with_methods(methods)
    }

    // Parameter type errors are reported against `method.parameter`.
    fn to_method_signature(&self, method: &MethodConfig) -> Result<MethodSignature, SchemaError> {
        let mut signature = MethodSignature::new(method.name.as_str());

        if let Some(returns) = &method.returns {
            signature = signature.returning(self.parse_type(returns, &method.name)?);
        }

        for parameter in &method.parameters {
            let location = format!("{}.{}", method.name, parameter.name);
            let ty = self.parse_type(&parameter.r#type, &location)?;
            signature = signature.parameter(parameter.name.as_str(), ty);
        }

        Ok(signature)
    }

    fn parse_type(&self, ty: &str, member: &str) -> Result<FieldType, SchemaError> {
        ty.parse::<FieldType>()
            .map_err(|source| SchemaError::InvalidType {
                entity: self.name.clone(),
                field: member.to_string(),
                source,
            })
    }
}

impl SchemaFile {
    /// Declare every entity in file order, stopping at the first error.
    pub fn into_schema_set(self) -> Result<SchemaSet, SchemaError> {
        let mut set = SchemaSet::new();
        for entity in &self.entities {
            set.declare(entity.to_entity_schema()?)?;
        }

        Ok(set)
    }

    /// Declare every entity that is well formed and report the rest. Rejected
    /// entities are absent from the returned set, so anything that references
    /// them fails resolution later.
    pub fn into_partial_schema_set(self) -> (SchemaSet, Vec<SchemaError>) {
        let mut set = SchemaSet::new();
        let mut errors = Vec::new();

        for entity in &self.entities {
            let declared = entity
                .to_entity_schema()
                .and_then(|schema| set.declare(schema));

            if let Err(e) = declared {
                debug!("rejected entity '{}': {}", entity.name, e);
                errors.push(e);
            }
        }

        (set, errors)
    }
}
