use crate::codegen::{GeneratedUnit, TargetLanguage, cpp};
use crate::config::GeneratorConfig;
use crate::error::EmitError;
use crate::schema::SchemaSet;
use log::{debug, info, warn};

///
/// Emitter
///
/// Borrows a schema set and a configuration and renders units from them.
/// Emission never mutates either, so one emitter can be shared across threads
/// and repeated calls produce byte-identical output.
///

#[derive(Debug, Clone, Copy)]
pub struct Emitter<'a> {
    schemas: &'a SchemaSet,
    config: &'a GeneratorConfig,
}

impl<'a> Emitter<'a> {
    pub fn new(schemas: &'a SchemaSet, config: &'a GeneratorConfig) -> Self {
        Self { schemas, config }
    }

    pub fn schemas(&self) -> &'a SchemaSet {
        self.schemas
    }

    pub fn config(&self) -> &'a GeneratorConfig {
        self.config
    }

    /// Resolve `entity` against the schema set and render its value contract.
    pub fn emit(&self, entity: &str) -> Result<GeneratedUnit, EmitError> {
        let schema = self.schemas.resolve(entity)?;

        debug!(
            "emitting '{}' ({} fields) as {}",
            entity,
            schema.len(),
            self.config.language
        );

        match self.config.language {
            TargetLanguage::Cpp => cpp::emit_unit(schema, self.config),
        }
    }

    /// Emit every entity of the set in declaration order. A failing entity is
    /// recorded in the report and does not stop the others.
    pub fn emit_all(&self) -> EmitReport {
        let outcomes: Vec<EmitOutcome> = self
            .schemas
            .iter()
            .map(|schema| {
                let result = self.emit(schema.name());
                if let Err(e) = &result {
                    warn!("skipping '{}': {}", schema.name(), e);
                }

                EmitOutcome {
                    entity: schema.name().to_string(),
                    result,
                }
            })
            .collect();

        let report = EmitReport { outcomes };
        info!(
            "emitted {} of {} entities",
            report.units().count(),
            report.len()
        );

        report
    }
}

/// Emit one entity. Shorthand for `Emitter::new(schemas, config).emit(entity)`.
pub fn emit(
    schemas: &SchemaSet,
    entity: &str,
    config: &GeneratorConfig,
) -> Result<GeneratedUnit, EmitError> {
    Emitter::new(schemas, config).emit(entity)
}

/// Result of emitting a single entity during a batch run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmitOutcome {
    pub entity: String,
    pub result: Result<GeneratedUnit, EmitError>,
}

/// Per-entity outcomes of [`Emitter::emit_all`], in declaration order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct EmitReport {
    outcomes: Vec<EmitOutcome>,
}

impl EmitReport {
    pub fn outcomes(&self) -> &[EmitOutcome] {
        &self.outcomes
    }

    pub fn outcome(&self, entity: &str) -> Option<&EmitOutcome> {
        self.outcomes.iter().find(|outcome| outcome.entity == entity)
    }

    pub fn units(&self) -> impl Iterator<Item = &GeneratedUnit> {
        self.outcomes
            .iter()
            .filter_map(|outcome| outcome.result.as_ref().ok())
    }

    pub fn failures(&self) -> impl Iterator<Item = &EmitError> {
        self.outcomes
            .iter()
            .filter_map(|outcome| outcome.result.as_ref().err())
    }

    /// True when every entity emitted successfully.
    pub fn is_complete(&self) -> bool {
        self.failures().next().is_none()
    }

    pub fn len(&self) -> usize {
        self.outcomes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.outcomes.is_empty()
    }

    pub fn into_outcomes(self) -> Vec<EmitOutcome> {
        self.outcomes
    }
}
