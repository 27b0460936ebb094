//! Emission engine.
//!
//! Turns a resolved [`EntitySchema`](crate::schema::EntitySchema) into a
//! [`GeneratedUnit`]: the value-type contract (default constructor, copy
//! constructor, destructor, `copy_to`, `clone`, `==`, `!=`, `=`) rendered for
//! the configured target language, plus declarations and stub definitions
//! for any hand-written methods the entity declares.

mod cpp;
mod engine;
mod unit;

pub use engine::{EmitOutcome, EmitReport, Emitter, emit};
pub use unit::{CustomMethod, GeneratedMarker, GeneratedMember, GeneratedUnit, MemberKind};

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString, IntoStaticStr};

/// Languages the engine can render.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Display,
    EnumString,
    EnumIter,
    IntoStaticStr,
    Serialize,
    Deserialize,
)]
pub enum TargetLanguage {
    #[default]
    #[strum(to_string = "cpp", serialize = "c++")]
    #[serde(rename = "cpp", alias = "c++")]
    Cpp,
}
