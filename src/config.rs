//! Generator configuration.
//!
//! Settings are built in code through `typed-builder`, or read from the
//! optional `[generator]` table of a TOML schema source. Every setting has a
//! default that reproduces the stock wc-gen output.

use crate::codegen::TargetLanguage;
use serde::{Deserialize, Serialize};
use std::fmt;
use typed_builder::TypedBuilder;

/// Disclaimer printed at the top of every generated file.
pub const DEFAULT_MARKER: &str =
    "This file was generated by wc-gen. Do not modify this file manually.";

/// Path prefix the implementation file uses to include its header.
pub const DEFAULT_INCLUDE_PREFIX: &str = "../";

/// Indentation unit for generated bodies and class members.
///
/// In TOML: `indent = "tab"` or `indent = { spaces = 4 }`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Indent {
    #[default]
    Tab,
    Spaces(u8),
}

impl Indent {
    pub fn unit(self) -> String {
        match self {
            Indent::Tab => "\t".to_string(),
            Indent::Spaces(width) => " ".repeat(usize::from(width)),
        }
    }
}

impl fmt::Display for Indent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Indent::Tab => write!(f, "tab"),
            Indent::Spaces(width) => write!(f, "{width} spaces"),
        }
    }
}

/// Configuration for one generation run.
///
/// # Examples
///
/// ```
/// use wc_gen::config::{GeneratorConfig, Indent};
///
/// // Stock output
/// let config = GeneratorConfig::default();
/// assert_eq!(config.include_prefix, "../");
///
/// // Customize options
/// let config = GeneratorConfig::builder()
///     .indent(Indent::Spaces(4))
///     .include_prefix("")
///     .build();
/// assert_eq!(config.indent.unit(), "    ");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, TypedBuilder, Serialize, Deserialize)]
#[builder(doc)]
#[serde(default, deny_unknown_fields)]
pub struct GeneratorConfig {
    /// Language the value contract is rendered in
    #[builder(default)]
    pub language: TargetLanguage,

    /// Do-not-edit disclaimer at the top of each generated file, one line
    /// comment per line of text. Blank markers are rejected at emission.
    #[builder(default = DEFAULT_MARKER.to_string(), setter(into))]
    pub marker: String,

    /// Indentation unit
    #[builder(default)]
    pub indent: Indent,

    /// Prefix of the header includes in implementation files
    #[builder(default = DEFAULT_INCLUDE_PREFIX.to_string(), setter(into))]
    pub include_prefix: String,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self::builder().build()
    }
}
