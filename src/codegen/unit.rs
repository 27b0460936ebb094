use crate::codegen::{TargetLanguage, cpp};
use strum::{Display, EnumIter, IntoStaticStr};

/// Members of the value contract, in the order they are emitted.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Display, EnumIter, IntoStaticStr,
)]
#[strum(serialize_all = "snake_case")]
pub enum MemberKind {
    DefaultConstructor,
    CopyConstructor,
    Destructor,
    CopyTo,
    Clone,
    Equality,
    Inequality,
    Assignment,
}

/// One rendered member: its in-class declaration and its out-of-class
/// definition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedMember {
    kind: MemberKind,
    declaration: String,
    definition: String,
}

impl GeneratedMember {
    pub(crate) fn new(kind: MemberKind, declaration: String, definition: String) -> Self {
        Self {
            kind,
            declaration,
            definition,
        }
    }

    pub fn kind(&self) -> MemberKind {
        self.kind
    }

    pub fn declaration(&self) -> &str {
        &self.declaration
    }

    pub fn definition(&self) -> &str {
        &self.definition
    }
}

/// A hand-written method: declared in the class by the generator, defined
/// by the user in the custom implementation file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CustomMethod {
    name: String,
    declaration: String,
    signature: String,
    definition: String,
}

impl CustomMethod {
    pub(crate) fn new(
        name: impl Into<String>,
        declaration: String,
        signature: String,
        definition: String,
    ) -> Self {
        Self {
            name: name.into(),
            declaration,
            signature,
            definition,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn declaration(&self) -> &str {
        &self.declaration
    }

    /// First line of the stub definition. A custom implementation file that
    /// contains it already defines the method.
    pub fn signature(&self) -> &str {
        &self.signature
    }

    /// Stub definition appended when the method is not yet defined.
    pub fn definition(&self) -> &str {
        &self.definition
    }
}

/// Machine-generated marker. Every renderer must print it ahead of any code
/// so readers and tooling know manual edits are lost on regeneration.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct GeneratedMarker {
    text: String,
}

impl GeneratedMarker {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Lines of the marker text, `\r\n` and `\n` separated.
    pub fn lines(&self) -> std::str::Lines<'_> {
        self.text.lines()
    }

    /// The marker as line comments, one per line of text.
    pub fn comment(&self) -> String {
        self.lines()
            .map(|line| {
                if line.is_empty() {
                    "//".to_string()
                } else {
                    format!("// {line}")
                }
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

///
/// GeneratedUnit
///
/// Everything emitted for one entity. Owned by the caller, which decides
/// where the rendered header and implementation end up.
///

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedUnit {
    pub(crate) entity: String,
    pub(crate) language: TargetLanguage,
    pub(crate) marker: GeneratedMarker,
    pub(crate) includes: Vec<String>,
    pub(crate) dependencies: Vec<String>,
    pub(crate) fields: Vec<String>,
    pub(crate) members: Vec<GeneratedMember>,
    pub(crate) custom_methods: Vec<CustomMethod>,
    pub(crate) indent: String,
    pub(crate) include_prefix: String,
}

impl GeneratedUnit {
    pub fn entity(&self) -> &str {
        &self.entity
    }

    pub fn language(&self) -> TargetLanguage {
        self.language
    }

    pub fn marker(&self) -> &GeneratedMarker {
        &self.marker
    }

    /// System include directives of the header, sorted and de-duplicated.
    pub fn includes(&self) -> &[String] {
        &self.includes
    }

    /// Other entities the unit uses, sorted. The header forward declares
    /// them and the implementation includes their headers.
    pub fn dependencies(&self) -> &[String] {
        &self.dependencies
    }

    /// Field declarations in declaration order.
    pub fn fields(&self) -> &[String] {
        &self.fields
    }

    /// Members in contract order.
    pub fn members(&self) -> &[GeneratedMember] {
        &self.members
    }

    pub fn member(&self, kind: MemberKind) -> Option<&GeneratedMember> {
        self.members.iter().find(|member| member.kind == kind)
    }

    /// Hand-written methods in declaration order.
    pub fn custom_methods(&self) -> &[CustomMethod] {
        &self.custom_methods
    }

    pub fn header_file_name(&self) -> String {
        match self.language {
            TargetLanguage::Cpp => cpp::header_file_name(&self.entity),
        }
    }

    pub fn implementation_file_name(&self) -> String {
        match self.language {
            TargetLanguage::Cpp => cpp::implementation_file_name(&self.entity),
        }
    }

    pub fn custom_implementation_file_name(&self) -> String {
        match self.language {
            TargetLanguage::Cpp => cpp::custom_implementation_file_name(&self.entity),
        }
    }

    /// Class declaration, preceded by the marker.
    pub fn header(&self) -> String {
        match self.language {
            TargetLanguage::Cpp => cpp::render_header(self),
        }
    }

    /// Member definitions, preceded by the marker.
    pub fn implementation(&self) -> String {
        match self.language {
            TargetLanguage::Cpp => cpp::render_implementation(self),
        }
    }

    /// Custom implementation file merged with `existing`, the current
    /// contents of that file if it exists. Stubs are only appended for
    /// methods it does not define yet, so hand-written bodies survive
    /// regeneration. Only meaningful when the entity declares methods.
    pub fn custom_implementation(&self, existing: Option<&str>) -> String {
        match self.language {
            TargetLanguage::Cpp => cpp::render_custom_implementation(self, existing),
        }
    }
}
