//! C++ rendering of the value contract.
//!
//! Composed entities are held through owned pointers (`T *f`): the default
//! constructor allocates them, the destructor deletes them, `copy_to` recurses
//! into them and equality compares the pointees. Lists become
//! `std::vector<T>` and copy element-wise through `T`'s own copy constructor.
//!
//! Headers never include other entity headers. Every composed entity is
//! forward declared (`class T;`) and its header is included by the
//! implementation file instead, so entities that reach each other through
//! lists or pointers still compile.

use crate::codegen::{
    CustomMethod, GeneratedMarker, GeneratedMember, GeneratedUnit, MemberKind, TargetLanguage,
};
use crate::config::GeneratorConfig;
use crate::error::EmitError;
use crate::schema::{
    EntitySchema, Field, FieldType, MethodSignature, PrimitiveCategory, PrimitiveKind,
};
use log::trace;
use std::collections::BTreeSet;

const LANGUAGE: TargetLanguage = TargetLanguage::Cpp;

// Names the generated members bind themselves.
const BOUND_NAMES: &[&str] = &["copy_to", "clone", "other"];

const KEYWORDS: &[&str] = &[
    "alignas", "alignof", "and", "and_eq", "asm", "auto", "bitand", "bitor", "bool", "break",
    "case", "catch", "char", "char8_t", "char16_t", "char32_t", "class", "compl", "concept",
    "const", "consteval", "constexpr", "constinit", "const_cast", "continue", "co_await",
    "co_return", "co_yield", "decltype", "default", "delete", "do", "double", "dynamic_cast",
    "else", "enum", "explicit", "export", "extern", "false", "float", "for", "friend", "goto",
    "if", "inline", "int", "long", "mutable", "namespace", "new", "noexcept", "not", "not_eq",
    "nullptr", "operator", "or", "or_eq", "private", "protected", "public", "register",
    "reinterpret_cast", "requires", "return", "short", "signed", "sizeof", "static",
    "static_assert", "static_cast", "struct", "switch", "template", "this", "thread_local",
    "throw", "true", "try", "typedef", "typeid", "typename", "union", "unsigned", "using",
    "virtual", "void", "volatile", "wchar_t", "while", "xor", "xor_eq",
];

pub(crate) fn header_file_name(entity: &str) -> String {
    format!("{entity}.hpp")
}

pub(crate) fn implementation_file_name(entity: &str) -> String {
    format!("{entity}_generated_impl.cpp")
}

pub(crate) fn custom_implementation_file_name(entity: &str) -> String {
    format!("{entity}_custom_impl.cpp")
}

/// How a type is spelled in a declarator.
#[derive(Debug, Clone, PartialEq)]
enum TypeRef {
    Value(String),
    Reference(String),
    ConstReference(String),
    Pointer(String),
}

impl TypeRef {
    // The type with the spacing its declarator expects: `float `, `Point3 &`.
    fn prefix(&self) -> String {
        match self {
            TypeRef::Value(t) => format!("{t} "),
            TypeRef::Reference(t) => format!("{t} &"),
            TypeRef::ConstReference(t) => format!("const {t} &"),
            TypeRef::Pointer(t) => format!("{t} *"),
        }
    }
}

/// Storage of one field in the generated class.
struct Slot<'a> {
    name: &'a str,
    storage: TypeRef,
    default: String,
    owned: bool,
}

impl<'a> Slot<'a> {
    fn of(entity: &EntitySchema, field: &'a Field) -> Result<Self, EmitError> {
        let unsupported = |kind| EmitError::UnsupportedPrimitive {
            entity: entity.name().to_string(),
            field: field.name().to_string(),
            kind,
            language: LANGUAGE,
        };

        let slot = match field.ty() {
            FieldType::Entity(target) => Slot {
                name: field.name(),
                storage: TypeRef::Pointer(target.clone()),
                default: format!("new {target}()"),
                owned: true,
            },
            ty => Slot {
                name: field.name(),
                storage: TypeRef::Value(value_type(ty).map_err(unsupported)?),
                default: default_value(ty).map_err(unsupported)?,
                owned: false,
            },
        };

        Ok(slot)
    }
}

fn primitive_type(kind: PrimitiveKind) -> Option<&'static str> {
    let ty = match kind {
        PrimitiveKind::I8 => "int8_t",
        PrimitiveKind::I16 => "int16_t",
        PrimitiveKind::I32 => "int32_t",
        PrimitiveKind::I64 => "int64_t",
        PrimitiveKind::U8 => "uint8_t",
        PrimitiveKind::U16 => "uint16_t",
        PrimitiveKind::U32 => "uint32_t",
        PrimitiveKind::U64 => "uint64_t",
        PrimitiveKind::F32 => "float",
        PrimitiveKind::F64 => "double",
        PrimitiveKind::Bool => "bool",
        PrimitiveKind::String => "std::string",
        PrimitiveKind::Void => return None,
    };

    Some(ty)
}

fn primitive_default(kind: PrimitiveKind) -> Option<&'static str> {
    let value = match kind.category() {
        PrimitiveCategory::Integer => "0",
        PrimitiveCategory::Float if kind == PrimitiveKind::F32 => "0.0f",
        PrimitiveCategory::Float => "0.0",
        PrimitiveCategory::Boolean => "false",
        PrimitiveCategory::Text => "std::string()",
        PrimitiveCategory::Void => return None,
    };

    Some(value)
}

// Err carries the primitive kind the type table has no entry for.
fn value_type(ty: &FieldType) -> Result<String, PrimitiveKind> {
    match ty {
        FieldType::Primitive(kind) => primitive_type(*kind).map(str::to_string).ok_or(*kind),
        FieldType::Entity(name) => Ok(name.clone()),
        FieldType::List(inner) => Ok(format!("std::vector<{}>", value_type(inner)?)),
    }
}

fn default_value(ty: &FieldType) -> Result<String, PrimitiveKind> {
    match ty {
        FieldType::Primitive(kind) => primitive_default(*kind).map(str::to_string).ok_or(*kind),
        FieldType::Entity(_) | FieldType::List(_) => Ok(format!("{}()", value_type(ty)?)),
    }
}

fn is_reserved(name: &str) -> bool {
    KEYWORDS.contains(&name) || BOUND_NAMES.contains(&name)
}

fn check_identifiers(entity: &EntitySchema) -> Result<(), EmitError> {
    let reserved = |name: &str, field: Option<&str>| EmitError::ReservedIdentifier {
        entity: entity.name().to_string(),
        field: field.map(str::to_string),
        name: name.to_string(),
        language: LANGUAGE,
    };

    if is_reserved(entity.name()) {
        return Err(reserved(entity.name(), None));
    }

    for field in entity.fields() {
        // a field named like its class would shadow the constructor
        if is_reserved(field.name()) || field.name() == entity.name() {
            return Err(reserved(field.name(), Some(field.name())));
        }

        if let Some(target) = field.ty().referenced_entity()
            && is_reserved(target)
        {
            return Err(reserved(target, Some(field.name())));
        }
    }

    for method in entity.methods() {
        if is_reserved(method.name()) || method.name() == entity.name() {
            return Err(reserved(method.name(), Some(method.name())));
        }

        if let Some(parameter) = method
            .parameters()
            .iter()
            .find(|parameter| KEYWORDS.contains(&parameter.name()))
        {
            return Err(reserved(parameter.name(), Some(method.name())));
        }

        if let Some(target) = method.references().find(|target| is_reserved(target)) {
            return Err(reserved(target, Some(method.name())));
        }
    }

    Ok(())
}

// A marker line ending in a backslash would splice the next line of output
// into the comment.
fn check_marker(entity: &EntitySchema, marker: &GeneratedMarker) -> Result<(), EmitError> {
    let invalid = |reason: &str| EmitError::InvalidMarker {
        entity: entity.name().to_string(),
        reason: reason.to_string(),
    };

    if marker.text().trim().is_empty() {
        return Err(invalid("marker text is empty"));
    }

    if marker.lines().any(|line| line.ends_with('\\')) {
        return Err(invalid("a marker line ends with a backslash"));
    }

    Ok(())
}

/// What a unit needs from other files: system headers for the header, and
/// the entities it forward declares and includes from its implementation.
#[derive(Default)]
struct Dependencies {
    system: BTreeSet<String>,
    entities: BTreeSet<String>,
}

impl Dependencies {
    fn collect(&mut self, owner: &str, ty: &FieldType) {
        match ty {
            FieldType::List(inner) => {
                self.system.insert("#include <vector>".to_string());
                self.collect(owner, inner);
            }
            FieldType::Entity(name) if name != owner => {
                self.entities.insert(name.clone());
            }
            FieldType::Entity(_) => {}
            FieldType::Primitive(kind) => match kind.category() {
                PrimitiveCategory::Integer => {
                    self.system.insert("#include <stdint.h>".to_string());
                }
                PrimitiveCategory::Text => {
                    self.system.insert("#include <string>".to_string());
                }
                PrimitiveCategory::Float
                | PrimitiveCategory::Boolean
                | PrimitiveCategory::Void => {}
            },
        }
    }
}

/// A member before rendering. Body lines carry their nesting depth.
struct Method {
    kind: MemberKind,
    name: String,
    return_type: Option<TypeRef>,
    parameter: Option<TypeRef>,
    is_const: bool,
    delegates_to_default: bool,
    body: Vec<(usize, String)>,
}

impl Method {
    fn new(kind: MemberKind, name: impl Into<String>) -> Self {
        Self {
            kind,
            name: name.into(),
            return_type: None,
            parameter: None,
            is_const: false,
            delegates_to_default: false,
            body: Vec::new(),
        }
    }

    fn returns(mut self, ty: TypeRef) -> Self {
        self.return_type = Some(ty);
        self
    }

    fn takes_other(mut self, ty: TypeRef) -> Self {
        self.parameter = Some(ty);
        self
    }

    fn constant(mut self) -> Self {
        self.is_const = true;
        self
    }

    fn delegating(mut self) -> Self {
        self.delegates_to_default = true;
        self
    }

    fn line(mut self, depth: usize, text: impl Into<String>) -> Self {
        self.body.push((depth, text.into()));
        self
    }

    fn lines(mut self, lines: impl IntoIterator<Item = String>) -> Self {
        self.body.extend(lines.into_iter().map(|text| (0, text)));
        self
    }

    fn render(self, class: &str, indent: &str) -> GeneratedMember {
        let return_type = self
            .return_type
            .as_ref()
            .map(TypeRef::prefix)
            .unwrap_or_default();
        let params = match &self.parameter {
            Some(ty) => format!("({}other)", ty.prefix()),
            None => "()".to_string(),
        };
        let constness = if self.is_const { " const" } else { "" };

        let declaration = format!("{return_type}{}{params}{constness};", self.name);

        let mut definition = format!("{return_type}{class}::{}{params}{constness}", self.name);
        if self.delegates_to_default {
            definition.push_str(&format!(" : {class}()"));
        }
        definition.push_str("\n{\n");
        for (depth, text) in &self.body {
            definition.push_str(&indent.repeat(depth + 1));
            definition.push_str(text);
            definition.push('\n');
        }
        definition.push_str("}\n");

        GeneratedMember::new(self.kind, declaration, definition)
    }
}

fn default_constructor(class: &str, slots: &[Slot<'_>]) -> Method {
    Method::new(MemberKind::DefaultConstructor, class).lines(
        slots
            .iter()
            .map(|slot| format!("{} = {};", slot.name, slot.default)),
    )
}

fn copy_constructor(class: &str) -> Method {
    Method::new(MemberKind::CopyConstructor, class)
        .takes_other(TypeRef::ConstReference(class.to_string()))
        .delegating()
        .line(0, "other.copy_to(*this);")
}

fn destructor(class: &str, slots: &[Slot<'_>]) -> Method {
    Method::new(MemberKind::Destructor, format!("~{class}")).lines(
        slots
            .iter()
            .filter(|slot| slot.owned)
            .map(|slot| format!("delete {};", slot.name)),
    )
}

fn copy_to(class: &str, slots: &[Slot<'_>]) -> Method {
    Method::new(MemberKind::CopyTo, "copy_to")
        .returns(TypeRef::Value("void".to_string()))
        .takes_other(TypeRef::Reference(class.to_string()))
        .constant()
        .lines(slots.iter().map(|slot| {
            if slot.owned {
                format!("{name}->copy_to(*other.{name});", name = slot.name)
            } else {
                format!("other.{name} = {name};", name = slot.name)
            }
        }))
}

fn clone(class: &str) -> Method {
    Method::new(MemberKind::Clone, "clone")
        .returns(TypeRef::Value(class.to_string()))
        .constant()
        .line(0, format!("{class} clone;"))
        .line(0, "copy_to(clone);")
        .line(0, "return clone;")
}

fn equality(class: &str, slots: &[Slot<'_>]) -> Method {
    let comparison = if slots.is_empty() {
        "true".to_string()
    } else {
        slots
            .iter()
            .map(|slot| {
                if slot.owned {
                    format!("*{name} == *other.{name}", name = slot.name)
                } else {
                    format!("{name} == other.{name}", name = slot.name)
                }
            })
            .collect::<Vec<_>>()
            .join(" && ")
    };

    Method::new(MemberKind::Equality, "operator==")
        .returns(TypeRef::Value("bool".to_string()))
        .takes_other(TypeRef::ConstReference(class.to_string()))
        .constant()
        .line(0, format!("return {comparison};"))
}

fn inequality(class: &str) -> Method {
    Method::new(MemberKind::Inequality, "operator!=")
        .returns(TypeRef::Value("bool".to_string()))
        .takes_other(TypeRef::ConstReference(class.to_string()))
        .constant()
        .line(0, "return !(*this == other);")
}

fn assignment(class: &str) -> Method {
    Method::new(MemberKind::Assignment, "operator=")
        .returns(TypeRef::Reference(class.to_string()))
        .takes_other(TypeRef::ConstReference(class.to_string()))
        .line(0, "if (this == &other)")
        .line(0, "{")
        .line(1, "return *this;")
        .line(0, "}")
        .line(0, "other.copy_to(*this);")
        .line(0, "return *this;")
}

// Entities are taken by reference, everything else by value.
fn parameter_type(ty: &FieldType) -> Result<TypeRef, PrimitiveKind> {
    let spelled = value_type(ty)?;
    Ok(match ty {
        FieldType::Entity(_) => TypeRef::Reference(spelled),
        _ => TypeRef::Value(spelled),
    })
}

fn custom_method(
    entity: &EntitySchema,
    method: &MethodSignature,
    indent: &str,
) -> Result<CustomMethod, EmitError> {
    let unsupported = |kind| EmitError::UnsupportedPrimitive {
        entity: entity.name().to_string(),
        field: method.name().to_string(),
        kind,
        language: LANGUAGE,
    };

    let returns_void = method.returns() == &FieldType::Primitive(PrimitiveKind::Void);
    let return_type = if returns_void {
        "void ".to_string()
    } else {
        TypeRef::Value(value_type(method.returns()).map_err(unsupported)?).prefix()
    };

    let params = method
        .parameters()
        .iter()
        .map(|parameter| {
            parameter_type(parameter.ty())
                .map(|ty| format!("{}{}", ty.prefix(), parameter.name()))
                .map_err(unsupported)
        })
        .collect::<Result<Vec<_>, _>>()?
        .join(", ");

    let class = entity.name();
    let name = method.name();
    let declaration = format!("{return_type}{name}({params});");
    let signature = format!("{return_type}{class}::{name}({params})");

    let mut definition = format!("{signature}\n{{\n{indent}// Hand-written implementation.\n");
    if !returns_void {
        let zero = default_value(method.returns()).map_err(unsupported)?;
        definition.push_str(&format!("{indent}return {zero};\n"));
    }
    definition.push_str("}\n");

    Ok(CustomMethod::new(name, declaration, signature, definition))
}

/// Render the full value contract of `entity`. The entity must already be
/// resolved against its schema set.
pub(crate) fn emit_unit(
    entity: &EntitySchema,
    config: &GeneratorConfig,
) -> Result<GeneratedUnit, EmitError> {
    check_identifiers(entity)?;

    let marker = GeneratedMarker::new(config.marker.clone());
    check_marker(entity, &marker)?;

    let slots = entity
        .fields()
        .map(|field| Slot::of(entity, field))
        .collect::<Result<Vec<_>, _>>()?;

    let class = entity.name();
    let indent = config.indent.unit();

    let mut dependencies = Dependencies::default();
    for field in entity.fields() {
        dependencies.collect(class, field.ty());
    }
    for ty in entity.methods().iter().flat_map(MethodSignature::types) {
        dependencies.collect(class, ty);
    }

    let fields = slots
        .iter()
        .map(|slot| format!("{}{};", slot.storage.prefix(), slot.name))
        .collect();

    let methods = [
        default_constructor(class, &slots),
        copy_constructor(class),
        destructor(class, &slots),
        copy_to(class, &slots),
        clone(class),
        equality(class, &slots),
        inequality(class),
        assignment(class),
    ];

    let members = methods
        .into_iter()
        .map(|method| {
            trace!("rendering {} of '{class}'", method.kind);
            method.render(class, &indent)
        })
        .collect();

    let custom_methods = entity
        .methods()
        .iter()
        .map(|method| custom_method(entity, method, &indent))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(GeneratedUnit {
        entity: class.to_string(),
        language: LANGUAGE,
        marker,
        includes: dependencies.system.into_iter().collect(),
        dependencies: dependencies.entities.into_iter().collect(),
        fields,
        members,
        custom_methods,
        indent,
        include_prefix: config.include_prefix.clone(),
    })
}

pub(crate) fn render_header(unit: &GeneratedUnit) -> String {
    let mut out = String::from("#pragma once\n");
    out.push_str(&unit.marker.comment());
    out.push('\n');
    for include in &unit.includes {
        out.push_str(include);
        out.push('\n');
    }
    out.push('\n');

    if !unit.dependencies.is_empty() {
        for entity in &unit.dependencies {
            out.push_str(&format!("class {entity};\n"));
        }
        out.push('\n');
    }

    out.push_str(&format!("class {}\n{{\npublic:\n", unit.entity));
    for field in &unit.fields {
        out.push_str(&unit.indent);
        out.push_str(field);
        out.push('\n');
    }
    if !unit.fields.is_empty() {
        out.push('\n');
    }
    for member in &unit.members {
        out.push_str(&unit.indent);
        out.push_str(member.declaration());
        out.push('\n');
    }
    if !unit.custom_methods.is_empty() {
        out.push('\n');
        for method in &unit.custom_methods {
            out.push_str(&unit.indent);
            out.push_str(method.declaration());
            out.push('\n');
        }
    }
    out.push_str("};\n");

    out
}

// Own header first, then the headers of every forward-declared entity.
fn push_includes(out: &mut String, unit: &GeneratedUnit) {
    let own = header_file_name(&unit.entity);
    let dependencies = unit.dependencies.iter().map(String::as_str).map(header_file_name);

    for header in std::iter::once(own).chain(dependencies) {
        out.push_str(&format!("#include \"{}{header}\"\n", unit.include_prefix));
    }
}

pub(crate) fn render_implementation(unit: &GeneratedUnit) -> String {
    let mut out = unit.marker.comment();
    out.push_str("\n\n");
    push_includes(&mut out, unit);
    out.push('\n');
    for member in &unit.members {
        out.push_str(member.definition());
    }

    out
}

/// Hand-written method definitions. Starting from `existing` (or a fresh file
/// with the includes when there is none), append a stub for every custom
/// method whose signature line is not already present. Existing definitions
/// are never touched. The file carries no marker since it is edited by hand.
pub(crate) fn render_custom_implementation(unit: &GeneratedUnit, existing: Option<&str>) -> String {
    let mut out = match existing {
        Some(text) => text.to_string(),
        None => {
            let mut fresh = String::new();
            push_includes(&mut fresh, unit);
            fresh
        }
    };

    for method in &unit.custom_methods {
        if out.contains(method.signature()) {
            continue;
        }

        if !out.is_empty() && !out.ends_with('\n') {
            out.push('\n');
        }
        if !out.is_empty() && !out.ends_with("\n\n") {
            out.push('\n');
        }
        out.push_str(method.definition());
    }

    out
}
