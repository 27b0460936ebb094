/// Ensure an identifier is a plain ASCII identifier: a letter or '_' followed
/// by letters, digits or '_'. Names are echoed verbatim into generated code,
/// so anything else is rejected rather than rewritten.
pub(crate) fn validate_identifier(ident: &str) -> Result<(), String> {
    let mut chars = ident.chars();

    let Some(first) = chars.next() else {
        return Err("identifier is empty".to_string());
    };

    if !(first.is_ascii_alphabetic() || first == '_') {
        return Err(format!("'{ident}' must start with an ASCII letter or '_'"));
    }

    if let Some(bad) = chars.find(|c| !(c.is_ascii_alphanumeric() || *c == '_')) {
        return Err(format!("'{ident}' contains the character '{bad}'"));
    }

    Ok(())
}
