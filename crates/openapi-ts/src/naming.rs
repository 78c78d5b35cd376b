//! Identifier formatting for generated TypeScript.
//!
//! Type names are PascalCased and wrapped with the configured prefix and
//! suffix. Property keys are emitted bare when they are valid identifiers
//! and quoted otherwise.

/// TypeScript keywords that cannot appear as bare property keys.
pub const RESERVED_WORDS: &[&str] = &[
    "break",
    "case",
    "catch",
    "class",
    "const",
    "continue",
    "debugger",
    "default",
    "delete",
    "do",
    "else",
    "enum",
    "export",
    "extends",
    "false",
    "finally",
    "for",
    "function",
    "if",
    "import",
    "in",
    "instanceof",
    "new",
    "null",
    "return",
    "super",
    "switch",
    "this",
    "throw",
    "true",
    "try",
    "typeof",
    "var",
    "void",
    "while",
    "with",
    "yield",
];

/// Formats schema names into TypeScript identifiers.
#[derive(Debug, Clone, Default)]
pub struct Naming {
    prefix: String,
    suffix: String,
}

impl Naming {
    pub fn new(prefix: impl Into<String>, suffix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            suffix: suffix.into(),
        }
    }

    /// Format a raw schema name as a type name, e.g. `pet_status` -> `PetStatus`.
    pub fn format_type_name(&self, raw: &str) -> String {
        format!("{}{}{}", self.prefix, pascalize(raw), self.suffix)
    }
}

/// PascalCase a raw name.
///
/// Characters outside `[A-Za-z0-9_ ]` act as separators, as do whitespace
/// and underscores. Only the first letter of each segment is changed.
pub fn pascalize(raw: &str) -> String {
    let sanitized: String = raw
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '_' || c.is_whitespace() {
                c
            } else {
                ' '
            }
        })
        .collect();

    let mut out = String::with_capacity(sanitized.len());
    for segment in sanitized.split(|c: char| c.is_whitespace() || c == '_') {
        let mut chars = segment.chars();
        if let Some(first) = chars.next() {
            out.extend(first.to_uppercase());
            out.push_str(chars.as_str());
        }
    }

    if out.is_empty() {
        return "Unnamed".to_string();
    }
    if out.starts_with(|c: char| c.is_ascii_digit()) {
        out.insert(0, '_');
    }
    out
}

/// Format a property key, quoting it when it is not a valid bare identifier.
pub fn format_property_name(raw: &str) -> String {
    if needs_quotes(raw) {
        quote(raw)
    } else {
        raw.to_string()
    }
}

fn needs_quotes(name: &str) -> bool {
    name.is_empty()
        || name.starts_with(|c: char| c.is_ascii_digit())
        || name
            .chars()
            .any(|c| !(c.is_ascii_alphanumeric() || c == '_' || c == '$'))
        || is_reserved(name)
}

/// Whether `name` is a reserved TypeScript keyword.
pub fn is_reserved(name: &str) -> bool {
    RESERVED_WORDS.contains(&name)
}

/// Double-quote a string with JavaScript escaping.
pub fn quote(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    out.push('"');
    for c in value.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            _ => out.push(c),
        }
    }
    out.push('"');
    out
}
