//! TypeScript type AST.
//!
//! The builder produces one [`TsType`] tree per top-level schema. Every node
//! renders itself; the renderer only decides how a named root is wrapped.
//!
//! A node with a `name` can be emitted as a standalone declaration. A node
//! without one only ever appears inline inside its parent.

use crate::error::Error;
use crate::naming::{format_property_name, quote};
use indexmap::IndexMap;
use serde::Serialize;
use serde_json::Value;
use std::fmt;
use std::str::FromStr;

/// Built-in TypeScript types plus sentinel kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PrimitiveKind {
    String,
    Number,
    Boolean,
    Null,
    Any,
    Unknown,
    Void,
    Never,
}

impl PrimitiveKind {
    /// Every valid kind name, in declaration order.
    pub const NAMES: &'static [&'static str] = &[
        "string", "number", "boolean", "null", "any", "unknown", "void", "never",
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            PrimitiveKind::String => "string",
            PrimitiveKind::Number => "number",
            PrimitiveKind::Boolean => "boolean",
            PrimitiveKind::Null => "null",
            PrimitiveKind::Any => "any",
            PrimitiveKind::Unknown => "unknown",
            PrimitiveKind::Void => "void",
            PrimitiveKind::Never => "never",
        }
    }
}

impl FromStr for PrimitiveKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "string" => PrimitiveKind::String,
            "number" => PrimitiveKind::Number,
            "boolean" => PrimitiveKind::Boolean,
            "null" => PrimitiveKind::Null,
            "any" => PrimitiveKind::Any,
            "unknown" => PrimitiveKind::Unknown,
            "void" => PrimitiveKind::Void,
            "never" => PrimitiveKind::Never,
            other => return Err(Error::InvalidPrimitive(other.to_string())),
        })
    }
}

impl fmt::Display for PrimitiveKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Discriminator metadata attached to a union.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Discriminator {
    /// Name of the tag property.
    pub property_name: String,
    /// Tag value to target reference, verbatim from the schema.
    pub mapping: IndexMap<String, String>,
}

/// The shape of a type node.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum TsKind {
    Primitive(PrimitiveKind),
    /// A single fixed value (`"a"`, `1`, `true`).
    Literal(Value),
    /// An externally supplied type name.
    Custom(String),
    /// A declared type name from the same document.
    Reference(String),
    Array(Box<TsType>),
    Enum {
        values: Vec<Value>,
        string_enum: bool,
    },
    Interface {
        properties: IndexMap<String, TsType>,
        required: Vec<String>,
        additional_properties: Option<Box<TsType>>,
    },
    Union {
        members: Vec<TsType>,
        discriminator: Option<Discriminator>,
    },
    Intersection(Vec<TsType>),
}

/// A TypeScript type.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TsType {
    /// Declared name; `None` for inline types.
    pub name: Option<String>,
    /// Documentation text.
    pub description: Option<String>,
    /// Whether `null` is part of the type.
    pub nullable: bool,
    pub kind: TsKind,
}

/// Binding strength of a rendered type, used to decide parenthesization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum Precedence {
    Union,
    Intersection,
    Atom,
}

impl TsType {
    pub fn new(kind: TsKind) -> Self {
        Self {
            name: None,
            description: None,
            nullable: false,
            kind,
        }
    }

    pub fn primitive(kind: PrimitiveKind) -> Self {
        Self::new(TsKind::Primitive(kind))
    }

    /// Build a primitive from its kind name.
    ///
    /// Fails with [`Error::InvalidPrimitive`] for names outside
    /// [`PrimitiveKind::NAMES`].
    pub fn primitive_named(kind: &str) -> Result<Self, Error> {
        Ok(Self::primitive(kind.parse()?))
    }

    pub fn unknown() -> Self {
        Self::primitive(PrimitiveKind::Unknown)
    }

    pub fn literal(value: Value) -> Self {
        Self::new(TsKind::Literal(value))
    }

    pub fn custom(type_name: impl Into<String>) -> Self {
        Self::new(TsKind::Custom(type_name.into()))
    }

    pub fn reference(ref_name: impl Into<String>) -> Self {
        Self::new(TsKind::Reference(ref_name.into()))
    }

    pub fn array(item: TsType) -> Self {
        Self::new(TsKind::Array(Box::new(item)))
    }

    pub fn enumeration(values: Vec<Value>, string_enum: bool) -> Self {
        Self::new(TsKind::Enum {
            values,
            string_enum,
        })
    }

    pub fn interface(
        properties: IndexMap<String, TsType>,
        required: Vec<String>,
        additional_properties: Option<TsType>,
    ) -> Self {
        Self::new(TsKind::Interface {
            properties,
            required,
            additional_properties: additional_properties.map(Box::new),
        })
    }

    pub fn union(members: Vec<TsType>, discriminator: Option<Discriminator>) -> Self {
        Self::new(TsKind::Union {
            members,
            discriminator,
        })
    }

    pub fn intersection(members: Vec<TsType>) -> Self {
        Self::new(TsKind::Intersection(members))
    }

    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_nullable(mut self, nullable: bool) -> Self {
        self.nullable = nullable;
        self
    }

    /// Render this node.
    ///
    /// Named interfaces render as `interface` declarations and named enums as
    /// `enum` declarations; everything else renders inline.
    pub fn render(&self) -> String {
        match (&self.name, &self.kind) {
            (Some(name), TsKind::Interface { .. }) => self.interface_body(name),
            (Some(name), TsKind::Enum { values, .. }) => enum_body(name, values),
            _ => self.render_inline(),
        }
    }

    /// Render as an inline type expression, ignoring the name.
    pub fn render_inline(&self) -> String {
        let mut out = String::new();
        self.write_inline(&mut out, 0);
        out
    }

    /// `interface Name { ... }` for a named object type.
    pub fn interface_declaration(&self) -> Option<String> {
        match (&self.name, &self.kind) {
            (Some(name), TsKind::Interface { .. }) => Some(self.interface_body(name)),
            _ => None,
        }
    }

    /// `type Name = ...;` for any named node.
    pub fn type_declaration(&self) -> Option<String> {
        let name = self.name.as_deref()?;
        Some(format!("type {} = {};", name, self.render_inline()))
    }

    /// `enum Name { ... }` for a named enum.
    pub fn enum_declaration(&self) -> Option<String> {
        match (&self.name, &self.kind) {
            (Some(name), TsKind::Enum { values, .. }) => Some(enum_body(name, values)),
            _ => None,
        }
    }

    fn interface_body(&self, name: &str) -> String {
        let mut out = format!("interface {} {{\n", name);
        self.write_members(&mut out, 1);
        out.push('}');
        out
    }

    fn write_inline(&self, out: &mut String, depth: usize) {
        match &self.kind {
            TsKind::Primitive(kind) => out.push_str(kind.as_str()),
            TsKind::Literal(value) => out.push_str(&literal(value)),
            TsKind::Custom(name) | TsKind::Reference(name) => out.push_str(name),
            TsKind::Array(item) => {
                let wrap = item.precedence() < Precedence::Atom;
                if wrap {
                    out.push('(');
                }
                item.write_inline(out, depth);
                if wrap {
                    out.push(')');
                }
                out.push_str("[]");
            }
            TsKind::Enum { values, .. } => {
                if values.is_empty() {
                    out.push_str("never");
                }
                for (i, value) in values.iter().enumerate() {
                    if i > 0 {
                        out.push_str(" | ");
                    }
                    out.push_str(&literal(value));
                }
            }
            TsKind::Interface {
                properties,
                additional_properties,
                ..
            } => {
                if properties.is_empty() && additional_properties.is_none() {
                    out.push_str("{}");
                } else {
                    out.push_str("{\n");
                    self.write_members(out, depth + 1);
                    indent(out, depth);
                    out.push('}');
                }
            }
            TsKind::Union { members, .. } => {
                if members.is_empty() {
                    out.push_str("never");
                }
                for (i, member) in members.iter().enumerate() {
                    if i > 0 {
                        out.push_str(" | ");
                    }
                    member.write_inline(out, depth);
                }
            }
            TsKind::Intersection(members) => {
                if members.is_empty() {
                    out.push_str("unknown");
                }
                for (i, member) in members.iter().enumerate() {
                    if i > 0 {
                        out.push_str(" & ");
                    }
                    let wrap = member.precedence() == Precedence::Union;
                    if wrap {
                        out.push('(');
                    }
                    member.write_inline(out, depth);
                    if wrap {
                        out.push(')');
                    }
                }
            }
        }

        if self.nullable && !self.lists_null() {
            out.push_str(" | null");
        }
    }

    /// Whether the rendered union already has a top-level `null` member.
    fn lists_null(&self) -> bool {
        match &self.kind {
            TsKind::Primitive(PrimitiveKind::Null) | TsKind::Literal(Value::Null) => true,
            TsKind::Enum { values, .. } => values.iter().any(Value::is_null),
            TsKind::Union { members, .. } => members.iter().any(|m| m.nullable || m.lists_null()),
            _ => false,
        }
    }

    /// Property lines of an object type, each indented to `depth`.
    fn write_members(&self, out: &mut String, depth: usize) {
        let TsKind::Interface {
            properties,
            required,
            additional_properties,
        } = &self.kind
        else {
            return;
        };

        for (prop_name, prop_type) in properties {
            if let Some(doc) = prop_type.description.as_deref().and_then(doc_line) {
                indent(out, depth);
                out.push_str("/** ");
                out.push_str(&doc);
                out.push_str(" */\n");
            }

            indent(out, depth);
            out.push_str(&format_property_name(prop_name));
            if !required.iter().any(|r| r == prop_name) {
                out.push('?');
            }
            out.push_str(": ");
            prop_type.write_inline(out, depth);
            out.push_str(";\n");
        }

        if let Some(index_type) = additional_properties {
            indent(out, depth);
            out.push_str("[key: string]: ");
            index_type.write_inline(out, depth);
            out.push_str(";\n");
        }
    }

    fn precedence(&self) -> Precedence {
        if self.nullable {
            return Precedence::Union;
        }
        match &self.kind {
            TsKind::Union { members, .. } => match members.as_slice() {
                [] => Precedence::Atom,
                [only] => only.precedence(),
                _ => Precedence::Union,
            },
            TsKind::Intersection(members) => match members.as_slice() {
                [] => Precedence::Atom,
                [only] => only.precedence(),
                _ => Precedence::Intersection,
            },
            TsKind::Enum { values, .. } if values.len() > 1 => Precedence::Union,
            TsKind::Custom(name) => custom_precedence(name),
            _ => Precedence::Atom,
        }
    }
}

/// Precedence of a free-form custom type expression like `Date | string`.
fn custom_precedence(name: &str) -> Precedence {
    let mut depth = 0i32;
    let mut result = Precedence::Atom;
    let mut chars = name.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            // arrow of a function type
            '=' if chars.peek() == Some(&'>') => {
                chars.next();
                if depth == 0 {
                    return Precedence::Union;
                }
            }
            '(' | '<' | '[' | '{' => depth += 1,
            ')' | '>' | ']' | '}' => depth -= 1,
            '|' if depth == 0 => return Precedence::Union,
            '&' if depth == 0 => result = Precedence::Intersection,
            _ => {}
        }
    }
    result
}

fn enum_body(name: &str, values: &[Value]) -> String {
    let mut out = format!("enum {} {{\n", name);
    let mut seen: Vec<String> = Vec::new();
    for value in values {
        if value.is_null() {
            continue;
        }
        let base = enum_key(value);
        let mut key = base.clone();
        let mut n = 2;
        while seen.contains(&key) {
            key = format!("{}_{}", base, n);
            n += 1;
        }
        out.push_str("  ");
        out.push_str(&key);
        out.push_str(" = ");
        out.push_str(&literal(value));
        out.push_str(",\n");
        seen.push(key);
    }
    out.push('}');
    out
}

/// Derive an enum member key from its value, e.g. `in-progress` -> `IN_PROGRESS`.
pub fn enum_key(value: &Value) -> String {
    let raw = match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    };

    let mut key = String::with_capacity(raw.len());
    let mut in_run = false;
    for c in raw.chars() {
        if c.is_ascii_alphanumeric() || c == '_' {
            key.push(c.to_ascii_uppercase());
            in_run = false;
        } else if !in_run {
            key.push('_');
            in_run = true;
        }
    }

    if key.is_empty() {
        return "EMPTY".to_string();
    }
    if key.starts_with(|c: char| c.is_ascii_digit()) {
        key.insert(0, '_');
    }
    key
}

/// Render a JSON scalar as a TypeScript literal.
pub fn literal(value: &Value) -> String {
    match value {
        Value::String(s) => quote(s),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => "null".to_string(),
        other => quote(&other.to_string()),
    }
}

/// Collapse a description into a single comment-safe line.
pub(crate) fn doc_line(description: &str) -> Option<String> {
    let line = description
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .collect::<Vec<_>>()
        .join(" ");
    if line.is_empty() {
        None
    } else {
        Some(line.replace("*/", "*\\/"))
    }
}

fn indent(out: &mut String, depth: usize) {
    for _ in 0..depth {
        out.push_str("  ");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn string() -> TsType {
        TsType::primitive(PrimitiveKind::String)
    }

    fn number() -> TsType {
        TsType::primitive(PrimitiveKind::Number)
    }

    fn props(entries: Vec<(&str, TsType)>) -> IndexMap<String, TsType> {
        entries
            .into_iter()
            .map(|(k, v)| (k.to_string(), v))
            .collect()
    }

    #[test]
    fn primitive_kinds() {
        for name in PrimitiveKind::NAMES {
            let ty = TsType::primitive_named(name).unwrap();
            assert_eq!(ty.render(), *name);
        }
        assert_eq!(string().with_nullable(true).render(), "string | null");
    }

    #[test]
    fn invalid_primitive_rejected() {
        let err = TsType::primitive_named("object").unwrap_err();
        assert!(matches!(err, Error::InvalidPrimitive(ref k) if k == "object"));
        assert!(err.to_string().contains("Valid types: string, number"));
    }

    #[test]
    fn literals() {
        assert_eq!(TsType::literal(json!("a\"b")).render(), r#""a\"b""#);
        assert_eq!(TsType::literal(json!(42)).render(), "42");
        assert_eq!(TsType::literal(json!(true)).render(), "true");
        assert_eq!(TsType::literal(json!(null)).render(), "null");
        assert_eq!(
            TsType::literal(json!("x")).with_nullable(true).render(),
            "\"x\" | null"
        );
    }

    #[test]
    fn reference_and_custom() {
        assert_eq!(TsType::reference("Category").render(), "Category");
        assert_eq!(
            TsType::custom("Dayjs").with_nullable(true).render(),
            "Dayjs | null"
        );
    }

    #[test]
    fn arrays() {
        assert_eq!(TsType::array(string()).render(), "string[]");
        assert_eq!(
            TsType::array(TsType::union(vec![string(), number()], None)).render(),
            "(string | number)[]"
        );
        assert_eq!(
            TsType::array(string().with_nullable(true)).render(),
            "(string | null)[]"
        );
        assert_eq!(
            TsType::array(TsType::array(number()))
                .with_nullable(true)
                .render(),
            "number[][] | null"
        );
        assert_eq!(
            TsType::array(TsType::custom("Date | string")).render(),
            "(Date | string)[]"
        );
        assert_eq!(
            TsType::array(TsType::custom("Record<string, A | B>")).render(),
            "Record<string, A | B>[]"
        );
    }

    #[test]
    fn unions() {
        assert_eq!(TsType::union(vec![], None).render(), "never");
        assert_eq!(
            TsType::union(vec![string(), number()], None)
                .with_nullable(true)
                .render(),
            "string | number | null"
        );
        let named = TsType::union(vec![string(), number()], None).named("Id");
        assert_eq!(named.render(), "string | number");
        assert_eq!(
            named.type_declaration().as_deref(),
            Some("type Id = string | number;")
        );
    }

    #[test]
    fn null_is_listed_once() {
        let ty = TsType::enumeration(vec![json!("a"), json!(null)], true).with_nullable(true);
        assert_eq!(ty.render(), r#""a" | null"#);

        let ty = TsType::union(vec![string(), TsType::primitive(PrimitiveKind::Null)], None)
            .with_nullable(true);
        assert_eq!(ty.render(), "string | null");

        let ty = TsType::union(vec![string(), number().with_nullable(true)], None)
            .with_nullable(true);
        assert_eq!(ty.render(), "string | number | null");

        assert_eq!(
            TsType::union(vec![string()], None).with_nullable(true).render(),
            "string | null"
        );
    }

    #[test]
    fn function_custom_types_are_wrapped() {
        assert_eq!(
            TsType::array(TsType::custom("(a: string) => void")).render(),
            "((a: string) => void)[]"
        );
        assert_eq!(
            TsType::array(TsType::custom("Array<(a: string) => void>")).render(),
            "Array<(a: string) => void>[]"
        );
        assert_eq!(
            TsType::intersection(vec![
                TsType::reference("Base"),
                TsType::custom("() => Base"),
            ])
            .render(),
            "Base & (() => Base)"
        );
    }

    #[test]
    fn intersections() {
        assert_eq!(TsType::intersection(vec![]).render(), "unknown");
        let ty = TsType::intersection(vec![
            TsType::reference("Base"),
            TsType::union(vec![TsType::reference("A"), TsType::reference("B")], None),
        ]);
        assert_eq!(ty.render(), "Base & (A | B)");
        assert_eq!(
            TsType::array(ty).render(),
            "(Base & (A | B))[]"
        );
    }

    #[test]
    fn named_enum_declaration() {
        let ty = TsType::enumeration(vec![json!("active"), json!("inactive")], true).named("Status");
        assert_eq!(
            ty.render(),
            "enum Status {\n  ACTIVE = \"active\",\n  INACTIVE = \"inactive\",\n}"
        );
    }

    #[test]
    fn numeric_enum_declaration() {
        let ty = TsType::enumeration(vec![json!(1), json!(2), json!(3)], false).named("Priority");
        assert_eq!(
            ty.enum_declaration().unwrap(),
            "enum Priority {\n  _1 = 1,\n  _2 = 2,\n  _3 = 3,\n}"
        );
    }

    #[test]
    fn enum_keys() {
        assert_eq!(enum_key(&json!("in-progress")), "IN_PROGRESS");
        assert_eq!(enum_key(&json!("a  --  b")), "A_B");
        assert_eq!(enum_key(&json!("2fa")), "_2FA");
        assert_eq!(enum_key(&json!("")), "EMPTY");
        assert_eq!(enum_key(&json!(1.5)), "_1_5");
        assert_eq!(enum_key(&json!(true)), "TRUE");
    }

    #[test]
    fn enum_duplicate_keys_and_nulls() {
        let ty = TsType::enumeration(vec![json!("a-b"), json!("a b"), json!(null)], true)
            .named("Odd");
        assert_eq!(
            ty.render(),
            "enum Odd {\n  A_B = \"a-b\",\n  A_B_2 = \"a b\",\n}"
        );
    }

    #[test]
    fn inline_enum_union() {
        let ty = TsType::enumeration(
            vec![json!("available"), json!("pending"), json!("sold")],
            true,
        );
        assert_eq!(ty.render(), r#""available" | "pending" | "sold""#);
        assert_eq!(
            ty.with_nullable(true).render(),
            r#""available" | "pending" | "sold" | null"#
        );
    }

    #[test]
    fn interface_declaration() {
        let ty = TsType::interface(
            props(vec![("id", number()), ("name", string())]),
            vec!["id".into(), "name".into()],
            None,
        )
        .named("User");
        assert_eq!(
            ty.render(),
            "interface User {\n  id: number;\n  name: string;\n}"
        );
        assert_eq!(
            ty.type_declaration().unwrap(),
            "type User = {\n  id: number;\n  name: string;\n};"
        );
    }

    #[test]
    fn optional_properties_follow_required_set() {
        let ty = TsType::interface(
            props(vec![("id", number()), ("name", string())]),
            vec!["id".into()],
            None,
        )
        .named("User");
        assert_eq!(
            ty.render(),
            "interface User {\n  id: number;\n  name?: string;\n}"
        );
    }

    #[test]
    fn inline_object() {
        let ty = TsType::interface(props(vec![("x", number())]), vec!["x".into()], None);
        assert_eq!(ty.render(), "{\n  x: number;\n}");
        assert_eq!(TsType::interface(IndexMap::new(), vec![], None).render(), "{}");
        assert_eq!(
            TsType::interface(IndexMap::new(), vec![], None)
                .with_nullable(true)
                .render(),
            "{} | null"
        );
    }

    #[test]
    fn nested_objects_indent() {
        let inner = TsType::interface(props(vec![("name", string())]), vec!["name".into()], None);
        let ty = TsType::interface(props(vec![("owner", inner)]), vec![], None).named("Pet");
        assert_eq!(
            ty.type_declaration().unwrap(),
            "type Pet = {\n  owner?: {\n    name: string;\n  };\n};"
        );
    }

    #[test]
    fn property_docs_quotes_and_index_signature() {
        let ty = TsType::interface(
            props(vec![
                ("content-type", string().with_description("MIME type\nof the body")),
                ("class", number().with_description("   ")),
            ]),
            vec!["class".into()],
            Some(TsType::unknown()),
        )
        .named("Meta");
        assert_eq!(
            ty.render(),
            "interface Meta {\n  /** MIME type of the body */\n  \"content-type\"?: string;\n  \"class\": number;\n  [key: string]: unknown;\n}"
        );
    }

    #[test]
    fn doc_line_escapes_comment_end() {
        assert_eq!(doc_line("a */ b").as_deref(), Some("a *\\/ b"));
        assert_eq!(doc_line("\n \n"), None);
    }
}
