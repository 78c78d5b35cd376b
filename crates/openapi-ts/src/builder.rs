//! Schema to type-AST translation.
//!
//! [`TypeBuilder::build`] classifies one schema node and recurses into its
//! children. Classification is tried in a fixed priority order and the first
//! match wins:
//!
//! ```text
//! $ref -> custom override -> oneOf -> allOf -> anyOf -> enum
//!      -> object shape -> array shape -> primitive
//! ```
//!
//! The builder never fails on malformed input: unknown shapes degrade to
//! `unknown` and unknown `type` names pass through as custom types. Custom
//! type names and diagnostics are collected in a [`BuildContext`] that the
//! caller threads through every call.

use crate::ast::{Discriminator, PrimitiveKind, TsKind, TsType};
use crate::naming::Naming;
use crate::schema;
use indexmap::{IndexMap, IndexSet};
use serde::Serialize;
use serde_json::{Map, Value};
use std::fmt;

/// Something worth reporting about the input that did not stop the build.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum Diagnostic {
    /// A schema has both a combinator and direct `properties`. The combinator
    /// wins and the properties are not emitted.
    AmbiguousCombinator { pointer: String, combinator: String },
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Diagnostic::AmbiguousCombinator {
                pointer,
                combinator,
            } => write!(
                f,
                "{pointer}: schema mixes `{combinator}` with `properties`; the properties are ignored"
            ),
        }
    }
}

/// Accumulator threaded through a build.
#[derive(Debug, Default)]
pub struct BuildContext {
    used_types: IndexSet<String>,
    diagnostics: Vec<Diagnostic>,
    path: Vec<String>,
}

impl BuildContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Custom type names referenced so far, in first-use order.
    pub fn used_types(&self) -> &IndexSet<String> {
        &self.used_types
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    pub fn record_used(&mut self, type_name: &str) {
        if !self.used_types.contains(type_name) {
            self.used_types.insert(type_name.to_string());
        }
    }

    pub fn into_parts(self) -> (IndexSet<String>, Vec<Diagnostic>) {
        (self.used_types, self.diagnostics)
    }

    fn pointer(&self) -> String {
        format!("#/{}", self.path.join("/"))
    }

    fn scoped<T>(&mut self, segment: String, f: impl FnOnce(&mut Self) -> T) -> T {
        self.path.push(segment);
        let out = f(self);
        self.path.pop();
        out
    }
}

/// Result of building every schema in a document.
#[derive(Debug, Default)]
pub struct BuiltTypes {
    /// One named root per input schema, in input order.
    pub types: Vec<TsType>,
    pub used_types: IndexSet<String>,
    pub diagnostics: Vec<Diagnostic>,
}

/// Builds [`TsType`] trees from schema nodes.
pub struct TypeBuilder<'a> {
    naming: &'a Naming,
    components: Option<&'a Map<String, Value>>,
}

impl<'a> TypeBuilder<'a> {
    pub fn new(naming: &'a Naming) -> Self {
        Self {
            naming,
            components: None,
        }
    }

    /// Component schemas used to backfill descriptions of `$ref` nodes.
    pub fn with_components(mut self, components: &'a Map<String, Value>) -> Self {
        self.components = Some(components);
        self
    }

    /// Build every schema of an ordered `name -> schema` map.
    pub fn build_all(&self, schemas: &Map<String, Value>) -> BuiltTypes {
        let mut ctx = BuildContext::new();
        let mut types = Vec::with_capacity(schemas.len());
        for (name, schema) in schemas {
            let ty = ctx.scoped(format!("components/schemas/{}", escape_pointer(name)), |ctx| {
                self.build(Some(schema), Some(name.as_str()), ctx)
            });
            tracing::debug!(schema = %name, type_name = ?ty.name, "built schema");
            types.push(ty);
        }
        let (used_types, diagnostics) = ctx.into_parts();
        BuiltTypes {
            types,
            used_types,
            diagnostics,
        }
    }

    /// Build one schema node. `name` makes the result a declarable root.
    pub fn build(&self, schema: Option<&Value>, name: Option<&str>, ctx: &mut BuildContext) -> TsType {
        let name = name.map(|n| self.naming.format_type_name(n));
        let Some(schema) = schema else {
            return with_name(TsType::unknown(), name);
        };

        if let Some(reference) = schema::ref_target(schema) {
            return with_name(self.build_reference(schema, reference), name);
        }

        let nullable = schema::is_nullable(schema);
        let description = schema::description(schema).map(String::from);

        let ty = if let Some(custom) = schema::custom_type(schema) {
            ctx.record_used(custom);
            TsType::custom(custom)
        } else {
            self.build_shape(schema, ctx)
        };

        let mut ty = with_name(ty, name).with_nullable(nullable);
        if matches!(ty.kind, TsKind::Primitive(PrimitiveKind::Null)) {
            ty.nullable = false;
        }
        ty.description = description;
        ty
    }

    fn build_shape(&self, schema: &Value, ctx: &mut BuildContext) -> TsType {
        if schema::mixes_combinator_and_properties(schema) {
            let combinator = ["oneOf", "allOf", "anyOf"]
                .into_iter()
                .find(|key| schema::non_empty_list(schema, key).is_some())
                .unwrap_or("oneOf");
            let diagnostic = Diagnostic::AmbiguousCombinator {
                pointer: ctx.pointer(),
                combinator: combinator.to_string(),
            };
            ctx.diagnostics.push(diagnostic);
        }

        if let Some(members) = schema::non_empty_list(schema, "oneOf") {
            self.build_union(schema, "oneOf", members, ctx)
        } else if let Some(members) = schema::non_empty_list(schema, "allOf") {
            self.build_intersection(members, ctx)
        } else if let Some(members) = schema::non_empty_list(schema, "anyOf") {
            self.build_union(schema, "anyOf", members, ctx)
        } else if let Some(values) = schema::non_empty_list(schema, "enum") {
            build_enum(schema, values)
        } else if schema::is_object_shaped(schema) {
            self.build_interface(schema, ctx)
        } else if schema::is_array_shaped(schema) {
            self.build_array(schema, ctx)
        } else {
            build_primitive(schema, ctx)
        }
    }

    fn build_reference(&self, schema: &Value, reference: &str) -> TsType {
        let ty = TsType::reference(self.naming.format_type_name(&schema::ref_name(reference)))
            .with_nullable(schema.get("nullable").and_then(Value::as_bool) == Some(true));

        let description = schema::description(schema).or_else(|| {
            let target = schema::component_name(reference)?;
            schema::description(self.components?.get(target.as_ref())?)
        });
        match description {
            Some(d) => ty.with_description(d),
            None => ty,
        }
    }

    fn build_union(
        &self,
        schema: &Value,
        keyword: &str,
        members: &[Value],
        ctx: &mut BuildContext,
    ) -> TsType {
        let members = self.build_members(keyword, members, ctx);
        TsType::union(members, discriminator(schema))
    }

    fn build_intersection(&self, members: &[Value], ctx: &mut BuildContext) -> TsType {
        TsType::intersection(self.build_members("allOf", members, ctx))
    }

    fn build_members(&self, keyword: &str, members: &[Value], ctx: &mut BuildContext) -> Vec<TsType> {
        members
            .iter()
            .enumerate()
            .map(|(i, member)| {
                ctx.scoped(format!("{keyword}/{i}"), |ctx| self.build(Some(member), None, ctx))
            })
            .collect()
    }

    fn build_interface(&self, schema: &Value, ctx: &mut BuildContext) -> TsType {
        let mut properties = IndexMap::new();
        if let Some(props) = schema::properties(schema) {
            for (prop_name, prop_schema) in props {
                let ty = ctx.scoped(format!("properties/{}", escape_pointer(prop_name)), |ctx| {
                    self.build(Some(prop_schema), None, ctx)
                });
                properties.insert(prop_name.clone(), ty);
            }
        }

        let additional = match schema.get("additionalProperties") {
            Some(Value::Bool(true)) => Some(TsType::unknown()),
            Some(ap @ Value::Object(_)) => Some(ctx.scoped("additionalProperties".to_string(), |ctx| {
                self.build(Some(ap), None, ctx)
            })),
            _ => None,
        };

        TsType::interface(properties, schema::required(schema), additional)
    }

    fn build_array(&self, schema: &Value, ctx: &mut BuildContext) -> TsType {
        let item = match schema.get("items") {
            None | Some(Value::Null) => TsType::unknown(),
            Some(items) => ctx.scoped("items".to_string(), |ctx| self.build(Some(items), None, ctx)),
        };
        TsType::array(item)
    }
}

fn with_name(ty: TsType, name: Option<String>) -> TsType {
    match name {
        Some(name) => ty.named(name),
        None => ty,
    }
}

fn build_enum(schema: &Value, values: &[Value]) -> TsType {
    let string_enum =
        schema::normalized_type(schema) == Some("string") || values.iter().all(Value::is_string);
    TsType::enumeration(values.to_vec(), string_enum)
}

fn build_primitive(schema: &Value, ctx: &mut BuildContext) -> TsType {
    let Some(type_name) = schema::normalized_type(schema).filter(|t| !t.is_empty()) else {
        return TsType::unknown();
    };
    match primitive_for(type_name) {
        Some(kind) => TsType::primitive(narrow_format(kind, schema::format(schema))),
        None => {
            ctx.record_used(type_name);
            TsType::custom(type_name)
        }
    }
}

/// OpenAPI `type` to TypeScript primitive.
fn primitive_for(type_name: &str) -> Option<PrimitiveKind> {
    Some(match type_name {
        "string" => PrimitiveKind::String,
        "number" | "integer" => PrimitiveKind::Number,
        "boolean" => PrimitiveKind::Boolean,
        "null" => PrimitiveKind::Null,
        _ => return None,
    })
}

fn narrow_format(kind: PrimitiveKind, format: Option<&str>) -> PrimitiveKind {
    match format {
        Some("date" | "date-time") => PrimitiveKind::String,
        Some("int32" | "int64" | "float" | "double") => PrimitiveKind::Number,
        _ => kind,
    }
}

fn discriminator(schema: &Value) -> Option<Discriminator> {
    let disc = schema.get("discriminator")?;
    let property_name = disc.get("propertyName")?.as_str()?.to_string();
    let mapping = disc
        .get("mapping")
        .and_then(Value::as_object)
        .map(|m| {
            m.iter()
                .filter_map(|(k, v)| Some((k.clone(), v.as_str()?.to_string())))
                .collect()
        })
        .unwrap_or_default();
    Some(Discriminator {
        property_name,
        mapping,
    })
}

/// RFC 6901 escaping for one pointer segment.
fn escape_pointer(segment: &str) -> String {
    segment.replace('~', "~0").replace('/', "~1")
}
