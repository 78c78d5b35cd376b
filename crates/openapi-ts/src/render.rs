//! Output document assembly.
//!
//! Each named root becomes one top-level declaration. The node decides its
//! own text; this module only picks the declaration form and lays out the
//! file.

use crate::ast::{TsKind, TsType, doc_line};
use crate::config::{Config, TypeStyle};

/// Options affecting declaration form and layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderOptions {
    pub export_types: bool,
    pub type_style: TypeStyle,
    pub union_enums: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            export_types: true,
            type_style: TypeStyle::Alias,
            union_enums: false,
        }
    }
}

impl From<&Config> for RenderOptions {
    fn from(config: &Config) -> Self {
        Self {
            export_types: config.export_types,
            type_style: config.type_style,
            union_enums: config.union_enums,
        }
    }
}

pub struct Renderer {
    options: RenderOptions,
}

impl Renderer {
    pub fn new(options: RenderOptions) -> Self {
        Self { options }
    }

    /// Lay out imports and declarations into the final file text.
    pub fn render(&self, types: &[TsType], imports: &[String]) -> String {
        let mut out = String::new();
        for import in imports {
            out.push_str(import);
            out.push('\n');
        }
        if !imports.is_empty() && !types.is_empty() {
            out.push('\n');
        }

        let declarations: Vec<String> = types.iter().filter_map(|ty| self.declaration(ty)).collect();
        out.push_str(&declarations.join("\n\n"));

        if !out.ends_with('\n') {
            out.push('\n');
        }
        out
    }

    /// One top-level declaration, with its doc comment. `None` for unnamed nodes.
    pub fn declaration(&self, ty: &TsType) -> Option<String> {
        let body = match &ty.kind {
            TsKind::Interface { .. }
                if self.options.type_style == TypeStyle::Interface && !ty.nullable =>
            {
                ty.interface_declaration()?
            }
            TsKind::Enum { .. } if !self.options.union_enums && !ty.nullable => {
                ty.enum_declaration()?
            }
            _ => ty.type_declaration()?,
        };

        let mut out = String::new();
        if let Some(doc) = ty.description.as_deref().and_then(doc_line) {
            out.push_str("/** ");
            out.push_str(&doc);
            out.push_str(" */\n");
        }
        if self.options.export_types {
            out.push_str("export ");
        }
        out.push_str(&body);
        Some(out)
    }
}
