//! TypeScript type generation from OpenAPI schemas.
//!
//! `openapi-ts` turns the `components/schemas` section of an OpenAPI 3.x
//! document into TypeScript declarations.
//!
//! # Architecture
//!
//! ```text
//! Document ──> TypeBuilder ──> TsType roots ──> Renderer ──> .ts text
//! (document.rs) (builder.rs)    (ast.rs)        (render.rs)
//!                   │
//!                   └─> used custom types ──> imports.rs
//! ```
//!
//! # Example
//!
//! ```
//! use openapi_ts::{Config, Document, Generator};
//!
//! let document = Document::from_value(serde_json::json!({
//!     "openapi": "3.0.0",
//!     "components": {
//!         "schemas": {
//!             "Pet": {
//!                 "type": "object",
//!                 "required": ["id"],
//!                 "properties": {
//!                     "id": { "type": "integer" },
//!                     "tag": { "type": "string", "nullable": true }
//!                 }
//!             }
//!         }
//!     }
//! }));
//!
//! let generation = Generator::new(Config::default()).generate_document(&document);
//! assert!(generation.output.contains("id: number;"));
//! assert!(generation.output.contains("tag?: string | null;"));
//! ```

pub mod ast;
pub mod builder;
pub mod config;
pub mod document;
pub mod error;
pub mod generator;
pub mod imports;
pub mod naming;
pub mod render;
pub mod schema;

pub use ast::{Discriminator, PrimitiveKind, TsKind, TsType};
pub use builder::{BuildContext, BuiltTypes, Diagnostic, TypeBuilder};
pub use config::{Config, TypeStyle};
pub use document::Document;
pub use error::{Error, Result};
pub use generator::{Generation, Generator};
pub use imports::resolve_imports;
pub use naming::Naming;
pub use render::{RenderOptions, Renderer};
