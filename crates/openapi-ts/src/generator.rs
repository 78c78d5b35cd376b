//! End-to-end generation: document in, TypeScript file out.

use crate::builder::{Diagnostic, TypeBuilder};
use crate::config::Config;
use crate::document::Document;
use crate::error::{Error, Result};
use crate::imports::resolve_imports;
use crate::naming::Naming;
use crate::render::{RenderOptions, Renderer};
use indexmap::IndexSet;
use std::path::Path;

/// Result of generating from an in-memory document.
#[derive(Debug, Clone, Default)]
pub struct Generation {
    /// Rendered file text.
    pub output: String,
    /// Custom type names referenced, in first-use order.
    pub used_types: IndexSet<String>,
    /// Import statements emitted at the top of `output`.
    pub imports: Vec<String>,
    pub diagnostics: Vec<Diagnostic>,
}

pub struct Generator {
    config: Config,
}

impl Generator {
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Load the configured input, generate, and write the configured output.
    ///
    /// Returns the rendered text.
    pub fn generate(&self) -> Result<String> {
        self.config.validate()?;
        let (Some(input), Some(output)) = (&self.config.input, &self.config.output) else {
            return Err(Error::Config("input and output paths are required".into()));
        };

        tracing::info!(input = %input, output = %output.display(), "generating types");
        let document = Document::load(input)?;
        if let Err(e) = document.validate() {
            if self.config.strict_validation {
                return Err(e);
            }
            tracing::warn!("{e}; continuing");
        }

        let generation = self.generate_document(&document);
        write_output(output, &generation.output)?;
        tracing::info!(
            output = %output.display(),
            bytes = generation.output.len(),
            "wrote types"
        );
        Ok(generation.output)
    }

    /// Build and render a document without touching the filesystem.
    pub fn generate_document(&self, document: &Document) -> Generation {
        let naming = Naming::new(&self.config.type_prefix, &self.config.type_suffix);
        let schemas = document.schemas();
        let built = TypeBuilder::new(&naming).with_components(schemas).build_all(schemas);

        for diagnostic in &built.diagnostics {
            tracing::warn!("{}", diagnostic);
        }

        let imports = resolve_imports(&built.used_types, &self.config.custom_type_imports);
        let output = Renderer::new(RenderOptions::from(&self.config)).render(&built.types, &imports);

        tracing::info!(
            schemas = built.types.len(),
            custom_types = built.used_types.len(),
            imports = imports.len(),
            diagnostics = built.diagnostics.len(),
            "rendered document"
        );

        Generation {
            output,
            used_types: built.used_types,
            imports,
            diagnostics: built.diagnostics,
        }
    }
}

fn write_output(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|source| Error::Write {
            path: parent.to_path_buf(),
            source,
        })?;
    }
    std::fs::write(path, content).map_err(|source| Error::Write {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn petstore() -> Document {
        Document::from_value(json!({
            "openapi": "3.0.0",
            "components": {"schemas": {
                "Pet": {
                    "type": "object",
                    "required": ["id", "name"],
                    "properties": {
                        "id": {"type": "integer", "format": "int64"},
                        "name": {"type": "string"},
                        "tag": {"type": "string", "nullable": true}
                    }
                },
                "Status": {"type": "string", "enum": ["available", "pending", "sold"]}
            }}
        }))
    }

    #[test]
    fn generates_in_memory() {
        let generation = Generator::new(Config::default()).generate_document(&petstore());
        assert!(generation.output.contains("export type Pet = {"));
        assert!(generation.output.contains("  id: number;"));
        assert!(generation.output.contains("  tag?: string | null;"));
        assert!(generation.output.contains("export enum Status {"));
        assert!(generation.imports.is_empty());
        assert!(generation.diagnostics.is_empty());
    }

    /// Counts WARN events.
    struct WarnCounter(Arc<AtomicUsize>);

    impl tracing::Subscriber for WarnCounter {
        fn enabled(&self, _: &tracing::Metadata<'_>) -> bool {
            true
        }
        fn new_span(&self, _: &tracing::span::Attributes<'_>) -> tracing::span::Id {
            tracing::span::Id::from_u64(1)
        }
        fn record(&self, _: &tracing::span::Id, _: &tracing::span::Record<'_>) {}
        fn record_follows_from(&self, _: &tracing::span::Id, _: &tracing::span::Id) {}
        fn event(&self, event: &tracing::Event<'_>) {
            if *event.metadata().level() == tracing::Level::WARN {
                self.0.fetch_add(1, Ordering::SeqCst);
            }
        }
        fn enter(&self, _: &tracing::span::Id) {}
        fn exit(&self, _: &tracing::span::Id) {}
    }

    #[test]
    fn each_diagnostic_warns_once() {
        let document = Document::from_value(json!({
            "openapi": "3.0.0",
            "components": {"schemas": {
                "Dog": {
                    "allOf": [{"$ref": "#/components/schemas/Pet"}],
                    "properties": {"bark": {"type": "boolean"}}
                }
            }}
        }));
        let warnings = Arc::new(AtomicUsize::new(0));
        let generation = tracing::subscriber::with_default(WarnCounter(warnings.clone()), || {
            Generator::new(Config::default()).generate_document(&document)
        });
        assert_eq!(generation.diagnostics.len(), 1);
        assert_eq!(warnings.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn requires_input_and_output() {
        let err = Generator::new(Config::default()).generate().unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn lenient_validation() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("api.json");
        std::fs::write(
            &input,
            r#"{"components": {"schemas": {"Id": {"type": "string"}}}}"#,
        )
        .unwrap();
        let output = dir.path().join("nested/dir/types.ts");

        let mut config = Config {
            input: Some(input.display().to_string()),
            output: Some(output.clone()),
            ..Config::default()
        };
        let err = Generator::new(config.clone()).generate().unwrap_err();
        assert!(matches!(err, Error::Validation(_)));
        assert!(!output.exists());

        config.strict_validation = false;
        let text = Generator::new(config).generate().unwrap();
        assert_eq!(text, "export type Id = string;\n");
        assert_eq!(std::fs::read_to_string(&output).unwrap(), text);
    }

    #[test]
    fn write_failure() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("file");
        std::fs::write(&blocker, "").unwrap();
        let err = write_output(&blocker.join("types.ts"), "x").unwrap_err();
        assert!(matches!(err, Error::Write { .. }));
    }
}
