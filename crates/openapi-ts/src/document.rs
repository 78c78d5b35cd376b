//! OpenAPI document acquisition.

use crate::error::{Error, Result};
use serde_json::{Map, Value};
use std::path::Path;
use std::sync::LazyLock;

static NO_SCHEMAS: LazyLock<Map<String, Value>> = LazyLock::new(Map::new);

/// A parsed OpenAPI document.
#[derive(Debug, Clone)]
pub struct Document {
    root: Value,
    source: String,
}

impl Document {
    /// Load from a file path or an `http(s)` URL.
    pub fn load(source: &str) -> Result<Self> {
        let content = if is_url(source) {
            fetch(source)?
        } else {
            std::fs::read_to_string(Path::new(source))
                .map_err(|e| Error::Parse(format!("cannot read {source}: {e}")))?
        };
        tracing::debug!(source, bytes = content.len(), "loaded document");
        Self::parse(&content, source)
    }

    /// Parse document text. `source` names where it came from and picks the
    /// format: a `.json` suffix or a leading `{` means JSON, anything else YAML.
    pub fn parse(content: &str, source: &str) -> Result<Self> {
        let root = if is_json(content, source) {
            serde_json::from_str(content)
                .map_err(|e| Error::Parse(format!("{source}: invalid JSON: {e}")))?
        } else {
            serde_yaml::from_str(content)
                .map_err(|e| Error::Parse(format!("{source}: invalid YAML: {e}")))?
        };
        Ok(Self {
            root,
            source: source.to_string(),
        })
    }

    /// Wrap an already parsed document.
    pub fn from_value(root: Value) -> Self {
        Self {
            root,
            source: "<memory>".to_string(),
        }
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn root(&self) -> &Value {
        &self.root
    }

    /// The `openapi` version string.
    pub fn version(&self) -> Option<String> {
        match self.root.get("openapi")? {
            Value::String(s) => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            _ => None,
        }
    }

    /// Check that this is an OpenAPI 3.x document.
    pub fn validate(&self) -> Result<()> {
        if !self.root.is_object() {
            return Err(Error::Validation(format!(
                "{}: document root must be a mapping",
                self.source
            )));
        }
        if self.root.get("openapi").is_none() {
            let hint = if self.root.get("swagger").is_some() {
                " (Swagger 2.0 documents are not supported)"
            } else {
                ""
            };
            return Err(Error::Validation(format!(
                "{}: missing 'openapi' key{hint}",
                self.source
            )));
        }
        match self.version() {
            Some(version) if version.starts_with("3.") => Ok(()),
            Some(version) => Err(Error::Validation(format!(
                "{}: unsupported OpenAPI version {version}, expected 3.x",
                self.source
            ))),
            None => Err(Error::Validation(format!(
                "{}: 'openapi' must be a version string",
                self.source
            ))),
        }
    }

    /// Component schemas in document order; empty when there are none.
    pub fn schemas(&self) -> &Map<String, Value> {
        self.root
            .pointer("/components/schemas")
            .and_then(Value::as_object)
            .unwrap_or(&*NO_SCHEMAS)
    }

    /// Follow an intra-document `#/...` reference. External refs give `None`.
    pub fn resolve_ref(&self, reference: &str) -> Option<&Value> {
        let pointer = reference.strip_prefix('#')?;
        self.root.pointer(pointer)
    }
}

fn is_url(source: &str) -> bool {
    source.starts_with("http://") || source.starts_with("https://")
}

fn is_json(content: &str, source: &str) -> bool {
    let path = source.split(['?', '#']).next().unwrap_or(source);
    path.to_ascii_lowercase().ends_with(".json") || content.trim_start().starts_with('{')
}

#[cfg(feature = "fetch")]
fn fetch(url: &str) -> Result<String> {
    let agent = ureq::AgentBuilder::new()
        .timeout(std::time::Duration::from_secs(30))
        .build();
    let response = agent.get(url).call().map_err(|e| match e {
        ureq::Error::Status(code, response) => Error::Parse(format!(
            "failed to fetch {url}: HTTP {code} {}",
            response.status_text()
        )),
        other => Error::Parse(format!("failed to fetch {url}: {other}")),
    })?;
    response
        .into_string()
        .map_err(|e| Error::Parse(format!("failed to read response from {url}: {e}")))
}

#[cfg(not(feature = "fetch"))]
fn fetch(url: &str) -> Result<String> {
    Err(Error::Parse(format!(
        "cannot fetch {url}: built without the `fetch` feature"
    )))
}
