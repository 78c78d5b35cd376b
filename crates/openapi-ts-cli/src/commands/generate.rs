//! Generate command - TypeScript declarations from an OpenAPI document.

use anyhow::Context;
use clap::{Args, ValueEnum};
use openapi_ts::{Config, Generator, TypeStyle};
use std::path::PathBuf;

/// Generate command arguments
#[derive(Args, Debug, Default)]
pub struct GenerateArgs {
    /// OpenAPI document (path or http(s) URL, JSON or YAML)
    #[arg(short, long)]
    pub input: Option<String>,

    /// Output .ts file
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Prefix added to every type name
    #[arg(long)]
    pub prefix: Option<String>,

    /// Suffix added to every type name
    #[arg(long)]
    pub suffix: Option<String>,

    /// Do not add `export` to declarations
    #[arg(long)]
    pub no_export: bool,

    /// Declaration form for object schemas
    #[arg(long, value_enum)]
    pub type_style: Option<StyleArg>,

    /// Emit named enums as string-literal unions
    #[arg(long)]
    pub union_enums: bool,

    /// Import statement for a custom type, e.g. `Dayjs=import { Dayjs } from 'dayjs';`
    #[arg(long = "import", value_name = "NAME=STATEMENT", value_parser = parse_import)]
    pub imports: Vec<(String, String)>,

    /// Config file (defaults to ./openapi-ts.toml when present)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Continue when the document fails validation
    #[arg(long)]
    pub no_strict_validation: bool,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum StyleArg {
    /// `type Name = { ... };`
    Alias,
    /// `interface Name { ... }`
    Interface,
}

impl From<StyleArg> for TypeStyle {
    fn from(style: StyleArg) -> Self {
        match style {
            StyleArg::Alias => TypeStyle::Alias,
            StyleArg::Interface => TypeStyle::Interface,
        }
    }
}

/// Run the generate command
pub fn run(args: GenerateArgs) -> i32 {
    match generate(args) {
        Ok(output) => {
            eprintln!("Types generated successfully to {}", output.display());
            0
        }
        Err(e) => {
            eprintln!("Error: {:#}", e);
            1
        }
    }
}

fn generate(args: GenerateArgs) -> anyhow::Result<PathBuf> {
    let base = match &args.config {
        Some(path) => Config::load_file(path)?,
        None => {
            let cwd = std::env::current_dir().context("cannot determine working directory")?;
            Config::discover(&cwd)?
        }
    };
    let config = apply_args(base, args);
    config.validate()?;
    let output = config.output.clone().unwrap_or_default();

    Generator::new(config)
        .generate()
        .with_context(|| format!("generating {}", output.display()))?;
    Ok(output)
}

/// Command-line flags take precedence over the config file.
fn apply_args(mut config: Config, args: GenerateArgs) -> Config {
    if args.input.is_some() {
        config.input = args.input;
    }
    if args.output.is_some() {
        config.output = args.output;
    }
    if let Some(prefix) = args.prefix {
        config.type_prefix = prefix;
    }
    if let Some(suffix) = args.suffix {
        config.type_suffix = suffix;
    }
    if args.no_export {
        config.export_types = false;
    }
    if let Some(style) = args.type_style {
        config.type_style = style.into();
    }
    if args.union_enums {
        config.union_enums = true;
    }
    if args.no_strict_validation {
        config.strict_validation = false;
    }
    config.custom_type_imports.extend(args.imports);
    config
}

/// Parse `Name=statement`, splitting on the first `=`.
fn parse_import(s: &str) -> Result<(String, String), String> {
    let (name, statement) = s
        .split_once('=')
        .ok_or_else(|| format!("expected NAME=STATEMENT, got `{}`", s))?;
    let name = name.trim();
    if name.is_empty() {
        return Err("custom type name must not be empty".to_string());
    }
    Ok((name.to_string(), statement.trim().to_string()))
}
