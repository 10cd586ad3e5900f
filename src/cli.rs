//! CLI: compile a schema file, then check JSON/NDJSON documents against it.
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use colored::Colorize;
use rayon::prelude::*;

use conform::path_de::{self, Document};
use conform::{compile, CompiledSchema, LoadError, Options, Validator};

// ————————————————————————————————————————————————————————————————————————————
// TYPES
// ————————————————————————————————————————————————————————————————————————————

/// check JSON documents against a compact schema description
#[derive(Parser, Debug)]
#[command(name = "conform")]
pub struct CommandLineInterface {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// validate every input document and report the first mismatch of each
    Check(CheckOut),
    /// print the compiled form of a schema
    Compile(CompileOut),
}

#[derive(Args, Debug, Clone)]
struct SchemaSettings {
    /// schema description file (JSON encoding)
    #[arg(long, short)]
    schema: PathBuf,

    /// treat symbol and string keys with the same text as one key
    #[arg(long, default_value_t = false)]
    indifferent_access: bool,
}

#[derive(Args, Debug, Clone)]
struct InputSettings {
    /// treat input as newline-delimited JSON (NDJSON)
    #[arg(long, default_value_t = false)]
    ndjson: bool,

    /// JSON Pointer to select a subnode in each document (e.g. /data/items/0/payload)
    #[arg(long)]
    json_pointer: Option<String>,

    /// One or more inputs. May be literal paths or quoted glob patterns
    #[arg(long, short, num_args = 1.., required = true)]
    input: Vec<String>,
}

#[derive(clap::Parser, Debug)]
struct CheckOut {
    #[command(flatten)]
    schema_settings: SchemaSettings,

    #[command(flatten)]
    input_settings: InputSettings,

    /// only report failures
    #[arg(long, short)]
    quiet: bool,
}

#[derive(clap::Parser, Debug)]
struct CompileOut {
    #[command(flatten)]
    schema_settings: SchemaSettings,
}

struct Report {
    origin: String,
    failure: Option<String>,
}

// ————————————————————————————————————————————————————————————————————————————
// IMPLEMENTATION
// ————————————————————————————————————————————————————————————————————————————

impl SchemaSettings {
    fn options(&self) -> Options {
        Options { indifferent_access: self.indifferent_access }
    }

    fn load(&self) -> anyhow::Result<CompiledSchema> {
        let schema = path_de::load_schema(&self.schema)
            .with_context(|| format!("loading schema {}", self.schema.display()))?;
        Ok(compile(&schema, &self.options()))
    }
}

impl InputSettings {
    fn load(&self) -> Result<Vec<Document>, LoadError> {
        let source_paths = resolve_file_path_patterns(&self.input)?;
        let loaded = source_paths
            .par_iter()
            .map(|path| path_de::load_documents(path, self.ndjson, self.json_pointer.as_deref()))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(loaded.into_iter().flatten().collect())
    }
}

impl CommandLineInterface {
    pub fn load() -> Self {
        Self::parse()
    }

    pub fn run(&self) -> anyhow::Result<ExitCode> {
        match &self.cmd {
            Command::Check(target) => {
                let compiled = target.schema_settings.load()?;
                let documents = target.input_settings.load()?;
                tracing::info!(documents = documents.len(), "checking documents");

                let reports = documents
                    .par_iter()
                    .map(|doc| Report {
                        origin: doc.origin.clone(),
                        failure: Validator::from_compiled(&doc.value, &compiled).failure_message(),
                    })
                    .collect::<Vec<_>>();

                let mut failed = 0usize;
                for report in &reports {
                    match &report.failure {
                        None if target.quiet => {}
                        None => println!("{} {}", "✓".green(), report.origin),
                        Some(message) => {
                            failed += 1;
                            println!("{} {}", "✗".red(), report.origin.bold());
                            for line in message.lines() {
                                println!("    {line}");
                            }
                        }
                    }
                }
                if failed > 0 {
                    eprintln!("{}", format!("{failed} of {} documents failed", reports.len()).red());
                    return Ok(ExitCode::FAILURE);
                }
                Ok(ExitCode::SUCCESS)
            }
            Command::Compile(target) => {
                let compiled = target.schema_settings.load()?;
                println!("{compiled}");
                Ok(ExitCode::SUCCESS)
            }
        }
    }
}

// ————————————————————————————————————————————————————————————————————————————
// INTERNAL HELPERS
// ————————————————————————————————————————————————————————————————————————————

fn resolve_file_path_patterns<I>(patterns: I) -> Result<Vec<PathBuf>, LoadError>
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    fn has_glob_chars(s: &str) -> bool {
        s.bytes().any(|b| matches!(b, b'*' | b'?' | b'[' | b'{'))
    }

    let mut out = Vec::<PathBuf>::new();

    for raw in patterns {
        let pattern = raw.as_ref();

        if !has_glob_chars(pattern) {
            out.push(PathBuf::from(pattern));
            continue;
        }
        let entries = glob::glob(pattern).map_err(|error| LoadError::Glob {
            pattern: pattern.to_string(),
            message: error.to_string(),
        })?;
        let before = out.len();
        for entry in entries {
            let path = entry.map_err(|error| LoadError::Glob {
                pattern: pattern.to_string(),
                message: error.to_string(),
            })?;
            out.push(path);
        }
        // an explicit glob that matched nothing is almost certainly a typo
        if out.len() == before {
            return Err(LoadError::NoMatch(pattern.to_string()));
        }
    }

    Ok(out)
}
