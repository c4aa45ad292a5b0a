// modelgen-core/src/infrastructure/compiler/jinja.rs

// Bridge between the render contexts and the template files. Every template is
// loaded once, when the renderer is built: the set of names is frozen after that.

use minijinja::{Environment, ErrorKind, Value, context};
use std::collections::BTreeSet;
use std::fs;
use std::path::Path;
use tracing::{debug, instrument};
use walkdir::WalkDir;

use crate::application::ports::TemplateEngine;
use crate::domain::context::RenderContext;
use crate::error::ModelgenError;
use crate::infrastructure::error::InfrastructureError;

pub struct JinjaRenderer {
    env: Environment<'static>,
    names: BTreeSet<String>,
}

impl JinjaRenderer {
    pub fn new() -> Self {
        let mut env = Environment::new();

        // table_ref(schema, table) -> "schema"."table"
        env.add_function("table_ref", |schema: String, table: String| -> String {
            format!("\"{}\".\"{}\"", schema, table)
        });

        env.add_filter("sql_type", |value: Value| sql_type(&descriptor_type(&value)));
        env.add_filter("py_type", |value: Value| py_type(&descriptor_type(&value)));

        Self {
            env,
            names: BTreeSet::new(),
        }
    }

    /// Loads every file below `dir`, named by its `/`-separated relative path.
    #[instrument(skip(dir), fields(dir = ?dir))]
    pub fn from_dir(dir: &Path) -> Result<Self, InfrastructureError> {
        if !dir.is_dir() {
            return Err(InfrastructureError::TemplateDirNotFound(dir.to_path_buf()));
        }

        let mut renderer = Self::new();
        for entry in WalkDir::new(dir).follow_links(true).sort_by_file_name() {
            let entry = entry?;
            if !entry.file_type().is_file() {
                continue;
            }

            let path = entry.path();
            let name = path
                .strip_prefix(dir)
                .unwrap_or(path)
                .components()
                .map(|c| c.as_os_str().to_string_lossy())
                .collect::<Vec<_>>()
                .join("/");

            let source = fs::read_to_string(path).map_err(|source| {
                InfrastructureError::ReadFailed {
                    path: path.to_path_buf(),
                    source,
                }
            })?;

            debug!(template = %name, "Template loaded");
            renderer.add_template(name, source)?;
        }

        Ok(renderer)
    }

    pub fn add_template(
        &mut self,
        name: impl Into<String>,
        source: impl Into<String>,
    ) -> Result<(), InfrastructureError> {
        let name: String = name.into();
        self.env.add_template_owned(name.clone(), source.into())?;
        self.names.insert(name);
        Ok(())
    }

    pub fn template_names(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }

    /// Fails on the first name missing from the loaded set.
    pub fn require(&self, names: &[&str]) -> Result<(), InfrastructureError> {
        match names.iter().find(|name| !self.has_template(name)) {
            Some(missing) => Err(InfrastructureError::TemplateNotFound(missing.to_string())),
            None => Ok(()),
        }
    }
}

impl Default for JinjaRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl TemplateEngine for JinjaRenderer {
    fn render(
        &self,
        template_name: &str,
        context: &RenderContext<'_>,
    ) -> Result<String, ModelgenError> {
        let template = self.env.get_template(template_name).map_err(|e| {
            if e.kind() == ErrorKind::TemplateNotFound {
                InfrastructureError::TemplateNotFound(template_name.to_string())
            } else {
                InfrastructureError::TemplateError(e)
            }
        })?;

        let rendered = template
            .render(context! {
                entity => context,
                enums => context.enums,
                types => context.types,
            })
            .map_err(InfrastructureError::TemplateError)?;

        Ok(rendered)
    }

    fn has_template(&self, template_name: &str) -> bool {
        self.names.contains(template_name)
    }
}

// --- TYPE MAPPING FILTERS ---

/// An attribute descriptor is either `"int"` or `{type: int, ...}`.
fn descriptor_type(value: &Value) -> String {
    if let Some(name) = value.as_str() {
        return name.trim().to_string();
    }
    value
        .get_attr("type")
        .ok()
        .and_then(|t| t.as_str().map(|s| s.trim().to_string()))
        .unwrap_or_default()
}

fn sql_type(type_name: &str) -> String {
    let base = type_name.trim_end_matches('?').to_lowercase();
    match base.as_str() {
        "int" | "integer" | "bigint" | "bool" | "boolean" => "INTEGER",
        "float" | "real" | "double" | "decimal" | "money" | "number" => "REAL",
        "bytes" | "blob" => "BLOB",
        // str, date, datetime, uuid, enums and custom types are stored as text
        _ => "TEXT",
    }
    .to_string()
}

fn py_type(type_name: &str) -> String {
    let trimmed = type_name.trim_end_matches('?');
    let mapped = match trimmed.to_lowercase().as_str() {
        "str" | "string" | "text" | "uuid" | "email" => "str",
        "int" | "integer" | "bigint" => "int",
        "bool" | "boolean" => "bool",
        "float" | "real" | "double" | "number" => "float",
        "decimal" | "money" => "Decimal",
        "date" => "date",
        "datetime" | "timestamp" => "datetime",
        "time" => "time",
        "bytes" | "blob" => "bytes",
        "" => "Any",
        _ => return trimmed.to_string(),
    };
    mapped.to_string()
}
