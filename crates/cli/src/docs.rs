//! Markdown documentation for a server's tools.

use std::path::{Path, PathBuf};

use mcp::{InputSchema, Tool};
use serde_json::{Map, Value, json};

use crate::error::{Error, Result};
use crate::render::ParamsRenderer;

/// Name of the executor binary used in generated examples.
pub const EXECUTOR_BIN: &str = "mcp-exec";

/// Options controlling document contents.
#[derive(Debug, Clone, Copy, Default)]
pub struct DocOptions {
    /// Append an example `mcp-exec` invocation to each tool with parameters.
    pub examples: bool,
}

/// Render the documentation page for one server.
///
/// Tools keep the order the server listed them in.
pub fn render_tools_markdown(
    server: &str,
    tools: &[Tool],
    renderer: &dyn ParamsRenderer,
    options: DocOptions,
) -> Result<String> {
    let mut lines = vec![format!("# {server} Tools"), String::new()];

    for tool in tools {
        lines.push(format!("## {}", tool.name));
        lines.push(String::new());

        if let Some(description) = tool.description.as_deref().filter(|d| !d.is_empty()) {
            lines.push(description.to_string());
            lines.push(String::new());
        }

        let schema = tool.schema();
        if schema.properties.is_empty() {
            continue;
        }

        lines.push("**Params:**".to_string());
        lines.push(format!("```{}", renderer.language()));
        lines.push(renderer.render(tool)?.trim_end().to_string());
        lines.push("```".to_string());
        lines.push(String::new());

        if options.examples {
            let args = serde_json::to_string(&example_arguments(&schema))
                .map_err(|e| Error::Render(e.to_string()))?;
            lines.push("**Example:**".to_string());
            lines.push("```bash".to_string());
            lines.push(format!(
                "{EXECUTOR_BIN} {server} {} '{}'",
                tool.name,
                args.replace('\'', r"'\''")
            ));
            lines.push("```".to_string());
            lines.push(String::new());
        }
    }

    Ok(lines.join("\n"))
}

/// Synthesize plausible arguments for a schema, for documentation examples.
pub fn example_arguments(schema: &InputSchema) -> Value {
    let mut example = Map::new();

    for (name, prop) in &schema.properties {
        let Some(prop) = prop.as_object() else {
            continue;
        };
        let kind = prop.get("type").and_then(Value::as_str).unwrap_or_default();
        let lower_name = name.to_lowercase();
        let lower_desc = prop
            .get("description")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_lowercase();

        let value = match kind {
            "string" => match prop.get("enum").and_then(Value::as_array) {
                Some(values) if !values.is_empty() => values[0].clone(),
                _ if lower_name.contains("query") => json!("example search query"),
                _ if lower_name.contains("url") => json!("https://example.com"),
                _ if lower_name.contains("repo") => json!("owner/repo"),
                _ if lower_desc.contains("message") => json!("Hello, world!"),
                _ => json!("..."),
            },
            "number" | "integer" => prop.get("default").cloned().unwrap_or_else(|| json!(10)),
            "boolean" => json!(true),
            "object" => json!({}),
            "array" => json!([]),
            _ => continue,
        };
        example.insert(name.clone(), value);
    }

    Value::Object(example)
}

/// Path of the page for `server` inside `dir`.
///
/// Server names come from the config file, so one that could name a file
/// outside `dir` (empty, `.`, `..`, or containing a path separator) is rejected.
pub fn tools_markdown_path(dir: &Path, server: &str) -> Result<PathBuf> {
    let unsafe_name = matches!(server, "" | "." | "..")
        || server.contains(['/', '\\'])
        || server.contains('\0');
    if unsafe_name {
        return Err(Error::InvalidServerName(server.to_string()));
    }
    Ok(dir.join(format!("{server}.md")))
}

/// Write `<dir>/<server>.md`, replacing any previous file.
pub fn write_tools_markdown(dir: &Path, server: &str, contents: &str) -> Result<PathBuf> {
    let path = tools_markdown_path(dir, server)?;
    std::fs::write(&path, contents).map_err(|source| Error::Write {
        path: path.clone(),
        source,
    })?;
    Ok(path)
}
