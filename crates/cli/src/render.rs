//! Parameter block rendering for tool documentation.
//!
//! A tool's input schema is shown either as a compact per-parameter YAML map
//! (when built with the `yaml` feature) or as the raw schema in JSON. Which
//! one is used is decided once, when the renderer is constructed.
//!
//! Parameters keep the order the schema declares them in, and each record's
//! keys come out as `type`, `desc`, `enum`, `default`, `required`. Nothing is
//! sorted alphabetically, so pages differ from a sorted-key YAML dump of the
//! same schema.

use clap::ValueEnum;
use indexmap::IndexMap;
use mcp::{InputSchema, Tool};
use serde::Serialize;
use serde_json::Value;

use crate::error::{Error, Result};

/// Compact description of one parameter.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParamSpec {
    #[serde(rename = "type")]
    pub kind: Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub desc: Option<String>,
    #[serde(rename = "enum", skip_serializing_if = "Option::is_none")]
    pub values: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default: Option<Value>,
    #[serde(skip_serializing_if = "is_false")]
    pub required: bool,
}

fn is_false(b: &bool) -> bool {
    !*b
}

impl ParamSpec {
    /// Build from one property schema. Non-object properties yield `None`.
    pub fn from_property(prop: &Value, required: bool) -> Option<Self> {
        let prop = prop.as_object()?;
        Some(Self {
            kind: prop
                .get("type")
                .cloned()
                .unwrap_or_else(|| Value::String("string".to_string())),
            desc: prop
                .get("description")
                .and_then(Value::as_str)
                .map(str::to_string),
            values: prop.get("enum").cloned(),
            default: prop.get("default").cloned(),
            required,
        })
    }
}

/// Derive the per-parameter records of a schema, in property order.
pub fn param_specs(schema: &InputSchema) -> IndexMap<String, ParamSpec> {
    schema
        .properties
        .iter()
        .filter_map(|(name, prop)| {
            ParamSpec::from_property(prop, schema.is_required(name))
                .map(|spec| (name.clone(), spec))
        })
        .collect()
}

/// Renders the body of a tool's parameter block.
pub trait ParamsRenderer {
    /// Info string of the fenced code block (`yaml`, `json`).
    fn language(&self) -> &'static str;

    /// Render the parameter block body, without fences.
    fn render(&self, tool: &Tool) -> Result<String>;
}

/// Compact YAML map of [`ParamSpec`]s.
#[cfg(feature = "yaml")]
#[derive(Debug, Default, Clone, Copy)]
pub struct YamlRenderer;

#[cfg(feature = "yaml")]
impl ParamsRenderer for YamlRenderer {
    fn language(&self) -> &'static str {
        "yaml"
    }

    fn render(&self, tool: &Tool) -> Result<String> {
        let specs = param_specs(&tool.schema());
        serde_yaml::to_string(&specs).map_err(|e| Error::Render(e.to_string()))
    }
}

/// The raw input schema, pretty-printed.
#[derive(Debug, Default, Clone, Copy)]
pub struct JsonRenderer;

impl ParamsRenderer for JsonRenderer {
    fn language(&self) -> &'static str {
        "json"
    }

    fn render(&self, tool: &Tool) -> Result<String> {
        serde_json::to_string_pretty(&tool.input_schema).map_err(|e| Error::Render(e.to_string()))
    }
}

/// Parameter block format selectable on the command line.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum Format {
    /// YAML when available, JSON otherwise
    #[default]
    Auto,
    /// Compact per-parameter YAML
    Yaml,
    /// Raw JSON schema
    Json,
}

impl Format {
    /// Build the renderer for this format.
    pub fn renderer(self) -> Result<Box<dyn ParamsRenderer>> {
        match self {
            Self::Auto => Ok(detect()),
            Self::Json => Ok(Box::new(JsonRenderer)),
            #[cfg(feature = "yaml")]
            Self::Yaml => Ok(Box::new(YamlRenderer)),
            #[cfg(not(feature = "yaml"))]
            Self::Yaml => Err(Error::FormatUnavailable("yaml")),
        }
    }
}

/// The preferred renderer of this build.
pub fn detect() -> Box<dyn ParamsRenderer> {
    #[cfg(feature = "yaml")]
    {
        Box::new(YamlRenderer)
    }
    #[cfg(not(feature = "yaml"))]
    {
        Box::new(JsonRenderer)
    }
}
