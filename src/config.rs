use crate::error::{Result, XlsxToJsonError};
use log::debug;
use serde_json::{map::Map, Value};
use std::fs;
use std::path::{Path, PathBuf};

/// Settings for one conversion run, read from the JSON config file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Directory containing the workbook
    pub xlsx_dir: String,
    /// Workbook filename
    pub xlsx_wb: String,
    /// Worksheet to convert
    pub xlsx_ws: String,
    /// Output directory
    pub dist_dir: String,
}

/// Reads `path` as a JSON object and returns its top-level keys untouched.
pub fn load_params(path: &Path) -> Result<Map<String, Value>> {
    if !path.exists() {
        return Err(XlsxToJsonError::ConfigNotFound {
            path: path.to_path_buf(),
        });
    }

    let content = fs::read_to_string(path).map_err(|source| XlsxToJsonError::ConfigRead {
        path: path.to_path_buf(),
        source,
    })?;

    let parse_error = |message: String| XlsxToJsonError::ConfigParse {
        path: path.to_path_buf(),
        message,
    };

    match serde_json::from_str::<Value>(&content) {
        Ok(Value::Object(params)) => Ok(params),
        Ok(other) => Err(parse_error(format!(
            "expected a JSON object, found {}",
            value_kind(&other)
        ))),
        Err(e) => Err(parse_error(e.to_string())),
    }
}

impl Config {
    pub fn load(path: &Path) -> Result<Self> {
        let params = load_params(path)?;
        let config = Self::from_params(&params)?;
        debug!("Loaded config from {}: {:?}", path.display(), config);
        Ok(config)
    }

    pub fn from_params(params: &Map<String, Value>) -> Result<Self> {
        Ok(Self {
            xlsx_dir: required_string(params, "xlsx_dir")?,
            xlsx_wb: required_string(params, "xlsx_wb")?,
            xlsx_ws: required_string(params, "xlsx_ws")?,
            dist_dir: required_string(params, "dist_dir")?,
        })
    }

    pub fn workbook_path(&self) -> PathBuf {
        Path::new(&self.xlsx_dir).join(&self.xlsx_wb)
    }

    /// `<dist_dir>/<xlsx_ws>.json`
    pub fn output_path(&self) -> PathBuf {
        Path::new(&self.dist_dir).join(format!("{}.json", self.xlsx_ws))
    }
}

fn required_string(params: &Map<String, Value>, key: &str) -> Result<String> {
    match params.get(key) {
        Some(Value::String(s)) => Ok(s.clone()),
        Some(other) => Err(XlsxToJsonError::ConfigValidation(format!(
            "key `{}` must be a string, found {}",
            key,
            value_kind(other)
        ))),
        None => Err(XlsxToJsonError::ConfigValidation(format!(
            "missing required key `{}`",
            key
        ))),
    }
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
