use crate::parsing::arg_parse;
use clap::Parser;
use color_eyre::eyre::Result as EyreResult;
use log::{debug, info};
use serde_json::{map::Map, Value};
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

pub mod config;
pub mod error;
mod parsing;
pub mod workbook;

pub use config::Config;
pub use error::{Result, XlsxToJsonError};

#[derive(Parser, Debug, Clone)]
#[clap(name = "XlsxToJson")]
#[clap(version = "0.1")]
#[clap(about = "Converts a worksheet to a json array of records", long_about = None)]
pub struct ApplicationOptions {
    /// Settings file (json) naming the workbook, worksheet and output directory
    #[clap(short = 's', long = "settings", default_value = "config.json")]
    pub settings: PathBuf,
}

/// Outcome of a successful run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Conversion {
    pub output: PathBuf,
    pub bytes_written: usize,
}

/// Pairs each cell with the label at the same position. Cells beyond the
/// last label are dropped; labels past the end of the row are left out.
pub fn convert_line(headers: &[String], row: &[String]) -> Map<String, Value> {
    let mut line = Map::new();
    for (header_name, value) in headers.iter().zip(row) {
        line.insert(header_name.clone(), Value::String(value.clone()));
    }
    line
}

/// Row 0 is the label row; every later row becomes one record.
pub fn convert_rows(sheet: &str, rows: &[Vec<String>]) -> Result<Vec<Value>> {
    let (headers, data) = match rows {
        [headers, data @ ..] if !data.is_empty() => (headers, data),
        _ => {
            return Err(XlsxToJsonError::InsufficientData {
                sheet: sheet.to_string(),
                rows: rows.len(),
            })
        }
    };

    debug!("Labels of '{}': {:?}", sheet, headers);
    Ok(data
        .iter()
        .map(|row| Value::Object(convert_line(headers, row)))
        .collect())
}

pub fn records_to_json(records: &[Value]) -> Result<String> {
    Ok(serde_json::to_string_pretty(records)?)
}

/// Reads `sheet` from the workbook at `path` and renders it as indented json.
pub fn convert_excel_to_json(path: &Path, sheet: &str) -> Result<String> {
    let rows = workbook::read_rows(path, sheet)?;
    info!("Read {} row(s) from '{}' in {}", rows.len(), sheet, path.display());

    let records = convert_rows(sheet, &rows)?;
    info!("Built {} record(s)", records.len());
    records_to_json(&records)
}

/// Creates (or truncates) `output` and writes `json` to it in one go.
pub fn write_to_file(output: &Path, json: &str) -> Result<usize> {
    let mut file_handler = File::create(output).map_err(|source| XlsxToJsonError::OutputCreate {
        path: output.to_path_buf(),
        source,
    })?;
    file_handler
        .write_all(json.as_bytes())
        .and_then(|_| file_handler.flush())
        .map_err(|source| XlsxToJsonError::OutputWrite {
            path: output.to_path_buf(),
            source,
        })?;
    Ok(json.len())
}

pub fn convert_data(config: &Config) -> Result<Conversion> {
    let json = convert_excel_to_json(&config.workbook_path(), &config.xlsx_ws)?;

    let output = config.output_path();
    let bytes_written = write_to_file(&output, &json)?;
    Ok(Conversion {
        output,
        bytes_written,
    })
}

pub fn run_by_option(options: &ApplicationOptions) -> Result<Conversion> {
    let config = Config::load(&options.settings)?;
    info!(
        "Converting worksheet '{}' of {}",
        config.xlsx_ws,
        config.workbook_path().display()
    );

    let conversion = convert_data(&config)?;
    println!("create {}", conversion.output.display());
    println!("write {} bytes", conversion.bytes_written);
    Ok(conversion)
}

pub fn run() -> EyreResult<()> {
    let options: ApplicationOptions = arg_parse();
    run_by_option(&options)?;
    Ok(())
}
