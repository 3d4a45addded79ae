use chrono::{Local, NaiveDate};

use crate::cli::{resolve_path, settings_for};
use crate::emitter::{render_module, write_module, ModuleNames};
use crate::error::{LeadsheetError, Result};
use crate::models::Generated;
use crate::reader::{open_workbook, read_workbook};

pub fn run(
    config: Option<&str>,
    workbook: Option<&str>,
    output: Option<&str>,
    date: Option<&str>,
) -> Result<()> {
    let settings = settings_for(config)?;
    let workbook_path = resolve_path(workbook, &settings.workbook);
    let output_path = resolve_path(output, &settings.output);
    let stamp = resolve_stamp(date.or(settings.stamp.as_deref()))?;

    let mut book = open_workbook(&workbook_path)?;
    let data = read_workbook(&mut book, &settings, &stamp)?;

    let names = ModuleNames {
        types_import: &settings.types_import,
        combined_export: &settings.combined_export,
        revenue_export: &settings.revenue.export,
    };
    write_module(&output_path, &render_module(&data, &names))?;

    println!("{}", summary(&data));
    Ok(())
}

/// Validated `YYYY-MM-DD` stamp, or today's local date.
pub fn resolve_stamp(date: Option<&str>) -> Result<String> {
    match date {
        Some(raw) => NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
            .map(|d| d.format("%Y-%m-%d").to_string())
            .map_err(|_| LeadsheetError::InvalidDate(raw.to_string())),
        None => Ok(Local::now().date_naive().format("%Y-%m-%d").to_string()),
    }
}

pub fn summary(data: &Generated) -> String {
    let counts: Vec<String> = data
        .groups
        .iter()
        .map(|g| format!("{}={}", g.name, g.records.len()))
        .chain(std::iter::once(format!("revenue={}", data.revenue.len())))
        .collect();
    format!("OK: {}", counts.join(", "))
}
