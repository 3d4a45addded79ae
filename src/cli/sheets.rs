use calamine::{Data, Range, Reader};
use colored::Colorize;
use comfy_table::{Cell, Table};

use crate::cli::{resolve_path, settings_for};
use crate::error::Result;
use crate::reader::{find_sheet_containing, open_workbook};
use crate::settings::Settings;

/// Role a sheet plays in `generate`, if any.
fn role(settings: &Settings, revenue_sheet: Option<&str>, name: &str) -> Option<String> {
    for group in &settings.groups {
        if let Some(sheet) = group.sheets.iter().find(|s| s.sheet == name) {
            return Some(format!("{} ({}, {})", group.export, sheet.consultant, sheet.city));
        }
    }
    (revenue_sheet == Some(name)).then(|| settings.revenue.export.clone())
}

/// Row count and role cells; a sheet that fails to read shows the error as its role.
fn describe(
    range: std::result::Result<Range<Data>, calamine::Error>,
    role: Option<String>,
) -> (String, String) {
    match range {
        Ok(range) => (
            range.end().map_or(0, |(last, _)| last + 1).to_string(),
            role.unwrap_or_else(|| "-".dimmed().to_string()),
        ),
        Err(e) => ("?".to_string(), format!("{} {e}", "unreadable:".red().bold())),
    }
}

pub fn run(config: Option<&str>, workbook: Option<&str>) -> Result<()> {
    let settings = settings_for(config)?;
    let path = resolve_path(workbook, &settings.workbook);
    let mut book = open_workbook(&path)?;
    let names = book.sheet_names();
    let revenue_sheet = find_sheet_containing(&names, &settings.revenue.sheet_contains).ok();

    let mut table = Table::new();
    table.set_header(vec!["#", "Sheet", "Rows", "Role"]);
    for (i, name) in names.iter().enumerate() {
        let (rows, role) = describe(
            book.worksheet_range(name),
            role(&settings, revenue_sheet.as_deref(), name),
        );
        table.add_row(vec![
            Cell::new(i + 1),
            Cell::new(format!("{name:?}")),
            Cell::new(rows),
            Cell::new(role),
        ]);
    }
    println!("{}\n{table}", path.display());

    let missing: Vec<&str> = settings
        .groups
        .iter()
        .flat_map(|g| g.sheets.iter().map(|s| s.sheet.as_str()))
        .filter(|sheet| !names.iter().any(|n| n.as_str() == *sheet))
        .collect();
    for sheet in &missing {
        println!("{} configured sheet {sheet:?} is not in the workbook", "missing:".red().bold());
    }
    if revenue_sheet.is_none() {
        println!(
            "{} no sheet name contains {:?}",
            "missing:".red().bold(),
            settings.revenue.sheet_contains
        );
    }
    Ok(())
}
