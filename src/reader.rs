use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use calamine::{Data, Range, Reader, Sheets};
use tracing::{debug, info, warn};

use crate::classifier::{classify_status, classify_visa};
use crate::cleaner::{clean, clean_text, coerce_number, is_blank, number};
use crate::error::{LeadsheetError, Result};
use crate::models::{CustomerGroup, CustomerRecord, Generated, RevenueRecord};
use crate::settings::{LeadSheet, RevenueSheet, Settings};

/// Column title that leaks into data rows when a sheet repeats its header.
const HEADER_LABEL: &str = "Ad Soyad";

pub type Workbook = Sheets<BufReader<File>>;

// ---------------------------------------------------------------------------
// Workbook access
// ---------------------------------------------------------------------------

pub fn open_workbook(path: &Path) -> Result<Workbook> {
    let workbook = calamine::open_workbook_auto(path)?;
    info!(path = %path.display(), sheets = workbook.sheet_names().len(), "opened workbook");
    Ok(workbook)
}

/// Range of the sheet titled exactly `title`.
pub fn sheet_range(workbook: &mut Workbook, title: &str) -> Result<Range<Data>> {
    if !workbook.sheet_names().iter().any(|name| name == title) {
        return Err(LeadsheetError::SheetNotFound(title.to_string()));
    }
    Ok(workbook.worksheet_range(title)?)
}

/// First sheet, in workbook order, whose title contains `needle`.
pub fn find_sheet_containing(names: &[String], needle: &str) -> Result<String> {
    let mut matches = names.iter().filter(|name| name.contains(needle));
    let first = matches
        .next()
        .ok_or_else(|| LeadsheetError::NoSheetMatching(needle.to_string()))?;
    let others: Vec<&String> = matches.collect();
    if !others.is_empty() {
        warn!(chosen = %first, ignored = ?others, "several sheets contain '{needle}'");
    }
    Ok(first.clone())
}

/// Absolute 0-based rows from the 1-based `start_row` through the last used row.
fn data_rows(range: &Range<Data>, start_row: u32) -> impl Iterator<Item = u32> {
    let first = start_row.saturating_sub(1);
    range.end().into_iter().flat_map(move |(last, _)| first..=last)
}

/// Cell at an absolute position; absent columns and cells past the used
/// range read as `None`.
fn cell(range: &Range<Data>, row: u32, col: Option<usize>) -> Option<&Data> {
    let col = u32::try_from(col?).ok()?;
    range.get_value((row, col))
}

// ---------------------------------------------------------------------------
// Lead sheets
// ---------------------------------------------------------------------------

/// Read one lead sheet. Ids continue from `last_id`; the last id handed out
/// is returned so the next sheet picks up where this one stopped.
pub fn read_leads(
    range: &Range<Data>,
    sheet: &LeadSheet,
    stamp: &str,
    last_id: u64,
) -> Result<(Vec<CustomerRecord>, u64)> {
    let columns = &sheet.columns;
    let consultant = clean_text(&sheet.consultant);
    let city = clean_text(&sheet.city);
    let mut id = last_id;
    let mut records = Vec::new();
    let mut skipped = 0usize;

    for row in data_rows(range, sheet.start_row) {
        let raw_name = cell(range, row, Some(columns.name));
        if is_blank(raw_name) {
            skipped += 1;
            continue;
        }
        let name = clean(raw_name);
        if name.is_empty() || name.contains(HEADER_LABEL) {
            skipped += 1;
            continue;
        }
        id = id.checked_add(1).ok_or_else(|| {
            LeadsheetError::Settings(format!("id counter overflowed after {id} on '{}'", sheet.sheet))
        })?;
        let get = |col: Option<usize>| clean(cell(range, row, col));
        let country = get(columns.country);
        let visa_raw = get(columns.visa);
        let status_raw = get(columns.status);
        records.push(CustomerRecord {
            id: id.to_string(),
            name,
            phone: get(columns.phone),
            email: get(columns.email),
            visa: classify_visa(&country, &visa_raw),
            country,
            status: classify_status(&status_raw),
            status_raw,
            sub_status: get(columns.sub_status),
            documents_pct: get(columns.documents),
            source: get(columns.source),
            note: get(columns.note),
            consultant: consultant.clone(),
            city: city.clone(),
            created_at: stamp.to_string(),
        });
    }

    debug!(sheet = %sheet.sheet, kept = records.len(), skipped, last_id = id, "read lead sheet");
    Ok((records, id))
}

// ---------------------------------------------------------------------------
// Revenue ledger
// ---------------------------------------------------------------------------

pub fn read_revenue(range: &Range<Data>, revenue: &RevenueSheet) -> Vec<RevenueRecord> {
    let columns = &revenue.columns;
    let mut records: Vec<RevenueRecord> = Vec::new();

    for row in data_rows(range, revenue.start_row) {
        let raw_name = cell(range, row, Some(columns.name));
        if is_blank(raw_name) {
            continue;
        }
        let get = |col: Option<usize>| clean(cell(range, row, col));
        let amount = |col: Option<usize>| coerce_number(cell(range, row, col));
        let id = match number(cell(range, row, columns.id)).map(f64::trunc) {
            Some(n) if n != 0.0 => format!("{}", n as i64),
            _ => (records.len() + 1).to_string(),
        };
        records.push(RevenueRecord {
            id,
            name: clean(raw_name),
            consultant: get(columns.consultant),
            city: get(columns.city),
            payment_method: get(columns.payment_method),
            advance_date: get(columns.advance_date),
            advance: amount(columns.advance),
            remaining_date: get(columns.remaining_date),
            remaining: amount(columns.remaining),
            total: amount(columns.total),
        });
    }

    debug!(kept = records.len(), "read revenue sheet");
    records
}

// ---------------------------------------------------------------------------
// Whole workbook
// ---------------------------------------------------------------------------

/// Read every configured sheet in settings order. Nothing is written here, so
/// a missing sheet fails the run before any output exists.
pub fn read_workbook(workbook: &mut Workbook, settings: &Settings, stamp: &str) -> Result<Generated> {
    let mut last_id = settings.id_base;
    let mut groups = Vec::with_capacity(settings.groups.len());

    for group in &settings.groups {
        let mut records = Vec::new();
        for sheet in &group.sheets {
            let range = sheet_range(workbook, &sheet.sheet)?;
            let (rows, next) = read_leads(&range, sheet, stamp, last_id)?;
            last_id = next;
            records.extend(rows);
        }
        info!(group = %group.name, records = records.len(), "group complete");
        groups.push(CustomerGroup {
            name: group.name.clone(),
            export: group.export.clone(),
            records,
        });
    }

    let revenue_sheet = find_sheet_containing(&workbook.sheet_names(), &settings.revenue.sheet_contains)?;
    info!(sheet = %revenue_sheet, "using revenue sheet");
    let range = workbook.worksheet_range(&revenue_sheet)?;
    let revenue = read_revenue(&range, &settings.revenue);

    Ok(Generated { groups, revenue })
}
