use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{LeadsheetError, Result};

/// Zero-based positions of each semantic column on a lead sheet.
/// `None` means the sheet has no such column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeadColumns {
    pub name: usize,
    pub phone: Option<usize>,
    pub email: Option<usize>,
    pub source: Option<usize>,
    pub country: Option<usize>,
    pub visa: Option<usize>,
    pub sub_status: Option<usize>,
    pub status: Option<usize>,
    pub documents: Option<usize>,
    pub note: Option<usize>,
}

impl LeadColumns {
    /// Every column present: `rest` is phone, email, source, country, visa,
    /// sub-status, status, documents, note.
    fn offsets(name: usize, rest: [usize; 9]) -> Self {
        let [phone, email, source, country, visa, sub_status, status, documents, note] = rest;
        Self {
            name,
            phone: Some(phone),
            email: Some(email),
            source: Some(source),
            country: Some(country),
            visa: Some(visa),
            sub_status: Some(sub_status),
            status: Some(status),
            documents: Some(documents),
            note: Some(note),
        }
    }
}

/// A per-consultant lead sheet, matched by exact title.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeadSheet {
    pub sheet: String,
    pub consultant: String,
    pub city: String,
    /// 1-based row where data starts.
    #[serde(default = "default_lead_start_row")]
    pub start_row: u32,
    pub columns: LeadColumns,
}

/// One exported `Customer[]` array, filled from its sheets in order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Group {
    pub name: String,
    pub export: String,
    pub sheets: Vec<LeadSheet>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RevenueColumns {
    pub id: Option<usize>,
    pub name: usize,
    pub consultant: Option<usize>,
    pub city: Option<usize>,
    pub payment_method: Option<usize>,
    pub advance_date: Option<usize>,
    pub advance: Option<usize>,
    pub remaining_date: Option<usize>,
    pub remaining: Option<usize>,
    pub total: Option<usize>,
}

impl Default for RevenueColumns {
    fn default() -> Self {
        Self {
            id: Some(0),
            name: 1,
            consultant: Some(2),
            city: Some(3),
            payment_method: Some(4),
            advance_date: Some(5),
            advance: Some(6),
            remaining_date: Some(7),
            remaining: Some(8),
            total: Some(9),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RevenueSheet {
    /// Substring of the sheet title; the first sheet in workbook order wins.
    pub sheet_contains: String,
    pub start_row: u32,
    pub export: String,
    pub columns: RevenueColumns,
}

impl Default for RevenueSheet {
    fn default() -> Self {
        Self {
            sheet_contains: "Gelir".to_string(),
            start_row: 4,
            export: "revenueData".to_string(),
            columns: RevenueColumns::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub workbook: String,
    pub output: String,
    /// Last id before the first generated one.
    pub id_base: u64,
    /// `createdAt`/`updatedAt` for every record; today when unset.
    pub stamp: Option<String>,
    pub types_import: String,
    pub combined_export: String,
    pub groups: Vec<Group>,
    pub revenue: RevenueSheet,
}

fn default_lead_start_row() -> u32 {
    6
}

fn default_groups() -> Vec<Group> {
    let eskisehir = LeadColumns::offsets(1, [4, 5, 6, 8, 9, 10, 12, 13, 14]);
    let gaziantep = LeadColumns::offsets(1, [4, 6, 7, 9, 10, 11, 13, 14, 15]);
    let istanbul = LeadColumns::offsets(1, [3, 4, 5, 7, 8, 9, 11, 12, 13]);
    let sheet = |title: &str, consultant: &str, city: &str, columns: &LeadColumns| LeadSheet {
        sheet: title.to_string(),
        consultant: consultant.to_string(),
        city: city.to_string(),
        start_row: default_lead_start_row(),
        columns: columns.clone(),
    };
    vec![
        Group {
            name: "eskisehir".to_string(),
            export: "eskisehirData".to_string(),
            sheets: vec![
                sheet("Eray ESKİŞEHİR Lead", "Eray", "Eskişehir", &eskisehir),
                sheet("Dilara ESKİŞEHİR Lead", "Dilara", "Eskişehir", &eskisehir),
            ],
        },
        Group {
            name: "gaziantep".to_string(),
            export: "gaziantepData".to_string(),
            sheets: vec![sheet("Eray GAZİANTEPLead ", "Eray", "Gaziantep", &gaziantep)],
        },
        Group {
            name: "istanbul".to_string(),
            export: "istanbulData".to_string(),
            sheets: vec![sheet("Elanur İSTANBULLead", "Elanur", "İstanbul", &istanbul)],
        },
    ]
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            workbook: default_data_dir().join("vizemo_lead_tracking.xlsx").to_string_lossy().to_string(),
            output: "src/data/importedData.ts".to_string(),
            id_base: 1000,
            stamp: None,
            types_import: "../types".to_string(),
            combined_export: "allImportedCustomers".to_string(),
            groups: default_groups(),
            revenue: RevenueSheet::default(),
        }
    }
}

impl Settings {
    pub fn validate(&self) -> Result<()> {
        if self.groups.is_empty() {
            return Err(LeadsheetError::Settings("at least one group is required".to_string()));
        }
        if self.types_import.is_empty()
            || self.types_import.contains(['"', '\\', '\n', '\r'])
        {
            return Err(LeadsheetError::Settings(format!(
                "types_import {:?} must be a non-empty path without quotes, backslashes or newlines",
                self.types_import
            )));
        }
        let mut exports: Vec<&str> = self.groups.iter().map(|g| g.export.as_str()).collect();
        exports.push(&self.combined_export);
        exports.push(&self.revenue.export);
        for (i, export) in exports.iter().enumerate() {
            if !is_identifier(export) {
                return Err(LeadsheetError::Settings(format!("'{export}' is not a valid export name")));
            }
            if exports[..i].contains(export) {
                return Err(LeadsheetError::Settings(format!("export '{export}' is declared twice")));
            }
        }
        let start_rows = self
            .groups
            .iter()
            .flat_map(|g| g.sheets.iter().map(|s| (s.sheet.as_str(), s.start_row)))
            .chain(std::iter::once((self.revenue.sheet_contains.as_str(), self.revenue.start_row)));
        for (sheet, row) in start_rows {
            if row == 0 {
                return Err(LeadsheetError::Settings(format!("start_row for '{sheet}' is 1-based")));
            }
        }
        Ok(())
    }
}

fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    matches!(chars.next(), Some(c) if c.is_ascii_alphabetic() || c == '_' || c == '$')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$')
}

fn config_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config")
        .join("leadsheet")
}

pub fn default_settings_path() -> PathBuf {
    config_dir().join("settings.json")
}

fn default_data_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("Downloads")
}

/// Load settings from `path` (or the default location). A missing file means
/// defaults; a malformed one is an error.
pub fn load_settings(path: Option<&Path>) -> Result<Settings> {
    let path = path.map(Path::to_path_buf).unwrap_or_else(default_settings_path);
    let settings = if path.exists() {
        let content = std::fs::read_to_string(&path)?;
        serde_json::from_str(&content)?
    } else {
        Settings::default()
    };
    settings.validate()?;
    Ok(settings)
}

pub fn save_settings(settings: &Settings, path: &Path) -> Result<()> {
    if let Some(dir) = path.parent() {
        std::fs::create_dir_all(dir)?;
    }
    let json = serde_json::to_string_pretty(settings)?;
    std::fs::write(path, format!("{json}\n"))?;
    Ok(())
}

pub fn shellexpand_path(path: &str) -> String {
    if path.starts_with('~') {
        if let Some(home) = dirs::home_dir() {
            return path.replacen('~', &home.to_string_lossy(), 1);
        }
    }
    path.to_string()
}
