use std::path::Path;

use tracing::info;

use crate::error::Result;
use crate::models::{CustomerRecord, Generated, RevenueRecord};

pub const HEADER_COMMENT: &str = "// AUTO-GENERATED from Excel — DO NOT EDIT MANUALLY";

/// Names the rendered module uses for its imports and combined exports.
pub struct ModuleNames<'a> {
    pub types_import: &'a str,
    pub combined_export: &'a str,
    pub revenue_export: &'a str,
}

const REVENUE_INTERFACE: &[(&str, &str)] = &[
    ("id", "string"),
    ("ad", "string"),
    ("danisman", "string"),
    ("sehir", "string"),
    ("odemeYontemi", "string"),
    ("onOdemeTarihi", "string"),
    ("onOdeme", "number"),
    ("kalanTarih", "string"),
    ("kalanOdeme", "number"),
    ("toplam", "number"),
];

/// Object literal for one customer. Field values are already literal-safe.
pub fn customer_literal(r: &CustomerRecord) -> String {
    format!(
        "  {{ id: \"{}\", ad: \"{}\", telefon: \"{}\", email: \"{}\", vize: \"{}\", ulke: \"{}\", \
         durum: \"{}\" as StatusType, durum_raw: \"{}\", statu: \"{}\", evrakPct: \"{}\", kaynak: \"{}\", \
         not: \"{}\", danisman: \"{}\", sehir: \"{}\", gorusme: \"\", takip: \"\", surec: \"\", karar: \"\", \
         log: [], createdAt: \"{}\", updatedAt: \"{}\" }},",
        r.id,
        r.name,
        r.phone,
        r.email,
        r.visa.label(),
        r.country,
        r.status.label(),
        r.status_raw,
        r.sub_status,
        r.documents_pct,
        r.source,
        r.note,
        r.consultant,
        r.city,
        r.created_at,
        r.created_at,
    )
}

pub fn revenue_literal(r: &RevenueRecord) -> String {
    format!(
        "  {{ id: \"{}\", ad: \"{}\", danisman: \"{}\", sehir: \"{}\", odemeYontemi: \"{}\", \
         onOdemeTarihi: \"{}\", onOdeme: {}, kalanTarih: \"{}\", kalanOdeme: {}, toplam: {} }},",
        r.id,
        r.name,
        r.consultant,
        r.city,
        r.payment_method,
        r.advance_date,
        r.advance,
        r.remaining_date,
        r.remaining,
        r.total,
    )
}

/// Render the whole data module.
pub fn render_module(data: &Generated, names: &ModuleNames) -> String {
    let mut lines = vec![
        HEADER_COMMENT.to_string(),
        format!("import {{ Customer, StatusType }} from \"{}\";", names.types_import),
    ];

    for group in &data.groups {
        lines.push(String::new());
        lines.push(format!("export const {}: Customer[] = [", group.export));
        lines.extend(group.records.iter().map(customer_literal));
        lines.push("];".to_string());
    }

    let spread: Vec<String> = data.groups.iter().map(|g| format!("...{}", g.export)).collect();
    lines.push(String::new());
    lines.push(format!(
        "export const {}: Customer[] = [{}];",
        names.combined_export,
        spread.join(", ")
    ));

    lines.push(String::new());
    lines.push("export interface RevenueEntry {".to_string());
    lines.extend(REVENUE_INTERFACE.iter().map(|(field, ty)| format!("  {field}: {ty};")));
    lines.push("}".to_string());

    lines.push(String::new());
    lines.push(format!("export const {}: RevenueEntry[] = [", names.revenue_export));
    lines.extend(data.revenue.iter().map(revenue_literal));
    lines.push("];".to_string());

    let mut out = lines.join("\n");
    out.push('\n');
    out
}

/// Replace `path` with `contents`, creating parent directories as needed.
pub fn write_module(path: &Path, contents: &str) -> Result<()> {
    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        std::fs::create_dir_all(dir)?;
    }
    std::fs::write(path, contents)?;
    info!(path = %path.display(), bytes = contents.len(), "wrote data module");
    Ok(())
}
