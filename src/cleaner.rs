use calamine::Data;

const SOURCE_MARKER: &str = "p:";
const MIDNIGHT_SUFFIX: &str = " 00:00:00";
const NULL_TOKENS: &[&str] = &["None", "none"];
const NUMBER_PLACEHOLDERS: &[&str] = &["-", "", "None"];

// ---------------------------------------------------------------------------
// Cell coercion
// ---------------------------------------------------------------------------

/// Text form of a cell as the lead sheets show it. `None` for empty cells.
pub fn cell_text(cell: &Data) -> Option<String> {
    match cell {
        Data::Empty => None,
        Data::String(s) => Some(s.clone()),
        Data::Int(i) => Some(i.to_string()),
        Data::Float(f) => Some(format_float(*f)),
        Data::Bool(b) => Some(if *b { "True" } else { "False" }.to_string()),
        Data::DateTime(dt) if dt.is_datetime() => Some(
            dt.as_datetime()
                .map(|d| d.format("%Y-%m-%d %H:%M:%S").to_string())
                .unwrap_or_else(|| format_float(dt.as_f64())),
        ),
        Data::DateTime(dt) => Some(format_float(dt.as_f64())),
        Data::DateTimeIso(s) | Data::DurationIso(s) => Some(s.clone()),
        Data::Error(e) => Some(e.to_string()),
    }
}

/// Phone numbers and ids arrive as floats; integral values drop the `.0`.
fn format_float(f: f64) -> String {
    if f.is_finite() && f.fract() == 0.0 && f.abs() < 1e15 {
        format!("{}", f as i64)
    } else {
        format!("{f}")
    }
}

/// Python-style truthiness of a raw cell: empty, zero and `false` count as blank.
pub fn is_blank(cell: Option<&Data>) -> bool {
    match cell {
        None | Some(Data::Empty) => true,
        Some(Data::String(s)) => s.is_empty(),
        Some(Data::Int(i)) => *i == 0,
        Some(Data::Float(f)) => *f == 0.0,
        Some(Data::Bool(b)) => !b,
        Some(_) => false,
    }
}

// ---------------------------------------------------------------------------
// Field cleaner
// ---------------------------------------------------------------------------

/// Clean a cell for embedding in a generated string literal.
pub fn clean(cell: Option<&Data>) -> String {
    match cell.and_then(cell_text) {
        Some(text) => clean_text(&text),
        None => String::new(),
    }
}

/// Single-line, quote-free, backslash-free form of `raw`.
///
/// One rule pass can expose a new marker (a folded newline landing next to a
/// midnight suffix, a doubled `p:` prefix), so passes repeat until stable.
/// Every pass either shortens the text or only swaps characters the next
/// pass leaves alone, which bounds the loop.
pub fn clean_text(raw: &str) -> String {
    let mut current = clean_pass(raw);
    loop {
        let next = clean_pass(&current);
        if next == current {
            return current;
        }
        current = next;
    }
}

fn clean_pass(raw: &str) -> String {
    let mut s = raw.trim();
    if let Some(rest) = s.strip_prefix(SOURCE_MARKER) {
        s = rest.trim_start();
    }
    if NULL_TOKENS.contains(&s) {
        return String::new();
    }
    let mut out = if s.contains(MIDNIGHT_SUFFIX) {
        s.replace(MIDNIGHT_SUFFIX, "")
    } else {
        s.to_string()
    };
    out = out.replace('"', "'");
    out = out.replace('\n', " ").replace('\r', "");
    out.replace('\\', "/")
}

// ---------------------------------------------------------------------------
// Numeric coercion
// ---------------------------------------------------------------------------

/// Parse a revenue amount. `None` for placeholders and anything non-numeric.
pub fn number(cell: Option<&Data>) -> Option<f64> {
    let value = match cell? {
        Data::Float(f) => *f,
        Data::Int(i) => *i as f64,
        other => {
            let text = cell_text(other)?;
            let text = text.trim();
            if NUMBER_PLACEHOLDERS.contains(&text) {
                return None;
            }
            text.parse::<f64>().ok()?
        }
    };
    value.is_finite().then_some(value)
}

/// Like [`number`], but placeholders and junk count as zero.
pub fn coerce_number(cell: Option<&Data>) -> f64 {
    number(cell).unwrap_or(0.0)
}
