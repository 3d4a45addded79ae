use crate::models::{Status, VisaType};

/// Ordered keyword table entry; the first entry with any keyword contained
/// in the folded text wins.
struct Rule<T> {
    keywords: &'static [&'static str],
    label: T,
}

const STATUS_RULES: &[Rule<Status>] = &[
    Rule { keywords: &["olumsuz"], label: Status::Olumsuz },
    Rule { keywords: &["tamamland", "onaylan"], label: Status::Tamamlandi },
    Rule {
        keywords: &["beklem", "toplan", "evrak", "pasaport", "randevu"],
        label: Status::Beklemede,
    },
];

const VISA_RULES: &[Rule<VisaType>] = &[
    Rule { keywords: &["oturum"], label: VisaType::SpainResidency },
    Rule { keywords: &["ingiltere"], label: VisaType::UnitedKingdom },
    Rule { keywords: &["amerika", "usa"], label: VisaType::UnitedStates },
    Rule { keywords: &["schengen"], label: VisaType::Schengen },
];

/// Lower-case with the Turkish dotted capital folded to a plain `i`, so
/// `İNGİLTERE` and `ingiltere` compare equal.
pub fn fold(text: &str) -> String {
    text.replace('İ', "i").to_lowercase()
}

fn first_match<T: Clone>(rules: &[Rule<T>], folded: &str) -> Option<T> {
    rules
        .iter()
        .find(|rule| rule.keywords.iter().any(|k| folded.contains(k)))
        .map(|rule| rule.label.clone())
}

/// Map free-text status to a pipeline stage. Unknown text is a new lead.
pub fn classify_status(raw: &str) -> Status {
    first_match(STATUS_RULES, &fold(raw)).unwrap_or(Status::YeniLead)
}

/// Map country and visa-type text to a destination bucket, falling back to
/// the visa text, then the country text, then `Other`.
pub fn classify_visa(country: &str, visa: &str) -> VisaType {
    let combined = fold(&format!("{visa} {country}"));
    if let Some(label) = first_match(VISA_RULES, &combined) {
        return label;
    }
    let visa = visa.trim();
    let country = country.trim();
    if !visa.is_empty() {
        VisaType::Raw(visa.to_string())
    } else if !country.is_empty() {
        VisaType::Raw(country.to_string())
    } else {
        VisaType::Other
    }
}
