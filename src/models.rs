/// Pipeline stage a lead is filed under in the generated data.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    YeniLead,
    Beklemede,
    Tamamlandi,
    Olumsuz,
}

impl Status {
    pub fn label(&self) -> &'static str {
        match self {
            Self::YeniLead => "Yeni Lead",
            Self::Beklemede => "Beklemede",
            Self::Tamamlandi => "Tamamlandı",
            Self::Olumsuz => "Olumsuz",
        }
    }
}

/// Destination/visa bucket. `Raw` carries the sheet's own wording when no
/// keyword matched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VisaType {
    SpainResidency,
    UnitedKingdom,
    UnitedStates,
    Schengen,
    Raw(String),
    Other,
}

impl VisaType {
    pub fn label(&self) -> &str {
        match self {
            Self::SpainResidency => "İspanya Oturum",
            Self::UnitedKingdom => "İngiltere",
            Self::UnitedStates => "Amerika",
            Self::Schengen => "Schengen",
            Self::Raw(text) => text,
            Self::Other => "Diğer",
        }
    }
}

/// One lead row after cleaning and classification.
#[derive(Debug, Clone, PartialEq)]
pub struct CustomerRecord {
    pub id: String,
    pub name: String,
    pub phone: String,
    pub email: String,
    pub visa: VisaType,
    pub country: String,
    pub status: Status,
    pub status_raw: String,
    pub sub_status: String,
    pub documents_pct: String,
    pub source: String,
    pub note: String,
    pub consultant: String,
    pub city: String,
    pub created_at: String,
}

/// One payment line from the revenue ledger.
#[derive(Debug, Clone, PartialEq)]
pub struct RevenueRecord {
    pub id: String,
    pub name: String,
    pub consultant: String,
    pub city: String,
    pub payment_method: String,
    pub advance_date: String,
    pub advance: f64,
    pub remaining_date: String,
    pub remaining: f64,
    pub total: f64,
}

/// Customer records of one export group, e.g. every Eskişehir sheet.
#[derive(Debug, Clone)]
pub struct CustomerGroup {
    pub name: String,
    pub export: String,
    pub records: Vec<CustomerRecord>,
}

/// Everything one run writes into the data module.
#[derive(Debug, Clone)]
pub struct Generated {
    pub groups: Vec<CustomerGroup>,
    pub revenue: Vec<RevenueRecord>,
}
