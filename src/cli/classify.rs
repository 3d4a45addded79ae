use colored::Colorize;

use crate::classifier::{classify_status, classify_visa};
use crate::cleaner::clean_text;
use crate::error::Result;

pub fn run(status: Option<&str>, country: &str, visa: &str) -> Result<()> {
    if let Some(raw) = status {
        let cleaned = clean_text(raw);
        println!("{} {}", "durum:".bold(), classify_status(&cleaned).label());
    }
    if status.is_none() || !country.is_empty() || !visa.is_empty() {
        let visa_type = classify_visa(&clean_text(country), &clean_text(visa));
        println!("{} {}", "vize: ".bold(), visa_type.label());
    }
    Ok(())
}
