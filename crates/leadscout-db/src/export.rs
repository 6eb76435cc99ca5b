//! CSV serialization of verified leads.

use crate::leads::LeadRow;
use crate::DbError;

/// Fixed export header. Column order is part of the export contract;
/// downstream spreadsheets key on it.
pub const CSV_HEADER: [&str; 8] = [
    "Business Name",
    "Owner Name",
    "Phone",
    "Address",
    "Website",
    "Email",
    "Source",
    "Date Scraped",
];

/// Serializes lead rows to a CSV document with the fixed header.
///
/// Absent optional fields render as empty cells. Rows are emitted in the
/// order given.
///
/// # Errors
///
/// Returns [`DbError::Csv`] if serialization fails.
pub fn leads_to_csv(leads: &[LeadRow]) -> Result<String, DbError> {
    let mut writer = csv::Writer::from_writer(Vec::new());

    writer
        .write_record(CSV_HEADER)
        .map_err(|e| DbError::Csv(e.to_string()))?;

    for lead in leads {
        writer
            .write_record([
                lead.business_name.as_str(),
                lead.owner_name.as_deref().unwrap_or(""),
                lead.phone.as_deref().unwrap_or(""),
                lead.address.as_deref().unwrap_or(""),
                lead.website.as_deref().unwrap_or(""),
                lead.email.as_deref().unwrap_or(""),
                lead.source_platform.as_str(),
                &lead.created_at.format("%Y-%m-%d %H:%M:%S").to_string(),
            ])
            .map_err(|e| DbError::Csv(e.to_string()))?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| DbError::Csv(e.to_string()))?;
    String::from_utf8(bytes).map_err(|e| DbError::Csv(e.to_string()))
}
