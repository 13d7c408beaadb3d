use crate::models::Lead;

use super::{CsvError, CsvResult};

/// Column order of the lead report. Import expects the same order.
pub const EXPORT_HEADERS: [&str; 8] = [
    "Name",
    "Phone",
    "Status",
    "Source",
    "Gender",
    "Age",
    "Problem",
    "Date Added",
];

/// Quote a field, doubling embedded quotes. Every value cell is quoted
/// so commas and newlines inside names or problems survive.
fn quote_field(field: &str) -> String {
    format!("\"{}\"", field.replace('"', "\"\""))
}

/// Render leads as CSV in the fixed report layout.
///
/// The header row is unquoted; all value cells are quoted. Returns
/// [`CsvError::NoRows`] for an empty list so callers do not write an
/// empty report file.
pub fn export_leads(leads: &[Lead]) -> CsvResult<String> {
    if leads.is_empty() {
        return Err(CsvError::NoRows);
    }

    let mut out = String::new();
    out.push_str(&EXPORT_HEADERS.join(","));
    out.push('\n');

    for lead in leads {
        let gender = lead.gender.map(|g| g.label().to_string()).unwrap_or_default();
        let cells = [
            lead.name.as_str(),
            lead.phone.as_str(),
            lead.status.label(),
            lead.source.as_str(),
            gender.as_str(),
            lead.age.as_deref().unwrap_or(""),
            lead.problem.as_deref().unwrap_or(""),
            lead.date_added.as_str(),
        ];
        let row: Vec<String> = cells.iter().map(|cell| quote_field(cell)).collect();
        out.push_str(&row.join(","));
        out.push('\n');
    }

    Ok(out)
}

/// Report file name for the active status filter, stamped with today.
///
/// "All" becomes "All_Leads"; spaces in status labels become underscores.
pub fn export_file_name(filter_label: &str) -> String {
    let label = if filter_label == "All" {
        "All_Leads".to_string()
    } else {
        filter_label.replace(' ', "_")
    };
    let date = chrono::Utc::now().format("%Y-%m-%d");
    format!("leads_{label}_{date}.csv")
}
