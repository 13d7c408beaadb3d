use tracing::debug;

use crate::models::{Gender, LeadStatus, NewLead};

/// Split raw CSV text into rows of cells.
///
/// Handles quoted cells, doubled-quote escapes, embedded commas and
/// newlines, and CRLF line endings. Malformed input degrades gracefully:
/// an unclosed quote runs to end of input rather than erroring, matching
/// how spreadsheet tools emit partial files.
pub fn parse_rows(input: &str) -> Vec<Vec<String>> {
    let mut rows = Vec::new();
    let mut row: Vec<String> = Vec::new();
    let mut cell = String::new();
    let mut in_quotes = false;

    let mut chars = input.chars().peekable();
    while let Some(ch) = chars.next() {
        if in_quotes {
            match ch {
                '"' => {
                    if chars.peek() == Some(&'"') {
                        chars.next();
                        cell.push('"');
                    } else {
                        in_quotes = false;
                    }
                }
                _ => cell.push(ch),
            }
            continue;
        }
        match ch {
            '"' => in_quotes = true,
            ',' => {
                row.push(std::mem::take(&mut cell));
            }
            '\r' => {
                // Part of CRLF; the '\n' branch closes the row.
                if chars.peek() != Some(&'\n') {
                    cell.push('\r');
                }
            }
            '\n' => {
                row.push(std::mem::take(&mut cell));
                rows.push(std::mem::take(&mut row));
            }
            _ => cell.push(ch),
        }
    }

    // Final row without a trailing newline.
    if !cell.is_empty() || !row.is_empty() {
        row.push(cell);
        rows.push(row);
    }

    // Drop fully empty rows (blank lines between records).
    rows.retain(|r| !(r.len() == 1 && r[0].trim().is_empty()));
    rows
}

/// Parse a bulk lead upload into creation payloads.
///
/// Columns are positional: name, phone, status, source, gender, age,
/// problem. The first row is skipped when its first cell looks like a
/// header. Rows with fewer than two cells or a blank name are dropped.
/// The status column is ignored: every imported lead enters the pipeline
/// as a fresh inquiry regardless of what the sheet claims.
pub fn parse_leads(input: &str) -> Vec<NewLead> {
    let rows = parse_rows(input);
    let mut leads = Vec::new();

    for (index, row) in rows.iter().enumerate() {
        if index == 0 && row.first().is_some_and(|c| c.to_lowercase().contains("name")) {
            continue;
        }
        if row.len() < 2 {
            debug!(row = index, "skipping short csv row");
            continue;
        }
        let name = row[0].trim();
        if name.is_empty() {
            debug!(row = index, "skipping csv row with empty name");
            continue;
        }

        let cell = |i: usize| row.get(i).map(|c: &String| c.trim().to_string());
        let non_empty = |i: usize| cell(i).filter(|c| !c.is_empty());

        let mut lead = NewLead::new(name, cell(1).unwrap_or_default());
        lead.status = LeadStatus::NewInquiry;
        lead.source = non_empty(3).unwrap_or_else(|| "Bulk Import".into());
        lead.inquiry = "Bulk Import".into();
        lead.gender = non_empty(4).and_then(|g| Gender::from_label(&g));
        lead.age = non_empty(5);
        lead.problem = non_empty(6);
        leads.push(lead);
    }

    leads
}
