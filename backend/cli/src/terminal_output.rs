//! Terminal output utilities: feature table rendering and formatted notes.

use packlens_core::FeatureRecord;

pub const RESET: &str = "\x1b[0m";
pub const BOLD: &str = "\x1b[1m";
pub const RED: &str = "\x1b[31m";
pub const GREEN: &str = "\x1b[32m";
pub const CYAN: &str = "\x1b[36m";

/// Check if the terminal supports color output.
pub fn supports_color() -> bool {
    std::env::var("NO_COLOR").is_err()
        && (std::env::var("COLORTERM").is_ok()
            || std::env::var("TERM")
                .map(|t| t != "dumb")
                .unwrap_or(false))
}

/// Print a formatted INFO note to stdout.
pub fn note_info(msg: &str) {
    if supports_color() {
        println!("{CYAN}{BOLD}i{RESET} {msg}");
    } else {
        println!("INFO: {msg}");
    }
}

/// Print a formatted ERROR note.
pub fn note_error(msg: &str) {
    if supports_color() {
        eprintln!("{RED}{BOLD}x{RESET} {msg}");
    } else {
        eprintln!("ERROR: {msg}");
    }
}

/// Print a formatted SUCCESS note.
pub fn note_success(msg: &str) {
    if supports_color() {
        println!("{GREEN}{BOLD}+{RESET} {msg}");
    } else {
        println!("OK: {msg}");
    }
}

/// Render the extracted features as a two-column table.
pub fn render_record(record: &FeatureRecord) -> String {
    let rows = record_rows(record);
    let width = rows.iter().map(|(k, _)| k.len()).max().unwrap_or(0);

    let mut out = String::new();
    for (key, value) in rows {
        out.push_str(&format!("  {key:<width$}  {value}\n"));
    }
    out
}

fn record_rows(record: &FeatureRecord) -> Vec<(&'static str, String)> {
    vec![
        ("flavors", join_or_dash(record.flavors.as_deref())),
        (
            "multiple_descriptors",
            record
                .multiple_descriptors
                .map(|v| v.to_string())
                .unwrap_or_else(|| "-".to_string()),
        ),
        ("brand_name", text_or_dash(record.brand_name.as_deref())),
        (
            "extraction_evidence",
            text_or_dash(record.extraction_evidence.as_deref()),
        ),
        (
            "nicotine_content",
            text_or_dash(record.nicotine_content.as_deref()),
        ),
        (
            "size_or_volume",
            text_or_dash(record.size_or_volume.as_deref()),
        ),
        (
            "warning_label_present",
            record.warning_label_present.to_string(),
        ),
        (
            "warning_label_location",
            text_or_dash(record.warning_label_location.as_deref()),
        ),
        ("main_colors", join_or_dash(record.main_colors.as_deref())),
    ]
}

fn text_or_dash(value: Option<&str>) -> String {
    value.unwrap_or("-").to_string()
}

fn join_or_dash(values: Option<&[String]>) -> String {
    match values {
        Some(list) => list.join(", "),
        None => "-".to_string(),
    }
}
