use crate::feedback::FeedbackEntry;

pub const CSV_HEADER: [&str; 6] = ["id", "name", "email", "rating", "comments", "createdAt"];
pub const CSV_FILENAME: &str = "feedback.csv";

pub fn to_csv(entries: &[FeedbackEntry]) -> String {
    let rows: Vec<String> = entries.iter().map(row).collect();

    format!("{}\n{}", CSV_HEADER.join(","), rows.join("\n"))
}

fn row(entry: &FeedbackEntry) -> String {
    // a zero rating only comes from a damaged stored entry and exports as empty
    let rating = match entry.rating.as_f64() {
        Some(r) if r == 0.0 => String::new(),
        _ => entry.rating.to_string(),
    };

    [
        entry.id.as_str(),
        entry.name.as_str(),
        entry.email.as_str(),
        rating.as_str(),
        entry.comments.as_str(),
        entry.created_at.as_str(),
    ]
    .iter()
    .map(|field| quote(field))
    .collect::<Vec<_>>()
    .join(",")
}

fn quote(field: &str) -> String {
    format!("\"{}\"", field.replace('"', "\"\""))
}
