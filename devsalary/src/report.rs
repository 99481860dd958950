//! Rendering of [`PlatformResultSet`]s for the terminal.

use devsalary_core::contract::{Platform, PlatformResultSet};
use serde::ser::{Serialize, SerializeMap, Serializer};

const HEADERS: [&str; 4] = [
    "Programming language",
    "Vacancies found",
    "Vacancies processed",
    "Average salary",
];

/// ASCII table with the title set into the top border.
///
/// ```text
/// +HeadHunter Moscow----+-----------------+
/// | Programming language | Vacancies found |
/// ```
pub fn render_table(title: &str, results: &PlatformResultSet) -> String {
    let mut rows: Vec<[String; 4]> = vec![HEADERS.map(str::to_string)];
    for (language, summary) in results.iter() {
        rows.push([
            language.to_string(),
            summary.vacancies_found.to_string(),
            summary.vacancies_processed.to_string(),
            summary.average_salary.to_string(),
        ]);
    }

    let mut widths = [0usize; 4];
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let border = border_line(&widths);
    let mut out = String::new();
    out.push_str(&titled_border(&border, title));
    out.push('\n');
    for (i, row) in rows.iter().enumerate() {
        out.push('|');
        for (cell, width) in row.iter().zip(widths) {
            let pad = width - cell.chars().count();
            out.push(' ');
            out.push_str(cell);
            out.push_str(&" ".repeat(pad));
            out.push_str(" |");
        }
        out.push('\n');
        if i == 0 {
            out.push_str(&border);
            out.push('\n');
        }
    }
    out.push_str(&border);
    out
}

fn border_line(widths: &[usize]) -> String {
    let mut line = String::from("+");
    for width in widths {
        line.push_str(&"-".repeat(width + 2));
        line.push('+');
    }
    line
}

// Titles that do not fit leave the border untouched.
fn titled_border(border: &str, title: &str) -> String {
    let title_len = title.chars().count();
    let border_len = border.chars().count();
    if title_len + 2 > border_len {
        return border.to_string();
    }
    let mut line = String::from("+");
    line.push_str(title);
    line.extend(border.chars().skip(title_len + 1));
    line
}

struct Reports<'a>(&'a [(Platform, PlatformResultSet)]);

impl Serialize for Reports<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (platform, results) in self.0 {
            map.serialize_entry(platform.title(), results)?;
        }
        map.end()
    }
}

/// JSON object keyed by platform title, platforms and languages in report order.
pub fn render_json(reports: &[(Platform, PlatformResultSet)]) -> serde_json::Result<String> {
    serde_json::to_string_pretty(&Reports(reports))
}
