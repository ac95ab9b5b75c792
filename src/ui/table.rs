//! Plain-text table of student records.

use crate::data::{format_marks, Student};

const HEADERS: [&str; 5] = ["ID", "Name", "Branch", "Year", "Marks"];
const SEPARATOR: &str = " | ";

/// Render records as left-aligned columns, each as wide as its widest cell or header.
///
/// Returns the header, a dashed rule, one line per record, and a closing rule.
pub fn render_table(students: &[Student]) -> Vec<String> {
    let rows: Vec<[String; 5]> = students
        .iter()
        .map(|s| {
            [
                s.id.clone(),
                s.name.clone(),
                s.branch.clone(),
                s.year.to_string(),
                format_marks(s.marks),
            ]
        })
        .collect();

    let mut widths = HEADERS.map(|h| h.chars().count());
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let header = format_row(&HEADERS, &widths);
    let rule = "-".repeat(header.chars().count());

    let mut lines = Vec::with_capacity(rows.len() + 3);
    lines.push(header);
    lines.push(rule.clone());
    lines.extend(rows.iter().map(|row| format_row(row, &widths)));
    lines.push(rule);
    lines
}

fn format_row<S: AsRef<str>>(cells: &[S; 5], widths: &[usize; 5]) -> String {
    cells
        .iter()
        .zip(widths)
        .map(|(cell, width)| format!("{:<width$}", cell.as_ref(), width = *width))
        .collect::<Vec<_>>()
        .join(SEPARATOR)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_header_only_widths_for_short_values() {
        let students = vec![Student::new("S1", "Al", "CS", 2, 88.5).unwrap()];
        let lines = render_table(&students);

        assert_eq!(lines[0], "ID | Name | Branch | Year | Marks");
        assert_eq!(lines[1], "-".repeat(lines[0].len()));
        assert_eq!(lines[2], "S1 | Al   | CS     | 2    | 88.5 ");
        assert_eq!(lines[3], lines[1]);
    }

    #[test]
    fn test_columns_grow_to_widest_value() {
        let students = vec![
            Student::new("S1", "Alice", "CS", 2, 88.5).unwrap(),
            Student::new("S1000", "Bartholomew", "Mechanical", 4, 100.0).unwrap(),
        ];
        let lines = render_table(&students);

        assert_eq!(lines.len(), 5);
        assert_eq!(lines[0], "ID    | Name        | Branch     | Year | Marks");
        assert_eq!(lines[3], "S1000 | Bartholomew | Mechanical | 4    | 100.0");
        assert!(lines.iter().skip(2).take(2).all(|l| l.len() == lines[0].len()));
    }
}
