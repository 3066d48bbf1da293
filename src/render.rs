//! Plain-text table output for the CLI.
use crate::page::RosterView;
use crate::schema::Cell;

/// Render visible columns as a left-aligned text table. Action cells list
/// their labels as `[Edit] [Delete]`.
pub fn render_table(view: &RosterView) -> String {
    let columns: Vec<_> = view
        .columns
        .iter()
        .filter(|c| view.column_visibility.get(&c.id).copied().unwrap_or(true))
        .collect();

    let mut grid: Vec<Vec<String>> = Vec::with_capacity(view.data.len() + 1);
    grid.push(columns.iter().map(|c| c.header.clone()).collect());
    for row in view.data.iter() {
        grid.push(
            columns
                .iter()
                .map(|c| match c.render_cell(row) {
                    Cell::Text(text) => text,
                    Cell::Actions(affs) => affs
                        .iter()
                        .map(|a| format!("[{}]", a.label()))
                        .collect::<Vec<_>>()
                        .join(" "),
                })
                .collect(),
        );
    }

    let widths: Vec<usize> = (0..columns.len())
        .map(|i| grid.iter().map(|r| r[i].chars().count()).max().unwrap_or(0))
        .collect();

    let mut out = String::new();
    for (n, line) in grid.iter().enumerate() {
        let cells: Vec<String> = line
            .iter()
            .zip(&widths)
            .map(|(cell, w)| format!("{:<width$}", cell, width = *w))
            .collect();
        out.push_str(cells.join(" | ").trim_end());
        out.push('\n');
        if n == 0 {
            let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
            out.push_str(&rule.join("-+-"));
            out.push('\n');
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::RosterRow;
    use crate::schema::{base_columns, build_schema, column_visibility, ActionDescriptor};
    use std::sync::Arc;

    #[test]
    fn hides_identity_and_lists_action_labels() {
        let columns = build_schema(
            &base_columns(),
            vec![
                ActionDescriptor::edit(|_: &RosterRow| Ok(())),
                ActionDescriptor::delete(|_: &RosterRow| Ok(())),
            ],
        );
        let view = RosterView {
            data: Arc::new(vec![RosterRow {
                id: 77,
                name: "HW1".into(),
                description: "first".into(),
                course_id: 5,
                created_at: "c".into(),
                updated_at: "u".into(),
                course_name: "CS101".into(),
            }]),
            column_visibility: column_visibility(&columns),
            columns: Arc::new(columns),
        };
        let out = render_table(&view);
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("Name"));
        assert!(!lines[0].contains("Id"));
        assert!(lines[2].contains("CS101"));
        assert!(lines[2].ends_with("[Edit] [Delete]"));
        assert!(!lines[2].contains("77"));
    }
}
