//! Table formatting utilities for CLI output.

use comfy_table::{presets, ContentArrangement, Table};
use msgformat::parser::{Element, Message};

/// One flattened element of a message tree.
pub struct ElementRow {
    /// Selector path from the root, e.g. `n/one`.
    pub path: String,
    pub kind: &'static str,
    pub id: String,
    pub detail: String,
}

/// Flatten a message into rows, depth first.
pub fn element_rows(message: &Message) -> Vec<ElementRow> {
    let mut rows = Vec::new();
    collect_rows(message, "", &mut rows);
    rows
}

fn collect_rows(message: &Message, path: &str, rows: &mut Vec<ElementRow>) {
    for element in &message.elements {
        let row = |kind, id: &str, detail: String| ElementRow {
            path: path.to_string(),
            kind,
            id: id.to_string(),
            detail,
        };
        match element {
            Element::Literal(text) => rows.push(row("literal", "", format!("{text:?}"))),
            Element::Argument { id } => rows.push(row("argument", id, String::new())),
            Element::Typed { id, kind, style } => rows.push(row(
                kind.as_str(),
                id,
                style.clone().unwrap_or_default(),
            )),
            Element::Pound => rows.push(row("pound", "", String::new())),
            Element::Plural {
                id,
                ordinal,
                offset,
                options,
            } => {
                let kind = if *ordinal { "selectordinal" } else { "plural" };
                let detail = if *offset > 0 {
                    format!("offset {offset}, {} options", options.len())
                } else {
                    format!("{} options", options.len())
                };
                rows.push(row(kind, id, detail));
                for option in options {
                    collect_rows(&option.message, &join_path(path, id, &option.selector), rows);
                }
            }
            Element::Select { id, options } => {
                rows.push(row("select", id, format!("{} options", options.len())));
                for option in options {
                    collect_rows(&option.message, &join_path(path, id, &option.selector), rows);
                }
            }
        }
    }
}

fn join_path(path: &str, id: &str, selector: &str) -> String {
    if path.is_empty() {
        format!("{id}/{selector}")
    } else {
        format!("{path}/{id}/{selector}")
    }
}

/// Format message elements as an ASCII table.
pub fn format_element_table(rows: &[ElementRow]) -> Table {
    let mut table = Table::new();
    table.load_preset(presets::UTF8_BORDERS_ONLY);
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Branch", "Kind", "Argument", "Detail"]);

    for row in rows {
        table.add_row(vec![
            row.path.clone(),
            row.kind.to_string(),
            row.id.clone(),
            row.detail.clone(),
        ]);
    }

    table
}

#[cfg(test)]
mod tests {
    use msgformat::parse;

    use super::*;

    #[test]
    fn nested_branches_get_paths() {
        let message = parse("Hi {n, plural, one {# {g, select, other {x}}} other {y}}").unwrap();
        let rows = element_rows(&message);
        let summary: Vec<(&str, &str)> = rows
            .iter()
            .map(|row| (row.path.as_str(), row.kind))
            .collect();
        assert_eq!(
            summary,
            [
                ("", "literal"),
                ("", "plural"),
                ("n/one", "pound"),
                ("n/one", "literal"),
                ("n/one", "select"),
                ("n/one/g/other", "literal"),
                ("n/other", "literal"),
            ]
        );
    }
}
