use std::io::IsTerminal;

use serde::Serialize;
use serde_json::Value;

use crate::cli::OutputFormat;

pub mod table;

/// Render a serializable response to a string in the requested format.
pub fn render<T: Serialize>(value: &T, format: OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(value)?),
        OutputFormat::Table => render_table(value, table_options()),
        OutputFormat::Raw => Ok(serde_json::to_string(value)?),
    }
}

/// Print a serializable response in the requested format.
pub fn output<T: Serialize>(value: &T, format: OutputFormat) -> anyhow::Result<()> {
    let rendered = render(value, format)?;
    println!("{rendered}");
    Ok(())
}

fn table_options() -> table::TableOptions {
    let max_width = std::env::var("COLUMNS")
        .ok()
        .and_then(|value| value.parse::<usize>().ok())
        .filter(|width| *width >= 40);

    table::TableOptions {
        max_width,
        color: std::io::stdout().is_terminal() && std::env::var_os("NO_COLOR").is_none(),
    }
}

fn render_table<T: Serialize>(value: &T, options: table::TableOptions) -> anyhow::Result<String> {
    let value = serde_json::to_value(value)?;
    match value {
        Value::Array(items) => Ok(render_array_table(&items, options)),
        Value::Object(map) => {
            let headers = ["key", "value"];
            let rows = map
                .into_iter()
                .map(|(key, value)| vec![key, value_to_cell(&value)])
                .collect::<Vec<_>>();
            Ok(table::render_entity_table(&headers, &rows, options))
        }
        scalar => {
            let headers = ["value"];
            let rows = vec![vec![value_to_cell(&scalar)]];
            Ok(table::render_entity_table(&headers, &rows, options))
        }
    }
}

/// One row per array item; object items become columns in first-seen key order.
fn render_array_table(items: &[Value], options: table::TableOptions) -> String {
    if items.is_empty() {
        return String::from("(no rows)");
    }

    if !items.iter().all(Value::is_object) {
        let headers = ["value"];
        let rows = items
            .iter()
            .map(|item| vec![value_to_cell(item)])
            .collect::<Vec<_>>();
        return table::render_entity_table(&headers, &rows, options);
    }

    let mut headers = Vec::<String>::new();
    for map in items.iter().filter_map(Value::as_object) {
        for key in map.keys() {
            if !headers.contains(key) {
                headers.push(key.clone());
            }
        }
    }

    let header_refs = headers.iter().map(String::as_str).collect::<Vec<_>>();
    let rows = items
        .iter()
        .filter_map(Value::as_object)
        .map(|map| {
            headers
                .iter()
                .map(|header| {
                    map.get(header)
                        .map_or_else(|| String::from("-"), value_to_cell)
                })
                .collect::<Vec<_>>()
        })
        .collect::<Vec<_>>();

    table::render_entity_table(&header_refs, &rows, options)
}

/// Nested objects collapse to their `title` or `name` when present.
fn value_to_cell(value: &Value) -> String {
    match value {
        Value::Null => String::from("-"),
        Value::Bool(v) => v.to_string(),
        Value::Number(v) => v
            .as_f64()
            .filter(|_| v.is_f64())
            .map_or_else(|| v.to_string(), |f| format!("{f:.3}")),
        Value::String(v) => v.clone(),
        Value::Object(map) => map
            .get("title")
            .or_else(|| map.get("name"))
            .and_then(Value::as_str)
            .map_or_else(|| compact_json(value), str::to_string),
        Value::Array(_) => compact_json(value),
    }
}

fn compact_json(value: &Value) -> String {
    serde_json::to_string(value).unwrap_or_else(|_| String::from("<invalid-json>"))
}

#[cfg(test)]
mod tests {
    use serde::Serialize;
    use serde_json::json;

    use super::{render, render_table, table::TableOptions, value_to_cell};
    use crate::cli::OutputFormat;

    const PLAIN: TableOptions = TableOptions {
        max_width: None,
        color: false,
    };

    #[derive(Serialize)]
    struct Hit {
        id: &'static str,
        score: f64,
    }

    #[test]
    fn json_render_is_valid_json() {
        let value = Hit {
            id: "kb-1",
            score: 1.5,
        };
        let out = render(&value, OutputFormat::Json).expect("json render should work");
        let parsed: serde_json::Value = serde_json::from_str(&out).expect("json should parse");
        assert_eq!(parsed["id"], "kb-1");
        assert_eq!(parsed["score"], 1.5);
    }

    #[test]
    fn raw_render_is_single_line_json() {
        let value = vec![
            Hit {
                id: "kb-1",
                score: 1.5,
            },
            Hit {
                id: "kb-2",
                score: 0.5,
            },
        ];
        let out = render(&value, OutputFormat::Raw).expect("raw render should work");
        let parsed: serde_json::Value = serde_json::from_str(&out).expect("json should parse");
        assert_eq!(parsed[1]["id"], "kb-2");
        assert!(!out.contains('\n'));
    }

    #[test]
    fn array_of_objects_renders_one_row_per_item() {
        let value = vec![
            Hit {
                id: "kb-1",
                score: 1.5,
            },
            Hit {
                id: "kb-2",
                score: 0.25,
            },
        ];
        let out = render_table(&value, PLAIN).expect("table render should work");
        let lines: Vec<&str> = out.lines().collect();

        assert_eq!(lines.len(), 4);
        assert!(lines[0].starts_with("id"));
        assert!(lines[0].contains("score"));
        assert!(lines[2].contains("kb-1"));
        assert!(lines[3].contains("0.250"));
    }

    #[test]
    fn empty_array_renders_placeholder() {
        let value: Vec<Hit> = Vec::new();
        assert_eq!(render_table(&value, PLAIN).unwrap(), "(no rows)");
    }

    #[test]
    fn nested_entry_collapses_to_title() {
        let cell = value_to_cell(&json!({ "id": "kb-1", "title": "Cúm mùa" }));
        assert_eq!(cell, "Cúm mùa");
        assert_eq!(value_to_cell(&json!(["a", "b"])), r#"["a","b"]"#);
        assert_eq!(value_to_cell(&json!(null)), "-");
        assert_eq!(value_to_cell(&json!(3)), "3");
    }
}
