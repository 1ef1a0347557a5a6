use serde::Serialize;
use serde_json::{Map, Value};

use crate::cli::OutputFormat;
use crate::ui;

pub mod table;

/// Render a serializable response to a string in the requested format.
pub fn render<T: Serialize>(value: &T, format: OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(value)?),
        OutputFormat::Table => render_table(value),
        OutputFormat::Raw => Ok(serde_json::to_string(value)?),
    }
}

/// Print a serializable response in the requested format.
pub fn output<T: Serialize>(value: &T, format: OutputFormat) -> anyhow::Result<()> {
    let rendered = render(value, format)?;
    println!("{rendered}");
    Ok(())
}

fn options() -> table::TableOptions {
    let prefs = ui::prefs();
    table::TableOptions {
        max_width: prefs.term_width,
        color: prefs.table_color,
    }
}

/// Objects render as a key/value table of their scalar fields (nested
/// objects flattened to dotted keys) followed by one titled table per
/// array-of-objects field.
fn render_table<T: Serialize>(value: &T) -> anyhow::Result<String> {
    let value = serde_json::to_value(value)?;
    let rendered = match value {
        Value::Array(items) => render_array(&items),
        Value::Object(map) => {
            let mut scalars = Vec::new();
            let mut sections = Vec::new();
            flatten("", &map, &mut scalars, &mut sections);

            let mut blocks = Vec::new();
            if !scalars.is_empty() {
                blocks.push(table::render_rows(&["key", "value"], &scalars, options()));
            }
            for (title, items) in sections {
                blocks.push(format!("{title}\n{}", render_array(&items)));
            }
            blocks.join("\n\n")
        }
        scalar => table::render_rows(&["value"], &[vec![cell(&scalar)]], options()),
    };
    Ok(rendered)
}

fn flatten(
    prefix: &str,
    map: &Map<String, Value>,
    scalars: &mut Vec<Vec<String>>,
    sections: &mut Vec<(String, Vec<Value>)>,
) {
    for (key, value) in map {
        let path = if prefix.is_empty() {
            key.clone()
        } else {
            format!("{prefix}.{key}")
        };
        match value {
            Value::Object(inner) if !inner.is_empty() => flatten(&path, inner, scalars, sections),
            Value::Array(items) if !items.is_empty() && items.iter().all(Value::is_object) => {
                sections.push((path, items.clone()));
            }
            other => scalars.push(vec![path, cell(other)]),
        }
    }
}

fn render_array(items: &[Value]) -> String {
    if items.is_empty() {
        return String::from("(no rows)");
    }

    if !items.iter().all(Value::is_object) {
        let rows = items.iter().map(|item| vec![cell(item)]).collect::<Vec<_>>();
        return table::render_rows(&["value"], &rows, options());
    }

    let mut headers = Vec::<&str>::new();
    for map in items.iter().filter_map(Value::as_object) {
        for key in map.keys() {
            if !headers.contains(&key.as_str()) {
                headers.push(key);
            }
        }
    }

    let rows = items
        .iter()
        .filter_map(Value::as_object)
        .map(|map| {
            headers
                .iter()
                .map(|header| map.get(*header).map_or_else(|| String::from("-"), cell))
                .collect::<Vec<_>>()
        })
        .collect::<Vec<_>>();

    table::render_rows(&headers, &rows, options())
}

fn cell(value: &Value) -> String {
    match value {
        Value::Null => String::from("-"),
        Value::Bool(v) => v.to_string(),
        Value::Number(v) => v.to_string(),
        Value::String(v) => v.clone(),
        Value::Array(items) if items.iter().all(Value::is_string) => items
            .iter()
            .filter_map(Value::as_str)
            .collect::<Vec<_>>()
            .join(", "),
        other => serde_json::to_string(other).unwrap_or_else(|_| String::from("<invalid-json>")),
    }
}

#[cfg(test)]
mod tests {
    use serde::Serialize;

    use super::render;
    use crate::cli::OutputFormat;

    #[derive(Serialize)]
    struct Bucket {
        bucket: &'static str,
        conversations: u32,
    }

    #[derive(Serialize)]
    struct Window {
        days: u32,
    }

    #[derive(Serialize)]
    struct Series {
        organization_id: &'static str,
        window: Window,
        buckets: Vec<Bucket>,
    }

    fn series() -> Series {
        Series {
            organization_id: "acme",
            window: Window { days: 30 },
            buckets: vec![
                Bucket {
                    bucket: "2026-03-02",
                    conversations: 3,
                },
                Bucket {
                    bucket: "2026-03-09",
                    conversations: 1,
                },
            ],
        }
    }

    #[test]
    fn json_render_is_valid_json() {
        let out = render(&series(), OutputFormat::Json).expect("json render should work");
        let parsed: serde_json::Value = serde_json::from_str(&out).expect("json should parse");
        assert_eq!(parsed["organization_id"], "acme");
        assert_eq!(parsed["buckets"][1]["conversations"], 1);
    }

    #[test]
    fn raw_render_is_single_line_json() {
        let out = render(&series(), OutputFormat::Raw).expect("raw render should work");
        assert!(!out.contains('\n'));
    }

    #[test]
    fn table_render_flattens_and_sections() {
        let out = render(&series(), OutputFormat::Table).expect("table render should work");
        assert!(out.lines().next().is_some_and(|line| line.contains("key")));
        assert!(out.contains("window.days"));
        assert!(out.contains("\nbuckets\n"));
        assert!(out.contains("2026-03-09"));
    }

    #[test]
    fn empty_array_renders_placeholder() {
        let empty: Vec<Bucket> = Vec::new();
        let out = render(&empty, OutputFormat::Table).expect("table render should work");
        assert_eq!(out, "(no rows)");
    }
}
