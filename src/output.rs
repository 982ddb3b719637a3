//! JSON rendering for command output.
//!
//! Responses go to stdout, compact by default and pretty-printed under the
//! global `--format` flag. List pages print one JSON document per item, the
//! shape downstream tooling expects to stream line by line.

use std::io::Write;

use serde::Serialize;

#[derive(Debug, thiserror::Error)]
pub enum OutputError {
    #[error("cannot marshal response to JSON: {0}")]
    Marshal(#[from] serde_json::Error),
    #[error("cannot write output: {0}")]
    Write(#[from] std::io::Error),
}

pub fn render_json<T: Serialize>(value: &T, pretty: bool) -> Result<String, OutputError> {
    if pretty {
        Ok(serde_json::to_string_pretty(value)?)
    } else {
        Ok(serde_json::to_string(value)?)
    }
}

/// Prints one response document to stdout.
pub fn print_json<T: Serialize>(value: &T, pretty: bool) -> Result<(), OutputError> {
    write_json(&mut std::io::stdout(), value, pretty)
}

/// Prints each item of a page as its own JSON document.
pub fn print_json_docs<T: Serialize>(items: &[T], pretty: bool) -> Result<(), OutputError> {
    let mut stdout = std::io::stdout();
    for item in items {
        write_json(&mut stdout, item, pretty)?;
    }
    Ok(())
}

fn write_json<W: Write, T: Serialize>(
    out: &mut W,
    value: &T,
    pretty: bool,
) -> Result<(), OutputError> {
    let rendered = render_json(value, pretty)?;
    writeln!(out, "{rendered}")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn compact_rendering_is_single_line() {
        let value = json!({"id": "abc", "limit": 25});

        let rendered = render_json(&value, false).unwrap();

        assert_eq!(rendered, r#"{"id":"abc","limit":25}"#);
    }

    #[test]
    fn pretty_rendering_indents_with_two_spaces() {
        let value = json!({"id": "abc"});

        let rendered = render_json(&value, true).unwrap();

        assert_eq!(rendered, "{\n  \"id\": \"abc\"\n}");
    }

    #[test]
    fn write_json_docs_emits_one_line_per_item() {
        let items = vec![json!({"n": 1}), json!({"n": 2})];
        let mut buffer = Vec::new();

        for item in &items {
            write_json(&mut buffer, item, false).unwrap();
        }

        let output = String::from_utf8(buffer).unwrap();
        assert_eq!(output, "{\"n\":1}\n{\"n\":2}\n");
    }
}
