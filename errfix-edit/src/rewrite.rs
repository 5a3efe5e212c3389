//! Serializes a corrected field list back into literal text.

use errfix_types::Field;

/// Renders the brace block for `fields` using the fixed convention: one field
/// per line at `indent` plus four spaces, each terminated by a comma, closing
/// brace dedented back to `indent`.
pub fn render_literal(fields: &[Field], indent: &str) -> String {
    let mut out = String::from("{\n");
    for field in fields {
        out.push_str(indent);
        out.push_str("    ");
        out.push_str(&field.name);
        out.push_str(": ");
        out.push_str(&field.raw_value);
        out.push_str(",\n");
    }
    out.push_str(indent);
    out.push('}');
    out
}

/// Leading whitespace of the line containing byte `offset`.
pub fn line_indent(text: &str, offset: usize) -> &str {
    let line_start = text[..offset].rfind('\n').map_or(0, |i| i + 1);
    let line = &text[line_start..];
    let indent_len = line
        .char_indices()
        .find(|(_, c)| !matches!(c, ' ' | '\t'))
        .map_or(line.len(), |(i, _)| i);
    &line[..indent_len]
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn renders_one_field_per_line_with_trailing_commas() {
        let fields = vec![
            Field::new("message", "\"oops\".to_string()", 0),
            Field::new("context", "None", 1),
        ];
        let got = render_literal(&fields, "        ");
        assert_eq!(
            got,
            "{\n            message: \"oops\".to_string(),\n            context: None,\n        }"
        );
    }

    #[test]
    fn renders_empty_field_list_as_bare_braces() {
        assert_eq!(render_literal(&[], "  "), "{\n  }");
    }

    #[test]
    fn line_indent_reads_the_opening_line() {
        let text = "fn f() {\n        Err(Kind {\n";
        let offset = text.find("Kind").unwrap();
        assert_eq!(line_indent(text, offset), "        ");
    }

    #[test]
    fn line_indent_on_first_line_is_empty() {
        assert_eq!(line_indent("Kind { a: 1 }", 5), "");
    }
}
