use super::{Dialect, write_hex, write_quoted_segments};

/// PostgreSQL: double-quoted identifiers, standard-conforming strings, `TRUE`/`FALSE`.
///
/// Strings are written with `''` doubling. When a value carries a backslash
/// or a control character the literal switches to the `E'...'` form so the
/// escapes are interpreted regardless of `standard_conforming_strings`.
#[derive(Debug, Clone, Copy, Default)]
pub struct Postgres;

fn needs_escape_form(value: &str) -> bool {
    value
        .chars()
        .any(|c| matches!(c, '\\' | '\n' | '\r' | '\0' | '\x1a'))
}

impl Dialect for Postgres {
    fn name(&self) -> &'static str {
        "postgres"
    }

    fn write_ident(&self, out: &mut String, name: &str) {
        write_quoted_segments(out, name, '"');
    }

    fn write_string(&self, out: &mut String, value: &str) {
        out.reserve(value.len() + 3);
        if !needs_escape_form(value) {
            out.push('\'');
            for c in value.chars() {
                if c == '\'' {
                    out.push('\'');
                }
                out.push(c);
            }
            out.push('\'');
            return;
        }

        out.push_str("E'");
        for c in value.chars() {
            match c {
                '\'' => out.push_str("''"),
                '\\' => out.push_str("\\\\"),
                '\n' => out.push_str("\\n"),
                '\r' => out.push_str("\\r"),
                // text values cannot hold NUL; written as the four characters `\x00`
                '\0' => out.push_str("\\\\x00"),
                '\x1a' => out.push_str("\\x1a"),
                _ => out.push(c),
            }
        }
        out.push('\'');
    }

    fn write_bool(&self, out: &mut String, value: bool) {
        out.push_str(if value { "TRUE" } else { "FALSE" });
    }

    fn write_bytes(&self, out: &mut String, value: &[u8]) {
        out.push_str("'\\x");
        write_hex(out, value);
        out.push('\'');
    }
}
