use super::{Dialect, write_hex, write_quoted_segments};

/// MySQL: backtick identifiers, backslash-escaped strings, `1`/`0` booleans.
#[derive(Debug, Clone, Copy, Default)]
pub struct MySql;

impl Dialect for MySql {
    fn name(&self) -> &'static str {
        "mysql"
    }

    fn write_ident(&self, out: &mut String, name: &str) {
        write_quoted_segments(out, name, '`');
    }

    fn write_string(&self, out: &mut String, value: &str) {
        out.reserve(value.len() + 2);
        out.push('\'');
        for c in value.chars() {
            match c {
                '\'' => out.push_str("\\'"),
                '"' => out.push_str("\\\""),
                '\\' => out.push_str("\\\\"),
                '\n' => out.push_str("\\n"),
                '\r' => out.push_str("\\r"),
                '\0' => out.push_str("\\0"),
                '\x1a' => out.push_str("\\Z"),
                _ => out.push(c),
            }
        }
        out.push('\'');
    }

    fn write_bool(&self, out: &mut String, value: bool) {
        out.push(if value { '1' } else { '0' });
    }

    fn write_bytes(&self, out: &mut String, value: &[u8]) {
        out.push_str("0x");
        write_hex(out, value);
    }

    fn supports_mutation_limit(&self) -> bool {
        true
    }
}
