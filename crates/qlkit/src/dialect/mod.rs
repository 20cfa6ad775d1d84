//! SQL dialects: identifier quoting, literal encoding and placeholders.
//!
//! A [`Dialect`] is a stateless strategy chosen once per connection. Builders
//! and the interpolation engine write through it directly into the output
//! buffer, so rendering never allocates intermediate strings per token.
//!
//! ```ignore
//! use qlkit::dialect::{self, Dialect};
//!
//! assert_eq!(dialect::MYSQL.quote_ident("users.id"), "`users`.`id`");
//! assert_eq!(dialect::POSTGRES.quote_ident("users.id"), "\"users\".\"id\"");
//! assert_eq!(dialect::MYSQL.quote_ident("COUNT(*)"), "COUNT(*)");
//! ```

mod mysql;
mod postgres;


use crate::error::{QlError, QlResult};
use chrono::NaiveDateTime;
use std::fmt::Debug;

pub use mysql::MySql;
pub use postgres::Postgres;

/// The MySQL dialect.
pub static MYSQL: MySql = MySql;

/// The PostgreSQL dialect.
pub static POSTGRES: Postgres = Postgres;

/// Literal format shared by both built-in dialects (always UTC).
pub(crate) const TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Identifier quoting, literal encoding and placeholder conventions of a database.
pub trait Dialect: Send + Sync + Debug {
    /// Short name used in logs and errors.
    fn name(&self) -> &'static str;

    /// Write `name` as a quoted identifier.
    ///
    /// Names holding anything besides ASCII letters, digits, `_` and `.` are
    /// treated as expressions and written verbatim. Dotted names are quoted
    /// segment by segment.
    fn write_ident(&self, out: &mut String, name: &str);

    /// Write `value` as an escaped string literal.
    fn write_string(&self, out: &mut String, value: &str);

    /// Write a boolean literal.
    fn write_bool(&self, out: &mut String, value: bool);

    /// Write a UTC timestamp literal.
    fn write_time(&self, out: &mut String, value: &NaiveDateTime) {
        self.write_string(out, &value.format(TIME_FORMAT).to_string());
    }

    /// Write a byte-string literal.
    fn write_bytes(&self, out: &mut String, value: &[u8]);

    /// The bind placeholder token.
    fn placeholder(&self) -> &'static str {
        "?"
    }

    /// Whether `UPDATE ... LIMIT n` / `DELETE ... LIMIT n` is valid.
    fn supports_mutation_limit(&self) -> bool {
        false
    }

    /// Quote an identifier into a new string.
    fn quote_ident(&self, name: &str) -> String {
        let mut out = String::with_capacity(name.len() + 2);
        self.write_ident(&mut out, name);
        out
    }

    /// Encode a string literal into a new string.
    fn encode_string(&self, value: &str) -> String {
        let mut out = String::with_capacity(value.len() + 2);
        self.write_string(&mut out, value);
        out
    }

    /// Encode a boolean literal into a new string.
    fn encode_bool(&self, value: bool) -> String {
        let mut out = String::new();
        self.write_bool(&mut out, value);
        out
    }

    /// Encode a timestamp literal into a new string.
    fn encode_time(&self, value: &NaiveDateTime) -> String {
        let mut out = String::new();
        self.write_time(&mut out, value);
        out
    }

    /// Encode a byte-string literal into a new string.
    fn encode_bytes(&self, value: &[u8]) -> String {
        let mut out = String::with_capacity(value.len() * 2 + 4);
        self.write_bytes(&mut out, value);
        out
    }
}

/// Pick a dialect by driver name.
///
/// Accepts `mysql`, `postgres` and `postgresql` (case-insensitive).
pub fn for_driver(driver: &str) -> QlResult<&'static dyn Dialect> {
    match driver.to_ascii_lowercase().as_str() {
        "mysql" => Ok(&MYSQL),
        "postgres" | "postgresql" => Ok(&POSTGRES),
        _ => Err(QlError::UnsupportedDriver(driver.to_string())),
    }
}

/// Returns true when `name` contains characters that cannot appear in a plain identifier.
pub(crate) fn is_expr(name: &str) -> bool {
    !name
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '.')
}

/// Quote every dotted segment of `name` with `quote`.
pub(crate) fn write_quoted_segments(out: &mut String, name: &str, quote: char) {
    if is_expr(name) {
        out.push_str(name);
        return;
    }
    for (i, part) in name.split('.').enumerate() {
        if i > 0 {
            out.push('.');
        }
        out.push(quote);
        out.push_str(part);
        out.push(quote);
    }
}

pub(crate) fn write_hex(out: &mut String, value: &[u8]) {
    const HEX: &[u8; 16] = b"0123456789abcdef";
    out.reserve(value.len() * 2);
    for b in value {
        out.push(HEX[(b >> 4) as usize] as char);
        out.push(HEX[(b & 0x0f) as usize] as char);
    }
}
