//! Inline bound values as dialect literals.
//!
//! Used when a statement is sent as plain text instead of with driver
//! parameters, and for debugging output. Nested builders are rendered with
//! the same dialect and recursively interpolated; SELECT subqueries are
//! parenthesized.

use crate::builder::Buffer;
use crate::dialect::Dialect;
use crate::error::{QlError, QlResult};
use crate::value::Value;
use std::fmt::Write as _;

/// Replace every placeholder in `query` with the literal form of the matching value.
///
/// The number of placeholders must equal `values.len()`.
pub fn interpolate(query: &str, values: &[Value], dialect: &dyn Dialect) -> QlResult<String> {
    let mut out = String::with_capacity(query.len() + values.len() * 8);
    interpolate_into(&mut out, query, values, dialect)?;
    Ok(out)
}

fn interpolate_into(
    out: &mut String,
    query: &str,
    values: &[Value],
    dialect: &dyn Dialect,
) -> QlResult<()> {
    let placeholder = dialect.placeholder();
    let placeholders = query.matches(placeholder).count();
    if placeholders != values.len() {
        return Err(QlError::PlaceholderMismatch {
            placeholders,
            values: values.len(),
        });
    }

    let mut rest = query;
    for value in values {
        // counted above, so every value has a placeholder
        let Some(idx) = rest.find(placeholder) else {
            break;
        };
        out.push_str(&rest[..idx]);
        rest = &rest[idx + placeholder.len()..];
        encode_value(out, value, dialect)?;
    }
    out.push_str(rest);
    Ok(())
}

/// Write the literal form of `value`.
pub(crate) fn encode_value(out: &mut String, value: &Value, dialect: &dyn Dialect) -> QlResult<()> {
    match value {
        Value::Builder(builder) => {
            let mut buf = Buffer::new();
            builder.build(dialect, &mut buf)?;
            let subquery = builder.is_subquery();
            if subquery {
                out.push('(');
            }
            interpolate_into(out, buf.sql(), buf.values(), dialect)?;
            if subquery {
                out.push(')');
            }
        }
        Value::Valuer(valuer) => {
            let resolved = valuer.value()?;
            encode_value(out, &resolved, dialect)?;
        }
        Value::Null => out.push_str("NULL"),
        Value::Bool(v) => dialect.write_bool(out, *v),
        Value::Int(v) => {
            let _ = write!(out, "{v}");
        }
        Value::UInt(v) => {
            let _ = write!(out, "{v}");
        }
        Value::Float(v) => {
            if !v.is_finite() {
                return Err(QlError::not_supported(format!("non-finite float {v}")));
            }
            let _ = write!(out, "{v}");
        }
        Value::Text(v) => dialect.write_string(out, v),
        Value::Time(v) => dialect.write_time(out, v),
        Value::Bytes(v) => dialect.write_bytes(out, v),
        Value::List(items) => {
            if items.is_empty() {
                // matches nothing, not even NULL
                out.push_str("(NULL)");
                return Ok(());
            }
            out.push('(');
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                encode_value(out, item, dialect)?;
            }
            out.push(')');
        }
    }
    Ok(())
}
