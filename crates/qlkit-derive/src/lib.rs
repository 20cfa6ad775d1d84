//! Derive macros for qlkit
//!
//! Provides `#[derive(FromRow)]` and `#[derive(Record)]`.

use proc_macro::TokenStream;
use syn::{DeriveInput, parse_macro_input};

mod common;
mod from_row;
mod record;

/// Derive `FromRow` for a struct, mapping each field to the column of the same name.
///
/// # Example
///
/// ```ignore
/// use qlkit::FromRow;
///
/// #[derive(FromRow)]
/// struct User {
///     id: i64,
///     username: String,
///     #[orm(column = "email_address")]
///     email: Option<String>,
///     #[orm(default)]
///     nickname: String,
///     #[orm(skip)]
///     cache: Vec<u8>,
/// }
/// ```
///
/// # Attributes
///
/// - `#[orm(rename_all = "camelCase")]` - Rename rule for field names (struct level; default `snake_case`)
/// - `#[orm(column = "name")]` - Map field to a different column name
/// - `#[orm(default)]` - Use `Default::default()` when the result has no such column
/// - `#[orm(skip)]` - Never read the field from rows; it is set to `Default::default()`
#[proc_macro_derive(FromRow, attributes(orm))]
pub fn derive_from_row(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    from_row::expand(input)
        .unwrap_or_else(|e| e.to_compile_error())
        .into()
}

/// Derive `Record` for a struct so it can be bound as an INSERT row.
///
/// # Example
///
/// ```ignore
/// use qlkit::Record;
///
/// #[derive(Record)]
/// struct User {
///     id: i64,
///     username: String,
///     #[orm(column = "email_address")]
///     email: Option<String>,
/// }
///
/// let mut user = User { id: 0, username: "ann".into(), email: None };
/// qlkit::insert_into("users").record(&user).exec_record(&sess, &mut user).await?;
/// assert_ne!(user.id, 0);
/// ```
///
/// # Attributes
///
/// - `#[orm(id)]` - Field that receives the generated insert id; an integer field
///   named `id` is used when no field is marked. The id column is left out of the
///   default column list but can still be bound by naming it explicitly.
/// - `#[orm(column = "name")]`, `#[orm(skip)]`, `#[orm(rename_all = "...")]` - As for `FromRow`
#[proc_macro_derive(Record, attributes(orm))]
pub fn derive_record(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    record::expand(input)
        .unwrap_or_else(|e| e.to_compile_error())
        .into()
}
