//! Struct-to-row binding for INSERT.

use crate::value::Value;

/// A struct that can be inserted column by column.
///
/// Derive it with `#[derive(Record)]`:
///
/// ```ignore
/// #[derive(qlkit::Record)]
/// struct User {
///     id: i64,              // receives the generated id after `exec_record`
///     name: String,
///     #[orm(column = "email_address")]
///     email: Option<String>,
///     #[orm(skip)]
///     cache: Vec<u8>,
/// }
/// ```
pub trait Record {
    /// Columns the record provides, in declaration order.
    fn columns(&self) -> &'static [&'static str];

    /// Value bound for `column`, or `None` if the record has no such column.
    fn column_value(&self, column: &str) -> Option<Value>;

    /// Receive the id generated by the insert.
    fn set_last_insert_id(&mut self, _id: i64) {}
}

/// Field types that can hold a generated id.
pub trait AssignId {
    fn assign_id(&mut self, id: i64);
}

macro_rules! impl_assign_id {
    ($($t:ty),*) => {
        $(
            impl AssignId for $t {
                fn assign_id(&mut self, id: i64) {
                    // ids that do not fit the field type are left as they were
                    if let Ok(v) = <$t>::try_from(id) {
                        *self = v;
                    }
                }
            }
        )*
    };
}

impl_assign_id!(i32, u32, u64, isize, usize);

impl AssignId for i64 {
    fn assign_id(&mut self, id: i64) {
        *self = id;
    }
}

impl<T: AssignId + Default> AssignId for Option<T> {
    fn assign_id(&mut self, id: i64) {
        self.get_or_insert_with(T::default).assign_id(id);
    }
}
