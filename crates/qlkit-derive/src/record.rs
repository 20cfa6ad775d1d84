//! Record derive macro implementation

use crate::common::attrs::{FieldAttr, RenameRule, column_name, named_fields};
use crate::common::syn_types::is_integer;
use proc_macro2::TokenStream;
use quote::quote;
use syn::{DeriveInput, Field, Result};

struct RecordField<'a> {
    field: &'a Field,
    attr: FieldAttr,
    column: String,
}

pub fn expand(input: DeriveInput) -> Result<TokenStream> {
    let name = &input.ident;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();
    let rule = RenameRule::from_input(&input)?;

    let mut fields = Vec::new();
    for field in named_fields(&input, "Record")? {
        let attr = FieldAttr::from_field(field)?;
        if attr.skip {
            continue;
        }
        let column = column_name(field, &attr, rule)?;
        fields.push(RecordField {
            field,
            attr,
            column,
        });
    }

    let marked: Vec<_> = fields.iter().filter(|f| f.attr.id).collect();
    if let Some(extra) = marked.get(1) {
        return Err(syn::Error::new_spanned(
            extra.field,
            "only one field can be marked #[orm(id)]",
        ));
    }
    // An explicit marker wins over a field that is merely named `id`.
    let id_field = marked.first().copied().or_else(|| {
        fields.iter().find(|f| {
            f.field.ident.as_ref().is_some_and(|i| i == "id") && is_integer(&f.field.ty)
        })
    });
    let id_column = id_field.map(|f| f.column.as_str());

    // The id is generated by the database, so it is not part of the default column list.
    let columns = fields
        .iter()
        .map(|f| f.column.as_str())
        .filter(|c| Some(*c) != id_column);

    let arms = fields.iter().map(|f| {
        let field_name = &f.field.ident;
        let column = &f.column;
        quote! {
            #column => ::core::option::Option::Some(
                qlkit::Value::from(::core::clone::Clone::clone(&self.#field_name))
            )
        }
    });

    let set_id = id_field.map(|f| {
        let field_name = &f.field.ident;
        quote! {
            fn set_last_insert_id(&mut self, id: i64) {
                qlkit::AssignId::assign_id(&mut self.#field_name, id);
            }
        }
    });

    Ok(quote! {
        impl #impl_generics qlkit::Record for #name #ty_generics #where_clause {
            fn columns(&self) -> &'static [&'static str] {
                &[#(#columns),*]
            }

            fn column_value(&self, column: &str) -> ::core::option::Option<qlkit::Value> {
                match column {
                    #(#arms,)*
                    _ => ::core::option::Option::None,
                }
            }

            #set_id
        }
    })
}
