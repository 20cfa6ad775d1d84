//! FromRow derive macro implementation

use crate::common::attrs::{FieldAttr, RenameRule, column_name, named_fields};
use proc_macro2::TokenStream;
use quote::quote;
use syn::{DeriveInput, Result};

pub fn expand(input: DeriveInput) -> Result<TokenStream> {
    let name = &input.ident;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();
    let rule = RenameRule::from_input(&input)?;
    let fields = named_fields(&input, "FromRow")?;

    let field_extracts = fields
        .iter()
        .map(|field| {
            let field_name = &field.ident;
            let attr = FieldAttr::from_field(field)?;

            if attr.skip {
                return Ok(quote! {
                    #field_name: ::core::default::Default::default()
                });
            }

            let column = column_name(field, &attr, rule)?;
            Ok(if attr.default {
                quote! { #field_name: row.try_get_or_default(#column)? }
            } else {
                quote! { #field_name: row.try_get(#column)? }
            })
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(quote! {
        impl #impl_generics qlkit::FromRow for #name #ty_generics #where_clause {
            fn from_row(row: &qlkit::Row) -> qlkit::QlResult<Self> {
                Ok(Self {
                    #(#field_extracts),*
                })
            }
        }
    })
}
