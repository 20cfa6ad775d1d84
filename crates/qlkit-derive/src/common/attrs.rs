//! Parsing of `#[orm(...)]` attributes.
//!
//! Struct level: `#[orm(rename_all = "camelCase")]`.
//! Field level: `#[orm(column = "name")]`, `#[orm(skip)]`, `#[orm(default)]`, `#[orm(id)]`.

use heck::{ToLowerCamelCase, ToShoutySnakeCase, ToSnakeCase, ToUpperCamelCase};
use syn::punctuated::Punctuated;
use syn::{Data, DeriveInput, Field, Fields, Result, Token};

/// Field-level options.
#[derive(Default)]
pub struct FieldAttr {
    pub column: Option<String>,
    pub skip: bool,
    pub default: bool,
    pub id: bool,
}

impl syn::parse::Parse for FieldAttr {
    fn parse(input: syn::parse::ParseStream) -> Result<Self> {
        let mut attr = FieldAttr::default();

        loop {
            if input.is_empty() {
                break;
            }

            let ident: syn::Ident = input.parse()?;
            if ident == "skip" {
                attr.skip = true;
            } else if ident == "default" {
                attr.default = true;
            } else if ident == "id" {
                attr.id = true;
            } else if ident == "column" {
                let _: Token![=] = input.parse()?;
                let value: syn::LitStr = input.parse()?;
                attr.column = Some(value.value());
            } else {
                return Err(syn::Error::new(
                    ident.span(),
                    format!("unknown orm attribute `{ident}`"),
                ));
            }

            if input.peek(Token![,]) {
                let _: Token![,] = input.parse()?;
            } else {
                break;
            }
        }

        Ok(attr)
    }
}

impl FieldAttr {
    /// Merge every `#[orm(...)]` on `field`.
    pub fn from_field(field: &Field) -> Result<Self> {
        let mut merged = FieldAttr::default();
        for attr in &field.attrs {
            if !attr.path().is_ident("orm") {
                continue;
            }
            let parsed: FieldAttr = attr.parse_args()?;
            merged.skip |= parsed.skip;
            merged.default |= parsed.default;
            merged.id |= parsed.id;
            if parsed.column.is_some() {
                merged.column = parsed.column;
            }
        }
        Ok(merged)
    }
}

/// Struct-level `rename_all` rule applied to field names without an explicit column.
#[derive(Clone, Copy, Default)]
pub enum RenameRule {
    #[default]
    Snake,
    LowerCamel,
    UpperCamel,
    ScreamingSnake,
    Lower,
}

impl RenameRule {
    fn parse(lit: &syn::LitStr) -> Result<Self> {
        match lit.value().as_str() {
            "snake_case" => Ok(Self::Snake),
            "camelCase" => Ok(Self::LowerCamel),
            "PascalCase" => Ok(Self::UpperCamel),
            "SCREAMING_SNAKE_CASE" => Ok(Self::ScreamingSnake),
            "lowercase" => Ok(Self::Lower),
            other => Err(syn::Error::new_spanned(
                lit,
                format!("unsupported rename_all rule `{other}`"),
            )),
        }
    }

    pub fn apply(self, name: &str) -> String {
        match self {
            Self::Snake => name.to_snake_case(),
            Self::LowerCamel => name.to_lower_camel_case(),
            Self::UpperCamel => name.to_upper_camel_case(),
            Self::ScreamingSnake => name.to_shouty_snake_case(),
            Self::Lower => name.to_lowercase(),
        }
    }

    /// Read `#[orm(rename_all = "...")]` from the struct, defaulting to snake_case.
    pub fn from_input(input: &DeriveInput) -> Result<Self> {
        let mut rule = Self::default();
        for attr in &input.attrs {
            if !attr.path().is_ident("orm") {
                continue;
            }
            let nested: syn::MetaNameValue = attr.parse_args()?;
            if !nested.path.is_ident("rename_all") {
                return Err(syn::Error::new_spanned(
                    &nested.path,
                    "expected `rename_all = \"...\"`",
                ));
            }
            let syn::Expr::Lit(syn::ExprLit {
                lit: syn::Lit::Str(lit),
                ..
            }) = &nested.value
            else {
                return Err(syn::Error::new_spanned(
                    &nested.value,
                    "rename_all expects a string literal",
                ));
            };
            rule = Self::parse(lit)?;
        }
        Ok(rule)
    }
}

/// Column name for `field`: the explicit `column`, else the renamed field name.
pub fn column_name(field: &Field, attr: &FieldAttr, rule: RenameRule) -> Result<String> {
    if let Some(column) = &attr.column {
        return Ok(column.clone());
    }
    let ident = field
        .ident
        .as_ref()
        .ok_or_else(|| syn::Error::new_spanned(field, "expected a named field"))?;
    let name = ident.to_string();
    let name = name.strip_prefix("r#").unwrap_or(&name);
    Ok(rule.apply(name))
}

/// The named fields of a struct, or an error naming `derive`.
pub fn named_fields<'a>(
    input: &'a DeriveInput,
    derive: &str,
) -> Result<&'a Punctuated<Field, Token![,]>> {
    match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(fields) => Ok(&fields.named),
            _ => Err(syn::Error::new_spanned(
                input,
                format!("{derive} can only be derived for structs with named fields"),
            )),
        },
        _ => Err(syn::Error::new_spanned(
            input,
            format!("{derive} can only be derived for structs"),
        )),
    }
}
