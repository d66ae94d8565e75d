use proc_macro2::TokenStream;
use quote::{quote, quote_spanned};
use syn::ext::IdentExt;
use syn::spanned::Spanned;
use syn::{Data, DeriveInput, Field, Fields, LitStr, Path};

/// Per-field `#[env(...)]` options.
#[derive(Default)]
struct FieldOptions {
    skip: bool,
    rename: Option<LitStr>,
}

pub fn expand(input: DeriveInput) -> TokenStream {
    let krate = match crate_path(&input) {
        Ok(path) => path,
        Err(err) => return err.to_compile_error(),
    };

    let fields = match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(named) => &named.named,
            _ => return not_a_record(&input),
        },
        _ => return not_a_record(&input),
    };

    let mut entries = Vec::with_capacity(fields.len());
    for field in fields {
        match field_entry(field, &krate) {
            Ok(Some(entry)) => entries.push(entry),
            Ok(None) => {},
            Err(err) => return err.to_compile_error(),
        }
    }

    let name = &input.ident;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    quote! {
        #[automatically_derived]
        impl #impl_generics #krate::EnvConfig for #name #ty_generics #where_clause {
            fn schema() -> ::std::vec::Vec<#krate::EnvField<Self>> {
                ::std::vec![#(#entries),*]
            }
        }
    }
}

fn not_a_record(input: &DeriveInput) -> TokenStream {
    syn::Error::new_spanned(&input.ident, "config must be a struct with named fields")
        .to_compile_error()
}

/// `#[env(crate = "...")]` on the struct, for users reaching the binder through a re-export.
fn crate_path(input: &DeriveInput) -> Result<TokenStream, syn::Error> {
    let mut path: Option<Path> = None;

    for attr in input.attrs.iter().filter(|attr| attr.path().is_ident("env")) {
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("crate") {
                let lit: LitStr = meta.value()?.parse()?;
                path = Some(lit.parse()?);
                Ok(())
            } else {
                Err(meta.error("unsupported env attribute, expected `crate = \"...\"`"))
            }
        })?;
    }

    Ok(path.map_or_else(|| quote! { ::cmdkit_env }, |path| quote! { #path }))
}

fn field_entry(field: &Field, krate: &TokenStream) -> Result<Option<TokenStream>, syn::Error> {
    let options = parse_options(field)?;
    if options.skip {
        return Ok(None);
    }

    let Some(ident) = field.ident.as_ref() else {
        return Err(syn::Error::new_spanned(field, "config must be a struct with named fields"));
    };
    let field_name = ident.unraw().to_string();
    let ty = &field.ty;

    let value = quote_spanned! {ty.span()=> <#ty as #krate::EnvValue> };
    let renamed = options.rename.map(|key| quote! { .with_key(#key) });

    Ok(Some(quote! {
        #krate::EnvField::new(
            #field_name,
            #value::KIND,
            |target: &mut Self, raw: &str| -> ::std::result::Result<(), ::core::num::ParseIntError> {
                target.#ident = #value::parse_env(raw)?;
                ::std::result::Result::Ok(())
            },
        )
        #renamed
    }))
}

fn parse_options(field: &Field) -> Result<FieldOptions, syn::Error> {
    let mut options = FieldOptions::default();

    for attr in field.attrs.iter().filter(|attr| attr.path().is_ident("env")) {
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("skip") {
                options.skip = true;
                Ok(())
            } else if meta.path.is_ident("rename") {
                let key: LitStr = meta.value()?.parse()?;
                if key.value().trim().is_empty() {
                    return Err(meta.error("env rename cannot be empty"));
                }
                options.rename = Some(key);
                Ok(())
            } else {
                Err(meta.error("unsupported env attribute, expected `skip` or `rename = \"...\"`"))
            }
        })?;
    }

    Ok(options)
}
