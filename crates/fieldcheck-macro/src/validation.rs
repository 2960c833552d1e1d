// File: fieldcheck-macro/src/validation.rs
// Purpose: Validate derive macro and attribute processing

use proc_macro2::TokenStream;
use quote::quote;
use syn::meta::ParseNestedMeta;
use syn::{
    Data, DeriveInput, Expr, ExprLit, ExprPath, ExprUnary, Fields, Lit, LitInt, LitStr, Meta, UnOp,
};

/// One `#[validate(...)]` attribute worth of constraints
#[derive(Debug, Default)]
struct RuleSpec {
    required: bool,
    min_size: Option<usize>,
    max_size: Option<usize>,
    min_value: Option<i64>,
    max_value: Option<i64>,
    input: Option<InputClass>,
}

#[derive(Debug, Clone, Copy)]
enum InputClass {
    Numeric,
    Alphanumeric,
    Alphabetic,
    Email,
    Url,
    Any,
}

impl InputClass {
    fn parse(lit: &LitStr) -> syn::Result<Self> {
        match lit.value().to_ascii_lowercase().as_str() {
            "numeric" => Ok(InputClass::Numeric),
            "alphanumeric" => Ok(InputClass::Alphanumeric),
            "alphabetic" => Ok(InputClass::Alphabetic),
            "email" => Ok(InputClass::Email),
            "url" => Ok(InputClass::Url),
            "any" => Ok(InputClass::Any),
            other => Err(syn::Error::new(
                lit.span(),
                format!(
                    "unknown input class `{}`, expected numeric, alphanumeric, alphabetic, email, url or any",
                    other
                ),
            )),
        }
    }

    fn tokens(self) -> TokenStream {
        match self {
            InputClass::Numeric => quote!(::fieldcheck::InputClass::Numeric),
            InputClass::Alphanumeric => quote!(::fieldcheck::InputClass::Alphanumeric),
            InputClass::Alphabetic => quote!(::fieldcheck::InputClass::Alphabetic),
            InputClass::Email => quote!(::fieldcheck::InputClass::Email),
            InputClass::Url => quote!(::fieldcheck::InputClass::Url),
            InputClass::Any => quote!(::fieldcheck::InputClass::Any),
        }
    }
}

impl RuleSpec {
    fn check_bounds(&self, attr: &syn::Attribute) -> syn::Result<()> {
        if let (Some(min), Some(max)) = (self.min_size, self.max_size) {
            if min > max {
                return Err(syn::Error::new_spanned(
                    attr,
                    format!("min_size {} is greater than max_size {}", min, max),
                ));
            }
        }
        if let (Some(min), Some(max)) = (self.min_value, self.max_value) {
            if min > max {
                return Err(syn::Error::new_spanned(
                    attr,
                    format!("min_value {} is greater than max_value {}", min, max),
                ));
            }
        }
        Ok(())
    }

    /// `::fieldcheck::Rule::new()` followed by one builder call per constraint
    fn tokens(&self) -> TokenStream {
        let mut rule = quote!(::fieldcheck::Rule::new());
        if self.required {
            rule = quote!(#rule.required());
        }
        if let Some(min) = self.min_size {
            rule = quote!(#rule.min_size(#min));
        }
        if let Some(max) = self.max_size {
            rule = quote!(#rule.max_size(#max));
        }
        if let Some(min) = self.min_value {
            let min = i64_tokens(min);
            rule = quote!(#rule.min_value(#min));
        }
        if let Some(max) = self.max_value {
            let max = i64_tokens(max);
            rule = quote!(#rule.max_value(#max));
        }
        if let Some(class) = self.input {
            let class = class.tokens();
            rule = quote!(#rule.input(#class));
        }
        rule
    }
}

/// Negative values are emitted as a negation of a positive literal
fn i64_tokens(n: i64) -> TokenStream {
    if n == i64::MIN {
        quote!(::core::primitive::i64::MIN)
    } else if n < 0 {
        let abs = -n;
        quote!(-#abs)
    } else {
        quote!(#n)
    }
}

/// Everything the `#[validate]` attributes say about one field
#[derive(Default)]
struct FieldSpec {
    rules: Vec<RuleSpec>,
    rename: Option<LitStr>,
    read_with: Option<ExprPath>,
    flatten: bool,
}

/// Parse validation attributes from a field
fn extract_field_spec(attrs: &[syn::Attribute]) -> syn::Result<FieldSpec> {
    let mut spec = FieldSpec::default();

    for attr in attrs {
        if !attr.path().is_ident("validate") {
            continue;
        }

        let list = match &attr.meta {
            // Bare #[validate] attaches a rule with no constraint
            Meta::Path(_) => {
                spec.rules.push(RuleSpec::default());
                continue;
            }
            Meta::List(list) => list,
            Meta::NameValue(nv) => {
                return Err(syn::Error::new_spanned(
                    nv,
                    "expected #[validate] or #[validate(...)]",
                ));
            }
        };

        let mut rule = RuleSpec::default();
        let mut has_rule_keys = list.tokens.is_empty();

        attr.parse_nested_meta(|meta| {
            let key = meta
                .path
                .get_ident()
                .map(|i| i.to_string())
                .unwrap_or_default();

            match key.as_str() {
                "required" => {
                    rule.required = true;
                    has_rule_keys = true;
                }
                "min_size" => {
                    rule.min_size = Some(parse_usize(&meta)?);
                    has_rule_keys = true;
                }
                "max_size" => {
                    rule.max_size = Some(parse_usize(&meta)?);
                    has_rule_keys = true;
                }
                "size" => {
                    meta.parse_nested_meta(|bound| {
                        if bound.path.is_ident("min") {
                            rule.min_size = Some(parse_usize(&bound)?);
                        } else if bound.path.is_ident("max") {
                            rule.max_size = Some(parse_usize(&bound)?);
                        } else {
                            return Err(bound.error("expected `min` or `max`"));
                        }
                        Ok(())
                    })?;
                    has_rule_keys = true;
                }
                "min_value" => {
                    rule.min_value = Some(parse_i64(&meta)?);
                    has_rule_keys = true;
                }
                "max_value" => {
                    rule.max_value = Some(parse_i64(&meta)?);
                    has_rule_keys = true;
                }
                "value" => {
                    meta.parse_nested_meta(|bound| {
                        if bound.path.is_ident("min") {
                            rule.min_value = Some(parse_i64(&bound)?);
                        } else if bound.path.is_ident("max") {
                            rule.max_value = Some(parse_i64(&bound)?);
                        } else {
                            return Err(bound.error("expected `min` or `max`"));
                        }
                        Ok(())
                    })?;
                    has_rule_keys = true;
                }
                "input" => {
                    let lit: LitStr = meta.value()?.parse()?;
                    rule.input = Some(InputClass::parse(&lit)?);
                    has_rule_keys = true;
                }
                "rename" => {
                    spec.rename = Some(meta.value()?.parse()?);
                }
                "read_with" => {
                    let lit: LitStr = meta.value()?.parse()?;
                    spec.read_with = Some(lit.parse()?);
                }
                "flatten" => {
                    spec.flatten = true;
                }
                _ => return Err(meta.error("unknown validate key")),
            }
            Ok(())
        })?;

        if has_rule_keys {
            rule.check_bounds(attr)?;
            spec.rules.push(rule);
        }
    }

    Ok(spec)
}

fn parse_usize(meta: &ParseNestedMeta) -> syn::Result<usize> {
    let lit: LitInt = meta.value()?.parse()?;
    lit.base10_parse::<usize>()
}

/// Integer literal, optionally negated
fn parse_i64(meta: &ParseNestedMeta) -> syn::Result<i64> {
    let expr: Expr = meta.value()?.parse()?;
    match &expr {
        Expr::Lit(ExprLit { lit: Lit::Int(i), .. }) => i.base10_parse::<i64>(),
        Expr::Unary(ExprUnary { op: UnOp::Neg(_), expr: inner, .. }) => match inner.as_ref() {
            Expr::Lit(ExprLit { lit: Lit::Int(i), .. }) => {
                // Parse with the sign attached so i64::MIN stays representable
                format!("-{}", i.base10_digits())
                    .parse::<i64>()
                    .map_err(|e| syn::Error::new_spanned(&expr, e))
            }
            _ => Err(syn::Error::new_spanned(&expr, "expected an integer literal")),
        },
        _ => Err(syn::Error::new_spanned(&expr, "expected an integer literal")),
    }
}

/// Generate the `Validatable` implementation for a struct
pub fn impl_validate(input: &DeriveInput) -> syn::Result<TokenStream> {
    let name = &input.ident;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    let fields = match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(fields) => &fields.named,
            Fields::Unit => return Ok(empty_impl(input)),
            Fields::Unnamed(fields) => {
                return Err(syn::Error::new_spanned(
                    fields,
                    "Validate only supports structs with named fields",
                ))
            }
        },
        _ => {
            return Err(syn::Error::new_spanned(
                &input.ident,
                "Validate only supports structs",
            ))
        }
    };

    let mut visits = Vec::new();

    for field in fields {
        let Some(field_name) = field.ident.as_ref() else {
            continue;
        };
        let spec = extract_field_spec(&field.attrs)?;

        if spec.flatten {
            if !spec.rules.is_empty() || spec.rename.is_some() || spec.read_with.is_some() {
                return Err(syn::Error::new_spanned(
                    field_name,
                    "`flatten` cannot be combined with rules, `rename` or `read_with`",
                ));
            }
            visits.push(quote! {
                ::fieldcheck::Validatable::visit_fields(&self.#field_name, &mut *__visitor)?;
            });
            continue;
        }

        if spec.rules.is_empty() {
            continue;
        }

        let ident = spec
            .rename
            .map(|lit| lit.value())
            .unwrap_or_else(|| field_name.to_string());
        let rules = spec.rules.iter().map(RuleSpec::tokens);
        let read = match &spec.read_with {
            Some(path) => quote! {
                ::fieldcheck::__private::read_computed(#path(self))
            },
            None => quote! {
                ::fieldcheck::__private::read_field(&self.#field_name)
            },
        };

        visits.push(quote! {
            ::fieldcheck::FieldVisitor::visit(
                &mut *__visitor,
                #ident,
                &[#(#rules),*],
                #read,
            )?;
        });
    }

    Ok(quote! {
        impl #impl_generics ::fieldcheck::Validatable for #name #ty_generics #where_clause {
            fn visit_fields(
                &self,
                __visitor: &mut dyn ::fieldcheck::FieldVisitor,
            ) -> ::core::result::Result<(), ::fieldcheck::SchemaError> {
                #(#visits)*
                ::core::result::Result::Ok(())
            }
        }
    })
}

fn empty_impl(input: &DeriveInput) -> TokenStream {
    let name = &input.ident;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();
    quote! {
        impl #impl_generics ::fieldcheck::Validatable for #name #ty_generics #where_clause {
            fn visit_fields(
                &self,
                _visitor: &mut dyn ::fieldcheck::FieldVisitor,
            ) -> ::core::result::Result<(), ::fieldcheck::SchemaError> {
                ::core::result::Result::Ok(())
            }
        }
    }
}
