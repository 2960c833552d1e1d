// fieldcheck procedural macros
// Provides #[derive(Validate)] for attaching field rules to structs

use proc_macro::TokenStream;
use syn::{parse_macro_input, DeriveInput};

mod validation;

/// Derive `fieldcheck::Validatable` from `#[validate(...)]` field attributes
///
/// # Example
///
/// ```ignore
/// use fieldcheck::Validate;
///
/// #[derive(Validate)]
/// struct Users {
///     #[validate(rename = "UserID", required, size(min = 5, max = 100), input = "email")]
///     user_id: Option<String>,
///
///     #[validate(rename = "UserName", required, min_size = 1, max_size = 8)]
///     user_name: Option<String>,
///
///     #[validate(min_value = 18, max_value = 120)]
///     age: u32,
///
///     #[validate(flatten)]
///     audit: AuditFields,
/// }
/// ```
///
/// # Rule keys
///
/// - `required` - value must be present and, for strings, non-empty
/// - `min_size = n`, `max_size = n`, `size(min = n, max = n)` - string length, inclusive
/// - `min_value = n`, `max_value = n`, `value(min = n, max = n)` - numeric value, inclusive
/// - `input = "class"` - numeric, alphanumeric, alphabetic, email, url or any
///
/// Each `#[validate]` attribute holding rule keys is one rule. An empty
/// `#[validate]` attaches a rule with no constraint.
///
/// # Field options
///
/// - `rename = "Name"` - identifier used in the report (default: field name)
/// - `read_with = "path"` - read through `fn(&Self) -> Result<V, E>`; an `Err`
///   is reported as `FieldUnreadable`
/// - `flatten` - enumerate the fields of this `Validatable` field in place
#[proc_macro_derive(Validate, attributes(validate))]
pub fn derive_validate(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    validation::impl_validate(&input)
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}
