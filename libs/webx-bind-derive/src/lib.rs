use proc_macro::TokenStream;
use quote::quote;
use syn::{Data, DeriveInput, Fields, GenericArgument, LitStr, PathArguments, Type, parse_macro_input};

/// Derive macro for bindable destination structs.
///
/// Generates the `Bindable` impl for the annotated struct:
///
/// - `fields()` — the static per-field declaration table, in declaration
///   order.
/// - `assign(&FieldDescriptor, &[String])` — typed conversion and
///   assignment for one field.
///
/// Fields without a `#[bind]` attribute are never touched by the binder.
///
/// # Example
///
/// ```ignore
/// #[derive(Bindable, Default)]
/// pub struct Search {
///     #[bind(key = "q")]
///     pub query: String,
///
///     #[bind(key = "page")]
///     pub page: u32,
///
///     #[bind(key = "from", layout = "%Y-%m-%d", loc = "UTC")]
///     pub from: DateTime<Utc>,
/// }
/// ```
///
/// Supported field types: `String`, `i8`–`i64`, `isize`, `u8`–`u64`,
/// `usize`, `bool`, `std::time::Duration`, `chrono::DateTime<Utc>`, and
/// `Vec<T>` of any of those scalars. `layout` and `loc` are only valid on
/// `DateTime` fields.
#[proc_macro_derive(Bindable, attributes(bind))]
pub fn derive_bindable(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    match derive_impl(&input) {
        Ok(tokens) => tokens,
        Err(e) => e.to_compile_error().into(),
    }
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Scalar {
    Text,
    Int,
    Uint,
    Bool,
    Duration,
    DateTime,
}

fn derive_impl(input: &DeriveInput) -> Result<TokenStream, syn::Error> {
    let name = &input.ident;

    let fields = match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(fields) => &fields.named,
            _ => {
                return Err(syn::Error::new_spanned(
                    name,
                    "Bindable only supports structs with named fields",
                ));
            }
        },
        _ => {
            return Err(syn::Error::new_spanned(
                name,
                "Bindable only supports structs",
            ));
        }
    };

    let mut spec_tokens = Vec::new();
    let mut assign_arms = Vec::new();

    for field in fields {
        let field_ident = field
            .ident
            .as_ref()
            .ok_or_else(|| syn::Error::new_spanned(field, "expected named field"))?;

        // Parse #[bind(...)] attribute; unannotated fields are skipped.
        let mut key: Option<String> = None;
        let mut layout: Option<String> = None;
        let mut loc: Option<String> = None;
        let mut bound = false;

        for attr in &field.attrs {
            if !attr.path().is_ident("bind") {
                continue;
            }
            bound = true;
            attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("key") {
                    let value: LitStr = meta.value()?.parse()?;
                    key = Some(value.value());
                } else if meta.path.is_ident("layout") {
                    let value: LitStr = meta.value()?.parse()?;
                    layout = Some(value.value());
                } else if meta.path.is_ident("loc") {
                    let value: LitStr = meta.value()?.parse()?;
                    loc = Some(value.value());
                } else {
                    return Err(meta.error("unknown bind option (expected key, layout or loc)"));
                }
                Ok(())
            })?;
        }

        if !bound {
            continue;
        }

        let key = key.ok_or_else(|| {
            syn::Error::new_spanned(field_ident, "missing #[bind(key = \"...\")]")
        })?;

        let (seq, scalar) = field_kind(&field.ty).ok_or_else(|| {
            syn::Error::new_spanned(
                &field.ty,
                "unsupported type for Bindable (expected String, integer, bool, \
                 Duration, DateTime<Utc>, or Vec of those)",
            )
        })?;

        if scalar != Scalar::DateTime && (layout.is_some() || loc.is_some()) {
            return Err(syn::Error::new_spanned(
                field_ident,
                "layout/loc are only valid on DateTime fields",
            ));
        }

        let scalar_expr = match scalar {
            Scalar::Text => quote! { webx_bind::descriptor::ScalarKind::Text },
            Scalar::Int => quote! { webx_bind::descriptor::ScalarKind::Int },
            Scalar::Uint => quote! { webx_bind::descriptor::ScalarKind::Uint },
            Scalar::Bool => quote! { webx_bind::descriptor::ScalarKind::Bool },
            Scalar::Duration => quote! { webx_bind::descriptor::ScalarKind::Duration },
            Scalar::DateTime => quote! { webx_bind::descriptor::ScalarKind::DateTime },
        };
        let kind_expr = if seq {
            quote! { webx_bind::descriptor::FieldKind::Seq(#scalar_expr) }
        } else {
            quote! { webx_bind::descriptor::FieldKind::Scalar(#scalar_expr) }
        };
        let layout_expr = match &layout {
            Some(value) => quote! { Some(#value) },
            None => quote! { None },
        };
        let loc_expr = match &loc {
            Some(value) => quote! { Some(#value) },
            None => quote! { None },
        };

        spec_tokens.push(quote! {
            webx_bind::descriptor::FieldSpec {
                key: #key,
                kind: #kind_expr,
                layout: #layout_expr,
                loc: #loc_expr,
            }
        });

        let arm = if seq {
            let element_expr = match scalar {
                Scalar::Text => quote! { Ok(webx_bind::convert::text(raw)) },
                Scalar::Int => quote! { webx_bind::convert::int(__descriptor, raw) },
                Scalar::Uint => quote! { webx_bind::convert::uint(__descriptor, raw) },
                Scalar::Bool => quote! { webx_bind::convert::boolean(__descriptor, raw) },
                Scalar::Duration => quote! { webx_bind::convert::duration(__descriptor, raw) },
                Scalar::DateTime => quote! { webx_bind::convert::datetime(__descriptor, raw) },
            };
            quote! {
                #key => {
                    self.#field_ident = webx_bind::convert::seq(__raws, |raw| #element_expr)?;
                    Ok(())
                }
            }
        } else {
            let convert_expr = match scalar {
                Scalar::Text => quote! { webx_bind::convert::text(raw) },
                Scalar::Int => quote! { webx_bind::convert::int(__descriptor, raw)? },
                Scalar::Uint => quote! { webx_bind::convert::uint(__descriptor, raw)? },
                Scalar::Bool => quote! { webx_bind::convert::boolean(__descriptor, raw)? },
                Scalar::Duration => quote! { webx_bind::convert::duration(__descriptor, raw)? },
                Scalar::DateTime => quote! { webx_bind::convert::datetime(__descriptor, raw)? },
            };
            quote! {
                #key => {
                    let Some(raw) = __raws.first() else {
                        return Ok(());
                    };
                    self.#field_ident = #convert_expr;
                    Ok(())
                }
            }
        };
        assign_arms.push(arm);
    }

    // Without bound fields the dispatcher has no arms and no use for the
    // raw values.
    let raws_param = if assign_arms.is_empty() {
        quote! { _raws }
    } else {
        quote! { __raws }
    };

    let expanded = quote! {
        impl webx_bind::descriptor::Bindable for #name {
            fn fields() -> &'static [webx_bind::descriptor::FieldSpec] {
                const FIELDS: &[webx_bind::descriptor::FieldSpec] = &[
                    #(#spec_tokens),*
                ];
                FIELDS
            }

            fn assign(
                &mut self,
                __descriptor: &webx_bind::descriptor::FieldDescriptor,
                #raws_param: &[String],
            ) -> Result<(), webx_bind::error::BindError> {
                match __descriptor.key {
                    #(#assign_arms)*
                    _ => Err(webx_bind::error::BindError::unsupported(__descriptor.key)),
                }
            }
        }
    };

    Ok(TokenStream::from(expanded))
}

/// Classify a field type: `(is_sequence, scalar kind)`.
fn field_kind(ty: &Type) -> Option<(bool, Scalar)> {
    let segment = match ty {
        Type::Path(type_path) => type_path.path.segments.last()?,
        _ => return None,
    };
    let name = segment.ident.to_string();

    if name == "Vec" {
        let inner = match &segment.arguments {
            PathArguments::AngleBracketed(args) => {
                args.args.iter().find_map(|arg| match arg {
                    GenericArgument::Type(inner) => Some(inner),
                    _ => None,
                })?
            }
            _ => return None,
        };
        let (seq, scalar) = field_kind(inner)?;
        // No nested sequences.
        if seq {
            return None;
        }
        return Some((true, scalar));
    }

    let scalar = match name.as_str() {
        "String" => Scalar::Text,
        "i8" | "i16" | "i32" | "i64" | "isize" => Scalar::Int,
        "u8" | "u16" | "u32" | "u64" | "usize" => Scalar::Uint,
        "bool" => Scalar::Bool,
        "Duration" => Scalar::Duration,
        "DateTime" => Scalar::DateTime,
        _ => return None,
    };
    Some((false, scalar))
}
