//! Procedural macros for `bevy_ldtkmap`.
//!
//! This crate provides the `LdtkEntity` and `LdtkEnum` derive macros, which
//! generate the static slot tables the binder works from.

use proc_macro::TokenStream;
use proc_macro_crate::{FoundCrate, crate_name};
use quote::quote;
use syn::{
    Attribute, Data, DataEnum, DeriveInput, Fields, LitStr, parse_macro_input,
    punctuated::Punctuated, token::Comma,
};

/// Crate paths for code generation
struct CratePaths {
    binding: proc_macro2::TokenStream,
    registry: proc_macro2::TokenStream,
    inventory: proc_macro2::TokenStream,
}

/// Get the path tokens for the umbrella crate, or the core crate when the
/// umbrella is not a dependency.
fn get_crate_paths() -> CratePaths {
    let base = match crate_name("bevy_ldtkmap") {
        // Generated code runs in user code, so `Itself` still goes through
        // the crate name.
        Ok(FoundCrate::Itself | FoundCrate::Name(_)) => quote!(::bevy_ldtkmap::core),
        // Fall back to the core crate directly
        Err(_) => quote!(::bevy_ldtkmap_core),
    };

    CratePaths {
        binding: quote!(#base::binding),
        registry: quote!(#base::registry),
        inventory: quote!(#base::inventory),
    }
}

/// Derive macro for binding LDtk entity instances onto a struct.
///
/// This macro generates:
/// - An `LdtkEntity` implementation with one slot per named field
/// - Setters for the default slots (`position`, `pivot`, `texture`, `frame_size`)
/// - An inventory submission so the plugin can audit projects against the shape
///
/// # Example
///
/// ```ignore
/// use bevy::prelude::*;
/// use bevy_ldtkmap_core::prelude::*;
///
/// #[derive(Default, LdtkEntity)]
/// #[ldtk(name = "Door")]
/// struct DoorRecord {
///     position: Vec2,
///     pivot: Vec2,
///     locked: bool,
///     #[ldtk(rename = "keyId")]
///     key: Option<u32>,
///     #[ldtk(skip)]
///     opened: bool,
/// }
/// ```
///
/// # Attributes
///
/// - `#[ldtk(name = "...")]` - Entity identifier to bind (defaults to the type name)
/// - `#[ldtk(rename = "...")]` - Slot name for a field (field-level)
/// - `#[ldtk(skip)]` - Never bind this field (field-level)
/// - `#[ldtk(position)]`, `#[ldtk(pivot)]`, `#[ldtk(texture)]`, `#[ldtk(frame_size)]` -
///   Use this field as a default slot. Fields named like a default slot are
///   picked up without the attribute.
#[proc_macro_derive(LdtkEntity, attributes(ldtk))]
pub fn derive_ldtk_entity(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);

    match derive_ldtk_entity_impl(input) {
        Ok(tokens) => tokens,
        Err(err) => err.to_compile_error().into(),
    }
}

/// Derive macro for unit enums stored in `Enum` fields.
///
/// Cases are matched by variant name, or by `#[ldtk(rename = "...")]`.
///
/// # Example
///
/// ```ignore
/// #[derive(Debug, Default, LdtkEnum)]
/// enum Facing {
///     #[default]
///     Left,
///     Right,
/// }
/// ```
#[proc_macro_derive(LdtkEnum, attributes(ldtk))]
pub fn derive_ldtk_enum(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);

    match derive_ldtk_enum_impl(input) {
        Ok(tokens) => tokens,
        Err(err) => err.to_compile_error().into(),
    }
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum DefaultSlot {
    Position,
    Pivot,
    Texture,
    FrameSize,
}

impl DefaultSlot {
    const ALL: [DefaultSlot; 4] = [
        DefaultSlot::Position,
        DefaultSlot::Pivot,
        DefaultSlot::Texture,
        DefaultSlot::FrameSize,
    ];

    fn name(self) -> &'static str {
        match self {
            DefaultSlot::Position => "position",
            DefaultSlot::Pivot => "pivot",
            DefaultSlot::Texture => "texture",
            DefaultSlot::FrameSize => "frame_size",
        }
    }

    fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|slot| slot.name() == name)
    }
}

#[derive(Default)]
struct FieldAttrs {
    skip: bool,
    rename: Option<String>,
    default_slot: Option<DefaultSlot>,
}

/// Parse `#[ldtk(...)]` on a struct field
fn parse_field_attrs(attrs: &[Attribute]) -> syn::Result<FieldAttrs> {
    let mut parsed = FieldAttrs::default();
    for attr in attrs {
        if !attr.path().is_ident("ldtk") {
            continue;
        }

        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("skip") {
                parsed.skip = true;
                return Ok(());
            }
            if meta.path.is_ident("rename") {
                let lit: LitStr = meta.value()?.parse()?;
                parsed.rename = Some(lit.value());
                return Ok(());
            }
            let slot = meta
                .path
                .get_ident()
                .and_then(|ident| DefaultSlot::from_name(&ident.to_string()));
            match slot {
                Some(slot) => {
                    parsed.default_slot = Some(slot);
                    Ok(())
                }
                None => Err(meta.error("unknown ldtk field attribute")),
            }
        })?;
    }
    Ok(parsed)
}

/// Parse `#[ldtk(name = "...")]` on the type
fn parse_name_attr(attrs: &[Attribute]) -> syn::Result<Option<String>> {
    let mut name = None;
    for attr in attrs {
        if !attr.path().is_ident("ldtk") {
            continue;
        }

        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("name") {
                let lit: LitStr = meta.value()?.parse()?;
                name = Some(lit.value());
                Ok(())
            } else {
                Err(meta.error("expected `name = \"...\"`"))
            }
        })?;
    }
    Ok(name)
}

/// Parse `#[ldtk(rename = "...")]` on an enum variant
fn parse_case_attr(attrs: &[Attribute]) -> syn::Result<Option<String>> {
    let mut case = None;
    for attr in attrs {
        if !attr.path().is_ident("ldtk") {
            continue;
        }

        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("rename") {
                let lit: LitStr = meta.value()?.parse()?;
                case = Some(lit.value());
                Ok(())
            } else {
                Err(meta.error("expected `rename = \"...\"`"))
            }
        })?;
    }
    Ok(case)
}

fn reject_generics(input: &DeriveInput, derive: &str) -> syn::Result<()> {
    if input.generics.params.is_empty() {
        Ok(())
    } else {
        Err(syn::Error::new_spanned(
            &input.generics,
            format!("{derive} cannot be derived for generic types"),
        ))
    }
}

fn derive_ldtk_entity_impl(input: DeriveInput) -> syn::Result<TokenStream> {
    let type_name = &input.ident;
    reject_generics(&input, "LdtkEntity")?;

    let paths = get_crate_paths();
    let identifier = parse_name_attr(&input.attrs)?.unwrap_or_else(|| type_name.to_string());

    let Data::Struct(data) = &input.data else {
        return Err(syn::Error::new_spanned(
            type_name,
            "LdtkEntity can only be derived for structs",
        ));
    };

    match &data.fields {
        Fields::Named(fields) => handle_struct(type_name, &identifier, &fields.named, &paths),
        Fields::Unit => handle_struct(type_name, &identifier, &Punctuated::new(), &paths),
        Fields::Unnamed(_) => Err(syn::Error::new_spanned(
            type_name,
            "LdtkEntity does not support tuple structs",
        )),
    }
}

fn handle_struct(
    struct_name: &syn::Ident,
    identifier: &str,
    fields: &Punctuated<syn::Field, Comma>,
    paths: &CratePaths,
) -> syn::Result<TokenStream> {
    let binding = &paths.binding;
    let registry = &paths.registry;
    let inventory = &paths.inventory;

    let mut field_slots = Vec::new();
    let mut slot_infos = Vec::new();
    let mut default_slots: Vec<(DefaultSlot, &syn::Ident)> = Vec::new();

    for field in fields {
        let Some(field_ident) = field.ident.as_ref() else {
            continue;
        };
        let attrs = parse_field_attrs(&field.attrs)?;
        if attrs.skip {
            continue;
        }

        let rust_name = field_ident.to_string();
        let rust_name = rust_name.trim_start_matches("r#");

        // Fields named like a default slot are default slots unless renamed
        let default_slot = attrs.default_slot.or_else(|| {
            attrs
                .rename
                .is_none()
                .then_some(rust_name)
                .and_then(DefaultSlot::from_name)
        });

        if let Some(slot) = default_slot {
            if default_slots.iter().any(|(taken, _)| *taken == slot) {
                return Err(syn::Error::new_spanned(
                    field_ident,
                    format!("default slot `{}` is declared twice", slot.name()),
                ));
            }
            default_slots.push((slot, field_ident));
            continue;
        }

        let slot_name = attrs.rename.unwrap_or_else(|| rust_name.to_string());
        let field_type = &field.ty;

        field_slots.push(quote! {
            #binding::FieldSlot {
                name: #slot_name,
                kind: <#field_type as #binding::FromFieldValue>::KIND,
                set: |record, value| {
                    record.#field_ident =
                        <#field_type as #binding::FromFieldValue>::from_field_value(value)?;
                    ::core::result::Result::Ok(())
                },
            }
        });

        slot_infos.push(quote! {
            #registry::LdtkSlotInfo {
                name: #slot_name,
                kind: <#field_type as #binding::FromFieldValue>::KIND,
            }
        });
    }

    let default_setter = |slot: DefaultSlot| {
        match default_slots.iter().find(|(taken, _)| *taken == slot) {
            Some((_, field_ident)) => quote! {
                ::core::option::Option::Some(|record, value| {
                    record.#field_ident = ::core::convert::Into::into(value);
                })
            },
            None => quote!(::core::option::Option::None),
        }
    };
    let position = default_setter(DefaultSlot::Position);
    let pivot = default_setter(DefaultSlot::Pivot);
    let texture = default_setter(DefaultSlot::Texture);
    let frame_size = default_setter(DefaultSlot::FrameSize);

    let default_slot_names: Vec<&str> = DefaultSlot::ALL
        .into_iter()
        .filter(|slot| default_slots.iter().any(|(taken, _)| taken == slot))
        .map(DefaultSlot::name)
        .collect();

    let type_name_str = struct_name.to_string();

    let expanded = quote! {
        impl #binding::LdtkEntity for #struct_name {
            const IDENTIFIER: &'static str = #identifier;

            const FIELD_SLOTS: &'static [#binding::FieldSlot<Self>] = &[
                #(#field_slots),*
            ];

            const DEFAULT_SLOTS: #binding::DefaultSlots<Self> = #binding::DefaultSlots {
                position: #position,
                pivot: #pivot,
                texture: #texture,
                frame_size: #frame_size,
            };
        }

        // Submit to inventory for compile-time registration
        #inventory::submit! {
            #registry::LdtkEntityInfo {
                identifier: #identifier,
                type_name: #type_name_str,
                fields: &[#(#slot_infos),*],
                default_slots: &[#(#default_slot_names),*],
            }
        }
    };

    Ok(TokenStream::from(expanded))
}

fn derive_ldtk_enum_impl(input: DeriveInput) -> syn::Result<TokenStream> {
    let enum_name = &input.ident;
    reject_generics(&input, "LdtkEnum")?;

    let paths = get_crate_paths();
    let display_name = parse_name_attr(&input.attrs)?.unwrap_or_else(|| enum_name.to_string());

    let Data::Enum(DataEnum { variants, .. }) = &input.data else {
        return Err(syn::Error::new_spanned(
            enum_name,
            "LdtkEnum can only be derived for enums",
        ));
    };

    let binding = &paths.binding;

    let mut case_names = Vec::new();
    let mut from_case_arms = Vec::new();
    for variant in variants {
        if !matches!(variant.fields, Fields::Unit) {
            return Err(syn::Error::new_spanned(
                variant,
                "LdtkEnum only supports unit variants",
            ));
        }

        let variant_ident = &variant.ident;
        let case = parse_case_attr(&variant.attrs)?.unwrap_or_else(|| variant_ident.to_string());

        from_case_arms.push(quote! {
            #case => ::core::option::Option::Some(Self::#variant_ident),
        });
        case_names.push(case);
    }

    let expanded = quote! {
        impl #binding::LdtkEnum for #enum_name {
            const NAME: &'static str = #display_name;

            const CASES: &'static [&'static str] = &[#(#case_names),*];

            fn from_case(case: &str) -> ::core::option::Option<Self> {
                match case {
                    #(#from_case_arms)*
                    _ => ::core::option::Option::None,
                }
            }
        }

        impl #binding::FromFieldValue for #enum_name {
            const KIND: #binding::SlotKind = #binding::SlotKind::Enum;

            fn from_field_value(
                value: &#binding::FieldValue,
            ) -> ::core::result::Result<Self, #binding::ConvertError> {
                #binding::enum_from_field_value(value)
            }
        }
    };

    Ok(TokenStream::from(expanded))
}
