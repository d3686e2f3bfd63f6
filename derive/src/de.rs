use alloc::vec::Vec;
use proc_macro2::TokenStream;
use quote::quote;

pub fn impl_decodable(ast: &syn::DeriveInput) -> TokenStream {
    let body = if let syn::Data::Struct(s) = &ast.data {
        s
    } else {
        panic!("#[derive(Decodable)] is only defined for structs.");
    };

    let stmts: Vec<_> = body
        .fields
        .iter()
        .enumerate()
        .map(|(index, field)| {
            let id = crate::en::field_ident(index, field);

            quote! { #id: container.decode()?, }
        })
        .collect();
    let name = &ast.ident;
    let (impl_generics, ty_generics, where_clause) = ast.generics.split_for_impl();

    let impl_block = quote! {
        impl #impl_generics binary_codable::Decodable for #name #ty_generics #where_clause {
            type Error = binary_codable::anyhow::Error;

            fn decode(
                decoder: &binary_codable::Decoder<'_>,
            ) -> ::core::result::Result<Self, Self::Error> {
                let mut container = decoder.container(::core::option::Option::None);
                let this = Self {
                    #(#stmts)*
                };
                ::core::result::Result::Ok(this)
            }
        }
    };

    quote! {
        const _: () = {
            extern crate binary_codable;
            #impl_block
        };
    }
}

pub fn impl_decodable_wrapper(ast: &syn::DeriveInput) -> TokenStream {
    let body = if let syn::Data::Struct(s) = &ast.data {
        s
    } else {
        panic!("#[derive(DecodableWrapper)] is only defined for structs.");
    };

    assert_eq!(
        body.fields.iter().count(),
        1,
        "#[derive(DecodableWrapper)] is only defined for structs with one field."
    );

    let wrapped_ty = &body.fields.iter().next().unwrap().ty;

    let name = &ast.ident;
    let (impl_generics, ty_generics, where_clause) = ast.generics.split_for_impl();

    let impl_block = quote! {
        impl #impl_generics binary_codable::Decodable for #name #ty_generics #where_clause {
            type Error = <#wrapped_ty as binary_codable::Decodable>::Error;

            fn decode(
                decoder: &binary_codable::Decoder<'_>,
            ) -> ::core::result::Result<Self, Self::Error> {
                <#wrapped_ty as binary_codable::Decodable>::decode(decoder).map(Self)
            }
        }
    };

    quote! {
        const _: () = {
            extern crate binary_codable;
            #impl_block
        };
    }
}
