use alloc::vec::Vec;
use proc_macro2::TokenStream;
use quote::quote;

pub fn impl_encodable(ast: &syn::DeriveInput) -> TokenStream {
    let body = if let syn::Data::Struct(s) = &ast.data {
        s
    } else {
        panic!("#[derive(Encodable)] is only defined for structs.");
    };

    let stmts: Vec<_> = body
        .fields
        .iter()
        .enumerate()
        .map(|(index, field)| {
            let ident = field_ident(index, field);

            quote! { container.encode(&self.#ident)?; }
        })
        .collect();
    let name = &ast.ident;
    let (impl_generics, ty_generics, where_clause) = ast.generics.split_for_impl();

    let impl_block = quote! {
        impl #impl_generics binary_codable::Encodable for #name #ty_generics #where_clause {
            fn encode(
                &self,
                out: &mut binary_codable::Encoder,
            ) -> ::core::result::Result<(), binary_codable::EncodeError> {
                let mut container = out.container();
                #(#stmts)*
                ::core::result::Result::Ok(())
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

pub fn impl_encodable_wrapper(ast: &syn::DeriveInput) -> TokenStream {
    let body = if let syn::Data::Struct(s) = &ast.data {
        s
    } else {
        panic!("#[derive(EncodableWrapper)] is only defined for structs.");
    };

    let ident = {
        let fields: Vec<_> = body.fields.iter().collect();
        if fields.len() == 1 {
            let field = fields.first().expect("fields.len() == 1; qed");
            field_ident(0, field)
        } else {
            panic!("#[derive(EncodableWrapper)] is only defined for structs with one field.")
        }
    };

    let name = &ast.ident;
    let (impl_generics, ty_generics, where_clause) = ast.generics.split_for_impl();

    let impl_block = quote! {
        impl #impl_generics binary_codable::Encodable for #name #ty_generics #where_clause {
            fn encode(
                &self,
                out: &mut binary_codable::Encoder,
            ) -> ::core::result::Result<(), binary_codable::EncodeError> {
                binary_codable::Encodable::encode(&self.#ident, out)
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

pub(crate) fn field_ident(index: usize, field: &syn::Field) -> TokenStream {
    if let Some(ident) = &field.ident {
        quote! { #ident }
    } else {
        let index = syn::Index::from(index);
        quote! { #index }
    }
}
