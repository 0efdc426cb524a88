use quote::{format_ident, quote};
use proc_macro::TokenStream;
use syn::DeriveInput;

pub fn impl_component(ast: &DeriveInput) -> TokenStream {
    let name = &ast.ident;

    // A single lazily allocated id per type cannot be shared by every instantiation of a generic type.
    if !ast.generics.params.is_empty() {
        return syn::Error::new_spanned(&ast.generics, "components cannot be generic")
            .to_compile_error()
            .into();
    }

    let name_str = name.to_string();
    let id_name = format_ident!("__COMPONENT_ID_OF_{}", name_str.to_uppercase());

    let gen = quote! {
        frame_ecs::lazy_static! {
            static ref #id_name: frame_ecs::components::ComponentId =
                frame_ecs::components::ComponentId::register(#name_str);
        }

        impl frame_ecs::components::Component for #name {
            #[inline(always)]
            fn component_id() -> frame_ecs::components::ComponentId {
                *#id_name
            }
        }
    };
    gen.into()
}
