use proc_macro2::TokenStream as TokenStream2;
use quote::{quote, quote_spanned, ToTokens};
use syn::{
    parse::{Parse, ParseStream},
    punctuated::Punctuated,
    Attribute,
    Expr,
    Fields,
    Ident,
    ItemStruct,
    MetaNameValue,
    Result,
    Token,
};

/// The tags of the `error` attribute.
#[derive(Debug)]
pub struct ErrorArgs {
    pub message: Expr,
    pub labels: Option<Expr>,
    pub help: Option<Expr>,
}

impl ErrorArgs {
    /// Reads the tags out of the first `error` attribute in `attrs`. `name` is the struct the
    /// attributes belong to, used to place the error when no message is given.
    fn from_attrs(name: &Ident, attrs: &[Attribute]) -> Result<Self> {
        let mut message = None;
        let mut labels = None;
        let mut help = None;

        if let Some(attr) = attrs.iter().find(|attr| attr.path().is_ident("error")) {
            let tags = attr.parse_args_with(Punctuated::<MetaNameValue, Token![,]>::parse_terminated)?;
            for tag in tags {
                let slot = match tag.path.get_ident().map(Ident::to_string).as_deref() {
                    Some("message") => &mut message,
                    Some("labels") => &mut labels,
                    Some("help") => &mut help,
                    _ => return Err(syn::Error::new_spanned(&tag.path, "expected `message`, `labels` or `help`")),
                };
                *slot = Some(tag.value);
            }
        }

        let message = message
            .ok_or_else(|| syn::Error::new_spanned(name, "missing `message` tag in `error` attribute"))?;
        Ok(Self { message, labels, help })
    }
}

/// A struct deriving `ErrorKind`.
#[derive(Debug)]
pub struct ErrorKindTarget {
    pub name: Ident,
    pub fields: Fields,
    pub args: ErrorArgs,
}

impl Parse for ErrorKindTarget {
    fn parse(input: ParseStream) -> Result<Self> {
        let item = input.parse::<ItemStruct>()?;
        let args = ErrorArgs::from_attrs(&item.ident, &item.attrs)?;
        Ok(Self { name: item.ident, fields: item.fields, args })
    }
}

impl ErrorKindTarget {
    /// Brings the named fields of `self` into scope, so the tag expressions can refer to them.
    fn bind_fields(&self) -> TokenStream2 {
        let name = &self.name;
        match &self.fields {
            Fields::Named(named) => {
                let idents = named.named.iter().filter_map(|field| field.ident.as_ref());
                quote! { let #name { #(#idents),* } = self; }
            },
            Fields::Unnamed(_) => quote_spanned! { name.span() =>
                compile_error!("`ErrorKind` cannot be derived for tuple structs");
            },
            Fields::Unit => TokenStream2::new(),
        }
    }
}

impl ToTokens for ErrorKindTarget {
    fn to_tokens(&self, tokens: &mut TokenStream2) {
        let bind_fields = self.bind_fields();
        let message = &self.args.message;
        let labels = match &self.args.labels {
            Some(labels) => labels.to_token_stream(),
            None => quote! { Vec::<String>::new() },
        };
        let help = self.args.help.iter();

        tokens.extend(quote! {
            #[allow(unused_variables)]
            fn build_report<'a>(
                &self,
                src_id: &'a str,
                spans: &[std::ops::Range<usize>],
            ) -> ariadne::Report<(&'a str, std::ops::Range<usize>)> {
                #bind_fields

                let offset = spans.first().map_or(0, |span| span.start);
                let labels = IntoIterator::into_iter(#labels)
                    .zip(spans.iter())
                    .map(|(text, span)| {
                        let label = ariadne::Label::new((src_id, span.clone()))
                            .with_color(symdiff_error::EXPR);
                        if text.is_empty() {
                            label
                        } else {
                            label.with_message(text)
                        }
                    })
                    .collect::<Vec<_>>();

                #[allow(unused_mut)]
                let mut builder = ariadne::Report::build(ariadne::ReportKind::Error, src_id, offset)
                    .with_message(#message)
                    .with_labels(labels);
                #(builder.set_help(#help);)*
                builder.finish()
            }

            #[allow(unused_variables)]
            fn message(&self) -> String {
                #bind_fields

                (#message).to_string()
            }
        });
    }
}
