use proc_macro::TokenStream;
use proc_macro2::Span;
use quote::quote;
use rand::{rngs::SmallRng, Rng, SeedableRng};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};
use syn::{
    parse, parse_macro_input, spanned::Spanned, FnArg, Ident, ItemFn, ReturnType, Type, Visibility,
};

/// Attribute to declare the entry point of the supervisor program
///
/// The runtime's `init` calls the function once the stack and the logger are
/// set up. If it returns, the runtime asks firmware to shut the system down.
///
/// The function must have signature `fn main(hartid: usize, dtb: usize)`,
/// returning either `()` or `!`.
///
/// # Examples
///
/// ```ignore
/// #[sbi_monitor::entry]
/// fn main(hartid: usize, dtb: usize) -> ! {
///     sbi_monitor::println!("hartid={}, dtb={:#x}", hartid, dtb);
///     Monitor::new(Console::new(Ecall)).run()
/// }
/// ```
#[proc_macro_attribute]
pub fn entry(args: TokenStream, input: TokenStream) -> TokenStream {
    let f = parse_macro_input!(input as ItemFn);

    let valid_signature = f.sig.constness.is_none()
        && f.sig.asyncness.is_none()
        && matches!(f.vis, Visibility::Inherited)
        && f.sig.abi.is_none()
        && f.sig.inputs.len() == 2
        && f.sig.inputs.iter().all(is_usize)
        && f.sig.generics.params.is_empty()
        && f.sig.generics.where_clause.is_none()
        && f.sig.variadic.is_none()
        && match f.sig.output {
            ReturnType::Default => true,
            ReturnType::Type(_, ref ty) => match ty.as_ref() {
                Type::Tuple(tuple) => tuple.elems.is_empty(),
                Type::Never(_) => true,
                _ => false,
            },
        };

    if !valid_signature {
        return parse::Error::new(
            f.span(),
            "`#[entry]` function must have signature `fn main(hartid: usize, dtb: usize)` or `fn main(hartid: usize, dtb: usize) -> !`",
        )
        .to_compile_error()
        .into();
    }

    if !args.is_empty() {
        return parse::Error::new(Span::call_site(), "This attribute accepts no arguments")
            .to_compile_error()
            .into();
    }

    let attrs = f.attrs;
    let generated_name = random_ident();
    let unsafety = f.sig.unsafety;
    let inputs = f.sig.inputs;
    let stmts = f.block.stmts;

    // Always exported with a unit return so the runtime's declaration matches
    // whichever form the user wrote; a `!` body coerces to `()`.
    quote!(
        #[export_name = "__sbi_monitor_main"]
        #(#attrs)*
        pub #unsafety fn #generated_name(#inputs) {
            #(#stmts)*
        }
    )
    .into()
}

fn is_usize(arg: &FnArg) -> bool {
    match arg {
        FnArg::Typed(pat_type) => match pat_type.ty.as_ref() {
            Type::Path(type_path) => {
                type_path.qself.is_none()
                    && type_path.path.segments.len() == 1
                    && type_path.path.segments[0].ident == "usize"
                    && type_path.path.segments[0].arguments.is_empty()
            }
            _ => false,
        },
        FnArg::Receiver(_) => false,
    }
}

static CALL_COUNT: AtomicUsize = AtomicUsize::new(0);

// The generated name must not be callable from user code, so it is random.
fn random_ident() -> Ident {
    let secs = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0);
    let count = CALL_COUNT.fetch_add(1, Ordering::SeqCst) as u64;

    let mut rng = SmallRng::seed_from_u64(secs ^ count.rotate_left(32));
    Ident::new(
        &(0..16)
            .map(|i| {
                if i == 0 || rng.gen() {
                    (b'a' + rng.gen::<u8>() % 25) as char
                } else {
                    (b'0' + rng.gen::<u8>() % 10) as char
                }
            })
            .collect::<String>(),
        Span::call_site(),
    )
}
