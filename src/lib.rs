//! Command-line client for a prime brokerage trading and custody REST API.
//!
//! Command handlers live in [`cli`], one submodule per API domain. Each
//! handler resolves default identifiers from flags or credentials, builds a
//! request, calls the matching service in [`services`], and prints the JSON
//! response. List commands traverse cursor-paginated results through
//! [`pagination::paginate`].

pub mod cli;
pub mod client;
pub mod output;
pub mod pagination;
pub mod services;
pub mod validation;

pub fn setup_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "prime_cli=info".into()),
        )
        .with_writer(std::io::stderr)
        .init();
}
