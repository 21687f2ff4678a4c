pub mod checker;
pub mod codec;
pub mod config;
pub mod error;
pub mod field;
pub mod lookup;
pub mod report;
pub mod resolver;
pub mod validator;

pub use codec::{DecodeError, ProviderConfigDecoder};
pub use error::ValidationError;
pub use field::{ErrorType, FieldError, FieldErrorList, FieldPath};
pub use lookup::{
    CloudProfileLookup, KubeCloudProfileLookup, LookupError,
    MemoryCloudProfileLookup,
};
pub use report::Outcome;
pub use validator::NamespacedCloudProfileValidator;

use tracing::level_filters::LevelFilter;
use tracing_subscriber::{
    EnvFilter, layer::SubscriberExt, util::SubscriberInitExt,
};

/// Install the global subscriber filtered by `RUST_LOG` plus `default_env`.
/// Logs go to stderr so stdout stays free for findings.
pub fn init_tracing(default_env: &str, json: bool) {
    let filter = EnvFilter::builder()
        .with_env_var("RUST_LOG")
        .from_env_lossy()
        .add_directive(
            default_env
                .parse()
                .unwrap_or_else(|_| LevelFilter::INFO.into()),
        );

    let registry = tracing_subscriber::registry().with(filter);
    let _ = if json {
        let fmt = tracing_subscriber::fmt::layer()
            .json()
            .with_writer(std::io::stderr);
        registry.with(fmt).try_init()
    } else {
        let fmt = tracing_subscriber::fmt::layer().with_writer(std::io::stderr);
        registry.with(fmt).try_init()
    };
}
