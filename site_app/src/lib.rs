pub mod de;

use figment::{
    Figment,
    providers::{Env, Serialized},
};
use std::collections::BTreeMap;
use thiserror::Error;

/// Errors raised while bootstrapping a service.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("failed to load configuration: {0}")]
    Config(#[from] figment::Error),
    #[error("failed to build application context: {0}")]
    Context(String),
}

pub trait ContextProvider<Config>: Sized {
    /// Config keys whose env values are kept as written. See
    /// [`load_config_with_strings`].
    const STRING_KEYS: &'static [&'static str] = &[];

    fn new(config: Config) -> impl Future<Output = Result<Self, AppError>>;
}

/// Install the JSON tracing subscriber used by every service.
///
/// The log level can be overridden with the `RUST_LOG` env var.
pub fn init_tracing() {
    // https://docs.aws.amazon.com/lambda/latest/dg/rust-logging.html
    tracing_subscriber::fmt()
        .json()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        // this needs to be set to remove duplicated information in the log.
        .with_current_span(false)
        // this needs to be set to false, otherwise ANSI color codes will
        // show up in a confusing manner in CloudWatch logs.
        .with_ansi(false)
        // disabling time is handy because CloudWatch will add the ingestion time.
        .without_time()
        // remove the name of the function from every log entry
        .with_target(false)
        .init();
}

/// Extract the configuration from the raw environment variables.
///
/// Variable names are matched case-insensitively against the field names,
/// so `WEATHER_API_KEY` fills `weather_api_key`.
///
/// # Errors
/// If a required variable is missing or a value cannot be converted into
/// the field's type.
pub fn load_config<Config>() -> Result<Config, figment::Error>
where
    Config: for<'de> serde::Deserialize<'de>,
{
    load_config_with_strings(&[])
}

/// Like [`load_config`], but the env values of `string_keys` are taken
/// verbatim instead of being parsed.
///
/// figment parses env values eagerly, so `0123` would otherwise arrive as
/// the integer `123`. Secrets and identifiers made of digits must be
/// listed here.
///
/// # Errors
/// If a required variable is missing or a value cannot be converted into
/// the field's type.
pub fn load_config_with_strings<Config>(
    string_keys: &[&str],
) -> Result<Config, figment::Error>
where
    Config: for<'de> serde::Deserialize<'de>,
{
    let keys: Vec<String> =
        string_keys.iter().map(|key| key.to_lowercase()).collect();

    let strings: BTreeMap<String, String> = std::env::vars()
        .map(|(name, value)| (name.to_lowercase(), value))
        .filter(|(name, _)| keys.contains(name))
        .collect();

    let parsed = Env::raw().filter(move |name| {
        !keys.iter().any(|key| name.as_str().eq_ignore_ascii_case(key))
    });

    Figment::new()
        .merge(parsed)
        .merge(Serialized::defaults(strings))
        .extract()
}

/// Initialize the application context with configuration from environment variables.
/// The configuration is extracted using figment.
///
/// # Returns
/// The application context built from the configuration as specified by the
/// trait.
///
/// # Errors
/// If the configuration cannot be extracted from the environment variables
/// or if the context rejects the configuration.
///
pub async fn create_app_context<A, Config>() -> Result<A, AppError>
where
    A: ContextProvider<Config>,
    Config: for<'de> serde::Deserialize<'de>,
{
    init_tracing();

    let config: Config = load_config_with_strings(A::STRING_KEYS)?;
    tracing::debug!("configuration loaded from environment");

    A::new(config).await
}
