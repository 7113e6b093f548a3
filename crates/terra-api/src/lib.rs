// terra-api: Async Rust clients for the country registry and the auth backend

pub mod auth;
pub mod error;
pub mod models;
pub mod registry;
pub mod transport;

pub use auth::AuthClient;
pub use error::Error;
pub use models::{LoginResponse, RawCountry, RawCurrency, RawFlags, RawName, UserProfile};
pub use registry::RegistryClient;
pub use transport::{TlsMode, TransportConfig};

/// Default base URL of the public country registry (restcountries.com v3.1).
pub const DEFAULT_REGISTRY_URL: &str = "https://restcountries.com/v3.1";

/// Default base URL of the local auth backend.
pub const DEFAULT_AUTH_URL: &str = "http://localhost:5000/api/auth";
