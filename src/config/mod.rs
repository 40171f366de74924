//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML)
//!     → loader.rs (parse & deserialize, environment overrides)
//!     → validation.rs (required settings, credential invariant)
//!     → ElasticLogConfig (validated, immutable)
//!     → moved into the middleware's shared state
//! ```
//!
//! # Design Decisions
//! - Config is immutable once the middleware is built
//! - `Default` is the zero-valued configuration hosts fill in
//! - Validation reports the first missing setting only

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, LoadError};
pub use schema::{ElasticLogConfig, HostConfig, ObservabilityConfig, RefreshPolicy, ServerConfig};
pub use validation::{validate_config, ConfigurationError};
