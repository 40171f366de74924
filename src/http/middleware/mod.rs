//! Tower middleware.

pub mod elastic_log;

pub use elastic_log::{ElasticLogLayer, ElasticLogService, SetupError};
