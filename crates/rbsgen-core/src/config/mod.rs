//! Configuration: `rbsgen.toml` sections plus `RBSGEN_*` environment overrides.

pub mod expansion_config;
pub mod parser_config;
pub mod rbsgen_config;
pub mod registry_config;

pub use expansion_config::ExpansionConfig;
pub use parser_config::ParserConfig;
pub use rbsgen_config::RbsgenConfig;
pub use registry_config::RegistryConfig;
