//! I/O adapters around the engine
//!
//! Linear, stateless translation between external representations (battle
//! text stream, scenario TOML, report text) and the in-memory data model.

pub mod loader;
pub mod report;
pub mod scenario;
pub mod stream;

pub use loader::Loader;
pub use report::write_report;
pub use scenario::Scenario;
pub use stream::resolve_stream;
