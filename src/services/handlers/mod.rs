//! Domain handler services: built-in handlers, the persisted handler
//! store, the catalog, domain resolution, and template-based synthesis.

pub mod builtins;
pub mod catalog;
pub mod resolver;
pub mod store;
pub mod synthesizer;

pub use catalog::HandlerCatalog;
pub use resolver::{DomainResolver, Resolution};
pub use store::HandlerStore;
pub use synthesizer::TemplateSynthesizer;
