//! ReqForge
//!
//! Iterative requirements refinement: a free-text project description is
//! resolved to a business domain, expanded into a requirements-and-task
//! plan, and driven through a bounded feedback loop against a quality
//! gate until the plan is approved or iterations run out.
//!
//! Module layout:
//! - `config` - pipeline tunables and the on-disk config service
//! - `models` - pipeline report shapes
//! - `services::handlers` - domain handler catalog, resolver, synthesis
//! - `services::requirements` - extraction and feedback transforms
//! - `services::tasks` - requirement-to-task decomposition
//! - `services::pipeline` - ingress and the orchestration loop
//! - `utils` - errors and filesystem paths

pub mod config;
pub mod models;
pub mod services;
pub mod utils;

pub use config::{ConfigService, PipelineConfig};
pub use models::{IterationRecord, PipelineReport, PipelineStatus};
pub use services::handlers::{DomainResolver, HandlerCatalog, HandlerStore, TemplateSynthesizer};
pub use services::pipeline::Orchestrator;
pub use services::requirements::RequirementsStage;
pub use services::tasks::TaskStage;
pub use utils::error::{AppError, AppResult};
