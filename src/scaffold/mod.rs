//! Schema-driven CRUD module scaffolding.

pub mod classify;
pub mod descriptor;
pub mod error;
pub mod registry;
pub mod render;
pub mod template;

pub use classify::{classify, EnumOption, Field, FieldArchetype, Widget};
pub use descriptor::{CreateModuleRequest, ModuleDescriptor};
pub use error::ScaffoldError;
pub use registry::{PatchOutcome, RouteRegistryPatcher};
pub use render::{ArtifactKind, GeneratedArtifact, ModuleModel};
pub use template::{TemplateRenderer, TemplateStore};
