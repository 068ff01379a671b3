pub mod base;
pub mod names;
pub mod record;

pub use base::KnowledgeBase;
pub use names::{localized_name, NameTable};
pub use record::{DiseaseKnowledge, KnowledgeField, ReferenceEntry};
