//! PressForge Article Replicator
//!
//! Deep-copies articles between journals. Owned entities (files, galleys,
//! frozen authors) get fresh identities under the new article, shared
//! entities (authors, keywords, publisher notes) are linked by reference and
//! journal-scoped reference data (sections, licences, issues) is resolved by
//! natural key in the target journal.
//!
//! Every article is copied inside its own transaction.

pub mod batch;
pub mod doi;
pub mod errors;
pub mod files;
pub mod options;
pub mod replicator;

pub use batch::{ArticleScope, BatchReport};
pub use errors::ReplicationError;
pub use files::OwnedFile;
pub use options::{ReplicationOptions, ReplicationOutcome};
pub use replicator::Replicator;
