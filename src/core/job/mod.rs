pub mod loader;
pub mod thread;

pub use loader::{load_document, load_jobs, JobEntry, JobsDocument};
pub use thread::JobThread;
