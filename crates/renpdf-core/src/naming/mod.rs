//! Output naming, per-category dispatch and batch runs.

mod batch;
mod dispatcher;
mod resolver;

pub use batch::{run_batch, BatchReport, CopySink, FileSink};
pub use dispatcher::{CaseDispatcher, DocumentFields};
pub use resolver::{certificate_base, contract_base, CollisionStyle, Destination, FileNameResolver};
