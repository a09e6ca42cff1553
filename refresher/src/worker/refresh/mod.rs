pub mod outcome;
pub mod scheduler;

pub use outcome::{BatchSummary, InvocationOutcome, ItemOutcome};
pub use scheduler::RefreshScheduler;
