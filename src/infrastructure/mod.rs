pub mod error;
pub mod process;
pub mod profile_store;

pub use error::{AppError, AppResult, JobFailure};
pub use process::{Invoker, ProcessInvoker};
pub use profile_store::ProfileStore;
