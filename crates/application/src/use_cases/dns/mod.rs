pub mod handle_query;

pub use handle_query::{HandleDnsQueryUseCase, QueryOutcome};
