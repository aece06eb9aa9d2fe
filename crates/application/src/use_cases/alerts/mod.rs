pub mod dispatch_alerts;
pub mod evaluate_diff;

pub use dispatch_alerts::DispatchAlertsUseCase;
pub use evaluate_diff::EvaluateDiffUseCase;
