pub mod constants;
pub mod edit;
pub mod error;
pub mod types;

pub use constants::*;
pub use edit::apply_percentage_edit;
pub use error::PlannerError;
pub use types::*;
