//! SARIF document model, input reading and rule resolution.

mod lenient;
pub mod model;
pub mod read;
pub mod resolve;

pub use model::{SarifDocument, SarifLog};
pub use resolve::{Resolution, Unresolved, resolve};
