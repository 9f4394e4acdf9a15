pub mod audit;
pub mod token;

pub use audit::{AuditAction, AuditRecorder, ClientMeta};
pub use token::{Claims, TokenError, TokenService};
