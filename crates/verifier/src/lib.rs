pub mod check;
pub mod error;
pub mod report;
pub mod verify;

pub use check::TableCheck;
pub use report::VerificationReport;
pub use verify::{Verifier, run};
