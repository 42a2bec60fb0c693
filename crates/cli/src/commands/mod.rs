//! CLI command implementations.

mod build;
mod check;

pub use build::build;
pub use check::check;
pub use lxgw_jb_core::clean;
