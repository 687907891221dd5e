pub mod check;
pub mod install;

pub use check::run_check;
pub use install::run_install;
