//! CLI command handlers. Each command is in its own file.

mod completions;
mod file;
mod man;
mod report;
mod run;

pub use completions::run_completions;
pub use file::run_file;
pub use man::run_man;
pub use run::run_localize;
