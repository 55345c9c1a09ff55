//! One file per subcommand; each reports its own errors and returns the exit code.

mod check;
mod log;
mod prune;

pub use check::cmd_check;
pub use log::{cmd_log, parse_fields};
pub use prune::cmd_prune;
