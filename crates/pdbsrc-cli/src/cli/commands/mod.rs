//! CLI command handlers. Each command is in its own file for clarity.

mod checksum;
mod list;
mod verify;

pub use checksum::{run_checksum, HashAlgo};
pub use list::run_list;
pub use verify::run_verify;
