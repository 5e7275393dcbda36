pub mod config;
pub mod logging;

pub mod checksum;
pub mod container;
pub mod msf;
pub mod source_index;
pub mod verify;
