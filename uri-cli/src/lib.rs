//! The `mota-uri` command line tool, for parsing and building MotaCoin payment
//! URIs from a shell.

/// CLI args and the commands they run.
pub mod cli;
