//! Sizefit CLI - shrink a folder of images for the web
//!
//! The binary is a thin wrapper around [`batch::process_folder`].

pub mod batch;

pub use batch::{process_file, process_folder, BatchConfig, BatchSummary, Job, Outcome};
