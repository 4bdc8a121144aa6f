pub mod client;

pub use client::{ArchiveClient, ArchiveError};
