//! Network fetches for pinned third-party archives.

pub mod download;

pub use download::Downloader;
