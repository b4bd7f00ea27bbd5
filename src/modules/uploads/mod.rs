//! Local-filesystem upload store
//!
//! Photo files live in a directory tree under a configured root and are
//! served under a public URL prefix. Stored `photo_path` values are public
//! URLs; this module maps between them and on-disk locations.

mod store;

pub use store::UploadStore;
