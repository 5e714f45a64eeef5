//! Media store backends.
//!
//! The [`MediaStore`] trait is the provider contract the media-replacement
//! lifecycle runs against: upload bytes into a folder, delete by provider id.
//! Two backends exist: the local filesystem (development, tests) and
//! Cloudinary (production).

mod cloudinary;
mod factory;
mod keys;
mod local;
mod traits;

pub use cloudinary::CloudinaryStore;
pub use factory::create_media_store;
pub use keys::{object_key, random_object_id};
pub use local::LocalStore;
pub use traits::{MediaStore, StorageError, StorageResult, StoredObject};
