//! Image file storage.

mod image_store;

pub use image_store::{ImageStore, LocalImageStore};

#[cfg(any(test, feature = "test-utils"))]
pub use image_store::MockImageStore;
