//! Kernel module - infrastructure seams and their implementations.

pub mod deps;
pub mod headless;
pub mod test_dependencies;
pub mod traits;

#[cfg(feature = "native")]
pub mod http_api;
#[cfg(feature = "native")]
pub mod local_fs;

pub use deps::ComposerDeps;
pub use headless::{
    MemoryDropdown, MemoryFilePicker, MemoryForm, MemoryModal, MemoryPreview, MemoryTextField,
};
pub use test_dependencies::{
    MockFileReader, MockPostApi, Navigation, PostCall, RecordingNavigator, TestDependencies,
};
pub use traits::*;

#[cfg(feature = "native")]
pub use http_api::ReqwestPostApi;
#[cfg(feature = "native")]
pub use local_fs::{LocalFileReader, LoggingNavigator};
