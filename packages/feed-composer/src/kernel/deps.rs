//! Services the composer depends on (using traits for testability)

use std::sync::Arc;

use crate::kernel::{BaseFileReader, BaseNavigator, BasePostApi};

/// Shared services injected into the composer
#[derive(Clone)]
pub struct ComposerDeps {
    pub api: Arc<dyn BasePostApi>,
    pub navigator: Arc<dyn BaseNavigator>,
    pub file_reader: Arc<dyn BaseFileReader>,
}

impl ComposerDeps {
    pub fn new(
        api: Arc<dyn BasePostApi>,
        navigator: Arc<dyn BaseNavigator>,
        file_reader: Arc<dyn BaseFileReader>,
    ) -> Self {
        Self {
            api,
            navigator,
            file_reader,
        }
    }
}
