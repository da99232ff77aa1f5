use crate::core::OutputSink;
use crate::utils::error::Result;
use async_trait::async_trait;
use std::fs;
use std::path::Path;

/// Output sink writing each slot as a `<name>.json` file under a base path.
#[derive(Debug, Clone)]
pub struct LocalSink {
    base_path: String,
}

impl LocalSink {
    pub fn new(base_path: String) -> Self {
        Self { base_path }
    }
}

#[async_trait]
impl OutputSink for LocalSink {
    async fn set(&self, name: &str, bytes: &[u8]) -> Result<()> {
        let full_path = Path::new(&self.base_path).join(format!("{}.json", name));

        if let Some(parent) = full_path.parent() {
            fs::create_dir_all(parent)?;
        }

        fs::write(full_path, bytes)?;
        Ok(())
    }
}
