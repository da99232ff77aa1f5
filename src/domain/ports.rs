use crate::domain::model::RawRow;
use crate::utils::error::Result;
use async_trait::async_trait;

/// A query-capable source of service rows.
#[async_trait]
pub trait ServiceSource: Send + Sync {
    /// Opens a cursor over the full service table. The cursor holds a
    /// connection for its whole lifetime; dropping it releases the
    /// connection on every exit path.
    async fn open(&self) -> Result<Box<dyn RowCursor>>;
}

/// A server-side cursor yielding fixed-size pages of raw rows.
///
/// Not restartable once exhausted. I/O and protocol failures surface as
/// errors to the caller; they are fatal to the invocation.
#[async_trait]
pub trait RowCursor: Send {
    /// Performs one paginated read, returning at most `page_size` rows.
    async fn next_page(&mut self, page_size: usize) -> Result<Vec<RawRow>>;
}

/// Destination for the serialized export payloads. The engine calls `set`
/// exactly once per slot name on success and never on failure; the sink
/// decides what a slot maps to (file, blob, binding).
#[async_trait]
pub trait OutputSink: Send + Sync {
    async fn set(&self, name: &str, bytes: &[u8]) -> Result<()>;
}

pub trait ConfigProvider: Send + Sync {
    fn database_url(&self) -> &str;
    fn output_path(&self) -> &str;
    /// Rows per cursor read. The cursor adapter and the scan loop must
    /// agree on this value; both read it from here.
    fn page_size(&self) -> usize;
}
