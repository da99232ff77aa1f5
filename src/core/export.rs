use crate::core::aggregate::{serialize_groups, GroupAggregator};
use crate::core::{ConfigProvider, OutputSink, ServiceRecord, ServiceSource};
use crate::utils::error::Result;
use chrono::{DateTime, Utc};

/// Output slot for the compact projection.
pub const COMPACT_SLOT: &str = "services-compact";
/// Output slot for the extended projection.
pub const EXTENDED_SLOT: &str = "services-extended";

/// What one invocation did, for the operator-facing completion line.
#[derive(Debug, Clone)]
pub struct ExportSummary {
    pub pages: u32,
    pub rows_scanned: u64,
    pub rows_rejected: u64,
    pub organizations: usize,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
}

impl ExportSummary {
    pub fn duration(&self) -> chrono::Duration {
        self.finished_at - self.started_at
    }
}

/// Drives one export invocation: scan the table page by page, validate and
/// aggregate each row, then write both serialized projections to the sink.
///
/// Error handling is two-tier: a row that fails validation is dropped and
/// counted, while a failed page read aborts the whole invocation with
/// nothing written.
pub struct ExportEngine<S, K, C> {
    source: S,
    sink: K,
    config: C,
}

impl<S, K, C> ExportEngine<S, K, C>
where
    S: ServiceSource,
    K: OutputSink,
    C: ConfigProvider,
{
    pub fn new(source: S, sink: K, config: C) -> Self {
        Self {
            source,
            sink,
            config,
        }
    }

    /// Runs the scan to completion. The scan is done when a fetched page is
    /// shorter than the configured page size (a full last page therefore
    /// costs one extra empty read); that is the sole termination condition.
    pub async fn run(&self) -> Result<ExportSummary> {
        let started_at = Utc::now();
        let page_size = self.config.page_size();

        let mut cursor = self.source.open().await?;
        let mut aggregator = GroupAggregator::new();
        let mut pages = 0u32;
        let mut rows_scanned = 0u64;
        let mut rows_rejected = 0u64;

        loop {
            let page = cursor.next_page(page_size).await?;
            pages += 1;
            let page_len = page.len();
            rows_scanned += page_len as u64;

            for raw in page {
                match ServiceRecord::decode(&raw) {
                    Ok(record) => aggregator.add(record),
                    Err(e) => {
                        rows_rejected += 1;
                        tracing::debug!("dropping row: {}", e);
                    }
                }
            }

            tracing::debug!(page = pages, rows = page_len, "page processed");
            if page_len < page_size {
                break;
            }
        }

        if rows_rejected > 0 {
            tracing::warn!(
                rows_rejected,
                "rows failed validation and were dropped from the export"
            );
        }

        let compact = serialize_groups(aggregator.compact_groups())?;
        let extended = serialize_groups(aggregator.extended_groups())?;
        self.sink.set(COMPACT_SLOT, &compact).await?;
        self.sink.set(EXTENDED_SLOT, &extended).await?;

        Ok(ExportSummary {
            pages,
            rows_scanned,
            rows_rejected,
            organizations: aggregator.organizations(),
            started_at,
            finished_at: Utc::now(),
        })
    }
}
