use async_trait::async_trait;
use serde_json::json;
use services_export::core::{ConfigProvider, RawRow, RowCursor, ServiceSource};
use services_export::{ExportEngine, LocalSink, Result, COMPACT_SLOT, EXTENDED_SLOT};
use tempfile::TempDir;

/// In-memory source replaying a fixed sequence of pages, standing in for
/// the Postgres cursor.
struct PageSource {
    pages: Vec<Vec<RawRow>>,
}

impl PageSource {
    fn new(pages: Vec<Vec<RawRow>>) -> Self {
        Self { pages }
    }
}

struct PageCursor {
    pages: Vec<Vec<RawRow>>,
    next: usize,
}

#[async_trait]
impl ServiceSource for PageSource {
    async fn open(&self) -> Result<Box<dyn RowCursor>> {
        Ok(Box::new(PageCursor {
            pages: self.pages.clone(),
            next: 0,
        }))
    }
}

#[async_trait]
impl RowCursor for PageCursor {
    async fn next_page(&mut self, _page_size: usize) -> Result<Vec<RawRow>> {
        let page = self.pages.get(self.next).cloned().unwrap_or_default();
        self.next += 1;
        Ok(page)
    }
}

struct TestConfig {
    output_path: String,
    page_size: usize,
}

impl ConfigProvider for TestConfig {
    fn database_url(&self) -> &str {
        "postgres://unused"
    }

    fn output_path(&self) -> &str {
        &self.output_path
    }

    fn page_size(&self) -> usize {
        self.page_size
    }
}

fn service_row(id: &str, fc: &str, org_name: &str, quality: f64) -> RawRow {
    json!({
        "id": id,
        "name": format!("Service {}", id),
        "organizationFiscalCode": fc,
        "organizationName": org_name,
        "quality": quality,
        "scope": "LOCAL",
        "description": format!("Description of {}", id)
    })
}

#[tokio::test]
async fn test_end_to_end_export_to_local_files() {
    let temp_dir = TempDir::new().unwrap();
    let output_path = temp_dir.path().to_str().unwrap().to_string();

    // one organization spans the page boundary, one row is malformed
    let source = PageSource::new(vec![
        vec![
            service_row("s1", "00000000000", "Comune di Alfa", 0.8),
            service_row("s2", "11111111111", "Comune di Beta", 0.3),
        ],
        vec![
            json!({ "unexpected": "shape" }),
            service_row("s3", "00000000000", "Comune di Alfa", 0.9),
        ],
        vec![service_row("s4", "11111111111", "Comune di Beta", 0.1)],
    ]);
    let sink = LocalSink::new(output_path.clone());
    let config = TestConfig {
        output_path: output_path.clone(),
        page_size: 2,
    };

    let engine = ExportEngine::new(source, sink, config);
    let summary = engine.run().await.unwrap();

    assert_eq!(summary.pages, 3);
    assert_eq!(summary.rows_scanned, 5);
    assert_eq!(summary.rows_rejected, 1);
    assert_eq!(summary.organizations, 2);

    let compact_path = temp_dir.path().join(format!("{}.json", COMPACT_SLOT));
    let extended_path = temp_dir.path().join(format!("{}.json", EXTENDED_SLOT));
    assert!(compact_path.exists());
    assert!(extended_path.exists());

    let compact: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&compact_path).unwrap()).unwrap();
    let extended: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&extended_path).unwrap()).unwrap();

    // groups appear in first-seen order, with cross-page rows merged
    let compact_groups = compact.as_array().unwrap();
    assert_eq!(compact_groups.len(), 2);
    assert_eq!(compact_groups[0]["fc"], "00000000000");
    assert_eq!(compact_groups[0]["o"], "Comune di Alfa");
    assert_eq!(compact_groups[0]["s"].as_array().unwrap().len(), 2);
    assert_eq!(compact_groups[1]["fc"], "11111111111");
    assert_eq!(compact_groups[1]["s"].as_array().unwrap().len(), 2);

    // compact entries carry only id, name, quality
    let first_entry = &compact_groups[0]["s"][0];
    assert_eq!(first_entry["i"], "s1");
    assert_eq!(first_entry["n"], "Service s1");
    assert_eq!(first_entry["q"], 0.8);
    assert!(first_entry.get("sc").is_none());
    assert!(first_entry.get("d").is_none());

    // extended entries add scope and description
    let extended_groups = extended.as_array().unwrap();
    assert_eq!(extended_groups.len(), 2);
    let first_extended = &extended_groups[0]["s"][0];
    assert_eq!(first_extended["i"], "s1");
    assert_eq!(first_extended["sc"], "LOCAL");
    assert_eq!(first_extended["d"], "Description of s1");
}

#[tokio::test]
async fn test_end_to_end_empty_table() {
    let temp_dir = TempDir::new().unwrap();
    let output_path = temp_dir.path().to_str().unwrap().to_string();

    let source = PageSource::new(vec![]);
    let sink = LocalSink::new(output_path.clone());
    let config = TestConfig {
        output_path,
        page_size: 100,
    };

    let summary = ExportEngine::new(source, sink, config).run().await.unwrap();

    assert_eq!(summary.pages, 1);
    assert_eq!(summary.organizations, 0);

    let compact = std::fs::read_to_string(temp_dir.path().join(format!("{}.json", COMPACT_SLOT)))
        .unwrap();
    let extended =
        std::fs::read_to_string(temp_dir.path().join(format!("{}.json", EXTENDED_SLOT))).unwrap();
    assert_eq!(compact, "[]");
    assert_eq!(extended, "[]");
}
