pub mod aggregate;
pub mod export;

pub use crate::domain::model::{
    CompactServiceEntry, ExtendedServiceEntry, OrganizationGroup, RawRow, ServiceRecord,
};
pub use crate::domain::ports::{ConfigProvider, OutputSink, RowCursor, ServiceSource};
pub use crate::utils::error::Result;
