pub mod local_sink;
pub mod postgres;

pub use local_sink::LocalSink;
pub use postgres::PgServiceSource;
