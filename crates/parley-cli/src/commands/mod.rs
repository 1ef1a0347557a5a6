pub mod detect;
pub mod dispatch;
pub mod ingest;
pub mod insight;
pub mod schema;
pub mod shared;
pub mod taxonomy;
