pub mod ingest;
pub mod predial;
