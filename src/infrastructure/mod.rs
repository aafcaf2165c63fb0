pub mod archive;
pub mod github;
pub mod observability;
pub mod staging;
pub mod storage;
