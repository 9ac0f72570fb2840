mod clients;
mod storage;

pub use clients::http::HttpDocumentProvider;
pub use storage::fs_store::FileSystemStore;
