use std::error::Error;

pub type Result<T> = std::result::Result<T, Box<dyn Error + Send + Sync>>;

/// Local byte store keyed by file name. Files are opaque blobs; a store
/// overwrites any previous content under the same name.
pub trait Storage {
    async fn write(&self, file_name: &str, content: &[u8]) -> Result<u64>;
    async fn read(&self, file_name: &str) -> Result<Vec<u8>>;
    /// Reads exactly `len` bytes starting at `offset`. A short read is an
    /// error, not a truncated result.
    async fn read_range(&self, file_name: &str, offset: u64, len: u64) -> Result<Vec<u8>>;
    async fn file_size(&self, file_name: &str) -> Result<u64>;
    async fn available_files(&self) -> Result<Vec<String>>;
}
