use std::path::{Path, PathBuf};
use tracing::{error, info, instrument};

use crate::storage::{Result, Storage};
use tokio::{
    fs::{self, File},
    io::{AsyncReadExt, AsyncSeekExt, AsyncWriteExt},
};

#[derive(Clone)]
pub struct FileStorage {
    root: String,
}
impl FileStorage {
    pub async fn new(root: &str) -> Result<Self> {
        match fs::create_dir_all(root).await {
            Ok(_v) => {
                info!(%root,"Created root for storage");
            }
            Err(e) => {
                error!(%root,error=%e,"Error while creating the root for storage");
                return Err(format!("Error while creating storage root {root} : {e}").into());
            }
        }
        Ok(FileStorage {
            root: root.to_owned(),
        })
    }
    fn file_path(&self, file_name: &str) -> Result<PathBuf> {
        // File names are opaque keys, never paths.
        if file_name.is_empty() || file_name.contains(['/', '\\']) {
            return Err(format!("Invalid file name : {file_name}").into());
        }
        Ok(Path::new(&self.root).join(file_name))
    }
}

impl Storage for FileStorage {
    #[instrument(name = "file_storage_write", skip(self, content))]
    async fn write(&self, file_name: &str, content: &[u8]) -> Result<u64> {
        let file_path = self.file_path(file_name)?;
        let mut file = File::create(file_path).await?;
        file.write_all(content).await?;
        file.flush().await?;
        info!(%file_name,bytes=%content.len(),"content written successfully");
        Ok(content.len() as u64)
    }
    #[instrument(name = "file_storage_read", skip(self))]
    async fn read(&self, file_name: &str) -> Result<Vec<u8>> {
        let file_path = self.file_path(file_name)?;
        let content = fs::read(file_path)
            .await
            .map_err(|e| format!("Error while reading file {file_name} : {e}"))?;
        Ok(content)
    }
    #[instrument(name = "file_storage_read_range", skip(self))]
    async fn read_range(&self, file_name: &str, offset: u64, len: u64) -> Result<Vec<u8>> {
        let file_path = self.file_path(file_name)?;
        let mut file = File::open(file_path)
            .await
            .map_err(|e| format!("Error while opening file {file_name} : {e}"))?;
        if offset > 0 {
            file.seek(std::io::SeekFrom::Start(offset))
                .await
                .map_err(|e| format!("Error while seeking to offset {offset} : {e}"))?;
        }
        let mut buffer = vec![0u8; len as usize];
        file.read_exact(&mut buffer).await.map_err(|e| {
            format!("Short read for file {file_name} at offset {offset} len {len} : {e}")
        })?;
        Ok(buffer)
    }
    #[instrument(name = "file_storage_file_size", skip(self))]
    async fn file_size(&self, file_name: &str) -> Result<u64> {
        let file_path = self.file_path(file_name)?;
        let file_metadata = fs::metadata(file_path).await?;
        Ok(file_metadata.len())
    }
    #[instrument(name = "file_storage_available_files", skip(self))]
    async fn available_files(&self) -> Result<Vec<String>> {
        let mut dir_enteries = fs::read_dir(&self.root).await?;
        let mut file_names = vec![];
        while let Some(entry) = dir_enteries.next_entry().await? {
            if entry.file_type().await?.is_file() {
                file_names.push(
                    entry
                        .file_name()
                        .into_string()
                        .map_err(|_| "Invalid file name")?,
                );
            }
        }
        file_names.sort();
        Ok(file_names)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::tests::storage_test;

    async fn temp_storage(test_name: &str) -> FileStorage {
        let root = std::env::temp_dir().join(format!(
            "file_storage_{}_{}",
            test_name,
            std::process::id()
        ));
        let _ = fs::remove_dir_all(&root).await;
        FileStorage::new(root.to_str().unwrap()).await.unwrap()
    }

    #[tokio::test]
    async fn file_storage_test() -> Result<()> {
        let storage = temp_storage("trait").await;
        storage_test(storage).await
    }

    #[tokio::test]
    async fn read_range_rejects_short_reads() {
        let storage = temp_storage("short_read").await;
        storage.write("data.bin", b"0123456789").await.unwrap();
        assert_eq!(storage.read_range("data.bin", 4, 6).await.unwrap(), b"456789");
        assert!(storage.read_range("data.bin", 4, 7).await.is_err());
    }

    #[tokio::test]
    async fn missing_file_is_an_error() {
        let storage = temp_storage("missing").await;
        assert!(storage.read("nope.bin").await.is_err());
        assert!(storage.read_range("nope.bin", 0, 1).await.is_err());
        assert!(storage.file_size("nope.bin").await.is_err());
    }

    #[tokio::test]
    async fn rejects_path_like_names() {
        let storage = temp_storage("path_names").await;
        assert!(storage.write("../escape", b"x").await.is_err());
        assert!(storage.write("", b"x").await.is_err());
    }
}
