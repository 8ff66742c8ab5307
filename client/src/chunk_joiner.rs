use tokio::io::{AsyncSeekExt, AsyncWriteExt};
use utilities::{
    logger::{instrument, trace, tracing},
    result::Result,
};

#[derive(Clone)]
pub struct ChunkJoiner {
    file_path: String,
}

impl ChunkJoiner {
    #[instrument(name = "new_chunk_joiner")]
    pub async fn new(file_path: String, file_size: u64) -> Result<Self> {
        trace!("Creating file");
        // we are reserving space for the file we are going to write
        let mut file = tokio::fs::OpenOptions::new()
            .create_new(true)
            .write(true)
            .open(&file_path)
            .await
            .map_err(|e| format!("Error while opening the file {e}"))?;
        if file_size > 0 {
            file.seek(std::io::SeekFrom::Start(file_size - 1))
                .await
                .map_err(|e| format!("Error while reserving space {e}"))?;
            file.write_all(&[0])
                .await
                .map_err(|e| format!("Error while writing to file initially {e:?}"))?;
        }
        Ok(Self { file_path })
    }
    /// Writes one chunk at its absolute byte offset. Each call opens its own
    /// file descriptor, so concurrent joins never share a seek position.
    #[instrument(skip(self, content))]
    pub async fn join_chunk(&self, offset: u64, content: &[u8]) -> Result<()> {
        let mut file = tokio::fs::OpenOptions::new()
            .write(true)
            .open(&self.file_path)
            .await
            .map_err(|e| format!("Error while opening file  {e:?}"))?;
        file.seek(std::io::SeekFrom::Start(offset))
            .await
            .map_err(|e| format!("Error while seeking to chunk offset in file {e:?}"))?;
        file.write_all(content)
            .await
            .map_err(|e| format!("Error while writing chunk to file {e:?}"))?;
        Ok(())
    }
    #[instrument(name = "abort_join_chunk", skip(self))]
    pub async fn abort(&self) {
        let _ = tokio::fs::remove_file(&self.file_path).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_path(test_name: &str) -> String {
        std::env::temp_dir()
            .join(format!("chunk_joiner_{}_{}", test_name, std::process::id()))
            .to_str()
            .unwrap()
            .to_owned()
    }

    #[tokio::test]
    async fn joins_out_of_order_chunks_into_the_original_bytes() {
        let path = temp_path("out_of_order");
        let _ = tokio::fs::remove_file(&path).await;
        let joiner = ChunkJoiner::new(path.clone(), 10).await.unwrap();
        joiner.join_chunk(5, b"56789").await.unwrap();
        joiner.join_chunk(0, b"01234").await.unwrap();
        assert_eq!(tokio::fs::read(&path).await.unwrap(), b"0123456789");
        let _ = tokio::fs::remove_file(&path).await;
    }

    #[tokio::test]
    async fn refuses_to_overwrite_an_existing_file() {
        let path = temp_path("no_overwrite");
        let _ = tokio::fs::remove_file(&path).await;
        tokio::fs::write(&path, b"keep me").await.unwrap();
        assert!(ChunkJoiner::new(path.clone(), 10).await.is_err());
        assert_eq!(tokio::fs::read(&path).await.unwrap(), b"keep me");
        let _ = tokio::fs::remove_file(&path).await;
    }

    #[tokio::test]
    async fn abort_removes_the_reserved_file() {
        let path = temp_path("abort");
        let _ = tokio::fs::remove_file(&path).await;
        let joiner = ChunkJoiner::new(path.clone(), 10).await.unwrap();
        joiner.abort().await;
        assert!(tokio::fs::metadata(&path).await.is_err());
    }

    #[tokio::test]
    async fn empty_files_reserve_nothing() {
        let path = temp_path("empty");
        let _ = tokio::fs::remove_file(&path).await;
        let _joiner = ChunkJoiner::new(path.clone(), 0).await.unwrap();
        assert_eq!(tokio::fs::metadata(&path).await.unwrap().len(), 0);
        let _ = tokio::fs::remove_file(&path).await;
    }
}
