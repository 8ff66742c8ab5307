use proto::generated::node::{
    FetchChunkRequest, FetchChunkResponse, FetchFileRequest, FetchFileResponse, StoreFileRequest,
    StoreFileResponse, node_server::Node,
};
use storage::{file_storage::FileStorage, storage::Storage};
use utilities::logger::{instrument, trace, tracing};

use crate::tracker_service::FileRegistrar;

pub struct NodeHandler {
    store: FileStorage,
    registrar: Box<dyn FileRegistrar + Send + Sync>,
}

impl NodeHandler {
    pub fn new(store: FileStorage, registrar: Box<dyn FileRegistrar + Send + Sync>) -> Self {
        Self { store, registrar }
    }
}

#[tonic::async_trait]
impl Node for NodeHandler {
    #[instrument(name="grpc_node_store_file",skip(self,request),fields(file_name= %request.get_ref().file_name,system_origin= %request.get_ref().system_origin))]
    async fn store_file(
        &self,
        request: tonic::Request<StoreFileRequest>,
    ) -> Result<tonic::Response<StoreFileResponse>, tonic::Status> {
        let store_request = request.get_ref();
        let file_size = self
            .store
            .write(&store_request.file_name, &store_request.content)
            .await
            .map_err(|e| tonic::Status::internal(format!("{e}")))?;
        trace!(bytes = %file_size, "content stored");
        // replication pushes come from the tracker, which already updated its
        // own registry; announcing them again would double-count the holder
        if !store_request.system_origin {
            self.registrar
                .register_file(&store_request.file_name, file_size)
                .await
                .map_err(|e| tonic::Status::internal(format!("{e}")))?;
        }
        Ok(tonic::Response::new(StoreFileResponse { stored: true }))
    }

    #[instrument(name="grpc_node_fetch_file",skip(self,request),fields(file_name= %request.get_ref().file_name))]
    async fn fetch_file(
        &self,
        request: tonic::Request<FetchFileRequest>,
    ) -> Result<tonic::Response<FetchFileResponse>, tonic::Status> {
        let fetch_request = request.get_ref();
        let content = self
            .store
            .read(&fetch_request.file_name)
            .await
            .map_err(|e| tonic::Status::not_found(format!("{e}")))?;
        Ok(tonic::Response::new(FetchFileResponse { content }))
    }

    #[instrument(name="grpc_node_fetch_chunk",skip(self,request),fields(file_name= %request.get_ref().file_name,position= %request.get_ref().position,chunk_size= %request.get_ref().chunk_size))]
    async fn fetch_chunk(
        &self,
        request: tonic::Request<FetchChunkRequest>,
    ) -> Result<tonic::Response<FetchChunkResponse>, tonic::Status> {
        let fetch_request = request.get_ref();
        let content = self
            .store
            .read_range(
                &fetch_request.file_name,
                fetch_request.position,
                fetch_request.chunk_size,
            )
            .await
            .map_err(|e| tonic::Status::not_found(format!("{e}")))?;
        Ok(tonic::Response::new(FetchChunkResponse { content }))
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{
        Arc,
        atomic::{AtomicBool, Ordering},
    };

    use async_trait::async_trait;
    use tokio::sync::Mutex;
    use utilities::result::Result as UtilResult;

    use super::*;

    struct MockRegistrar {
        registrations: Arc<Mutex<Vec<(String, u64)>>>,
        fail: Arc<AtomicBool>,
    }

    #[async_trait]
    impl FileRegistrar for MockRegistrar {
        async fn register_file(&self, file_name: &str, file_size: u64) -> UtilResult<()> {
            if self.fail.load(Ordering::SeqCst) {
                return Err("tracker unreachable".into());
            }
            self.registrations
                .lock()
                .await
                .push((file_name.to_owned(), file_size));
            Ok(())
        }
    }

    struct Harness {
        handler: NodeHandler,
        registrations: Arc<Mutex<Vec<(String, u64)>>>,
        fail: Arc<AtomicBool>,
    }

    async fn harness(test_name: &str) -> Harness {
        let root = std::env::temp_dir().join(format!(
            "node_handler_{}_{}",
            test_name,
            std::process::id()
        ));
        let _ = tokio::fs::remove_dir_all(&root).await;
        let store = FileStorage::new(root.to_str().unwrap()).await.unwrap();
        let registrations = Arc::new(Mutex::new(Vec::new()));
        let fail = Arc::new(AtomicBool::new(false));
        let registrar = MockRegistrar {
            registrations: registrations.clone(),
            fail: fail.clone(),
        };
        Harness {
            handler: NodeHandler::new(store, Box::new(registrar)),
            registrations,
            fail,
        }
    }

    async fn store(
        harness: &Harness,
        file_name: &str,
        content: &[u8],
        system_origin: bool,
    ) -> Result<tonic::Response<StoreFileResponse>, tonic::Status> {
        harness
            .handler
            .store_file(tonic::Request::new(StoreFileRequest {
                file_name: file_name.to_owned(),
                content: content.to_vec(),
                system_origin,
            }))
            .await
    }

    #[tokio::test]
    async fn client_stores_announce_to_the_tracker() {
        let harness = harness("client_store").await;
        let response = store(&harness, "x.txt", b"hello", false).await.unwrap();
        assert!(response.get_ref().stored);
        assert_eq!(
            harness.registrations.lock().await.clone(),
            [("x.txt".to_owned(), 5)]
        );
    }

    #[tokio::test]
    async fn replication_pushes_skip_the_announcement() {
        let harness = harness("system_store").await;
        store(&harness, "x.txt", b"hello", true).await.unwrap();
        assert!(harness.registrations.lock().await.is_empty());
        let response = harness
            .handler
            .fetch_file(tonic::Request::new(FetchFileRequest {
                file_name: "x.txt".to_owned(),
            }))
            .await
            .unwrap();
        assert_eq!(response.get_ref().content, b"hello");
    }

    #[tokio::test]
    async fn failed_announcement_fails_the_store() {
        let harness = harness("failed_announcement").await;
        harness.fail.store(true, Ordering::SeqCst);
        let status = store(&harness, "x.txt", b"hello", false).await.unwrap_err();
        assert_eq!(status.code(), tonic::Code::Internal);
    }

    #[tokio::test]
    async fn fetch_chunk_reads_the_requested_byte_range() {
        let harness = harness("fetch_chunk").await;
        store(&harness, "data.bin", b"0123456789", true).await.unwrap();
        let response = harness
            .handler
            .fetch_chunk(tonic::Request::new(FetchChunkRequest {
                file_name: "data.bin".to_owned(),
                position: 5,
                chunk_size: 5,
            }))
            .await
            .unwrap();
        assert_eq!(response.get_ref().content, b"56789");
    }

    #[tokio::test]
    async fn out_of_range_chunks_are_not_found() {
        let harness = harness("out_of_range").await;
        store(&harness, "data.bin", b"0123456789", true).await.unwrap();
        let status = harness
            .handler
            .fetch_chunk(tonic::Request::new(FetchChunkRequest {
                file_name: "data.bin".to_owned(),
                position: 8,
                chunk_size: 5,
            }))
            .await
            .unwrap_err();
        assert_eq!(status.code(), tonic::Code::NotFound);
    }

    #[tokio::test]
    async fn missing_files_are_not_found() {
        let harness = harness("missing_file").await;
        let status = harness
            .handler
            .fetch_file(tonic::Request::new(FetchFileRequest {
                file_name: "ghost.txt".to_owned(),
            }))
            .await
            .unwrap_err();
        assert_eq!(status.code(), tonic::Code::NotFound);
    }
}
