use proto::generated::torrent_store::{
    CreateTorrentRequest, CreateTorrentResponse, LocateTrackerRequest, LocateTrackerResponse,
    QueryTorrentRequest, QueryTorrentResponse, RegisterTrackerRequest, RegisterTrackerResponse,
    torrent_store_server::TorrentStore,
};
use storage::{file_storage::FileStorage, storage::Storage};
use tokio::sync::Mutex;
use utilities::logger::{info, instrument, tracing, warn};

/// Torrents are plain files named `tor_<file_name>` holding one line of
/// `trackerHost/fileName`. They survive restarts; the registered tracker
/// address does not.
pub struct TorrentStoreHandler {
    store: FileStorage,
    tracker_addrs: Mutex<String>,
}

fn torrent_file_name(file_name: &str) -> String {
    format!("tor_{file_name}")
}

impl TorrentStoreHandler {
    pub fn new(store: FileStorage) -> Self {
        Self {
            store,
            tracker_addrs: Mutex::new(String::new()),
        }
    }
}

#[tonic::async_trait]
impl TorrentStore for TorrentStoreHandler {
    #[instrument(name="grpc_torrent_store_register_tracker",skip(self,request),fields(hostname= %request.get_ref().hostname))]
    async fn register_tracker(
        &self,
        request: tonic::Request<RegisterTrackerRequest>,
    ) -> Result<tonic::Response<RegisterTrackerResponse>, tonic::Status> {
        let register_request = request.get_ref();
        if register_request.hostname.is_empty() {
            return Ok(tonic::Response::new(RegisterTrackerResponse {
                registered: false,
            }));
        }
        let mut tracker_addrs = self.tracker_addrs.lock().await;
        // a re-registering tracker replaces the previous address
        *tracker_addrs = register_request.hostname.clone();
        info!("Tracker registered");
        Ok(tonic::Response::new(RegisterTrackerResponse {
            registered: true,
        }))
    }

    #[instrument(name = "grpc_torrent_store_locate_tracker", skip(self, _request))]
    async fn locate_tracker(
        &self,
        _request: tonic::Request<LocateTrackerRequest>,
    ) -> Result<tonic::Response<LocateTrackerResponse>, tonic::Status> {
        let tracker_addrs = self.tracker_addrs.lock().await;
        if tracker_addrs.is_empty() {
            return Err(tonic::Status::not_found("No tracker has registered yet"));
        }
        Ok(tonic::Response::new(LocateTrackerResponse {
            hostname: tracker_addrs.clone(),
        }))
    }

    #[instrument(name="grpc_torrent_store_create_torrent",skip(self,request),fields(file_name= %request.get_ref().file_name))]
    async fn create_torrent(
        &self,
        request: tonic::Request<CreateTorrentRequest>,
    ) -> Result<tonic::Response<CreateTorrentResponse>, tonic::Status> {
        let create_request = request.get_ref();
        let tracker_addrs = self.tracker_addrs.lock().await.clone();
        if tracker_addrs.is_empty() {
            warn!("Refusing to create a torrent with no registered tracker");
            return Ok(tonic::Response::new(CreateTorrentResponse {
                created: false,
            }));
        }
        let torrent = format!("{}/{}", tracker_addrs, create_request.file_name);
        self.store
            .write(&torrent_file_name(&create_request.file_name), torrent.as_bytes())
            .await
            .map_err(|e| tonic::Status::internal(format!("{e}")))?;
        info!(%torrent, "Torrent created");
        Ok(tonic::Response::new(CreateTorrentResponse { created: true }))
    }

    #[instrument(name="grpc_torrent_store_query_torrent",skip(self,request),fields(file_name= %request.get_ref().file_name))]
    async fn query_torrent(
        &self,
        request: tonic::Request<QueryTorrentRequest>,
    ) -> Result<tonic::Response<QueryTorrentResponse>, tonic::Status> {
        let query_request = request.get_ref();
        // a missing torrent is an empty answer, not an error
        let torrent = match self
            .store
            .read(&torrent_file_name(&query_request.file_name))
            .await
        {
            Ok(content) => String::from_utf8(content)
                .map_err(|e| tonic::Status::internal(format!("Corrupt torrent file : {e}")))?,
            Err(_) => String::new(),
        };
        Ok(tonic::Response::new(QueryTorrentResponse { torrent }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn harness(test_name: &str) -> TorrentStoreHandler {
        let root = std::env::temp_dir().join(format!(
            "torrent_store_{}_{}",
            test_name,
            std::process::id()
        ));
        let _ = tokio::fs::remove_dir_all(&root).await;
        let store = FileStorage::new(root.to_str().unwrap()).await.unwrap();
        TorrentStoreHandler::new(store)
    }

    async fn register_tracker(handler: &TorrentStoreHandler, hostname: &str) -> bool {
        handler
            .register_tracker(tonic::Request::new(RegisterTrackerRequest {
                hostname: hostname.to_owned(),
            }))
            .await
            .unwrap()
            .get_ref()
            .registered
    }

    async fn query(handler: &TorrentStoreHandler, file_name: &str) -> String {
        handler
            .query_torrent(tonic::Request::new(QueryTorrentRequest {
                file_name: file_name.to_owned(),
            }))
            .await
            .unwrap()
            .into_inner()
            .torrent
    }

    #[tokio::test]
    async fn locate_returns_the_latest_registered_tracker() {
        let handler = harness("locate").await;
        let status = handler
            .locate_tracker(tonic::Request::new(LocateTrackerRequest {}))
            .await
            .unwrap_err();
        assert_eq!(status.code(), tonic::Code::NotFound);

        assert!(register_tracker(&handler, "http://tracker-a:6000").await);
        assert!(register_tracker(&handler, "http://tracker-b:6000").await);
        let response = handler
            .locate_tracker(tonic::Request::new(LocateTrackerRequest {}))
            .await
            .unwrap();
        assert_eq!(response.get_ref().hostname, "http://tracker-b:6000");
    }

    #[tokio::test]
    async fn empty_hostnames_are_rejected() {
        let handler = harness("empty_hostname").await;
        assert!(!register_tracker(&handler, "").await);
    }

    #[tokio::test]
    async fn created_torrents_name_the_tracker_and_the_file() {
        let handler = harness("create").await;
        register_tracker(&handler, "http://tracker-a:6000").await;
        let response = handler
            .create_torrent(tonic::Request::new(CreateTorrentRequest {
                file_name: "x.txt".to_owned(),
            }))
            .await
            .unwrap();
        assert!(response.get_ref().created);
        assert_eq!(query(&handler, "x.txt").await, "http://tracker-a:6000/x.txt");
    }

    #[tokio::test]
    async fn torrents_need_a_registered_tracker() {
        let handler = harness("no_tracker").await;
        let response = handler
            .create_torrent(tonic::Request::new(CreateTorrentRequest {
                file_name: "x.txt".to_owned(),
            }))
            .await
            .unwrap();
        assert!(!response.get_ref().created);
        assert_eq!(query(&handler, "x.txt").await, "");
    }

    #[tokio::test]
    async fn unknown_torrents_are_empty_answers() {
        let handler = harness("unknown").await;
        assert_eq!(query(&handler, "ghost.txt").await, "");
    }
}
