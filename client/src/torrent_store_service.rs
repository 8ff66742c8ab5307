use async_trait::async_trait;
use proto::generated::torrent_store::{
    CreateTorrentRequest, LocateTrackerRequest, QueryTorrentRequest,
    torrent_store_client::TorrentStoreClient,
};
use tonic::transport::Channel;
use utilities::{
    grpc_channel_pool::GRPC_CHANNEL_POOL,
    logger::{instrument, tracing},
    result::Result,
};

use crate::config::CONFIG;

/// Torrent store operations the command handlers depend on.
#[async_trait]
pub trait TorrentStoreService {
    async fn locate_tracker(&self) -> Result<String>;
    async fn create_torrent(&self, file_name: &str) -> Result<bool>;
    /// Returns the `trackerHost/fileName` record, or `None` when no torrent
    /// exists for the file.
    async fn query_torrent(&self, file_name: &str) -> Result<Option<String>>;
}

pub struct GrpcTorrentStoreService;

impl GrpcTorrentStoreService {
    async fn get_connection() -> Result<TorrentStoreClient<Channel>> {
        let channel = GRPC_CHANNEL_POOL
            .get_channel(&CONFIG.torrent_store_addrs)
            .await?;
        Ok(TorrentStoreClient::new(channel))
    }
}

#[async_trait]
impl TorrentStoreService for GrpcTorrentStoreService {
    #[instrument(name = "service_torrent_store_locate_tracker", skip(self))]
    async fn locate_tracker(&self) -> Result<String> {
        let response = Self::get_connection()
            .await?
            .locate_tracker(tonic::Request::new(LocateTrackerRequest {}))
            .await
            .map_err(|e| format!("Error while locating tracker : {e}"))?;
        Ok(response.into_inner().hostname)
    }
    #[instrument(name = "service_torrent_store_create_torrent", skip(self))]
    async fn create_torrent(&self, file_name: &str) -> Result<bool> {
        let request = CreateTorrentRequest {
            file_name: file_name.to_owned(),
        };
        let response = Self::get_connection()
            .await?
            .create_torrent(tonic::Request::new(request))
            .await
            .map_err(|e| format!("Error while creating torrent for {file_name} : {e}"))?;
        Ok(response.get_ref().created)
    }
    #[instrument(name = "service_torrent_store_query_torrent", skip(self))]
    async fn query_torrent(&self, file_name: &str) -> Result<Option<String>> {
        let request = QueryTorrentRequest {
            file_name: file_name.to_owned(),
        };
        let response = Self::get_connection()
            .await?
            .query_torrent(tonic::Request::new(request))
            .await
            .map_err(|e| format!("Error while querying torrent for {file_name} : {e}"))?;
        let torrent = response.into_inner().torrent;
        if torrent.is_empty() {
            return Ok(None);
        }
        Ok(Some(torrent))
    }
}
