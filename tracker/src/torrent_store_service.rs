use proto::generated::torrent_store::{
    RegisterTrackerRequest, torrent_store_client::TorrentStoreClient,
};
use tonic::transport::Channel;
use utilities::{
    grpc_channel_pool::GRPC_CHANNEL_POOL,
    logger::{instrument, tracing},
    result::Result,
};

#[derive(Clone, Copy)]
pub struct TorrentStoreService {}

impl TorrentStoreService {
    pub fn new() -> Self {
        Self {}
    }
    async fn get_connection(addrs: &str) -> Result<TorrentStoreClient<Channel>> {
        let channel = GRPC_CHANNEL_POOL.get_channel(addrs).await?;
        Ok(TorrentStoreClient::new(channel))
    }
    /// Announces this tracker to the torrent store so clients can find it.
    #[instrument(name = "service_torrent_store_register_tracker", skip(self))]
    pub async fn register_tracker(
        &self,
        torrent_store_addrs: &str,
        tracker_addrs: &str,
    ) -> Result<bool> {
        let request = RegisterTrackerRequest {
            hostname: tracker_addrs.to_owned(),
        };
        let response = Self::get_connection(torrent_store_addrs)
            .await?
            .register_tracker(tonic::Request::new(request))
            .await
            .map_err(|e| {
                format!("Error while registering tracker with torrent store {torrent_store_addrs} : {e}")
            })?;
        Ok(response.get_ref().registered)
    }
}
