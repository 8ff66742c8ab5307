use async_trait::async_trait;
use proto::generated::tracker::{
    QueryRequest, QueryResponse, SelectUploadTargetsRequest, tracker_client::TrackerClient,
};
use tonic::transport::Channel;
use utilities::{
    grpc_channel_pool::GRPC_CHANNEL_POOL,
    logger::{instrument, tracing},
    result::Result,
};

/// Tracker operations the command handlers depend on. A trait seam so the
/// handlers can be tested without a running tracker.
#[async_trait]
pub trait TrackerService {
    /// Asks the tracker for the two nodes a new file should be pushed to.
    /// `None` when the tracker answered with an incomplete pair.
    async fn select_upload_targets(
        &self,
        tracker_addrs: &str,
        file_name: &str,
    ) -> Result<Option<(String, String)>>;
    /// `want_node_list = true` marks download intent and counts toward the
    /// tracker's replication threshold.
    async fn query(
        &self,
        tracker_addrs: &str,
        file_name: &str,
        want_node_list: bool,
    ) -> Result<QueryResponse>;
}

pub struct GrpcTrackerService;

impl GrpcTrackerService {
    async fn get_connection(addrs: &str) -> Result<TrackerClient<Channel>> {
        let channel = GRPC_CHANNEL_POOL.get_channel(addrs).await?;
        Ok(TrackerClient::new(channel))
    }
}

#[async_trait]
impl TrackerService for GrpcTrackerService {
    #[instrument(name = "service_tracker_select_upload_targets", skip(self))]
    async fn select_upload_targets(
        &self,
        tracker_addrs: &str,
        file_name: &str,
    ) -> Result<Option<(String, String)>> {
        let request = SelectUploadTargetsRequest {
            file_name: file_name.to_owned(),
        };
        let response = Self::get_connection(tracker_addrs)
            .await?
            .select_upload_targets(tonic::Request::new(request))
            .await
            .map_err(|e| format!("Error while selecting upload targets for {file_name} : {e}"))?;
        let targets = response.into_inner();
        if targets.hostname1.is_empty() || targets.hostname2.is_empty() {
            return Ok(None);
        }
        Ok(Some((targets.hostname1, targets.hostname2)))
    }
    #[instrument(name = "service_tracker_query", skip(self))]
    async fn query(
        &self,
        tracker_addrs: &str,
        file_name: &str,
        want_node_list: bool,
    ) -> Result<QueryResponse> {
        let request = QueryRequest {
            file_name: file_name.to_owned(),
            want_node_list,
        };
        let response = Self::get_connection(tracker_addrs)
            .await?
            .query(tonic::Request::new(request))
            .await
            .map_err(|e| format!("Error while querying tracker for {file_name} : {e}"))?;
        Ok(response.into_inner())
    }
}
