use utilities::{
    logger::{instrument, trace, tracing},
    result::Result,
};

use crate::{torrent_store_service::TorrentStoreService, tracker_service::TrackerService};

use super::tracker_from_torrent;

pub struct QueryFileHandler {
    torrent_store: Box<dyn TorrentStoreService + Send + Sync>,
    tracker: Box<dyn TrackerService + Send + Sync>,
}
impl QueryFileHandler {
    pub fn new(
        torrent_store: Box<dyn TorrentStoreService + Send + Sync>,
        tracker: Box<dyn TrackerService + Send + Sync>,
    ) -> Self {
        Self {
            torrent_store,
            tracker,
        }
    }
    #[instrument(skip(self))]
    pub async fn query_file(&mut self, file_name: String) -> Result<String> {
        let Some(torrent) = self.torrent_store.query_torrent(&file_name).await? else {
            return Err(format!("No torrent exists for {file_name}").into());
        };
        let tracker_addrs = tracker_from_torrent(&torrent)?;
        trace!(%tracker_addrs, "located tracker through torrent");
        // informational query, it never counts toward replication
        let response = self
            .tracker
            .query(&tracker_addrs, &file_name, false)
            .await?;
        if response.holder_count == 0 {
            return Err(format!("Tracker has no record of {file_name}").into());
        }
        Ok(format!(
            "File {file_name} : {} bytes on {} node(s)",
            response.file_size, response.holder_count
        ))
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{
        Arc,
        atomic::{AtomicBool, Ordering},
    };

    use async_trait::async_trait;
    use proto::generated::tracker::QueryResponse;
    use tokio::sync::Mutex;

    use super::*;
    use crate::command_runner::test_support::MockTorrentStore;

    struct MockTracker {
        holder_count: u32,
        saw_download_intent: Arc<AtomicBool>,
    }

    #[async_trait]
    impl TrackerService for MockTracker {
        async fn select_upload_targets(
            &self,
            _tracker_addrs: &str,
            _file_name: &str,
        ) -> Result<Option<(String, String)>> {
            unreachable!("query never selects upload targets")
        }
        async fn query(
            &self,
            _tracker_addrs: &str,
            _file_name: &str,
            want_node_list: bool,
        ) -> Result<QueryResponse> {
            if want_node_list {
                self.saw_download_intent.store(true, Ordering::SeqCst);
            }
            Ok(QueryResponse {
                file_size: 64,
                holder_count: self.holder_count,
                holders: vec![],
            })
        }
    }

    fn handler(torrent: Option<&str>, holder_count: u32) -> (QueryFileHandler, Arc<AtomicBool>) {
        let saw_download_intent = Arc::new(AtomicBool::new(false));
        let torrent_store = MockTorrentStore {
            torrents: Arc::new(Mutex::new(Vec::new())),
            torrent: torrent.map(str::to_owned),
        };
        let tracker = MockTracker {
            holder_count,
            saw_download_intent: saw_download_intent.clone(),
        };
        (
            QueryFileHandler::new(Box::new(torrent_store), Box::new(tracker)),
            saw_download_intent,
        )
    }

    #[tokio::test]
    async fn reports_size_and_holder_count_without_download_intent() {
        let (mut handler, saw_download_intent) =
            handler(Some("http://tracker:6000/x.txt"), 2);
        let message = handler.query_file("x.txt".to_owned()).await.unwrap();
        assert!(message.contains("64 bytes on 2 node(s)"));
        assert!(!saw_download_intent.load(Ordering::SeqCst));
    }

    #[tokio::test]
    async fn missing_torrent_is_an_error() {
        let (mut handler, _) = handler(None, 2);
        assert!(handler.query_file("x.txt".to_owned()).await.is_err());
    }

    #[tokio::test]
    async fn zero_holders_means_not_found() {
        let (mut handler, _) = handler(Some("http://tracker:6000/x.txt"), 0);
        assert!(handler.query_file("x.txt".to_owned()).await.is_err());
    }
}
