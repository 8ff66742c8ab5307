use crate::registry::TrackerRegistry;

/// Placement policy over the registry. Callers hold the registry lock and
/// pass the registry in, so policies stay free of locking concerns.
pub trait SelectionPolicy {
    /// Two distinct nodes eligible to receive a new copy of `file_name`,
    /// or `None` when no complete pair exists.
    fn upload_targets(
        &self,
        registry: &TrackerRegistry,
        file_name: &str,
    ) -> Option<(String, String)>;
    /// A single node that does not yet hold `file_name`, used as the
    /// replication target. `None` when every node already holds it.
    fn replication_target(&self, registry: &TrackerRegistry, file_name: &str) -> Option<String>;
}
