pub mod file_record;
pub mod node_detail;

use std::collections::HashMap;

use file_record::FileRecord;
use node_detail::NodeDetail;
use utilities::result::Result;

/// Authoritative node/file placement registry for one tracker. Lives behind
/// a single mutex shared by all RPC handlers; every method here runs with
/// that lock held.
///
/// Registration order matters (upload selection and replication targeting
/// scan it), so the node table keeps an explicit order alongside the map.
#[derive(Debug, Default)]
pub struct TrackerRegistry {
    node_order: Vec<String>,
    nodes: HashMap<String, NodeDetail>,
    files: HashMap<String, FileRecord>,
}

impl TrackerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a node hostname. Registering the same hostname twice is a
    /// no-op success, which keeps hostnames unique in the table.
    pub fn register_node(&mut self, hostname: &str) -> bool {
        if hostname.is_empty() {
            return false;
        }
        if !self.nodes.contains_key(hostname) {
            self.node_order.push(hostname.to_owned());
            self.nodes
                .insert(hostname.to_owned(), NodeDetail::new(hostname.to_owned()));
        }
        true
    }

    /// Records that `hostname` now holds `file_name`. Fails when the
    /// hostname was never registered; otherwise updates the file record
    /// (created on first registration) and the node's own file list.
    pub fn register_file(&mut self, hostname: &str, file_name: &str, file_size: u64) -> bool {
        let Some(node) = self.nodes.get_mut(hostname) else {
            return false;
        };
        node.add_file(file_name, file_size);
        match self.files.get_mut(file_name) {
            Some(record) => record.add_holder(hostname),
            None => {
                self.files.insert(
                    file_name.to_owned(),
                    FileRecord::new(file_name.to_owned(), file_size, hostname.to_owned()),
                );
            }
        }
        true
    }

    /// Commits replication bookkeeping after a successful push: the target
    /// joins the holder list and gains a file-list entry. Never called on
    /// failure, so a failed push leaves the registry untouched.
    pub fn commit_replica(&mut self, file_name: &str, target: &str) -> Result<()> {
        let Some(record) = self.files.get_mut(file_name) else {
            return Err(format!("No file record for {file_name}").into());
        };
        let Some(node) = self.nodes.get_mut(target) else {
            return Err(format!("Replication target {target} is not a registered node").into());
        };
        record.add_holder(target);
        node.add_file(file_name, record.file_size);
        Ok(())
    }

    pub fn nodes_in_order(&self) -> impl Iterator<Item = &NodeDetail> {
        self.node_order
            .iter()
            .filter_map(|hostname| self.nodes.get(hostname))
    }
    pub fn node(&self, hostname: &str) -> Option<&NodeDetail> {
        self.nodes.get(hostname)
    }
    pub fn node_count(&self) -> usize {
        self.node_order.len()
    }
    pub fn file(&self, file_name: &str) -> Option<&FileRecord> {
        self.files.get(file_name)
    }
    pub fn file_mut(&mut self, file_name: &str) -> Option<&mut FileRecord> {
        self.files.get_mut(file_name)
    }
}
