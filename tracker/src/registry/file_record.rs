/// Tracker-side metadata for one file. Holders are weak references: plain
/// hostnames into the node table, never owned node state. The tracker never
/// sees file bytes.
#[derive(Debug, Clone)]
pub struct FileRecord {
    pub file_name: String,
    pub file_size: u64,
    // download-intent queries since the last replication
    pub request_count: u32,
    holders: Vec<String>,
}

impl FileRecord {
    pub fn new(file_name: String, file_size: u64, first_holder: String) -> Self {
        Self {
            file_name,
            file_size,
            request_count: 0,
            holders: vec![first_holder],
        }
    }
    /// Holder count is always the holder list length.
    pub fn holder_count(&self) -> u32 {
        self.holders.len() as u32
    }
    pub fn holders(&self) -> &[String] {
        &self.holders
    }
    pub fn add_holder(&mut self, hostname: &str) {
        if !self.holders.iter().any(|h| h == hostname) {
            self.holders.push(hostname.to_owned());
        }
    }
}
