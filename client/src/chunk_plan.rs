/// One holder's share of a download: read `size` bytes starting at the
/// absolute byte `offset`.
#[derive(Debug, Clone, PartialEq)]
pub struct ChunkAssignment {
    pub hostname: String,
    pub offset: u64,
    pub size: u64,
}

/// Splits `file_size` bytes across the holders in holder order. Every holder
/// gets `file_size / holders` bytes and the last one also takes the
/// remainder, so the assignments cover the file exactly.
pub fn plan_chunks(file_size: u64, holders: &[String]) -> Vec<ChunkAssignment> {
    if holders.is_empty() {
        return vec![];
    }
    let base = file_size / holders.len() as u64;
    let remainder = file_size % holders.len() as u64;
    holders
        .iter()
        .enumerate()
        .map(|(index, hostname)| {
            let last = index == holders.len() - 1;
            ChunkAssignment {
                hostname: hostname.clone(),
                offset: base * index as u64,
                size: if last { base + remainder } else { base },
            }
        })
        .collect()
}
