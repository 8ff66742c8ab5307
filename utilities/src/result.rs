use std::error::Error;

// Boxed so every layer (fs, tonic, figment, plain strings) converts with ?.
// Send + Sync because results cross tokio::spawn boundaries.
pub type Result<T> = std::result::Result<T, Box<dyn Error + Send + Sync>>;
