use std::path::PathBuf;

/// Where archives land and where they are fetched from.
///
/// Passed explicitly to the pipeline rather than read from globals, so tests
/// can point everything at a scratch directory.
#[derive(Debug, Clone)]
pub struct Config {
    /// Directory that accumulates downloaded archives and extracted entries.
    /// Created if absent, never deleted.
    pub data_dir: PathBuf,
    /// Base URL of the dataset host, with trailing slash.
    pub base_url: String,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            data_dir: PathBuf::from("raw_data"),
            base_url: "https://s3.amazonaws.com/tripdata/".to_string(),
        }
    }
}
