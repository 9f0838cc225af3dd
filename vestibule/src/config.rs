use clap::Parser;
use std::path::PathBuf;

/// A terminal client for a spreadsheet-backed sign-in service
#[derive(Parser)]
#[clap(version)]
pub struct Config {
    /// Where should we store settings and logs?
    #[clap(long)]
    data_dir: Option<PathBuf>,
}

impl Config {
    /// Get either the configured or a default data directory. If no data
    /// directory can be found (e.g. because `$HOME` is unset) we will use
    /// the current directory.
    pub fn data_dir(&self) -> PathBuf {
        self.data_dir
            .clone()
            .or_else(|| {
                directories::ProjectDirs::from("dev", "vestibule", "vestibule")
                    .map(|dirs| dirs.data_local_dir().to_owned())
            })
            .unwrap_or_else(|| PathBuf::from("."))
    }
}
