//! Shared fixtures for line file specs

pub use linefile::codec::{Base64, Chain, Cipher, Gzip};
pub use linefile::{File, FileError, FileOptions};
pub use std::ops::ControlFlow;

use std::path::PathBuf;
use tempfile::TempDir;
use tracing_subscriber::EnvFilter;

/// A scratch directory holding line files
pub struct Workspace {
    dir: TempDir,
}

impl Workspace {
    pub fn empty() -> Self {
        init_tracing();
        Self {
            dir: TempDir::new().unwrap(),
        }
    }

    pub fn options(&self, name: &str) -> FileOptions {
        FileOptions::new(self.dir.path(), name, "log")
    }

    /// Open `name.log` with the default backend
    pub fn open(&self, name: &str) -> File {
        File::new(self.options(name)).unwrap()
    }

    pub fn path(&self, name: &str) -> PathBuf {
        self.dir.path().join(format!("{name}.log"))
    }

    /// Write raw bytes to `name.log`, bypassing the line file API
    pub fn seed(&self, name: &str, contents: &[u8]) {
        std::fs::write(self.path(name), contents).unwrap();
    }

    /// Raw bytes of `name.log`
    pub fn raw(&self, name: &str) -> Vec<u8> {
        std::fs::read(self.path(name)).unwrap()
    }
}

/// Line helpers over the public API
pub trait Lines {
    /// Write each line then flush
    fn write_lines(&self, lines: &[&str]);

    /// Read one record at the cursor
    fn line(&self) -> Option<String>;

    /// Read every record from the cursor to end-of-data
    fn rest(&self) -> Vec<String>;
}

impl Lines for File {
    fn write_lines(&self, lines: &[&str]) {
        for line in lines {
            self.write_line(line.as_bytes()).unwrap();
        }
        self.flush().unwrap();
    }

    fn line(&self) -> Option<String> {
        self.read_line(|line| String::from_utf8_lossy(line).into_owned())
            .unwrap()
    }

    fn rest(&self) -> Vec<String> {
        let mut out = Vec::new();
        self.read_lines(|line| {
            out.push(String::from_utf8_lossy(line).into_owned());
            ControlFlow::Continue(())
        })
        .unwrap();
        out
    }
}

/// Route library logs to the test harness; `RUST_LOG=linefile=trace` shows
/// navigation detail
fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}
