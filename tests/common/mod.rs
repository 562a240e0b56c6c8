// tests/common/mod.rs

#[allow(dead_code)]
pub mod transcripts {
    use std::fs;
    use std::io::Result as IoResult;
    use std::path::{Path, PathBuf};
    use tempfile::{tempdir, TempDir};

    pub const START_WATCH: &str = "[10:00:00 AM] Starting compilation in watch mode...";
    pub const START_INCR: &str = "[10:00:05 AM] File change detected. Starting incremental compilation...";
    pub const END_WATCH_CLEAN: &str = "[10:00:06 AM] Found 0 errors. Watching for file changes.";
    pub const END_WATCH_ERRORS: &str = "[10:00:06 AM] Found 1 error. Watching for file changes.";

    /// A compiler transcript written to a temporary file, ready to be piped
    /// into the binary's stdin.
    pub struct Transcript {
        /// The temporary directory. When this is dropped, the directory and its contents are removed.
        #[allow(dead_code)]
        pub temp_dir: TempDir,
        pub path: PathBuf,
    }

    impl Transcript {
        pub fn path(&self) -> &Path {
            &self.path
        }
    }

    /// Writes `lines` newline-separated, the way `tsc` prints them.
    pub fn write_transcript(name: &str, lines: &[&str]) -> IoResult<Transcript> {
        let mut contents = lines.join("\n");
        contents.push('\n');
        write_raw_transcript(name, contents.as_bytes())
    }

    /// Writes `bytes` verbatim, for inputs without a trailing newline or with
    /// invalid UTF-8.
    pub fn write_raw_transcript(name: &str, bytes: &[u8]) -> IoResult<Transcript> {
        let temp_dir = tempdir()?;
        let path = temp_dir.path().join(format!("{}.log", name));
        fs::write(&path, bytes)?;
        Ok(Transcript { temp_dir, path })
    }
}
