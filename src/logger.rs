use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Echoes every message to stdout and appends it to the log file. The
/// file is opened and closed on each call; an empty path disables the
/// file sink entirely.
pub struct Logger {
    file: PathBuf,
}

impl Logger {
    pub fn new(file: &Path) -> Self {
        Logger {
            file: file.to_path_buf(),
        }
    }

    pub fn log(&self, message: &str) -> std::io::Result<()> {
        println!("{}", message);
        if self.file.as_os_str().is_empty() {
            return Ok(());
        }
        let mut out = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.file)?;
        writeln!(out, "{}", message)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn appends_one_line_per_call() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("run.log");
        let logger = Logger::new(&path);
        logger.log("first").unwrap();
        logger.log("second").unwrap();
        let text = fs::read_to_string(&path).unwrap();
        assert_eq!(text, "first\nsecond\n");
    }

    #[test]
    fn empty_path_skips_the_file_sink() {
        let logger = Logger::new(Path::new(""));
        logger.log("stdout only").unwrap();
    }
}
