use std::path::{Path, PathBuf};

pub const CRASH_DUMP_FILE_NAME: &str = "crash.dmp";

/// Append the crash dump file name to a path that already ends with a separator
pub fn append_crash_dump_filename(buffer: &mut String) {
    buffer.push_str(CRASH_DUMP_FILE_NAME);
}

pub fn crash_dump_path(directory: impl AsRef<Path>) -> PathBuf {
    directory.as_ref().join(CRASH_DUMP_FILE_NAME)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn append_to_directory_path() {
        let mut buffer = String::from("/home/pharo/images/");
        append_crash_dump_filename(&mut buffer);
        assert_eq!(buffer, "/home/pharo/images/crash.dmp");
    }

    #[test]
    fn append_is_literal() {
        let mut buffer = String::new();
        append_crash_dump_filename(&mut buffer);
        append_crash_dump_filename(&mut buffer);
        assert_eq!(buffer, "crash.dmpcrash.dmp");
    }

    #[test]
    fn join_directory() {
        assert_eq!(
            crash_dump_path("images"),
            Path::new("images").join("crash.dmp")
        );
    }
}
