use parking_lot::Mutex;
use std::fmt;
use std::fmt::{Debug, Formatter};
use std::io;
use std::io::Write;

type Stream = Box<dyn Write + Send>;

/// The always-on channel used by `vm_printf`.
/// Until a stream is configured it writes to the standard output.
pub struct VmOutput {
    stream: Mutex<Option<Stream>>,
}

impl VmOutput {
    pub fn new() -> Self {
        Self {
            stream: Mutex::new(None),
        }
    }

    pub fn is_configured(&self) -> bool {
        self.stream.lock().is_some()
    }

    /// Flush the current stream and make `stream` the new target.
    /// `None` falls back to the standard output on the next write.
    pub fn replace(&self, stream: Option<Stream>) {
        let mut current = self.stream.lock();
        flush_stream(current.as_mut());
        *current = stream;
    }

    /// Write formatted text, returning the amount of written bytes
    pub fn printf(&self, arguments: fmt::Arguments<'_>) -> io::Result<usize> {
        let text = fmt::format(arguments);
        let mut current = self.stream.lock();
        let stream = current.get_or_insert_with(|| Box::new(io::stdout()));
        stream.write_all(text.as_bytes())?;
        Ok(text.len())
    }

    pub fn flush(&self) -> io::Result<()> {
        match self.stream.lock().as_mut() {
            Some(stream) => stream.flush(),
            None => io::stdout().flush(),
        }
    }
}

impl Default for VmOutput {
    fn default() -> Self {
        Self::new()
    }
}

impl Debug for VmOutput {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VmOutput")
            .field("configured", &self.is_configured())
            .finish()
    }
}

fn flush_stream(stream: Option<&mut Stream>) {
    let result = match stream {
        Some(stream) => stream.flush(),
        None => io::stdout().flush(),
    };
    if let Err(error) = result {
        debug!("Failed to flush the vm output stream: {}", error);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::BufWriter;
    use std::sync::Arc;

    #[derive(Debug, Clone, Default)]
    struct SharedBuffer(Arc<Mutex<Vec<u8>>>);

    impl SharedBuffer {
        fn contents(&self) -> String {
            String::from_utf8(self.0.lock().clone()).unwrap()
        }
    }

    impl Write for SharedBuffer {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn printf_returns_written_bytes() {
        let buffer = SharedBuffer::default();
        let output = VmOutput::new();
        output.replace(Some(Box::new(buffer.clone())));

        assert_eq!(output.printf(format_args!("{} + {} = {}", 2, 2, 4)).unwrap(), 9);
        assert_eq!(buffer.contents(), "2 + 2 = 4");
    }

    #[test]
    fn previous_stream_is_flushed_before_replacement() {
        let first = SharedBuffer::default();
        let second = SharedBuffer::default();
        let output = VmOutput::new();

        output.replace(Some(Box::new(BufWriter::new(first.clone()))));
        output.printf(format_args!("hello")).unwrap();
        assert_eq!(first.contents(), "");

        output.replace(Some(Box::new(second.clone())));
        assert_eq!(first.contents(), "hello");

        output.printf(format_args!("world")).unwrap();
        assert_eq!(first.contents(), "hello");
        assert_eq!(second.contents(), "world");
    }

    #[test]
    fn unconfigured_output_defaults_to_stdout() {
        let output = VmOutput::new();
        assert!(!output.is_configured());
        output.printf(format_args!("")).unwrap();
        assert!(output.is_configured());

        output.replace(None);
        assert!(!output.is_configured());
    }
}
