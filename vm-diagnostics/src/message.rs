use std::fmt;
use std::fmt::Write;

/// Size of the buffer a log message is formatted into, terminator included.
pub const MAX_MESSAGE_SIZE: usize = 250;

/// Format `arguments` into at most `buffer_size - 1` bytes.
/// Longer output is cut at the last character boundary that fits; truncation is not an error.
pub fn format_bounded(buffer_size: usize, arguments: fmt::Arguments<'_>) -> String {
    let mut message = BoundedMessage::new(buffer_size);
    // an error only means the buffer is full
    let _ = message.write_fmt(arguments);
    message.into_string()
}

#[derive(Debug)]
struct BoundedMessage {
    buffer: String,
    capacity: usize,
    full: bool,
}

impl BoundedMessage {
    fn new(buffer_size: usize) -> Self {
        let capacity = buffer_size.saturating_sub(1);
        Self {
            buffer: String::with_capacity(capacity),
            capacity,
            full: false,
        }
    }

    fn into_string(self) -> String {
        self.buffer
    }
}

impl Write for BoundedMessage {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        // once cut, nothing more may be appended, even pieces that would fit
        if self.full {
            return Err(fmt::Error);
        }
        let remaining = self.capacity - self.buffer.len();
        if s.len() <= remaining {
            self.buffer.push_str(s);
            return Ok(());
        }

        let mut end = remaining;
        while !s.is_char_boundary(end) {
            end -= 1;
        }
        self.buffer.push_str(&s[..end]);
        self.full = true;
        // stop the formatting machinery, nothing else fits
        Err(fmt::Error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_message_is_kept() {
        assert_eq!(
            format_bounded(MAX_MESSAGE_SIZE, format_args!("hello {}", 5)),
            "hello 5"
        );
    }

    #[test]
    fn long_message_is_truncated() {
        let long = "x".repeat(1000);
        let message = format_bounded(MAX_MESSAGE_SIZE, format_args!("{}{}", long, "tail"));
        assert_eq!(message.len(), MAX_MESSAGE_SIZE - 1);
        assert!(message.chars().all(|each| each == 'x'));
    }

    #[test]
    fn exact_fit() {
        let text = "y".repeat(MAX_MESSAGE_SIZE - 1);
        assert_eq!(format_bounded(MAX_MESSAGE_SIZE, format_args!("{}", text)), text);
    }

    #[test]
    fn truncation_respects_character_boundaries() {
        // 'é' takes two bytes, a 4 byte buffer fits "aé" but not "aéé"
        let message = format_bounded(5, format_args!("aéé"));
        assert_eq!(message, "aé");

        let message = format_bounded(4, format_args!("aéé"));
        assert_eq!(message, "aé");

        let message = format_bounded(3, format_args!("aéé"));
        assert_eq!(message, "a");
    }

    #[test]
    fn nothing_is_appended_after_truncation() {
        struct Careless;
        impl fmt::Display for Careless {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                // 'é' does not fit, which leaves one free byte behind
                let _ = f.write_str("0123456é");
                let _ = f.write_str("a");
                f.write_str("b")
            }
        }

        let message = format_bounded(9, format_args!("{}", Careless));
        assert_eq!(message, "0123456");
    }

    #[test]
    fn zero_sized_buffer_produces_empty_message() {
        assert_eq!(format_bounded(0, format_args!("anything")), "");
    }
}
