use std::io::{self, BufRead, Write};

use crate::prompt::ShellPrompt;

/// Reads one line per call into a fixed-capacity buffer that is reused
/// across reads.
///
/// At most `capacity - 1` bytes are taken per call. A longer line is split:
/// the rest comes back from the next call as its own line.
pub struct InputHandler<R> {
    input: R,
    prompt: Option<ShellPrompt>,
    capacity: usize,
    buf: Vec<u8>,
}

impl<R: BufRead> InputHandler<R> {
    pub fn new(input: R, capacity: usize, prompt: Option<ShellPrompt>) -> Self {
        InputHandler {
            input,
            prompt,
            capacity,
            buf: Vec::with_capacity(capacity),
        }
    }

    /// Prompts on `out` when interactive, then reads a line with its trailing
    /// newline stripped. Bytes are returned as read. `Ok(None)` means end of
    /// input.
    pub fn read_line<W: Write>(&mut self, out: &mut W) -> io::Result<Option<&[u8]>> {
        if let Some(prompt) = &self.prompt {
            prompt.show_prompt(out)?;
        }

        let limit = self.capacity.saturating_sub(1).max(1);
        self.buf.clear();
        while self.buf.len() < limit {
            let available = match self.input.fill_buf() {
                Ok(available) => available,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e),
            };
            if available.is_empty() {
                break;
            }

            let room = limit - self.buf.len();
            let window = &available[..available.len().min(room)];
            match window.iter().position(|&b| b == b'\n') {
                Some(pos) => {
                    self.buf.extend_from_slice(&window[..=pos]);
                    self.input.consume(pos + 1);
                    break;
                }
                None => {
                    let n = window.len();
                    self.buf.extend_from_slice(window);
                    self.input.consume(n);
                }
            }
        }

        if self.buf.is_empty() {
            return Ok(None);
        }
        if self.buf.last() == Some(&b'\n') {
            self.buf.pop();
        } else if self.buf.len() >= limit {
            log::warn!("line longer than {} bytes, remainder is read as the next line", limit);
        }

        log::debug!("buff: {}", String::from_utf8_lossy(&self.buf));
        Ok(Some(&self.buf))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::io::Cursor;

    fn read_bytes(input: &[u8], capacity: usize) -> Vec<Vec<u8>> {
        let mut reader = InputHandler::new(Cursor::new(input.to_vec()), capacity, None);
        let mut out = Vec::new();
        let mut lines = Vec::new();
        while let Some(line) = reader.read_line(&mut out).unwrap() {
            lines.push(line.to_vec());
        }
        assert!(out.is_empty());
        lines
    }

    fn read_all(input: &str, capacity: usize) -> Vec<String> {
        read_bytes(input.as_bytes(), capacity)
            .into_iter()
            .map(|line| String::from_utf8(line).unwrap())
            .collect()
    }

    #[test]
    fn test_strips_newline() {
        assert_eq!(read_all("ls -l\ncd /tmp\n", 1024), vec!["ls -l", "cd /tmp"]);
    }

    #[test]
    fn test_last_line_without_newline() {
        assert_eq!(read_all("ls\npwd", 1024), vec!["ls", "pwd"]);
    }

    #[test]
    fn test_empty_lines_are_lines() {
        assert_eq!(read_all("\n\nls\n", 1024), vec!["", "", "ls"]);
    }

    #[test]
    fn test_end_of_input() {
        assert!(read_all("", 1024).is_empty());
    }

    #[test]
    fn test_long_line_is_split() {
        // capacity 8 takes 7 bytes per read
        assert_eq!(read_all("abcdefghij\nk\n", 8), vec!["abcdefg", "hij", "k"]);
    }

    #[test]
    fn test_line_filling_buffer_leaves_newline_for_next_read() {
        assert_eq!(read_all("abcdefg\nx\n", 8), vec!["abcdefg", "", "x"]);
    }

    #[test]
    fn test_carriage_return_kept() {
        assert_eq!(read_all("ls\r\n", 1024), vec!["ls\r"]);
    }

    #[test]
    fn test_non_utf8_bytes_kept() {
        assert_eq!(
            read_bytes(b"/bin/echo \xff\xfe\n", 1024),
            vec![b"/bin/echo \xff\xfe".to_vec()]
        );
    }

    #[test]
    fn test_multibyte_char_split_at_limit_is_not_replaced() {
        // "é" is two bytes; capacity 4 takes 3 bytes per read
        let input = "ab\u{e9}\n".as_bytes();
        let lines = read_bytes(input, 4);
        assert_eq!(lines, vec![b"ab\xc3".to_vec(), b"\xa9".to_vec()]);
        assert_eq!(lines.concat(), &input[..input.len() - 1]);
    }

    #[test]
    fn test_prompt_only_when_interactive() {
        let prompt = ShellPrompt::with_identity("user".into(), None);
        let mut reader = InputHandler::new(Cursor::new(b"ls\n".to_vec()), 1024, Some(prompt));

        let mut out = Vec::new();
        assert_eq!(reader.read_line(&mut out).unwrap(), Some(&b"ls"[..]));
        assert!(String::from_utf8(out).unwrap().ends_with(": user$ "));

        let mut out = Vec::new();
        assert_eq!(reader.read_line(&mut out).unwrap(), None);
        assert!(!out.is_empty());
    }
}
