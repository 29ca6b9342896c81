//! src/source/serial.rs
//!
//! Line-oriented serial reader: each line carries one or more numbers, one
//! per channel, separated by whitespace, commas, semicolons, `=` or `:`.
//!
//! Example accepted lines:
//! ```text
//! 1013.2
//! 1013.2, 18.5, 42
//! PRESSURE: 1013.2 hPa
//! ```
//!
//! Bytes that are not valid UTF-8 (line noise, a wrong baud rate) are
//! replaced and treated as separators rather than ending the stream.

use std::io::{BufRead, BufReader, ErrorKind};
use std::time::Duration;

use tracing::{info, warn};

use super::SampleSource;
use crate::error::SourceError;

/// Extract every finite number on a line, in order.
pub fn parse_sample_line(line: &str) -> Vec<f64> {
    line.split(|c: char| {
        c.is_whitespace() || matches!(c, ',' | ';' | '=' | ':' | char::REPLACEMENT_CHARACTER)
    })
        .filter(|tok| !tok.is_empty())
        .filter_map(|tok| tok.parse::<f64>().ok())
        .filter(|v| v.is_finite())
        .collect()
}

pub struct SerialSource {
    name: String,
    baud_rate: u32,
    reader: Box<dyn BufRead + Send>,
    line: Vec<u8>,
}

impl SerialSource {
    /// Open `port_name` at `baud_rate`.
    pub fn open(port_name: &str, baud_rate: u32) -> Result<Self, SourceError> {
        info!(port = port_name, baud_rate, "opening serial port");
        let port = serialport::new(port_name, baud_rate)
            .timeout(Duration::from_secs(10))
            .open()?;
        Ok(Self::from_reader(port_name, baud_rate, BufReader::new(port)))
    }

    /// Read lines from an already opened byte stream.
    pub fn from_reader<R>(name: &str, baud_rate: u32, reader: R) -> Self
    where
        R: BufRead + Send + 'static,
    {
        Self {
            name: name.to_string(),
            baud_rate,
            reader: Box::new(reader),
            line: Vec::new(),
        }
    }
}

impl SampleSource for SerialSource {
    fn next_frame(&mut self) -> Result<Vec<f64>, SourceError> {
        self.line.clear();
        match self.reader.read_until(b'\n', &mut self.line) {
            Ok(0) => Err(SourceError::Closed),
            Ok(_) => {
                let text = String::from_utf8_lossy(&self.line);
                let trimmed = text.trim();
                if trimmed.is_empty() {
                    return Ok(Vec::new());
                }
                let frame = parse_sample_line(trimmed);
                if frame.is_empty() {
                    warn!(line = trimmed, "no samples on line");
                }
                Ok(frame)
            }
            Err(e) if matches!(e.kind(), ErrorKind::TimedOut | ErrorKind::Interrupted) => {
                Ok(Vec::new())
            }
            Err(e) => Err(e.into()),
        }
    }

    fn describe(&self) -> String {
        format!("{} @ {} baud", self.name, self.baud_rate)
    }
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::*;

    fn scripted(bytes: &'static [u8]) -> SerialSource {
        SerialSource::from_reader("test", 9600, Cursor::new(bytes))
    }

    #[test]
    fn parses_single_value() {
        assert_eq!(parse_sample_line("1013.25"), vec![1013.25]);
    }

    #[test]
    fn parses_separated_channels() {
        assert_eq!(parse_sample_line("1, -2.5;3e2"), vec![1.0, -2.5, 300.0]);
    }

    #[test]
    fn skips_labels_and_units() {
        assert_eq!(parse_sample_line("PRESSURE: 1013.2 hPa"), vec![1013.2]);
        assert_eq!(parse_sample_line("t=12 p=3"), vec![12.0, 3.0]);
    }

    #[test]
    fn drops_non_finite_tokens() {
        assert_eq!(parse_sample_line("NaN inf 4"), vec![4.0]);
        assert!(parse_sample_line("hello").is_empty());
    }

    #[test]
    fn invalid_utf8_does_not_end_the_stream() {
        let mut src = scripted(b"\xff\xfe12.5\n3, 4\n");
        assert_eq!(src.next_frame().unwrap(), vec![12.5]);
        assert_eq!(src.next_frame().unwrap(), vec![3.0, 4.0]);
        assert!(matches!(src.next_frame(), Err(SourceError::Closed)));
    }

    #[test]
    fn blank_and_unparsable_lines_yield_empty_frames() {
        let mut src = scripted(b"\r\n\xc3\n7");
        assert!(src.next_frame().unwrap().is_empty());
        assert!(src.next_frame().unwrap().is_empty());
        // last line without a terminator still counts
        assert_eq!(src.next_frame().unwrap(), vec![7.0]);
        assert!(matches!(src.next_frame(), Err(SourceError::Closed)));
        assert_eq!(src.describe(), "test @ 9600 baud");
    }
}
