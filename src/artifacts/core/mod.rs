//! Output plumbing shared by the commands

use minus::Pager;
use std::io::{self, Write};

/// `Write` adapter feeding the `minus` pager used for `log` and `global-log`
///
/// The pager only accepts `&str`. A multi-byte character split across two
/// writes is held back until the rest of it arrives.
pub struct PagerWriter {
    pager: Pager,
    pending: Vec<u8>,
}

impl PagerWriter {
    pub fn new(pager: Pager) -> Self {
        PagerWriter {
            pager,
            pending: Vec::new(),
        }
    }
}

/// Split `bytes` into its longest valid UTF-8 prefix and an incomplete tail
///
/// Bytes that can never become valid UTF-8 are an error.
fn split_utf8(bytes: &[u8]) -> io::Result<(&str, &[u8])> {
    match std::str::from_utf8(bytes) {
        Ok(text) => Ok((text, &[])),
        Err(e) if e.error_len().is_none() => {
            let (valid, tail) = bytes.split_at(e.valid_up_to());
            // the prefix was just validated
            let valid = std::str::from_utf8(valid)
                .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
            Ok((valid, tail))
        }
        Err(e) => Err(io::Error::new(io::ErrorKind::InvalidData, e)),
    }
}

impl Write for PagerWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.pending.extend_from_slice(buf);

        let (text, tail) = split_utf8(&self.pending)?;
        self.pager.push_str(text).map_err(io::Error::other)?;
        self.pending = tail.to_vec();

        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        if self.pending.is_empty() {
            return Ok(());
        }

        let text = String::from_utf8_lossy(&self.pending).into_owned();
        self.pending.clear();
        self.pager.push_str(text).map_err(io::Error::other)
    }
}
