//! OSC 52 clipboard writer.
//!
//! Copies text to the system clipboard by emitting an OSC 52 escape
//! sequence on the terminal's writer. Works over SSH and inside tmux/GNU
//! screen (via DCS passthrough wrapping). Write failures are reported to
//! the caller, which logs and moves on — the clipboard is best-effort.

use std::env;
use std::io::Write;

use base64::{engine::general_purpose::STANDARD, Engine as _};
use thiserror::Error;

/// Common OSC 52 size limit (base64 payload bytes).
const MAX_OSC52_PAYLOAD: usize = 74_994;

/// DCS passthrough mode for multiplexer environments.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Passthrough {
    /// Direct terminal access.
    None,
    /// tmux: `ESC P tmux; <ESC-doubled seq> ESC \`.
    Tmux,
    /// GNU screen: `ESC P <seq> ESC \`.
    Screen,
}

#[derive(Debug, Error)]
pub enum ClipboardError {
    #[error("clipboard payload too large ({size} > {limit} base64 bytes)")]
    PayloadTooLarge { size: usize, limit: usize },
    #[error("clipboard write failed: {0}")]
    Write(#[from] std::io::Error),
}

/// Best-effort terminal clipboard.
#[derive(Clone, Copy, Debug)]
pub struct Clipboard {
    passthrough: Passthrough,
}

impl Clipboard {
    /// Detect the multiplexer environment from `TMUX`/`TERM`.
    pub fn detect() -> Self {
        let passthrough = if env::var_os("TMUX").is_some() {
            Passthrough::Tmux
        } else if env::var("TERM").map_or(false, |t| t.starts_with("screen")) {
            Passthrough::Screen
        } else {
            Passthrough::None
        };
        Self { passthrough }
    }

    #[cfg(test)]
    fn direct() -> Self {
        Self {
            passthrough: Passthrough::None,
        }
    }

    /// Place `text` on the system clipboard via OSC 52.
    pub fn copy(&self, text: &str, writer: &mut impl Write) -> Result<(), ClipboardError> {
        let encoded = STANDARD.encode(text.as_bytes());
        if encoded.len() > MAX_OSC52_PAYLOAD {
            return Err(ClipboardError::PayloadTooLarge {
                size: encoded.len(),
                limit: MAX_OSC52_PAYLOAD,
            });
        }
        let seq = format!("\x1b]52;c;{encoded}\x07");
        match self.passthrough {
            Passthrough::None => writer.write_all(seq.as_bytes())?,
            Passthrough::Tmux => {
                // tmux requires ESC bytes doubled inside the passthrough
                // payload (needs `allow-passthrough` in tmux 3.3+).
                writer.write_all(b"\x1bPtmux;")?;
                for &byte in seq.as_bytes() {
                    if byte == 0x1b {
                        writer.write_all(b"\x1b\x1b")?;
                    } else {
                        writer.write_all(&[byte])?;
                    }
                }
                writer.write_all(b"\x1b\\")?;
            }
            Passthrough::Screen => {
                writer.write_all(b"\x1bP")?;
                writer.write_all(seq.as_bytes())?;
                writer.write_all(b"\x1b\\")?;
            }
        }
        writer.flush()?;
        Ok(())
    }
}

// ── Tests ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn with_passthrough(passthrough: Passthrough) -> Clipboard {
        Clipboard { passthrough }
    }

    #[test]
    fn test_copy_writes_osc52_sequence() {
        let mut out = Vec::new();
        with_passthrough(Passthrough::None)
            .copy("hi", &mut out)
            .unwrap();
        let expected = format!("\x1b]52;c;{}\x07", STANDARD.encode("hi"));
        assert_eq!(String::from_utf8(out).unwrap(), expected);
    }

    #[test]
    fn test_payload_round_trips_through_base64() {
        let mut out = Vec::new();
        with_passthrough(Passthrough::None)
            .copy("_not_eq_all", &mut out)
            .unwrap();
        let output = String::from_utf8(out).unwrap();
        let payload = output
            .strip_prefix("\x1b]52;c;")
            .unwrap()
            .strip_suffix('\x07')
            .unwrap();
        assert_eq!(STANDARD.decode(payload).unwrap(), b"_not_eq_all");
    }

    #[test]
    fn test_tmux_passthrough_wraps_and_doubles_esc() {
        let mut out = Vec::new();
        with_passthrough(Passthrough::Tmux)
            .copy("hi", &mut out)
            .unwrap();
        let encoded = STANDARD.encode("hi");
        let mut expected = Vec::new();
        expected.extend_from_slice(b"\x1bPtmux;");
        expected.extend_from_slice(b"\x1b\x1b");
        expected.extend_from_slice(format!("]52;c;{encoded}\x07").as_bytes());
        expected.extend_from_slice(b"\x1b\\");
        assert_eq!(out, expected);
    }

    #[test]
    fn test_screen_passthrough_wraps() {
        let mut out = Vec::new();
        with_passthrough(Passthrough::Screen)
            .copy("hi", &mut out)
            .unwrap();
        assert!(out.starts_with(b"\x1bP\x1b]52;c;"));
        assert!(out.ends_with(b"\x1b\\"));
    }

    #[test]
    fn test_size_limit_enforced() {
        let mut out = Vec::new();
        // base64 expands by ~4/3, so 60K raw exceeds the payload limit.
        let big = "x".repeat(60_000);
        let err = Clipboard::direct().copy(&big, &mut out).unwrap_err();
        assert!(matches!(err, ClipboardError::PayloadTooLarge { .. }));
        assert!(out.is_empty());
    }

    #[test]
    fn test_empty_payload_is_valid() {
        let mut out = Vec::new();
        Clipboard::direct().copy("", &mut out).unwrap();
        assert_eq!(out, b"\x1b]52;c;\x07");
    }
}
