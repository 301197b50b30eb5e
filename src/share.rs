//! # Clipboard and Share
//!
//! Best-effort copy and share. The outcome is reported to the user through
//! the [`NotificationCenter`]; failures are logged and never propagate as
//! fatal errors.
//!
//! ## Copy Path
//!
//! 1. The primary backend: a system clipboard command (`wl-copy`, `xclip`,
//!    `pbcopy` or `clip.exe`), when one is installed.
//! 2. The textual fallback: an OSC 52 escape sequence written to the
//!    terminal, which most terminal emulators turn into a clipboard write.

use crate::notify::{NotificationCenter, NotificationKind};
use base64::Engine;
use std::io::Write;
use std::process::{Command, Stdio};
use std::sync::OnceLock;
use std::time::Instant;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ShareError {
    #[error("clipboard unavailable: {0}")]
    ClipboardUnavailable(String),

    #[error("share rejected: {0}")]
    ShareRejected(String),
}

pub trait ClipboardBackend {
    fn name(&self) -> &str;

    fn write_text(&mut self, text: &str) -> Result<(), ShareError>;
}

/// Platform share sheet.
pub trait ShareTarget {
    fn share(&mut self, payload: &SharePayload) -> Result<(), ShareError>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SharePayload {
    pub title: String,
    pub text: String,
    pub url: String,
}

/// Clipboard commands to try, in order, with their arguments.
const CLIPBOARD_COMMANDS: &[(&str, &[&str])] = &[
    ("wl-copy", &[]),
    ("xclip", &["-selection", "clipboard"]),
    ("pbcopy", &[]),
    ("clip.exe", &[]),
];

/// Cache for the clipboard command lookup (checked once per process)
static CLIPBOARD_COMMAND: OnceLock<Option<(&'static str, &'static [&'static str])>> =
    OnceLock::new();

fn is_command_available(program: &str) -> bool {
    Command::new("which")
        .arg(program)
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .map(|status| status.success())
        .unwrap_or(false)
}

/// Pipes text into a system clipboard command.
#[derive(Debug, Clone)]
pub struct CommandClipboard {
    program: &'static str,
    args: &'static [&'static str],
}

impl CommandClipboard {
    /// The first installed clipboard command, if any.
    pub fn detect() -> Option<Self> {
        let found = CLIPBOARD_COMMAND.get_or_init(|| {
            CLIPBOARD_COMMANDS
                .iter()
                .find(|(program, _)| is_command_available(program))
                .copied()
        });
        found.map(|(program, args)| Self { program, args })
    }
}

impl ClipboardBackend for CommandClipboard {
    fn name(&self) -> &str {
        self.program
    }

    fn write_text(&mut self, text: &str) -> Result<(), ShareError> {
        let unavailable = |e: std::io::Error| {
            ShareError::ClipboardUnavailable(format!("{}: {}", self.program, e))
        };

        let mut child = Command::new(self.program)
            .args(self.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .map_err(unavailable)?;

        if let Some(mut stdin) = child.stdin.take() {
            stdin.write_all(text.as_bytes()).map_err(unavailable)?;
        }

        let status = child.wait().map_err(unavailable)?;
        if status.success() {
            Ok(())
        } else {
            Err(ShareError::ClipboardUnavailable(format!(
                "{} exited with {}",
                self.program, status
            )))
        }
    }
}

/// Writes an OSC 52 clipboard sequence to a terminal.
pub struct Osc52Clipboard<W: Write> {
    out: W,
}

impl<W: Write> Osc52Clipboard<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

/// The OSC 52 "set clipboard" sequence for `text`.
pub fn osc52_sequence(text: &str) -> String {
    let encoded = base64::engine::general_purpose::STANDARD.encode(text.as_bytes());
    format!("\x1b]52;c;{}\x07", encoded)
}

impl<W: Write> ClipboardBackend for Osc52Clipboard<W> {
    fn name(&self) -> &str {
        "osc52"
    }

    fn write_text(&mut self, text: &str) -> Result<(), ShareError> {
        let unavailable = |e: std::io::Error| ShareError::ClipboardUnavailable(e.to_string());
        self.out
            .write_all(osc52_sequence(text).as_bytes())
            .map_err(unavailable)?;
        self.out.flush().map_err(unavailable)
    }
}

/// Primary clipboard with a textual fallback.
pub struct Clipboard {
    primary: Option<Box<dyn ClipboardBackend>>,
    fallback: Option<Box<dyn ClipboardBackend>>,
}

impl Clipboard {
    pub fn new(
        primary: Option<Box<dyn ClipboardBackend>>,
        fallback: Option<Box<dyn ClipboardBackend>>,
    ) -> Self {
        Self { primary, fallback }
    }

    /// System command if installed, OSC 52 on stdout otherwise.
    pub fn system() -> Self {
        let primary = CommandClipboard::detect()
            .map(|c| Box::new(c) as Box<dyn ClipboardBackend>);
        Self::new(
            primary,
            Some(Box::new(Osc52Clipboard::new(std::io::stdout()))),
        )
    }

    /// Clipboard with no backends; every copy fails.
    pub fn unavailable() -> Self {
        Self::new(None, None)
    }

    /// Copy with the primary backend, falling back only when it is absent.
    /// A primary that is present but rejects the write is a failure.
    pub fn write_text(&mut self, text: &str) -> Result<(), ShareError> {
        match (self.primary.as_mut(), self.fallback.as_mut()) {
            (Some(primary), _) => primary.write_text(text),
            (None, Some(fallback)) => fallback.write_text(text),
            (None, None) => Err(ShareError::ClipboardUnavailable(
                "no clipboard backend".to_string(),
            )),
        }
    }
}

/// Copy `text` and report the outcome as a notification.
pub fn copy_to_clipboard(
    clipboard: &mut Clipboard,
    text: &str,
    notifications: &mut NotificationCenter,
    now: Instant,
) -> Result<(), ShareError> {
    match clipboard.write_text(text) {
        Ok(()) => {
            notifications.notify("Copied to clipboard!", NotificationKind::Success, now);
            Ok(())
        }
        Err(e) => {
            log::error!("Failed to copy: {}", e);
            notifications.notify("Failed to copy", NotificationKind::Error, now);
            Err(e)
        }
    }
}

/// Share through `target` when there is one; otherwise copy the link.
pub fn share_content(
    target: Option<&mut (dyn ShareTarget + 'static)>,
    clipboard: &mut Clipboard,
    payload: &SharePayload,
    notifications: &mut NotificationCenter,
    now: Instant,
) -> Result<(), ShareError> {
    match target {
        Some(target) => match target.share(payload) {
            Ok(()) => {
                notifications.notify("Shared successfully!", NotificationKind::Success, now);
                Ok(())
            }
            Err(e) => {
                // A dismissed share sheet is not worth a notification.
                log::error!("Error sharing: {}", e);
                Err(e)
            }
        },
        None => {
            copy_to_clipboard(clipboard, &payload.url, notifications, now)?;
            notifications.notify("Link copied to clipboard!", NotificationKind::Success, now);
            Ok(())
        }
    }
}
