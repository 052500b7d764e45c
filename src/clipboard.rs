use crate::error::ClipboardError;

pub const COPY_ACKNOWLEDGMENT: &str = "Copied to clipboard";

pub trait ClipboardSink {
    fn set_text(&mut self, text: &str) -> Result<(), ClipboardError>;
}

/// The desktop clipboard.
pub struct SystemClipboard {
    inner: arboard::Clipboard,
}

impl SystemClipboard {
    pub fn open() -> Result<Self, ClipboardError> {
        let inner =
            arboard::Clipboard::new().map_err(|e| ClipboardError::Unavailable(e.to_string()))?;
        Ok(Self { inner })
    }
}

impl ClipboardSink for SystemClipboard {
    fn set_text(&mut self, text: &str) -> Result<(), ClipboardError> {
        self.inner
            .set_text(text.to_string())
            .map_err(|e| ClipboardError::Write(e.to_string()))
    }
}

/// Places a synthesized command on the clipboard and returns the
/// acknowledgment to flash to the user.
pub fn copy_command(sink: &mut impl ClipboardSink, command: &str) -> Result<&'static str, ClipboardError> {
    sink.set_text(command)?;
    tracing::info!(bytes = command.len(), "command copied to clipboard");
    Ok(COPY_ACKNOWLEDGMENT)
}
