//! Voice capture port.
//!
//! voxcart consumes only the final transcript of a recording. Capture
//! backends implement [`VoiceCapture`]; [`ScriptedCapture`] is the
//! deterministic implementation used by tests and the CLI demo.

use async_trait::async_trait;
use serde::Serialize;

/// Example voice commands shown to users.
pub const VOICE_TIPS: &[&str] = &[
    "Show me iPhone 15 Pro",
    "Find running shoes under $100",
    "Search for Samsung TVs",
    "Looking for headphones by Sony",
    "Show me kitchen appliances",
];

/// Errors a capture backend can report.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CaptureError {
    /// The user or platform refused microphone access.
    #[error("microphone permission denied")]
    PermissionDenied,

    /// The backend was never initialised (missing credentials, failed warmup).
    #[error("voice capture not initialized")]
    NotInitialized,

    /// `stop` was called without a recording in progress.
    #[error("no recording in progress")]
    NotRecording,

    /// Any other backend failure.
    #[error("capture backend error: {0}")]
    Backend(String),
}

/// Final text of one recording.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Transcript(String);

impl Transcript {
    pub fn new(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    pub fn text(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

/// A source of spoken queries.
#[async_trait]
pub trait VoiceCapture: Send {
    /// Begin recording.
    async fn start(&mut self) -> Result<(), CaptureError>;

    /// Stop recording and return the final transcript.
    async fn stop(&mut self) -> Result<Transcript, CaptureError>;

    /// Whether a recording is in progress.
    fn is_recording(&self) -> bool;
}

/// Run one full start/stop cycle and return the transcript.
///
/// # Errors
///
/// Returns whichever [`CaptureError`] the backend reports first.
pub async fn record_once(capture: &mut dyn VoiceCapture) -> Result<Transcript, CaptureError> {
    capture.start().await?;
    capture.stop().await
}

/// Deterministic capture backend that replays a fixed list of transcripts
/// in order, wrapping around at the end.
#[derive(Debug, Clone)]
pub struct ScriptedCapture {
    transcripts: Vec<String>,
    next: usize,
    recording: bool,
    start_error: Option<CaptureError>,
}

impl ScriptedCapture {
    /// Replay `transcripts` in order.
    pub fn new<I, S>(transcripts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            transcripts: transcripts.into_iter().map(Into::into).collect(),
            next: 0,
            recording: false,
            start_error: None,
        }
    }

    /// A backend whose `start` always fails with
    /// [`CaptureError::PermissionDenied`].
    pub fn denied() -> Self {
        Self {
            start_error: Some(CaptureError::PermissionDenied),
            ..Self::default()
        }
    }

    /// A backend whose `start` always fails with
    /// [`CaptureError::NotInitialized`].
    pub fn uninitialized() -> Self {
        Self {
            start_error: Some(CaptureError::NotInitialized),
            ..Self::default()
        }
    }
}

impl Default for ScriptedCapture {
    /// Replays [`VOICE_TIPS`] lower-cased, as a recogniser would produce them.
    fn default() -> Self {
        Self::new(VOICE_TIPS.iter().map(|t| t.to_lowercase()))
    }
}

#[async_trait]
impl VoiceCapture for ScriptedCapture {
    async fn start(&mut self) -> Result<(), CaptureError> {
        if let Some(ref err) = self.start_error {
            return Err(err.clone());
        }
        tracing::debug!("scripted capture started");
        self.recording = true;
        Ok(())
    }

    async fn stop(&mut self) -> Result<Transcript, CaptureError> {
        if !self.recording {
            return Err(CaptureError::NotRecording);
        }
        self.recording = false;

        if self.transcripts.is_empty() {
            return Err(CaptureError::Backend("no transcripts scripted".into()));
        }
        let text = self.transcripts[self.next % self.transcripts.len()].clone();
        self.next += 1;
        tracing::debug!(chars = text.len(), "scripted capture stopped");
        Ok(Transcript::new(text))
    }

    fn is_recording(&self) -> bool {
        self.recording
    }
}
