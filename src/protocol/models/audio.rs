use serde::{Deserialize, Serialize};

/// Audio codecs accepted by the session endpoint. The voice client only
/// speaks 16-bit PCM.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum AudioFormat {
    /// 16-bit PCM, 24kHz mono, little-endian.
    Pcm16,
}

pub const DEFAULT_TRANSCRIPTION_MODEL: &str = "whisper-1";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct InputAudioTranscription {
    pub model: String,
}

impl Default for InputAudioTranscription {
    fn default() -> Self {
        Self {
            model: DEFAULT_TRANSCRIPTION_MODEL.to_string(),
        }
    }
}

const VAD_THRESHOLD: f64 = 0.5;
const VAD_PREFIX_PADDING_MS: u32 = 300;
const VAD_SILENCE_DURATION_MS: u32 = 500;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TurnDetection {
    ServerVad {
        #[serde(skip_serializing_if = "Option::is_none")]
        threshold: Option<f64>,
        #[serde(skip_serializing_if = "Option::is_none")]
        prefix_padding_ms: Option<u32>,
        #[serde(skip_serializing_if = "Option::is_none")]
        silence_duration_ms: Option<u32>,
    },
}

impl TurnDetection {
    /// Server-side VAD with the thresholds the voice client is tuned for.
    #[must_use]
    pub const fn server_vad_default() -> Self {
        Self::ServerVad {
            threshold: Some(VAD_THRESHOLD),
            prefix_padding_ms: Some(VAD_PREFIX_PADDING_MS),
            silence_duration_ms: Some(VAD_SILENCE_DURATION_MS),
        }
    }
}
