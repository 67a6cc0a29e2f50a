pub mod audio;
pub mod common;
pub mod session;
pub mod tools;

pub use audio::{AudioFormat, DEFAULT_TRANSCRIPTION_MODEL, InputAudioTranscription, TurnDetection};
pub use common::{DEFAULT_MODEL, DEFAULT_VOICE, JsonSchema, Modality, Temperature, TemperatureError};
pub use session::{MAX_RESPONSE_OUTPUT_TOKENS, SessionCreateRequest, SessionUpdateRequest};
pub use tools::{Tool, ToolChoice};
