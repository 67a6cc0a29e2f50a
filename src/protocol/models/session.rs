use serde::Serialize;

use super::{
    AudioFormat, DEFAULT_MODEL, DEFAULT_VOICE, InputAudioTranscription, Modality, Temperature, Tool,
    ToolChoice, TurnDetection,
};

/// Response-token ceiling applied to every session the gateway creates.
pub const MAX_RESPONSE_OUTPUT_TOKENS: u32 = 4096;

/// Body of `POST /realtime/sessions`.
///
/// Borrows the agent-specific parts from a long-lived agent configuration; the
/// transport parameters are fixed.
#[derive(Debug, Clone, Serialize)]
pub struct SessionCreateRequest<'a> {
    pub model: &'static str,
    pub voice: &'static str,
    pub instructions: &'a str,
    pub tools: &'a [Tool],
    pub tool_choice: &'a ToolChoice,
    pub temperature: Temperature,
    pub max_response_output_tokens: u32,
    pub modalities: Vec<Modality>,
    pub input_audio_format: AudioFormat,
    pub output_audio_format: AudioFormat,
    pub input_audio_transcription: InputAudioTranscription,
    pub turn_detection: TurnDetection,
}

impl<'a> SessionCreateRequest<'a> {
    #[must_use]
    pub fn new(
        instructions: &'a str,
        tools: &'a [Tool],
        tool_choice: &'a ToolChoice,
        temperature: Temperature,
    ) -> Self {
        Self {
            model: DEFAULT_MODEL,
            voice: DEFAULT_VOICE,
            instructions,
            tools,
            tool_choice,
            temperature,
            max_response_output_tokens: MAX_RESPONSE_OUTPUT_TOKENS,
            modalities: vec![Modality::Text, Modality::Audio],
            input_audio_format: AudioFormat::Pcm16,
            output_audio_format: AudioFormat::Pcm16,
            input_audio_transcription: InputAudioTranscription::default(),
            turn_detection: TurnDetection::server_vad_default(),
        }
    }

}

/// Body of `PATCH /realtime/sessions/{id}`: only the agent-specific behaviour
/// changes, transport parameters stay as created.
#[derive(Debug, Clone, Serialize)]
pub struct SessionUpdateRequest<'a> {
    pub instructions: &'a str,
    pub tools: &'a [Tool],
    pub tool_choice: &'a ToolChoice,
    pub temperature: Temperature,
}
