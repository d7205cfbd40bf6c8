use axum::{extract::rejection::JsonRejection, extract::State, Json};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use std::sync::Arc;

use crate::{
    domain::{
        history::history_url,
        tts::{
            PreviewRequest, PreviewResponse, SynthesisRequest, SynthesizeResponse, TtsService,
            TtsServiceApi,
        },
    },
    error::AppResult,
};

pub struct SpeechController {
    tts_service: Arc<TtsService>,
}

impl SpeechController {
    pub fn new(tts_service: Arc<TtsService>) -> Self {
        Self { tts_service }
    }

    /// POST /preview-voice - Short demo of a voice, returned inline as base64
    pub async fn preview_voice(
        State(controller): State<Arc<SpeechController>>,
        payload: Result<Json<PreviewRequest>, JsonRejection>,
    ) -> AppResult<Json<PreviewResponse>> {
        let Json(request) = payload?;

        let artifact = controller.tts_service.preview(request).await?;

        Ok(Json(PreviewResponse {
            audio_content: STANDARD.encode(&artifact.audio_data),
            audio_format: artifact.format,
        }))
    }

    /// POST /synthesize - Synthesize text and store the result in the history
    pub async fn synthesize(
        State(controller): State<Arc<SpeechController>>,
        payload: Result<Json<SynthesisRequest>, JsonRejection>,
    ) -> AppResult<Json<SynthesizeResponse>> {
        let Json(request) = payload?;

        let filename = controller.tts_service.synthesize(request).await?;

        Ok(Json(SynthesizeResponse {
            audio_url: history_url(&filename),
        }))
    }
}
