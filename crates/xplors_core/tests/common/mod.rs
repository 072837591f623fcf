#![allow(dead_code)]

use std::sync::Once;

use xplors_core::{
    update, AnalysisKind, AnalysisResult, AppState, Artifact, Effect, Generation, Msg,
    ProgressFrame,
};

pub const XLSX: &str = "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";
pub const MIB: usize = 1024 * 1024;

pub fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(xplors_logging::initialize_for_tests);
}

pub fn artifact(name: &str, media_type: &str, len: usize) -> Artifact {
    Artifact::new(name, media_type, vec![7u8; len])
}

pub fn spreadsheet() -> Artifact {
    artifact("sales.xlsx", XLSX, 2 * MIB)
}

pub fn photo() -> Artifact {
    artifact("stand.jpg", "image/jpeg", 3 * MIB)
}

/// Selects an artifact and submits it, returning the generation of the new upload.
pub fn submit(kind: AnalysisKind, artifact: Artifact) -> (AppState, Vec<Effect>, Generation) {
    let state = AppState::with_kind(kind);
    let (state, _) = update(state, Msg::ArtifactSelected(artifact));
    let (state, effects) = update(state, Msg::SubmitClicked);
    let generation = state.active_generation().expect("upload started");
    (state, effects, generation)
}

/// Sends `count` ticks, collecting every visible frame and effect.
pub fn tick_n(
    mut state: AppState,
    generation: Generation,
    count: usize,
) -> (AppState, Vec<ProgressFrame>, Vec<Effect>) {
    let mut frames = Vec::new();
    let mut effects = Vec::new();
    for _ in 0..count {
        let (next, more) = update(state, Msg::ProgressTick { generation });
        state = next;
        effects.extend(more);
        if let Some(frame) = state.view().progress {
            frames.push(frame);
        }
    }
    (state, frames, effects)
}

pub fn finish_ok(state: AppState, generation: Generation, result: AnalysisResult) -> AppState {
    let (state, effects) = update(
        state,
        Msg::UploadFinished {
            generation,
            result: Ok(result),
        },
    );
    assert!(effects.is_empty());
    state
}

pub fn spreadsheet_result() -> AnalysisResult {
    AnalysisResult {
        cost_usd: Some(0.0123),
        total_lines: Some(1234),
        pdf_url: Some("https://storage.example.com/r.pdf".to_string()),
        analysis_type: Some("vendas".to_string()),
        ..AnalysisResult::default()
    }
}
