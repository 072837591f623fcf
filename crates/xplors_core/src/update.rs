use crate::effect::UploadRequest;
use crate::toast::{ToastLevel, TOAST_LIFETIME};
use crate::{validate, AnalysisKind, AnalysisResult, AppState, Effect, ErrorKind, Generation, Msg, Phase};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::KindSelected(kind) => {
            if kind == state.kind() {
                return (state, Vec::new());
            }
            // Switching flows abandons whatever is in flight; its late events are dropped.
            let effects = stop_ticker(&state);
            state.clear();
            state.set_kind(kind);
            state.mark_dirty();
            effects
        }
        Msg::ArtifactSelected(artifact) => {
            if state.is_uploading() {
                return (state, Vec::new());
            }
            state.set_artifact(artifact);
            state.set_phase(Phase::Idle);
            state.mark_dirty();
            Vec::new()
        }
        Msg::ContextChanged(context) => {
            if state.is_uploading() || context == state.context() {
                return (state, Vec::new());
            }
            state.set_context(context);
            state.mark_dirty();
            Vec::new()
        }
        Msg::SubmitClicked => submit(&mut state),
        Msg::ResetClicked => {
            let effects = stop_ticker(&state);
            if state.clear() {
                state.mark_dirty();
            }
            effects
        }
        Msg::ProgressTick { generation } => tick(&mut state, generation),
        Msg::UploadFinished { generation, result } => {
            if state.upload_mut(generation).is_none() {
                return (state, Vec::new());
            }
            match result {
                Ok(result) => {
                    if let Some(upload) = state.upload_mut(generation) {
                        upload.outcome = Some(result);
                    }
                    Vec::new()
                }
                Err(error) => {
                    // The driver is abandoned where it stands; it never reaches 100.
                    state.set_phase(Phase::Failed(error));
                    state.mark_dirty();
                    let mut effects = vec![Effect::StopProgressTicker { generation }];
                    effects.push(toast(&mut state, ToastLevel::Error, error.to_string()));
                    effects
                }
            }
        }
        Msg::ToastExpired(id) | Msg::ToastDismissed(id) => {
            if state.remove_toast(id) {
                state.mark_dirty();
            }
            Vec::new()
        }
        Msg::NoOp => Vec::new(),
    };

    (state, effects)
}

fn submit(state: &mut AppState) -> Vec<Effect> {
    match state.phase() {
        Phase::Uploading(_) | Phase::Result(_) => return Vec::new(),
        Phase::Idle | Phase::Failed(_) => {}
    }

    if let Err(err) = validate(state.artifact(), state.kind()) {
        let error = ErrorKind::from(err);
        state.set_phase(Phase::Failed(error));
        state.mark_dirty();
        return vec![toast(state, ToastLevel::Error, error.to_string())];
    }
    let Some(artifact) = state.artifact().cloned() else {
        return Vec::new();
    };

    let kind = state.kind();
    let context = match kind {
        AnalysisKind::Merchandising => Some(state.context().trim())
            .filter(|text| !text.is_empty())
            .map(ToOwned::to_owned),
        AnalysisKind::Spreadsheet => None,
    };
    let (generation, cadence) = state.begin_upload();
    state.mark_dirty();

    vec![
        Effect::StartProgressTicker {
            generation,
            cadence,
        },
        Effect::StartUpload {
            generation,
            request: UploadRequest {
                kind,
                artifact,
                context,
            },
        },
    ]
}

fn tick(state: &mut AppState, generation: Generation) -> Vec<Effect> {
    let Some(upload) = state.upload_mut(generation) else {
        return Vec::new();
    };

    // The 100% frame stays up for one tick before the result replaces it.
    if upload.driver.is_complete() {
        let kind = upload.kind;
        return match upload.outcome.take() {
            Some(result) => finish(state, generation, kind, result),
            None => Vec::new(),
        };
    }

    let driver = &mut upload.driver;
    let mut changed = driver.tick();
    let released = !driver.awaits_network() || upload.outcome.is_some();
    if driver.is_settled() && driver.dwell_elapsed() && released {
        changed |= driver.advance();
    }
    if changed {
        state.mark_dirty();
    }
    Vec::new()
}

fn finish(
    state: &mut AppState,
    generation: Generation,
    kind: AnalysisKind,
    result: AnalysisResult,
) -> Vec<Effect> {
    let quota_alert = result.quota_alert();
    state.complete_upload(result);
    state.mark_dirty();

    let mut effects = vec![Effect::StopProgressTicker { generation }];
    let message = match kind {
        AnalysisKind::Spreadsheet => "Analysis complete! PDF report generated.",
        AnalysisKind::Merchandising => "Stand analysed! Review the suggestions.",
    };
    effects.push(toast(state, ToastLevel::Success, message));
    if let Some(percent) = quota_alert {
        effects.push(toast(
            state,
            ToastLevel::Warning,
            format!("You are at {percent:.1}% of your monthly limit"),
        ));
    }
    effects
}

fn stop_ticker(state: &AppState) -> Vec<Effect> {
    state
        .active_generation()
        .map(|generation| Effect::StopProgressTicker { generation })
        .into_iter()
        .collect()
}

fn toast(state: &mut AppState, level: ToastLevel, message: impl Into<String>) -> Effect {
    let id = state.push_toast(level, message);
    state.mark_dirty();
    Effect::ScheduleToastExpiry {
        id,
        after: TOAST_LIFETIME,
    }
}
