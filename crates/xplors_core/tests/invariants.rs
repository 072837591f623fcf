mod common;

use common::*;
use xplors_core::{
    update, validate, AnalysisKind, AppState, Artifact, Effect, ErrorKind, Msg, PhaseView,
    StageSchedule,
};

fn artifact_for(kind: AnalysisKind) -> Artifact {
    match kind {
        AnalysisKind::Spreadsheet => spreadsheet(),
        AnalysisKind::Merchandising => photo(),
    }
}

/// Runs one upload whose response arrives after `respond_after` ticks.
fn run(
    kind: AnalysisKind,
    respond_after: usize,
    outcome: Result<(), ErrorKind>,
) -> (AppState, Vec<u8>) {
    let (state, _, generation) = submit(kind, artifact_for(kind));
    let mut percents = vec![state.view().progress.unwrap().percent];

    let (state, frames, _) = tick_n(state, generation, respond_after);
    percents.extend(frames.iter().map(|frame| frame.percent));

    let result = outcome.map(|()| spreadsheet_result());
    let (state, _) = update(state, Msg::UploadFinished { generation, result });
    let (state, frames, _) = tick_n(state, generation, 300);
    percents.extend(frames.iter().map(|frame| frame.percent));
    (state, percents)
}

#[test]
fn successful_runs_climb_monotonically_to_100() {
    init_logging();
    for kind in [AnalysisKind::Spreadsheet, AnalysisKind::Merchandising] {
        let first_target = StageSchedule::for_kind(kind).stages()[0].target;
        for respond_after in (0..80).step_by(3) {
            let (state, percents) = run(kind, respond_after, Ok(()));

            assert!(
                percents.windows(2).all(|pair| pair[0] <= pair[1]),
                "{kind} after {respond_after}: {percents:?}"
            );
            assert!(percents[0] <= first_target);
            assert_eq!(percents.last(), Some(&100));
            assert_eq!(percents.iter().filter(|p| **p == 100).count(), 1);
            assert_eq!(state.view().phase, PhaseView::Result);
        }
    }
}

#[test]
fn failed_runs_never_show_100() {
    init_logging();
    for kind in [AnalysisKind::Spreadsheet, AnalysisKind::Merchandising] {
        for error in [
            ErrorKind::QuotaExceeded,
            ErrorKind::BadArtifact,
            ErrorKind::Transient,
            ErrorKind::SignedOut,
        ] {
            for respond_after in (0..120).step_by(7) {
                let (state, percents) = run(kind, respond_after, Err(error));
                assert!(!percents.contains(&100), "{kind} {error:?} after {respond_after}");
                assert_eq!(state.view().error, Some(error));
            }
        }
    }
}

#[test]
fn narration_never_passes_the_network_stage_without_a_response() {
    init_logging();
    for kind in [AnalysisKind::Spreadsheet, AnalysisKind::Merchandising] {
        let schedule = StageSchedule::for_kind(kind);
        let gate = schedule.stages()[schedule.network_stage()].target;
        let (state, _, generation) = submit(kind, artifact_for(kind));
        let (_, frames, _) = tick_n(state, generation, 1_000);
        assert!(frames.iter().all(|frame| frame.percent <= gate));
        assert_eq!(frames.last().unwrap().percent, gate);
    }
}

/// Deterministic message soup; checks that no upload starts while one is in flight.
#[test]
fn uploads_are_single_flight() {
    init_logging();
    let mut seed: u64 = 0x5eed;
    let mut next = move || {
        seed = seed.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
        (seed >> 33) as usize
    };

    let mut state = AppState::new();
    let mut starts = 0;
    for _ in 0..5_000 {
        let generation = state.active_generation().unwrap_or(0);
        let msg = match next() % 9 {
            0 => Msg::ArtifactSelected(spreadsheet()),
            1 | 2 => Msg::SubmitClicked,
            3 => Msg::ResetClicked,
            4 => Msg::UploadFinished {
                generation,
                result: Ok(spreadsheet_result()),
            },
            5 => Msg::UploadFinished {
                generation,
                result: Err(ErrorKind::Transient),
            },
            6 => Msg::KindSelected(if next() % 2 == 0 {
                AnalysisKind::Spreadsheet
            } else {
                AnalysisKind::Merchandising
            }),
            _ => Msg::ProgressTick { generation },
        };

        let was_uploading = state.is_uploading();
        let (next_state, effects) = update(state, msg);
        let started = effects
            .iter()
            .filter(|effect| matches!(effect, Effect::StartUpload { .. }))
            .count();
        assert!(started <= 1);
        if started == 1 {
            assert!(!was_uploading, "UPLOADING -> UPLOADING");
            starts += 1;
        }
        if next_state.view().phase == PhaseView::Uploading {
            assert!(next_state.view().result.is_none());
        }
        state = next_state;
    }
    assert!(starts > 0);
}

#[test]
fn validate_is_pure() {
    init_logging();
    let artifacts = [
        None,
        Some(spreadsheet()),
        Some(photo()),
        Some(artifact("a.csv", "text/csv", 11 * MIB)),
        Some(artifact("a.xls", "application/vnd.ms-excel", 0)),
        Some(artifact("a.bin", "application/octet-stream", 1)),
    ];
    for artifact in &artifacts {
        for kind in [AnalysisKind::Spreadsheet, AnalysisKind::Merchandising] {
            let first = validate(artifact.as_ref(), kind);
            let second = validate(artifact.as_ref(), kind);
            assert_eq!(first, second);
        }
    }
}

#[test]
fn reset_is_idempotent_in_every_phase() {
    init_logging();
    let idle = AppState::new();
    let (selected, _) = update(AppState::new(), Msg::ArtifactSelected(spreadsheet()));
    let (uploading, _, generation) = submit(AnalysisKind::Spreadsheet, spreadsheet());
    let (failed, _) = update(
        uploading.clone(),
        Msg::UploadFinished {
            generation,
            result: Err(ErrorKind::Transient),
        },
    );
    let finished = finish_ok(uploading.clone(), generation, spreadsheet_result());
    let (finished, _, _) = tick_n(finished, generation, 300);
    assert_eq!(finished.view().phase, PhaseView::Result);

    for state in [idle, selected, uploading, failed, finished] {
        let (once, _) = update(state, Msg::ResetClicked);
        let (twice, effects) = update(once.clone(), Msg::ResetClicked);
        assert_eq!(once, twice);
        assert!(effects.is_empty());

        let view = once.view();
        assert_eq!(view.phase, PhaseView::Idle);
        assert!(view.artifact.is_none());
        assert!(view.progress.is_none());
        assert!(view.result.is_none());
    }
}

#[test]
fn reset_during_upload_stops_the_ticker_and_drops_the_late_response() {
    init_logging();
    let (state, _, generation) = submit(AnalysisKind::Spreadsheet, spreadsheet());
    let (state, effects) = update(state, Msg::ResetClicked);
    assert_eq!(effects, vec![Effect::StopProgressTicker { generation }]);

    let (mut state, effects) = update(
        state,
        Msg::UploadFinished {
            generation,
            result: Ok(spreadsheet_result()),
        },
    );
    assert!(effects.is_empty());
    assert_eq!(state.view().phase, PhaseView::Idle);
    state.consume_dirty();

    // A new upload ignores ticks addressed to the abandoned one.
    let (state, _) = update(state, Msg::ArtifactSelected(spreadsheet()));
    let (state, _) = update(state, Msg::SubmitClicked);
    assert_eq!(state.active_generation(), Some(generation + 1));
    let before = state.view();
    let (state, effects) = update(state, Msg::ProgressTick { generation });
    assert!(effects.is_empty());
    assert_eq!(state.view(), before);
}

#[test]
fn switching_kind_abandons_the_upload() {
    init_logging();
    let (state, _, generation) = submit(AnalysisKind::Spreadsheet, spreadsheet());
    let (state, effects) = update(state, Msg::KindSelected(AnalysisKind::Merchandising));

    assert_eq!(effects, vec![Effect::StopProgressTicker { generation }]);
    assert_eq!(state.kind(), AnalysisKind::Merchandising);
    assert_eq!(state.view().phase, PhaseView::Idle);
    assert!(state.artifact().is_none());
}

#[test]
fn selection_is_locked_while_uploading() {
    init_logging();
    let (state, _, _) = submit(AnalysisKind::Spreadsheet, spreadsheet());
    let before = state.clone();
    let (state, effects) = update(state, Msg::ArtifactSelected(artifact("x.csv", "text/csv", 5)));
    assert!(effects.is_empty());
    assert_eq!(state, before);
    assert!(!state.view().can_select);
}
