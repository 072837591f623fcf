use std::process::ExitCode;
use std::sync::Arc;

use anyhow::Context;
use xplors_core::{update, AnalysisKind, AppState, Generation, Msg, PhaseView};
use xplors_engine::{ApiSettings, EngineHandle, IdentityProvider, StaticIdentity};
use xplors_logging::{xplors_debug, xplors_info, xplors_warn};

use super::artifact::{infer_kind, load_artifact};
use super::cli::Cli;
use super::effects::EffectRunner;
use super::render::{status_line, TerminalRenderer};

pub fn run_app(cli: Cli) -> anyhow::Result<ExitCode> {
    let mut settings = ApiSettings::from_env().context("reading API settings")?;
    if let Some(api_base) = &cli.api_base {
        settings
            .set_api_base(api_base)
            .context("parsing --api-base")?;
    }
    xplors_info!("Analysis service at {}", settings.api_base());

    let identity: Arc<dyn IdentityProvider> = match &cli.user_id {
        Some(id) => Arc::new(StaticIdentity::signed_in(id.clone(), cli.user_email.clone())),
        None => Arc::new(StaticIdentity::signed_out()),
    };
    let engine = EngineHandle::new(settings, identity).context("starting engine")?;

    let artifact = cli.file.as_deref().map(load_artifact).transpose()?;
    let kind = cli
        .kind
        .map(AnalysisKind::from)
        .or_else(|| artifact.as_ref().map(infer_kind))
        .unwrap_or_default();

    let mut session = Session::new(AppState::with_kind(kind), EffectRunner::new(engine));
    if let Some(artifact) = artifact {
        session.dispatch(Msg::ArtifactSelected(artifact));
    }
    if let Some(context) = cli.context {
        session.dispatch(Msg::ContextChanged(context));
    }
    session.dispatch(Msg::SubmitClicked);

    while session.state.is_uploading() {
        let Some(msg) = session.effects.next_msg() else {
            xplors_warn!("Engine stopped while an upload was in flight");
            break;
        };
        session.dispatch(msg);
    }

    let view = session.state.view();
    println!("{}", status_line(&view));
    Ok(match view.phase {
        PhaseView::Result => ExitCode::SUCCESS,
        _ => ExitCode::FAILURE,
    })
}

struct Session {
    state: AppState,
    effects: EffectRunner,
    renderer: TerminalRenderer,
}

impl Session {
    fn new(state: AppState, effects: EffectRunner) -> Self {
        Self {
            state,
            effects,
            renderer: TerminalRenderer::new(),
        }
    }

    fn dispatch(&mut self, msg: Msg) {
        if let Some(generation) = msg_generation(&msg) {
            if self.state.active_generation() != Some(generation) {
                xplors_debug!("Dropping stale message for generation {}", generation);
            }
        }

        let state = std::mem::take(&mut self.state);
        let (mut state, effects) = update(state, msg);
        let was_dirty = state.consume_dirty();
        self.state = state;

        self.effects.run(effects);
        if was_dirty {
            self.renderer.render(&self.state.view());
        }
    }
}

fn msg_generation(msg: &Msg) -> Option<Generation> {
    match msg {
        Msg::ProgressTick { generation } | Msg::UploadFinished { generation, .. } => {
            Some(*generation)
        }
        _ => None,
    }
}
