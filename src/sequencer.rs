// Stage sequencing: timed advancement, acceptance, and mount teardown.

use std::time::Duration;

use bevy::prelude::*;
use strum::IntoEnumIterator;

use crate::stages::{Celebration, Stage, ViewState};

pub struct SequencerPlugin;

impl Plugin for SequencerPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<SequencerConfig>()
            .init_resource::<Celebration>()
            .add_systems(OnEnter(ViewState::Mounted), reset_celebration)
            .add_systems(OnExit(ViewState::Mounted), disarm_timer)
            .add_systems(
                Update,
                (
                    advance_stage
                        .run_if(in_state(ViewState::Mounted))
                        .run_if(resource_exists::<StageTimer>),
                    log_stage.run_if(state_changed::<Stage>),
                    toggle_mount,
                ),
            );

        // Each timed stage arms its own timer on entry and drops it on exit.
        for stage in Stage::iter().filter(|stage| stage.is_timed()) {
            app.add_systems(
                OnEnter(stage),
                move |mut commands: Commands, config: Res<SequencerConfig>| {
                    arm_timer(&mut commands, stage, &config)
                },
            )
            .add_systems(OnExit(stage), disarm_timer);
        }
    }
}

const STAGE_DELAY: Duration = Duration::from_secs(5);

#[derive(Resource, Debug, Clone)]
pub struct SequencerConfig {
    /// How long each timed stage stays on screen.
    pub delay: Duration,
}

impl Default for SequencerConfig {
    fn default() -> Self {
        SequencerConfig { delay: STAGE_DELAY }
    }
}

/// One-shot timer owned by the stage that armed it.
#[derive(Resource, Debug)]
pub struct StageTimer {
    stage: Stage,
    timer: Timer,
}

fn arm_timer(commands: &mut Commands, stage: Stage, config: &SequencerConfig) {
    commands.insert_resource(StageTimer {
        stage,
        timer: Timer::new(config.delay, TimerMode::Once),
    });
}

fn disarm_timer(mut commands: Commands) {
    commands.remove_resource::<StageTimer>();
}

fn reset_celebration(mut commands: Commands) {
    commands.insert_resource(Celebration::default());
}

fn advance_stage(
    time: Res<Time>,
    stage: Res<State<Stage>>,
    mut timer: ResMut<StageTimer>,
    mut next_stage: ResMut<NextState<Stage>>,
) {
    // A timer left over from a stage we already left must never fire.
    if timer.stage != *stage.get() {
        return;
    }
    if !timer.timer.tick(time.delta()).just_finished() {
        return;
    }
    if let Some(next) = timer.stage.next() {
        next_stage.set(next);
    }
}

/// Moves from the prompt straight to the acceptance message and starts the
/// celebration. Returns false, changing nothing, outside the prompt.
pub fn accept_proposal(
    current: Stage,
    celebration: &mut Celebration,
    next_stage: &mut NextState<Stage>,
) -> bool {
    if current != Stage::Prompt {
        warn!("ignoring acceptance during {current:?}");
        return false;
    }
    next_stage.set(Stage::Accepted);
    if celebration.activate() {
        info!("proposal accepted, starting celebration");
    }
    true
}

fn log_stage(stage: Option<Res<State<Stage>>>) {
    let Some(stage) = stage else {
        return;
    };
    info!("stage {} ({:?})", stage.get().index(), stage.get());
}

fn toggle_mount(
    keys: Res<ButtonInput<KeyCode>>,
    view: Res<State<ViewState>>,
    mut next_view: ResMut<NextState<ViewState>>,
) {
    if !keys.just_pressed(KeyCode::Escape) {
        return;
    }
    let next = match view.get() {
        ViewState::Mounted => ViewState::Unmounted,
        ViewState::Unmounted => ViewState::Mounted,
    };
    info!("view {next:?}");
    next_view.set(next);
}
