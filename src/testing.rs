// Headless app harness with a hand-driven clock.

use std::time::Duration;

use bevy::prelude::*;
use bevy::state::app::StatesPlugin;

use crate::assets::ProposalAssets;
use crate::stages::{ProposalRng, Stage, ViewState};
use crate::{
    card::CardPlugin, celebration::CelebrationPlugin, evader::EvaderPlugin,
    narrative::NarrativePlugin, prompt::PromptPlugin, sequencer::SequencerPlugin,
    transition::TransitionPlugin,
};

pub fn proposal_app() -> App {
    let mut app = App::new();
    app.add_plugins(StatesPlugin)
        .init_resource::<Time>()
        .init_resource::<ButtonInput<KeyCode>>()
        .insert_resource(ProposalAssets::placeholder())
        .insert_resource(ProposalRng::seeded(0x5eed))
        .init_state::<ViewState>()
        .add_sub_state::<Stage>()
        .add_plugins((
            SequencerPlugin,
            NarrativePlugin,
            PromptPlugin,
            EvaderPlugin,
            CardPlugin,
            CelebrationPlugin,
            TransitionPlugin,
        ));
    app.update();
    app
}

/// Lets `secs` pass in a single frame, then runs one more frame so any
/// requested stage change is applied.
pub fn wait(app: &mut App, secs: f32) {
    app.world_mut()
        .resource_mut::<Time>()
        .advance_by(Duration::from_secs_f32(secs));
    app.update();
    app.world_mut()
        .resource_mut::<Time>()
        .advance_by(Duration::ZERO);
    app.update();
}

pub fn current_stage(app: &App) -> Option<Stage> {
    app.world()
        .get_resource::<State<Stage>>()
        .map(|stage| *stage.get())
}

pub fn single<M: Component>(app: &mut App) -> Entity {
    let mut query = app.world_mut().query_filtered::<Entity, With<M>>();
    query
        .single(app.world())
        .expect("exactly one marked entity")
}

pub fn interact<M: Component>(app: &mut App, interaction: Interaction) {
    let entity = single::<M>(app);
    if let Some(mut current) = app.world_mut().get_mut::<Interaction>(entity) {
        *current = interaction;
    }
    app.update();
}

/// Presses the button carrying marker `M` and lets the resulting stage
/// change apply.
pub fn press<M: Component>(app: &mut App) {
    interact::<M>(app, Interaction::Pressed);
    app.update();
}
