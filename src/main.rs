// Main
mod assets;
mod card;
mod celebration;
mod evader;
mod narrative;
mod prompt;
mod sequencer;
mod stages;
mod transition;

#[cfg(test)]
mod testing;

use bevy::log::LogPlugin;
use bevy::prelude::*;
use assets::AssetsPlugin;
use card::CardPlugin;
use celebration::CelebrationPlugin;
use evader::EvaderPlugin;
use narrative::NarrativePlugin;
use prompt::PromptPlugin;
use sequencer::SequencerPlugin;
use stages::{ProposalRng, Stage, ViewState};
use transition::TransitionPlugin;

const BACKGROUND: Color = Color::srgb(1.0, 0.95, 0.95);

fn main() {
    App::new()
        .add_plugins(
            DefaultPlugins
                .set(WindowPlugin {
                    primary_window: Some(Window {
                        title: "Will you be my Valentine?".into(),
                        ..default()
                    }),
                    ..default()
                })
                .set(LogPlugin {
                    filter: "wgpu=error,naga=warn,valentine=debug".into(),
                    ..default()
                }),
        )
        .insert_resource(ClearColor(BACKGROUND))
        .insert_resource(ProposalRng::from_os())
        .init_state::<ViewState>()
        .add_sub_state::<Stage>()
        .add_systems(Startup, spawn_camera)
        .add_plugins((
            AssetsPlugin,
            SequencerPlugin,
            NarrativePlugin,
            PromptPlugin,
            EvaderPlugin,
            CardPlugin,
            CelebrationPlugin,
            TransitionPlugin,
        ))
        .run();
}

fn spawn_camera(mut commands: Commands) {
    commands.spawn(Camera2d);
}
