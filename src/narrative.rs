// Red message cards for the acknowledgement, teaser and acceptance stages.

use bevy::prelude::*;

use crate::assets::ProposalAssets;
use crate::stages::Stage;
use crate::transition::{FadeIn, view_root};

pub struct NarrativePlugin;

impl Plugin for NarrativePlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            OnEnter(Stage::Acknowledgement),
            |commands: Commands, assets: Res<ProposalAssets>| {
                spawn_card(
                    commands,
                    &assets,
                    Stage::Acknowledgement,
                    "Congratulations! You have completed the game.",
                    1.0,
                )
            },
        )
        .add_systems(
            OnEnter(Stage::Teaser),
            |commands: Commands, assets: Res<ProposalAssets>| {
                spawn_card(
                    commands,
                    &assets,
                    Stage::Teaser,
                    "I have a surprise for you!",
                    3.0,
                )
            },
        )
        .add_systems(OnEnter(Stage::Accepted), spawn_accepted);
    }
}

pub const CARD_RED: Color = Color::srgb(0.86, 0.15, 0.15);

#[derive(Component)]
pub struct MessageCard;

fn card_text(assets: &ProposalAssets, message: &str) -> impl Bundle + use<> {
    (
        Text::new(message),
        TextFont {
            font: assets.serif.clone(),
            font_size: 36.0,
            ..default()
        },
        TextColor(Color::WHITE),
    )
}

fn spawn_red_card(
    commands: &mut Commands,
    stage: Stage,
    fade_secs: f32,
    contents: impl FnOnce(&mut ChildSpawnerCommands),
) {
    commands
        .spawn(view_root(stage, FadeIn::new(fade_secs)))
        .with_children(|parent| {
            parent
                .spawn((
                    MessageCard,
                    Node {
                        flex_direction: FlexDirection::Column,
                        align_items: AlignItems::Center,
                        padding: UiRect::all(Val::Px(32.0)),
                        row_gap: Val::Px(16.0),
                        ..default()
                    },
                    BackgroundColor(CARD_RED),
                ))
                .with_children(contents);
        });
}

fn spawn_card(
    mut commands: Commands,
    assets: &ProposalAssets,
    stage: Stage,
    message: &str,
    fade_secs: f32,
) {
    spawn_red_card(&mut commands, stage, fade_secs, |card| {
        card.spawn(card_text(assets, message));
    });
}

fn spawn_accepted(mut commands: Commands, assets: Res<ProposalAssets>) {
    spawn_red_card(&mut commands, Stage::Accepted, 1.0, |card| {
        card.spawn(card_text(&assets, "Thank you for accepting, I love you! 💕"));
        card.spawn((
            ImageNode::new(assets.jumping.clone()),
            Node {
                width: Val::Px(200.0),
                height: Val::Px(200.0),
                ..default()
            },
        ));
    });
}
