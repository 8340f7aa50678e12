// The question itself: memory backdrop, accept button and the evasive decline.

use bevy::prelude::*;

use crate::assets::{MEMORY_COUNT, ProposalAssets};
use crate::evader::Evader;
use crate::sequencer::accept_proposal;
use crate::stages::{Celebration, Stage};
use crate::transition::{BaseAlpha, FadeIn, view_root};

pub struct PromptPlugin;

impl Plugin for PromptPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(OnEnter(Stage::Prompt), setup_prompt)
            .add_systems(Update, button_visuals)
            .add_systems(Update, accept_pressed.run_if(in_state(Stage::Prompt)));
    }
}

const BACKDROP_COLUMNS: u16 = 6;
const BACKDROP_ALPHA: f32 = 0.1;
const HEADING_COLOR: Color = Color::srgb(0.12, 0.16, 0.22);

const ACCEPT_PALETTE: ButtonPalette = ButtonPalette {
    normal: Color::srgb(0.93, 0.28, 0.6),
    hovered: Color::srgb(0.86, 0.15, 0.47),
    pressed: Color::srgb(0.75, 0.09, 0.36),
};
const DECLINE_PALETTE: ButtonPalette = ButtonPalette {
    normal: Color::srgb(0.42, 0.45, 0.5),
    hovered: Color::srgb(0.29, 0.33, 0.39),
    pressed: Color::srgb(0.22, 0.25, 0.32),
};

/// Container the decline button is positioned against once it starts dodging.
#[derive(Component)]
pub struct PromptRoot;

#[derive(Component)]
pub struct AcceptButton;

#[derive(Component, Clone, Copy)]
pub struct ButtonPalette {
    normal: Color,
    hovered: Color,
    pressed: Color,
}

fn setup_prompt(mut commands: Commands, assets: Res<ProposalAssets>) {
    commands
        .spawn((PromptRoot, view_root(Stage::Prompt, FadeIn::new(3.0))))
        .with_children(|parent| {
            // Memory photos tiled faintly behind everything else.
            parent
                .spawn(Node {
                    position_type: PositionType::Absolute,
                    width: Val::Percent(100.0),
                    height: Val::Percent(100.0),
                    display: Display::Grid,
                    grid_template_columns: RepeatedGridTrack::flex(BACKDROP_COLUMNS, 1.0),
                    grid_template_rows: RepeatedGridTrack::flex(
                        MEMORY_COUNT as u16 / BACKDROP_COLUMNS,
                        1.0,
                    ),
                    ..default()
                })
                .with_children(|grid| {
                    for memory in &assets.memories {
                        grid.spawn((
                            ImageNode::new(memory.clone()),
                            BaseAlpha(BACKDROP_ALPHA),
                            Node {
                                width: Val::Percent(100.0),
                                height: Val::Percent(100.0),
                                ..default()
                            },
                        ));
                    }
                });

            parent.spawn((
                Text::new("Will you be my Valentine?"),
                TextFont {
                    font: assets.serif.clone(),
                    font_size: 48.0,
                    ..default()
                },
                TextColor(HEADING_COLOR),
                Node {
                    margin: UiRect::bottom(Val::Px(32.0)),
                    ..default()
                },
            ));

            parent.spawn((
                ImageNode::new(assets.sad.clone()),
                Node {
                    width: Val::Px(200.0),
                    height: Val::Px(200.0),
                    ..default()
                },
            ));

            parent
                .spawn(Node {
                    column_gap: Val::Px(16.0),
                    margin: UiRect::top(Val::Px(40.0)),
                    ..default()
                })
                .with_children(|row| {
                    spawn_button(row, &assets, "Yes, I will! 🥰", ACCEPT_PALETTE, AcceptButton);
                    spawn_button(row, &assets, "No, I won't 😢", DECLINE_PALETTE, Evader);
                });
        });
}

fn spawn_button(
    parent: &mut ChildSpawnerCommands,
    assets: &ProposalAssets,
    label: &str,
    palette: ButtonPalette,
    marker: impl Component,
) {
    parent
        .spawn((
            marker,
            Button,
            palette,
            Node {
                padding: UiRect::axes(Val::Px(24.0), Val::Px(8.0)),
                justify_content: JustifyContent::Center,
                align_items: AlignItems::Center,
                ..default()
            },
            BackgroundColor(palette.normal),
        ))
        .with_children(|btn| {
            btn.spawn((
                Text::new(label),
                TextFont {
                    font: assets.serif.clone(),
                    font_size: 20.0,
                    ..default()
                },
                TextColor(Color::WHITE),
            ));
        });
}

fn button_visuals(
    mut query: Query<
        (&Interaction, &ButtonPalette, &mut BackgroundColor),
        Changed<Interaction>,
    >,
) {
    for (interaction, palette, mut bg) in &mut query {
        let color = match *interaction {
            Interaction::Pressed => palette.pressed,
            Interaction::Hovered => palette.hovered,
            Interaction::None => palette.normal,
        };
        // Keep whatever opacity the fade-in has reached.
        *bg = color.with_alpha(bg.0.alpha()).into();
    }
}

fn accept_pressed(
    query: Query<&Interaction, (Changed<Interaction>, With<AcceptButton>)>,
    stage: Res<State<Stage>>,
    mut celebration: ResMut<Celebration>,
    mut next_stage: ResMut<NextState<Stage>>,
) {
    for interaction in &query {
        if *interaction == Interaction::Pressed {
            accept_proposal(*stage.get(), &mut celebration, &mut next_stage);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{interact, press, proposal_app, single, wait};
    use crate::transition::FadeOut;

    fn prompt_app() -> App {
        let mut app = proposal_app();
        wait(&mut app, 5.0);
        wait(&mut app, 5.0);
        app
    }

    #[test]
    fn prompt_tiles_every_memory_behind_the_question() {
        let mut app = prompt_app();
        let mut faint = app
            .world_mut()
            .query_filtered::<&BaseAlpha, With<ImageNode>>();
        let alphas: Vec<f32> = faint.iter(app.world()).map(|alpha| alpha.0).collect();
        assert_eq!(alphas.len(), MEMORY_COUNT);
        assert!(alphas.iter().all(|alpha| *alpha == BACKDROP_ALPHA));
    }

    #[test]
    fn hovering_accept_only_changes_its_colour() {
        let mut app = prompt_app();
        interact::<AcceptButton>(&mut app, Interaction::Hovered);
        app.update();
        let button = single::<AcceptButton>(&mut app);
        let bg = app.world().get::<BackgroundColor>(button).unwrap().0;
        assert_eq!(
            bg.with_alpha(1.0).to_srgba(),
            ACCEPT_PALETTE.hovered.to_srgba()
        );
        assert!(!app.world().resource::<Celebration>().is_active());
        assert_eq!(*app.world().resource::<State<Stage>>().get(), Stage::Prompt);
    }

    #[test]
    fn prompt_view_fades_out_after_acceptance() {
        let mut app = prompt_app();
        press::<AcceptButton>(&mut app);
        let root = single::<PromptRoot>(&mut app);
        assert!(app.world().get::<FadeOut>(root).is_some());

        wait(&mut app, 3.0);
        let mut roots = app.world_mut().query_filtered::<Entity, With<PromptRoot>>();
        assert_eq!(roots.iter(app.world()).count(), 0);
    }
}
