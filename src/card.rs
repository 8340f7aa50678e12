// Final love-letter card with music.

use std::f32::consts::TAU;

use bevy::prelude::*;

use crate::assets::ProposalAssets;
use crate::stages::Stage;
use crate::transition::{FadeIn, view_root};

pub struct CardPlugin;

impl Plugin for CardPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(OnEnter(Stage::Card), setup_card).add_systems(
            Update,
            (float_card, beat_heart).run_if(in_state(Stage::Card)),
        );
    }
}

const CARD_WIDTH: f32 = 448.0;
const PHOTO_HEIGHT: f32 = 384.0;
const RISE: f32 = 20.0;

const FLOAT_PERIOD: f32 = 4.0;
const FLOAT_HEIGHT: f32 = 10.0;
const BEAT_PERIOD: f32 = 1.5;
/// (fraction of the beat, scale) keyframes, first and last equal.
const BEAT_KEYS: [(f32, f32); 5] = [
    (0.0, 1.0),
    (0.25, 1.15),
    (0.4, 1.0),
    (0.6, 1.15),
    (1.0, 1.0),
];

const TITLE_COLOR: Color = Color::srgb(0.86, 0.15, 0.47);
const BODY_COLOR: Color = Color::srgb(0.22, 0.25, 0.32);
const HEART_COLOR: Color = Color::srgb(0.94, 0.27, 0.27);

const TITLE: &str = "Happy Valentines Day My Love";
const LETTER: [&str; 3] = [
    "My love, on this beautiful day of Valentine's, my heart finds no words grand enough to measure what you are to me, yet still it tries. \
     If love were the stars, you would be the whole night sky. If love were the sun, you would be its eternal dawn.",
    "From the hour fate first crossed our paths, you have been the gentle light that guides my wandering soul. \
     Your kindness heals, your laughter warms, and your love, so pure, so quiet, so boundless, has become the very breath within my chest.",
    "In a world of countless souls, mine shall always seek yours. In joy or storm, in triumph or trial, I am forever yours.",
];

#[derive(Component)]
pub struct LoveCard;

/// Seconds the card has been floating. Starts once it has risen into place.
#[derive(Component, Default)]
struct Floating(f32);

#[derive(Component)]
struct Heartbeat;

#[derive(Component)]
pub struct CardMusic;

fn setup_card(mut commands: Commands, assets: Res<ProposalAssets>) {
    // Rises into place while fading in, then floats.
    commands
        .spawn((view_root(Stage::Card, FadeIn::rising(1.0, RISE)), Floating::default()))
        .with_children(|parent| {
            parent
                .spawn((
                    LoveCard,
                    Node {
                        width: Val::Px(CARD_WIDTH),
                        flex_direction: FlexDirection::Column,
                        overflow: Overflow::clip(),
                        ..default()
                    },
                    BackgroundColor(Color::WHITE),
                ))
                .with_children(|card| {
                    card.spawn((
                        Node {
                            width: Val::Percent(100.0),
                            height: Val::Px(PHOTO_HEIGHT),
                            justify_content: JustifyContent::Center,
                            ..default()
                        },
                        BackgroundColor(Color::srgb(0.95, 0.96, 0.96)),
                    ))
                    .with_children(|photo| {
                        photo.spawn((
                            ImageNode::new(assets.special.clone()),
                            Node {
                                height: Val::Percent(100.0),
                                ..default()
                            },
                        ));
                    });

                    card.spawn(Node {
                        flex_direction: FlexDirection::Column,
                        padding: UiRect::all(Val::Px(28.0)),
                        row_gap: Val::Px(16.0),
                        ..default()
                    })
                    .with_children(|body| {
                        body.spawn((
                            Text::new(TITLE),
                            TextFont {
                                font: assets.serif.clone(),
                                font_size: 30.0,
                                ..default()
                            },
                            TextColor(TITLE_COLOR),
                        ));
                        for paragraph in LETTER {
                            body.spawn((
                                Text::new(paragraph),
                                TextFont {
                                    font_size: 16.0,
                                    ..default()
                                },
                                TextColor(BODY_COLOR),
                            ));
                        }
                        body.spawn((
                            Heartbeat,
                            Text::new("❤"),
                            TextFont {
                                font: assets.emoji.clone(),
                                font_size: 36.0,
                                ..default()
                            },
                            TextColor(HEART_COLOR),
                            Node {
                                align_self: AlignSelf::Center,
                                ..default()
                            },
                            UiTransform::default(),
                        ));
                    });
                });

            parent.spawn((
                CardMusic,
                AudioPlayer::new(assets.music.clone()),
                PlaybackSettings::LOOP,
            ));
        });
}

/// Vertical offset in pixels, negative is up.
fn float_offset(t: f32) -> f32 {
    -FLOAT_HEIGHT * (1.0 - (TAU * t / FLOAT_PERIOD).cos()) / 2.0
}

fn heartbeat_scale(t: f32) -> f32 {
    let phase = t.rem_euclid(BEAT_PERIOD) / BEAT_PERIOD;
    for pair in BEAT_KEYS.windows(2) {
        let ((start, from), (end, to)) = (pair[0], pair[1]);
        if phase <= end {
            return from + (to - from) * (phase - start) / (end - start);
        }
    }
    1.0
}

fn float_card(
    time: Res<Time>,
    mut cards: Query<(&mut Floating, &mut UiTransform), Without<FadeIn>>,
) {
    for (mut clock, mut transform) in &mut cards {
        clock.0 += time.delta_secs();
        transform.translation = Val2::px(0.0, float_offset(clock.0));
    }
}

fn beat_heart(time: Res<Time>, mut hearts: Query<&mut UiTransform, With<Heartbeat>>) {
    let scale = heartbeat_scale(time.elapsed_secs());
    for mut transform in &mut hearts {
        transform.scale = Vec2::splat(scale);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prompt::AcceptButton;
    use crate::testing::{press, proposal_app, wait};

    #[test]
    fn card_floats_ten_pixels_and_back() {
        assert_eq!(float_offset(0.0), 0.0);
        assert!((float_offset(2.0) + FLOAT_HEIGHT).abs() < 1e-4);
        assert!(float_offset(4.0).abs() < 1e-4);
    }

    #[test]
    fn heart_beats_twice_per_period() {
        assert!((heartbeat_scale(0.0) - 1.0).abs() < 1e-5);
        assert!((heartbeat_scale(0.25 * BEAT_PERIOD) - 1.15).abs() < 1e-4);
        assert!((heartbeat_scale(0.4 * BEAT_PERIOD) - 1.0).abs() < 1e-4);
        assert!((heartbeat_scale(0.6 * BEAT_PERIOD) - 1.15).abs() < 1e-4);
        assert!((heartbeat_scale(0.5 * BEAT_PERIOD) - 1.075).abs() < 1e-4);
        assert!((heartbeat_scale(BEAT_PERIOD + 0.25 * BEAT_PERIOD) - 1.15).abs() < 1e-3);
    }

    fn card_offset(app: &mut App) -> f32 {
        let root = crate::testing::single::<Floating>(app);
        match app.world().get::<UiTransform>(root).unwrap().translation.y {
            Val::Px(y) => y,
            other => panic!("unexpected offset {other:?}"),
        }
    }

    #[test]
    fn float_starts_from_rest_once_the_card_has_risen() {
        let mut app = proposal_app();
        wait(&mut app, 5.0);
        wait(&mut app, 5.0);
        wait(&mut app, 1.0);
        press::<AcceptButton>(&mut app);
        wait(&mut app, 5.0);

        let root = crate::testing::single::<Floating>(&mut app);
        for _ in 0..10 {
            if app.world().get::<FadeIn>(root).is_none() {
                break;
            }
            wait(&mut app, 0.5);
        }
        assert!(app.world().get::<FadeIn>(root).is_none());
        assert!(app.world().resource::<Time>().elapsed_secs() % FLOAT_PERIOD > 0.1);
        assert!(card_offset(&mut app).abs() < 1e-4);

        wait(&mut app, FLOAT_PERIOD / 2.0);
        assert!((card_offset(&mut app) + FLOAT_HEIGHT).abs() < 1e-3);
    }

    #[test]
    fn card_and_music_arrive_with_the_last_stage() {
        let mut app = proposal_app();
        wait(&mut app, 5.0);
        wait(&mut app, 5.0);
        press::<AcceptButton>(&mut app);

        let mut music = app.world_mut().query_filtered::<Entity, With<CardMusic>>();
        assert_eq!(music.iter(app.world()).count(), 0);

        wait(&mut app, 5.0);
        assert_eq!(music.iter(app.world()).count(), 1);
        let mut cards = app.world_mut().query_filtered::<Entity, With<LoveCard>>();
        assert_eq!(cards.iter(app.world()).count(), 1);
    }
}
