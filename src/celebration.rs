// Floating hearts layered over everything once the proposal is accepted.

use bevy::picking::Pickable;
use bevy::prelude::*;
use bevy::ui::FocusPolicy;
use rand::Rng;
use rand::seq::IteratorRandom;
use strum::{EnumIter, IntoEnumIterator, IntoStaticStr};

use crate::assets::ProposalAssets;
use crate::stages::{Celebration, ProposalRng, ViewState};

pub struct CelebrationPlugin;

impl Plugin for CelebrationPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            Update,
            (
                spawn_overlay.run_if(resource_changed::<Celebration>),
                float_glyphs,
            )
                .chain()
                .run_if(in_state(ViewState::Mounted)),
        );
    }
}

pub const GLYPH_COUNT: usize = 20;
/// Glyphs start this far below the bottom edge.
const START_BELOW: f32 = 50.0;
const GLYPH_COLOR: Color = Color::srgb(0.94, 0.27, 0.27);
const OVERLAY_Z: i32 = 300;

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, IntoStaticStr)]
pub enum Glyph {
    #[strum(serialize = "❤️")]
    Heart,
    #[strum(serialize = "💕")]
    TwoHearts,
    #[strum(serialize = "💖")]
    Sparkling,
    #[strum(serialize = "💗")]
    Growing,
    #[strum(serialize = "💝")]
    Ribbon,
}

/// Everything randomized about one floating glyph, fixed at spawn.
#[derive(Component, Debug, Clone, Copy)]
pub struct GlyphParams {
    /// Horizontal position, percent of the overlay width.
    pub left: f32,
    pub glyph: Glyph,
    /// Seconds per rise.
    pub duration: f32,
    /// Seconds before the first rise starts.
    pub delay: f32,
    /// Font size in pixels.
    pub size: f32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GlyphPose {
    /// Fraction of the viewport height climbed.
    pub rise: f32,
    pub turn_degrees: f32,
    pub alpha: f32,
}

impl GlyphPose {
    const REST: GlyphPose = GlyphPose {
        rise: 0.0,
        turn_degrees: 0.0,
        alpha: 1.0,
    };
}

impl GlyphParams {
    pub fn sample(rng: &mut impl Rng) -> Self {
        GlyphParams {
            left: rng.random_range(0.0..100.0),
            glyph: Glyph::iter().choose(rng).unwrap_or(Glyph::Heart),
            duration: rng.random_range(5.0..10.0),
            delay: rng.random_range(0.0..3.0),
            size: rng.random_range(20.0..50.0),
        }
    }

    /// Pose `elapsed` seconds after the overlay appeared. Each rise goes
    /// linearly bottom to top while turning once and fading out, then repeats.
    pub fn pose(&self, elapsed: f32) -> GlyphPose {
        if elapsed < self.delay {
            return GlyphPose::REST;
        }
        let progress = (elapsed - self.delay).rem_euclid(self.duration) / self.duration;
        GlyphPose {
            rise: progress,
            turn_degrees: 360.0 * progress,
            alpha: 1.0 - progress,
        }
    }
}

#[derive(Component)]
pub struct CelebrationOverlay;

#[derive(Component, Default)]
struct GlyphClock(f32);

fn spawn_overlay(
    mut commands: Commands,
    celebration: Res<Celebration>,
    overlay: Query<(), With<CelebrationOverlay>>,
    mut rng: ResMut<ProposalRng>,
    assets: Res<ProposalAssets>,
) {
    if !celebration.is_active() || !overlay.is_empty() {
        return;
    }
    info!("spawning {GLYPH_COUNT} floating hearts");

    commands
        .spawn((
            CelebrationOverlay,
            Node {
                width: Val::Percent(100.0),
                height: Val::Percent(100.0),
                position_type: PositionType::Absolute,
                overflow: Overflow::clip(),
                ..default()
            },
            FocusPolicy::Pass,
            Pickable::IGNORE,
            GlobalZIndex(OVERLAY_Z),
            DespawnOnExit(ViewState::Mounted),
        ))
        .with_children(|parent| {
            for _ in 0..GLYPH_COUNT {
                let params = GlyphParams::sample(&mut rng.0);
                let glyph: &'static str = params.glyph.into();
                parent.spawn((
                    params,
                    GlyphClock::default(),
                    Text::new(glyph),
                    TextFont {
                        font: assets.emoji.clone(),
                        font_size: params.size,
                        ..default()
                    },
                    TextColor(GLYPH_COLOR),
                    Node {
                        position_type: PositionType::Absolute,
                        left: Val::Percent(params.left),
                        bottom: Val::Px(-START_BELOW),
                        ..default()
                    },
                    UiTransform::default(),
                    FocusPolicy::Pass,
                    Pickable::IGNORE,
                ));
            }
        });
}

fn float_glyphs(
    time: Res<Time>,
    mut glyphs: Query<(
        &GlyphParams,
        &mut GlyphClock,
        &mut UiTransform,
        &mut TextColor,
    )>,
) {
    for (params, mut clock, mut transform, mut color) in &mut glyphs {
        clock.0 += time.delta_secs();
        let pose = params.pose(clock.0);
        transform.translation = Val2::new(Val::Px(0.0), Val::Vh(-100.0 * pose.rise));
        transform.rotation = Rot2::degrees(pose.turn_degrees);
        color.0.set_alpha(pose.alpha);
    }
}
