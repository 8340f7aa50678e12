// Fade-in and fade-out of stage views. An outgoing view fades away before
// the incoming one starts to appear.

use bevy::prelude::*;
use strum::IntoEnumIterator;

use crate::stages::{Stage, ViewState};

pub struct TransitionPlugin;

impl Plugin for TransitionPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Update, (fade_out, fade_in).chain());

        for stage in Stage::iter() {
            app.add_systems(
                OnExit(stage),
                move |commands: Commands, views: Query<(Entity, &StageView)>| {
                    begin_exit(commands, views, stage)
                },
            );
        }
    }
}

/// Root of the view shown for one stage.
#[derive(Component, Clone, Copy)]
pub struct StageView {
    stage: Stage,
    /// Seconds the view takes to fade in, and later out.
    fade_secs: f32,
}

/// Fades a view root and all of its descendants in, optionally sliding it up
/// by `rise` pixels. Removed once the fade completes.
#[derive(Component)]
pub struct FadeIn {
    timer: Timer,
    rise: f32,
}

impl FadeIn {
    pub fn new(secs: f32) -> Self {
        FadeIn::rising(secs, 0.0)
    }

    pub fn rising(secs: f32, rise: f32) -> Self {
        FadeIn {
            timer: Timer::from_seconds(secs, TimerMode::Once),
            rise,
        }
    }
}

/// A view whose stage has ended. Despawned once fully transparent.
#[derive(Component)]
pub struct FadeOut(Timer);

/// Resting opacity of an element once its view has faded in.
#[derive(Component, Clone, Copy)]
pub struct BaseAlpha(pub f32);

/// Full-screen container that centres a single view. It fades out when
/// `stage` ends and vanishes at once on unmount.
pub fn view_root(stage: Stage, fade: FadeIn) -> impl Bundle {
    (
        Node {
            width: Val::Percent(100.0),
            height: Val::Percent(100.0),
            position_type: PositionType::Absolute,
            flex_direction: FlexDirection::Column,
            justify_content: JustifyContent::Center,
            align_items: AlignItems::Center,
            ..default()
        },
        UiTransform::default(),
        StageView {
            stage,
            fade_secs: fade.timer.duration().as_secs_f32(),
        },
        fade,
        DespawnOnExit(ViewState::Mounted),
    )
}

fn begin_exit(mut commands: Commands, views: Query<(Entity, &StageView)>, stage: Stage) {
    for (entity, view) in &views {
        if view.stage != stage {
            continue;
        }
        // On unmount the view may already be gone.
        commands
            .entity(entity)
            .try_remove::<(StageView, FadeIn)>()
            .try_insert(FadeOut(Timer::from_seconds(view.fade_secs, TimerMode::Once)));
    }
}

fn target_alpha(base: Option<&BaseAlpha>, progress: f32) -> f32 {
    base.map_or(1.0, |base| base.0) * progress
}

fn set_view_alpha(
    root: Entity,
    visibility: f32,
    children: &Query<&Children>,
    backgrounds: &mut Query<(&mut BackgroundColor, Option<&BaseAlpha>)>,
    texts: &mut Query<(&mut TextColor, Option<&BaseAlpha>)>,
    images: &mut Query<(&mut ImageNode, Option<&BaseAlpha>)>,
) {
    for entity in std::iter::once(root).chain(children.iter_descendants(root)) {
        if let Ok((mut bg, base)) = backgrounds.get_mut(entity) {
            bg.0.set_alpha(target_alpha(base, visibility));
        }
        if let Ok((mut color, base)) = texts.get_mut(entity) {
            color.0.set_alpha(target_alpha(base, visibility));
        }
        if let Ok((mut image, base)) = images.get_mut(entity) {
            image.color.set_alpha(target_alpha(base, visibility));
        }
    }
}

fn fade_out(
    mut commands: Commands,
    time: Res<Time>,
    mut leaving: Query<(Entity, &mut FadeOut)>,
    children: Query<&Children>,
    mut backgrounds: Query<(&mut BackgroundColor, Option<&BaseAlpha>)>,
    mut texts: Query<(&mut TextColor, Option<&BaseAlpha>)>,
    mut images: Query<(&mut ImageNode, Option<&BaseAlpha>)>,
) {
    for (root, mut fade) in &mut leaving {
        fade.0.tick(time.delta());
        if fade.0.is_finished() {
            commands.entity(root).despawn();
            continue;
        }
        set_view_alpha(
            root,
            1.0 - fade.0.fraction(),
            &children,
            &mut backgrounds,
            &mut texts,
            &mut images,
        );
    }
}

fn fade_in(
    mut commands: Commands,
    time: Res<Time>,
    mut roots: Query<(Entity, &mut FadeIn, &mut UiTransform)>,
    leaving: Query<(), With<FadeOut>>,
    children: Query<&Children>,
    mut backgrounds: Query<(&mut BackgroundColor, Option<&BaseAlpha>)>,
    mut texts: Query<(&mut TextColor, Option<&BaseAlpha>)>,
    mut images: Query<(&mut ImageNode, Option<&BaseAlpha>)>,
) {
    let waiting = !leaving.is_empty();
    for (root, mut fade, mut transform) in &mut roots {
        if !waiting {
            fade.timer.tick(time.delta());
        }
        let progress = fade.timer.fraction();

        set_view_alpha(
            root,
            progress,
            &children,
            &mut backgrounds,
            &mut texts,
            &mut images,
        );
        transform.translation = Val2::px(0.0, fade.rise * (1.0 - progress));

        if fade.timer.is_finished() {
            commands.entity(root).remove::<FadeIn>();
        }
    }
}
