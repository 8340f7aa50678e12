// The decline button jumps somewhere else whenever the pointer reaches it.

use bevy::prelude::*;
use rand::Rng;

use crate::prompt::PromptRoot;
use crate::stages::{ProposalRng, Stage};

pub struct EvaderPlugin;

impl Plugin for EvaderPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Update, reposition_evader.run_if(in_state(Stage::Prompt)));
    }
}

/// Upper bound, in percent of the prompt view, for either offset.
pub const EVADER_RANGE: f32 = 80.0;

#[derive(Component)]
pub struct Evader;

/// Where the evader was last sent, as percentages from the top-left corner.
/// Absent until the first dodge.
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct EvaderPosition {
    pub top: f32,
    pub left: f32,
}

pub fn random_position(rng: &mut impl Rng) -> EvaderPosition {
    EvaderPosition {
        top: rng.random_range(0.0..EVADER_RANGE),
        left: rng.random_range(0.0..EVADER_RANGE),
    }
}

fn reposition_evader(
    mut commands: Commands,
    mut rng: ResMut<ProposalRng>,
    mut evaders: Query<
        (Entity, &Interaction, &mut Node, &ChildOf),
        (Changed<Interaction>, With<Evader>),
    >,
    root: Query<Entity, With<PromptRoot>>,
) {
    for (entity, interaction, mut node, child_of) in &mut evaders {
        if *interaction == Interaction::None {
            continue;
        }

        let position = random_position(&mut rng.0);
        node.position_type = PositionType::Absolute;
        node.top = Val::Percent(position.top);
        node.left = Val::Percent(position.left);
        commands.entity(entity).insert(position);
        debug!("evader moved to {:.1}% / {:.1}%", position.top, position.left);

        // Leave the button row on the first dodge so offsets span the whole view.
        if let Ok(root) = root.single()
            && child_of.parent() != root
        {
            commands.entity(root).add_child(entity);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prompt::AcceptButton;
    use crate::stages::Celebration;
    use crate::testing::{current_stage, interact, press, proposal_app, single, wait};
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn in_bounds(position: EvaderPosition) -> bool {
        (0.0..EVADER_RANGE).contains(&position.top)
            && (0.0..EVADER_RANGE).contains(&position.left)
    }

    #[test]
    fn random_positions_stay_in_range() {
        let mut rng = StdRng::seed_from_u64(11);
        for _ in 0..1000 {
            assert!(in_bounds(random_position(&mut rng)));
        }
    }

    #[test]
    fn evader_sits_in_flow_until_first_dodge() {
        let mut app = proposal_app();
        wait(&mut app, 5.0);
        wait(&mut app, 5.0);
        let evader = single::<Evader>(&mut app);
        assert!(app.world().get::<EvaderPosition>(evader).is_none());
        assert_eq!(
            app.world().get::<Node>(evader).unwrap().position_type,
            PositionType::Relative
        );
    }

    #[test]
    fn dodging_moves_the_evader_and_never_the_stage() {
        let mut app = proposal_app();
        wait(&mut app, 5.0);
        wait(&mut app, 5.0);

        let mut positions = Vec::new();
        for _ in 0..3 {
            interact::<Evader>(&mut app, Interaction::Hovered);
            let evader = single::<Evader>(&mut app);
            let position = *app.world().get::<EvaderPosition>(evader).unwrap();
            let node = app.world().get::<Node>(evader).unwrap();
            assert_eq!(node.position_type, PositionType::Absolute);
            assert_eq!(node.top, Val::Percent(position.top));
            assert_eq!(node.left, Val::Percent(position.left));
            assert!(in_bounds(position));
            positions.push(position);
        }
        assert_ne!(positions[0], positions[1]);
        assert_ne!(positions[1], positions[2]);
        assert_ne!(positions[0], positions[2]);

        interact::<Evader>(&mut app, Interaction::Pressed);
        wait(&mut app, 30.0);
        assert_eq!(current_stage(&app), Some(Stage::Prompt));
        assert!(!app.world().resource::<Celebration>().is_active());

        let evader = single::<Evader>(&mut app);
        let root = single::<PromptRoot>(&mut app);
        assert_eq!(app.world().get::<ChildOf>(evader).unwrap().parent(), root);

        press::<AcceptButton>(&mut app);
        assert_eq!(current_stage(&app), Some(Stage::Accepted));
        assert!(app.world().resource::<Celebration>().is_active());
    }

    #[test]
    fn pointer_leaving_does_not_move_the_evader() {
        let mut app = proposal_app();
        wait(&mut app, 5.0);
        wait(&mut app, 5.0);
        interact::<Evader>(&mut app, Interaction::Hovered);
        let evader = single::<Evader>(&mut app);
        let before = *app.world().get::<EvaderPosition>(evader).unwrap();
        interact::<Evader>(&mut app, Interaction::None);
        assert_eq!(*app.world().get::<EvaderPosition>(evader).unwrap(), before);
    }
}
