// Asset handles shared by every stage view.

use bevy::prelude::*;

pub struct AssetsPlugin;

impl Plugin for AssetsPlugin {
    fn build(&self, app: &mut App) {
        // Initial stage views spawn before any startup system runs.
        app.init_resource::<ProposalAssets>();
    }
}

pub const MEMORY_COUNT: usize = 18;

const SAD_PATH: &str = "sad_hamster.png";
const JUMPING_PATH: &str = "hamster_jumping.png";
const SPECIAL_PATH: &str = "special-image.jpg";
const MUSIC_PATH: &str = "romantic-music.ogg";
const SERIF_PATH: &str = "fonts/PlayfairDisplay-Regular.ttf";
const EMOJI_PATH: &str = "fonts/NotoEmoji-Regular.ttf";

#[derive(Resource)]
pub struct ProposalAssets {
    /// Photos tiled behind the prompt.
    pub memories: [Handle<Image>; MEMORY_COUNT],
    pub sad: Handle<Image>,
    pub jumping: Handle<Image>,
    pub special: Handle<Image>,
    pub music: Handle<AudioSource>,
    pub serif: Handle<Font>,
    pub emoji: Handle<Font>,
}

fn memory_path(index: usize) -> String {
    format!("game-photos/{}.jpg", index + 1)
}

impl FromWorld for ProposalAssets {
    fn from_world(world: &mut World) -> Self {
        let asset_server = world.resource::<AssetServer>();
        ProposalAssets {
            memories: std::array::from_fn(|i| asset_server.load(memory_path(i))),
            sad: asset_server.load(SAD_PATH),
            jumping: asset_server.load(JUMPING_PATH),
            special: asset_server.load(SPECIAL_PATH),
            music: asset_server.load(MUSIC_PATH),
            serif: asset_server.load(SERIF_PATH),
            emoji: asset_server.load(EMOJI_PATH),
        }
    }
}

#[cfg(test)]
impl ProposalAssets {
    /// Unloaded handles, for apps without an asset server.
    pub fn placeholder() -> Self {
        ProposalAssets {
            memories: std::array::from_fn(|_| Handle::default()),
            sad: Handle::default(),
            jumping: Handle::default(),
            special: Handle::default(),
            music: Handle::default(),
            serif: Handle::default(),
            emoji: Handle::default(),
        }
    }
}
