use super::entity::Entity;
use crate::config::Config;

/// Movement intent and score of a paddle
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Paddle {
    pub moving_up: bool,
    pub moving_down: bool,
    pub score: u32,
}

/// Moves a paddle by its speed according to its flags, keeping one paddle
/// width of margin from the top and bottom walls. The two directions are
/// checked one after the other, each against its own guard.
pub(crate) fn update_player(entity: &mut Entity, config: &Config) {
    let Some(paddle) = entity.paddle().copied() else {
        return;
    };
    let margin = entity.size().x;

    if paddle.moving_up && entity.top() > margin {
        entity.position.y -= entity.velocity.y;
    }
    if paddle.moving_down && entity.bottom() < config.height - margin {
        entity.position.y += entity.velocity.y;
    }
}

/// Runs the player movement with last tick's flags, then aims the flags for
/// the next tick at the tracked entity's height.
pub(crate) fn update_opponent(entity: &mut Entity, config: &Config, tracked: Option<&Entity>) {
    update_player(entity, config);

    let Some(target_y) = tracked.map(|target| target.position.y) else {
        return;
    };
    let own_y = entity.position.y;
    if let Some(paddle) = entity.paddle_mut() {
        paddle.moving_up = target_y < own_y;
        paddle.moving_down = target_y > own_y;
    }
}
