use super::entity::Entity;
use crate::config::Config;

/// Moves the ball one tick and reflects it off the top and bottom walls.
/// No position correction is applied, so the ball may sit past a wall for
/// one tick before the reflected velocity carries it back.
pub(crate) fn update(ball: &mut Entity, config: &Config) {
    ball.position = ball.position + ball.velocity;

    if ball.bottom() > config.height || ball.top() < 0.0 {
        ball.velocity.y = -ball.velocity.y;
    }
}
