use crate::geom::{Point, Size};
use crate::paddle::Paddle;
use crate::renderer::{Color, Surface};
use crate::roller::Roller;
use std::io;

pub const BALL_RADIUS: f64 = 20.0;
/// Vertical half-window around a paddle's center that counts as a hit.
const PADDLE_BAND: f64 = 40.0;
/// Every bounce reverses and speeds up the relevant velocity component.
const BOUNCE_GAIN: f64 = 1.5;

pub struct Ball {
    pub pos: Point,
    pub velocity: Point,
    roller: Roller,
    screen: Size,
}

impl Ball {
    pub fn new(screen: Size, mut roller: Roller) -> Self {
        Self {
            pos: screen.center(),
            velocity: roller.random_direction(),
            roller,
            screen,
        }
    }

    /// Advance one frame. Borrows both paddles: their positions were already
    /// updated this frame, and a score resets them.
    pub fn update(&mut self, delta_ms: f64, left: &mut Paddle, right: &mut Paddle) {
        let factor = delta_ms / 1000.0;
        self.pos.x += self.velocity.x * factor;
        self.pos.y += self.velocity.y * factor;

        // bounce off the top
        if self.pos.y < 0.0 && self.velocity.y < 0.0 {
            self.velocity.y = -(self.velocity.y * BOUNCE_GAIN);
        }
        // bounce off the bottom
        if self.pos.y > self.screen.height && self.velocity.y > 0.0 {
            self.velocity.y = -(self.velocity.y * BOUNCE_GAIN);
        }

        // Paddle checks carry no approach-direction guard: a ball that stays
        // behind a paddle inside the band re-amplifies every frame. Kept
        // as-is; it is part of the original game feel.
        if self.pos.x < left.pos.x && (self.pos.y - left.pos.y).abs() < PADDLE_BAND {
            self.velocity.x = -(self.velocity.x * BOUNCE_GAIN);
        }
        if self.pos.x > right.pos.x && (self.pos.y - right.pos.y).abs() < PADDLE_BAND {
            self.velocity.x = -(self.velocity.x * BOUNCE_GAIN);
        }

        // Ball out on the left: point for right
        if self.pos.x < 0.0 {
            self.serve(left, right);
        }
        // Ball out on the right: point for left
        if self.pos.x > self.screen.width {
            self.serve(left, right);
        }
    }

    fn serve(&mut self, left: &mut Paddle, right: &mut Paddle) {
        self.pos = self.screen.center();
        self.velocity = self.roller.random_direction();
        left.reset();
        right.reset();
    }

    pub fn draw(&self, surface: &mut dyn Surface) -> io::Result<()> {
        surface.fill_circle(self.pos.x, self.pos.y, BALL_RADIUS, Color::WHITE)
    }

    /// The ball keeps its position on resize; only the bounds change.
    pub fn resize(&mut self, screen: Size) {
        self.screen = screen;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::paddle::Side;
    use crate::roller::{SERVE_SPEED_X, SERVE_SPEED_Y};

    const SCREEN: Size = Size {
        width: 800.0,
        height: 600.0,
    };

    fn fixture() -> (Ball, Paddle, Paddle) {
        let left = Paddle::new(SCREEN, Side::Left);
        let right = Paddle::new(SCREEN, Side::Right);
        let ball = Ball::new(SCREEN, Roller::with_seed(3));
        (ball, left, right)
    }

    #[test]
    fn new_ball_is_centered_with_a_serve_velocity() {
        let (ball, _, _) = fixture();
        assert_eq!(ball.pos.x, 400.0);
        assert_eq!(ball.pos.y, 300.0);
        assert!((SERVE_SPEED_X.0..=SERVE_SPEED_X.1).contains(&ball.velocity.x.abs()));
        assert!((SERVE_SPEED_Y.0..=SERVE_SPEED_Y.1).contains(&ball.velocity.y.abs()));
    }

    #[test]
    fn position_integrates_velocity_over_delta() {
        let (mut ball, mut left, mut right) = fixture();
        ball.velocity = Point::new(100.0, -50.0);

        ball.update(500.0, &mut left, &mut right);

        assert!((ball.pos.x - 450.0).abs() < 1e-9);
        assert!((ball.pos.y - 275.0).abs() < 1e-9);
    }

    #[test]
    fn top_wall_bounce_amplifies_downward() {
        let (mut ball, mut left, mut right) = fixture();
        ball.pos = Point::new(400.0, 2.0);
        ball.velocity = Point::new(0.0, -100.0);

        ball.update(40.0, &mut left, &mut right);

        assert_eq!(ball.velocity.y, 150.0);
    }

    #[test]
    fn bottom_wall_bounce_amplifies_upward() {
        let (mut ball, mut left, mut right) = fixture();
        ball.pos = Point::new(400.0, 598.0);
        ball.velocity = Point::new(0.0, 100.0);

        ball.update(40.0, &mut left, &mut right);

        assert_eq!(ball.velocity.y, -150.0);
    }

    #[test]
    fn wall_bounce_needs_an_approaching_ball() {
        let (mut ball, mut left, mut right) = fixture();
        ball.pos = Point::new(400.0, 0.5);
        ball.velocity = Point::new(0.0, -200.0);

        ball.update(10.0, &mut left, &mut right);
        assert_eq!(ball.velocity.y, 300.0);

        // Still above the top edge but now moving down: no second flip
        ball.update(1.0, &mut left, &mut right);
        assert_eq!(ball.velocity.y, 300.0);
    }

    #[test]
    fn left_paddle_bounce_amplifies_horizontal_velocity() {
        let (mut ball, mut left, mut right) = fixture();
        ball.pos = Point::new(25.0, 300.0);
        ball.velocity = Point::new(-100.0, 0.0);

        ball.update(60.0, &mut left, &mut right);

        assert_eq!(ball.velocity.x, 150.0);
    }

    #[test]
    fn right_paddle_bounce_amplifies_horizontal_velocity() {
        let (mut ball, mut left, mut right) = fixture();
        ball.pos = Point::new(775.0, 300.0);
        ball.velocity = Point::new(100.0, 0.0);

        ball.update(60.0, &mut left, &mut right);

        assert_eq!(ball.velocity.x, -150.0);
    }

    #[test]
    fn ball_outside_the_band_passes_a_paddle() {
        let (mut ball, mut left, mut right) = fixture();
        ball.pos = Point::new(25.0, 100.0);
        ball.velocity = Point::new(-100.0, 0.0);

        ball.update(10.0, &mut left, &mut right);

        assert_eq!(ball.velocity.x, -100.0);
    }

    #[test]
    fn lingering_in_the_band_reamplifies_every_frame() {
        let (mut ball, mut left, mut right) = fixture();
        ball.pos = Point::new(20.5, 300.0);
        ball.velocity = Point::new(-100.0, 0.0);

        // First frame crosses behind the paddle and flips to +150
        ball.update(10.0, &mut left, &mut right);
        assert_eq!(ball.velocity.x, 150.0);

        // Still behind the paddle next frame, so it flips again
        ball.update(1.0, &mut left, &mut right);
        assert_eq!(ball.velocity.x, -225.0);
    }

    #[test]
    fn left_exit_serves_from_center_and_resets_paddles() {
        let (mut ball, mut left, mut right) = fixture();
        ball.pos = Point::new(5.0, 100.0);
        ball.velocity = Point::new(-600.0, 0.0);
        left.pos.y = 50.0;
        left.velocity.y = -120.0;
        right.pos.y = 550.0;
        right.velocity.y = 80.0;

        ball.update(100.0, &mut left, &mut right);

        assert_eq!(ball.pos.x, 400.0);
        assert_eq!(ball.pos.y, 300.0);
        assert!((SERVE_SPEED_X.0..=SERVE_SPEED_X.1).contains(&ball.velocity.x.abs()));
        assert!((SERVE_SPEED_Y.0..=SERVE_SPEED_Y.1).contains(&ball.velocity.y.abs()));
        assert_eq!(left.pos.y, 300.0);
        assert_eq!(left.velocity.y, 0.0);
        assert_eq!(right.pos.y, 300.0);
        assert_eq!(right.velocity.y, 0.0);
    }

    #[test]
    fn right_exit_serves_from_center_and_resets_paddles() {
        let (mut ball, mut left, mut right) = fixture();
        ball.pos = Point::new(795.0, 100.0);
        ball.velocity = Point::new(600.0, 0.0);
        left.pos.y = 50.0;
        right.pos.y = 550.0;

        ball.update(100.0, &mut left, &mut right);

        assert_eq!(ball.pos.x, 400.0);
        assert_eq!(ball.pos.y, 300.0);
        assert_eq!(left.pos.y, 300.0);
        assert_eq!(right.pos.y, 300.0);
    }

    #[test]
    fn resize_keeps_the_ball_in_place() {
        let (mut ball, mut left, mut right) = fixture();
        ball.pos = Point::new(123.0, 456.0);

        ball.resize(Size::new(1000.0, 700.0));

        assert_eq!(ball.pos.x, 123.0);
        assert_eq!(ball.pos.y, 456.0);

        // New bounds take effect: exiting at x > 800 no longer scores
        ball.pos = Point::new(900.0, 350.0);
        ball.velocity = Point::new(10.0, 0.0);
        ball.update(10.0, &mut left, &mut right);
        assert!((ball.pos.x - 900.1).abs() < 1e-9);
    }
}
