use crate::geom::{Point, Size};
use crate::renderer::{Color, Surface};
use std::io;

pub const PADDLE_WIDTH: f64 = 20.0;
pub const PADDLE_HEIGHT: f64 = 80.0;
/// Horizontal distance from the paddle's edge of the court.
pub const PADDLE_INSET: f64 = 20.0;

const FRICTION: f64 = 0.975;
const ACCEL_RATE: f64 = 180.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Left,
    Right,
}

#[derive(Debug, Clone)]
pub struct Paddle {
    pub side: Side,
    pub pos: Point,
    pub velocity: Point,
    pub accel: Point,
    screen: Size,
}

impl Paddle {
    pub fn new(screen: Size, side: Side) -> Self {
        let mut paddle = Self {
            side,
            pos: Point::default(),
            velocity: Point::default(),
            accel: Point::default(),
            screen,
        };
        paddle.resize(screen);
        paddle
    }

    pub fn update(&mut self, delta_ms: f64) {
        let factor = delta_ms / 1000.0;

        if self.accel.y != 0.0 {
            self.velocity.x += self.accel.x * factor;
            self.velocity.y += self.accel.y * factor;
        } else {
            // Coasting decay is per call, not per unit time; a higher frame
            // rate stops the paddle sooner. Kept from the original tuning.
            self.velocity.x *= FRICTION;
            self.velocity.y *= FRICTION;
        }
        self.pos.x += self.velocity.x * factor;
        self.pos.y += self.velocity.y * factor;

        // Elastic bounce at the court edges, not a hard stop
        if self.pos.y < 0.0 {
            self.pos.y = 0.0;
            self.velocity.y *= -1.0;
        }
        if self.pos.y > self.screen.height {
            self.pos.y = self.screen.height;
            self.velocity.y *= -1.0;
        }
    }

    pub fn draw(&self, surface: &mut dyn Surface) -> io::Result<()> {
        surface.fill_rect(
            self.pos.x - PADDLE_WIDTH / 2.0,
            self.pos.y - PADDLE_HEIGHT / 2.0,
            PADDLE_WIDTH,
            PADDLE_HEIGHT,
            Color::WHITE,
        )
    }

    pub fn resize(&mut self, screen: Size) {
        self.pos.x = match self.side {
            Side::Left => PADDLE_INSET,
            Side::Right => screen.width - PADDLE_INSET,
        };
        self.pos.y = screen.height / 2.0;
        self.screen = screen;
    }

    /// Recenter after a point is scored. Horizontal velocity is left alone.
    pub fn reset(&mut self) {
        self.pos.y = self.screen.height / 2.0;
        self.velocity.y = 0.0;
    }

    pub fn accel_up(&mut self) {
        self.accel.y = -ACCEL_RATE;
    }

    pub fn accel_down(&mut self) {
        self.accel.y = ACCEL_RATE;
    }

    pub fn accel_release(&mut self) {
        self.accel.y = 0.0;
    }
}
