use crate::ball::Ball;
use crate::geom::Size;
use crate::paddle::{Paddle, Side};
use crate::renderer::{Color, Input, Surface};
use crate::roller::Roller;
use std::io;

/// Width reserved next to the court for the on-screen controls.
pub const SIDE_PANEL: f64 = 200.0;

/// The simulation driver: owns both paddles, the ball and the court size.
pub struct Game {
    pub left_paddle: Paddle,
    pub right_paddle: Paddle,
    pub ball: Ball,
    pub size: Size,
}

impl Game {
    pub fn new(window: Size) -> Self {
        Self::with_roller(window, Roller::new())
    }

    /// Entry point for tests that need a deterministic serve.
    pub fn with_roller(window: Size, roller: Roller) -> Self {
        let size = Self::court_size(window);
        Self {
            left_paddle: Paddle::new(size, Side::Left),
            right_paddle: Paddle::new(size, Side::Right),
            ball: Ball::new(size, roller),
            size,
        }
    }

    fn court_size(window: Size) -> Size {
        Size::new(window.width - SIDE_PANEL, window.height)
    }

    /// Fixed order: paddles first, then the ball reads their fresh positions.
    pub fn update(&mut self, delta_ms: f64) {
        self.left_paddle.update(delta_ms);
        self.right_paddle.update(delta_ms);
        self.ball
            .update(delta_ms, &mut self.left_paddle, &mut self.right_paddle);
    }

    pub fn draw(&self, surface: &mut dyn Surface) -> io::Result<()> {
        surface.clear(Color::COURT)?;
        surface.stroke_line(
            self.size.width / 2.0,
            0.0,
            self.size.width / 2.0,
            self.size.height,
            Color::WHITE,
        )?;
        self.left_paddle.draw(surface)?;
        self.right_paddle.draw(surface)?;
        self.ball.draw(surface)?;
        Ok(())
    }

    /// Recompute the court from the window size and push it to every entity.
    pub fn resize(&mut self, window: Size) {
        self.size = Self::court_size(window);
        self.left_paddle.resize(self.size);
        self.right_paddle.resize(self.size);
        self.ball.resize(self.size);
    }

    /// Route a control signal to the addressed paddle. `Resized` and `Quit`
    /// are frame-loop concerns and ignored here.
    pub fn handle_input(&mut self, input: Input) {
        match input {
            Input::AccelUp(side) => self.paddle_mut(side).accel_up(),
            Input::AccelDown(side) => self.paddle_mut(side).accel_down(),
            Input::AccelRelease(side) => self.paddle_mut(side).accel_release(),
            Input::Resized | Input::Quit => {}
        }
    }

    fn paddle_mut(&mut self, side: Side) -> &mut Paddle {
        match side {
            Side::Left => &mut self.left_paddle,
            Side::Right => &mut self.right_paddle,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geom::Point;

    const WINDOW: Size = Size {
        width: 1000.0,
        height: 600.0,
    };

    fn game() -> Game {
        Game::with_roller(WINDOW, Roller::with_seed(11))
    }

    #[test]
    fn court_subtracts_the_side_panel() {
        let game = game();
        assert_eq!(game.size.width, 800.0);
        assert_eq!(game.size.height, 600.0);
        assert_eq!(game.left_paddle.pos.x, 20.0);
        assert_eq!(game.right_paddle.pos.x, 780.0);
        assert_eq!(game.ball.pos.x, 400.0);
        assert_eq!(game.ball.pos.y, 300.0);
    }

    #[test]
    fn resize_repositions_paddles_and_keeps_the_ball() {
        let mut game = game();
        let ball_pos = game.ball.pos;

        game.resize(Size::new(1040.0, 700.0));

        assert_eq!(game.size.width, 840.0);
        assert_eq!(game.size.height, 700.0);
        assert_eq!(game.left_paddle.pos.x, 20.0);
        assert_eq!(game.right_paddle.pos.x, 820.0);
        assert_eq!(game.left_paddle.pos.y, 350.0);
        assert_eq!(game.right_paddle.pos.y, 350.0);
        assert_eq!(game.ball.pos, ball_pos);
    }

    #[test]
    fn one_second_of_free_flight_lands_exactly() {
        let mut game = game();
        game.ball.velocity = Point::new(260.0, -30.0);

        game.update(1000.0);

        assert!((game.ball.pos.x - 660.0).abs() < 1e-6);
        assert!((game.ball.pos.y - 270.0).abs() < 1e-6);
    }

    #[test]
    fn input_reaches_only_the_addressed_paddle() {
        let mut game = game();

        game.handle_input(Input::AccelUp(Side::Left));
        assert_eq!(game.left_paddle.accel.y, -180.0);
        assert_eq!(game.right_paddle.accel.y, 0.0);

        game.handle_input(Input::AccelDown(Side::Right));
        assert_eq!(game.right_paddle.accel.y, 180.0);
        assert_eq!(game.left_paddle.accel.y, -180.0);

        game.handle_input(Input::AccelRelease(Side::Left));
        assert_eq!(game.left_paddle.accel.y, 0.0);
        assert_eq!(game.right_paddle.accel.y, 180.0);
    }

    #[test]
    fn ball_collides_against_paddle_positions_from_this_frame() {
        let mut game = game();
        // The left paddle is about to coast up into the ball's path. If the
        // ball saw last frame's position the band check would miss.
        game.left_paddle.pos.y = 200.0;
        game.left_paddle.velocity.y = 4000.0;
        game.ball.pos = Point::new(21.0, 300.0);
        game.ball.velocity = Point::new(-100.0, 0.0);

        game.update(25.0);

        assert_eq!(game.ball.velocity.x, 150.0);
    }

    /// Surface double that records the draw commands it receives.
    #[derive(Default)]
    struct Recording {
        ops: Vec<String>,
    }

    impl Surface for Recording {
        fn clear(&mut self, color: Color) -> io::Result<()> {
            self.ops.push(format!("clear {:?}", color));
            Ok(())
        }

        fn fill_rect(&mut self, x: f64, y: f64, w: f64, h: f64, color: Color) -> io::Result<()> {
            self.ops
                .push(format!("rect {} {} {} {} {:?}", x, y, w, h, color));
            Ok(())
        }

        fn fill_circle(&mut self, x: f64, y: f64, radius: f64, color: Color) -> io::Result<()> {
            self.ops
                .push(format!("circle {} {} {} {:?}", x, y, radius, color));
            Ok(())
        }

        fn stroke_line(
            &mut self,
            x1: f64,
            y1: f64,
            x2: f64,
            y2: f64,
            color: Color,
        ) -> io::Result<()> {
            self.ops
                .push(format!("line {} {} {} {} {:?}", x1, y1, x2, y2, color));
            Ok(())
        }
    }

    #[test]
    fn draw_pass_clears_then_divider_then_entities() {
        let game = game();
        let mut surface = Recording::default();

        game.draw(&mut surface).unwrap();

        assert_eq!(surface.ops.len(), 5);
        assert_eq!(surface.ops[0], format!("clear {:?}", Color::COURT));
        assert_eq!(
            surface.ops[1],
            format!("line 400 0 400 600 {:?}", Color::WHITE)
        );
        // Left paddle: 20x80 rect cornered 10 left and 40 up of its center
        assert_eq!(
            surface.ops[2],
            format!("rect 10 260 20 80 {:?}", Color::WHITE)
        );
        assert_eq!(
            surface.ops[3],
            format!("rect 770 260 20 80 {:?}", Color::WHITE)
        );
        assert_eq!(
            surface.ops[4],
            format!("circle 400 300 20 {:?}", Color::WHITE)
        );
    }
}
