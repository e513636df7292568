pub mod ball;
pub mod game;
pub mod geom;
pub mod paddle;
pub mod renderer;
pub mod roller;

#[cfg(not(target_arch = "wasm32"))]
pub mod cli_renderer;

#[cfg(target_arch = "wasm32")]
pub mod web_main;
#[cfg(target_arch = "wasm32")]
pub mod web_renderer;

pub use ball::Ball;
pub use game::Game;
pub use geom::{Point, Size};
pub use paddle::{Paddle, Side};
pub use renderer::{Color, Input, Renderer, Surface};
pub use roller::Roller;

#[cfg(not(target_arch = "wasm32"))]
pub use cli_renderer::CliRenderer;
#[cfg(target_arch = "wasm32")]
pub use web_renderer::WebRenderer;
