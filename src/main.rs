#[cfg(not(target_arch = "wasm32"))]
fn main() -> std::io::Result<()> {
    use std::time::Instant;
    use volley::{CliRenderer, Game, Input, Renderer};

    let mut renderer = CliRenderer::new();
    renderer.init()?;

    let mut game = Game::new(renderer.viewport());
    renderer.resize(game.size)?;

    let mut last_tick = Instant::now();

    'frames: loop {
        // Drain pending control signals before stepping the simulation
        while let Some(input) = renderer.poll_input()? {
            match input {
                Input::Quit => break 'frames,
                Input::Resized => {
                    game.resize(renderer.viewport());
                    renderer.resize(game.size)?;
                }
                other => game.handle_input(other),
            }
        }

        let delta_ms = last_tick.elapsed().as_secs_f64() * 1000.0;
        last_tick = Instant::now();

        game.update(delta_ms);
        game.draw(&mut renderer)?;
        renderer.present()?;
    }

    renderer.cleanup()?;
    Ok(())
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // The browser build starts through `start_game` in web_main instead
}
