use crate::game::Game;
use crate::renderer::{Input, Renderer};
use crate::web_renderer::WebRenderer;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;

fn to_js(err: std::io::Error) -> JsValue {
    JsValue::from_str(&err.to_string())
}

struct GameLoop {
    game: Game,
    renderer: WebRenderer,
    last_tick: f64,
}

impl GameLoop {
    fn new() -> Result<Self, JsValue> {
        let mut renderer = WebRenderer::new("display")?;
        renderer.init().map_err(to_js)?;

        let game = Game::new(renderer.viewport());
        renderer.resize(game.size).map_err(to_js)?;

        let window = web_sys::window().ok_or("no window")?;
        let performance = window.performance().ok_or("no performance")?;

        Ok(Self {
            game,
            renderer,
            last_tick: performance.now(),
        })
    }

    fn update_frame(&mut self, now: f64) -> Result<(), JsValue> {
        while let Some(input) = self.renderer.poll_input().map_err(to_js)? {
            match input {
                Input::Quit => {}
                Input::Resized => {
                    self.game.resize(self.renderer.viewport());
                    self.renderer.resize(self.game.size).map_err(to_js)?;
                }
                other => self.game.handle_input(other),
            }
        }

        let delta_ms = now - self.last_tick;
        self.last_tick = now;

        self.game.update(delta_ms);
        self.game.draw(&mut self.renderer).map_err(to_js)?;
        self.renderer.present().map_err(to_js)?;
        Ok(())
    }
}

#[wasm_bindgen]
pub fn start_game() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();

    let game_loop = Rc::new(RefCell::new(GameLoop::new()?));

    let window = web_sys::window().ok_or("no window")?;
    let performance = window.performance().ok_or("no performance")?;

    // requestAnimationFrame closure chain; the loop never terminates
    let f: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
    let g = f.clone();

    let game_loop_clone = game_loop.clone();
    *g.borrow_mut() = Some(Closure::wrap(Box::new(move || {
        let now = performance.now();

        if let Err(e) = game_loop_clone.borrow_mut().update_frame(now) {
            web_sys::console::error_1(&e);
            return; // Stop loop on error
        }

        let window = web_sys::window().unwrap();
        window
            .request_animation_frame(f.borrow().as_ref().unwrap().as_ref().unchecked_ref())
            .unwrap();
    }) as Box<dyn FnMut()>));

    window
        .request_animation_frame(g.borrow().as_ref().unwrap().as_ref().unchecked_ref())
        .unwrap();

    web_sys::console::log_1(&"volley: game loop started".into());

    Ok(())
}
