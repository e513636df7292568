use crate::geom::Size;
use crate::paddle::Side;
use crate::renderer::{Color, Input, Renderer, Surface};
use std::cell::RefCell;
use std::collections::VecDeque;
use std::io;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, Document, HtmlCanvasElement, KeyboardEvent};

/// Element ids of the on-screen paddle controls in the hosting page.
const BUTTONS: [(&str, Side, Vertical); 4] = [
    ("leftUpButton", Side::Left, Vertical::Up),
    ("leftDownButton", Side::Left, Vertical::Down),
    ("rightUpButton", Side::Right, Vertical::Up),
    ("rightDownButton", Side::Right, Vertical::Down),
];

#[derive(Clone, Copy)]
enum Vertical {
    Up,
    Down,
}

fn css(color: Color) -> String {
    format!("#{:02X}{:02X}{:02X}", color.r, color.g, color.b)
}

fn js_err(err: JsValue) -> io::Error {
    io::Error::new(io::ErrorKind::Other, format!("{:?}", err))
}

pub struct WebRenderer {
    canvas: HtmlCanvasElement,
    context: CanvasRenderingContext2d,
    window: web_sys::Window,
    pending: Rc<RefCell<VecDeque<Input>>>,
}

impl WebRenderer {
    pub fn new(canvas_id: &str) -> Result<Self, JsValue> {
        let window = web_sys::window().ok_or("no window")?;
        let document = window.document().ok_or("no document")?;
        let canvas = document
            .get_element_by_id(canvas_id)
            .ok_or("canvas not found")?
            .dyn_into::<HtmlCanvasElement>()?;

        let context = canvas
            .get_context("2d")?
            .ok_or("no 2d context")?
            .dyn_into::<CanvasRenderingContext2d>()?;

        Ok(Self {
            canvas,
            context,
            window,
            pending: Rc::new(RefCell::new(VecDeque::new())),
        })
    }

    /// Hold-to-accelerate: press enqueues an accel signal, release zeroes it.
    fn bind_button(&self, document: &Document, id: &str, press: Input, release: Input) {
        let Some(button) = document.get_element_by_id(id) else {
            // Hosting page without this control; the keyboard still works
            return;
        };

        for (event_name, input) in [
            ("mousedown", press),
            ("touchstart", press),
            ("mouseup", release),
            ("touchend", release),
        ] {
            let pending = self.pending.clone();
            let closure = Closure::wrap(Box::new(move |event: web_sys::Event| {
                event.prevent_default();
                pending.borrow_mut().push_back(input);
            }) as Box<dyn FnMut(web_sys::Event)>);

            button
                .add_event_listener_with_callback(event_name, closure.as_ref().unchecked_ref())
                .unwrap();
            closure.forget(); // Keep listener alive
        }
    }

    fn setup_keyboard_listeners(&self) {
        let pending = self.pending.clone();
        let keydown = Closure::wrap(Box::new(move |event: KeyboardEvent| {
            if event.repeat() {
                return;
            }
            let input = match event.key().as_str() {
                "w" | "W" => Some(Input::AccelUp(Side::Left)),
                "s" | "S" => Some(Input::AccelDown(Side::Left)),
                "ArrowUp" => Some(Input::AccelUp(Side::Right)),
                "ArrowDown" => Some(Input::AccelDown(Side::Right)),
                _ => None,
            };
            if let Some(input) = input {
                pending.borrow_mut().push_back(input);
                event.prevent_default();
            }
        }) as Box<dyn FnMut(KeyboardEvent)>);

        self.window
            .add_event_listener_with_callback("keydown", keydown.as_ref().unchecked_ref())
            .unwrap();
        keydown.forget();

        let pending = self.pending.clone();
        let keyup = Closure::wrap(Box::new(move |event: KeyboardEvent| {
            let input = match event.key().as_str() {
                "w" | "W" | "s" | "S" => Some(Input::AccelRelease(Side::Left)),
                "ArrowUp" | "ArrowDown" => Some(Input::AccelRelease(Side::Right)),
                _ => None,
            };
            if let Some(input) = input {
                pending.borrow_mut().push_back(input);
            }
        }) as Box<dyn FnMut(KeyboardEvent)>);

        self.window
            .add_event_listener_with_callback("keyup", keyup.as_ref().unchecked_ref())
            .unwrap();
        keyup.forget();
    }

    fn setup_resize_listener(&self) {
        let pending = self.pending.clone();
        let closure = Closure::wrap(Box::new(move || {
            pending.borrow_mut().push_back(Input::Resized);
        }) as Box<dyn FnMut()>);

        self.window
            .add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref())
            .unwrap();
        closure.forget();
    }
}

impl Surface for WebRenderer {
    fn clear(&mut self, color: Color) -> io::Result<()> {
        self.context.set_fill_style_str(&css(color));
        self.context.fill_rect(
            0.0,
            0.0,
            self.canvas.width() as f64,
            self.canvas.height() as f64,
        );
        Ok(())
    }

    fn fill_rect(&mut self, x: f64, y: f64, w: f64, h: f64, color: Color) -> io::Result<()> {
        self.context.set_fill_style_str(&css(color));
        self.context.fill_rect(x, y, w, h);
        Ok(())
    }

    fn fill_circle(&mut self, x: f64, y: f64, radius: f64, color: Color) -> io::Result<()> {
        self.context.set_fill_style_str(&css(color));
        self.context.begin_path();
        self.context
            .arc(x, y, radius, 0.0, std::f64::consts::TAU)
            .map_err(js_err)?;
        self.context.fill();
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
        self.context.set_stroke_style_str(&css(color));
        self.context.begin_path();
        self.context.move_to(x1, y1);
        self.context.line_to(x2, y2);
        self.context.stroke();
        Ok(())
    }
}

impl Renderer for WebRenderer {
    fn init(&mut self) -> io::Result<()> {
        let document = self
            .window
            .document()
            .ok_or_else(|| io::Error::new(io::ErrorKind::Other, "no document"))?;

        for (id, side, vertical) in BUTTONS {
            let press = match vertical {
                Vertical::Up => Input::AccelUp(side),
                Vertical::Down => Input::AccelDown(side),
            };
            self.bind_button(&document, id, press, Input::AccelRelease(side));
        }
        self.setup_keyboard_listeners();
        self.setup_resize_listener();
        Ok(())
    }

    fn viewport(&self) -> Size {
        let width = self
            .window
            .inner_width()
            .ok()
            .and_then(|v| v.as_f64())
            .unwrap_or(0.0);
        let height = self
            .window
            .inner_height()
            .ok()
            .and_then(|v| v.as_f64())
            .unwrap_or(0.0);
        Size::new(width, height)
    }

    fn resize(&mut self, size: Size) -> io::Result<()> {
        self.canvas.set_width(size.width.max(0.0) as u32);
        self.canvas.set_height(size.height.max(0.0) as u32);
        Ok(())
    }

    fn poll_input(&mut self) -> io::Result<Option<Input>> {
        Ok(self.pending.borrow_mut().pop_front())
    }

    fn present(&mut self) -> io::Result<()> {
        // The canvas shows draw commands immediately; nothing to flush
        Ok(())
    }

    fn cleanup(&mut self) -> io::Result<()> {
        Ok(())
    }
}
