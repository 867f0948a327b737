//! Ledge Runner entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{CanvasRenderingContext2d, Element, HtmlCanvasElement, HtmlElement, KeyboardEvent};

    use ledge_runner::platform::{TouchButton, key_event, touch_controls_html};
    use ledge_runner::renderer::CanvasRenderer;
    use ledge_runner::sim::{LevelDefinition, Viewport};
    use ledge_runner::ui::{HideRequest, HideTicket, MessageDisplay};
    use ledge_runner::{FrameDriver, Settings};

    /// Checkpoint screen element pair
    struct DomMessageDisplay {
        screen: HtmlElement,
        text: Element,
    }

    impl MessageDisplay for DomMessageDisplay {
        fn show(&mut self, text: &str) {
            let _ = self.screen.style().set_property("display", "block");
            self.text.set_text_content(Some(text));
        }

        fn hide(&mut self) {
            let _ = self.screen.style().set_property("display", "none");
        }
    }

    /// Game instance holding all state
    struct Game {
        driver: FrameDriver,
        renderer: CanvasRenderer,
        display: DomMessageDisplay,
        canvas: HtmlCanvasElement,
        /// Browser timeout handle of the pending hide
        hide_timer: Option<(HideTicket, i32)>,
    }

    impl Game {
        fn viewport(&self) -> Viewport {
            Viewport::new(self.canvas.width() as f32, self.canvas.height() as f32)
        }
    }

    fn window_size() -> (f64, f64) {
        let window = web_sys::window().unwrap();
        let w = window.inner_width().ok().and_then(|v| v.as_f64()).unwrap_or(1170.0);
        let h = window.inner_height().ok().and_then(|v| v.as_f64()).unwrap_or(600.0);
        (w, h)
    }

    fn html_element(document: &web_sys::Document, selector: &str) -> Option<HtmlElement> {
        document
            .query_selector(selector)
            .ok()
            .flatten()
            .and_then(|el| el.dyn_into::<HtmlElement>().ok())
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Ledge Runner starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("canvas")
            .expect("no canvas")
            .dyn_into()
            .expect("not a canvas");
        let (width, height) = window_size();
        canvas.set_width(width as u32);
        canvas.set_height(height as u32);

        let ctx: CanvasRenderingContext2d = canvas
            .get_context("2d")
            .ok()
            .flatten()
            .expect("no 2d context")
            .dyn_into()
            .expect("not a 2d context");

        let display = DomMessageDisplay {
            screen: html_element(&document, ".checkpoint-screen").expect("no checkpoint screen"),
            text: document
                .query_selector(".checkpoint-screen > p")
                .ok()
                .flatten()
                .expect("no checkpoint message"),
        };

        let settings = Settings::load();
        let touch_max_width = settings.touch_controls_max_width as f64;
        let viewport = Viewport::new(width as f32, height as f32);
        let driver = match FrameDriver::new(LevelDefinition::default(), settings, viewport) {
            Ok(driver) => driver,
            Err(e) => {
                log::error!("Failed to build level: {}", e);
                return;
            }
        };

        let game = Rc::new(RefCell::new(Game {
            driver,
            renderer: CanvasRenderer::new(ctx),
            display,
            canvas,
            hide_timer: None,
        }));

        if let Some(body) = document.body() {
            let _ = body.insert_adjacent_html("beforeend", &touch_controls_html());
        }

        setup_keyboard(game.clone());
        setup_touch_controls(game.clone());
        setup_resize(game.clone());
        setup_restart_button(game.clone());
        setup_start_button(game, touch_max_width);

        log::info!("Ledge Runner ready");
    }

    fn setup_keyboard(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();
        for (name, pressed) in [("keydown", true), ("keyup", false)] {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                if let Some(input) = key_event(&event.key(), pressed) {
                    game.borrow_mut().driver.handle_input(input);
                }
            });
            let _ = window.add_event_listener_with_callback(name, closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_touch_controls(game: Rc<RefCell<Game>>) {
        let document = web_sys::window().unwrap().document().unwrap();
        for button in TouchButton::ALL {
            let Some(el) = document.get_element_by_id(button.element_id()) else {
                log::warn!("Missing touch button #{}", button.element_id());
                continue;
            };

            {
                let game = game.clone();
                let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::TouchEvent| {
                    game.borrow_mut().driver.handle_input(button.press());
                });
                let _ = el.add_event_listener_with_callback("touchstart", closure.as_ref().unchecked_ref());
                closure.forget();
            }

            if button.release().is_some() {
                let game = game.clone();
                let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::TouchEvent| {
                    if let Some(input) = button.release() {
                        game.borrow_mut().driver.handle_input(input);
                    }
                });
                let _ = el.add_event_listener_with_callback("touchend", closure.as_ref().unchecked_ref());
                closure.forget();
            }
        }
    }

    fn setup_resize(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            let (w, h) = window_size();
            let g = game.borrow();
            g.canvas.set_width(w as u32);
            g.canvas.set_height(h as u32);
        });
        let _ = window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn setup_start_button(game: Rc<RefCell<Game>>, touch_max_width: f64) {
        let document = web_sys::window().unwrap().document().unwrap();
        let Some(btn) = document.get_element_by_id("start-btn") else {
            log::warn!("Missing #start-btn");
            return;
        };

        let mut started = false;
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
            // One frame loop only
            if started {
                return;
            }
            started = true;
            let document = web_sys::window().unwrap().document().unwrap();
            let _ = game.borrow().canvas.style().set_property("display", "block");
            if let Some(el) = html_element(&document, ".start-screen") {
                let _ = el.style().set_property("display", "none");
            }
            if let Some(el) = html_element(&document, "#restart-btn") {
                let _ = el.style().set_property("display", "block");
            }
            let (w, _) = window_size();
            if w <= touch_max_width {
                if let Some(el) = html_element(&document, ".controls") {
                    let _ = el.style().set_property("display", "flex");
                }
            }
            log::info!("Game started");
            request_animation_frame(game.clone());
        });
        let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn setup_restart_button(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();
        let Some(btn) = window.document().and_then(|d| d.get_element_by_id("restart-btn")) else {
            log::warn!("Missing #restart-btn");
            return;
        };

        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
            let mut g = game.borrow_mut();
            if let Some((_, handle)) = g.hide_timer.take() {
                window.clear_timeout_with_handle(handle);
            }
            let viewport = g.viewport();
            let Game { driver, display, .. } = &mut *g;
            if let Err(e) = driver.restart(viewport, display) {
                log::error!("Failed to restart level: {}", e);
            }
        });
        let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();
        let closure = Closure::once(move |_time: f64| {
            game_loop(game);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>) {
        let requests = {
            let mut g = game.borrow_mut();
            let viewport = g.viewport();
            let Game {
                driver,
                renderer,
                display,
                ..
            } = &mut *g;
            driver.frame(viewport, renderer, display).hide_requests
        };

        for request in requests {
            schedule_hide(game.clone(), request);
        }

        request_animation_frame(game);
    }

    /// One-shot timer that dismisses the banner, replacing any earlier one
    fn schedule_hide(game: Rc<RefCell<Game>>, request: HideRequest) {
        let window = web_sys::window().unwrap();

        // Any earlier timer is stale once a newer message is up
        if let Some((_, handle)) = game.borrow_mut().hide_timer.take() {
            window.clear_timeout_with_handle(handle);
        }

        let ticket = request.ticket;
        let timer_game = game.clone();
        let closure = Closure::once(move || {
            let mut g = timer_game.borrow_mut();
            if g.hide_timer.map(|(t, _)| t) == Some(ticket) {
                g.hide_timer = None;
            }
            let Game { driver, display, .. } = &mut *g;
            driver.dismiss(display, ticket);
        });
        match window.set_timeout_with_callback_and_timeout_and_arguments_0(
            closure.as_ref().unchecked_ref(),
            request.delay_ms as i32,
        ) {
            Ok(handle) => game.borrow_mut().hide_timer = Some((ticket, handle)),
            Err(e) => log::warn!("Failed to schedule message hide: {:?}", e),
        }
        closure.forget();
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    wasm_game::run();
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Ledge Runner (native) starting...");
    log::info!("Native mode runs headless - run with `trunk serve` for the web version");

    headless::run();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

/// Scripted run without a window: hold right, hop now and then
#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use ledge_runner::renderer::DrawList;
    use ledge_runner::sim::{Direction, InputEvent, LevelDefinition, Viewport};
    use ledge_runner::ui::{HideTicket, MessageDisplay};
    use ledge_runner::{FrameDriver, Settings};

    const FRAMES: u64 = 3600;
    const FRAME_MS: u64 = 16;
    const JUMP_EVERY: u64 = 45;

    struct LogDisplay;

    impl MessageDisplay for LogDisplay {
        fn show(&mut self, text: &str) {
            log::info!("[banner] {}", text);
        }

        fn hide(&mut self) {
            log::info!("[banner] hidden");
        }
    }

    pub fn run() {
        let viewport = Viewport::new(1170.0, 600.0);
        let mut driver = match FrameDriver::new(LevelDefinition::default(), Settings::load(), viewport) {
            Ok(driver) => driver,
            Err(e) => {
                log::error!("Failed to build level: {}", e);
                return;
            }
        };
        let mut renderer = DrawList::new();
        let mut display = LogDisplay;
        let mut hides: Vec<(u64, HideTicket)> = Vec::new();

        driver.handle_input(InputEvent::Press(Direction::Right));
        for frame in 0..FRAMES {
            let now = frame * FRAME_MS;
            if frame % JUMP_EVERY == 0 {
                driver.handle_input(InputEvent::Press(Direction::Up));
            }

            let out = driver.frame(viewport, &mut renderer, &mut display);
            for request in out.hide_requests {
                if let Some(old) = request.supersedes {
                    hides.retain(|&(_, ticket)| ticket != old);
                }
                hides.push((now + request.delay_ms as u64, request.ticket));
            }
            hides.retain(|&(due, ticket)| {
                if due <= now {
                    driver.dismiss(&mut display, ticket);
                    false
                } else {
                    true
                }
            });
        }

        let sim = driver.simulation();
        println!(
            "{} frames, {}/{} checkpoints claimed, scroll gate {}",
            sim.frame,
            sim.claimed_count(),
            sim.checkpoints.len(),
            if sim.scroll_gate_active() { "open" } else { "closed" }
        );
    }
}
