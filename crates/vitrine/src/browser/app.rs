//! WASM application entry point.
//!
//! [`App`] looks up the page's canvases by id, wires DOM listeners and drives
//! the showcase and the dashboard from a `requestAnimationFrame` loop. A canvas
//! missing from the page only disables the feature that paints into it.
//!
//! Keyboard shortcuts only fire while the showcase canvas has focus, so typing
//! elsewhere on the page is never intercepted.

use super::canvas2d::Canvas2DRenderer;
use super::events::{keyboard_event_to_vitrine, mouse_event_to_vitrine, wheel_event_to_vitrine};
use super::logger::ConsoleLogger;
use super::storage::LocalStore;
use crate::dashboard::{Dashboard, TimeRange};
use crate::showcase::Showcase;
use std::cell::RefCell;
use std::rc::Rc;
use vitrine_core::{
    Canvas, DayIndex, Event, InputHandler, Key, QuestAction, RecordingCanvas, VitrineConfig,
};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{
    window, Document, EventTarget, HtmlCanvasElement, KeyboardEvent, MediaQueryList, MouseEvent, WheelEvent, Window,
};

/// Id of the 3-D showcase canvas.
pub const SHOWCASE_CANVAS: &str = "showcase-canvas";
/// Id of the enrollment line chart canvas.
pub const ENROLLMENT_CANVAS: &str = "enrollment-chart";
/// Id of the skills doughnut canvas.
pub const SKILLS_CANVAS: &str = "skills-chart";
/// Id of the skill radar canvas.
pub const RADAR_CANVAS: &str = "radar-chart";
/// Id of the completion bars canvas.
pub const COMPLETION_CANVAS: &str = "completion-chart";

const MOUSE_EVENTS: [&str; 4] = ["mousedown", "mousemove", "mouseup", "mouseleave"];

const DARK_QUERY: &str = "(prefers-color-scheme: dark)";

const DAY_MS: f64 = 86_400_000.0;

type Listener = Closure<dyn FnMut(web_sys::Event)>;
type FrameSlot = Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>>;

#[derive(Default)]
struct Panels {
    enrollment: Option<Canvas2DRenderer>,
    skills: Option<Canvas2DRenderer>,
    radar: Option<Canvas2DRenderer>,
    completion: Option<Canvas2DRenderer>,
}

impl Panels {
    fn all(&self) -> impl Iterator<Item = &Canvas2DRenderer> {
        [&self.enrollment, &self.skills, &self.radar, &self.completion]
            .into_iter()
            .flatten()
    }
}

struct Runtime {
    showcase: Showcase<LocalStore>,
    surface: Option<Canvas2DRenderer>,
    dashboard: Dashboard,
    panels: Panels,
}

impl Runtime {
    fn frame(&mut self, now_ms: f64) {
        self.showcase.frame(now_ms);
        self.dashboard.tick(now_ms);
        self.paint();
    }

    fn paint(&self) {
        if let Some(surface) = &self.surface {
            replay(surface, |canvas| self.showcase.paint(canvas));
        }

        let palette = self.showcase.palette();
        let dashboard = &self.dashboard;
        if let Some(surface) = &self.panels.enrollment {
            replay(surface, |canvas| {
                dashboard.paint_enrollment(canvas, &palette);
            });
        }
        if let Some(surface) = &self.panels.skills {
            replay(surface, |canvas| {
                dashboard.paint_skills(canvas, &palette);
            });
        }
        if let Some(surface) = &self.panels.radar {
            replay(surface, |canvas| {
                dashboard.paint_radar(canvas, &palette);
            });
        }
        if let Some(surface) = &self.panels.completion {
            replay(surface, |canvas| dashboard.paint_completion(canvas, &palette));
        }
    }

    fn fit_surfaces(&mut self) {
        let mut resized = false;
        for surface in self.surface.iter().chain(self.panels.all()) {
            resized |= surface.fit_to_element();
        }
        if let (true, Some(surface)) = (resized, &self.surface) {
            let size = surface.size();
            self.showcase.handle_event(&Event::Resize {
                width: size.width,
                height: size.height,
            });
        }
    }
}

/// Record one paint pass and replay it on `surface`.
fn replay(surface: &Canvas2DRenderer, paint: impl FnOnce(&mut dyn Canvas)) {
    let mut canvas = RecordingCanvas::new(surface.size());
    paint(&mut canvas);
    surface.render(canvas.commands());
}

fn find_surface(document: &Document, id: &str) -> Option<Canvas2DRenderer> {
    let Some(element) = document.get_element_by_id(id) else {
        log::debug!("no #{id} on this page");
        return None;
    };
    let canvas = element.dyn_into::<HtmlCanvasElement>().ok()?;
    match Canvas2DRenderer::new(canvas) {
        Ok(renderer) => {
            renderer.fit_to_element();
            Some(renderer)
        }
        Err(e) => {
            log::warn!("#{id} unusable: {e}");
            None
        }
    }
}

fn dark_query(window: &Window) -> Option<MediaQueryList> {
    window.match_media(DARK_QUERY).ok().flatten()
}

/// Local calendar day of the host clock.
fn today() -> DayIndex {
    let date = js_sys::Date::new_0();
    let local_ms = date.get_time() - date.get_timezone_offset() * 60_000.0;
    (local_ms / DAY_MS).floor() as DayIndex
}

fn js_error(e: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&e.to_string())
}

fn now_ms(window: &Window) -> f64 {
    window.performance().map_or(0.0, |p| p.now())
}

fn request_frame(slot: &FrameSlot) {
    let Some(window) = window() else {
        return;
    };
    if let Some(callback) = slot.borrow().as_ref() {
        if let Err(e) = window.request_animation_frame(callback.as_ref().unchecked_ref()) {
            log::error!("requestAnimationFrame failed: {e:?}");
        }
    }
}

/// Main application runner for browser.
#[wasm_bindgen]
pub struct App {
    runtime: Rc<RefCell<Runtime>>,
    listeners: Vec<(EventTarget, &'static str, Listener)>,
    frame: FrameSlot,
}

#[wasm_bindgen]
impl App {
    /// Attach to the current page. `config_json` overrides the defaults.
    #[wasm_bindgen(constructor)]
    pub fn new(config_json: Option<String>) -> Result<App, JsValue> {
        console_error_panic_hook::set_once();
        let config = match config_json {
            Some(json) => VitrineConfig::from_json_str(&json).map_err(js_error)?,
            None => VitrineConfig::default(),
        };

        let window = window().ok_or("No window")?;
        let document = window.document().ok_or("No document")?;

        let mut showcase = Showcase::new(config, LocalStore::new());
        showcase.set_system_dark(dark_query(&window).is_some_and(|query| query.matches()));
        if let Err(e) = showcase.record_visit(today()) {
            log::warn!("visit not recorded: {e}");
        }
        let runtime = Runtime {
            showcase,
            surface: find_surface(&document, SHOWCASE_CANVAS),
            dashboard: Dashboard::new(config.dashboard),
            panels: Panels {
                enrollment: find_surface(&document, ENROLLMENT_CANVAS),
                skills: find_surface(&document, SKILLS_CANVAS),
                radar: find_surface(&document, RADAR_CANVAS),
                completion: find_surface(&document, COMPLETION_CANVAS),
            },
        };

        let mut app = Self {
            runtime: Rc::new(RefCell::new(runtime)),
            listeners: Vec::new(),
            frame: Rc::new(RefCell::new(None)),
        };
        app.attach_listeners(&window)?;
        Ok(app)
    }

    /// Start the showcase loop, the dashboard animations and frame scheduling.
    pub fn start(&mut self) {
        let Some(window) = window() else {
            return;
        };
        let now = now_ms(&window);
        {
            let mut runtime = self.runtime.borrow_mut();
            runtime.showcase.start(now);
            runtime.dashboard.start(now);
        }

        if self.frame.borrow().is_some() {
            return;
        }
        let runtime = Rc::clone(&self.runtime);
        let slot = Rc::clone(&self.frame);
        let callback = Closure::new(move |timestamp: f64| {
            runtime.borrow_mut().frame(timestamp);
            request_frame(&slot);
        });
        *self.frame.borrow_mut() = Some(callback);
        request_frame(&self.frame);
    }

    /// Fire a named particle effect. Returns `false` for unknown names.
    pub fn trigger_effect(&self, name: &str) -> bool {
        self.runtime.borrow_mut().showcase.trigger_effect(name).is_some()
    }

    /// Advance the theme mode and return its stored name.
    pub fn cycle_theme(&self) -> Result<String, JsValue> {
        let mode = self
            .runtime
            .borrow_mut()
            .showcase
            .cycle_theme()
            .map_err(js_error)?;
        Ok(mode.as_str().to_string())
    }

    /// Whether the page should render dark.
    pub fn is_dark(&self) -> bool {
        self.runtime.borrow().showcase.is_dark()
    }

    /// Put the camera back at its initial distance.
    pub fn reset_camera(&self) {
        self.runtime.borrow_mut().showcase.reset_camera();
    }

    /// Record a finished workshop with its quiz score (0-100). Returns the
    /// progress events as JSON.
    pub fn complete_workshop(&self, score: u8) -> Result<String, JsValue> {
        let events = self
            .runtime
            .borrow_mut()
            .showcase
            .complete_workshop(score, today())
            .map_err(js_error)?;
        serde_json::to_string(&events).map_err(js_error)
    }

    /// Record `skill_practice`, `community_participation` or `help_given`.
    /// Returns the progress events as JSON.
    pub fn record_action(&self, name: &str) -> Result<String, JsValue> {
        let action = QuestAction::parse(name).ok_or_else(|| format!("Unknown action '{name}'"))?;
        let events = self
            .runtime
            .borrow_mut()
            .showcase
            .record_action(action, today())
            .map_err(js_error)?;
        serde_json::to_string(&events).map_err(js_error)
    }

    /// Number of particle emitters still running.
    pub fn active_effects(&self) -> usize {
        self.runtime.borrow().showcase.simulator().active_emitters().len()
    }

    /// Switch the dashboard range (`7d`, `30d`, `90d`, `1y`).
    pub fn set_time_range(&self, code: &str) -> Result<(), JsValue> {
        let range = TimeRange::parse(code).ok_or_else(|| format!("Unknown time range '{code}'"))?;
        let now = window().map_or(0.0, |w| now_ms(&w));
        self.runtime.borrow_mut().dashboard.set_time_range(range, now);
        Ok(())
    }

    /// Dashboard metrics and datasets as pretty JSON.
    pub fn export_dashboard(&self) -> Result<String, JsValue> {
        let timestamp: String = js_sys::Date::new_0().to_iso_string().into();
        self.runtime
            .borrow()
            .dashboard
            .export_json(&timestamp)
            .map_err(js_error)
    }

    /// Current headline counters as `[label, value]` pairs in JSON.
    pub fn counters_json(&self) -> String {
        serde_json::to_string(&self.runtime.borrow().dashboard.counter_displays()).unwrap_or_default()
    }
}

impl App {
    fn listen(&mut self, target: &EventTarget, kind: &'static str, listener: Listener) -> Result<(), JsValue> {
        target.add_event_listener_with_callback(kind, listener.as_ref().unchecked_ref())?;
        self.listeners.push((target.clone(), kind, listener));
        Ok(())
    }

    fn attach_listeners(&mut self, window: &Window) -> Result<(), JsValue> {
        let showcase_canvas = self.runtime.borrow().surface.as_ref().map(|surface| surface.canvas().clone());

        if let Some(canvas) = showcase_canvas {
            if !canvas.has_attribute("tabindex") {
                canvas.set_attribute("tabindex", "0")?;
            }
            let canvas = EventTarget::from(canvas);

            for kind in MOUSE_EVENTS {
                let runtime = Rc::clone(&self.runtime);
                let listener = Listener::new(move |e: web_sys::Event| {
                    if let Some(mouse) = e.dyn_ref::<MouseEvent>() {
                        let event = mouse_event_to_vitrine(mouse, kind);
                        runtime.borrow_mut().showcase.handle_event(&event);
                    }
                });
                self.listen(&canvas, kind, listener)?;
            }

            let runtime = Rc::clone(&self.runtime);
            let wheel = Listener::new(move |e: web_sys::Event| {
                if let Some(wheel) = e.dyn_ref::<WheelEvent>() {
                    wheel.prevent_default();
                    runtime.borrow_mut().showcase.handle_event(&wheel_event_to_vitrine(wheel));
                }
            });
            self.listen(&canvas, "wheel", wheel)?;

            let runtime = Rc::clone(&self.runtime);
            let keydown = Listener::new(move |e: web_sys::Event| {
                if let Some(key) = e.dyn_ref::<KeyboardEvent>() {
                    let event = keyboard_event_to_vitrine(key);
                    let handled = runtime.borrow_mut().showcase.handle_event(&event);
                    // Space would otherwise scroll the page under the focused canvas.
                    if handled && matches!(event, Event::KeyDown { key: Key::Space }) {
                        key.prevent_default();
                    }
                }
            });
            self.listen(&canvas, "keydown", keydown)?;
        }

        if let Some(query) = dark_query(window) {
            let runtime = Rc::clone(&self.runtime);
            let watched = query.clone();
            let change = Listener::new(move |_: web_sys::Event| {
                let dark = watched.matches();
                log::debug!("system color scheme changed, dark = {dark}");
                runtime.borrow_mut().showcase.set_system_dark(dark);
            });
            self.listen(&EventTarget::from(query), "change", change)?;
        }

        let runtime = Rc::clone(&self.runtime);
        let resize = Listener::new(move |_: web_sys::Event| runtime.borrow_mut().fit_surfaces());
        self.listen(window, "resize", resize)?;
        Ok(())
    }
}

impl Drop for App {
    fn drop(&mut self) {
        for (target, kind, listener) in &self.listeners {
            target
                .remove_event_listener_with_callback(kind, listener.as_ref().unchecked_ref())
                .ok();
        }
        // Breaks the callback's reference to its own slot.
        self.frame.borrow_mut().take();
    }
}

/// Install the panic hook and console logger.
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
    if ConsoleLogger::init().is_err() {
        web_sys::console::warn_1(&JsValue::from_str("logger already installed"));
    }
}
