//! Browser host (WASM only)
//!
//! Subscriptions become `window` event listeners and frame requests become
//! `requestAnimationFrame` calls. Callbacks reach the engine through a `Weak`
//! handle, so the engine owns the host without a reference cycle.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Event, MouseEvent, Window};

use super::{EventKind, FrameHandle, FramePacer, Host, HostEvent, SubscriptionId};
use crate::engine::Engine;
use crate::renderer::CanvasSurface;
use crate::settings::Settings;

/// The engine as mounted in a page
pub type WebEngine = Engine<CanvasSurface, WebHost>;

struct Listener {
    id: SubscriptionId,
    event_type: &'static str,
    callback: Closure<dyn FnMut(Event)>,
}

struct PendingFrame {
    handle: FrameHandle,
    raf_id: i32,
    _callback: Closure<dyn FnMut(f64)>,
}

/// `window`-backed host
pub struct WebHost {
    window: Window,
    engine: Weak<RefCell<WebEngine>>,
    listeners: Vec<Listener>,
    frame: Option<PendingFrame>,
    next_id: u64,
}

impl WebHost {
    pub fn new(window: Window) -> Self {
        Self {
            window,
            engine: Weak::new(),
            listeners: Vec::new(),
            frame: None,
            next_id: 1,
        }
    }

    /// Point callbacks at the engine that owns this host
    pub fn bind(&mut self, engine: Weak<RefCell<WebEngine>>) {
        self.engine = engine;
    }

    fn next_id(&mut self) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    fn window_size(window: &Window) -> (u32, u32) {
        let dim = |v: Result<JsValue, JsValue>| {
            v.ok().and_then(|v| v.as_f64()).map(|f| f.max(0.0) as u32).unwrap_or(0)
        };
        (dim(window.inner_width()), dim(window.inner_height()))
    }
}

/// Run `f` on the engine if it is still alive and not already borrowed
fn with_engine(engine: &Weak<RefCell<WebEngine>>, what: &str, f: impl FnOnce(&mut WebEngine)) {
    let Some(engine) = engine.upgrade() else {
        return;
    };
    match engine.try_borrow_mut() {
        Ok(mut engine) => f(&mut engine),
        Err(_) => log::warn!("Engine busy, dropping {}", what),
    };
}

impl FramePacer for WebHost {
    fn request_frame(&mut self) -> Option<FrameHandle> {
        let handle = FrameHandle(self.next_id());
        let engine = self.engine.clone();
        let callback = Closure::<dyn FnMut(f64)>::new(move |_time: f64| {
            with_engine(&engine, "frame", |e| {
                e.on_frame(handle);
            });
        });

        match self
            .window
            .request_animation_frame(callback.as_ref().unchecked_ref())
        {
            Ok(raf_id) => {
                // Replacing the previous (already fired) callback is safe even
                // while it is still on the stack
                self.frame = Some(PendingFrame {
                    handle,
                    raf_id,
                    _callback: callback,
                });
                Some(handle)
            }
            Err(e) => {
                log::error!("requestAnimationFrame failed: {:?}", e);
                None
            }
        }
    }

    fn cancel_frame(&mut self, handle: FrameHandle) {
        if self.frame.as_ref().is_some_and(|f| f.handle == handle) {
            if let Some(frame) = self.frame.take() {
                if let Err(e) = self.window.cancel_animation_frame(frame.raf_id) {
                    log::error!("cancelAnimationFrame failed: {:?}", e);
                }
            }
        }
    }
}

impl Host for WebHost {
    fn viewport(&self) -> (u32, u32) {
        Self::window_size(&self.window)
    }

    fn subscribe(&mut self, kind: EventKind) -> SubscriptionId {
        let id = SubscriptionId(self.next_id());
        let engine = self.engine.clone();

        let (event_type, callback): (&'static str, Closure<dyn FnMut(Event)>) = match kind {
            EventKind::Resize => {
                let window = self.window.clone();
                let cb = Closure::<dyn FnMut(_)>::new(move |_event: Event| {
                    let (width, height) = WebHost::window_size(&window);
                    with_engine(&engine, "resize", |e| {
                        e.notify(HostEvent::Resize { width, height })
                    });
                });
                ("resize", cb)
            }
            EventKind::PointerMove => {
                let cb = Closure::<dyn FnMut(_)>::new(move |event: Event| {
                    if let Some(mouse) = event.dyn_ref::<MouseEvent>() {
                        let x = mouse.client_x() as f64;
                        let y = mouse.client_y() as f64;
                        with_engine(&engine, "pointer move", |e| {
                            e.notify(HostEvent::PointerMove { x, y })
                        });
                    }
                });
                ("mousemove", cb)
            }
            EventKind::PointerLeave => {
                // `mouseout` with no related target = the pointer left the window
                let cb = Closure::<dyn FnMut(_)>::new(move |event: Event| {
                    let left_window = event
                        .dyn_ref::<MouseEvent>()
                        .is_some_and(|m| m.related_target().is_none());
                    if left_window {
                        with_engine(&engine, "pointer leave", |e| {
                            e.notify(HostEvent::PointerLeave)
                        });
                    }
                });
                ("mouseout", cb)
            }
        };

        if let Err(e) = self
            .window
            .add_event_listener_with_callback(event_type, callback.as_ref().unchecked_ref())
        {
            log::error!("Failed to add {} listener: {:?}", event_type, e);
        }
        self.listeners.push(Listener {
            id,
            event_type,
            callback,
        });
        id
    }

    fn unsubscribe(&mut self, id: SubscriptionId) {
        let Some(idx) = self.listeners.iter().position(|l| l.id == id) else {
            return;
        };
        let listener = self.listeners.swap_remove(idx);
        let func: &js_sys::Function = listener.callback.as_ref().unchecked_ref();
        if let Err(e) = self
            .window
            .remove_event_listener_with_callback(listener.event_type, func)
        {
            log::error!("Failed to remove {} listener: {:?}", listener.event_type, e);
        }
    }
}

impl Drop for WebHost {
    fn drop(&mut self) {
        // Listeners must be detached before their closures are freed
        let ids: Vec<SubscriptionId> = self.listeners.iter().map(|l| l.id).collect();
        for id in ids {
            self.unsubscribe(id);
        }
        if let Some(frame) = self.frame.take() {
            let _ = self.window.cancel_animation_frame(frame.raf_id);
        }
    }
}

/// Mount an engine on the canvas with id `canvas_id`
pub fn mount(canvas_id: &str, settings: Settings) -> crate::Result<Rc<RefCell<WebEngine>>> {
    let window =
        web_sys::window().ok_or_else(|| crate::Error::Surface("no window".to_string()))?;
    let surface = CanvasSurface::from_element_id(canvas_id)?;
    surface.apply_layer_style(settings.opacity);

    let engine = Rc::new(RefCell::new(Engine::new(surface, WebHost::new(window), settings)?));
    engine.borrow_mut().host_mut().bind(Rc::downgrade(&engine));

    log::info!("Mounted on #{}", canvas_id);
    Ok(engine)
}

/// JS handle to a mounted particle field. Stops the engine when freed.
#[wasm_bindgen]
pub struct PixelBlast {
    engine: Rc<RefCell<WebEngine>>,
}

#[wasm_bindgen]
impl PixelBlast {
    /// Mount on `<canvas id=canvas_id>` using stored (or default) settings
    #[wasm_bindgen(constructor)]
    pub fn new(canvas_id: &str) -> Result<PixelBlast, JsValue> {
        Self::with_settings_json(canvas_id, None)
    }

    /// Mount with explicit settings JSON (`undefined` = stored settings)
    #[wasm_bindgen(js_name = withSettings)]
    pub fn with_settings_json(canvas_id: &str, json: Option<String>) -> Result<PixelBlast, JsValue> {
        let settings = match json {
            Some(json) => Settings::from_json(&json).map_err(|e| JsValue::from_str(&e.to_string()))?,
            None => Settings::load(),
        };
        let engine = mount(canvas_id, settings).map_err(|e| JsValue::from_str(&e.to_string()))?;
        Ok(Self { engine })
    }

    pub fn start(&self) {
        self.engine.borrow_mut().start();
    }

    pub fn stop(&self) {
        self.engine.borrow_mut().stop();
    }

    #[wasm_bindgen(js_name = setPointer)]
    pub fn set_pointer(&self, x: f64, y: f64) {
        self.engine.borrow_mut().set_pointer(x, y);
    }

    #[wasm_bindgen(js_name = clearPointer)]
    pub fn clear_pointer(&self) {
        self.engine.borrow_mut().clear_pointer();
    }

    #[wasm_bindgen(js_name = particleCount)]
    pub fn particle_count(&self) -> usize {
        self.engine.borrow().particles().len()
    }

    #[wasm_bindgen(js_name = isRunning)]
    pub fn is_running(&self) -> bool {
        self.engine.borrow().is_running()
    }

    /// Validate settings JSON and store it for the next mount
    #[wasm_bindgen(js_name = saveSettings)]
    pub fn save_settings(json: &str) -> Result<(), JsValue> {
        Settings::from_json(json)
            .and_then(|settings| settings.save())
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }
}

impl Drop for PixelBlast {
    fn drop(&mut self) {
        if let Ok(mut engine) = self.engine.try_borrow_mut() {
            engine.stop();
        }
    }
}
