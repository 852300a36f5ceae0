#![cfg(target_arch = "wasm32")]
mod audio;
mod canvas;
mod dom;
mod frame;

use std::cell::RefCell;
use std::rc::Rc;

use presence_core::{PresenceConfig, PresenceEngine, PresenceError, PresenceState};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys as web;

use audio::{AnalyserCapture, MediaGraph};
use canvas::CanvasSurface;
use frame::{FrameLoop, SharedEngine};

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("presence-web loaded");
    Ok(())
}

fn to_js(e: PresenceError) -> JsValue {
    JsValue::from_str(&e.to_string())
}

type Listener = (web::EventTarget, &'static str, Closure<dyn FnMut()>);

fn listen(
    target: &web::EventTarget,
    event: &'static str,
    handler: impl FnMut() + 'static,
) -> Result<Listener, JsValue> {
    let closure = Closure::wrap(Box::new(handler) as Box<dyn FnMut()>);
    target.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())?;
    Ok((target.clone(), event, closure))
}

fn unlisten(listeners: &mut Vec<Listener>) {
    for (target, event, closure) in listeners.drain(..) {
        let _ = target.remove_event_listener_with_callback(event, closure.as_ref().unchecked_ref());
    }
}

/// JS-facing handle: one engine, attached to at most one canvas at a time.
#[wasm_bindgen]
pub struct PresenceHandle {
    engine: SharedEngine,
    analyser: Rc<RefCell<Option<web::AnalyserNode>>>,
    media: Option<MediaGraph>,
    frames: Option<FrameLoop>,
    window_listeners: Vec<Listener>,
    media_listeners: Vec<Listener>,
}

#[wasm_bindgen]
impl PresenceHandle {
    /// `intro` selects the one-shot session preset.
    #[wasm_bindgen(constructor)]
    pub fn new(intro: bool) -> Result<PresenceHandle, JsValue> {
        let cfg = if intro {
            PresenceConfig::intro()
        } else {
            PresenceConfig::ambient()
        };
        let engine = PresenceEngine::new(cfg).map_err(to_js)?;
        Ok(Self {
            engine: Rc::new(RefCell::new(engine)),
            analyser: Rc::new(RefCell::new(None)),
            media: None,
            frames: None,
            window_listeners: Vec::new(),
            media_listeners: Vec::new(),
        })
    }

    /// Bind to `<canvas id=canvas_id>` and start the animation loop.
    pub fn attach(&mut self, canvas_id: &str) -> Result<(), JsValue> {
        let canvas = dom::find_canvas(canvas_id).map_err(|e| JsValue::from_str(&e.to_string()))?;
        dom::sync_canvas_backing_size(&canvas);
        let surface = CanvasSurface::new(canvas.clone()).map_err(to_js)?;
        let capture = Box::new(AnalyserCapture::new(self.analyser.clone()));
        self.engine
            .borrow_mut()
            .attach(surface, Some(capture))
            .map_err(to_js)?;

        let window = web::window().ok_or_else(|| JsValue::from_str("no window"))?;
        let resize = listen(window.as_ref(), "resize", move || {
            dom::sync_canvas_backing_size(&canvas);
        })?;
        self.window_listeners.push(resize);
        self.frames = Some(FrameLoop::start(self.engine.clone()));
        Ok(())
    }

    /// Stop the loop and release the canvas. The media graph stays wired.
    pub fn detach(&mut self) {
        if let Some(mut frames) = self.frames.take() {
            frames.stop();
        }
        unlisten(&mut self.window_listeners);
        if let Some(surface) = self.engine.borrow_mut().detach() {
            log::info!("[presence] released canvas #{}", surface.canvas().id());
        }
    }

    #[wasm_bindgen(js_name = isAttached)]
    pub fn is_attached(&self) -> bool {
        self.engine.borrow().is_attached()
    }

    #[wasm_bindgen(js_name = setEmotion)]
    pub fn set_emotion(&self, valence: f32, arousal: f32, dominance: f32) {
        self.engine
            .borrow_mut()
            .set_emotion(valence, arousal, dominance);
    }

    /// Accepts "idle", "listening", "talking" or "done".
    #[wasm_bindgen(js_name = setState)]
    pub fn set_state(&self, name: &str) -> Result<(), JsValue> {
        let next = PresenceState::parse(name)
            .ok_or_else(|| JsValue::from_str(&format!("unknown state {name:?}")))?;
        self.engine.borrow_mut().set_state(next);
        Ok(())
    }

    pub fn state(&self) -> String {
        self.engine.borrow().state().as_str().to_string()
    }

    #[wasm_bindgen(js_name = pushAmplitudeSample)]
    pub fn push_amplitude_sample(&self, rms: f32) {
        self.engine.borrow().push_amplitude_sample(rms);
    }

    #[wasm_bindgen(js_name = resetSession)]
    pub fn reset_session(&self) {
        self.engine.borrow_mut().reset_session();
    }

    /// Smoothed energy in [0, 1], for overlays.
    pub fn energy(&self) -> f32 {
        self.engine.borrow().envelope().energy()
    }

    /// Drive amplitude and talking/done from an `<audio>` or `<video>`
    /// element: play starts talking, pause returns to listening, ended
    /// finishes the session.
    #[wasm_bindgen(js_name = attachMediaElement)]
    pub fn attach_media_element(&mut self, element: web::HtmlMediaElement) -> Result<(), JsValue> {
        if self.media.is_some() {
            return Err(JsValue::from_str("a media element is already attached"));
        }
        let graph = MediaGraph::build(element).map_err(to_js)?;
        *self.analyser.borrow_mut() = Some(graph.analyser.clone());

        let target: &web::EventTarget = graph.element.as_ref();
        let ctx = graph.ctx.clone();
        let engine = self.engine.clone();
        self.media_listeners.push(listen(target, "play", move || {
            audio::resume(&ctx);
            engine.borrow_mut().set_state(PresenceState::Talking);
        })?);
        let engine = self.engine.clone();
        self.media_listeners.push(listen(target, "pause", move || {
            let mut engine = engine.borrow_mut();
            if engine.state() == PresenceState::Talking {
                engine.set_state(PresenceState::Listening);
            }
        })?);
        let engine = self.engine.clone();
        self.media_listeners.push(listen(target, "ended", move || {
            engine.borrow_mut().set_state(PresenceState::Done);
        })?);

        graph.resume();
        self.media = Some(graph);
        Ok(())
    }

    /// Unhook the media element's events and stop sampling it.
    #[wasm_bindgen(js_name = detachMediaElement)]
    pub fn detach_media_element(&mut self) {
        unlisten(&mut self.media_listeners);
        self.analyser.borrow_mut().take();
        if let Some(graph) = self.media.take() {
            let _ = graph.ctx.close();
        }
    }
}

impl Drop for PresenceHandle {
    fn drop(&mut self) {
        self.detach();
        self.detach_media_element();
    }
}
