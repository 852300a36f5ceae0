use std::cell::{Cell, RefCell};
use std::rc::Rc;

use presence_core::{PresenceEngine, TickOutcome};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

use crate::canvas::CanvasSurface;

pub type SharedEngine = Rc<RefCell<PresenceEngine<CanvasSurface>>>;

/// requestAnimationFrame driver. Ticks until stopped or the engine detaches.
pub struct FrameLoop {
    running: Rc<Cell<bool>>,
    pending: Rc<Cell<Option<i32>>>,
    tick: Rc<RefCell<Option<Closure<dyn FnMut()>>>>,
}

fn request_frame(tick: &Rc<RefCell<Option<Closure<dyn FnMut()>>>>) -> Option<i32> {
    let w = web::window()?;
    let slot = tick.borrow();
    let closure = slot.as_ref()?;
    w.request_animation_frame(closure.as_ref().unchecked_ref()).ok()
}

impl FrameLoop {
    pub fn start(engine: SharedEngine) -> Self {
        let running = Rc::new(Cell::new(true));
        let pending = Rc::new(Cell::new(None));
        let tick: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));

        let tick_clone = tick.clone();
        let running_tick = running.clone();
        let pending_tick = pending.clone();
        *tick.borrow_mut() = Some(Closure::wrap(Box::new(move || {
            pending_tick.set(None);
            if !running_tick.get() {
                return;
            }
            let outcome = engine.borrow_mut().tick();
            if outcome == TickOutcome::Detached {
                running_tick.set(false);
                return;
            }
            pending_tick.set(request_frame(&tick_clone));
        }) as Box<dyn FnMut()>));

        pending.set(request_frame(&tick));
        log::debug!("[frame] loop started");
        Self {
            running,
            pending,
            tick,
        }
    }

    pub fn stop(&mut self) {
        self.running.set(false);
        if let (Some(id), Some(w)) = (self.pending.take(), web::window()) {
            let _ = w.cancel_animation_frame(id);
        }
        // breaks the closure's reference to its own slot
        self.tick.borrow_mut().take();
        log::debug!("[frame] loop stopped");
    }
}

impl Drop for FrameLoop {
    fn drop(&mut self) {
        self.stop();
    }
}
