use std::cell::RefCell;
use std::rc::Rc;

use presence_core::{rms, AmplitudeTap, AudioCapture, PresenceError};
use web_sys as web;

const ANALYSER_FFT_SIZE: u32 = 1024;

/// Audio graph for one media element: source -> analyser -> destination.
///
/// A media element can only be wrapped by a single source node, so the graph
/// is built once and outlives attach/detach cycles.
pub struct MediaGraph {
    pub ctx: web::AudioContext,
    pub element: web::HtmlMediaElement,
    pub analyser: web::AnalyserNode,
    _source: web::MediaElementAudioSourceNode,
}

impl MediaGraph {
    pub fn build(element: web::HtmlMediaElement) -> Result<Self, PresenceError> {
        let err = |what: &str, e: wasm_bindgen::JsValue| {
            PresenceError::AudioSetup(format!("{what}: {e:?}"))
        };
        let ctx = web::AudioContext::new().map_err(|e| err("AudioContext", e))?;
        let source = ctx
            .create_media_element_source(&element)
            .map_err(|e| err("MediaElementAudioSourceNode", e))?;
        let analyser = ctx.create_analyser().map_err(|e| err("AnalyserNode", e))?;
        analyser.set_fft_size(ANALYSER_FFT_SIZE);
        source
            .connect_with_audio_node(&analyser)
            .map_err(|e| err("connect source", e))?;
        analyser
            .connect_with_audio_node(&ctx.destination())
            .map_err(|e| err("connect destination", e))?;
        log::info!("[audio] media graph ready (fft {ANALYSER_FFT_SIZE})");
        Ok(Self {
            ctx,
            element,
            analyser,
            _source: source,
        })
    }

    pub fn resume(&self) {
        resume(&self.ctx);
    }
}

/// Browsers start contexts suspended until a user gesture.
pub fn resume(ctx: &web::AudioContext) {
    let promise: js_sys::Promise = match ctx.resume() {
        Ok(p) => p,
        Err(e) => {
            log::warn!("[audio] resume failed: {e:?}");
            return;
        }
    };
    wasm_bindgen_futures::spawn_local(async move {
        if let Err(e) = wasm_bindgen_futures::JsFuture::from(promise).await {
            log::warn!("[audio] resume rejected: {e:?}");
        }
    });
}

/// Samples whichever analyser is currently wired, once per tick.
pub struct AnalyserCapture {
    analyser: Rc<RefCell<Option<web::AnalyserNode>>>,
    buffer: Vec<f32>,
    tap: Option<AmplitudeTap>,
}

impl AnalyserCapture {
    pub fn new(analyser: Rc<RefCell<Option<web::AnalyserNode>>>) -> Self {
        Self {
            analyser,
            buffer: vec![0.0; ANALYSER_FFT_SIZE as usize],
            tap: None,
        }
    }
}

impl AudioCapture for AnalyserCapture {
    fn start(&mut self, tap: AmplitudeTap) -> Result<(), PresenceError> {
        self.tap = Some(tap);
        Ok(())
    }

    fn poll(&mut self) {
        let (Some(tap), Some(analyser)) = (self.tap.as_ref(), self.analyser.borrow().clone())
        else {
            return;
        };
        let n = analyser.fft_size() as usize;
        if self.buffer.len() != n {
            self.buffer.resize(n, 0.0);
        }
        analyser.get_float_time_domain_data(&mut self.buffer);
        tap.push(rms(&self.buffer));
    }

    fn stop(&mut self) {
        self.tap = None;
    }
}
