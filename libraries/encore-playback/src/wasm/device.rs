//! `HTMLAudioElement`-backed streaming device

use crate::{DeviceError, DeviceEvent, LoadId, MediaDevice};
use std::cell::Cell;
use std::rc::Rc;
use wasm_bindgen::{closure::Closure, JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::{Event, HtmlAudioElement};

type Dispatch = Rc<dyn Fn(DeviceEvent)>;
type Listener = Closure<dyn FnMut(Event)>;

const LISTENED: [&str; 4] = ["timeupdate", "loadedmetadata", "ended", "error"];

/// Browser audio element driven by the playback controller
///
/// The element's listeners are attached once, in [`HtmlAudioDevice::new`],
/// and live exactly as long as the device. Every event is stamped with the
/// load tag current at the time it fires.
pub struct HtmlAudioDevice {
    element: HtmlAudioElement,
    load: Rc<Cell<LoadId>>,
    dispatch: Dispatch,
    listeners: Vec<(&'static str, Listener)>,
}

impl HtmlAudioDevice {
    /// Create the element and attach its listeners
    ///
    /// # Errors
    /// Returns `Unavailable` outside a DOM environment
    pub fn new(dispatch: impl Fn(DeviceEvent) + 'static) -> Result<Self, DeviceError> {
        let element = HtmlAudioElement::new().map_err(|_| DeviceError::Unavailable)?;
        let load = Rc::new(Cell::new(LoadId::NONE));
        let dispatch: Dispatch = Rc::new(dispatch);

        let mut listeners = Vec::with_capacity(LISTENED.len());
        for kind in LISTENED {
            let source = element.clone();
            let tag = Rc::clone(&load);
            let sink = Rc::clone(&dispatch);

            let listener = Listener::new(move |_: Event| {
                let load = tag.get();
                let event = match kind {
                    "timeupdate" => DeviceEvent::time_update(load, source.current_time()),
                    "loadedmetadata" => DeviceEvent::duration_known(load, source.duration()),
                    "ended" => DeviceEvent::finished(load),
                    _ => DeviceEvent::failed(load, media_error_message(&source)),
                };
                sink(event);
            });

            element
                .add_event_listener_with_callback(kind, listener.as_ref().unchecked_ref())
                .map_err(|_| DeviceError::Unavailable)?;
            listeners.push((kind, listener));
        }

        Ok(Self {
            element,
            load,
            dispatch,
            listeners,
        })
    }
}

impl MediaDevice for HtmlAudioDevice {
    fn load(&mut self, url: &str, load: LoadId) -> Result<(), DeviceError> {
        self.load.set(load);
        self.element.set_src(url);
        Ok(())
    }

    fn play(&mut self) -> Result<(), DeviceError> {
        let promise = self
            .element
            .play()
            .map_err(|e| DeviceError::PlaybackRejected(js_message(&e)))?;

        // Rejections arrive later; report them against the load they belong to
        let load = self.load.get();
        let sink = Rc::clone(&self.dispatch);
        wasm_bindgen_futures::spawn_local(async move {
            if let Err(err) = JsFuture::from(promise).await {
                // A pause() racing the play() promise is not a failure
                if error_name(&err).as_deref() != Some("AbortError") {
                    sink(DeviceEvent::failed(load, js_message(&err)));
                }
            }
        });
        Ok(())
    }

    fn pause(&mut self) {
        self.element.pause().ok();
    }

    fn position(&self) -> f64 {
        self.element.current_time()
    }

    fn seek(&mut self, seconds: f64) {
        self.element.set_current_time(seconds);
    }

    fn volume(&self) -> f64 {
        self.element.volume()
    }

    fn set_volume(&mut self, level: f64) {
        self.element.set_volume(level);
    }
}

impl Drop for HtmlAudioDevice {
    fn drop(&mut self) {
        self.element.pause().ok();
        for (kind, listener) in &self.listeners {
            self.element
                .remove_event_listener_with_callback(kind, listener.as_ref().unchecked_ref())
                .ok();
        }
    }
}

fn media_error_message(element: &HtmlAudioElement) -> String {
    element
        .error()
        .map(|e| format!("media error code {}", e.code()))
        .unwrap_or_else(|| "unknown media error".to_string())
}

fn error_name(value: &JsValue) -> Option<String> {
    js_sys::Reflect::get(value, &JsValue::from_str("name"))
        .ok()
        .and_then(|name| name.as_string())
}

fn js_message(value: &JsValue) -> String {
    value
        .as_string()
        .or_else(|| {
            js_sys::Reflect::get(value, &JsValue::from_str("message"))
                .ok()
                .and_then(|m| m.as_string())
        })
        .unwrap_or_else(|| format!("{value:?}"))
}
