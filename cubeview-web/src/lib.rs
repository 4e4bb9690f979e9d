/// Cubeview Web - WebGL2 front end for the cube viewer
///
/// `WebApp` binds a canvas to a camera controller: keydown events drive the
/// camera and a `requestAnimationFrame` loop redraws until `stop` is called.
use std::cell::RefCell;
use std::rc::Rc;

use cubeview_core::{
    CameraController, CancellationToken, Mesh, RenderDriver, RenderError, Scheme,
};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Document, HtmlCanvasElement, KeyboardEvent, Window};

mod backend;

pub use backend::WebGlBackend;

type FrameCallback = Rc<RefCell<Option<Closure<dyn FnMut()>>>>;

/// Camera state and renderer shared by the key listener and the frame loop
struct Viewer {
    controller: CameraController,
    driver: RenderDriver<WebGlBackend>,
}

impl Viewer {
    fn draw(&mut self) -> Result<(), RenderError> {
        self.driver.frame(&self.controller).map(|_| ())
    }
}

#[wasm_bindgen]
pub struct WebApp {
    viewer: Rc<RefCell<Viewer>>,
    token: CancellationToken,
    document: Document,
    listener: Option<Closure<dyn FnMut(KeyboardEvent)>>,
}

#[wasm_bindgen]
impl WebApp {
    /// Set up WebGL on the canvas with id `canvas_id`
    ///
    /// `scheme` is `"orbit"` or `"ortho"`. When the browser has no WebGL2
    /// support the user is alerted and construction fails.
    #[wasm_bindgen(constructor)]
    pub fn new(canvas_id: &str, scheme: &str) -> Result<WebApp, JsValue> {
        let scheme: Scheme = scheme.parse().map_err(to_js)?;
        let window = window()?;
        let document = window
            .document()
            .ok_or_else(|| JsValue::from_str("window has no document"))?;
        let canvas = document
            .get_element_by_id(canvas_id)
            .ok_or_else(|| JsValue::from_str(&format!("no element with id {:?}", canvas_id)))?
            .dyn_into::<HtmlCanvasElement>()
            .map_err(|_| JsValue::from_str(&format!("element {:?} is not a canvas", canvas_id)))?;

        let backend = match WebGlBackend::from_canvas(&canvas) {
            Ok(backend) => backend,
            Err(RenderError::ContextUnavailable) => {
                window.alert_with_message("No webgl for you")?;
                return Err(to_js(RenderError::ContextUnavailable));
            }
            Err(err) => return Err(to_js(err)),
        };
        let driver = RenderDriver::new(backend, &Mesh::cube(scheme.mesh_scale())).map_err(to_js)?;
        log::info!("webgl viewer ready on #{} ({} scheme)", canvas_id, scheme);

        Ok(WebApp {
            viewer: Rc::new(RefCell::new(Viewer {
                controller: CameraController::new(scheme),
                driver,
            })),
            token: CancellationToken::new(),
            document,
            listener: None,
        })
    }

    /// Register the keydown listener and start the animation loop
    pub fn start(&mut self) -> Result<(), JsValue> {
        if self.listener.is_some() {
            return Ok(());
        }

        let viewer = self.viewer.clone();
        let token = self.token.clone();
        let listener = Closure::wrap(Box::new(move |event: KeyboardEvent| {
            if token.is_cancelled() {
                return;
            }
            if let Some(key) = key_char(&event.key()) {
                let outcome = viewer.borrow_mut().controller.handle_key(key);
                log::debug!("key {:?}: {:?}", key, outcome);
            }
        }) as Box<dyn FnMut(KeyboardEvent)>);
        self.document
            .add_event_listener_with_callback("keydown", listener.as_ref().unchecked_ref())?;
        self.listener = Some(listener);

        schedule_frames(self.viewer.clone(), self.token.clone())
    }

    /// Cancel the animation loop and detach the key listener
    pub fn stop(&mut self) {
        self.token.cancel();
        if let Some(listener) = self.listener.take() {
            if let Err(err) = self
                .document
                .remove_event_listener_with_callback("keydown", listener.as_ref().unchecked_ref())
            {
                log::warn!("failed to remove keydown listener: {:?}", err);
            }
        }
    }

    /// Feed a key to the camera as if it had been pressed
    pub fn press(&self, key: &str) -> bool {
        match key_char(key) {
            Some(key) => self.viewer.borrow_mut().controller.handle_key(key).changed(),
            None => false,
        }
    }

    /// Draw one frame immediately
    pub fn render(&self) -> Result<(), JsValue> {
        self.viewer.borrow_mut().draw().map_err(to_js)
    }
}

impl Drop for WebApp {
    fn drop(&mut self) {
        self.stop();
    }
}

/// Drive `viewer` from `requestAnimationFrame` until `token` is cancelled
fn schedule_frames(viewer: Rc<RefCell<Viewer>>, token: CancellationToken) -> Result<(), JsValue> {
    let callback: FrameCallback = Rc::new(RefCell::new(None));
    let handle = callback.clone();

    *handle.borrow_mut() = Some(Closure::wrap(Box::new(move || {
        if token.is_cancelled() {
            log::info!("animation loop stopped");
            // Dropping the closure breaks the Rc cycle
            let _ = callback.borrow_mut().take();
            return;
        }

        if let Err(err) = viewer.borrow_mut().draw() {
            log::error!("frame failed, stopping: {}", err);
            token.cancel();
        }

        if let Some(next) = callback.borrow().as_ref() {
            if let Err(err) = request_animation_frame(next) {
                log::error!("requestAnimationFrame failed: {:?}", err);
            }
        }
    }) as Box<dyn FnMut()>));

    if let Some(first) = handle.borrow().as_ref() {
        request_animation_frame(first)?;
    }
    Ok(())
}

fn request_animation_frame(callback: &Closure<dyn FnMut()>) -> Result<i32, JsValue> {
    window()?.request_animation_frame(callback.as_ref().unchecked_ref())
}

fn window() -> Result<Window, JsValue> {
    web_sys::window().ok_or_else(|| JsValue::from_str("no global window"))
}

fn to_js<E: std::fmt::Display>(err: E) -> JsValue {
    JsValue::from_str(&err.to_string())
}

/// The single character a `KeyboardEvent.key` names, if it names one
///
/// Named keys such as `"Shift"` or `"ArrowLeft"` yield `None`.
fn key_char(key: &str) -> Option<char> {
    let mut chars = key.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Some(c),
        _ => None,
    }
}

#[wasm_bindgen(start)]
pub fn main() -> Result<(), JsValue> {
    // Setup panic hook for better error messages in browser console
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).map_err(to_js)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_char() {
        assert_eq!(key_char("a"), Some('a'));
        assert_eq!(key_char("T"), Some('T'));
        assert_eq!(key_char("Shift"), None);
        assert_eq!(key_char("ArrowLeft"), None);
        assert_eq!(key_char(""), None);
    }
}
