use orientation::{RotationQuadrant, Viewport};
use scroll::{DebugReadout, GeometrySource, Measurements, ScrollPosition, ScrollSink};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Document, Element, Event, HtmlElement, Window};

pub const WRAPPER_SELECTOR: &str = ".Wrapper";
pub const CANVAS_SELECTOR: &str = ".Wrapper-inner";
pub const ORIENTATION_CLASS: &str = "has-deviceOrientation";

fn query_html(document: &Document, selector: &str) -> Result<HtmlElement, JsValue> {
    document
        .query_selector(selector)?
        .ok_or_else(|| JsValue::from_str(&format!("missing element: {selector}")))?
        .dyn_into::<HtmlElement>()
        .map_err(|_| JsValue::from_str(&format!("not an html element: {selector}")))
}

fn document_element(document: &Document) -> Result<Element, JsValue> {
    document
        .document_element()
        .ok_or_else(|| JsValue::from_str("document has no root element"))
}

/// Reads `window.orientation`, which only some mobile browsers expose.
fn rotation_quadrant(window: &Window) -> RotationQuadrant {
    let degrees = js_sys::Reflect::get(window, &JsValue::from_str("orientation"))
        .ok()
        .and_then(|v| v.as_f64());
    RotationQuadrant::from_degrees(degrees)
}

pub struct DomGeometry {
    window: Window,
    root: Element,
    wrapper: HtmlElement,
    canvas: HtmlElement,
}

impl DomGeometry {
    pub fn new(window: &Window, document: &Document) -> Result<Self, JsValue> {
        Ok(Self {
            window: window.clone(),
            root: document_element(document)?,
            wrapper: query_html(document, WRAPPER_SELECTOR)?,
            canvas: query_html(document, CANVAS_SELECTOR)?,
        })
    }
}

impl GeometrySource for DomGeometry {
    fn measure(&self) -> Measurements {
        Measurements {
            wrapper_height: self.wrapper.offset_height() as f64,
            wrapper_width: self.wrapper.offset_width() as f64,
            canvas_width: self.canvas.offset_width() as f64,
            viewport: Viewport::new(self.root.client_width() as f64, self.root.client_height() as f64),
            rotation: rotation_quadrant(&self.window),
        }
    }
}

/// Optional `.Debug-value--*` elements. Any that are missing are skipped.
struct DebugPanel {
    alpha: Option<Element>,
    beta: Option<Element>,
    gamma: Option<Element>,
    top: Option<Element>,
    left: Option<Element>,
    alpha_normalized: Option<Element>,
    beta_normalized: Option<Element>,
}

impl DebugPanel {
    fn find(document: &Document) -> Self {
        let get = |name: &str| {
            document
                .query_selector(&format!(".Debug-value--{name}"))
                .ok()
                .flatten()
        };
        Self {
            alpha: get("alpha"),
            beta: get("beta"),
            gamma: get("gamma"),
            top: get("top"),
            left: get("left"),
            alpha_normalized: get("alphaModified"),
            beta_normalized: get("betaModified"),
        }
    }

    fn show(&self, readout: &DebugReadout) {
        let rows = [
            (&self.alpha, readout.alpha),
            (&self.beta, readout.beta),
            (&self.gamma, readout.gamma),
            (&self.top, readout.top),
            (&self.left, readout.left),
            (&self.alpha_normalized, readout.alpha_normalized),
            (&self.beta_normalized, readout.beta_normalized),
        ];
        for (el, value) in rows {
            if let Some(el) = el {
                el.set_text_content(Some(&value.to_string()));
            }
        }
    }
}

/// Applies scroll offsets and activation styling to the page.
///
/// Vertical scroll lives on `<html>` in some browsers and `<body>` in
/// others, so both are written.
pub struct DomScroll {
    root: Element,
    body: HtmlElement,
    wrapper: HtmlElement,
    debug: DebugPanel,
    touch_guard: Option<Closure<dyn FnMut(Event)>>,
}

impl DomScroll {
    pub fn new(document: &Document) -> Result<Self, JsValue> {
        Ok(Self {
            root: document_element(document)?,
            body: document
                .body()
                .ok_or_else(|| JsValue::from_str("document has no body"))?,
            wrapper: query_html(document, WRAPPER_SELECTOR)?,
            debug: DebugPanel::find(document),
            touch_guard: None,
        })
    }
}

impl ScrollSink for DomScroll {
    fn apply(&mut self, position: ScrollPosition) {
        let top = position.top.clamp(0, i32::MAX as i64) as i32;
        let left = position.left.clamp(0, i32::MAX as i64) as i32;
        self.root.set_scroll_top(top);
        self.body.set_scroll_top(top);
        self.wrapper.set_scroll_left(left);
    }

    fn mark_orientation_supported(&mut self) {
        if let Err(err) = self.body.class_list().add_1(ORIENTATION_CLASS) {
            web_sys::console::log_1(&err);
        }
    }

    fn suppress_touch_scroll(&mut self) {
        if self.touch_guard.is_some() {
            return;
        }
        let guard = Closure::<dyn FnMut(Event)>::new(|event: Event| {
            event.prevent_default();
            event.stop_propagation();
        });
        if let Err(err) = self
            .wrapper
            .add_event_listener_with_callback("touchmove", guard.as_ref().unchecked_ref())
        {
            web_sys::console::log_1(&err);
            return;
        }
        self.touch_guard = Some(guard);
    }

    fn show_readout(&mut self, readout: &DebugReadout) {
        self.debug.show(readout);
    }
}
