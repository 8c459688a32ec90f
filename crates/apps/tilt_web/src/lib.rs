use console_error_panic_hook::set_once;
use foundation::time::Time;
use orientation::RawOrientationSample;
use scroll::{PipelineConfig, TiltController};
use std::cell::RefCell;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{DeviceOrientationEvent, Event, Window};

mod dom;
use dom::{DomGeometry, DomScroll};

type PageController = TiltController<DomGeometry, DomScroll>;

struct Pump {
    handle: i32,
    due: Time,
}

thread_local! {
    static CONTROLLER: RefCell<Option<PageController>> = const { RefCell::new(None) };
    static PUMP: RefCell<Option<Pump>> = const { RefCell::new(None) };
    static LISTENERS: RefCell<Vec<Closure<dyn FnMut(Event)>>> = const { RefCell::new(Vec::new()) };
}

fn window() -> Result<Window, JsValue> {
    web_sys::window().ok_or_else(|| JsValue::from_str("no window"))
}

fn now() -> Time {
    Time::from_ms(js_sys::Date::now())
}

fn log(msg: &str) {
    web_sys::console::log_1(&JsValue::from_str(msg));
}

fn with_controller<R>(f: impl FnOnce(&mut PageController) -> R) -> Option<R> {
    CONTROLLER.with(|c| c.borrow_mut().as_mut().map(f))
}

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    set_once();
    Ok(())
}

/// Measure the page, reset scroll and start listening for orientation events.
///
/// `config_json` may override any subset of the pipeline tunables.
#[wasm_bindgen]
pub fn load(config_json: Option<String>) -> Result<(), JsValue> {
    let config = match config_json.as_deref() {
        Some(json) => {
            PipelineConfig::from_json_str(json).map_err(|e| JsValue::from_str(&e.to_string()))?
        }
        None => PipelineConfig::default(),
    };

    let window = window()?;
    let document = window
        .document()
        .ok_or_else(|| JsValue::from_str("no document"))?;

    let mut controller = TiltController::new(
        config,
        DomGeometry::new(&window, &document)?,
        DomScroll::new(&document)?,
    );
    controller.load();
    CONTROLLER.with(|c| *c.borrow_mut() = Some(controller));

    install_listeners(&window)
}

/// Feed one sensor reading. Returns `[top, left]`, or nothing before `load`.
#[wasm_bindgen]
pub fn handle_orientation(alpha: f64, beta: f64, gamma: f64) -> Option<Vec<i32>> {
    let sample = RawOrientationSample::new(alpha, beta, gamma);
    with_controller(|c| {
        let position = c.handle_sample(&sample).position;
        vec![position.top as i32, position.left as i32]
    })
}

#[wasm_bindgen]
pub fn handle_resize() {
    let at = now();
    with_controller(|c| c.handle_resize(at));
    schedule_pump();
}

#[wasm_bindgen]
pub fn handle_orientation_change() {
    let at = now();
    with_controller(|c| c.handle_orientation_change(at));
    schedule_pump();
}

fn listen(window: &Window, kind: &str, f: impl FnMut(Event) + 'static) -> Result<(), JsValue> {
    let closure = Closure::<dyn FnMut(Event)>::new(f);
    window.add_event_listener_with_callback(kind, closure.as_ref().unchecked_ref())?;
    LISTENERS.with(|l| l.borrow_mut().push(closure));
    Ok(())
}

fn install_listeners(window: &Window) -> Result<(), JsValue> {
    let already = LISTENERS.with(|l| !l.borrow().is_empty());
    if already {
        return Ok(());
    }

    listen(window, "deviceorientation", |event: Event| {
        let Ok(event) = event.dyn_into::<DeviceOrientationEvent>() else {
            return;
        };
        // Browsers without a gyroscope still fire the event, with null angles.
        if let (Some(alpha), Some(beta), Some(gamma)) = (event.alpha(), event.beta(), event.gamma())
        {
            handle_orientation(alpha, beta, gamma);
        }
    })?;
    listen(window, "resize", |_| handle_resize())?;
    listen(window, "orientationchange", |_| handle_orientation_change())?;
    Ok(())
}

/// Keep one `setTimeout` armed for the controller's earliest deadline.
fn schedule_pump() {
    let Some(due) = with_controller(|c| c.next_deadline()).flatten() else {
        return;
    };
    let armed_earlier = PUMP.with(|p| p.borrow().as_ref().is_some_and(|pump| pump.due.0 <= due.0));
    if armed_earlier {
        return;
    }

    let Ok(window) = window() else {
        return;
    };
    PUMP.with(|p| {
        if let Some(previous) = p.borrow_mut().take() {
            window.clear_timeout_with_handle(previous.handle);
        }
    });

    let delay_ms = now().until(due).ceil() as i32;
    let fire = Closure::once_into_js(move || {
        PUMP.with(|p| p.borrow_mut().take());
        let at = now();
        with_controller(|c| c.tick(at));
        schedule_pump();
    });
    match window
        .set_timeout_with_callback_and_timeout_and_arguments_0(fire.unchecked_ref(), delay_ms)
    {
        Ok(handle) => PUMP.with(|p| *p.borrow_mut() = Some(Pump { handle, due })),
        Err(err) => log(&format!("failed to arm timer: {err:?}")),
    }
}
