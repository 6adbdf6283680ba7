use crate::utils::revoke_object_url;
use float_timer::audio::HtmlAudioSource;
use float_timer::config::TICK_MS;
use float_timer::display::{DragState, Position};
use float_timer::sound::{SoundConfig, SoundPlayer};
use gloo_timers::callback::Interval;
use log::{debug, warn};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys::{HtmlInputElement, HtmlSelectElement};
use yew::prelude::*;

pub type SharedPlayer = Rc<RefCell<SoundPlayer<HtmlAudioSource>>>;

/// Runs `on_tick` once per second while `running` is true.
///
/// The interval lives inside the effect, so any change of `running` and
/// unmount drop it before another tick can fire. Re-renders with an
/// unchanged flag keep the same single interval.
#[hook]
pub fn use_ticker(running: bool, on_tick: Callback<()>) {
    use_effect_with(running, move |&running| {
        let interval = running.then(|| {
            debug!("Tick driver started");
            Interval::new(TICK_MS, move || on_tick.emit(()))
        });
        move || {
            if interval.is_some() {
                debug!("Tick driver cancelled");
            }
            drop(interval);
        }
    });
}

/// Owns the widget's sound player for the component lifetime.
///
/// On unmount the active audio element is released and the object URL of a
/// custom upload is revoked.
#[hook]
pub fn use_sound_player() -> SharedPlayer {
    let player = use_mut_ref(|| SoundPlayer::<HtmlAudioSource>::new(SoundConfig::default()));
    {
        let player = player.clone();
        use_effect_with((), move |_| {
            move || {
                if let Some(url) = player.borrow_mut().shutdown() {
                    revoke_object_url(&url);
                }
            }
        });
    }
    player
}

/// Mouse callbacks for a draggable window.
#[derive(Clone)]
pub struct DragHandle {
    pub on_mouse_down: Callback<MouseEvent>,
    pub on_mouse_move: Callback<MouseEvent>,
}

/// Drag-to-move: mouse down on the window grabs it at `position`, mouse
/// move reports new positions through `on_move` and a `mouseup` anywhere in
/// the document lets go.
#[hook]
pub fn use_drag(position: Position, on_move: Callback<Position>) -> DragHandle {
    let drag = use_mut_ref(DragState::default);

    {
        let drag = drag.clone();
        use_effect_with((), move |_| {
            let listener = Closure::<dyn Fn()>::new(move || {
                let mut drag = drag.borrow_mut();
                if drag.is_dragging() {
                    drag.end();
                    debug!("Window released");
                }
            });
            let document = gloo_utils::document();
            if let Err(e) = document
                .add_event_listener_with_callback("mouseup", listener.as_ref().unchecked_ref())
            {
                warn!("Could not attach mouseup listener: {:?}", e);
            }
            move || {
                if let Err(e) = document.remove_event_listener_with_callback(
                    "mouseup",
                    listener.as_ref().unchecked_ref(),
                ) {
                    warn!("Could not detach mouseup listener: {:?}", e);
                }
                drop(listener);
            }
        });
    }

    let on_mouse_down = {
        let drag = drag.clone();
        Callback::from(move |e: MouseEvent| {
            // Sliders and selects keep their own pointer gestures.
            if e.target_dyn_into::<HtmlInputElement>().is_some()
                || e.target_dyn_into::<HtmlSelectElement>().is_some()
            {
                return;
            }
            drag.borrow_mut().begin(e.client_x(), e.client_y(), position);
        })
    };

    let on_mouse_move = Callback::from(move |e: MouseEvent| {
        let next = drag.borrow().drag_to(e.client_x(), e.client_y());
        if let Some(next) = next {
            on_move.emit(next);
        }
    });

    DragHandle {
        on_mouse_down,
        on_mouse_move,
    }
}
