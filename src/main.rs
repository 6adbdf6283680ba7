//! Floating timer widget built with Yew.
//! Wires the clock engine and sound player to the view components.

use float_timer::display::{DisplayPreferences, Position};
use float_timer::{ClockEngine, CycleDirection, Transition};
use log::{debug, info};
use web_sys::File;
use yew::prelude::*;

mod components;
mod hooks;
mod utils;

use components::{ClockFace, Header, PresetNavigator, SettingsPanel, Transport};
use hooks::{use_drag, use_sound_player, use_ticker};
use utils::{now_unix_seconds, object_url_for, revoke_object_url};

/// The floating timer window: clock view or settings panel, header buttons
/// and drag-to-move.
#[function_component(TimerWidget)]
fn timer_widget() -> Html {
    let engine = use_mut_ref(ClockEngine::new);
    let player = use_sound_player();
    let prefs = use_state(DisplayPreferences::default);
    let drag = {
        let current = prefs.position;
        let prefs = prefs.clone();
        let on_move = Callback::from(move |position: Position| {
            prefs.set(DisplayPreferences { position, ..*prefs });
        });
        use_drag(current, on_move)
    };
    let rerender = use_force_update();

    let snapshot = engine.borrow().state();
    let phase = engine.borrow().phase();
    let preset_label = engine.borrow().preset().label;
    let timer_preset = engine.borrow().preset_index();
    let sound = player.borrow().config().clone();
    let can_preview = player.borrow().is_loaded();

    // One-second driver; exists only while the engine is running.
    {
        let engine = engine.clone();
        let player = player.clone();
        let rerender = rerender.clone();
        let on_tick = Callback::from(move |_: ()| {
            let outcome = engine.borrow_mut().tick(now_unix_seconds(), player.borrow().config());
            let player = player.borrow();
            if outcome.periodic_cue {
                player.play_tick();
            }
            if outcome.completed {
                player.play_completion();
            }
            if outcome.advanced || outcome.completed {
                rerender.force_update();
            }
        });
        use_ticker(snapshot.running, on_tick);
    }

    // Engine mutations report what happened; a completion here plays the
    // sound the same way a completing tick does.
    let settle = {
        let player = player.clone();
        let rerender = rerender.clone();
        move |transition: Transition| match transition {
            Transition::Ignored => {}
            Transition::Applied => rerender.force_update(),
            Transition::Completed => {
                player.borrow().play_completion();
                rerender.force_update();
            }
        }
    };
    let on_toggle = {
        let engine = engine.clone();
        let settle = settle.clone();
        Callback::from(move |_: ()| {
            let transition = engine.borrow_mut().toggle();
            settle(transition);
        })
    };
    let on_reset = {
        let engine = engine.clone();
        let rerender = rerender.clone();
        Callback::from(move |_: ()| {
            engine.borrow_mut().reset();
            rerender.force_update();
        })
    };

    let on_adjust = {
        let engine = engine.clone();
        let rerender = rerender.clone();
        Callback::from(move |delta: i64| {
            if engine.borrow_mut().adjust_target(delta) {
                rerender.force_update();
            }
        })
    };
    let on_cycle = {
        let engine = engine.clone();
        let settle = settle.clone();
        Callback::from(move |direction: CycleDirection| {
            let transition = engine.borrow_mut().cycle_preset(direction);
            settle(transition);
        })
    };
    let on_timer_preset = {
        let engine = engine.clone();
        Callback::from(move |index: usize| {
            let transition = engine.borrow_mut().select_preset(index);
            settle(transition);
        })
    };

    let on_toggle_sound = {
        let player = player.clone();
        let rerender = rerender.clone();
        Callback::from(move |_: ()| {
            player.borrow_mut().toggle_enabled();
            rerender.force_update();
        })
    };
    let on_volume = {
        let player = player.clone();
        let rerender = rerender.clone();
        Callback::from(move |volume: f64| {
            player.borrow_mut().set_volume(volume);
            rerender.force_update();
        })
    };
    let on_sound = {
        let player = player.clone();
        let rerender = rerender.clone();
        Callback::from(move |index: usize| {
            if player.borrow_mut().select_sound(index) {
                rerender.force_update();
            }
        })
    };
    let on_preview = {
        let player = player.clone();
        Callback::from(move |_: ()| {
            player.borrow().preview();
        })
    };
    let on_custom_file = {
        let player = player.clone();
        let rerender = rerender.clone();
        Callback::from(move |file: File| {
            let Some(url) = object_url_for(&file) else {
                return;
            };
            info!("Using custom sound '{}'", file.name());
            if let Some(previous) = player.borrow_mut().set_custom_source(Some(url)) {
                revoke_object_url(&previous);
            }
            rerender.force_update();
        })
    };
    let on_interval = {
        let player = player.clone();
        let rerender = rerender.clone();
        Callback::from(move |seconds: u32| {
            if player.borrow_mut().set_interval_seconds(seconds) {
                rerender.force_update();
            }
        })
    };

    let on_toggle_large = {
        let prefs = prefs.clone();
        Callback::from(move |_: ()| {
            prefs.set(DisplayPreferences {
                large_display: !prefs.large_display,
                ..*prefs
            });
        })
    };
    let on_toggle_settings = {
        let prefs = prefs.clone();
        Callback::from(move |_: ()| {
            debug!("Settings panel {}", if prefs.settings_open { "closed" } else { "opened" });
            prefs.set(DisplayPreferences {
                settings_open: !prefs.settings_open,
                ..*prefs
            });
        })
    };

    html! {
        <div class="floating-window"
            style={format!("left: {}px; top: {}px;", prefs.position.x, prefs.position.y)}
            onmousedown={drag.on_mouse_down.clone()}
            onmousemove={drag.on_mouse_move.clone()}
        >
            <div class="widget-body">
                <Header
                    large_display={prefs.large_display}
                    sound_enabled={sound.enabled}
                    {on_toggle_large}
                    {on_toggle_settings}
                    {on_toggle_sound}
                />

                if prefs.settings_open {
                    <SettingsPanel
                        volume={sound.volume}
                        interval_seconds={sound.interval_seconds.get()}
                        selected_sound={sound.selected_sound}
                        {can_preview}
                        {timer_preset}
                        {on_volume}
                        {on_sound}
                        {on_preview}
                        {on_custom_file}
                        {on_interval}
                        {on_timer_preset}
                        on_cycle={on_cycle.clone()}
                    />
                } else {
                    <div class="clock-view">
                        <ClockFace
                            elapsed={snapshot.elapsed}
                            target={snapshot.target}
                            running={snapshot.running}
                            {phase}
                            large_display={prefs.large_display}
                            {on_adjust}
                        />
                        <Transport running={snapshot.running} {on_toggle} {on_reset} />
                        if !snapshot.running {
                            <PresetNavigator label={preset_label} {on_cycle} />
                        }
                    </div>
                }
            </div>
        </div>
    }
}

#[function_component]
pub fn App() -> Html {
    html! { <TimerWidget /> }
}

/// Entry point: installs the panic hook and logger, then mounts the widget.
fn main() {
    console_error_panic_hook::set_once();
    let level = if cfg!(debug_assertions) {
        log::Level::Debug
    } else {
        log::Level::Info
    };
    wasm_logger::init(wasm_logger::Config::new(level));
    info!("Floating timer starting");
    yew::Renderer::<App>::new().render();
}
