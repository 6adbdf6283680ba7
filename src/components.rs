//! Pure Yew view components for the floating timer.
//!
//! Everything here renders from props and reports user intent through
//! callbacks; the widget in `main.rs` owns all state.

use crate::utils::{parse_index, parse_interval, parse_volume};
use float_timer::config::{
    CUSTOM_SOUND_ACCEPT, MAX_INTERVAL_SECONDS, SOUND_PRESETS, TARGET_STEP_SECONDS, TIMER_PRESETS,
    VOLUME_STEP,
};
use float_timer::{format_time, CycleDirection, TimerPhase};
use web_sys::{File, HtmlInputElement, HtmlSelectElement};
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct HeaderProps {
    pub large_display: bool,
    pub sound_enabled: bool,
    pub on_toggle_large: Callback<()>,
    pub on_toggle_settings: Callback<()>,
    pub on_toggle_sound: Callback<()>,
}

#[function_component(Header)]
pub fn header(props: &HeaderProps) -> Html {
    html! {
        <div class="widget-header">
            <div class="widget-title">
                <span class="icon timer-icon">{ "⏱" }</span>
                <span class="title-text">{ "AI Timer" }</span>
            </div>
            <div class="header-buttons">
                <button class="icon-button"
                    title={if props.large_display { "Smaller display" } else { "Larger display" }}
                    onclick={props.on_toggle_large.reform(|_| ())}
                >
                    { if props.large_display { "⊟" } else { "⊞" } }
                </button>
                <button class="icon-button"
                    title="Settings"
                    onclick={props.on_toggle_settings.reform(|_| ())}
                >
                    { "⚙" }
                </button>
                <button class={classes!("icon-button", props.sound_enabled.then_some("active"))}
                    title={if props.sound_enabled { "Mute" } else { "Unmute" }}
                    aria-pressed={props.sound_enabled.to_string()}
                    onclick={props.on_toggle_sound.reform(|_| ())}
                >
                    { "🔊" }
                </button>
            </div>
        </div>
    }
}

/// Elapsed time, target adjustment arrows and the target line.
#[derive(Properties, PartialEq)]
pub struct ClockFaceProps {
    pub elapsed: u32,
    pub target: u32,
    pub running: bool,
    pub phase: TimerPhase,
    pub large_display: bool,
    pub on_adjust: Callback<i64>,
}

#[function_component(ClockFace)]
pub fn clock_face(props: &ClockFaceProps) -> Html {
    html! {
        <div class={classes!("clock-face", format!("phase-{}", props.phase))}>
            <div class="target-arrows">
                <button class="icon-button"
                    disabled={props.running}
                    onclick={props.on_adjust.reform(|_| TARGET_STEP_SECONDS)}
                >
                    { "▲" }
                </button>
                <button class="icon-button"
                    disabled={props.running}
                    onclick={props.on_adjust.reform(|_| -TARGET_STEP_SECONDS)}
                >
                    { "▼" }
                </button>
            </div>
            <div class={classes!("elapsed", if props.large_display { "large" } else { "normal" })}>
                { format_time(props.elapsed) }
            </div>
            if props.target > 0 && !props.running {
                <div class="target-line">
                    { format!("Target: {}", format_time(props.target)) }
                </div>
            }
        </div>
    }
}

#[derive(Properties, PartialEq)]
pub struct TransportProps {
    pub running: bool,
    pub on_toggle: Callback<()>,
    pub on_reset: Callback<()>,
}

#[function_component(Transport)]
pub fn transport(props: &TransportProps) -> Html {
    html! {
        <div class="transport">
            <button class={classes!("round-button", if props.running { "pause" } else { "play" })}
                title={if props.running { "Pause" } else { "Start" }}
                onclick={props.on_toggle.reform(|_| ())}
            >
                { if props.running { "⏸" } else { "▶" } }
            </button>
            <button class="round-button reset"
                title="Reset"
                onclick={props.on_reset.reform(|_| ())}
            >
                { "↻" }
            </button>
        </div>
    }
}

/// Prev/next arrows around the selected timer preset label.
#[derive(Properties, PartialEq)]
pub struct PresetNavigatorProps {
    pub label: AttrValue,
    pub on_cycle: Callback<CycleDirection>,
}

#[function_component(PresetNavigator)]
pub fn preset_navigator(props: &PresetNavigatorProps) -> Html {
    html! {
        <div class="preset-navigator">
            <button class="icon-button"
                onclick={props.on_cycle.reform(|_| CycleDirection::Prev)}
            >
                { "‹" }
            </button>
            <span class="preset-label">{ props.label.clone() }</span>
            <button class="icon-button"
                onclick={props.on_cycle.reform(|_| CycleDirection::Next)}
            >
                { "›" }
            </button>
        </div>
    }
}

#[derive(Properties, PartialEq)]
pub struct SettingsPanelProps {
    pub volume: f64,
    pub interval_seconds: u32,
    pub selected_sound: usize,
    /// False when the selected sound failed to load.
    pub can_preview: bool,
    pub timer_preset: usize,
    pub on_volume: Callback<f64>,
    pub on_sound: Callback<usize>,
    pub on_preview: Callback<()>,
    pub on_custom_file: Callback<File>,
    pub on_interval: Callback<u32>,
    pub on_timer_preset: Callback<usize>,
    pub on_cycle: Callback<CycleDirection>,
}

#[function_component(SettingsPanel)]
pub fn settings_panel(props: &SettingsPanelProps) -> Html {
    let on_volume = {
        let on_volume = props.on_volume.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            if let Some(volume) = parse_volume(&input.value()) {
                on_volume.emit(volume);
            }
        })
    };
    let on_sound = {
        let on_sound = props.on_sound.clone();
        Callback::from(move |e: Event| {
            let select: HtmlSelectElement = e.target_unchecked_into();
            if let Some(index) = parse_index(&select.value()) {
                on_sound.emit(index);
            }
        })
    };
    let on_custom_file = {
        let on_custom_file = props.on_custom_file.clone();
        Callback::from(move |e: Event| {
            let input: HtmlInputElement = e.target_unchecked_into();
            if let Some(file) = input.files().and_then(|files| files.get(0)) {
                on_custom_file.emit(file);
            }
        })
    };
    let on_interval = {
        let on_interval = props.on_interval.clone();
        Callback::from(move |e: Event| {
            let input: HtmlInputElement = e.target_unchecked_into();
            if let Some(seconds) = parse_interval(&input.value()) {
                on_interval.emit(seconds);
            }
        })
    };
    let on_timer_preset = {
        let on_timer_preset = props.on_timer_preset.clone();
        Callback::from(move |e: Event| {
            let select: HtmlSelectElement = e.target_unchecked_into();
            if let Some(index) = parse_index(&select.value()) {
                on_timer_preset.emit(index);
            }
        })
    };

    html! {
        <div class="settings-panel">
            <div class="form-group">
                <label for="volume">{ "Volume" }</label>
                <input type="range"
                    id="volume"
                    min="0"
                    max="1"
                    step={VOLUME_STEP.to_string()}
                    value={props.volume.to_string()}
                    oninput={on_volume}
                />
            </div>
            <div class="form-group">
                <label for="sound">{ "Sound" }</label>
                <div class="inline-row">
                    <select id="sound" onchange={on_sound}>
                        { for SOUND_PRESETS.iter().enumerate().map(|(index, preset)| html! {
                            <option value={index.to_string()} selected={index == props.selected_sound}>
                                { preset.name }
                            </option>
                        }) }
                    </select>
                    <button class="small-button"
                        disabled={!props.can_preview}
                        onclick={props.on_preview.reform(|_| ())}
                    >
                        { "Play" }
                    </button>
                </div>
            </div>
            <div class="form-group">
                <label for="custom_sound">{ "Custom Sound" }</label>
                <input type="file"
                    id="custom_sound"
                    accept={CUSTOM_SOUND_ACCEPT}
                    onchange={on_custom_file}
                />
            </div>
            <div class="form-group">
                <label for="interval">{ "Interval (seconds)" }</label>
                <input type="number"
                    id="interval"
                    min="1"
                    max={MAX_INTERVAL_SECONDS.to_string()}
                    value={props.interval_seconds.to_string()}
                    onchange={on_interval}
                />
            </div>
            <div class="form-group">
                <label for="timer_preset">{ "Timer Presets" }</label>
                <div class="inline-row">
                    <button class="icon-button" onclick={props.on_cycle.reform(|_| CycleDirection::Prev)}>
                        { "‹" }
                    </button>
                    <select id="timer_preset" onchange={on_timer_preset}>
                        { for TIMER_PRESETS.iter().enumerate().map(|(index, preset)| html! {
                            <option value={index.to_string()} selected={index == props.timer_preset}>
                                { preset.label }
                            </option>
                        }) }
                    </select>
                    <button class="icon-button" onclick={props.on_cycle.reform(|_| CycleDirection::Next)}>
                        { "›" }
                    </button>
                </div>
            </div>
        </div>
    }
}
