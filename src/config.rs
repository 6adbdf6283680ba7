//! Application-level configuration constants.

// Timing
pub const TICK_MS: u32 = 1_000;
pub const TARGET_STEP_SECONDS: i64 = 60;

// Sound defaults
pub const DEFAULT_VOLUME: f64 = 0.5;
pub const VOLUME_STEP: f64 = 0.1;
pub const DEFAULT_INTERVAL_SECONDS: u32 = 1;
pub const MAX_INTERVAL_SECONDS: u32 = 3_600;

// Window placement (pixels from the top-left corner of the page)
pub const DEFAULT_POSITION_X: i32 = 20;
pub const DEFAULT_POSITION_Y: i32 = 20;

// Custom sound upload
pub const CUSTOM_SOUND_ACCEPT: &str = "audio/mp3,audio/wav";

/// A named remote audio asset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SoundPreset {
    pub name: &'static str,
    pub url: &'static str,
}

/// A named target duration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimerPreset {
    pub label: &'static str,
    pub seconds: u32,
}

pub const SOUND_PRESETS: &[SoundPreset] = &[
    SoundPreset {
        name: "Tick",
        url: "https://assets.mixkit.co/active_storage/sfx/2571/2571-preview.mp3",
    },
    SoundPreset {
        name: "Bell",
        url: "https://assets.mixkit.co/active_storage/sfx/2568/2568-preview.mp3",
    },
    SoundPreset {
        name: "Click",
        url: "https://assets.mixkit.co/active_storage/sfx/2570/2570-preview.mp3",
    },
];

pub const TIMER_PRESETS: &[TimerPreset] = &[
    TimerPreset { label: "1 min", seconds: 60 },
    TimerPreset { label: "3 min", seconds: 180 },
    TimerPreset { label: "5 min", seconds: 300 },
    TimerPreset { label: "10 min", seconds: 600 },
];
