use float_timer::config::TIMER_PRESETS;
use float_timer::sound::SoundConfig;
use float_timer::{ClockEngine, CycleDirection, TimerPhase, TimerState};
use proptest::prelude::*;
use std::num::NonZeroU32;

fn quiet() -> SoundConfig {
    SoundConfig {
        enabled: false,
        ..SoundConfig::default()
    }
}

/// Operations a user can perform on the clock.
#[derive(Debug, Clone)]
enum Op {
    Start,
    Pause,
    Reset,
    Adjust(i64),
    Select(usize),
    Cycle(bool),
    Tick,
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        Just(Op::Start),
        Just(Op::Pause),
        Just(Op::Reset),
        prop_oneof![Just(60i64), Just(-60i64)].prop_map(Op::Adjust),
        (0usize..8).prop_map(Op::Select),
        any::<bool>().prop_map(Op::Cycle),
        Just(Op::Tick),
    ]
}

fn apply(engine: &mut ClockEngine, op: &Op, now: &mut u64) {
    match op {
        Op::Start => {
            engine.start();
        }
        Op::Pause => {
            engine.pause();
        }
        Op::Reset => engine.reset(),
        Op::Adjust(delta) => {
            engine.adjust_target(*delta);
        }
        Op::Select(index) => {
            engine.select_preset(*index);
        }
        Op::Cycle(next) => {
            engine.cycle_preset(if *next {
                CycleDirection::Next
            } else {
                CycleDirection::Prev
            });
        }
        Op::Tick => {
            *now += 1;
            engine.tick(*now, &quiet());
        }
    }
}

proptest! {
    /// Running toward a target counts one second per tick, then stops for good.
    #[test]
    fn counts_up_to_target_then_stops(minutes in 0u32..=20, extra_ticks in 0u64..30) {
        let mut engine = ClockEngine::new();
        engine.adjust_target(i64::from(minutes) * 60);
        let target = engine.state().target;
        engine.start();

        let mut completions = 0;
        let total = u64::from(target) + extra_ticks;
        for now in 1..=total {
            let before = engine.state().elapsed;
            let outcome = engine.tick(now, &quiet());
            if target == 0 || before < target {
                prop_assert_eq!(engine.state().elapsed, before + 1);
            } else {
                prop_assert_eq!(engine.state().elapsed, before);
            }
            if outcome.completed {
                completions += 1;
            }
            if target > 0 {
                prop_assert!(engine.state().elapsed <= target);
            }
        }

        if target > 0 {
            prop_assert_eq!(engine.state().elapsed, target);
            prop_assert!(!engine.is_running());
            prop_assert_eq!(completions, 1);
        } else {
            prop_assert_eq!(u64::from(engine.state().elapsed), total);
            prop_assert!(engine.is_running() || total == 0);
            prop_assert_eq!(completions, 0);
        }
    }

    /// Reset always lands in Idle, whatever happened before.
    #[test]
    fn reset_always_idles(ops in prop::collection::vec(op_strategy(), 0..60)) {
        let mut engine = ClockEngine::new();
        let mut now = 0;
        for op in &ops {
            apply(&mut engine, op, &mut now);
        }
        engine.reset();
        prop_assert_eq!(engine.state(), TimerState { elapsed: 0, target: 0, running: false });
        prop_assert_eq!(engine.phase(), TimerPhase::Idle);
    }

    /// Random interleavings never break the preset index or target bounds.
    #[test]
    fn invariants_hold_under_random_ops(ops in prop::collection::vec(op_strategy(), 0..120)) {
        let mut engine = ClockEngine::new();
        let mut now = 0;
        for op in &ops {
            let before = engine.state();
            apply(&mut engine, op, &mut now);
            let after = engine.state();

            prop_assert!(engine.preset_index() < TIMER_PRESETS.len());
            if after.running && after.target > 0 {
                prop_assert!(
                    after.elapsed <= after.target,
                    "running past target after {:?}: {:?}",
                    op,
                    after
                );
            }
            if let Op::Adjust(_) = op {
                if before.running {
                    prop_assert_eq!(after.target, before.target);
                }
            }
            if let Op::Tick = op {
                prop_assert!(after.elapsed <= before.elapsed + 1);
            }
        }
    }

    /// Periodic cues only land on multiples of the interval, once per second.
    #[test]
    fn cues_land_on_interval_multiples(interval in 1u32..=10, ticks in 1u64..100) {
        let sound = SoundConfig {
            interval_seconds: NonZeroU32::new(interval).unwrap(),
            ..SoundConfig::default()
        };
        let mut engine = ClockEngine::new();
        engine.start();
        let mut cued = Vec::new();
        for now in 1..=ticks {
            if engine.tick(now, &sound).periodic_cue {
                cued.push(now);
            }
        }
        let expected: Vec<u64> = (1..=ticks).filter(|n| n % u64::from(interval) == 0).collect();
        prop_assert_eq!(cued, expected);
    }

    /// A double start never produces double-speed counting.
    #[test]
    fn double_start_counts_once(ticks in 1u64..50) {
        let mut engine = ClockEngine::new();
        engine.start();
        engine.start();
        for now in 1..=ticks {
            engine.tick(now, &quiet());
        }
        prop_assert_eq!(u64::from(engine.state().elapsed), ticks);
    }
}

#[test]
fn preset_cycle_visits_every_preset_and_wraps() {
    let mut engine = ClockEngine::new();
    let seen: Vec<u32> = (0..TIMER_PRESETS.len())
        .map(|_| {
            engine.cycle_preset(CycleDirection::Next);
            engine.state().target
        })
        .collect();
    let mut expected: Vec<u32> = TIMER_PRESETS.iter().skip(1).map(|p| p.seconds).collect();
    expected.push(TIMER_PRESETS[0].seconds);
    assert_eq!(seen, expected);
    assert_eq!(engine.preset_index(), 0);
}
