//! Integration tests for the reminder loop.

use std::collections::HashMap;
use std::time::Duration;

use nudger_core::dialog::DialogCall;
use nudger_core::random::choose;
use nudger_core::{
    Cancelled, DialogError, MessagePools, PcgRandom, ReminderConfig, ReminderScheduler,
    ResponseBranch, ScriptedGateway, Settings, Sleeper,
};
use proptest::prelude::*;

/// Records every requested sleep and refuses once `budget` is spent.
struct CountingSleeper {
    slept: Vec<Duration>,
    budget: usize,
}

impl CountingSleeper {
    fn new(budget: usize) -> Self {
        Self {
            slept: Vec::new(),
            budget,
        }
    }
}

impl Sleeper for CountingSleeper {
    fn sleep(&mut self, duration: Duration) -> Result<(), Cancelled> {
        if self.slept.len() >= self.budget {
            return Err(Cancelled);
        }
        self.slept.push(duration);
        Ok(())
    }
}

fn scenario_config() -> ReminderConfig {
    ReminderConfig::from_json_str(
        r#"{
            "questions": ["Q"],
            "motivational_messages": ["M"],
            "success_message": "S",
            "settings": {
                "initial_delay_minutes": 0,
                "min_interval_minutes": 5,
                "max_interval_minutes": 5,
                "working_timeout_seconds": 10
            }
        }"#,
    )
    .unwrap()
}

#[test]
fn test_working_scenario_end_to_end() {
    let gateway = ScriptedGateway::new()
        .answer(Some("Working"))
        .answer(Some("Working"))
        .answer(Some("Working"));
    let mut scheduler = ReminderScheduler::new(
        scenario_config(),
        gateway,
        PcgRandom::seeded(1),
        CountingSleeper::new(4),
    );

    let summary = scheduler.run();
    assert_eq!(summary.cycles, 4); // fourth question hits the empty script

    // First sleep is the zero initial delay, every later one exactly 5 minutes.
    let slept = &scheduler.sleeper().slept;
    assert_eq!(slept[0], Duration::ZERO);
    assert_eq!(slept.len(), 4);
    assert!(slept[1..].iter().all(|d| *d == Duration::from_secs(300)));

    let calls = scheduler.gateway().calls();
    match &calls[0] {
        DialogCall::Confirm {
            text,
            title,
            buttons,
        } => {
            assert!(text.starts_with("Q\n\n"));
            assert_eq!(title, "Future Reminder");
            assert_eq!(buttons, &["Wasting".to_string(), "Working".to_string()]);
        }
        other => panic!("expected the question first, got {other:?}"),
    }
    assert_eq!(
        calls[1],
        DialogCall::Alert {
            text: "S".into(),
            title: "Future Reminder".into(),
            button: None,
            timeout: Some(Duration::from_secs(10)),
        }
    );
}

#[test]
fn test_gateway_failure_does_not_stop_loop() {
    let gateway = ScriptedGateway::new()
        .fail(DialogError::Failed("display went away".into()))
        .answer(Some("Wasting"));
    let mut scheduler = ReminderScheduler::new(
        scenario_config(),
        gateway,
        PcgRandom::seeded(2),
        CountingSleeper::new(10),
    );

    let first = scheduler.run_cycle().unwrap();
    assert_eq!(first.branch(), ResponseBranch::NoBranch);
    assert!(first.error.is_some());

    // The loop carries on: next interval, then a normal cycle.
    assert_eq!(scheduler.next_interval(), 5);
    let second = scheduler.run_cycle().unwrap();
    assert_eq!(second.branch(), ResponseBranch::Wasting);
    assert_eq!(scheduler.cycles(), 2);
}

#[test]
fn test_failed_question_is_followed_by_interval_sleep() {
    let gateway = ScriptedGateway::new().fail(DialogError::Unavailable("stdin closed".into()));
    let mut scheduler = ReminderScheduler::new(
        scenario_config(),
        gateway,
        PcgRandom::seeded(3),
        CountingSleeper::new(10),
    );

    scheduler.run();

    // initial delay, interval after the failed cycle, then the empty script cancels.
    let slept = &scheduler.sleeper().slept;
    assert_eq!(slept, &[Duration::ZERO, Duration::from_secs(300)]);
}

#[test]
fn test_config_is_unchanged_by_running() {
    let config = scenario_config();
    let before = config.clone();
    let gateway = ScriptedGateway::new()
        .answer(Some("Working"))
        .answer(Some("Wasting"))
        .answer(Some("Wasting"))
        .answer(Some("Working"));
    let mut scheduler =
        ReminderScheduler::new(config, gateway, PcgRandom::seeded(4), CountingSleeper::new(10));

    scheduler.run();

    assert_eq!(scheduler.config(), &before);
}

#[test]
fn test_message_selection_is_uniform() {
    let pool: Vec<String> = (0..4).map(|i| format!("message {i}")).collect();
    let mut random = PcgRandom::seeded(2024);
    let trials = 40_000;
    let mut counts: HashMap<&str, usize> = HashMap::new();

    for _ in 0..trials {
        let picked = choose(&mut random, pool.as_slice()).unwrap();
        *counts.entry(picked.as_str()).or_default() += 1;
    }

    let expected = trials as f64 / pool.len() as f64;
    assert_eq!(counts.len(), pool.len());
    for (message, count) in counts {
        let deviation = (count as f64 - expected).abs() / expected;
        assert!(deviation < 0.05, "{message} picked {count} times, expected ~{expected}");
    }
}

proptest! {
    #[test]
    fn intervals_stay_within_bounds(
        initial in 0u32..120,
        min in 1u32..120,
        extra in 0u32..120,
        seed in any::<u64>(),
    ) {
        let max = min + extra;
        let config = ReminderConfig::new(
            Settings::new(initial, min, max, 0).unwrap(),
            MessagePools::new(vec!["Q".into()], vec!["M".into()], "S").unwrap(),
        );
        let mut scheduler = ReminderScheduler::new(
            config,
            ScriptedGateway::new(),
            PcgRandom::seeded(seed),
            CountingSleeper::new(0),
        );

        prop_assert_eq!(scheduler.first_delay(), Duration::from_secs(u64::from(initial) * 60));
        for _ in 0..50 {
            let interval = scheduler.next_interval();
            prop_assert!(interval >= min && interval <= max);
        }
    }
}
