//! Unit tests for core kernel modules
//!
//! These tests run on the host (not embedded target) to verify
//! the core algorithms work correctly.

#[cfg(test)]
mod queue_tests {
    use std::sync::atomic::{AtomicU32, Ordering};

    use eertos::{OsError, Task, TaskId, TimerQueue};

    eertos::task_ids! {
        enum Ids { First, Second, Third }
    }

    struct Counter(AtomicU32);

    impl Counter {
        const fn new() -> Self {
            Counter(AtomicU32::new(0))
        }

        fn get(&self) -> u32 {
            self.0.load(Ordering::SeqCst)
        }
    }

    impl Task for Counter {
        fn run(&self) {
            self.0.fetch_add(1, Ordering::SeqCst);
        }
    }

    fn noop() {}

    #[test]
    fn test_new_queue_is_empty() {
        let queue = TimerQueue::<Ids, 3>::new();

        assert_eq!(queue.capacity(), 3);
        assert!(!queue.is_started());
        for id in Ids::ALL {
            assert!(!queue.is_registered(id));
            assert_eq!(queue.remaining(id), None);
            assert_eq!(queue.period(id), None);
        }
        assert_eq!(queue.stats(), eertos::QueueStats::default());
    }

    #[test]
    fn test_capacity_mismatch_rejected() {
        let result = TimerQueue::<Ids, 2>::try_new();
        assert_eq!(result.err(), Some(OsError::QueueCapacity));

        let result = TimerQueue::<Ids, 4>::try_new();
        assert_eq!(result.err(), Some(OsError::QueueCapacity));

        assert!(TimerQueue::<Ids, 3>::try_new().is_ok());
    }

    #[test]
    #[should_panic(expected = "capacity")]
    fn test_capacity_mismatch_panics_on_new() {
        let _queue = TimerQueue::<Ids, 2>::new();
    }

    #[test]
    fn test_register_sets_remaining_and_period() {
        static TASK: Counter = Counter::new();
        let queue = TimerQueue::<Ids, 3>::new();

        queue.register(Ids::Second, &TASK, 7).unwrap();

        assert!(queue.is_registered(Ids::Second));
        assert_eq!(queue.remaining(Ids::Second), Some(7));
        assert_eq!(queue.period(Ids::Second), Some(7));
        assert!(!queue.is_registered(Ids::First));
        assert_eq!(TASK.get(), 0);
    }

    #[test]
    fn test_register_zero_period_rejected() {
        static TASK: Counter = Counter::new();
        let queue = TimerQueue::<Ids, 3>::new();

        assert_eq!(queue.register(Ids::First, &TASK, 0), Err(OsError::PeriodInvalid));
        assert!(!queue.is_registered(Ids::First));
    }

    #[test]
    fn test_register_accepts_plain_fn() {
        static NOOP: fn() = noop;
        let queue = TimerQueue::<Ids, 3>::new();

        assert!(queue.register(Ids::Third, &NOOP, 1).is_ok());
        assert_eq!(queue.remaining(Ids::Third), Some(1));
    }

    #[test]
    fn test_tick_decrements_by_one() {
        static TASK: Counter = Counter::new();
        let queue = TimerQueue::<Ids, 3>::new();
        queue.register(Ids::First, &TASK, 3).unwrap();

        queue.tick();
        assert_eq!(queue.remaining(Ids::First), Some(2));
        queue.tick();
        assert_eq!(queue.remaining(Ids::First), Some(1));
        queue.tick();
        assert_eq!(queue.remaining(Ids::First), Some(0));
    }

    #[test]
    fn test_tick_saturates_at_zero() {
        static TASK: Counter = Counter::new();
        let queue = TimerQueue::<Ids, 3>::new();
        queue.register(Ids::First, &TASK, 1).unwrap();

        for _ in 0..10 {
            queue.tick();
            assert_eq!(queue.remaining(Ids::First), Some(0));
        }
        // Tick handler never runs tasks
        assert_eq!(TASK.get(), 0);
    }

    #[test]
    fn test_tick_ignores_empty_slots() {
        static TASK: Counter = Counter::new();
        let queue = TimerQueue::<Ids, 3>::new();
        queue.register(Ids::Third, &TASK, 2).unwrap();

        queue.tick();
        queue.tick();
        // Empty slots are neither counted down nor fired
        assert_eq!(queue.dispatch(), 1);
        assert_eq!(queue.remaining(Ids::First), None);
        assert_eq!(queue.remaining(Ids::Second), None);
    }

    #[test]
    fn test_dispatch_fires_only_at_zero() {
        static TASK: Counter = Counter::new();
        let queue = TimerQueue::<Ids, 3>::new();
        queue.register(Ids::First, &TASK, 2).unwrap();

        assert_eq!(queue.dispatch(), 0);
        queue.tick();
        assert_eq!(queue.dispatch(), 0);
        assert_eq!(TASK.get(), 0);

        queue.tick();
        assert_eq!(queue.dispatch(), 1);
        assert_eq!(TASK.get(), 1);
        assert_eq!(queue.remaining(Ids::First), Some(2));
    }

    #[test]
    fn test_dispatch_fires_at_most_once_per_pass() {
        static TASK: Counter = Counter::new();
        let queue = TimerQueue::<Ids, 3>::new();
        queue.register(Ids::First, &TASK, 1).unwrap();

        // Many ticks without a pass still yield one firing
        for _ in 0..5 {
            queue.tick();
        }
        assert_eq!(queue.dispatch(), 1);
        assert_eq!(queue.dispatch(), 0);
        assert_eq!(TASK.get(), 1);
        assert_eq!(queue.remaining(Ids::First), Some(1));
    }

    #[test]
    fn test_stats_counters() {
        static TASK: Counter = Counter::new();
        let queue = TimerQueue::<Ids, 3>::new();
        queue.register(Ids::First, &TASK, 1).unwrap();

        queue.tick();
        queue.dispatch();
        queue.tick();
        queue.dispatch();
        queue.dispatch();

        let stats = queue.stats();
        assert_eq!(stats.ticks_delivered, 2);
        assert_eq!(stats.ticks_lost, 0);
        assert_eq!(stats.ticks_applied(), 2);
        assert_eq!(stats.passes, 3);
        assert_eq!(stats.fired, 2);
    }

    #[test]
    fn test_task_id_indices() {
        assert_eq!(<Ids as TaskId>::COUNT, 3);
        assert_eq!(Ids::First.index(), 0);
        assert_eq!(Ids::Third.index(), 2);
        assert_eq!(Ids::from_index(1), Some(Ids::Second));
        assert_eq!(Ids::from_index(3), None);
        assert_eq!(Ids::ALL, [Ids::First, Ids::Second, Ids::Third]);
    }
}

#[cfg(test)]
mod port_tests {
    use eertos::config::{CFG_CPU_FREQ_HZ, CFG_SYSTICK_RELOAD_MAX};
    use eertos::port::systick_reload;
    use eertos::{ManualTickSource, OsError, TickHandler, TickSource};
    use std::sync::atomic::{AtomicU32, Ordering};

    struct CountingHandler(AtomicU32);

    impl TickHandler for CountingHandler {
        fn on_tick(&self) {
            self.0.fetch_add(1, Ordering::SeqCst);
        }
    }

    #[test]
    fn test_manual_source_requires_start() {
        let source = ManualTickSource::new();
        assert!(!source.is_running());
        assert!(!source.fire());
    }

    #[test]
    fn test_manual_source_delivers_ticks() {
        static HANDLER: CountingHandler = CountingHandler(AtomicU32::new(0));
        let mut source = ManualTickSource::new();

        source.start(&HANDLER, 50).unwrap();
        assert!(source.is_running());
        assert_eq!(source.rate_hz(), 50);

        assert!(source.fire());
        assert!(source.fire_n(4));
        assert_eq!(HANDLER.0.load(Ordering::SeqCst), 5);
    }

    #[test]
    fn test_manual_source_rejects_restart() {
        static HANDLER: CountingHandler = CountingHandler(AtomicU32::new(0));
        let mut source = ManualTickSource::new();

        assert_eq!(source.start(&HANDLER, 0), Err(OsError::TickRateInvalid));
        source.start(&HANDLER, 50).unwrap();
        assert_eq!(source.start(&HANDLER, 50), Err(OsError::TickSourceBusy));
    }

    #[cfg(feature = "std")]
    mod thread_source_tests {
        use super::*;
        use eertos::ThreadTickSource;
        use std::thread;
        use std::time::Duration;

        struct FailingHandler;

        impl TickHandler for FailingHandler {
            fn on_tick(&self) {
                panic!("tick handler failure");
            }
        }

        #[test]
        fn test_thread_source_rejects_restart() {
            static HANDLER: CountingHandler = CountingHandler(AtomicU32::new(0));
            let mut source = ThreadTickSource::new();

            assert_eq!(source.start(&HANDLER, 0), Err(OsError::TickRateInvalid));
            source.start(&HANDLER, 1000).unwrap();
            assert_eq!(source.start(&HANDLER, 1000), Err(OsError::TickSourceBusy));
            assert_eq!(source.stop(), Ok(()));
            assert!(!source.is_running());
        }

        #[test]
        fn test_thread_source_stop_when_idle() {
            let mut source = ThreadTickSource::default();
            assert_eq!(source.stop(), Ok(()));
        }

        #[test]
        fn test_thread_source_reports_handler_panic() {
            static HANDLER: FailingHandler = FailingHandler;
            let mut source = ThreadTickSource::new();

            source.start(&HANDLER, 1000).unwrap();
            // Long enough for the first tick to reach the handler
            thread::sleep(Duration::from_millis(50));

            assert_eq!(source.stop(), Err(OsError::TickSourceFault));
            assert!(!source.is_running());
            // Already joined, nothing left to report
            assert_eq!(source.stop(), Ok(()));
        }
    }

    #[test]
    fn test_systick_reload() {
        assert_eq!(systick_reload(16_000_000, 50), Ok(319_999));
        assert_eq!(systick_reload(16_000_000, 1000), Ok(15_999));
        assert!(systick_reload(CFG_CPU_FREQ_HZ, eertos::CFG_TICK_RATE_HZ).is_ok());
    }

    #[test]
    fn test_systick_reload_out_of_range() {
        assert_eq!(systick_reload(16_000_000, 0), Err(OsError::TickRateInvalid));
        // Slower than the 24-bit counter can reach
        assert_eq!(systick_reload(CFG_SYSTICK_RELOAD_MAX * 2, 1), Err(OsError::TickRateInvalid));
        // Faster than the core clock
        assert_eq!(systick_reload(1_000, 1_000), Err(OsError::TickRateInvalid));
    }
}

#[cfg(test)]
mod time_tests {
    use eertos::time::{period_from_ms, period_from_ms_at, ticks_to_ms};
    use eertos::OsError;

    #[test]
    fn test_period_from_ms() {
        // 50Hz tick: 20ms per tick
        assert_eq!(period_from_ms(20), Ok(1));
        assert_eq!(period_from_ms(1000), Ok(50));
        assert_eq!(period_from_ms(29), Ok(1));
        assert_eq!(period_from_ms(30), Ok(2));
    }

    #[test]
    fn test_period_from_ms_invalid() {
        assert_eq!(period_from_ms(0), Err(OsError::PeriodInvalid));
        assert_eq!(period_from_ms(9), Err(OsError::PeriodInvalid));
        assert_eq!(period_from_ms_at(u32::MAX, 1000), Err(OsError::PeriodInvalid));
        assert_eq!(period_from_ms_at(100, 0), Err(OsError::TickRateInvalid));
    }

    #[test]
    fn test_ticks_to_ms() {
        assert_eq!(ticks_to_ms(1), 20);
        assert_eq!(ticks_to_ms(50), 1000);
        assert_eq!(ticks_to_ms(0), 0);
    }
}

#[cfg(test)]
mod error_tests {
    use eertos::error::OsError;

    #[test]
    fn test_error_codes() {
        assert_eq!(OsError::OsRunning.code(), 24202);
        assert_eq!(OsError::PeriodInvalid.code(), 29504);
        assert_eq!(OsError::TickSourceSpawn.code(), 29603);
        assert_eq!(OsError::TickSourceFault.code(), 29604);
        assert_ne!(OsError::TickSourceSpawn, OsError::TickSourceBusy);
        assert_ne!(OsError::TaskInvalid, OsError::QueueCapacity);
    }

    #[test]
    fn test_error_debug() {
        // Ensure errors can be formatted for debugging
        let err = OsError::TickSourceBusy;
        let _ = format!("{:?}", err);
    }
}

#[cfg(test)]
mod config_tests {
    use eertos::config::*;
    use eertos::DispatchMode;

    #[test]
    fn test_config_values() {
        assert!(CFG_TICK_RATE_HZ >= 10, "Tick rate too slow");
        assert!(CFG_TICK_RATE_HZ <= 10000, "Tick rate too fast");
        assert!(CFG_CPU_FREQ_HZ / CFG_TICK_RATE_HZ <= CFG_SYSTICK_RELOAD_MAX);

        // Lost-tick drift is the default contract
        assert_eq!(CFG_DISPATCH_MODE, DispatchMode::Atomic);
    }
}
