mod tests {
    use motorgb_led::effect::{BreatheEffect, PlaybackEffect, StaticColorEffect};
    use motorgb_led::{
        Canvas, Duration, Effect, EffectFile, EffectId, EffectInfo, EffectSlot, ErrorKind, Instant,
        RenderTick, Rgb, Scheduler, SchedulerState, Strip, Topology,
    };

    const BLACK: Rgb = Rgb { r: 0, g: 0, b: 0 };
    const RED: Rgb = Rgb { r: 255, g: 0, b: 0 };

    /// Paints only the first logical LED and records every tick
    #[derive(Default)]
    struct FirstLed {
        ticks: Vec<RenderTick>,
    }

    impl Effect for FirstLed {
        fn render(&mut self, tick: &RenderTick, canvas: &mut Canvas<'_>) {
            self.ticks.push(*tick);
            canvas.set(0, RED);
        }
    }

    #[test]
    fn test_state_transitions() {
        let topology = Topology::single(3);
        let mut scheduler: Scheduler<'_, FirstLed> = Scheduler::new();
        assert_eq!(scheduler.state(), SchedulerState::Idle);

        let err = scheduler.set("first", FirstLed::default()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidState);

        scheduler.init(&topology);
        assert_eq!(scheduler.state(), SchedulerState::Ready);

        scheduler.set("first", FirstLed::default()).unwrap();
        assert_eq!(scheduler.state(), SchedulerState::Running);
        assert_eq!(scheduler.active().unwrap().name, "first");
    }

    #[test]
    fn test_tick_without_effect_is_noop() {
        let topology = Topology::single(3);
        let mut pixels = [BLACK; 3];
        let mut scheduler: Scheduler<'_, FirstLed> = Scheduler::new();

        assert!(scheduler.tick(Instant::from_millis(10), &mut pixels).is_none());
        scheduler.init(&topology);
        assert!(scheduler.tick(Instant::from_millis(20), &mut pixels).is_none());
        assert_eq!(pixels, [BLACK; 3]);
    }

    #[test]
    fn test_delta_between_ticks() {
        let topology = Topology::single(3);
        let mut pixels = [BLACK; 3];
        let mut scheduler = Scheduler::new();
        scheduler.init(&topology);
        scheduler.set("first", FirstLed::default()).unwrap();

        let first = scheduler.tick(Instant::from_millis(1000), &mut pixels).unwrap();
        assert_eq!(first.delta, Duration::from_millis(0));
        assert_eq!(first.brightness, 255);

        let second = scheduler.tick(Instant::from_millis(1050), &mut pixels).unwrap();
        assert_eq!(second.now, Instant::from_millis(1050));
        assert_eq!(second.delta, Duration::from_millis(50));

        assert_eq!(scheduler.active().unwrap().effect.ticks.len(), 2);
    }

    #[test]
    fn test_time_going_backwards_gives_zero_delta() {
        let topology = Topology::single(1);
        let mut pixels = [BLACK; 1];
        let mut scheduler = Scheduler::new();
        scheduler.init(&topology);
        scheduler.set("first", FirstLed::default()).unwrap();

        scheduler.tick(Instant::from_millis(500), &mut pixels);
        let tick = scheduler.tick(Instant::from_millis(400), &mut pixels).unwrap();
        assert_eq!(tick.delta, Duration::from_millis(0));
    }

    #[test]
    fn test_effect_paints_through_topology() {
        let topology = Topology::new(&[Strip::reversed(3), Strip::forward(2)]).unwrap();
        let mut pixels = [BLACK; 5];
        let mut scheduler = Scheduler::new();
        scheduler.init(&topology);
        scheduler.set("first", FirstLed::default()).unwrap();

        scheduler.tick(Instant::from_millis(1), &mut pixels);
        assert_eq!(pixels, [BLACK, BLACK, RED, BLACK, BLACK]);
    }

    #[test]
    fn test_set_replaces_effect() {
        let topology = Topology::single(2);
        let mut pixels = [BLACK; 2];
        let mut scheduler = Scheduler::new();
        scheduler.init(&topology);

        scheduler.set("red", EffectId::Static.to_slot(RED)).unwrap();
        scheduler.tick(Instant::from_millis(1), &mut pixels);
        assert_eq!(pixels, [RED; 2]);

        let blue = Rgb::new(0, 0, 255);
        scheduler
            .set("blue", EffectSlot::Static(StaticColorEffect::new(blue)))
            .unwrap();
        assert_eq!(scheduler.active().unwrap().name, "blue");
        scheduler.tick(Instant::from_millis(2), &mut pixels);
        assert_eq!(pixels, [blue; 2]);
    }

    #[test]
    fn test_name_too_long() {
        let topology = Topology::single(1);
        let mut scheduler: Scheduler<'_, FirstLed> = Scheduler::new();
        scheduler.init(&topology);
        let err = scheduler.set(&"n".repeat(40), FirstLed::default()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidArgument);
        assert_eq!(scheduler.state(), SchedulerState::Ready);
    }

    #[test]
    fn test_empty_topology_renders_nothing() {
        let topology = Topology::new(&[]).unwrap();
        let mut pixels = [BLACK; 2];
        let mut scheduler = Scheduler::new();
        scheduler.init(&topology);
        scheduler.set("first", FirstLed::default()).unwrap();

        assert!(scheduler.tick(Instant::from_millis(1), &mut pixels).is_some());
        assert_eq!(pixels, [BLACK; 2]);
    }

    fn breathe_level(scheduler: &Scheduler<'_, EffectSlot>) -> f32 {
        match &scheduler.active().unwrap().effect {
            EffectSlot::Breathe(effect) => effect.level(),
            _ => unreachable!(),
        }
    }

    #[test]
    fn test_breathe_reaches_peak_and_returns() {
        let topology = Topology::single(4);
        let mut pixels = [BLACK; 4];
        let base = Rgb::new(200, 100, 50);
        let mut scheduler: Scheduler<'_, EffectSlot> = Scheduler::new();
        scheduler.init(&topology);
        scheduler
            .set("breathe", BreatheEffect::new(base).with_speed(0.5).into())
            .unwrap();

        let mut now = 1000;
        while now <= 2000 {
            scheduler.tick(Instant::from_millis(now), &mut pixels);
            now += 50;
        }
        assert!(breathe_level(&scheduler) > 0.99);
        assert!(pixels.iter().all(|p| p.r >= 195 && p.g >= 97 && p.b >= 48));

        while now <= 3000 {
            scheduler.tick(Instant::from_millis(now), &mut pixels);
            now += 50;
        }
        assert!(breathe_level(&scheduler) < 0.01);
        assert!(pixels.iter().all(|p| p.r <= 2));
    }

    #[test]
    fn test_breathe_envelope() {
        let effect = BreatheEffect::new(RED).with_phase(0.25);
        assert!((effect.level() - 0.5).abs() < 1e-6);
        let effect = BreatheEffect::new(RED).with_phase(0.75);
        assert!((effect.level() - 0.5).abs() < 1e-6);
        let effect = BreatheEffect::new(RED).with_phase(1.5);
        assert!((effect.phase() - 0.5).abs() < 1e-6);
    }

    fn clip(frame_delay_ms: u16) -> EffectFile {
        let info = EffectInfo {
            frame_count: 3,
            leds_per_frame: 2,
            frame_delay_ms,
        };
        let frames = vec![
            1, 0, 0, 1, 0, 0, // frame 0
            2, 0, 0, 2, 0, 0, // frame 1
            3, 0, 0, 3, 0, 0, // frame 2
        ];
        EffectFile::new(info, frames).unwrap()
    }

    #[test]
    fn test_playback_follows_frame_delay() {
        let topology = Topology::new(&[Strip::forward(1), Strip::reversed(2)]).unwrap();
        let mut pixels = [BLACK; 3];
        let mut scheduler: Scheduler<'_, EffectSlot> = Scheduler::new();
        scheduler.init(&topology);
        scheduler.set("clip", PlaybackEffect::new(clip(100)).into()).unwrap();

        scheduler.tick(Instant::from_millis(1000), &mut pixels);
        assert_eq!(pixels[0], Rgb::new(1, 0, 0));
        // Logical LED 1 is the far end of the reversed strip
        assert_eq!(pixels[2], Rgb::new(1, 0, 0));
        assert_eq!(pixels[1], BLACK);

        scheduler.tick(Instant::from_millis(1050), &mut pixels);
        assert_eq!(pixels[0], Rgb::new(1, 0, 0));

        scheduler.tick(Instant::from_millis(1100), &mut pixels);
        assert_eq!(pixels[0], Rgb::new(2, 0, 0));

        // Two frame delays at once: 1 -> 2 -> wraps to 0
        scheduler.tick(Instant::from_millis(1300), &mut pixels);
        assert_eq!(pixels[0], Rgb::new(1, 0, 0));
    }

    #[test]
    fn test_playback_once_holds_last_frame() {
        let topology = Topology::single(2);
        let mut pixels = [BLACK; 2];
        let mut scheduler: Scheduler<'_, EffectSlot> = Scheduler::new();
        scheduler.init(&topology);
        scheduler
            .set("clip", PlaybackEffect::new(clip(0)).once().into())
            .unwrap();

        for now in 1..=10 {
            scheduler.tick(Instant::from_millis(now), &mut pixels);
        }
        assert_eq!(pixels, [Rgb::new(3, 0, 0); 2]);
    }

    #[test]
    fn test_playback_after_long_gap() {
        let topology = Topology::single(2);
        let mut pixels = [BLACK; 2];
        let mut scheduler: Scheduler<'_, EffectSlot> = Scheduler::new();
        scheduler.init(&topology);
        scheduler.set("clip", PlaybackEffect::new(clip(1)).into()).unwrap();

        // 3_000_000_000 frame delays later, a multiple of the clip length
        scheduler.tick(Instant::from_millis(1), &mut pixels);
        scheduler.tick(Instant::from_millis(3_000_000_001), &mut pixels);
        assert_eq!(pixels, [Rgb::new(1, 0, 0); 2]);

        scheduler.tick(Instant::from_millis(3_000_000_002), &mut pixels);
        assert_eq!(pixels, [Rgb::new(2, 0, 0); 2]);
    }

    #[test]
    fn test_playback_once_after_long_gap() {
        let topology = Topology::single(2);
        let mut pixels = [BLACK; 2];
        let mut scheduler: Scheduler<'_, EffectSlot> = Scheduler::new();
        scheduler.init(&topology);
        scheduler
            .set("clip", PlaybackEffect::new(clip(1)).once().into())
            .unwrap();

        scheduler.tick(Instant::from_millis(1), &mut pixels);
        scheduler.tick(Instant::from_millis(u64::MAX / 2_000), &mut pixels);
        assert_eq!(pixels, [Rgb::new(3, 0, 0); 2]);
    }

    #[test]
    fn test_rainbow_paints_every_led() {
        let topology = Topology::single(6);
        let mut pixels = [BLACK; 6];
        let mut scheduler = Scheduler::new();
        scheduler.init(&topology);
        scheduler.set("rainbow", EffectId::Rainbow.to_slot(RED)).unwrap();

        scheduler.tick(Instant::from_millis(1234), &mut pixels);
        assert!(pixels.iter().all(|p| *p != BLACK));
        assert_ne!(pixels[0], pixels[3]);
    }

    #[test]
    fn test_effect_id_names() {
        assert_eq!(EffectId::parse_from_str("breathe"), Some(EffectId::Breathe));
        assert_eq!(EffectId::parse_from_str("aurora"), None);
        assert_eq!(EffectId::from_raw(2), Some(EffectId::Rainbow));
        assert_eq!(EffectId::from_raw(9), None);
        assert_eq!(EffectId::Static.as_str(), "static");
    }
}
