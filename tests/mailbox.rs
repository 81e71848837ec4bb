mod tests {
    use motorgb_led::{EffectMailbox, ErrorKind};

    static MAILBOX: EffectMailbox<u32> = EffectMailbox::new();

    #[test]
    fn test_post_and_take() {
        let mailbox = EffectMailbox::new();
        assert!(!mailbox.is_pending());
        assert!(mailbox.take().is_none());

        assert!(!mailbox.post("one", 1u32).unwrap());
        assert!(mailbox.is_pending());

        let active = mailbox.take().unwrap();
        assert_eq!(active.name, "one");
        assert_eq!(active.effect, 1);
        assert!(mailbox.take().is_none());
    }

    #[test]
    fn test_latest_post_wins() {
        let mailbox = EffectMailbox::new();
        mailbox.post("one", 1u32).unwrap();
        assert!(mailbox.post("two", 2).unwrap());

        let active = mailbox.take().unwrap();
        assert_eq!(active.name, "two");
        assert_eq!(active.effect, 2);
    }

    #[test]
    fn test_rejects_long_name() {
        let mailbox = EffectMailbox::new();
        let err = mailbox.post(&"x".repeat(64), 1u32).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidArgument);
        assert!(!mailbox.is_pending());
    }

    #[test]
    fn test_post_from_another_thread() {
        std::thread::spawn(|| MAILBOX.post("remote", 7).unwrap())
            .join()
            .unwrap();
        assert_eq!(MAILBOX.take().unwrap().effect, 7);
    }
}
