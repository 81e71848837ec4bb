mod tests {
    use motorgb_led::color::{Rgb, from_rgb_bytes, scale};

    const ORANGE: Rgb = Rgb {
        r: 200,
        g: 100,
        b: 50,
    };

    #[test]
    fn test_scale() {
        assert_eq!(scale(ORANGE, 1.0), ORANGE);
        assert_eq!(scale(ORANGE, 0.0), Rgb::new(0, 0, 0));
        assert_eq!(scale(ORANGE, 0.5), Rgb::new(100, 50, 25));
    }

    #[test]
    fn test_scale_clamps_level() {
        assert_eq!(scale(ORANGE, 2.0), ORANGE);
        assert_eq!(scale(ORANGE, -1.0), Rgb::new(0, 0, 0));
    }

    #[test]
    fn test_from_rgb_bytes() {
        assert_eq!(from_rgb_bytes(&[1, 2, 3]), Some(Rgb::new(1, 2, 3)));
        assert_eq!(from_rgb_bytes(&[1, 2, 3, 4]), Some(Rgb::new(1, 2, 3)));
        assert_eq!(from_rgb_bytes(&[1, 2]), None);
    }
}
