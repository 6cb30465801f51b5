use std::time::Instant;

pub const FADE_DURATION: f32 = 0.7;

/// Cross-fade from the previously shown slide to the current one.
#[derive(Debug, Clone, Copy)]
pub struct Fade {
    pub from: usize,
    pub to: usize,
    start: Instant,
}

impl Fade {
    pub fn new(from: usize, to: usize) -> Self {
        Self {
            from,
            to,
            start: Instant::now(),
        }
    }

    /// Eased progress in `0.0..=1.0`.
    pub fn progress(&self) -> f32 {
        let raw = (self.start.elapsed().as_secs_f32() / FADE_DURATION).clamp(0.0, 1.0);
        ease_in_out(raw)
    }

    pub fn is_complete(&self) -> bool {
        self.start.elapsed().as_secs_f32() >= FADE_DURATION
    }
}

pub fn ease_in_out(t: f32) -> f32 {
    if t < 0.5 {
        2.0 * t * t
    } else {
        1.0 - (-2.0 * t + 2.0).powi(2) / 2.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ease_endpoints() {
        assert_eq!(ease_in_out(0.0), 0.0);
        assert_eq!(ease_in_out(1.0), 1.0);
        assert!((ease_in_out(0.5) - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_ease_is_monotonic() {
        let mut last = 0.0;
        for i in 1..=20 {
            let v = ease_in_out(i as f32 / 20.0);
            assert!(v >= last);
            last = v;
        }
    }

    #[test]
    fn test_new_fade_starts_at_zero() {
        let fade = Fade::new(0, 1);
        assert!(!fade.is_complete());
        assert!(fade.progress() < 0.5);
    }
}
