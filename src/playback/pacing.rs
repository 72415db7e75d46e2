//! Animation timing.

use std::time::Duration;

use tokio_util::sync::CancellationToken;

const KEYSTROKE_MS: u64 = 50;
const THINKING_BASE_MS: u64 = 1200;
const THINKING_PER_CHAR_MS: u64 = 28;
const THINKING_CAP_MS: u64 = 4000;

/// Delays used by the step player
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pacing {
    /// Delay after each typed character (doubled for whitespace)
    pub keystroke: Duration,
    /// Fixed part of the thinking delay
    pub thinking_base: Duration,
    /// Thinking delay added per character of the answer
    pub thinking_per_char: Duration,
    /// Upper bound for the thinking delay
    pub thinking_cap: Duration,
    /// Skip every delay
    pub fast_forward: bool,
}

impl Default for Pacing {
    fn default() -> Self {
        Self {
            keystroke: Duration::from_millis(KEYSTROKE_MS),
            thinking_base: Duration::from_millis(THINKING_BASE_MS),
            thinking_per_char: Duration::from_millis(THINKING_PER_CHAR_MS),
            thinking_cap: Duration::from_millis(THINKING_CAP_MS),
            fast_forward: false,
        }
    }
}

impl Pacing {
    /// Default pacing with every delay skipped
    pub fn instant() -> Self {
        Self {
            fast_forward: true,
            ..Self::default()
        }
    }

    pub fn keystroke_delay(&self, ch: char) -> Duration {
        if self.fast_forward {
            return Duration::ZERO;
        }
        match ch {
            ' ' | '\n' | '\t' => self.keystroke * 2,
            _ => self.keystroke,
        }
    }

    /// `min(cap, base + per_char * chars)`
    pub fn thinking_delay(&self, text: &str) -> Duration {
        if self.fast_forward {
            return Duration::ZERO;
        }
        let chars = u32::try_from(text.chars().count()).unwrap_or(u32::MAX);
        let scaled = self.thinking_per_char.saturating_mul(chars);
        (self.thinking_base.saturating_add(scaled)).min(self.thinking_cap)
    }
}

/// Sleep for `delay` unless `cancel` fires first.
///
/// Returns `false` when cancelled.
pub async fn pause(delay: Duration, cancel: &CancellationToken) -> bool {
    if cancel.is_cancelled() {
        return false;
    }
    if delay.is_zero() {
        return true;
    }
    tokio::select! {
        _ = cancel.cancelled() => false,
        _ = tokio::time::sleep(delay) => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keystroke_delay_doubles_for_whitespace() {
        let pacing = Pacing::default();
        assert_eq!(pacing.keystroke_delay('a'), Duration::from_millis(50));
        assert_eq!(pacing.keystroke_delay(' '), Duration::from_millis(100));
        assert_eq!(pacing.keystroke_delay('\n'), Duration::from_millis(100));
        assert_eq!(pacing.keystroke_delay('\t'), Duration::from_millis(100));
    }

    #[test]
    fn test_thinking_delay_formula() {
        let pacing = Pacing::default();
        assert_eq!(pacing.thinking_delay(""), Duration::from_millis(1200));
        // 1200 + 28 * 10
        assert_eq!(pacing.thinking_delay("0123456789"), Duration::from_millis(1480));
        // 1200 + 28 * 100 = 4000, exactly at the cap
        assert_eq!(pacing.thinking_delay(&"x".repeat(100)), Duration::from_millis(4000));
        assert_eq!(pacing.thinking_delay(&"x".repeat(500)), Duration::from_millis(4000));
    }

    #[test]
    fn test_thinking_delay_counts_chars_not_bytes() {
        let pacing = Pacing::default();
        assert_eq!(pacing.thinking_delay("——"), Duration::from_millis(1256));
    }

    #[test]
    fn test_fast_forward_skips_delays() {
        let pacing = Pacing::instant();
        assert_eq!(pacing.keystroke_delay(' '), Duration::ZERO);
        assert_eq!(pacing.thinking_delay("anything"), Duration::ZERO);
    }

    #[tokio::test(start_paused = true)]
    async fn test_pause_returns_false_when_cancelled() {
        let cancel = CancellationToken::new();
        let child = cancel.clone();
        let handle = tokio::spawn(async move { pause(Duration::from_secs(10), &child).await });
        tokio::task::yield_now().await;
        cancel.cancel();
        assert!(!handle.await.unwrap());
    }

    #[tokio::test(start_paused = true)]
    async fn test_pause_completes() {
        let cancel = CancellationToken::new();
        assert!(pause(Duration::from_millis(50), &cancel).await);
    }
}
