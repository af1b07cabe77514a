use std::time::Duration;

/// 简单的防机器人过滤：蜜罐字段非空，或填写时间过短
/// 只是尽力而为，不是安全边界
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AntiAutomationGuard {
    min_fill: Duration,
}

impl AntiAutomationGuard {
    pub const DEFAULT_MIN_FILL: Duration = Duration::from_millis(2500);

    pub fn new(min_fill: Duration) -> Self {
        Self { min_fill }
    }

    pub fn trips(&self, honeypot: &str, elapsed: Duration) -> bool {
        !honeypot.is_empty() || elapsed < self.min_fill
    }
}

impl Default for AntiAutomationGuard {
    fn default() -> Self {
        Self::new(Self::DEFAULT_MIN_FILL)
    }
}
