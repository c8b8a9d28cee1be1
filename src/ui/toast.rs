use std::collections::VecDeque;
use std::sync::Mutex;
use std::time::{Duration, Instant};

const DEFAULT_TTL: Duration = Duration::from_secs(4);
const MAX_PENDING: usize = 8;

/// Transient feedback strip. This is the only user-facing surface for
/// non-fatal conditions; nothing shown here blocks anything.
pub struct ToastController {
    toasts: Mutex<VecDeque<(String, Instant)>>,
    ttl: Duration,
}

impl Default for ToastController {
    fn default() -> Self {
        Self::new()
    }
}

impl ToastController {
    pub fn new() -> Self {
        Self {
            toasts: Mutex::new(VecDeque::new()),
            ttl: DEFAULT_TTL,
        }
    }

    pub fn push(&self, message: &str) {
        let mut toasts = self.toasts.lock().unwrap();
        if toasts.len() == MAX_PENDING {
            toasts.pop_front();
        }
        toasts.push_back((message.to_string(), Instant::now()));
    }

    /// Messages still within their display window; expired ones are pruned.
    pub fn active(&self) -> Vec<String> {
        let mut toasts = self.toasts.lock().unwrap();
        let ttl = self.ttl;
        while toasts
            .front()
            .is_some_and(|(_, shown)| shown.elapsed() > ttl)
        {
            toasts.pop_front();
        }
        toasts.iter().map(|(message, _)| message.clone()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pushed_messages_show_in_order() {
        let toasts = ToastController::new();
        toasts.push("one");
        toasts.push("two");
        assert_eq!(toasts.active(), vec!["one", "two"]);
    }

    #[test]
    fn the_backlog_is_bounded() {
        let toasts = ToastController::new();
        for n in 0..20 {
            toasts.push(&format!("toast {n}"));
        }
        let active = toasts.active();
        assert_eq!(active.len(), MAX_PENDING);
        assert_eq!(active.last().map(String::as_str), Some("toast 19"));
    }
}
