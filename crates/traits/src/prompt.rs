use std::fmt::Debug;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Asks the user whether to try writing a locked results file again.
///
/// Typically backed by a blocking dialog ("close the file in your
/// spreadsheet viewer, then press OK").
pub trait RetryPrompt: Debug {
    /// `attempt` counts the failed writes so far, starting at 1.
    fn retry(&self, path: &str, attempt: usize) -> bool;
}

/// Answers "retry" a fixed number of times, then gives up.
#[derive(Debug)]
pub struct FixedRetryPrompt {
    remaining: AtomicUsize,
}

impl FixedRetryPrompt {
    pub fn new(retries: usize) -> Self {
        Self {
            remaining: AtomicUsize::new(retries),
        }
    }
}

impl RetryPrompt for FixedRetryPrompt {
    fn retry(&self, _path: &str, _attempt: usize) -> bool {
        self.remaining
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
            .is_ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_prompt_counts_down() {
        let prompt = FixedRetryPrompt::new(2);
        assert!(prompt.retry("results.xml", 1));
        assert!(prompt.retry("results.xml", 2));
        assert!(!prompt.retry("results.xml", 3));
    }
}
