use chrono::NaiveDateTime;
use std::fmt::Debug;
use std::sync::Mutex;

/// Supplies wall-clock time and the identity of the person taking the quiz.
pub trait SessionClock: Debug {
    fn now(&self) -> NaiveDateTime;

    fn username(&self) -> String;
}

/// A clock that returns a preset instant, advancing by a fixed step on
/// every call. A zero step keeps every timestamp identical.
#[derive(Debug)]
pub struct FixedClock {
    next: Mutex<NaiveDateTime>,
    step: chrono::Duration,
    username: String,
}

impl FixedClock {
    pub fn new(start: NaiveDateTime, step: chrono::Duration) -> Self {
        Self {
            next: Mutex::new(start),
            step,
            username: "tester".to_string(),
        }
    }

    pub fn with_username(mut self, username: impl Into<String>) -> Self {
        self.username = username.into();
        self
    }
}

impl SessionClock for FixedClock {
    fn now(&self) -> NaiveDateTime {
        match self.next.lock() {
            Ok(mut next) => {
                let current = *next;
                *next = current + self.step;
                current
            }
            Err(poisoned) => *poisoned.into_inner(),
        }
    }

    fn username(&self) -> String {
        self.username.clone()
    }
}
