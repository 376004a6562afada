use chrono::{Duration, Local, NaiveDateTime, NaiveTime};

/// Wall clock, in local time. Midnight rollover is computed against it.
#[derive(Debug, Clone, Copy, Default)]
pub enum Clock {
    #[default]
    System,
    Fixed(NaiveDateTime),
}

impl Clock {
    pub fn fixed(at: NaiveDateTime) -> Self {
        Self::Fixed(at)
    }

    pub fn now(&self) -> NaiveDateTime {
        match self {
            Clock::System => Local::now().naive_local(),
            Clock::Fixed(t) => *t,
        }
    }
}

pub fn next_midnight(now: NaiveDateTime) -> NaiveDateTime {
    let tomorrow = now.date() + Duration::days(1);
    tomorrow.and_time(NaiveTime::MIN)
}

/// Time left from `now` until `at`; zero once `at` has passed.
pub fn until(now: NaiveDateTime, at: NaiveDateTime) -> std::time::Duration {
    (at - now).to_std().unwrap_or(std::time::Duration::ZERO)
}
