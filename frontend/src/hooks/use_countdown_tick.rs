use gloo::timers::callback::Interval;
use shared::TimeLeft;
use yew::prelude::*;

use crate::services::date_utils::now_ms;

pub const TICK_MS: u32 = 1000;

/// Next value of the display. Once the birthday is reached, or if the
/// timestamp does not parse, the previous value stays on screen.
pub fn next_time_left(previous: TimeLeft, next_birthday: &str, now_ms: i64) -> TimeLeft {
    match TimeLeft::until_rfc3339(next_birthday, now_ms) {
        Ok(Some(time_left)) => time_left,
        _ => previous,
    }
}

/// Live breakdown of the time left until `next_birthday`, recomputed every
/// second. The interval is dropped when the caller unmounts or the
/// timestamp changes.
#[hook]
pub fn use_countdown_tick(next_birthday: String) -> TimeLeft {
    let time_left = use_state(TimeLeft::default);

    {
        let time_left = time_left.clone();
        use_effect_with(next_birthday, move |next_birthday| {
            let next_birthday = next_birthday.clone();
            let mut current = next_time_left(*time_left, &next_birthday, now_ms());
            time_left.set(current);

            let interval = Interval::new(TICK_MS, move || {
                current = next_time_left(current, &next_birthday, now_ms());
                time_left.set(current);
            });

            move || drop(interval)
        });
    }

    *time_left
}
