use shared::BirthdayCountdown;
use yew::prelude::*;

use crate::hooks::use_countdown_tick::use_countdown_tick;
use crate::services::date_utils::format_birthday_heading;

#[derive(Properties, PartialEq)]
pub struct CountdownTimerProps {
    pub countdown: BirthdayCountdown,
}

#[function_component(CountdownTimer)]
pub fn countdown_timer(props: &CountdownTimerProps) -> Html {
    let time_left = use_countdown_tick(props.countdown.next_birthday.clone());

    let items = [
        (time_left.months, "Months"),
        (time_left.days, "Days"),
        (time_left.hours, "Hours"),
        (time_left.minutes, "Minutes"),
        (time_left.seconds, "Seconds"),
    ];

    html! {
        <div class="hero-section">
            <div class="hero-content">
                <h2>{"🎉 Countdown to Your Next Birthday!"}</h2>
                <p class="birthday-date">{format_birthday_heading(&props.countdown.next_birthday)}</p>
                <div class="countdown-timer">
                    {for items.iter().map(|(value, label)| html! {
                        <div class="countdown-item">
                            <div class="countdown-number">{*value}</div>
                            <div class="countdown-label">{*label}</div>
                        </div>
                    })}
                </div>
            </div>
        </div>
    }
}
