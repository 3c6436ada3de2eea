//! Placeholder for live delays. There is no realtime feed behind it, the delay is random.
use chrono::{Local, Utc};
use chrono_tz::Tz;
use rand::Rng;

use crate::model::api_model::LiveDelay;

pub const MAX_DELAY_MINUTES: u8 = 15;

const TIME_FORMAT: &str = "%H:%M:%S";

/// A random delay in `0..=MAX_DELAY_MINUTES` stamped with the current time of day.
/// The time is in `timezone` if one is given, otherwise in the server's local time.
pub fn live_delay(timezone: Option<Tz>) -> LiveDelay {
    let delay = rand::rng().random_range(0..=MAX_DELAY_MINUTES);

    let updated = match timezone {
        Some(tz) => Utc::now().with_timezone(&tz).format(TIME_FORMAT).to_string(),
        None => Local::now().format(TIME_FORMAT).to_string(),
    };

    LiveDelay { delay, updated }
}
