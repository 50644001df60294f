// src/scheduler.rs

use crate::config::ScheduleConfig;
use chrono::{DateTime, Duration, NaiveTime, Utc};

/// Next time the daily job should fire strictly after `now`.
///
/// The target hour is read in the configured fixed offset, so DST shifts are
/// not followed.
pub fn next_run_after(now: DateTime<Utc>, schedule: &ScheduleConfig) -> DateTime<Utc> {
    let offset = schedule.utc_offset;
    let target = NaiveTime::from_hms_opt(schedule.hour, schedule.minute, 0).unwrap_or(NaiveTime::MIN);

    let local_today = now.with_timezone(&offset).date_naive();
    let local_target = local_today.and_time(target);
    let candidate =
        (local_target - Duration::seconds(i64::from(offset.local_minus_utc()))).and_utc();

    if candidate <= now {
        candidate + Duration::days(1)
    } else {
        candidate
    }
}

/// Runs `job` at startup (if configured) and then once a day, forever.
///
/// The job is responsible for its own error reporting; a failed run never
/// stops the loop.
pub fn run_forever<F: FnMut()>(schedule: &ScheduleConfig, mut job: F) -> ! {
    tracing::info!(
        "Scheduled time: {:02}:{:02} (UTC{})",
        schedule.hour,
        schedule.minute,
        schedule.utc_offset
    );

    if schedule.run_on_start {
        job();
    }

    loop {
        let now = Utc::now();
        let next = next_run_after(now, schedule);
        let delay = (next - now).to_std().unwrap_or_default();

        tracing::info!(
            "Next report scheduled for: {} (in {} minutes)",
            next.to_rfc3339(),
            delay.as_secs() / 60
        );
        std::thread::sleep(delay);

        tracing::info!("Running real estate report at {}", Utc::now().to_rfc3339());
        job();
    }
}
