use super::interval::{parse_interval, RepetitionInterval};
use common::windows::{Frequency, TaskTrigger};

/// Only the lower 12 bits of a months mask are months
const MONTHS_MASK: u16 = 0x0fff;

/// Convert a Task trigger into a frequency and modifier. Unknown shapes return `None`
pub fn decode(trigger: &TaskTrigger) -> (Option<Frequency>, Option<u32>) {
    match trigger {
        TaskTrigger::Time { interval } => {
            let interval = interval.as_deref().unwrap_or_default();
            if interval.is_empty() {
                return (Some(Frequency::Once), None);
            }
            match parse_interval(interval) {
                Some(RepetitionInterval::Hours(hours)) => (Some(Frequency::Hourly), Some(hours)),
                Some(RepetitionInterval::Minutes(minutes)) => {
                    (Some(Frequency::Minute), Some(minutes))
                }
                None => (None, None),
            }
        }
        TaskTrigger::Daily { days_interval } => (Some(Frequency::Daily), Some(*days_interval)),
        TaskTrigger::Weekly { weeks_interval } => {
            (Some(Frequency::Weekly), Some(*weeks_interval))
        }
        // Count of months selected. All twelve months wraps to 0
        TaskTrigger::Monthly { months } => (
            Some(Frequency::Monthly),
            Some((months & MONTHS_MASK).count_ones() % 12),
        ),
        TaskTrigger::Idle => (Some(Frequency::OnIdle), None),
        TaskTrigger::Boot => (Some(Frequency::OnStart), None),
        TaskTrigger::Logon => (Some(Frequency::OnLogon), None),
        TaskTrigger::MonthlyDayOfWeek { .. }
        | TaskTrigger::Event
        | TaskTrigger::Registration
        | TaskTrigger::SessionStateChange
        | TaskTrigger::Custom => (None, None),
    }
}

/// Decode the first trigger only. Any other triggers are ignored
pub fn decode_first(triggers: &[TaskTrigger]) -> (Option<Frequency>, Option<u32>) {
    match triggers.first() {
        Some(trigger) => decode(trigger),
        None => (None, None),
    }
}

/// Value schtasks expects for `/SC`
pub fn schedule_token(frequency: &Frequency) -> &'static str {
    match frequency {
        Frequency::Once => "ONCE",
        Frequency::Minute => "MINUTE",
        Frequency::Hourly => "HOURLY",
        Frequency::Daily => "DAILY",
        Frequency::Weekly => "WEEKLY",
        Frequency::Monthly => "MONTHLY",
        Frequency::OnIdle => "ONIDLE",
        Frequency::OnStart => "ONSTART",
        Frequency::OnLogon => "ONLOGON",
    }
}

/// Build the `/SC` option. `/MO` is only added for interval based frequencies
pub fn schedule_option(frequency: &Frequency, modifier: u32) -> String {
    let mut option = format!("/SC {}", schedule_token(frequency));
    if frequency.has_modifier() {
        option.push_str(&format!(" /MO {modifier}"));
    }
    option
}

/// Build the trigger the Task Scheduler registers for a frequency and modifier
pub fn encode_trigger(frequency: &Frequency, modifier: u32) -> TaskTrigger {
    match frequency {
        Frequency::Once => TaskTrigger::Time { interval: None },
        Frequency::Minute => TaskTrigger::Time {
            interval: Some(minute_interval(modifier)),
        },
        Frequency::Hourly => TaskTrigger::Time {
            interval: Some(format!("PT{modifier}H")),
        },
        Frequency::Daily => TaskTrigger::Daily {
            days_interval: modifier,
        },
        Frequency::Weekly => TaskTrigger::Weekly {
            weeks_interval: modifier,
        },
        Frequency::Monthly => TaskTrigger::Monthly {
            months: month_mask(modifier),
        },
        Frequency::OnIdle => TaskTrigger::Idle,
        Frequency::OnStart => TaskTrigger::Boot,
        Frequency::OnLogon => TaskTrigger::Logon,
    }
}

/// Minutes as a repetition interval. Always ends in `M` so it is never read back as hourly
fn minute_interval(minutes: u32) -> String {
    let hours = minutes / 60;
    let remaining = minutes % 60;
    if hours == 0 {
        format!("PT{remaining}M")
    } else {
        format!("PT{hours}H{remaining}M")
    }
}

/// Select the first `count` months, starting at January
fn month_mask(count: u32) -> u16 {
    let count = count.min(12);
    ((1u32 << count) - 1) as u16
}
