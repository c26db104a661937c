use super::{read_value, skip_element};
use crate::tasks::error::TaskError;
use common::windows::TaskTrigger;
use log::error;
use quick_xml::{events::Event, Reader};

/// Parse all Task Triggers. Order is preserved
pub(crate) fn parse_triggers(reader: &mut Reader<&[u8]>) -> Result<Vec<TaskTrigger>, TaskError> {
    let mut triggers = Vec::new();

    loop {
        match reader.read_event() {
            Err(err) => {
                error!("[tasks] Could not read Triggers xml data: {err:?}");
                return Err(TaskError::ReadXml);
            }
            Ok(Event::Eof) => break,
            Ok(Event::Start(tag)) => match tag.name().as_ref() {
                b"TimeTrigger" => triggers.push(process_time(reader)?),
                b"CalendarTrigger" => triggers.push(process_calendar(reader)?),
                name => {
                    if let Some(trigger) = simple_trigger(name) {
                        triggers.push(trigger);
                    }
                    skip_element(reader, tag.name())?;
                }
            },
            // Triggers without any options. Ex: <BootTrigger />
            Ok(Event::Empty(tag)) => match tag.name().as_ref() {
                b"TimeTrigger" => triggers.push(TaskTrigger::Time { interval: None }),
                name => {
                    if let Some(trigger) = simple_trigger(name) {
                        triggers.push(trigger);
                    }
                }
            },
            Ok(Event::End(tag)) => {
                if tag.name().as_ref() == b"Triggers" {
                    break;
                }
            }
            _ => (),
        }
    }

    Ok(triggers)
}

/// Triggers where only the type matters
fn simple_trigger(name: &[u8]) -> Option<TaskTrigger> {
    let trigger = match name {
        b"IdleTrigger" => TaskTrigger::Idle,
        b"BootTrigger" => TaskTrigger::Boot,
        b"LogonTrigger" => TaskTrigger::Logon,
        b"EventTrigger" => TaskTrigger::Event,
        b"RegistrationTrigger" => TaskTrigger::Registration,
        b"SessionStateChangeTrigger" => TaskTrigger::SessionStateChange,
        b"WnfStateChangeTrigger" => TaskTrigger::Custom,
        _ => return None,
    };
    Some(trigger)
}

/// Parse `TimeTrigger` options. Only the repetition interval is kept
fn process_time(reader: &mut Reader<&[u8]>) -> Result<TaskTrigger, TaskError> {
    let mut interval = None;

    loop {
        match reader.read_event() {
            Err(err) => {
                error!("[tasks] Could not read TimeTrigger xml data: {err:?}");
                return Err(TaskError::ReadXml);
            }
            Ok(Event::Eof) => break,
            Ok(Event::Start(tag)) => match tag.name().as_ref() {
                b"Repetition" => interval = process_repetition(reader)?,
                _ => skip_element(reader, tag.name())?,
            },
            Ok(Event::End(tag)) => {
                if tag.name().as_ref() == b"TimeTrigger" {
                    break;
                }
            }
            _ => (),
        }
    }

    Ok(TaskTrigger::Time { interval })
}

/// Parse `Repetition` values and return the interval
fn process_repetition(reader: &mut Reader<&[u8]>) -> Result<Option<String>, TaskError> {
    let mut interval = None;

    loop {
        match reader.read_event() {
            Err(err) => {
                error!("[tasks] Could not read Repetition xml data: {err:?}");
                return Err(TaskError::ReadXml);
            }
            Ok(Event::Eof) => break,
            Ok(Event::Start(tag)) => match tag.name().as_ref() {
                b"Interval" => interval = Some(read_value(reader, tag.name())?),
                _ => skip_element(reader, tag.name())?,
            },
            Ok(Event::End(tag)) => {
                if tag.name().as_ref() == b"Repetition" {
                    break;
                }
            }
            _ => (),
        }
    }
    Ok(interval)
}

/// Parse `CalendarTrigger` options. The schedule element decides the trigger type
fn process_calendar(reader: &mut Reader<&[u8]>) -> Result<TaskTrigger, TaskError> {
    // Schema default when no schedule is present
    let mut trigger = TaskTrigger::Daily { days_interval: 1 };

    loop {
        match reader.read_event() {
            Err(err) => {
                error!("[tasks] Could not read CalendarTrigger xml data: {err:?}");
                return Err(TaskError::ReadXml);
            }
            Ok(Event::Eof) => break,
            Ok(Event::Start(tag)) => match tag.name().as_ref() {
                b"ScheduleByDay" => {
                    trigger = TaskTrigger::Daily {
                        days_interval: process_interval(
                            reader,
                            b"ScheduleByDay",
                            b"DaysInterval",
                        )?,
                    };
                }
                b"ScheduleByWeek" => {
                    trigger = TaskTrigger::Weekly {
                        weeks_interval: process_interval(
                            reader,
                            b"ScheduleByWeek",
                            b"WeeksInterval",
                        )?,
                    };
                }
                b"ScheduleByMonth" => {
                    trigger = TaskTrigger::Monthly {
                        months: process_months(reader, b"ScheduleByMonth")?,
                    };
                }
                b"ScheduleByMonthDayOfWeek" => {
                    trigger = TaskTrigger::MonthlyDayOfWeek {
                        months: process_months(reader, b"ScheduleByMonthDayOfWeek")?,
                    };
                }
                _ => skip_element(reader, tag.name())?,
            },
            Ok(Event::End(tag)) => {
                if tag.name().as_ref() == b"CalendarTrigger" {
                    break;
                }
            }
            _ => (),
        }
    }

    Ok(trigger)
}

/// Read a Days or Weeks interval from a schedule element. Missing or bad values default to 1
fn process_interval(
    reader: &mut Reader<&[u8]>,
    end: &[u8],
    element: &[u8],
) -> Result<u32, TaskError> {
    let mut interval = 1;

    loop {
        match reader.read_event() {
            Err(err) => {
                error!("[tasks] Could not read Calendar interval xml data: {err:?}");
                return Err(TaskError::ReadXml);
            }
            Ok(Event::Eof) => break,
            Ok(Event::Start(tag)) => {
                if tag.name().as_ref() == element {
                    interval = str::parse(&read_value(reader, tag.name())?).unwrap_or(1);
                } else {
                    skip_element(reader, tag.name())?;
                }
            }
            Ok(Event::End(tag)) => {
                if tag.name().as_ref() == end {
                    break;
                }
            }
            _ => (),
        }
    }
    Ok(interval)
}

/// Build a months bitmask from a month schedule. Months are elements. Ex: <January />
fn process_months(reader: &mut Reader<&[u8]>, end: &[u8]) -> Result<u16, TaskError> {
    let mut months = 0;

    loop {
        match reader.read_event() {
            Err(err) => {
                error!("[tasks] Could not read Calendar Months xml data: {err:?}");
                return Err(TaskError::ReadXml);
            }
            Ok(Event::Eof) => break,
            Ok(Event::Empty(tag)) => months |= month_bit(tag.name().as_ref()),
            Ok(Event::Start(tag)) => match tag.name().as_ref() {
                // Containers, keep walking
                b"Months" | b"DaysOfMonth" | b"DaysOfWeek" | b"Weeks" => (),
                name => {
                    months |= month_bit(name);
                    skip_element(reader, tag.name())?;
                }
            },
            Ok(Event::End(tag)) => {
                if tag.name().as_ref() == end {
                    break;
                }
            }
            _ => (),
        }
    }
    Ok(months)
}

/// Bit for a month element name. Non-month names return 0
fn month_bit(name: &[u8]) -> u16 {
    let index = match name {
        b"January" => 0,
        b"February" => 1,
        b"March" => 2,
        b"April" => 3,
        b"May" => 4,
        b"June" => 5,
        b"July" => 6,
        b"August" => 7,
        b"September" => 8,
        b"October" => 9,
        b"November" => 10,
        b"December" => 11,
        _ => return 0,
    };
    1 << index
}
