use chrono::{NaiveTime, Timelike};

/// Fixed daily grid of start times, `first..=last` every `step_minutes`.
#[derive(Debug, Clone, PartialEq)]
pub struct SlotGrid {
    first: NaiveTime,
    last: NaiveTime,
    step_minutes: u32,
}

impl SlotGrid {
    pub fn new(first: NaiveTime, last: NaiveTime, step_minutes: u32) -> anyhow::Result<Self> {
        if step_minutes == 0 {
            return Err(anyhow::anyhow!("slot step must be positive"));
        }
        if first > last {
            return Err(anyhow::anyhow!(
                "first slot {} is after last slot {}",
                format_hhmm(&first),
                format_hhmm(&last)
            ));
        }
        Ok(Self {
            first,
            last,
            step_minutes,
        })
    }

    pub fn first(&self) -> NaiveTime {
        self.first
    }

    pub fn step_minutes(&self) -> u32 {
        self.step_minutes
    }

    pub fn slots(&self) -> Vec<NaiveTime> {
        let last = minute_of_day(&self.last);
        (minute_of_day(&self.first)..=last)
            .step_by(self.step_minutes as usize)
            .filter_map(time_from_minutes)
            .collect()
    }

    /// Dashboard columns: every slot plus one trailing step so a booking on
    /// the last slot still has room.
    pub fn column_count(&self) -> usize {
        self.slots().len() + 1
    }

    pub fn contains(&self, time: &NaiveTime) -> bool {
        let minute = minute_of_day(time);
        let first = minute_of_day(&self.first);
        minute >= first
            && minute <= minute_of_day(&self.last)
            && (minute - first) % self.step_minutes == 0
    }
}

pub fn minute_of_day(time: &NaiveTime) -> u32 {
    time.num_seconds_from_midnight() / 60
}

fn time_from_minutes(minutes: u32) -> Option<NaiveTime> {
    NaiveTime::from_hms_opt(minutes / 60, minutes % 60, 0)
}

pub fn parse_hhmm(s: &str) -> anyhow::Result<NaiveTime> {
    let parts: Vec<&str> = s.trim().split(':').collect();
    if parts.len() != 2 {
        return Err(anyhow::anyhow!("invalid time format: {s}"));
    }
    let hour: u32 = parts[0]
        .parse()
        .map_err(|_| anyhow::anyhow!("invalid hour in: {s}"))?;
    let minute: u32 = parts[1]
        .parse()
        .map_err(|_| anyhow::anyhow!("invalid minute in: {s}"))?;
    NaiveTime::from_hms_opt(hour, minute, 0).ok_or_else(|| anyhow::anyhow!("time out of range: {s}"))
}

pub fn format_hhmm(time: &NaiveTime) -> String {
    time.format("%H:%M").to_string()
}

/// Serde adapter for `HH:MM` times.
pub mod hhmm {
    use chrono::NaiveTime;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(time: &NaiveTime, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&super::format_hhmm(time))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveTime, D::Error> {
        let s = String::deserialize(deserializer)?;
        super::parse_hhmm(&s).map_err(serde::de::Error::custom)
    }

    pub mod option {
        use chrono::NaiveTime;
        use serde::{Deserialize, Deserializer, Serializer};

        pub fn serialize<S: Serializer>(
            time: &Option<NaiveTime>,
            serializer: S,
        ) -> Result<S::Ok, S::Error> {
            match time {
                Some(t) => serializer.serialize_str(&super::super::format_hhmm(t)),
                None => serializer.serialize_none(),
            }
        }

        pub fn deserialize<'de, D: Deserializer<'de>>(
            deserializer: D,
        ) -> Result<Option<NaiveTime>, D::Error> {
            let s: Option<String> = Option::deserialize(deserializer)?;
            s.map(|s| super::super::parse_hhmm(&s).map_err(serde::de::Error::custom))
                .transpose()
        }
    }
}
