use chrono::{Datelike, Days, Months, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

const SECONDS_PER_DAY: f64 = 86_400.0;

/// Step of a "nice" numeric tick sequence: `mantissa * 10^power`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct NiceStep {
    mantissa: u8,
    power: i32,
}

impl NiceStep {
    fn for_span(span: f64, count: usize) -> Self {
        let raw = span / count.max(1) as f64;
        let power = raw.log10().floor() as i32;
        let error = raw / 10f64.powi(power);
        if error >= 50f64.sqrt() {
            Self {
                mantissa: 1,
                power: power + 1,
            }
        } else if error >= 10f64.sqrt() {
            Self { mantissa: 5, power }
        } else if error >= 2f64.sqrt() {
            Self { mantissa: 2, power }
        } else {
            Self { mantissa: 1, power }
        }
    }

    fn next(self) -> Self {
        match self.mantissa {
            1 => Self {
                mantissa: 2,
                power: self.power,
            },
            2 => Self {
                mantissa: 5,
                power: self.power,
            },
            _ => Self {
                mantissa: 1,
                power: self.power + 1,
            },
        }
    }

    fn ticks(self, start: f64, stop: f64) -> Vec<f64> {
        if self.power >= 0 {
            let step = f64::from(self.mantissa) * 10f64.powi(self.power);
            let first = (start / step).ceil() as i64;
            let last = (stop / step).floor() as i64;
            (first..=last).map(|i| i as f64 * step).collect()
        } else {
            // Dividing by an integral inverse keeps decimal ticks exact.
            let inverse = 10f64.powi(-self.power) / f64::from(self.mantissa);
            let first = (start * inverse).ceil() as i64;
            let last = (stop * inverse).floor() as i64;
            (first..=last).map(|i| i as f64 / inverse).collect()
        }
    }
}

/// Round-valued ticks covering `[start, stop]`, never more than `max_count`.
#[must_use]
pub fn nice_ticks(start: f64, stop: f64, max_count: usize) -> Vec<f64> {
    if max_count == 0 || !start.is_finite() || !stop.is_finite() {
        return Vec::new();
    }
    let (low, high) = if start <= stop {
        (start, stop)
    } else {
        (stop, start)
    };
    if low == high {
        return vec![low];
    }

    let mut step = NiceStep::for_span(high - low, max_count);
    loop {
        let ticks = step.ticks(low, high);
        if ticks.len() <= max_count {
            return ticks;
        }
        step = step.next();
    }
}

/// Calendar interval between consecutive time-axis ticks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TimeTickInterval {
    Days(u32),
    Week,
    Months(u32),
    Years(u32),
}

impl TimeTickInterval {
    const LADDER: [TimeTickInterval; 6] = [
        TimeTickInterval::Days(1),
        TimeTickInterval::Days(2),
        TimeTickInterval::Week,
        TimeTickInterval::Months(1),
        TimeTickInterval::Months(3),
        TimeTickInterval::Years(1),
    ];

    fn approx_seconds(self) -> f64 {
        match self {
            Self::Days(n) => f64::from(n) * SECONDS_PER_DAY,
            Self::Week => 7.0 * SECONDS_PER_DAY,
            Self::Months(n) => f64::from(n) * 30.0 * SECONDS_PER_DAY,
            Self::Years(n) => f64::from(n) * 365.0 * SECONDS_PER_DAY,
        }
    }

    /// Picks the ladder rung whose duration is closest (by ratio) to
    /// `span / count`.
    fn for_span(span_seconds: f64, count: usize) -> Self {
        let target = span_seconds / count.max(1) as f64;
        let index = Self::LADDER.partition_point(|interval| interval.approx_seconds() < target);
        if index == 0 {
            return Self::LADDER[0];
        }
        if index == Self::LADDER.len() {
            let years = target / Self::Years(1).approx_seconds();
            return Self::Years(nice_year_step(years));
        }
        let below = Self::LADDER[index - 1];
        let above = Self::LADDER[index];
        if target / below.approx_seconds() < above.approx_seconds() / target {
            below
        } else {
            above
        }
    }

    fn coarser(self) -> Self {
        match self {
            Self::Years(n) => Self::Years(next_nice_year_step(n)),
            other => {
                let position = Self::LADDER.iter().position(|rung| *rung == other);
                match position {
                    Some(i) if i + 1 < Self::LADDER.len() => Self::LADDER[i + 1],
                    _ => Self::Years(1),
                }
            }
        }
    }

    fn ticks(self, start: NaiveDate, end: NaiveDate) -> Vec<NaiveDate> {
        match self {
            Self::Days(n) => days_between(start, end)
                .filter(|date| date.day0() % n == 0)
                .collect(),
            Self::Week => days_between(start, end)
                .filter(|date| date.weekday() == Weekday::Sun)
                .collect(),
            Self::Months(n) => {
                let mut ticks = Vec::new();
                let mut cursor = NaiveDate::from_ymd_opt(start.year(), start.month(), 1);
                while let Some(date) = cursor {
                    if date > end {
                        break;
                    }
                    if date >= start && date.month0() % n == 0 {
                        ticks.push(date);
                    }
                    cursor = date.checked_add_months(Months::new(1));
                }
                ticks
            }
            Self::Years(n) => {
                let step = i32::try_from(n.max(1)).unwrap_or(i32::MAX);
                (start.year()..=end.year())
                    .filter(|year| year.rem_euclid(step) == 0)
                    .filter_map(|year| NaiveDate::from_ymd_opt(year, 1, 1))
                    .filter(|date| *date >= start && *date <= end)
                    .collect()
            }
        }
    }
}

fn nice_year_step(years: f64) -> u32 {
    if !years.is_finite() || years <= 1.0 {
        return 1;
    }
    let step = NiceStep::for_span(years, 1);
    let value = f64::from(step.mantissa) * 10f64.powi(step.power.max(0));
    (value.ceil() as u32).max(1)
}

fn next_nice_year_step(current: u32) -> u32 {
    let mut step = NiceStep {
        mantissa: 1,
        power: 0,
    };
    loop {
        let value = u32::from(step.mantissa).saturating_mul(10u32.saturating_pow(step.power as u32));
        if value > current || value == u32::MAX {
            return value;
        }
        step = step.next();
    }
}

fn days_between(start: NaiveDate, end: NaiveDate) -> impl Iterator<Item = NaiveDate> {
    std::iter::successors(Some(start), |date| date.checked_add_days(Days::new(1)))
        .take_while(move |date| *date <= end)
}

/// One labelled tick on the date axis.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeTick {
    pub date: NaiveDate,
    pub label: String,
}

/// Calendar-aligned ticks for `[start, end]`, never more than `max_count`.
#[must_use]
pub fn time_ticks(start: NaiveDate, end: NaiveDate, max_count: usize) -> Vec<TimeTick> {
    if max_count == 0 {
        return Vec::new();
    }
    let (start, end) = if start <= end { (start, end) } else { (end, start) };
    if start == end {
        return vec![TimeTick {
            date: start,
            label: time_tick_label(start),
        }];
    }

    let span_seconds = (end - start).num_days() as f64 * SECONDS_PER_DAY;
    let mut interval = TimeTickInterval::for_span(span_seconds, max_count);
    let dates = loop {
        let dates = interval.ticks(start, end);
        if dates.len() <= max_count {
            break dates;
        }
        interval = interval.coarser();
    };

    dates
        .into_iter()
        .map(|date| TimeTick {
            date,
            label: time_tick_label(date),
        })
        .collect()
}

/// Multi-scale label: year starts show the year, month starts the month name,
/// Sundays the short month and day, other days the weekday and day.
#[must_use]
pub fn time_tick_label(date: NaiveDate) -> String {
    if date.month() == 1 && date.day() == 1 {
        date.format("%Y").to_string()
    } else if date.day() == 1 {
        date.format("%B").to_string()
    } else if date.weekday() == Weekday::Sun {
        date.format("%b %d").to_string()
    } else {
        date.format("%a %d").to_string()
    }
}
