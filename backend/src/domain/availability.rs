//! Availability rules for the booking wizard.
//!
//! Bookable dates are derived from "today" and a provider's weekday
//! availability; bookable times are a fixed half-hour grid. Both are
//! recomputed on every call so a wizard left open overnight never offers
//! yesterday's window.

use chrono::{Datelike, Duration, Local, NaiveDate, NaiveTime, Timelike};
use std::sync::{Arc, Mutex, PoisonError};

use crate::domain::errors::ValidationError;
use crate::domain::models::DomainProvider;

/// Number of days ahead (starting tomorrow) that can be booked
pub const BOOKING_WINDOW_DAYS: i64 = 14;
/// First bookable slot of the day (hour, minute)
pub const FIRST_SLOT: (u32, u32) = (9, 0);
/// Last bookable slot of the day, inclusive
pub const LAST_SLOT: (u32, u32) = (17, 0);
pub const SLOT_STEP_MINUTES: i64 = 30;

/// Source of "today" for date derivation
pub trait Clock: Send + Sync {
    fn today(&self) -> NaiveDate;
}

/// Local wall-clock date
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }
}

/// A clock pinned to a given date, movable for tests and demos
#[derive(Debug)]
pub struct FixedClock {
    today: Mutex<NaiveDate>,
}

impl FixedClock {
    pub fn new(today: NaiveDate) -> Self {
        Self {
            today: Mutex::new(today),
        }
    }

    pub fn set(&self, today: NaiveDate) {
        *self.today.lock().unwrap_or_else(PoisonError::into_inner) = today;
    }
}

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        *self.today.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// A date the selected provider can be booked on
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AvailableDate {
    pub date: NaiveDate,
    pub label: String,
}

/// A bookable time of day
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookableSlot {
    pub time: NaiveTime,
    pub label: String,
}

/// Computes bookable dates and time slots
#[derive(Clone)]
pub struct AvailabilityService {
    clock: Arc<dyn Clock>,
}

impl AvailabilityService {
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self { clock }
    }

    pub fn today(&self) -> NaiveDate {
        self.clock.today()
    }

    /// Dates bookable with `provider`, relative to the clock's current date
    pub fn available_dates(&self, provider: &DomainProvider) -> Vec<AvailableDate> {
        self.available_dates_from(provider, self.today())
    }

    /// Offsets +1 through +14 from `today` whose weekday the provider works,
    /// in chronological order
    pub fn available_dates_from(&self, provider: &DomainProvider, today: NaiveDate) -> Vec<AvailableDate> {
        (1..=BOOKING_WINDOW_DAYS)
            .filter_map(|offset| today.checked_add_signed(Duration::days(offset)))
            .filter(|date| provider.is_available_on(date.weekday()))
            .map(|date| AvailableDate {
                date,
                label: self.date_label(date),
            })
            .collect()
    }

    pub fn is_date_available(&self, provider: &DomainProvider, date: NaiveDate) -> bool {
        let today = self.today();
        let offset = (date - today).num_days();
        (1..=BOOKING_WINDOW_DAYS).contains(&offset) && provider.is_available_on(date.weekday())
    }

    /// The fixed half-hour grid from 09:00 to 17:00 inclusive (17 slots)
    pub fn available_time_slots(&self) -> Vec<BookableSlot> {
        let (Some(first), Some(last)) = (slot_time(FIRST_SLOT), slot_time(LAST_SLOT)) else {
            return Vec::new();
        };
        let mut slots = Vec::new();
        let mut current = first;
        while current <= last {
            slots.push(BookableSlot {
                time: current,
                label: self.format_12_hour(current),
            });
            let (next, wrapped) = current.overflowing_add_signed(Duration::minutes(SLOT_STEP_MINUTES));
            if wrapped != 0 {
                break;
            }
            current = next;
        }
        slots
    }

    pub fn is_time_slot_available(&self, time: NaiveTime) -> bool {
        self.available_time_slots().iter().any(|slot| slot.time == time)
    }

    /// Label such as "Mon, Jan 8"
    pub fn date_label(&self, date: NaiveDate) -> String {
        date.format("%a, %b %-d").to_string()
    }

    /// 12-hour clock label: 09:00 -> "9:00 AM", 14:00 -> "2:00 PM", 00:30 -> "12:30 AM"
    pub fn format_12_hour(&self, time: NaiveTime) -> String {
        let (is_pm, hour) = time.hour12();
        let suffix = if is_pm { "PM" } else { "AM" };
        format!("{}:{:02} {}", hour, time.minute(), suffix)
    }

    /// Parse a YYYY-MM-DD date
    pub fn parse_date(&self, text: &str) -> Result<NaiveDate, ValidationError> {
        NaiveDate::parse_from_str(text.trim(), "%Y-%m-%d")
            .map_err(|_| ValidationError::MalformedDate(text.to_string()))
    }

    /// Parse an "H:MM" or "HH:MM" 24-hour time
    pub fn parse_time(&self, text: &str) -> Result<NaiveTime, ValidationError> {
        let malformed = || ValidationError::MalformedTime(text.to_string());
        let (hour, minute) = text.trim().split_once(':').ok_or_else(malformed)?;
        let all_digits = |part: &str| part.bytes().all(|b| b.is_ascii_digit());
        if hour.is_empty() || hour.len() > 2 || minute.len() != 2 || !all_digits(hour) || !all_digits(minute) {
            return Err(malformed());
        }
        let hour: u32 = hour.parse().map_err(|_| malformed())?;
        let minute: u32 = minute.parse().map_err(|_| malformed())?;
        NaiveTime::from_hms_opt(hour, minute, 0).ok_or_else(malformed)
    }
}

fn slot_time((hour, minute): (u32, u32)) -> Option<NaiveTime> {
    NaiveTime::from_hms_opt(hour, minute, 0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Weekday;
    use shared::Specialization;

    fn provider_with(availability: Vec<Weekday>) -> DomainProvider {
        DomainProvider {
            id: 1,
            name: "Test Provider".to_string(),
            title: "Tutor".to_string(),
            specialization: Specialization::Adhd,
            expertise: vec!["Focus Techniques".to_string()],
            rating: 4.5,
            review_count: 10,
            hourly_rate: 60.0,
            availability,
        }
    }

    fn service_on(y: i32, m: u32, d: u32) -> AvailabilityService {
        let today = NaiveDate::from_ymd_opt(y, m, d).unwrap();
        AvailabilityService::new(Arc::new(FixedClock::new(today)))
    }

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_mon_wed_provider_from_thursday() {
        // 2024-01-04 is a Thursday
        let service = service_on(2024, 1, 4);
        let provider = provider_with(vec![Weekday::Mon, Weekday::Wed]);

        let dates: Vec<NaiveDate> = service
            .available_dates(&provider)
            .into_iter()
            .map(|d| d.date)
            .collect();

        assert_eq!(
            dates,
            vec![ymd(2024, 1, 8), ymd(2024, 1, 10), ymd(2024, 1, 15), ymd(2024, 1, 17)]
        );
        assert!(!dates.contains(&ymd(2024, 1, 5)));
        assert!(!dates.contains(&ymd(2024, 1, 9)));
    }

    #[test]
    fn test_dates_stay_inside_window_and_match_availability() {
        let today = ymd(2024, 2, 26);
        let service = service_on(2024, 2, 26);
        let provider = provider_with(vec![Weekday::Tue, Weekday::Thu, Weekday::Sat, Weekday::Sun]);

        let dates = service.available_dates(&provider);
        assert!(!dates.is_empty());
        for option in &dates {
            assert!(option.date > today);
            assert!(option.date <= today + Duration::days(BOOKING_WINDOW_DAYS));
            assert!(provider.is_available_on(option.date.weekday()));
        }
        assert!(dates.windows(2).all(|pair| pair[0].date < pair[1].date));
    }

    #[test]
    fn test_window_crosses_leap_day() {
        let service = service_on(2024, 2, 27);
        let provider = provider_with(vec![Weekday::Thu]);
        let dates = service.available_dates(&provider);
        assert_eq!(dates[0].date, ymd(2024, 2, 29));
        assert_eq!(dates[0].label, "Thu, Feb 29");
    }

    #[test]
    fn test_today_and_day_fifteen_are_excluded() {
        let service = service_on(2024, 1, 4);
        let everyday = provider_with(vec![
            Weekday::Mon, Weekday::Tue, Weekday::Wed, Weekday::Thu,
            Weekday::Fri, Weekday::Sat, Weekday::Sun,
        ]);
        assert_eq!(service.available_dates(&everyday).len(), 14);
        assert!(!service.is_date_available(&everyday, ymd(2024, 1, 4)));
        assert!(service.is_date_available(&everyday, ymd(2024, 1, 18)));
        assert!(!service.is_date_available(&everyday, ymd(2024, 1, 19)));
    }

    #[test]
    fn test_no_availability_gives_no_dates() {
        let service = service_on(2024, 1, 4);
        assert!(service.available_dates(&provider_with(vec![])).is_empty());
    }

    #[test]
    fn test_dates_follow_the_clock() {
        let clock = Arc::new(FixedClock::new(ymd(2024, 1, 4)));
        let service = AvailabilityService::new(clock.clone());
        let provider = provider_with(vec![Weekday::Mon]);

        assert_eq!(service.available_dates(&provider)[0].date, ymd(2024, 1, 8));
        clock.set(ymd(2024, 1, 8));
        assert_eq!(service.available_dates(&provider)[0].date, ymd(2024, 1, 15));
    }

    #[test]
    fn test_time_slots_grid() {
        let service = service_on(2024, 1, 4);
        let slots = service.available_time_slots();

        assert_eq!(slots.len(), 17);
        assert_eq!(slots[0].time, NaiveTime::from_hms_opt(9, 0, 0).unwrap());
        assert_eq!(slots[16].time, NaiveTime::from_hms_opt(17, 0, 0).unwrap());
        assert!(slots.windows(2).all(|pair| pair[0].time < pair[1].time));
        assert_eq!(slots[0].label, "9:00 AM");
        assert_eq!(slots[1].label, "9:30 AM");
        assert_eq!(slots[6].label, "12:00 PM");
        assert_eq!(slots[16].label, "5:00 PM");
    }

    #[test]
    fn test_twelve_hour_labels() {
        let service = service_on(2024, 1, 4);
        let nine = service.parse_time("9:00").unwrap();
        let two_pm = service.parse_time("14:00").unwrap();

        assert_eq!(service.format_12_hour(nine), "9:00 AM");
        assert_eq!(service.format_12_hour(two_pm), "2:00 PM");
        assert_eq!(service.format_12_hour(NaiveTime::from_hms_opt(0, 30, 0).unwrap()), "12:30 AM");
        assert_eq!(service.format_12_hour(NaiveTime::from_hms_opt(12, 0, 0).unwrap()), "12:00 PM");
    }

    #[test]
    fn test_parse_time_rejects_bad_input() {
        let service = service_on(2024, 1, 4);
        assert_eq!(service.parse_time("09:30").unwrap(), NaiveTime::from_hms_opt(9, 30, 0).unwrap());
        assert!(service.parse_time("930").is_err());
        assert!(service.parse_time("25:00").is_err());
        assert!(service.parse_time("9:5").is_err());
        assert!(service.parse_time("nine:00").is_err());
        assert!(service.parse_time("+9:00").is_err());
        assert!(service.parse_time("9:+5").is_err());
        assert!(service.parse_time("1-:00").is_err());
    }

    #[test]
    fn test_time_slot_membership() {
        let service = service_on(2024, 1, 4);
        assert!(service.is_time_slot_available(NaiveTime::from_hms_opt(16, 30, 0).unwrap()));
        assert!(!service.is_time_slot_available(NaiveTime::from_hms_opt(17, 30, 0).unwrap()));
        assert!(!service.is_time_slot_available(NaiveTime::from_hms_opt(10, 15, 0).unwrap()));
        assert!(!service.is_time_slot_available(NaiveTime::from_hms_opt(8, 30, 0).unwrap()));
    }

    #[test]
    fn test_parse_date() {
        let service = service_on(2024, 1, 4);
        assert_eq!(service.parse_date("2024-01-08").unwrap(), ymd(2024, 1, 8));
        assert_eq!(
            service.parse_date("01/08/2024"),
            Err(ValidationError::MalformedDate("01/08/2024".to_string()))
        );
    }
}
