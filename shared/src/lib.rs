use serde::{Deserialize, Serialize};
use std::fmt;

/// Learning-support area a provider catalog belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Specialization {
    Autism,
    Adhd,
    Dyslexia,
}

impl Specialization {
    /// Every specialization, in catalog display order
    pub fn all() -> [Specialization; 3] {
        [Specialization::Autism, Specialization::Adhd, Specialization::Dyslexia]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Specialization::Autism => "autism",
            Specialization::Adhd => "adhd",
            Specialization::Dyslexia => "dyslexia",
        }
    }

    /// Parse a specialization from its lowercase wire name
    pub fn from_string(s: &str) -> Result<Self, String> {
        match s.trim().to_lowercase().as_str() {
            "autism" => Ok(Specialization::Autism),
            "adhd" => Ok(Specialization::Adhd),
            "dyslexia" => Ok(Specialization::Dyslexia),
            other => Err(format!("Unknown specialization: {}", other)),
        }
    }
}

impl fmt::Display for Specialization {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Colour token a page uses to skin its booking panel
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThemeToken {
    /// Primary colour as a CSS hex string (e.g. "#7c3aed")
    pub primary: String,
    /// Accent colour as a CSS hex string
    pub accent: String,
}

/// A bookable specialist
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Provider {
    pub id: u32,
    pub name: String,
    pub title: String,
    pub specialization: Specialization,
    /// Expertise tags in display order
    pub expertise: Vec<String>,
    /// Average rating between 0.0 and 5.0
    pub rating: f64,
    pub review_count: u32,
    pub hourly_rate: f64,
    /// Weekday abbreviations the provider accepts sessions on ("Mon", "Wed", ...)
    pub availability: Vec<String>,
}

/// Query parameters for listing providers
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProviderListRequest {
    /// Restrict to one specialization; all catalogs when absent
    pub specialization: Option<Specialization>,
    /// Case-insensitive substring matched against expertise tags
    pub query: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProviderListResponse {
    pub providers: Vec<Provider>,
    /// Theme of the requested specialization, if one was given
    pub theme: Option<ThemeToken>,
}

/// A selectable calendar date
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateOption {
    /// Machine-readable date (YYYY-MM-DD)
    pub date: String,
    /// Human-readable label (e.g. "Mon, Jan 8")
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AvailableDatesResponse {
    pub provider_id: u32,
    pub dates: Vec<DateOption>,
}

/// A selectable time of day
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeSlot {
    /// 24-hour time (HH:MM)
    pub time: String,
    /// 12-hour label (e.g. "2:00 PM")
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeSlotsResponse {
    pub slots: Vec<TimeSlot>,
}

/// Progress of a booking wizard
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WizardStage {
    /// Stage 1: no provider chosen
    Idle,
    /// Stage 2: provider chosen
    ProviderSelected,
    /// Stage 3: provider and date chosen
    DateSelected,
    /// Stage 4: ready to confirm
    TimeSelected,
}

impl WizardStage {
    /// Stage number shown to the user (1-4)
    pub fn number(&self) -> u8 {
        match self {
            WizardStage::Idle => 1,
            WizardStage::ProviderSelected => 2,
            WizardStage::DateSelected => 3,
            WizardStage::TimeSelected => 4,
        }
    }
}

impl fmt::Display for WizardStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            WizardStage::Idle => "idle",
            WizardStage::ProviderSelected => "provider_selected",
            WizardStage::DateSelected => "date_selected",
            WizardStage::TimeSelected => "time_selected",
        };
        write!(f, "{}", name)
    }
}

/// Everything a booking panel needs to render one wizard session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WizardSnapshot {
    pub session_id: String,
    pub specialization: Specialization,
    pub theme: ThemeToken,
    pub stage: WizardStage,
    /// Same as `stage.number()`, included for clients that only show a counter
    pub stage_number: u8,
    pub selected_provider: Option<Provider>,
    pub selected_date: Option<DateOption>,
    pub selected_time: Option<TimeSlot>,
    /// True while a confirmation is in flight; the confirm action must be disabled
    pub submitting: bool,
    /// Dates bookable with the selected provider (empty at stage 1)
    pub available_dates: Vec<DateOption>,
    /// Time slots offered once a date is chosen (empty before stage 3)
    pub available_time_slots: Vec<TimeSlot>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OpenWizardRequest {
    pub specialization: Specialization,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SelectProviderRequest {
    pub provider_id: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SelectDateRequest {
    /// Date in YYYY-MM-DD format
    pub date: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SelectTimeRequest {
    /// Time in H:MM or HH:MM 24-hour format
    pub time: String,
}

/// A confirmed session booking
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Booking {
    pub provider_id: u32,
    /// Date in YYYY-MM-DD format
    pub date: String,
    /// 24-hour time (HH:MM)
    pub time: String,
    pub duration_minutes: u32,
    /// Price charged, copied from the provider's hourly rate
    pub price: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConfirmBookingResponse {
    pub booking: Booking,
    /// Human-readable summary (e.g. "Session with Dr. Sarah Johnson on Mon, Jan 8 at 9:00 AM")
    pub summary: String,
    pub success_message: String,
    /// Wizard state after confirmation (back at stage 1)
    pub wizard: WizardSnapshot,
}

/// Whether a booking still lies ahead
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BookingStatus {
    Upcoming,
    Past,
}

impl BookingStatus {
    pub fn from_string(s: &str) -> Result<Self, String> {
        match s.trim().to_lowercase().as_str() {
            "upcoming" => Ok(BookingStatus::Upcoming),
            "past" => Ok(BookingStatus::Past),
            other => Err(format!("Unknown booking status: {}", other)),
        }
    }
}

impl fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BookingStatus::Upcoming => write!(f, "upcoming"),
            BookingStatus::Past => write!(f, "past"),
        }
    }
}

/// An entry on the "My Bookings" screen
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookingRecord {
    pub id: String,
    pub booking: Booking,
    pub provider_name: String,
    pub specialization: Specialization,
    pub note: String,
    pub status: BookingStatus,
    /// RFC 3339 timestamp
    pub created_at: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BookingListRequest {
    /// Case-insensitive substring matched against provider name and note
    pub query: Option<String>,
    pub status: Option<BookingStatus>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookingListResponse {
    pub bookings: Vec<BookingRecord>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpdateNoteRequest {
    /// Free-text note (max 256 characters)
    pub note: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpdateBookingNoteResponse {
    pub booking: BookingRecord,
    pub success_message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RemoveBookingResponse {
    pub removed_id: String,
    pub success_message: String,
}

/// A provider pinned to the favorites screen
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FavoriteProvider {
    pub provider: Provider,
    pub note: String,
    /// Date the favorite was added (YYYY-MM-DD)
    pub added_on: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FavoriteListRequest {
    /// Case-insensitive substring matched against provider name and expertise
    pub query: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FavoriteListResponse {
    pub favorites: Vec<FavoriteProvider>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AddFavoriteRequest {
    pub provider_id: u32,
    pub note: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FavoriteResponse {
    pub favorite: FavoriteProvider,
    pub success_message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RemoveFavoriteResponse {
    pub provider_id: u32,
    pub success_message: String,
}
