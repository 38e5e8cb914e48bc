//! Data model for the YaTV streaming schema.
//!
//! No object graph is kept in memory: these are the transient row shapes
//! returned by the store, the input records written by the mutating
//! commands, and the small pieces of arithmetic those commands depend on.

use chrono::{Months, NaiveDate};

// =============================================================================
// Reference rows
// =============================================================================

/// An app offered by the service
#[derive(Debug, Clone, PartialEq, sqlx::FromRow)]
pub struct AppOption {
    /// `App.AppID`
    pub app_id: i64,
    /// `App.Name`
    pub name: String,
}

/// A platform an app can run on
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct PlatformOption {
    /// `Platform.PlatformID`
    pub platform_id: i64,
    /// `Platform.Name`
    pub name: String,
}

/// A show
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct ShowOption {
    /// `Shows.ShowID`
    pub show_id: i64,
    /// `Shows.Title`
    pub title: String,
}

// =============================================================================
// Confirmatory rows for mutating commands
// =============================================================================

/// A registered user as shown after registration (never the password hash)
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct RegisteredUser {
    pub user_id: i64,
    pub first_name: String,
    pub last_name: String,
    pub country: String,
    pub email: String,
}

/// One of a user's subscriptions
#[derive(Debug, Clone, PartialEq, sqlx::FromRow)]
pub struct SubscriptionRow {
    pub user_id: i64,
    pub app_name: String,
    pub cost: f64,
    pub exp_date: NaiveDate,
}

/// A show on a user's "My List"
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct MyListEntry {
    pub user_id: i64,
    pub show_title: String,
}

/// The version of an app on one platform
#[derive(Debug, Clone, PartialEq, sqlx::FromRow)]
pub struct AppPlatformVersion {
    pub app_name: String,
    pub platform_name: String,
    pub version_num: f64,
}

/// An episode of a show
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct EpisodeRow {
    pub show_title: String,
    pub video_title: String,
    pub season_num: i64,
    pub episode_num: i64,
}

// =============================================================================
// Report rows
// =============================================================================

/// Watch count of a show with the app that carries it
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct ShowWatchCount {
    pub watch_count: i64,
    pub show_title: String,
    pub app_name: String,
}

/// A video that needs no subscription, with the platform it is reachable on
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct FreeVideo {
    pub platform_name: String,
    pub video_title: String,
}

/// A long video that belongs to no show season
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct LongVideo {
    pub video_id: i64,
    pub title: String,
    pub duration: i64,
}

/// Subscription revenue of one app inside a country
#[derive(Debug, Clone, PartialEq, sqlx::FromRow)]
pub struct AppRevenue {
    pub country: String,
    pub app_name: String,
    pub revenue: f64,
}

/// Number of watches across all videos carrying a tag
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct TagViewCount {
    pub view_count: i64,
    pub tag_name: String,
}

/// A user's total subscription spend
#[derive(Debug, Clone, PartialEq, sqlx::FromRow)]
pub struct CustomerRevenue {
    pub user_id: i64,
    pub first_name: String,
    pub last_name: String,
    pub revenue: f64,
}

/// An app's total subscription revenue
#[derive(Debug, Clone, PartialEq, sqlx::FromRow)]
pub struct AppRevenueSummary {
    pub app_id: i64,
    pub app_name: String,
    pub revenue: f64,
}

/// Watch count of a single video of an app
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct VideoWatchCount {
    pub app_name: String,
    pub video_title: String,
    pub watch_count: i64,
}

/// Watch count of a single episode of a show
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct EpisodeWatchCount {
    pub show_title: String,
    pub video_title: String,
    pub watch_count: i64,
}

/// Revenue of an app available on at least one mobile platform
#[derive(Debug, Clone, PartialEq, sqlx::FromRow)]
pub struct MobileAppRevenue {
    pub app_name: String,
    pub app_id: i64,
    pub revenue: f64,
}

// =============================================================================
// Records written by mutating commands
// =============================================================================

/// A user row ready for insertion; the password is already hashed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    pub first_name: String,
    pub last_name: String,
    pub country: String,
    pub email: String,
    pub password_hash: String,
}

/// A subscription row ready for insertion
#[derive(Debug, Clone, PartialEq)]
pub struct NewSubscription {
    pub user_id: i64,
    pub app_id: i64,
    pub cost: f64,
    pub exp_date: NaiveDate,
}

/// A video row ready for insertion
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewVideo {
    pub title: String,
    pub description: String,
    /// Length in seconds
    pub duration: i64,
    pub app_id: i64,
    pub subscription_required: bool,
    pub release_date: NaiveDate,
    pub show_id: i64,
}

/// Position of an episode inside a show
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeasonSlot {
    pub season: i64,
    pub episode: i64,
}

impl SeasonSlot {
    /// Slot for a new episode given the show's highest season and its highest
    /// episode number across all seasons.
    ///
    /// New episodes join the highest season and continue the show-wide
    /// episode numbering; a show without episodes starts at season 1,
    /// episode 1.
    pub const fn next_after(current: Option<Self>) -> Self {
        match current {
            Some(latest) => Self {
                season: latest.season,
                episode: latest.episode.saturating_add(1),
            },
            None => Self {
                season: 1,
                episode: 1,
            },
        }
    }
}

/// A season row linking a new video into a show
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NewSeasonEntry {
    pub show_id: i64,
    pub video_id: i64,
    pub slot: SeasonSlot,
}

/// Total price of a subscription: the app's monthly cost times the months
/// bought.
pub fn subscription_cost(monthly_cost: f64, months: u32) -> f64 {
    monthly_cost * f64::from(months)
}

/// Expiration date `months` calendar months after `today`.
///
/// Days past the end of the target month clamp to its last day.
pub fn expiration_date(today: NaiveDate, months: u32) -> Option<NaiveDate> {
    today.checked_add_months(Months::new(months))
}
