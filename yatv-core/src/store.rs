//! Store trait and factory for the YaTV schema.
//!
//! Every command talks to the database through [`VideoStore`]. The trait is
//! object-safe so the binary can hold a `Box<dyn VideoStore>` chosen from the
//! database URL, and tests can swap in an in-memory SQLite store.
//!
//! # Module Structure
//! - `queries`: SQL text shared by every adapter
//! - `sql`: macro that implements [`VideoStore`] over a `sqlx` pool
//! - `mysql`, `sqlite`: engine adapters behind the `mysql`/`sqlite` features

use crate::{
    Result,
    config::{StoreKind, detect_store_kind},
    models::{
        AppOption, AppPlatformVersion, AppRevenue, AppRevenueSummary, CustomerRevenue,
        EpisodeRow, EpisodeWatchCount, FreeVideo, LongVideo, MobileAppRevenue, MyListEntry,
        NewSeasonEntry, NewSubscription, NewUser, NewVideo, PlatformOption, RegisteredUser,
        SeasonSlot, ShowOption, ShowWatchCount, SubscriptionRow, TagViewCount, VideoWatchCount,
    },
};
use async_trait::async_trait;

pub mod queries;
mod sql;

#[cfg(feature = "mysql")]
pub mod mysql;

#[cfg(feature = "sqlite")]
pub mod sqlite;

#[cfg(feature = "mysql")]
pub use mysql::MySqlStore;

#[cfg(feature = "sqlite")]
pub use sqlite::SqliteStore;

/// Data access for every YaTV command.
///
/// Each method issues exactly one statement with positional binding and
/// returns rows in the order the statement defines. Mutations return no rows;
/// the caller re-selects to confirm.
#[async_trait]
pub trait VideoStore: Send + Sync {
    /// Engine behind this store
    fn kind(&self) -> StoreKind;

    /// Runs a trivial statement to prove the connection is usable.
    ///
    /// # Errors
    /// Returns error if the statement cannot be executed
    async fn test_connection(&self) -> Result<()>;

    /// Closes the underlying connection.
    async fn close(&self);

    // -------------------------------------------------------------------------
    // Reference lists
    // -------------------------------------------------------------------------

    /// All apps ordered by id.
    async fn list_apps(&self) -> Result<Vec<AppOption>>;

    /// All platforms ordered by id.
    async fn list_platforms(&self) -> Result<Vec<PlatformOption>>;

    /// All shows ordered by id.
    async fn list_shows(&self) -> Result<Vec<ShowOption>>;

    /// Distinct countries of registered users.
    async fn list_countries(&self) -> Result<Vec<String>>;

    /// Distinct countries with a subscription to an app on a mobile platform.
    async fn list_mobile_countries(&self) -> Result<Vec<String>>;

    /// Platforms the given app is available on.
    async fn list_app_platforms(&self, app_id: i64) -> Result<Vec<PlatformOption>>;

    // -------------------------------------------------------------------------
    // Mutations and their confirmatory reads
    // -------------------------------------------------------------------------

    /// Inserts a user row.
    async fn insert_user(&self, user: &NewUser) -> Result<()>;

    /// Users registered under an email address.
    async fn find_user_by_email(&self, email: &str) -> Result<Vec<RegisteredUser>>;

    /// Monthly cost of an app, `None` when the app does not exist.
    async fn app_monthly_cost(&self, app_id: i64) -> Result<Option<f64>>;

    /// Inserts a subscription row.
    async fn insert_subscription(&self, subscription: &NewSubscription) -> Result<()>;

    /// All subscriptions held by a user.
    async fn subscriptions_for_user(&self, user_id: i64) -> Result<Vec<SubscriptionRow>>;

    /// Adds a show to a user's list.
    async fn insert_my_list_show(&self, user_id: i64, show_id: i64) -> Result<()>;

    /// Shows on a user's list.
    async fn my_list_for_user(&self, user_id: i64) -> Result<Vec<MyListEntry>>;

    /// Sets the version of an app on a platform and returns the rows touched.
    async fn update_platform_version(
        &self,
        app_id: i64,
        platform_id: i64,
        version: f32,
    ) -> Result<u64>;

    /// Current version of an app on a platform.
    async fn app_platform_version(
        &self,
        app_id: i64,
        platform_id: i64,
    ) -> Result<Vec<AppPlatformVersion>>;

    /// App that carries the show's latest episode.
    async fn show_app_id(&self, show_id: i64) -> Result<Option<i64>>;

    /// Inserts a video row.
    async fn insert_video(&self, video: &NewVideo) -> Result<()>;

    /// Highest video id carrying a title.
    async fn latest_video_id_by_title(&self, title: &str) -> Result<Option<i64>>;

    /// Highest season and highest episode number of a show, each taken
    /// over all of its episodes.
    async fn current_season(&self, show_id: i64) -> Result<Option<SeasonSlot>>;

    /// Links a video into a show season.
    async fn insert_season_entry(&self, entry: &NewSeasonEntry) -> Result<()>;

    /// All episodes of a show ordered by season then episode.
    async fn show_episodes(&self, show_id: i64) -> Result<Vec<EpisodeRow>>;

    // -------------------------------------------------------------------------
    // Reports
    // -------------------------------------------------------------------------

    /// Ten most watched shows with the app that carries them.
    async fn most_watched_shows(&self) -> Result<Vec<ShowWatchCount>>;

    /// Videos needing no subscription that are reachable on a platform.
    async fn free_videos_on_platform(&self, platform_id: i64) -> Result<Vec<FreeVideo>>;

    /// Videos released in `release_year`, longer than `min_duration`
    /// seconds, that belong to no season.
    async fn long_videos_without_show(
        &self,
        release_year: i32,
        min_duration: i64,
    ) -> Result<Vec<LongVideo>>;

    /// Summed subscription revenue per app inside a country.
    async fn app_revenue_by_country(&self, country: &str) -> Result<Vec<AppRevenue>>;

    /// Three tags with the most watch events.
    async fn top_watched_tags(&self) -> Result<Vec<TagViewCount>>;

    /// User with the highest subscription spend in a country.
    async fn highest_customer(&self, country: &str) -> Result<Option<CustomerRevenue>>;

    /// App with the lowest subscription revenue in a country.
    async fn lowest_app(&self, country: &str) -> Result<Option<AppRevenueSummary>>;

    /// Three most watched videos of the country's highest earning app.
    async fn most_profitable_app_videos(&self, country: &str) -> Result<Vec<VideoWatchCount>>;

    /// Three most watched episodes of a show.
    async fn most_watched_episodes(&self, show_id: i64) -> Result<Vec<EpisodeWatchCount>>;

    /// Rounded revenue of apps with a mobile platform inside a country.
    async fn mobile_app_revenue(&self, country: &str) -> Result<Vec<MobileAppRevenue>>;
}

/// Opens the store selected by the database URL scheme.
///
/// The connection is established eagerly so that an unreachable server is
/// reported before any prompt is shown.
///
/// # Errors
/// Returns error if:
/// - The URL scheme is not supported
/// - The matching engine was not compiled in
/// - The connection cannot be established
pub async fn connect_store(database_url: &str) -> Result<Box<dyn VideoStore>> {
    match detect_store_kind(database_url)? {
        #[cfg(feature = "mysql")]
        StoreKind::MySql => Ok(Box::new(MySqlStore::connect(database_url).await?)),
        #[cfg(not(feature = "mysql"))]
        StoreKind::MySql => Err(crate::error::YatvError::configuration(
            "MySQL support not compiled in; build with --features mysql",
        )),
        #[cfg(feature = "sqlite")]
        StoreKind::Sqlite => Ok(Box::new(SqliteStore::connect(database_url).await?)),
        #[cfg(not(feature = "sqlite"))]
        StoreKind::Sqlite => Err(crate::error::YatvError::configuration(
            "SQLite support not compiled in; build with --features sqlite",
        )),
    }
}

/// `LIKE` pattern matching dates in a calendar year.
pub(crate) fn release_year_pattern(year: i32) -> String {
    format!("{year:04}-%")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_release_year_pattern() {
        assert_eq!(release_year_pattern(2020), "2020-%");
    }

    #[tokio::test]
    async fn test_unsupported_url_rejected_before_connecting() {
        let result = connect_store("postgres://localhost/Project").await;
        assert!(matches!(
            result,
            Err(crate::error::YatvError::Configuration { .. })
        ));
    }
}
