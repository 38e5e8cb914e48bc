//! Text output for reference lists and command results.
//!
//! One line per row with labeled fields in a fixed order. Trailing spaces
//! after the last field are part of the format.

use crate::execute::CommandOutcome;
use crate::models::{
    AppOption, AppPlatformVersion, AppRevenue, AppRevenueSummary, CustomerRevenue, EpisodeRow,
    EpisodeWatchCount, FreeVideo, LongVideo, MobileAppRevenue, MyListEntry, PlatformOption,
    RegisteredUser, ShowOption, ShowWatchCount, SubscriptionRow, TagViewCount, VideoWatchCount,
};

/// Headers printed before reference lists
pub mod headers {
    /// Before the app list
    pub const APPS: &str = "Available Apps: ";
    /// Before the platforms of one app
    pub const APP_PLATFORMS: &str = "This App is available on Platform(s): ";
    /// Before the show list
    pub const SHOWS: &str = "Available Shows: ";
    /// Before the platform list
    pub const PLATFORMS: &str = "Available Platforms: ";
    /// Before the country list
    pub const COUNTRIES: &str = "Available Countries: ";
    /// Before the list of countries with mobile subscriptions
    pub const MOBILE_COUNTRIES: &str = "Available Countries with Apps that Have Mobile Platforms: ";
}

/// Headers printed before the confirmatory rows of mutating commands
pub mod confirmations {
    /// RegisterUser
    pub const REGISTERED: &str = "REGISTERED! ";
    /// SubscribeUser
    pub const SUBSCRIBED: &str = "Success! Current Subscriptions: ";
    /// AddToMyList
    pub const LIST_UPDATED: &str = "Success! Current Show(s) on Your List: ";
    /// UpdatePlatformVersion
    pub const VERSION_UPDATED: &str = "Success! Current Version of this App on this Platform: ";
    /// AddLatestVideo
    pub const VIDEO_ADDED: &str = "Success! Episodes in the Current Season: ";
}

fn block<T>(header: Option<&str>, rows: &[T], line: impl Fn(&T) -> String) -> String {
    let mut out = String::new();
    if let Some(header) = header {
        out.push_str(header);
        out.push('\n');
    }
    for row in rows {
        out.push_str(&line(row));
        out.push('\n');
    }
    out
}

// =============================================================================
// Reference lists
// =============================================================================

/// App list shown before app prompts
pub fn app_list(apps: &[AppOption]) -> String {
    block(Some(headers::APPS), apps, |a| {
        format!("ID: {} Name: {} ", a.app_id, a.name)
    })
}

/// Platforms of a single app
pub fn app_platform_list(platforms: &[PlatformOption]) -> String {
    block(Some(headers::APP_PLATFORMS), platforms, |p| {
        format!("PlatformID: {}, Platform: {} ", p.platform_id, p.name)
    })
}

/// Show list shown before show prompts
pub fn show_list(shows: &[ShowOption]) -> String {
    block(Some(headers::SHOWS), shows, |s| {
        format!("ID: {} Name: {} ", s.show_id, s.title)
    })
}

/// Platform list shown before the platform prompt
pub fn platform_list(platforms: &[PlatformOption]) -> String {
    block(Some(headers::PLATFORMS), platforms, |p| {
        format!("ID: {} Name: {} ", p.platform_id, p.name)
    })
}

/// Country list under the given header
pub fn country_list(header: &str, countries: &[String]) -> String {
    block(Some(header), countries, |c| format!("COUNTRY: {c} "))
}

// =============================================================================
// Command results
// =============================================================================

fn registered_user(u: &RegisteredUser) -> String {
    format!(
        "USER ID: {}, FIRST NAME: {}, LAST NAME: {}, COUNTRY: {}, EMAIL: {}",
        u.user_id, u.first_name, u.last_name, u.country, u.email
    )
}

fn subscription(s: &SubscriptionRow) -> String {
    format!(
        "User ID: {}, App: {}, Cost: {:.2}. ExpDate: {} ",
        s.user_id,
        s.app_name,
        s.cost,
        s.exp_date.format("%Y-%m-%d")
    )
}

fn my_list_entry(m: &MyListEntry) -> String {
    format!("USER ID: {} SHOW: {} ", m.user_id, m.show_title)
}

fn platform_version(v: &AppPlatformVersion) -> String {
    format!(
        "APP: {}, PLATFORM: {}, Version Number: {:.2} ",
        v.app_name, v.platform_name, v.version_num
    )
}

fn episode(e: &EpisodeRow) -> String {
    format!(
        "SHOW: {}, VIDEO: {}, SEASON: {}, EPISODE: {} ",
        e.show_title, e.video_title, e.season_num, e.episode_num
    )
}

fn show_watch_count(s: &ShowWatchCount) -> String {
    format!(
        "WATCH COUNT: {} SHOW: {} APP: {} ",
        s.watch_count, s.show_title, s.app_name
    )
}

fn free_video(v: &FreeVideo) -> String {
    format!("PLATFORM: {}, VIDEO NAME: {} ", v.platform_name, v.video_title)
}

fn long_video(v: &LongVideo) -> String {
    format!(
        "VIDEO ID: {}, TITLE: {}, DURATION: {} ",
        v.video_id, v.title, v.duration
    )
}

fn app_revenue(r: &AppRevenue) -> String {
    format!(
        "COUNTRY: {}, APP: {}, REVENUE: {:.2} ",
        r.country, r.app_name, r.revenue
    )
}

fn tag_view_count(t: &TagViewCount) -> String {
    format!("VIEW COUNT: {}, TAG NAME: {} ", t.view_count, t.tag_name)
}

fn customer_revenue(c: &CustomerRevenue) -> String {
    format!(
        "UserID: {} \nFirstName: {} \nLastName: {} \nRevenue: {:.2}",
        c.user_id, c.first_name, c.last_name, c.revenue
    )
}

fn app_revenue_summary(a: &AppRevenueSummary) -> String {
    format!(
        "App ID: {} \nApp Name: {} \nRevenue: {:.2} ",
        a.app_id, a.app_name, a.revenue
    )
}

fn video_watch_count(v: &VideoWatchCount) -> String {
    format!(
        "APP: {}, VIDEO: {}, WATCH COUNT: {} ",
        v.app_name, v.video_title, v.watch_count
    )
}

fn episode_watch_count(e: &EpisodeWatchCount) -> String {
    format!(
        "SHOW: {}, EPISODE: {}, VIEW COUNT: {} ",
        e.show_title, e.video_title, e.watch_count
    )
}

fn mobile_app_revenue(m: &MobileAppRevenue) -> String {
    format!("APP: {}, REVENUE: {:.0} ", m.app_name, m.revenue)
}

/// Formats a command's result rows.
///
/// Mutating commands print their confirmation header followed by the
/// re-selected rows; reports print rows only. An empty result prints
/// nothing beyond the header.
pub fn render_outcome(outcome: &CommandOutcome) -> String {
    use confirmations::*;

    match outcome {
        CommandOutcome::Registered(users) => block(Some(REGISTERED), users, registered_user),
        CommandOutcome::Subscribed(subscriptions) => {
            block(Some(SUBSCRIBED), subscriptions, subscription)
        }
        CommandOutcome::ListUpdated(entries) => block(Some(LIST_UPDATED), entries, my_list_entry),
        CommandOutcome::VersionUpdated(versions) => {
            block(Some(VERSION_UPDATED), versions, platform_version)
        }
        CommandOutcome::VideoAdded(episodes) => block(Some(VIDEO_ADDED), episodes, episode),
        CommandOutcome::MostWatchedShows(rows) => block(None, rows, show_watch_count),
        CommandOutcome::FreeVideos(rows) => block(None, rows, free_video),
        CommandOutcome::LongVideos(rows) => block(None, rows, long_video),
        CommandOutcome::AppRevenue(rows) => block(None, rows, app_revenue),
        CommandOutcome::TopTags(rows) => block(None, rows, tag_view_count),
        CommandOutcome::HighestCustomer(row) => {
            block(None, row.as_slice(), customer_revenue)
        }
        CommandOutcome::LowestApp(row) => block(None, row.as_slice(), app_revenue_summary),
        CommandOutcome::ProfitableVideos(rows) => block(None, rows, video_watch_count),
        CommandOutcome::WatchedEpisodes(rows) => block(None, rows, episode_watch_count),
        CommandOutcome::MobileRevenue(rows) => block(None, rows, mobile_app_revenue),
    }
}
