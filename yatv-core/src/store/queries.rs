//! SQL text for every statement the CLI issues.
//!
//! Placeholders are positional (`?`) and the statements stay inside the
//! dialect subset MySQL and SQLite share, so both adapters run the same text.
//! Money columns are read through `CAST(... AS DOUBLE)` so they decode as
//! `f64` whatever numeric type the schema declares.

/// Connectivity check
pub const PING: &str = "SELECT 1";

// =============================================================================
// Reference lists
// =============================================================================

/// All apps
pub const LIST_APPS: &str = "SELECT a.AppID AS app_id, a.Name AS name FROM App a ORDER BY a.AppID";

/// All platforms
pub const LIST_PLATFORMS: &str =
    "SELECT p.PlatformID AS platform_id, p.Name AS name FROM Platform p ORDER BY p.PlatformID";

/// All shows
pub const LIST_SHOWS: &str =
    "SELECT sh.ShowID AS show_id, sh.Title AS title FROM Shows sh ORDER BY sh.ShowID";

/// Distinct user countries
pub const LIST_COUNTRIES: &str = "SELECT DISTINCT u.Country FROM User u ORDER BY u.Country";

/// Countries with at least one subscription to an app that runs on a mobile platform
pub const LIST_MOBILE_COUNTRIES: &str = "SELECT DISTINCT u.Country \
     FROM User u \
     JOIN Subscription s ON s.UserID = u.UserID \
     JOIN AppPlatform ap ON ap.AppID = s.AppID \
     JOIN Platform p ON p.PlatformID = ap.PlatformID \
     WHERE p.Mobile = 1 \
     ORDER BY u.Country";

/// Platforms an app is available on. Binds: app id
pub const LIST_APP_PLATFORMS: &str = "SELECT p.PlatformID AS platform_id, p.Name AS name \
     FROM AppPlatform ap \
     JOIN Platform p ON ap.PlatformID = p.PlatformID \
     WHERE ap.AppID = ? \
     ORDER BY p.PlatformID";

// =============================================================================
// RegisterUser
// =============================================================================

/// Binds: first name, last name, country, email, password hash
pub const INSERT_USER: &str = "INSERT INTO User (FirstName, LastName, Country, Email, Password) \
     VALUES (?, ?, ?, ?, ?)";

/// Binds: email
pub const SELECT_USER_BY_EMAIL: &str = "SELECT u.UserID AS user_id, u.FirstName AS first_name, \
     u.LastName AS last_name, u.Country AS country, u.Email AS email \
     FROM User u WHERE u.Email = ?";

// =============================================================================
// SubscribeUser
// =============================================================================

/// Binds: app id
pub const SELECT_APP_MONTHLY_COST: &str =
    "SELECT CAST(a.MonthlyCost AS DOUBLE) FROM App a WHERE a.AppID = ?";

/// Binds: user id, cost, expiration date, app id
pub const INSERT_SUBSCRIPTION: &str =
    "INSERT INTO Subscription (UserID, Cost, ExpDate, AppID) VALUES (?, ?, ?, ?)";

/// Binds: user id
pub const SELECT_USER_SUBSCRIPTIONS: &str = "SELECT u.UserID AS user_id, a.Name AS app_name, \
     CAST(s.Cost AS DOUBLE) AS cost, s.ExpDate AS exp_date \
     FROM Subscription s \
     JOIN User u ON u.UserID = s.UserID \
     JOIN App a ON s.AppID = a.AppID \
     WHERE s.UserID = ? \
     ORDER BY s.ExpDate, a.Name";

// =============================================================================
// AddToMyList
// =============================================================================

/// Binds: user id, show id
pub const INSERT_MY_LIST_SHOW: &str = "INSERT INTO MyListShow (UserID, ShowID) VALUES (?, ?)";

/// Binds: user id
pub const SELECT_MY_LIST: &str = "SELECT m.UserID AS user_id, sh.Title AS show_title \
     FROM MyListShow m \
     JOIN Shows sh ON m.ShowID = sh.ShowID \
     WHERE m.UserID = ? \
     ORDER BY sh.ShowID";

// =============================================================================
// UpdatePlatformVersion
// =============================================================================

/// Binds: version, app id, platform id
pub const UPDATE_APP_PLATFORM_VERSION: &str =
    "UPDATE AppPlatform SET VersionNum = ? WHERE AppID = ? AND PlatformID = ?";

/// Binds: app id, platform id
pub const SELECT_APP_PLATFORM_VERSION: &str = "SELECT a.Name AS app_name, \
     p.Name AS platform_name, CAST(ap.VersionNum AS DOUBLE) AS version_num \
     FROM AppPlatform ap \
     JOIN App a ON ap.AppID = a.AppID \
     JOIN Platform p ON ap.PlatformID = p.PlatformID \
     WHERE ap.AppID = ? AND ap.PlatformID = ?";

// =============================================================================
// AddLatestVideo
// =============================================================================

/// App that carries the show's latest episode. Binds: show id
pub const SELECT_SHOW_APP: &str = "SELECT v.AppID \
     FROM Seasons s \
     JOIN Video v ON v.VideoID = s.VideoID \
     WHERE s.ShowID = ? \
     ORDER BY s.SeasonNum DESC, s.EpisodeNum DESC \
     LIMIT 1";

/// Binds: title, description, duration, app id, subscription flag, release date, show id
pub const INSERT_VIDEO: &str = "INSERT INTO Video \
     (Title, Description, Duration, AppID, SubNeeded, ReleaseDate, ShowID) \
     VALUES (?, ?, ?, ?, ?, ?, ?)";

/// Newest video carrying a title. Binds: title
pub const SELECT_VIDEO_ID_BY_TITLE: &str = "SELECT MAX(v.VideoID) FROM Video v WHERE v.Title = ?";

/// Highest season and highest episode number across a show. Both are
/// `NULL` for a show without episodes. Binds: show id
pub const SELECT_CURRENT_SEASON: &str = "SELECT MAX(s.SeasonNum), MAX(s.EpisodeNum) \
     FROM Seasons s \
     WHERE s.ShowID = ?";

/// Binds: show id, video id, season number, episode number
pub const INSERT_SEASON: &str =
    "INSERT INTO Seasons (ShowID, VideoID, SeasonNum, EpisodeNum) VALUES (?, ?, ?, ?)";

/// Binds: show id
pub const SELECT_SHOW_EPISODES: &str = "SELECT sh.Title AS show_title, v.Title AS video_title, \
     s.SeasonNum AS season_num, s.EpisodeNum AS episode_num \
     FROM Seasons s \
     JOIN Shows sh ON s.ShowID = sh.ShowID \
     JOIN Video v ON v.VideoID = s.VideoID \
     WHERE sh.ShowID = ? \
     ORDER BY s.SeasonNum, s.EpisodeNum";

// =============================================================================
// Reports
// =============================================================================

/// Top 10 shows by watch events
pub const MOST_WATCHED_SHOWS: &str = "SELECT q1.watch_count AS watch_count, \
     q1.show_title AS show_title, a.Name AS app_name \
     FROM App a \
     JOIN (SELECT COUNT(*) AS watch_count, sh.Title AS show_title, MIN(v.AppID) AS app_id \
           FROM UserVideoWatched uw \
           JOIN Video v ON v.VideoID = uw.VideoID \
           JOIN Seasons se ON se.VideoID = v.VideoID \
           JOIN Shows sh ON sh.ShowID = se.ShowID \
           GROUP BY sh.ShowID, sh.Title) q1 ON a.AppID = q1.app_id \
     ORDER BY q1.watch_count DESC, q1.show_title \
     LIMIT 10";

/// Videos without a subscription requirement on a platform. Binds: platform id
pub const FREE_VIDEOS_ON_PLATFORM: &str = "SELECT p.Name AS platform_name, \
     v.Title AS video_title \
     FROM AppPlatform ap \
     JOIN Platform p ON p.PlatformID = ap.PlatformID \
     JOIN App a ON a.AppID = ap.AppID \
     JOIN Video v ON v.AppID = a.AppID \
     WHERE v.SubNeeded = 0 AND p.PlatformID = ? \
     ORDER BY v.VideoID";

/// Videos not linked to any season. Binds: release date pattern, minimum duration
pub const LONG_VIDEOS_WITHOUT_SHOW: &str = "SELECT v.VideoID AS video_id, v.Title AS title, \
     v.Duration AS duration \
     FROM Video v \
     WHERE NOT EXISTS (SELECT 1 FROM Seasons s WHERE s.VideoID = v.VideoID) \
     AND v.ReleaseDate LIKE ? \
     AND v.Duration > ? \
     ORDER BY v.VideoID";

/// Revenue per app in a country. Binds: country
pub const APP_REVENUE_BY_COUNTRY: &str = "SELECT u.Country AS country, a.Name AS app_name, \
     CAST(SUM(s.Cost) AS DOUBLE) AS revenue \
     FROM Subscription s \
     JOIN User u ON s.UserID = u.UserID \
     JOIN App a ON a.AppID = s.AppID \
     WHERE u.Country = ? \
     GROUP BY a.AppID, a.Name, u.Country \
     ORDER BY revenue DESC, a.Name";

/// Top 3 tags by watch events
pub const TOP_WATCHED_TAGS: &str = "SELECT COUNT(uvw.VideoID) AS view_count, t.Tag AS tag_name \
     FROM Tag t \
     JOIN Video v ON v.VideoID = t.VideoID \
     JOIN UserVideoWatched uvw ON v.VideoID = uvw.VideoID \
     GROUP BY t.Tag \
     ORDER BY view_count DESC, t.Tag \
     LIMIT 3";

/// Highest spending user in a country. Binds: country
pub const HIGHEST_CUSTOMER: &str = "SELECT u.UserID AS user_id, u.FirstName AS first_name, \
     u.LastName AS last_name, CAST(ROUND(SUM(s.Cost), 2) AS DOUBLE) AS revenue \
     FROM User u \
     JOIN Subscription s ON u.UserID = s.UserID \
     WHERE u.Country = ? \
     GROUP BY u.UserID, u.FirstName, u.LastName \
     ORDER BY revenue DESC, u.UserID \
     LIMIT 1";

/// Lowest earning app in a country. Binds: country
pub const LOWEST_APP: &str = "SELECT a.AppID AS app_id, a.Name AS app_name, \
     CAST(ROUND(SUM(s.Cost), 2) AS DOUBLE) AS revenue \
     FROM Subscription s \
     JOIN App a ON a.AppID = s.AppID \
     JOIN User u ON s.UserID = u.UserID \
     WHERE u.Country = ? \
     GROUP BY a.AppID, a.Name \
     ORDER BY revenue, a.AppID \
     LIMIT 1";

/// Top 3 videos of the country's highest earning app. Binds: country
pub const MOST_PROFITABLE_APP_VIDEOS: &str = "SELECT a.Name AS app_name, \
     v.Title AS video_title, COUNT(uw.VideoID) AS watch_count \
     FROM (SELECT s.AppID AS app_id, SUM(s.Cost) AS revenue \
           FROM Subscription s \
           JOIN User u ON u.UserID = s.UserID \
           WHERE u.Country = ? \
           GROUP BY s.AppID \
           ORDER BY revenue DESC, s.AppID \
           LIMIT 1) q1 \
     JOIN Video v ON v.AppID = q1.app_id \
     JOIN App a ON a.AppID = q1.app_id \
     JOIN UserVideoWatched uw ON v.VideoID = uw.VideoID \
     GROUP BY v.VideoID, v.Title, a.Name \
     ORDER BY watch_count DESC, v.Title \
     LIMIT 3";

/// Top 3 episodes of a show. Binds: show id
pub const MOST_WATCHED_EPISODES: &str = "SELECT sh.Title AS show_title, \
     v.Title AS video_title, COUNT(uw.VideoID) AS watch_count \
     FROM UserVideoWatched uw \
     JOIN Seasons s ON s.VideoID = uw.VideoID \
     JOIN Shows sh ON sh.ShowID = s.ShowID \
     JOIN Video v ON v.VideoID = s.VideoID \
     WHERE sh.ShowID = ? \
     GROUP BY s.VideoID, sh.Title, v.Title \
     ORDER BY watch_count DESC, sh.Title, v.Title \
     LIMIT 3";

/// Rounded revenue of mobile apps in a country. Binds: country
///
/// Joining AppPlatform directly would repeat an app's revenue once per
/// mobile platform it runs on.
pub const MOBILE_APP_REVENUE: &str = "SELECT a.Name AS app_name, a.AppID AS app_id, \
     CAST(ROUND(SUM(s.Cost), 0) AS DOUBLE) AS revenue \
     FROM App a \
     JOIN Subscription s ON s.AppID = a.AppID \
     JOIN User u ON s.UserID = u.UserID \
     WHERE u.Country = ? \
     AND EXISTS (SELECT 1 FROM AppPlatform ap \
                 JOIN Platform p ON p.PlatformID = ap.PlatformID \
                 WHERE ap.AppID = a.AppID AND p.Mobile = 1) \
     GROUP BY a.AppID, a.Name \
     ORDER BY revenue DESC, a.Name";
