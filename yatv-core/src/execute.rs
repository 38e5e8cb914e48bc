//! Runs a collected request against the store.
//!
//! Mutating commands issue their write and then re-select the affected rows
//! so the operator sees the stored state. Lookups a write depends on fail the
//! command before anything is inserted.

use crate::{
    Result,
    collect::{CommandRequest, Registration, VideoDraft},
    config::HashingConfig,
    error::YatvError,
    models::{
        AppPlatformVersion, AppRevenue, AppRevenueSummary, CustomerRevenue, EpisodeRow,
        EpisodeWatchCount, FreeVideo, LongVideo, MobileAppRevenue, MyListEntry, NewSeasonEntry,
        NewSubscription, NewUser, NewVideo, RegisteredUser, SeasonSlot, ShowWatchCount,
        SubscriptionRow, TagViewCount, VideoWatchCount, expiration_date, subscription_cost,
    },
    security::hash_password,
    store::VideoStore,
};
use chrono::NaiveDate;
use tracing::{debug, info, warn};

/// Release year searched by the long-video report
pub const LONG_VIDEO_RELEASE_YEAR: i32 = 2020;

/// Minimum duration in seconds for the long-video report (exclusive)
pub const LONG_VIDEO_MIN_DURATION: i64 = 1000;

/// Values that come from the environment rather than from prompts
#[derive(Debug, Clone, Copy)]
pub struct ExecutionContext {
    /// Date subscriptions start from
    pub today: NaiveDate,
    /// Password hashing parameters
    pub hashing: HashingConfig,
}

impl ExecutionContext {
    /// Context for the current local date with default hashing
    pub fn now() -> Self {
        Self {
            today: chrono::Local::now().date_naive(),
            hashing: HashingConfig::default(),
        }
    }
}

/// Result rows of a command, one variant per command
#[derive(Debug, Clone, PartialEq)]
pub enum CommandOutcome {
    /// Users registered under the new email
    Registered(Vec<RegisteredUser>),
    /// The user's subscriptions after subscribing
    Subscribed(Vec<SubscriptionRow>),
    /// The user's list after adding a show
    ListUpdated(Vec<MyListEntry>),
    /// The app's version on the platform after the update
    VersionUpdated(Vec<AppPlatformVersion>),
    /// The show's episodes after adding the video
    VideoAdded(Vec<EpisodeRow>),
    /// Top shows by watch count
    MostWatchedShows(Vec<ShowWatchCount>),
    /// Free videos on a platform
    FreeVideos(Vec<FreeVideo>),
    /// Long videos outside any show
    LongVideos(Vec<LongVideo>),
    /// Revenue per app in a country
    AppRevenue(Vec<AppRevenue>),
    /// Top tags by watch count
    TopTags(Vec<TagViewCount>),
    /// Highest spending customer, if the country has any subscriptions
    HighestCustomer(Option<CustomerRevenue>),
    /// Lowest earning app, if the country has any subscriptions
    LowestApp(Option<AppRevenueSummary>),
    /// Top videos of the best earning app
    ProfitableVideos(Vec<VideoWatchCount>),
    /// Top episodes of a show
    WatchedEpisodes(Vec<EpisodeWatchCount>),
    /// Rounded mobile app revenue
    MobileRevenue(Vec<MobileAppRevenue>),
}

impl CommandOutcome {
    /// Number of result rows
    pub fn row_count(&self) -> usize {
        match self {
            Self::Registered(rows) => rows.len(),
            Self::Subscribed(rows) => rows.len(),
            Self::ListUpdated(rows) => rows.len(),
            Self::VersionUpdated(rows) => rows.len(),
            Self::VideoAdded(rows) => rows.len(),
            Self::MostWatchedShows(rows) => rows.len(),
            Self::FreeVideos(rows) => rows.len(),
            Self::LongVideos(rows) => rows.len(),
            Self::AppRevenue(rows) => rows.len(),
            Self::TopTags(rows) => rows.len(),
            Self::HighestCustomer(row) => usize::from(row.is_some()),
            Self::LowestApp(row) => usize::from(row.is_some()),
            Self::ProfitableVideos(rows) => rows.len(),
            Self::WatchedEpisodes(rows) => rows.len(),
            Self::MobileRevenue(rows) => rows.len(),
        }
    }
}

/// Executes a request.
///
/// # Errors
/// Returns error if a statement fails, a dependent lookup finds nothing,
/// or the password cannot be hashed
pub async fn execute(
    request: CommandRequest,
    store: &dyn VideoStore,
    ctx: &ExecutionContext,
) -> Result<CommandOutcome> {
    match request {
        CommandRequest::RegisterUser(registration) => {
            register_user(registration, store, &ctx.hashing).await
        }
        CommandRequest::SubscribeUser {
            user_id,
            app_id,
            months,
        } => subscribe_user(user_id, app_id, months, store, ctx.today).await,
        CommandRequest::AddToMyList { user_id, show_id } => {
            store.insert_my_list_show(user_id, show_id).await?;
            Ok(CommandOutcome::ListUpdated(
                store.my_list_for_user(user_id).await?,
            ))
        }
        CommandRequest::UpdatePlatformVersion {
            app_id,
            platform_id,
            version,
        } => {
            let updated = store
                .update_platform_version(app_id, platform_id, version)
                .await?;
            if updated == 0 {
                warn!(
                    "App {} has no entry for platform {}; nothing updated",
                    app_id, platform_id
                );
            }
            Ok(CommandOutcome::VersionUpdated(
                store.app_platform_version(app_id, platform_id).await?,
            ))
        }
        CommandRequest::AddLatestVideo(draft) => add_latest_video(draft, store).await,
        CommandRequest::MostWatchedShowsByApp => Ok(CommandOutcome::MostWatchedShows(
            store.most_watched_shows().await?,
        )),
        CommandRequest::FindFreeVideosByPlatform { platform_id } => Ok(
            CommandOutcome::FreeVideos(store.free_videos_on_platform(platform_id).await?),
        ),
        CommandRequest::FindLongVideosNoShow => Ok(CommandOutcome::LongVideos(
            store
                .long_videos_without_show(LONG_VIDEO_RELEASE_YEAR, LONG_VIDEO_MIN_DURATION)
                .await?,
        )),
        CommandRequest::AppRevenueByCountry { country } => Ok(CommandOutcome::AppRevenue(
            store.app_revenue_by_country(&country).await?,
        )),
        CommandRequest::TopThreeWatchedTags => {
            Ok(CommandOutcome::TopTags(store.top_watched_tags().await?))
        }
        CommandRequest::HighestCustomer { country } => Ok(CommandOutcome::HighestCustomer(
            store.highest_customer(&country).await?,
        )),
        CommandRequest::LowestApp { country } => {
            Ok(CommandOutcome::LowestApp(store.lowest_app(&country).await?))
        }
        CommandRequest::MostProfitableVideos { country } => Ok(CommandOutcome::ProfitableVideos(
            store.most_profitable_app_videos(&country).await?,
        )),
        CommandRequest::MostWatchedEpisodes { show_id } => Ok(CommandOutcome::WatchedEpisodes(
            store.most_watched_episodes(show_id).await?,
        )),
        CommandRequest::MobileAppsRevenueRanked { country } => Ok(CommandOutcome::MobileRevenue(
            store.mobile_app_revenue(&country).await?,
        )),
    }
}

async fn register_user(
    registration: Registration,
    store: &dyn VideoStore,
    hashing: &HashingConfig,
) -> Result<CommandOutcome> {
    let password_hash = hash_password(&registration.password, hashing)?;
    debug!("Password hashed with work factor {}", hashing.work_factor);

    let user = NewUser {
        first_name: registration.first_name,
        last_name: registration.last_name,
        country: registration.country,
        email: registration.email,
        password_hash,
    };
    store.insert_user(&user).await?;
    info!("Registered new user");

    Ok(CommandOutcome::Registered(
        store.find_user_by_email(&user.email).await?,
    ))
}

async fn subscribe_user(
    user_id: i64,
    app_id: i64,
    months: u32,
    store: &dyn VideoStore,
    today: NaiveDate,
) -> Result<CommandOutcome> {
    let monthly_cost = store
        .app_monthly_cost(app_id)
        .await?
        .ok_or_else(|| YatvError::not_found("app", app_id))?;

    let exp_date = expiration_date(today, months).ok_or_else(|| {
        YatvError::invalid_input("months", months.to_string(), "expiration date out of range")
    })?;

    let subscription = NewSubscription {
        user_id,
        app_id,
        cost: subscription_cost(monthly_cost, months),
        exp_date,
    };
    debug!(
        "Subscription cost {:.2} expiring {}",
        subscription.cost, subscription.exp_date
    );
    store.insert_subscription(&subscription).await?;

    Ok(CommandOutcome::Subscribed(
        store.subscriptions_for_user(user_id).await?,
    ))
}

async fn add_latest_video(draft: VideoDraft, store: &dyn VideoStore) -> Result<CommandOutcome> {
    let show_id = draft.show_id;
    let app_id = store
        .show_app_id(show_id)
        .await?
        .ok_or_else(|| YatvError::not_found("episode for show", show_id))?;

    let video = NewVideo {
        title: draft.title,
        description: draft.description,
        duration: draft.duration,
        app_id,
        subscription_required: draft.subscription_required,
        release_date: draft.release_date,
        show_id,
    };
    store.insert_video(&video).await?;

    let video_id = store
        .latest_video_id_by_title(&video.title)
        .await?
        .ok_or_else(|| YatvError::not_found("video titled", &video.title))?;

    let slot = SeasonSlot::next_after(store.current_season(show_id).await?);
    info!(
        "Adding video {} as season {} episode {} of show {}",
        video_id, slot.season, slot.episode, show_id
    );
    store
        .insert_season_entry(&NewSeasonEntry {
            show_id,
            video_id,
            slot,
        })
        .await?;

    Ok(CommandOutcome::VideoAdded(
        store.show_episodes(show_id).await?,
    ))
}
