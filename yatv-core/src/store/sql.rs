//! Shared [`VideoStore`](super::VideoStore) implementation for `sqlx` pools.
//!
//! MySQL and SQLite run the same statements from [`queries`](super::queries);
//! only the pool type differs. `impl_video_store!` generates the full trait
//! implementation for a struct with a `pool` field and a `config` field.
//!
//! # Example
//!
//! ```rust,ignore
//! impl_video_store!(SqliteStore);
//! ```

/// Implements `VideoStore` for a store struct.
///
/// # Parameters
///
/// - `$store`: struct with `pool: sqlx::Pool<DB>` and `config: StoreConfig`
macro_rules! impl_video_store {
    ($store:ident) => {
        const _: () = {
            use $crate::error::YatvError;
            use $crate::models::*;
            use $crate::store::queries;
            use $crate::Result;

            #[async_trait::async_trait]
            impl $crate::store::VideoStore for $store {
                fn kind(&self) -> $crate::config::StoreKind {
                    self.config.kind
                }

                async fn test_connection(&self) -> Result<()> {
                    let value: i64 = sqlx::query_scalar(queries::PING)
                        .fetch_one(&self.pool)
                        .await
                        .map_err(|e| YatvError::connection_failed("connectivity check", e))?;

                    if value != 1 {
                        return Err(YatvError::configuration(
                            "connectivity check returned an unexpected value",
                        ));
                    }
                    Ok(())
                }

                async fn close(&self) {
                    tracing::debug!("Closing store {}", self.config);
                    self.pool.close().await;
                }

                async fn list_apps(&self) -> Result<Vec<AppOption>> {
                    tracing::debug!("Listing apps");
                    sqlx::query_as(queries::LIST_APPS)
                        .fetch_all(&self.pool)
                        .await
                        .map_err(|e| YatvError::query_failed("list apps", e))
                }

                async fn list_platforms(&self) -> Result<Vec<PlatformOption>> {
                    tracing::debug!("Listing platforms");
                    sqlx::query_as(queries::LIST_PLATFORMS)
                        .fetch_all(&self.pool)
                        .await
                        .map_err(|e| YatvError::query_failed("list platforms", e))
                }

                async fn list_shows(&self) -> Result<Vec<ShowOption>> {
                    tracing::debug!("Listing shows");
                    sqlx::query_as(queries::LIST_SHOWS)
                        .fetch_all(&self.pool)
                        .await
                        .map_err(|e| YatvError::query_failed("list shows", e))
                }

                async fn list_countries(&self) -> Result<Vec<String>> {
                    tracing::debug!("Listing countries");
                    sqlx::query_scalar(queries::LIST_COUNTRIES)
                        .fetch_all(&self.pool)
                        .await
                        .map_err(|e| YatvError::query_failed("list countries", e))
                }

                async fn list_mobile_countries(&self) -> Result<Vec<String>> {
                    tracing::debug!("Listing countries with mobile subscriptions");
                    sqlx::query_scalar(queries::LIST_MOBILE_COUNTRIES)
                        .fetch_all(&self.pool)
                        .await
                        .map_err(|e| YatvError::query_failed("list mobile countries", e))
                }

                async fn list_app_platforms(&self, app_id: i64) -> Result<Vec<PlatformOption>> {
                    tracing::debug!("Listing platforms for app {}", app_id);
                    sqlx::query_as(queries::LIST_APP_PLATFORMS)
                        .bind(app_id)
                        .fetch_all(&self.pool)
                        .await
                        .map_err(|e| YatvError::query_failed("list app platforms", e))
                }

                async fn insert_user(&self, user: &NewUser) -> Result<()> {
                    tracing::debug!("Inserting user");
                    sqlx::query(queries::INSERT_USER)
                        .bind(&user.first_name)
                        .bind(&user.last_name)
                        .bind(&user.country)
                        .bind(&user.email)
                        .bind(&user.password_hash)
                        .execute(&self.pool)
                        .await
                        .map_err(|e| YatvError::query_failed("insert user", e))?;
                    Ok(())
                }

                async fn find_user_by_email(&self, email: &str) -> Result<Vec<RegisteredUser>> {
                    sqlx::query_as(queries::SELECT_USER_BY_EMAIL)
                        .bind(email)
                        .fetch_all(&self.pool)
                        .await
                        .map_err(|e| YatvError::query_failed("select user by email", e))
                }

                async fn app_monthly_cost(&self, app_id: i64) -> Result<Option<f64>> {
                    let cost: Option<Option<f64>> =
                        sqlx::query_scalar(queries::SELECT_APP_MONTHLY_COST)
                            .bind(app_id)
                            .fetch_optional(&self.pool)
                            .await
                            .map_err(|e| YatvError::query_failed("select app monthly cost", e))?;
                    Ok(cost.flatten())
                }

                async fn insert_subscription(&self, subscription: &NewSubscription) -> Result<()> {
                    tracing::debug!(
                        "Inserting subscription of user {} to app {}",
                        subscription.user_id,
                        subscription.app_id
                    );
                    sqlx::query(queries::INSERT_SUBSCRIPTION)
                        .bind(subscription.user_id)
                        .bind(subscription.cost)
                        .bind(subscription.exp_date)
                        .bind(subscription.app_id)
                        .execute(&self.pool)
                        .await
                        .map_err(|e| YatvError::query_failed("insert subscription", e))?;
                    Ok(())
                }

                async fn subscriptions_for_user(&self, user_id: i64) -> Result<Vec<SubscriptionRow>> {
                    sqlx::query_as(queries::SELECT_USER_SUBSCRIPTIONS)
                        .bind(user_id)
                        .fetch_all(&self.pool)
                        .await
                        .map_err(|e| YatvError::query_failed("select user subscriptions", e))
                }

                async fn insert_my_list_show(&self, user_id: i64, show_id: i64) -> Result<()> {
                    tracing::debug!("Adding show {} to list of user {}", show_id, user_id);
                    sqlx::query(queries::INSERT_MY_LIST_SHOW)
                        .bind(user_id)
                        .bind(show_id)
                        .execute(&self.pool)
                        .await
                        .map_err(|e| YatvError::query_failed("insert my list show", e))?;
                    Ok(())
                }

                async fn my_list_for_user(&self, user_id: i64) -> Result<Vec<MyListEntry>> {
                    sqlx::query_as(queries::SELECT_MY_LIST)
                        .bind(user_id)
                        .fetch_all(&self.pool)
                        .await
                        .map_err(|e| YatvError::query_failed("select my list", e))
                }

                async fn update_platform_version(
                    &self,
                    app_id: i64,
                    platform_id: i64,
                    version: f32,
                ) -> Result<u64> {
                    tracing::debug!(
                        "Updating version of app {} on platform {}",
                        app_id,
                        platform_id
                    );
                    let result = sqlx::query(queries::UPDATE_APP_PLATFORM_VERSION)
                        .bind(version)
                        .bind(app_id)
                        .bind(platform_id)
                        .execute(&self.pool)
                        .await
                        .map_err(|e| YatvError::query_failed("update platform version", e))?;
                    Ok(result.rows_affected())
                }

                async fn app_platform_version(
                    &self,
                    app_id: i64,
                    platform_id: i64,
                ) -> Result<Vec<AppPlatformVersion>> {
                    sqlx::query_as(queries::SELECT_APP_PLATFORM_VERSION)
                        .bind(app_id)
                        .bind(platform_id)
                        .fetch_all(&self.pool)
                        .await
                        .map_err(|e| YatvError::query_failed("select platform version", e))
                }

                async fn show_app_id(&self, show_id: i64) -> Result<Option<i64>> {
                    let app_id: Option<Option<i64>> = sqlx::query_scalar(queries::SELECT_SHOW_APP)
                        .bind(show_id)
                        .fetch_optional(&self.pool)
                        .await
                        .map_err(|e| YatvError::query_failed("select show app", e))?;
                    Ok(app_id.flatten())
                }

                async fn insert_video(&self, video: &NewVideo) -> Result<()> {
                    tracing::debug!("Inserting video for show {}", video.show_id);
                    sqlx::query(queries::INSERT_VIDEO)
                        .bind(&video.title)
                        .bind(&video.description)
                        .bind(video.duration)
                        .bind(video.app_id)
                        .bind(video.subscription_required)
                        .bind(video.release_date)
                        .bind(video.show_id)
                        .execute(&self.pool)
                        .await
                        .map_err(|e| YatvError::query_failed("insert video", e))?;
                    Ok(())
                }

                async fn latest_video_id_by_title(&self, title: &str) -> Result<Option<i64>> {
                    sqlx::query_scalar(queries::SELECT_VIDEO_ID_BY_TITLE)
                        .bind(title)
                        .fetch_one(&self.pool)
                        .await
                        .map_err(|e| YatvError::query_failed("select video id by title", e))
                }

                async fn current_season(&self, show_id: i64) -> Result<Option<SeasonSlot>> {
                    let (season, episode): (Option<i64>, Option<i64>) =
                        sqlx::query_as(queries::SELECT_CURRENT_SEASON)
                            .bind(show_id)
                            .fetch_one(&self.pool)
                            .await
                            .map_err(|e| YatvError::query_failed("select current season", e))?;
                    Ok(season
                        .zip(episode)
                        .map(|(season, episode)| SeasonSlot { season, episode }))
                }

                async fn insert_season_entry(&self, entry: &NewSeasonEntry) -> Result<()> {
                    tracing::debug!(
                        "Linking video {} as season {} episode {}",
                        entry.video_id,
                        entry.slot.season,
                        entry.slot.episode
                    );
                    sqlx::query(queries::INSERT_SEASON)
                        .bind(entry.show_id)
                        .bind(entry.video_id)
                        .bind(entry.slot.season)
                        .bind(entry.slot.episode)
                        .execute(&self.pool)
                        .await
                        .map_err(|e| YatvError::query_failed("insert season", e))?;
                    Ok(())
                }

                async fn show_episodes(&self, show_id: i64) -> Result<Vec<EpisodeRow>> {
                    sqlx::query_as(queries::SELECT_SHOW_EPISODES)
                        .bind(show_id)
                        .fetch_all(&self.pool)
                        .await
                        .map_err(|e| YatvError::query_failed("select show episodes", e))
                }

                async fn most_watched_shows(&self) -> Result<Vec<ShowWatchCount>> {
                    tracing::debug!("Running most watched shows report");
                    sqlx::query_as(queries::MOST_WATCHED_SHOWS)
                        .fetch_all(&self.pool)
                        .await
                        .map_err(|e| YatvError::query_failed("most watched shows", e))
                }

                async fn free_videos_on_platform(&self, platform_id: i64) -> Result<Vec<FreeVideo>> {
                    tracing::debug!("Running free videos report for platform {}", platform_id);
                    sqlx::query_as(queries::FREE_VIDEOS_ON_PLATFORM)
                        .bind(platform_id)
                        .fetch_all(&self.pool)
                        .await
                        .map_err(|e| YatvError::query_failed("free videos on platform", e))
                }

                async fn long_videos_without_show(
                    &self,
                    release_year: i32,
                    min_duration: i64,
                ) -> Result<Vec<LongVideo>> {
                    tracing::debug!("Running long videos report for {}", release_year);
                    sqlx::query_as(queries::LONG_VIDEOS_WITHOUT_SHOW)
                        .bind($crate::store::release_year_pattern(release_year))
                        .bind(min_duration)
                        .fetch_all(&self.pool)
                        .await
                        .map_err(|e| YatvError::query_failed("long videos without show", e))
                }

                async fn app_revenue_by_country(&self, country: &str) -> Result<Vec<AppRevenue>> {
                    tracing::debug!("Running app revenue report");
                    sqlx::query_as(queries::APP_REVENUE_BY_COUNTRY)
                        .bind(country)
                        .fetch_all(&self.pool)
                        .await
                        .map_err(|e| YatvError::query_failed("app revenue by country", e))
                }

                async fn top_watched_tags(&self) -> Result<Vec<TagViewCount>> {
                    tracing::debug!("Running top watched tags report");
                    sqlx::query_as(queries::TOP_WATCHED_TAGS)
                        .fetch_all(&self.pool)
                        .await
                        .map_err(|e| YatvError::query_failed("top watched tags", e))
                }

                async fn highest_customer(&self, country: &str) -> Result<Option<CustomerRevenue>> {
                    tracing::debug!("Running highest customer report");
                    sqlx::query_as(queries::HIGHEST_CUSTOMER)
                        .bind(country)
                        .fetch_optional(&self.pool)
                        .await
                        .map_err(|e| YatvError::query_failed("highest customer", e))
                }

                async fn lowest_app(&self, country: &str) -> Result<Option<AppRevenueSummary>> {
                    tracing::debug!("Running lowest app report");
                    sqlx::query_as(queries::LOWEST_APP)
                        .bind(country)
                        .fetch_optional(&self.pool)
                        .await
                        .map_err(|e| YatvError::query_failed("lowest app", e))
                }

                async fn most_profitable_app_videos(
                    &self,
                    country: &str,
                ) -> Result<Vec<VideoWatchCount>> {
                    tracing::debug!("Running most profitable app videos report");
                    sqlx::query_as(queries::MOST_PROFITABLE_APP_VIDEOS)
                        .bind(country)
                        .fetch_all(&self.pool)
                        .await
                        .map_err(|e| YatvError::query_failed("most profitable app videos", e))
                }

                async fn most_watched_episodes(&self, show_id: i64) -> Result<Vec<EpisodeWatchCount>> {
                    tracing::debug!("Running most watched episodes report for show {}", show_id);
                    sqlx::query_as(queries::MOST_WATCHED_EPISODES)
                        .bind(show_id)
                        .fetch_all(&self.pool)
                        .await
                        .map_err(|e| YatvError::query_failed("most watched episodes", e))
                }

                async fn mobile_app_revenue(&self, country: &str) -> Result<Vec<MobileAppRevenue>> {
                    tracing::debug!("Running mobile app revenue report");
                    sqlx::query_as(queries::MOBILE_APP_REVENUE)
                        .bind(country)
                        .fetch_all(&self.pool)
                        .await
                        .map_err(|e| YatvError::query_failed("mobile app revenue", e))
                }
            }
        };
    };
}

pub(crate) use impl_video_store;
