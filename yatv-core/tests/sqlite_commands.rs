//! Mutating commands and full command sessions against the seeded SQLite
//! catalog.
//!
//! Writes are checked through the re-selected confirmation rows and by
//! looking at the tables directly.

#![cfg(feature = "sqlite")]
#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

mod common;

use chrono::NaiveDate;
use common::{context, count_rows, seeded_store};
use std::io::Cursor;
use yatv_core::{
    Command, CommandOutcome, CommandRequest, Console, VideoStore, YatvError,
    collect::{Registration, VideoDraft},
    execute::execute,
    run_command,
    security::verify_password,
};
use zeroize::Zeroizing;

fn registration(email: &str) -> CommandRequest {
    CommandRequest::RegisterUser(Registration {
        first_name: "Margaret".to_string(),
        last_name: "Hamilton".to_string(),
        country: "USA".to_string(),
        email: email.to_string(),
        password: Zeroizing::new("apollo11".to_string()),
    })
}

fn draft(show_id: i64) -> VideoDraft {
    VideoDraft {
        show_id,
        title: "Slack Water".to_string(),
        description: "Between tides".to_string(),
        duration: 1320,
        subscription_required: true,
        release_date: NaiveDate::from_ymd_opt(2026, 10, 1).unwrap(),
    }
}

// =============================================================================
// RegisterUser
// =============================================================================

#[tokio::test]
async fn test_register_user_stores_hash_only() {
    let store = seeded_store().await;

    let outcome = execute(registration("mh@example.com"), &store, &context())
        .await
        .unwrap();

    let CommandOutcome::Registered(users) = outcome else {
        panic!("unexpected outcome: {outcome:?}");
    };
    assert_eq!(users.len(), 1);
    assert_eq!(users[0].user_id, 6);
    assert_eq!(users[0].email, "mh@example.com");

    let stored: String = sqlx::query_scalar("SELECT Password FROM User WHERE UserID = 6")
        .fetch_one(&store.pool)
        .await
        .unwrap();
    assert_ne!(stored, "apollo11");
    assert!(verify_password("apollo11", &stored).unwrap());
    assert!(!verify_password("apollo12", &stored).unwrap());
}

#[tokio::test]
async fn test_register_user_duplicate_email_rejected() {
    let store = seeded_store().await;

    let result = execute(registration("ada@example.com"), &store, &context()).await;

    assert!(matches!(result, Err(YatvError::Store { .. })));
    let matches: i64 =
        sqlx::query_scalar("SELECT COUNT(*) FROM User WHERE Email = 'ada@example.com'")
            .fetch_one(&store.pool)
            .await
            .unwrap();
    assert_eq!(matches, 1);
}

// =============================================================================
// SubscribeUser
// =============================================================================

#[tokio::test]
async fn test_subscribe_user_prices_and_dates() {
    let store = seeded_store().await;
    let request = CommandRequest::SubscribeUser {
        user_id: 4,
        app_id: 1,
        months: 3,
    };

    let outcome = execute(request, &store, &context()).await.unwrap();

    let CommandOutcome::Subscribed(rows) = outcome else {
        panic!("unexpected outcome: {outcome:?}");
    };
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].user_id, 4);
    assert_eq!(rows[0].app_name, "StreamMax");
    assert!((rows[0].cost - 29.97).abs() < 1e-6);
    assert_eq!(rows[0].exp_date, NaiveDate::from_ymd_opt(2027, 1, 18).unwrap());
}

#[tokio::test]
async fn test_subscribe_user_unknown_app_inserts_nothing() {
    let store = seeded_store().await;
    let request = CommandRequest::SubscribeUser {
        user_id: 4,
        app_id: 99,
        months: 1,
    };

    let result = execute(request, &store, &context()).await;

    assert!(matches!(result, Err(YatvError::NotFound { .. })));
    assert_eq!(count_rows(&store, "Subscription").await, 7);
}

// =============================================================================
// AddToMyList and UpdatePlatformVersion
// =============================================================================

#[tokio::test]
async fn test_add_to_my_list() {
    let store = seeded_store().await;

    execute(
        CommandRequest::AddToMyList {
            user_id: 4,
            show_id: 2,
        },
        &store,
        &context(),
    )
    .await
    .unwrap();

    let entries = store.my_list_for_user(4).await.unwrap();
    let titles: Vec<_> = entries.iter().map(|e| e.show_title.as_str()).collect();
    assert_eq!(titles, vec!["Space Kids"]);

    // Other users' lists are untouched
    assert_eq!(store.my_list_for_user(1).await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_update_platform_version() {
    let store = seeded_store().await;
    let request = CommandRequest::UpdatePlatformVersion {
        app_id: 1,
        platform_id: 1,
        version: 2.5,
    };

    let outcome = execute(request, &store, &context()).await.unwrap();

    let CommandOutcome::VersionUpdated(rows) = outcome else {
        panic!("unexpected outcome: {outcome:?}");
    };
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].app_name, "StreamMax");
    assert_eq!(rows[0].platform_name, "iOS");
    assert!((rows[0].version_num - 2.5).abs() < 1e-6);

    // The app's other platform keeps its version
    let other = store.app_platform_version(1, 3).await.unwrap();
    assert!((other[0].version_num - 3.0).abs() < 1e-6);
}

#[tokio::test]
async fn test_update_platform_version_missing_pair() {
    let store = seeded_store().await;

    let updated = store.update_platform_version(1, 4, 9.0).await.unwrap();

    assert_eq!(updated, 0);
    assert!(store.app_platform_version(1, 4).await.unwrap().is_empty());
}

// =============================================================================
// AddLatestVideo
// =============================================================================

#[tokio::test]
async fn test_add_latest_video_joins_current_season() {
    let store = seeded_store().await;

    let outcome = execute(CommandRequest::AddLatestVideo(draft(1)), &store, &context())
        .await
        .unwrap();

    let CommandOutcome::VideoAdded(episodes) = outcome else {
        panic!("unexpected outcome: {outcome:?}");
    };
    assert_eq!(episodes.len(), 8);
    let last = episodes.last().unwrap();
    assert_eq!(last.video_title, "Slack Water");
    assert_eq!((last.season_num, last.episode_num), (2, 6));

    let (video_id, app_id): (i64, i64) =
        sqlx::query_as("SELECT VideoID, AppID FROM Video WHERE Title = 'Slack Water'")
            .fetch_one(&store.pool)
            .await
            .unwrap();
    assert_eq!(video_id, 14);
    assert_eq!(app_id, 1);
}

#[tokio::test]
async fn test_add_latest_video_continues_show_wide_episode_numbers() {
    let store = seeded_store().await;

    // Season 1 grows to eight episodes; season 2 stays at five
    sqlx::raw_sql(
        "INSERT INTO Video (VideoID, Title, Description, Duration, AppID, SubNeeded, ReleaseDate, ShowID) VALUES
             (14, 'Swell', 'S1E3', 1300, 1, 1, '2019-05-15', 1),
             (15, 'Surge', 'S1E4', 1300, 1, 1, '2019-05-22', 1),
             (16, 'Spray', 'S1E5', 1300, 1, 1, '2019-05-29', 1),
             (17, 'Squall', 'S1E6', 1300, 1, 1, '2019-06-05', 1),
             (18, 'Shoal', 'S1E7', 1300, 1, 1, '2019-06-12', 1),
             (19, 'Shore', 'S1E8', 1300, 1, 1, '2019-06-19', 1);
         INSERT INTO Seasons (ShowID, VideoID, SeasonNum, EpisodeNum) VALUES
             (1, 14, 1, 3), (1, 15, 1, 4), (1, 16, 1, 5),
             (1, 17, 1, 6), (1, 18, 1, 7), (1, 19, 1, 8);",
    )
    .execute(&store.pool)
    .await
    .unwrap();

    let current = store.current_season(1).await.unwrap().unwrap();
    assert_eq!((current.season, current.episode), (2, 8));

    let outcome = execute(CommandRequest::AddLatestVideo(draft(1)), &store, &context())
        .await
        .unwrap();

    let CommandOutcome::VideoAdded(episodes) = outcome else {
        panic!("unexpected outcome: {outcome:?}");
    };
    let last = episodes.last().unwrap();
    assert_eq!(last.video_title, "Slack Water");
    assert_eq!((last.season_num, last.episode_num), (2, 9));
}

#[tokio::test]
async fn test_current_season_of_show_without_episodes() {
    let store = seeded_store().await;

    assert!(store.current_season(3).await.unwrap().is_none());
}

#[tokio::test]
async fn test_add_latest_video_show_without_episodes() {
    let store = seeded_store().await;

    let result = execute(CommandRequest::AddLatestVideo(draft(3)), &store, &context()).await;

    assert!(matches!(result, Err(YatvError::NotFound { .. })));
    assert_eq!(count_rows(&store, "Video").await, 13);
    assert_eq!(count_rows(&store, "Seasons").await, 9);
}

// =============================================================================
// Full sessions
// =============================================================================

#[tokio::test]
async fn test_session_lowest_app_output() {
    let store = seeded_store().await;
    let mut console = Console::new(Cursor::new("UK\n"), Vec::new());

    run_command(Command::LowestApp, &store, &mut console, &context())
        .await
        .unwrap();

    let output = String::from_utf8(console.into_output()).unwrap();
    assert_eq!(
        output,
        "Available Countries: \n\
         COUNTRY: Finland \n\
         COUNTRY: UK \n\
         COUNTRY: USA \n\
         Enter the Country: \
         App ID: 2 \n\
         App Name: KidsZone \n\
         Revenue: 9.00 \n"
    );
}

#[tokio::test]
async fn test_session_subscribe_prints_apps_after_user_id() {
    let store = seeded_store().await;
    let mut console = Console::new(Cursor::new("4\n2\n2\n"), Vec::new());

    run_command(Command::SubscribeUser, &store, &mut console, &context())
        .await
        .unwrap();

    let output = String::from_utf8(console.into_output()).unwrap();
    let user_prompt = output.find("Enter Your UserID: ").unwrap();
    let app_list = output.find("Available Apps: ").unwrap();
    assert!(user_prompt < app_list);
    assert!(output.contains("ID: 2 Name: KidsZone \n"));
    assert!(output.ends_with(
        "Success! Current Subscriptions: \n\
         User ID: 4, App: KidsZone, Cost: 9.00. ExpDate: 2026-12-18 \n"
    ));
}

#[tokio::test]
async fn test_session_update_lists_platforms_of_chosen_app() {
    let store = seeded_store().await;
    let mut console = Console::new(Cursor::new("1\n3\n3.5\n"), Vec::new());

    run_command(
        Command::UpdatePlatformVersion,
        &store,
        &mut console,
        &context(),
    )
    .await
    .unwrap();

    let output = String::from_utf8(console.into_output()).unwrap();
    assert!(output.starts_with(
        "Available Apps: \n\
         ID: 1 Name: StreamMax \n\
         ID: 2 Name: KidsZone \n\
         ID: 3 Name: DocuWorld \n\
         Enter the AppID of the App that you are Updating: \
         This App is available on Platform(s): \n\
         PlatformID: 1, Platform: iOS \n\
         PlatformID: 3, Platform: SmartTV \n\
         Enter the PlatformID of the Platform on which you want to perform the update: \
         Enter the updated Version Number: "
    ));
    assert!(output.contains("APP: StreamMax, PLATFORM: SmartTV, Version Number: 3.50 "));
}

#[tokio::test]
async fn test_session_invalid_answer_stops_command() {
    let store = seeded_store().await;
    let mut console = Console::new(Cursor::new("many\n"), Vec::new());

    let result = run_command(
        Command::MostWatchedEpisodes,
        &store,
        &mut console,
        &context(),
    )
    .await;

    assert!(matches!(result, Err(YatvError::InvalidInput { .. })));
    let output = String::from_utf8(console.into_output()).unwrap();
    assert!(output.starts_with("Available Shows: \nID: 1 Name: Dark Tides \n"));
}

#[tokio::test]
async fn test_session_report_without_prompts() {
    let store = seeded_store().await;
    let mut console = Console::new(Cursor::new(""), Vec::new());

    run_command(
        Command::TopThreeWatchedTags,
        &store,
        &mut console,
        &context(),
    )
    .await
    .unwrap();

    let output = String::from_utf8(console.into_output()).unwrap();
    assert_eq!(
        output,
        "VIEW COUNT: 8, TAG NAME: Drama \n\
         VIEW COUNT: 7, TAG NAME: Mystery \n\
         VIEW COUNT: 3, TAG NAME: Kids \n"
    );
}
