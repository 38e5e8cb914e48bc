//! Interactive parameter collection.
//!
//! Each command asks the prompts listed by [`Command::prompts`] in order.
//! Reference lists are read from the store and printed right before the
//! prompt that needs them, every time; nothing is cached between commands.

use crate::{
    Result,
    catalog::{Command, Listing},
    console::{Answer, Console},
    error::YatvError,
    render,
    store::VideoStore,
};
use chrono::NaiveDate;
use std::collections::VecDeque;
use std::io::{BufRead, Write};
use zeroize::Zeroizing;

/// Answers for RegisterUser
#[derive(Clone)]
pub struct Registration {
    pub first_name: String,
    pub last_name: String,
    pub country: String,
    pub email: String,
    /// Plain-text password, wiped on drop
    pub password: Zeroizing<String>,
}

impl std::fmt::Debug for Registration {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Registration")
            .field("first_name", &self.first_name)
            .field("last_name", &self.last_name)
            .field("country", &self.country)
            .field("email", &self.email)
            .finish_non_exhaustive()
    }
}

/// Answers for AddLatestVideo
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VideoDraft {
    pub show_id: i64,
    pub title: String,
    pub description: String,
    /// Length in seconds
    pub duration: i64,
    pub subscription_required: bool,
    pub release_date: NaiveDate,
}

/// Collected parameters, one variant per command
#[derive(Debug, Clone)]
pub enum CommandRequest {
    RegisterUser(Registration),
    SubscribeUser {
        user_id: i64,
        app_id: i64,
        months: u32,
    },
    AddToMyList {
        user_id: i64,
        show_id: i64,
    },
    UpdatePlatformVersion {
        app_id: i64,
        platform_id: i64,
        version: f32,
    },
    AddLatestVideo(VideoDraft),
    MostWatchedShowsByApp,
    FindFreeVideosByPlatform {
        platform_id: i64,
    },
    FindLongVideosNoShow,
    AppRevenueByCountry {
        country: String,
    },
    TopThreeWatchedTags,
    HighestCustomer {
        country: String,
    },
    LowestApp {
        country: String,
    },
    MostProfitableVideos {
        country: String,
    },
    MostWatchedEpisodes {
        show_id: i64,
    },
    MobileAppsRevenueRanked {
        country: String,
    },
}

impl CommandRequest {
    /// Command this request was collected for
    pub const fn command(&self) -> Command {
        match self {
            Self::RegisterUser(_) => Command::RegisterUser,
            Self::SubscribeUser { .. } => Command::SubscribeUser,
            Self::AddToMyList { .. } => Command::AddToMyList,
            Self::UpdatePlatformVersion { .. } => Command::UpdatePlatformVersion,
            Self::AddLatestVideo(_) => Command::AddLatestVideo,
            Self::MostWatchedShowsByApp => Command::MostWatchedShowsByApp,
            Self::FindFreeVideosByPlatform { .. } => Command::FindFreeVideosByPlatform,
            Self::FindLongVideosNoShow => Command::FindLongVideosNoShow,
            Self::AppRevenueByCountry { .. } => Command::AppRevenueByCountry,
            Self::TopThreeWatchedTags => Command::TopThreeWatchedTags,
            Self::HighestCustomer { .. } => Command::HighestCustomer,
            Self::LowestApp { .. } => Command::LowestApp,
            Self::MostProfitableVideos { .. } => Command::MostProfitableVideos,
            Self::MostWatchedEpisodes { .. } => Command::MostWatchedEpisodes,
            Self::MobileAppsRevenueRanked { .. } => Command::MobileAppsRevenueRanked,
        }
    }
}

/// Prompts for a command's parameters.
///
/// Walks [`Command::prompts`] in order, printing each prompt's reference
/// list before its label.
///
/// # Errors
/// Returns error if a reference list cannot be read, input ends early, or
/// an answer does not parse
pub async fn collect_parameters<R: BufRead, W: Write>(
    command: Command,
    store: &dyn VideoStore,
    console: &mut Console<R, W>,
) -> Result<CommandRequest> {
    let mut answers = Vec::with_capacity(command.prompts().len());
    for prompt in command.prompts() {
        if let Some(listing) = prompt.listing {
            let text = reference_list(listing, store, &answers).await?;
            console.print(&text)?;
        }
        answers.push(console.ask(prompt)?);
    }

    let request = build_request(command, answers)?;
    tracing::debug!("Collected parameters for {}", command);
    Ok(request)
}

/// Reads and formats one reference list.
///
/// The app platform list needs the app id answered just before it.
async fn reference_list(
    listing: Listing,
    store: &dyn VideoStore,
    answers: &[Answer],
) -> Result<String> {
    Ok(match listing {
        Listing::Apps => render::app_list(&store.list_apps().await?),
        Listing::Shows => render::show_list(&store.list_shows().await?),
        Listing::Platforms => render::platform_list(&store.list_platforms().await?),
        Listing::Countries => {
            render::country_list(render::headers::COUNTRIES, &store.list_countries().await?)
        }
        Listing::MobileCountries => render::country_list(
            render::headers::MOBILE_COUNTRIES,
            &store.list_mobile_countries().await?,
        ),
        Listing::AppPlatforms => {
            let app_id = answers
                .iter()
                .rev()
                .find_map(Answer::as_integer)
                .ok_or_else(|| YatvError::configuration("app platform list needs an app id"))?;
            render::app_platform_list(&store.list_app_platforms(app_id).await?)
        }
    })
}

/// Answers in the order they were given, consumed front to back.
struct Answers {
    command: Command,
    queue: VecDeque<Answer>,
}

impl Answers {
    fn next<T>(&mut self, extract: impl FnOnce(Answer) -> Option<T>) -> Result<T> {
        self.queue.pop_front().and_then(extract).ok_or_else(|| {
            YatvError::configuration(format!(
                "answers do not match the prompts of {}",
                self.command
            ))
        })
    }

    fn text(&mut self) -> Result<String> {
        self.next(Answer::into_text)
    }

    fn integer(&mut self) -> Result<i64> {
        self.next(|a| a.as_integer())
    }
}

/// Maps answers, in prompt order, onto the command's request.
fn build_request(command: Command, answers: Vec<Answer>) -> Result<CommandRequest> {
    let mut answers = Answers {
        command,
        queue: answers.into(),
    };

    Ok(match command {
        Command::RegisterUser => CommandRequest::RegisterUser(Registration {
            first_name: answers.text()?,
            last_name: answers.text()?,
            country: answers.text()?,
            email: answers.text()?,
            password: answers.next(Answer::into_secret)?,
        }),
        Command::SubscribeUser => CommandRequest::SubscribeUser {
            user_id: answers.integer()?,
            app_id: answers.integer()?,
            months: answers.next(|a| a.as_count())?,
        },
        Command::AddToMyList => CommandRequest::AddToMyList {
            user_id: answers.integer()?,
            show_id: answers.integer()?,
        },
        Command::UpdatePlatformVersion => CommandRequest::UpdatePlatformVersion {
            app_id: answers.integer()?,
            platform_id: answers.integer()?,
            version: answers.next(|a| a.as_decimal())?,
        },
        Command::AddLatestVideo => CommandRequest::AddLatestVideo(VideoDraft {
            show_id: answers.integer()?,
            title: answers.text()?,
            description: answers.text()?,
            duration: answers.integer()?,
            subscription_required: answers.next(|a| a.as_boolean())?,
            release_date: answers.next(|a| a.as_date())?,
        }),
        Command::MostWatchedShowsByApp => CommandRequest::MostWatchedShowsByApp,
        Command::FindFreeVideosByPlatform => CommandRequest::FindFreeVideosByPlatform {
            platform_id: answers.integer()?,
        },
        Command::FindLongVideosNoShow => CommandRequest::FindLongVideosNoShow,
        Command::AppRevenueByCountry => CommandRequest::AppRevenueByCountry {
            country: answers.text()?,
        },
        Command::TopThreeWatchedTags => CommandRequest::TopThreeWatchedTags,
        Command::HighestCustomer => CommandRequest::HighestCustomer {
            country: answers.text()?,
        },
        Command::LowestApp => CommandRequest::LowestApp {
            country: answers.text()?,
        },
        Command::MostProfitableVideos => CommandRequest::MostProfitableVideos {
            country: answers.text()?,
        },
        Command::MostWatchedEpisodes => CommandRequest::MostWatchedEpisodes {
            show_id: answers.integer()?,
        },
        Command::MobileAppsRevenueRanked => CommandRequest::MobileAppsRevenueRanked {
            country: answers.text()?,
        },
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::catalog::ValueKind;

    fn sample_answer(kind: ValueKind) -> Answer {
        match kind {
            ValueKind::Text => Answer::Text("UK".to_string()),
            ValueKind::Password => Answer::Secret(Zeroizing::new("pw".to_string())),
            ValueKind::Integer => Answer::Integer(1),
            ValueKind::Count => Answer::Count(2),
            ValueKind::Decimal => Answer::Decimal(1.5),
            ValueKind::Boolean => Answer::Boolean(true),
            ValueKind::Date => Answer::Date(NaiveDate::from_ymd_opt(2026, 10, 1).unwrap()),
        }
    }

    #[test]
    fn test_every_command_builds_from_its_prompts() {
        for command in Command::ALL {
            let answers = command
                .prompts()
                .iter()
                .map(|p| sample_answer(p.kind))
                .collect();

            let request = build_request(command, answers).unwrap();
            assert_eq!(request.command(), command);
        }
    }

    #[test]
    fn test_answers_follow_prompt_order() {
        let answers = Command::UpdatePlatformVersion
            .prompts()
            .iter()
            .map(|p| sample_answer(p.kind))
            .collect();

        let request = build_request(Command::UpdatePlatformVersion, answers).unwrap();
        assert!(matches!(
            request,
            CommandRequest::UpdatePlatformVersion {
                app_id: 1,
                platform_id: 1,
                ..
            }
        ));
    }

    #[test]
    fn test_missing_answer_rejected() {
        let answers = vec![Answer::Integer(4)];
        let result = build_request(Command::SubscribeUser, answers);
        assert!(matches!(result, Err(YatvError::Configuration { .. })));
    }

    #[test]
    fn test_wrong_answer_kind_rejected() {
        let answers = vec![Answer::Text("four".to_string()), Answer::Integer(2)];
        let result = build_request(Command::AddToMyList, answers);
        assert!(matches!(result, Err(YatvError::Configuration { .. })));
    }
}
