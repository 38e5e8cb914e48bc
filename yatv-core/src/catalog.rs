//! The fifteen numbered commands and their prompt sequences.
//!
//! Selectors 1-10 are the base queries, 11-15 the reports. Anything that
//! does not parse to one of them is a usage error handled by the binary.

/// Kind of value a prompt reads from standard input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    /// Free text, taken verbatim
    Text,
    /// Secret text held in zeroizing memory
    Password,
    /// Signed integer id or duration
    Integer,
    /// Non-negative count
    Count,
    /// Decimal number
    Decimal,
    /// `true` or `false`, case-insensitive
    Boolean,
    /// Calendar date as `YYYY-MM-DD`
    Date,
}

/// Reference list printed right before a prompt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Listing {
    /// Every app
    Apps,
    /// Every show
    Shows,
    /// Every platform
    Platforms,
    /// Countries of registered users
    Countries,
    /// Countries with a subscription to an app on a mobile platform
    MobileCountries,
    /// Platforms of the app chosen by the preceding app id answer
    AppPlatforms,
}

/// One prompt shown while collecting a command's parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PromptSpec {
    /// Field name used in error messages
    pub field: &'static str,
    /// Text printed before reading the value
    pub label: &'static str,
    /// Expected value kind
    pub kind: ValueKind,
    /// Reference list shown before the label, if any
    pub listing: Option<Listing>,
}

impl PromptSpec {
    const fn new(field: &'static str, label: &'static str, kind: ValueKind) -> Self {
        Self {
            field,
            label,
            kind,
            listing: None,
        }
    }

    const fn with_listing(self, listing: Listing) -> Self {
        Self {
            listing: Some(listing),
            ..self
        }
    }
}

/// Prompt labels, shared where several commands ask the same question
pub mod prompts {
    use super::{Listing, PromptSpec, ValueKind};

    pub const FIRST_NAME: PromptSpec =
        PromptSpec::new("first name", "Enter Your First Name: ", ValueKind::Text);
    pub const LAST_NAME: PromptSpec =
        PromptSpec::new("last name", "Enter Your Last Name: ", ValueKind::Text);
    pub const USER_COUNTRY: PromptSpec =
        PromptSpec::new("country", "Enter Your Country: ", ValueKind::Text);
    pub const EMAIL: PromptSpec = PromptSpec::new("email", "Enter Your Email: ", ValueKind::Text);
    pub const PASSWORD: PromptSpec =
        PromptSpec::new("password", "Enter Your Password: ", ValueKind::Password);

    pub const SUBSCRIBER_ID: PromptSpec =
        PromptSpec::new("user id", "Enter Your UserID: ", ValueKind::Integer);
    pub const SUBSCRIBE_APP_ID: PromptSpec = PromptSpec::new(
        "app id",
        "Enter the AppID that you would like to subscribe to: ",
        ValueKind::Integer,
    )
    .with_listing(Listing::Apps);
    pub const MONTHS: PromptSpec = PromptSpec::new(
        "months",
        "How many months would you like to uphold this subscription? ",
        ValueKind::Count,
    );

    pub const LIST_OWNER_ID: PromptSpec =
        PromptSpec::new("user id", "Enter your UserID: ", ValueKind::Integer);
    pub const LIST_SHOW_ID: PromptSpec = PromptSpec::new(
        "show id",
        "Enter the ShowID that you would like to add to your list: ",
        ValueKind::Integer,
    )
    .with_listing(Listing::Shows);

    pub const UPDATE_APP_ID: PromptSpec = PromptSpec::new(
        "app id",
        "Enter the AppID of the App that you are Updating: ",
        ValueKind::Integer,
    )
    .with_listing(Listing::Apps);
    pub const UPDATE_PLATFORM_ID: PromptSpec = PromptSpec::new(
        "platform id",
        "Enter the PlatformID of the Platform on which you want to perform the update: ",
        ValueKind::Integer,
    )
    .with_listing(Listing::AppPlatforms);
    pub const VERSION: PromptSpec = PromptSpec::new(
        "version number",
        "Enter the updated Version Number: ",
        ValueKind::Decimal,
    );

    pub const SHOW_ID: PromptSpec =
        PromptSpec::new("show id", "Enter the ShowID: ", ValueKind::Integer)
            .with_listing(Listing::Shows);
    pub const VIDEO_TITLE: PromptSpec =
        PromptSpec::new("title", "Enter the Title of the Video: ", ValueKind::Text);
    pub const VIDEO_DESCRIPTION: PromptSpec = PromptSpec::new(
        "description",
        "Enter the Description of the Video: ",
        ValueKind::Text,
    );
    pub const VIDEO_DURATION: PromptSpec = PromptSpec::new(
        "duration",
        "Enter the Duration of the Video (in seconds): ",
        ValueKind::Integer,
    );
    pub const SUBSCRIPTION_REQUIRED: PromptSpec = PromptSpec::new(
        "subscription required",
        "Is a Subscription Required for this Video? (True or False): ",
        ValueKind::Boolean,
    );
    pub const RELEASE_DATE: PromptSpec = PromptSpec::new(
        "release date",
        "Enter the Release Date as YYYY-MM-DD: ",
        ValueKind::Date,
    );

    pub const PLATFORM_ID: PromptSpec =
        PromptSpec::new("platform id", "Enter the PlatformID: ", ValueKind::Integer)
            .with_listing(Listing::Platforms);
    pub const COUNTRY: PromptSpec =
        PromptSpec::new("country", "Enter the Country: ", ValueKind::Text)
            .with_listing(Listing::Countries);
    pub const MOBILE_COUNTRY: PromptSpec =
        PromptSpec::new("country", "Enter the Country: ", ValueKind::Text)
            .with_listing(Listing::MobileCountries);
}

/// A numbered YaTV command
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Command {
    /// 1: register a new user
    RegisterUser,
    /// 2: subscribe a user to an app
    SubscribeUser,
    /// 3: add a show to a user's list
    AddToMyList,
    /// 4: update an app's version on a platform
    UpdatePlatformVersion,
    /// 5: add the latest episode of a show
    AddLatestVideo,
    /// 6: top 10 shows by watch count
    MostWatchedShowsByApp,
    /// 7: free videos on a platform
    FindFreeVideosByPlatform,
    /// 8: long 2020 videos outside any show
    FindLongVideosNoShow,
    /// 9: app revenue in a country
    AppRevenueByCountry,
    /// 10: top 3 tags by watch count
    TopThreeWatchedTags,
    /// 11: highest spending customer in a country
    HighestCustomer,
    /// 12: lowest earning app in a country
    LowestApp,
    /// 13: top videos of a country's best earning app
    MostProfitableVideos,
    /// 14: top 3 episodes of a show
    MostWatchedEpisodes,
    /// 15: mobile app revenue in a country
    MobileAppsRevenueRanked,
}

impl Command {
    /// Every command in selector order
    pub const ALL: [Self; 15] = [
        Self::RegisterUser,
        Self::SubscribeUser,
        Self::AddToMyList,
        Self::UpdatePlatformVersion,
        Self::AddLatestVideo,
        Self::MostWatchedShowsByApp,
        Self::FindFreeVideosByPlatform,
        Self::FindLongVideosNoShow,
        Self::AppRevenueByCountry,
        Self::TopThreeWatchedTags,
        Self::HighestCustomer,
        Self::LowestApp,
        Self::MostProfitableVideos,
        Self::MostWatchedEpisodes,
        Self::MobileAppsRevenueRanked,
    ];

    /// Resolves a selector number.
    pub fn from_number(number: i64) -> Option<Self> {
        Self::ALL.into_iter().find(|c| i64::from(c.number()) == number)
    }

    /// Parses a raw command-line selector.
    ///
    /// The text must be a plain integer in 1..=15; surrounding whitespace,
    /// signs outside that range and anything non-numeric yield `None`.
    ///
    /// # Example
    /// ```rust
    /// use yatv_core::catalog::Command;
    ///
    /// assert_eq!(Command::parse_selector("8"), Some(Command::FindLongVideosNoShow));
    /// assert_eq!(Command::parse_selector("16"), None);
    /// assert_eq!(Command::parse_selector("eight"), None);
    /// ```
    pub fn parse_selector(raw: &str) -> Option<Self> {
        raw.parse::<i64>().ok().and_then(Self::from_number)
    }

    /// Selector number (1-15)
    pub const fn number(self) -> u8 {
        match self {
            Self::RegisterUser => 1,
            Self::SubscribeUser => 2,
            Self::AddToMyList => 3,
            Self::UpdatePlatformVersion => 4,
            Self::AddLatestVideo => 5,
            Self::MostWatchedShowsByApp => 6,
            Self::FindFreeVideosByPlatform => 7,
            Self::FindLongVideosNoShow => 8,
            Self::AppRevenueByCountry => 9,
            Self::TopThreeWatchedTags => 10,
            Self::HighestCustomer => 11,
            Self::LowestApp => 12,
            Self::MostProfitableVideos => 13,
            Self::MostWatchedEpisodes => 14,
            Self::MobileAppsRevenueRanked => 15,
        }
    }

    /// Command name as used in logs
    pub const fn name(self) -> &'static str {
        match self {
            Self::RegisterUser => "RegisterUser",
            Self::SubscribeUser => "SubscribeUser",
            Self::AddToMyList => "AddToMyList",
            Self::UpdatePlatformVersion => "UpdatePlatformVersion",
            Self::AddLatestVideo => "AddLatestVideo",
            Self::MostWatchedShowsByApp => "MostWatchedShowsByApp",
            Self::FindFreeVideosByPlatform => "FindFreeVideosByPlatform",
            Self::FindLongVideosNoShow => "FindLongVideosNoShow",
            Self::AppRevenueByCountry => "AppRevenueByCountry",
            Self::TopThreeWatchedTags => "TopThreeWatchedTags",
            Self::HighestCustomer => "HighestCustomer",
            Self::LowestApp => "LowestApp",
            Self::MostProfitableVideos => "MostProfitableVideos",
            Self::MostWatchedEpisodes => "MostWatchedEpisodes",
            Self::MobileAppsRevenueRanked => "MobileAppsRevenueRanked",
        }
    }

    /// One-line description shown in the usage text
    pub const fn description(self) -> &'static str {
        match self {
            Self::RegisterUser => "Register a new user [parameter values]",
            Self::SubscribeUser => "Subscribe a user [parameter value] to an app [parameter value]",
            Self::AddToMyList => "Add a show to a user's [parameter value] \"My List\"",
            Self::UpdatePlatformVersion => {
                "Update an app's [parameter value] version on a platform"
            }
            Self::AddLatestVideo => {
                "Add a new video [parameter value] (with all associated meta data), \
                 which is the latest in a show's current season"
            }
            Self::MostWatchedShowsByApp => {
                "Produce a ranked list of the top-10 most watched shows, \
                 each with the corresponding app"
            }
            Self::FindFreeVideosByPlatform => {
                "Find all free videos on a particular platform [parameter value]"
            }
            Self::FindLongVideosNoShow => {
                "Find all long videos that were released in 2020 and aren't part of any show"
            }
            Self::AppRevenueByCountry => {
                "Produce a ranked list of revenue generated by apps in a country [parameter value]"
            }
            Self::TopThreeWatchedTags => {
                "Produce a ranked list of watch counts from the top-3 video tags"
            }
            Self::HighestCustomer => {
                "REPORT 1- Find the customer with the highest revenue \
                 for a certain country [parameter value]"
            }
            Self::LowestApp => {
                "REPORT 2- Find the app with the LOWEST revenue (by subscription) \
                 for a certain country [parameter value]"
            }
            Self::MostProfitableVideos => {
                "REPORT 3- Find the Top 3 most watched videos for the \
                 most profitable app in a certain country [parameter value]"
            }
            Self::MostWatchedEpisodes => {
                "REPORT 4- Find the most watched episodes of a show [parameter value]"
            }
            Self::MobileAppsRevenueRanked => {
                "REPORT 5- Produce an ordered list of apps revenue (rounded) \
                 by country for mobile users"
            }
        }
    }

    /// Whether the command writes to the store
    pub const fn is_mutating(self) -> bool {
        matches!(
            self,
            Self::RegisterUser
                | Self::SubscribeUser
                | Self::AddToMyList
                | Self::UpdatePlatformVersion
                | Self::AddLatestVideo
        )
    }

    /// Prompts in the order they are asked.
    ///
    /// A prompt's [`Listing`] is printed right before its label.
    pub const fn prompts(self) -> &'static [PromptSpec] {
        use prompts::*;

        match self {
            Self::RegisterUser => &[FIRST_NAME, LAST_NAME, USER_COUNTRY, EMAIL, PASSWORD],
            Self::SubscribeUser => &[SUBSCRIBER_ID, SUBSCRIBE_APP_ID, MONTHS],
            Self::AddToMyList => &[LIST_OWNER_ID, LIST_SHOW_ID],
            Self::UpdatePlatformVersion => &[UPDATE_APP_ID, UPDATE_PLATFORM_ID, VERSION],
            Self::AddLatestVideo => &[
                SHOW_ID,
                VIDEO_TITLE,
                VIDEO_DESCRIPTION,
                VIDEO_DURATION,
                SUBSCRIPTION_REQUIRED,
                RELEASE_DATE,
            ],
            Self::FindFreeVideosByPlatform => &[PLATFORM_ID],
            Self::AppRevenueByCountry
            | Self::HighestCustomer
            | Self::LowestApp
            | Self::MostProfitableVideos => &[COUNTRY],
            Self::MobileAppsRevenueRanked => &[MOBILE_COUNTRY],
            Self::MostWatchedEpisodes => &[SHOW_ID],
            Self::MostWatchedShowsByApp
            | Self::FindLongVideosNoShow
            | Self::TopThreeWatchedTags => &[],
        }
    }
}

impl std::fmt::Display for Command {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Usage text listing every command, printed for a missing or invalid
/// selector.
pub fn usage_text(program: &str) -> String {
    let mut text = format!("Usage: {program} [OPTIONS] <query #> [parameter values]\n\n");
    for command in Command::ALL {
        text.push_str(&format!("{}) {} \n", command.number(), command.description()));
    }
    text
}
