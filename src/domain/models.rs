use chrono::NaiveDate;
use serde::Deserialize;

pub type ShowId = u64;
pub type EpisodeId = u64;

#[derive(Debug, Deserialize, Clone, Default, PartialEq)]
#[serde(default)]
pub struct Show {
    pub id: ShowId,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub language: Option<String>,
    pub genres: Vec<String>,
    pub status: String,
    pub runtime: Option<u32>,
    pub premiered: Option<String>,
    pub ended: Option<String>,
    #[serde(rename = "officialSite")]
    pub official_site: Option<String>,
    pub schedule: AirSchedule,
    pub rating: Rating,
    pub weight: u32,
    pub network: Option<Channel>,
    #[serde(rename = "webChannel")]
    pub web_channel: Option<Channel>,
    pub image: Option<Image>,
    pub summary: Option<String>,
    pub updated: i64,
}

#[derive(Debug, Deserialize, Clone, Default, PartialEq)]
#[serde(default)]
pub struct AirSchedule {
    pub time: String,
    pub days: Vec<String>,
}

#[derive(Debug, Deserialize, Clone, Copy, Default, PartialEq)]
#[serde(default)]
pub struct Rating {
    pub average: Option<f64>,
}

/// A broadcast network or a streaming web channel.
#[derive(Debug, Deserialize, Clone, Default, PartialEq)]
#[serde(default)]
pub struct Channel {
    pub id: u64,
    pub name: String,
    pub country: Option<Country>,
}

#[derive(Debug, Deserialize, Clone, Default, PartialEq)]
#[serde(default)]
pub struct Country {
    pub name: String,
    pub code: String,
}

#[derive(Debug, Deserialize, Clone, Default, PartialEq)]
#[serde(default)]
pub struct Image {
    pub medium: Option<String>,
    pub original: Option<String>,
}

#[derive(Debug, Deserialize, Clone, Default, PartialEq)]
#[serde(default)]
pub struct Episode {
    pub id: EpisodeId,
    pub url: String,
    pub name: String,
    pub season: u32,
    pub number: Option<u32>,
    #[serde(rename = "type")]
    pub kind: String,
    pub airdate: String,
    pub airtime: String,
    pub airstamp: Option<String>,
    pub runtime: Option<u32>,
    pub rating: Rating,
    pub image: Option<Image>,
    pub summary: Option<String>,
}

impl Episode {
    /// Parsed air date; `None` when the catalog has no date yet.
    pub fn air_date(&self) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(self.airdate.trim(), "%Y-%m-%d").ok()
    }

    /// `S1E4`, or `S1E?` for specials without a number.
    pub fn code(&self) -> String {
        match self.number {
            Some(number) => format!("S{}E{}", self.season, number),
            None => format!("S{}E?", self.season),
        }
    }
}

/// One airing from the daily schedule endpoints.
///
/// The broadcast schedule inlines the owning show as `show`; the web
/// schedule nests it under `_embedded.show`.
#[derive(Debug, Deserialize, Clone, Default, PartialEq)]
#[serde(default)]
pub struct ScheduleEntry {
    #[serde(flatten)]
    pub episode: Episode,
    pub show: Option<Show>,
    #[serde(rename = "_embedded")]
    pub embedded: Option<Embedded>,
}

#[derive(Debug, Deserialize, Clone, Default, PartialEq)]
#[serde(default)]
pub struct Embedded {
    pub show: Option<Show>,
}

impl ScheduleEntry {
    pub fn owning_show(&self) -> Option<&Show> {
        self.show
            .as_ref()
            .or_else(|| self.embedded.as_ref().and_then(|e| e.show.as_ref()))
    }
}

#[derive(Debug, Deserialize, Clone, Default, PartialEq)]
#[serde(default)]
pub struct SearchResult {
    pub score: f64,
    pub show: Show,
}
