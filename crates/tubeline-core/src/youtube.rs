use std::sync::LazyLock;

use regex::Regex;
use serde::Deserialize;

use crate::{
    captions::{CaptionError, CaptionSource},
    types::{Segment, Transcript},
};

const WATCH_URL: &str = "https://www.youtube.com/watch";
const PLAYER_API_URL: &str = "https://www.youtube.com/youtubei/v1/player";
const CLIENT_NAME: &str = "ANDROID";
const CLIENT_VERSION: &str = "20.10.38";
const USER_AGENT: &str = "Mozilla/5.0 (X11; Linux x86_64; rv:128.0) Gecko/20100101 Firefox/128.0";

static API_KEY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#""INNERTUBE_API_KEY":\s*"([a-zA-Z0-9_-]+)""#).unwrap());
static TEXT_ELEMENT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)<text([^>/]*)>(.*?)</text>").unwrap());
static ATTRIBUTE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"(\w+)="([^"]*)""#).unwrap());
static ENTITY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"&(#[0-9]+|#[xX][0-9a-fA-F]+|[a-zA-Z]+);").unwrap());
static TAG: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<[^>]*>").unwrap());

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PlayerResponse {
    playability_status: Option<PlayabilityStatus>,
    captions: Option<Captions>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PlayabilityStatus {
    status: String,
    reason: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Captions {
    player_captions_tracklist_renderer: Option<TracklistRenderer>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TracklistRenderer {
    #[serde(default)]
    caption_tracks: Vec<CaptionTrack>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CaptionTrack {
    base_url: String,
    language_code: String,
    kind: Option<String>,
}

impl CaptionTrack {
    fn is_generated(&self) -> bool {
        self.kind.as_deref() == Some("asr")
    }
}

/// Caption source backed by YouTube's innertube player API.
pub struct YoutubeCaptions {
    client: reqwest::Client,
}

impl YoutubeCaptions {
    pub fn new() -> Result<Self, CaptionError> {
        let client = reqwest::Client::builder().user_agent(USER_AGENT).build()?;
        Ok(Self { client })
    }

    async fn fetch_api_key(&self, video_id: &str) -> Result<String, CaptionError> {
        let html = self
            .client
            .get(WATCH_URL)
            .query(&[("v", video_id)])
            .header("Accept-Language", "en-US")
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;

        API_KEY
            .captures(&html)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str().to_string())
            .ok_or_else(|| CaptionError::MalformedResponse {
                reason: format!("no innertube API key on watch page for {video_id}"),
            })
    }

    async fn fetch_tracks(&self, video_id: &str) -> Result<Vec<CaptionTrack>, CaptionError> {
        let api_key = self.fetch_api_key(video_id).await?;
        tracing::debug!(video_id, "fetching player response");

        let response = self
            .client
            .post(PLAYER_API_URL)
            .query(&[("key", api_key.as_str())])
            .json(&serde_json::json!({
                "context": {
                    "client": {
                        "clientName": CLIENT_NAME,
                        "clientVersion": CLIENT_VERSION,
                    },
                },
                "videoId": video_id,
            }))
            .send()
            .await?
            .error_for_status()?
            .json::<PlayerResponse>()
            .await?;

        if let Some(status) = &response.playability_status
            && status.status != "OK"
        {
            return Err(CaptionError::VideoUnavailable {
                video_id: video_id.to_string(),
                reason: status
                    .reason
                    .clone()
                    .unwrap_or_else(|| status.status.clone()),
            });
        }

        let tracks = response
            .captions
            .and_then(|c| c.player_captions_tracklist_renderer)
            .map(|r| r.caption_tracks)
            .unwrap_or_default();

        if tracks.is_empty() {
            return Err(CaptionError::NoCaptionsAvailable {
                video_id: video_id.to_string(),
            });
        }

        Ok(tracks)
    }
}

impl CaptionSource for YoutubeCaptions {
    async fn fetch(
        &self,
        video_id: &str,
        language: Option<&str>,
    ) -> Result<Transcript, CaptionError> {
        let tracks = self.fetch_tracks(video_id).await?;

        let track = select_track(&tracks, language).ok_or_else(|| match language {
            Some(language) => CaptionError::PreferredLanguageUnavailable {
                video_id: video_id.to_string(),
                language: language.to_string(),
            },
            None => CaptionError::NoCaptionsAvailable {
                video_id: video_id.to_string(),
            },
        })?;

        tracing::debug!(
            video_id,
            language = %track.language_code,
            generated = track.is_generated(),
            "downloading caption track"
        );

        let xml = self
            .client
            .get(strip_format_param(&track.base_url))
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;

        Ok(Transcript {
            video_id: video_id.to_string(),
            language_code: track.language_code.clone(),
            is_generated: track.is_generated(),
            segments: parse_timedtext(&xml),
        })
    }
}

/// Pick a track: manual before auto-generated, optionally restricted to a language.
fn select_track<'a>(
    tracks: &'a [CaptionTrack],
    language: Option<&str>,
) -> Option<&'a CaptionTrack> {
    let matches = |t: &&CaptionTrack| language.is_none_or(|lang| t.language_code == lang);

    tracks
        .iter()
        .filter(matches)
        .find(|t| !t.is_generated())
        .or_else(|| tracks.iter().find(matches))
}

fn strip_format_param(url: &str) -> String {
    match url.find("&fmt=") {
        Some(start) => {
            let rest = &url[start + 1..];
            match rest.find('&') {
                Some(end) => format!("{}{}", &url[..start], &rest[end..]),
                None => url[..start].to_string(),
            }
        }
        None => url.to_string(),
    }
}

fn decode_entities(text: &str) -> String {
    ENTITY
        .replace_all(text, |caps: &regex::Captures| {
            let entity = &caps[1];
            let decoded = if let Some(hex) = entity
                .strip_prefix("#x")
                .or_else(|| entity.strip_prefix("#X"))
            {
                u32::from_str_radix(hex, 16).ok().and_then(char::from_u32)
            } else if let Some(dec) = entity.strip_prefix('#') {
                dec.parse::<u32>().ok().and_then(char::from_u32)
            } else {
                match entity {
                    "amp" => Some('&'),
                    "lt" => Some('<'),
                    "gt" => Some('>'),
                    "quot" => Some('"'),
                    "apos" => Some('\''),
                    "nbsp" => Some(' '),
                    _ => None,
                }
            };
            decoded
                .map(String::from)
                .unwrap_or_else(|| caps[0].to_string())
        })
        .into_owned()
}

/// Parse a timedtext XML document into segments.
///
/// Element text is XML-escaped and may carry HTML escapes and inline markup on
/// top, so it is decoded twice and stripped of tags.
fn parse_timedtext(xml: &str) -> Vec<Segment> {
    TEXT_ELEMENT
        .captures_iter(xml)
        .filter_map(|caps| {
            let mut start = 0.0;
            let mut duration = 0.0;
            for attr in ATTRIBUTE.captures_iter(&caps[1]) {
                match &attr[1] {
                    "start" => start = attr[2].parse().unwrap_or(0.0),
                    "dur" => duration = attr[2].parse().unwrap_or(0.0),
                    _ => {}
                }
            }

            let text = decode_entities(&decode_entities(&caps[2]));
            let text = TAG.replace_all(&text, "").trim().to_string();
            (!text.is_empty()).then_some(Segment {
                start,
                duration,
                text,
            })
        })
        .collect()
}
