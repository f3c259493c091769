//! YouTube caption provider.
//!
//! Captions are fetched the way the YouTube web player does it: the watch
//! page yields an InnerTube API key, the player endpoint lists caption
//! tracks, and the chosen track's timedtext URL returns the captions as XML.

use super::TranscriptProvider;
use crate::config::YoutubeSettings;
use crate::error::{Result, TranscriptError};
use crate::transcript::{CaptionSegment, CaptionTrackInfo, VideoId};
use async_trait::async_trait;
use regex::Regex;
use reqwest::header::{ACCEPT_LANGUAGE, COOKIE};
use reqwest::StatusCode;
use serde::Deserialize;
use serde_json::json;
use tracing::{debug, info, instrument, warn};

const INNERTUBE_CLIENT_NAME: &str = "ANDROID";
const INNERTUBE_CLIENT_VERSION: &str = "20.10.38";

/// YouTube caption provider over plain HTTPS.
pub struct YoutubeProvider {
    client: reqwest::Client,
    base_url: String,
    api_key_regex: Regex,
    consent_regex: Regex,
    text_regex: Regex,
    start_regex: Regex,
    dur_regex: Regex,
    tag_regex: Regex,
    entity_regex: Regex,
}

// ============================================================================
// Player response
// ============================================================================

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PlayerResponse {
    #[serde(default)]
    playability_status: Option<PlayabilityStatus>,
    #[serde(default)]
    captions: Option<Captions>,
}

#[derive(Debug, Deserialize)]
struct PlayabilityStatus {
    status: String,
    #[serde(default)]
    reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Captions {
    #[serde(rename = "playerCaptionsTracklistRenderer")]
    renderer: Option<TracklistRenderer>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TracklistRenderer {
    #[serde(default)]
    caption_tracks: Vec<RawTrack>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawTrack {
    base_url: String,
    language_code: String,
    #[serde(default)]
    name: Option<TrackName>,
    #[serde(default)]
    kind: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TrackName {
    #[serde(default)]
    simple_text: Option<String>,
    #[serde(default)]
    runs: Vec<TextRun>,
}

#[derive(Debug, Deserialize)]
struct TextRun {
    text: String,
}

/// A caption track together with its download URL.
#[derive(Debug, Clone)]
struct CaptionTrack {
    url: String,
    info: CaptionTrackInfo,
}

impl From<RawTrack> for CaptionTrack {
    fn from(raw: RawTrack) -> Self {
        let name = raw
            .name
            .and_then(|n| {
                n.simple_text
                    .or_else(|| n.runs.into_iter().next().map(|r| r.text))
            })
            .unwrap_or_else(|| raw.language_code.clone());

        Self {
            url: raw.base_url.replace("&fmt=srv3", ""),
            info: CaptionTrackInfo {
                language_code: raw.language_code,
                name,
                is_generated: raw.kind.as_deref() == Some("asr"),
            },
        }
    }
}

#[derive(Debug, Deserialize)]
struct OembedResponse {
    title: String,
}

impl YoutubeProvider {
    /// Create a provider with the configured base URL, user agent and timeout.
    pub fn new(settings: &YoutubeSettings) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(&settings.user_agent)
            .timeout(settings.timeout())
            .build()
            .map_err(|e| TranscriptError::Config(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: settings.base_url.trim_end_matches('/').to_string(),
            api_key_regex: Regex::new(r#""INNERTUBE_API_KEY":\s*"([a-zA-Z0-9_-]+)""#)
                .expect("Invalid regex"),
            consent_regex: Regex::new(r#"name="v" value="([^"]*)""#).expect("Invalid regex"),
            text_regex: Regex::new(r"(?s)<text\b([^>]*)>(.*?)</text>").expect("Invalid regex"),
            start_regex: Regex::new(r#"\bstart="([^"]*)""#).expect("Invalid regex"),
            dur_regex: Regex::new(r#"\bdur="([^"]*)""#).expect("Invalid regex"),
            tag_regex: Regex::new(r"<[^>]*>").expect("Invalid regex"),
            entity_regex: Regex::new(r"&(#[xX][0-9a-fA-F]+|#[0-9]+|[a-zA-Z]+);")
                .expect("Invalid regex"),
        })
    }

    fn watch_url(&self, video_id: &VideoId) -> String {
        format!("{}/watch?v={}", self.base_url, video_id)
    }

    /// GET a URL as text, mapping HTTP failures onto the error taxonomy.
    async fn get_text(&self, url: &str, cookie: Option<&str>) -> Result<String> {
        let mut request = self.client.get(url).header(ACCEPT_LANGUAGE, "en-US");
        if let Some(cookie) = cookie {
            request = request.header(COOKIE, cookie);
        }

        let response = request.send().await.map_err(map_http_error)?;
        check_status(response.status(), url)?;
        response.text().await.map_err(map_http_error)
    }

    /// Fetch the watch page, accepting the EU consent interstitial if shown.
    async fn fetch_watch_page(&self, video_id: &VideoId) -> Result<String> {
        let url = self.watch_url(video_id);
        let html = self.get_text(&url, None).await?;

        if !html.contains("action=\"https://consent.youtube.com/s\"") {
            return Ok(html);
        }

        debug!("Consent page shown, retrying with consent cookie");
        let value = self
            .consent_regex
            .captures(&html)
            .and_then(|c| c.get(1))
            .map(|m| m.as_str().to_string())
            .ok_or_else(|| {
                TranscriptError::ProviderUnavailable("failed to accept YouTube consent".to_string())
            })?;

        let html = self
            .get_text(&url, Some(&format!("CONSENT=YES+{}", value)))
            .await?;
        if html.contains("action=\"https://consent.youtube.com/s\"") {
            return Err(TranscriptError::ProviderUnavailable(
                "failed to accept YouTube consent".to_string(),
            ));
        }
        Ok(html)
    }

    fn extract_api_key(&self, html: &str) -> Result<String> {
        if let Some(key) = self.api_key_regex.captures(html).and_then(|c| c.get(1)) {
            return Ok(key.as_str().to_string());
        }
        if html.contains("class=\"g-recaptcha\"") {
            return Err(TranscriptError::ProviderUnavailable(
                "YouTube is blocking requests from this IP (captcha required)".to_string(),
            ));
        }
        Err(TranscriptError::Unknown(
            "could not find the InnerTube API key on the watch page".to_string(),
        ))
    }

    /// Query the InnerTube player endpoint and return the caption tracks.
    #[instrument(skip(self), fields(video_id = %video_id))]
    async fn fetch_tracks(&self, video_id: &VideoId) -> Result<Vec<CaptionTrack>> {
        let html = self.fetch_watch_page(video_id).await?;
        let api_key = self.extract_api_key(&html)?;

        let url = format!("{}/youtubei/v1/player?key={}", self.base_url, api_key);
        let body = json!({
            "context": {
                "client": {
                    "clientName": INNERTUBE_CLIENT_NAME,
                    "clientVersion": INNERTUBE_CLIENT_VERSION,
                }
            },
            "videoId": video_id.as_str(),
        });

        let response = self
            .client
            .post(&url)
            .json(&body)
            .send()
            .await
            .map_err(map_http_error)?;
        check_status(response.status(), "player endpoint")?;

        let text = response.text().await.map_err(map_http_error)?;
        let player: PlayerResponse = serde_json::from_str(&text).map_err(|e| {
            TranscriptError::Unknown(format!("unexpected player response: {}", e))
        })?;

        let tracks = caption_tracks(video_id, player)?;
        debug!("Found {} caption tracks", tracks.len());
        Ok(tracks)
    }

    /// Parse timedtext XML into caption segments.
    fn parse_caption_xml(&self, xml: &str) -> Vec<CaptionSegment> {
        self.text_regex
            .captures_iter(xml)
            .filter_map(|caps| {
                let attrs = caps.get(1)?.as_str();
                let start = self.attr_f64(&self.start_regex, attrs)?;
                let duration = self.attr_f64(&self.dur_regex, attrs).unwrap_or(0.0);

                // The XML layer escapes once; caption text is HTML-escaped again inside it.
                let body = self.decode_entities(caps.get(2)?.as_str());
                let body = self.tag_regex.replace_all(&body, "");
                let text = self.decode_entities(&body);

                if text.trim().is_empty() {
                    return None;
                }
                Some(CaptionSegment::new(start, duration, text))
            })
            .collect()
    }

    fn attr_f64(&self, regex: &Regex, attrs: &str) -> Option<f64> {
        regex
            .captures(attrs)?
            .get(1)?
            .as_str()
            .parse::<f64>()
            .ok()
            .filter(|v| v.is_finite())
    }

    fn decode_entities(&self, text: &str) -> String {
        self.entity_regex
            .replace_all(text, |caps: &regex::Captures| {
                let entity = &caps[1];
                decode_entity(entity).unwrap_or_else(|| caps[0].to_string())
            })
            .into_owned()
    }
}

#[async_trait]
impl TranscriptProvider for YoutubeProvider {
    #[instrument(skip(self, languages), fields(video_id = %video_id))]
    async fn fetch_segments(
        &self,
        video_id: &VideoId,
        languages: &[String],
    ) -> Result<Vec<CaptionSegment>> {
        let tracks = self.fetch_tracks(video_id).await?;
        let track = select_track(video_id, &tracks, languages)?;

        info!(
            "Fetching {} captions ({})",
            track.info.language_code,
            if track.info.is_generated { "auto-generated" } else { "manual" }
        );

        let xml = self.get_text(&track.url, None).await?;
        if xml.trim().is_empty() {
            return Err(TranscriptError::ProviderUnavailable(
                "YouTube returned an empty caption document".to_string(),
            ));
        }

        let segments = self.parse_caption_xml(&xml);
        debug!("Parsed {} caption segments", segments.len());
        Ok(segments)
    }

    async fn list_tracks(&self, video_id: &VideoId) -> Result<Vec<CaptionTrackInfo>> {
        let tracks = self.fetch_tracks(video_id).await?;
        Ok(tracks.into_iter().map(|t| t.info).collect())
    }

    async fn fetch_title(&self, video_id: &VideoId) -> Option<String> {
        let url = format!("{}/oembed", self.base_url);
        let watch = self.watch_url(video_id);

        let response = self
            .client
            .get(&url)
            .query(&[("format", "json"), ("url", watch.as_str())])
            .send()
            .await;

        match response {
            Ok(r) if r.status().is_success() => match r.json::<OembedResponse>().await {
                Ok(body) => Some(body.title),
                Err(e) => {
                    debug!("Unreadable oEmbed response: {}", e);
                    None
                }
            },
            Ok(r) => {
                debug!("oEmbed lookup returned {}", r.status());
                None
            }
            Err(e) => {
                debug!("oEmbed lookup failed: {}", e);
                None
            }
        }
    }
}

/// Classify the player response and extract its caption tracks.
fn caption_tracks(video_id: &VideoId, player: PlayerResponse) -> Result<Vec<CaptionTrack>> {
    if let Some(status) = player.playability_status {
        let reason = status.reason.unwrap_or_default();
        match status.status.as_str() {
            "OK" => {}
            "ERROR" => {
                return Err(TranscriptError::VideoNotFound(format!(
                    "{}: {}",
                    video_id,
                    if reason.is_empty() { "video unavailable" } else { &reason }
                )));
            }
            "LOGIN_REQUIRED" if reason.to_lowercase().contains("bot") => {
                return Err(TranscriptError::ProviderUnavailable(format!(
                    "YouTube requires sign-in to confirm this is not a bot: {}",
                    reason
                )));
            }
            other => {
                warn!("Video {} is not playable: {} {}", video_id, other, reason);
                return Err(TranscriptError::Unknown(format!(
                    "video {} is not playable ({}): {}",
                    video_id, other, reason
                )));
            }
        }
    }

    let tracks: Vec<CaptionTrack> = player
        .captions
        .and_then(|c| c.renderer)
        .map(|r| r.caption_tracks)
        .unwrap_or_default()
        .into_iter()
        .map(CaptionTrack::from)
        .collect();

    if tracks.is_empty() {
        return Err(TranscriptError::TranscriptsDisabled(format!(
            "subtitles are disabled for video {}",
            video_id
        )));
    }
    Ok(tracks)
}

/// Pick the first preferred language, manual tracks before generated ones.
fn select_track<'a>(
    video_id: &VideoId,
    tracks: &'a [CaptionTrack],
    languages: &[String],
) -> Result<&'a CaptionTrack> {
    if languages.is_empty() {
        return tracks.first().ok_or_else(|| {
            TranscriptError::TranscriptsDisabled(format!("no caption tracks for {}", video_id))
        });
    }

    for language in languages {
        let candidates = tracks
            .iter()
            .filter(|t| t.info.language_code.eq_ignore_ascii_case(language));
        let mut generated = None;
        for track in candidates {
            if !track.info.is_generated {
                return Ok(track);
            }
            generated.get_or_insert(track);
        }
        if let Some(track) = generated {
            return Ok(track);
        }
    }

    let available: Vec<&str> = tracks
        .iter()
        .map(|t| t.info.language_code.as_str())
        .collect();
    Err(TranscriptError::TranscriptsDisabled(format!(
        "no transcript for video {} in [{}]; available: [{}]",
        video_id,
        languages.join(", "),
        available.join(", ")
    )))
}

fn check_status(status: StatusCode, what: &str) -> Result<()> {
    if status.is_success() {
        return Ok(());
    }
    if status == StatusCode::TOO_MANY_REQUESTS {
        return Err(TranscriptError::ProviderUnavailable(format!(
            "rate limited by YouTube ({})",
            what
        )));
    }
    if status.is_server_error() {
        return Err(TranscriptError::ProviderUnavailable(format!(
            "YouTube returned {} for {}",
            status, what
        )));
    }
    Err(TranscriptError::Unknown(format!(
        "YouTube returned {} for {}",
        status, what
    )))
}

fn map_http_error(e: reqwest::Error) -> TranscriptError {
    if e.is_timeout() {
        TranscriptError::ProviderUnavailable(format!("request to YouTube timed out: {}", e))
    } else if e.is_decode() || e.is_body() {
        TranscriptError::Unknown(format!("unreadable response from YouTube: {}", e))
    } else {
        TranscriptError::ProviderUnavailable(format!("request to YouTube failed: {}", e))
    }
}

fn decode_entity(entity: &str) -> Option<String> {
    if let Some(hex) = entity.strip_prefix("#x").or_else(|| entity.strip_prefix("#X")) {
        return u32::from_str_radix(hex, 16)
            .ok()
            .and_then(char::from_u32)
            .map(String::from);
    }
    if let Some(dec) = entity.strip_prefix('#') {
        return dec.parse::<u32>().ok().and_then(char::from_u32).map(String::from);
    }
    let decoded = match entity {
        "amp" => "&",
        "lt" => "<",
        "gt" => ">",
        "quot" => "\"",
        "apos" => "'",
        "nbsp" => "\u{a0}",
        _ => return None,
    };
    Some(decoded.to_string())
}
