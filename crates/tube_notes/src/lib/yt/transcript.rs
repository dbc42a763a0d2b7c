use reqwest::{Client, Response, StatusCode};
use serde_json::Value;

use crate::{
    error::FetchError,
    parser::{parse_caption_tracks, parse_json3_transcript, select_track, YtHtmlDocument},
    types::{CaptionTrack, TranscriptSegment, VideoReference},
    yt::TranscriptSource,
};

/// Reads captions the way the YouTube web and mobile players do: watch page
/// for the innertube key, innertube `player` for the caption tracks, then the
/// timed-text document of the selected track.
pub struct YtTranscriptClient {
    client: Client,
    base_url: String,
    preferred_languages: Vec<String>,
    fallback_to_any_language: bool,
}

impl YtTranscriptClient {
    const INNERTUBE_CLIENT_NAME: &str = "ANDROID";
    const INNERTUBE_CLIENT_VERSION: &str = "20.10.38";
    const CONSENT_FORM_MARKER: &str = "action=\"https://consent.youtube.com/s\"";

    pub fn new(client: Client) -> Self {
        Self {
            client,
            base_url: "https://www.youtube.com".into(),
            preferred_languages: vec!["en".into()],
            fallback_to_any_language: true,
        }
    }

    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Language codes tried in order before falling back to any track
    pub fn with_languages(mut self, languages: Vec<String>) -> Self {
        self.preferred_languages = languages;
        self
    }

    pub fn with_fallback(mut self, fallback_to_any_language: bool) -> Self {
        self.fallback_to_any_language = fallback_to_any_language;
        self
    }

    #[tracing::instrument(skip(self))]
    async fn fetch_watch_page(&self, video: &VideoReference) -> Result<YtHtmlDocument, FetchError> {
        let resp = self
            .client
            .get(format!("{}/watch", self.base_url))
            .query(&[("v", video.as_str())])
            .header("Accept-Language", "en-US,en;q=0.9")
            .send()
            .await
            .inspect_err(|e| tracing::error!(error = %e, "Failed to make http request"))?;

        let doc = YtHtmlDocument::from(check_status(resp)?.text().await?);

        if doc.is_captcha() {
            return Err(FetchError::UnknownFetchFailure(
                "Request blocked by YouTube (captcha)".into(),
            ));
        }
        if doc.contains(Self::CONSENT_FORM_MARKER) {
            return Err(FetchError::UnknownFetchFailure(
                "YouTube requires cookie consent for this region".into(),
            ));
        }

        Ok(doc)
    }

    #[tracing::instrument(skip(self, api_key))]
    async fn fetch_player(&self, video: &VideoReference, api_key: &str) -> Result<Value, FetchError> {
        let body = serde_json::json!({
            "context": {
                "client": {
                    "clientName": Self::INNERTUBE_CLIENT_NAME,
                    "clientVersion": Self::INNERTUBE_CLIENT_VERSION
                }
            },
            "videoId": video.as_str()
        });

        let resp = self
            .client
            .post(format!("{}/youtubei/v1/player", self.base_url))
            .query(&[("key", api_key)])
            .json(&body)
            .send()
            .await
            .inspect_err(|e| tracing::error!(error = %e, "Failed to make http request"))?;

        Ok(check_status(resp)?.json::<Value>().await?)
    }

    #[tracing::instrument(skip_all, fields(language = %track.language_code, generated = track.is_generated()))]
    async fn fetch_track(&self, track: &CaptionTrack) -> Result<Vec<TranscriptSegment>, FetchError> {
        let url = format!("{}&fmt=json3", track.base_url.replace("&fmt=srv3", ""));

        if url.contains("&exp=xpe") {
            return Err(FetchError::UnknownFetchFailure(
                "Transcript requires a proof-of-origin token".into(),
            ));
        }

        let resp = self
            .client
            .get(url)
            .send()
            .await
            .inspect_err(|e| tracing::error!(error = %e, "Failed to make http request"))?;

        parse_json3_transcript(&check_status(resp)?.text().await?)
    }
}

fn check_status(resp: Response) -> Result<Response, FetchError> {
    match resp.status() {
        status if status.is_success() => Ok(resp),
        StatusCode::TOO_MANY_REQUESTS => Err(FetchError::UnknownFetchFailure(
            "Too many requests, YouTube is rate limiting this address".into(),
        )),
        status => Err(FetchError::UnknownFetchFailure(format!("HTTP {status}"))),
    }
}

impl TranscriptSource for YtTranscriptClient {
    const SERVICE_NAME: &'static str = "youtube";

    async fn fetch_segments(
        &self,
        video: &VideoReference,
    ) -> Result<Vec<TranscriptSegment>, FetchError> {
        let doc = self.fetch_watch_page(video).await?;
        let api_key = doc.innertube_api_key().ok_or_else(|| {
            FetchError::UnknownFetchFailure("Failed to find INNERTUBE_API_KEY in watch page".into())
        })?;

        let player = self.fetch_player(video, api_key).await?;
        let tracks = parse_caption_tracks(video, &player)?;

        let track = select_track(
            &tracks,
            &self.preferred_languages,
            self.fallback_to_any_language,
        )
        .ok_or_else(|| FetchError::NoTranscriptAvailable(video.to_string()))?;

        tracing::info!(
            language = %track.language_code,
            name = track.language_name(),
            "Selected caption track"
        );

        self.fetch_track(track).await
    }
}
