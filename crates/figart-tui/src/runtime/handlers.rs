//! Effect handlers for the TUI runtime.
//!
//! Handlers are async functions returning a `UiEvent`; the runtime spawns them and
//! sends the result to the inbox. They never touch state.

use std::sync::Arc;

use figart_core::fonts::FontStore;
use figart_core::generator::{self, RenderOutcome, RenderRequest, RenderSettings};
use tokio_util::sync::CancellationToken;

use crate::events::UiEvent;

/// Renders `request` on the blocking pool, giving up early if `cancel` fires.
pub async fn render_banner(
    store: Arc<FontStore>,
    request: RenderRequest,
    settings: RenderSettings,
    cancel: Option<CancellationToken>,
) -> UiEvent {
    let cancel = cancel.unwrap_or_default();
    if cancel.is_cancelled() {
        return UiEvent::RenderCancelled;
    }

    let job = {
        let request = request.clone();
        tokio::task::spawn_blocking(move || generator::render(&store, &request, &settings))
    };

    tokio::select! {
        () = cancel.cancelled() => UiEvent::RenderCancelled,
        joined = job => {
            let outcome = match joined {
                Ok(result) => RenderOutcome::from(result),
                Err(err) => {
                    tracing::warn!(error = %err, "render task failed");
                    RenderOutcome::Failed
                }
            };
            UiEvent::BannerRendered { request, outcome }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(text: &str, font: &str) -> RenderRequest {
        RenderRequest {
            text: text.to_string(),
            font: font.to_string(),
            width: String::new(),
        }
    }

    #[tokio::test]
    async fn renders_banner_event() {
        let event = render_banner(
            Arc::new(FontStore::new(Vec::new())),
            request("Hi", "term"),
            RenderSettings::default(),
            Some(CancellationToken::new()),
        )
        .await;
        match event {
            UiEvent::BannerRendered { request, outcome } => {
                assert_eq!(request.text, "Hi");
                assert_eq!(outcome, RenderOutcome::Banner("Hi".to_string()));
            }
            other => panic!("unexpected event: {other:?}"),
        }
    }

    #[tokio::test]
    async fn unknown_font_fails() {
        let event = render_banner(
            Arc::new(FontStore::new(Vec::new())),
            request("Hi", "no-such-font"),
            RenderSettings::default(),
            None,
        )
        .await;
        assert!(matches!(event, UiEvent::BannerRendered {
            outcome: RenderOutcome::Failed,
            ..
        }));
    }

    #[tokio::test]
    async fn cancelled_before_start() {
        let token = CancellationToken::new();
        token.cancel();
        let event = render_banner(
            Arc::new(FontStore::new(Vec::new())),
            request("Hi", "term"),
            RenderSettings::default(),
            Some(token),
        )
        .await;
        assert!(matches!(event, UiEvent::RenderCancelled));
    }
}
