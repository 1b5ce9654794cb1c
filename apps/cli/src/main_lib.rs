use std::sync::Arc;

use goldrate_core::{Error as CoreError, RateService, RateServiceTrait};
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

use crate::commands::{Command, HELP};
use crate::config::Config;
use crate::render::render_snapshot;

pub struct AppState {
    pub config: Config,
    pub rate_service: Arc<dyn RateServiceTrait>,
}

pub fn init_tracing() {
    let log_format = std::env::var("GOLDRATE_LOG_FORMAT").unwrap_or_else(|_| "text".to_string());
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry().with(filter);

    if log_format.eq_ignore_ascii_case("json") {
        registry
            .with(
                fmt::layer()
                    .json()
                    .with_current_span(false)
                    .with_writer(std::io::stderr),
            )
            .init();
    } else {
        registry
            .with(
                fmt::layer()
                    .with_target(true)
                    .with_line_number(true)
                    .with_writer(std::io::stderr),
            )
            .init();
    }
}

pub fn build_state(config: Config) -> anyhow::Result<AppState> {
    let rate_service = RateService::new(config.settings.clone())?;
    tracing::info!(
        "Rate service ready (ttl {}s, cooldown {}s, paid fallback {})",
        config.settings.cache_ttl.as_secs(),
        config.settings.cooldown.as_secs(),
        if config.settings.metal_price_api_key.is_some() {
            "on"
        } else {
            "off"
        }
    );

    Ok(AppState {
        config,
        rate_service: Arc::new(rate_service),
    })
}

/// What the loop should do after a command.
#[derive(Debug, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Exit,
}

/// Run one command, returning the text to print.
///
/// Expected failures (cooldown, exhausted sources) are reported as text;
/// only unexpected errors are returned.
pub async fn execute(state: &AppState, command: Command) -> anyhow::Result<(String, Flow)> {
    let pricing = &state.config.settings.pricing;

    let text = match command {
        Command::Fetch => match state.rate_service.fetch_now().await {
            Ok(snapshot) => render_snapshot(&snapshot, pricing),
            Err(e @ (CoreError::Cooldown { .. } | CoreError::RateUnavailable { .. })) => {
                format!("Error: {}", e)
            }
            Err(e) => return Err(e.into()),
        },
        Command::Show => match state.rate_service.current().await? {
            Some(snapshot) => render_snapshot(&snapshot, pricing),
            None => "Run `fetch` to retrieve live XAU/USD and compute rates.".to_string(),
        },
        Command::Rate { name, force } => {
            let response = state.rate_service.get_rate(&name, force).await;
            serde_json::to_string_pretty(&response)?
        }
        Command::Clear => {
            state.rate_service.clear_cache().await;
            "Cache cleared.".to_string()
        }
        Command::Help => HELP.to_string(),
        Command::Quit => return Ok((String::new(), Flow::Exit)),
    };

    Ok((text, Flow::Continue))
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use goldrate_core::{RateResponse, RateSnapshot};

    struct StubService;

    #[async_trait]
    impl RateServiceTrait for StubService {
        async fn get_rate(&self, name: &str, _force_refresh: bool) -> RateResponse {
            RateResponse::err(format!("no sources configured for {}", name))
        }

        async fn clear_cache(&self) {}

        async fn fetch_now(&self) -> goldrate_core::Result<RateSnapshot> {
            Err(CoreError::Cooldown { remaining_secs: 12 })
        }

        async fn current(&self) -> goldrate_core::Result<Option<RateSnapshot>> {
            Ok(None)
        }
    }

    fn state() -> AppState {
        AppState {
            config: Config::from_lookup(|_| None).unwrap(),
            rate_service: Arc::new(StubService),
        }
    }

    #[tokio::test]
    async fn test_fetch_cooldown_is_reported_not_raised() {
        let (text, flow) = execute(&state(), Command::Fetch).await.unwrap();
        assert_eq!(text, "Error: Please wait 12s before fetching again");
        assert_eq!(flow, Flow::Continue);
    }

    #[tokio::test]
    async fn test_rate_prints_json() {
        let (text, _) = execute(
            &state(),
            Command::Rate {
                name: "usd_inr".to_string(),
                force: false,
            },
        )
        .await
        .unwrap();
        let json: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(json["success"], false);
        assert_eq!(json["error"], "no sources configured for usd_inr");
    }

    #[tokio::test]
    async fn test_show_without_cache_and_quit() {
        let (text, _) = execute(&state(), Command::Show).await.unwrap();
        assert!(text.contains("Run `fetch`"));

        let (_, flow) = execute(&state(), Command::Quit).await.unwrap();
        assert_eq!(flow, Flow::Exit);
    }
}
