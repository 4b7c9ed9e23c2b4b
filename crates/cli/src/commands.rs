//! Subcommand execution. Each command produces an [`Output`] carrying both
//! its plain-text and JSON renderings.

use std::fmt::Display;
use std::time::Duration;

use anyhow::{anyhow, Context};
use serde::Serialize;
use serde_json::{json, Value};
use toolbelt_core::date::{self, DateInput};
use toolbelt_core::{color, http, strings, units, uri};
use toolbelt_ws::{close_web_socket, ManagedSocket, Message};

use crate::cli::{ColorCommand, Command, DateCommand, TextCommand, UnitKind, UnitsArgs, WsArgs};
use crate::config::CliConfig;

/// Result of one command.
#[derive(Debug, Clone, PartialEq)]
pub struct Output {
    text: String,
    json: Value,
}

impl Output {
    fn plain(text: impl Into<String>) -> Self {
        let text = text.into();
        Self {
            json: Value::String(text.clone()),
            text,
        }
    }

    fn scalar<T: Serialize + Display>(value: T) -> anyhow::Result<Self> {
        Ok(Self {
            text: value.to_string(),
            json: serde_json::to_value(value)?,
        })
    }

    fn structured<T: Serialize>(text: String, value: &T) -> anyhow::Result<Self> {
        Ok(Self {
            text,
            json: serde_json::to_value(value)?,
        })
    }

    pub fn render(&self, as_json: bool) -> String {
        if as_json {
            self.json.to_string()
        } else {
            self.text.clone()
        }
    }
}

pub async fn run(command: Command, config: &CliConfig) -> anyhow::Result<Output> {
    match command {
        Command::Color(cmd) => run_color(cmd),
        Command::Date(cmd) => run_date(cmd, config),
        Command::Units(args) => run_units(args),
        Command::Text(cmd) => run_text(cmd),
        Command::Http { status } => run_http(status),
        Command::Uri { uri } => Output::scalar(uri::has_scheme(Some(&uri))),
        Command::Ws(args) => run_ws(args).await,
    }
}

fn run_color(cmd: ColorCommand) -> anyhow::Result<Output> {
    match cmd {
        ColorCommand::Hex { r, g, b } => Ok(Output::plain(color::rgb_to_hex(r, g, b)?)),
        ColorCommand::Rgb { hex } => {
            let rgb = color::hex_to_rgb(&hex)?;
            Output::structured(color::rgb_to_string(&rgb), &rgb)
        }
        ColorCommand::Contrast { hex } => Ok(Output::plain(color::get_contrast_text_color(&hex))),
        ColorCommand::Gradient { pct } => Ok(Output::plain(color::get_color_for_percentage(pct))),
        ColorCommand::Opacity { opacity } => {
            Ok(Output::plain(color::get_opacity_hex_value(opacity)?))
        }
    }
}

fn run_date(cmd: DateCommand, config: &CliConfig) -> anyhow::Result<Output> {
    let pattern_or_default =
        |pattern: Option<String>| pattern.unwrap_or_else(|| config.date_format.clone());

    match cmd {
        DateCommand::Unix { timestamp, pattern } => {
            let pattern = pattern_or_default(pattern);
            Ok(Output::plain(date::format_unix_timestamp_in(
                Some(timestamp),
                Some(&pattern),
                config.zone,
            )))
        }
        DateCommand::Format { value, pattern } => {
            let input = match value.parse::<i64>() {
                Ok(millis) => DateInput::EpochMillis(millis),
                Err(_) => DateInput::Iso(value),
            };
            let formatted = date::format_date_in(input, &pattern_or_default(pattern), config.zone)?;
            Ok(Output::plain(formatted))
        }
        DateCommand::Now { pattern } => Ok(Output::plain(date::format_now_in(
            &pattern_or_default(pattern),
            config.zone,
        )?)),
        DateCommand::Expired { timestamp } => {
            Output::scalar(date::is_expired_timestamp(timestamp))
        }
    }
}

fn run_units(args: UnitsArgs) -> anyhow::Result<Output> {
    let value = Some(args.value);
    let converted = match args.kind {
        UnitKind::Gpm => units::from_m3ps_to_gpm(value),
        UnitKind::Ft => units::from_pa_to_ft(value),
        UnitKind::Hp => units::from_w_to_hp(value),
        UnitKind::Inches => units::from_m_to_inches(value),
        UnitKind::Rpm => units::from_hz_to_rpm(value),
    };
    Output::scalar(converted)
}

fn run_text(cmd: TextCommand) -> anyhow::Result<Output> {
    match cmd {
        TextCommand::Strip { text } => Ok(Output::plain(strings::remove_diacritical_marks(&text))),
        TextCommand::Capitalize { text } => Ok(Output::plain(strings::capitalize_first(&text))),
        TextCommand::Words { text } => Output::scalar(strings::count_words(Some(&text))),
        TextCommand::Truncate { text, max } => Ok(Output::plain(strings::truncate(&text, max))),
        TextCommand::Alnum { text } => Output::scalar(strings::is_alphanumeric(&text)),
    }
}

fn run_http(status: u16) -> anyhow::Result<Output> {
    let status = Some(status);
    let success = http::is_http_success_status(status);
    let client_error = http::is_http_client_error_status(status);
    let server_error = http::is_http_server_error_status(status);

    let class = if success {
        "success"
    } else if client_error {
        "client error"
    } else if server_error {
        "server error"
    } else {
        "other"
    };

    Output::structured(
        class.to_string(),
        &json!({
            "status": status,
            "success": success,
            "client_error": client_error,
            "server_error": server_error,
        }),
    )
}

async fn run_ws(args: WsArgs) -> anyhow::Result<Output> {
    let (mut socket, mut inbound) = ManagedSocket::connect(&args.url).await?;
    socket.send(Message::Text(args.message))?;

    let reply = tokio::time::timeout(Duration::from_secs(args.timeout), async {
        while let Some(message) = inbound.recv().await {
            match message {
                Message::Text(text) => return Some(text),
                Message::Close(_) => return None,
                _ => {}
            }
        }
        None
    })
    .await;

    close_web_socket(Some(&mut socket));
    // The writer task dies with the runtime, so let it flush the Close frame.
    if tokio::time::timeout(Duration::from_secs(args.timeout), socket.closed())
        .await
        .is_err()
    {
        tracing::warn!(url = %args.url, "WebSocket close handshake did not finish in time");
    }

    let reply = reply
        .map_err(|_| anyhow!("No reply within {}s", args.timeout))?
        .context("Connection closed before a reply arrived")?;
    tracing::debug!(url = %args.url, bytes = reply.len(), "Received WebSocket reply");

    Ok(Output::plain(reply))
}
