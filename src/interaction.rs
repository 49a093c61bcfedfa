//! Turns incoming interaction events into reply envelopes.
//!
//! Only the payload side lives here: request routing and signature checks are
//! left to whatever serves the webhook.

use crate::config::RollConfig;
use crate::parse::classify;
use crate::roll::{self, Evaluation, MarkdownStringifier, RollOutcome};
use serde::{Deserialize, Serialize};
use std::panic::{self, AssertUnwindSafe};
use thiserror::Error;

pub const PING: u8 = 1;
pub const APPLICATION_COMMAND: u8 = 2;

pub const PONG: u8 = 1;
pub const CHANNEL_MESSAGE_WITH_SOURCE: u8 = 4;

pub const ROLL_COMMAND: &str = "roll";
pub const ROLL_INPUT_OPTION: &str = "input";

pub const APOLOGY: &str = "Sorry, something went wrong while rolling. Please try again.";

const ANONYMOUS: &str = "Someone";

#[derive(Debug, Clone, Deserialize)]
pub struct Interaction {
    #[serde(rename = "type")]
    pub kind: u8,
    #[serde(default)]
    pub data: Option<CommandData>,
    #[serde(default)]
    pub member: Option<Member>,
    #[serde(default)]
    pub user: Option<User>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CommandData {
    pub name: String,
    #[serde(default)]
    pub options: Vec<CommandOption>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CommandOption {
    pub name: String,
    #[serde(default)]
    pub value: serde_json::Value,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Member {
    #[serde(default)]
    pub nick: Option<String>,
    #[serde(default)]
    pub user: Option<User>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct User {
    pub username: String,
}

impl Interaction {
    /// The name a reply should attribute the roll to.
    pub fn display_name(&self) -> &str {
        let member = self.member.as_ref();
        member
            .and_then(|m| m.nick.as_deref())
            .or_else(|| member.and_then(|m| m.user.as_ref()).map(|u| u.username.as_str()))
            .or_else(|| self.user.as_ref().map(|u| u.username.as_str()))
            .unwrap_or(ANONYMOUS)
    }

    fn option_str(&self, name: &str) -> Option<&str> {
        self.data
            .as_ref()?
            .options
            .iter()
            .find(|o| o.name == name)?
            .value
            .as_str()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InteractionResponse {
    #[serde(rename = "type")]
    pub kind: u8,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<ResponseData>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResponseData {
    pub content: String,
}

impl InteractionResponse {
    pub fn pong() -> Self {
        Self {
            kind: PONG,
            data: None,
        }
    }

    pub fn message(content: impl Into<String>) -> Self {
        Self {
            kind: CHANNEL_MESSAGE_WITH_SOURCE,
            data: Some(ResponseData {
                content: content.into(),
            }),
        }
    }

    pub fn content(&self) -> Option<&str> {
        self.data.as_ref().map(|d| d.content.as_str())
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DispatchError {
    #[error("unknown interaction type {0}")]
    UnknownType(u8),
    #[error("unknown command {0:?}")]
    UnknownCommand(String),
    #[error("application command without data")]
    MissingData,
}

pub fn dispatch(
    interaction: &Interaction,
    config: &RollConfig,
) -> Result<InteractionResponse, DispatchError> {
    match interaction.kind {
        PING => {
            tracing::info!("handling ping");
            Ok(InteractionResponse::pong())
        }
        APPLICATION_COMMAND => {
            let data = interaction.data.as_ref().ok_or(DispatchError::MissingData)?;
            if data.name.eq_ignore_ascii_case(ROLL_COMMAND) {
                tracing::info!(command = %data.name, "handling roll request");
                let input = interaction.option_str(ROLL_INPUT_OPTION).unwrap_or_default();
                let content = roll_reply(input, interaction.display_name(), config);
                Ok(InteractionResponse::message(content))
            } else {
                tracing::warn!(command = %data.name, "unknown command");
                Err(DispatchError::UnknownCommand(data.name.clone()))
            }
        }
        kind => {
            tracing::warn!(kind, "unknown interaction type");
            Err(DispatchError::UnknownType(kind))
        }
    }
}

/// Builds the reply text for one roll input. Input errors and help are
/// replies too; only an unexpected fault turns into [`APOLOGY`].
pub fn roll_reply(input: &str, display_name: &str, config: &RollConfig) -> String {
    let result = panic::catch_unwind(AssertUnwindSafe(|| {
        let parsed = classify(input);
        match roll::evaluate(&parsed, config) {
            Ok(Evaluation::Rolled(outcome)) => fit_reply(&outcome, display_name, config.max_len),
            Ok(Evaluation::Help) => roll::USAGE.to_owned(),
            Err(why) => {
                tracing::info!(%why, "rejected roll input");
                why.to_string()
            }
        }
    }));

    result.unwrap_or_else(|_| {
        tracing::error!(input, "roll evaluation panicked");
        APOLOGY.to_owned()
    })
}

// Headers are tried longest first; the title, then the name, go when they
// leave no room for the transcript.
fn fit_reply(outcome: &RollOutcome, display_name: &str, max_len: usize) -> String {
    let mut headers = Vec::with_capacity(3);
    if let Some(title) = &outcome.title {
        headers.push(format!("{} rolls for \"{}\":\n", display_name, title));
    }
    headers.push(format!("{} rolls:\n", display_name));
    headers.push(String::new());

    let mut reply = String::new();
    for header in headers {
        let budget = match max_len.checked_sub(header.chars().count()) {
            Some(budget) => budget,
            None => continue,
        };
        let transcript = roll::render(&mut MarkdownStringifier::new(), outcome, budget);
        reply = format!("{}{}", header, transcript);
        if reply.chars().count() <= max_len {
            break;
        }
        tracing::debug!(header_len = header.len(), "reply header leaves no room, shortening");
    }
    reply
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn interaction(value: serde_json::Value) -> Interaction {
        serde_json::from_value(value).unwrap()
    }

    fn roll_interaction(input: &str) -> Interaction {
        interaction(json!({
            "type": 2,
            "data": {
                "name": "roll",
                "options": [{ "name": "input", "type": 3, "value": input }]
            },
            "member": { "nick": null, "user": { "username": "will" } }
        }))
    }

    #[test]
    fn test_ping() {
        let response = dispatch(&interaction(json!({ "type": 1 })), &RollConfig::default()).unwrap();
        assert_eq!(serde_json::to_value(&response).unwrap(), json!({ "type": 1 }));
    }

    #[test]
    fn test_roll_reply() {
        let response = dispatch(&roll_interaction(r#"d20 for:"Init""#), &RollConfig::default()).unwrap();
        assert_eq!(response.kind, CHANNEL_MESSAGE_WITH_SOURCE);
        let content = response.content().unwrap();
        assert!(content.starts_with("will rolls for \"Init\":\n"), "{}", content);
        assert!(content.contains("Rolling a `d20`..."), "{}", content);
    }

    #[test]
    fn test_roll_errors_are_replies() {
        let response = dispatch(&roll_interaction("2d6 adv dis"), &RollConfig::default()).unwrap();
        assert_eq!(response.content(), Some("Input Error: Can't have both 'adv' and 'dis'"));
    }

    #[test]
    fn test_roll_help() {
        let response = dispatch(&roll_interaction("d6 help"), &RollConfig::default()).unwrap();
        assert_eq!(response.content(), Some(roll::USAGE));
    }

    #[test]
    fn test_roll_overflow_fits_message() {
        let input = vec!["20d20"; 20].join(" ");
        let config = RollConfig::default();
        let response = dispatch(&roll_interaction(&input), &config).unwrap();
        let content = response.content().unwrap();
        assert!(content.chars().count() <= config.max_len);
        assert!(content.contains("too much text"), "{}", content);
    }

    #[test]
    fn test_long_title_fits_message() {
        let config = RollConfig::default();
        let input = format!("20d20 20d20 20d20 for:\"{}\"", "x".repeat(2100));
        let reply = roll_reply(&input, "will", &config);
        assert!(reply.chars().count() <= config.max_len, "reply len {}", reply.chars().count());
        assert!(reply.starts_with("will rolls:\n"), "{}", reply);
    }

    #[test]
    fn test_long_name_fits_message() {
        let config = RollConfig::default().with_max_len(200);
        let name = "n".repeat(300);
        let reply = roll_reply("d20 for:\"Init\"", &name, &config);
        assert!(reply.chars().count() <= config.max_len, "reply len {}", reply.chars().count());
        assert!(reply.starts_with("Rolling a `d20`..."), "{}", reply);
    }

    #[test]
    fn test_title_kept_when_it_fits() {
        let reply = roll_reply("d20 for:\"Init\"", "will", &RollConfig::default());
        assert!(reply.starts_with("will rolls for \"Init\":\n"), "{}", reply);
    }

    #[test]
    fn test_reply_envelope_shape() {
        let reply = InteractionResponse::message("hi");
        assert_eq!(
            serde_json::to_value(&reply).unwrap(),
            json!({ "type": 4, "data": { "content": "hi" } })
        );
    }

    #[test]
    fn test_missing_input_option() {
        let response = dispatch(
            &interaction(json!({ "type": 2, "data": { "name": "ROLL" } })),
            &RollConfig::default(),
        )
        .unwrap();
        assert_eq!(
            response.content(),
            Some("Input Error: Couldn't find a roll. Include `cursed` or `#d#`.")
        );
    }

    #[test]
    fn test_dispatch_errors() {
        let config = RollConfig::default();
        assert_eq!(
            dispatch(&interaction(json!({ "type": 3 })), &config),
            Err(DispatchError::UnknownType(3))
        );
        assert_eq!(
            dispatch(&interaction(json!({ "type": 2 })), &config),
            Err(DispatchError::MissingData)
        );
        assert_eq!(
            dispatch(&interaction(json!({ "type": 2, "data": { "name": "jail" } })), &config),
            Err(DispatchError::UnknownCommand("jail".to_owned()))
        );
    }

    #[test]
    fn test_display_name() {
        let named = |v| interaction(v).display_name().to_owned();
        assert_eq!(
            named(json!({ "type": 2, "member": { "nick": "Wil", "user": { "username": "will" } } })),
            "Wil"
        );
        assert_eq!(named(json!({ "type": 2, "member": { "user": { "username": "will" } } })), "will");
        assert_eq!(named(json!({ "type": 2, "user": { "username": "dm" } })), "dm");
        assert_eq!(named(json!({ "type": 2 })), "Someone");
    }
}
