use crate::model::{Error, Result};
use crate::report::{Block, Message, ReportKind, ReportSink};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{error, info};

const POST_URL: &str = "https://slack.com/api/chat.postMessage";

#[derive(Debug, Clone)]
pub struct SlackSink {
    client: Client,
    token: String,
    channel: String,
    url: String,
}

#[derive(Debug, Serialize)]
struct PostMessage<'a> {
    channel: &'a str,
    as_user: bool,
    blocks: &'a [Block],
}

#[derive(Debug, Deserialize)]
struct PostMessageReply {
    ok: bool,
    error: Option<String>,
}

impl SlackSink {
    pub fn new(token: impl ToString, channel: impl ToString) -> Self {
        Self {
            client: Client::new(),
            token: token.to_string(),
            channel: channel.to_string(),
            url: POST_URL.to_string(),
        }
    }
}

impl ReportSink for SlackSink {
    async fn deliver(&self, kind: ReportKind, message: &Message) -> Result<()> {
        let payload = PostMessage {
            channel: &self.channel,
            as_user: false,
            blocks: &message.blocks,
        };
        let body = self
            .client
            .post(&self.url)
            .bearer_auth(&self.token)
            .json(&payload)
            .send()
            .await?
            .text()
            .await?;
        check_reply(&body)?;
        info!(report = kind.name(), channel = %self.channel, "posted to slack");
        Ok(())
    }
}

fn check_reply(body: &str) -> Result<()> {
    let reply: PostMessageReply = serde_json::from_str(body)?;
    if reply.ok {
        return Ok(());
    }
    error!(response = %body, "slack rejected the message");
    Err(Error::Delivery(
        reply.error.unwrap_or_else(|| "unknown error".to_string()),
    ))
}
