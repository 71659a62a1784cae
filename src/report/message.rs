use serde::Serialize;

/// Slack `mrkdwn` text object.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Text {
    #[serde(rename = "type")]
    kind: &'static str,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Block {
    Divider,
    Section { text: Text },
}

impl Block {
    pub fn section(text: impl Into<String>) -> Self {
        Block::Section {
            text: Text {
                kind: "mrkdwn",
                text: text.into(),
            },
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Message {
    pub blocks: Vec<Block>,
}

impl Message {
    /// Two spacer sections followed by the title.
    pub fn titled(title: impl Into<String>) -> Self {
        Self {
            blocks: vec![Block::section("\n"), Block::section("\n"), Block::section(title)],
        }
    }

    /// Divider, then one section with the heading and a line per item.
    pub fn push_group(&mut self, heading: &str, lines: &[String]) {
        let body = lines.iter().fold(heading.to_string(), |mut acc, line| {
            acc.push('\n');
            acc.push_str(line);
            acc
        });
        self.blocks.push(Block::Divider);
        self.blocks.push(Block::section(body));
    }

    pub fn sections(&self) -> impl Iterator<Item = &str> {
        self.blocks.iter().filter_map(|block| match block {
            Block::Section { text } => Some(text.text.as_str()),
            Block::Divider => None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn blocks_serialize_to_slack_shape() {
        let mut message = Message::titled("*Title*");
        message.push_group("*Group:*", &["one".to_string(), "two".to_string()]);
        let value = serde_json::to_value(&message.blocks).unwrap();
        assert_eq!(
            value,
            json!([
                {"type": "section", "text": {"type": "mrkdwn", "text": "\n"}},
                {"type": "section", "text": {"type": "mrkdwn", "text": "\n"}},
                {"type": "section", "text": {"type": "mrkdwn", "text": "*Title*"}},
                {"type": "divider"},
                {"type": "section", "text": {"type": "mrkdwn", "text": "*Group:*\none\ntwo"}}
            ])
        );
    }
}
