use serde::Serialize;

/// Chat message payload.
/// `text` is always present and is what plain-text sinks (and Slack's notification preview) show;
/// `blocks` carries optional Slack Block Kit layout.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Message {
    pub text: String,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub blocks: Vec<serde_json::Value>,
}

impl Message {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            blocks: Vec::new(),
        }
    }

    pub fn with_blocks(mut self, blocks: Vec<serde_json::Value>) -> Self {
        self.blocks = blocks;
        self
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use serde_json::json;

    #[test]
    fn plain_text_message_has_no_blocks_key() {
        let v = serde_json::to_value(Message::text("hello")).unwrap();
        assert_eq!(v, json!({ "text": "hello" }));
    }

    #[test]
    fn blocks_are_serialized_when_present() {
        let msg = Message::text("fallback").with_blocks(vec![json!({ "type": "divider" })]);
        let v = serde_json::to_value(msg).unwrap();
        assert_eq!(
            v,
            json!({ "text": "fallback", "blocks": [{ "type": "divider" }] })
        );
    }
}
