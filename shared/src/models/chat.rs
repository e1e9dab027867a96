use serde::{Deserialize, Serialize};

/// Request body for one chat turn. The service sends only the latest
/// utterance, not the full transcript.
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct ChatRequest {
    pub message: String,
    pub character_name: String,
    #[serde(default)]
    pub character_description: Option<String>,
}

/// Successful reply. `note` is only present on the fallback path and
/// must be surfaced distinguishably from the reply itself.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct ChatReply {
    pub response: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

/// Error body for rejected turns. 400 carries only `message`; 500 adds
/// the raw provider diagnostic and, when known, a remediation hint.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct ChatFailure {
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reply_without_note_omits_the_field() {
        let reply = ChatReply {
            response: "hello".into(),
            note: None,
        };
        let json = serde_json::to_string(&reply).unwrap();
        assert!(!json.contains("note"));
    }

    #[test]
    fn failure_body_tolerates_missing_optionals() {
        let failure: ChatFailure = serde_json::from_str(r#"{"message":"nope"}"#).unwrap();
        assert_eq!(failure.message, "nope");
        assert_eq!(failure.error, None);
        assert_eq!(failure.suggestion, None);
    }

    #[test]
    fn request_description_defaults_to_none() {
        let req: ChatRequest =
            serde_json::from_str(r#"{"message":"Hi","character_name":"Zara"}"#).unwrap();
        assert_eq!(req.character_description, None);
    }
}
