use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Query parameters for the campaign stream
#[derive(Deserialize)]
pub struct GenerateParams {
    #[serde(rename = "sessionId")]
    pub session_id: String,
    #[serde(rename = "type", default = "default_campaign_type")]
    pub campaign_type: String,
    /// Comma-separated channel ids, e.g. `sms,email`.
    #[serde(default)]
    pub channels: String,
}

impl GenerateParams {
    pub fn channel_ids(&self) -> Vec<String> {
        self.channels
            .split(',')
            .map(str::trim)
            .filter(|c| !c.is_empty())
            .map(str::to_string)
            .collect()
    }
}

fn default_campaign_type() -> String {
    "general".to_string()
}

/// One frame of the campaign push channel.
///
/// Non-terminal frames carry a slice of the serialized document; the single
/// terminal frame carries an empty chunk, `done = true` and the complete
/// document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct CampaignFrame {
    pub chunk: String,
    pub done: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub complete: Option<serde_json::Value>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn channel_ids_parses_csv_and_ignores_blanks() {
        let params = GenerateParams {
            session_id: "s1".into(),
            campaign_type: "general".into(),
            channels: "sms, email,,push".into(),
        };
        assert_eq!(params.channel_ids(), vec!["sms", "email", "push"]);

        let empty = GenerateParams {
            session_id: "s1".into(),
            campaign_type: "general".into(),
            channels: String::new(),
        };
        assert!(empty.channel_ids().is_empty());
    }

    #[test]
    fn non_terminal_frames_omit_the_complete_field() {
        let frame = CampaignFrame {
            chunk: "{".into(),
            done: false,
            complete: None,
        };
        let json = serde_json::to_string(&frame).unwrap();
        assert_eq!(json, r#"{"chunk":"{","done":false}"#);
    }

    #[test]
    fn query_defaults_apply() {
        let params: GenerateParams =
            serde_json::from_str(r#"{"sessionId": "s1"}"#).unwrap();
        assert_eq!(params.campaign_type, "general");
        assert!(params.channel_ids().is_empty());
    }
}
