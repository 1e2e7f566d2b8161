//! Data Transfer Objects
//!
//! Response bodies of the blog endpoints. Only the fields the front end reads are modelled;
//! anything else the server sends is ignored.

use serde::{Deserialize, Serialize};

// ============================================
// PRIVATE CHAT
// ============================================

/// `GET /api/private-chat/summary/`
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct UnreadSummary {
    /// Unread private messages across all conversations
    pub total_unread: u64,
}

// ============================================
// WEATHER
// ============================================

/// `POST /api/weather/refresh/`
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct RefreshResponse {
    pub success: bool,
    /// Human-readable detail, when the server provides one
    #[serde(default, alias = "error", skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_ignores_extra_fields() {
        let json = r#"{"total_unread": 3, "conversations": [{"id": 1, "unread": 3}]}"#;
        let summary: UnreadSummary = serde_json::from_str(json).unwrap();
        assert_eq!(summary.total_unread, 3);
    }

    #[test]
    fn test_summary_rejects_negative_count() {
        assert!(serde_json::from_str::<UnreadSummary>(r#"{"total_unread": -1}"#).is_err());
    }

    #[test]
    fn test_refresh_response_variants() {
        let ok: RefreshResponse = serde_json::from_str(r#"{"success": true}"#).unwrap();
        assert!(ok.success);
        assert_eq!(ok.message, None);

        let failed: RefreshResponse =
            serde_json::from_str(r#"{"success": false, "error": "quota exceeded"}"#).unwrap();
        assert!(!failed.success);
        assert_eq!(failed.message.as_deref(), Some("quota exceeded"));
    }
}
