// Partner application form
//
// The request DTO is permissive (every field optional) so missing fields
// produce a JSON 400 from validation instead of a deserializer rejection.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::api::validation::{
    optional_field, require_field, validate_field_size, ValidationError, MAX_GROUP_BYTES,
    MAX_REASON_BYTES, MAX_USERNAME_BYTES,
};

/// Request body for POST /api/partners/submit
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct SubmitApplicationRequest {
    /// Roblox group name or link
    #[schema(example = "Bloxion Builders")]
    pub group: Option<String>,
    /// Why the group wants to partner
    pub reason: Option<String>,
    /// Roblox username of the applicant
    pub username: Option<String>,
}

/// Validated application, ready to relay
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PartnerApplication {
    pub group: String,
    pub reason: String,
    pub roblox_username: Option<String>,
}

impl SubmitApplicationRequest {
    /// Trim and check required fields and size limits
    pub fn validate(&self) -> Result<PartnerApplication, ValidationError> {
        let group = require_field(self.group.as_deref())?;
        let reason = require_field(self.reason.as_deref())?;
        let roblox_username = optional_field(self.username.as_deref());

        validate_field_size("group", group, MAX_GROUP_BYTES)?;
        validate_field_size("reason", reason, MAX_REASON_BYTES)?;
        if let Some(username) = roblox_username {
            validate_field_size("username", username, MAX_USERNAME_BYTES)?;
        }

        Ok(PartnerApplication {
            group: group.to_string(),
            reason: reason.to_string(),
            roblox_username: roblox_username.map(str::to_string),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(group: Option<&str>, reason: Option<&str>, username: Option<&str>) -> SubmitApplicationRequest {
        SubmitApplicationRequest {
            group: group.map(String::from),
            reason: reason.map(String::from),
            username: username.map(String::from),
        }
    }

    #[test]
    fn test_valid_application() {
        let app = request(Some(" G "), Some("R"), None).validate().unwrap();
        assert_eq!(
            app,
            PartnerApplication {
                group: "G".to_string(),
                reason: "R".to_string(),
                roblox_username: None,
            }
        );
    }

    #[test]
    fn test_optional_username() {
        let app = request(Some("G"), Some("R"), Some("builderman"))
            .validate()
            .unwrap();
        assert_eq!(app.roblox_username.as_deref(), Some("builderman"));

        let app = request(Some("G"), Some("R"), Some("   ")).validate().unwrap();
        assert_eq!(app.roblox_username, None);
    }

    #[test]
    fn test_missing_fields() {
        assert_eq!(
            request(None, Some("R"), None).validate(),
            Err(ValidationError::Missing)
        );
        assert_eq!(
            request(Some("G"), Some(""), None).validate(),
            Err(ValidationError::Missing)
        );
        assert_eq!(
            request(Some(""), Some("R"), None).validate(),
            Err(ValidationError::Missing)
        );
        assert_eq!(
            SubmitApplicationRequest::default().validate(),
            Err(ValidationError::Missing)
        );
    }

    #[test]
    fn test_oversized_fields() {
        let long_reason = "x".repeat(MAX_REASON_BYTES + 1);
        assert_eq!(
            request(Some("G"), Some(&long_reason), None).validate(),
            Err(ValidationError::TooLarge)
        );

        let long_name = "x".repeat(MAX_USERNAME_BYTES + 1);
        assert_eq!(
            request(Some("G"), Some("R"), Some(&long_name)).validate(),
            Err(ValidationError::TooLarge)
        );
    }

    #[test]
    fn test_deserialize_ignores_unknown_fields() {
        let req: SubmitApplicationRequest =
            serde_json::from_str(r#"{"group":"G","reason":"R","extra":1}"#).unwrap();
        assert!(req.validate().is_ok());
    }
}
