use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// A loyalty program member, resolved from the identity registry subject.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub user_id: String,
    pub registry_id: String,
    pub consent_given: bool,
}

impl User {
    pub fn new(registry_id: impl Into<String>, consent_given: bool) -> Self {
        User {
            user_id: uuid::Uuid::new_v4().to_string(),
            registry_id: registry_id.into(),
            consent_given,
        }
    }
}
