use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Claims the identity provider puts in its HS256 access tokens.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct Claims {
    pub sub: String,
    #[serde(default = "default_role")]
    pub role: String,
    pub exp: usize,
}

fn default_role() -> String {
    "user".to_string()
}
