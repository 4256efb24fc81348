use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct ApiContactResponse {
    pub success: bool,
}
