use server_api::create_api_router;

use crate::state::AppState;

pub struct ApiDoc;

impl ApiDoc {
    /// Route list does not need a state instance, so documentation
    /// can be created without opening the database.
    pub fn all() -> utoipa::openapi::OpenApi {
        let (_, doc) = create_api_router::<AppState>().split_for_parts();
        doc
    }

    pub fn open_api_json_string() -> Result<String, serde_json::Error> {
        Self::all().to_pretty_json()
    }
}
