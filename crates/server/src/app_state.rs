use std::path::PathBuf;

use crate::api::ApiContext;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) api: ApiContext,
    pub(crate) styles_path: PathBuf,
}
