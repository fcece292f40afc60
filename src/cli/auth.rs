use std::sync::Arc;

use tokio::sync::Mutex;

use crate::{info, spotify, types::PkceToken};

pub async fn auth(shared_state: Arc<Mutex<Option<PkceToken>>>) {
    info!("Waiting for authorization in the browser...");
    spotify::auth::auth(shared_state).await;
}
