use std::sync::Arc;

use eldorado_core::UserStore;
use eldorado_crawler::Crawler;

pub struct AppState {
    pub users: Arc<dyn UserStore>,
    pub crawler: Arc<Crawler>,
}

impl AppState {
    pub fn new(users: Arc<dyn UserStore>, crawler: Arc<Crawler>) -> Self {
        Self { users, crawler }
    }
}
