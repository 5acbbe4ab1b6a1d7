pub mod flashcards_api;

use crate::domain::models::BackendBox;

pub struct BackendManager {}

impl BackendManager {
    pub fn get() -> BackendBox {
        return Box::<flashcards_api::FlashcardsApi>::default();
    }
}
