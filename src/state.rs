use std::sync::Arc;

use parking_lot::{Mutex, RwLock};
use serde_json::Value;

use crate::dom::Element;
use crate::interact::InteractionController;

/// Shared session state for one viewer instance: the loaded document,
/// the mounted view, and the interaction controller. One value per
/// viewer, so concurrent instances stay isolated.
pub struct AppState {
    pub doc: RwLock<Option<Arc<Value>>>,
    pub view: RwLock<Option<Element>>,
    pub interact: Mutex<InteractionController>,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            doc: RwLock::new(None),
            view: RwLock::new(None),
            interact: Mutex::new(InteractionController::new()),
        }
    }
}
