//! Screen state holders.
//!
//! One holder per screen. Each keeps its state in a `watch` channel:
//! `subscribe()` hands the rendering layer a receiver, `state()` a snapshot.

mod chat;
mod details;
mod home;
mod item_list;
mod location;
mod saved;
mod search;
mod sell;

pub use chat::{ChatScreen, ChatState};
pub use details::{DetailsState, ItemDetailsScreen, ShareContent};
pub use home::{HomeScreen, HomeState};
pub use item_list::{ItemListScreen, ItemListState};
pub use location::{LocationPickerScreen, LocationPickerState};
pub use saved::{SavedScreen, SavedState};
pub use search::{MAX_RECENT_SEARCHES, SearchScreen, SearchState};
pub use sell::{SellEvent, SellFormEvent, SellFormState, SellScreen};

use std::sync::Arc;

use marketplace_core::WishlistEntry;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::debug;

/// Feed every wishlist snapshot into a screen's state until the
/// wishlist goes away.
///
/// Must be called from within a Tokio runtime.
fn forward_wishlist<S, F>(
    mut entries: watch::Receiver<Vec<WishlistEntry>>,
    state: Arc<watch::Sender<S>>,
    apply: F,
) -> JoinHandle<()>
where
    S: Send + Sync + 'static,
    F: Fn(&mut S, &[WishlistEntry]) + Send + 'static,
{
    tokio::spawn(async move {
        loop {
            {
                let snapshot = entries.borrow_and_update();
                state.send_modify(|s| apply(s, &snapshot));
            }
            if entries.changed().await.is_err() {
                debug!("Wishlist closed, stopping updates");
                break;
            }
        }
    })
}
