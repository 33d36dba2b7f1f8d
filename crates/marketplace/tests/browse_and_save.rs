//! End-to-end flows through `App`.

#![allow(clippy::unwrap_used)]

use marketplace::screen::{SellEvent, SellFormEvent};
use marketplace::{App, AppSettings};
use marketplace_core::{ContactInfo, ItemId, LocationData};

fn settings() -> AppSettings {
    AppSettings {
        simulate_latency: false,
        ..AppSettings::default()
    }
}

#[tokio::test]
async fn browse_details_save_and_view_saved() {
    let app = App::in_memory(settings()).await.unwrap();

    let home = app.home();
    home.load().await;
    let featured = home.state().featured.data().cloned().unwrap();
    let picked = featured[1].clone();

    let details = app.details();
    details.load(picked.id).await;
    let loaded = details.state().details.data().cloned().unwrap();
    assert_eq!(loaded.id, picked.id);
    assert_eq!(loaded.title, picked.title);

    assert!(details.toggle_saved().await.unwrap());

    let list = app.item_list();
    list.load(None).await;
    let mut list_rx = list.subscribe();
    list_rx.wait_for(|s| s.is_saved(picked.id)).await.unwrap();

    let saved = app.saved();
    let mut saved_rx = saved.subscribe();
    let state = saved_rx
        .wait_for(|s| s.entries.is_success())
        .await
        .unwrap()
        .clone();
    let entries = state.entries.data().unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].item_id, picked.id);
    assert_eq!(entries[0].title, picked.title);

    saved.remove(picked.id).await.unwrap();
    saved_rx.wait_for(|s| s.entries.is_empty()).await.unwrap();
    list_rx.wait_for(|s| !s.is_saved(picked.id)).await.unwrap();
}

#[tokio::test]
async fn saving_in_order_lists_newest_first() {
    let app = App::in_memory(settings()).await.unwrap();
    let list = app.item_list();
    list.load(None).await;
    let items = list.state().items.data().cloned().unwrap();

    for item in &items[..3] {
        list.toggle_saved(item).await.unwrap();
    }

    let saved: Vec<ItemId> = app
        .wishlist()
        .list()
        .await
        .unwrap()
        .iter()
        .map(|e| e.item_id)
        .collect();
    assert_eq!(saved, vec![items[2].id, items[1].id, items[0].id]);
}

#[tokio::test]
async fn post_listing_then_contact_seller() {
    let app = App::in_memory(AppSettings {
        default_contact: Some(ContactInfo::new("Meera", "+919812345678", "meera@example.in")),
        ..settings()
    })
    .await
    .unwrap();

    let sell = app.sell();
    for event in [
        SellFormEvent::TitleChanged("Acoustic guitar".to_string()),
        SellFormEvent::DescriptionChanged("Six strings, soft case included".to_string()),
        SellFormEvent::PriceChanged("7000".to_string()),
        SellFormEvent::CategoryChanged("Electronics".to_string()),
        SellFormEvent::ConditionChanged("Fair".to_string()),
        SellFormEvent::ImageAdded("content://guitar.jpg".to_string()),
        SellFormEvent::NegotiableChanged(true),
    ] {
        sell.apply(event);
    }
    assert!(!sell.state().is_valid());

    let picker = app.location_picker();
    picker.use_current_location(None, true);
    picker.select(
        marketplace_core::DEFAULT_COORDINATES,
        Some(&marketplace_core::Placemark {
            address_line: Some("Janpath".to_string()),
            locality: Some("New Delhi".to_string()),
            admin_area: Some("Delhi".to_string()),
            country: Some("India".to_string()),
        }),
    );
    let location: LocationData = picker.confirm().unwrap();
    sell.apply(SellFormEvent::LocationChanged(location));
    assert!(sell.state().is_valid());

    sell.submit().await;
    let Some(SellEvent::NavigateToDetails(id)) = sell.take_event() else {
        panic!("listing was not posted");
    };
    assert!(id.0 >= 10_000);

    let details = app.details();
    details.load(ItemId(2)).await;
    let conversation = details.contact_seller().await.unwrap().unwrap();

    let chat = app.chat_screen();
    chat.open(conversation).await.unwrap();
    chat.send("Can you share more photos?").await.unwrap();
    let open = chat.state().open.unwrap();
    assert_eq!(open.item_id, ItemId(2));
    assert_eq!(open.messages.len(), 2);
}
