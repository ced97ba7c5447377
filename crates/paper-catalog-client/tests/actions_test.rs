use paper_catalog_client::model::CollegeInput;
use paper_catalog_client::{actions, CatalogApi, Store};
use std::net::TcpListener;

/// An address nothing listens on.
fn closed_address() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let address = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{address}")
}

#[tokio::test]
async fn transport_failures_are_recorded_in_state() {
    let api = CatalogApi::new(closed_address());
    let mut store = Store::new();

    let result = actions::get_colleges(&mut store, &api).await;
    assert!(result.is_err());

    let colleges = &store.state().colleges;
    assert!(!colleges.loading);
    assert!(colleges.items.is_empty());
    let error = colleges.error.as_ref().expect("failure should be recorded");
    assert_eq!(error.status, None);
    assert!(store.state().alerts.is_empty());
}

#[tokio::test]
async fn failed_mutations_push_no_success_alert() {
    let api = CatalogApi::new(closed_address()).with_token("secret");
    let mut store = Store::new();

    let input = CollegeInput {
        name: "Tech U".into(),
        code: "TU".into(),
        location: None,
    };
    assert!(actions::add_college(&mut store, &api, &input).await.is_err());
    assert!(store.state().colleges.items.is_empty());
    assert!(store.state().alerts.is_empty());
}
