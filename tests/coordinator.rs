mod common;

use common::{dhairya, grid_response, lookup_response, server_error, song, Call, ScriptedApi};
use tunegrid::coordinator::RequestState;
use tunegrid::domain::DEFAULT_ERROR_MESSAGE;
use tunegrid::{AppState, Emission, RequestCoordinator, TrackDetail};

#[tokio::test]
async fn latest_search_wins_when_older_response_arrives_last() {
    let api = ScriptedApi::new();
    let coordinator = RequestCoordinator::new(api.clone());

    let first = tokio::spawn(coordinator.search("t1"));
    let second = tokio::spawn(coordinator.search("t2"));
    api.wait_for_calls(2).await;

    api.respond(1, grid_response(vec![song(2, "two")]));
    assert!(second.await.unwrap().is_some());

    api.respond(0, grid_response(vec![song(1, "one")]));
    assert_eq!(first.await.unwrap(), None);

    let state = coordinator.snapshot();
    assert_eq!(state.search_term(), "t2");
    assert_eq!(state.grid_data().items[0].track_name, "two");
}

#[tokio::test]
async fn latest_search_wins_when_older_response_arrives_first() {
    let api = ScriptedApi::new();
    let coordinator = RequestCoordinator::new(api.clone());
    let mut emissions = coordinator.subscribe();

    let first = tokio::spawn(coordinator.search("t1"));
    let second = tokio::spawn(coordinator.search("t2"));
    api.wait_for_calls(2).await;

    api.respond(0, server_error());
    assert_eq!(first.await.unwrap(), None);
    assert!(coordinator.snapshot().search_error().is_none());
    assert!(coordinator.snapshot().is_loading());

    api.respond(1, grid_response(vec![song(2, "two")]));
    second.await.unwrap();

    // Only the current response was broadcast.
    assert!(matches!(emissions.recv().await.unwrap(), Emission::GridSuccess(_)));
    assert!(emissions.try_recv().is_err());
}

#[tokio::test]
async fn cache_miss_issues_exactly_one_lookup() {
    let api = ScriptedApi::new();
    let coordinator = RequestCoordinator::new(api.clone());

    let fetch = tokio::spawn(coordinator.fetch_track_detail(1650765257));
    api.wait_for_calls(1).await;
    api.respond(0, lookup_response(dhairya()));
    fetch.await.unwrap();

    assert_eq!(api.calls(), vec![Call::Lookup(1650765257)]);
}

#[tokio::test]
async fn cached_detail_is_served_without_network() {
    let api = ScriptedApi::new();
    let coordinator = RequestCoordinator::new(api.clone());

    let fetch = tokio::spawn(coordinator.fetch_track_detail(1650765257));
    api.wait_for_calls(1).await;
    api.respond(0, lookup_response(dhairya()));
    let first = fetch.await.unwrap();

    let expected: TrackDetail = serde_json::from_value(dhairya()).unwrap();
    assert_eq!(coordinator.cached_detail(1650765257), Some(expected.clone()));
    assert_eq!(first, Some(Emission::DetailSuccess(expected.clone())));

    coordinator.clear_detail();
    let again = coordinator.fetch_track_detail(1650765257).await;
    assert_eq!(again, Some(Emission::DetailSuccess(expected.clone())));
    assert_eq!(api.lookups(), 1);
    assert_eq!(coordinator.snapshot().track_details(), Some(&expected));
    assert_eq!(coordinator.detail_state(), RequestState::Succeeded(expected));
}

#[tokio::test]
async fn clear_search_discards_in_flight_response() {
    let api = ScriptedApi::new();
    let coordinator = RequestCoordinator::new(api.clone());

    let pending = tokio::spawn(coordinator.search("Alag"));
    api.wait_for_calls(1).await;
    coordinator.clear_search();

    api.respond(0, grid_response(vec![song(1, "late")]));
    assert_eq!(pending.await.unwrap(), None);

    let state = coordinator.snapshot();
    assert_eq!(state, AppState::default());
    assert_eq!(state.search_term(), "");
    assert!(state.grid_data().is_empty());
    assert!(state.search_error().is_none());
}

#[tokio::test]
async fn successful_search_populates_grid() {
    let api = ScriptedApi::new();
    let coordinator = RequestCoordinator::new(api.clone());

    let search = tokio::spawn(coordinator.search("Alag Aasmaan"));
    api.wait_for_calls(1).await;
    api.respond(0, grid_response(vec![dhairya()]));
    search.await.unwrap();

    let state = coordinator.snapshot();
    assert_eq!(state.grid_data().result_count, 1);
    assert_eq!(state.grid_data().items[0].track_id, 1650765257);
    assert_eq!(state.grid_data().items[0].track_name, "Dhairya");
    assert!(state.search_error().is_none());
    assert_eq!(api.calls(), vec![Call::Search("Alag Aasmaan".to_string())]);
}

#[tokio::test]
async fn failed_search_empties_grid_and_sets_message() {
    let api = ScriptedApi::new();
    let coordinator = RequestCoordinator::new(api.clone());

    let search = tokio::spawn(coordinator.search("xyz"));
    api.wait_for_calls(1).await;
    api.respond(0, server_error());
    let emission = search.await.unwrap();

    assert_eq!(emission, Some(Emission::GridFailure(DEFAULT_ERROR_MESSAGE.to_string())));
    let state = coordinator.snapshot();
    assert!(state.grid_data().is_empty());
    assert_eq!(state.search_error(), Some(DEFAULT_ERROR_MESSAGE));
}

#[tokio::test]
async fn malformed_body_is_a_failure_not_a_panic() {
    let api = ScriptedApi::new();
    let coordinator = RequestCoordinator::new(api.clone());

    let fetch = tokio::spawn(coordinator.fetch_track_detail(7));
    api.wait_for_calls(1).await;
    api.respond(0, tunegrid::ApiResponse::success(200, serde_json::json!({ "results": [] })));

    assert!(matches!(fetch.await.unwrap(), Some(Emission::DetailFailure(_))));
    assert!(coordinator.cached_detail(7).is_none());
    assert!(coordinator.snapshot().track_search_error().is_some());
}

#[tokio::test]
async fn channels_are_independent() {
    let api = ScriptedApi::new();
    let coordinator = RequestCoordinator::new(api.clone());

    let search = tokio::spawn(coordinator.search("Alag"));
    let fetch = tokio::spawn(coordinator.fetch_track_detail(1650765257));
    api.wait_for_calls(2).await;

    let lookup_index = api.calls().iter().position(|c| matches!(c, Call::Lookup(_))).unwrap();
    api.respond(lookup_index, lookup_response(dhairya()));
    api.respond(1 - lookup_index, grid_response(vec![song(1, "one")]));

    assert!(search.await.unwrap().is_some());
    assert!(fetch.await.unwrap().is_some());
}
