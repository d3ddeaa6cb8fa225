use std::cell::{Cell, RefCell};
use std::rc::Rc;

use storeview::{Store, ViewStore};

#[derive(Clone)]
struct AppState {
    count: i32,
    name: String,
}

#[derive(Clone)]
enum AppAction {
    SetCount(i32),
    SetName(String),
}

fn reduce(state: AppState, action: AppAction) -> AppState {
    match action {
        AppAction::SetCount(count) => AppState { count, ..state },
        AppAction::SetName(name) => AppState { name, ..state },
    }
}

fn make_store() -> Store<AppState, AppAction> {
    Store::new(
        AppState {
            count: 0,
            name: "initial".to_string(),
        },
        reduce,
    )
}

fn count_view(store: &Store<AppState, AppAction>) -> ViewStore<i32, AppAction> {
    ViewStore::deduped(store, |state| state.count, |action| action)
}

#[test]
fn projection_tracks_upstream_changes() {
    let store = make_store();
    let view = count_view(&store);
    assert_eq!(view.state(), 0);

    store.send(AppAction::SetCount(5));
    assert_eq!(view.state(), 5);
}

#[test]
fn duplicate_state_notifies_no_observer() {
    let store = make_store();
    let view = count_view(&store);
    let renders = Rc::new(Cell::new(0u32));
    let seen = Rc::clone(&renders);
    let _sub = view.observe(move |_| seen.set(seen.get() + 1));

    // State is already 0; setting it to 0 again is a duplicate.
    store.send(AppAction::SetCount(0));
    assert_eq!(renders.get(), 0);
}

#[test]
fn distinct_state_notifies_exactly_once_with_new_value() {
    let store = make_store();
    let view = count_view(&store);
    let delivered = Rc::new(RefCell::new(Vec::new()));
    let seen = Rc::clone(&delivered);
    let _sub = view.observe(move |state| seen.borrow_mut().push(*state));

    store.send(AppAction::SetCount(1));
    assert_eq!(*delivered.borrow(), vec![1]);
}

#[test]
fn unrelated_field_change_is_filtered_out() {
    let store = make_store();
    let view = count_view(&store);
    let renders = Rc::new(Cell::new(0u32));
    let seen = Rc::clone(&renders);
    let _sub = view.observe(move |_| seen.set(seen.get() + 1));

    store.send(AppAction::SetName("renamed".to_string()));
    assert_eq!(renders.get(), 0);
    assert_eq!(store.state().name, "renamed");
}

#[test]
fn action_translation_reaches_the_store() {
    let store = make_store();
    let view: ViewStore<i32, i32> =
        ViewStore::deduped(&store, |state| state.count, AppAction::SetCount);

    view.send(5);
    assert_eq!(store.state().count, 5);
    assert_eq!(view.state(), 5);
}

#[test]
fn default_structural_dedup_matches_explicit_equality() {
    let updates = [0, 1, 1, 2, 0, 0];

    let run = |view: ViewStore<i32, AppAction>, store: &Store<AppState, AppAction>| {
        let delivered = Rc::new(RefCell::new(Vec::new()));
        let seen = Rc::clone(&delivered);
        let _sub = view.observe(move |state| seen.borrow_mut().push(*state));
        for value in updates {
            store.send(AppAction::SetCount(value));
        }
        let result = delivered.borrow().clone();
        result
    };

    let store_a = make_store();
    let defaulted = run(count_view(&store_a), &store_a);

    let store_b = make_store();
    let explicit = run(
        ViewStore::scoped(
            &store_b,
            |state| state.count,
            |action| action,
            |a: &i32, b: &i32| a == b,
        ),
        &store_b,
    );

    assert_eq!(defaulted, explicit);
    assert_eq!(defaulted, vec![1, 2, 0]);
}

#[test]
fn dropped_observer_stops_notifications() {
    let store = make_store();
    let view = count_view(&store);
    let renders = Rc::new(Cell::new(0u32));
    let seen = Rc::clone(&renders);
    let sub = view.observe(move |_| seen.set(seen.get() + 1));

    store.send(AppAction::SetCount(1));
    drop(sub);
    store.send(AppAction::SetCount(2));
    assert_eq!(renders.get(), 1);
}

#[test]
fn state_is_the_last_delivered_value() {
    let store = make_store();
    // A predicate that treats everything as duplicate: nothing is ever
    // delivered after the initial projection.
    let view: ViewStore<i32, AppAction> =
        ViewStore::scoped(&store, |state| state.count, |action| action, |_, _| true);

    store.send(AppAction::SetCount(5));
    assert_eq!(store.state().count, 5);
    assert_eq!(view.state(), 0);
}

#[test]
fn cloned_view_store_shares_delivery() {
    let store = make_store();
    let view = count_view(&store);
    let twin = view.clone();

    store.send(AppAction::SetCount(3));
    assert_eq!(view.state(), 3);
    assert_eq!(twin.state(), 3);
}
