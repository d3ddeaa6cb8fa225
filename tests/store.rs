use std::cell::Cell;
use std::rc::Rc;

use storeview::{Reducer, Store};

#[derive(Clone)]
enum CounterAction {
    Set(i32),
    Increment,
}

struct CounterReducer;

impl Reducer for CounterReducer {
    type State = i32;
    type Action = CounterAction;

    fn reduce(state: i32, action: CounterAction) -> i32 {
        match action {
            CounterAction::Set(value) => value,
            CounterAction::Increment => state + 1,
        }
    }
}

fn make_store() -> Store<i32, CounterAction> {
    Store::from_reducer::<CounterReducer>(0)
}

#[test]
fn initial_state_is_visible() {
    let store = make_store();
    assert_eq!(store.state(), 0);
}

#[test]
fn send_runs_the_reducer() {
    let store = make_store();
    store.send(CounterAction::Increment);
    store.send(CounterAction::Increment);
    assert_eq!(store.state(), 2);
}

#[test]
fn send_replaces_state() {
    let store = make_store();
    store.send(CounterAction::Set(7));
    assert_eq!(store.state(), 7);
}

#[test]
fn closure_store_behaves_like_reducer_store() {
    let store = Store::new(0i32, CounterReducer::reduce);
    store.send(CounterAction::Set(3));
    store.send(CounterAction::Increment);
    assert_eq!(store.state(), 4);
}

#[test]
fn subscribers_see_every_dispatch_even_without_change() {
    let store = make_store();
    let calls = Rc::new(Cell::new(0u32));
    let seen = Rc::clone(&calls);
    let _sub = store.subscribe(move |_| seen.set(seen.get() + 1));

    // The store does not deduplicate; that is the view store's job.
    store.send(CounterAction::Set(0));
    store.send(CounterAction::Set(0));
    assert_eq!(calls.get(), 2);
}

#[test]
fn subscriber_receives_the_new_state() {
    let store = make_store();
    let last = Rc::new(Cell::new(-1));
    let seen = Rc::clone(&last);
    let _sub = store.subscribe(move |state| seen.set(*state));

    store.send(CounterAction::Set(42));
    assert_eq!(last.get(), 42);
}

#[test]
fn dropped_subscription_stops_notifications() {
    let store = make_store();
    let calls = Rc::new(Cell::new(0u32));
    let seen = Rc::clone(&calls);
    let sub = store.subscribe(move |_| seen.set(seen.get() + 1));

    store.send(CounterAction::Increment);
    drop(sub);
    store.send(CounterAction::Increment);
    assert_eq!(calls.get(), 1);
}

#[test]
fn cancel_stops_notifications() {
    let store = make_store();
    let calls = Rc::new(Cell::new(0u32));
    let seen = Rc::clone(&calls);
    let sub = store.subscribe(move |_| seen.set(seen.get() + 1));

    sub.cancel();
    store.send(CounterAction::Increment);
    assert_eq!(calls.get(), 0);
}

#[test]
fn cloned_store_shares_state() {
    let store = make_store();
    let handle = store.clone();
    handle.send(CounterAction::Set(9));
    assert_eq!(store.state(), 9);
}

#[test]
fn multiple_subscribers_all_notified() {
    let store = make_store();
    let first = Rc::new(Cell::new(0u32));
    let second = Rc::new(Cell::new(0u32));
    let seen_first = Rc::clone(&first);
    let seen_second = Rc::clone(&second);
    let _a = store.subscribe(move |_| seen_first.set(seen_first.get() + 1));
    let _b = store.subscribe(move |_| seen_second.set(seen_second.get() + 1));

    store.send(CounterAction::Increment);
    assert_eq!(first.get(), 1);
    assert_eq!(second.get(), 1);
}
