use super::*;
use std::cell::Cell;

#[test]
fn fire_reaches_every_listener() {
    let emitter = Emitter::<u32>::new();
    let seen = Rc::new(RefCell::new(Vec::new()));

    let a = {
        let seen = Rc::clone(&seen);
        emitter.subscribe(move |v| seen.borrow_mut().push(("a", *v)))
    };
    let b = {
        let seen = Rc::clone(&seen);
        emitter.subscribe(move |v| seen.borrow_mut().push(("b", *v)))
    };

    emitter.fire(&7);
    assert_eq!(*seen.borrow(), vec![("a", 7), ("b", 7)]);
    drop((a, b));
}

#[test]
fn dropping_subscription_unsubscribes() {
    let emitter = Emitter::<()>::new();
    let hits = Rc::new(Cell::new(0));
    let sub = {
        let hits = Rc::clone(&hits);
        emitter.subscribe(move |_| hits.set(hits.get() + 1))
    };

    emitter.fire(&());
    drop(sub);
    emitter.fire(&());

    assert_eq!(hits.get(), 1);
    assert_eq!(emitter.listener_count(), 0);
}

#[test]
fn detached_subscription_stays_registered() {
    let emitter = Emitter::<()>::new();
    let hits = Rc::new(Cell::new(0));
    {
        let hits = Rc::clone(&hits);
        emitter.subscribe(move |_| hits.set(hits.get() + 1)).detach();
    }

    emitter.fire(&());
    emitter.fire(&());
    assert_eq!(hits.get(), 2);
}

#[test]
fn listener_may_unsubscribe_itself_while_firing() {
    let emitter = Rc::new(Emitter::<()>::new());
    let slot: Rc<RefCell<Option<Subscription>>> = Rc::new(RefCell::new(None));
    let hits = Rc::new(Cell::new(0));

    let sub = {
        let slot = Rc::clone(&slot);
        let hits = Rc::clone(&hits);
        emitter.subscribe(move |_| {
            hits.set(hits.get() + 1);
            slot.borrow_mut().take();
        })
    };
    *slot.borrow_mut() = Some(sub);

    emitter.fire(&());
    emitter.fire(&());
    assert_eq!(hits.get(), 1);
}

#[test]
fn subscription_outliving_emitter_is_inert() {
    let emitter = Emitter::<()>::new();
    let sub = emitter.subscribe(|_| {});
    drop(emitter);
    sub.dispose();
}
