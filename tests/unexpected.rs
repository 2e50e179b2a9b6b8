use error_relay::{Attach, Context, ContextActivator, ExecContext, ScopeExit};
use std::any::type_name;

#[derive(Debug, Clone, PartialEq)]
struct Orphan(&'static str);

#[derive(Debug, Clone, PartialEq)]
struct OtherOrphan(u32);

#[test]
fn counting_is_always_on() {
    let cx = ExecContext::new();

    cx.new_error().attach(&cx, Orphan("one"));
    cx.new_error().attach(&cx, Orphan("two"));

    let report = cx.unexpected_report();
    assert_eq!(report.count(), 2);
    assert_eq!(report.first_type(), Some(type_name::<Orphan>()));
    assert!(report.entries().is_empty(), "details collected without opt-in");
}

#[test]
fn first_type_tracks_the_earliest_arrival() {
    let cx = ExecContext::new();

    cx.new_error().attach(&cx, OtherOrphan(1));
    cx.new_error().attach(&cx, Orphan("late"));

    assert_eq!(
        cx.unexpected_report().first_type(),
        Some(type_name::<OtherOrphan>())
    );
}

#[test]
fn detail_collection_renders_one_entry_per_type() {
    let cx = ExecContext::new();
    cx.set_collect_unexpected(true);

    cx.new_error().attach(&cx, Orphan("first"));
    cx.new_error().attach(&cx, Orphan("second"));
    cx.new_error().attach(&cx, OtherOrphan(9));

    let report = cx.unexpected_report();
    assert_eq!(report.count(), 3);
    assert_eq!(report.entries().len(), 2);
    assert_eq!(report.entries()[0].type_name(), type_name::<Orphan>());
    assert_eq!(report.entries()[0].rendered(), "Orphan(\"first\")");
    assert_eq!(report.entries()[1].type_name(), type_name::<OtherOrphan>());
    assert_eq!(report.entries()[1].rendered(), "OtherOrphan(9)");
}

#[test]
fn take_returns_and_resets_the_accounting() {
    let cx = ExecContext::new();
    cx.set_collect_unexpected(true);

    cx.new_error().attach(&cx, Orphan("gone"));
    let report = cx.take_unexpected_report();
    assert_eq!(report.count(), 1);

    let after = cx.unexpected_report();
    assert!(after.is_empty());
    assert_eq!(after.first_type(), None);
    assert!(after.entries().is_empty());

    // A fresh arrival of a previously seen type is rendered again.
    cx.new_error().attach(&cx, Orphan("back"));
    assert_eq!(cx.unexpected_report().entries().len(), 1);
}

#[test]
fn display_wording_scales_with_the_count() {
    let cx = ExecContext::new();

    assert_eq!(cx.unexpected_report().to_string(), "no unexpected diagnostics");

    cx.new_error().attach(&cx, Orphan("solo"));
    let one = cx.unexpected_report().to_string();
    assert!(one.starts_with("detected 1 attempt"));
    assert!(one.contains("Orphan"));

    cx.new_error().attach(&cx, Orphan("again"));
    let two = cx.unexpected_report().to_string();
    assert!(two.starts_with("detected 2 attempts"));
    assert!(two.contains("the first one of type"));
}

#[test]
fn display_appends_collected_entries() {
    let cx = ExecContext::new();
    cx.set_collect_unexpected(true);

    cx.new_error().attach(&cx, Orphan("rendered"));
    let text = cx.unexpected_report().to_string();
    assert!(text.contains("Orphan(\"rendered\")"));
}

#[test]
fn blocked_propagation_feeds_the_same_accounting() {
    let cx = ExecContext::new();
    cx.set_collect_unexpected(true);

    let outer: Context<(Orphan,)> = Context::new();
    let outer_guard = ContextActivator::new(&cx, &outer);
    let occupied = cx.new_error_with(Attach(Orphan("keeper")));

    {
        let inner: Context<(Orphan,)> = Context::new();
        let guard = ContextActivator::new(&cx, &inner);
        let _ = cx.new_error_with(Attach(Orphan("blocked")));
        guard.finish(ScopeExit::Failure);
    }

    drop(outer_guard);
    assert_eq!(outer.slots().0.get(occupied), Some(Orphan("keeper")));

    let report = cx.unexpected_report();
    assert_eq!(report.count(), 1);
    assert_eq!(report.entries()[0].rendered(), "Orphan(\"blocked\")");
}
