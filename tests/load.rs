use error_relay::{Accum, Attach, Context, ContextActivator, ErrorId, ExecContext, Lazy};
use std::cell::Cell;

#[derive(Debug, Clone, Default, PartialEq)]
struct Steps(Vec<&'static str>);

#[test]
fn current_error_load_reads_back_the_same_identifier() {
    let cx = ExecContext::new();
    let ctx: Context<(u32,)> = Context::new();
    let guard = ContextActivator::new(&cx, &ctx);

    let minted = cx.new_error();
    let loaded = cx.current_error().load(&cx, Attach(9u32));

    assert_eq!(loaded, minted);
    assert_eq!(cx.current_error(), minted);
    drop(guard);
    assert_eq!(ctx.slots().0.get(minted), Some(9));
}

#[test]
fn load_on_the_no_error_identifier_is_a_no_op() {
    let cx = ExecContext::new();
    let ctx: Context<(u32,)> = Context::new();
    let guard = ContextActivator::new(&cx, &ctx);

    let invoked = Cell::new(false);
    let id = ErrorId::NONE.load(
        &cx,
        Lazy(|| {
            invoked.set(true);
            1u32
        }),
    );

    assert!(id.is_none());
    assert!(!invoked.get(), "producer ran on the success path");
    drop(guard);
    assert!(cx.unexpected_report().is_empty());
}

#[test]
fn accumulate_on_the_no_error_identifier_is_a_no_op() {
    let cx = ExecContext::new();
    let ctx: Context<(Steps,)> = Context::new();
    let _guard = ContextActivator::new(&cx, &ctx);

    let invoked = Cell::new(false);
    let id = ErrorId::NONE.accumulate(&cx, |_: &mut Steps| invoked.set(true));

    assert!(id.is_none());
    assert!(!invoked.get());
}

#[test]
fn lazy_producer_runs_once_for_a_real_error() {
    let cx = ExecContext::new();
    let ctx: Context<(String,)> = Context::new();
    let guard = ContextActivator::new(&cx, &ctx);

    let runs = Cell::new(0u32);
    let id = cx.new_error_with(Lazy(|| {
        runs.set(runs.get() + 1);
        String::from("deferred")
    }));

    assert_eq!(runs.get(), 1);
    drop(guard);
    assert_eq!(ctx.slots().0.get(id), Some(String::from("deferred")));
}

#[test]
fn three_accumulations_produce_one_stored_value() {
    let cx = ExecContext::new();
    let ctx: Context<(Steps,)> = Context::new();
    let guard = ContextActivator::new(&cx, &ctx);

    let id = cx.new_error();
    id.accumulate(&cx, |s: &mut Steps| s.0.push("open"));
    id.load(&cx, Accum(|s: &mut Steps| s.0.push("read")));
    id.accumulate(&cx, |s: &mut Steps| s.0.push("parse"));

    drop(guard);
    assert_eq!(
        ctx.slots().0.get(id),
        Some(Steps(vec!["open", "read", "parse"]))
    );
}

#[test]
fn batch_items_apply_in_the_order_given() {
    let cx = ExecContext::new();
    let ctx: Context<(u8,)> = Context::new();
    let guard = ContextActivator::new(&cx, &ctx);

    let id = cx.new_error_with((Attach(1u8), Accum(|n: &mut u8| *n += 1)));

    drop(guard);
    assert_eq!(ctx.slots().0.get(id), Some(2));
}

#[test]
fn batch_spanning_types_fills_each_listening_slot() {
    let cx = ExecContext::new();
    let ctx: Context<(u32, &'static str, Steps)> = Context::new();
    let guard = ContextActivator::new(&cx, &ctx);

    let id = cx.new_error_with((
        Attach(503u32),
        Attach("upstream timed out"),
        Accum(|s: &mut Steps| s.0.push("retry")),
    ));

    drop(guard);
    assert_eq!(ctx.slots().0.get(id), Some(503));
    assert_eq!(ctx.slots().1.get(id), Some("upstream timed out"));
    assert_eq!(ctx.slots().2.get(id), Some(Steps(vec!["retry"])));
}

#[test]
fn attach_with_defers_like_lazy() {
    let cx = ExecContext::new();
    let ctx: Context<(u64,)> = Context::new();
    let guard = ContextActivator::new(&cx, &ctx);

    let id = cx.new_error().attach_with(&cx, || 77u64);

    drop(guard);
    assert_eq!(ctx.slots().0.get(id), Some(77));
}

#[test]
fn attached_value_with_no_listener_counts_as_unexpected() {
    let cx = ExecContext::new();

    let id = cx.new_error().attach(&cx, 42i64);
    assert!(!id.is_none());

    let report = cx.unexpected_report();
    assert_eq!(report.count(), 1);
    assert_eq!(report.first_type(), Some(std::any::type_name::<i64>()));
}

#[test]
fn accumulator_with_no_listener_is_dropped_silently() {
    let cx = ExecContext::new();

    let invoked = Cell::new(false);
    cx.new_error().accumulate(&cx, |_: &mut Steps| invoked.set(true));

    assert!(!invoked.get());
    assert!(cx.unexpected_report().is_empty());
}

#[test]
fn load_targets_the_innermost_active_slot() {
    let cx = ExecContext::new();
    let outer: Context<(u32,)> = Context::new();
    let outer_guard = ContextActivator::new(&cx, &outer);
    let inner: Context<(u32,)> = Context::new();
    let inner_guard = ContextActivator::new(&cx, &inner);

    let id = cx.new_error_with(Attach(11u32));

    drop(inner_guard); // normal exit keeps the value where it was written
    drop(outer_guard);

    assert_eq!(inner.slots().0.get(id), Some(11));
    assert!(!outer.slots().0.has_value(id));
}
