use error_relay::{new_error, source_location, Attach, Context, ContextActivator, ExecContext};
use error_relay::SourceLocation;

#[test]
fn source_location_captures_this_file() {
    let loc = source_location!();
    assert!(loc.file.ends_with("macros.rs"));
    assert!(loc.line > 0);
    assert_eq!(loc.module, "macros");
}

#[test]
fn source_location_displays_file_line_and_module() {
    let loc = SourceLocation::new("src/worker.rs", 42, "app::worker");
    assert_eq!(loc.to_string(), "src/worker.rs:42 in app::worker");
}

#[test]
fn new_error_attaches_the_capture_site() {
    let cx = ExecContext::new();
    let ctx: Context<(SourceLocation,)> = Context::new();
    let guard = ContextActivator::new(&cx, &ctx);

    let id = new_error!(&cx);
    assert_eq!(cx.current_error(), id);

    drop(guard);
    let loc = ctx.slots().0.get(id).unwrap();
    assert!(loc.file.ends_with("macros.rs"));
}

#[test]
fn new_error_forwards_additional_items() {
    let cx = ExecContext::new();
    let ctx: Context<(SourceLocation, u32, &'static str)> = Context::new();
    let guard = ContextActivator::new(&cx, &ctx);

    let id = new_error!(&cx, Attach(500u32), Attach("backend down"));

    drop(guard);
    assert!(ctx.slots().0.has_value(id));
    assert_eq!(ctx.slots().1.get(id), Some(500));
    assert_eq!(ctx.slots().2.get(id), Some("backend down"));
}
