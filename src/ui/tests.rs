use super::*;
use crate::orientation::CaptureOrientation;
use std::time::Duration;

#[tokio::test]
async fn test_jobs_run_in_dispatch_order() {
    let (context, _handle) = UiContext::spawn(Vec::<u32>::new());

    for i in 0..5 {
        assert!(context.dispatch(move |log: &mut Vec<u32>| log.push(i)));
    }

    let log = context.query(|log| log.clone()).await.unwrap();
    assert_eq!(log, vec![0, 1, 2, 3, 4]);
}

#[tokio::test]
async fn test_loop_returns_state_once_strong_handles_drop() {
    let (context, handle) = UiContext::spawn(Vec::<u32>::new());
    let weak = context.downgrade();

    context.dispatch(|log| log.push(7));
    drop(context);

    let state = handle.await.unwrap();
    assert_eq!(state, vec![7]);
    assert!(weak.upgrade().is_none());
    assert!(!weak.dispatch(|log| log.push(8)));
}

#[tokio::test(start_paused = true)]
async fn test_delayed_job_waits_for_its_deadline() {
    let (context, _handle) = UiContext::spawn(Vec::<u32>::new());

    context.dispatch_after(Duration::from_secs(2), |log| log.push(1));

    tokio::time::sleep(Duration::from_millis(1999)).await;
    assert!(context.query(|log| log.clone()).await.unwrap().is_empty());

    tokio::time::sleep(Duration::from_millis(2)).await;
    assert_eq!(context.query(|log| log.clone()).await.unwrap(), vec![1]);
}

#[tokio::test(start_paused = true)]
async fn test_shutdown_cancels_pending_timers() {
    let (context, _handle) = UiContext::spawn(Vec::<u32>::new());

    context.dispatch_after(Duration::from_secs(1), |log| log.push(1));
    context.shutdown();

    tokio::time::sleep(Duration::from_secs(2)).await;
    assert!(context.query(|log| log.clone()).await.unwrap().is_empty());
}

#[tokio::test(start_paused = true)]
async fn test_pending_timer_does_not_keep_context_alive() {
    let (context, handle) = UiContext::spawn(Vec::<u32>::new());

    context.dispatch_after(Duration::from_secs(2), |log| log.push(1));
    drop(context);

    let state = handle.await.unwrap();
    assert!(state.is_empty());
}

#[test]
fn test_logging_surface_records_updates() {
    let mut surface = LoggingSurface::new(Rect::new(0.0, 0.0, 320.0, 480.0));
    let record = surface.record();

    surface.set_text_prompt("hello");
    surface.set_controls_enabled(ControlEnablement::uniform(true));
    surface.set_preview_orientation(CaptureOrientation::LandscapeLeft);

    let record = record.lock();
    assert_eq!(record.text_prompt, "hello");
    assert!(record.enablement.all_enabled());
    assert_eq!(record.enablement_writes, 1);
    assert_eq!(
        record.preview_orientation,
        Some(CaptureOrientation::LandscapeLeft)
    );
    assert!(surface.preview_supports_orientation());
}
