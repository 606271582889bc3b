//! Dispatcher behavior against a scripted transport
//!
//! Time-dependent tests run on a paused clock, so rate-limit pauses and
//! simulated latency complete instantly while `Instant` still observes them.

mod common;

use assert_matches::assert_matches;
use common::{Outcome, ScriptedTransport, dispatcher, test_token};
use pretty_assertions::assert_eq;
use rstest::rstest;
use serde_json::json;
use spacetraders::{Dispatcher, Error, RetryPolicy, Route, TransportError};
use std::sync::Arc;
use std::time::Duration;
use tokio::time::Instant;

fn status_route() -> Route {
    Route::get("https://api.spacetraders.io/game/status").unwrap()
}

fn ok() -> Outcome {
    Outcome::json(200, json!({"status": "spacetraders is currently online"}))
}

#[tokio::test]
async fn test_success_returns_parsed_body() {
    let transport = ScriptedTransport::new([ok()]);
    let dispatcher = dispatcher(transport.clone(), 5);

    let value = dispatcher.dispatch(&status_route()).await.unwrap();

    assert_eq!(value["status"], "spacetraders is currently online");
    assert_eq!(transport.calls(), 1);
}

#[tokio::test]
async fn test_bearer_token_is_attached() {
    let transport = ScriptedTransport::new([ok()]);
    let dispatcher = dispatcher(transport.clone(), 5);

    dispatcher.dispatch(&status_route()).await.unwrap();

    let requests = transport.requests();
    assert_eq!(
        requests[0].headers.get("Authorization").cloned(),
        Some(format!("Bearer {}", test_token()))
    );
}

#[tokio::test]
async fn test_timeouts_exhaust_retry_limit() {
    let transport = ScriptedTransport::always(Outcome::Timeout);
    let dispatcher = dispatcher(transport.clone(), 3);

    let err = dispatcher.dispatch(&status_route()).await.unwrap_err();

    assert_matches!(err, Error::ReachedMaximumRetries { max_retries: 3 });
    assert_eq!(err.to_string(), "Hit maximum retries: 3");
    assert_eq!(transport.calls(), 3);
}

#[tokio::test]
async fn test_timeouts_then_success() {
    let transport = ScriptedTransport::new([Outcome::Timeout, Outcome::Timeout, ok()]);
    let dispatcher = dispatcher(transport.clone(), 5);

    let value = dispatcher.dispatch(&status_route()).await.unwrap();

    assert!(value["status"].is_string());
    assert_eq!(transport.calls(), 3);
}

#[tokio::test]
async fn test_replayed_attempts_are_identical() {
    let transport = ScriptedTransport::new([Outcome::Timeout, ok()]);
    let dispatcher = dispatcher(transport.clone(), 5);
    let route = Route::post("https://api.spacetraders.io/my/sell-orders")
        .unwrap()
        .query("shipId", "ship-1")
        .query("good", "FUEL")
        .query("quantity", 5);

    dispatcher.dispatch(&route).await.unwrap();

    let requests = transport.requests();
    assert_eq!(requests.len(), 2);
    assert_eq!(requests[0].url, requests[1].url);
    assert_eq!(requests[0].method, requests[1].method);
    assert_eq!(requests[0].query, requests[1].query);
    assert_eq!(requests[0].headers, requests[1].headers);
}

#[tokio::test]
async fn test_zero_retries_never_sends() {
    let transport = ScriptedTransport::always(ok());
    let dispatcher = dispatcher(transport.clone(), 0);

    let err = dispatcher.dispatch(&status_route()).await.unwrap_err();

    assert_matches!(err, Error::ReachedMaximumRetries { max_retries: 0 });
    assert_eq!(transport.calls(), 0);
}

#[tokio::test]
async fn test_zero_route_timeout_fails_before_sending() {
    let transport = ScriptedTransport::always(ok());
    let dispatcher = dispatcher(transport.clone(), 5);
    let route = status_route().timeout(Duration::ZERO);

    let err = dispatcher.dispatch(&route).await.unwrap_err();

    assert_matches!(err, Error::Construction(_));
    assert_eq!(transport.calls(), 0);
}

#[tokio::test]
async fn test_unauthorized_fails_without_retry() {
    let transport = ScriptedTransport::always(Outcome::json(
        401,
        json!({"error": {"code": 40101, "message": "Token was invalid or missing"}}),
    ));
    let dispatcher = dispatcher(transport.clone(), 5);

    let err = dispatcher.dispatch(&status_route()).await.unwrap_err();

    assert_matches!(
        &err,
        Error::Http { code, message }
            if code == "40101" && message == "Token was invalid or missing"
    );
    assert_eq!(err.to_string(), "Code 40101: Token was invalid or missing");
    assert_eq!(transport.calls(), 1);
}

#[tokio::test]
async fn test_unauthorized_without_envelope_uses_defaults() {
    let transport = ScriptedTransport::always(Outcome::raw(401, "<html>denied</html>"));
    let dispatcher = dispatcher(transport.clone(), 5);

    let err = dispatcher.dispatch(&status_route()).await.unwrap_err();

    assert_eq!(err.to_string(), "Code Unknown: Unknown Error");
    assert_eq!(transport.calls(), 1);
}

#[tokio::test]
async fn test_service_unavailable_fails_fast_by_default() {
    let transport = ScriptedTransport::always(Outcome::raw(503, ""));
    let dispatcher = dispatcher(transport.clone(), 5);

    let err = dispatcher.dispatch(&status_route()).await.unwrap_err();

    assert_eq!(err.code(), Some("503"));
    assert!(err.is_transient());
    assert_eq!(transport.calls(), 1);
}

#[tokio::test]
async fn test_service_unavailable_retried_when_enabled() {
    let policy = RetryPolicy::builder()
        .max_retries(3)
        .retry_on_unavailable(true)
        .build();

    let transport = ScriptedTransport::new([Outcome::raw(503, ""), ok()]);
    let recovering = Dispatcher::builder()
        .token(test_token())
        .transport(transport.clone())
        .retry_policy(policy.clone())
        .build()
        .unwrap();
    assert!(recovering.dispatch(&status_route()).await.is_ok());
    assert_eq!(transport.calls(), 2);

    let transport = ScriptedTransport::always(Outcome::raw(503, ""));
    let exhausted = Dispatcher::builder()
        .token(test_token())
        .transport(transport.clone())
        .retry_policy(policy)
        .build()
        .unwrap();
    assert_matches!(
        exhausted.dispatch(&status_route()).await,
        Err(Error::ReachedMaximumRetries { max_retries: 3 })
    );
    assert_eq!(transport.calls(), 3);
}

#[rstest]
#[case(200)]
#[case(201)]
#[case(400)]
#[case(404)]
#[case(409)]
#[case(422)]
#[case(500)]
#[tokio::test]
async fn test_other_statuses_return_body(#[case] status: u16) {
    let body = json!({"error": {"code": status, "message": "details"}});
    let transport = ScriptedTransport::always(Outcome::json(status, body.clone()));
    let dispatcher = dispatcher(transport.clone(), 5);

    for _ in 0..2 {
        assert_eq!(dispatcher.dispatch(&status_route()).await.unwrap(), body);
    }
    assert_eq!(transport.calls(), 2);
}

#[tokio::test]
async fn test_malformed_body_is_an_http_error() {
    let transport = ScriptedTransport::always(Outcome::raw(200, "not json"));
    let dispatcher = dispatcher(transport.clone(), 5);

    let err = dispatcher.dispatch(&status_route()).await.unwrap_err();

    assert_eq!(err.code(), Some("200"));
    assert_eq!(transport.calls(), 1);
}

#[tokio::test]
async fn test_connection_failure_is_terminal_and_releases_lock() {
    let transport = ScriptedTransport::new([Outcome::Refused, ok()]);
    let dispatcher = dispatcher(transport.clone(), 5);

    let err = dispatcher.dispatch(&status_route()).await.unwrap_err();
    assert_matches!(err, Error::Transport(TransportError::Connection(_)));
    assert_eq!(transport.calls(), 1);

    assert!(dispatcher.dispatch(&status_route()).await.is_ok());
    assert_eq!(transport.calls(), 2);
}

#[tokio::test]
async fn test_route_timeout_and_override() {
    let transport = ScriptedTransport::always(ok());
    let plain = dispatcher(transport.clone(), 5);
    plain.dispatch(&status_route()).await.unwrap();
    plain
        .dispatch(&status_route().timeout(Duration::from_secs(12)))
        .await
        .unwrap();

    let overriding = Dispatcher::builder()
        .token(test_token())
        .transport(transport.clone())
        .timeout(Duration::from_secs(1))
        .build()
        .unwrap();
    overriding
        .dispatch(&status_route().timeout(Duration::from_secs(12)))
        .await
        .unwrap();

    let timeouts: Vec<_> = transport.requests().iter().map(|r| r.timeout).collect();
    assert_eq!(
        timeouts,
        vec![
            Some(Duration::from_secs(5)),
            Some(Duration::from_secs(12)),
            Some(Duration::from_secs(1)),
        ]
    );
}

#[tokio::test(start_paused = true)]
async fn test_backoff_between_attempts() {
    let transport = ScriptedTransport::always(Outcome::Timeout);
    let dispatcher = Dispatcher::builder()
        .token(test_token())
        .transport(transport.clone())
        .retry_policy(
            RetryPolicy::builder()
                .max_retries(3)
                .backoff(Duration::from_secs(1))
                .build(),
        )
        .build()
        .unwrap();

    let start = Instant::now();
    let result = dispatcher.dispatch(&status_route()).await;

    assert_matches!(result, Err(Error::ReachedMaximumRetries { .. }));
    assert!(start.elapsed() >= Duration::from_secs(2));
    assert!(start.elapsed() < Duration::from_secs(3));
}

#[tokio::test(start_paused = true)]
async fn test_exhausted_rate_limit_pauses_before_returning() {
    let transport = ScriptedTransport::new([Outcome::with_headers(
        200,
        &[("x-ratelimit-remaining", "0"), ("Retry-After", "2.5")],
        json!({"ok": true}),
    )]);
    let dispatcher = dispatcher(transport.clone(), 5);

    let start = Instant::now();
    let value = dispatcher.dispatch(&status_route()).await.unwrap();

    assert_eq!(value["ok"], true);
    assert!(start.elapsed() >= Duration::from_millis(2500));
}

#[tokio::test(start_paused = true)]
async fn test_remaining_budget_does_not_pause() {
    let transport = ScriptedTransport::always(Outcome::with_headers(
        200,
        &[("x-ratelimit-remaining", "1"), ("Retry-After", "30")],
        json!({}),
    ));
    let dispatcher = dispatcher(transport.clone(), 5);

    let start = Instant::now();
    dispatcher.dispatch(&status_route()).await.unwrap();

    assert!(start.elapsed() < Duration::from_secs(1));
}

#[tokio::test(start_paused = true)]
async fn test_rate_limit_pause_holds_queued_callers() {
    let transport = ScriptedTransport::new([
        Outcome::with_headers(
            200,
            &[("x-ratelimit-remaining", "0"), ("Retry-After", "2.5")],
            json!({"first": true}),
        ),
        ok(),
    ]);
    let dispatcher = dispatcher(transport.clone(), 5);
    let route = status_route();

    let (dispatcher, route) = (&dispatcher, &route);
    let start = Instant::now();
    let timed = move || async move {
        let result = dispatcher.dispatch(route).await;
        (result, start.elapsed())
    };
    let ((first, first_elapsed), (second, second_elapsed)) = tokio::join!(timed(), timed());

    assert!(first.is_ok());
    assert!(second.is_ok());
    assert!(first_elapsed >= Duration::from_millis(2500));
    assert!(second_elapsed >= Duration::from_millis(2500));
    assert_eq!(transport.max_in_flight(), 1);
}

#[tokio::test(start_paused = true)]
async fn test_concurrent_dispatches_never_overlap() {
    let transport = ScriptedTransport::always_with_latency(ok(), Duration::from_millis(100));
    let dispatcher = Arc::new(dispatcher(transport.clone(), 5));

    let handles: Vec<_> = (0..5)
        .map(|_| {
            let dispatcher = dispatcher.clone();
            tokio::spawn(async move { dispatcher.dispatch(&status_route()).await })
        })
        .collect();

    for handle in handles {
        assert!(handle.await.unwrap().is_ok());
    }

    assert_eq!(transport.calls(), 5);
    assert_eq!(transport.max_in_flight(), 1);
}

#[tokio::test(start_paused = true)]
async fn test_waiters_are_served_in_arrival_order() {
    let transport = ScriptedTransport::always_with_latency(ok(), Duration::from_millis(10));
    let dispatcher = Arc::new(dispatcher(transport.clone(), 5));

    let mut handles = Vec::new();
    for i in 0..4 {
        let dispatcher = dispatcher.clone();
        handles.push(tokio::spawn(async move {
            let route = status_route().query("n", i);
            dispatcher.dispatch(&route).await
        }));
        tokio::task::yield_now().await;
    }
    for handle in handles {
        handle.await.unwrap().unwrap();
    }

    let order: Vec<String> = transport
        .requests()
        .iter()
        .map(|r| r.query[0].1.clone())
        .collect();
    assert_eq!(order, vec!["0", "1", "2", "3"]);
}

#[tokio::test(start_paused = true)]
async fn test_cancelled_waiter_does_not_send() {
    let transport = ScriptedTransport::always_with_latency(ok(), Duration::from_secs(1));
    let dispatcher = Arc::new(dispatcher(transport.clone(), 5));

    let holder = {
        let dispatcher = dispatcher.clone();
        tokio::spawn(async move { dispatcher.dispatch(&status_route()).await })
    };
    tokio::task::yield_now().await;

    let queued =
        tokio::time::timeout(Duration::from_millis(100), dispatcher.dispatch(&status_route())).await;
    assert!(queued.is_err());

    assert!(holder.await.unwrap().is_ok());
    assert!(dispatcher.dispatch(&status_route()).await.is_ok());
    assert_eq!(transport.calls(), 2);
}

#[tokio::test(start_paused = true)]
async fn test_shutdown_waits_for_in_flight_exchange() {
    let transport = ScriptedTransport::always_with_latency(ok(), Duration::from_secs(1));
    let dispatcher = Arc::new(dispatcher(transport.clone(), 5));

    let in_flight = {
        let dispatcher = dispatcher.clone();
        tokio::spawn(async move { dispatcher.dispatch(&status_route()).await })
    };
    tokio::task::yield_now().await;

    dispatcher.shutdown().await.unwrap();

    assert!(transport.is_closed());
    assert!(in_flight.await.unwrap().is_ok());
    assert_matches!(
        dispatcher.dispatch(&status_route()).await,
        Err(Error::Closed)
    );
    assert_eq!(transport.calls(), 1);

    dispatcher.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_shared_lock_serializes_two_dispatchers() {
    let lock = Arc::new(tokio::sync::Mutex::new(()));
    let transport = ScriptedTransport::always_with_latency(ok(), Duration::from_millis(20));

    let build = || {
        Dispatcher::builder()
            .token(test_token())
            .transport(transport.clone())
            .lock(lock.clone())
            .build()
            .unwrap()
    };
    let (a, b) = (build(), build());

    let (route_a, route_b) = (status_route(), status_route());
    let (ra, rb) = tokio::join!(a.dispatch(&route_a), b.dispatch(&route_b));

    assert!(ra.is_ok() && rb.is_ok());
    assert_eq!(transport.max_in_flight(), 1);
}

#[tokio::test]
async fn test_dispatch_as_maps_body() {
    #[derive(serde::Deserialize)]
    struct Status {
        status: String,
    }

    let transport = ScriptedTransport::always(ok());
    let dispatcher = dispatcher(transport, 5);

    let status: Status = dispatcher.dispatch_as(&status_route()).await.unwrap();
    assert_eq!(status.status, "spacetraders is currently online");

    let err = dispatcher
        .dispatch_as::<Vec<u32>>(&status_route())
        .await
        .unwrap_err();
    assert_matches!(err, Error::Serialization(_));
}
