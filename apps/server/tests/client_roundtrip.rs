mod common;

use std::sync::Arc;
use std::time::Duration;

use common::{test_config, MASTER_PASSWORD, MASTER_USER};
use eventbite_client::{EventbiteClient, DEFAULT_TIMEOUT};
use eventbite_core::{
    access::{AdminGrant, MasterGrant},
    contributions::{ContributionUpdate, NewContribution},
    directory::{EventUpdate, NewEvent},
    errors::{AdmissionError, Error, ErrorKind},
    goals::{GoalCategory, NewGoal},
    session::{spawn_poller, EventSession, RefreshOutcome, SessionConfig, SessionEvent},
};
use eventbite_server::{api::app_router, build_state};
use tempfile::{tempdir, TempDir};

/// Serves the API on an ephemeral port and returns its base URL.
async fn spawn_server(with_master: bool) -> (String, TempDir) {
    let tmp = tempdir().unwrap();
    let config = test_config(tmp.path(), with_master);
    let state = build_state(&config).await.unwrap();
    let router = app_router(state, &config);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    (format!("http://{addr}"), tmp)
}

fn pledge(goal_id: &str, first: &str, last: &str, quantity: i32) -> NewContribution {
    NewContribution {
        goal_id: goal_id.to_string(),
        first_name: first.to_string(),
        last_name: last.to_string(),
        quantity: Some(quantity.into()),
    }
}

#[tokio::test]
async fn client_maps_server_errors_back_to_core_errors() {
    let (base_url, _tmp) = spawn_server(true).await;
    let client = EventbiteClient::new(&base_url, DEFAULT_TIMEOUT).unwrap();
    assert!(client.healthz().await.unwrap());

    let new_event = NewEvent {
        name: "Picnic".into(),
        event_date: None,
        password: "secret".into(),
    };
    let err = client.create_event(&new_event).await.unwrap_err();
    assert!(matches!(err, Error::Unauthorized(_)));

    let token = client.login_master(MASTER_USER, MASTER_PASSWORD).await.unwrap();
    assert_eq!(token.scope, "master");
    let event = client.create_event(&new_event).await.unwrap();

    let goal = client
        .create_goal(
            &event.id,
            &NewGoal {
                name: "Soda".into(),
                target: Some(10.into()),
                unit: Some("bottles".into()),
                category: Some(GoalCategory::Drinks),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    // Contributions need no token.
    client.logout().await;
    client.add_contribution(&pledge(&goal.id, "Ana", "Ruiz", 6)).await.unwrap();
    let luis = client.add_contribution(&pledge(&goal.id, "Luis", "Paz", 5)).await.unwrap();

    let err = client
        .add_contribution(&pledge(&goal.id, "Marta", "Gil", 1))
        .await
        .unwrap_err();
    assert_eq!(
        err.kind(),
        ErrorKind::CapacityExceeded
    );
    assert!(matches!(
        err,
        Error::Admission(AdmissionError::CapacityExceeded { total: 11, target: 10, .. })
    ));

    let edited = client
        .update_contribution(
            &luis.id,
            &ContributionUpdate {
                first_name: "Luis".into(),
                last_name: "Paz".into(),
                quantity: Some("2".into()),
            },
        )
        .await
        .unwrap();
    assert_eq!(edited.id, luis.id);
    assert_eq!(client.get_goal_progress(&goal.id).await.unwrap().total, 8);

    let err = client
        .add_contribution(&pledge(&goal.id, "Luis", "Paz", 1))
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::DuplicateContributor);

    let err = client.get_event("missing").await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound);

    let err = client
        .update_event(&event.id, &EventUpdate { name: "Brunch".into(), event_date: None })
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Unauthorized);

    client.login_event(&event.id, "secret").await.unwrap();
    let renamed = client
        .update_event(&event.id, &EventUpdate { name: "Brunch".into(), event_date: None })
        .await
        .unwrap();
    assert_eq!(renamed.name, "Brunch");

    let fulfilled = client.set_contribution_fulfilled(&luis.id, true).await.unwrap();
    assert!(fulfilled.fulfilled);
    assert_eq!(client.list_event_contributions(&event.id).await.unwrap().len(), 2);
    client.delete_contribution(&luis.id).await.unwrap();
    client.delete_goal(&goal.id).await.unwrap();
    assert!(client.list_goals(&event.id).await.unwrap().is_empty());

    let reset = client.reset_event(&event.id).await.unwrap();
    assert_eq!(reset.name, "New Event");
    assert_eq!(client.list_events().await.unwrap().len(), 1);
}

#[tokio::test]
async fn session_polls_server_and_celebrates_once() {
    let (base_url, _tmp) = spawn_server(false).await;
    let client = Arc::new(EventbiteClient::new(&base_url, DEFAULT_TIMEOUT).unwrap());

    let event = client
        .create_event(&NewEvent {
            name: "Picnic".into(),
            event_date: None,
            password: "secret".into(),
        })
        .await
        .unwrap();
    let token = client.login_event(&event.id, "secret").await.unwrap();
    assert_eq!(token.scope, format!("event:{}", event.id));
    let goal = client
        .create_goal(
            &event.id,
            &NewGoal {
                name: "Cake".into(),
                target: Some(3.into()),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    let session = Arc::new(EventSession::new(
        event.id.clone(),
        client.clone(),
        SessionConfig {
            poll_interval: Duration::from_millis(50),
            request_timeout: Duration::from_secs(5),
        },
    ));
    session.grant_admin(AdminGrant {
        event_id: event.id.clone(),
    });
    assert!(session.is_admin());
    assert!(!session.is_master());

    let mut events = session.subscribe();
    let poller = spawn_poller(session.clone());

    client.add_contribution(&pledge(&goal.id, "Ana", "Ruiz", 3)).await.unwrap();

    let celebration = tokio::time::timeout(Duration::from_secs(5), async {
        loop {
            if let Ok(SessionEvent::Celebration(c)) = events.recv().await {
                return c;
            }
        }
    })
    .await
    .unwrap();
    assert_eq!(celebration.goal_id, goal.id);
    assert_eq!(celebration.total, 3);
    poller.stop().await;

    // Later polls of the same complete goal stay quiet.
    assert_eq!(
        session.refresh().await.unwrap(),
        RefreshOutcome::Applied(vec![])
    );
    assert!(session.is_celebrated(&goal.id));
    let board = session.board().unwrap();
    assert!(board.goals[0].progress.is_complete);

    session.grant_master(MasterGrant {
        username: "organizer".into(),
    });
    assert!(session.is_master());
    session.logout();
    assert!(!session.is_admin());
}

#[tokio::test]
async fn unreachable_server_publishes_transient_failure() {
    let client = Arc::new(
        EventbiteClient::new("http://127.0.0.1:9", Duration::from_millis(300)).unwrap(),
    );
    let session = EventSession::new("evt", client, SessionConfig::default());
    let mut events = session.subscribe();

    let err = session.refresh().await.unwrap_err();
    assert!(err.is_transient());
    match events.recv().await.unwrap() {
        SessionEvent::RefreshFailed { transient, kind, .. } => {
            assert!(transient);
            assert_eq!(kind, ErrorKind::ConnectivityFailure);
        }
        other => panic!("unexpected event: {other:?}"),
    }
    assert!(session.board().is_none());
}
