use mockito::Matcher;
use serde_json::json;
use uuid::Uuid;

use ridepro_cli::api::ZonesApi;
use ridepro_cli::models::{
    HrZoneConfig, HrZoneSystem, PowerZoneConfig, PowerZoneSystem, TableStatus, ZoneProfileUpdate,
};
use ridepro_cli::session::{SessionState, ZoneChanges, ZonesSession};

const ATHLETE_ID: &str = "6a18b4f1-92ab-4c5e-bd0f-3a8f6f0c2a11";

fn athlete_id() -> Uuid {
    ATHLETE_ID.parse().unwrap()
}

fn zones_body(ftp: Option<u32>, max_hr: Option<u32>, resting_hr: Option<u32>) -> String {
    json!({
        "athlete_id": ATHLETE_ID,
        "profile": { "ftp": ftp, "max_hr": max_hr, "resting_hr": resting_hr },
        "power": { "system": "coggan" },
        "heart_rate": { "system": "standard" },
    })
    .to_string()
}

fn session_for(server: &mockito::ServerGuard) -> ZonesSession {
    ZonesSession::new(ZonesApi::with_base_url(server.url(), "test-token"))
}

#[tokio::test]
async fn test_fetch_computes_tables_and_prompts_for_missing_max_hr() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", format!("/api/v1/athletes/{}/zones", ATHLETE_ID).as_str())
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(zones_body(Some(250), None, None))
        .create_async()
        .await;

    let mut session = session_for(&server);
    session.fetch_zones(athlete_id()).await.unwrap();

    assert_eq!(session.state(), SessionState::Loaded);
    let data = session.data().unwrap();

    match &data.power_table {
        TableStatus::Ready(table) => assert_eq!(table.len(), 7),
        TableStatus::Unavailable(reason) => panic!("power table unavailable: {}", reason),
    }

    // The HR table renders a prompt instead
    match &data.hr_table {
        TableStatus::Unavailable(reason) => assert!(reason.contains("max heart rate")),
        TableStatus::Ready(_) => panic!("hr table should be unavailable without max HR"),
    }

    mock.assert_async().await;
}

#[tokio::test]
async fn test_fetch_failure_preserves_previous_snapshot() {
    let mut server = mockito::Server::new_async().await;
    let path = format!("/api/v1/athletes/{}/zones", ATHLETE_ID);

    server
        .mock("GET", path.as_str())
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(zones_body(Some(250), Some(185), Some(50)))
        .expect(1)
        .create_async()
        .await;

    let mut session = session_for(&server);
    session.fetch_zones(athlete_id()).await.unwrap();
    let snapshot = session.data().unwrap().clone();

    // Swap the endpoint for a server error
    server.reset_async().await;
    server
        .mock("GET", path.as_str())
        .with_status(500)
        .with_body("internal error")
        .create_async()
        .await;

    let result = session.fetch_zones(athlete_id()).await;
    assert!(result.is_err());
    assert_eq!(session.state(), SessionState::Error);

    // Never clears to empty on failure
    assert_eq!(session.data(), Some(&snapshot));
}

#[tokio::test]
async fn test_save_sequence_issues_all_three_writes() {
    let mut server = mockito::Server::new_async().await;

    let profile_mock = server
        .mock(
            "PUT",
            format!("/api/v1/athletes/{}/zones/profile", ATHLETE_ID).as_str(),
        )
        .match_body(Matcher::Json(json!({ "ftp": 300 })))
        .with_status(200)
        .expect(1)
        .create_async()
        .await;

    let power_mock = server
        .mock(
            "PUT",
            format!("/api/v1/athletes/{}/zones/power", ATHLETE_ID).as_str(),
        )
        .match_body(Matcher::Json(json!({ "system": "polarized" })))
        .with_status(200)
        .expect(1)
        .create_async()
        .await;

    let hr_mock = server
        .mock(
            "PUT",
            format!("/api/v1/athletes/{}/zones/heart-rate", ATHLETE_ID).as_str(),
        )
        .match_body(Matcher::Json(json!({ "system": "karvonen" })))
        .with_status(200)
        .expect(1)
        .create_async()
        .await;

    let mut session = session_for(&server);
    let changes = ZoneChanges {
        profile: Some(ZoneProfileUpdate {
            ftp: Some(300),
            ..Default::default()
        }),
        power: Some(PowerZoneConfig::new(PowerZoneSystem::Polarized)),
        heart_rate: Some(HrZoneConfig::new(HrZoneSystem::Karvonen)),
    };

    session.save_changes(athlete_id(), &changes).await.unwrap();
    assert_eq!(session.state(), SessionState::Loaded);

    profile_mock.assert_async().await;
    power_mock.assert_async().await;
    hr_mock.assert_async().await;
}

#[tokio::test]
async fn test_partial_save_failure_rolls_back_earlier_writes() {
    let mut server = mockito::Server::new_async().await;

    // Load a snapshot first so there is something to roll back to
    server
        .mock("GET", format!("/api/v1/athletes/{}/zones", ATHLETE_ID).as_str())
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(zones_body(Some(250), Some(185), None))
        .create_async()
        .await;

    let write_mock = server
        .mock(
            "PUT",
            format!("/api/v1/athletes/{}/zones/profile", ATHLETE_ID).as_str(),
        )
        .match_body(Matcher::Json(json!({ "ftp": 300 })))
        .with_status(200)
        .expect(1)
        .create_async()
        .await;

    // Snapshot values go back out when the sequence fails
    let rollback_mock = server
        .mock(
            "PUT",
            format!("/api/v1/athletes/{}/zones/profile", ATHLETE_ID).as_str(),
        )
        .match_body(Matcher::Json(json!({ "ftp": 250, "max_hr": 185 })))
        .with_status(200)
        .expect(1)
        .create_async()
        .await;

    let power_mock = server
        .mock(
            "PUT",
            format!("/api/v1/athletes/{}/zones/power", ATHLETE_ID).as_str(),
        )
        .with_status(500)
        .with_body("storage unavailable")
        .expect(1)
        .create_async()
        .await;

    let mut session = session_for(&server);
    session.fetch_zones(athlete_id()).await.unwrap();
    let snapshot = session.data().unwrap().clone();

    let changes = ZoneChanges {
        profile: Some(ZoneProfileUpdate {
            ftp: Some(300),
            ..Default::default()
        }),
        power: Some(PowerZoneConfig::new(PowerZoneSystem::Polarized)),
        heart_rate: None,
    };

    // Caller sees a single error for the whole sequence
    let result = session.save_changes(athlete_id(), &changes).await;
    assert!(result.is_err());
    assert_eq!(session.state(), SessionState::Error);

    // The loaded snapshot is untouched by the failed save
    assert_eq!(session.data(), Some(&snapshot));

    write_mock.assert_async().await;
    rollback_mock.assert_async().await;
    power_mock.assert_async().await;
}

#[tokio::test]
async fn test_empty_changes_issue_no_writes() {
    let server = mockito::Server::new_async().await;

    let mut session = session_for(&server);
    let changes = ZoneChanges {
        profile: Some(ZoneProfileUpdate::default()),
        power: None,
        heart_rate: None,
    };

    // No mocks registered: any request would fail the test
    session.save_changes(athlete_id(), &changes).await.unwrap();
    assert_eq!(session.state(), SessionState::Idle);
}

#[tokio::test]
async fn test_individual_updates_transition_state() {
    let mut server = mockito::Server::new_async().await;

    server
        .mock(
            "PUT",
            format!("/api/v1/athletes/{}/zones/heart-rate", ATHLETE_ID).as_str(),
        )
        .with_status(200)
        .create_async()
        .await;

    let mut session = session_for(&server);
    let config = HrZoneConfig::new(HrZoneSystem::Karvonen);

    session
        .update_hr_zones(athlete_id(), &config)
        .await
        .unwrap();
    assert_eq!(session.state(), SessionState::Loaded);
}
