//! Tests for endpoint wrappers

use super::*;
use crate::config::ClientConfig;
use crate::error::Error;
use crate::testing::{client_with, config, ok, status, LogCapture, ScriptedTransport};
use crate::types::{Method, Reference, RoleRef, Since};
use chrono::NaiveDate;
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use tracing::Level;
use wiremock::matchers::{body_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const BASE: &str = "https://api.example-resourcing-service";

fn dry_config() -> ClientConfig {
    ClientConfig {
        is_dry_run: true,
        ..config()
    }
}

fn page(values: Value) -> crate::testing::Scripted {
    ok(json!({ "values": values, "nextCursor": null }))
}

// ============================================================================
// Helpers
// ============================================================================

#[test]
fn test_with_extra_overrides_and_ignores_non_objects() {
    let merged = with_extra(json!({"name": "a", "x": 1}), json!({"x": 2, "y": 3}));
    assert_eq!(merged, json!({"name": "a", "x": 2, "y": 3}));

    let untouched = with_extra(json!({"name": "a"}), Value::Null);
    assert_eq!(untouched, json!({"name": "a"}));
}

#[test]
fn test_flag_and_id_of() {
    let item = json!({"id": 4, "isArchived": true, "isTemplate": "yes"});
    assert!(flag(&item, "isArchived"));
    assert!(!flag(&item, "isTemplate"));
    assert!(!flag(&item, "missing"));
    assert_eq!(id_of(&item), Some(4));
    assert_eq!(id_of(&json!({})), None);
}

// ============================================================================
// Dry run
// ============================================================================

#[tokio::test]
async fn test_dry_run_mutations_skip_network() {
    let transport = ScriptedTransport::new(vec![]);
    let api = client_with(dry_config(), transport.clone());

    assert_eq!(Clients::new(&api).create("Acme", &[]).await.unwrap(), json!({}));
    assert_eq!(Clients::new(&api).archive(1).await.unwrap(), json!({}));
    assert_eq!(
        People::new(&api)
            .create("Ada", "Lovelace", "Engineer", Value::Null)
            .await
            .unwrap(),
        json!({})
    );
    assert_eq!(People::new(&api).remove_from_team(1, 2).await.unwrap(), json!({}));
    assert_eq!(Projects::new(&api).add_note(3, "moved").await.unwrap(), json!({}));
    assert_eq!(Teams::new(&api).create("Core").await.unwrap(), json!({}));
    assert_eq!(ProjectTags::new(&api).add_to_project(1, 2).await.unwrap(), json!({}));
    assert!(!RateCards::new(&api).delete(7).await.unwrap());

    assert_eq!(transport.calls(), 0);
}

#[tokio::test]
async fn test_dry_run_logs_one_intent_line() {
    let capture = LogCapture::default();
    let _guard = capture.install();
    let api = client_with(dry_config(), ScriptedTransport::new(vec![]));

    Teams::new(&api).create("Core").await.unwrap();

    let messages = capture.messages(Level::DEBUG);
    assert_eq!(messages.len(), 1);
    assert!(messages[0].contains("(dry-run) created team"));
}

#[tokio::test]
async fn test_dry_run_still_reads() {
    let transport = ScriptedTransport::new(vec![page(json!([{"id": 1}]))]);
    let api = client_with(dry_config(), transport.clone());

    let teams = Teams::new(&api).fetch_all().await.unwrap();

    assert_eq!(teams.len(), 1);
    assert_eq!(transport.calls(), 1);
}

// ============================================================================
// Paths and query parameters
// ============================================================================

#[tokio::test]
async fn test_large_page_endpoints_use_limit_500() {
    let transport = ScriptedTransport::new(vec![
        page(json!([])),
        page(json!([])),
        page(json!([])),
        page(json!([])),
    ]);
    let api = client_with(config(), transport.clone());

    Milestones::new(&api).fetch_all().await.unwrap();
    OtherExpenses::new(&api).fetch_all().await.unwrap();
    Phases::new(&api).fetch_all().await.unwrap();
    Actuals::new(&api).fetch_all(None).await.unwrap();

    let urls: Vec<String> = transport.requests().into_iter().map(|r| r.url).collect();
    assert_eq!(
        urls,
        vec![
            format!("{BASE}/milestones?limit=500&cursor="),
            format!("{BASE}/other-expenses?limit=500&cursor="),
            format!("{BASE}/phases?limit=500&cursor="),
            format!("{BASE}/actuals?limit=500&cursor="),
        ]
    );
}

#[tokio::test]
async fn test_default_page_endpoints() {
    let transport = ScriptedTransport::new(vec![
        page(json!([])),
        page(json!([])),
        page(json!([])),
        page(json!([])),
        page(json!([])),
    ]);
    let api = client_with(config(), transport.clone());

    Contracts::new(&api).fetch_all().await.unwrap();
    HolidayGroups::new(&api).fetch_all().await.unwrap();
    Roles::new(&api).fetch_all().await.unwrap();
    RateCards::new(&api).fetch_all().await.unwrap();
    ProjectTags::new(&api).fetch_all().await.unwrap();

    let paths: Vec<String> = transport
        .requests()
        .into_iter()
        .map(|r| r.url.trim_start_matches(BASE).to_string())
        .collect();
    assert_eq!(
        paths,
        vec![
            "/contracts?limit=200&cursor=",
            "/holiday-groups?limit=200&cursor=",
            "/roles?limit=200&cursor=",
            "/rate-cards?limit=200&cursor=",
            "/project-tags?limit=200&cursor=",
        ]
    );
}

#[tokio::test]
async fn test_modified_after_filter() {
    let transport = ScriptedTransport::new(vec![page(json!([])), page(json!([]))]);
    let api = client_with(config(), transport.clone());
    let since = Since::from(NaiveDate::from_ymd_opt(2024, 11, 28).unwrap());

    Users::new(&api).fetch_all(Some(since)).await.unwrap();
    Actuals::new(&api).fetch_all(Some(since)).await.unwrap();

    let requests = transport.requests();
    assert_eq!(
        requests[0].url,
        format!("{BASE}/users?limit=200&modifiedAfter=2024-11-28&cursor=")
    );
    assert_eq!(
        requests[1].url,
        format!("{BASE}/actuals?limit=500&modifiedAfter=2024-11-28&cursor=")
    );
}

#[tokio::test]
async fn test_people_include_placeholders() {
    let transport = ScriptedTransport::new(vec![page(json!([{"id": 1}]))]);
    let api = client_with(config(), transport.clone());

    People::new(&api).fetch_all().await.unwrap();

    assert_eq!(
        transport.requests()[0].url,
        format!("{BASE}/people?limit=200&includePlaceholders=true&cursor=")
    );
}

#[tokio::test]
async fn test_person_sub_resources() {
    let transport = ScriptedTransport::new(vec![
        page(json!([])),
        page(json!([])),
        ok(json!({"id": 1})),
        ok(Value::Null),
    ]);
    let api = client_with(config(), transport.clone());
    let people = People::new(&api);

    people.fetch_contracts(5).await.unwrap();
    people.fetch_teams(5).await.unwrap();
    people.add_to_team(5, 9).await.unwrap();
    people.remove_from_team(5, 9).await.unwrap();

    let requests = transport.requests();
    assert_eq!(requests[0].url, format!("{BASE}/people/5/contracts?limit=500&cursor="));
    assert_eq!(requests[1].url, format!("{BASE}/people/5/teams/current?limit=500&cursor="));
    assert_eq!(requests[2].url, format!("{BASE}/people/5/teams"));
    assert_eq!(requests[2].body, Some(json!({"teamId": 9})));
    assert_eq!(requests[3].method, Method::DELETE);
    assert_eq!(requests[3].url, format!("{BASE}/people/5/teams/9"));
}

// ============================================================================
// Request bodies
// ============================================================================

#[tokio::test]
async fn test_client_create_and_archive_bodies() {
    let transport = ScriptedTransport::new(vec![ok(json!({"id": 1})), ok(json!({"id": 1}))]);
    let api = client_with(config(), transport.clone());
    let clients = Clients::new(&api);

    clients
        .create("Acme", &[Reference::new("crm.Id", "0010Z")])
        .await
        .unwrap();
    clients.archive(1).await.unwrap();

    let requests = transport.requests();
    assert_eq!(
        requests[0].body,
        Some(json!({
            "name": "Acme",
            "references": [{"referenceName": "crm.Id", "externalId": "0010Z"}]
        }))
    );
    assert_eq!(requests[1].method, Method::PATCH);
    assert_eq!(requests[1].url, format!("{BASE}/clients/1"));
    assert_eq!(requests[1].body, Some(json!({"isArchived": true})));
}

#[tokio::test]
async fn test_project_create_merges_extra() {
    let transport = ScriptedTransport::new(vec![ok(json!({"id": 3, "name": "Apollo"}))]);
    let api = client_with(config(), transport.clone());

    Projects::new(&api)
        .create("Apollo", json!({"clientId": 7, "name": "Apollo II"}))
        .await
        .unwrap();

    assert_eq!(
        transport.requests()[0].body,
        Some(json!({"name": "Apollo II", "clientId": 7}))
    );
}

#[tokio::test]
async fn test_rate_card_defaults() {
    let transport = ScriptedTransport::new(vec![ok(json!({"id": 2}))]);
    let api = client_with(config(), transport.clone());

    RateCards::new(&api)
        .create("Standard", json!({"rateType": "days"}))
        .await
        .unwrap();

    assert_eq!(
        transport.requests()[0].body,
        Some(json!({
            "name": "Standard",
            "description": "",
            "isBlendedRateCard": "false",
            "blendedRate": "",
            "rateType": "days"
        }))
    );
}

#[tokio::test]
async fn test_custom_field_options_deduplicated() {
    let transport = ScriptedTransport::new(vec![ok(json!({"id": 11}))]);
    let api = client_with(config(), transport.clone());

    CustomFields::new(&api)
        .create_select(
            "Region",
            SelectModel::Project,
            ["EU", "US", "EU", "APAC", "US"],
            json!({"required": true}),
        )
        .await
        .unwrap();

    assert_eq!(
        transport.requests()[0].body,
        Some(json!({
            "name": "Region",
            "model": "PROJECT",
            "options": [{"name": "EU"}, {"name": "US"}, {"name": "APAC"}],
            "singleSelect": true,
            "required": true,
            "showInPlanner": false,
            "filterableInPlanner": true
        }))
    );
}

#[tokio::test]
async fn test_custom_fields_filtered_by_model() {
    let fields = json!([
        {"id": 1, "model": "PROJECT"},
        {"id": 2, "model": "PERSON"},
        {"id": 3, "model": "PROJECT"}
    ]);
    let transport = ScriptedTransport::new(vec![page(fields.clone()), page(fields)]);
    let api = client_with(config(), transport);
    let custom = CustomFields::new(&api);

    let projects = custom.fetch_project_select().await.unwrap();
    let people = custom.fetch_person_select().await.unwrap();

    assert_eq!(projects.iter().filter_map(id_of).collect::<Vec<_>>(), vec![1, 3]);
    assert_eq!(people.iter().filter_map(id_of).collect::<Vec<_>>(), vec![2]);
}

#[tokio::test]
async fn test_custom_select_values_skip_empty() {
    let transport = ScriptedTransport::new(vec![ok(json!({"id": 4, "values": [{"id": 1}]}))]);
    let api = client_with(config(), transport.clone());
    let projects = Projects::new(&api);

    let skipped = projects
        .add_custom_select_values(1, 4, &[Value::Null])
        .await
        .unwrap();
    assert_eq!(skipped, None);
    assert_eq!(transport.calls(), 0);

    let updated = projects
        .add_custom_select_values(1, 4, &[json!(1), Value::Null])
        .await
        .unwrap();
    assert!(updated.is_some());
    assert_eq!(
        transport.requests()[0].body,
        Some(json!({"id": 4, "values": [1]}))
    );
}

// ============================================================================
// Roles
// ============================================================================

#[tokio::test]
async fn test_role_name_resolution() {
    let transport = ScriptedTransport::new(vec![
        page(json!([{"id": 10, "name": "Designer"}, {"id": 11, "name": "Engineer"}])),
        ok(json!({"id": 99, "firstName": "Ada", "lastName": "Lovelace"})),
    ]);
    let api = client_with(config(), transport.clone());

    People::new(&api)
        .create("Ada", "Lovelace", "Engineer", json!({"email": "ada@example.com"}))
        .await
        .unwrap();

    let requests = transport.requests();
    assert!(requests[0].url.starts_with(&format!("{BASE}/roles?")));
    assert_eq!(
        requests[1].body,
        Some(json!({
            "firstName": "Ada",
            "lastName": "Lovelace",
            "roleId": 11,
            "email": "ada@example.com"
        }))
    );
}

#[tokio::test]
async fn test_role_id_skips_lookup() {
    let transport = ScriptedTransport::new(vec![]);
    let api = client_with(config(), transport.clone());

    let id = Roles::new(&api).resolve_id(&RoleRef::Id(5)).await.unwrap();

    assert_eq!(id, 5);
    assert_eq!(transport.calls(), 0);
}

#[tokio::test]
async fn test_unknown_role_name() {
    let transport = ScriptedTransport::new(vec![page(json!([{"id": 10, "name": "engineer"}]))]);
    let api = client_with(config(), transport);

    let err = Roles::new(&api)
        .resolve_id(&RoleRef::from("Engineer"))
        .await
        .unwrap_err();

    assert!(matches!(err, Error::RoleNotFound { ref name } if name == "Engineer"));
}

// ============================================================================
// Filters
// ============================================================================

#[tokio::test]
async fn test_only_active_clients() {
    let transport = ScriptedTransport::new(vec![page(json!([
        {"id": 1, "isArchived": false},
        {"id": 2, "isArchived": true},
        {"id": 3}
    ]))]);
    let api = client_with(config(), transport);

    let filter = ClientFilter {
        only_active: true,
        ..ClientFilter::default()
    };
    let clients = Clients::new(&api).fetch_all(&filter).await.unwrap();

    assert_eq!(clients.iter().filter_map(id_of).collect::<Vec<_>>(), vec![1, 3]);
}

#[tokio::test]
async fn test_only_active_assignments() {
    let transport = ScriptedTransport::new(vec![page(json!([
        {"id": 1, "isActive": true},
        {"id": 2, "isActive": true, "isPlaceholder": true},
        {"id": 3, "isActive": false},
        {"id": 4, "isActive": true, "isTemplate": true}
    ]))]);
    let api = client_with(config(), transport);

    let filter = AssignmentFilter {
        only_active: true,
        ..AssignmentFilter::default()
    };
    let assignments = Assignments::new(&api).fetch_all(&filter).await.unwrap();

    assert_eq!(assignments.iter().filter_map(id_of).collect::<Vec<_>>(), vec![1]);
}

#[tokio::test]
async fn test_fetch_active_assignments() {
    let transport = ScriptedTransport::new(vec![
        page(json!([{"id": 100, "isArchived": false}, {"id": 101, "isArchived": true}])),
        page(json!([{"id": 200, "isArchived": false}, {"id": 201, "isArchived": true}])),
        page(json!([
            {"id": 1, "projectId": 100, "personId": 200},
            {"id": 2, "projectId": 101, "personId": 200},
            {"id": 3, "projectId": 100, "personId": 201},
            {"id": 4, "projectId": 100, "personId": 200, "isPlaceholder": true},
            {"id": 5, "projectId": 100, "personId": 200, "isTemplate": true},
            {"id": 6, "projectId": 100, "personId": 200, "isTemplate": false}
        ])),
    ]);
    let api = client_with(config(), transport.clone());

    let active = Assignments::new(&api).fetch_active().await.unwrap();

    assert_eq!(active.iter().filter_map(id_of).collect::<Vec<_>>(), vec![1, 6]);
    let urls: Vec<String> = transport.requests().into_iter().map(|r| r.url).collect();
    assert!(urls[0].contains("/projects?"));
    assert!(urls[1].contains("/people?"));
    assert!(urls[2].contains("/assignments?limit=500"));
}

// ============================================================================
// Error handling
// ============================================================================

#[tokio::test]
async fn test_already_tagged_is_success() {
    let transport = ScriptedTransport::new(vec![status(
        400,
        &[],
        json!({"message": "Tag 'Priority' already exists on Project"}),
    )]);
    let api = client_with(config(), transport);

    let result = ProjectTags::new(&api).add_to_project(1, 2).await.unwrap();

    assert_eq!(result, json!(true));
}

#[tokio::test]
async fn test_other_tag_errors_propagate() {
    let transport = ScriptedTransport::new(vec![status(
        404,
        &[],
        json!({"message": "Project not found"}),
    )]);
    let api = client_with(config(), transport);

    let err = ProjectTags::new(&api).add_to_project(1, 2).await.unwrap_err();

    assert_eq!(err.status(), Some(404));
}

#[tokio::test]
async fn test_find_or_create_tag() {
    let transport = ScriptedTransport::new(vec![ok(json!({"id": 8, "name": "New"}))]);
    let api = client_with(config(), transport.clone());
    let tags = ProjectTags::new(&api);
    let existing = vec![json!({"id": 3, "name": "Old"})];

    assert_eq!(tags.find_or_create(&existing, "Old").await.unwrap(), Some(3));
    assert_eq!(transport.calls(), 0);

    assert_eq!(tags.find_or_create(&existing, "New").await.unwrap(), Some(8));
    assert_eq!(transport.requests()[0].body, Some(json!({"name": "New"})));
}

#[tokio::test]
async fn test_activity_log_unavailable() {
    let transport = ScriptedTransport::new(vec![status(
        422,
        &[],
        json!({"message": "Activity log events are not available for test accounts."}),
    )]);
    let api = client_with(config(), transport);

    let err = ActivityLog::new(&api).fetch_all(None).await.unwrap_err();

    assert_eq!(err.status(), Some(422));
    assert_eq!(
        err.upstream_message(),
        Some("Activity log events are not available for test accounts.")
    );
}

// ============================================================================
// Mock server
// ============================================================================

async fn server_client(server: &MockServer) -> crate::http::ApiClient {
    let config = ClientConfig::builder("TEST_key")
        .base_url(server.uri())
        .build()
        .unwrap();
    crate::http::ApiClient::new(config).unwrap()
}

#[tokio::test]
async fn test_rate_card_delete_reports_204() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/rate-cards/7"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let api = server_client(&server).await;

    assert!(RateCards::new(&api).delete(7).await.unwrap());
}

#[tokio::test]
async fn test_add_note_against_server() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/projects/12/notes"))
        .and(body_json(json!({"note": "archived"})))
        .respond_with(
            ResponseTemplate::new(201).set_body_json(json!({"id": 91166, "note": "archived"})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let api = server_client(&server).await;
    let note = Projects::new(&api).add_note(12, "archived").await.unwrap();

    assert_eq!(note["id"], 91166);
}

#[tokio::test]
async fn test_activity_log_occurred_after_against_server() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/activity-log"))
        .and(query_param("occurredAfter", "2024-12-01"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"values": [{"id": "evt-1"}], "nextCursor": null})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let api = server_client(&server).await;
    let since = Since::from(NaiveDate::from_ymd_opt(2024, 12, 1).unwrap());
    let entries = ActivityLog::new(&api).fetch_all(Some(since)).await.unwrap();

    assert_eq!(entries, vec![json!({"id": "evt-1"})]);
}
