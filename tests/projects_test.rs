use std::time::Duration;

use serde_json::{Value, json};
use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, MockBuilder, MockServer, ResponseTemplate};

use gh_projects::ProjectsError;
use gh_projects::github::{
    GitHubClient, get_project, get_project_items, list_organization_projects, list_user_projects,
};
use gh_projects::types::{
    GetProjectInput, GetProjectItemsInput, ItemContent, ListOrganizationProjectsInput,
    ListUserProjectsInput,
};

fn client(server: &MockServer) -> GitHubClient {
    GitHubClient::new(
        &server.uri(),
        "test-token".to_owned(),
        Some(Duration::from_secs(5)),
    )
    .unwrap()
}

fn graphql(operation: &str) -> MockBuilder {
    Mock::given(method("POST"))
        .and(path("/graphql"))
        .and(body_partial_json(json!({ "operationName": operation })))
}

async fn request_bodies(server: &MockServer) -> Vec<Value> {
    server
        .received_requests()
        .await
        .unwrap_or_default()
        .iter()
        .map(|r| r.body_json::<Value>().unwrap())
        .collect()
}

// ---------------------------------------------------------------------------
// list_organization_projects
// ---------------------------------------------------------------------------

#[tokio::test]
async fn lists_organization_projects_in_order() {
    let server = MockServer::start().await;
    graphql("ListOrganizationProjects")
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": { "organization": { "projectsV2": {
                "nodes": [
                    { "id": "1", "number": 1, "title": "Proj1", "url": "https://github.com/orgs/test-org/projects/1" },
                    { "id": "2", "number": 2, "title": "Proj2", "url": "https://github.com/orgs/test-org/projects/2" }
                ],
                "pageInfo": { "hasNextPage": false, "endCursor": "abc" }
            } } }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let input = ListOrganizationProjectsInput {
        organization: "test-org".into(),
        first: Some(2),
        after: None,
    };
    let page = list_organization_projects(&client(&server), &input)
        .await
        .unwrap();

    let titles: Vec<_> = page.projects.iter().map(|p| p.title.as_str()).collect();
    assert_eq!(titles, ["Proj1", "Proj2"]);
    assert_eq!(page.projects[1].id, "2");
    assert_eq!(page.end_cursor.as_deref(), Some("abc"));
    assert!(!page.has_next_page);

    let json = serde_json::to_value(&page).unwrap();
    assert_eq!(json["end_cursor"], "abc");
    assert_eq!(json["has_next_page"], false);

    let bodies = request_bodies(&server).await;
    assert_eq!(
        bodies[0]["variables"],
        json!({ "login": "test-org", "first": 2 })
    );
}

#[tokio::test]
async fn forwards_cursor_and_caps_page_size() {
    let server = MockServer::start().await;
    graphql("ListOrganizationProjects")
        .and(body_partial_json(json!({
            "variables": { "login": "test-org", "first": 100, "after": "abc" }
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": { "organization": { "projectsV2": {
                "nodes": [],
                "pageInfo": { "hasNextPage": false, "endCursor": null }
            } } }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let input = ListOrganizationProjectsInput {
        organization: "test-org".into(),
        first: Some(250),
        after: Some("abc".into()),
    };
    let page = list_organization_projects(&client(&server), &input)
        .await
        .unwrap();

    assert!(page.projects.is_empty());
    assert_eq!(page.end_cursor, None);
    assert!(!page.has_next_page);
}

#[tokio::test]
async fn missing_organization_is_validated_before_any_request() {
    let server = MockServer::start().await;

    let err = list_organization_projects(
        &client(&server),
        &ListOrganizationProjectsInput::default(),
    )
    .await
    .unwrap_err();

    assert!(matches!(err, ProjectsError::Validation(_)));
    assert_eq!(err.to_string(), "organization is required");
    assert!(request_bodies(&server).await.is_empty());
}

#[tokio::test]
async fn unknown_organization_is_not_found() {
    let server = MockServer::start().await;
    graphql("ListOrganizationProjects")
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": { "organization": null },
            "errors": [{
                "type": "NOT_FOUND",
                "message": "Could not resolve to an Organization with the login of 'ghost-org'."
            }]
        })))
        .mount(&server)
        .await;

    let input = ListOrganizationProjectsInput {
        organization: "ghost-org".into(),
        ..Default::default()
    };
    let err = list_organization_projects(&client(&server), &input)
        .await
        .unwrap_err();

    assert!(err.is_not_found());
    assert_eq!(err.to_string(), "organization ghost-org not found");
}

#[tokio::test]
async fn server_error_is_a_transport_failure() {
    let server = MockServer::start().await;
    graphql("ListOrganizationProjects")
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({
            "message": "Server Error"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let input = ListOrganizationProjectsInput {
        organization: "test-org".into(),
        ..Default::default()
    };
    let err = list_organization_projects(&client(&server), &input)
        .await
        .unwrap_err();

    assert!(matches!(err, ProjectsError::Transport { .. }));
    assert!(
        err.to_string()
            .starts_with("list organization projects failed:")
    );
}

// ---------------------------------------------------------------------------
// list_user_projects
// ---------------------------------------------------------------------------

#[tokio::test]
async fn lists_user_projects() {
    let server = MockServer::start().await;
    graphql("ListUserProjects")
        .and(body_partial_json(json!({ "variables": { "login": "octocat" } })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": { "user": { "projectsV2": {
                "nodes": [
                    { "id": "PVT_u1", "number": 7, "title": "Personal", "url": "https://github.com/users/octocat/projects/7" }
                ],
                "pageInfo": { "hasNextPage": false, "endCursor": "Y3Vy" }
            } } }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let input = ListUserProjectsInput {
        user: "octocat".into(),
        ..Default::default()
    };
    let page = list_user_projects(&client(&server), &input).await.unwrap();

    assert_eq!(page.projects.len(), 1);
    assert_eq!(page.projects[0].id, "PVT_u1");
    assert_eq!(page.end_cursor.as_deref(), Some("Y3Vy"));
    assert!(!page.has_next_page);
}

#[tokio::test]
async fn plain_text_404_is_still_not_found() {
    let server = MockServer::start().await;
    graphql("ListUserProjects")
        .respond_with(ResponseTemplate::new(404).set_body_string("404 page not found"))
        .expect(1)
        .mount(&server)
        .await;

    let input = ListUserProjectsInput {
        user: "ghost".into(),
        ..Default::default()
    };
    let err = list_user_projects(&client(&server), &input)
        .await
        .unwrap_err();

    assert!(err.is_not_found());
    assert_eq!(err.to_string(), "user ghost not found");
}

#[tokio::test]
async fn missing_user_is_validated() {
    let server = MockServer::start().await;

    let err = list_user_projects(&client(&server), &ListUserProjectsInput::default())
        .await
        .unwrap_err();

    assert_eq!(err.to_string(), "user is required");
    assert!(request_bodies(&server).await.is_empty());
}

// ---------------------------------------------------------------------------
// get_project
// ---------------------------------------------------------------------------

#[tokio::test]
async fn gets_project_from_organization_root() {
    let server = MockServer::start().await;
    graphql("GetProject")
        .and(body_partial_json(json!({
            "variables": { "login": "test-org", "number": 3 }
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": {
                "organization": { "projectV2": {
                    "id": "PVT_3", "number": 3, "title": "Launch", "url": "https://github.com/orgs/test-org/projects/3"
                } },
                "user": null
            },
            "errors": [{
                "type": "NOT_FOUND",
                "message": "Could not resolve to a User with the login of 'test-org'."
            }]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let input = GetProjectInput {
        owner: "test-org".into(),
        number: 3,
    };
    let project = get_project(&client(&server), &input).await.unwrap();

    assert_eq!(project.id, "PVT_3");
    assert_eq!(project.title, "Launch");
}

#[tokio::test]
async fn gets_project_from_user_root() {
    let server = MockServer::start().await;
    graphql("GetProject")
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": {
                "organization": null,
                "user": { "projectV2": {
                    "id": "PVT_9", "number": 9, "title": "Notes", "url": "https://github.com/users/octocat/projects/9"
                } }
            },
            "errors": [{
                "type": "NOT_FOUND",
                "message": "Could not resolve to an Organization with the login of 'octocat'."
            }]
        })))
        .mount(&server)
        .await;

    let input = GetProjectInput {
        owner: "octocat".into(),
        number: 9,
    };
    let project = get_project(&client(&server), &input).await.unwrap();

    assert_eq!(project.id, "PVT_9");
    assert_eq!(project.number, 9);
}

#[tokio::test]
async fn project_missing_from_both_roots_is_not_found() {
    let server = MockServer::start().await;
    graphql("GetProject")
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": {
                "organization": { "projectV2": null },
                "user": null
            },
            "errors": [
                {
                    "type": "NOT_FOUND",
                    "path": ["organization", "projectV2"],
                    "message": "Could not resolve to a ProjectV2 with the number 42."
                },
                {
                    "type": "NOT_FOUND",
                    "path": ["user"],
                    "message": "Could not resolve to a User with the login of 'test-org'."
                }
            ]
        })))
        .mount(&server)
        .await;

    let input = GetProjectInput {
        owner: "test-org".into(),
        number: 42,
    };
    let err = get_project(&client(&server), &input).await.unwrap_err();

    assert!(matches!(err, ProjectsError::NotFound(_)));
    assert_eq!(err.to_string(), "project not found");
}

#[tokio::test]
async fn untagged_missing_project_is_recognized_by_message() {
    let server = MockServer::start().await;
    graphql("GetProject")
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": { "organization": { "projectV2": null }, "user": null },
            "errors": [
                { "message": "Could not resolve to a ProjectV2 with the number 7." },
                { "message": "Could not resolve to a User with the login of 'test-org'." }
            ]
        })))
        .mount(&server)
        .await;

    let input = GetProjectInput {
        owner: "test-org".into(),
        number: 7,
    };
    let err = get_project(&client(&server), &input).await.unwrap_err();

    assert!(err.is_not_found());
}

#[tokio::test]
async fn fatal_error_beside_a_lookup_miss_is_not_reported_as_not_found() {
    let server = MockServer::start().await;
    graphql("GetProject")
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": { "organization": { "projectV2": null }, "user": null },
            "errors": [
                {
                    "type": "FORBIDDEN",
                    "path": ["organization", "projectV2"],
                    "message": "Resource not accessible by personal access token"
                },
                {
                    "type": "NOT_FOUND",
                    "path": ["user"],
                    "message": "Could not resolve to a User with the login of 'test-org'."
                }
            ]
        })))
        .mount(&server)
        .await;

    let input = GetProjectInput {
        owner: "test-org".into(),
        number: 1,
    };
    let err = get_project(&client(&server), &input).await.unwrap_err();

    assert!(matches!(
        err,
        ProjectsError::Transport {
            operation: "get project",
            ..
        }
    ));
    assert!(!err.is_not_found());
    assert!(
        err.to_string()
            .starts_with("get project failed: Resource not accessible by personal access token"),
        "unexpected message: {err}"
    );
}

#[tokio::test]
async fn non_lookup_graphql_error_fails_get_project() {
    let server = MockServer::start().await;
    graphql("GetProject")
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": null,
            "errors": [{ "message": "Resource not accessible by integration" }]
        })))
        .mount(&server)
        .await;

    let input = GetProjectInput {
        owner: "test-org".into(),
        number: 1,
    };
    let err = get_project(&client(&server), &input).await.unwrap_err();

    assert_eq!(
        err.to_string(),
        "get project failed: Resource not accessible by integration"
    );
}

#[tokio::test]
async fn get_project_requires_owner_and_number() {
    let server = MockServer::start().await;
    let client = client(&server);

    let no_owner = GetProjectInput {
        owner: String::new(),
        number: 1,
    };
    let no_number = GetProjectInput {
        owner: "test-org".into(),
        number: 0,
    };

    for input in [no_owner, no_number] {
        let err = get_project(&client, &input).await.unwrap_err();
        assert_eq!(err.to_string(), "owner and number are required");
    }
    assert!(request_bodies(&server).await.is_empty());
}

// ---------------------------------------------------------------------------
// get_project_items
// ---------------------------------------------------------------------------

#[tokio::test]
async fn lists_items_with_their_content() {
    let server = MockServer::start().await;
    graphql("GetProjectItems")
        .and(body_partial_json(json!({ "variables": { "id": "PVT_1" } })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": { "node": { "items": {
                "nodes": [
                    { "id": "PVTI_1", "content": {
                        "__typename": "Issue", "id": "I_1", "title": "Crash on start",
                        "state": "OPEN", "url": "https://github.com/o/r/issues/1"
                    } },
                    { "id": "PVTI_2", "content": {
                        "__typename": "DraftIssue", "id": "DI_1", "title": "Idea"
                    } },
                    { "id": "PVTI_3", "content": null }
                ],
                "pageInfo": { "hasNextPage": true, "endCursor": "next" }
            } } }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let input = GetProjectItemsInput {
        project_id: "PVT_1".into(),
        first: Some(3),
        after: None,
    };
    let page = get_project_items(&client(&server), &input).await.unwrap();

    assert_eq!(page.items.len(), 3);
    assert_eq!(page.items[0].content.type_name(), "Issue");
    assert_eq!(page.items[0].content.id(), "I_1");
    assert_eq!(page.items[0].content.state(), "OPEN");
    assert_eq!(page.items[1].content.type_name(), "DraftIssue");
    assert_eq!(page.items[1].content.title(), "Idea");
    assert_eq!(page.items[2].content, ItemContent::Absent);
    assert_eq!(page.end_cursor.as_deref(), Some("next"));
    assert!(page.has_next_page);

    let flattened = serde_json::to_value(&page.items[0]).unwrap();
    assert_eq!(flattened["content_type"], "Issue");
    assert_eq!(flattened["content_id"], "I_1");
}

#[tokio::test]
async fn issue_item_reports_its_content_type() {
    let server = MockServer::start().await;
    graphql("GetProjectItems")
        .and(body_partial_json(json!({ "variables": { "id": "proj123" } })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": { "node": { "items": {
                "nodes": [
                    { "id": "item1", "content": {
                        "__typename": "Issue", "id": "issue1", "title": "Issue 1",
                        "state": "OPEN", "url": "https://github.com/o/r/issues/1"
                    } }
                ],
                "pageInfo": { "hasNextPage": false, "endCursor": null }
            } } }
        })))
        .mount(&server)
        .await;

    let input = GetProjectItemsInput {
        project_id: "proj123".into(),
        ..Default::default()
    };
    let page = get_project_items(&client(&server), &input).await.unwrap();

    assert_eq!(page.items.len(), 1);
    let json = serde_json::to_value(&page.items[0]).unwrap();
    assert_eq!(json["content_type"], "Issue");
    assert_eq!(json["title"], "Issue 1");
}

#[tokio::test]
async fn empty_project_has_no_items() {
    let server = MockServer::start().await;
    graphql("GetProjectItems")
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": { "node": { "items": {
                "nodes": [],
                "pageInfo": { "hasNextPage": false, "endCursor": null }
            } } }
        })))
        .mount(&server)
        .await;

    let input = GetProjectItemsInput {
        project_id: "PVT_empty".into(),
        ..Default::default()
    };
    let page = get_project_items(&client(&server), &input).await.unwrap();

    assert!(page.items.is_empty());
    assert!(!page.has_next_page);

    let json = serde_json::to_value(&page).unwrap();
    assert_eq!(json["items"], json!([]));
    assert!(json.get("end_cursor").is_none());
}

#[tokio::test]
async fn unknown_project_node_is_not_found() {
    let server = MockServer::start().await;
    graphql("GetProjectItems")
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": { "node": null }
        })))
        .mount(&server)
        .await;

    let input = GetProjectItemsInput {
        project_id: "PVT_gone".into(),
        ..Default::default()
    };
    let err = get_project_items(&client(&server), &input)
        .await
        .unwrap_err();

    assert!(err.is_not_found());
    assert_eq!(err.to_string(), "project PVT_gone not found");
}

#[tokio::test]
async fn node_that_is_not_a_project_is_not_found() {
    let server = MockServer::start().await;
    graphql("GetProjectItems")
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": { "node": {} }
        })))
        .mount(&server)
        .await;

    let input = GetProjectItemsInput {
        project_id: "I_1".into(),
        ..Default::default()
    };
    let err = get_project_items(&client(&server), &input)
        .await
        .unwrap_err();

    assert!(err.is_not_found());
}

#[tokio::test]
async fn get_project_items_requires_project_id() {
    let server = MockServer::start().await;

    let err = get_project_items(&client(&server), &GetProjectItemsInput::default())
        .await
        .unwrap_err();

    assert_eq!(err.to_string(), "project_id is required");
    assert!(request_bodies(&server).await.is_empty());
}
