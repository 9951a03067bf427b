//! Read operations on Projects (V2): listing, point lookup, and items.
//!
//! Each operation validates its input, issues exactly one GraphQL round trip,
//! and maps the response into the output DTOs. Dropping the returned future
//! aborts the in-flight request.

use crate::config::types::{DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE};
use crate::error::ProjectsError;
use crate::github::graphql::{
    Connection, GET_PROJECT_ITEMS_QUERY, GET_PROJECT_QUERY, GetProjectData, GetProjectVariables,
    LIST_ORGANIZATION_PROJECTS_QUERY, LIST_USER_PROJECTS_QUERY, NodePageVariables,
    OrganizationProjectsData, OwnerProjectsVariables, ProjectItemsData, RawProject,
    UserProjectsData,
};
use crate::github::not_found::{Classification, classify};
use crate::github::transport::{GraphQLRequest, GraphQLResponse, GraphQLTransport, TransportError};
use crate::types::{
    GetProjectInput, GetProjectItemsInput, ListOrganizationProjectsInput, ListUserProjectsInput,
    Project, ProjectItemPage, ProjectPage,
};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Requested page size, defaulted when absent or zero and capped at
/// GitHub's limit.
pub(crate) fn page_size(first: Option<u32>) -> u32 {
    first
        .filter(|n| *n > 0)
        .unwrap_or(DEFAULT_PAGE_SIZE)
        .min(MAX_PAGE_SIZE)
}

/// Empty cursors are treated as "first page".
fn cursor(after: Option<&str>) -> Option<&str> {
    after.filter(|c| !c.is_empty())
}

/// Turn a failed query into a domain error: not-found phrasing becomes
/// [`ProjectsError::NotFound`], anything else is a transport failure of
/// `operation`.
fn query_error(operation: &'static str, err: TransportError, missing: String) -> ProjectsError {
    match classify(&err) {
        Classification::NotFound => {
            tracing::debug!("{operation}: classified as not found: {err}");
            ProjectsError::NotFound(missing)
        }
        Classification::Fatal => ProjectsError::transport(operation, err),
    }
}

// ---------------------------------------------------------------------------
// Listing
// ---------------------------------------------------------------------------

/// List one page of an organization's projects.
pub async fn list_organization_projects<T: GraphQLTransport>(
    transport: &T,
    input: &ListOrganizationProjectsInput,
) -> Result<ProjectPage, ProjectsError> {
    if input.organization.is_empty() {
        return Err(ProjectsError::validation("organization is required"));
    }

    let request = GraphQLRequest::new(
        LIST_ORGANIZATION_PROJECTS_QUERY,
        "ListOrganizationProjects",
        OwnerProjectsVariables {
            login: &input.organization,
            first: page_size(input.first),
            after: cursor(input.after.as_deref()),
        },
    );

    let data = transport
        .execute::<_, OrganizationProjectsData>(&request)
        .await
        .and_then(GraphQLResponse::into_data)
        .map_err(|err| {
            query_error(
                "list organization projects",
                err,
                format!("organization {} not found", input.organization),
            )
        })?;

    let page = data
        .organization
        .and_then(|o| o.projects_v2)
        .map(Connection::into_project_page)
        .unwrap_or_default();
    tracing::debug!(
        "projects: {} returned {} project(s), has_next_page={}",
        input.organization,
        page.projects.len(),
        page.has_next_page
    );
    Ok(page)
}

/// List one page of a user's projects.
pub async fn list_user_projects<T: GraphQLTransport>(
    transport: &T,
    input: &ListUserProjectsInput,
) -> Result<ProjectPage, ProjectsError> {
    if input.user.is_empty() {
        return Err(ProjectsError::validation("user is required"));
    }

    let request = GraphQLRequest::new(
        LIST_USER_PROJECTS_QUERY,
        "ListUserProjects",
        OwnerProjectsVariables {
            login: &input.user,
            first: page_size(input.first),
            after: cursor(input.after.as_deref()),
        },
    );

    let data = transport
        .execute::<_, UserProjectsData>(&request)
        .await
        .and_then(GraphQLResponse::into_data)
        .map_err(|err| {
            query_error(
                "list user projects",
                err,
                format!("user {} not found", input.user),
            )
        })?;

    let page = data
        .user
        .and_then(|u| u.projects_v2)
        .map(Connection::into_project_page)
        .unwrap_or_default();
    tracing::debug!(
        "projects: {} returned {} project(s), has_next_page={}",
        input.user,
        page.projects.len(),
        page.has_next_page
    );
    Ok(page)
}

// ---------------------------------------------------------------------------
// Point lookup
// ---------------------------------------------------------------------------

/// Fetch a project by owner login and number.
///
/// The owner may be an organization or a user; both roots are queried in one
/// round trip and the organization's project wins if both answer.
pub async fn get_project<T: GraphQLTransport>(
    transport: &T,
    input: &GetProjectInput,
) -> Result<Project, ProjectsError> {
    if input.owner.is_empty() || input.number == 0 {
        return Err(ProjectsError::validation("owner and number are required"));
    }

    let request = GraphQLRequest::new(
        GET_PROJECT_QUERY,
        "GetProject",
        GetProjectVariables {
            login: &input.owner,
            number: input.number,
        },
    );

    // One of the two roots is expected to miss, so NOT_FOUND errors are
    // tolerated as long as data came back.
    let data = transport
        .execute::<_, GetProjectData>(&request)
        .await
        .and_then(GraphQLResponse::into_data_tolerating_not_found)
        .map_err(|err| query_error("get project", err, "project not found".to_owned()))?;

    data.organization
        .and_then(|o| o.project_v2)
        .or_else(|| data.user.and_then(|u| u.project_v2))
        .map(RawProject::into_domain)
        .ok_or_else(|| ProjectsError::NotFound("project not found".to_owned()))
}

// ---------------------------------------------------------------------------
// Items
// ---------------------------------------------------------------------------

/// List one page of a project's items, addressed by the project's node id.
pub async fn get_project_items<T: GraphQLTransport>(
    transport: &T,
    input: &GetProjectItemsInput,
) -> Result<ProjectItemPage, ProjectsError> {
    if input.project_id.is_empty() {
        return Err(ProjectsError::validation("project_id is required"));
    }

    let request = GraphQLRequest::new(
        GET_PROJECT_ITEMS_QUERY,
        "GetProjectItems",
        NodePageVariables {
            id: &input.project_id,
            first: page_size(input.first),
            after: cursor(input.after.as_deref()),
        },
    );

    let missing = || format!("project {} not found", input.project_id);
    let data = transport
        .execute::<_, ProjectItemsData>(&request)
        .await
        .and_then(GraphQLResponse::into_data)
        .map_err(|err| query_error("get project items", err, missing()))?;

    // A null node, or a node that is not a ProjectV2, has no `items`.
    let items = data
        .node
        .and_then(|node| node.items)
        .ok_or_else(|| ProjectsError::NotFound(missing()))?;
    Ok(items.into_item_page())
}
