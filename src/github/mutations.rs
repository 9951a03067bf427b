//! Write operations on Projects (V2).
//!
//! Mutations are sent once. A failure is reported to the caller as-is: the
//! remote state after a failed or abandoned mutation is unknown, so nothing
//! here retries.

use crate::error::ProjectsError;
use crate::github::graphql::{
    ADD_PROJECT_ITEM_MUTATION, AddProjectItemData, AddProjectV2ItemByIdInput,
    CREATE_PROJECT_MUTATION, CreateProjectData, CreateProjectV2Input, FieldValue,
    MutationVariables, RawItem, RawProject, UPDATE_PROJECT_ITEM_FIELD_MUTATION,
    UpdateProjectItemFieldData, UpdateProjectV2ItemFieldValueInput,
};
use crate::github::owner::resolve_owner;
use crate::github::transport::{GraphQLRequest, GraphQLResponse, GraphQLTransport, TransportError};
use crate::types::{
    AddProjectItemInput, CreateProjectInput, Project, ProjectItem, UpdateProjectItemFieldInput,
};

fn missing_payload(operation: &'static str, field: &str) -> ProjectsError {
    ProjectsError::transport(
        operation,
        TransportError::new(format!("mutation response missing {field}")),
    )
}

/// Create a project owned by an organization or user login.
///
/// Resolves the owner first; the create mutation is only sent once the
/// owner's node id is known. An empty description is left out of the
/// payload.
pub async fn create_project<T: GraphQLTransport>(
    transport: &T,
    input: &CreateProjectInput,
) -> Result<Project, ProjectsError> {
    if input.owner.is_empty() || input.title.is_empty() {
        return Err(ProjectsError::validation("owner and title are required"));
    }

    let owner = resolve_owner(transport, &input.owner)
        .await
        .map_err(|err| match err {
            ProjectsError::OwnerNotFound { .. } => err,
            other => ProjectsError::OwnerLookup(Box::new(other)),
        })?;
    tracing::debug!(
        "create project: owner {} is {} {}",
        input.owner,
        owner.kind(),
        owner.id()
    );

    let request = GraphQLRequest::new(
        CREATE_PROJECT_MUTATION,
        "CreateProject",
        MutationVariables {
            input: CreateProjectV2Input {
                owner_id: owner.id(),
                title: &input.title,
                short_description: input.description.as_deref().filter(|d| !d.is_empty()),
            },
        },
    );

    let data = transport
        .execute::<_, CreateProjectData>(&request)
        .await
        .and_then(GraphQLResponse::into_data)
        .map_err(|err| ProjectsError::transport("create project", err))?;

    data.create_project_v2
        .and_then(|payload| payload.project_v2)
        .map(RawProject::into_domain)
        .ok_or_else(|| missing_payload("create project", "projectV2"))
}

/// Add an issue, pull request, or other content to a project.
///
/// GitHub may add the item before its content is resolvable; the returned
/// item then carries only its id.
pub async fn add_project_item<T: GraphQLTransport>(
    transport: &T,
    input: &AddProjectItemInput,
) -> Result<ProjectItem, ProjectsError> {
    if input.project_id.is_empty() || input.content_id.is_empty() {
        return Err(ProjectsError::validation(
            "project_id and content_id are required",
        ));
    }

    let request = GraphQLRequest::new(
        ADD_PROJECT_ITEM_MUTATION,
        "AddProjectItem",
        MutationVariables {
            input: AddProjectV2ItemByIdInput {
                project_id: &input.project_id,
                content_id: &input.content_id,
            },
        },
    );

    let data = transport
        .execute::<_, AddProjectItemData>(&request)
        .await
        .and_then(GraphQLResponse::into_data)
        .map_err(|err| ProjectsError::transport("add project item", err))?;

    data.add_project_v2_item_by_id
        .and_then(|payload| payload.item)
        .map(RawItem::into_domain)
        .ok_or_else(|| missing_payload("add project item", "item"))
}

/// Set a field value on a project item.
///
/// GitHub only echoes the item's id, so that is all the result carries.
pub async fn update_project_item_field<T: GraphQLTransport>(
    transport: &T,
    input: &UpdateProjectItemFieldInput,
) -> Result<ProjectItem, ProjectsError> {
    if input.item_id.is_empty() || input.field_id.is_empty() || input.value.is_empty() {
        return Err(ProjectsError::validation(
            "item_id, field_id, and value are required",
        ));
    }

    let request = GraphQLRequest::new(
        UPDATE_PROJECT_ITEM_FIELD_MUTATION,
        "UpdateProjectItemField",
        MutationVariables {
            input: UpdateProjectV2ItemFieldValueInput {
                project_id: &input.project_id,
                item_id: &input.item_id,
                field_id: &input.field_id,
                value: FieldValue { text: &input.value },
            },
        },
    );

    let data = transport
        .execute::<_, UpdateProjectItemFieldData>(&request)
        .await
        .and_then(GraphQLResponse::into_data)
        .map_err(|err| ProjectsError::transport("update project item field", err))?;

    data.update_project_v2_item_field_value
        .and_then(|payload| payload.project_v2_item)
        .map(|node| ProjectItem::bare(node.id))
        .ok_or_else(|| missing_payload("update project item field", "projectV2Item"))
}
