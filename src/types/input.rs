// Operation inputs, as handed over by the tool-invocation layer.
// Field names follow that layer's snake_case parameter names.

use serde::Deserialize;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ListOrganizationProjectsInput {
    pub organization: String,
    pub first: Option<u32>,
    pub after: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ListUserProjectsInput {
    pub user: String,
    pub first: Option<u32>,
    pub after: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct GetProjectInput {
    pub owner: String,
    pub number: u64,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct GetProjectItemsInput {
    pub project_id: String,
    pub first: Option<u32>,
    pub after: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct CreateProjectInput {
    pub owner: String,
    pub title: String,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AddProjectItemInput {
    pub project_id: String,
    pub content_id: String,
}

/// `project_id` is passed through to GitHub but not checked here; only the
/// item, field and value are required.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct UpdateProjectItemFieldInput {
    pub project_id: String,
    pub item_id: String,
    pub field_id: String,
    pub value: String,
}
