use serde::{Deserialize, Serialize};

use crate::types::{ContentRef, ItemContent, Project, ProjectItem, ProjectItemPage, ProjectPage};

// ---------------------------------------------------------------------------
// GraphQL documents
// ---------------------------------------------------------------------------

pub(crate) const RESOLVE_ORGANIZATION_QUERY: &str = r"
query ResolveOrganization($login: String!) {
  organization(login: $login) { id }
}
";

pub(crate) const RESOLVE_USER_QUERY: &str = r"
query ResolveUser($login: String!) {
  user(login: $login) { id }
}
";

pub(crate) const LIST_ORGANIZATION_PROJECTS_QUERY: &str = r"
query ListOrganizationProjects($login: String!, $first: Int!, $after: String) {
  organization(login: $login) {
    projectsV2(first: $first, after: $after) {
      nodes { id number title url }
      pageInfo { hasNextPage endCursor }
    }
  }
}
";

pub(crate) const LIST_USER_PROJECTS_QUERY: &str = r"
query ListUserProjects($login: String!, $first: Int!, $after: String) {
  user(login: $login) {
    projectsV2(first: $first, after: $after) {
      nodes { id number title url }
      pageInfo { hasNextPage endCursor }
    }
  }
}
";

/// Asks both roots at once: a login is either an organization or a user, and
/// one round trip settles which.
pub(crate) const GET_PROJECT_QUERY: &str = r"
query GetProject($login: String!, $number: Int!) {
  organization(login: $login) {
    projectV2(number: $number) { id number title url }
  }
  user(login: $login) {
    projectV2(number: $number) { id number title url }
  }
}
";

pub(crate) const GET_PROJECT_ITEMS_QUERY: &str = r"
query GetProjectItems($id: ID!, $first: Int!, $after: String) {
  node(id: $id) {
    ... on ProjectV2 {
      items(first: $first, after: $after) {
        nodes {
          id
          content {
            __typename
            ... on Issue { id title state url }
            ... on PullRequest { id title state url }
            ... on DraftIssue { id title }
          }
        }
        pageInfo { hasNextPage endCursor }
      }
    }
  }
}
";

pub(crate) const CREATE_PROJECT_MUTATION: &str = r"
mutation CreateProject($input: CreateProjectV2Input!) {
  createProjectV2(input: $input) {
    projectV2 { id number title url }
  }
}
";

pub(crate) const ADD_PROJECT_ITEM_MUTATION: &str = r"
mutation AddProjectItem($input: AddProjectV2ItemByIdInput!) {
  addProjectV2ItemById(input: $input) {
    item {
      id
      content {
        __typename
        ... on Issue { id title state url }
        ... on PullRequest { id title state url }
        ... on DraftIssue { id title }
      }
    }
  }
}
";

pub(crate) const UPDATE_PROJECT_ITEM_FIELD_MUTATION: &str = r"
mutation UpdateProjectItemField($input: UpdateProjectV2ItemFieldValueInput!) {
  updateProjectV2ItemFieldValue(input: $input) {
    projectV2Item { id }
  }
}
";

// ---------------------------------------------------------------------------
// Variables
// ---------------------------------------------------------------------------

#[derive(Serialize)]
pub(crate) struct LoginVariables<'a> {
    pub login: &'a str,
}

#[derive(Serialize)]
pub(crate) struct OwnerProjectsVariables<'a> {
    pub login: &'a str,
    pub first: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub after: Option<&'a str>,
}

#[derive(Serialize)]
pub(crate) struct GetProjectVariables<'a> {
    pub login: &'a str,
    pub number: u64,
}

#[derive(Serialize)]
pub(crate) struct NodePageVariables<'a> {
    pub id: &'a str,
    pub first: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub after: Option<&'a str>,
}

/// Mutations take a single `$input` object.
#[derive(Serialize)]
pub(crate) struct MutationVariables<I> {
    pub input: I,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct CreateProjectV2Input<'a> {
    pub owner_id: &'a str,
    pub title: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub short_description: Option<&'a str>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct AddProjectV2ItemByIdInput<'a> {
    pub project_id: &'a str,
    pub content_id: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct UpdateProjectV2ItemFieldValueInput<'a> {
    pub project_id: &'a str,
    pub item_id: &'a str,
    pub field_id: &'a str,
    pub value: FieldValue<'a>,
}

/// `ProjectV2FieldValue` input object. Values are sent as text.
#[derive(Serialize)]
pub(crate) struct FieldValue<'a> {
    pub text: &'a str,
}

// ---------------------------------------------------------------------------
// Response types (mirror the GraphQL response shape)
// ---------------------------------------------------------------------------

/// Pagination info from GraphQL.
#[derive(Debug, Clone, Default, Deserialize)]
pub(crate) struct PageInfo {
    #[serde(rename = "hasNextPage", default)]
    pub has_next_page: bool,
    #[serde(rename = "endCursor")]
    pub end_cursor: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
pub(crate) struct Connection<T> {
    #[serde(default)]
    pub nodes: Vec<Option<T>>,
    #[serde(rename = "pageInfo", default)]
    pub page_info: PageInfo,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RawNodeId {
    pub id: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct OrganizationIdData {
    pub organization: Option<RawNodeId>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct UserIdData {
    pub user: Option<RawNodeId>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RawProject {
    pub id: String,
    #[serde(default)]
    pub number: u64,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub url: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RawProjectsOwner {
    #[serde(rename = "projectsV2")]
    pub projects_v2: Option<Connection<RawProject>>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct OrganizationProjectsData {
    pub organization: Option<RawProjectsOwner>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct UserProjectsData {
    pub user: Option<RawProjectsOwner>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RawProjectOwner {
    #[serde(rename = "projectV2")]
    pub project_v2: Option<RawProject>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct GetProjectData {
    #[serde(default)]
    pub organization: Option<RawProjectOwner>,
    #[serde(default)]
    pub user: Option<RawProjectOwner>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ProjectItemsData {
    pub node: Option<RawProjectNode>,
}

/// A node narrowed to `ProjectV2`. Any other node type comes back without
/// `items`.
#[derive(Debug, Deserialize)]
pub(crate) struct RawProjectNode {
    pub items: Option<Connection<RawItem>>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RawItem {
    pub id: String,
    pub content: Option<RawContent>,
}

/// The `content` union. Which fields are present depends on `__typename`.
#[derive(Debug, Deserialize)]
pub(crate) struct RawContent {
    #[serde(rename = "__typename", default)]
    pub typename: String,
    pub id: Option<String>,
    pub title: Option<String>,
    pub state: Option<String>,
    pub url: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct CreateProjectData {
    #[serde(rename = "createProjectV2")]
    pub create_project_v2: Option<CreateProjectPayload>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct CreateProjectPayload {
    #[serde(rename = "projectV2")]
    pub project_v2: Option<RawProject>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct AddProjectItemData {
    #[serde(rename = "addProjectV2ItemById")]
    pub add_project_v2_item_by_id: Option<AddProjectItemPayload>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct AddProjectItemPayload {
    pub item: Option<RawItem>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct UpdateProjectItemFieldData {
    #[serde(rename = "updateProjectV2ItemFieldValue")]
    pub update_project_v2_item_field_value: Option<UpdateProjectItemFieldPayload>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct UpdateProjectItemFieldPayload {
    #[serde(rename = "projectV2Item")]
    pub project_v2_item: Option<RawNodeId>,
}

// ---------------------------------------------------------------------------
// Conversion: Raw → Domain
// ---------------------------------------------------------------------------

impl RawProject {
    pub(crate) fn into_domain(self) -> Project {
        Project {
            id: self.id,
            number: self.number,
            title: self.title,
            url: self.url,
        }
    }
}

impl RawContent {
    fn into_domain(self) -> ItemContent {
        let id = self.id.unwrap_or_default();
        match self.typename.as_str() {
            "Issue" | "PullRequest" => {
                let content = ContentRef {
                    id,
                    title: self.title.unwrap_or_default(),
                    state: self.state.unwrap_or_default(),
                    url: self.url.unwrap_or_default(),
                };
                if self.typename == "Issue" {
                    ItemContent::Issue(content)
                } else {
                    ItemContent::PullRequest(content)
                }
            }
            "DraftIssue" => ItemContent::DraftIssue {
                id,
                title: self.title.unwrap_or_default(),
            },
            _ => ItemContent::Unknown {
                typename: self.typename,
                id,
            },
        }
    }
}

impl RawItem {
    pub(crate) fn into_domain(self) -> ProjectItem {
        ProjectItem {
            id: self.id,
            content: self
                .content
                .map_or(ItemContent::Absent, RawContent::into_domain),
        }
    }
}

fn non_empty_cursor(cursor: Option<String>) -> Option<String> {
    cursor.filter(|c| !c.is_empty())
}

impl Connection<RawProject> {
    pub(crate) fn into_project_page(self) -> ProjectPage {
        ProjectPage {
            projects: self
                .nodes
                .into_iter()
                .flatten()
                .map(RawProject::into_domain)
                .collect(),
            end_cursor: non_empty_cursor(self.page_info.end_cursor),
            has_next_page: self.page_info.has_next_page,
        }
    }
}

impl Connection<RawItem> {
    pub(crate) fn into_item_page(self) -> ProjectItemPage {
        ProjectItemPage {
            items: self
                .nodes
                .into_iter()
                .flatten()
                .map(RawItem::into_domain)
                .collect(),
            end_cursor: non_empty_cursor(self.page_info.end_cursor),
            has_next_page: self.page_info.has_next_page,
        }
    }
}
