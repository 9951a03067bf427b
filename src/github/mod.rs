// GitHub Projects (V2) over GraphQL: transport, owner resolution, and the
// query/mutation operations built on them.

pub mod auth;
pub mod client;
pub(crate) mod graphql;
pub mod mutations;
pub mod not_found;
pub mod owner;
pub mod projects;
pub mod stub;
pub mod transport;

pub use client::GitHubClient;
pub use mutations::{add_project_item, create_project, update_project_item_field};
pub use owner::{Owner, resolve_owner};
pub use projects::{get_project, get_project_items, list_organization_projects, list_user_projects};
pub use stub::StubTransport;
pub use transport::{GraphQLTransport, TransportError};
