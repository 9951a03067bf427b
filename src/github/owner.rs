//! Owner resolution: which namespace does a login belong to?
//!
//! GitHub exposes organizations and users as separate root fields with no
//! combined "owner" lookup, so resolution is a two-step pipeline:
//!
//! 1. `organization(login:)`: a match wins immediately.
//! 2. `user(login:)`: only asked when step 1 found nothing.
//!
//! Each step ends in a [`Lookup`]: found, not found (continue), or fatal
//! (stop and report which step failed). Organizations are preferred when a
//! login somehow matches both.

use crate::error::ProjectsError;
use crate::github::graphql::{
    LoginVariables, OrganizationIdData, RESOLVE_ORGANIZATION_QUERY, RESOLVE_USER_QUERY, RawNodeId,
    UserIdData,
};
use crate::github::not_found::{Classification, classify};
use crate::github::transport::{GraphQLRequest, GraphQLTransport, TransportError};

/// A resolved owner and its GraphQL node id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Owner {
    Organization(String),
    User(String),
}

impl Owner {
    pub fn id(&self) -> &str {
        match self {
            Self::Organization(id) | Self::User(id) => id,
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Self::Organization(_) => "organization",
            Self::User(_) => "user",
        }
    }
}

/// Outcome of one lookup step.
enum Lookup {
    Found(String),
    NotFound,
    Fatal(TransportError),
}

impl Lookup {
    fn from_result(result: Result<Option<RawNodeId>, TransportError>) -> Self {
        match result {
            Ok(Some(node)) => Self::Found(node.id),
            Ok(None) => Self::NotFound,
            Err(err) => match classify(&err) {
                Classification::NotFound => Self::NotFound,
                Classification::Fatal => Self::Fatal(err),
            },
        }
    }
}

/// Resolve `login` to an organization or user node id.
///
/// Fails with `"organization lookup failed: ..."` or `"user lookup failed: ..."`
/// on a fatal error (the user lookup is never attempted after a fatal
/// organization lookup), and with [`ProjectsError::OwnerNotFound`] when
/// neither namespace knows the login.
pub async fn resolve_owner<T: GraphQLTransport>(
    transport: &T,
    login: &str,
) -> Result<Owner, ProjectsError> {
    if login.is_empty() {
        return Err(ProjectsError::validation("owner is required"));
    }

    match lookup_organization(transport, login).await {
        Lookup::Found(id) => {
            tracing::debug!("owner: {login} resolved to organization {id}");
            return Ok(Owner::Organization(id));
        }
        Lookup::Fatal(err) => return Err(ProjectsError::transport("organization lookup", err)),
        Lookup::NotFound => tracing::debug!("owner: {login} is not an organization"),
    }

    match lookup_user(transport, login).await {
        Lookup::Found(id) => {
            tracing::debug!("owner: {login} resolved to user {id}");
            Ok(Owner::User(id))
        }
        Lookup::Fatal(err) => Err(ProjectsError::transport("user lookup", err)),
        Lookup::NotFound => {
            tracing::debug!("owner: {login} is neither an organization nor a user");
            Err(ProjectsError::OwnerNotFound {
                login: login.to_owned(),
            })
        }
    }
}

async fn lookup_organization<T: GraphQLTransport>(transport: &T, login: &str) -> Lookup {
    let request = GraphQLRequest::new(
        RESOLVE_ORGANIZATION_QUERY,
        "ResolveOrganization",
        LoginVariables { login },
    );
    let result = transport
        .execute::<_, OrganizationIdData>(&request)
        .await
        .and_then(|response| response.into_data())
        .map(|data| data.organization);
    Lookup::from_result(result)
}

async fn lookup_user<T: GraphQLTransport>(transport: &T, login: &str) -> Lookup {
    let request = GraphQLRequest::new(RESOLVE_USER_QUERY, "ResolveUser", LoginVariables { login });
    let result = transport
        .execute::<_, UserIdData>(&request)
        .await
        .and_then(|response| response.into_data())
        .map(|data| data.user);
    Lookup::from_result(result)
}
