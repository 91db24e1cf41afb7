use reqwest::Method;

use kutub_lib::ids::GroupId;
use kutub_lib::sec::authz::permission::{
    GroupPermissionLink,
    ResolvedPermissions,
    resolve,
    header_permission,
};

use crate::client::error::RequestError;
use crate::client::{ApiClient, read_payload};
use crate::resource::Resource;
use crate::sec::permissions::GroupPermissions;

/// fetches every group-permission link without the permission header
pub struct QueryGroupPermissions {}

impl QueryGroupPermissions {
    pub fn new() -> Self {
        QueryGroupPermissions {}
    }

    pub fn send(self, client: &ApiClient) -> Result<Vec<GroupPermissionLink>, RequestError> {
        let res = client.request(Method::GET, GroupPermissions::PATH, false)?.send()?;

        Ok(read_payload(res)?.into_payload())
    }
}

impl Default for QueryGroupPermissions {
    fn default() -> Self {
        QueryGroupPermissions::new()
    }
}

/// keeps the permissions resolved for the current memberships and the
/// client's permission header in step with them
#[derive(Debug, Default)]
pub struct PermissionResolver {
    resolved: Option<ResolvedPermissions>,
}

impl PermissionResolver {
    pub fn new() -> Self {
        PermissionResolver::default()
    }

    pub fn is_loaded(&self) -> bool {
        self.resolved.is_some()
    }

    pub fn resolved(&self) -> Option<&ResolvedPermissions> {
        self.resolved.as_ref()
    }

    pub fn codes(&self) -> Vec<&str> {
        self.resolved.as_ref()
            .map(|r| r.codes())
            .unwrap_or_default()
    }

    pub fn tables(&self) -> Vec<&str> {
        self.resolved.as_ref()
            .map(|r| r.tables())
            .unwrap_or_default()
    }

    /// replaces the resolved set and updates the client header
    pub fn apply<I>(
        &mut self,
        client: &mut ApiClient,
        links: I,
        memberships: &[GroupId]
    ) -> &ResolvedPermissions
    where
        I: IntoIterator<Item = GroupPermissionLink>
    {
        let resolved = resolve(links, memberships);

        client.set_permission(header_permission(&resolved).map(String::from));

        tracing::debug!(
            "resolved {} permission links, header: {:?}",
            resolved.links().len(),
            client.permission()
        );

        self.resolved.insert(resolved)
    }

    /// reloads the links from the server. on failure the previous set and
    /// header are left untouched
    pub fn refresh(
        &mut self,
        client: &mut ApiClient,
        memberships: &[GroupId]
    ) -> Result<&ResolvedPermissions, RequestError> {
        match QueryGroupPermissions::new().send(client) {
            Ok(links) => Ok(self.apply(client, links, memberships)),
            Err(err) => {
                tracing::warn!("failed to load group permissions: {}", err);

                Err(err)
            }
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::client::test::unroutable;

    fn links() -> Vec<GroupPermissionLink> {
        serde_json::from_str(r#"[
            {"id":1,"group_id":2,"permissionInfo":{"code_name":"books_view","table":"books"}},
            {"id":2,"group_id":3,"permissionInfo":{"code_name":"users_view","table":"users"}},
            {"id":3,"group_id":2,"permissionInfo":{"code_name":"books_edit","table":"books"}}
        ]"#).unwrap()
    }

    #[test]
    fn apply_sets_header() {
        let mut client = unroutable();
        let mut resolver = PermissionResolver::new();

        resolver.apply(&mut client, links(), &[GroupId::from("2")]);

        assert_eq!(client.permission(), Some("books_view"));
        assert_eq!(resolver.codes(), vec!["books_view", "books_edit"]);
        assert!(resolver.tables().contains(&"books"));
    }

    #[test]
    fn no_match_clears_header() {
        let mut client = unroutable();
        client.set_permission(Some("stale".into()));

        let mut resolver = PermissionResolver::new();
        let resolved = resolver.apply(&mut client, links(), &[GroupId::from("9")]);

        assert!(resolved.is_empty());
        assert_eq!(client.permission(), None);
    }

    #[test]
    fn failed_refresh_keeps_previous() {
        let mut client = unroutable();
        let mut resolver = PermissionResolver::new();
        let memberships = [GroupId::from("3")];

        resolver.apply(&mut client, links(), &memberships);

        assert!(resolver.refresh(&mut client, &memberships).is_err());
        assert_eq!(resolver.codes(), vec!["users_view"]);
        assert_eq!(client.permission(), Some("users_view"));
    }
}
