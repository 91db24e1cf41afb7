use serde::{Serialize, Deserialize};

use crate::ids::{GroupId, LinkId, PermissionId};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PermissionInfo {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<PermissionId>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(default)]
    pub code_name: String,

    #[serde(default)]
    pub table: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupInfo {
    pub id: GroupId,
    pub name: String,
}

/// many to many edge between a group and a permission
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupPermissionLink {
    pub id: LinkId,

    #[serde(default)]
    pub group_id: Option<GroupId>,

    #[serde(default)]
    pub permission_id: Option<PermissionId>,

    #[serde(rename = "permissionInfo", default, skip_serializing_if = "Option::is_none")]
    pub permission_info: Option<PermissionInfo>,

    #[serde(rename = "groupInfo", default, skip_serializing_if = "Option::is_none")]
    pub group_info: Option<GroupInfo>,
}

impl GroupPermissionLink {
    /// the group this link belongs to, falling back to the nested group info
    pub fn group(&self) -> Option<&GroupId> {
        self.group_id.as_ref()
            .or_else(|| self.group_info.as_ref().map(|g| &g.id))
    }

    pub fn code_name(&self) -> Option<&str> {
        self.permission_info.as_ref()
            .map(|info| info.code_name.as_str())
            .filter(|v| !v.is_empty())
    }

    pub fn table(&self) -> Option<&str> {
        self.permission_info.as_ref()
            .map(|info| info.table.as_str())
            .filter(|v| !v.is_empty())
    }
}

/// links that apply to the current user, in server order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResolvedPermissions {
    links: Vec<GroupPermissionLink>,
}

/// keeps every link whose group is one of the given memberships
pub fn resolve<I>(links: I, memberships: &[GroupId]) -> ResolvedPermissions
where
    I: IntoIterator<Item = GroupPermissionLink>
{
    let links = links.into_iter()
        .filter(|link| match link.group() {
            Some(group) => memberships.contains(group),
            None => false
        })
        .collect();

    ResolvedPermissions { links }
}

impl ResolvedPermissions {
    pub fn links(&self) -> &[GroupPermissionLink] {
        &self.links
    }

    pub fn is_empty(&self) -> bool {
        self.links.is_empty()
    }

    /// permission codes used for request authorization
    pub fn codes(&self) -> Vec<&str> {
        self.links.iter().filter_map(|link| link.code_name()).collect()
    }

    /// table names used for navigation visibility
    pub fn tables(&self) -> Vec<&str> {
        self.links.iter().filter_map(|link| link.table()).collect()
    }

    pub fn has_table(&self, table: &str) -> bool {
        self.links.iter().any(|link| link.table() == Some(table))
    }

    pub fn has_code(&self, code: &str) -> bool {
        self.links.iter().any(|link| link.code_name() == Some(code))
    }
}

/// the single permission code advertised on outgoing requests.
///
/// only the first resolved code is sent. a user whose first matching link
/// is not the one a given endpoint checks will be refused even if a later
/// link would have allowed the call.
pub fn header_permission(resolved: &ResolvedPermissions) -> Option<&str> {
    resolved.codes().into_iter().next()
}

#[cfg(test)]
mod test {
    use super::*;

    fn link(id: &str, group: &str, code: &str, table: &str) -> GroupPermissionLink {
        GroupPermissionLink {
            id: LinkId::from(id),
            group_id: Some(GroupId::from(group)),
            permission_id: Some(PermissionId::from(id)),
            permission_info: Some(PermissionInfo {
                id: None,
                name: None,
                code_name: code.into(),
                table: table.into(),
            }),
            group_info: None,
        }
    }

    #[test]
    fn resolves_membership_subset() {
        let links = vec![
            link("1", "1", "admin", "admin"),
            link("2", "2", "books_view", "kitob_ko'rish"),
        ];
        let resolved = resolve(links, &[GroupId::from("2")]);

        assert_eq!(resolved.codes(), vec!["books_view"]);
        assert_eq!(resolved.tables(), vec!["kitob_ko'rish"]);
        assert_eq!(header_permission(&resolved), Some("books_view"));
    }

    #[test]
    fn preserves_server_order() {
        let links = vec![
            link("1", "3", "c", "c"),
            link("2", "1", "a", "a"),
            link("3", "2", "skip", "skip"),
            link("4", "3", "b", "b"),
        ];
        let resolved = resolve(links, &[GroupId::from("1"), GroupId::from("3")]);

        let ids: Vec<&str> = resolved.links().iter().map(|l| l.id.as_str()).collect();

        assert_eq!(ids, vec!["1", "2", "4"]);
        assert_eq!(header_permission(&resolved), Some("c"));
    }

    #[test]
    fn no_membership_resolves_nothing() {
        let resolved = resolve(vec![link("1", "1", "admin", "admin")], &[]);

        assert!(resolved.is_empty());
        assert_eq!(header_permission(&resolved), None);
        assert!(!resolved.has_table("admin"));
    }

    #[test]
    fn decodes_server_shape() {
        let json = r#"[
            {"id": 7, "group_id": "2", "permission_id": 4,
             "permissionInfo": {"id": 4, "code_name": "kategoriya", "table": "kategoriya"}},
            {"id": 8, "group_id": 2, "permission_id": 5}
        ]"#;
        let links: Vec<GroupPermissionLink> = serde_json::from_str(json).unwrap();
        let resolved = resolve(links, &[GroupId::from("2")]);

        assert_eq!(resolved.links().len(), 2);
        assert_eq!(resolved.codes(), vec!["kategoriya"]);
        assert!(resolved.has_code("kategoriya"));
    }
}
