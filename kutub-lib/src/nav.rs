use crate::ids::GroupId;
use crate::ADMIN_GROUP_ID;

pub const ROLES_PATH: &str = "/roles";

#[derive(Debug, PartialEq, Eq)]
pub struct NavItem {
    pub name: &'static str,
    /// table name required to see the item, empty for always visible
    pub permission: &'static str,
    pub path: &'static str,
}

#[derive(Debug, PartialEq, Eq)]
pub enum SectionGate {
    Always,
    /// only shown to members of the admin group
    Admin,
    /// hidden when none of the items are visible
    AnyItem,
}

#[derive(Debug)]
pub struct NavSection {
    pub name: &'static str,
    pub gate: SectionGate,
    pub items: &'static [NavItem],
}

pub const MENU: &[NavSection] = &[
    NavSection {
        name: "Dashboard",
        gate: SectionGate::Always,
        items: &[
            NavItem { name: "Bosh sahifa", permission: "", path: "/" },
            NavItem { name: "Buyurtmalar", permission: "", path: "/order" },
        ],
    },
    NavSection {
        name: "Kitoblar",
        gate: SectionGate::AnyItem,
        items: &[
            NavItem { name: "Kitob mualliflari", permission: "kitob_muallif", path: "/auther" },
            NavItem { name: "Kitob kategoriyalari", permission: "kategoriya", path: "/categories" },
            NavItem { name: "Kitob tillari", permission: "kitob_tili", path: "/languages" },
            NavItem { name: "Kitob alifbolari", permission: "kitob_alifbo", path: "/alphabet" },
            NavItem { name: "Kitob statuslari", permission: "kitob_status", path: "/status" },
            NavItem { name: "Kitob qo'shish", permission: "kitob_qo'shish", path: "/book-create" },
            NavItem { name: "Kitoblar", permission: "kitob_ko'rish", path: "/books-all" },
        ],
    },
    NavSection {
        name: "Talabalar",
        gate: SectionGate::Admin,
        items: &[
            NavItem { name: "Kafedralar", permission: "kafedralar", path: "/kafedra" },
            NavItem { name: "Yo'nalish", permission: "yo'nalish", path: "/direction" },
            NavItem { name: "Talaba Guruhlari", permission: "guruhlar", path: "/student_group" },
            NavItem { name: "Barcha foydalanuvchilar", permission: "admin", path: "/users-all" },
        ],
    },
    NavSection {
        name: "Admin",
        gate: SectionGate::Admin,
        items: &[
            NavItem { name: "Xodim qo'shish", permission: "", path: "/admins" },
            NavItem { name: "Huquq qo'shish", permission: "", path: "/permission-create" },
            NavItem { name: "Xodimlarni boshqarish", permission: "", path: ROLES_PATH },
        ],
    },
];

#[derive(Debug)]
pub struct VisibleSection {
    pub name: &'static str,
    pub items: Vec<&'static NavItem>,
}

pub fn is_admin(memberships: &[GroupId]) -> bool {
    memberships.iter().any(|id| id == ADMIN_GROUP_ID)
}

fn item_visible(item: &NavItem, tables: &[&str]) -> bool {
    item.permission.is_empty() || tables.contains(&item.permission)
}

/// sections and items the current user may see.
///
/// `tables` comes from the resolved permission set, an empty slice (nothing
/// resolved yet) leaves only the ungated items.
pub fn visible_menu(tables: &[&str], memberships: &[GroupId]) -> Vec<VisibleSection> {
    let admin = is_admin(memberships);
    let mut rtn = Vec::new();

    for section in MENU {
        if section.gate == SectionGate::Admin && !admin {
            continue;
        }

        let items: Vec<&'static NavItem> = section.items.iter()
            .filter(|item| item_visible(item, tables))
            .collect();

        if section.gate == SectionGate::AnyItem && items.is_empty() {
            continue;
        }

        rtn.push(VisibleSection {
            name: section.name,
            items,
        });
    }

    rtn
}

/// checks a route against the same rules the menu uses. unknown routes are
/// left to the server to refuse
pub fn route_allowed(path: &str, tables: &[&str], memberships: &[GroupId]) -> bool {
    if path == ROLES_PATH && !is_admin(memberships) {
        return false;
    }

    for section in MENU {
        for item in section.items {
            if item.path == path {
                return visible_menu(tables, memberships).iter()
                    .any(|s| s.items.iter().any(|i| i.path == path));
            }
        }
    }

    true
}

#[cfg(test)]
mod test {
    use super::*;

    fn names(menu: &[VisibleSection]) -> Vec<&'static str> {
        menu.iter().map(|s| s.name).collect()
    }

    #[test]
    fn nothing_resolved_shows_ungated_only() {
        let menu = visible_menu(&[], &[GroupId::from("2")]);

        assert_eq!(names(&menu), vec!["Dashboard"]);
    }

    #[test]
    fn book_section_follows_tables() {
        let menu = visible_menu(&["kitob_tili", "unrelated"], &[GroupId::from("2")]);

        assert_eq!(names(&menu), vec!["Dashboard", "Kitoblar"]);
        assert_eq!(menu[1].items.len(), 1);
        assert_eq!(menu[1].items[0].path, "/languages");
    }

    #[test]
    fn admin_sections_require_admin_group() {
        let menu = visible_menu(&["kafedralar"], &[GroupId::from("1")]);

        assert_eq!(names(&menu), vec!["Dashboard", "Talabalar", "Admin"]);
        assert_eq!(menu[1].items.len(), 1);
        assert_eq!(menu[2].items.len(), 3);
    }

    #[test]
    fn roles_route_guarded() {
        assert!(!route_allowed(ROLES_PATH, &[], &[GroupId::from("2")]));
        assert!(route_allowed(ROLES_PATH, &[], &[GroupId::from("1")]));
        assert!(!route_allowed("/languages", &[], &[GroupId::from("2")]));
        assert!(route_allowed("/languages", &["kitob_tili"], &[]));
        assert!(route_allowed("/elsewhere", &[], &[]));
    }
}
