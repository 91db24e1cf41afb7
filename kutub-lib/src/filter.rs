//! dependent department -> direction -> group selectors.
//!
//! candidate lists are derived from the rows currently loaded, no request is
//! made per level. rows whose placement is incomplete (a missing direction or
//! department) never show up in filtered results.

use std::collections::HashSet;

use serde::{Serialize, Deserialize};

use crate::ids::{Id, DepartmentId, DirectionId, StudentGroupId};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DepartmentRef {
    pub id: DepartmentId,
    #[serde(default)]
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DirectionRef {
    pub id: DirectionId,
    #[serde(default)]
    pub name: String,
    #[serde(rename = "Kafedra", default, skip_serializing_if = "Option::is_none")]
    pub department: Option<DepartmentRef>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupRef {
    pub id: StudentGroupId,
    #[serde(default)]
    pub name: String,
    #[serde(rename = "Yonalish", default, skip_serializing_if = "Option::is_none")]
    pub direction: Option<DirectionRef>,
}

/// where a row sits in the department hierarchy
pub trait Placement {
    fn placement(&self) -> Option<&GroupRef>;

    /// text matched by the free text search
    fn label(&self) -> &str {
        ""
    }
}

/// full chain for a row, `None` if any link is missing
pub fn chain<T>(row: &T) -> Option<(&DepartmentRef, &DirectionRef, &GroupRef)>
where
    T: Placement
{
    let group = row.placement()?;
    let direction = group.direction.as_ref()?;
    let department = direction.department.as_ref()?;

    Some((department, direction, group))
}

fn unique_by_id<'a, I, T>(iter: I, get_id: fn(&T) -> &Id) -> Vec<&'a T>
where
    I: Iterator<Item = &'a T>,
    T: 'a,
{
    let mut seen = HashSet::new();
    let mut rtn = Vec::new();

    for item in iter {
        if seen.insert(get_id(item).clone()) {
            rtn.push(item);
        }
    }

    rtn
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterChain {
    department: Option<DepartmentId>,
    direction: Option<DirectionId>,
    group: Option<StudentGroupId>,
    search: String,
}

impl FilterChain {
    pub fn new() -> Self {
        FilterChain::default()
    }

    pub fn department(&self) -> Option<&DepartmentId> {
        self.department.as_ref()
    }

    pub fn direction(&self) -> Option<&DirectionId> {
        self.direction.as_ref()
    }

    pub fn group(&self) -> Option<&StudentGroupId> {
        self.group.as_ref()
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    /// sets or clears the department. the levels below are always reset
    pub fn select_department(&mut self, department: Option<DepartmentId>) -> &mut Self {
        self.department = department;
        self.direction = None;
        self.group = None;
        self
    }

    /// sets or clears the direction. the group level is always reset
    pub fn select_direction(&mut self, direction: Option<DirectionId>) -> &mut Self {
        self.direction = direction;
        self.group = None;
        self
    }

    pub fn select_group(&mut self, group: Option<StudentGroupId>) -> &mut Self {
        self.group = group;
        self
    }

    pub fn set_search<S>(&mut self, search: S) -> &mut Self
    where
        S: Into<String>
    {
        self.search = search.into();
        self
    }

    pub fn reset(&mut self) {
        *self = FilterChain::default();
    }

    pub fn departments<'a, T>(&self, rows: &'a [T]) -> Vec<&'a DepartmentRef>
    where
        T: Placement
    {
        let iter = rows.iter()
            .filter_map(|row| chain(row).map(|(department, _, _)| department));

        unique_by_id(iter, |d| &d.id)
    }

    pub fn directions<'a, T>(&self, rows: &'a [T]) -> Vec<&'a DirectionRef>
    where
        T: Placement
    {
        let iter = rows.iter()
            .filter_map(|row| row.placement()?.direction.as_ref())
            .filter(|direction| match &self.department {
                Some(department) => direction.department.as_ref()
                    .map(|d| &d.id == department)
                    .unwrap_or(false),
                None => true
            });

        unique_by_id(iter, |d| &d.id)
    }

    pub fn groups<'a, T>(&self, rows: &'a [T]) -> Vec<&'a GroupRef>
    where
        T: Placement
    {
        let iter = rows.iter()
            .filter_map(|row| row.placement())
            .filter(|group| {
                let direction = group.direction.as_ref();

                if let Some(department) = &self.department {
                    let parent = direction.and_then(|d| d.department.as_ref());

                    if parent.map(|d| &d.id) != Some(department) {
                        return false;
                    }
                }

                if let Some(selected) = &self.direction {
                    if direction.map(|d| &d.id) != Some(selected) {
                        return false;
                    }
                }

                true
            });

        unique_by_id(iter, |g| &g.id)
    }

    pub fn matches<T>(&self, row: &T) -> bool
    where
        T: Placement
    {
        let Some((department, direction, group)) = chain(row) else {
            return false;
        };

        if let Some(selected) = &self.department {
            if &department.id != selected {
                return false;
            }
        }

        if let Some(selected) = &self.direction {
            if &direction.id != selected {
                return false;
            }
        }

        if let Some(selected) = &self.group {
            if &group.id != selected {
                return false;
            }
        }

        let search = self.search.trim();

        if !search.is_empty() {
            return row.label().to_lowercase().contains(&search.to_lowercase());
        }

        true
    }

    pub fn apply<'a, T>(&self, rows: &'a [T]) -> Vec<&'a T>
    where
        T: Placement
    {
        rows.iter().filter(|row| self.matches(*row)).collect()
    }
}

#[cfg(test)]
mod test {
    use super::*;

    struct Row {
        name: String,
        group: Option<GroupRef>,
    }

    impl Placement for Row {
        fn placement(&self) -> Option<&GroupRef> {
            self.group.as_ref()
        }

        fn label(&self) -> &str {
            &self.name
        }
    }

    fn row(name: &str, dep: Option<&str>, dir: Option<&str>, grp: Option<&str>) -> Row {
        let department = dep.map(|id| DepartmentRef {
            id: Id::from(id),
            name: format!("dep {}", id),
        });
        let direction = dir.map(|id| DirectionRef {
            id: Id::from(id),
            name: format!("dir {}", id),
            department,
        });
        let group = grp.map(|id| GroupRef {
            id: Id::from(id),
            name: format!("grp {}", id),
            direction,
        });

        Row { name: name.into(), group }
    }

    fn dataset() -> Vec<Row> {
        vec![
            row("Ali Valiyev", Some("d1"), Some("r1"), Some("g1")),
            row("Bobur Karimov", Some("d1"), Some("r1"), Some("g2")),
            row("Dilnoza Rustamova", Some("d1"), Some("r2"), Some("g3")),
            row("Eldor Tursunov", Some("d2"), Some("r3"), Some("g4")),
            row("Farrux Xolmatov", Some("d2"), Some("r3"), Some("g4")),
            row("orphan direction", None, Some("r9"), Some("g9")),
            row("orphan group", None, None, Some("g8")),
            row("no group", None, None, None),
        ]
    }

    fn ids<T>(list: Vec<&T>, get_id: fn(&T) -> &Id) -> Vec<String> {
        list.into_iter().map(|v| get_id(v).to_string()).collect()
    }

    #[test]
    fn unfiltered_candidates_deduplicated() {
        let rows = dataset();
        let chain = FilterChain::new();

        assert_eq!(ids(chain.departments(&rows), |d| &d.id), vec!["d1", "d2"]);
        assert_eq!(ids(chain.directions(&rows), |d| &d.id), vec!["r1", "r2", "r3", "r9"]);
        assert_eq!(ids(chain.groups(&rows), |g| &g.id), vec!["g1", "g2", "g3", "g4", "g9", "g8"]);
    }

    #[test]
    fn department_narrows_directions_and_groups() {
        let rows = dataset();
        let mut chain = FilterChain::new();
        chain.select_department(Some(Id::from("d1")));

        assert_eq!(ids(chain.directions(&rows), |d| &d.id), vec!["r1", "r2"]);
        assert_eq!(ids(chain.groups(&rows), |g| &g.id), vec!["g1", "g2", "g3"]);

        chain.select_direction(Some(Id::from("r1")));

        assert_eq!(ids(chain.groups(&rows), |g| &g.id), vec!["g1", "g2"]);
    }

    #[test]
    fn selecting_parent_resets_children() {
        let mut chain = FilterChain::new();
        chain.select_department(Some(Id::from("d1")))
            .select_direction(Some(Id::from("r1")))
            .select_group(Some(Id::from("g1")));

        chain.select_direction(Some(Id::from("r2")));

        assert_eq!(chain.group(), None);
        assert_eq!(chain.department(), Some(&Id::from("d1")));

        chain.select_group(Some(Id::from("g3")));
        chain.select_department(Some(Id::from("d2")));

        assert_eq!(chain.direction(), None);
        assert_eq!(chain.group(), None);
    }

    #[test]
    fn clearing_department_restores_candidates() {
        let rows = dataset();
        let mut chain = FilterChain::new();
        let full_directions = ids(chain.directions(&rows), |d| &d.id);
        let full_groups = ids(chain.groups(&rows), |g| &g.id);

        chain.select_department(Some(Id::from("d2")))
            .select_direction(Some(Id::from("r3")))
            .select_group(Some(Id::from("g4")));
        chain.select_department(None);

        assert_eq!(chain.direction(), None);
        assert_eq!(chain.group(), None);
        assert_eq!(ids(chain.directions(&rows), |d| &d.id), full_directions);
        assert_eq!(ids(chain.groups(&rows), |g| &g.id), full_groups);
    }

    #[test]
    fn apply_excludes_incomplete_chains() {
        let rows = dataset();
        let chain = FilterChain::new();
        let names: Vec<&str> = chain.apply(&rows).into_iter().map(|r| r.name.as_str()).collect();

        assert_eq!(names.len(), 5);
        assert!(!names.contains(&"orphan direction"));
        assert!(!names.contains(&"no group"));
    }

    #[test]
    fn apply_matches_all_levels_and_search() {
        let rows = dataset();
        let mut chain = FilterChain::new();
        chain.select_department(Some(Id::from("d1")))
            .select_direction(Some(Id::from("r1")));

        assert_eq!(chain.apply(&rows).len(), 2);

        chain.select_group(Some(Id::from("g2")));

        let found = chain.apply(&rows);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].name, "Bobur Karimov");

        chain.reset();
        chain.set_search("  TURSUN ");

        let found = chain.apply(&rows);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].name, "Eldor Tursunov");
    }

    #[test]
    fn decodes_nested_server_shape() {
        let json = r#"{"id": 3, "name": "IT-21",
            "Yonalish": {"id": 2, "name": "Dasturiy injiniring",
                "Kafedra": {"id": 1, "name": "Axborot texnologiyalari"}}}"#;
        let group: GroupRef = serde_json::from_str(json).unwrap();
        let row = Row { name: "x".into(), group: Some(group) };
        let (department, direction, group) = chain(&row).unwrap();

        assert_eq!(department.id, "1");
        assert_eq!(direction.id, "2");
        assert_eq!(group.name, "IT-21");
    }
}
