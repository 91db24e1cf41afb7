use clap::{Subcommand, Args};

use kutub_lib::ids::{GroupId, PermissionId};
use kutub_lib::nav::ROLES_PATH;
use kutub_lib::or_no_data;
use kutub_lib::session::{Storage, Clock};
use kutub_api::users::{StaffMembers, RegisterStaff, listed_staff};
use kutub_api::sec::roles::{Roles, RoleBody};
use kutub_api::sec::permissions::{
    Permissions,
    CreatePermission,
    GroupPermissions,
    AssignPermissions,
    links_for_group,
};

use crate::cli::resource::{self, Listing, DeleteArgs};
use crate::error;
use crate::formatting::Column;
use crate::input;
use crate::state::AppState;

impl Listing for StaffMembers {
    const ROUTE: Option<&'static str> = Some("/admins");

    fn columns() -> Vec<Column> {
        vec![
            Column::right("id"),
            Column::new("full name"),
            Column::new("passport"),
            Column::new("phone"),
            Column::new("group"),
        ]
    }

    fn row(item: &Self::Item) -> Vec<String> {
        let user = item.user.as_ref();

        vec![
            item.id.to_string(),
            or_no_data(user.and_then(|u| u.full_name.as_deref())).to_owned(),
            or_no_data(user.and_then(|u| u.passport_id.as_deref())).to_owned(),
            or_no_data(user.and_then(|u| u.phone.as_deref())).to_owned(),
            or_no_data(item.group_name()).to_owned(),
        ]
    }
}

impl Listing for Roles {
    const ROUTE: Option<&'static str> = Some(ROLES_PATH);

    fn columns() -> Vec<Column> {
        vec![Column::right("id"), Column::new("name"), Column::new("can login")]
    }

    fn row(item: &Self::Item) -> Vec<String> {
        vec![
            item.id.to_string(),
            item.name.clone(),
            if item.can_login { "yes" } else { "no" }.to_owned(),
        ]
    }
}

impl Listing for Permissions {
    const ROUTE: Option<&'static str> = Some("/permission-create");

    fn columns() -> Vec<Column> {
        vec![
            Column::right("id"),
            Column::new("name"),
            Column::new("code name"),
            Column::new("table"),
        ]
    }

    fn row(item: &Self::Item) -> Vec<String> {
        vec![
            item.id.to_string(),
            item.name.clone(),
            item.code_name.clone(),
            item.table.clone(),
        ]
    }
}

impl Listing for GroupPermissions {
    const ROUTE: Option<&'static str> = Some(ROLES_PATH);

    fn columns() -> Vec<Column> {
        vec![
            Column::right("id"),
            Column::new("group"),
            Column::new("permission"),
            Column::new("code name"),
            Column::new("table"),
        ]
    }

    fn row(item: &Self::Item) -> Vec<String> {
        let group = item.group_info.as_ref()
            .map(|g| g.name.clone())
            .or_else(|| item.group().map(|id| id.to_string()));
        let permission = item.permission_info.as_ref()
            .and_then(|p| p.name.as_deref());

        vec![
            item.id.to_string(),
            or_no_data(group.as_deref()).to_owned(),
            or_no_data(permission).to_owned(),
            or_no_data(item.code_name()).to_owned(),
            or_no_data(item.table()).to_owned(),
        ]
    }
}

#[derive(Debug, Args)]
pub struct StaffArgs {
    #[command(subcommand)]
    command: Option<StaffCmds>,
}

#[derive(Debug, Subcommand)]
enum StaffCmds {
    /// lists librarians and administrators
    Get,

    /// registers a new staff member, prompts for the password
    Create {
        #[arg(long)]
        full_name: String,

        #[arg(long)]
        passport_id: String,

        /// phone number in the form +998XXXXXXXXX
        #[arg(long)]
        phone: String,

        /// id of the role given to the new member
        #[arg(long)]
        group: GroupId,
    },
}

pub fn staff<S, C>(state: &mut AppState<S, C>, args: StaffArgs) -> error::Result
where
    S: Storage,
    C: Clock,
{
    match args.command.unwrap_or(StaffCmds::Get) {
        StaffCmds::Get => {
            let screen = resource::load::<StaffMembers, S, C>(state)?;
            let listed = listed_staff(screen.items().iter().cloned());

            resource::print_items::<StaffMembers, _>(&listed)
        },
        StaffCmds::Create { full_name, passport_id, phone, group } => {
            let password = input::read_password_confirmed()?;

            resource::create::<StaffMembers, S, C>(state, RegisterStaff {
                full_name,
                passport_id,
                phone,
                password,
                group_id: group,
            })
        }
    }
}

#[derive(Debug, Args)]
pub struct RoleArgs {
    #[command(subcommand)]
    command: Option<RoleCmds>,
}

#[derive(Debug, Subcommand)]
enum RoleCmds {
    /// lists every role
    Get,

    /// creates a new role
    Create {
        #[arg(long)]
        name: String,

        /// members of the role may log in
        #[arg(long)]
        can_login: bool,
    },

    /// updates a role
    Update {
        #[arg(long)]
        id: GroupId,

        #[arg(long)]
        name: String,

        /// members of the role may log in
        #[arg(long)]
        can_login: bool,
    },

    /// remembers a role as the one being managed
    Select {
        #[arg(long)]
        id: GroupId,
    },
}

pub fn role<S, C>(state: &mut AppState<S, C>, args: RoleArgs) -> error::Result
where
    S: Storage,
    C: Clock,
{
    match args.command.unwrap_or(RoleCmds::Get) {
        RoleCmds::Get => resource::get::<Roles, S, C>(state),
        RoleCmds::Create { name, can_login } => {
            resource::create::<Roles, S, C>(state, RoleBody { name, can_login })
        },
        RoleCmds::Update { id, name, can_login } => {
            resource::update::<Roles, S, C>(state, id, RoleBody { name, can_login })
        },
        RoleCmds::Select { id } => {
            state.session.set_selected_role(id.into_inner())?;

            println!("selected role {}", state.session.selected_role().unwrap_or_default());

            Ok(())
        },
    }
}

#[derive(Debug, Args)]
pub struct PermissionArgs {
    #[command(subcommand)]
    command: Option<PermissionCmds>,
}

#[derive(Debug, Subcommand)]
enum PermissionCmds {
    /// lists every permission
    Get,

    /// creates a new permission
    Create {
        /// display name, the code name is derived from it
        #[arg(long)]
        name: String,

        /// table the permission grants access to
        #[arg(long)]
        table: String,

        /// explicit code name instead of the derived one
        #[arg(long)]
        code_name: Option<String>,
    },
}

pub fn permission<S, C>(state: &mut AppState<S, C>, args: PermissionArgs) -> error::Result
where
    S: Storage,
    C: Clock,
{
    match args.command.unwrap_or(PermissionCmds::Get) {
        PermissionCmds::Get => resource::get::<Permissions, S, C>(state),
        PermissionCmds::Create { name, table, code_name } => {
            let mut body = CreatePermission::new(name, table);

            if let Some(code_name) = code_name {
                body.code_name(code_name);
            }

            println!("code name: {}", body.code_name);

            resource::create::<Permissions, S, C>(state, body)
        }
    }
}

#[derive(Debug, Args)]
pub struct RolePermissionArgs {
    #[command(flatten)]
    get: RolePermissionGet,

    #[command(subcommand)]
    command: Option<RolePermissionCmds>,
}

#[derive(Debug, Args)]
struct RolePermissionGet {
    /// only links belonging to this role
    #[arg(long)]
    group: Option<GroupId>,
}

#[derive(Debug, Subcommand)]
enum RolePermissionCmds {
    /// grants permissions to a role
    Create {
        /// id of the role
        #[arg(long)]
        group: GroupId,

        /// id of a permission to grant, may be repeated
        #[arg(long = "permission", required = true)]
        permissions: Vec<PermissionId>,
    },

    /// removes a granted permission
    Delete(DeleteArgs),
}

/// assigning or removing links can change what the current user may do so
/// permissions are resolved again afterwards
pub fn role_permission<S, C>(state: &mut AppState<S, C>, args: RolePermissionArgs) -> error::Result
where
    S: Storage,
    C: Clock,
{
    match args.command {
        Some(RolePermissionCmds::Create { group, permissions }) => {
            resource::create::<GroupPermissions, S, C>(state, AssignPermissions {
                group_id: group,
                permission_ids: permissions,
            })?;

            state.refresh_permissions();
        },
        Some(RolePermissionCmds::Delete(given)) => {
            if resource::delete::<GroupPermissions, S, C>(state, given.id, given.yes)? {
                state.refresh_permissions();
            }
        },
        None => {
            let screen = resource::load::<GroupPermissions, S, C>(state)?;

            match &args.get.group {
                Some(group) => {
                    resource::print_items::<GroupPermissions, _>(links_for_group(screen.items(), group))?;
                },
                None => {
                    resource::print_items::<GroupPermissions, _>(screen.items())?;
                }
            }
        }
    }

    Ok(())
}
