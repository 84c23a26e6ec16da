use crate::domain::auth::{User, UserRole};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    Login,
    Dashboard,
    BookRoom,
    NewBooking,
    Rooms,
    Users,
    Approvals,
    Reports,
}

impl Route {
    pub const ALL: [Route; 8] = [
        Route::Login,
        Route::Dashboard,
        Route::BookRoom,
        Route::NewBooking,
        Route::Rooms,
        Route::Users,
        Route::Approvals,
        Route::Reports,
    ];

    pub fn path(self) -> &'static str {
        match self {
            Route::Login => "/login",
            Route::Dashboard => "/dashboard",
            Route::BookRoom => "/book-room",
            Route::NewBooking => "/book-room/new",
            Route::Rooms => "/rooms",
            Route::Users => "/users",
            Route::Approvals => "/approvals",
            Route::Reports => "/reports",
        }
    }

    /// Matches the path part only; any query string is ignored.
    pub fn from_path(path: &str) -> Option<Route> {
        let path = path.split_once('?').map_or(path, |(p, _)| p);
        if path == "/" {
            return Some(Route::Dashboard);
        }
        Route::ALL.into_iter().find(|route| route.path() == path)
    }

    pub fn requires_login(self) -> bool {
        self != Route::Login
    }
}

/// Where a request for `path` ends up. Unknown paths yield `None`.
pub fn resolve(path: &str, user: Option<&User>) -> Option<Route> {
    let route = Route::from_path(path)?;
    if route.requires_login() && user.is_none() {
        tracing::debug!("{} requires a signed-in user, redirecting to login", path);
        return Some(Route::Login);
    }
    Some(route)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavItem {
    pub name: &'static str,
    pub route: Route,
}

impl NavItem {
    fn new(name: &'static str, route: Route) -> Self {
        Self { name, route }
    }
}

/// Sidebar entries visible to `role`.
pub fn navigation_for(role: UserRole) -> Vec<NavItem> {
    let mut items = vec![
        NavItem::new("แดชบอร์ด", Route::Dashboard),
        NavItem::new("จองห้อง", Route::BookRoom),
    ];

    match role {
        UserRole::Admin => {
            items.push(NavItem::new("จัดการห้อง", Route::Rooms));
            items.push(NavItem::new("จัดการผู้ใช้", Route::Users));
        }
        UserRole::Approver => items.push(NavItem::new("อนุมัติการจอง", Route::Approvals)),
        UserRole::User => {}
    }

    items.push(NavItem::new("รายงาน", Route::Reports));
    items
}
