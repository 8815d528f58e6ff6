//! Client-side route table.
//!
//! One variant per page the shell can show. Paths parse into variants and
//! variants render back to paths, so navigation logic never handles raw
//! strings.

/// Calculator pages under `/tools`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolKind {
    /// Subscriber growth calculator
    Growth,
    /// Ad revenue calculator
    Revenue,
    /// Watch-time calculator
    WatchTime,
}

impl ToolKind {
    /// All calculators, in display order.
    pub fn all() -> &'static [ToolKind] {
        &[ToolKind::Growth, ToolKind::Revenue, ToolKind::WatchTime]
    }

    /// URL segment under `/tools`.
    pub fn slug(&self) -> &'static str {
        match self {
            ToolKind::Growth => "growth",
            ToolKind::Revenue => "revenue",
            ToolKind::WatchTime => "watch-time",
        }
    }

    /// Card title shown on the tools hub.
    pub fn title(&self) -> &'static str {
        match self {
            ToolKind::Growth => "Growth Calculator",
            ToolKind::Revenue => "Revenue Calculator",
            ToolKind::WatchTime => "Watch Time Calculator",
        }
    }
}

/// A page the shell can navigate to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    /// Landing page
    Home,
    /// Sign-in / sign-up page
    Auth,
    /// Onboarding wizard
    Onboarding,
    /// Main dashboard
    Dashboard,
    /// Profile editor
    Profile,
    /// Admin panel
    Admin,
    /// Tutorial library
    Tutorials,
    /// Tools hub
    Tools,
    /// One calculator page
    Tool(ToolKind),
    /// Services catalog
    Services,
    /// Quick tips page
    Tips,
    /// Catch-all for unrecognized paths
    NotFound,
}

impl Route {
    /// Parse a path into a route. Unknown paths become `NotFound`.
    ///
    /// Trailing slashes are ignored; query strings are not expected here.
    pub fn parse(path: &str) -> Route {
        let trimmed = if path.len() > 1 {
            path.trim_end_matches('/')
        } else {
            path
        };

        match trimmed {
            "/" | "" => Route::Home,
            "/auth" => Route::Auth,
            "/onboarding" => Route::Onboarding,
            "/dashboard" => Route::Dashboard,
            "/profile" => Route::Profile,
            "/admin" => Route::Admin,
            "/tutorials" => Route::Tutorials,
            "/tools" => Route::Tools,
            "/tools/growth" => Route::Tool(ToolKind::Growth),
            "/tools/revenue" => Route::Tool(ToolKind::Revenue),
            "/tools/watch-time" => Route::Tool(ToolKind::WatchTime),
            "/services" => Route::Services,
            "/tips" => Route::Tips,
            _ => Route::NotFound,
        }
    }

    /// Canonical path for this route.
    pub fn path(&self) -> &'static str {
        match self {
            Route::Home => "/",
            Route::Auth => "/auth",
            Route::Onboarding => "/onboarding",
            Route::Dashboard => "/dashboard",
            Route::Profile => "/profile",
            Route::Admin => "/admin",
            Route::Tutorials => "/tutorials",
            Route::Tools => "/tools",
            Route::Tool(ToolKind::Growth) => "/tools/growth",
            Route::Tool(ToolKind::Revenue) => "/tools/revenue",
            Route::Tool(ToolKind::WatchTime) => "/tools/watch-time",
            Route::Services => "/services",
            Route::Tips => "/tips",
            Route::NotFound => "/404",
        }
    }
}

impl std::fmt::Display for Route {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.path())
    }
}
