//! The fixed sequence of smoke-test calls

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SmokeStep {
    Health,
    Register,
    Login,
    Profile,
    Services,
    Categories,
}

impl SmokeStep {
    /// Execution order
    pub fn all() -> &'static [Self] {
        &[
            Self::Health,
            Self::Register,
            Self::Login,
            Self::Profile,
            Self::Services,
            Self::Categories,
        ]
    }

    pub fn method(&self) -> &'static str {
        match self {
            Self::Register | Self::Login => "POST",
            _ => "GET",
        }
    }

    pub fn path(&self) -> &'static str {
        match self {
            Self::Health => "/api/health",
            Self::Register => "/api/auth/register",
            Self::Login => "/api/auth/login",
            Self::Profile => "/api/auth/profile",
            Self::Services => "/api/services",
            Self::Categories => "/api/categories",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Self::Health => "health check",
            Self::Register => "register test user",
            Self::Login => "log in",
            Self::Profile => "fetch profile with token",
            Self::Services => "list services",
            Self::Categories => "list categories",
        }
    }
}

impl fmt::Display for SmokeStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} ({})", self.method(), self.path(), self.description())
    }
}
