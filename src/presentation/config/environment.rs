use std::collections::HashMap;
use std::fmt;

/// Variable that selects the runtime environment.
pub const ENVIRONMENT_VARIABLE: &str = "APP_ENVIRONMENT";

/// Deployment stage; picks the optional `appsettings.{stage}` file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    Local,
    Test,
    Prod,
}

impl Environment {
    pub fn as_str(&self) -> &'static str {
        match self {
            Environment::Local => "Local",
            Environment::Test => "Test",
            Environment::Prod => "Prod",
        }
    }

    /// Reads [`ENVIRONMENT_VARIABLE`], defaulting to `Local` when unset.
    pub fn from_vars(vars: &HashMap<String, String>) -> Result<Self, String> {
        match vars.get(ENVIRONMENT_VARIABLE) {
            Some(raw) => Self::try_from(raw.clone()),
            None => Ok(Self::Local),
        }
    }

    pub fn is_production(&self) -> bool {
        matches!(self, Environment::Prod)
    }
}

impl TryFrom<String> for Environment {
    type Error = String;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        match s.trim().to_lowercase().as_str() {
            "" | "local" | "development" | "dev" => Ok(Self::Local),
            "test" => Ok(Self::Test),
            "prod" | "production" => Ok(Self::Prod),
            other => Err(format!(
                "Invalid environment: {}. Expected: local, test, or prod",
                other
            )),
        }
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
