//! MirAIe account credentials

use crate::error::{MiraieError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// How the login id identifies the account
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AuthType {
    #[default]
    Mobile,
    Email,
    Username,
}

impl AuthType {
    pub fn as_str(&self) -> &'static str {
        match self {
            AuthType::Mobile => "mobile",
            AuthType::Email => "email",
            AuthType::Username => "username",
        }
    }
}

impl fmt::Display for AuthType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AuthType {
    type Err = MiraieError;

    fn from_str(value: &str) -> Result<Self> {
        match value.to_lowercase().as_str() {
            "mobile" => Ok(AuthType::Mobile),
            "email" => Ok(AuthType::Email),
            "username" => Ok(AuthType::Username),
            _ => Err(MiraieError::config(format!(
                "Invalid auth type '{value}'. Use 'mobile', 'email' or 'username'"
            ))),
        }
    }
}

/// Credentials handed to the device library connector
#[derive(Clone, PartialEq, Eq)]
pub struct MiraieCredentials {
    pub login_id: String,
    pub password: String,
    pub auth_type: AuthType,
}

impl MiraieCredentials {
    pub fn new(
        login_id: impl Into<String>,
        password: impl Into<String>,
        auth_type: AuthType,
    ) -> Self {
        Self {
            login_id: login_id.into(),
            password: password.into(),
            auth_type,
        }
    }

    /// Both login id and password are present
    pub fn is_complete(&self) -> bool {
        !self.login_id.trim().is_empty() && !self.password.is_empty()
    }

    /// Check the login id looks like the declared auth type
    pub fn validate(&self) -> Result<()> {
        if !self.is_complete() {
            return Err(MiraieError::config(
                "MirAIe credentials required. Set MIRAIE_LOGIN_ID and MIRAIE_PASSWORD, pass --login-id/--password, or use --offline",
            ));
        }

        let login_id = self.login_id.trim();
        match self.auth_type {
            AuthType::Mobile => {
                let digits = login_id.trim_start_matches('+');
                if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_digit()) {
                    return Err(MiraieError::config(format!(
                        "Login id '{login_id}' is not a mobile number"
                    )));
                }
            }
            AuthType::Email => {
                if !login_id.contains('@') {
                    return Err(MiraieError::config(format!(
                        "Login id '{login_id}' is not an email address"
                    )));
                }
            }
            AuthType::Username => {}
        }
        Ok(())
    }
}

impl fmt::Debug for MiraieCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MiraieCredentials")
            .field("login_id", &self.login_id)
            .field("password", &"***")
            .field("auth_type", &self.auth_type)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_debug_redacts_password() {
        let creds = MiraieCredentials::new("9876543210", "hunter2", AuthType::Mobile);
        let rendered = format!("{creds:?}");
        assert!(!rendered.contains("hunter2"));
        assert!(rendered.contains("***"));
    }

    #[test]
    fn test_validate_by_auth_type() {
        assert!(MiraieCredentials::new("+919876543210", "pw", AuthType::Mobile)
            .validate()
            .is_ok());
        assert!(MiraieCredentials::new("someone", "pw", AuthType::Mobile)
            .validate()
            .is_err());
        assert!(MiraieCredentials::new("a@b.in", "pw", AuthType::Email)
            .validate()
            .is_ok());
        assert!(MiraieCredentials::new("ab.in", "pw", AuthType::Email)
            .validate()
            .is_err());
        assert!(MiraieCredentials::new("", "pw", AuthType::Username)
            .validate()
            .is_err());
    }

    #[test]
    fn test_auth_type_parsing() {
        assert_eq!("EMAIL".parse::<AuthType>().unwrap(), AuthType::Email);
        assert!("sms".parse::<AuthType>().is_err());
    }
}
