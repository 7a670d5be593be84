//! Header profile shown above the storefront.

use serde::Serialize;

/// Identity supplied by the host platform.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PlatformUser {
    pub id: i64,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub username: Option<String>,
    pub photo_url: Option<String>,
}

const UNNAMED: &str = "Пользователь";
const PLACEHOLDER_NAME: &str = "Savely";
const PLACEHOLDER_HANDLE: &str = "@savelyko";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProfileView {
    pub display_name: String,
    /// `@username`, or empty when the user has none.
    pub handle: String,
    /// `None` keeps the page's default avatar.
    pub avatar_url: Option<String>,
}

impl ProfileView {
    /// `None` means no platform user (opened in a plain browser): show the
    /// design placeholder.
    pub fn from_user(user: Option<&PlatformUser>) -> Self {
        let Some(user) = user else {
            return Self {
                display_name: PLACEHOLDER_NAME.to_string(),
                handle: PLACEHOLDER_HANDLE.to_string(),
                avatar_url: None,
            };
        };

        let full_name = [user.first_name.as_deref(), user.last_name.as_deref()]
            .into_iter()
            .flatten()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>()
            .join(" ");

        let handle = user
            .username
            .as_deref()
            .map(str::trim)
            .filter(|u| !u.is_empty())
            .map(|u| format!("@{u}"))
            .unwrap_or_default();

        Self {
            display_name: if full_name.is_empty() {
                UNNAMED.to_string()
            } else {
                full_name
            },
            handle,
            avatar_url: user.photo_url.clone().filter(|u| !u.trim().is_empty()),
        }
    }
}
