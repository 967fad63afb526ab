use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::yti::comments::localization::{Localizer, MessageKey};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: Uuid,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
}

/// Lookup of user records by identifier.
pub trait UserDirectory {
    fn find_user(&self, id: Uuid) -> Option<User>;
}

#[derive(Debug, Clone, Default)]
pub struct InMemoryUserDirectory {
    users: HashMap<Uuid, User>,
}

impl InMemoryUserDirectory {
    pub fn new(users: impl IntoIterator<Item = User>) -> Self {
        Self {
            users: users.into_iter().map(|user| (user.id, user)).collect(),
        }
    }
}

impl UserDirectory for InMemoryUserDirectory {
    fn find_user(&self, id: Uuid) -> Option<User> {
        self.users.get(&id).cloned()
    }
}

/// "First Last" for a known user with both names, the localized deleted-user
/// placeholder otherwise.
pub fn display_name(
    directory: &dyn UserDirectory,
    user_id: Option<Uuid>,
    language: &str,
    localizer: &dyn Localizer,
) -> String {
    let name = user_id
        .and_then(|id| directory.find_user(id))
        .and_then(|user| match (user.first_name, user.last_name) {
            (Some(first), Some(last)) if !first.is_empty() && !last.is_empty() => {
                Some(format!("{first} {last}"))
            }
            _ => None,
        });
    name.unwrap_or_else(|| localizer.message(MessageKey::DeletedUser, language))
}
