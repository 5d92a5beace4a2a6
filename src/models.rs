//! Typed shapes of the target API's payloads.
//!
//! Decoding never rejects fields a model does not declare: none of these
//! types use `deny_unknown_fields`, so new fields added by the live API pass
//! through silently. Optional fields decode to `None` when absent.

use crate::assertion::{assert_field, AssertionFailure};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct User {
    pub id: i64,
    #[serde(default)]
    pub email: Option<String>,
    pub first_name: String,
    pub last_name: String,
    #[serde(default)]
    pub avatar: Option<String>,
}

/// Informational block the API appends to most responses.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Support {
    pub url: String,
    pub text: String,
}

/// `GET /users/{id}`
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct UserResponse {
    #[serde(rename = "data")]
    pub user: User,
    #[serde(default)]
    pub support: Option<Support>,
}

/// `GET /users?page={n}`
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct UsersPage {
    pub page: u32,
    pub per_page: u32,
    pub total: u32,
    pub total_pages: u32,
    #[serde(rename = "data")]
    pub users: Vec<User>,
    #[serde(default)]
    pub support: Option<Support>,
}

impl UsersPage {
    /// User ids in page order.
    pub fn ids(&self) -> Vec<i64> {
        self.users.iter().map(|u| u.id).collect()
    }

    /// A page never holds more than `per_page` users, and never the same id
    /// twice.
    pub fn check_invariants(&self) -> Result<(), AssertionFailure> {
        if self.users.len() > self.per_page as usize {
            return Err(AssertionFailure::new(
                "data.length",
                format!("at most {}", self.per_page),
                self.users.len().to_string(),
            ));
        }
        let mut seen = HashSet::with_capacity(self.users.len());
        for user in &self.users {
            if !seen.insert(user.id) {
                return Err(AssertionFailure::new(
                    "data.id",
                    "unique ids",
                    format!("duplicate id {}", user.id),
                ));
            }
        }
        Ok(())
    }

    /// Check the page number the server echoed back.
    pub fn check_page(&self, expected: u32) -> Result<(), AssertionFailure> {
        assert_field("page", expected, self.page)
    }

    /// `total_pages` must agree with `total` split into pages of `per_page`.
    pub fn check_page_count(&self) -> Result<(), AssertionFailure> {
        if self.per_page == 0 {
            return Err(AssertionFailure::new(
                "per_page",
                "greater than 0",
                self.per_page.to_string(),
            ));
        }
        assert_field(
            "total_pages",
            self.total.div_ceil(self.per_page),
            self.total_pages,
        )
    }
}

/// Payload of `POST /users`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct CreateUserRequest {
    pub name: String,
    pub job: String,
}

impl CreateUserRequest {
    pub fn new(name: impl Into<String>, job: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            job: job.into(),
        }
    }
}

/// `POST /users` answer; `id` and `createdAt` are assigned by the server.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct CreateUserResponse {
    pub name: String,
    pub job: String,
    pub id: String,
    #[serde(rename = "createdAt")]
    pub created_at: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Resource {
    pub id: i64,
    pub name: String,
    pub year: i32,
    pub color: String,
    pub pantone_value: String,
}

/// `GET /unknown/{id}`
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ResourceResponse {
    #[serde(rename = "data")]
    pub resource: Resource,
    #[serde(default)]
    pub support: Option<Support>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::response::decode;

    const USER_BODY: &str = r#"{
        "data": {
            "id": 2,
            "email": "janet.weaver@reqres.in",
            "first_name": "Janet",
            "last_name": "Weaver",
            "avatar": "https://reqres.in/img/faces/2-image.jpg"
        },
        "support": {"url": "https://reqres.in/#support-heading", "text": "Thanks!"}
    }"#;

    fn user(id: i64) -> User {
        User {
            id,
            email: None,
            first_name: format!("first{id}"),
            last_name: format!("last{id}"),
            avatar: None,
        }
    }

    fn page(per_page: u32, ids: &[i64]) -> UsersPage {
        UsersPage {
            page: 1,
            per_page,
            total: 12,
            total_pages: 2,
            users: ids.iter().copied().map(user).collect(),
            support: None,
        }
    }

    #[test]
    fn test_user_response_decodes() {
        let res: UserResponse = decode(USER_BODY).unwrap();
        assert_eq!(res.user.id, 2);
        assert_eq!(res.user.first_name, "Janet");
        assert_eq!(res.user.last_name, "Weaver");
        assert!(res.support.is_some());
    }

    #[test]
    fn test_unknown_fields_do_not_change_known_ones() {
        let plain: UserResponse = decode(USER_BODY).unwrap();
        let mut value: serde_json::Value = serde_json::from_str(USER_BODY).unwrap();
        value["data"]["nickname"] = "jw".into();
        value["_meta"] = serde_json::json!({"powered_by": "reqres"});
        let extended: UserResponse = decode(&value.to_string()).unwrap();
        assert_eq!(plain, extended);
    }

    #[test]
    fn test_optional_avatar_absent() {
        let user: User = decode(r#"{"id": 5, "first_name": "Charles", "last_name": "Morris"}"#).unwrap();
        assert_eq!(user.avatar, None);
        assert_eq!(user.email, None);
    }

    #[test]
    fn test_users_scalar_data_is_decode_error() {
        let err = decode::<UsersPage>(
            r#"{"page": 1, "per_page": 6, "total": 12, "total_pages": 2, "data": 7}"#,
        )
        .unwrap_err();
        assert_eq!(err.kind(), "DecodeError");
    }

    #[test]
    fn test_page_invariants() {
        assert!(page(6, &[1, 2, 3]).check_invariants().is_ok());

        let err = page(2, &[1, 2, 3]).check_invariants().unwrap_err();
        assert_eq!(err.path, "data.length");

        let err = page(6, &[1, 2, 1]).check_invariants().unwrap_err();
        assert_eq!(err.actual, "duplicate id 1");
    }

    #[test]
    fn test_page_count_must_match_total() {
        assert!(page(6, &[1, 2, 3]).check_page_count().is_ok());

        let mut runaway = page(6, &[1, 2, 3]);
        runaway.total_pages = 4_000_000_000;
        let err = runaway.check_page_count().unwrap_err();
        assert_eq!(err.path, "total_pages");
        assert_eq!(err.expected, "2");

        let err = page(0, &[]).check_page_count().unwrap_err();
        assert_eq!(err.path, "per_page");
    }

    #[test]
    fn test_page_ids_and_number() {
        let p = page(6, &[7, 8, 9]);
        assert_eq!(p.ids(), vec![7, 8, 9]);
        assert!(p.check_page(1).is_ok());
        assert_eq!(p.check_page(2).unwrap_err().actual, "1");
    }

    #[test]
    fn test_create_user_round_shapes() {
        let body = serde_json::to_value(CreateUserRequest::new("morpheus", "leader")).unwrap();
        assert_eq!(body, serde_json::json!({"name": "morpheus", "job": "leader"}));

        let created: CreateUserResponse = decode(
            r#"{"name": "morpheus", "job": "leader", "id": "481", "createdAt": "2024-05-01T10:20:30.123Z", "updatedAt": null}"#,
        )
        .unwrap();
        assert_eq!(created.id, "481");
        assert_eq!(created.created_at, "2024-05-01T10:20:30.123Z");
    }

    #[test]
    fn test_resource_response_decodes() {
        let res: ResourceResponse = decode(
            r##"{"data": {"id": 2, "name": "fuchsia rose", "year": 2001, "color": "#C74375", "pantone_value": "17-2031"}}"##,
        )
        .unwrap();
        assert_eq!(res.resource.name, "fuchsia rose");
        assert_eq!(res.support, None);
    }
}
