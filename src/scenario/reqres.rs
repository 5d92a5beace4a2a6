//! Checks against the reqres.in demo API.
//!
//! Expected literals (Janet Weaver, ids 7-12 on page 2, resource 2) are the
//! fixtures the public API serves.

use super::{step, Scenario, Suite, SuiteContext};
use crate::assertion::{
    assert_conforms, assert_field, assert_has_items, assert_non_empty, assert_timestamp,
    AssertionFailure,
};
use crate::error::Result;
use crate::models::{CreateUserRequest, CreateUserResponse, ResourceResponse, UserResponse, UsersPage};
use crate::request::RequestBody;
use crate::response::ResponseSpec;
use crate::schema::SINGLE_RESOURCE_SCHEMA;
use crate::validator::validate;
use serde_json::{json, Value};

pub const USER_ID: i64 = 2;
pub const USER_FIRST_NAME: &str = "Janet";
pub const USER_LAST_NAME: &str = "Weaver";
pub const MISSING_USER_ID: i64 = 23;
pub const USERS_PAGE: u32 = 2;
pub const USERS_PAGE_IDS: [i64; 6] = [7, 8, 9, 10, 11, 12];
pub const NEW_USER_NAME: &str = "morpheus";
pub const NEW_USER_JOB: &str = "leader";
pub const RESOURCE_ID: i64 = 2;
/// Upper bound on the pages `users_pages_are_consistent` requests.
pub const MAX_PAGES: u32 = 20;

/// Schemas the scenarios need; loaded during suite setup.
pub const REQUIRED_SCHEMAS: &[&str] = &[SINGLE_RESOURCE_SCHEMA];

pub fn scenarios() -> Vec<Scenario> {
    vec![
        Scenario::new(
            "get_user_by_id",
            "GET /users/2 returns Janet Weaver",
            get_user_by_id,
        ),
        Scenario::new(
            "get_user_by_missing_id",
            "GET /users/23 returns 404 with an empty body",
            get_user_by_missing_id,
        ),
        Scenario::new(
            "get_users_page",
            "GET /users?page=2 returns users 7 to 12",
            get_users_page,
        ),
        Scenario::new(
            "users_pages_are_consistent",
            "every page echoes its number and holds at most per_page unique users",
            users_pages_are_consistent,
        ),
        Scenario::new(
            "create_user",
            "POST /users echoes name and job with a server-assigned id and createdAt",
            create_user,
        ),
        Scenario::new(
            "get_resource_matches_schema",
            "GET /unknown/2 conforms to the single resource schema",
            get_resource_matches_schema,
        ),
    ]
}

pub fn suite() -> Suite {
    Suite::new(scenarios())
}

pub fn get_user_by_id(ctx: &SuiteContext) -> Result<()> {
    let user = step("Perform request to get user by id", || {
        let response = ctx.request().get(&format!("/users/{USER_ID}"))?;
        ResponseSpec::ok().verify(&response)?;
        response.decode::<UserResponse>()
    })?
    .user;

    step("Check user fields in response", || {
        assert_field("data.id", USER_ID, user.id)?;
        assert_field("data.first_name", USER_FIRST_NAME, user.first_name.as_str())?;
        assert_field("data.last_name", USER_LAST_NAME, user.last_name.as_str())?;
        Ok(())
    })
}

pub fn get_user_by_missing_id(ctx: &SuiteContext) -> Result<()> {
    step("Perform GET user request with non existent id and check status code", || {
        let response = ctx.request().get(&format!("/users/{MISSING_USER_ID}"))?;
        ResponseSpec::not_found().verify(&response)?;
        Ok(())
    })
}

pub fn get_users_page(ctx: &SuiteContext) -> Result<()> {
    let (page, body) = step("Perform request to get list of users on the specified page", || {
        let response = ctx.request().get(&format!("/users?page={USERS_PAGE}"))?;
        ResponseSpec::ok().verify(&response)?;
        Ok((response.decode::<UsersPage>()?, response.json()?))
    })?;

    step("Check page number in response", || Ok(page.check_page(USERS_PAGE)?))?;

    step("Check user ids in response", || {
        let expected: Vec<Value> = USERS_PAGE_IDS.iter().map(|id| json!(id)).collect();
        assert_has_items(&body, "data.id", &expected)?;
        assert_field("data.id", USERS_PAGE_IDS.to_vec(), page.ids())?;
        Ok(page.check_invariants()?)
    })
}

pub fn users_pages_are_consistent(ctx: &SuiteContext) -> Result<()> {
    let first = fetch_page(ctx, 1)?;
    step("Check page count before walking the pages", || {
        first.check_page_count()?;
        if first.total_pages > MAX_PAGES {
            return Err(AssertionFailure::new(
                "total_pages",
                format!("at most {MAX_PAGES}"),
                first.total_pages.to_string(),
            )
            .into());
        }
        Ok(())
    })?;
    for number in 2..=first.total_pages {
        fetch_page(ctx, number)?;
    }
    Ok(())
}

fn fetch_page(ctx: &SuiteContext, number: u32) -> Result<UsersPage> {
    step(&format!("Check users page {number}"), || {
        let response = ctx.request().get(&format!("/users?page={number}"))?;
        ResponseSpec::ok().verify(&response)?;
        let page = response.decode::<UsersPage>()?;
        page.check_page(number)?;
        page.check_invariants()?;
        Ok(page)
    })
}

pub fn create_user(ctx: &SuiteContext) -> Result<()> {
    let request = CreateUserRequest::new(NEW_USER_NAME, NEW_USER_JOB);

    let created = step("Perform request to create user", || {
        let response = ctx.request().post("/users", RequestBody::json(&request)?)?;
        ResponseSpec::created().verify(&response)?;
        response.decode::<CreateUserResponse>()
    })?;

    step("Check user data in response", || {
        assert_field("name", request.name.as_str(), created.name.as_str())?;
        assert_field("job", request.job.as_str(), created.job.as_str())?;
        assert_non_empty("id", &created.id)?;
        assert_non_empty("createdAt", &created.created_at)?;
        Ok(assert_timestamp("createdAt", &created.created_at)?)
    })
}

pub fn get_resource_matches_schema(ctx: &SuiteContext) -> Result<()> {
    let schema = ctx.schema(SINGLE_RESOURCE_SCHEMA)?;
    step(
        "Perform GET resource by id request and check response body for conformance to scheme",
        || {
            let response = ctx.request().get(&format!("/unknown/{RESOURCE_ID}"))?;
            ResponseSpec::ok().verify(&response)?;
            let result = validate(response.body(), &schema);
            assert_conforms(schema.name(), &result)?;
            let resource = response.decode::<ResourceResponse>()?.resource;
            Ok(assert_field("data.id", RESOURCE_ID, resource.id)?)
        },
    )
}
