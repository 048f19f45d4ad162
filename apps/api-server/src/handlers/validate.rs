//! Request validation. Error keys match the JSON field names.

use std::collections::BTreeMap;

use quill_shared::dto::{CommentRequest, LoginRequest, PostRequest, RegisterRequest};

use crate::middleware::error::ApiError;

fn check(errors: &mut BTreeMap<String, String>, field: &str, ok: bool, message: &str) {
    if !ok {
        errors.insert(field.to_string(), message.to_string());
    }
}

fn finish(errors: BTreeMap<String, String>) -> Result<(), ApiError> {
    if errors.is_empty() {
        Ok(())
    } else {
        Err(ApiError::Validation(errors))
    }
}

pub fn register(req: &RegisterRequest) -> Result<(), ApiError> {
    let mut errors = BTreeMap::new();
    check(
        &mut errors,
        "firstName",
        !req.first_name.trim().is_empty(),
        "First name should not be blank",
    );
    check(
        &mut errors,
        "lastName",
        !req.last_name.trim().is_empty(),
        "Last name should not be blank",
    );
    check(&mut errors, "email", req.email.contains('@'), "Email should be valid");
    check(
        &mut errors,
        "password",
        req.password.len() >= 8,
        "Password should be at least 8 characters",
    );
    check(
        &mut errors,
        "repeatPassword",
        !req.repeat_password.trim().is_empty(),
        "Repeated password should not be blank",
    );
    finish(errors)
}

pub fn login(req: &LoginRequest) -> Result<(), ApiError> {
    let mut errors = BTreeMap::new();
    check(&mut errors, "email", req.email.contains('@'), "Email should be valid");
    check(
        &mut errors,
        "password",
        !req.password.is_empty(),
        "Password should not be blank",
    );
    finish(errors)
}

pub fn post(req: &PostRequest) -> Result<(), ApiError> {
    let mut errors = BTreeMap::new();
    check(
        &mut errors,
        "title",
        !req.title.trim().is_empty(),
        "Title should not be blank",
    );
    check(
        &mut errors,
        "content",
        !req.content.trim().is_empty(),
        "Content should not be blank",
    );
    check(
        &mut errors,
        "categories",
        !req.categories.is_empty(),
        "Categories should not be empty",
    );
    check(&mut errors, "tags", !req.tags.is_empty(), "Tags should not be empty");
    finish(errors)
}

pub fn name(value: &str) -> Result<(), ApiError> {
    let mut errors = BTreeMap::new();
    check(
        &mut errors,
        "name",
        !value.trim().is_empty(),
        "Name should not be blank",
    );
    finish(errors)
}

pub fn comment(req: &CommentRequest) -> Result<(), ApiError> {
    let mut errors = BTreeMap::new();
    check(
        &mut errors,
        "content",
        !req.content.trim().is_empty(),
        "Content should not be blank",
    );
    finish(errors)
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use super::*;

    #[test]
    fn test_register_reports_every_bad_field() {
        let req = RegisterRequest {
            first_name: " ".to_string(),
            last_name: "Doe".to_string(),
            email: "not-an-email".to_string(),
            password: "short".to_string(),
            repeat_password: "".to_string(),
        };

        let err = register(&req).unwrap_err();
        let ApiError::Validation(fields) = err else {
            panic!("expected validation error");
        };
        assert_eq!(
            fields.keys().collect::<Vec<_>>(),
            vec!["email", "firstName", "password", "repeatPassword"]
        );
        assert_eq!(fields["email"], "Email should be valid");
    }

    #[test]
    fn test_register_accepts_a_complete_request() {
        let req = RegisterRequest {
            first_name: "John".to_string(),
            last_name: "Doe".to_string(),
            email: "john@example.com".to_string(),
            password: "long-enough".to_string(),
            repeat_password: "long-enough".to_string(),
        };

        assert!(register(&req).is_ok());
    }

    #[test]
    fn test_post_requires_non_empty_association_sets() {
        let req = PostRequest {
            title: "Hello".to_string(),
            content: "World".to_string(),
            categories: BTreeSet::new(),
            tags: BTreeSet::from(["rust".to_string()]),
        };

        let err = post(&req).unwrap_err();
        let ApiError::Validation(fields) = err else {
            panic!("expected validation error");
        };
        assert_eq!(fields.keys().collect::<Vec<_>>(), vec!["categories"]);
    }
}
