use regex::Regex;
use std::sync::OnceLock;

use crate::logic::error::{FieldError, OpError, OpResult};
use crate::model::{
    generate_id, non_blank, normalize_email, parse_calendar_date, Credentials, Education,
    Experience, NewEducation, NewExperience, NewUser, ProfileFields, TextBody,
};

pub const MIN_PASSWORD_LEN: usize = 6;

static EMAIL_PATTERN: OnceLock<Regex> = OnceLock::new();

fn email_regex() -> &'static Regex {
    EMAIL_PATTERN.get_or_init(|| {
        Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern is valid")
    })
}

pub fn is_valid_email(email: &str) -> bool {
    email_regex().is_match(email.trim())
}

/// Accumulates field errors so every problem is reported at once.
#[derive(Debug, Default)]
struct Checks {
    errors: Vec<FieldError>,
}

impl Checks {
    fn required(&mut self, param: &str, value: &Option<String>, msg: &str) -> Option<String> {
        let value = non_blank(value);
        if value.is_none() {
            self.errors.push(FieldError::new(param, msg));
        }
        value
    }

    fn date(&mut self, param: &str, value: &Option<String>, required_msg: &str) -> Option<chrono::NaiveDate> {
        let raw = self.required(param, value, required_msg)?;
        let parsed = parse_calendar_date(&raw);
        if parsed.is_none() {
            self.errors
                .push(FieldError::new(param, format!("{} is not a valid date", param)));
        }
        parsed
    }

    fn optional_date(&mut self, param: &str, value: &Option<String>) -> Option<chrono::NaiveDate> {
        let raw = non_blank(value)?;
        let parsed = parse_calendar_date(&raw);
        if parsed.is_none() {
            self.errors
                .push(FieldError::new(param, format!("{} is not a valid date", param)));
        }
        parsed
    }

    fn push(&mut self, param: &str, msg: &str) {
        self.errors.push(FieldError::new(param, msg));
    }

    fn finish(self) -> OpResult<()> {
        if self.errors.is_empty() {
            Ok(())
        } else {
            Err(OpError::Validation(self.errors))
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Registration {
    pub name: String,
    pub email: String,
    pub password: String,
}

pub fn registration(input: &NewUser) -> OpResult<Registration> {
    let mut checks = Checks::default();
    let name = checks.required("name", &input.name, "Name is required");

    let email = non_blank(&input.email).filter(|e| is_valid_email(e));
    if email.is_none() {
        checks.push("email", "Please include a valid email");
    }

    let password = input
        .password
        .clone()
        .filter(|p| p.chars().count() >= MIN_PASSWORD_LEN);
    if password.is_none() {
        checks.push(
            "password",
            "Please enter a password with 6 or more characters",
        );
    }

    checks.finish()?;
    match (name, email, password) {
        (Some(name), Some(email), Some(password)) => Ok(Registration {
            name,
            email: normalize_email(&email),
            password,
        }),
        _ => Err(OpError::Validation(Vec::new())),
    }
}

pub fn login(input: &Credentials) -> OpResult<(String, String)> {
    let mut checks = Checks::default();

    let email = non_blank(&input.email).filter(|e| is_valid_email(e));
    if email.is_none() {
        checks.push("email", "Please include a valid email");
    }
    let password = input.password.clone().filter(|p| !p.is_empty());
    if password.is_none() {
        checks.push("password", "Password is required");
    }

    checks.finish()?;
    match (email, password) {
        (Some(email), Some(password)) => Ok((normalize_email(&email), password)),
        _ => Err(OpError::Validation(Vec::new())),
    }
}

pub fn profile_fields(input: &ProfileFields) -> OpResult<()> {
    let mut checks = Checks::default();
    checks.required("status", &input.status, "Status is required");
    if input.skill_list().is_empty() {
        checks.push("skills", "Skills is required");
    }
    checks.finish()
}

/// Validate and build a new experience entry with a fresh id.
pub fn experience(input: &NewExperience) -> OpResult<Experience> {
    let mut checks = Checks::default();
    let title = checks.required("title", &input.title, "Title is required");
    let company = checks.required("company", &input.company, "Company is required");
    let from = checks.date("from", &input.from, "From date is required");
    let to = checks.optional_date("to", &input.to);
    checks.finish()?;

    match (title, company, from) {
        (Some(title), Some(company), Some(from)) => Ok(Experience {
            id: generate_id(),
            title,
            company,
            location: non_blank(&input.location),
            from,
            to,
            current: input.current.unwrap_or(false),
            description: non_blank(&input.description),
        }),
        _ => Err(OpError::Validation(Vec::new())),
    }
}

/// Validate and build a new education entry with a fresh id.
pub fn education(input: &NewEducation) -> OpResult<Education> {
    let mut checks = Checks::default();
    let school = checks.required("school", &input.school, "School is required");
    let degree = checks.required("degree", &input.degree, "Degree is required");
    let fieldofstudy =
        checks.required("fieldofstudy", &input.fieldofstudy, "Field of study is required");
    let from = checks.date("from", &input.from, "From date is required");
    let to = checks.optional_date("to", &input.to);
    if input.current.is_none() {
        checks.push("current", "Current is required");
    }
    checks.finish()?;

    match (school, degree, fieldofstudy, from) {
        (Some(school), Some(degree), Some(fieldofstudy), Some(from)) => Ok(Education {
            id: generate_id(),
            school,
            degree,
            fieldofstudy,
            from,
            to,
            current: input.current.unwrap_or(false),
            description: non_blank(&input.description),
        }),
        _ => Err(OpError::Validation(Vec::new())),
    }
}

pub fn text(input: &TextBody) -> OpResult<String> {
    let mut checks = Checks::default();
    let text = checks.required("text", &input.text, "Text is required");
    checks.finish()?;
    text.ok_or_else(|| OpError::Validation(Vec::new()))
}

/// GitHub logins: alphanumerics and single hyphens, at most 39 characters.
pub fn github_username(username: &str) -> OpResult<()> {
    let valid = !username.is_empty()
        && username.len() <= 39
        && !username.starts_with('-')
        && username.chars().all(|c| c.is_ascii_alphanumeric() || c == '-');
    if valid {
        Ok(())
    } else {
        Err(OpError::Validation(vec![FieldError::new(
            "username",
            "Invalid GitHub username",
        )]))
    }
}
