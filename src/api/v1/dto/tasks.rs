/*
 * Responsibility
 * - Task request DTOs + their field checks
 * - Built from the raw JSON object so that every bad field (wrong type,
 *   missing, or breaking a rule) shows up as its own violation
 */
use chrono::DateTime;
use serde_json::Value;

use crate::api::v1::extractors::{BodyFields, Validate};
use crate::error::ValidationErrors;

pub const TASK_CATEGORIES: &[&str] = &["HOMEWORK", "PROJECT", "TEST", "QUIZ", "LOST_ITEM", "PERSONAL"];
pub const PRIORITIES: &[&str] = &["LOW", "MEDIUM", "HIGH"];
pub const TASK_STATUSES: &[&str] = &["PENDING", "COMPLETED", "OVERDUE"];

const TITLE_MAX: usize = 200;
const DESCRIPTION_MAX: usize = 2000;
const SUBJECT_MAX: usize = 100;

#[derive(Debug)]
pub struct CreateTaskRequest {
    pub title: String,
    pub description: Option<String>,
    pub due_date: Option<String>,
    pub category: String,
    pub priority: Option<String>,
    pub subject: Option<String>,
}

#[derive(Debug)]
pub struct UpdateTaskRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub due_date: Option<String>,
    pub category: Option<String>,
    pub priority: Option<String>,
    pub status: Option<String>,
    pub subject: Option<String>,
}

fn check_title(errors: &mut ValidationErrors, title: Option<&str>) {
    let Some(title) = title else { return };
    if title.trim().is_empty() {
        errors.push("title", "Title is required");
    } else if title.chars().count() > TITLE_MAX {
        errors.push("title", format!("Title must be at most {TITLE_MAX} characters"));
    }
}

fn check_max_len(errors: &mut ValidationErrors, field: &str, value: Option<&str>, max: usize) {
    if let Some(v) = value
        && v.chars().count() > max
    {
        errors.push(field, format!("Must be at most {max} characters"));
    }
}

fn check_datetime(errors: &mut ValidationErrors, field: &str, value: Option<&str>) {
    if let Some(v) = value
        && DateTime::parse_from_rfc3339(v).is_err()
    {
        errors.push(field, "Invalid datetime");
    }
}

fn check_one_of(errors: &mut ValidationErrors, field: &str, value: Option<&str>, allowed: &[&str]) {
    if let Some(v) = value
        && !allowed.contains(&v)
    {
        errors.push(
            field,
            format!("Invalid enum value. Expected {}, received '{v}'", allowed.join(" | ")),
        );
    }
}

impl Validate for CreateTaskRequest {
    fn from_value(body: &Value) -> Result<Self, ValidationErrors> {
        let mut fields = BodyFields::new(body)?;

        let title = fields.required_string("title");
        check_title(fields.errors(), title);
        let description = fields.string("description");
        check_max_len(fields.errors(), "description", description, DESCRIPTION_MAX);
        let due_date = fields.string("dueDate");
        check_datetime(fields.errors(), "dueDate", due_date);
        let category = fields.required_string("category");
        check_one_of(fields.errors(), "category", category, TASK_CATEGORIES);
        let priority = fields.string("priority");
        check_one_of(fields.errors(), "priority", priority, PRIORITIES);
        let subject = fields.string("subject");
        check_max_len(fields.errors(), "subject", subject, SUBJECT_MAX);

        fields.finish()?;

        // Both required fields are present once finish() passed
        Ok(Self {
            title: title.unwrap_or_default().to_string(),
            description: description.map(str::to_string),
            due_date: due_date.map(str::to_string),
            category: category.unwrap_or_default().to_string(),
            priority: priority.map(str::to_string),
            subject: subject.map(str::to_string),
        })
    }
}

impl Validate for UpdateTaskRequest {
    fn from_value(body: &Value) -> Result<Self, ValidationErrors> {
        let mut fields = BodyFields::new(body)?;

        let title = fields.string("title");
        check_title(fields.errors(), title);
        let description = fields.string("description");
        check_max_len(fields.errors(), "description", description, DESCRIPTION_MAX);
        let due_date = fields.string("dueDate");
        check_datetime(fields.errors(), "dueDate", due_date);
        let category = fields.string("category");
        check_one_of(fields.errors(), "category", category, TASK_CATEGORIES);
        let priority = fields.string("priority");
        check_one_of(fields.errors(), "priority", priority, PRIORITIES);
        let status = fields.string("status");
        check_one_of(fields.errors(), "status", status, TASK_STATUSES);
        let subject = fields.string("subject");
        check_max_len(fields.errors(), "subject", subject, SUBJECT_MAX);

        fields.finish()?;

        Ok(Self {
            title: title.map(str::to_string),
            description: description.map(str::to_string),
            due_date: due_date.map(str::to_string),
            category: category.map(str::to_string),
            priority: priority.map(str::to_string),
            status: status.map(str::to_string),
            subject: subject.map(str::to_string),
        })
    }
}
