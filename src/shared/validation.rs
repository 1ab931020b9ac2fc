//! Field validation for every entity stored by the service.
//!
//! Inputs arrive as raw JSON values so that absence, falsy values and type
//! mismatches can be told apart. Each validator either returns the
//! normalized value or a [`ValidationError`] naming the offending field.
//!
//! A value is *falsy* when it is absent, `null`, `false`, the number `0`
//! or the empty string. Falsy values are reported as missing, which means
//! [`valid_number`] rejects zero.

use lazy_static::lazy_static;
use mongodb::bson::oid::ObjectId;
use regex::Regex;
use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;
use utoipa::ToSchema;

lazy_static! {
    /// Regex for validating uploaded file URLs
    /// Must end in a supported document or image extension (case-insensitive)
    /// - Valid: "plans/floor.pdf", "site.jpeg", "SCAN.PNG"
    /// - Invalid: "notes.txt", "pdf", ".pdf"
    pub static ref FILE_URL_REGEX: Regex = Regex::new(r"(?i)^.+\.(pdf|jpeg|png)$").unwrap();

    /// Regex for validating locations in "City, State/Country" form
    /// - Valid: "Hoboken, New Jersey", "Saint-Denis, France", "O'Fallon, Missouri"
    /// - Invalid: "Hoboken,NJ", "Hoboken", "Area 51, Nevada"
    pub static ref LOCATION_REGEX: Regex =
        Regex::new(r"^[A-Za-z\s\-']+, [A-Za-z\s\-']+$").unwrap();
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("You must supply a {0}")]
    MissingField(String),

    #[error("{field} must be a {expected}")]
    TypeMismatch {
        field: String,
        expected: &'static str,
    },

    #[error("{0} cannot be an empty string or string with just spaces")]
    EmptyValue(String),

    #[error("{0} is an invalid object ID")]
    InvalidIdFormat(String),

    #[error("{field} is not valid, expected {expected}")]
    InvalidFormat {
        field: String,
        expected: &'static str,
    },

    #[error("{0} cannot be negative")]
    NegativeValue(String),

    #[error("'{value}' is not a valid {field}")]
    InvalidEnum { field: String, value: String },
}

pub type ValidationResult<T> = std::result::Result<T, ValidationError>;

/// Returns true when the value counts as supplied (present and not falsy)
pub fn is_supplied(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => false,
        Some(Value::Bool(b)) => *b,
        Some(Value::Number(n)) => n.as_f64() != Some(0.0),
        Some(Value::String(s)) => !s.is_empty(),
        Some(Value::Array(_)) | Some(Value::Object(_)) => true,
    }
}

// =============================================================================
// SCALAR VALIDATORS
// =============================================================================

pub fn valid_string(value: Option<&Value>, name: &str) -> ValidationResult<String> {
    if !is_supplied(value) {
        return Err(ValidationError::MissingField(name.to_string()));
    }

    let raw = value
        .and_then(Value::as_str)
        .ok_or_else(|| ValidationError::TypeMismatch {
            field: name.to_string(),
            expected: "string",
        })?;

    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::EmptyValue(name.to_string()));
    }

    Ok(trimmed.to_string())
}

pub fn valid_number(value: Option<&Value>, name: &str) -> ValidationResult<f64> {
    if !is_supplied(value) {
        return Err(ValidationError::MissingField(name.to_string()));
    }

    let number = value
        .and_then(Value::as_f64)
        .ok_or_else(|| ValidationError::TypeMismatch {
            field: name.to_string(),
            expected: "number",
        })?;

    if number < 0.0 {
        return Err(ValidationError::NegativeValue(name.to_string()));
    }

    Ok(number)
}

/// Validates a 24 hex character object id
pub fn valid_id(value: Option<&Value>, name: &str) -> ValidationResult<ObjectId> {
    let id = valid_string(value, name)?;
    ObjectId::parse_str(&id).map_err(|_| ValidationError::InvalidIdFormat(name.to_string()))
}

pub fn valid_file_url(value: Option<&Value>, name: &str) -> ValidationResult<String> {
    let file_url = valid_string(value, name)?;
    if !FILE_URL_REGEX.is_match(&file_url) {
        return Err(ValidationError::InvalidFormat {
            field: name.to_string(),
            expected: "a .pdf, .jpeg or .png file URL",
        });
    }

    Ok(file_url)
}

pub fn valid_status(value: Option<&Value>, allowed: &[&str]) -> ValidationResult<String> {
    let status = valid_string(value, "status")?;
    if !allowed.contains(&status.as_str()) {
        return Err(ValidationError::InvalidEnum {
            field: "status".to_string(),
            value: status,
        });
    }

    Ok(status)
}

pub fn valid_location(value: Option<&Value>) -> ValidationResult<String> {
    let location = valid_string(value, "location")?;
    if !LOCATION_REGEX.is_match(&location) {
        return Err(ValidationError::InvalidFormat {
            field: "location".to_string(),
            expected: "'City, State/Country'",
        });
    }

    Ok(location)
}

/// Validates a string received outside a JSON body, e.g. a path segment
pub fn string_param(value: &str, name: &str) -> ValidationResult<String> {
    valid_string(Some(&Value::from(value)), name)
}

/// Validates an object id received outside a JSON body, e.g. a path segment
pub fn id_param(value: &str, name: &str) -> ValidationResult<ObjectId> {
    valid_id(Some(&Value::from(value)), name)
}

// =============================================================================
// SEQUENCE VALIDATORS
// =============================================================================

fn as_array<'a>(value: Option<&'a Value>, name: &str) -> ValidationResult<&'a Vec<Value>> {
    match value {
        None | Some(Value::Null) => Err(ValidationError::MissingField(name.to_string())),
        Some(Value::Array(items)) => Ok(items),
        Some(_) => Err(ValidationError::TypeMismatch {
            field: name.to_string(),
            expected: "list",
        }),
    }
}

/// Validates every element of an id list, e.g. `employees` or `reports`
pub fn valid_id_list(value: Option<&Value>, name: &str) -> ValidationResult<Vec<ObjectId>> {
    as_array(value, name)?
        .iter()
        .enumerate()
        .map(|(i, item)| valid_id(Some(item), &format!("{}[{}]", name, i)))
        .collect()
}

/// Validates every tag and returns them trimmed
pub fn valid_tags(value: Option<&Value>, name: &str) -> ValidationResult<Vec<String>> {
    as_array(value, name)?
        .iter()
        .enumerate()
        .map(|(i, item)| valid_string(Some(item), &format!("{}[{}]", name, i)))
        .collect()
}

/// Fails with `MissingField` for the first field that is not supplied
fn require_all(fields: &[(&str, &Option<Value>)]) -> ValidationResult<()> {
    for &(name, value) in fields {
        if !is_supplied(value.as_ref()) {
            return Err(ValidationError::MissingField(name.to_string()));
        }
    }
    Ok(())
}

// =============================================================================
// COMPOSITE VALIDATORS
// =============================================================================

#[allow(dead_code)]
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserInput {
    pub username: Option<Value>,
    pub password: Option<Value>,
    pub role: Option<Value>,
    pub projects: Option<Value>,
    pub company_id: Option<Value>,
}

#[allow(dead_code)]
#[derive(Debug, Clone, PartialEq)]
pub struct ValidUser {
    pub username: String,
    pub password: String,
    pub role: String,
    pub projects: Vec<ObjectId>,
    pub company_id: ObjectId,
}

#[allow(dead_code)]
pub fn valid_user(input: &UserInput) -> ValidationResult<ValidUser> {
    require_all(&[
        ("username", &input.username),
        ("password", &input.password),
        ("role", &input.role),
        ("projects", &input.projects),
        ("companyId", &input.company_id),
    ])?;

    Ok(ValidUser {
        username: valid_string(input.username.as_ref(), "username")?,
        password: valid_string(input.password.as_ref(), "password")?,
        role: valid_string(input.role.as_ref(), "role")?,
        projects: valid_id_list(input.projects.as_ref(), "projects")?,
        company_id: valid_id(input.company_id.as_ref(), "companyId")?,
    })
}

#[allow(dead_code)]
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectInput {
    pub title: Option<Value>,
    pub description: Option<Value>,
    pub budget: Option<Value>,
    pub status: Option<Value>,
    pub employees: Option<Value>,
    pub tasks: Option<Value>,
    pub blueprints: Option<Value>,
    pub reports: Option<Value>,
    pub company_id: Option<Value>,
}

#[allow(dead_code)]
#[derive(Debug, Clone, PartialEq)]
pub struct ValidProject {
    pub title: String,
    pub description: String,
    pub budget: f64,
    pub status: String,
    pub employees: Vec<ObjectId>,
    pub tasks: Vec<ObjectId>,
    pub blueprints: Vec<ObjectId>,
    pub reports: Vec<ObjectId>,
    pub company_id: ObjectId,
}

#[allow(dead_code)]
pub fn valid_project(input: &ProjectInput, statuses: &[&str]) -> ValidationResult<ValidProject> {
    require_all(&[
        ("title", &input.title),
        ("description", &input.description),
        ("budget", &input.budget),
        ("status", &input.status),
        ("employees", &input.employees),
        ("tasks", &input.tasks),
        ("blueprints", &input.blueprints),
        ("reports", &input.reports),
        ("companyId", &input.company_id),
    ])?;

    Ok(ValidProject {
        title: valid_string(input.title.as_ref(), "title")?,
        description: valid_string(input.description.as_ref(), "description")?,
        budget: valid_number(input.budget.as_ref(), "budget")?,
        status: valid_status(input.status.as_ref(), statuses)?,
        employees: valid_id_list(input.employees.as_ref(), "employees")?,
        tasks: valid_id_list(input.tasks.as_ref(), "tasks")?,
        blueprints: valid_id_list(input.blueprints.as_ref(), "blueprints")?,
        reports: valid_id_list(input.reports.as_ref(), "reports")?,
        company_id: valid_id(input.company_id.as_ref(), "companyId")?,
    })
}

#[allow(dead_code)]
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskInput {
    pub title: Option<Value>,
    pub description: Option<Value>,
    pub cost: Option<Value>,
    pub status: Option<Value>,
    pub assigned_to: Option<Value>,
    pub project_id: Option<Value>,
}

#[allow(dead_code)]
#[derive(Debug, Clone, PartialEq)]
pub struct ValidTask {
    pub title: String,
    pub description: String,
    pub cost: f64,
    pub status: String,
    pub assigned_to: ObjectId,
    pub project_id: ObjectId,
}

#[allow(dead_code)]
pub fn valid_task(input: &TaskInput, statuses: &[&str]) -> ValidationResult<ValidTask> {
    require_all(&[
        ("title", &input.title),
        ("description", &input.description),
        ("cost", &input.cost),
        ("status", &input.status),
        ("assignedTo", &input.assigned_to),
        ("projectId", &input.project_id),
    ])?;

    Ok(ValidTask {
        title: valid_string(input.title.as_ref(), "title")?,
        description: valid_string(input.description.as_ref(), "description")?,
        cost: valid_number(input.cost.as_ref(), "cost")?,
        status: valid_status(input.status.as_ref(), statuses)?,
        assigned_to: valid_id(input.assigned_to.as_ref(), "assignedTo")?,
        project_id: valid_id(input.project_id.as_ref(), "projectId")?,
    })
}

#[allow(dead_code)]
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlueprintInput {
    pub title: Option<Value>,
    pub file_url: Option<Value>,
    pub tags: Option<Value>,
    pub uploaded_by: Option<Value>,
    pub project_id: Option<Value>,
}

#[allow(dead_code)]
#[derive(Debug, Clone, PartialEq)]
pub struct ValidBlueprint {
    pub title: String,
    pub file_url: String,
    pub tags: Vec<String>,
    pub uploaded_by: ObjectId,
    pub project_id: ObjectId,
}

#[allow(dead_code)]
pub fn valid_blueprint(input: &BlueprintInput) -> ValidationResult<ValidBlueprint> {
    require_all(&[
        ("title", &input.title),
        ("fileUrl", &input.file_url),
        ("tags", &input.tags),
        ("uploadedBy", &input.uploaded_by),
        ("projectId", &input.project_id),
    ])?;

    Ok(ValidBlueprint {
        title: valid_string(input.title.as_ref(), "title")?,
        file_url: valid_file_url(input.file_url.as_ref(), "fileUrl")?,
        tags: valid_tags(input.tags.as_ref(), "tags")?,
        uploaded_by: valid_id(input.uploaded_by.as_ref(), "uploadedBy")?,
        project_id: valid_id(input.project_id.as_ref(), "projectId")?,
    })
}

/// Raw report fields as received in a request body
///
/// Used for creation (all fields), full replacement (every field except
/// `projectId`) and partial updates (any subset).
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReportInput {
    #[schema(value_type = Option<String>)]
    pub title: Option<Value>,
    #[schema(value_type = Option<String>)]
    pub description: Option<Value>,
    #[schema(value_type = Option<String>, example = "reports/site-inspection.pdf")]
    pub file_url: Option<Value>,
    #[schema(value_type = Option<Vec<String>>)]
    pub tags: Option<Value>,
    #[schema(value_type = Option<String>, example = "65f1a2b3c4d5e6f708192a3b")]
    pub uploaded_by: Option<Value>,
    #[schema(value_type = Option<String>, example = "65f1a2b3c4d5e6f708192a3c")]
    pub project_id: Option<Value>,
}

/// The report fields a full replacement overwrites
#[derive(Debug, Clone, PartialEq)]
pub struct ValidReportContent {
    pub title: String,
    pub description: String,
    pub file_url: String,
    pub tags: Vec<String>,
    pub uploaded_by: ObjectId,
}

#[allow(dead_code)]
#[derive(Debug, Clone, PartialEq)]
pub struct ValidReport {
    pub content: ValidReportContent,
    pub project_id: ObjectId,
}

pub fn valid_report_content(input: &ReportInput) -> ValidationResult<ValidReportContent> {
    require_all(&[
        ("title", &input.title),
        ("description", &input.description),
        ("fileUrl", &input.file_url),
        ("tags", &input.tags),
        ("uploadedBy", &input.uploaded_by),
    ])?;

    Ok(ValidReportContent {
        title: valid_string(input.title.as_ref(), "title")?,
        description: valid_string(input.description.as_ref(), "description")?,
        file_url: valid_file_url(input.file_url.as_ref(), "fileUrl")?,
        tags: valid_tags(input.tags.as_ref(), "tags")?,
        uploaded_by: valid_id(input.uploaded_by.as_ref(), "uploadedBy")?,
    })
}

#[allow(dead_code)]
pub fn valid_report(input: &ReportInput) -> ValidationResult<ValidReport> {
    require_all(&[
        ("title", &input.title),
        ("description", &input.description),
        ("fileUrl", &input.file_url),
        ("tags", &input.tags),
        ("uploadedBy", &input.uploaded_by),
        ("projectId", &input.project_id),
    ])?;

    Ok(ValidReport {
        content: valid_report_content(input)?,
        project_id: valid_id(input.project_id.as_ref(), "projectId")?,
    })
}

#[allow(dead_code)]
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompanyInput {
    pub title: Option<Value>,
    pub location: Option<Value>,
    pub industry: Option<Value>,
    pub owner_id: Option<Value>,
    pub employees: Option<Value>,
    pub projects: Option<Value>,
}

#[allow(dead_code)]
#[derive(Debug, Clone, PartialEq)]
pub struct ValidCompany {
    pub title: String,
    pub location: String,
    pub industry: String,
    pub owner_id: ObjectId,
    pub employees: Vec<ObjectId>,
    pub projects: Vec<ObjectId>,
}

#[allow(dead_code)]
pub fn valid_company(input: &CompanyInput) -> ValidationResult<ValidCompany> {
    require_all(&[
        ("title", &input.title),
        ("location", &input.location),
        ("industry", &input.industry),
        ("ownerId", &input.owner_id),
        ("employees", &input.employees),
        ("projects", &input.projects),
    ])?;

    Ok(ValidCompany {
        title: valid_string(input.title.as_ref(), "title")?,
        location: valid_location(input.location.as_ref())?,
        industry: valid_string(input.industry.as_ref(), "industry")?,
        owner_id: valid_id(input.owner_id.as_ref(), "ownerId")?,
        employees: valid_id_list(input.employees.as_ref(), "employees")?,
        projects: valid_id_list(input.projects.as_ref(), "projects")?,
    })
}
