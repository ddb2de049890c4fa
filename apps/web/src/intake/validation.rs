//! Field validation for the sign-up form.
//!
//! Rules live in one ordered table and are evaluated top to bottom. The first
//! rule that fails decides the message shown to the applicant; later rules are
//! not consulted.

use std::fmt;
use std::sync::OnceLock;

use regex::Regex;

use crate::intake::models::{
    ApplicationSubmission, FormField, JobRole, Qualification, ValidatedSubmission, RESUME_PART,
};

pub const NAME_MAX_CHARS: usize = 20;
pub const PHONE_DIGITS: usize = 10;

/// What a rule is attached to: one of the text fields, or the resume upload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Subject {
    Field(FormField),
    Resume,
}

impl Subject {
    pub fn wire_name(self) -> &'static str {
        match self {
            Subject::Field(field) => field.wire_name(),
            Subject::Resume => RESUME_PART,
        }
    }
}

/// The first rule a candidate submission broke.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    pub subject: Subject,
    pub message: &'static str,
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.subject.wire_name(), self.message)
    }
}

impl std::error::Error for Violation {}

struct Rule {
    subject: Subject,
    check: fn(&ApplicationSubmission) -> bool,
    message: &'static str,
}

const RULES: &[Rule] = &[
    Rule {
        subject: Subject::Field(FormField::Name),
        check: |s| !s.name.is_empty(),
        message: "Name is required",
    },
    Rule {
        subject: Subject::Field(FormField::Name),
        check: |s| s.name.chars().count() <= NAME_MAX_CHARS,
        message: "Name length should be less than 20",
    },
    Rule {
        subject: Subject::Field(FormField::Email),
        check: |s| !s.email.is_empty(),
        message: "Email is required",
    },
    Rule {
        subject: Subject::Field(FormField::Email),
        check: |s| is_email(&s.email),
        message: "Invalid email address",
    },
    Rule {
        subject: Subject::Field(FormField::Phone),
        check: |s| !s.phone.is_empty(),
        message: "Phone number is required",
    },
    Rule {
        subject: Subject::Field(FormField::Phone),
        check: |s| is_digits(&s.phone),
        message: "Phone number must contain only digits",
    },
    Rule {
        subject: Subject::Field(FormField::Phone),
        check: |s| s.phone.len() == PHONE_DIGITS,
        message: "Phone number must be exactly 10 digits",
    },
    Rule {
        subject: Subject::Field(FormField::HighestQualification),
        check: |s| !s.highest_qualification.is_empty(),
        message: "Highest qualification is required",
    },
    Rule {
        subject: Subject::Field(FormField::HighestQualification),
        check: |s| Qualification::from_label(&s.highest_qualification).is_some(),
        message: "Highest qualification must be one of: High School, Diploma, Bachelors, Masters, PhD",
    },
    Rule {
        subject: Subject::Field(FormField::DesiredJobRole),
        check: |s| !s.desired_job_role.is_empty(),
        message: "Desired job role is required",
    },
    Rule {
        subject: Subject::Field(FormField::DesiredJobRole),
        check: |s| JobRole::from_label(&s.desired_job_role).is_some(),
        message: "Desired job role must be one of: Software Developer, Data Scientist, Project Manager, UI/UX Designer",
    },
    Rule {
        subject: Subject::Field(FormField::Experience),
        check: |s| !s.experience.is_empty(),
        message: "Experience is required",
    },
    Rule {
        subject: Subject::Field(FormField::Experience),
        check: |s| is_digits(&s.experience),
        message: "Experience must contain only digits",
    },
    Rule {
        subject: Subject::Field(FormField::ExpectedCtc),
        check: |s| !s.expected_ctc.is_empty(),
        message: "Expected CTC is required",
    },
    Rule {
        subject: Subject::Field(FormField::ExpectedCtc),
        check: |s| is_digits(&s.expected_ctc),
        message: "CTC must contain only digits",
    },
    Rule {
        subject: Subject::Resume,
        check: |s| s.resume.as_ref().is_some_and(|file| file.has_accepted_type()),
        message: "Resume must be a PDF or DOCX file",
    },
];

/// Checks a candidate against every rule in declaration order.
///
/// Returns the first violation, or a [`ValidatedSubmission`] carrying the
/// parsed enumerations and the resume. The candidate itself is left untouched.
pub fn validate(candidate: &ApplicationSubmission) -> Result<ValidatedSubmission, Violation> {
    if let Some(rule) = RULES.iter().find(|rule| !(rule.check)(candidate)) {
        return Err(Violation {
            subject: rule.subject,
            message: rule.message,
        });
    }

    // The table above already proved these; the lookups only recover the typed values.
    let qualification = Qualification::from_label(&candidate.highest_qualification)
        .ok_or_else(|| rule_violation(Subject::Field(FormField::HighestQualification)))?;
    let job_role = JobRole::from_label(&candidate.desired_job_role)
        .ok_or_else(|| rule_violation(Subject::Field(FormField::DesiredJobRole)))?;
    let resume = candidate
        .resume
        .clone()
        .ok_or_else(|| rule_violation(Subject::Resume))?;

    Ok(ValidatedSubmission {
        fields: ApplicationSubmission {
            resume: None,
            ..candidate.clone()
        },
        qualification,
        job_role,
        resume,
    })
}

fn rule_violation(subject: Subject) -> Violation {
    let message = RULES
        .iter()
        .rev()
        .find(|rule| rule.subject == subject)
        .map(|rule| rule.message)
        .unwrap_or("Invalid value");
    Violation { subject, message }
}

fn is_digits(value: &str) -> bool {
    !value.is_empty() && value.bytes().all(|b| b.is_ascii_digit())
}

fn email_pattern() -> &'static Regex {
    static EMAIL: OnceLock<Regex> = OnceLock::new();
    EMAIL.get_or_init(|| {
        Regex::new(r"(?i)^[a-z0-9_'+\-.]*[a-z0-9_+\-]@(?:[a-z0-9][a-z0-9\-]*\.)+[a-z]{2,}$")
            .expect("email pattern is a valid regex")
    })
}

/// Email shape check: no leading dot and no consecutive dots in the local
/// part, at least one dotted domain label, alphabetic TLD of two or more.
pub fn is_email(value: &str) -> bool {
    !value.starts_with('.') && !value.contains("..") && email_pattern().is_match(value)
}
