//! View models for the askama templates under `templates/`.
//!
//! Applicant-supplied text is escaped by the templates. Only fixed labels
//! and paths are marked `|safe`.

use askama::Template;

use crate::intake::controller::Banner;
use crate::intake::models::{FormField, JobRole, Qualification, RESUME_PART};
use crate::intake::FormView;
use crate::navigation::{header_action, Route};

const BRAND: &str = "Hirect";

pub struct HeaderLink {
    pub label: &'static str,
    pub href: &'static str,
}

impl HeaderLink {
    fn for_path(path: &str) -> Self {
        let action = header_action(path);
        Self {
            label: action.label,
            href: action.target.path(),
        }
    }
}

#[derive(Template)]
#[template(path = "landing.html")]
pub struct LandingPage {
    brand: &'static str,
    header: HeaderLink,
    signup_href: &'static str,
}

#[derive(Template)]
#[template(path = "not_found.html")]
pub struct NotFoundPage<'a> {
    brand: &'static str,
    header: HeaderLink,
    path: &'a str,
}

pub struct BannerView {
    pub class: &'static str,
    pub message: String,
    pub dismiss_ms: Option<u128>,
}

pub struct OptionView {
    pub value: &'static str,
    pub selected: bool,
}

/// One row of the sign-up form.
#[derive(Default)]
pub struct FieldRow {
    pub name: &'static str,
    pub label: &'static str,
    pub value: String,
    pub input_type: &'static str,
    pub required: bool,
    pub wide: bool,
    pub min_zero: bool,
    pub textarea: bool,
    pub select: bool,
    pub file: bool,
    pub placeholder: &'static str,
    pub options: Vec<OptionView>,
}

#[derive(Template)]
#[template(path = "signup.html")]
pub struct SignUpPage {
    brand: &'static str,
    header: HeaderLink,
    action: &'static str,
    banner: Option<BannerView>,
    uploading: bool,
    rows: Vec<FieldRow>,
    previous_resume: Option<String>,
}

pub fn landing_page() -> Result<String, askama::Error> {
    LandingPage {
        brand: BRAND,
        header: HeaderLink::for_path(Route::Landing.path()),
        signup_href: Route::SignUp.path(),
    }
    .render()
}

pub fn not_found_page(path: &str) -> Result<String, askama::Error> {
    NotFoundPage {
        brand: BRAND,
        header: HeaderLink::for_path(path),
        path,
    }
    .render()
}

/// Renders the sign-up form from a controller snapshot. A picked file cannot
/// be handed back to the browser, so the resume input always starts empty.
pub fn signup_page(view: &FormView) -> Result<String, askama::Error> {
    let banner = view.banner.as_ref().map(|banner| BannerView {
        class: match banner {
            Banner::Success(_) => "banner banner-success",
            Banner::Error(_) => "banner banner-error",
        },
        message: banner.message().to_string(),
        dismiss_ms: view.banner_lifetime.map(|d| d.as_millis()),
    });

    let mut rows: Vec<FieldRow> = FormField::ALL[..3]
        .iter()
        .map(|field| field_row(view, *field))
        .collect();
    rows.push(FieldRow {
        name: RESUME_PART,
        label: "Upload Your Resume (PDF or docx format only):",
        file: true,
        ..FieldRow::default()
    });
    rows.extend(FormField::ALL[3..].iter().map(|field| field_row(view, *field)));

    SignUpPage {
        brand: BRAND,
        header: HeaderLink::for_path(Route::SignUp.path()),
        action: Route::SignUp.path(),
        banner,
        uploading: view.uploading(),
        rows,
        previous_resume: view.resume_file_name.clone(),
    }
    .render()
}

fn field_row(view: &FormView, field: FormField) -> FieldRow {
    let value = view.value(field).to_string();
    let row = FieldRow {
        name: field.wire_name(),
        label: field_label(field),
        input_type: "text",
        ..FieldRow::default()
    };

    match field {
        FormField::Name | FormField::Phone | FormField::ExpectedCtc => FieldRow {
            value,
            required: true,
            ..row
        },
        FormField::Email => FieldRow {
            value,
            input_type: "email",
            required: true,
            ..row
        },
        FormField::Experience => FieldRow {
            value,
            input_type: "number",
            min_zero: true,
            required: true,
            ..row
        },
        FormField::HighestQualification => FieldRow {
            select: true,
            placeholder: "Select your qualification",
            options: options(Qualification::ALL.iter().map(|q| q.label()), &value),
            value,
            ..row
        },
        FormField::DesiredJobRole => FieldRow {
            select: true,
            placeholder: "Select your job role",
            options: options(JobRole::ALL.iter().map(|r| r.label()), &value),
            value,
            ..row
        },
        FormField::Address | FormField::CoverLetter => FieldRow {
            value,
            textarea: true,
            wide: true,
            ..row
        },
        FormField::GithubProfile | FormField::LinkedinProfile | FormField::PortfolioWebsite => {
            FieldRow { value, ..row }
        }
    }
}

fn options(labels: impl Iterator<Item = &'static str>, current: &str) -> Vec<OptionView> {
    labels
        .map(|value| OptionView {
            value,
            selected: value == current,
        })
        .collect()
}

fn field_label(field: FormField) -> &'static str {
    match field {
        FormField::Name => "Name:",
        FormField::Email => "Email:",
        FormField::Phone => "Phone:",
        FormField::HighestQualification => "Highest Qualification:",
        FormField::DesiredJobRole => "Desired Job Role:",
        FormField::Experience => "Experience (in years):",
        FormField::ExpectedCtc => "Expected CTC (In Indian Rupees):",
        FormField::Address => "Address:",
        FormField::GithubProfile => "GitHub Profile (optional):",
        FormField::LinkedinProfile => "LinkedIn Profile (optional):",
        FormField::PortfolioWebsite => "Portfolio Website (optional):",
        FormField::CoverLetter => "Cover Letter (optional):",
    }
}
